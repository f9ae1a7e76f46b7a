use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    AxisFootprint, AxisKind, BandScale, BarGeometry, LinearScale, ResultRecord, Scale, Series,
    ViewDimensions, ViewSize, categorical_domain, project_bars, value_domain,
};
use crate::error::{ChartError, ChartResult};

use super::axis_footprint::{self, AxisMeasurer, MeasurableChart};
use super::axis_label_format::tick_format_for_query;
use super::axis_ticks::{AXIS_X_TARGET_SPACING_PX, AxisTick, scale_ticks, tick_labels, value_axis_ticks};
use super::events::{ChartEvent, ChartEventListener, ListenerRegistry};
use super::layout::{FootprintTracker, LayoutInput, resolve_view_dimensions};
use super::ChartConfig;

/// Everything one recomputation of a bar chart produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartFrame {
    pub dimensions: ViewDimensions,
    pub x_scale: BandScale,
    pub y_scale: LinearScale,
    pub x_domain: IndexSet<String>,
    pub y_domain: (f64, f64),
    pub bars: Vec<BarGeometry>,
    /// SVG transform placing the plot group inside the view.
    pub transform: String,
}

/// Vertical bar chart over one categorical result series.
///
/// Every entry point reruns the whole domain, scale, layout and projection
/// pipeline and replaces the frame. A failed run leaves no frame behind.
#[derive(Debug)]
pub struct BarVerticalChart {
    config: ChartConfig,
    results: Series,
    footprints: FootprintTracker,
    frame: Option<BarChartFrame>,
    listeners: ListenerRegistry,
}

impl BarVerticalChart {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let mut chart = Self {
            config,
            results: Series::empty(),
            footprints: FootprintTracker::default(),
            frame: None,
            listeners: ListenerRegistry::default(),
        };
        chart.update()?;
        Ok(chart)
    }

    pub fn with_results(mut self, results: Series) -> ChartResult<Self> {
        self.set_results(results)?;
        Ok(self)
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn results(&self) -> &Series {
        &self.results
    }

    #[must_use]
    pub fn footprints(&self) -> FootprintTracker {
        self.footprints
    }

    pub fn set_results(&mut self, results: Series) -> ChartResult<()> {
        debug!(records = results.len(), "set bar chart results");
        self.results = results;
        self.update()
    }

    pub fn set_config(&mut self, config: ChartConfig) -> ChartResult<()> {
        if let Err(err) = config.validate() {
            warn!(error = %err, "rejecting bar chart config");
            return Err(err);
        }
        self.config = config;
        self.update()
    }

    /// Recomputes after the host changed inputs it owns.
    pub fn on_inputs_changed(&mut self) -> ChartResult<()> {
        self.update()
    }

    pub fn on_view_resized(&mut self, view: ViewSize) -> ChartResult<()> {
        let view = view.validate()?;
        self.config.view = view;
        self.update()
    }

    /// Stores a measured axis footprint; returns whether the frame was recomputed.
    pub fn on_axis_footprint_measured(
        &mut self,
        axis: AxisKind,
        footprint: AxisFootprint,
    ) -> ChartResult<bool> {
        if !self.footprints.apply(axis, footprint)? {
            trace!(?axis, "axis footprint unchanged, keeping frame");
            return Ok(false);
        }
        self.update()?;
        Ok(true)
    }

    /// Runs the measure/apply exchange with `measurer` until footprints settle.
    pub fn settle_layout<M: AxisMeasurer + ?Sized>(&mut self, measurer: &M) -> ChartResult<usize> {
        axis_footprint::settle_layout(self, measurer)
    }

    #[must_use]
    pub fn frame(&self) -> Option<&BarChartFrame> {
        self.frame.as_ref()
    }

    #[must_use]
    pub fn dimensions(&self) -> Option<ViewDimensions> {
        self.frame.as_ref().map(|frame| frame.dimensions)
    }

    #[must_use]
    pub fn x_scale(&self) -> Option<&BandScale> {
        self.frame.as_ref().map(|frame| &frame.x_scale)
    }

    #[must_use]
    pub fn y_scale(&self) -> Option<LinearScale> {
        self.frame.as_ref().map(|frame| frame.y_scale)
    }

    /// Category domain and value domain of the current frame.
    #[must_use]
    pub fn domains(&self) -> Option<(&IndexSet<String>, (f64, f64))> {
        self.frame
            .as_ref()
            .map(|frame| (&frame.x_domain, frame.y_domain))
    }

    #[must_use]
    pub fn bars(&self) -> &[BarGeometry] {
        self.frame
            .as_ref()
            .map(|frame| frame.bars.as_slice())
            .unwrap_or_default()
    }

    /// Bar under a plot-local position.
    #[must_use]
    pub fn bar_at(&self, x: f64, y: f64) -> Option<&BarGeometry> {
        self.bars().iter().find(|bar| bar.contains(x, y))
    }

    pub fn x_axis_ticks(&self) -> ChartResult<Vec<AxisTick>> {
        let Some(frame) = self.frame.as_ref() else {
            return Ok(Vec::new());
        };
        scale_ticks(
            &Scale::Band(frame.x_scale.clone()),
            frame.dimensions.width,
            AXIS_X_TARGET_SPACING_PX,
            tick_format_for_query(self.results.query()),
        )
    }

    pub fn y_axis_ticks(&self) -> ChartResult<Vec<AxisTick>> {
        let Some(frame) = self.frame.as_ref() else {
            return Ok(Vec::new());
        };
        value_axis_ticks(frame.y_scale, frame.dimensions.height)
    }

    /// Raises an activation event for the record at `index`.
    pub fn activate(&mut self, index: usize) -> ChartResult<()> {
        let record = self.results.records().get(index).cloned().ok_or_else(|| {
            ChartError::InvalidData(format!("no bar chart record at index {index}"))
        })?;
        self.emit_activated(record);
        Ok(())
    }

    /// Activates the bar under a plot-local position; returns whether one was hit.
    pub fn activate_at(&mut self, x: f64, y: f64) -> bool {
        let Some(record) = self.bar_at(x, y).map(|bar| bar.record.clone()) else {
            return false;
        };
        self.emit_activated(record);
        true
    }

    pub fn add_listener(&mut self, listener: Box<dyn ChartEventListener + Send>) -> ChartResult<()> {
        self.listeners.add(listener)
    }

    /// Removes a listener by id. Returns `true` when removed.
    pub fn remove_listener(&mut self, listener_id: &str) -> bool {
        self.listeners.remove(listener_id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn emit_activated(&mut self, record: ResultRecord) {
        trace!(name = %record.name, value = record.value, "bar activated");
        self.listeners.emit(&ChartEvent::Activated {
            series: None,
            record,
        });
    }

    fn update(&mut self) -> ChartResult<()> {
        match compute_frame(&self.config, &self.results, self.footprints) {
            Ok(frame) => {
                let dimensions = frame.dimensions;
                debug!(
                    bars = frame.bars.len(),
                    width = dimensions.width,
                    height = dimensions.height,
                    "bar chart frame resolved"
                );
                self.frame = Some(frame);
                self.listeners
                    .emit(&ChartEvent::LayoutResolved { dimensions });
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "discarding stale bar chart frame");
                self.frame = None;
                Err(err)
            }
        }
    }
}

impl MeasurableChart for BarVerticalChart {
    fn axis_labels(&self, axis: AxisKind) -> Vec<String> {
        let ticks = match axis {
            AxisKind::X if self.config.show_x_axis => self.x_axis_ticks(),
            AxisKind::Y if self.config.show_y_axis => self.y_axis_ticks(),
            AxisKind::X | AxisKind::Y => return Vec::new(),
        };
        ticks.map(|ticks| tick_labels(&ticks)).unwrap_or_default()
    }

    fn axis_span_px(&self, axis: AxisKind) -> f64 {
        self.dimensions().map_or(0.0, |dimensions| match axis {
            AxisKind::X => dimensions.width,
            AxisKind::Y => dimensions.height,
        })
    }

    fn on_axis_footprint_measured(
        &mut self,
        axis: AxisKind,
        footprint: AxisFootprint,
    ) -> ChartResult<bool> {
        BarVerticalChart::on_axis_footprint_measured(self, axis, footprint)
    }
}

fn compute_frame(
    config: &ChartConfig,
    results: &Series,
    footprints: FootprintTracker,
) -> ChartResult<BarChartFrame> {
    let x_domain = categorical_domain(results);
    let y_domain = value_domain(results);
    let dimensions = resolve_view_dimensions(&LayoutInput::from_config(config, footprints));

    let range = (0.0, dimensions.width);
    let x_scale = if config.round_bands {
        BandScale::rounded(x_domain.clone(), range)?
    } else {
        BandScale::new(x_domain.clone(), range)?
    };
    let y_scale = LinearScale::vertical(y_domain, dimensions.height)?;
    let bars = project_bars(results, &x_scale, y_scale)?;

    Ok(BarChartFrame {
        transform: dimensions.transform(),
        dimensions,
        x_scale,
        y_scale,
        x_domain,
        y_domain,
        bars,
    })
}
