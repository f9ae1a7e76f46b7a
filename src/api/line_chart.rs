use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    AxisFootprint, AxisKind, Domain, LinearScale, NamedSeries, PathGeometry, ProjectedPoint,
    ResultRecord, Scale, ViewDimensions, ViewSize, build_line_path, key_domain, make_scale, series_name_domain,
    value_domain_union,
};
use crate::error::{ChartError, ChartResult};

use super::axis_footprint::{self, AxisMeasurer, MeasurableChart};
use super::axis_label_format::tick_format_for_query;
use super::axis_ticks::{AXIS_X_TARGET_SPACING_PX, AxisTick, scale_ticks, tick_labels, value_axis_ticks};
use super::events::{ChartEvent, ChartEventListener, ListenerRegistry};
use super::layout::{FootprintTracker, LayoutInput, resolve_view_dimensions};
use super::ChartConfig;

/// Largest distance, in pixels, at which a position still activates a point.
pub const POINT_ACTIVATION_RADIUS_PX: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPath {
    pub name: String,
    pub geometry: PathGeometry,
}

/// Everything one recomputation of a line chart produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartFrame {
    pub dimensions: ViewDimensions,
    pub x_scale: Scale,
    pub y_scale: LinearScale,
    pub x_domain: Domain,
    pub y_domain: (f64, f64),
    /// Series names in first-seen order, for legends and colors.
    pub series_domain: IndexSet<String>,
    pub paths: Vec<SeriesPath>,
    pub transform: String,
}

/// Multi-series line chart.
///
/// The configured scale type picks the x mapping: categorical labels use a
/// band scale and keep input order, numeric and temporal keys are sorted
/// ascending before the path is built.
#[derive(Debug)]
pub struct LineChart {
    config: ChartConfig,
    results: Vec<NamedSeries>,
    footprints: FootprintTracker,
    frame: Option<LineChartFrame>,
    listeners: ListenerRegistry,
}

impl LineChart {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let mut chart = Self {
            config,
            results: Vec::new(),
            footprints: FootprintTracker::default(),
            frame: None,
            listeners: ListenerRegistry::default(),
        };
        chart.update()?;
        Ok(chart)
    }

    pub fn with_results(mut self, results: Vec<NamedSeries>) -> ChartResult<Self> {
        self.set_results(results)?;
        Ok(self)
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn results(&self) -> &[NamedSeries] {
        &self.results
    }

    #[must_use]
    pub fn footprints(&self) -> FootprintTracker {
        self.footprints
    }

    pub fn set_results(&mut self, results: Vec<NamedSeries>) -> ChartResult<()> {
        debug!(series = results.len(), "set line chart results");
        self.results = results;
        self.update()
    }

    pub fn set_config(&mut self, config: ChartConfig) -> ChartResult<()> {
        if let Err(err) = config.validate() {
            warn!(error = %err, "rejecting line chart config");
            return Err(err);
        }
        self.config = config;
        self.update()
    }

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

    pub fn settle_layout<M: AxisMeasurer + ?Sized>(&mut self, measurer: &M) -> ChartResult<usize> {
        axis_footprint::settle_layout(self, measurer)
    }

    #[must_use]
    pub fn frame(&self) -> Option<&LineChartFrame> {
        self.frame.as_ref()
    }

    #[must_use]
    pub fn dimensions(&self) -> Option<ViewDimensions> {
        self.frame.as_ref().map(|frame| frame.dimensions)
    }

    #[must_use]
    pub fn x_scale(&self) -> Option<&Scale> {
        self.frame.as_ref().map(|frame| &frame.x_scale)
    }

    #[must_use]
    pub fn y_scale(&self) -> Option<LinearScale> {
        self.frame.as_ref().map(|frame| frame.y_scale)
    }

    /// Key domain, value domain and series-name domain of the current frame.
    #[must_use]
    pub fn domains(&self) -> Option<(&Domain, (f64, f64), &IndexSet<String>)> {
        self.frame
            .as_ref()
            .map(|frame| (&frame.x_domain, frame.y_domain, &frame.series_domain))
    }

    #[must_use]
    pub fn paths(&self) -> &[SeriesPath] {
        self.frame
            .as_ref()
            .map(|frame| frame.paths.as_slice())
            .unwrap_or_default()
    }

    /// Closest projected point over all series, with the name of its series.
    #[must_use]
    pub fn nearest_point(&self, x: f64, y: f64) -> Option<(&str, &ProjectedPoint)> {
        self.paths()
            .iter()
            .filter_map(|path| {
                path.geometry
                    .nearest(x, y)
                    .map(|point| (path.name.as_str(), point))
            })
            .min_by(|(_, a), (_, b)| distance_sq(a, x, y).total_cmp(&distance_sq(b, x, y)))
    }

    pub fn x_axis_ticks(&self) -> ChartResult<Vec<AxisTick>> {
        let Some(frame) = self.frame.as_ref() else {
            return Ok(Vec::new());
        };
        let format = self
            .results
            .first()
            .and_then(|named| tick_format_for_query(named.series.query()));
        scale_ticks(
            &frame.x_scale,
            frame.dimensions.width,
            AXIS_X_TARGET_SPACING_PX,
            format,
        )
    }

    pub fn y_axis_ticks(&self) -> ChartResult<Vec<AxisTick>> {
        let Some(frame) = self.frame.as_ref() else {
            return Ok(Vec::new());
        };
        value_axis_ticks(frame.y_scale, frame.dimensions.height)
    }

    /// Raises an activation event for one record of one series, by input position.
    pub fn activate(&mut self, series_index: usize, record_index: usize) -> ChartResult<()> {
        let named = self.results.get(series_index).ok_or_else(|| {
            ChartError::InvalidData(format!("no line series at index {series_index}"))
        })?;
        let record = named
            .series
            .records()
            .get(record_index)
            .cloned()
            .ok_or_else(|| {
                ChartError::InvalidData(format!(
                    "series `{}` has no record at index {record_index}",
                    named.name
                ))
            })?;
        let series = named.name.clone();
        self.emit_activated(series, record);
        Ok(())
    }

    /// Activates the nearest point within [`POINT_ACTIVATION_RADIUS_PX`].
    pub fn activate_at(&mut self, x: f64, y: f64) -> bool {
        let hit = self
            .nearest_point(x, y)
            .filter(|(_, point)| distance_sq(point, x, y) <= POINT_ACTIVATION_RADIUS_PX.powi(2))
            .map(|(name, point)| (name.to_owned(), point.record.clone()));
        let Some((series, record)) = hit else {
            return false;
        };
        self.emit_activated(series, record);
        true
    }

    pub fn add_listener(&mut self, listener: Box<dyn ChartEventListener + Send>) -> ChartResult<()> {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, listener_id: &str) -> bool {
        self.listeners.remove(listener_id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn emit_activated(&mut self, series: String, record: ResultRecord) {
        trace!(%series, name = %record.name, value = record.value, "point activated");
        self.listeners.emit(&ChartEvent::Activated {
            series: Some(series),
            record,
        });
    }

    fn update(&mut self) -> ChartResult<()> {
        match compute_frame(&self.config, &self.results, self.footprints) {
            Ok(frame) => {
                let dimensions = frame.dimensions;
                debug!(
                    series = frame.paths.len(),
                    scale_type = ?self.config.scale_type,
                    width = dimensions.width,
                    height = dimensions.height,
                    "line chart frame resolved"
                );
                self.frame = Some(frame);
                self.listeners
                    .emit(&ChartEvent::LayoutResolved { dimensions });
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "discarding stale line chart frame");
                self.frame = None;
                Err(err)
            }
        }
    }
}

impl MeasurableChart for LineChart {
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
        LineChart::on_axis_footprint_measured(self, axis, footprint)
    }
}

fn distance_sq(point: &ProjectedPoint, x: f64, y: f64) -> f64 {
    (point.x - x).powi(2) + (point.y - y).powi(2)
}

fn compute_frame(
    config: &ChartConfig,
    results: &[NamedSeries],
    footprints: FootprintTracker,
) -> ChartResult<LineChartFrame> {
    let scale_type = config.scale_type;
    let x_domain = key_domain(results.iter().map(|named| &named.series), scale_type)?;
    let y_domain = value_domain_union(results.iter().map(|named| &named.series));
    let series_domain = series_name_domain(results);
    let dimensions = resolve_view_dimensions(&LayoutInput::from_config(config, footprints));

    let x_scale = make_scale(scale_type.scale_kind(), &x_domain, (0.0, dimensions.width))?;
    let y_scale = LinearScale::vertical(y_domain, dimensions.height)?;
    let paths = results
        .iter()
        .map(|named| {
            Ok(SeriesPath {
                name: named.name.clone(),
                geometry: build_line_path(
                    &named.series,
                    &x_scale,
                    y_scale,
                    scale_type,
                    config.curve,
                )?,
            })
        })
        .collect::<ChartResult<Vec<_>>>()?;

    Ok(LineChartFrame {
        transform: dimensions.transform(),
        dimensions,
        x_scale,
        y_scale,
        x_domain,
        y_domain,
        series_domain,
        paths,
    })
}
