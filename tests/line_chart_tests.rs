use std::sync::{Arc, Mutex};

use chart_layout::api::{ChartConfig, ChartEvent, ChartEventListener, EstimatedAxisMeasurer};
use chart_layout::core::{
    Curve, Domain, NamedSeries, ResultRecord, Scale, ScaleType, Series, ViewSize,
};
use chart_layout::{ChartError, LineChart};

struct RecordingListener {
    events: Arc<Mutex<Vec<ChartEvent>>>,
}

impl ChartEventListener for RecordingListener {
    fn id(&self) -> &str {
        "recorder"
    }

    fn on_event(&mut self, event: &ChartEvent) {
        self.events.lock().expect("events lock").push(event.clone());
    }
}

fn series(records: &[(&str, f64)]) -> Series {
    Series::new(
        records
            .iter()
            .map(|(name, value)| ResultRecord::new(*name, *value))
            .collect(),
    )
    .expect("valid series")
}

fn temporal_results() -> Vec<NamedSeries> {
    vec![
        NamedSeries::new("sales", series(&[("2020-01-03", 1.0), ("2020-01-01", 5.0)])),
        NamedSeries::new("cost", series(&[("2020-01-02", 2.0)])),
    ]
}

fn temporal_chart() -> LineChart {
    let config = ChartConfig::new(ViewSize::new(500.0, 300.0))
        .with_axes(false, false)
        .with_scale_type(ScaleType::Time);
    LineChart::new(config)
        .expect("chart init")
        .with_results(temporal_results())
        .expect("results")
}

#[test]
fn temporal_lines_are_sorted_by_date() {
    let chart = temporal_chart();
    let paths = chart.paths();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].name, "sales");
    assert_eq!(paths[0].geometry.path, "M0,0L460,224");
    assert_eq!(paths[1].geometry.path, "M230,168Z");
    assert!(matches!(chart.x_scale(), Some(Scale::Temporal(_))));
}

#[test]
fn line_chart_exposes_all_three_domains() {
    let chart = temporal_chart();
    let (keys, values, names) = chart.domains().expect("domains");
    assert!(matches!(keys, Domain::Temporal { .. }));
    assert_eq!(values, (0.0, 5.0));
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    assert_eq!(names, ["sales", "cost"]);
}

#[test]
fn failed_recomputation_discards_stale_frame() {
    let mut chart = temporal_chart();
    assert!(chart.frame().is_some());

    let err = chart
        .set_results(vec![NamedSeries::new(
            "broken",
            series(&[("2020-01-01", 1.0), ("soon", 2.0)]),
        )])
        .expect_err("soon is not a date");
    assert!(matches!(err, ChartError::UnparsableLabel { index: 1, .. }));
    assert!(chart.frame().is_none());
    assert!(chart.paths().is_empty());
    assert!(chart.dimensions().is_none());

    chart.set_results(temporal_results()).expect("valid results");
    assert!(chart.frame().is_some());
}

#[test]
fn ordinal_lines_keep_input_order() {
    let config = ChartConfig::new(ViewSize::new(500.0, 300.0)).with_axes(false, false);
    let chart = LineChart::new(config)
        .expect("chart init")
        .with_results(vec![NamedSeries::new(
            "visits",
            series(&[("mon", 1.0), ("tue", 3.0), ("wed", 2.0)]),
        )])
        .expect("results");

    let names: Vec<String> = chart.paths()[0]
        .geometry
        .points
        .iter()
        .map(|point| point.record.name.to_string())
        .collect();
    assert_eq!(names, ["mon", "tue", "wed"]);
    assert!(matches!(chart.x_scale(), Some(Scale::Band(_))));
}

#[test]
fn configured_curve_shapes_the_path() {
    let config = ChartConfig::new(ViewSize::new(500.0, 300.0))
        .with_axes(false, false)
        .with_scale_type(ScaleType::Linear)
        .with_curve(Curve::MonotoneX);
    let chart = LineChart::new(config)
        .expect("chart init")
        .with_results(vec![NamedSeries::new(
            "load",
            series(&[("0", 1.0), ("1", 4.0), ("2", 2.0)]),
        )])
        .expect("results");
    let path = &chart.paths()[0].geometry.path;
    assert!(path.starts_with("M0,"));
    assert!(path.contains('C'));
}

#[test]
fn activation_names_the_series() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let mut chart = temporal_chart();
    chart
        .add_listener(Box::new(RecordingListener {
            events: events.clone(),
        }))
        .expect("register listener");

    assert!(chart.activate_at(229.0, 170.0));
    assert!(!chart.activate_at(100.0, 260.0));
    chart.activate(0, 1).expect("activate");
    assert!(chart.activate(2, 0).is_err());

    let events = events.lock().expect("events lock");
    assert_eq!(
        *events,
        vec![
            ChartEvent::Activated {
                series: Some("cost".to_owned()),
                record: ResultRecord::new("2020-01-02", 2.0),
            },
            ChartEvent::Activated {
                series: Some("sales".to_owned()),
                record: ResultRecord::new("2020-01-01", 5.0),
            },
        ]
    );
}

#[test]
fn empty_results_produce_no_paths() {
    let config = ChartConfig::new(ViewSize::new(400.0, 300.0)).with_scale_type(ScaleType::Time);
    let mut chart = LineChart::new(config)
        .expect("chart init")
        .with_results(vec![NamedSeries::new("nothing", Series::empty())])
        .expect("results");
    assert_eq!(chart.paths()[0].geometry.path, "");
    assert!(chart.nearest_point(10.0, 10.0).is_none());
    chart.on_inputs_changed().expect("recompute");
}

#[test]
fn temporal_axis_ticks_use_calendar_labels() {
    let config = ChartConfig::new(ViewSize::new(500.0, 300.0)).with_scale_type(ScaleType::Time);
    let mut chart = LineChart::new(config)
        .expect("chart init")
        .with_results(temporal_results())
        .expect("results");
    chart
        .settle_layout(&EstimatedAxisMeasurer::default())
        .expect("settle");

    let ticks = chart.x_axis_ticks().expect("x ticks");
    assert!(!ticks.is_empty());
    assert!(ticks.iter().any(|tick| tick.label == "2020-01-02 00:00"));
    assert!(ticks.windows(2).all(|pair| pair[0].position < pair[1].position));
}
