use chart_layout::api::{ChartConfig, EstimatedAxisMeasurer};
use chart_layout::core::{
    Curve, LinearScale, NamedSeries, ResultRecord, ScaleType, Series, ViewSize, path_descriptor,
};
use chart_layout::{BarVerticalChart, LineChart};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::vertical((0.0, 10_000.0), 1_080.0).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.apply(black_box(4_321.123)).expect("to pixel");
            let _ = scale.invert(px).expect("from pixel");
        })
    });
}

fn bench_monotone_path_10k(c: &mut Criterion) {
    let points: Vec<(f64, f64)> = (0..10_000)
        .map(|i| {
            let x = i as f64 * 0.2;
            (x, 300.0 + (x * 0.05).sin() * 120.0)
        })
        .collect();

    c.bench_function("monotone_path_10k", |b| {
        b.iter(|| {
            let _ = path_descriptor(black_box(&points), black_box(Curve::MonotoneX));
        })
    });
}

fn bench_temporal_line_chart_2k(c: &mut Criterion) {
    let records: Vec<ResultRecord> = (0..2_000)
        .rev()
        .map(|i| {
            let day = chrono::DateTime::from_timestamp(1_577_836_800 + i * 86_400, 0)
                .expect("valid timestamp");
            ResultRecord::new(day, 100.0 + (i % 37) as f64)
        })
        .collect();
    let results = vec![NamedSeries::new(
        "daily",
        Series::new(records).expect("valid series"),
    )];
    let config = ChartConfig::new(ViewSize::new(1_600.0, 900.0)).with_scale_type(ScaleType::Time);
    let mut chart = LineChart::new(config).expect("chart init");

    c.bench_function("temporal_line_chart_2k", |b| {
        b.iter(|| {
            chart
                .set_results(black_box(results.clone()))
                .expect("recompute should succeed");
        })
    });
}

fn bench_bar_chart_settle_layout(c: &mut Criterion) {
    let records: Vec<ResultRecord> = (0..60)
        .map(|i| ResultRecord::new(format!("category {i}"), (i as f64 * 7.3) - 120.0))
        .collect();
    let series = Series::new(records).expect("valid series");
    let measurer = EstimatedAxisMeasurer::default();

    c.bench_function("bar_chart_settle_layout", |b| {
        b.iter(|| {
            let mut chart = BarVerticalChart::new(ChartConfig::new(ViewSize::new(1_280.0, 720.0)))
                .expect("chart init")
                .with_results(series.clone())
                .expect("results");
            let _ = chart.settle_layout(&measurer).expect("settle");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_monotone_path_10k,
    bench_temporal_line_chart_2k,
    bench_bar_chart_settle_layout
);
criterion_main!(benches);
