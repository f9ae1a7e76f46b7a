use approx::assert_abs_diff_eq;
use chart_layout::ChartError;
use chart_layout::api::{
    ChartConfig, FootprintTracker, LayoutInput, LayoutTuning, LegendConfig, LegendReserve,
    LegendSide, resolve_view_dimensions,
};
use chart_layout::core::{AxisFootprint, AxisKind, Margins, ViewDimensions, ViewSize};

fn base_input() -> LayoutInput {
    LayoutInput::bare(
        ViewSize::new(500.0, 300.0),
        Margins::from_array([10.0, 20.0, 10.0, 20.0]),
    )
}

#[test]
fn bare_layout_subtracts_margins_only() {
    let dimensions = resolve_view_dimensions(&base_input());
    assert_eq!(
        dimensions,
        ViewDimensions {
            width: 460.0,
            height: 280.0,
            x_offset: 20.0,
            y_offset: 10.0,
        }
    );
    assert_eq!(dimensions.transform(), "translate(20, 10)");
}

#[test]
fn layout_is_bit_identical_when_repeated() {
    let mut input = base_input();
    input.show_x_axis = true;
    input.show_y_axis = true;
    input.x_axis_height = 23.7;
    input.y_axis_width = 41.3;
    assert_eq!(resolve_view_dimensions(&input), resolve_view_dimensions(&input));
}

#[test]
fn shown_axes_reserve_their_footprints() {
    let mut input = base_input();
    input.show_x_axis = true;
    input.show_y_axis = true;
    input.x_axis_height = 30.0;
    input.y_axis_width = 40.0;

    let dimensions = resolve_view_dimensions(&input);
    assert_eq!(dimensions.width, 420.0);
    assert_eq!(dimensions.height, 250.0);
    assert_eq!(dimensions.x_offset, 60.0);
    assert_eq!(dimensions.y_offset, 10.0);
}

#[test]
fn hidden_axes_ignore_footprints() {
    let mut input = base_input();
    input.x_axis_height = 30.0;
    input.y_axis_width = 40.0;
    let dimensions = resolve_view_dimensions(&input);
    assert_eq!((dimensions.width, dimensions.height), (460.0, 280.0));
}

#[test]
fn axis_titles_reserve_label_offset() {
    let mut input = base_input();
    input.show_x_axis = true;
    input.show_y_axis = true;
    input.show_x_axis_label = true;
    input.show_y_axis_label = true;
    input.x_axis_height = 30.0;
    input.y_axis_width = 40.0;

    let dimensions = resolve_view_dimensions(&input);
    assert_eq!(dimensions.width, 390.0);
    assert_eq!(dimensions.height, 220.0);
    assert_eq!(dimensions.x_offset, 90.0);
}

#[test]
fn tick_gaps_come_from_tuning() {
    let mut input = base_input();
    input.show_x_axis = true;
    input.show_y_axis = true;
    input.tuning = LayoutTuning {
        x_axis_tick_gap_px: 5.0,
        y_axis_tick_gap_px: 8.0,
        axis_label_offset_px: 30.0,
    };

    let dimensions = resolve_view_dimensions(&input);
    assert_eq!(dimensions.width, 452.0);
    assert_eq!(dimensions.height, 275.0);
    assert_eq!(dimensions.x_offset, 28.0);
}

#[test]
fn legend_reserves_grid_columns_on_the_right() {
    let mut input = base_input();
    input.legend = Some(LegendConfig::default());
    let dimensions = resolve_view_dimensions(&input);
    assert_abs_diff_eq!(dimensions.width, 460.0 - 500.0 * 2.0 / 12.0, epsilon = 1e-9);
    assert_eq!(dimensions.height, 280.0);
}

#[test]
fn legend_below_reserves_height() {
    let mut input = base_input();
    input.legend = Some(LegendConfig {
        side: LegendSide::Below,
        reserve: LegendReserve::Pixels(40.0),
    });
    let dimensions = resolve_view_dimensions(&input);
    assert_eq!(dimensions.width, 460.0);
    assert_eq!(dimensions.height, 240.0);
}

#[test]
fn undersized_view_clamps_to_zero_area() {
    let mut input = base_input();
    input.view = ViewSize::new(30.0, 15.0);
    input.show_x_axis = true;
    input.x_axis_height = 40.0;

    let dimensions = resolve_view_dimensions(&input);
    assert_eq!(dimensions.width, 0.0);
    assert_eq!(dimensions.height, 0.0);
    assert!(dimensions.is_degenerate());
}

#[test]
fn footprint_tracker_reports_only_real_changes() {
    let mut tracker = FootprintTracker::default();
    assert!(tracker
        .apply(AxisKind::Y, AxisFootprint::with_width(40.0))
        .expect("valid footprint"));
    assert!(!tracker
        .apply(AxisKind::Y, AxisFootprint::with_width(40.0))
        .expect("valid footprint"));
    assert!(tracker
        .apply(AxisKind::X, AxisFootprint::with_height(22.0))
        .expect("valid footprint"));
    assert_eq!(tracker.y_axis_width(), 40.0);
    assert_eq!(tracker.x_axis_height(), 22.0);

    tracker.reset();
    assert_eq!(tracker, FootprintTracker::default());
}

#[test]
fn footprint_tracker_rejects_invalid_measurements() {
    let mut tracker = FootprintTracker::default();
    let err = tracker
        .apply(AxisKind::X, AxisFootprint::with_height(-1.0))
        .expect_err("negative height");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert!(tracker
        .apply(AxisKind::Y, AxisFootprint::with_width(f64::NAN))
        .is_err());
    assert_eq!(tracker, FootprintTracker::default());
}

#[test]
fn footprint_delta_moves_plot_by_exactly_the_delta() {
    let config = ChartConfig::new(ViewSize::new(640.0, 480.0));
    let mut tracker = FootprintTracker::default();
    tracker
        .apply(AxisKind::Y, AxisFootprint::with_width(40.0))
        .expect("valid footprint");
    tracker
        .apply(AxisKind::X, AxisFootprint::with_height(20.0))
        .expect("valid footprint");
    let before = resolve_view_dimensions(&LayoutInput::from_config(&config, tracker));

    tracker
        .apply(AxisKind::Y, AxisFootprint::with_width(55.0))
        .expect("valid footprint");
    tracker
        .apply(AxisKind::X, AxisFootprint::with_height(26.0))
        .expect("valid footprint");
    let after = resolve_view_dimensions(&LayoutInput::from_config(&config, tracker));

    assert_eq!(before.width - after.width, 15.0);
    assert_eq!(before.height - after.height, 6.0);
    assert_eq!(after.x_offset - before.x_offset, 15.0);
}

#[test]
fn config_validation_rejects_bad_legend_and_view() {
    let view = ViewSize::new(400.0, 300.0);
    let too_wide = ChartConfig::new(view).with_legend(Some(LegendConfig {
        side: LegendSide::Right,
        reserve: LegendReserve::GridColumns(13),
    }));
    assert!(too_wide.validate().is_err());

    let negative = ChartConfig::new(ViewSize::new(-1.0, 300.0));
    assert!(matches!(
        negative.validate(),
        Err(ChartError::InvalidViewSize { .. })
    ));

    let bad_margin = ChartConfig::new(view).with_margins(Margins::new(0.0, -5.0, 0.0, 0.0));
    assert!(bad_margin.validate().is_err());
}
