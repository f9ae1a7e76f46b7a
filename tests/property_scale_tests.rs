use chart_layout::api::{LayoutInput, resolve_view_dimensions};
use chart_layout::core::{
    BandScale, LinearScale, Margins, ResultRecord, Series, ViewSize, value_domain,
};
use indexmap::IndexSet;
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_scale_round_trip_property(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0,
        height in 1.0f64..4_000.0
    ) {
        let domain_end = domain_start + domain_span;
        let value = domain_start + value_factor * domain_span;
        let scale = LinearScale::vertical((domain_start, domain_end), height).expect("valid scale");

        let px = scale.apply(value).expect("to pixel");
        let recovered = scale.invert(px).expect("from pixel");

        prop_assert!((recovered - value).abs() <= 1e-6 * domain_span.max(1.0));
    }

    #[test]
    fn degenerate_domain_maps_to_midpoint_property(
        point in -1_000_000.0f64..1_000_000.0,
        value in -1_000_000.0f64..1_000_000.0,
        range_start in -500.0f64..500.0,
        range_end in -500.0f64..500.0
    ) {
        let scale = LinearScale::new((point, point), (range_start, range_end)).expect("valid scale");
        prop_assert_eq!(scale.apply(value).expect("map"), (range_start + range_end) * 0.5);
    }

    #[test]
    fn band_widths_and_gaps_fill_range_property(
        count in 1usize..64,
        width in 1.0f64..5_000.0
    ) {
        let domain: IndexSet<String> = (0..count).map(|i| format!("c{i}")).collect();
        let scale = BandScale::new(domain, (0.0, width)).expect("band scale");
        let n = count as f64;

        let bands = n * scale.bandwidth();
        let gaps = n * (scale.step() - scale.bandwidth());
        prop_assert!((bands + gaps - width).abs() <= 1e-9 * width.max(1.0));
        prop_assert!((scale.bandwidth() / scale.step() - 0.8).abs() <= 1e-12);

        for index in 1..count {
            prop_assert!(scale.position_at(index) > scale.position_at(index - 1));
        }
    }

    #[test]
    fn value_domain_always_contains_zero_property(
        values in prop::collection::vec(-1_000.0f64..1_000.0, 0..40)
    ) {
        let series = Series::new(
            values
                .iter()
                .enumerate()
                .map(|(i, value)| ResultRecord::new(format!("r{i}"), *value))
                .collect(),
        )
        .expect("finite values");
        let (min, max) = value_domain(&series);

        prop_assert!(min <= 0.0 && max >= 0.0);
        if values.iter().all(|value| *value >= 0.0) {
            prop_assert_eq!(min, 0.0);
        }
        if values.iter().all(|value| *value < 0.0) {
            prop_assert_eq!(max, 0.0);
        }
    }

    #[test]
    fn layout_is_idempotent_and_never_negative_property(
        width in 0.0f64..2_000.0,
        height in 0.0f64..2_000.0,
        margin in 0.0f64..300.0,
        x_axis_height in 0.0f64..200.0,
        y_axis_width in 0.0f64..200.0
    ) {
        let mut input = LayoutInput::bare(
            ViewSize::new(width, height),
            Margins::new(margin, margin, margin, margin),
        );
        input.show_x_axis = true;
        input.show_y_axis = true;
        input.x_axis_height = x_axis_height;
        input.y_axis_width = y_axis_width;

        let first = resolve_view_dimensions(&input);
        let second = resolve_view_dimensions(&input);

        prop_assert_eq!(first, second);
        prop_assert!(first.width >= 0.0);
        prop_assert!(first.height >= 0.0);
    }
}
