use proptest::prelude::*;
use streamflow_chart::core::{
    LayoutProfile, ScaleKind, ScreenCategory, ValueDomain, compute_layout, left_margin,
};

proptest! {
    #[test]
    fn height_follows_aspect_ratio(
        width in 1.0f64..5_000.0,
        max in 1.0f64..1_000_000.0,
        log in any::<bool>()
    ) {
        let scale_kind = if log { ScaleKind::Log } else { ScaleKind::Linear };
        let layout = compute_layout(
            Some(width),
            Some(ValueDomain::new(0.0, max).expect("valid domain")),
            scale_kind,
            ScreenCategory::Desktop,
            LayoutProfile::Compact,
        );
        prop_assert_eq!(layout.width, width);
        prop_assert_eq!(layout.height, 0.8 * width);
    }

    #[test]
    fn left_margin_never_shrinks_with_longer_labels(length in 0usize..200) {
        prop_assert!(left_margin(length + 1) >= left_margin(length));
    }
}
