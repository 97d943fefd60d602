use approx::assert_relative_eq;
use chrono::NaiveDate;
use streamflow_chart::core::{
    LinearScale, ValueDomain, ValueTransform, build_time_scale, build_value_scale,
    pad_value_domain, start_of_day,
};

fn domain(min: f64, max: f64) -> ValueDomain {
    ValueDomain::new(min, max).expect("valid domain")
}

#[test]
fn degenerate_domain_is_padded_by_half_its_value() {
    let scale = build_value_scale(Some(domain(10.0, 10.0)), 100.0, false, false);

    assert_eq!(scale.domain(), Some((5.0, 15.0)));
    assert_eq!(scale.range(), (100.0, 0.0));
    assert_eq!(scale.map(5.0), 100.0);
    assert_eq!(scale.map(15.0), 0.0);
}

#[test]
fn zero_domain_becomes_unit_interval_around_zero() {
    let scale = build_value_scale(Some(domain(0.0, 0.0)), 200.0, false, false);
    assert_eq!(scale.domain(), Some((-0.5, 0.5)));
}

#[test]
fn positive_domain_is_clamped_at_zero() {
    assert_eq!(pad_value_domain(domain(1.0, 11.0), false), (0.0, 13.0));
    assert_eq!(pad_value_domain(domain(50.0, 60.0), false), (48.0, 62.0));
}

#[test]
fn negative_domain_is_padded_on_both_sides() {
    let (low, high) = pad_value_domain(domain(-10.0, -5.0), false);
    assert_relative_eq!(low, -11.0, epsilon = 1e-12);
    assert_relative_eq!(high, -4.0, epsilon = 1e-12);
}

#[test]
fn reverse_range_flips_pixel_direction() {
    let scale = build_value_scale(Some(domain(0.0, 100.0)), 300.0, false, true);
    assert_eq!(scale.range(), (0.0, 300.0));
    assert!(scale.map(100.0) > scale.map(0.0));
}

#[test]
fn missing_domain_leaves_scale_uncalibrated() {
    let scale = build_value_scale(None, 120.0, true, false);
    assert!(!scale.is_calibrated());
    assert_eq!(scale.domain(), None);
    assert_eq!(scale.range(), (120.0, 0.0));
    assert!(scale.map(0.5).is_finite());
}

#[test]
fn symlog_scale_is_continuous_through_zero() {
    let scale = build_value_scale(Some(domain(-1000.0, 1000.0)), 400.0, true, false);
    assert_eq!(scale.transform(), ValueTransform::Symlog);

    let below = scale.map(-0.001);
    let at = scale.map(0.0);
    let above = scale.map(0.001);
    assert!(below > at && at > above);
    assert_relative_eq!(at, 200.0, epsilon = 1e-9);
    assert_relative_eq!(scale.invert(scale.map(250.0)), 250.0, epsilon = 1e-9);
}

#[test]
fn linear_scale_round_trip_within_tolerance() {
    let scale = LinearScale::new((10.0, 110.0), (0.0, 1000.0));
    let px = scale.map(42.5);
    assert_relative_eq!(scale.invert(px), 42.5, epsilon = 1e-9);
}

#[test]
fn time_scale_inverts_pixels_to_instants() {
    let start = start_of_day(NaiveDate::from_ymd_opt(2024, 3, 1).expect("date"));
    let end = start_of_day(NaiveDate::from_ymd_opt(2024, 3, 11).expect("date"));
    let scale = build_time_scale(Some((start, end)), 1000.0);

    let mid = start_of_day(NaiveDate::from_ymd_opt(2024, 3, 6).expect("date"));
    assert_eq!(scale.invert(500.0), mid);
    assert!(scale.has_domain());
}

#[test]
fn time_scale_without_domain_uses_first_millisecond() {
    let scale = build_time_scale(None, 640.0);
    assert!(!scale.has_domain());
    assert_eq!(scale.domain_millis(), (0.0, 1.0));
    assert_eq!(scale.map_millis(1.0), 640.0);
}
