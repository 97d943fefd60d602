use chrono::{Days, NaiveDate, NaiveDateTime};
use streamflow_chart::core::{
    Point, Segment, TimeScale, ValueDomain, ValueScale, build_time_scale, build_value_scale,
    start_of_day,
};
use streamflow_chart::render::{
    AreaOptions, AreaRenderer, DiamondRenderer, DrawRequest, GroupKey, LineRenderer, MarkFamily,
    MarkGeometry, MarkKey, MarkKind, PointRenderer, RectRenderer, Scene, SegmentRenderer,
};

fn day(n: u64) -> NaiveDateTime {
    let date = NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|date| date.checked_add_days(Days::new(n)))
        .expect("valid date");
    start_of_day(date)
}

/// Ten pixels per day, values 0..100 padded to 0..120 over 120 px.
fn scales() -> (TimeScale, ValueScale) {
    let x = build_time_scale(Some((day(0), day(10))), 100.0);
    let y = build_value_scale(
        Some(ValueDomain::new(0.0, 100.0).expect("valid domain")),
        120.0,
        false,
        false,
    );
    (x, y)
}

fn request<'a>(segments: &'a [Segment], data_kind: &'a str) -> DrawRequest<'a> {
    let (x_scale, y_scale) = scales();
    DrawRequest {
        visible: true,
        segments,
        data_kind,
        x_scale,
        y_scale,
        transition_length_ms: 0.0,
        enable_clip: false,
        clip_id_key: None,
        now_ms: 0.0,
    }
}

fn path_segment(id: &str, lead: u64, values: &[f64]) -> Segment {
    let points = values
        .iter()
        .enumerate()
        .map(|(offset, value)| {
            let n = lead + offset as u64;
            Point::new(format!("site-{n}"), day(n), *value).with_value_min(value / 2.0)
        })
        .collect();
    Segment::new(id, points).expect("segment")
}

#[test]
fn single_point_segment_draws_one_marker_not_a_path() {
    let segments =
        vec![Segment::new("s1", vec![Point::new("site-1", day(1), 5.0)]).expect("segment")];
    let mut scene = Scene::new();
    let summary = LineRenderer.draw(&mut scene, &request(&segments, "primary"));

    assert_eq!(summary.entered, 1);
    let group = scene.group(&GroupKey::new("primary")).expect("group");
    assert_eq!(group.len(), 1);
    assert_eq!(group.count_kind(MarkKind::Marker), 1);
    assert_eq!(group.count_kind(MarkKind::Line), 0);

    let marker = group.mark(&MarkKey::new(MarkKind::Marker, "site-1")).expect("marker");
    let MarkGeometry::Circle(circle) = marker.transition.target() else {
        panic!("marker should be a circle");
    };
    assert_eq!(circle.r, 5.0);
    assert_eq!(circle.cx, 10.0);
    assert_eq!(circle.cy, 115.0);
}

#[test]
fn masked_segment_only_draws_the_two_mask_rects() {
    let segments = vec![path_segment("s1", 2, &[10.0, 20.0, 30.0]).masked()];
    let mut scene = Scene::new();
    LineRenderer.draw(&mut scene, &request(&segments, "primary"));
    AreaRenderer::default().draw(&mut scene, &request(&segments, "band"));

    for (data_kind, family) in [("primary", MarkFamily::Line), ("band", MarkFamily::Area)] {
        let group = scene.group(&GroupKey::new(data_kind)).expect("group");
        assert_eq!(group.len(), 2);
        assert_eq!(group.count_kind(MarkKind::MaskFill(family)), 1);
        assert_eq!(group.count_kind(MarkKind::MaskHatch(family)), 1);
    }

    let group = scene.group(&GroupKey::new("primary")).expect("group");
    let hatch = group
        .mark(&MarkKey::new(MarkKind::MaskHatch(MarkFamily::Line), "site-2"))
        .expect("hatch");
    assert_eq!(hatch.element_id, "mask-hatch-line-site-2");
    assert_eq!(hatch.fill.as_deref(), Some("url(#hatch-primary)"));
    let MarkGeometry::Rect(rect) = hatch.transition.target() else {
        panic!("mask should be a rect");
    };
    assert_eq!((rect.x, rect.width), (20.0, 20.0));
    assert_eq!((rect.y, rect.height), (0.0, 120.0));
}

#[test]
fn layers_sharing_a_group_keep_each_others_masks() {
    let masked = vec![path_segment("s1", 2, &[10.0, 20.0]).masked()];
    let plain = vec![path_segment("s2", 6, &[40.0, 50.0])];
    let mut scene = Scene::new();

    LineRenderer.draw(&mut scene, &request(&masked, "primary"));
    let summary = PointRenderer.draw(&mut scene, &request(&plain, "primary"));

    assert_eq!(summary.exited, 0);
    let group = scene.group(&GroupKey::new("primary")).expect("group");
    assert_eq!(group.count_kind(MarkKind::MaskFill(MarkFamily::Line)), 1);
    assert_eq!(group.count_kind(MarkKind::MaskHatch(MarkFamily::Line)), 1);
    assert_eq!(group.count_kind(MarkKind::Point), 2);

    // Points masking the same span add their own pair next to the line's.
    let summary = PointRenderer.draw(&mut scene, &request(&masked, "primary"));
    assert_eq!((summary.entered, summary.exited), (2, 2));
    let group = scene.group(&GroupKey::new("primary")).expect("group");
    assert_eq!(group.count_kind(MarkKind::MaskFill(MarkFamily::Line)), 1);
    assert_eq!(group.count_kind(MarkKind::MaskFill(MarkFamily::Point)), 1);
    assert_eq!(group.len(), 4);

    // A line redraw without masked segments exits only the line's masks.
    let summary = LineRenderer.draw(&mut scene, &request(&plain, "primary"));
    assert_eq!(summary.exited, 2);
    let group = scene.group(&GroupKey::new("primary")).expect("group");
    assert_eq!(group.count_kind(MarkKind::MaskFill(MarkFamily::Line)), 0);
    assert_eq!(group.count_kind(MarkKind::MaskHatch(MarkFamily::Point)), 1);
    assert_eq!(group.count_kind(MarkKind::Line), 1);
}

#[test]
fn removed_segments_exit_immediately() {
    let mut scene = Scene::new();
    let first = vec![path_segment("a", 0, &[1.0, 2.0]), path_segment("b", 5, &[3.0, 4.0])];
    LineRenderer.draw(&mut scene, &request(&first, "primary"));

    let second = vec![path_segment("b", 5, &[6.0, 7.0])];
    let summary = LineRenderer.draw(&mut scene, &request(&second, "primary"));

    assert_eq!((summary.entered, summary.updated, summary.exited), (0, 1, 1));
    let group = scene.group(&GroupKey::new("primary")).expect("group");
    assert!(group.mark(&MarkKey::new(MarkKind::Line, "site-0")).is_none());
    let line = group.mark(&MarkKey::new(MarkKind::Line, "site-5")).expect("line");
    assert_eq!(line.element_id, "path-site-5");
    assert_eq!(line.class_attr(), "ts-line ts-primary");
}

#[test]
fn invisible_draw_keeps_marks_but_still_applies_clip() {
    let mut scene = Scene::new();
    let segments = vec![path_segment("a", 0, &[1.0, 2.0])];
    PointRenderer.draw(&mut scene, &request(&segments, "obs"));

    let hidden = DrawRequest {
        visible: false,
        enable_clip: true,
        clip_id_key: Some("site-chart"),
        ..request(&[], "obs")
    };
    let summary = PointRenderer.draw(&mut scene, &hidden);

    assert_eq!(summary.total(), 0);
    let group = scene.group(&GroupKey::new("obs")).expect("group");
    assert_eq!(group.len(), 2);
    assert_eq!(group.clip_path.as_deref(), Some("url(#site-chart-chart-clip)"));
}

#[test]
fn clip_without_key_uses_shared_region() {
    let mut scene = Scene::new();
    let segments = vec![path_segment("a", 0, &[1.0, 2.0])];
    let clipped = DrawRequest {
        enable_clip: true,
        ..request(&segments, "obs")
    };
    RectRenderer.draw(&mut scene, &clipped);

    let group = scene.group(&GroupKey::new("obs")).expect("group");
    assert_eq!(group.clip_path.as_deref(), Some("url(#iv-graph-clip)"));
    assert_eq!(group.class_name, "ts-obs-group");
}

#[test]
fn value_range_rect_spans_floored_day_window() {
    let segments = vec![
        Segment::new(
            "r",
            vec![
                Point::range("same", day(5), 60.0, 60.0),
                Point::range("band", day(6), 30.0, 90.0),
            ],
        )
        .expect("segment"),
    ];
    let mut scene = Scene::new();
    RectRenderer.draw(&mut scene, &request(&segments, "range"));
    let group = scene.group(&GroupKey::new("range")).expect("group");

    let MarkGeometry::Rect(flat) = group
        .mark(&MarkKey::new(MarkKind::Rect, "same"))
        .expect("rect")
        .transition
        .target()
        .clone()
    else {
        panic!("expected rect");
    };
    assert_eq!(flat.x, 20.0);
    assert_eq!(flat.width, 50.0);
    assert_eq!(flat.height, 0.0);

    let MarkGeometry::Rect(band) = group
        .mark(&MarkKey::new(MarkKind::Rect, "band"))
        .expect("rect")
        .transition
        .target()
        .clone()
    else {
        panic!("expected rect");
    };
    assert_eq!(band.y, 30.0);
    assert_eq!(band.height, 60.0);
}

#[test]
fn diamonds_rotate_about_their_centre() {
    let segments = vec![
        Segment::new(
            "d",
            vec![Point::new("p", day(5), 60.0).with_class("extreme")],
        )
        .expect("segment"),
    ];
    let mut scene = Scene::new();
    DiamondRenderer.draw(&mut scene, &request(&segments, "forecast"));

    let group = scene.group(&GroupKey::new("forecast")).expect("group");
    let mark = group.mark(&MarkKey::new(MarkKind::Diamond, "p")).expect("diamond");
    assert_eq!(mark.class_attr(), "ts-rect rect-extreme ts-forecast");
    let MarkGeometry::Rect(rect) = mark.transition.target() else {
        panic!("expected rect");
    };
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (30.0, 40.0, 40.0, 40.0));
    let rotation = rect.rotation.expect("rotation");
    assert_eq!((rotation.degrees, rotation.cx, rotation.cy), (45.0, 50.0, 60.0));
}

#[test]
fn grouped_areas_clear_groups_missing_from_the_draw() {
    let options = AreaOptions {
        grouped: true,
        all_groups_represented: false,
        all_groups: vec!["wet".to_owned(), "dry".to_owned()],
        ..AreaOptions::default()
    };
    let renderer = AreaRenderer::new(options);
    let mut scene = Scene::new();

    let both = vec![path_segment("wet", 0, &[10.0, 20.0]), path_segment("dry", 4, &[5.0, 6.0])];
    renderer.draw(&mut scene, &request(&both, "pct"));
    assert_eq!(scene.group_count(), 2);

    let only_wet = vec![path_segment("wet", 0, &[12.0, 22.0])];
    let summary = renderer.draw(&mut scene, &request(&only_wet, "pct"));

    assert_eq!((summary.updated, summary.exited), (1, 1));
    let dry = scene.group(&GroupKey::with_group("pct", "dry")).expect("dry group");
    assert!(dry.is_empty());
    assert_eq!(dry.class_name, "ts-pct-dry-group");
    assert_eq!(scene.group_count(), 2);
}
