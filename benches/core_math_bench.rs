use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use streamflow_chart::core::{
    Point, Segment, ValueDomain, build_time_scale, build_value_scale, get_water_data_ticks,
    start_of_day,
};
use streamflow_chart::render::{DrawRequest, LineRenderer, PointRenderer, Scene, SegmentRenderer};

fn origin() -> NaiveDateTime {
    start_of_day(NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date"))
}

fn daily_segments(days: i64, per_segment: usize, shift: f64) -> Vec<Segment> {
    let points: Vec<Point> = (0..days)
        .map(|n| {
            let date_time = origin() + TimeDelta::days(n);
            let value = 50.0 + 40.0 * ((n as f64) / 30.0 + shift).sin();
            Point::new(format!("site-{n}"), date_time, value)
        })
        .collect();
    points
        .chunks(per_segment)
        .enumerate()
        .map(|(index, chunk)| Segment::new(format!("s-{index}"), chunk.to_vec()).expect("segment"))
        .collect()
}

fn bench_linear_ticks(c: &mut Criterion) {
    let domain = ValueDomain::new(0.37, 48_213.9).expect("valid domain");
    c.bench_function("water_data_ticks_linear", |b| {
        b.iter(|| get_water_data_ticks(black_box(domain), false, false))
    });
}

fn bench_symlog_ticks(c: &mut Criterion) {
    let domain = ValueDomain::new(-1_250.0, 250_000.0).expect("valid domain");
    c.bench_function("water_data_ticks_symlog", |b| {
        b.iter(|| get_water_data_ticks(black_box(domain), true, false))
    });
}

fn bench_reconcile_points_3650(c: &mut Criterion) {
    let first = daily_segments(3_650, 365, 0.0);
    let second = daily_segments(3_650, 365, 0.5);
    let x_scale = build_time_scale(Some((origin(), origin() + TimeDelta::days(3_650))), 1_600.0);
    let y_scale = build_value_scale(ValueDomain::new(0.0, 100.0).ok(), 900.0, false, false);

    c.bench_function("reconcile_points_3650", |b| {
        b.iter(|| {
            let mut scene = Scene::new();
            for (now_ms, segments) in [(0.0, &first), (500.0, &second)] {
                let request = DrawRequest {
                    visible: true,
                    segments,
                    data_kind: "obs",
                    x_scale,
                    y_scale,
                    transition_length_ms: 2_000.0,
                    enable_clip: true,
                    clip_id_key: Some("bench"),
                    now_ms,
                };
                black_box(PointRenderer.draw(&mut scene, &request));
                black_box(LineRenderer.draw(&mut scene, &request));
            }
            black_box(scene.frame_at(1_000.0));
        })
    });
}

criterion_group!(
    benches,
    bench_linear_ticks,
    bench_symlog_ticks,
    bench_reconcile_points_3650
);
criterion_main!(benches);
