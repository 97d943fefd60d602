mod areas;
mod diamonds;
mod lines;
mod points;
mod rects;

pub use areas::{AreaBounds, AreaOptions, AreaRenderer};
pub use diamonds::{DIAMOND_WIDTH_IN_DAYS, DiamondRenderer};
pub use lines::{LineRenderer, SINGLE_POINT_RADIUS};
pub use points::{POINT_RADIUS, PointRenderer};
pub use rects::{RECT_WIDTH_IN_DAYS, RectRenderer};

use tracing::trace;

use crate::core::segment::Segment;
use crate::core::time_scale::TimeScale;
use crate::core::value_scale::ValueScale;
use crate::render::primitives::{MarkGeometry, RectGeometry};
use crate::render::reconcile::{DesiredMark, ReconcileSummary, apply_ops, reconcile};
use crate::render::scene::{GroupKey, MarkFamily, MarkKey, MarkKind, Scene};

/// Clip region used when no clip key is supplied.
pub const LEGACY_CLIP_PATH: &str = "url(#iv-graph-clip)";

/// Inputs shared by every mark renderer.
#[derive(Debug, Clone, Copy)]
pub struct DrawRequest<'a> {
    pub visible: bool,
    pub segments: &'a [Segment],
    pub data_kind: &'a str,
    pub x_scale: TimeScale,
    pub y_scale: ValueScale,
    pub transition_length_ms: f64,
    pub enable_clip: bool,
    pub clip_id_key: Option<&'a str>,
    /// Animation clock at the time of the draw.
    pub now_ms: f64,
}

impl DrawRequest<'_> {
    #[must_use]
    pub fn clip_reference(&self) -> String {
        match self.clip_id_key {
            Some(key) => format!("url(#{key}-chart-clip)"),
            None => LEGACY_CLIP_PATH.to_owned(),
        }
    }

    fn paints(&self) -> bool {
        self.visible && !self.segments.is_empty()
    }
}

/// One mark family drawn from segments into a persistent group.
pub trait SegmentRenderer {
    fn family(&self) -> MarkFamily;

    /// Mark kinds this renderer creates, and the only ones it may remove.
    fn owned_kinds(&self) -> &'static [MarkKind];

    /// Desired marks for one unmasked segment.
    fn segment_marks(
        &self,
        segment: &Segment,
        request: &DrawRequest<'_>,
        out: &mut Vec<DesiredMark>,
    );

    /// Draws all segments into the `ts-{dataKind}-group` group.
    fn draw(&self, scene: &mut Scene, request: &DrawRequest<'_>) -> ReconcileSummary {
        paint_group(
            self,
            scene,
            &GroupKey::new(request.data_kind),
            request.segments,
            request,
        )
    }
}

/// Ensures the group, applies clipping, then diffs the segments' marks.
///
/// An invisible request or one without segments only touches the group
/// attributes.
pub(crate) fn paint_group<R: SegmentRenderer + ?Sized>(
    renderer: &R,
    scene: &mut Scene,
    key: &GroupKey,
    segments: &[Segment],
    request: &DrawRequest<'_>,
) -> ReconcileSummary {
    let group = scene.ensure_group(key);
    if request.enable_clip {
        group.clip_path = Some(request.clip_reference());
    }
    if !request.paints() {
        return ReconcileSummary::default();
    }

    let mut desired = Vec::new();
    for segment in segments {
        if segment.is_masked {
            mask_marks(renderer.family(), segment, request, &mut desired);
        } else {
            renderer.segment_marks(segment, request, &mut desired);
        }
    }

    let ops = reconcile(group, desired, renderer.owned_kinds());
    let summary = apply_ops(group, ops, request.now_ms, request.transition_length_ms);
    trace!(
        group = %group.class_name,
        entered = summary.entered,
        updated = summary.updated,
        exited = summary.exited,
        "segments reconciled"
    );
    summary
}

/// Base class first, then the segment class, then `ts-{dataKind}`.
pub(crate) fn mark_classes(base: &[&str], segment: &Segment, data_kind: &str) -> Vec<String> {
    let mut classes: Vec<String> = base.iter().map(|class| (*class).to_owned()).collect();
    if let Some(class) = &segment.class {
        classes.push(class.clone());
    }
    classes.push(format!("ts-{data_kind}"));
    classes
}

/// Flat "no data" rect plus the hatched rect over the segment's time span.
fn mask_marks(
    owner: MarkFamily,
    segment: &Segment,
    request: &DrawRequest<'_>,
    out: &mut Vec<DesiredMark>,
) {
    let x_start = request.x_scale.map(segment.lead_point().date_time);
    let x_end = request.x_scale.map(segment.last_point().date_time);
    let (top, bottom) = request.y_scale.pixel_extent();
    let geometry = MarkGeometry::Rect(RectGeometry::new(
        x_start.min(x_end),
        top,
        (x_end - x_start).abs(),
        bottom - top,
    ));
    let id = &segment.lead_point().id;

    out.push(
        DesiredMark::new(MarkKey::new(MarkKind::MaskFill(owner), id.as_str()), geometry.clone())
            .with_classes(mark_classes(&["ts-mask", "ts-no-data"], segment, request.data_kind)),
    );
    out.push(
        DesiredMark::new(MarkKey::new(MarkKind::MaskHatch(owner), id.as_str()), geometry)
            .with_classes(mark_classes(&["ts-mask", "ts-hatch"], segment, request.data_kind))
            .with_fill(format!("url(#hatch-{})", request.data_kind)),
    );
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDateTime;

    use crate::core::time_scale::{TimeScale, build_time_scale};
    use crate::core::types::{ValueDomain, start_of_day};
    use crate::core::value_scale::{ValueScale, build_value_scale};

    pub(crate) fn day(n: u32) -> NaiveDateTime {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|date| date.checked_add_days(chrono::Days::new(u64::from(n))))
            .expect("valid date");
        start_of_day(date)
    }

    /// Ten days over 100 px and values 0..100 over 100 px, padded.
    pub(crate) fn scales() -> (TimeScale, ValueScale) {
        let x = build_time_scale(Some((day(0), day(10))), 100.0);
        let y = build_value_scale(
            Some(ValueDomain::new(0.0, 100.0).expect("domain")),
            100.0,
            false,
            false,
        );
        (x, y)
    }
}
