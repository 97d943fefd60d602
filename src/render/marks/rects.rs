use crate::core::segment::Segment;
use crate::core::types::{PointField, offset_days};
use crate::render::marks::{DrawRequest, SegmentRenderer, mark_classes};
use crate::render::primitives::{MarkGeometry, RectGeometry};
use crate::render::reconcile::DesiredMark;
use crate::render::scene::{MarkFamily, MarkKey, MarkKind};

/// Width of one value-range bar, in days.
pub const RECT_WIDTH_IN_DAYS: f64 = 5.0;

const OWNED: &[MarkKind] = &[
    MarkKind::Rect,
    MarkKind::MaskFill(MarkFamily::Rect),
    MarkKind::MaskHatch(MarkFamily::Rect),
];

/// Value-range bars spanning `value_min` to `value_max` around each point.
///
/// Equal bounds give a zero-height bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectRenderer;

impl SegmentRenderer for RectRenderer {
    fn family(&self) -> MarkFamily {
        MarkFamily::Rect
    }

    fn owned_kinds(&self) -> &'static [MarkKind] {
        OWNED
    }

    fn segment_marks(
        &self,
        segment: &Segment,
        request: &DrawRequest<'_>,
        out: &mut Vec<DesiredMark>,
    ) {
        let x = request.x_scale;
        let y = request.y_scale;
        for point in segment.points() {
            let (Some(value_min), Some(value_max)) =
                (point.field(PointField::ValueMin), point.field(PointField::ValueMax))
            else {
                continue;
            };
            let x_start = x.map(offset_days(point.date_time, -RECT_WIDTH_IN_DAYS / 2.0));
            let width =
                x.map(offset_days(point.date_time, RECT_WIDTH_IN_DAYS)) - x.map(point.date_time);
            let top = y.map(value_max);
            let geometry = MarkGeometry::Rect(RectGeometry::new(
                x_start,
                top,
                width,
                y.map(value_min) - top,
            ));
            out.push(
                DesiredMark::new(MarkKey::new(MarkKind::Rect, point.id.as_str()), geometry)
                    .with_classes(mark_classes(&["ts-range"], segment, request.data_kind)),
            );
        }
    }
}
