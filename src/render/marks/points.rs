use crate::core::segment::Segment;
use crate::render::marks::{DrawRequest, SegmentRenderer, mark_classes};
use crate::render::primitives::{CircleGeometry, MarkGeometry};
use crate::render::reconcile::DesiredMark;
use crate::render::scene::{MarkFamily, MarkKey, MarkKind};

pub const POINT_RADIUS: f64 = 5.0;

const OWNED: &[MarkKind] = &[
    MarkKind::Point,
    MarkKind::MaskFill(MarkFamily::Point),
    MarkKind::MaskHatch(MarkFamily::Point),
];

/// One circle per point, entering from the top edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointRenderer;

impl SegmentRenderer for PointRenderer {
    fn family(&self) -> MarkFamily {
        MarkFamily::Point
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
        for point in segment.points().iter().filter(|point| point.value.is_finite()) {
            let cx = request.x_scale.map(point.date_time);
            let target = MarkGeometry::Circle(CircleGeometry {
                cx,
                cy: request.y_scale.map(point.value),
                r: POINT_RADIUS,
            });
            let start = MarkGeometry::Circle(CircleGeometry {
                cx,
                cy: 0.0,
                r: POINT_RADIUS,
            });
            out.push(
                DesiredMark::new(MarkKey::new(MarkKind::Point, point.id.as_str()), target)
                    .with_classes(mark_classes(&["ts-point"], segment, request.data_kind))
                    .entering_from(start),
            );
        }
    }
}
