use crate::core::segment::{Segment, SegmentShape};
use crate::render::marks::{DrawRequest, SegmentRenderer, mark_classes};
use crate::render::primitives::{CircleGeometry, MarkGeometry, Vertex};
use crate::render::reconcile::DesiredMark;
use crate::render::scene::{MarkFamily, MarkKey, MarkKind};

pub const SINGLE_POINT_RADIUS: f64 = 5.0;

const OWNED: &[MarkKind] = &[
    MarkKind::Line,
    MarkKind::Marker,
    MarkKind::MaskFill(MarkFamily::Line),
    MarkKind::MaskHatch(MarkFamily::Line),
];

/// Draws one path per multi-point segment and a circle per single point.
///
/// Paths are keyed by the segment's lead point id, so a new lead point
/// replaces the path instead of morphing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineRenderer;

impl SegmentRenderer for LineRenderer {
    fn family(&self) -> MarkFamily {
        MarkFamily::Line
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
        match segment.shape() {
            SegmentShape::Single(point) => {
                if !point.value.is_finite() {
                    return;
                }
                let geometry = MarkGeometry::Circle(CircleGeometry {
                    cx: request.x_scale.map(point.date_time),
                    cy: request.y_scale.map(point.value),
                    r: SINGLE_POINT_RADIUS,
                });
                out.push(
                    DesiredMark::new(MarkKey::new(MarkKind::Marker, point.id.as_str()), geometry)
                        .with_classes(mark_classes(&["ts-point"], segment, request.data_kind)),
                );
            }
            SegmentShape::Path(points) => {
                let vertices = points
                    .iter()
                    .filter(|point| point.value.is_finite())
                    .map(|point| {
                        Vertex::new(
                            request.x_scale.map(point.date_time),
                            request.y_scale.map(point.value),
                        )
                    })
                    .collect();
                out.push(
                    DesiredMark::new(
                        MarkKey::new(MarkKind::Line, segment.lead_point().id.as_str()),
                        MarkGeometry::Path(vertices),
                    )
                    .with_classes(mark_classes(&["ts-line"], segment, request.data_kind)),
                );
            }
        }
    }
}
