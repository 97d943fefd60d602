use crate::core::segment::Segment;
use crate::core::types::offset_days;
use crate::render::marks::{DrawRequest, SegmentRenderer, mark_classes};
use crate::render::primitives::{MarkGeometry, RectGeometry, Rotation};
use crate::render::reconcile::DesiredMark;
use crate::render::scene::{MarkFamily, MarkKey, MarkKind};

/// Diamond side length in days. One less than the upstream bar width.
pub const DIAMOND_WIDTH_IN_DAYS: f64 = 4.0;

const OWNED: &[MarkKind] = &[
    MarkKind::Diamond,
    MarkKind::MaskFill(MarkFamily::Diamond),
    MarkKind::MaskHatch(MarkFamily::Diamond),
];

/// Squares centred on each point's value, rotated 45° about their centre.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiamondRenderer;

impl SegmentRenderer for DiamondRenderer {
    fn family(&self) -> MarkFamily {
        MarkFamily::Diamond
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
        for point in segment.points().iter().filter(|point| point.value.is_finite()) {
            let x_start = x.map(offset_days(point.date_time, -DIAMOND_WIDTH_IN_DAYS / 2.0));
            let size =
                x.map(offset_days(point.date_time, DIAMOND_WIDTH_IN_DAYS)) - x.map(point.date_time);
            let y_start = request.y_scale.map(point.value) - size / 2.0;
            let mut rect = RectGeometry::new(x_start, y_start, size, size);
            let center = rect.center();
            rect.rotation = Some(Rotation {
                degrees: 45.0,
                cx: center.x,
                cy: center.y,
            });

            let point_class = point.class.as_ref().map(|class| format!("rect-{class}"));
            let mut base = vec!["ts-rect"];
            if let Some(class) = &point_class {
                base.push(class.as_str());
            }
            let key = MarkKey::new(MarkKind::Diamond, point.id.as_str());
            out.push(
                DesiredMark::new(key, MarkGeometry::Rect(rect))
                    .with_classes(mark_classes(&base, segment, request.data_kind)),
            );
        }
    }
}
