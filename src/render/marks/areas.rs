use serde::{Deserialize, Serialize};

use crate::core::segment::Segment;
use crate::core::types::{Point, PointField};
use crate::render::marks::{DrawRequest, SegmentRenderer, mark_classes, paint_group};
use crate::render::primitives::{MarkGeometry, Vertex};
use crate::render::reconcile::{DesiredMark, ReconcileSummary, apply_ops, reconcile};
use crate::render::scene::{GroupKey, MarkFamily, MarkKey, MarkKind, Scene};

const OWNED: &[MarkKind] = &[
    MarkKind::Area,
    MarkKind::MaskFill(MarkFamily::Area),
    MarkKind::MaskHatch(MarkFamily::Area),
];

/// Which point fields bound the filled band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaBounds {
    /// From `value` down to `value_min`.
    #[default]
    ValueToMin,
    /// From `value_min` up to `value_max`.
    MinToMax,
}

impl AreaBounds {
    fn edges(self, point: &Point) -> Option<(f64, f64)> {
        match self {
            Self::ValueToMin => Some((
                point.field(PointField::Value)?,
                point.field(PointField::ValueMin)?,
            )),
            Self::MinToMax => Some((
                point.field(PointField::ValueMin)?,
                point.field(PointField::ValueMax)?,
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AreaOptions {
    pub bounds: AreaBounds,
    /// Give each segment its own `ts-{dataKind}-{segmentId}-group`.
    pub grouped: bool,
    /// Every id in `all_groups` is present in the segments being drawn.
    pub all_groups_represented: bool,
    /// Segment ids expected in grouped mode.
    pub all_groups: Vec<String>,
}

/// Filled bands, one path per segment.
#[derive(Debug, Clone, Default)]
pub struct AreaRenderer {
    options: AreaOptions,
}

impl AreaRenderer {
    #[must_use]
    pub fn new(options: AreaOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &AreaOptions {
        &self.options
    }

    /// Empties groups of expected segments that are absent from this draw.
    fn clear_missing_groups(
        &self,
        scene: &mut Scene,
        request: &DrawRequest<'_>,
    ) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();
        for group_id in &self.options.all_groups {
            if request.segments.iter().any(|segment| &segment.id == group_id) {
                continue;
            }
            let key = GroupKey::with_group(request.data_kind, group_id.as_str());
            if let Some(group) = scene.group_mut(&key) {
                let ops = reconcile(group, Vec::new(), OWNED);
                summary.absorb(apply_ops(
                    group,
                    ops,
                    request.now_ms,
                    request.transition_length_ms,
                ));
            }
        }
        summary
    }
}

impl SegmentRenderer for AreaRenderer {
    fn family(&self) -> MarkFamily {
        MarkFamily::Area
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
        let (upper, lower): (Vec<Vertex>, Vec<Vertex>) = segment
            .points()
            .iter()
            .filter_map(|point| {
                let (edge0, edge1) = self.options.bounds.edges(point)?;
                let x = request.x_scale.map(point.date_time);
                Some((
                    Vertex::new(x, request.y_scale.map(edge0)),
                    Vertex::new(x, request.y_scale.map(edge1)),
                ))
            })
            .unzip();
        if upper.is_empty() {
            return;
        }
        out.push(
            DesiredMark::new(
                MarkKey::new(MarkKind::Area, segment.lead_point().id.as_str()),
                MarkGeometry::Area { upper, lower },
            )
            .with_classes(mark_classes(&["ts-area"], segment, request.data_kind)),
        );
    }

    fn draw(&self, scene: &mut Scene, request: &DrawRequest<'_>) -> ReconcileSummary {
        if !self.options.grouped {
            return paint_group(
                self,
                scene,
                &GroupKey::new(request.data_kind),
                request.segments,
                request,
            );
        }

        let mut summary = ReconcileSummary::default();
        for segment in request.segments {
            let key = GroupKey::with_group(request.data_kind, segment.id.as_str());
            summary.absorb(paint_group(
                self,
                scene,
                &key,
                std::slice::from_ref(segment),
                request,
            ));
        }
        if request.visible
            && !request.segments.is_empty()
            && !self.options.all_groups_represented
        {
            summary.absorb(self.clear_missing_groups(scene, request));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::{AreaBounds, AreaOptions, AreaRenderer};
    use crate::core::segment::Segment;
    use crate::core::types::Point;
    use crate::render::marks::test_support::{day, scales};
    use crate::render::marks::{DrawRequest, SegmentRenderer};
    use crate::render::primitives::MarkGeometry;
    use crate::render::scene::{GroupKey, MarkKey, MarkKind, Scene};

    #[test]
    fn min_to_max_band_follows_both_edges() {
        let segments = vec![
            Segment::new(
                "band",
                vec![
                    Point::range("a", day(1), 10.0, 20.0),
                    Point::range("b", day(2), 30.0, 40.0),
                ],
            )
            .expect("segment"),
        ];
        let (x_scale, y_scale) = scales();
        let request = DrawRequest {
            visible: true,
            segments: &segments,
            data_kind: "range",
            x_scale,
            y_scale,
            transition_length_ms: 0.0,
            enable_clip: false,
            clip_id_key: None,
            now_ms: 0.0,
        };
        let renderer = AreaRenderer::new(AreaOptions {
            bounds: AreaBounds::MinToMax,
            ..AreaOptions::default()
        });
        let mut scene = Scene::new();
        renderer.draw(&mut scene, &request);

        let group = scene.group(&GroupKey::new("range")).expect("group");
        let mark = group.mark(&MarkKey::new(MarkKind::Area, "a")).expect("area");
        let MarkGeometry::Area { upper, lower } = mark.transition.target() else {
            panic!("expected area geometry");
        };
        assert_eq!(upper[0].y, y_scale.map(10.0));
        assert_eq!(lower[1].y, y_scale.map(40.0));
    }
}
