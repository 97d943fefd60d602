pub mod marks;
mod null_renderer;
mod primitives;
mod reconcile;
mod scene;
mod svg;
mod transition;

pub use marks::{
    AreaBounds, AreaOptions, AreaRenderer, DiamondRenderer, DrawRequest, LineRenderer,
    PointRenderer, RectRenderer, SegmentRenderer,
};
pub use null_renderer::NullRenderer;
pub use primitives::{CircleGeometry, MarkGeometry, RectGeometry, Rotation, Vertex};
pub use reconcile::{DesiredMark, ReconcileSummary, SceneOp, apply_ops, reconcile};
pub use scene::{
    FrameGroup, FrameMark, GroupKey, MarkFamily, MarkKey, MarkKind, Scene, SceneFrame, SceneGroup,
    SceneMark,
};
pub use svg::{SvgRenderStats, SvgRenderer};
pub use transition::{Transition, ease_cubic_in_out};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a resolved `SceneFrame`, so drawing code stays isolated
/// from scales, segments and transitions.
pub trait Renderer {
    fn render(&mut self, frame: &SceneFrame) -> ChartResult<()>;
}
