use crate::error::ChartResult;
use crate::render::Renderer;
use crate::render::scene::SceneFrame;

/// No-op renderer used by tests and headless chart usage.
///
/// It still validates frame geometry so tests catch non-finite marks.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_group_count: usize,
    pub last_mark_count: usize,
    pub frames_rendered: u64,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &SceneFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_group_count = frame.groups.len();
        self.last_mark_count = frame.mark_count();
        self.frames_rendered += 1;
        Ok(())
    }
}
