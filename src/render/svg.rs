use std::fmt::Write as _;

use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;
use crate::render::primitives::MarkGeometry;
use crate::render::scene::{FrameGroup, FrameMark, SceneFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub groups_written: usize,
    pub marks_written: usize,
}

/// Serializes scene frames to SVG markup.
///
/// Each render replaces the previous document.
#[derive(Debug)]
pub struct SvgRenderer {
    width: f64,
    height: f64,
    document: String,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    pub fn new(width: f64, height: f64) -> ChartResult<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(ChartError::InvalidLayout { width });
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(ChartError::InvalidData(
                "svg height must be > 0".to_owned(),
            ));
        }
        Ok(Self {
            width,
            height,
            document: String::new(),
            last_stats: SvgRenderStats::default(),
        })
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    fn write_group(&mut self, group: &FrameGroup) {
        let _ = write!(self.document, "<g class=\"{}\"", escape(&group.class_name));
        if let Some(clip_path) = &group.clip_path {
            let _ = write!(self.document, " clip-path=\"{}\"", escape(clip_path));
        }
        self.document.push('>');
        for mark in &group.marks {
            self.write_mark(mark);
        }
        self.document.push_str("</g>");
    }

    fn write_mark(&mut self, mark: &FrameMark) {
        let id = escape(&mark.element_id);
        let class = escape(&mark.class_attr);
        let out = &mut self.document;
        match &mark.geometry {
            MarkGeometry::Path(_) | MarkGeometry::Area { .. } => {
                let data = mark.geometry.svg_path_data().unwrap_or_default();
                let _ = write!(out, "<path id=\"{id}\" class=\"{class}\" d=\"{data}\"");
            }
            MarkGeometry::Circle(circle) => {
                let _ = write!(
                    out,
                    "<circle id=\"{id}\" class=\"{class}\" cx=\"{}\" cy=\"{}\" r=\"{}\"",
                    circle.cx, circle.cy, circle.r
                );
            }
            MarkGeometry::Rect(rect) => {
                let _ = write!(
                    out,
                    "<rect id=\"{id}\" class=\"{class}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                    rect.x, rect.y, rect.width, rect.height
                );
                if let Some(rotation) = rect.rotation {
                    let _ = write!(
                        out,
                        " transform=\"rotate({} {} {})\"",
                        rotation.degrees, rotation.cx, rotation.cy
                    );
                }
            }
        }
        if let Some(fill) = &mark.fill {
            let _ = write!(out, " fill=\"{}\"", escape(fill));
        }
        out.push_str("/>");
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &SceneFrame) -> ChartResult<()> {
        frame.validate()?;
        self.document.clear();
        let _ = write!(
            self.document,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = self.width,
            h = self.height
        );
        for group in &frame.groups {
            self.write_group(group);
        }
        self.document.push_str("</svg>");
        self.last_stats = SvgRenderStats {
            groups_written: frame.groups.len(),
            marks_written: frame.mark_count(),
        };
        Ok(())
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
