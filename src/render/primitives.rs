use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Vertex in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(lerp(self.x, other.x, t), lerp(self.y, other.y, t))
    }
}

/// Rotation about a pivot, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub degrees: f64,
    pub cx: f64,
    pub cy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleGeometry {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

/// Axis-aligned rectangle, optionally rotated.
///
/// `height` may be zero or negative for zero-width value bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: Option<Rotation>,
}

impl RectGeometry {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: None,
        }
    }

    #[must_use]
    pub fn center(&self) -> Vertex {
        Vertex::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Geometry of one rendered mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkGeometry {
    /// Open polyline through the vertices.
    Path(Vec<Vertex>),
    /// Closed band: along `upper` left to right, back along `lower`.
    Area { upper: Vec<Vertex>, lower: Vec<Vertex> },
    Circle(CircleGeometry),
    Rect(RectGeometry),
}

impl MarkGeometry {
    /// Interpolates towards `target` at `t` in `[0, 1]`.
    ///
    /// Returns `None` when the two geometries differ in kind or vertex count.
    #[must_use]
    pub fn lerp(&self, target: &Self, t: f64) -> Option<Self> {
        match (self, target) {
            (Self::Path(from), Self::Path(to)) => lerp_vertices(from, to, t).map(Self::Path),
            (
                Self::Area {
                    upper: from_upper,
                    lower: from_lower,
                },
                Self::Area {
                    upper: to_upper,
                    lower: to_lower,
                },
            ) => Some(Self::Area {
                upper: lerp_vertices(from_upper, to_upper, t)?,
                lower: lerp_vertices(from_lower, to_lower, t)?,
            }),
            (Self::Circle(from), Self::Circle(to)) => Some(Self::Circle(CircleGeometry {
                cx: lerp(from.cx, to.cx, t),
                cy: lerp(from.cy, to.cy, t),
                r: lerp(from.r, to.r, t),
            })),
            (Self::Rect(from), Self::Rect(to)) => Some(Self::Rect(RectGeometry {
                x: lerp(from.x, to.x, t),
                y: lerp(from.y, to.y, t),
                width: lerp(from.width, to.width, t),
                height: lerp(from.height, to.height, t),
                rotation: match (from.rotation, to.rotation) {
                    (Some(a), Some(b)) => Some(Rotation {
                        degrees: lerp(a.degrees, b.degrees, t),
                        cx: lerp(a.cx, b.cx, t),
                        cy: lerp(a.cy, b.cy, t),
                    }),
                    (_, rotation) => rotation,
                },
            })),
            _ => None,
        }
    }

    /// SVG path data for path-like geometry.
    #[must_use]
    pub fn svg_path_data(&self) -> Option<String> {
        match self {
            Self::Path(vertices) => Some(polyline_data(vertices)),
            Self::Area { upper, lower } => {
                if upper.is_empty() {
                    return Some(String::new());
                }
                let mut data = polyline_data(upper);
                for vertex in lower.iter().rev() {
                    let _ = write!(data, "L{},{}", vertex.x, vertex.y);
                }
                data.push('Z');
                Some(data)
            }
            Self::Circle(_) | Self::Rect(_) => None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        let finite = match self {
            Self::Path(vertices) => vertices_finite(vertices),
            Self::Area { upper, lower } => vertices_finite(upper) && vertices_finite(lower),
            Self::Circle(circle) => {
                circle.cx.is_finite() && circle.cy.is_finite() && circle.r.is_finite()
            }
            Self::Rect(rect) => {
                rect.x.is_finite()
                    && rect.y.is_finite()
                    && rect.width.is_finite()
                    && rect.height.is_finite()
            }
        };
        if finite {
            Ok(())
        } else {
            Err(ChartError::InvalidData(
                "mark geometry must be finite".to_owned(),
            ))
        }
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

fn lerp_vertices(from: &[Vertex], to: &[Vertex], t: f64) -> Option<Vec<Vertex>> {
    (from.len() == to.len()).then(|| {
        from.iter().zip(to).map(|(a, b)| a.lerp(*b, t)).collect()
    })
}

fn vertices_finite(vertices: &[Vertex]) -> bool {
    vertices
        .iter()
        .all(|vertex| vertex.x.is_finite() && vertex.y.is_finite())
}

fn polyline_data(vertices: &[Vertex]) -> String {
    let mut data = String::with_capacity(vertices.len() * 16);
    for (index, vertex) in vertices.iter().enumerate() {
        let command = if index == 0 { 'M' } else { 'L' };
        let _ = write!(data, "{command}{},{}", vertex.x, vertex.y);
    }
    data
}
