use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use tracing::{debug, warn};

use crate::core::types::{Point, PointField, ValueDomain};
use crate::error::{ChartError, ChartResult};

/// Rendering shape of a segment, decided once when the segment is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SegmentShape {
    /// Exactly one point: drawn as a standalone marker.
    Single(Point),
    /// Two or more points in draw order: drawn as one path.
    Path(Vec<Point>),
}

/// Ordered run of points sharing one rendering identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub class: Option<String>,
    pub is_masked: bool,
    shape: SegmentShape,
}

impl Segment {
    pub fn new(id: impl Into<String>, mut points: Vec<Point>) -> ChartResult<Self> {
        let id = id.into();
        let shape = match points.len() {
            0 => return Err(ChartError::EmptySegment { id }),
            1 => SegmentShape::Single(points.remove(0)),
            _ => SegmentShape::Path(points),
        };
        Ok(Self {
            id,
            class: None,
            is_masked: false,
            shape,
        })
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    #[must_use]
    pub fn masked(mut self) -> Self {
        self.is_masked = true;
        self
    }

    #[must_use]
    pub fn shape(&self) -> &SegmentShape {
        &self.shape
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        match &self.shape {
            SegmentShape::Single(point) => std::slice::from_ref(point),
            SegmentShape::Path(points) => points,
        }
    }

    /// Point whose id keys path-based marks for this segment.
    #[must_use]
    pub fn lead_point(&self) -> &Point {
        match &self.shape {
            SegmentShape::Single(point) => point,
            SegmentShape::Path(points) => &points[0],
        }
    }

    #[must_use]
    pub fn last_point(&self) -> &Point {
        match &self.shape {
            SegmentShape::Single(point) => point,
            SegmentShape::Path(points) => &points[points.len() - 1],
        }
    }

    /// Value extent over `value`, `value_min` and `value_max`.
    #[must_use]
    pub fn value_domain(&self) -> Option<ValueDomain> {
        ValueDomain::from_values(self.points().iter().flat_map(|point| {
            [
                point.field(PointField::Value),
                point.field(PointField::ValueMin),
                point.field(PointField::ValueMax),
            ]
            .into_iter()
            .flatten()
        }))
    }
}

/// Combined value extent of all segments.
#[must_use]
pub fn segments_value_domain(segments: &[Segment]) -> Option<ValueDomain> {
    segments
        .iter()
        .filter_map(Segment::value_domain)
        .reduce(ValueDomain::union)
}

/// Groups an ordered point stream into segments.
///
/// Points missing any required field are dropped before grouping. A new
/// segment starts whenever the point class changes.
#[derive(Debug, Clone)]
pub struct SegmentBuilder {
    id_prefix: String,
    required: SmallVec<[PointField; 3]>,
    masked_classes: Vec<String>,
}

impl SegmentBuilder {
    #[must_use]
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self {
            id_prefix: id_prefix.into(),
            required: smallvec![PointField::Value],
            masked_classes: Vec::new(),
        }
    }

    /// Replaces the fields a point must carry (finite) to be kept.
    #[must_use]
    pub fn requiring(mut self, fields: &[PointField]) -> Self {
        self.required = fields.iter().copied().collect();
        self
    }

    /// Segments whose class is `class` are flagged as masked.
    #[must_use]
    pub fn mask_class(mut self, class: impl Into<String>) -> Self {
        self.masked_classes.push(class.into());
        self
    }

    pub fn build(&self, points: impl IntoIterator<Item = Point>) -> ChartResult<Vec<Segment>> {
        let mut runs: Vec<(Option<String>, Vec<Point>)> = Vec::new();
        let mut dropped = 0usize;

        for point in points {
            if !self.is_plottable(&point) {
                dropped += 1;
                continue;
            }
            let continues_run = runs
                .last()
                .is_some_and(|(class, _)| *class == point.class);
            if let (true, Some((_, run))) = (continues_run, runs.last_mut()) {
                run.push(point);
            } else {
                runs.push((point.class.clone(), vec![point]));
            }
        }

        if dropped > 0 {
            warn!(
                prefix = %self.id_prefix,
                dropped,
                "dropped points with non-finite values before segment construction"
            );
        }

        let segments = runs
            .into_iter()
            .enumerate()
            .map(|(index, (class, run))| {
                let mut segment = Segment::new(format!("{}-{index}", self.id_prefix), run)?;
                if let Some(class) = class {
                    segment.is_masked = self.masked_classes.contains(&class);
                    segment.class = Some(class);
                }
                Ok(segment)
            })
            .collect::<ChartResult<Vec<_>>>()?;

        debug!(
            prefix = %self.id_prefix,
            segment_count = segments.len(),
            "built segments"
        );
        Ok(segments)
    }

    fn is_plottable(&self, point: &Point) -> bool {
        self.required
            .iter()
            .all(|field| point.field(*field).is_some())
    }
}
