use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::render::primitives::MarkGeometry;
use crate::render::scene::{MarkKey, MarkKind, SceneGroup, SceneMark};
use crate::render::transition::Transition;

/// Mark a renderer wants to exist after the current draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesiredMark {
    pub key: MarkKey,
    pub classes: Vec<String>,
    pub fill: Option<String>,
    /// Geometry an entering mark starts from. `None` enters at `target`.
    pub enter_from: Option<MarkGeometry>,
    pub target: MarkGeometry,
}

impl DesiredMark {
    #[must_use]
    pub fn new(key: MarkKey, target: MarkGeometry) -> Self {
        Self {
            key,
            classes: Vec::new(),
            fill: None,
            enter_from: None,
            target,
        }
    }

    #[must_use]
    pub fn with_classes(mut self, classes: Vec<String>) -> Self {
        self.classes = classes;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    #[must_use]
    pub fn entering_from(mut self, geometry: MarkGeometry) -> Self {
        self.enter_from = Some(geometry);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneOp {
    Enter(DesiredMark),
    Update(DesiredMark),
    Exit(MarkKey),
}

/// Counts of applied operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconcileSummary {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

impl ReconcileSummary {
    pub fn absorb(&mut self, other: Self) {
        self.entered += other.entered;
        self.updated += other.updated;
        self.exited += other.exited;
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.entered + self.updated + self.exited
    }
}

/// Diffs `desired` against the marks of `existing` whose kind is in `owned`.
///
/// Exits come first in existing order, then enters and updates in desired
/// order. A key repeated in `desired` keeps its last occurrence.
#[must_use]
pub fn reconcile(
    existing: &SceneGroup,
    desired: Vec<DesiredMark>,
    owned: &[MarkKind],
) -> Vec<SceneOp> {
    let mut wanted: IndexMap<MarkKey, DesiredMark> = IndexMap::with_capacity(desired.len());
    for mark in desired {
        wanted.insert(mark.key.clone(), mark);
    }

    let mut ops: Vec<SceneOp> = existing
        .marks()
        .filter(|(key, _)| owned.contains(&key.kind) && !wanted.contains_key(*key))
        .map(|(key, _)| SceneOp::Exit(key.clone()))
        .collect();

    ops.extend(wanted.into_values().map(|mark| {
        if existing.mark(&mark.key).is_some() {
            SceneOp::Update(mark)
        } else {
            SceneOp::Enter(mark)
        }
    }));
    ops
}

/// Applies `ops` to `group`.
///
/// Entering marks are appended and animate from their start geometry.
/// Updated marks retarget their in-flight transition. Exiting marks are
/// removed immediately.
pub fn apply_ops(
    group: &mut SceneGroup,
    ops: Vec<SceneOp>,
    now_ms: f64,
    duration_ms: f64,
) -> ReconcileSummary {
    let mut summary = ReconcileSummary::default();
    for op in ops {
        match op {
            SceneOp::Enter(mark) => {
                let from = mark.enter_from.unwrap_or_else(|| mark.target.clone());
                let element_id = mark.key.element_id();
                group.insert_mark(
                    mark.key,
                    SceneMark {
                        element_id,
                        classes: mark.classes,
                        fill: mark.fill,
                        transition: Transition::new(from, mark.target, now_ms, duration_ms),
                    },
                );
                summary.entered += 1;
            }
            SceneOp::Update(mark) => {
                if let Some(existing) = group.mark_mut(&mark.key) {
                    existing.classes = mark.classes;
                    existing.fill = mark.fill;
                    existing.transition.retarget(mark.target, now_ms, duration_ms);
                    summary.updated += 1;
                }
            }
            SceneOp::Exit(key) => {
                if group.remove_mark(&key).is_some() {
                    summary.exited += 1;
                }
            }
        }
    }
    summary
}
