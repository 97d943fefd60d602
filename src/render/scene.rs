use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::render::primitives::MarkGeometry;
use crate::render::transition::Transition;

/// Identifies a persistent visual sub-group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    pub data_kind: String,
    pub group_id: Option<String>,
}

impl GroupKey {
    #[must_use]
    pub fn new(data_kind: impl Into<String>) -> Self {
        Self {
            data_kind: data_kind.into(),
            group_id: None,
        }
    }

    #[must_use]
    pub fn with_group(data_kind: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            data_kind: data_kind.into(),
            group_id: Some(group_id.into()),
        }
    }

    /// Class attribute of the group element.
    #[must_use]
    pub fn class_name(&self) -> String {
        match &self.group_id {
            Some(group_id) => format!("ts-{}-{group_id}-group", self.data_kind),
            None => format!("ts-{}-group", self.data_kind),
        }
    }
}

/// Renderer family a mark was drawn by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarkFamily {
    Line,
    Point,
    Area,
    Rect,
    Diamond,
}

impl MarkFamily {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Point => "point",
            Self::Area => "area",
            Self::Rect => "rect",
            Self::Diamond => "diamond",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarkKind {
    Line,
    /// Standalone circle for a single-point line segment.
    Marker,
    Point,
    Area,
    Rect,
    Diamond,
    /// Mask rects are owned per renderer family.
    MaskFill(MarkFamily),
    MaskHatch(MarkFamily),
}

impl MarkKind {
    /// Prefix of the element id. Masks insert their family before the key id.
    #[must_use]
    pub fn element_prefix(self) -> &'static str {
        match self {
            Self::Line => "path-",
            Self::Marker | Self::Point => "circle-",
            Self::Area => "area-",
            Self::Rect | Self::Diamond => "rect-",
            Self::MaskFill(_) => "mask-",
            Self::MaskHatch(_) => "mask-hatch-",
        }
    }

    #[must_use]
    pub fn is_mask(self) -> bool {
        matches!(self, Self::MaskFill(_) | Self::MaskHatch(_))
    }
}

/// Identity of one mark inside its group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkKey {
    pub kind: MarkKind,
    pub id: String,
}

impl MarkKey {
    #[must_use]
    pub fn new(kind: MarkKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn element_id(&self) -> String {
        match self.kind {
            MarkKind::MaskFill(owner) | MarkKind::MaskHatch(owner) => {
                format!("{}{}-{}", self.kind.element_prefix(), owner.as_str(), self.id)
            }
            kind => format!("{}{}", kind.element_prefix(), self.id),
        }
    }
}

/// Retained mark: styling plus its in-flight transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneMark {
    pub element_id: String,
    pub classes: Vec<String>,
    pub fill: Option<String>,
    pub transition: Transition,
}

impl SceneMark {
    #[must_use]
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneGroup {
    pub class_name: String,
    pub clip_path: Option<String>,
    marks: IndexMap<MarkKey, SceneMark>,
}

impl SceneGroup {
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            clip_path: None,
            marks: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn mark(&self, key: &MarkKey) -> Option<&SceneMark> {
        self.marks.get(key)
    }

    pub fn marks(&self) -> impl Iterator<Item = (&MarkKey, &SceneMark)> {
        self.marks.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    #[must_use]
    pub fn count_kind(&self, kind: MarkKind) -> usize {
        self.marks.keys().filter(|key| key.kind == kind).count()
    }

    /// Appends a mark, or replaces it in place when the key already exists.
    pub fn insert_mark(&mut self, key: MarkKey, mark: SceneMark) {
        self.marks.insert(key, mark);
    }

    pub fn mark_mut(&mut self, key: &MarkKey) -> Option<&mut SceneMark> {
        self.marks.get_mut(key)
    }

    /// Removes a mark keeping the order of the remaining ones.
    pub fn remove_mark(&mut self, key: &MarkKey) -> Option<SceneMark> {
        self.marks.shift_remove(key)
    }

    fn frame_at(&self, now_ms: f64) -> FrameGroup {
        FrameGroup {
            class_name: self.class_name.clone(),
            clip_path: self.clip_path.clone(),
            marks: self
                .marks
                .iter()
                .map(|(key, mark)| FrameMark {
                    kind: key.kind,
                    element_id: mark.element_id.clone(),
                    class_attr: mark.class_attr(),
                    fill: mark.fill.clone(),
                    geometry: mark.transition.geometry_at(now_ms),
                })
                .collect(),
        }
    }
}

/// Retained scene graph mutated only by the mark renderers.
///
/// Groups are created lazily and never recreated, so marks keep their
/// transitions across draws.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    groups: IndexMap<GroupKey, SceneGroup>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the group for `key`, appending it on first use.
    pub fn ensure_group(&mut self, key: &GroupKey) -> &mut SceneGroup {
        self.groups
            .entry(key.clone())
            .or_insert_with(|| SceneGroup::new(key.class_name()))
    }

    #[must_use]
    pub fn group(&self, key: &GroupKey) -> Option<&SceneGroup> {
        self.groups.get(key)
    }

    pub fn group_mut(&mut self, key: &GroupKey) -> Option<&mut SceneGroup> {
        self.groups.get_mut(key)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&GroupKey, &SceneGroup)> {
        self.groups.iter()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.groups.values().map(SceneGroup::len).sum()
    }

    /// True while any mark is still moving at `now_ms`.
    #[must_use]
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.groups
            .values()
            .flat_map(|group| group.marks.values())
            .any(|mark| !mark.transition.is_finished(now_ms))
    }

    /// Snapshot of every mark's displayed geometry at `now_ms`.
    #[must_use]
    pub fn frame_at(&self, now_ms: f64) -> SceneFrame {
        SceneFrame {
            groups: self
                .groups
                .values()
                .map(|group| group.frame_at(now_ms))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameMark {
    pub kind: MarkKind,
    pub element_id: String,
    pub class_attr: String,
    pub fill: Option<String>,
    pub geometry: MarkGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameGroup {
    pub class_name: String,
    pub clip_path: Option<String>,
    pub marks: Vec<FrameMark>,
}

/// Backend-agnostic snapshot handed to a [`crate::render::Renderer`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneFrame {
    pub groups: Vec<FrameGroup>,
}

impl SceneFrame {
    pub fn validate(&self) -> ChartResult<()> {
        for mark in self.groups.iter().flat_map(|group| &group.marks) {
            mark.geometry.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.groups.iter().map(|group| group.marks.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mark_count() == 0
    }
}
