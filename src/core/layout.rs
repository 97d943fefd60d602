use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::screen::{PerScreen, ScreenCategory};
use crate::core::tick_marks::{TickCache, TickSet, get_water_data_ticks};
use crate::core::types::ValueDomain;
use crate::core::value_scale::ScaleKind;

/// Chart height as a share of its width.
pub const ASPECT_RATIO: f64 = 0.8;

/// Approximate pixel width of one y-axis label character.
const LABEL_CHAR_WIDTH_PX: f64 = 8.0;
/// Floor added to the longest label so short labels are never clipped.
const LABEL_MIN_EXTRA_PX: f64 = 20.0;

pub const BASE_MARGIN: Margin = Margin {
    top: 15.0,
    right: 5.0,
    bottom: 25.0,
    left: 5.0,
};

/// Layout reported before any container width is known.
const INITIAL_SIZE: (f64, f64) = (100.0, 50.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Status-bar density profile, chosen once at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutProfile {
    #[default]
    Compact,
    Tall,
}

impl LayoutProfile {
    #[must_use]
    pub fn status_bar_heights(self) -> PerScreen<f64> {
        match self {
            Self::Compact => PerScreen::new(11.0, 11.0, 10.0),
            Self::Tall => PerScreen::new(23.0, 23.0, 19.0),
        }
    }

    #[must_use]
    pub fn indicator_offsets(self) -> PerScreen<f64> {
        match self {
            Self::Compact => PerScreen::new(5.0, 3.0, 3.0),
            Self::Tall => PerScreen::new(14.0, 14.0, 11.5),
        }
    }
}

/// SVG dimensions plus the margins reserved around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub status_bar_height: f64,
    pub status_bar_indicator_offset: f64,
}

impl ChartLayout {
    #[must_use]
    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    #[must_use]
    pub fn plot_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }
}

/// Left margin wide enough for a y-axis label of `max_tick_label_length` chars.
#[must_use]
pub fn left_margin(max_tick_label_length: usize) -> f64 {
    let chars = max_tick_label_length as f64;
    (BASE_MARGIN.left + chars * LABEL_CHAR_WIDTH_PX)
        .max(BASE_MARGIN.left + chars + LABEL_MIN_EXTRA_PX)
}

fn chart_size(container_width: Option<f64>) -> Option<(f64, f64)> {
    container_width
        .filter(|width| width.is_finite() && *width > 0.0)
        .map(|width| (width, width * ASPECT_RATIO))
}

fn assemble(
    size: (f64, f64),
    max_tick_label_length: usize,
    profile: LayoutProfile,
    screen: ScreenCategory,
) -> ChartLayout {
    let status_bar_height = profile.status_bar_heights().get(screen);
    ChartLayout {
        width: size.0,
        height: size.1,
        margin: Margin {
            left: left_margin(max_tick_label_length),
            bottom: BASE_MARGIN.bottom + status_bar_height,
            ..BASE_MARGIN
        },
        status_bar_height,
        status_bar_indicator_offset: profile.indicator_offsets().get(screen),
    }
}

/// Computes the chart layout for one set of inputs.
///
/// A missing or non-positive container width yields the initial 100×50 size.
/// A missing result domain reserves no extra label width.
#[must_use]
pub fn compute_layout(
    container_width: Option<f64>,
    result_domain: Option<ValueDomain>,
    scale_kind: ScaleKind,
    screen: ScreenCategory,
    profile: LayoutProfile,
) -> ChartLayout {
    let label_length = result_domain.map_or(0, |domain| {
        get_water_data_ticks(domain, scale_kind.uses_symlog(), false)
            .max_tick_label_length
    });
    assemble(
        chart_size(container_width).unwrap_or(INITIAL_SIZE),
        label_length,
        profile,
        screen,
    )
}

/// Inputs the layout depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInputs {
    pub container_width: Option<f64>,
    pub result_domain: Option<ValueDomain>,
    pub scale_kind: ScaleKind,
    pub screen: ScreenCategory,
}

/// Recompute-on-change layout holder.
///
/// The last known container width is kept while the container reports no
/// width, and tick generation for label sizing goes through a [`TickCache`].
#[derive(Debug)]
pub struct LayoutEngine {
    profile: LayoutProfile,
    tick_cache: TickCache,
    last_inputs: Option<LayoutInputs>,
    size: (f64, f64),
    layout: ChartLayout,
    recompute_count: u64,
}

impl LayoutEngine {
    #[must_use]
    pub fn new(profile: LayoutProfile) -> Self {
        Self {
            profile,
            tick_cache: TickCache::new(),
            last_inputs: None,
            size: INITIAL_SIZE,
            layout: assemble(INITIAL_SIZE, 0, profile, ScreenCategory::default()),
            recompute_count: 0,
        }
    }

    #[must_use]
    pub fn profile(&self) -> LayoutProfile {
        self.profile
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    #[must_use]
    pub fn tick_cache(&self) -> &TickCache {
        &self.tick_cache
    }

    /// Tick set for an axis, served from the engine's cache.
    pub fn ticks(
        &mut self,
        domain: ValueDomain,
        scale_kind: ScaleKind,
        reverse_range: bool,
    ) -> TickSet {
        self.tick_cache
            .get_or_compute(domain, scale_kind.uses_symlog(), reverse_range)
            .clone()
    }

    /// Returns the layout for `inputs`, recomputing only when they changed.
    pub fn update(&mut self, inputs: LayoutInputs) -> ChartLayout {
        if self.last_inputs == Some(inputs) {
            return self.layout;
        }

        if let Some(size) = chart_size(inputs.container_width) {
            self.size = size;
        }
        let label_length = match inputs.result_domain {
            Some(domain) => {
                self.tick_cache
                    .get_or_compute(domain, inputs.scale_kind.uses_symlog(), false)
                    .max_tick_label_length
            }
            None => 0,
        };

        self.layout = assemble(self.size, label_length, self.profile, inputs.screen);
        self.last_inputs = Some(inputs);
        self.recompute_count += 1;
        debug!(
            width = self.layout.width,
            height = self.layout.height,
            left = self.layout.margin.left,
            bottom = self.layout.margin.bottom,
            screen = inputs.screen.as_str(),
            "layout recomputed"
        );
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::{LayoutEngine, LayoutInputs, LayoutProfile, left_margin};
    use crate::core::screen::ScreenCategory;
    use crate::core::types::ValueDomain;
    use crate::core::value_scale::ScaleKind;

    fn inputs(width: Option<f64>) -> LayoutInputs {
        LayoutInputs {
            container_width: width,
            result_domain: Some(ValueDomain::new(0.0, 100.0).expect("domain")),
            scale_kind: ScaleKind::Linear,
            screen: ScreenCategory::Desktop,
        }
    }

    #[test]
    fn left_margin_switches_to_per_char_width_for_long_labels() {
        assert_eq!(left_margin(0), 25.0);
        assert_eq!(left_margin(2), 27.0);
        assert_eq!(left_margin(3), 29.0);
        assert_eq!(left_margin(4), 37.0);
    }

    #[test]
    fn unchanged_inputs_do_not_recompute() {
        let mut engine = LayoutEngine::new(LayoutProfile::Compact);
        engine.update(inputs(Some(500.0)));
        engine.update(inputs(Some(500.0)));
        assert_eq!(engine.recompute_count(), 1);
        assert_eq!(engine.tick_cache().stats().misses, 1);
    }

    #[test]
    fn missing_width_keeps_last_known_size() {
        let mut engine = LayoutEngine::new(LayoutProfile::Compact);
        engine.update(inputs(Some(500.0)));
        let layout = engine.update(inputs(None));
        assert_eq!(layout.width, 500.0);
        assert_eq!(layout.height, 400.0);
    }
}
