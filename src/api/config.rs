use serde::{Deserialize, Serialize};

use crate::core::{Breakpoints, LayoutProfile, ScaleKind};
use crate::error::{ChartError, ChartResult};

/// Dashboard bootstrap configuration.
///
/// Every field has a default so a partial JSON document is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub breakpoints: Breakpoints,
    #[serde(default)]
    pub layout_profile: LayoutProfile,
    #[serde(default)]
    pub scale_kind: ScaleKind,
    #[serde(default = "default_transition_length_ms")]
    pub transition_length_ms: f64,
    #[serde(default = "default_dataset_cache_capacity")]
    pub dataset_cache_capacity: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            layout_profile: LayoutProfile::default(),
            scale_kind: ScaleKind::default(),
            transition_length_ms: default_transition_length_ms(),
            dataset_cache_capacity: default_dataset_cache_capacity(),
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_layout_profile(mut self, profile: LayoutProfile) -> Self {
        self.layout_profile = profile;
        self
    }

    #[must_use]
    pub fn with_scale_kind(mut self, scale_kind: ScaleKind) -> Self {
        self.scale_kind = scale_kind;
        self
    }

    #[must_use]
    pub fn with_transition_length_ms(mut self, transition_length_ms: f64) -> Self {
        self.transition_length_ms = transition_length_ms;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        let Breakpoints {
            small_screen,
            medium_screen,
            large_screen,
            site_max_width,
        } = self.breakpoints;
        if !(small_screen < medium_screen && medium_screen < large_screen) {
            return Err(ChartError::Config(format!(
                "breakpoints must ascend: {small_screen}, {medium_screen}, {large_screen}"
            )));
        }
        if !(site_max_width.is_finite() && site_max_width > 0.0) {
            return Err(ChartError::Config(format!(
                "site max width must be > 0, got {site_max_width}"
            )));
        }
        if !(self.transition_length_ms.is_finite() && self.transition_length_ms >= 0.0) {
            return Err(ChartError::Config(format!(
                "transition length must be >= 0, got {}",
                self.transition_length_ms
            )));
        }
        if self.dataset_cache_capacity == 0 {
            return Err(ChartError::Config(
                "dataset cache capacity must be > 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Config(format!("failed to parse dashboard config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Config(format!("failed to serialize dashboard config: {e}")))
    }
}

fn default_transition_length_ms() -> f64 {
    2000.0
}

fn default_dataset_cache_capacity() -> usize {
    32
}
