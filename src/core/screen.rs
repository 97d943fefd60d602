use serde::{Deserialize, Serialize};

/// Viewport size class used to pick status-bar dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScreenCategory {
    #[default]
    Desktop,
    Tablet,
    Phone,
}

impl ScreenCategory {
    /// Classifies a viewport width in CSS pixels.
    ///
    /// `desktop` from the large breakpoint up, `tablet` from the medium
    /// breakpoint up, `phone` otherwise.
    #[must_use]
    pub fn classify(viewport_width: f64, breakpoints: &Breakpoints) -> Self {
        if viewport_width >= breakpoints.large_screen {
            Self::Desktop
        } else if viewport_width >= breakpoints.medium_screen {
            Self::Tablet
        } else {
            Self::Phone
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Phone => "phone",
        }
    }
}

/// Screen-size breakpoints shared with the site style sheet, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    pub small_screen: f64,
    pub medium_screen: f64,
    pub large_screen: f64,
    pub site_max_width: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            small_screen: 481.0,
            medium_screen: 641.0,
            large_screen: 1025.0,
            site_max_width: 1024.0,
        }
    }
}

/// One value per [`ScreenCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerScreen<T> {
    pub desktop: T,
    pub tablet: T,
    pub phone: T,
}

impl<T: Copy> PerScreen<T> {
    #[must_use]
    pub const fn new(desktop: T, tablet: T, phone: T) -> Self {
        Self {
            desktop,
            tablet,
            phone,
        }
    }

    #[must_use]
    pub fn get(&self, category: ScreenCategory) -> T {
        match category {
            ScreenCategory::Desktop => self.desktop,
            ScreenCategory::Tablet => self.tablet,
            ScreenCategory::Phone => self.phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Breakpoints, ScreenCategory};

    #[test]
    fn classification_follows_breakpoints() {
        let breakpoints = Breakpoints::default();
        assert_eq!(ScreenCategory::classify(1400.0, &breakpoints), ScreenCategory::Desktop);
        assert_eq!(ScreenCategory::classify(1025.0, &breakpoints), ScreenCategory::Desktop);
        assert_eq!(ScreenCategory::classify(1024.0, &breakpoints), ScreenCategory::Tablet);
        assert_eq!(ScreenCategory::classify(641.0, &breakpoints), ScreenCategory::Tablet);
        assert_eq!(ScreenCategory::classify(640.0, &breakpoints), ScreenCategory::Phone);
    }
}
