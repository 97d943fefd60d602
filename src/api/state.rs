use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::config::DashboardConfig;
use crate::core::ScaleKind;
use crate::error::{ChartError, ChartResult};

/// Forecast week paired with its issue date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInfo {
    #[serde(rename = "f_w")]
    pub forecast_week: i32,
    #[serde(rename = "dt")]
    pub date: NaiveDate,
}

/// One row of the site table. Columns other than the id are kept as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInfo {
    pub site_id: String,
    #[serde(flatten)]
    pub attributes: IndexMap<String, serde_json::Value>,
}

impl SiteInfo {
    #[must_use]
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            attributes: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }
}

/// Selection and display state read by chart derivations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    date_info: Vec<DateInfo>,
    selected_week: Option<i32>,
    site_info: Vec<SiteInfo>,
    selected_site: Option<String>,
    selected_extent: Option<String>,
    pub scale_kind: ScaleKind,
    pub transition_length_ms: f64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl AppState {
    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            date_info: Vec::new(),
            selected_week: None,
            site_info: Vec::new(),
            selected_site: None,
            selected_extent: None,
            scale_kind: config.scale_kind,
            transition_length_ms: config.transition_length_ms,
        }
    }

    /// Replaces the date table. A selected week absent from it is cleared.
    pub fn set_date_info(&mut self, date_info: Vec<DateInfo>) {
        self.date_info = date_info;
        let Some(week) = self.selected_week else {
            return;
        };
        if !self.date_info.iter().any(|info| info.forecast_week == week) {
            debug!(week, "selected week dropped with date table");
            self.selected_week = None;
        }
    }

    /// Parses a JSON array of `{ "f_w", "dt" }` entries.
    pub fn load_date_info_json(&mut self, input: &str) -> ChartResult<()> {
        let date_info: Vec<DateInfo> = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse date info: {e}")))?;
        self.set_date_info(date_info);
        Ok(())
    }

    #[must_use]
    pub fn date_info(&self) -> &[DateInfo] {
        &self.date_info
    }

    /// Forecast weeks in table order.
    #[must_use]
    pub fn data_weeks(&self) -> Vec<i32> {
        self.date_info.iter().map(|info| info.forecast_week).collect()
    }

    /// Issue date of the selected week.
    #[must_use]
    pub fn selected_date(&self) -> Option<NaiveDate> {
        let week = self.selected_week?;
        self.date_info
            .iter()
            .find(|info| info.forecast_week == week)
            .map(|info| info.date)
    }

    #[must_use]
    pub fn selected_week(&self) -> Option<i32> {
        self.selected_week
    }

    pub fn select_week(&mut self, week: i32) -> ChartResult<()> {
        if !self.date_info.iter().any(|info| info.forecast_week == week) {
            return Err(ChartError::InvalidData(format!(
                "unknown forecast week: {week}"
            )));
        }
        self.selected_week = Some(week);
        Ok(())
    }

    /// Replaces the site table. A selected site absent from it is cleared.
    pub fn set_site_info(&mut self, site_info: Vec<SiteInfo>) {
        self.site_info = site_info;
        let Some(site_id) = self.selected_site.as_deref() else {
            return;
        };
        if !self.site_info.iter().any(|site| site.site_id == site_id) {
            debug!(site_id, "selected site dropped with site table");
            self.selected_site = None;
        }
    }

    pub fn load_site_info_json(&mut self, input: &str) -> ChartResult<()> {
        let site_info: Vec<SiteInfo> = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse site info: {e}")))?;
        self.set_site_info(site_info);
        Ok(())
    }

    #[must_use]
    pub fn site_info(&self) -> &[SiteInfo] {
        &self.site_info
    }

    /// Table row of the selected site.
    #[must_use]
    pub fn selected_site_info(&self) -> Option<&SiteInfo> {
        let site_id = self.selected_site.as_deref()?;
        self.site_info.iter().find(|site| site.site_id == site_id)
    }

    #[must_use]
    pub fn selected_site(&self) -> Option<&str> {
        self.selected_site.as_deref()
    }

    pub fn select_site(&mut self, site_id: Option<String>) {
        self.selected_site = site_id;
    }

    #[must_use]
    pub fn selected_extent(&self) -> Option<&str> {
        self.selected_extent.as_deref()
    }

    pub fn select_extent(&mut self, extent: Option<String>) {
        self.selected_extent = extent;
    }
}
