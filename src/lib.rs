//! streamflow-chart: scales, ticks, layout and keyed mark rendering for
//! streamflow drought time-series charts.
//!
//! `core` holds the pure derivations, `render` the retained scene graph and
//! its mark renderers, and `api` the application state and chart view.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{AppState, DashboardConfig, DatasetStore, TimeSeriesChart};
pub use error::{ChartError, ChartResult};
