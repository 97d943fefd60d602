mod chart;
mod config;
mod dataset;
mod state;

pub use chart::{ChartFrame, ChartFrameRequest, LayerRequest, MarkLayer, TimeSeriesChart};
pub use config::DashboardConfig;
pub use dataset::{
    Dataset, DatasetKey, DatasetRecord, DatasetStore, PointColumns, parse_dataset_csv,
};
pub use state::{AppState, DateInfo, SiteInfo};
