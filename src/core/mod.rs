pub mod layout;
pub mod scale;
pub mod screen;
pub mod segment;
pub mod tick_format;
pub mod tick_marks;
pub mod ticks;
pub mod time_scale;
pub mod types;
pub mod value_scale;

pub use layout::{
    ASPECT_RATIO, BASE_MARGIN, ChartLayout, LayoutEngine, LayoutInputs, LayoutProfile, Margin,
    compute_layout, left_margin,
};
pub use scale::LinearScale;
pub use screen::{Breakpoints, PerScreen, ScreenCategory};
pub use segment::{Segment, SegmentBuilder, SegmentShape, segments_value_domain};
pub use tick_format::TickFormat;
pub use tick_marks::{
    MAX_WATER_DATA_TICK_COUNT, TickCache, TickCacheStats, TickSet, get_water_data_ticks,
    round_log_tick,
};
pub use ticks::{linear_ticks, tick_increment};
pub use time_scale::{TimeScale, build_time_scale};
pub use types::{Point, PointField, ValueDomain, epoch_millis, offset_days, start_of_day};
pub use value_scale::{
    DATA_PADDING_RATIO, ScaleKind, ValueScale, ValueTransform, build_value_scale,
    pad_value_domain,
};
