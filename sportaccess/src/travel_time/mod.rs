mod file_resolver;
mod joined_table;
mod mode_config;
mod resolved_source;
mod travel_time_aggregator;
mod travel_time_record_set;

pub use file_resolver::{partition_prefix, travel_time_path, TravelTimeFileResolver};
pub use mode_config::ModeConfig;
pub use resolved_source::{Resolution, ResolvedSource};
pub use travel_time_aggregator::TravelTimeAggregator;
pub use travel_time_record_set::TravelTimeRecordSet;

/// origin cell column of the Helsinki Travel Time Matrix files
pub const ORIGIN_COLUMN: &str = "from_id";
/// field delimiter of the Helsinki Travel Time Matrix files
pub const DELIMITER: u8 = b';';
