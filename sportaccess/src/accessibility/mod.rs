mod accessibility_row;
mod accessibility_table;

pub use accessibility_row::AccessibilityRow;
pub use accessibility_table::AccessibilityTable;

/// name of the origin cell column in exported tables
pub const CELL_ID_COLUMN: &str = "cell_id";
/// name of the WKT geometry column in exported tables
pub const GEOMETRY_COLUMN: &str = "geometry";
