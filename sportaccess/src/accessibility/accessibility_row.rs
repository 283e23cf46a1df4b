use crate::grid::CellId;
use serde::{Deserialize, Serialize};

/// minimum travel time from one origin cell to its nearest destination, per mode
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AccessibilityRow {
    pub cell_id: CellId,
    pub min_travel_times: Vec<f64>,
}
