use geo::Point;
use serde::{Deserialize, Serialize};

/// a sport facility location. only the geometry takes part in the spatial join,
/// the remaining attributes are carried for reporting.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FacilityPoint {
    pub facility_id: String,
    pub name: Option<String>,
    pub type_code: Option<u32>,
    pub geometry: Point<f64>,
}

impl FacilityPoint {
    pub fn new(facility_id: String, geometry: Point<f64>) -> FacilityPoint {
        FacilityPoint {
            facility_id,
            name: None,
            type_code: None,
            geometry,
        }
    }
}
