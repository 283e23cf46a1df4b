mod cell_envelope;
mod destination_cell_set;
mod facility_collection;
mod facility_locator;
mod facility_point;
mod facility_properties;
mod facility_source;

pub use destination_cell_set::DestinationCellSet;
pub use facility_collection::FacilityCollection;
pub use facility_locator::{locate, FacilityLocator};
pub use facility_point::FacilityPoint;
pub use facility_properties::FacilityProperties;
pub use facility_source::{lipas_request_url, FacilitySource, LIPAS_WFS_URL};
