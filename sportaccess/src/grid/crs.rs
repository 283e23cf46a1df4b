use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// coordinate reference system of a dataset, declared by its EPSG code.
/// datasets never have their CRS inferred, it is always set explicitly
/// when they are loaded.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Crs {
    pub epsg: u32,
}

impl Crs {
    /// ETRS89 / TM35FIN, the projection of the YKR grid and the LIPAS service
    pub const ETRS_TM35FIN: Crs = Crs { epsg: 3067 };

    pub fn from_epsg(epsg: u32) -> Crs {
        Crs { epsg }
    }
}

impl Default for Crs {
    fn default() -> Self {
        Crs::ETRS_TM35FIN
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.epsg)
    }
}
