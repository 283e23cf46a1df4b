use serde::{Deserialize, Serialize};

/// names of the GeoJSON feature properties that populate a [`super::FacilityPoint`].
/// defaults match the LIPAS WFS layers.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FacilityProperties {
    #[serde(default = "default_id_property")]
    pub id_property: String,
    #[serde(default = "default_name_property")]
    pub name_property: String,
    #[serde(default = "default_type_code_property")]
    pub type_code_property: String,
}

fn default_id_property() -> String {
    String::from("id")
}

fn default_name_property() -> String {
    String::from("nimi_fi")
}

fn default_type_code_property() -> String {
    String::from("tyyppikoodi")
}

impl Default for FacilityProperties {
    fn default() -> Self {
        FacilityProperties {
            id_property: default_id_property(),
            name_property: default_name_property(),
            type_code_property: default_type_code_property(),
        }
    }
}
