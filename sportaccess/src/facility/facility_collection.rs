use super::{FacilityPoint, FacilityProperties};
use crate::{grid::Crs, AccessError};
use geojson::{feature::Id, Feature, GeoJson};
use serde_json::Value as JsonValue;

/// facility points together with the coordinate reference system of their geometries.
#[derive(Clone, Debug)]
pub struct FacilityCollection {
    pub crs: Crs,
    pub facilities: Vec<FacilityPoint>,
}

impl FacilityCollection {
    pub fn new(crs: Crs, facilities: Vec<FacilityPoint>) -> FacilityCollection {
        FacilityCollection { crs, facilities }
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FacilityPoint> {
        self.facilities.iter()
    }

    /// reads facilities from a GeoJSON document, as returned by the LIPAS WFS service.
    /// features without a point geometry (routes and areas) are dropped and counted
    /// in a warning.
    ///
    /// # Arguments
    ///
    /// * `geojson_str` - GeoJSON FeatureCollection text
    /// * `crs`         - coordinate reference system of the feature coordinates
    /// * `properties`  - names of the feature properties to read
    pub fn from_geojson_str(
        geojson_str: &str,
        crs: Crs,
        properties: &FacilityProperties,
    ) -> Result<FacilityCollection, AccessError> {
        let geojson = geojson_str
            .parse::<GeoJson>()
            .map_err(|e| AccessError::DataSourceError(format!("invalid GeoJSON: {e}")))?;
        let features = match geojson {
            GeoJson::FeatureCollection(fc) => fc.features,
            GeoJson::Feature(f) => vec![f],
            GeoJson::Geometry(_) => {
                return Err(AccessError::DataSourceError(String::from(
                    "expected a GeoJSON FeatureCollection, found a bare Geometry",
                )))
            }
        };

        let n_features = features.len();
        let mut facilities = Vec::with_capacity(n_features);
        for (idx, feature) in features.iter().enumerate() {
            match feature_point(feature) {
                Some(point) => {
                    let facility_id = facility_id(feature, &properties.id_property)
                        .unwrap_or_else(|| idx.to_string());
                    let name = feature
                        .property(&properties.name_property)
                        .and_then(JsonValue::as_str)
                        .map(String::from);
                    let type_code = feature
                        .property(&properties.type_code_property)
                        .and_then(json_to_u32);
                    facilities.push(FacilityPoint {
                        facility_id,
                        name,
                        type_code,
                        geometry: point,
                    });
                }
                None => continue,
            }
        }
        let n_skipped = n_features - facilities.len();
        if n_skipped > 0 {
            log::warn!("skipped {n_skipped} of {n_features} features without a point geometry");
        }
        Ok(FacilityCollection { crs, facilities })
    }
}

fn feature_point(feature: &Feature) -> Option<geo::Point<f64>> {
    match feature.geometry.as_ref().map(|g| &g.value) {
        Some(geojson::Value::Point(coords)) if coords.len() >= 2 => {
            Some(geo::Point::new(coords[0], coords[1]))
        }
        _ => None,
    }
}

/// the id property when present, otherwise the GeoJSON feature id
fn facility_id(feature: &Feature, id_property: &str) -> Option<String> {
    match feature.property(id_property) {
        Some(JsonValue::String(s)) => Some(s.clone()),
        Some(JsonValue::Number(n)) => Some(n.to_string()),
        _ => match &feature.id {
            Some(Id::String(s)) => Some(s.clone()),
            Some(Id::Number(n)) => Some(n.to_string()),
            None => None,
        },
    }
}

fn json_to_u32(value: &JsonValue) -> Option<u32> {
    match value {
        JsonValue::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
