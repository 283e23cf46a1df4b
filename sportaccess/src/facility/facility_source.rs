use super::{FacilityCollection, FacilityProperties};
use crate::{grid::Crs, AccessError};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// LIPAS geoserver OWS endpoint
pub const LIPAS_WFS_URL: &str = "http://lipas.cc.jyu.fi/geoserver/lipas/ows";

/// source of sport facility locations
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum FacilitySource {
    /// reads a GeoJSON FeatureCollection from disk
    GeoJson {
        file: String,
        #[serde(default)]
        properties: FacilityProperties,
    },
    /// requests one facility layer from the LIPAS WFS service, such as
    /// type code 1120, type name "lahiliikuntapaikka"
    LipasWfs {
        #[serde(default = "default_wfs_url")]
        url: String,
        type_code: u32,
        type_name: String,
        /// xmin, ymin, xmax, ymax in the configured CRS
        bbox: [f64; 4],
        #[serde(default)]
        properties: FacilityProperties,
    },
}

fn default_wfs_url() -> String {
    String::from(LIPAS_WFS_URL)
}

impl FacilitySource {
    /// loads the facilities, declaring their coordinates to be in the given CRS.
    pub fn read(&self, crs: Crs) -> Result<FacilityCollection, AccessError> {
        let collection = match self {
            FacilitySource::GeoJson { file, properties } => {
                let contents = std::fs::read_to_string(file).map_err(|e| {
                    AccessError::DataSourceError(format!("failed reading '{file}': {e}"))
                })?;
                FacilityCollection::from_geojson_str(&contents, crs, properties)?
            }
            FacilitySource::LipasWfs {
                url,
                type_code,
                type_name,
                bbox,
                properties,
            } => {
                let request_url = lipas_request_url(url, *type_code, type_name, bbox, crs);
                log::debug!("requesting {request_url}");
                let body = reqwest::blocking::get(&request_url)
                    .and_then(|response| response.error_for_status())
                    .and_then(|response| response.text())
                    .map_err(|e| AccessError::FetchError(format!("{request_url}: {e}")))?;
                FacilityCollection::from_geojson_str(&body, crs, properties)?
            }
        };
        log::info!("read {} facilities from {}", collection.len(), self);
        Ok(collection)
    }
}

impl Display for FacilitySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacilitySource::GeoJson { file, .. } => write!(f, "GeoJSON '{file}'"),
            FacilitySource::LipasWfs {
                type_code,
                type_name,
                ..
            } => write!(f, "LIPAS layer lipas_{type_code}_{type_name}"),
        }
    }
}

/// builds a WFS 2.0.0 GetFeature request for a single LIPAS layer restricted to a
/// bounding box, with a GeoJSON response.
pub fn lipas_request_url(
    url: &str,
    type_code: u32,
    type_name: &str,
    bbox: &[f64; 4],
    crs: Crs,
) -> String {
    let [xmin, ymin, xmax, ymax] = bbox;
    format!(
        "{url}?service=wfs&version=2.0.0&request=GetFeature&typeNames=lipas:lipas_{type_code}_{type_name}&bbox={xmin},{ymin},{xmax},{ymax},{crs}&outputFormat=json"
    )
}

#[cfg(test)]
mod tests {
    use super::{lipas_request_url, FacilitySource, LIPAS_WFS_URL};
    use crate::grid::Crs;
    use std::io::Write;

    #[test]
    fn test_lipas_request_url() {
        let url = lipas_request_url(
            LIPAS_WFS_URL,
            1120,
            "lahiliikuntapaikka",
            &[361500.0, 6665250.0, 403750.0, 6698000.0],
            Crs::ETRS_TM35FIN,
        );
        assert_eq!(
            url,
            "http://lipas.cc.jyu.fi/geoserver/lipas/ows?service=wfs&version=2.0.0&request=GetFeature&typeNames=lipas:lipas_1120_lahiliikuntapaikka&bbox=361500,6665250,403750,6698000,EPSG:3067&outputFormat=json"
        );
    }

    #[test]
    fn test_read_geojson_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"type":"FeatureCollection","features":[{{"type":"Feature","geometry":{{"type":"Point","coordinates":[1.0,2.0]}},"properties":{{"id":1}}}}]}}"#
        )
        .unwrap();
        let source = FacilitySource::GeoJson {
            file: file.path().to_string_lossy().to_string(),
            properties: Default::default(),
        };
        let collection = source.read(Crs::ETRS_TM35FIN).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.crs, Crs::ETRS_TM35FIN);
    }

    #[test]
    fn test_read_missing_geojson_file() {
        let source = FacilitySource::GeoJson {
            file: String::from("/nonexistent/facilities.geojson"),
            properties: Default::default(),
        };
        assert!(source.read(Crs::ETRS_TM35FIN).is_err());
    }
}
