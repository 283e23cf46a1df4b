use super::MissingSourcePolicy;
use crate::{
    facility::FacilitySource,
    grid::{Crs, GridSource},
    travel_time::{ModeConfig, TravelTimeFileResolver},
    AccessError,
};
use config::{Config, FileFormat};
use serde::{Deserialize, Serialize};

/// configuration of an accessibility run, read from TOML. example:
///
/// ```toml
/// crs_epsg = 3067
/// output_file = "outputs/1120_lahiliikuntapaikka.csv"
///
/// [grid]
/// type = "shapefile"
/// file = "data/MetropAccess_YKR_grid_EurefFIN.shp"
/// id_field = "YKR_ID"
///
/// [facilities]
/// type = "lipas_wfs"
/// type_code = 1120
/// type_name = "lahiliikuntapaikka"
/// bbox = [361500.0, 6665250.0, 403750.0, 6698000.0]
///
/// [travel_times]
/// directory = "data/HelsinkiTravelTimeMatrix2018"
///
/// [modes.columns]
/// bike = "bike_f_t"
/// pt = "pt_r_t"
/// car = "car_r_t"
/// ```
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AccessibilityConfig {
    /// EPSG code shared by the grid and the facility coordinates
    #[serde(default = "default_epsg")]
    pub crs_epsg: u32,
    pub grid: GridSource,
    pub facilities: FacilitySource,
    pub travel_times: TravelTimeStorageConfig,
    #[serde(default)]
    pub modes: ModeConfig,
    #[serde(default)]
    pub missing_source_policy: MissingSourcePolicy,
    pub output_file: Option<String>,
}

/// location of an unpacked travel time matrix
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TravelTimeStorageConfig {
    pub directory: String,
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_epsg() -> u32 {
    Crs::ETRS_TM35FIN.epsg
}

fn default_extension() -> String {
    String::from("txt")
}

impl TravelTimeStorageConfig {
    pub fn resolver(&self) -> TravelTimeFileResolver {
        TravelTimeFileResolver::new(&self.directory, &self.extension)
    }
}

impl AccessibilityConfig {
    pub fn crs(&self) -> Crs {
        Crs::from_epsg(self.crs_epsg)
    }

    /// reads a TOML configuration file
    pub fn from_file(config_filepath: &str) -> Result<AccessibilityConfig, AccessError> {
        let config_file = config::File::new(config_filepath, FileFormat::Toml);
        AccessibilityConfig::build(config_file, config_filepath)
    }

    /// reads a TOML configuration document
    pub fn from_toml_str(toml_str: &str) -> Result<AccessibilityConfig, AccessError> {
        let config_file = config::File::from_str(toml_str, FileFormat::Toml);
        AccessibilityConfig::build(config_file, "<inline>")
    }

    fn build<S>(source: S, name: &str) -> Result<AccessibilityConfig, AccessError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .add_source(source)
            .build()
            .map_err(|e| AccessError::ConfigReadError {
                msg: format!("failed reading '{name}'"),
                source: e,
            })?;
        let config_json = config
            .try_deserialize::<serde_json::Value>()
            .map_err(|e| AccessError::ConfigReadError {
                msg: format!("failed converting '{name}' to JSON"),
                source: e,
            })?;
        let accessibility_config: AccessibilityConfig = serde_json::from_value(config_json)
            .map_err(|e| {
                AccessError::InvalidInputError(format!("invalid configuration '{name}': {e}"))
            })?;
        accessibility_config.modes.validate()?;
        Ok(accessibility_config)
    }
}
