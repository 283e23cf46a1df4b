use super::ORIGIN_COLUMN;
use crate::AccessError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// the transport modes to aggregate, as an ordered mapping from mode name to the
/// travel time column holding that mode in the source files. the same mapping
/// drives the schema check when loading files and the minimum reduction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModeConfig {
    #[serde(default = "default_origin_column")]
    pub origin_column: String,
    pub columns: IndexMap<String, String>,
}

fn default_origin_column() -> String {
    String::from(ORIGIN_COLUMN)
}

impl ModeConfig {
    pub fn new(
        origin_column: String,
        columns: IndexMap<String, String>,
    ) -> Result<ModeConfig, AccessError> {
        let config = ModeConfig {
            origin_column,
            columns,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AccessError> {
        if self.columns.is_empty() {
            return Err(AccessError::InvalidInputError(String::from(
                "at least one transport mode must be configured",
            )));
        }
        if self.origin_column.is_empty() {
            return Err(AccessError::InvalidInputError(String::from(
                "origin column name is empty",
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn mode_names(&self) -> impl Iterator<Item = &String> {
        self.columns.keys()
    }

    pub fn source_columns(&self) -> impl Iterator<Item = &String> {
        self.columns.values()
    }

    /// name of a mode column after qualifying it with the destination it belongs to
    pub fn destination_column(mode: &str, destination_index: usize) -> String {
        format!("{mode}_{destination_index}")
    }

    /// name of the minimum travel time column for a mode
    pub fn output_column(mode: &str) -> String {
        format!("min_travel_time_{mode}")
    }
}

impl Default for ModeConfig {
    /// bike (fast), public transport (rush hour) and car (rush hour)
    fn default() -> Self {
        let modes = [("bike", "bike_f_t"), ("pt", "pt_r_t"), ("car", "car_r_t")];
        ModeConfig {
            origin_column: default_origin_column(),
            columns: modes
                .into_iter()
                .map(|(m, c)| (String::from(m), String::from(c)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ModeConfig;
    use indexmap::IndexMap;

    #[test]
    fn test_empty_modes_rejected() {
        let result = ModeConfig::new(String::from("from_id"), IndexMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_default_preserves_order() {
        let config = ModeConfig::default();
        assert_eq!(
            config.mode_names().cloned().collect::<Vec<_>>(),
            vec!["bike", "pt", "car"]
        );
        assert_eq!(ModeConfig::output_column("bike"), "min_travel_time_bike");
        assert_eq!(ModeConfig::destination_column("bike", 2), "bike_2");
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = serde_json::json!({ "columns": { "walk": "walk_t", "car": "car_r_t" } });
        let config: ModeConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.origin_column, "from_id");
        assert_eq!(config.len(), 2);
    }
}
