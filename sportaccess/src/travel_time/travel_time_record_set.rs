use super::{ModeConfig, ResolvedSource, DELIMITER};
use crate::{grid::CellId, AccessError};
use std::{collections::HashMap, str::FromStr};

/// travel times from every origin cell to a single destination cell, restricted
/// to the configured modes. each value vector follows the [`ModeConfig`] order;
/// `None` marks a time that is unreachable or was never computed.
#[derive(Clone, Debug)]
pub struct TravelTimeRecordSet {
    pub destination: CellId,
    records: HashMap<CellId, Vec<Option<f64>>>,
}

impl TravelTimeRecordSet {
    /// reads the semicolon-delimited travel time file of a destination cell.
    ///
    /// # Arguments
    ///
    /// * `source` - destination cell and its travel time file
    /// * `modes`  - origin column and mode columns to read
    ///
    /// # Returns
    ///
    /// * the record set, or a [`AccessError::SchemaError`] when the origin column or a
    ///   mode column is absent from the header
    pub fn load(
        source: &ResolvedSource,
        modes: &ModeConfig,
    ) -> Result<TravelTimeRecordSet, AccessError> {
        let filename = source.path.to_string_lossy().to_string();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&source.path)
            .map_err(|e| AccessError::CsvError {
                msg: format!("failure opening '{filename}'"),
                source: e,
            })?;
        let headers = reader
            .headers()
            .map_err(|e| AccessError::CsvError {
                msg: format!("failure reading header of '{filename}'"),
                source: e,
            })?
            .clone();
        let header_lookup = headers
            .iter()
            .enumerate()
            .map(|(i, s)| (s, i))
            .collect::<HashMap<_, _>>();
        let column_index = |column: &String| {
            header_lookup
                .get(column.as_str())
                .copied()
                .ok_or_else(|| AccessError::SchemaError {
                    file: filename.clone(),
                    column: column.clone(),
                })
        };
        let origin_idx = column_index(&modes.origin_column)?;
        let mode_indices = modes
            .source_columns()
            .map(column_index)
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = HashMap::new();
        for (row_idx, row) in reader.records().enumerate() {
            let record = row.map_err(|e| AccessError::CsvError {
                msg: format!("failure reading row {row_idx} of '{filename}'"),
                source: e,
            })?;
            let origin_str = record.get(origin_idx).unwrap_or_default();
            let origin = CellId::from_str(origin_str).map_err(|e| {
                AccessError::DataSourceError(format!("'{filename}' row {row_idx}: {e}"))
            })?;
            let times = mode_indices
                .iter()
                .map(|idx| parse_travel_time(record.get(*idx).unwrap_or_default()))
                .collect::<Result<Vec<_>, String>>()
                .map_err(|e| {
                    AccessError::DataSourceError(format!("'{filename}' row {row_idx}: {e}"))
                })?;
            if records.insert(origin, times).is_some() {
                return Err(AccessError::DataSourceError(format!(
                    "'{filename}' lists origin cell {origin} more than once"
                )));
            }
        }
        log::debug!("read {} origin rows from '{}'", records.len(), filename);
        Ok(TravelTimeRecordSet {
            destination: source.cell_id,
            records,
        })
    }

    /// builds a record set from rows already in memory. every row must hold one
    /// value per configured mode, in mode order.
    pub fn from_records(
        destination: CellId,
        records: HashMap<CellId, Vec<Option<f64>>>,
        modes: &ModeConfig,
    ) -> Result<TravelTimeRecordSet, AccessError> {
        if let Some((origin, values)) = records.iter().find(|(_, v)| v.len() != modes.len()) {
            return Err(AccessError::InvalidInputError(format!(
                "travel times to {destination} from {origin} have {} values, expected one per mode ({})",
                values.len(),
                modes.len()
            )));
        }
        Ok(TravelTimeRecordSet {
            destination,
            records,
        })
    }

    /// number of travel time values per origin row, or None when rows disagree
    pub(crate) fn width(&self) -> Option<usize> {
        let mut widths = self.records.values().map(|v| v.len());
        let first = widths.next().unwrap_or_default();
        widths.all(|w| w == first).then_some(first)
    }

    /// travel times from this origin, or None if the file has no row for it
    pub fn get(&self, origin: &CellId) -> Option<&[Option<f64>]> {
        self.records.get(origin).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// empty fields and negative values (the -1 sentinel) are missing travel times
fn parse_travel_time(value: &str) -> Result<Option<f64>, String> {
    if value.is_empty() {
        return Ok(None);
    }
    let time = value
        .parse::<f64>()
        .map_err(|e| format!("invalid travel time '{value}': {e}"))?;
    if time.is_nan() || time < 0.0 {
        Ok(None)
    } else {
        Ok(Some(time))
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_travel_time, TravelTimeRecordSet};
    use crate::{
        grid::CellId,
        travel_time::{ModeConfig, ResolvedSource},
        AccessError,
    };
    use std::{collections::HashMap, path::PathBuf};

    fn write_source(dir: &std::path::Path, contents: &str) -> ResolvedSource {
        let path = dir.join("travel_times_to_5785640.txt");
        std::fs::write(&path, contents).unwrap();
        ResolvedSource {
            cell_id: CellId(5785640),
            path,
        }
    }

    #[test]
    fn test_parse_travel_time() {
        assert_eq!(parse_travel_time("12"), Ok(Some(12.0)));
        assert_eq!(parse_travel_time("0"), Ok(Some(0.0)));
        assert_eq!(parse_travel_time("-1"), Ok(None));
        assert_eq!(parse_travel_time(""), Ok(None));
        assert!(parse_travel_time("fast").is_err());
    }

    #[test]
    fn test_load_selects_configured_columns() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(
            dir.path(),
            "from_id;to_id;walk_t;bike_f_t;pt_r_t;car_r_t\n\
             5785640;5785640;0;0;0;0\n\
             5785641;5785640;12;5;-1;8\n",
        );
        let set = TravelTimeRecordSet::load(&source, &ModeConfig::default()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.destination, CellId(5785640));
        assert_eq!(
            set.get(&CellId(5785641)).unwrap(),
            &[Some(5.0), None, Some(8.0)]
        );
        assert!(set.get(&CellId(1)).is_none());
    }

    #[test]
    fn test_missing_mode_column_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), "from_id;to_id;bike_f_t;pt_r_t\n1;2;3;4\n");
        let result = TravelTimeRecordSet::load(&source, &ModeConfig::default());
        match result {
            Err(AccessError::SchemaError { column, .. }) => assert_eq!(column, "car_r_t"),
            other => panic!("expected schema error, found {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_origin_is_data_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(
            dir.path(),
            "from_id;to_id;bike_f_t;pt_r_t;car_r_t\n\
             5785641;5785640;5;7;8\n\
             5785641;5785640;6;7;8\n",
        );
        let result = TravelTimeRecordSet::load(&source, &ModeConfig::default());
        match result {
            Err(AccessError::DataSourceError(msg)) => assert!(msg.contains("5785641")),
            other => panic!("expected data source error, found {other:?}"),
        }
    }

    #[test]
    fn test_unparsable_travel_time_is_data_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(
            dir.path(),
            "from_id;to_id;bike_f_t;pt_r_t;car_r_t\n\
             5785641;5785640;5;slow;8\n",
        );
        let result = TravelTimeRecordSet::load(&source, &ModeConfig::default());
        match result {
            Err(AccessError::DataSourceError(msg)) => assert!(msg.contains("slow")),
            other => panic!("expected data source error, found {other:?}"),
        }
    }

    #[test]
    fn test_from_records_checks_width() {
        let modes = ModeConfig::default();
        let rows = HashMap::from([(CellId(1), vec![Some(1.0), None, Some(3.0)])]);
        let set = TravelTimeRecordSet::from_records(CellId(2), rows, &modes).unwrap();
        assert_eq!(set.width(), Some(3));
        let short = HashMap::from([(CellId(1), vec![Some(1.0)])]);
        assert!(matches!(
            TravelTimeRecordSet::from_records(CellId(2), short, &modes),
            Err(AccessError::InvalidInputError(_))
        ));
    }

    #[test]
    fn test_missing_file_is_error() {
        let source = ResolvedSource {
            cell_id: CellId(1),
            path: PathBuf::from("/nonexistent/travel_times_to_1.txt"),
        };
        assert!(TravelTimeRecordSet::load(&source, &ModeConfig::default()).is_err());
    }
}
