use super::{AccessibilityRow, CELL_ID_COLUMN, GEOMETRY_COLUMN};
use crate::{
    grid::{CellId, GridCatalog},
    travel_time::ModeConfig,
    AccessError,
};
use itertools::Itertools;
use std::{collections::HashMap, path::Path};
use wkt::ToWkt;

/// result of an aggregation: one row per origin cell that has a complete set of
/// travel times to every destination, ordered as in the grid. an empty table is a
/// valid result and must be checked with [`AccessibilityTable::is_empty`].
#[derive(Clone, Debug, PartialEq)]
pub struct AccessibilityTable {
    mode_names: Vec<String>,
    rows: Vec<AccessibilityRow>,
    index: HashMap<CellId, usize>,
}

impl AccessibilityTable {
    pub fn new(mode_names: Vec<String>, rows: Vec<AccessibilityRow>) -> AccessibilityTable {
        let index = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (row.cell_id, idx))
            .collect();
        AccessibilityTable {
            mode_names,
            rows,
            index,
        }
    }

    pub fn mode_names(&self) -> &[String] {
        &self.mode_names
    }

    /// origin id column followed by one `min_travel_time_<mode>` column per mode
    pub fn column_names(&self) -> Vec<String> {
        std::iter::once(String::from(CELL_ID_COLUMN))
            .chain(self.mode_names.iter().map(|m| ModeConfig::output_column(m)))
            .collect()
    }

    pub fn rows(&self) -> &[AccessibilityRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, cell_id: &CellId) -> Option<&AccessibilityRow> {
        self.index.get(cell_id).map(|idx| &self.rows[*idx])
    }

    /// minimum travel time from a cell for a mode, if the cell is in the table
    pub fn min_travel_time(&self, cell_id: &CellId, mode: &str) -> Option<f64> {
        let mode_idx = self.mode_names.iter().position(|m| m == mode)?;
        self.get(cell_id)
            .and_then(|row| row.min_travel_times.get(mode_idx).copied())
    }

    /// writes the table as CSV with the grid polygon of each cell as a WKT column,
    /// for consumption by rasterizing and plotting tools.
    pub fn write_csv(&self, output_file: &Path, grid: &GridCatalog) -> Result<(), AccessError> {
        let output_str = output_file.to_string_lossy().to_string();
        let mut writer =
            csv::Writer::from_path(output_file).map_err(|e| AccessError::CsvError {
                msg: format!("failure opening output file {output_str}"),
                source: e,
            })?;
        let header = std::iter::once(String::from(CELL_ID_COLUMN))
            .chain(std::iter::once(String::from(GEOMETRY_COLUMN)))
            .chain(self.mode_names.iter().map(|m| ModeConfig::output_column(m)))
            .collect_vec();
        writer
            .write_record(&header)
            .map_err(|e| AccessError::CsvError {
                msg: format!("failure writing header to {output_str}"),
                source: e,
            })?;
        for (idx, row) in self.rows.iter().enumerate() {
            let cell = grid.get(&row.cell_id).ok_or_else(|| {
                AccessError::InvalidInputError(format!(
                    "cell {} is not part of the grid",
                    row.cell_id
                ))
            })?;
            let record = [row.cell_id.to_string(), cell.geometry.to_wkt().to_string()]
                .into_iter()
                .chain(row.min_travel_times.iter().map(|t| t.to_string()))
                .collect_vec();
            writer
                .write_record(&record)
                .map_err(|e| AccessError::CsvError {
                    msg: format!("failure writing CSV output row {idx}"),
                    source: e,
                })?;
        }
        writer.flush()?;
        log::info!("wrote {} rows to {}", self.rows.len(), output_str);
        Ok(())
    }
}
