use super::{joined_table::JoinedTable, ModeConfig, ResolvedSource, TravelTimeRecordSet};
use crate::{
    accessibility::{AccessibilityRow, AccessibilityTable},
    grid::GridCatalog,
    AccessError,
};
use kdam::{Bar, BarExt};
use rayon::prelude::*;
use std::sync::{Arc, Mutex};

/// reduces the travel times to many destination cells into the minimum travel time
/// per mode from every grid cell.
#[derive(Clone, Debug)]
pub struct TravelTimeAggregator {
    modes: ModeConfig,
}

impl TravelTimeAggregator {
    pub fn new(modes: ModeConfig) -> Result<TravelTimeAggregator, AccessError> {
        modes.validate()?;
        Ok(TravelTimeAggregator { modes })
    }

    pub fn modes(&self) -> &ModeConfig {
        &self.modes
    }

    /// loads the travel time file of every resolved destination and aggregates them
    /// onto the grid. files are read in parallel and joined in input order.
    ///
    /// # Arguments
    ///
    /// * `grid`             - the grid catalog providing the origin cells
    /// * `resolved_sources` - destination cells with existing travel time files
    ///
    /// # Returns
    ///
    /// * the accessibility table, which may be empty. fails with
    ///   [`AccessError::NoSourcesError`] when there are no sources and with
    ///   [`AccessError::SchemaError`] when a file lacks a configured column.
    pub fn aggregate(
        &self,
        grid: &GridCatalog,
        resolved_sources: &[ResolvedSource],
    ) -> Result<AccessibilityTable, AccessError> {
        if resolved_sources.is_empty() {
            return Err(AccessError::NoSourcesError);
        }
        let bar = Arc::new(Mutex::new(
            Bar::builder()
                .desc("read travel time files")
                .total(resolved_sources.len())
                .build()
                .map_err(|e| AccessError::DataSourceError(format!("progress bar error: {e}")))?,
        ));
        let record_sets = resolved_sources
            .par_iter()
            .map(|source| {
                let result = TravelTimeRecordSet::load(source, &self.modes);
                if let Ok(mut b) = bar.lock() {
                    let _ = b.update(1);
                }
                result
            })
            .collect::<Result<Vec<_>, AccessError>>()?;
        self.aggregate_records(grid, &record_sets)
    }

    /// aggregates record sets that are already loaded, see [`TravelTimeAggregator::aggregate`].
    /// with no record sets the result is an empty table. a record set whose rows do not
    /// hold one value per configured mode is an [`AccessError::InvalidInputError`].
    pub fn aggregate_records(
        &self,
        grid: &GridCatalog,
        record_sets: &[TravelTimeRecordSet],
    ) -> Result<AccessibilityTable, AccessError> {
        let mode_names = self.modes.mode_names().cloned().collect::<Vec<_>>();
        if record_sets.is_empty() {
            return Ok(AccessibilityTable::new(mode_names, vec![]));
        }
        if let Some(records) = record_sets
            .iter()
            .find(|r| !r.is_empty() && r.width() != Some(mode_names.len()))
        {
            return Err(AccessError::InvalidInputError(format!(
                "travel times to {} do not match the {} configured modes",
                records.destination,
                mode_names.len()
            )));
        }

        let mut joined = JoinedTable::from_grid(grid);
        for (destination_index, records) in record_sets.iter().enumerate() {
            let n_before = joined.rows.len();
            joined = joined.join(records, destination_index, &self.modes);
            log::debug!(
                "joined destination {} ({} of {}), {} of {} origin cells remain",
                records.destination,
                destination_index + 1,
                record_sets.len(),
                joined.rows.len(),
                n_before
            );
        }
        log::debug!("joined columns: {}", joined.column_names().join(","));

        let rows = joined
            .reduce_min(mode_names.len())
            .into_iter()
            .map(|(cell_id, min_travel_times)| AccessibilityRow {
                cell_id,
                min_travel_times,
            })
            .collect::<Vec<_>>();
        log::info!(
            "{} of {} grid cells have travel times to all {} destinations",
            rows.len(),
            grid.len(),
            record_sets.len()
        );
        Ok(AccessibilityTable::new(mode_names, rows))
    }
}
