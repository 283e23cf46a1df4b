use super::{ModeConfig, TravelTimeRecordSet};
use crate::grid::{CellId, GridCatalog};

/// a travel time column joined onto the grid, qualified by its destination
#[derive(Clone, Debug)]
pub struct JoinedColumn {
    pub name: String,
    pub mode_index: usize,
}

/// intermediate wide table of the aggregation: one row per origin cell that has
/// survived every join so far, one column per (mode, destination) pair. every
/// value present in the table is a valid travel time.
#[derive(Clone, Debug)]
pub struct JoinedTable {
    pub columns: Vec<JoinedColumn>,
    pub rows: Vec<(CellId, Vec<f64>)>,
}

impl JoinedTable {
    /// the starting table, every grid cell with no travel time columns
    pub fn from_grid(grid: &GridCatalog) -> JoinedTable {
        JoinedTable {
            columns: vec![],
            rows: grid
                .cells()
                .iter()
                .map(|cell| (cell.cell_id, vec![]))
                .collect(),
        }
    }

    /// inner join of one destination's travel times on the origin cell id. returns
    /// a new table that drops origins missing from the record set and origins with
    /// a missing travel time in any mode.
    pub fn join(
        self,
        records: &TravelTimeRecordSet,
        destination_index: usize,
        modes: &ModeConfig,
    ) -> JoinedTable {
        let JoinedTable { mut columns, rows } = self;
        columns.extend(modes.mode_names().enumerate().map(|(mode_index, mode)| {
            JoinedColumn {
                name: ModeConfig::destination_column(mode, destination_index),
                mode_index,
            }
        }));
        let rows = rows
            .into_iter()
            .filter_map(|(origin, mut values)| {
                let times = records
                    .get(&origin)?
                    .iter()
                    .copied()
                    .collect::<Option<Vec<f64>>>()?;
                values.extend(times);
                Some((origin, values))
            })
            .collect();
        JoinedTable { columns, rows }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// minimum value per mode across all destination columns of each row
    pub fn reduce_min(&self, n_modes: usize) -> Vec<(CellId, Vec<f64>)> {
        self.rows
            .iter()
            .map(|(origin, values)| {
                let mut minimums = vec![f64::INFINITY; n_modes];
                for (column, value) in self.columns.iter().zip(values.iter()) {
                    let current = &mut minimums[column.mode_index];
                    *current = current.min(*value);
                }
                (*origin, minimums)
            })
            .collect()
    }
}
