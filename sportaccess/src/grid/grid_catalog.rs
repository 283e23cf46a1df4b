use super::{CellId, Crs, GridCell, GridSource};
use crate::AccessError;
use std::collections::HashMap;

/// the fixed spatial grid used to address every travel time lookup. loaded once per
/// run and read-only afterwards; other components refer to cells by [`CellId`].
#[derive(Debug)]
pub struct GridCatalog {
    crs: Crs,
    cells: Vec<GridCell>,
    index: HashMap<CellId, usize>,
}

impl GridCatalog {
    /// reads the grid from some source and asserts the given coordinate reference system.
    ///
    /// # Arguments
    ///
    /// * `source` - polygon grid dataset with a cell identifier attribute
    /// * `crs`    - coordinate reference system of the source geometries
    ///
    /// # Returns
    ///
    /// * the grid catalog, or a [`AccessError::DataSourceError`] if the source is
    ///   unreadable, lacks the identifier attribute, or repeats an identifier
    pub fn load(source: &GridSource, crs: Crs) -> Result<GridCatalog, AccessError> {
        let cells = source.read()?;
        log::info!("read {} grid cells from {}", cells.len(), source);
        GridCatalog::from_cells(cells, crs)
    }

    /// builds a catalog from cells already in memory.
    pub fn from_cells(cells: Vec<GridCell>, crs: Crs) -> Result<GridCatalog, AccessError> {
        if cells.is_empty() {
            return Err(AccessError::DataSourceError(String::from(
                "grid source contains no cells",
            )));
        }
        let mut index = HashMap::with_capacity(cells.len());
        for (idx, cell) in cells.iter().enumerate() {
            if index.insert(cell.cell_id, idx).is_some() {
                return Err(AccessError::DataSourceError(format!(
                    "grid cell id {} appears more than once",
                    cell.cell_id
                )));
            }
        }
        Ok(GridCatalog { crs, cells, index })
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// cells in source order
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn get(&self, cell_id: &CellId) -> Option<&GridCell> {
        self.index.get(cell_id).map(|idx| &self.cells[*idx])
    }

    pub fn contains(&self, cell_id: &CellId) -> bool {
        self.index.contains_key(cell_id)
    }
}

#[cfg(test)]
mod tests {
    use super::GridCatalog;
    use crate::grid::{CellId, Crs, GridCell};
    use geo::{polygon, MultiPolygon};

    fn square(cell_id: u64, x: f64, y: f64) -> GridCell {
        let p = polygon![(x: x, y: y), (x: x + 250.0, y: y), (x: x + 250.0, y: y + 250.0), (x: x, y: y + 250.0)];
        GridCell::new(CellId(cell_id), MultiPolygon(vec![p]))
    }

    #[test]
    fn test_lookup_and_centroid() {
        let grid = GridCatalog::from_cells(
            vec![square(1, 0.0, 0.0), square(2, 250.0, 0.0)],
            Crs::ETRS_TM35FIN,
        )
        .unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.crs(), Crs::from_epsg(3067));
        let cell = grid.get(&CellId(2)).unwrap();
        let centroid = cell.centroid.unwrap();
        assert_eq!((centroid.x(), centroid.y()), (375.0, 125.0));
        assert!(!grid.contains(&CellId(3)));
    }

    #[test]
    fn test_duplicate_cell_ids_rejected() {
        let result = GridCatalog::from_cells(
            vec![square(1, 0.0, 0.0), square(1, 250.0, 0.0)],
            Crs::ETRS_TM35FIN,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(GridCatalog::from_cells(vec![], Crs::ETRS_TM35FIN).is_err());
    }
}
