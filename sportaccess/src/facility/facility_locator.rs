use super::{cell_envelope::CellEnvelope, DestinationCellSet, FacilityCollection};
use crate::{
    grid::{CellId, GridCatalog},
    AccessError,
};
use geo::{Contains, Point};
use rstar::{RTree, AABB};

/// finds the grid cells that contain facility points. holds a spatial index over
/// the cell bounding boxes of a borrowed [`GridCatalog`].
pub struct FacilityLocator<'a> {
    grid: &'a GridCatalog,
    rtree: RTree<CellEnvelope>,
}

impl<'a> FacilityLocator<'a> {
    pub fn new(grid: &'a GridCatalog) -> FacilityLocator<'a> {
        let envelopes = grid
            .cells()
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| CellEnvelope::new(idx, &cell.geometry))
            .collect::<Vec<_>>();
        let rtree = RTree::bulk_load(envelopes);
        FacilityLocator { grid, rtree }
    }

    /// the cell whose polygon strictly contains this point. a point lying on a
    /// cell boundary is contained by no cell.
    pub fn containing_cell(&self, point: &Point<f64>) -> Option<CellId> {
        let cells = self.grid.cells();
        self.rtree
            .locate_in_envelope_intersecting(&AABB::from_point(*point))
            .map(|candidate| &cells[candidate.index])
            .find(|cell| cell.geometry.contains(point))
            .map(|cell| cell.cell_id)
    }

    /// spatial inner join of facilities to grid cells on the "within" predicate,
    /// keeping the deduplicated grid cell ids.
    ///
    /// # Arguments
    ///
    /// * `facilities` - facility points in the same CRS as the grid
    ///
    /// # Returns
    ///
    /// * the destination cells, possibly empty when no facility lies inside the grid.
    ///   fails with [`AccessError::EmptyInputError`] when there are no facilities and
    ///   [`AccessError::InvalidInputError`] when the reference systems differ.
    pub fn locate(&self, facilities: &FacilityCollection) -> Result<DestinationCellSet, AccessError> {
        if facilities.is_empty() {
            return Err(AccessError::EmptyInputError(String::from(
                "no facilities to locate",
            )));
        }
        if facilities.crs != self.grid.crs() {
            return Err(AccessError::InvalidInputError(format!(
                "facilities are in {} but the grid is in {}, reproject before locating",
                facilities.crs,
                self.grid.crs()
            )));
        }
        let mut destinations = DestinationCellSet::new();
        let mut outside = 0;
        for facility in facilities.iter() {
            match self.containing_cell(&facility.geometry) {
                Some(cell_id) => {
                    destinations.insert(cell_id);
                }
                None => outside += 1,
            }
        }
        if outside > 0 {
            log::debug!("{outside} facilities are not within any grid cell");
        }
        log::info!(
            "{} facilities fall within {} distinct grid cells",
            facilities.len() - outside,
            destinations.len()
        );
        Ok(destinations)
    }
}

/// builds a [`FacilityLocator`] for the grid and locates the facilities.
pub fn locate(
    grid: &GridCatalog,
    facilities: &FacilityCollection,
) -> Result<DestinationCellSet, AccessError> {
    FacilityLocator::new(grid).locate(facilities)
}
