use super::CellId;
use geo::{Centroid, MultiPolygon, Point};

/// a single polygon unit of the statistical grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    pub cell_id: CellId,
    pub geometry: MultiPolygon<f64>,
    pub centroid: Option<Point<f64>>,
}

impl GridCell {
    /// creates a grid cell, computing its centroid from the geometry.
    /// the centroid is None for an empty geometry.
    pub fn new(cell_id: CellId, geometry: MultiPolygon<f64>) -> GridCell {
        let centroid = geometry.centroid();
        GridCell {
            cell_id,
            geometry,
            centroid,
        }
    }
}
