use geo::{BoundingRect, MultiPolygon, Point};
use rstar::{RTreeObject, AABB};

/// bounding box of a grid cell stored in the locator's spatial index, tagged
/// with the cell's position in the grid catalog.
pub struct CellEnvelope {
    pub index: usize,
    envelope: AABB<Point<f64>>,
}

impl CellEnvelope {
    /// None for an empty geometry, which can never contain a facility
    pub fn new(index: usize, geometry: &MultiPolygon<f64>) -> Option<CellEnvelope> {
        let rect = geometry.bounding_rect()?;
        let envelope = AABB::from_corners(Point::from(rect.min()), Point::from(rect.max()));
        Some(CellEnvelope { index, envelope })
    }
}

impl RTreeObject for CellEnvelope {
    type Envelope = AABB<Point<f64>>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}
