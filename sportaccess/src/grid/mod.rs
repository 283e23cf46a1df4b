mod cell_id;
mod crs;
mod grid_catalog;
mod grid_cell;
mod grid_source;

pub use cell_id::CellId;
pub use crs::Crs;
pub use grid_catalog::GridCatalog;
pub use grid_cell::GridCell;
pub use grid_source::GridSource;
