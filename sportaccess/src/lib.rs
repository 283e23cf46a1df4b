//! Travel-time accessibility from YKR grid cells to LIPAS sport facilities.
//!
//! The pipeline joins facility points to grid cells, resolves the Helsinki Travel
//! Time Matrix file for each destination cell, joins those files onto the grid and
//! reduces them to a minimum travel time per transport mode.
pub mod access_error;
pub mod accessibility;
pub mod app;
pub mod facility;
pub mod grid;
pub mod travel_time;

pub use access_error::AccessError;
