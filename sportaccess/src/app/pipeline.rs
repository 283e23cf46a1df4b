//! runs the full accessibility pipeline: grid and facility loading, spatial join,
//! travel time file resolution and aggregation.
use super::{AccessibilityConfig, MissingSourcePolicy};
use crate::{
    accessibility::AccessibilityTable,
    facility::{self, DestinationCellSet},
    grid::{GridCatalog, GridSource},
    travel_time::{Resolution, TravelTimeAggregator, TravelTimeFileResolver},
    AccessError,
};

/// everything produced by a pipeline run. the grid is kept so the table can be
/// exported with geometries.
pub struct PipelineOutput {
    pub grid: GridCatalog,
    pub destinations: DestinationCellSet,
    pub resolution: Resolution,
    pub table: AccessibilityTable,
}

/// runs the pipeline described by a configuration.
pub fn run(config: &AccessibilityConfig) -> Result<PipelineOutput, AccessError> {
    let crs = config.crs();
    let grid = GridCatalog::load(&config.grid, crs)?;
    if let GridSource::Shapefile { .. } = config.grid {
        eprintln!();
    }
    let facilities = config.facilities.read(crs)?;
    let destinations = facility::locate(&grid, &facilities)?;
    let aggregator = TravelTimeAggregator::new(config.modes.clone())?;
    let (resolution, table) = aggregate_destinations(
        &grid,
        &destinations,
        &config.travel_times.resolver(),
        &aggregator,
        config.missing_source_policy,
    )?;
    eprintln!();
    Ok(PipelineOutput {
        grid,
        destinations,
        resolution,
        table,
    })
}

/// resolves the travel time files of the destination cells, applies the missing
/// file policy and aggregates what remains.
///
/// # Arguments
///
/// * `grid`         - grid catalog of origin cells
/// * `destinations` - cells containing at least one facility
/// * `resolver`     - travel time file layout
/// * `aggregator`   - configured minimum travel time aggregation
/// * `policy`       - how to treat destinations without a travel time file
///
/// # Returns
///
/// * the resolution and the accessibility table. zero destinations, or zero
///   destinations with files, is a [`AccessError::NoSourcesError`].
pub fn aggregate_destinations(
    grid: &GridCatalog,
    destinations: &DestinationCellSet,
    resolver: &TravelTimeFileResolver,
    aggregator: &TravelTimeAggregator,
    policy: MissingSourcePolicy,
) -> Result<(Resolution, AccessibilityTable), AccessError> {
    if destinations.is_empty() {
        log::warn!("no facilities fall within the grid");
    }
    let resolution = resolver.resolve(destinations);
    if !resolution.is_complete() {
        match policy {
            MissingSourcePolicy::Fail => {
                return Err(AccessError::MissingSourcesError(resolution.unresolved));
            }
            MissingSourcePolicy::Skip => log::warn!(
                "skipping {} destination cells without travel time files",
                resolution.unresolved.len()
            ),
        }
    }
    let table = aggregator.aggregate(grid, &resolution.resolved)?;
    if table.is_empty() {
        log::warn!("no grid cell has travel times to every destination, the result is empty");
    }
    Ok((resolution, table))
}
