use super::{pipeline, AccessibilityConfig};
use crate::{
    facility::DestinationCellSet,
    grid::CellId,
    travel_time::TravelTimeFileResolver,
    AccessError,
};
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::{path::Path, str::FromStr};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum AccessOperation {
    /// run the accessibility pipeline and write the result table as CSV
    Run {
        /// TOML file describing the grid, facilities, travel time matrix and modes
        config_file: String,
        /// file to write the result to, overrides `output_file` in the configuration
        #[arg(long)]
        output_file: Option<String>,
    },
    /// list the travel time files of destination cells and report the missing ones
    Resolve {
        /// root directory of an unpacked travel time matrix
        directory: String,
        /// destination cell ids
        cell_ids: Vec<String>,
        #[arg(long, default_value_t = String::from("txt"))]
        extension: String,
    },
}

impl AccessOperation {
    pub fn run(&self) -> Result<(), AccessError> {
        match self {
            AccessOperation::Run {
                config_file,
                output_file,
            } => {
                let config = AccessibilityConfig::from_file(config_file)?;
                let output_filename = output_file
                    .as_ref()
                    .or(config.output_file.as_ref())
                    .ok_or_else(|| {
                        AccessError::InvalidInputError(String::from(
                            "no output file given on the command line or in the configuration",
                        ))
                    })?;
                let output = pipeline::run(&config)?;
                output
                    .table
                    .write_csv(Path::new(output_filename), &output.grid)
            }
            AccessOperation::Resolve {
                directory,
                cell_ids,
                extension,
            } => {
                let ids = cell_ids
                    .iter()
                    .map(|s| CellId::from_str(s))
                    .collect::<Result<Vec<_>, _>>()?;
                let destinations = DestinationCellSet::try_from_ids(ids)?;
                let resolution = TravelTimeFileResolver::new(directory, extension)
                    .resolve(&destinations);
                for source in resolution.resolved.iter() {
                    println!("{},{}", source.cell_id, source.path.to_string_lossy());
                }
                for cell_id in resolution.unresolved.iter() {
                    println!("{cell_id},");
                }
                Ok(())
            }
        }
    }
}
