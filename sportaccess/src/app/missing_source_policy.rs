use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Enumerates alternative ways to handle destination cells
/// that have no travel time file
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingSourcePolicy {
    /// aggregate with the destinations that do have files
    #[default]
    Skip,
    /// abort the run, listing the cells without files
    Fail,
}
