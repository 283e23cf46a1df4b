use crate::grid::CellId;
use std::path::PathBuf;

/// a destination cell paired with the travel time file that exists for it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSource {
    pub cell_id: CellId,
    pub path: PathBuf,
}

/// outcome of resolving a set of destination cells. together the two lists
/// hold every input cell exactly once, both ascending by cell id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub resolved: Vec<ResolvedSource>,
    pub unresolved: Vec<CellId>,
}

impl Resolution {
    /// true when every destination cell has a travel time file
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}
