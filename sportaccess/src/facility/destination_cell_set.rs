use crate::{grid::CellId, AccessError};
use std::collections::BTreeSet;

/// the deduplicated set of grid cells that contain at least one facility.
/// iteration order is ascending by [`CellId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DestinationCellSet(BTreeSet<CellId>);

impl DestinationCellSet {
    pub fn new() -> DestinationCellSet {
        DestinationCellSet(BTreeSet::new())
    }

    /// builds a set from an explicit list of ids, which must not repeat.
    pub fn try_from_ids<I>(ids: I) -> Result<DestinationCellSet, AccessError>
    where
        I: IntoIterator<Item = CellId>,
    {
        let mut set = BTreeSet::new();
        for id in ids {
            if !set.insert(id) {
                return Err(AccessError::InvalidInputError(format!(
                    "destination cell id {id} is listed more than once"
                )));
            }
        }
        Ok(DestinationCellSet(set))
    }

    /// adds a cell, returning false if it was already present
    pub fn insert(&mut self, cell_id: CellId) -> bool {
        self.0.insert(cell_id)
    }

    pub fn contains(&self, cell_id: &CellId) -> bool {
        self.0.contains(cell_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellId> {
        self.0.iter()
    }
}

impl FromIterator<CellId> for DestinationCellSet {
    fn from_iter<T: IntoIterator<Item = CellId>>(iter: T) -> Self {
        DestinationCellSet(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DestinationCellSet {
    type Item = &'a CellId;
    type IntoIter = std::collections::btree_set::Iter<'a, CellId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::DestinationCellSet;
    use crate::grid::CellId;

    #[test]
    fn test_try_from_ids_rejects_duplicates() {
        let result = DestinationCellSet::try_from_ids(vec![CellId(1), CellId(2), CellId(1)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_collect_deduplicates_and_orders() {
        let set: DestinationCellSet = vec![CellId(3), CellId(1), CellId(3)].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![CellId(1), CellId(3)]);
    }
}
