use super::{Resolution, ResolvedSource};
use crate::{facility::DestinationCellSet, grid::CellId};
use std::path::{Path, PathBuf};

/// the folder prefix of a cell in the travel time matrix layout: the leading four
/// digits of the cell id, so that 5785640 is stored under 5785xxx.
pub fn partition_prefix(cell_id: &CellId) -> String {
    cell_id.to_string().chars().take(4).collect()
}

/// expected location of the travel time file for a destination cell:
/// `<directory>/<prefix>xxx/travel_times_to_<cell_id>.<extension>`
pub fn travel_time_path(directory: &Path, cell_id: &CellId, extension: &str) -> PathBuf {
    directory
        .join(format!("{}xxx", partition_prefix(cell_id)))
        .join(format!("travel_times_to_{cell_id}.{extension}"))
}

/// maps destination cells onto the files of an unpacked travel time matrix.
#[derive(Clone, Debug)]
pub struct TravelTimeFileResolver {
    directory: PathBuf,
    extension: String,
}

impl TravelTimeFileResolver {
    pub fn new<P: AsRef<Path>>(directory: P, extension: &str) -> TravelTimeFileResolver {
        TravelTimeFileResolver {
            directory: directory.as_ref().to_path_buf(),
            extension: String::from(extension.trim_start_matches('.')),
        }
    }

    pub fn path_for(&self, cell_id: &CellId) -> PathBuf {
        travel_time_path(&self.directory, cell_id, &self.extension)
    }

    /// finds the travel time file of each destination cell. a missing file is not
    /// an error, the cell is reported in [`Resolution::unresolved`] instead.
    pub fn resolve(&self, cell_ids: &DestinationCellSet) -> Resolution {
        let total = cell_ids.len();
        let mut resolution = Resolution::default();
        for (num, cell_id) in cell_ids.iter().enumerate() {
            let path = self.path_for(cell_id);
            log::debug!(
                "resolving {} ({}/{})",
                path.to_string_lossy(),
                num + 1,
                total
            );
            if path.is_file() {
                resolution.resolved.push(ResolvedSource {
                    cell_id: *cell_id,
                    path,
                });
            } else {
                log::warn!(
                    "travel time file for cell {} does not exist: {}",
                    cell_id,
                    path.to_string_lossy()
                );
                resolution.unresolved.push(*cell_id);
            }
        }
        log::info!(
            "resolved {} of {} travel time files",
            resolution.resolved.len(),
            total
        );
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::{partition_prefix, travel_time_path, TravelTimeFileResolver};
    use crate::{facility::DestinationCellSet, grid::CellId};
    use std::{collections::BTreeSet, path::Path};

    fn touch(resolver: &TravelTimeFileResolver, cell_id: CellId) {
        let path = resolver.path_for(&cell_id);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "from_id;to_id\n").unwrap();
    }

    #[test]
    fn test_partition_layout() {
        assert_eq!(partition_prefix(&CellId(5785640)), "5785");
        assert_eq!(partition_prefix(&CellId(123)), "123");
        let path = travel_time_path(Path::new("/data/ttm"), &CellId(5785640), "txt");
        assert_eq!(
            path,
            Path::new("/data/ttm/5785xxx/travel_times_to_5785640.txt")
        );
    }

    #[test]
    fn test_resolve_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = TravelTimeFileResolver::new(dir.path(), ".txt");
        touch(&resolver, CellId(5785640));
        let input = DestinationCellSet::try_from_ids(vec![CellId(5785640), CellId(5785641)]).unwrap();

        let result = resolver.resolve(&input);
        assert_eq!(result.resolved.len(), 1);
        assert_eq!(result.resolved[0].cell_id, CellId(5785640));
        assert!(result.resolved[0].path.ends_with("5785xxx/travel_times_to_5785640.txt"));
        assert_eq!(result.unresolved, vec![CellId(5785641)]);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_resolve_is_repeatable_and_partitions_input() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = TravelTimeFileResolver::new(dir.path(), "txt");
        for id in [5785640, 5800001, 5785642] {
            touch(&resolver, CellId(id));
        }
        let input: DestinationCellSet = [5785642, 5785640, 5991234, 5800001, 5785641]
            .into_iter()
            .map(CellId)
            .collect();

        let first = resolver.resolve(&input);
        let second = resolver.resolve(&input);
        assert_eq!(first, second);

        let mut union = first
            .resolved
            .iter()
            .map(|r| r.cell_id)
            .collect::<BTreeSet<_>>();
        for id in first.unresolved.iter() {
            assert!(union.insert(*id), "cell {id} reported twice");
        }
        assert_eq!(union, input.iter().copied().collect::<BTreeSet<_>>());
    }

    #[test]
    fn test_resolve_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = TravelTimeFileResolver::new(dir.path(), "txt");
        let result = resolver.resolve(&DestinationCellSet::new());
        assert!(result.resolved.is_empty());
        assert!(result.is_complete());
    }
}
