use super::{CellId, GridCell};
use crate::AccessError;
use geo::{Geometry, MultiPolygon};
use kdam::tqdm;
use serde::{Deserialize, Serialize};
use shapefile::dbase::FieldValue;
use std::{collections::HashMap, fmt::Display, path::Path, str::FromStr};
use wkt::TryFromWkt;

/// source of the polygon grid dataset
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum GridSource {
    /// reads grid cells from a polygon shapefile, such as MetropAccess_YKR_grid_EurefFIN.shp
    Shapefile {
        file: String,
        #[serde(default = "default_id_field")]
        id_field: String,
    },
    /// reads grid cells from a CSV file that contains WKT geometry and id columns
    Csv {
        file: String,
        #[serde(default = "default_geometry_column")]
        geometry_column: String,
        #[serde(default = "default_id_field")]
        id_column: String,
    },
}

fn default_id_field() -> String {
    String::from("YKR_ID")
}

fn default_geometry_column() -> String {
    String::from("geometry")
}

impl GridSource {
    pub fn read(&self) -> Result<Vec<GridCell>, AccessError> {
        match self {
            GridSource::Shapefile { file, id_field } => read_grid_shapefile(file, id_field),
            GridSource::Csv {
                file,
                geometry_column,
                id_column,
            } => read_grid_csv(file, geometry_column, id_column),
        }
    }
}

impl Display for GridSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridSource::Shapefile { file, .. } => write!(f, "shapefile '{file}'"),
            GridSource::Csv { file, .. } => write!(f, "csv '{file}'"),
        }
    }
}

/// reads cell geometries and ids from a shapefile source
fn read_grid_shapefile(grid_filepath: &str, id_field: &str) -> Result<Vec<GridCell>, AccessError> {
    let rows = shapefile::read(grid_filepath).map_err(|e| {
        AccessError::DataSourceError(format!("failed reading '{grid_filepath}': {e}"))
    })?;

    let mut processed = Vec::with_capacity(rows.len());
    for (idx, (shape, record)) in tqdm!(rows.into_iter().enumerate(), desc = "read grid cells") {
        let geometry: MultiPolygon<f64> = match shape {
            shapefile::Shape::Polygon(generic_polygon) => generic_polygon.try_into().map_err(
                |e| {
                    AccessError::DataSourceError(format!(
                        "failed to convert shapefile polygon at row {idx}: {e}"
                    ))
                },
            )?,
            shapefile::Shape::PolygonM(generic_polygon) => generic_polygon.try_into().map_err(
                |e| {
                    AccessError::DataSourceError(format!(
                        "failed to convert shapefile polygon at row {idx}: {e}"
                    ))
                },
            )?,
            _ => {
                return Err(AccessError::DataSourceError(format!(
                    "unexpected shape type {} found at row {}, must be polygonal",
                    shape.shapetype(),
                    idx
                )))
            }
        };
        let field = record.get(id_field).ok_or_else(|| {
            AccessError::DataSourceError(format!(
                "field '{id_field}' missing from shapefile record at row {idx}"
            ))
        })?;
        let cell_id = match field {
            FieldValue::Numeric(Some(n)) => CellId::try_from_f64(*n),
            FieldValue::Double(n) => CellId::try_from_f64(*n),
            FieldValue::Float(Some(n)) => CellId::try_from_f64(*n as f64),
            FieldValue::Integer(n) => u64::try_from(*n).map(CellId).map_err(|_| {
                AccessError::InvalidInputError(format!("'{n}' is not a valid cell identifier"))
            }),
            FieldValue::Character(Some(s)) => CellId::from_str(s),
            _ => Err(AccessError::DataSourceError(format!(
                "field '{}' has unexpected field type '{}'",
                id_field,
                field.field_type()
            ))),
        }
        .map_err(|e| AccessError::DataSourceError(format!("row {idx}: {e}")))?;
        processed.push(GridCell::new(cell_id, geometry));
    }
    Ok(processed)
}

/// reads cell geometries and ids from a CSV source
fn read_grid_csv(
    grid_filepath: &str,
    geometry_column: &str,
    id_column: &str,
) -> Result<Vec<GridCell>, AccessError> {
    let grid_path = Path::new(grid_filepath);
    let mut grid_reader = csv::Reader::from_path(grid_path).map_err(|e| {
        AccessError::DataSourceError(format!("failed reading '{grid_filepath}': {e}"))
    })?;
    let grid_header_record = grid_reader
        .headers()
        .map_err(|e| AccessError::DataSourceError(e.to_string()))?
        .clone();
    let grid_headers = grid_header_record
        .iter()
        .enumerate()
        .map(|(i, s)| (s, i))
        .collect::<HashMap<_, _>>();
    let grid_geom_idx = grid_headers.get(geometry_column).ok_or_else(|| {
        AccessError::DataSourceError(format!("grid file missing {geometry_column} column"))
    })?;
    let grid_id_idx = grid_headers.get(id_column).ok_or_else(|| {
        AccessError::DataSourceError(format!("grid file missing {id_column} column"))
    })?;

    grid_reader
        .records()
        .enumerate()
        .map(|(idx, r)| {
            let row = r.map_err(|e| AccessError::DataSourceError(e.to_string()))?;
            let geometry_str = row.get(*grid_geom_idx).ok_or_else(|| {
                AccessError::DataSourceError(format!("row {idx} missing geometry index"))
            })?;
            let geometry: Geometry = Geometry::try_from_wkt_str(geometry_str)
                .map_err(|e| AccessError::DataSourceError(format!("row {idx}: {e}")))?;
            let id_str = row.get(*grid_id_idx).ok_or_else(|| {
                AccessError::DataSourceError(format!("row {idx} missing id index"))
            })?;
            let cell_id = CellId::from_str(id_str)
                .map_err(|e| AccessError::DataSourceError(format!("row {idx}: {e}")))?;
            let polygons = match geometry {
                Geometry::Polygon(p) => MultiPolygon(vec![p]),
                Geometry::MultiPolygon(mp) => mp,
                _ => {
                    return Err(AccessError::DataSourceError(format!(
                        "unexpected non-polygonal geometry for row {idx} with id {cell_id}"
                    )))
                }
            };
            Ok(GridCell::new(cell_id, polygons))
        })
        .collect::<Result<Vec<_>, AccessError>>()
}

#[cfg(test)]
mod tests {
    use super::GridSource;
    use crate::grid::CellId;
    use shapefile::{
        dbase::{FieldName, FieldValue, Record, TableWriterBuilder},
        PolygonRing,
    };
    use std::{io::Write, path::Path};

    fn square(x: f64) -> shapefile::Polygon {
        shapefile::Polygon::new(PolygonRing::Outer(vec![
            shapefile::Point::new(x, 0.0),
            shapefile::Point::new(x, 250.0),
            shapefile::Point::new(x + 250.0, 250.0),
            shapefile::Point::new(x + 250.0, 0.0),
            shapefile::Point::new(x, 0.0),
        ]))
    }

    /// writes one 250 m square per id, ids stored in a numeric dBase field
    fn write_grid_shapefile(path: &Path, field: &str, ids: &[f64]) {
        let table = TableWriterBuilder::new()
            .add_numeric_field(FieldName::try_from(field).unwrap(), 10, 0);
        let mut writer = shapefile::Writer::from_path(path, table).unwrap();
        for (i, id) in ids.iter().enumerate() {
            let mut record = Record::default();
            record.insert(field.to_string(), FieldValue::Numeric(Some(*id)));
            writer
                .write_shape_and_record(&square(i as f64 * 250.0), &record)
                .unwrap();
        }
    }

    fn shapefile_source(path: &Path) -> GridSource {
        GridSource::Shapefile {
            file: path.to_string_lossy().to_string(),
            id_field: String::from("YKR_ID"),
        }
    }

    #[test]
    fn test_read_shapefile_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.shp");
        write_grid_shapefile(&path, "YKR_ID", &[5785640.0, 5785641.0]);
        let cells = shapefile_source(&path).read().unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].cell_id, CellId(5785640));
        assert_eq!(cells[1].cell_id, CellId(5785641));
        assert_eq!(cells[0].geometry.0.len(), 1);
        assert_eq!(cells[0].geometry.0[0].exterior().0.len(), 5);
    }

    #[test]
    fn test_read_shapefile_grid_missing_id_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.shp");
        write_grid_shapefile(&path, "ID", &[5785640.0]);
        let result = shapefile_source(&path).read();
        match result {
            Err(crate::AccessError::DataSourceError(msg)) => assert!(msg.contains("YKR_ID")),
            other => panic!("expected data source error, found {other:?}"),
        }
    }

    #[test]
    fn test_read_shapefile_grid_rejects_points() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.shp");
        {
            let table = TableWriterBuilder::new()
                .add_numeric_field(FieldName::try_from("YKR_ID").unwrap(), 10, 0);
            let mut writer = shapefile::Writer::from_path(&path, table).unwrap();
            let mut record = Record::default();
            record.insert(String::from("YKR_ID"), FieldValue::Numeric(Some(1.0)));
            writer
                .write_shape_and_record(&shapefile::Point::new(10.0, 10.0), &record)
                .unwrap();
        }
        let result = shapefile_source(&path).read();
        match result {
            Err(crate::AccessError::DataSourceError(msg)) => assert!(msg.contains("polygonal")),
            other => panic!("expected data source error, found {other:?}"),
        }
    }

    #[test]
    fn test_read_csv_grid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "YKR_ID,geometry").unwrap();
        writeln!(file, "5785640,\"POLYGON((0 0,250 0,250 250,0 250,0 0))\"").unwrap();
        writeln!(
            file,
            "5785641,\"MULTIPOLYGON(((250 0,500 0,500 250,250 250,250 0)))\""
        )
        .unwrap();
        let source = GridSource::Csv {
            file: file.path().to_string_lossy().to_string(),
            geometry_column: String::from("geometry"),
            id_column: String::from("YKR_ID"),
        };
        let cells = source.read().unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].cell_id, CellId(5785640));
        assert_eq!(cells[1].geometry.0.len(), 1);
    }

    #[test]
    fn test_read_csv_grid_missing_id_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,geometry").unwrap();
        writeln!(file, "1,\"POLYGON((0 0,250 0,250 250,0 250,0 0))\"").unwrap();
        let source = GridSource::Csv {
            file: file.path().to_string_lossy().to_string(),
            geometry_column: String::from("geometry"),
            id_column: String::from("YKR_ID"),
        };
        assert!(source.read().is_err());
    }

    #[test]
    fn test_read_csv_grid_rejects_points() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "YKR_ID,geometry").unwrap();
        writeln!(file, "1,\"POINT(10 10)\"").unwrap();
        let source = GridSource::Csv {
            file: file.path().to_string_lossy().to_string(),
            geometry_column: String::from("geometry"),
            id_column: String::from("YKR_ID"),
        };
        assert!(source.read().is_err());
    }
}
