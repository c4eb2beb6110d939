//! Destination Store
//!
//! CSV file with header `name,lat,lon`. Rows without coordinates are kept
//! as unplaced destinations.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::error::{StoreError, StoreResult};
use super::open_for_append;

const HEADER: [&str; 3] = ["name", "lat", "lon"];

pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Whether `value` is a finite coordinate within `±limit` degrees
pub fn coordinate_in_range(value: f64, limit: f64) -> bool {
    value.is_finite() && value.abs() <= limit
}

/// A named place, optionally with coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Destination {
    pub name: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Destination {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat: Some(lat),
            lon: Some(lon),
        }
    }

    /// Destination known only by name
    pub fn unplaced(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lat: None,
            lon: None,
        }
    }

    /// `(lat, lon)` if both coordinates are known
    pub fn position(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }
}

/// Append-only CSV store of destinations
#[derive(Debug)]
pub struct DestinationStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl DestinationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all destinations in file order. A missing file is an empty store.
    pub fn load(&self) -> StoreResult<Vec<Destination>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let mut destinations = Vec::new();

        for (line_num, result) in reader.records().enumerate() {
            let line = line_num + 2;
            let record = result?;

            let name = record.get(0).unwrap_or_default();
            if name.is_empty() {
                continue;
            }

            let lat = parse_coordinate(record.get(1), line, "latitude", MAX_LATITUDE)?;
            let lon = parse_coordinate(record.get(2), line, "longitude", MAX_LONGITUDE)?;

            destinations.push(Destination {
                name: name.to_string(),
                lat,
                lon,
            });
        }

        Ok(destinations)
    }

    /// Append one destination as a new row
    pub fn append(&self, destination: &Destination) -> StoreResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let (file, is_new) = open_for_append(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer.write_record(HEADER)?;
        }

        let lat = destination.lat.map(|v| v.to_string()).unwrap_or_default();
        let lon = destination.lon.map(|v| v.to_string()).unwrap_or_default();
        writer.write_record([destination.name.as_str(), lat.as_str(), lon.as_str()])?;
        writer.flush()?;

        tracing::info!(
            name = %destination.name,
            placed = destination.position().is_some(),
            "Appended destination"
        );
        Ok(())
    }
}

fn parse_coordinate(
    field: Option<&str>,
    line: usize,
    what: &str,
    limit: f64,
) -> StoreResult<Option<f64>> {
    match field {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .ok()
            .filter(|v| coordinate_in_range(*v, limit))
            .map(Some)
            .ok_or_else(|| StoreError::InvalidRecord {
                line,
                reason: format!("invalid {} '{}'", what, value),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = DestinationStore::new(dir.path().join("destinations.csv"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_reload_keeps_order() {
        let dir = tempdir().unwrap();
        let store = DestinationStore::new(dir.path().join("data").join("destinations.csv"));

        store.append(&Destination::new("Lissabon", 38.72, -9.14)).unwrap();
        store.append(&Destination::new("Oslo", 59.91, 10.75)).unwrap();
        store.append(&Destination::unplaced("Kyoto")).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(
            loaded,
            vec![
                Destination::new("Lissabon", 38.72, -9.14),
                Destination::new("Oslo", 59.91, 10.75),
                Destination::unplaced("Kyoto"),
            ]
        );

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("name,lat,lon\n"));
        assert!(content.ends_with("Kyoto,,\n"));
    }

    #[test]
    fn test_reads_name_only_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("destinations.csv");
        std::fs::write(&path, "name,lat,lon\nRom,41.9,12.5\nParis").unwrap();

        let store = DestinationStore::new(&path);
        store.append(&Destination::new("Wien", 48.2, 16.37)).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[1], Destination::unplaced("Paris"));
        assert_eq!(loaded[2].name, "Wien");
    }

    #[test]
    fn test_invalid_coordinate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("destinations.csv");
        std::fs::write(&path, "name,lat,lon\nRom,north,12.5\n").unwrap();

        let err = DestinationStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn test_non_finite_or_out_of_range_coordinates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("destinations.csv");

        for row in ["Rom,NaN,12.5", "Rom,41.9,inf", "Rom,91,12.5", "Rom,41.9,-180.5"] {
            std::fs::write(&path, format!("name,lat,lon\nOslo,59.91,10.75\n{}\n", row)).unwrap();
            let err = DestinationStore::new(&path).load().unwrap_err();
            assert!(
                matches!(err, StoreError::InvalidRecord { line: 3, .. }),
                "row '{}' loaded",
                row
            );
        }
    }

    #[test]
    fn test_coordinate_limits_are_inclusive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("destinations.csv");
        std::fs::write(&path, "name,lat,lon\nPol,-90,180\n").unwrap();

        let loaded = DestinationStore::new(&path).load().unwrap();
        assert_eq!(loaded, vec![Destination::new("Pol", -90.0, 180.0)]);
    }
}
