//! Cost Store
//!
//! Read-only CSV file with header `reisename,kosten`, one row per trip in
//! chronological order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::error::{StoreError, StoreResult};

/// Total cost of one trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripCost {
    #[serde(rename = "reisename")]
    pub trip_name: String,
    #[serde(rename = "kosten")]
    pub cost: f64,
}

impl TripCost {
    pub fn new(trip_name: impl Into<String>, cost: f64) -> Self {
        Self {
            trip_name: trip_name.into(),
            cost,
        }
    }
}

/// Read-only store of trip costs
#[derive(Debug, Clone)]
pub struct CostStore {
    path: PathBuf,
}

impl CostStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all trips in file order. Trip names must be unique.
    pub fn load(&self) -> StoreResult<Vec<TripCost>> {
        if !self.path.exists() {
            return Err(StoreError::Missing(self.path.clone()));
        }

        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        read_trips(reader)
    }
}

fn read_trips<R: std::io::Read>(mut reader: csv::Reader<R>) -> StoreResult<Vec<TripCost>> {
    let mut seen = HashSet::new();
    let mut trips = Vec::new();

    for result in reader.deserialize() {
        let trip: TripCost = result?;
        if !seen.insert(trip.trip_name.clone()) {
            return Err(StoreError::DuplicateTrip(trip.trip_name));
        }
        trips.push(trip);
    }

    Ok(trips)
}
