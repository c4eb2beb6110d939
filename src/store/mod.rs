//! Flat-file stores
//!
//! All dashboard data lives in small files next to the config:
//!
//! - **destinations**: CSV `name,lat,lon`, append-only
//! - **questions**: one question per line, append-only
//! - **costs**: CSV `reisename,kosten`, read-only
//! - **error**: error types
//!
//! Reads always reload the whole file. Appends are serialized per store
//! within the process; nothing coordinates between processes.

pub mod costs;
pub mod destinations;
pub mod error;
pub mod questions;

pub use costs::{CostStore, TripCost};
pub use destinations::{Destination, DestinationStore};
pub use error::{StoreError, StoreResult};
pub use questions::{Question, QuestionStore};

use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Open `path` for appending, creating parent directories as needed.
///
/// Returns the file and whether it was empty. If the file does not end with
/// a newline one is written first, so the next record starts on its own line.
fn open_for_append(path: &Path) -> StoreResult<(fs::File, bool)> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)?;

    let len = file.metadata()?.len();
    if len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            file.write_all(b"\n")?;
        }
    }

    Ok((file, len == 0))
}
