use crate::domain::{format_date, EnergyType};
use crate::error::{Error, Result};
use crate::prices::{EnergyRecord, RecordSummary};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub records: RecordSummary,
    pub data: Vec<EnergyRecord>,
}

/// One JSON file per energy type and date. Entries are never expired.
#[derive(Clone, Debug)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn filename(&self, energy_type: EnergyType, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("data_{}_{}.json", energy_type, format_date(date)))
    }

    /// `None` when nothing is cached yet. A file that does not parse is an
    /// error, not a miss.
    pub fn check(&self, path: &Path) -> Result<Option<CacheEntry>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        debug!(path = %path.display(), "Cache hit");
        serde_json::from_reader(file)
            .map(Some)
            .map_err(|source| Error::CacheCorruption {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Writes `entry` as pretty-printed JSON, replacing any previous file.
    pub fn save(&self, entry: &CacheEntry, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entry)
            .map_err(|error| Error::Io(error.into()))?;
        write!(File::create(path)?, "{}", json)?;
        debug!(path = %path.display(), records = entry.data.len(), "Saved to cache");
        Ok(())
    }
}
