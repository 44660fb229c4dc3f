//! Flat-file record store.
//!
//! Every named collection lives in its own CSV file under the configured
//! data directory, header row included. The store has no notion of partial
//! updates: callers read the whole collection, modify it, and write it back
//! (`last full rewrite wins`). Serialization of writers sits above this
//! layer, in [`Engine`](crate::Engine).

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ResultEngine;

/// Collection holding user accounts.
pub const ACCOUNTS: &str = "accounts";
/// Collection holding the append-only transfer history.
pub const TRANSACTIONS: &str = "transactions";

/// Persistence over named flat collections of homogeneous records.
#[derive(Clone, Debug)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.csv"))
    }

    /// Load every record of a collection.
    ///
    /// A missing file means the collection does not exist yet and yields an
    /// empty vector. A failed or partial read also yields an empty vector
    /// (fail open) and is logged, so one corrupt file cannot take the
    /// service down.
    pub fn load_all<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        let path = self.path_for(collection);
        if !path.exists() {
            return Vec::new();
        }

        match read_records(&path) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("failed to read collection {collection}: {err}");
                Vec::new()
            }
        }
    }

    /// Replace the stored contents of a collection with `records`.
    pub fn save_all<T: Serialize>(&self, collection: &str, records: &[T]) -> ResultEngine<()> {
        std::fs::create_dir_all(&self.data_dir)?;

        let mut writer = csv::Writer::from_path(self.path_for(collection))?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}
