//! Last-known node positions, keyed by employee id.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ir::EmployeeId;
use crate::layout::Position;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access position store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("position store {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Owned position map shared by the layout engine and the rendering
/// surface.
///
/// `revision` increases on every write, so a host can tell whether a layout
/// result it computed earlier has been superseded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionStore {
    positions: BTreeMap<EmployeeId, Position>,
    #[serde(default)]
    revision: u64,
}

impl PositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: EmployeeId) -> Option<Position> {
        self.positions.get(&id).copied()
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmployeeId, Position)> + '_ {
        self.positions.iter().map(|(id, pos)| (*id, *pos))
    }

    pub fn positions(&self) -> &BTreeMap<EmployeeId, Position> {
        &self.positions
    }

    /// Writes one position, e.g. at drag end. Returns the previous value.
    pub fn set(&mut self, id: EmployeeId, position: Position) -> Option<Position> {
        self.revision += 1;
        self.positions.insert(id, position)
    }

    pub fn remove(&mut self, id: EmployeeId) -> Option<Position> {
        let removed = self.positions.remove(&id);
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }

    /// Drops every position whose id fails `keep`. Returns how many went.
    pub fn retain(&mut self, mut keep: impl FnMut(EmployeeId) -> bool) -> usize {
        let before = self.positions.len();
        self.positions.retain(|id, _| keep(*id));
        let dropped = before - self.positions.len();
        if dropped > 0 {
            self.revision += 1;
        }
        dropped
    }

    /// Publishes a complete position set in one step.
    pub fn replace_all(&mut self, positions: BTreeMap<EmployeeId, Position>) {
        self.positions = positions;
        self.revision += 1;
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let file = File::open(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`PositionStore::load`], but a missing file is an empty store.
    pub fn load_or_default(path: &Path) -> Result<Self, StoreError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let file = File::create(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl FromIterator<(EmployeeId, Position)> for PositionStore {
    fn from_iter<T: IntoIterator<Item = (EmployeeId, Position)>>(iter: T) -> Self {
        Self {
            positions: iter.into_iter().collect(),
            revision: 0,
        }
    }
}
