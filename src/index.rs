//! The image metadata index.
//!
//! A single JSON document, `{"images": [...]}`, owning every [`ImageRecord`]
//! in append order. There is no partial update path: callers load the whole
//! document, mutate it in memory, and save the whole document back.
//!
//! ## Load recovery
//!
//! A missing or unparseable index file is treated as "no data yet", never as
//! an error — [`ImageIndex::load`] returns an empty index and the next
//! successful save replaces whatever was there. Corruption therefore costs
//! the metadata (the files on disk survive) but never takes the store down.
//!
//! ## Atomic save
//!
//! [`ImageIndex::save`] writes to a `.tmp` sibling and renames it into
//! place, so a concurrent reader never observes a half-written document.

use crate::types::ImageRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// The on-disk image index document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageIndex {
    pub images: Vec<ImageRecord>,
}

impl ImageIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load from `path`. Missing file or parse failure → empty index.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        match serde_json::from_str(&content) {
            Ok(index) => index,
            Err(err) => {
                warn!(path = %path.display(), %err, "unparseable image index, treating as empty");
                Self::empty()
            }
        }
    }

    /// Serialize the full document and move it into place atomically.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = tmp_path(path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)
    }

    pub fn find(&self, id: &str) -> Option<&ImageRecord> {
        self.images.iter().find(|r| r.id == id)
    }

    /// Remove and return the record with `id`, if present.
    pub fn remove(&mut self, id: &str) -> Option<ImageRecord> {
        let pos = self.images.iter().position(|r| r.id == id)?;
        Some(self.images.remove(pos))
    }

    pub fn push(&mut self, record: ImageRecord) {
        self.images.push(record);
    }
}

/// Sibling temp file for the write-then-rename save.
fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}
