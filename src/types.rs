//! Shared serde types: the image record and gallery statistics.
//!
//! These are the shapes persisted in the image index and returned to the
//! request-handling layer, so field changes here are format changes on disk.

use crate::category::Category;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One catalogued gallery image: metadata plus file location.
///
/// Records are immutable once created — there is no update operation. The
/// `id` is the sole lookup key; `stored_filename` is the random on-disk name,
/// decoupled from whatever the client called the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Unique opaque id, generated at creation.
    pub id: String,
    /// Display title. Defaults to the sanitized original filename.
    #[serde(default)]
    pub title: String,
    /// Free-text description. Empty string when not provided, never absent.
    #[serde(default)]
    pub description: String,
    pub category: Category,
    /// Random on-disk filename, `<token>.<ext>`.
    pub stored_filename: String,
    /// Sanitized client filename, display only.
    pub original_filename: String,
    /// Where the file was written: `<upload_root>/<category>/<stored_filename>`.
    pub file_path: PathBuf,
    /// Byte length of the written file, recorded at save time.
    pub file_size: u64,
    /// Creation timestamp; default list order is newest first.
    pub uploaded_at: DateTime<Local>,
    /// Externally servable path, `/uploads/<category>/<stored_filename>`.
    pub url: String,
}

/// Aggregate gallery statistics, derived from a fresh index load on every
/// call — nothing incremental is maintained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryStats {
    pub total_images: usize,
    /// Sum of `file_size` across all records, in bytes.
    pub total_size: u64,
    /// Per-category breakdown. Every registry category appears, zero or not.
    pub categories: BTreeMap<Category, CategoryStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub count: usize,
    pub display_name: String,
}
