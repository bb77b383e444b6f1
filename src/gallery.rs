//! The gallery store: validation, file placement, and metadata persistence.
//!
//! [`GalleryStore`] owns two pieces of shared state: the upload directory
//! tree (`<upload_root>/<category>/<stored_filename>`) and the image index
//! document. Every operation is a one-shot load → compute → save against the
//! index — no cache is kept between calls, so each call sees the on-disk
//! state at the time of its own load.
//!
//! ## Atomicity
//!
//! An internal mutex serializes the load-modify-save sequence, so two
//! concurrent operations on the same store cannot overwrite each other's
//! index changes. Reads take the same lock; at this scale the contention is
//! irrelevant and it keeps the invariant simple: one index round-trip at a
//! time per store.
//!
//! ## Index/filesystem drift
//!
//! The index and the directory tree are allowed to drift: deleting a file by
//! hand leaves a dangling record, and delete's file-removal step is
//! best-effort (a failure is logged and the record is removed anyway). No
//! reconciliation exists; listing a record whose file is gone is accepted.

use crate::category::Category;
use crate::index::ImageIndex;
use crate::naming;
use crate::types::{CategoryStats, GalleryStats, ImageRecord};
use crate::validate;
use chrono::Local;
use std::fs;
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("no file provided")]
    NoFileProvided,
    #[error("invalid file type: {filename} (allowed: png, jpg, jpeg, gif, webp)")]
    UnsupportedType { filename: String },
    #[error("file too large: {size} bytes (maximum: {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },
    #[error("invalid category: {0}")]
    InvalidCategory(String),
    #[error("image not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(#[from] io::Error),
}

/// Category filter for listing: the sentinel `all` or one registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    One(Category),
}

impl FromStr for CategoryFilter {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(CategoryFilter::All)
        } else {
            s.parse::<Category>()
                .map(CategoryFilter::One)
                .map_err(|e| GalleryError::InvalidCategory(e.0))
        }
    }
}

/// Gallery image store over a directory tree and a JSON index.
pub struct GalleryStore {
    upload_root: PathBuf,
    index_path: PathBuf,
    /// Serializes every load→mutate→save sequence on the index.
    lock: Mutex<()>,
}

impl GalleryStore {
    /// Open a store, creating the upload root and one subdirectory per
    /// registry category. Idempotent.
    pub fn new(
        upload_root: impl Into<PathBuf>,
        index_path: impl Into<PathBuf>,
    ) -> io::Result<Self> {
        let upload_root = upload_root.into();
        fs::create_dir_all(&upload_root)?;
        for category in Category::ALL {
            fs::create_dir_all(upload_root.join(category.key()))?;
        }
        Ok(Self {
            upload_root,
            index_path: index_path.into(),
            lock: Mutex::new(()),
        })
    }

    pub fn upload_root(&self) -> &Path {
        &self.upload_root
    }

    /// Validate and store an upload, returning the created record.
    ///
    /// The category key is checked before any I/O, then the validator runs,
    /// then the file is written under its category subdirectory with a fresh
    /// random stored filename. The index append happens only after a
    /// successful file write; an empty `title` defaults to the sanitized
    /// original filename.
    pub fn save_image(
        &self,
        filename: Option<&str>,
        file: &mut (impl Read + Seek),
        category_key: &str,
        title: &str,
        description: &str,
    ) -> Result<ImageRecord, GalleryError> {
        let category: Category = category_key
            .parse()
            .map_err(|_| GalleryError::InvalidCategory(category_key.to_string()))?;

        let ext = validate::validate(filename, file)?;

        // validate() guarantees a non-blank filename past this point
        let original_filename = naming::sanitize_filename(filename.unwrap_or_default().trim());
        let stored_filename = format!("{}.{ext}", naming::random_token());

        let category_dir = self.upload_root.join(category.key());
        fs::create_dir_all(&category_dir)?;
        let file_path = category_dir.join(&stored_filename);

        let mut out = fs::File::create(&file_path)?;
        let file_size = io::copy(file, &mut out)?;

        let title = if title.trim().is_empty() {
            original_filename.clone()
        } else {
            title.to_string()
        };

        let record = ImageRecord {
            id: naming::random_token(),
            title,
            description: description.to_string(),
            category,
            url: format!("/uploads/{}/{stored_filename}", category.key()),
            stored_filename,
            original_filename,
            file_path,
            file_size,
            uploaded_at: Local::now(),
        };

        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut index = ImageIndex::load(&self.index_path);
        index.push(record.clone());
        index.save(&self.index_path)?;

        Ok(record)
    }

    /// Delete the record with `id`.
    ///
    /// File removal is best-effort: a failure (e.g. the file was already
    /// removed by hand) is logged and the index entry is removed anyway.
    /// Returns [`GalleryError::NotFound`] only when no record carries `id`.
    pub fn delete_image(&self, id: &str) -> Result<(), GalleryError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut index = ImageIndex::load(&self.index_path);

        let record = index
            .remove(id)
            .ok_or_else(|| GalleryError::NotFound(id.to_string()))?;

        if let Err(err) = fs::remove_file(&record.file_path) {
            warn!(
                path = %record.file_path.display(),
                %err,
                "file removal failed; removing index entry anyway"
            );
        }

        index.save(&self.index_path)?;
        Ok(())
    }

    /// All records matching `filter`, newest first. Ties keep append order
    /// (the sort is stable). A fresh list on every call, not a live view.
    pub fn images(&self, filter: CategoryFilter) -> Vec<ImageRecord> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let index = ImageIndex::load(&self.index_path);

        let mut images: Vec<ImageRecord> = match filter {
            CategoryFilter::All => index.images,
            CategoryFilter::One(category) => index
                .images
                .into_iter()
                .filter(|r| r.category == category)
                .collect(),
        };
        images.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        images
    }

    /// Linear scan for a single record.
    pub fn image_by_id(&self, id: &str) -> Option<ImageRecord> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        ImageIndex::load(&self.index_path).find(id).cloned()
    }

    /// Aggregate statistics, derived from a fresh load. Every registry
    /// category appears in the breakdown, including empty ones.
    pub fn stats(&self) -> GalleryStats {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let index = ImageIndex::load(&self.index_path);

        let categories = Category::ALL
            .into_iter()
            .map(|category| {
                let count = index.images.iter().filter(|r| r.category == category).count();
                (
                    category,
                    CategoryStats {
                        count,
                        display_name: category.display_name().to_string(),
                    },
                )
            })
            .collect();

        GalleryStats {
            total_images: index.images.len(),
            total_size: index.images.iter().map(|r| r.file_size).sum(),
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn store(tmp: &TempDir) -> GalleryStore {
        GalleryStore::new(
            tmp.path().join("uploads"),
            tmp.path().join("image_metadata.json"),
        )
        .unwrap()
    }

    fn upload(store: &GalleryStore, name: &str, category: &str, bytes: usize) -> ImageRecord {
        let mut data = Cursor::new(vec![0xAB; bytes]);
        store
            .save_image(Some(name), &mut data, category, "", "")
            .unwrap()
    }

    #[test]
    fn new_creates_category_tree() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        for category in Category::ALL {
            assert!(s.upload_root().join(category.key()).is_dir());
        }
        // Idempotent
        assert!(store(&tmp).upload_root().join("kurti").is_dir());
    }

    #[test]
    fn save_image_writes_file_and_record() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        let mut data = Cursor::new(vec![1u8; 10_240]);

        let record = s
            .save_image(
                Some("bridal lehenga.JPG"),
                &mut data,
                "lehenga",
                "Bridal Set",
                "Hand embroidered",
            )
            .unwrap();

        assert_eq!(record.category, Category::Lehenga);
        assert_eq!(record.title, "Bridal Set");
        assert_eq!(record.description, "Hand embroidered");
        assert_eq!(record.original_filename, "bridal-lehenga.JPG");
        assert!(record.stored_filename.ends_with(".jpg"));
        assert_eq!(record.file_size, 10_240);
        assert_eq!(
            record.url,
            format!("/uploads/lehenga/{}", record.stored_filename)
        );
        assert!(record.file_path.is_file());
        assert_eq!(fs::metadata(&record.file_path).unwrap().len(), 10_240);

        let listed = s.images(CategoryFilter::All);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, record.id);
    }

    #[test]
    fn empty_title_defaults_to_sanitized_filename() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        let record = upload(&s, "silk kurti (2).jpg", "kurti", 16);
        assert_eq!(record.title, record.original_filename);
        assert_eq!(record.title, "silk-kurti-2-.jpg");
    }

    #[test]
    fn invalid_category_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        let mut data = Cursor::new(vec![0u8; 16]);

        let err = s
            .save_image(Some("a.jpg"), &mut data, "saree", "", "")
            .unwrap_err();
        assert!(matches!(err, GalleryError::InvalidCategory(k) if k == "saree"));

        assert!(s.images(CategoryFilter::All).is_empty());
        assert!(!tmp.path().join("image_metadata.json").exists());
    }

    #[test]
    fn rejected_upload_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);

        let mut data = Cursor::new(vec![0u8; 16]);
        let err = s
            .save_image(Some("doc.pdf"), &mut data, "gown", "", "")
            .unwrap_err();
        assert!(matches!(err, GalleryError::UnsupportedType { .. }));

        let mut big = Cursor::new(vec![0u8; (validate::MAX_FILE_SIZE + 1) as usize]);
        let err = s
            .save_image(Some("big.png"), &mut big, "gown", "", "")
            .unwrap_err();
        assert!(matches!(err, GalleryError::TooLarge { .. }));

        // Category folder stays empty in both cases
        let entries: Vec<_> = fs::read_dir(s.upload_root().join("gown"))
            .unwrap()
            .collect();
        assert!(entries.is_empty());
        assert!(s.images(CategoryFilter::All).is_empty());
    }

    #[test]
    fn delete_removes_record_and_file() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        let record = upload(&s, "gown.png", "gown", 32);

        s.delete_image(&record.id).unwrap();
        assert!(!record.file_path.exists());
        assert!(s.images(CategoryFilter::All).is_empty());

        // Second delete: the record no longer exists
        assert!(matches!(
            s.delete_image(&record.id),
            Err(GalleryError::NotFound(_))
        ));
    }

    #[test]
    fn delete_succeeds_when_file_already_missing() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        let record = upload(&s, "gown.png", "gown", 32);

        fs::remove_file(&record.file_path).unwrap();
        s.delete_image(&record.id).unwrap();
        assert!(s.image_by_id(&record.id).is_none());
    }

    #[test]
    fn delete_unknown_id_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        assert!(matches!(
            s.delete_image("nope"),
            Err(GalleryError::NotFound(id)) if id == "nope"
        ));
    }

    #[test]
    fn images_filters_by_category() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        upload(&s, "a.jpg", "kurti", 8);
        upload(&s, "b.jpg", "gown", 8);
        upload(&s, "c.jpg", "kurti", 8);

        let kurtis = s.images(CategoryFilter::One(Category::Kurti));
        assert_eq!(kurtis.len(), 2);
        assert!(kurtis.iter().all(|r| r.category == Category::Kurti));

        assert_eq!(s.images(CategoryFilter::All).len(), 3);
        assert!(s.images(CategoryFilter::One(Category::Blouse)).is_empty());
    }

    #[test]
    fn images_sorted_newest_first_stable() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        let first = upload(&s, "a.jpg", "kurti", 8);
        let second = upload(&s, "b.jpg", "kurti", 8);
        let third = upload(&s, "c.jpg", "kurti", 8);

        let listed = s.images(CategoryFilter::All);
        let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
        // Newest first; equal timestamps keep append order relative to each
        // other, so the oldest is never promoted past a newer record.
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], third.id);
        assert!(ids.contains(&first.id.as_str()) && ids.contains(&second.id.as_str()));
        assert!(listed.windows(2).all(|w| w[0].uploaded_at >= w[1].uploaded_at));
    }

    #[test]
    fn image_by_id_linear_scan() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        let record = upload(&s, "a.jpg", "blouse", 8);

        assert_eq!(s.image_by_id(&record.id).unwrap().id, record.id);
        assert!(s.image_by_id("missing").is_none());
    }

    #[test]
    fn stats_counts_and_sizes() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        upload(&s, "a.jpg", "kurti", 10_240);
        upload(&s, "b.jpg", "kurti", 100);
        upload(&s, "c.jpg", "gown", 50);

        let stats = s.stats();
        assert_eq!(stats.total_images, 3);
        assert_eq!(stats.total_size, 10_390);
        assert_eq!(stats.categories[&Category::Kurti].count, 2);
        assert_eq!(stats.categories[&Category::Gown].count, 1);
        assert_eq!(stats.categories[&Category::Blouse].count, 0);
        assert_eq!(
            stats.categories[&Category::Salwar].display_name,
            "Salwar Suit"
        );

        // Every registry category appears; per-category counts sum to total
        assert_eq!(stats.categories.len(), Category::ALL.len());
        let sum: usize = stats.categories.values().map(|c| c.count).sum();
        assert_eq!(sum, stats.total_images);
    }

    #[test]
    fn stats_increase_by_upload_size() {
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        let before = s.stats();

        upload(&s, "new kurti.jpg", "kurti", 10_240);

        let after = s.stats();
        assert_eq!(after.total_images, before.total_images + 1);
        assert_eq!(after.total_size, before.total_size + 10_240);
        assert_eq!(
            after.categories[&Category::Kurti].count,
            before.categories[&Category::Kurti].count + 1
        );
    }

    #[test]
    fn filter_parses_sentinel_and_keys() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "kurti".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::One(Category::Kurti)
        );
        assert!(matches!(
            "everything".parse::<CategoryFilter>(),
            Err(GalleryError::InvalidCategory(_))
        ));
    }

    #[test]
    fn dangling_record_still_listed() {
        // Index/filesystem drift is tolerated, not repaired
        let tmp = TempDir::new().unwrap();
        let s = store(&tmp);
        let record = upload(&s, "a.jpg", "other", 8);
        fs::remove_file(&record.file_path).unwrap();

        let listed = s.images(CategoryFilter::All);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, record.id);
    }
}
