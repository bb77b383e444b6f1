//! # Darzi
//!
//! Backend core for a tailoring studio website: a garment image gallery with
//! category folders, and a booking form that hands off to WhatsApp. The
//! filesystem is the database — one JSON index document plus a directory
//! tree of uploaded files. No server process, no SQL, nothing to migrate.
//!
//! # Architecture
//!
//! Everything orbits the [`gallery::GalleryStore`]:
//!
//! ```text
//! upload ──▶ category check ──▶ validate ──▶ write file ──▶ append index
//! delete ──▶ find record ──▶ remove file (best-effort) ──▶ rewrite index
//! list / get / stats ──▶ fresh index load, compute, done
//! ```
//!
//! Every operation round-trips the whole index (load → mutate → save); there
//! is no in-memory cache, so each call sees the latest on-disk state. An
//! internal mutex makes each round-trip atomic with respect to the others on
//! the same store.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`gallery`] | The store — save, delete, list, get, stats |
//! | [`index`] | The JSON index document: recover-empty load, atomic save |
//! | [`category`] | Closed garment-category registry with keyword detection |
//! | [`validate`] | Upload validation: filename, extension, 5 MiB ceiling |
//! | [`naming`] | Filename sanitization and random stored-name generation |
//! | [`types`] | `ImageRecord` and stats shapes shared with the index |
//! | [`booking`] | Booking form validation and WhatsApp message/URL |
//! | [`config`] | `darzi.toml` loading with stock defaults |
//! | [`output`] | CLI display formatting |
//!
//! # Design Decisions
//!
//! ## A JSON File Is the Database
//!
//! The whole catalogue is one `{"images": [...]}` document, rewritten in
//! full on every mutation. At a few hundred images this is microseconds of
//! work, trivially inspectable, and backed up with `cp`. Saves go through a
//! temp file + rename so readers never see a torn document, and a corrupt
//! or missing index loads as empty rather than failing — the uploaded files
//! themselves are never at risk from index trouble.
//!
//! ## Random Stored Filenames
//!
//! Client filenames never touch the disk layout. Files land as
//! `<uuid-hex>.<ext>` under their category folder, which kills path
//! traversal and name collisions in one move; the sanitized client name is
//! kept in the record purely for display.
//!
//! ## Best-Effort Delete
//!
//! Deleting an image removes the index record unconditionally and the file
//! opportunistically. A file that is already gone (or unremovable) is logged
//! and skipped — the record is the source of truth for the gallery, and a
//! stray orphan file is cheaper than a delete that refuses to work.

pub mod booking;
pub mod category;
pub mod config;
pub mod gallery;
pub mod index;
pub mod naming;
pub mod output;
pub mod types;
pub mod validate;
