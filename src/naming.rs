//! Upload filename handling.
//!
//! User-supplied filenames are never trusted for disk placement. Two names
//! exist for every stored image:
//!
//! - **Stored filename**: `<random hex token>.<ext>` — what actually lands on
//!   disk. Random tokens make collisions negligible and path traversal
//!   impossible, since the client name contributes nothing but the extension.
//! - **Original filename**: a sanitized version of the client name, kept for
//!   display only.
//!
//! Sanitization strips directory components (`../../etc/passwd` → `passwd`)
//! and maps anything outside `[A-Za-z0-9._-]` to a dash, collapsing runs.

use uuid::Uuid;

/// Sanitize a client-supplied filename for display.
///
/// - Keeps only the final path component (handles both `/` and `\`)
/// - Replaces characters outside `[A-Za-z0-9._-]` with dashes
/// - Collapses consecutive dashes, strips leading/trailing dashes and dots
/// - Falls back to `"upload"` when nothing survives
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let mapped: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();

    let mut collapsed = String::with_capacity(mapped.len());
    let mut prev_dash = false;
    for c in mapped.chars() {
        if c == '-' {
            if !prev_dash {
                collapsed.push('-');
            }
            prev_dash = true;
        } else {
            collapsed.push(c);
            prev_dash = false;
        }
    }

    let trimmed = collapsed.trim_matches(['-', '.']);
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Lowercased extension after the last `.`, if any.
///
/// `"Photo.JPG"` → `Some("jpg")`; `"noext"` → `None`; `"trailing."` → `None`.
pub fn extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

/// A fresh 32-char hex token. Used for record ids and stored filenames.
pub fn random_token() -> String {
    Uuid::new_v4().simple().to_string()
}
