//! CLI output formatting.
//!
//! Output is information-centric: the primary display for every image is its
//! title and category, with filesystem details as indented context lines.
//! Each view has a `format_*` function returning lines (pure, unit-testable)
//! and a `print_*` wrapper that writes them to stdout.
//!
//! ```text
//! Gallery (2 images, 1.2 MB)
//! 001 Bridal Set [lehenga]
//!     Id: 4f1c9a…
//!     File: uploads/lehenga/8c2e….jpg (812.4 KB)
//!     Uploaded: 2026-08-30 14:02
//! 002 silk-kurti.jpg [kurti]
//!     …
//! ```

use crate::category::Category;
use crate::types::{GalleryStats, ImageRecord};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Human-readable byte size: B below 1 KB, then one-decimal KB/MB.
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}

// ============================================================================
// Image list
// ============================================================================

pub fn format_image_list(images: &[ImageRecord]) -> Vec<String> {
    let total: u64 = images.iter().map(|r| r.file_size).sum();
    let mut lines = vec![format!(
        "Gallery ({} image{}, {})",
        images.len(),
        if images.len() == 1 { "" } else { "s" },
        format_size(total)
    )];

    for (pos, record) in images.iter().enumerate() {
        lines.push(format!(
            "{} {} [{}]",
            format_index(pos + 1),
            record.title,
            record.category
        ));
        lines.push(format!("    Id: {}", record.id));
        lines.push(format!(
            "    File: {} ({})",
            record.file_path.display(),
            format_size(record.file_size)
        ));
        if !record.description.is_empty() {
            lines.push(format!("    Description: {}", record.description));
        }
        lines.push(format!(
            "    Uploaded: {}",
            record.uploaded_at.format("%Y-%m-%d %H:%M")
        ));
    }
    lines
}

pub fn print_image_list(images: &[ImageRecord]) {
    for line in format_image_list(images) {
        println!("{line}");
    }
}

// ============================================================================
// Categories
// ============================================================================

pub fn format_categories() -> Vec<String> {
    let mut lines = vec!["Categories".to_string()];
    for category in Category::ALL {
        lines.push(format!(
            "{} {} [{}]",
            category.icon(),
            category.display_name(),
            category.key()
        ));
    }
    lines
}

pub fn print_categories() {
    for line in format_categories() {
        println!("{line}");
    }
}

// ============================================================================
// Stats
// ============================================================================

pub fn format_stats(stats: &GalleryStats) -> Vec<String> {
    let mut lines = vec![format!(
        "Gallery stats: {} image{}, {}",
        stats.total_images,
        if stats.total_images == 1 { "" } else { "s" },
        format_size(stats.total_size)
    )];
    for (category, breakdown) in &stats.categories {
        lines.push(format!(
            "    {}: {} ({})",
            breakdown.display_name,
            breakdown.count,
            category.key()
        ));
    }
    lines
}

pub fn print_stats(stats: &GalleryStats) {
    for line in format_stats(stats) {
        println!("{line}");
    }
}
