//! The garment category registry.
//!
//! Categories are a fixed, closed set: every gallery image belongs to exactly
//! one of them, and the set cannot grow at runtime. Each category carries a
//! display name and an icon for the storefront, and its lowercase key doubles
//! as the upload subdirectory name and the filter/query value.
//!
//! ## Keyword detection
//!
//! [`Category::detect`] guesses a category from keywords in a filename
//! (`bridal-lehenga-red.jpg` → `Lehenga`). It is a convenience for bulk
//! imports where the operator did not tag each file; anything unmatched
//! falls back to [`Category::Other`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A garment category. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Blouse,
    Kurti,
    Salwar,
    Lehenga,
    Gown,
    Other,
}

/// Keyword table for [`Category::detect`]. `Other` has no keywords — it is
/// the fallback, not a match target.
const KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Blouse, &["blouse", "blouses", "choli"]),
    (Category::Kurti, &["kurti", "kurtis", "kurta"]),
    (Category::Salwar, &["salwar", "suit", "punjabi", "patiala"]),
    (Category::Lehenga, &["lehenga", "lehengas", "bridal"]),
    (Category::Gown, &["gown", "gowns", "dress", "evening"]),
];

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 6] = [
        Category::Blouse,
        Category::Kurti,
        Category::Salwar,
        Category::Lehenga,
        Category::Gown,
        Category::Other,
    ];

    /// Lowercase key: upload subdirectory name, filter value, serde form.
    pub fn key(self) -> &'static str {
        match self {
            Category::Blouse => "blouse",
            Category::Kurti => "kurti",
            Category::Salwar => "salwar",
            Category::Lehenga => "lehenga",
            Category::Gown => "gown",
            Category::Other => "other",
        }
    }

    /// Human-readable name for the storefront.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Blouse => "Blouse",
            Category::Kurti => "Kurti",
            Category::Salwar => "Salwar Suit",
            Category::Lehenga => "Lehenga",
            Category::Gown => "Gown",
            Category::Other => "Other",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Blouse => "👔",
            Category::Kurti => "👗",
            Category::Salwar => "🥻",
            Category::Lehenga => "💃",
            Category::Gown => "👰",
            Category::Other => "👘",
        }
    }

    /// Guess a category from keywords in a filename. Case-insensitive
    /// substring match; first table entry wins; no match → `Other`.
    pub fn detect(filename: &str) -> Category {
        let lower = filename.to_lowercase();
        for (category, keywords) in KEYWORDS {
            if keywords.iter().any(|k| lower.contains(k)) {
                return *category;
            }
        }
        Category::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A category key that is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0} (expected one of blouse, kurti, salwar, lehenga, gown, other)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blouse" => Ok(Category::Blouse),
            "kurti" => Ok(Category::Kurti),
            "salwar" => Ok(Category::Salwar),
            "lehenga" => Ok(Category::Lehenga),
            "gown" => Ok(Category::Gown),
            "other" => Ok(Category::Other),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}
