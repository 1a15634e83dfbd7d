use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

/// A single title in the catalog
///
/// Only `id`, `title`, `image_url`, `year` and `rating` are guaranteed. Every
/// other attribute is optional and `None` means "unknown".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub year: String,
    /// Numeric string on a 0-5 scale, e.g. "4.5"
    pub rating: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl MovieRecord {
    /// Genre labels, empty when unknown
    pub fn genres(&self) -> &[String] {
        self.genres.as_deref().unwrap_or(&[])
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres().iter().any(|g| g == genre)
    }

    /// True when the two records share at least one genre label
    pub fn shares_genre_with(&self, genres: &[String]) -> bool {
        self.genres().iter().any(|g| genres.contains(g))
    }
}

/// Card-sized projection of a record, used by rows, grids and search results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub year: String,
    pub rating: String,
}

impl From<&MovieRecord> for MovieSummary {
    fn from(record: &MovieRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            image_url: record.image_url.clone(),
            year: record.year.clone(),
            rating: record.rating.clone(),
        }
    }
}

/// Browsable categories
///
/// `NepaliDrama` is not a genre tag on any record. It is derived from the
/// `Drama` genre together with the `Nepali` language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryLabel {
    #[default]
    All,
    Action,
    Comedy,
    Drama,
    Romance,
    Thriller,
    Adventure,
    Family,
    #[serde(rename = "Nepali Drama")]
    NepaliDrama,
}

impl CategoryLabel {
    pub const ALL: [CategoryLabel; 9] = [
        CategoryLabel::All,
        CategoryLabel::Action,
        CategoryLabel::Comedy,
        CategoryLabel::Drama,
        CategoryLabel::Romance,
        CategoryLabel::Thriller,
        CategoryLabel::Adventure,
        CategoryLabel::Family,
        CategoryLabel::NepaliDrama,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryLabel::All => "All",
            CategoryLabel::Action => "Action",
            CategoryLabel::Comedy => "Comedy",
            CategoryLabel::Drama => "Drama",
            CategoryLabel::Romance => "Romance",
            CategoryLabel::Thriller => "Thriller",
            CategoryLabel::Adventure => "Adventure",
            CategoryLabel::Family => "Family",
            CategoryLabel::NepaliDrama => "Nepali Drama",
        }
    }
}

impl Display for CategoryLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryLabel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown category: {}", s)))
    }
}
