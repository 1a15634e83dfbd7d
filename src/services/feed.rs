use serde::Serialize;

use crate::{
    catalog::Catalog,
    models::{MovieRecord, MovieSummary},
};

/// Curated home rows as (heading, catalog ids)
const HOME_ROWS: &[(&str, &[&str])] = &[
    ("Trending Now", &["1", "15", "2", "6", "7", "8", "9"]),
    ("New Releases", &["10", "11", "12", "13", "14"]),
    ("Action Movies", &["15", "16", "17", "18", "19", "20"]),
    ("Nepali Classics", &["21", "22", "23", "24", "25", "26"]),
    ("Family Friendly", &["3", "4", "5", "27", "28", "6"]),
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeroBanner {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub year: String,
    pub duration: Option<String>,
}

impl From<&MovieRecord> for HeroBanner {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            description: movie.description.clone(),
            image_url: movie.image_url.clone(),
            year: movie.year.clone(),
            duration: movie.duration.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeedRow {
    pub title: String,
    pub movies: Vec<MovieSummary>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HomeFeed {
    pub hero: Option<HeroBanner>,
    pub rows: Vec<FeedRow>,
}

/// Builds the home page from the curated rows
///
/// Ids the catalog does not know are skipped. Rows that end up empty are
/// still returned so the page can show its "No movies available" state.
pub fn home_feed(catalog: &Catalog) -> HomeFeed {
    home_feed_from(catalog, HOME_ROWS)
}

fn home_feed_from(catalog: &Catalog, rows: &[(&str, &[&str])]) -> HomeFeed {
    let rows: Vec<FeedRow> = rows
        .iter()
        .map(|(title, ids)| FeedRow {
            title: title.to_string(),
            movies: ids
                .iter()
                .filter_map(|id| catalog.by_id(id))
                .map(MovieSummary::from)
                .collect(),
        })
        .collect();

    let hero = rows
        .first()
        .and_then(|row| row.movies.first())
        .and_then(|summary| catalog.by_id(&summary.id))
        .map(HeroBanner::from);

    HomeFeed { hero, rows }
}
