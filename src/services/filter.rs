//! Pure selection functions over the catalog
//!
//! Every function here keeps catalog order and never fails: an empty result
//! is a valid answer that the caller renders as "no movies found".

use crate::models::{CategoryLabel, MovieRecord, MovieSummary};

pub const SEARCH_LIMIT: usize = 5;
pub const SIMILAR_LIMIT: usize = 3;
pub const RECOMMENDATION_LIMIT: usize = 5;

const NEPALI_DRAMA_GENRE: &str = "Drama";
const NEPALI_DRAMA_LANGUAGE: &str = "Nepali";

/// Keeps the records belonging to `label`
///
/// `Nepali Drama` matches on genre `Drama` plus an exact, case-sensitive
/// `Nepali` language. Records without genres only match `All`.
pub fn category_filter(movies: &[MovieRecord], label: CategoryLabel) -> Vec<&MovieRecord> {
    movies.iter().filter(|m| matches_category(m, label)).collect()
}

fn matches_category(movie: &MovieRecord, label: CategoryLabel) -> bool {
    match label {
        CategoryLabel::All => true,
        CategoryLabel::NepaliDrama => {
            movie.has_genre(NEPALI_DRAMA_GENRE)
                && movie.language.as_deref() == Some(NEPALI_DRAMA_LANGUAGE)
        }
        other => movie.has_genre(other.as_str()),
    }
}

/// Case-insensitive substring match on the title, first five hits
pub fn title_search<'a>(movies: &'a [MovieRecord], query: &str) -> Vec<&'a MovieRecord> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    movies
        .iter()
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .take(SEARCH_LIMIT)
        .collect()
}

/// Up to three other titles sharing at least one genre with `reference`
pub fn similar_movies<'a>(movies: &'a [MovieRecord], reference: &MovieRecord) -> Vec<&'a MovieRecord> {
    select_by_genre_overlap(
        movies,
        reference.genres(),
        |id| id == reference.id,
        SIMILAR_LIMIT,
    )
}

/// Up to five unseen titles sharing a genre with anything in the viewing history
///
/// Every overlap counts the same; there is no weighting by how many genres
/// match or how recently something was watched.
pub fn recommendations<'a>(movies: &'a [MovieRecord], seen_ids: &[String]) -> Vec<&'a MovieRecord> {
    let mut seen_genres: Vec<String> = Vec::new();
    for movie in movies.iter().filter(|m| seen_ids.contains(&m.id)) {
        for genre in movie.genres() {
            if !seen_genres.contains(genre) {
                seen_genres.push(genre.clone());
            }
        }
    }

    select_by_genre_overlap(
        movies,
        &seen_genres,
        |id| seen_ids.iter().any(|seen| seen == id),
        RECOMMENDATION_LIMIT,
    )
}

fn select_by_genre_overlap<'a, F>(
    movies: &'a [MovieRecord],
    genres: &[String],
    excluded: F,
    limit: usize,
) -> Vec<&'a MovieRecord>
where
    F: Fn(&str) -> bool,
{
    if genres.is_empty() {
        return Vec::new();
    }

    movies
        .iter()
        .filter(|m| !excluded(&m.id) && m.shares_genre_with(genres))
        .take(limit)
        .collect()
}

/// Joins the externally stored list ids against the catalog
///
/// Output follows catalog order, not the order of `ids`. Ids unknown to the
/// catalog are dropped.
pub fn watchlist_projection(movies: &[MovieRecord], ids: &[String]) -> Vec<MovieSummary> {
    movies
        .iter()
        .filter(|m| ids.contains(&m.id))
        .map(MovieSummary::from)
        .collect()
}

pub fn summarize<'a, I>(movies: I) -> Vec<MovieSummary>
where
    I: IntoIterator<Item = &'a MovieRecord>,
{
    movies.into_iter().map(MovieSummary::from).collect()
}
