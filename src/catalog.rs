use std::{collections::HashMap, path::Path};

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
};

const BUNDLED_CATALOG: &str = include_str!("../data/movies.json");

/// Immutable, ordered collection of every title the storefront knows about
///
/// Loaded once at start-up and shared read-only afterwards. Catalog order is
/// the display order used by every filter.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting blank or duplicate ids
    pub fn new(movies: Vec<MovieRecord>) -> AppResult<Self> {
        let mut index = HashMap::with_capacity(movies.len());

        for (position, movie) in movies.iter().enumerate() {
            if movie.id.trim().is_empty() {
                return Err(AppError::InvalidInput(format!(
                    "Catalog entry at position {} has an empty id",
                    position
                )));
            }
            if index.insert(movie.id.clone(), position).is_some() {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate movie id in catalog: {}",
                    movie.id
                )));
            }
        }

        Ok(Self { movies, index })
    }

    /// The sample catalog compiled into the binary
    pub fn bundled() -> AppResult<Self> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let movies: Vec<MovieRecord> = serde_json::from_str(json)
            .map_err(|e| AppError::InvalidInput(format!("Invalid catalog JSON: {}", e)))?;
        Self::new(movies)
    }

    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Loads from `path` when given, otherwise falls back to the bundled catalog
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let catalog = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::bundled()?,
        };

        tracing::info!(
            movies = catalog.len(),
            source = path.unwrap_or("bundled"),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    pub fn all(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Looks a title up by id; absence is a normal outcome, not an error
    pub fn by_id(&self, id: &str) -> Option<&MovieRecord> {
        self.index.get(id).map(|&position| &self.movies[position])
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
