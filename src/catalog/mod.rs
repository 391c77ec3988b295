/// Data structures and traits for TV show catalog retrieval.
///
/// This module provides the show and episode records handed to the renderers,
/// as well as the trait for catalog providers that produce them.
mod artwork;
mod tvmaze;
mod tvmaze_types;

pub use artwork::PLACEHOLDER_IMAGE;
pub use tvmaze::{TVMAZE_BASE_URL, TvMazeProvider, episodes_url};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during catalog retrieval operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Request to the catalog failed or returned a non-success status
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Failed to parse the catalog's JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The requested show does not exist
    #[error("Show not found: {0}")]
    ShowNotFound(u64),
}

/// A TV show as returned by a catalog search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    /// The catalog's identifier for this show
    pub id: u64,
    /// The show title
    pub name: String,
    /// Summary as delivered by the catalog, may contain HTML markup
    pub summary: String,
    /// Artwork URL, always populated (falls back to a placeholder)
    pub image: String,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// The catalog's identifier for this episode
    pub id: u64,
    /// The episode title
    pub name: String,
    /// The season number this episode belongs to
    pub season: u32,
    /// The episode number within the season (0 for specials)
    pub number: u32,
}

/// Trait for catalog providers that can search shows and list episodes.
pub trait CatalogProvider {
    /// Searches the catalog for shows matching a free-text term.
    ///
    /// The term may be empty. Shows are returned in the order the catalog
    /// ranked them.
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, CatalogError>;

    /// Fetches all episodes of the show with the given identifier.
    fn fetch_episodes(&self, show_id: u64) -> Result<Vec<Episode>, CatalogError>;
}
