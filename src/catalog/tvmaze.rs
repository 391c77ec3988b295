/// TVMaze catalog provider implementation.
use super::artwork::resolve_image;
use super::tvmaze_types::{TvMazeEpisode, TvMazeSearchResult};
use super::{CatalogError, CatalogProvider, Episode, Show};
use reqwest::blocking::Response;

/// Root of the public TVMaze API
pub const TVMAZE_BASE_URL: &str = "https://api.tvmaze.com";

/// Builds the URL listing all episodes of a show.
pub fn episodes_url(base_url: &str, show_id: u64) -> String {
    format!("{}/shows/{}/episodes", base_url.trim_end_matches('/'), show_id)
}

/// Catalog provider for the TVMaze API.
///
/// Searches go to `/search/shows`, episode listings to
/// `/shows/{id}/episodes`. Neither endpoint needs authentication.
pub struct TvMazeProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl TvMazeProvider {
    /// Creates a new provider talking to the public TVMaze API.
    pub fn new() -> Self {
        Self::with_base_url(TVMAZE_BASE_URL)
    }

    /// Creates a provider talking to a TVMaze-compatible server.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The API root this provider sends requests to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Converts a TVMaze search hit to our Show record.
    fn convert_show(result: TvMazeSearchResult) -> Show {
        let show = result.show;
        Show {
            id: show.id,
            image: resolve_image(show.image.as_ref()),
            name: show.name,
            summary: show.summary.unwrap_or_default(),
        }
    }

    /// Converts a TVMaze episode to our Episode record.
    fn convert_episode(episode: TvMazeEpisode) -> Episode {
        Episode {
            id: episode.id,
            name: episode.name.unwrap_or_else(|| "Unknown".to_string()),
            season: episode.season,
            number: episode.number.unwrap_or(0),
        }
    }

    fn ensure_success(response: &Response) -> Result<(), CatalogError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(CatalogError::RequestError(format!(
            "HTTP {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )))
    }
}

impl Default for TvMazeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogProvider for TvMazeProvider {
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, CatalogError> {
        let url = format!("{}/search/shows", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", term)])
            .send()
            .map_err(|e| CatalogError::RequestError(e.to_string()))?;

        Self::ensure_success(&response)?;

        let results: Vec<TvMazeSearchResult> = response
            .json()
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;

        Ok(results.into_iter().map(Self::convert_show).collect())
    }

    fn fetch_episodes(&self, show_id: u64) -> Result<Vec<Episode>, CatalogError> {
        let url = episodes_url(&self.base_url, show_id);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| CatalogError::RequestError(e.to_string()))?;

        if response.status() == 404 {
            return Err(CatalogError::ShowNotFound(show_id));
        }

        Self::ensure_success(&response)?;

        let episodes: Vec<TvMazeEpisode> = response
            .json()
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;

        Ok(episodes.into_iter().map(Self::convert_episode).collect())
    }
}
