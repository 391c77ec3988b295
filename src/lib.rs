//! ShowScout - Search a TV show catalog and render the results
//!
//! This library queries the TVMaze catalog for shows, lists the episodes of a
//! chosen show on demand, and renders both as escaped HTML into containers
//! supplied by the caller.

mod catalog;
mod render;

// Re-export error types
pub use catalog::CatalogError;
pub use render::RenderError;

// Re-export catalog types
pub use catalog::{
    CatalogProvider, Episode, PLACEHOLDER_IMAGE, Show, TVMAZE_BASE_URL, TvMazeProvider,
    episodes_url,
};

// Re-export rendering types
pub use render::{
    Container, EpisodesArea, FragmentList, display_episodes, display_shows, render_page,
    summary_text,
};

use std::io;
use thiserror::Error;

/// Progress event emitted while searching and rendering
///
/// These events allow library users to report what is happening without the
/// library printing anything itself.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// A show search is being sent to the catalog
    Searching { term: String },

    /// The catalog answered a search
    ShowsFound { count: usize },

    /// Episodes of a show are being requested
    FetchingEpisodes { show_id: u64 },

    /// The catalog answered an episode listing
    EpisodesFound { show_id: u64, count: usize },

    /// Fragments were written into a container
    Rendered {
        container: &'static str,
        count: usize,
    },
}

/// Top-level error type for ShowScout operations
#[derive(Debug, Error)]
pub enum ShowScoutError {
    /// Error while talking to the catalog
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Error while rendering HTML
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Searches for shows and renders them into the shows container
///
/// The episodes area is hidden, as its content belongs to a previous search.
/// Nothing is touched if the catalog request fails.
///
/// # Arguments
///
/// * `provider` - The catalog to query
/// * `term` - Free-text search term, may be empty
/// * `shows_list` - Container receiving one fragment per show
/// * `episodes_area` - The episodes section to hide
/// * `progress_callback` - Closure called with progress events
///
/// # Returns
///
/// The shows in the order the catalog returned them
///
/// # Examples
///
/// ```no_run
/// use show_scout::{search_shows_and_display, EpisodesArea, FragmentList, TvMazeProvider};
///
/// let provider = TvMazeProvider::new();
/// let mut shows_list = FragmentList::new();
/// let mut episodes_area = EpisodesArea::new();
///
/// let shows = search_shows_and_display(
///     &provider,
///     "bletchley",
///     &mut shows_list,
///     &mut episodes_area,
///     |_| {}, // Silent
/// )
/// .unwrap();
/// assert_eq!(shows.len(), shows_list.len());
/// ```
pub fn search_shows_and_display<P, C, F>(
    provider: &P,
    term: &str,
    shows_list: &mut C,
    episodes_area: &mut EpisodesArea,
    mut progress_callback: F,
) -> Result<Vec<Show>, ShowScoutError>
where
    P: CatalogProvider + ?Sized,
    C: Container + ?Sized,
    F: FnMut(ProgressEvent),
{
    progress_callback(ProgressEvent::Searching {
        term: term.to_string(),
    });

    let shows = provider.search_shows(term)?;

    progress_callback(ProgressEvent::ShowsFound { count: shows.len() });

    episodes_area.hide();
    let count = display_shows(shows_list, &shows)?;

    progress_callback(ProgressEvent::Rendered {
        container: "showsList",
        count,
    });

    Ok(shows)
}

/// Fetches the episodes of a show and renders them into the episodes area
///
/// This is what the "Episodes" button of a show card triggers. On success the
/// episodes area becomes visible.
pub fn show_episodes_and_display<P, F>(
    provider: &P,
    show_id: u64,
    episodes_area: &mut EpisodesArea,
    mut progress_callback: F,
) -> Result<Vec<Episode>, ShowScoutError>
where
    P: CatalogProvider + ?Sized,
    F: FnMut(ProgressEvent),
{
    progress_callback(ProgressEvent::FetchingEpisodes { show_id });

    let episodes = provider.fetch_episodes(show_id)?;

    progress_callback(ProgressEvent::EpisodesFound {
        show_id,
        count: episodes.len(),
    });

    let count = display_episodes(episodes_area, &episodes)?;

    progress_callback(ProgressEvent::Rendered {
        container: "episodesList",
        count,
    });

    Ok(episodes)
}
