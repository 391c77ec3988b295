use clap::{Parser, Subcommand};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use show_scout::{
    CatalogProvider, Episode, EpisodesArea, FragmentList, ProgressEvent, Show, ShowScoutError,
    TVMAZE_BASE_URL, TvMazeProvider, render_page, search_shows_and_display,
    show_episodes_and_display, summary_text,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;

#[derive(Parser)]
#[command(name = "show_scout")]
#[command(version, about = "Search the TVMaze catalog for shows and list their episodes")]
struct Cli {
    /// Root URL of the TVMaze-compatible API
    #[arg(long, env = "SHOW_SCOUT_API_URL", default_value = TVMAZE_BASE_URL, global = true)]
    api_url: String,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search shows by title
    Search {
        /// Search term (may be empty)
        term: String,

        /// Write the rendered HTML page to this file
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// List the episodes of a show
    Episodes {
        /// TVMaze show ID
        show_id: u64,

        /// Write the rendered HTML page to this file
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Search and pick shows interactively
    Browse {
        /// Initial search term
        term: Option<String>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    ShowScout(#[from] ShowScoutError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Handles progress events and prints them to stderr
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::Searching { term } => {
            eprintln!("Searching shows for '{}'...", term);
        }
        ProgressEvent::ShowsFound { count } => {
            eprintln!("Found {} show(s)", count);
        }
        ProgressEvent::FetchingEpisodes { show_id } => {
            eprintln!("Fetching episodes of show {}...", show_id);
        }
        ProgressEvent::EpisodesFound { show_id, count } => {
            eprintln!("Found {} episode(s) for show {}", count, show_id);
        }
        ProgressEvent::Rendered { container, count } => {
            eprintln!("Rendered {} item(s) into #{}", count, container);
        }
    }
}

fn progress_reporter(quiet: bool) -> impl FnMut(ProgressEvent) {
    move |event| {
        if !quiet {
            handle_progress_event(event);
        }
    }
}

fn print_shows(shows: &[Show]) {
    if shows.is_empty() {
        println!("No shows found.");
        return;
    }

    for show in shows {
        println!("[{}] {}", show.id, show.name);
        let summary = summary_text(&show.summary);
        if !summary.is_empty() {
            println!("  {}", summary);
        }
        println!("  Image: {}", show.image);
        println!();
    }
}

fn print_episodes(episodes: &[Episode]) {
    if episodes.is_empty() {
        println!("No episodes found.");
        return;
    }

    for episode in episodes {
        println!(
            "S{:02}E{:02} - {}",
            episode.season, episode.number, episode.name
        );
    }
}

fn write_page(
    path: &Path,
    term: &str,
    shows_list: &FragmentList,
    episodes_area: &EpisodesArea,
) -> Result<(), ShowScoutError> {
    let html = render_page(term, shows_list, episodes_area)?;
    fs::write(path, html)?;
    println!("Page written to {}", path.display());
    Ok(())
}

/// Reports a failed request so an interactive session can go on
fn recover<T>(result: Result<T, ShowScoutError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}

/// Interactive loop: search, pick a show, see its episodes, repeat
fn browse(provider: &dyn CatalogProvider, term: Option<String>, quiet: bool) -> Result<(), CliError> {
    let theme = ColorfulTheme::default();
    let mut shows_list = FragmentList::new();
    let mut episodes_area = EpisodesArea::new();
    let mut next_term = term;

    loop {
        let term = match next_term.take() {
            Some(term) => term,
            None => Input::<String>::with_theme(&theme)
                .with_prompt("Search shows (empty to quit)")
                .allow_empty(true)
                .interact_text()?,
        };
        if term.trim().is_empty() {
            return Ok(());
        }

        let Some(shows) = recover(search_shows_and_display(
            provider,
            &term,
            &mut shows_list,
            &mut episodes_area,
            progress_reporter(quiet),
        )) else {
            continue;
        };
        if shows.is_empty() {
            println!("No shows found.");
            continue;
        }

        let labels: Vec<String> = shows
            .iter()
            .map(|show| format!("{} [{}]", show.name, show.id))
            .collect();

        // Escape leaves the selection and goes back to searching
        while let Some(index) = Select::with_theme(&theme)
            .with_prompt("Show episodes of (Esc for a new search)")
            .items(&labels)
            .default(0)
            .interact_opt()?
        {
            let show = &shows[index];
            println!("\n{}", show.name);
            let summary = summary_text(&show.summary);
            if !summary.is_empty() {
                println!("{}\n", summary);
            }

            if let Some(episodes) = recover(show_episodes_and_display(
                provider,
                show.id,
                &mut episodes_area,
                progress_reporter(quiet),
            )) {
                print_episodes(&episodes);
            }
            println!();
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let provider = TvMazeProvider::with_base_url(&cli.api_url);
    let mut shows_list = FragmentList::new();
    let mut episodes_area = EpisodesArea::new();

    match cli.command {
        Command::Search { term, html } => {
            let shows = search_shows_and_display(
                &provider,
                &term,
                &mut shows_list,
                &mut episodes_area,
                progress_reporter(cli.quiet),
            )?;
            print_shows(&shows);

            if let Some(path) = html {
                write_page(&path, &term, &shows_list, &episodes_area)?;
            }
        }
        Command::Episodes { show_id, html } => {
            let episodes = show_episodes_and_display(
                &provider,
                show_id,
                &mut episodes_area,
                progress_reporter(cli.quiet),
            )?;
            print_episodes(&episodes);

            if let Some(path) = html {
                write_page(&path, "", &shows_list, &episodes_area)?;
            }
        }
        Command::Browse { term } => browse(&provider, term, cli.quiet)?,
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use show_scout::{CatalogError, Container};

    /// Catalog that is down until `recovered` is set
    struct FlakyProvider {
        recovered: bool,
    }

    impl CatalogProvider for FlakyProvider {
        fn search_shows(&self, _term: &str) -> Result<Vec<Show>, CatalogError> {
            if !self.recovered {
                return Err(CatalogError::RequestError("HTTP 502 Bad Gateway".into()));
            }
            Ok(vec![Show {
                id: 1,
                name: "Dark".to_string(),
                summary: String::new(),
                image: show_scout::PLACEHOLDER_IMAGE.to_string(),
            }])
        }

        fn fetch_episodes(&self, show_id: u64) -> Result<Vec<Episode>, CatalogError> {
            if !self.recovered {
                return Err(CatalogError::ShowNotFound(show_id));
            }
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_failed_search_does_not_end_session() {
        let mut provider = FlakyProvider { recovered: false };
        let mut shows_list = FragmentList::new();
        shows_list.append("<p>earlier results</p>".to_string());
        let mut episodes_area = EpisodesArea::new();

        let failed = recover(search_shows_and_display(
            &provider,
            "dark",
            &mut shows_list,
            &mut episodes_area,
            |_| {},
        ));
        assert!(failed.is_none());
        assert_eq!(shows_list.len(), 1);

        provider.recovered = true;
        let shows = recover(search_shows_and_display(
            &provider,
            "dark",
            &mut shows_list,
            &mut episodes_area,
            |_| {},
        ));
        assert_eq!(shows.map(|shows| shows.len()), Some(1));
        assert!(shows_list.to_html().contains(r#"data-show-id="1""#));
    }

    #[test]
    fn test_failed_episode_fetch_does_not_end_session() {
        let provider = FlakyProvider { recovered: false };
        let mut episodes_area = EpisodesArea::new();

        let episodes = recover(show_episodes_and_display(&provider, 3, &mut episodes_area, |_| {}));

        assert!(episodes.is_none());
        assert!(!episodes_area.is_visible());
    }
}
