//! HTML rendering module
//!
//! Turns show and episode records into HTML fragments and appends them to
//! containers. Containers are always handed in by the caller. Every
//! interpolated value goes through askama's HTML escaping, and show summaries
//! are reduced to plain text before that.

use crate::catalog::{Episode, Show};
use askama::Template;
use thiserror::Error;

/// Errors that can occur while rendering
#[derive(Debug, Error)]
pub enum RenderError {
    /// A template failed to render
    #[error("Failed to render template: {0}")]
    Template(#[from] askama::Error),
}

/// An ordered sink for HTML fragments, standing in for a page element
pub trait Container {
    /// Removes all fragments
    fn clear(&mut self);

    /// Appends a fragment after the existing ones
    fn append(&mut self, fragment: String);
}

/// In-memory container keeping fragments in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FragmentList {
    fragments: Vec<String>,
}

impl FragmentList {
    /// Creates an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fragments held
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether no fragment has been appended since the last clear
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The fragments in insertion order
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Concatenates all fragments, one per line
    pub fn to_html(&self) -> String {
        self.fragments.join("\n")
    }
}

impl Container for FragmentList {
    fn clear(&mut self) {
        self.fragments.clear();
    }

    fn append(&mut self, fragment: String) {
        self.fragments.push(fragment);
    }
}

/// The episodes section of the page: a list plus a visibility flag
///
/// The area starts hidden and only becomes visible once episodes have been
/// displayed in it.
#[derive(Debug, Clone, Default)]
pub struct EpisodesArea {
    list: FragmentList,
    visible: bool,
}

impl EpisodesArea {
    /// Creates an empty, hidden area
    pub fn new() -> Self {
        Self::default()
    }

    /// The episode items currently displayed
    pub fn list(&self) -> &FragmentList {
        &self.list
    }

    /// Makes the area visible
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hides the area, keeping its items
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the area is currently shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Template)]
#[template(path = "show_item.html")]
struct ShowItemTemplate<'a> {
    show: &'a Show,
    summary: String,
}

#[derive(Template)]
#[template(path = "episode_item.html")]
struct EpisodeItemTemplate<'a> {
    episode: &'a Episode,
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    term: &'a str,
    shows_html: String,
    episodes_html: String,
    episodes_visible: bool,
}

/// Converts a summary that may contain markup into plain text
pub fn summary_text(summary: &str) -> String {
    nanohtml2text::html2text(summary).trim().to_string()
}

/// Replaces the container's content with one card per show
///
/// Returns the number of fragments appended.
pub fn display_shows<C>(container: &mut C, shows: &[Show]) -> Result<usize, RenderError>
where
    C: Container + ?Sized,
{
    // Render everything first so a failure leaves the container untouched
    let fragments = shows
        .iter()
        .map(|show| {
            ShowItemTemplate {
                show,
                summary: summary_text(&show.summary),
            }
            .render()
        })
        .collect::<Result<Vec<_>, _>>()?;

    container.clear();
    let count = fragments.len();
    for fragment in fragments {
        container.append(fragment);
    }

    Ok(count)
}

/// Replaces the episodes list with one item per episode and shows the area
///
/// Returns the number of fragments appended.
pub fn display_episodes(area: &mut EpisodesArea, episodes: &[Episode]) -> Result<usize, RenderError> {
    let fragments = episodes
        .iter()
        .map(|episode| EpisodeItemTemplate { episode }.render())
        .collect::<Result<Vec<_>, _>>()?;

    area.list.clear();
    let count = fragments.len();
    for fragment in fragments {
        area.list.append(fragment);
    }
    area.show();

    Ok(count)
}

/// Renders a complete HTML document around the given containers
pub fn render_page(
    term: &str,
    shows_list: &FragmentList,
    episodes_area: &EpisodesArea,
) -> Result<String, RenderError> {
    let page = PageTemplate {
        term,
        shows_html: shows_list.to_html(),
        episodes_html: episodes_area.list().to_html(),
        episodes_visible: episodes_area.is_visible(),
    };

    Ok(page.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(id: u64, name: &str, summary: &str) -> Show {
        Show {
            id,
            name: name.to_string(),
            summary: summary.to_string(),
            image: "https://tinyurl.com/tv-missing".to_string(),
        }
    }

    fn episode(id: u64, name: &str, season: u32, number: u32) -> Episode {
        Episode {
            id,
            name: name.to_string(),
            season,
            number,
        }
    }

    #[test]
    fn test_display_shows_appends_one_fragment_per_show() {
        let shows = vec![
            show(1, "Lost", "<p>Plane crash.</p>"),
            show(2, "Lost Girl", ""),
            show(3, "Lost in Space", "<p>Family in space.</p>"),
        ];
        let mut list = FragmentList::new();

        let count = display_shows(&mut list, &shows).unwrap();

        assert_eq!(count, 3);
        assert_eq!(list.len(), 3);
        assert!(list.fragments()[0].contains(r#"data-show-id="1""#));
        assert!(list.fragments()[2].contains("Lost in Space"));
    }

    #[test]
    fn test_display_shows_clears_previous_content() {
        let mut list = FragmentList::new();
        list.append("<p>stale</p>".to_string());

        display_shows(&mut list, &[show(7, "Firefly", "")]).unwrap();
        assert_eq!(list.len(), 1);
        assert!(!list.to_html().contains("stale"));

        display_shows(&mut list, &[]).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_show_fields_are_escaped() {
        let hostile = show(
            1,
            "<script>alert(1)</script>",
            "<p>Nice <b>show</b> &lt;img onerror=x&gt;</p>",
        );
        let mut list = FragmentList::new();
        display_shows(&mut list, &[hostile]).unwrap();

        let html = list.to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("<img onerror"));
        assert!(html.contains("Nice"));
    }

    #[test]
    fn test_summary_text_strips_markup() {
        let text = summary_text("<p>Four <b>women</b> at Bletchley.</p>");
        assert!(text.starts_with("Four"));
        assert!(text.contains("women"));
        assert!(!text.contains('<'));
        assert_eq!(summary_text(""), "");
    }

    #[test]
    fn test_display_episodes_shows_area() {
        let mut area = EpisodesArea::new();
        assert!(!area.is_visible());

        let episodes = vec![episode(10, "Pilot", 1, 1), episode(11, "Second", 1, 2)];
        let count = display_episodes(&mut area, &episodes).unwrap();

        assert_eq!(count, 2);
        assert!(area.is_visible());
        assert_eq!(
            area.list().fragments()[0].trim(),
            r#"<li data-episode-id="10">Pilot (season 1, episode 1)</li>"#
        );
    }

    #[test]
    fn test_episode_names_are_escaped() {
        let mut area = EpisodesArea::new();
        display_episodes(&mut area, &[episode(1, "<i>Bold</i> move", 2, 3)]).unwrap();

        let html = area.list().to_html();
        assert!(html.contains("&lt;i&gt;Bold&lt;/i&gt; move"));
    }

    #[test]
    fn test_render_page_hides_empty_episodes_area() {
        let mut shows_list = FragmentList::new();
        display_shows(&mut shows_list, &[show(5, "Dark", "")]).unwrap();
        let area = EpisodesArea::new();

        let page = render_page("dark", &shows_list, &area).unwrap();

        assert!(page.contains(r#"id="showsList""#));
        assert!(page.contains(r#"data-show-id="5""#));
        assert!(page.contains(r#"value="dark""#));
        assert!(page.contains(r#"<section id="episodesArea" style="display: none">"#));
    }

    #[test]
    fn test_render_page_shows_filled_episodes_area() {
        let shows_list = FragmentList::new();
        let mut area = EpisodesArea::new();
        display_episodes(&mut area, &[episode(1, "Pilot", 1, 1)]).unwrap();

        let page = render_page("", &shows_list, &area).unwrap();

        assert!(page.contains(r#"<section id="episodesArea">"#));
        assert!(page.contains("Pilot (season 1, episode 1)"));
    }

    #[test]
    fn test_render_page_escapes_term() {
        let page = render_page(r#""><b>"#, &FragmentList::new(), &EpisodesArea::new()).unwrap();
        assert!(!page.contains(r#""><b>"#));
    }
}
