mod cards;

use std::ops::Range;

use tracing::{debug, warn};

use crate::config::SectionLayout;
use crate::dom::Document;
use crate::feed::Episode;

pub use cards::{EMPTY_SECTION_HTML, featured_image_html, highlight_card_html, podcast_card_html};

pub const FEATURED_TITLE: &str = "featured-title";
pub const FEATURED_DESCRIPTION: &str = "featured-description";
pub const FEATURED_DATE: &str = "featured-date";
pub const FEATURED_IMAGE: &str = "featured-image";

pub const LOADING_MESSAGE: &str = "rss-loading-message";
pub const ERROR_MESSAGE: &str = "rss-error-message";

const NO_EPISODE_TITLE: &str = "No episode available";

/// A grid of episode cards below the featured episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Highlights,
    MostPlayed,
    AllEpisodes,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Highlights, Section::MostPlayed, Section::AllEpisodes];

    /// Id of the grid container
    pub fn container_id(self) -> &'static str {
        match self {
            Section::Highlights => "highlights-grid",
            Section::MostPlayed => "most-played-grid",
            Section::AllEpisodes => "episodes-grid",
        }
    }

    fn card_html(self, episode: &Episode) -> String {
        match self {
            Section::Highlights => highlight_card_html(episode),
            Section::MostPlayed | Section::AllEpisodes => podcast_card_html(episode),
        }
    }
}

/// Episodes assigned to each part of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSlices<'a> {
    pub featured: Option<&'a Episode>,
    pub highlights: &'a [Episode],
    pub most_played: &'a [Episode],
    pub all_episodes: &'a [Episode],
}

impl<'a> SectionSlices<'a> {
    pub fn get(&self, section: Section) -> &'a [Episode] {
        match section {
            Section::Highlights => self.highlights,
            Section::MostPlayed => self.most_played,
            Section::AllEpisodes => self.all_episodes,
        }
    }
}

/// Renders episode listings into the home page fragment.
///
/// Position 0 is the featured episode; the sections take disjoint windows
/// of the feed. Every container is overwritten on each render.
#[derive(Debug, Clone, Default)]
pub struct ContentRenderer {
    layout: SectionLayout,
}

impl ContentRenderer {
    /// Falls back to the default layout when `layout` is not well formed
    pub fn new(layout: SectionLayout) -> Self {
        if !layout.is_well_formed() {
            warn!(?layout, "Section layout overlaps or includes the featured episode, using default");
            return Self::default();
        }
        Self { layout }
    }

    pub fn layout(&self) -> &SectionLayout {
        &self.layout
    }

    /// Split the feed by position according to the layout
    pub fn slices<'a>(&self, episodes: &'a [Episode]) -> SectionSlices<'a> {
        SectionSlices {
            featured: episodes.first(),
            highlights: window(episodes, &self.layout.highlights),
            most_played: window(episodes, &self.layout.most_played),
            all_episodes: window(episodes, &self.layout.all_episodes),
        }
    }

    /// Fill the featured block and every section grid
    pub fn render<D: Document>(&self, episodes: &[Episode], doc: &mut D) {
        let slices = self.slices(episodes);

        render_featured(slices.featured, doc);
        for section in Section::ALL {
            render_section(section, slices.get(section), doc);
        }
        hide_loading(doc);
    }
}

fn window<'a>(episodes: &'a [Episode], range: &Range<usize>) -> &'a [Episode] {
    let start = range.start.min(episodes.len());
    let end = range.end.min(episodes.len()).max(start);
    &episodes[start..end]
}

fn render_featured<D: Document>(episode: Option<&Episode>, doc: &mut D) {
    if !doc.contains(FEATURED_TITLE) {
        warn!(id = FEATURED_TITLE, "Featured episode section not found");
        return;
    }

    let Some(episode) = episode else {
        doc.set_text(FEATURED_TITLE, NO_EPISODE_TITLE);
        doc.set_text(FEATURED_DESCRIPTION, "");
        doc.set_text(FEATURED_DATE, "");
        doc.set_inner_html(FEATURED_IMAGE, "");
        return;
    };

    doc.set_text(FEATURED_TITLE, &episode.title);
    doc.set_text(FEATURED_DESCRIPTION, &episode.description);
    doc.set_text(FEATURED_DATE, &episode.display_date());
    doc.set_inner_html(FEATURED_IMAGE, &featured_image_html(episode));
}

fn render_section<D: Document>(section: Section, episodes: &[Episode], doc: &mut D) {
    let container = section.container_id();
    if !doc.contains(container) {
        warn!(?section, id = container, "Card container not found");
        return;
    }

    let html = if episodes.is_empty() {
        EMPTY_SECTION_HTML.to_string()
    } else {
        episodes.iter().map(|ep| section.card_html(ep)).collect()
    };

    doc.set_inner_html(container, &html);
    debug!(?section, count = episodes.len(), "Section rendered");
}

/// Show the loading banner and hide any previous error
pub fn show_loading<D: Document>(doc: &mut D) {
    doc.set_text(LOADING_MESSAGE, "Loading episodes...");
    doc.set_visible(LOADING_MESSAGE, true);
    doc.set_visible(ERROR_MESSAGE, false);
}

pub fn hide_loading<D: Document>(doc: &mut D) {
    doc.set_visible(LOADING_MESSAGE, false);
}

/// Replace the loading banner with an inline error message
pub fn show_error<D: Document>(doc: &mut D, message: &str) {
    hide_loading(doc);
    if !doc.set_text(ERROR_MESSAGE, message) {
        warn!(id = ERROR_MESSAGE, message, "Error banner not found");
        return;
    }
    doc.set_visible(ERROR_MESSAGE, true);
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dom::MemoryDocument;

    fn episodes(count: usize) -> Vec<Episode> {
        (1..=count)
            .map(|n| Episode {
                title: format!("Episode {n}"),
                link: format!("https://example.com/{n}"),
                description: format!("Notes for {n}"),
                pub_date: "Mon, 01 Jan 2024 12:00:00 +0000".to_string(),
                audio_url: format!("https://example.com/{n}.mp3"),
                duration: "125".to_string(),
                image_url: None,
            })
            .collect()
    }

    fn home_page() -> MemoryDocument {
        let mut ids = vec![
            FEATURED_TITLE,
            FEATURED_DESCRIPTION,
            FEATURED_DATE,
            FEATURED_IMAGE,
            LOADING_MESSAGE,
            ERROR_MESSAGE,
        ];
        ids.extend(Section::ALL.iter().map(|s| s.container_id()));
        MemoryDocument::with_elements(ids)
    }

    fn titles(slice: &[Episode]) -> Vec<&str> {
        slice.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn default_layout_slices_by_position() {
        let eps = episodes(12);
        let slices = ContentRenderer::default().slices(&eps);

        assert_eq!(slices.featured.map(|e| e.title.as_str()), Some("Episode 1"));
        assert_eq!(
            titles(slices.highlights),
            vec!["Episode 2", "Episode 3", "Episode 4"]
        );
        assert_eq!(titles(slices.most_played), vec!["Episode 5", "Episode 6"]);
        assert_eq!(
            titles(slices.all_episodes),
            vec!["Episode 7", "Episode 8", "Episode 9", "Episode 10"]
        );
    }

    #[test]
    fn configured_layout_changes_boundaries() {
        let eps = episodes(12);
        let renderer = ContentRenderer::new(SectionLayout {
            highlights: 1..4,
            most_played: 4..7,
            all_episodes: 7..11,
        });
        let slices = renderer.slices(&eps);

        assert_eq!(slices.most_played.len(), 3);
        assert_eq!(
            titles(slices.all_episodes),
            vec!["Episode 8", "Episode 9", "Episode 10", "Episode 11"]
        );
    }

    #[test]
    fn overlapping_layout_falls_back_to_default() {
        let renderer = ContentRenderer::new(SectionLayout {
            highlights: 0..5,
            most_played: 3..6,
            all_episodes: 6..10,
        });
        assert_eq!(renderer.layout(), &SectionLayout::default());

        let eps = episodes(10);
        let slices = renderer.slices(&eps);
        assert_eq!(titles(slices.highlights), vec!["Episode 2", "Episode 3", "Episode 4"]);
        assert_eq!(titles(slices.most_played), vec!["Episode 5", "Episode 6"]);
    }

    #[test]
    fn short_feeds_leave_later_sections_empty() {
        let eps = episodes(3);
        let slices = ContentRenderer::default().slices(&eps);

        assert_eq!(titles(slices.highlights), vec!["Episode 2", "Episode 3"]);
        assert!(slices.most_played.is_empty());
        assert!(slices.all_episodes.is_empty());
    }

    #[test]
    fn render_fills_featured_and_grids() {
        let eps = episodes(10);
        let mut doc = home_page();

        ContentRenderer::default().render(&eps, &mut doc);

        assert_eq!(doc.text(FEATURED_TITLE), Some("Episode 1"));
        assert_eq!(doc.text(FEATURED_DESCRIPTION), Some("Notes for 1"));
        assert_eq!(doc.text(FEATURED_DATE), Some("Jan 1, 2024"));

        let highlights = doc.inner_html("highlights-grid").unwrap();
        assert!(highlights.contains("Episode 2"));
        assert!(highlights.contains("Episode 4"));
        assert!(!highlights.contains("Episode 5"));

        let all = doc.inner_html("episodes-grid").unwrap();
        assert_eq!(all.matches("podcast-card").count(), 4);
        assert!(!doc.is_visible(LOADING_MESSAGE));
    }

    #[test]
    fn empty_slices_render_placeholder() {
        let eps = episodes(2);
        let mut doc = home_page();

        ContentRenderer::default().render(&eps, &mut doc);

        assert_eq!(doc.inner_html("most-played-grid"), Some(EMPTY_SECTION_HTML));
        assert_eq!(doc.inner_html("episodes-grid"), Some(EMPTY_SECTION_HTML));
    }

    #[test]
    fn rendering_twice_replaces_contents() {
        let mut doc = home_page();
        let renderer = ContentRenderer::default();

        renderer.render(&episodes(10), &mut doc);
        renderer.render(&episodes(10), &mut doc);

        let highlights = doc.inner_html("highlights-grid").unwrap();
        assert_eq!(highlights.matches("Episode 2<").count(), 1);
    }

    #[test]
    fn no_episodes_shows_placeholder_title() {
        let mut doc = home_page();
        ContentRenderer::default().render(&[], &mut doc);

        assert_eq!(doc.text(FEATURED_TITLE), Some("No episode available"));
        assert_eq!(doc.inner_html("highlights-grid"), Some(EMPTY_SECTION_HTML));
    }

    #[test]
    fn missing_containers_are_skipped() {
        let eps = episodes(10);
        let mut doc = MemoryDocument::with_elements(["highlights-grid"]);

        ContentRenderer::default().render(&eps, &mut doc);

        assert!(doc.inner_html("highlights-grid").unwrap().contains("Episode 3"));
        assert!(!doc.contains(FEATURED_TITLE));
    }

    #[test]
    fn error_banner_replaces_loading() {
        let mut doc = home_page();

        show_loading(&mut doc);
        assert!(doc.is_visible(LOADING_MESSAGE));
        assert!(!doc.is_visible(ERROR_MESSAGE));

        show_error(&mut doc, "No episodes found in the feed.");
        assert!(!doc.is_visible(LOADING_MESSAGE));
        assert!(doc.is_visible(ERROR_MESSAGE));
        assert_eq!(doc.text(ERROR_MESSAGE), Some("No episodes found in the feed."));
    }
}
