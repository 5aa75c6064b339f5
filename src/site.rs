// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::{debug, error, info};

use crate::config::SiteConfig;
use crate::dom::Document;
use crate::error::{FeedError, OperationUnavailable};
use crate::feed::{Podcast, load_feed};
use crate::http::HttpClient;
use crate::playback::{Control, MediaElement, PlaybackController, SurfaceKind};
use crate::render::{ContentRenderer, show_error, show_loading};
use crate::router::{FragmentSource, Link, Page, Router};
use crate::status::{SharedStatusReporter, StatusEvent};

/// One loaded site: the document, the router and the shared player
pub struct Site<C, F, M, D>
where
    C: HttpClient,
    F: FragmentSource,
    M: MediaElement,
    D: Document,
{
    config: SiteConfig,
    client: C,
    router: Router<F>,
    document: D,
    player: PlaybackController<M>,
    renderer: ContentRenderer,
    reporter: SharedStatusReporter,
    podcast: Option<Podcast>,
}

impl<C, F, M, D> Site<C, F, M, D>
where
    C: HttpClient,
    F: FragmentSource,
    M: MediaElement,
    D: Document,
{
    pub fn new(
        config: SiteConfig,
        client: C,
        fragments: F,
        media: M,
        document: D,
        reporter: SharedStatusReporter,
    ) -> Self {
        let router = Router::new(fragments, &config);
        let player = PlaybackController::new(media, config.skip_seconds, reporter.clone());
        let renderer = ContentRenderer::new(config.layout.clone());

        Self {
            config,
            client,
            router,
            document,
            player,
            renderer,
            reporter,
            podcast: None,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn router(&self) -> &Router<F> {
        &self.router
    }

    pub fn player(&self) -> &PlaybackController<M> {
        &self.player
    }

    /// Feed shown by the last home page load, if it succeeded
    pub fn podcast(&self) -> Option<&Podcast> {
        self.podcast.as_ref()
    }

    /// Load the page for the initial browser location
    pub async fn start(&mut self, location: &str) -> Page {
        self.report_navigation(location);
        let page = self.router.start(location).await;
        self.show(page).await
    }

    pub async fn navigate(&mut self, path: &str) -> Page {
        self.report_navigation(path);
        let page = self.router.navigate(path).await;
        self.show(page).await
    }

    pub async fn back(&mut self) -> Option<Page> {
        let page = self.router.back().await?;
        Some(self.show(page).await)
    }

    pub async fn forward(&mut self) -> Option<Page> {
        let page = self.router.forward().await?;
        Some(self.show(page).await)
    }

    /// Route a clicked anchor; `None` when the browser should follow it
    pub async fn click_link(&mut self, link: &Link) -> Option<Page> {
        let page = self.router.click_link(link).await?;
        Some(self.show(page).await)
    }

    /// Input from one of the player surfaces
    pub fn control(
        &mut self,
        surface: SurfaceKind,
        control: Control,
    ) -> Result<(), OperationUnavailable> {
        self.player
            .handle_control(surface, control, &mut self.document)
    }

    /// Drive the audio element directly, then apply whatever it emitted
    pub fn with_media(&mut self, drive: impl FnOnce(&mut M)) {
        drive(self.player.media_mut());
        self.player.pump(&mut self.document);
    }

    fn report_navigation(&self, target: &str) {
        self.reporter.report(StatusEvent::NavigatingTo {
            path: self.router.resolve(target),
        });
    }

    async fn show(&mut self, page: Page) -> Page {
        let region = self.config.content_region.as_str();
        if !self.document.set_inner_html(region, &page.html) {
            error!(id = region, "Content region not found");
        }

        info!(path = %page.path, found = page.found, "Page loaded");
        self.reporter.report(StatusEvent::PageLoaded {
            path: page.path.clone(),
            found: page.found,
        });

        if page.is_home {
            self.initialize_home().await;
        } else {
            // Header player lives outside the content region
            self.player.render(&mut self.document);
        }
        page
    }

    /// Fetch the feed and fill the home page; failures become inline messages
    async fn initialize_home(&mut self) {
        debug!("Initializing home page");
        self.player.attach(&mut self.document);
        show_loading(&mut self.document);

        let source = self.config.feed.clone();
        self.reporter.report(StatusEvent::FetchingFeed {
            source: source.clone(),
        });

        match load_feed(&self.client, &source).await {
            Ok(podcast) => {
                self.renderer.render(&podcast.episodes, &mut self.document);
                match podcast.episodes.first() {
                    Some(latest) => self.player.load_episode(latest, &mut self.document),
                    None => self.player.clear(&mut self.document),
                }

                info!(
                    title = %podcast.title,
                    episodes = podcast.episodes.len(),
                    "Feed rendered"
                );
                self.reporter.report(StatusEvent::FeedRendered {
                    podcast_title: podcast.title.clone(),
                    total_episodes: podcast.episodes.len(),
                });
                self.podcast = Some(podcast);
            }
            Err(e) => {
                error!(%source, error = %e, "Failed to load feed");
                if matches!(e, FeedError::EmptyFeed) {
                    self.renderer.render(&[], &mut self.document);
                    self.player.clear(&mut self.document);
                }

                let message = e.user_message();
                show_error(&mut self.document, message);
                self.reporter.report(StatusEvent::FeedFailed {
                    message: message.to_string(),
                    error: e.to_string(),
                });
                self.podcast = None;
            }
        }
    }
}
