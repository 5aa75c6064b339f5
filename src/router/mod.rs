// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod history;
mod source;

use std::collections::BTreeMap;

use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::error::FragmentError;

pub use history::{History, HistoryEntry};
pub use source::{DirFragmentSource, FragmentSource, HttpFragmentSource};

/// Class marking anchors that are always routed in-app
pub const ROUTER_LINK_CLASS: &str = "router-link";

/// Query parameter carrying the original path after a static-hosting 404 redirect
pub const REDIRECT_PARAM: &str = "p";

/// A fragment ready to be placed into the content region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Route that was actually loaded
    pub path: String,
    pub html: String,
    /// False when the "not found" fragment was substituted
    pub found: bool,
    /// Whether the home initialization hook should run
    pub is_home: bool,
}

/// An anchor the user clicked
#[derive(Debug, Clone, Default)]
pub struct Link {
    pub href: String,
    pub has_router_class: bool,
    pub target: Option<String>,
    /// Host of the link equals the host of the page
    pub same_origin: bool,
}

impl Link {
    /// A link that carries the `router-link` class
    pub fn router(href: &str) -> Self {
        Self {
            href: href.to_string(),
            has_router_class: true,
            target: None,
            same_origin: true,
        }
    }
}

/// Normalize a location into a route path.
///
/// Strips any origin, the query string and fragment, the deployment
/// `base_path` and a trailing `index.html`. The result always starts with
/// `/` and has no trailing slash unless it is `/` itself.
pub fn normalize_path(raw: &str, base_path: &str) -> String {
    let without_origin = match raw.split_once("://") {
        Some((scheme, rest)) if is_scheme(scheme) => rest.find('/').map_or("/", |slash| &rest[slash..]),
        _ => raw,
    };

    let end = without_origin.find(['?', '#']).unwrap_or(without_origin.len());
    let mut path = &without_origin[..end];

    let base = base_path.trim_end_matches('/');
    if !base.is_empty()
        && let Some(rest) = path.strip_prefix(base)
        && (rest.is_empty() || rest.starts_with('/'))
    {
        path = rest;
    }

    let mut path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if let Some(stripped) = path.strip_suffix("index.html") {
        path = stripped.to_string();
    }
    while path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    path
}

fn is_scheme(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Extract the redirect-carried path (`?p=...`) from a location
pub fn redirect_param(location: &str) -> Option<String> {
    let (_, query) = location.split_once('?')?;
    let query = query.split('#').next().unwrap_or(query);

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == REDIRECT_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Routes locations to page fragments and keeps the session history.
///
/// Loading never fails: when a fragment cannot be fetched a "not found"
/// page linking back to the default route is used.
pub struct Router<F: FragmentSource> {
    source: F,
    routes: BTreeMap<String, String>,
    default_route: String,
    base_path: String,
    history: History,
}

impl<F: FragmentSource> Router<F> {
    pub fn new(source: F, config: &SiteConfig) -> Self {
        if !config.routes.contains_key(&config.default_route) {
            warn!(
                default_route = %config.default_route,
                "Default route has no fragment; it will always show the not-found page"
            );
        }

        Self {
            source,
            routes: config.routes.clone(),
            default_route: config.default_route.clone(),
            base_path: config.base_path.clone(),
            history: History::new(&config.default_route),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn default_route(&self) -> &str {
        &self.default_route
    }

    pub fn is_route(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// Route that will be loaded for `raw`; unknown paths map to the default route
    pub fn resolve(&self, raw: &str) -> String {
        let path = normalize_path(raw, &self.base_path);
        if self.is_route(&path) {
            path
        } else {
            debug!(%path, "Unknown route, using default");
            self.default_route.clone()
        }
    }

    /// Fetch the fragment for `raw` without touching history
    pub async fn load(&self, raw: &str) -> Page {
        let path = self.resolve(raw);
        let is_home = path == self.default_route;

        let result = match self.routes.get(&path) {
            Some(resource) => {
                info!(%path, %resource, "Loading page");
                self.source.load(resource).await
            }
            None => Err(FragmentError::NoRoute { path: path.clone() }),
        };

        match result {
            Ok(html) => Page {
                path,
                html,
                found: true,
                is_home,
            },
            Err(e) => {
                warn!(%path, error = %e, "Failed to load page fragment");
                Page {
                    html: self.not_found_html(&e),
                    path,
                    found: false,
                    is_home: false,
                }
            }
        }
    }

    /// Push a history entry when the target differs, then load it
    pub async fn navigate(&mut self, raw: &str) -> Page {
        let path = normalize_path(raw, &self.base_path);
        if self.history.location() != path {
            self.history.push_state(&path);
        }
        self.load(&path).await
    }

    /// Go one entry back; `None` at the start of the session
    pub async fn back(&mut self) -> Option<Page> {
        let path = self.history.back()?.path().to_string();
        Some(self.load(&path).await)
    }

    /// Go one entry forward; `None` at the end of the session
    pub async fn forward(&mut self) -> Option<Page> {
        let path = self.history.forward()?.path().to_string();
        Some(self.load(&path).await)
    }

    /// Load the initial page for `location`.
    ///
    /// A redirect parameter takes precedence over the location's path.
    /// Unknown initial paths are replaced in history by the default route.
    pub async fn start(&mut self, location: &str) -> Page {
        let path = match redirect_param(location) {
            Some(redirected) => {
                debug!(%redirected, "Restoring path from redirect parameter");
                normalize_path(&redirected, &self.base_path)
            }
            None => normalize_path(location, &self.base_path),
        };

        self.history = History::new(&path);
        if self.is_route(&path) {
            self.history.replace_state(&path);
        } else {
            warn!(%path, "Initial path is not a route, loading default");
            self.history.replace_state(&self.default_route);
        }

        let current = self.history.location().to_string();
        self.load(&current).await
    }

    /// Route a clicked anchor in-app; `None` leaves it to the browser
    pub async fn click_link(&mut self, link: &Link) -> Option<Page> {
        if link.has_router_class {
            if link.href.is_empty() {
                return None;
            }
            return Some(self.navigate(&link.href).await);
        }

        if !link.same_origin || link.target.as_deref().is_some_and(|t| !t.is_empty()) {
            return None;
        }

        let path = normalize_path(&link.href, &self.base_path);
        if !self.is_route(&path) {
            return None;
        }
        Some(self.navigate(&path).await)
    }

    fn not_found_html(&self, error: &FragmentError) -> String {
        let base = self.base_path.trim_end_matches('/');
        let href = format!("{base}{}", self.default_route);

        format!(
            r#"<div class="text-center p-8">
    <h1 class="text-4xl font-bold text-red-600 mb-4">Page not found</h1>
    <p class="text-xl text-gray-700">Could not load page content.</p>
    <p class="text-md text-gray-500 mt-2">{message}</p>
    <a href="{href}" class="mt-6 inline-block bg-indigo-600 text-white font-semibold py-2 px-4 rounded hover:bg-indigo-700 {ROUTER_LINK_CLASS}">Go to Homepage</a>
</div>
"#,
            message = encode_text(&error.to_string()),
            href = encode_double_quoted_attribute(&href),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    struct MapSource {
        pages: HashMap<&'static str, &'static str>,
        loaded: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl FragmentSource for MapSource {
        async fn load(&self, resource: &str) -> Result<String, FragmentError> {
            self.loaded.lock().unwrap().push(resource.to_string());
            self.pages
                .get(resource)
                .map(|html| html.to_string())
                .ok_or_else(|| FragmentError::HttpStatus {
                    resource: resource.to_string(),
                    status: 404,
                })
        }
    }

    fn source() -> MapSource {
        MapSource {
            pages: HashMap::from([
                ("pages/home_content.html", "<p>home</p>"),
                ("pages/sobre_content.html", "<p>sobre</p>"),
                ("pages/contato_content.html", "<p>contato</p>"),
            ]),
            loaded: Mutex::new(Vec::new()),
        }
    }

    fn router() -> Router<MapSource> {
        Router::new(source(), &SiteConfig::default())
    }

    #[test]
    fn normalize_handles_common_shapes() {
        assert_eq!(normalize_path("/", ""), "/");
        assert_eq!(normalize_path("", ""), "/");
        assert_eq!(normalize_path("sobre", ""), "/sobre");
        assert_eq!(normalize_path("/sobre/", ""), "/sobre");
        assert_eq!(normalize_path("/index.html", ""), "/");
        assert_eq!(normalize_path("/sobre/index.html", ""), "/sobre");
        assert_eq!(normalize_path("/sobre?x=1#top", ""), "/sobre");
        assert_eq!(normalize_path("https://example.com/contato", ""), "/contato");
        assert_eq!(normalize_path("https://example.com", ""), "/");
    }

    #[test]
    fn normalize_strips_base_path() {
        assert_eq!(normalize_path("/podcast/sobre", "/podcast"), "/sobre");
        assert_eq!(normalize_path("/podcast/", "/podcast/"), "/");
        assert_eq!(normalize_path("/podcast", "/podcast"), "/");
        assert_eq!(normalize_path("/podcasts/sobre", "/podcast"), "/podcasts/sobre");
    }

    #[test]
    fn redirect_param_is_decoded() {
        assert_eq!(redirect_param("/?p=%2Fsobre"), Some("/sobre".to_string()));
        assert_eq!(redirect_param("/?x=1&p=/contato#top"), Some("/contato".to_string()));
        assert_eq!(redirect_param("/?p="), None);
        assert_eq!(redirect_param("/sobre"), None);
    }

    #[test]
    fn resolve_falls_back_to_default() {
        let router = router();
        assert_eq!(router.resolve("/sobre/"), "/sobre");
        assert_eq!(router.resolve("/missing"), "/");
    }

    #[tokio::test]
    async fn load_known_route() {
        let router = router();
        let page = router.load("/sobre").await;

        assert_eq!(page.path, "/sobre");
        assert_eq!(page.html, "<p>sobre</p>");
        assert!(page.found);
        assert!(!page.is_home);
    }

    #[tokio::test]
    async fn unknown_route_loads_home() {
        let router = router();
        let page = router.load("/does-not-exist").await;

        assert_eq!(page.path, "/");
        assert!(page.is_home);
        assert_eq!(page.html, "<p>home</p>");
    }

    #[tokio::test]
    async fn failed_fragment_substitutes_not_found() {
        let router = router();
        // episodios is routed but the source has no such page
        let page = router.load("/episodios").await;

        assert!(!page.found);
        assert!(!page.is_home);
        assert!(page.html.contains("Page not found"));
        assert!(page.html.contains(r#"href="/""#));
        assert!(page.html.contains(ROUTER_LINK_CLASS));
        assert!(page.html.contains("HTTP error 404"));
    }

    #[tokio::test]
    async fn default_route_without_fragment_is_not_found() {
        let config = SiteConfig {
            default_route: "/inicio".to_string(),
            ..SiteConfig::default()
        };
        let router = Router::new(source(), &config);

        let page = router.load("/nowhere").await;

        assert_eq!(page.path, "/inicio");
        assert!(!page.found);
        assert!(page.html.contains("No fragment is configured for route /inicio"));
        assert!(router.source.loaded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn navigate_pushes_only_on_change() {
        let mut router = router();
        router.start("/").await;

        router.navigate("/sobre").await;
        router.navigate("/sobre").await;

        assert_eq!(router.history().len(), 2);
        assert_eq!(router.history().location(), "/sobre");
    }

    #[tokio::test]
    async fn back_and_forward_reload_entries() {
        let mut router = router();
        router.start("/").await;
        router.navigate("/sobre").await;
        router.navigate("/contato").await;

        let page = router.back().await.unwrap();
        assert_eq!(page.html, "<p>sobre</p>");

        let page = router.back().await.unwrap();
        assert!(page.is_home);
        assert!(router.back().await.is_none());

        let page = router.forward().await.unwrap();
        assert_eq!(page.path, "/sobre");
    }

    #[tokio::test]
    async fn start_replaces_unknown_initial_path() {
        let mut router = router();
        let page = router.start("/old-page.html").await;

        assert!(page.is_home);
        assert_eq!(router.history().len(), 1);
        assert_eq!(router.history().location(), "/");
    }

    #[tokio::test]
    async fn start_prefers_redirect_param() {
        let mut router = router();
        let page = router.start("/?p=%2Fcontato").await;

        assert_eq!(page.path, "/contato");
        assert_eq!(router.history().location(), "/contato");
    }

    #[tokio::test]
    async fn router_links_always_navigate() {
        let mut router = router();
        router.start("/").await;

        let page = router.click_link(&Link::router("/missing")).await.unwrap();
        assert!(page.is_home);
        assert_eq!(router.history().location(), "/missing");
    }

    #[tokio::test]
    async fn plain_links_route_only_known_same_origin_paths() {
        let mut router = router();
        router.start("/").await;

        let external = Link {
            href: "https://other.example.com/sobre".to_string(),
            same_origin: false,
            ..Link::default()
        };
        assert!(router.click_link(&external).await.is_none());

        let new_tab = Link {
            href: "/sobre".to_string(),
            target: Some("_blank".to_string()),
            same_origin: true,
            ..Link::default()
        };
        assert!(router.click_link(&new_tab).await.is_none());

        let unknown = Link {
            href: "/files/show.pdf".to_string(),
            same_origin: true,
            ..Link::default()
        };
        assert!(router.click_link(&unknown).await.is_none());

        let internal = Link {
            href: "/sobre?ref=nav".to_string(),
            same_origin: true,
            ..Link::default()
        };
        let page = router.click_link(&internal).await.unwrap();
        assert_eq!(page.path, "/sobre");
        assert_eq!(router.history().location(), "/sobre");
    }
}
