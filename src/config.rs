use std::collections::BTreeMap;
use std::ops::Range;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::feed::DEFAULT_FEED_URL;

/// Main configuration struct.
///
/// Every key is optional and falls back to the values the site was
/// originally deployed with.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Feed URL or path to a local RSS file
    pub feed: String,
    /// Deployment prefix stripped from paths before routing, e.g. `/podcast`
    pub base_path: String,
    /// Id of the element whose contents are swapped on navigation
    pub content_region: String,
    /// Route used for unknown paths; its page triggers the feed pipeline
    pub default_route: String,
    /// Logical path to fragment resource
    pub routes: BTreeMap<String, String>,
    pub layout: SectionLayout,
    /// Step used by the rewind and forward controls
    pub skip_seconds: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let routes = [
            ("/", "pages/home_content.html"),
            ("/episodios", "pages/episodios_content.html"),
            ("/sobre", "pages/sobre_content.html"),
            ("/contato", "pages/contato_content.html"),
        ]
        .into_iter()
        .map(|(path, resource)| (path.to_string(), resource.to_string()))
        .collect();

        Self {
            feed: DEFAULT_FEED_URL.to_string(),
            base_path: String::new(),
            content_region: "app-content".to_string(),
            default_route: "/".to_string(),
            routes,
            layout: SectionLayout::default(),
            skip_seconds: 5.0,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file.
    ///
    /// Missing fields in the file use default values. A layout whose
    /// sections overlap or take the featured episode is rejected.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        if !config.layout.is_well_formed() {
            return Err(ConfigError::InvalidLayout {
                path: path.to_path_buf(),
            });
        }
        Ok(config)
    }
}

/// Which feed positions go to which section of the home page.
///
/// Position 0 is always the featured episode. Ranges are half-open,
/// positional and clipped to the number of episodes available.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SectionLayout {
    pub highlights: Range<usize>,
    pub most_played: Range<usize>,
    pub all_episodes: Range<usize>,
}

impl Default for SectionLayout {
    fn default() -> Self {
        Self {
            highlights: 1..4,
            most_played: 4..6,
            all_episodes: 6..10,
        }
    }
}

impl SectionLayout {
    /// Whether the sections are disjoint, in feed order, and skip position 0
    pub fn is_well_formed(&self) -> bool {
        let ranges = [&self.highlights, &self.most_played, &self.all_episodes];
        ranges.iter().all(|r| r.start >= 1 && r.start <= r.end)
            && ranges.windows(2).all(|pair| pair[0].end <= pair[1].start)
    }
}
