// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use rss::extension::ExtensionMap;

use crate::duration::format_duration;
use crate::error::FeedError;

/// Placeholder used for links and audio URLs missing from the feed
pub const MISSING_URL: &str = "#";

const DEFAULT_TITLE: &str = "No title";
const DEFAULT_DESCRIPTION: &str = "No description";
const DEFAULT_DURATION: &str = "0";

const MEDIA_NAMESPACE: &str = "http://search.yahoo.com/mrss/";

static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#).expect("valid img src regex")
});

/// Represents a parsed podcast feed
#[derive(Debug, Clone)]
pub struct Podcast {
    pub title: String,
    pub image_url: Option<String>,
    pub episodes: Vec<Episode>,
}

/// Represents a single podcast episode, normalized for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub title: String,
    pub link: String,
    pub description: String,
    /// Raw `pubDate` text as found in the feed
    pub pub_date: String,
    pub audio_url: String,
    /// Raw duration: seconds, `MM:SS` or `H:MM:SS`
    pub duration: String,
    pub image_url: Option<String>,
}

impl Episode {
    /// Whether the episode carries a playable enclosure
    pub fn has_audio(&self) -> bool {
        !self.audio_url.is_empty() && self.audio_url != MISSING_URL
    }

    pub fn formatted_duration(&self) -> String {
        format_duration(&self.duration)
    }

    /// Publication date formatted for listings, or the raw text if it does
    /// not parse
    pub fn display_date(&self) -> String {
        DateTime::parse_from_rfc2822(&self.pub_date)
            .or_else(|_| parse_relaxed_date(&self.pub_date))
            .map(|dt| dt.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|_| self.pub_date.clone())
    }
}

/// Parse RSS feed XML bytes into a Podcast struct
///
/// Fails with [`FeedError::MalformedFeed`] if the document does not parse and
/// with [`FeedError::EmptyFeed`] if it has no items. Episodes keep the order
/// of the items in the feed.
pub fn parse_feed(xml_bytes: &[u8]) -> Result<Podcast, FeedError> {
    let channel = rss::Channel::read_from(xml_bytes)?;

    if channel.items().is_empty() {
        return Err(FeedError::EmptyFeed);
    }

    let image_url = channel_image(&channel);
    let media_prefix = channel
        .namespaces()
        .iter()
        .find(|(_, uri)| uri.as_str() == MEDIA_NAMESPACE)
        .map(|(prefix, _)| prefix.as_str())
        .unwrap_or("media");

    let raw_durations = raw_item_durations(xml_bytes);
    let episodes = channel
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let raw_duration = raw_durations.get(index).and_then(|d| d.as_deref());
            parse_episode(item, media_prefix, image_url.as_deref(), raw_duration)
        })
        .collect();

    Ok(Podcast {
        title: channel.title().to_string(),
        image_url,
        episodes,
    })
}

/// Parse RSS feed XML bytes into the ordered episode list only
pub fn parse_episodes(xml_bytes: &[u8]) -> Result<Vec<Episode>, FeedError> {
    parse_feed(xml_bytes).map(|podcast| podcast.episodes)
}

fn parse_episode(
    item: &rss::Item,
    media_prefix: &str,
    channel_image: Option<&str>,
    raw_duration: Option<&str>,
) -> Episode {
    let description = non_empty(item.description());

    let audio_url = item
        .enclosure()
        .map(|enclosure| enclosure.url())
        .filter(|url| !url.is_empty())
        .unwrap_or(MISSING_URL)
        .to_string();

    let image_url = item_image(item, media_prefix, description)
        .or(channel_image)
        .map(String::from);

    Episode {
        title: non_empty(item.title()).unwrap_or(DEFAULT_TITLE).to_string(),
        link: non_empty(item.link()).unwrap_or(MISSING_URL).to_string(),
        description: description.unwrap_or(DEFAULT_DESCRIPTION).to_string(),
        pub_date: item.pub_date().unwrap_or_default().to_string(),
        audio_url,
        duration: item_duration(item)
            .or(raw_duration)
            .unwrap_or(DEFAULT_DURATION)
            .to_string(),
        image_url,
    }
}

/// Duration from `itunes:duration`, or from any extension element whose
/// local name is `duration`
fn item_duration(item: &rss::Item) -> Option<&str> {
    item.itunes_ext()
        .and_then(|ext| non_empty(ext.duration()))
        .or_else(|| find_by_local_name(item.extensions(), "duration"))
}

fn find_by_local_name<'a>(extensions: &'a ExtensionMap, local_name: &str) -> Option<&'a str> {
    extensions
        .values()
        .filter_map(|elements| elements.get(local_name))
        .flatten()
        .find_map(|ext| non_empty(ext.value()))
}

fn find_attr_by_local_name<'a>(
    extensions: &'a ExtensionMap,
    local_name: &str,
    attr: &str,
) -> Option<&'a str> {
    extensions
        .values()
        .filter_map(|elements| elements.get(local_name))
        .flatten()
        .find_map(|ext| non_empty(ext.attrs().get(attr).map(String::as_str)))
}

/// First non-empty `duration` child of each channel item, in document order,
/// matched by local name. The `rss` crate drops unprefixed unknown elements,
/// so these are read from the raw document.
fn raw_item_durations(xml_bytes: &[u8]) -> Vec<Option<String>> {
    let mut reader = Reader::from_reader(xml_bytes);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut durations: Vec<Option<String>> = Vec::new();
    // Length of `path` while inside an item, pointing at the item element
    let mut item_depth: Option<usize> = None;
    let mut capture: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let name = start.local_name().as_ref().to_vec();
                let in_channel = path.last().is_some_and(|parent| parent == b"channel");

                if name == b"item" && in_channel && item_depth.is_none() {
                    durations.push(None);
                    item_depth = Some(path.len() + 1);
                } else if item_depth == Some(path.len())
                    && name == b"duration"
                    && durations.last().is_some_and(Option::is_none)
                {
                    capture = Some(String::new());
                }
                path.push(name);
            }
            Ok(Event::Text(text)) => {
                if let (Some(buffer), Ok(decoded)) = (capture.as_mut(), text.decode()) {
                    buffer.push_str(&decoded);
                }
            }
            Ok(Event::CData(data)) => {
                if let (Some(buffer), Ok(decoded)) = (capture.as_mut(), data.decode()) {
                    buffer.push_str(&decoded);
                }
            }
            Ok(Event::End(_)) => {
                if item_depth.map(|depth| depth + 1) == Some(path.len())
                    && let Some(buffer) = capture.take()
                {
                    let value = buffer.trim();
                    if let Some(slot) = durations.last_mut()
                        && !value.is_empty()
                    {
                        *slot = Some(value.to_string());
                    }
                }
                if item_depth == Some(path.len()) {
                    item_depth = None;
                }
                path.pop();
            }
            Ok(Event::Eof) | Err(_) => break,
            Ok(_) => {}
        }
    }

    durations
}

/// Item-level artwork: `itunes:image` (also when its namespace is not
/// declared), then `media:thumbnail`, then the first image embedded in the
/// description markup
fn item_image<'a>(
    item: &'a rss::Item,
    media_prefix: &str,
    description: Option<&'a str>,
) -> Option<&'a str> {
    item.itunes_ext()
        .and_then(|ext| non_empty(ext.image()))
        .or_else(|| find_attr_by_local_name(item.extensions(), "image", "href"))
        .or_else(|| {
            item.extensions()
                .get(media_prefix)
                .and_then(|media| media.get("thumbnail"))
                .and_then(|thumbs| thumbs.first())
                .and_then(|thumb| thumb.attrs().get("url"))
                .map(String::as_str)
                .filter(|url| !url.is_empty())
        })
        .or_else(|| description.and_then(first_image_src))
}

fn channel_image(channel: &rss::Channel) -> Option<String> {
    channel
        .image()
        .map(|img| img.url())
        .filter(|url| !url.is_empty())
        .or_else(|| channel.itunes_ext().and_then(|ext| non_empty(ext.image())))
        .map(String::from)
}

fn first_image_src(markup: &str) -> Option<&str> {
    IMG_SRC
        .captures(markup)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Try to parse dates that don't strictly conform to RFC 2822
fn parse_relaxed_date(date_str: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    let formats = [
        "%a, %d %b %Y %H:%M:%S %z",
        "%Y-%m-%dT%H:%M:%S%:z",
        "%Y-%m-%d %H:%M:%S %z",
    ];

    formats
        .iter()
        .map(|format| DateTime::parse_from_str(date_str, format))
        .find(Result::is_ok)
        .unwrap_or_else(|| DateTime::parse_from_rfc2822(date_str))
}
