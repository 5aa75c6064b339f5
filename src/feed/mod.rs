mod fetch;
mod parse;

pub use fetch::{DEFAULT_FEED_URL, fetch_feed, fetch_feed_bytes, is_url, load_feed};
pub use parse::{Episode, MISSING_URL, Podcast, parse_episodes, parse_feed};
