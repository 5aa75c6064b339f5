use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when fetching or parsing RSS feeds
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to fetch feed from {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for feed {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to read feed file {path}: {source}")]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed RSS feed: {0}")]
    MalformedFeed(#[from] rss::Error),

    #[error("No episodes found in the feed")]
    EmptyFeed,

    #[error("Invalid feed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FeedError {
    /// Message shown inline on the page when the feed cannot be displayed
    pub fn user_message(&self) -> &'static str {
        match self {
            FeedError::MalformedFeed(_) => {
                "Error processing podcast data. Feed might be malformed."
            }
            FeedError::EmptyFeed => "No episodes found in the feed.",
            _ => "Failed to load podcast feed. Please try again later.",
        }
    }
}

/// Errors that can occur when loading a page fragment
#[derive(Error, Debug)]
pub enum FragmentError {
    #[error("Failed to fetch fragment {resource}: {source}")]
    FetchFailed {
        resource: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read fragment file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error {status} for fragment {resource}")]
    HttpStatus { resource: String, status: u16 },

    #[error("Fragment {resource} is empty")]
    EmptyBody { resource: String },

    #[error("No fragment is configured for route {path}")]
    NoRoute { path: String },

    #[error("Invalid fragment URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Error category reported by the audio element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaErrorKind {
    Aborted,
    Network,
    Decode,
    SrcNotSupported,
    Unknown,
}

impl MediaErrorKind {
    /// Map a `MediaError.code` value onto a category
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => MediaErrorKind::Aborted,
            2 => MediaErrorKind::Network,
            3 => MediaErrorKind::Decode,
            4 => MediaErrorKind::SrcNotSupported,
            _ => MediaErrorKind::Unknown,
        }
    }

    pub fn user_message(self) -> &'static str {
        match self {
            MediaErrorKind::Aborted => "Audio playback was aborted.",
            MediaErrorKind::Network => "A network error caused audio playback to fail.",
            MediaErrorKind::Decode => "The audio could not be decoded.",
            MediaErrorKind::SrcNotSupported => "The audio format is not supported.",
            MediaErrorKind::Unknown => "An unknown error occurred.",
        }
    }
}

impl fmt::Display for MediaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for MediaErrorKind {}

/// A transport command that could not run because the audio is not ready.
///
/// These are warnings: the command is a no-op and nothing is shown to the
/// listener.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationUnavailable {
    #[error("No audio source loaded")]
    NoSource,

    #[error("Audio duration unknown")]
    DurationUnknown,
}

/// Errors that can occur when loading the site configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Section layout in {path} overlaps or includes the featured episode")]
    InvalidLayout { path: PathBuf },
}
