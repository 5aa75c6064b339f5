use std::sync::Arc;

/// Events emitted while the site loads pages and plays audio
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    /// A route is being loaded
    NavigatingTo { path: String },

    /// A fragment was placed into the content region
    PageLoaded {
        path: String,
        /// False when the "not found" fragment was substituted
        found: bool,
    },

    /// Feed is being fetched from URL or file
    FetchingFeed { source: String },

    /// Feed has been parsed and rendered
    FeedRendered {
        podcast_title: String,
        total_episodes: usize,
    },

    /// The feed could not be shown; `message` is what the page displays
    FeedFailed { message: String, error: String },

    /// The audio element reported an error or refused to play
    PlaybackFailed { message: String },
}

/// Trait for reporting status events.
///
/// Implementations can use this to display spinners, log messages,
/// or collect events in tests.
pub trait StatusReporter: Send + Sync {
    /// Report a status event
    fn report(&self, event: StatusEvent);
}

/// A shared reference to a status reporter
pub type SharedStatusReporter = Arc<dyn StatusReporter>;

/// A no-op status reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl StatusReporter for NoopReporter {
    fn report(&self, _event: StatusEvent) {}
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedStatusReporter {
        Arc::new(Self)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingReporter;
    use super::*;

    #[test]
    fn noop_reporter_handles_all_events() {
        let reporter = NoopReporter;

        reporter.report(StatusEvent::NavigatingTo {
            path: "/".to_string(),
        });
        reporter.report(StatusEvent::PageLoaded {
            path: "/".to_string(),
            found: true,
        });
        reporter.report(StatusEvent::FetchingFeed {
            source: "https://example.com/feed.xml".to_string(),
        });
        reporter.report(StatusEvent::FeedRendered {
            podcast_title: "Test Podcast".to_string(),
            total_episodes: 10,
        });
        reporter.report(StatusEvent::FeedFailed {
            message: "No episodes found in the feed.".to_string(),
            error: "No episodes found in the feed".to_string(),
        });
        reporter.report(StatusEvent::PlaybackFailed {
            message: "The audio could not be decoded.".to_string(),
        });
    }

    #[test]
    fn recording_reporter_keeps_order() {
        let reporter = RecordingReporter::shared();
        let shared: SharedStatusReporter = reporter.clone();

        shared.report(StatusEvent::NavigatingTo {
            path: "/sobre".to_string(),
        });
        shared.report(StatusEvent::PageLoaded {
            path: "/sobre".to_string(),
            found: true,
        });

        let events = reporter.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], StatusEvent::NavigatingTo { .. }));
        assert!(matches!(events[1], StatusEvent::PageLoaded { found: true, .. }));
    }
}
