pub mod config;
pub mod dom;
pub mod duration;
pub mod error;
pub mod feed;
pub mod http;
pub mod playback;
pub mod render;
pub mod router;
pub mod site;
pub mod status;

// Re-export main types for convenience
pub use config::{SectionLayout, SiteConfig};
pub use dom::{Document, MemoryDocument};
pub use error::{
    ConfigError, FeedError, FragmentError, MediaErrorKind, OperationUnavailable,
};
pub use feed::{Episode, Podcast, is_url, load_feed, parse_feed};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use playback::{Control, MediaElement, PlaybackController, PlayerState, SimulatedAudio, SurfaceKind};
pub use render::ContentRenderer;
pub use router::{DirFragmentSource, FragmentSource, HttpFragmentSource, Link, Page, Router};
pub use site::Site;
pub use status::{NoopReporter, SharedStatusReporter, StatusEvent, StatusReporter};
