use crate::error::MediaErrorKind;

/// Lifecycle events emitted by the audio element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    Play,
    Pause,
    Ended,
    Error(MediaErrorKind),
    LoadedMetadata,
    TimeUpdate,
}

/// The single audio element shared by every player surface.
///
/// Playback flags live here only; the controller reads them back instead of
/// keeping its own copy.
pub trait MediaElement {
    /// Current source, or `None` when nothing is loaded
    fn src(&self) -> Option<&str>;

    /// Replace (or clear) the source. Resets position, duration, error and
    /// ended state and leaves the element paused.
    fn set_src(&mut self, src: Option<&str>);

    fn paused(&self) -> bool;

    fn ended(&self) -> bool;

    /// Playback position in seconds
    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64);

    /// Total duration in seconds, once metadata has loaded and only if finite
    fn duration(&self) -> Option<f64>;

    /// Error reported for the current source, if any
    fn error(&self) -> Option<MediaErrorKind>;

    /// Start playback. A rejection carries the reason.
    fn play(&mut self) -> Result<(), MediaErrorKind>;

    fn pause(&mut self);

    /// Events emitted since the last call, oldest first
    fn take_events(&mut self) -> Vec<MediaEvent>;
}
