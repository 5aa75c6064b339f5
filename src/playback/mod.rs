mod controller;
mod media;
mod simulated;
mod surface;

pub use controller::{PlaybackController, PlayerState};
pub use media::{MediaElement, MediaEvent};
pub use simulated::SimulatedAudio;
pub use surface::{
    Control, Glyph, MINI_PLAYER, MINI_PLAYER_CLOSE, MINI_PLAYER_TITLE, SeekClick, SurfaceElements,
    SurfaceKind, SurfaceView,
};
