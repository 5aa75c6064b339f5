// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::{debug, info, warn};

use crate::dom::Document;
use crate::duration::{ZERO_TIME, format_seconds};
use crate::error::{MediaErrorKind, OperationUnavailable};
use crate::feed::Episode;
use crate::render::show_error;
use crate::status::{SharedStatusReporter, StatusEvent};

use super::media::{MediaElement, MediaEvent};
use super::surface::{
    Control, Glyph, MINI_PLAYER, MINI_PLAYER_TITLE, SeekClick, SurfaceKind, SurfaceView,
};

/// Playback state, derived from the audio element on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// No source loaded
    Empty,
    Paused,
    Playing,
    Ended,
    /// The current source failed; cleared only by loading another one
    Errored(MediaErrorKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MiniPlayer {
    Hidden,
    Shown,
    Dismissed,
}

/// Drives the shared audio element from the main, mini and header players.
///
/// Every command and every media event ends in [`PlaybackController::render`],
/// which writes the same view to all surfaces present in the document.
pub struct PlaybackController<M: MediaElement> {
    media: M,
    skip_seconds: f64,
    /// Duration text from the feed, shown until metadata loads
    fallback_duration: String,
    mini_player: MiniPlayer,
    reporter: SharedStatusReporter,
}

impl<M: MediaElement> PlaybackController<M> {
    pub fn new(media: M, skip_seconds: f64, reporter: SharedStatusReporter) -> Self {
        Self {
            media,
            skip_seconds,
            fallback_duration: ZERO_TIME.to_string(),
            mini_player: MiniPlayer::Hidden,
            reporter,
        }
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    /// Direct access for hosts that feed the element (metadata, ticks)
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn state(&self) -> PlayerState {
        if let Some(kind) = self.media.error() {
            return PlayerState::Errored(kind);
        }
        if self.media.src().is_none() {
            PlayerState::Empty
        } else if self.media.ended() {
            PlayerState::Ended
        } else if self.media.paused() {
            PlayerState::Paused
        } else {
            PlayerState::Playing
        }
    }

    pub fn mini_player_visible(&self) -> bool {
        self.mini_player == MiniPlayer::Shown
    }

    /// Bind to the surfaces of a freshly loaded page.
    ///
    /// Returns the surfaces whose controls are present; missing ones are
    /// logged and left alone.
    pub fn attach<D: Document>(&mut self, doc: &mut D) -> Vec<SurfaceKind> {
        let mut present = Vec::new();
        for surface in SurfaceKind::ALL {
            let elements = surface.elements();
            if doc.contains(elements.play_pause_button) {
                present.push(surface);
            } else {
                warn!(?surface, id = elements.play_pause_button, "Player controls not found");
            }
        }
        if !doc.contains(MINI_PLAYER) {
            warn!(id = MINI_PLAYER, "Mini-player container not found");
        }

        self.apply_mini_player(doc);
        self.render(doc);
        present
    }

    /// Make `episode` the current one. Loading the source that is already
    /// set is a no-op for the audio element.
    pub fn load_episode<D: Document>(&mut self, episode: &Episode, doc: &mut D) {
        let src = episode.has_audio().then_some(episode.audio_url.as_str());
        if src.is_none() {
            warn!(title = %episode.title, "Episode has no audio enclosure");
        }

        if self.media.src() != src {
            debug!(src = ?src, "Setting audio source");
            self.media.set_src(src);
        }

        self.fallback_duration = episode.formatted_duration();
        doc.set_text(MINI_PLAYER_TITLE, &episode.title);
        doc.set_title(MINI_PLAYER_TITLE, &episode.title);

        self.pump(doc);
        self.render(doc);
    }

    /// Unload the current source, e.g. when the feed has no episodes
    pub fn clear<D: Document>(&mut self, doc: &mut D) {
        self.media.set_src(None);
        self.fallback_duration = ZERO_TIME.to_string();
        doc.set_text(MINI_PLAYER_TITLE, "No track playing");
        doc.set_title(MINI_PLAYER_TITLE, "No track playing");

        self.pump(doc);
        self.render(doc);
    }

    /// Play when paused or ended, pause when playing
    pub fn toggle<D: Document>(&mut self, doc: &mut D) -> Result<(), OperationUnavailable> {
        if self.media.paused() || self.media.ended() {
            self.play(doc)
        } else {
            self.pause(doc);
            Ok(())
        }
    }

    pub fn play<D: Document>(&mut self, doc: &mut D) -> Result<(), OperationUnavailable> {
        if self.media.src().is_none() {
            warn!("Cannot play: no audio source loaded");
            return Err(OperationUnavailable::NoSource);
        }

        if (self.media.paused() || self.media.ended())
            && let Err(kind) = self.media.play()
        {
            warn!(error = %kind, "Audio element refused to play");
            let message = format!("Error playing audio: {kind}");
            show_error(doc, &message);
            self.reporter
                .report(StatusEvent::PlaybackFailed { message });
        }

        self.pump(doc);
        self.render(doc);
        Ok(())
    }

    pub fn pause<D: Document>(&mut self, doc: &mut D) {
        self.media.pause();
        self.pump(doc);
    }

    /// Move the position by `delta` seconds, clamped to the episode
    pub fn skip<D: Document>(&mut self, delta: f64, doc: &mut D) -> Result<(), OperationUnavailable> {
        let Some(duration) = self.media.duration() else {
            warn!("Cannot skip: audio not loaded or duration unknown");
            return Err(OperationUnavailable::DurationUnknown);
        };

        let target = (self.media.current_time() + delta).clamp(0.0, duration);
        self.media.set_current_time(target);
        self.pump(doc);
        Ok(())
    }

    /// Jump to the position under a progress bar click
    pub fn seek<D: Document>(&mut self, click: SeekClick, doc: &mut D) -> Result<(), OperationUnavailable> {
        let Some(duration) = self.media.duration() else {
            warn!("Cannot seek: audio duration unknown");
            return Err(OperationUnavailable::DurationUnknown);
        };

        self.media.set_current_time(duration * click.ratio());
        self.pump(doc);
        Ok(())
    }

    /// Hide the mini-player until the page is reloaded; later play events
    /// leave it hidden
    pub fn dismiss_mini_player<D: Document>(&mut self, doc: &mut D) {
        self.mini_player = MiniPlayer::Dismissed;
        self.apply_mini_player(doc);
        info!("Mini-player closed by user");
    }

    /// Dispatch input from any surface. All surfaces share the same
    /// behavior; only the seek geometry differs per bar.
    pub fn handle_control<D: Document>(
        &mut self,
        surface: SurfaceKind,
        control: Control,
        doc: &mut D,
    ) -> Result<(), OperationUnavailable> {
        debug!(?surface, ?control, "Player control activated");
        match control {
            Control::TogglePlayPause => self.toggle(doc),
            Control::Rewind => self.skip(-self.skip_seconds, doc),
            Control::Forward => self.skip(self.skip_seconds, doc),
            Control::Seek(click) => self.seek(click, doc),
            Control::Close => {
                self.dismiss_mini_player(doc);
                Ok(())
            }
        }
    }

    /// Apply one event from the audio element, then re-render
    pub fn handle_media_event<D: Document>(&mut self, event: MediaEvent, doc: &mut D) {
        match event {
            MediaEvent::Play => {
                if self.mini_player == MiniPlayer::Hidden {
                    self.mini_player = MiniPlayer::Shown;
                    self.apply_mini_player(doc);
                    debug!("Audio playing, mini-player shown");
                }
            }
            MediaEvent::Ended => info!("Audio playback ended"),
            MediaEvent::Error(kind) => {
                warn!(error = ?kind, "Audio player error");
                show_error(doc, kind.user_message());
                self.reporter.report(StatusEvent::PlaybackFailed {
                    message: kind.user_message().to_string(),
                });
            }
            MediaEvent::Pause | MediaEvent::LoadedMetadata | MediaEvent::TimeUpdate => {}
        }
        self.render(doc);
    }

    /// Handle every event the audio element has queued, in order
    pub fn pump<D: Document>(&mut self, doc: &mut D) {
        for event in self.media.take_events() {
            self.handle_media_event(event, doc);
        }
    }

    /// What all surfaces should display right now
    pub fn view(&self) -> SurfaceView {
        let total_duration = self
            .media
            .duration()
            .map(format_seconds)
            .unwrap_or_else(|| self.fallback_duration.clone());

        match self.state() {
            PlayerState::Errored(_) => SurfaceView {
                glyph: Glyph::Play,
                progress_percent: 0.0,
                current_time: ZERO_TIME.to_string(),
                total_duration: ZERO_TIME.to_string(),
            },
            PlayerState::Ended | PlayerState::Empty => SurfaceView {
                glyph: Glyph::Play,
                progress_percent: 0.0,
                current_time: ZERO_TIME.to_string(),
                total_duration,
            },
            state => {
                let position = self.media.current_time();
                let progress_percent = match self.media.duration() {
                    Some(duration) if duration > 0.0 => {
                        (position / duration * 100.0).clamp(0.0, 100.0)
                    }
                    _ => 0.0,
                };
                SurfaceView {
                    glyph: if state == PlayerState::Playing {
                        Glyph::Pause
                    } else {
                        Glyph::Play
                    },
                    progress_percent,
                    current_time: format_seconds(position),
                    total_duration,
                }
            }
        }
    }

    /// Write the current view to every surface present in the document
    pub fn render<D: Document>(&self, doc: &mut D) {
        let view = self.view();
        for surface in SurfaceKind::ALL {
            let elements = surface.elements();
            doc.set_text(elements.play_pause_icon, view.glyph.icon_name());
            doc.set_width_percent(elements.progress_fill, view.progress_percent);
            if let Some(id) = elements.current_time {
                doc.set_text(id, &view.current_time);
            }
            if let Some(id) = elements.total_duration {
                doc.set_text(id, &view.total_duration);
            }
        }
    }

    fn apply_mini_player<D: Document>(&self, doc: &mut D) {
        doc.set_visible(MINI_PLAYER, self.mini_player == MiniPlayer::Shown);
    }
}
