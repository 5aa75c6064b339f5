use std::collections::VecDeque;

use crate::error::MediaErrorKind;

use super::media::{MediaElement, MediaEvent};

/// Headless audio element.
///
/// Follows the HTML media element rules the player depends on: a new source
/// resets everything, metadata arrives later, reaching the end pauses and
/// then fires `ended`. Useful for tests and for driving the site without a
/// browser.
#[derive(Debug, Clone)]
pub struct SimulatedAudio {
    src: Option<String>,
    paused: bool,
    ended: bool,
    current_time: f64,
    duration: Option<f64>,
    error: Option<MediaErrorKind>,
    reject_play: Option<MediaErrorKind>,
    events: VecDeque<MediaEvent>,
}

impl Default for SimulatedAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedAudio {
    pub fn new() -> Self {
        Self {
            src: None,
            paused: true,
            ended: false,
            current_time: 0.0,
            duration: None,
            error: None,
            reject_play: None,
            events: VecDeque::new(),
        }
    }

    /// Finish loading metadata for the current source
    pub fn load_metadata(&mut self, duration: f64) {
        if self.src.is_none() {
            return;
        }
        self.duration = Some(duration).filter(|d| d.is_finite());
        self.events.push_back(MediaEvent::LoadedMetadata);
    }

    /// Play forward by `seconds`, emitting `timeupdate` and, at the end,
    /// `pause` and `ended`
    pub fn advance(&mut self, seconds: f64) {
        if self.paused || self.src.is_none() {
            return;
        }
        let target = self.current_time + seconds;
        match self.duration {
            Some(duration) if target >= duration => {
                self.current_time = duration;
                self.paused = true;
                self.ended = true;
                self.events.push_back(MediaEvent::TimeUpdate);
                self.events.push_back(MediaEvent::Pause);
                self.events.push_back(MediaEvent::Ended);
            }
            _ => {
                self.current_time = target;
                self.events.push_back(MediaEvent::TimeUpdate);
            }
        }
    }

    /// Report a playback error for the current source
    pub fn fail(&mut self, kind: MediaErrorKind) {
        self.error = Some(kind);
        self.paused = true;
        self.events.push_back(MediaEvent::Error(kind));
    }

    /// Make the next `play()` calls reject, as an autoplay policy would
    pub fn reject_play_with(&mut self, kind: Option<MediaErrorKind>) {
        self.reject_play = kind;
    }
}

impl MediaElement for SimulatedAudio {
    fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    fn set_src(&mut self, src: Option<&str>) {
        self.src = src.filter(|s| !s.is_empty()).map(String::from);
        self.paused = true;
        self.ended = false;
        self.current_time = 0.0;
        self.duration = None;
        self.error = None;
    }

    fn paused(&self) -> bool {
        self.paused
    }

    fn ended(&self) -> bool {
        self.ended
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = match self.duration {
            Some(duration) => seconds.clamp(0.0, duration),
            None => seconds.max(0.0),
        };
        self.ended = false;
        self.events.push_back(MediaEvent::TimeUpdate);
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn error(&self) -> Option<MediaErrorKind> {
        self.error
    }

    fn play(&mut self) -> Result<(), MediaErrorKind> {
        if self.src.is_none() {
            return Err(MediaErrorKind::SrcNotSupported);
        }
        if let Some(kind) = self.error.or(self.reject_play) {
            return Err(kind);
        }
        if self.ended {
            self.current_time = 0.0;
            self.ended = false;
        }
        if self.paused {
            self.paused = false;
            self.events.push_back(MediaEvent::Play);
        }
        Ok(())
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.events.push_back(MediaEvent::Pause);
        }
    }

    fn take_events(&mut self) -> Vec<MediaEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_source_resets_state() {
        let mut audio = SimulatedAudio::new();
        audio.set_src(Some("https://example.com/a.mp3"));
        audio.load_metadata(100.0);
        audio.play().unwrap();
        audio.advance(30.0);

        audio.set_src(Some("https://example.com/b.mp3"));

        assert_eq!(audio.src(), Some("https://example.com/b.mp3"));
        assert!(audio.paused());
        assert_eq!(audio.current_time(), 0.0);
        assert_eq!(audio.duration(), None);
    }

    #[test]
    fn reaching_the_end_pauses_then_ends() {
        let mut audio = SimulatedAudio::new();
        audio.set_src(Some("https://example.com/a.mp3"));
        audio.load_metadata(10.0);
        audio.play().unwrap();
        audio.take_events();

        audio.advance(15.0);

        assert!(audio.paused());
        assert!(audio.ended());
        assert_eq!(audio.current_time(), 10.0);
        assert_eq!(
            audio.take_events(),
            vec![MediaEvent::TimeUpdate, MediaEvent::Pause, MediaEvent::Ended]
        );
    }

    #[test]
    fn play_without_source_is_rejected() {
        let mut audio = SimulatedAudio::new();
        assert_eq!(audio.play(), Err(MediaErrorKind::SrcNotSupported));
        assert!(audio.take_events().is_empty());
    }

    #[test]
    fn infinite_duration_stays_unknown() {
        let mut audio = SimulatedAudio::new();
        audio.set_src(Some("https://example.com/live.mp3"));
        audio.load_metadata(f64::INFINITY);

        assert_eq!(audio.duration(), None);
        assert_eq!(audio.take_events(), vec![MediaEvent::LoadedMetadata]);
    }

    #[test]
    fn repeated_pause_emits_once() {
        let mut audio = SimulatedAudio::new();
        audio.set_src(Some("https://example.com/a.mp3"));
        audio.play().unwrap();
        audio.pause();
        audio.pause();

        assert_eq!(
            audio.take_events(),
            vec![MediaEvent::Play, MediaEvent::Pause]
        );
    }
}
