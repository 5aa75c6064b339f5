/// One of the three player surfaces on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// The featured episode player on the home page
    Main,
    /// The floating mini-player
    Mini,
    /// The compact player in the page header
    Header,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 3] = [SurfaceKind::Main, SurfaceKind::Mini, SurfaceKind::Header];

    /// Element ids this surface renders into
    pub fn elements(self) -> &'static SurfaceElements {
        match self {
            SurfaceKind::Main => &MAIN,
            SurfaceKind::Mini => &MINI,
            SurfaceKind::Header => &HEADER,
        }
    }
}

/// Element ids of a player surface. Surfaces without a time readout leave
/// those ids unset.
#[derive(Debug)]
pub struct SurfaceElements {
    pub play_pause_button: &'static str,
    pub play_pause_icon: &'static str,
    pub progress_container: &'static str,
    pub progress_fill: &'static str,
    pub current_time: Option<&'static str>,
    pub total_duration: Option<&'static str>,
    pub rewind_button: Option<&'static str>,
    pub forward_button: Option<&'static str>,
}

static MAIN: SurfaceElements = SurfaceElements {
    play_pause_button: "play-pause-btn",
    play_pause_icon: "play-pause-icon",
    progress_container: "progress-bar-container",
    progress_fill: "progress-bar-fill",
    current_time: Some("current-time-display"),
    total_duration: Some("total-duration-display"),
    rewind_button: Some("rewind-5s-btn"),
    forward_button: Some("forward-5s-btn"),
};

static MINI: SurfaceElements = SurfaceElements {
    play_pause_button: "mini-player-play-pause-btn",
    play_pause_icon: "mini-player-play-pause-icon",
    progress_container: "mini-player-progress-bar-container",
    progress_fill: "mini-player-progress-fill",
    current_time: Some("mini-player-current-time"),
    total_duration: Some("mini-player-total-duration"),
    rewind_button: Some("mini-player-rewind-btn"),
    forward_button: Some("mini-player-forward-btn"),
};

static HEADER: SurfaceElements = SurfaceElements {
    play_pause_button: "header-player-play-pause-button",
    play_pause_icon: "header-player-play-pause-icon",
    progress_container: "header-player-progress-container",
    progress_fill: "header-player-progress-fill",
    current_time: None,
    total_duration: None,
    rewind_button: None,
    forward_button: None,
};

/// Mini-player container
pub const MINI_PLAYER: &str = "mini-player";
/// Episode title shown in the mini-player
pub const MINI_PLAYER_TITLE: &str = "mini-player-title";
/// Close control of the mini-player
pub const MINI_PLAYER_CLOSE: &str = "mini-player-close-btn";

/// Icon glyph shown on every play/pause control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Play,
    Pause,
}

impl Glyph {
    /// Material icon name
    pub fn icon_name(self) -> &'static str {
        match self {
            Glyph::Play => "play_arrow",
            Glyph::Pause => "pause",
        }
    }
}

/// What every surface displays at a given moment
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceView {
    pub glyph: Glyph,
    pub progress_percent: f64,
    pub current_time: String,
    pub total_duration: String,
}

/// Where a click on a progress bar landed, in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekClick {
    pub client_x: f64,
    pub bar_left: f64,
    pub bar_width: f64,
}

impl SeekClick {
    /// Fraction of the bar to the left of the click, clamped to `[0, 1]`
    pub fn ratio(&self) -> f64 {
        if self.bar_width.is_nan() || self.bar_width <= 0.0 {
            return 0.0;
        }
        let offset = (self.client_x - self.bar_left).clamp(0.0, self.bar_width);
        offset / self.bar_width
    }
}

/// User input on a player surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    TogglePlayPause,
    Rewind,
    Forward,
    Seek(SeekClick),
    /// Dismiss the mini-player
    Close,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surfaces_use_distinct_elements() {
        let fills: Vec<_> = SurfaceKind::ALL
            .iter()
            .map(|s| s.elements().progress_fill)
            .collect();
        assert_eq!(
            fills,
            vec![
                "progress-bar-fill",
                "mini-player-progress-fill",
                "header-player-progress-fill"
            ]
        );
        assert!(SurfaceKind::Header.elements().current_time.is_none());
    }

    #[test]
    fn seek_ratio_at_edges() {
        let start = SeekClick {
            client_x: 100.0,
            bar_left: 100.0,
            bar_width: 200.0,
        };
        let end = SeekClick {
            client_x: 300.0,
            ..start
        };
        let middle = SeekClick {
            client_x: 150.0,
            ..start
        };

        assert_eq!(start.ratio(), 0.0);
        assert_eq!(end.ratio(), 1.0);
        assert_eq!(middle.ratio(), 0.25);
    }

    #[test]
    fn seek_ratio_clamps_outside_clicks() {
        let before = SeekClick {
            client_x: 10.0,
            bar_left: 100.0,
            bar_width: 200.0,
        };
        let after = SeekClick {
            client_x: 900.0,
            ..before
        };

        assert_eq!(before.ratio(), 0.0);
        assert_eq!(after.ratio(), 1.0);
    }

    #[test]
    fn zero_width_bar_seeks_to_start() {
        let click = SeekClick {
            client_x: 50.0,
            bar_left: 0.0,
            bar_width: 0.0,
        };
        assert_eq!(click.ratio(), 0.0);
    }

    #[test]
    fn glyph_icon_names() {
        assert_eq!(Glyph::Play.icon_name(), "play_arrow");
        assert_eq!(Glyph::Pause.icon_name(), "pause");
    }
}
