//! Playback configuration.

use std::time::Duration;

use arbor_algorithms::Algorithm;
use serde::{Deserialize, Serialize};

/// Default delay between frames of a traversal.
pub const TRAVERSAL_INTERVAL: Duration = Duration::from_millis(1000);

/// Default delay between frames of a shortest-path search.
pub const SHORTEST_PATH_INTERVAL: Duration = Duration::from_millis(100);

/// What each delivered highlight contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMode {
    /// Only the node (and edge) of the current visit.
    #[default]
    Current,
    /// Everything visited so far.
    Trail,
}

/// Configuration for turning an algorithm run into a paced sequence.
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Delay before each frame. `None` picks a per-algorithm default.
    pub interval: Option<Duration>,

    /// Highlight contents per frame.
    pub mode: HighlightMode,

    /// Whether shortest-path sequences end with a frame showing the path.
    pub show_path: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            interval: None,
            mode: HighlightMode::Current,
            show_path: true,
        }
    }
}

impl PlaybackConfig {
    /// Set a fixed interval for every algorithm.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Set the highlight mode.
    #[must_use]
    pub fn with_mode(mut self, mode: HighlightMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable the final path frame.
    #[must_use]
    pub fn with_path(mut self, show_path: bool) -> Self {
        self.show_path = show_path;
        self
    }

    /// Interval to use for `algorithm`.
    pub fn interval_for(&self, algorithm: Algorithm) -> Duration {
        self.interval.unwrap_or(match algorithm {
            Algorithm::Dijkstra => SHORTEST_PATH_INTERVAL,
            _ => TRAVERSAL_INTERVAL,
        })
    }
}
