//! Core types for playback sequencing

use serde::{Deserialize, Serialize};

/// Playback state as seen by the player host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track loaded
    #[default]
    Stopped,

    /// Waiting for a stream URL or for audio output to load it
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// No repeat requested (the queue still wraps when a track ends)
    #[default]
    None,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode for a single repeat toggle: None -> All -> One -> None
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::None => Self::All,
            Self::All => Self::One,
            Self::One => Self::None,
        }
    }
}

/// What the host should do after a track finishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cue {
    /// Replay the current track from position zero
    Replay,

    /// Play this track next
    Play(cadence_core::Track),

    /// Nothing to play
    Idle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_cycles_through_all_modes() {
        assert_eq!(RepeatMode::None.cycle(), RepeatMode::All);
        assert_eq!(RepeatMode::All.cycle(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycle(), RepeatMode::None);
    }

    #[test]
    fn defaults() {
        assert_eq!(RepeatMode::default(), RepeatMode::None);
        assert_eq!(PlaybackState::default(), PlaybackState::Stopped);
    }
}
