//! Audio lifecycle events
//!
//! The host adapts its audio engine's native callbacks into [`AudioEvent`]s
//! and hands them to the player together with the [`PlaybackId`] of the
//! sound that produced them. Events carrying an outdated id are dropped, so a
//! late `Ended` from a sound that was already replaced cannot skip a track.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identity of one load of one track into audio output
///
/// A fresh id is issued whenever a track is (re)loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaybackId(u64);

impl PlaybackId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for PlaybackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Events reported by audio output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AudioEvent {
    /// Source decoded far enough to know its length
    Loaded {
        /// Total track length
        duration: Duration,
    },

    /// Audio started (or resumed) playing
    Started,

    /// Audio paused mid-track
    Paused,

    /// Reached the end of the track
    Ended,

    /// Audio stopped and unloaded
    Stopped,
}
