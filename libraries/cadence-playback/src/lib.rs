//! Cadence - Playback Sequencing
//!
//! Decides which track plays next. This crate provides:
//! - The [`Sequencer`]: queue advance/retreat with anchored shuffle and
//!   repeat modes (None, All, One)
//! - Pure [`SequencerState`] transitions driven by an injected RNG
//! - [`PlayerController`]: the host around the sequencer, with volume,
//!   seek, the 3-second "previous restarts" rule and stale-event filtering
//!
//! # Architecture
//!
//! `cadence-playback` does no I/O. It never touches the network or an audio
//! device; audio output is driven through the [`AudioCommand`]s the
//! controller returns and reports back through [`AudioEvent`]s.
//!
//! # Example: Sequencing
//!
//! ```rust
//! use cadence_core::Track;
//! use cadence_playback::{RepeatMode, Sequencer};
//! use std::sync::Arc;
//!
//! let queue: Arc<[Track]> = vec![
//!     Track::new("a", "First", "Artist"),
//!     Track::new("b", "Second", "Artist"),
//! ]
//! .into();
//!
//! let mut sequencer = Sequencer::seeded(7);
//! sequencer.play_track(queue[1].clone(), Some(queue));
//! sequencer.set_repeat_mode(RepeatMode::All);
//!
//! // Wraps back to the first track
//! assert_eq!(sequencer.advance().map(|t| t.id.as_str()), Some("a"));
//! ```
//!
//! # Example: Driving audio output
//!
//! ```rust
//! use cadence_core::Track;
//! use cadence_playback::{AudioCommand, AudioEvent, PlayerController};
//!
//! let mut player = PlayerController::new();
//! let track = Track::new("a", "First", "Artist").with_stream_url("https://cdn.example/a.mp4");
//!
//! if let Some(AudioCommand::Load { playback_id, url, .. }) = player.play_track(track, None) {
//!     // hand `url` to the audio engine, then forward its callbacks
//!     assert_eq!(url, "https://cdn.example/a.mp4");
//!     player.handle_event(playback_id, AudioEvent::Started);
//! }
//! ```

mod controller;
mod events;
mod sequencer;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use controller::{AudioCommand, PlayerController, RESTART_THRESHOLD};
pub use events::{AudioEvent, PlaybackId};
pub use sequencer::{Sequencer, SequencerState};
pub use shuffle::generate_shuffled_indices;
pub use types::{Cue, PlaybackState, RepeatMode};
pub use volume::{Volume, DEFAULT_VOLUME};
