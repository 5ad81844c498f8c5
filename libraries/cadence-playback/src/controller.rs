//! Player host
//!
//! [`PlayerController`] sits between the UI and audio output. It owns the
//! [`Sequencer`], the volume and the playback status, and turns user actions
//! and audio events into [`AudioCommand`]s. It performs no I/O: the host
//! executes the returned commands against its audio engine and asks the
//! catalog for stream URLs when told to `Resolve`.

use crate::events::{AudioEvent, PlaybackId};
use crate::sequencer::Sequencer;
use crate::types::{Cue, PlaybackState, RepeatMode};
use crate::volume::Volume;
use cadence_core::{Track, TrackId};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Past this position "previous" restarts the current track instead
pub const RESTART_THRESHOLD: Duration = Duration::from_secs(3);

/// Instructions for audio output
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    /// Unload whatever is playing and start `url` from zero
    Load {
        playback_id: PlaybackId,
        url: String,
        volume: f32,
    },

    /// The track has no stream URL yet; look it up and report back through
    /// [`PlayerController::url_resolved`]
    Resolve {
        playback_id: PlaybackId,
        track_id: TrackId,
    },

    /// Play the loaded track again from zero
    Restart,

    Pause,

    Resume,

    Seek(Duration),

    /// Linear 0.0-1.0 output level
    SetVolume(f32),

    /// Stop and unload
    Stop,
}

/// Player state machine around a [`Sequencer`]
#[derive(Debug)]
pub struct PlayerController<R = StdRng> {
    sequencer: Sequencer<R>,
    volume: Volume,
    state: PlaybackState,
    playback_id: PlaybackId,
    duration: Option<Duration>,
}

impl PlayerController<StdRng> {
    pub fn new() -> Self {
        Self::with_sequencer(Sequencer::new())
    }
}

impl Default for PlayerController<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PlayerController<R> {
    pub fn with_sequencer(sequencer: Sequencer<R>) -> Self {
        Self {
            sequencer,
            volume: Volume::default(),
            state: PlaybackState::Stopped,
            playback_id: PlaybackId::new(0),
            duration: None,
        }
    }

    pub fn sequencer(&self) -> &Sequencer<R> {
        &self.sequencer
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.sequencer.current_track()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Id of the playback instance events are currently accepted from
    pub fn playback_id(&self) -> PlaybackId {
        self.playback_id
    }

    /// Length reported by audio output for the current track
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    // ===== Navigation =====

    pub fn play_track(&mut self, track: Track, playlist: Option<Arc<[Track]>>) -> Option<AudioCommand> {
        self.sequencer.play_track(track, playlist);
        self.cue_current()
    }

    pub fn next(&mut self) -> Option<AudioCommand> {
        if self.sequencer.state().queue().is_empty() {
            return None;
        }
        self.sequencer.advance();
        self.cue_current()
    }

    /// Go back, or restart the current track when past [`RESTART_THRESHOLD`]
    pub fn previous(&mut self, position: Duration) -> Option<AudioCommand> {
        if self.current_track().is_some() && position > RESTART_THRESHOLD {
            return Some(AudioCommand::Seek(Duration::ZERO));
        }
        if self.sequencer.state().queue().is_empty() {
            return None;
        }
        self.sequencer.retreat();
        self.cue_current()
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.sequencer.toggle_shuffle()
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.sequencer.set_repeat_mode(mode);
    }

    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.sequencer.cycle_repeat_mode()
    }

    // ===== Transport =====

    pub fn pause(&mut self) -> Option<AudioCommand> {
        match self.state {
            PlaybackState::Playing | PlaybackState::Loading => {
                self.state = PlaybackState::Paused;
                Some(AudioCommand::Pause)
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<AudioCommand> {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
            Some(AudioCommand::Resume)
        } else {
            None
        }
    }

    /// Play/pause button
    pub fn toggle_play(&mut self) -> Option<AudioCommand> {
        match self.state {
            PlaybackState::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    /// Seek within the current track, clamped to its known duration
    pub fn seek(&mut self, position: Duration) -> Option<AudioCommand> {
        self.current_track()?;
        let position = match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        };
        Some(AudioCommand::Seek(position))
    }

    /// Stop playback; events from the stopped sound are ignored afterwards
    pub fn stop(&mut self) -> AudioCommand {
        self.playback_id = self.playback_id.next();
        self.state = PlaybackState::Stopped;
        self.duration = None;
        AudioCommand::Stop
    }

    // ===== Volume =====

    pub fn set_volume(&mut self, level: u8) -> AudioCommand {
        self.volume.set_level(level);
        AudioCommand::SetVolume(self.volume.output_level())
    }

    pub fn toggle_mute(&mut self) -> AudioCommand {
        self.volume.toggle_mute();
        AudioCommand::SetVolume(self.volume.output_level())
    }

    // ===== Audio output callbacks =====

    /// Feed an audio event; events from superseded playbacks are dropped
    pub fn handle_event(&mut self, playback_id: PlaybackId, event: AudioEvent) -> Option<AudioCommand> {
        if playback_id != self.playback_id {
            debug!(
                stale = %playback_id,
                current = %self.playback_id,
                ?event,
                "Ignoring event from replaced playback"
            );
            return None;
        }

        match event {
            AudioEvent::Loaded { duration } => {
                self.duration = Some(duration);
                None
            }
            // Paused while still loading: output started anyway, hold it
            AudioEvent::Started if self.state == PlaybackState::Paused => {
                debug!(playback = %playback_id, "Output started after pause, pausing again");
                Some(AudioCommand::Pause)
            }
            AudioEvent::Started => {
                self.state = PlaybackState::Playing;
                None
            }
            AudioEvent::Paused => {
                self.state = PlaybackState::Paused;
                None
            }
            AudioEvent::Stopped => {
                self.state = PlaybackState::Stopped;
                None
            }
            AudioEvent::Ended => self.track_ended(),
        }
    }

    /// Stream URL lookup finished for a `Resolve` command
    pub fn url_resolved(&mut self, playback_id: PlaybackId, url: impl Into<String>) -> Option<AudioCommand> {
        if playback_id != self.playback_id {
            debug!(stale = %playback_id, "Ignoring URL for replaced playback");
            return None;
        }
        Some(AudioCommand::Load {
            playback_id,
            url: url.into(),
            volume: self.volume.output_level(),
        })
    }

    /// Stream URL lookup failed; nothing can be played
    pub fn resolve_failed(&mut self, playback_id: PlaybackId) {
        if playback_id == self.playback_id {
            warn!(
                track = ?self.current_track().map(|t| t.id.as_str()),
                "No playable stream for track"
            );
            self.state = PlaybackState::Stopped;
        }
    }

    fn track_ended(&mut self) -> Option<AudioCommand> {
        let index_before = self.sequencer.state().current_index();

        match self.sequencer.on_track_ended() {
            Cue::Replay => {
                self.state = PlaybackState::Playing;
                Some(AudioCommand::Restart)
            }
            Cue::Play(_) if self.sequencer.state().current_index() == index_before => {
                // Single-track queue: the next track is the one just finished
                self.state = PlaybackState::Playing;
                Some(AudioCommand::Restart)
            }
            Cue::Play(_) => self.cue_current(),
            Cue::Idle => {
                self.state = PlaybackState::Stopped;
                None
            }
        }
    }

    /// Start a new playback of the sequencer's current track
    fn cue_current(&mut self) -> Option<AudioCommand> {
        let track = self.sequencer.current_track()?.clone();

        self.playback_id = self.playback_id.next();
        self.duration = None;
        self.state = PlaybackState::Loading;

        let command = match track.stream_url.filter(|url| !url.is_empty()) {
            Some(url) => AudioCommand::Load {
                playback_id: self.playback_id,
                url,
                volume: self.volume.output_level(),
            },
            None => AudioCommand::Resolve {
                playback_id: self.playback_id,
                track_id: track.id,
            },
        };
        Some(command)
    }
}
