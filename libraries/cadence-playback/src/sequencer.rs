//! Queue traversal with shuffle and repeat
//!
//! [`SequencerState`] is an immutable snapshot: every transition takes
//! `&self` plus an injected RNG and returns the next state, so traversal is
//! deterministic under a seeded generator. [`Sequencer`] owns a state and an
//! RNG for callers that just want to mutate in place.
//!
//! Invalid input never errors. An empty queue makes navigation a no-op and a
//! track missing from its playlist leaves `current_index` at `None`.

use crate::shuffle::generate_shuffled_indices;
use crate::types::{Cue, RepeatMode};
use cadence_core::Track;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::borrow::Cow;
use std::sync::Arc;

/// Traversal state for one listening session
#[derive(Debug, Clone)]
pub struct SequencerState {
    /// Playlist governing traversal; empty means "no active playlist"
    queue: Arc<[Track]>,

    /// Track handed to audio output
    current_track: Option<Track>,

    /// Position of the current track in `queue`
    current_index: Option<usize>,

    shuffle_enabled: bool,

    /// Permutation of queue indices, empty while shuffle is off
    shuffle_order: Vec<usize>,

    repeat_mode: RepeatMode,
}

impl Default for SequencerState {
    fn default() -> Self {
        Self::new()
    }
}

impl SequencerState {
    /// Empty session state
    pub fn new() -> Self {
        Self {
            queue: Arc::from(Vec::new()),
            current_track: None,
            current_index: None,
            shuffle_enabled: false,
            shuffle_order: Vec::new(),
            repeat_mode: RepeatMode::None,
        }
    }

    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn is_shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    pub fn shuffle_order(&self) -> &[usize] {
        &self.shuffle_order
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    /// Play `track`, optionally switching to the playlist that contains it
    ///
    /// With a playlist the queue is replaced and `current_index` becomes the
    /// first position whose id matches `track`. When shuffle is on the order
    /// is rebuilt anchored at that position.
    #[must_use]
    pub fn play_track<R: Rng + ?Sized>(
        &self,
        track: Track,
        playlist: Option<Arc<[Track]>>,
        rng: &mut R,
    ) -> Self {
        let mut next = self.clone();

        if let Some(queue) = playlist {
            next.current_index = queue.iter().position(|t| t.id == track.id);
            next.queue = queue;
            if next.shuffle_enabled {
                next.shuffle_order =
                    generate_shuffled_indices(next.queue.len(), next.current_index, rng);
            }
        }

        next.current_track = Some(track);
        next
    }

    /// Move to the next track in traversal order
    #[must_use]
    pub fn advance<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let len = self.queue.len();
        if len == 0 {
            return self.clone();
        }

        let target = if self.shuffle_enabled {
            self.next_shuffled(rng)
        } else {
            self.current_index.map_or(0, |i| (i + 1) % len)
        };

        self.jump_to(target, rng)
    }

    /// Move to the previous track in traversal order
    #[must_use]
    pub fn retreat<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let len = self.queue.len();
        if len == 0 {
            return self.clone();
        }

        let target = if self.shuffle_enabled {
            self.previous_shuffled(rng)
        } else {
            match self.current_index {
                Some(i) if i > 0 && i < len => i - 1,
                _ => len - 1,
            }
        };

        self.jump_to(target, rng)
    }

    /// Flip shuffle; turning it on anchors the new order at the current track
    #[must_use]
    pub fn toggle_shuffle<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut next = self.clone();
        next.shuffle_enabled = !self.shuffle_enabled;
        next.shuffle_order = if next.shuffle_enabled {
            generate_shuffled_indices(self.queue.len(), self.current_index, rng)
        } else {
            Vec::new()
        };
        next
    }

    #[must_use]
    pub fn with_repeat_mode(&self, mode: RepeatMode) -> Self {
        let mut next = self.clone();
        next.repeat_mode = mode;
        next
    }

    /// Single-button repeat toggle: None -> All -> One -> None
    #[must_use]
    pub fn cycle_repeat_mode(&self) -> Self {
        self.with_repeat_mode(self.repeat_mode.cycle())
    }

    /// React to audio output finishing the current track
    ///
    /// Repeat-one keeps the state and asks for a replay. Every other mode
    /// advances, so the last track of a queue wraps to the first even under
    /// [`RepeatMode::None`].
    #[must_use]
    pub fn on_track_ended<R: Rng + ?Sized>(&self, rng: &mut R) -> (Self, Cue) {
        if self.repeat_mode == RepeatMode::One {
            let cue = if self.current_track.is_some() {
                Cue::Replay
            } else {
                Cue::Idle
            };
            return (self.clone(), cue);
        }

        if self.queue.is_empty() {
            return (self.clone(), Cue::Idle);
        }

        let next = self.advance(rng);
        let cue = next
            .current_track
            .clone()
            .map_or(Cue::Idle, Cue::Play);
        (next, cue)
    }

    /// Play `queue[index]` within the current queue
    ///
    /// Behaves like replaying the track from its playlist: a rebuilt shuffle
    /// order is anchored at the first position with the same id, while
    /// `current_index` stays on `index`. With duplicate ids the two differ.
    fn jump_to<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Self {
        let mut next = self.clone();
        next.current_track = self.queue.get(index).cloned();
        next.current_index = Some(index);
        if next.shuffle_enabled {
            let anchor = next
                .current_track
                .as_ref()
                .and_then(|track| self.queue.iter().position(|t| t.id == track.id));
            next.shuffle_order = generate_shuffled_indices(self.queue.len(), anchor, rng);
        }
        next
    }

    /// The order to traverse, rebuilt if it no longer matches the queue
    fn traversal_order<R: Rng + ?Sized>(&self, rng: &mut R) -> Cow<'_, [usize]> {
        if self.shuffle_order.len() == self.queue.len() {
            Cow::Borrowed(&self.shuffle_order)
        } else {
            Cow::Owned(generate_shuffled_indices(
                self.queue.len(),
                self.current_index,
                rng,
            ))
        }
    }

    fn position_in(&self, order: &[usize]) -> Option<usize> {
        let current = self.current_index?;
        order.iter().position(|&i| i == current)
    }

    fn next_shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let order = self.traversal_order(rng);
        let first = order.first().copied().unwrap_or(0);

        match self.position_in(&order) {
            Some(pos) if pos + 1 < order.len() => order[pos + 1],
            Some(_) => {
                // Cycle exhausted: reseed from the old order's anchor, not
                // from the track that just finished.
                let fresh = generate_shuffled_indices(self.queue.len(), Some(first), rng);
                fresh.get(1).or_else(|| fresh.first()).copied().unwrap_or(first)
            }
            None => first,
        }
    }

    fn previous_shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let order = self.traversal_order(rng);
        let last = order.last().copied().unwrap_or(0);

        match self.position_in(&order) {
            Some(pos) if pos > 0 => order[pos - 1],
            _ => last,
        }
    }
}

/// A [`SequencerState`] paired with the RNG that drives its shuffles
#[derive(Debug)]
pub struct Sequencer<R = StdRng> {
    state: SequencerState,
    rng: R,
}

impl Sequencer<StdRng> {
    /// Sequencer seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Sequencer with a reproducible shuffle sequence
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Sequencer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Sequencer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            state: SequencerState::new(),
            rng,
        }
    }

    /// Current snapshot
    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_track()
    }

    pub fn play_track(&mut self, track: Track, playlist: Option<Arc<[Track]>>) -> Option<&Track> {
        self.state = self.state.play_track(track, playlist, &mut self.rng);
        self.state.current_track()
    }

    pub fn advance(&mut self) -> Option<&Track> {
        self.state = self.state.advance(&mut self.rng);
        self.state.current_track()
    }

    pub fn retreat(&mut self) -> Option<&Track> {
        self.state = self.state.retreat(&mut self.rng);
        self.state.current_track()
    }

    /// Returns whether shuffle is now on
    pub fn toggle_shuffle(&mut self) -> bool {
        self.state = self.state.toggle_shuffle(&mut self.rng);
        self.state.is_shuffle_enabled()
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.state = self.state.with_repeat_mode(mode);
    }

    /// Returns the new mode
    pub fn cycle_repeat_mode(&mut self) -> RepeatMode {
        self.state = self.state.cycle_repeat_mode();
        self.state.repeat_mode()
    }

    pub fn on_track_ended(&mut self) -> Cue {
        let (state, cue) = self.state.on_track_ended(&mut self.rng);
        self.state = state;
        cue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(ids: &[&str]) -> Arc<[Track]> {
        ids.iter()
            .map(|id| Track::new(*id, format!("Song {}", id), "Artist"))
            .collect::<Vec<_>>()
            .into()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn playing(ids: &[&str], at: usize) -> SequencerState {
        let q = queue(ids);
        let track = q[at].clone();
        SequencerState::new().play_track(track, Some(q), &mut rng())
    }

    #[test]
    fn play_track_with_playlist_sets_index() {
        let state = playing(&["a", "b", "c"], 1);
        assert_eq!(state.current_index(), Some(1));
        assert_eq!(state.current_track().unwrap().id.as_str(), "b");
        assert_eq!(state.queue().len(), 3);
    }

    #[test]
    fn play_track_not_in_playlist_leaves_index_empty() {
        let state = SequencerState::new().play_track(
            Track::new("zzz", "Elsewhere", "Nobody"),
            Some(queue(&["a", "b"])),
            &mut rng(),
        );
        assert_eq!(state.current_index(), None);
        assert_eq!(state.current_track().unwrap().id.as_str(), "zzz");
    }

    #[test]
    fn play_track_without_playlist_keeps_queue() {
        let state = playing(&["a", "b", "c"], 2);
        let state = state.play_track(Track::new("x", "Single", "Solo"), None, &mut rng());

        assert_eq!(state.queue().len(), 3);
        assert_eq!(state.current_index(), Some(2));
        assert_eq!(state.current_track().unwrap().id.as_str(), "x");
    }

    #[test]
    fn play_track_uses_first_duplicate() {
        let state = playing(&["a", "b", "a"], 2);
        assert_eq!(state.current_index(), Some(0));
    }

    #[test]
    fn advance_wraps_at_end() {
        let state = playing(&["a", "b", "c"], 2).advance(&mut rng());
        assert_eq!(state.current_index(), Some(0));
        assert_eq!(state.current_track().unwrap().id.as_str(), "a");
    }

    #[test]
    fn advance_from_missing_index_starts_at_zero() {
        let state = SequencerState::new().play_track(
            Track::new("zzz", "Elsewhere", "Nobody"),
            Some(queue(&["a", "b"])),
            &mut rng(),
        );
        assert_eq!(state.advance(&mut rng()).current_index(), Some(0));
    }

    #[test]
    fn retreat_wraps_at_start() {
        let state = playing(&["a", "b", "c"], 0).retreat(&mut rng());
        assert_eq!(state.current_index(), Some(2));
    }

    #[test]
    fn navigation_on_empty_queue_is_noop() {
        let state = SequencerState::new();
        assert!(state.advance(&mut rng()).current_track().is_none());
        assert!(state.retreat(&mut rng()).current_index().is_none());

        let single = state.play_track(Track::new("x", "Single", "Solo"), None, &mut rng());
        let after = single.advance(&mut rng());
        assert_eq!(after.current_track().unwrap().id.as_str(), "x");
        assert_eq!(after.current_index(), None);
    }

    #[test]
    fn toggle_shuffle_anchors_current_track() {
        let state = playing(&["a", "b", "c", "d", "e"], 3);
        let shuffled = state.toggle_shuffle(&mut rng());

        assert!(shuffled.is_shuffle_enabled());
        assert_eq!(shuffled.shuffle_order()[0], 3);
        assert_eq!(shuffled.shuffle_order().len(), 5);
        assert_eq!(shuffled.current_track(), state.current_track());
    }

    #[test]
    fn toggle_shuffle_off_clears_order() {
        let state = playing(&["a", "b", "c"], 0)
            .toggle_shuffle(&mut rng())
            .toggle_shuffle(&mut rng());
        assert!(!state.is_shuffle_enabled());
        assert!(state.shuffle_order().is_empty());
    }

    #[test]
    fn shuffle_advance_takes_next_order_entry() {
        let state = playing(&["a", "b", "c", "d"], 1).toggle_shuffle(&mut rng());
        let expected = state.shuffle_order()[1];

        let next = state.advance(&mut rng());
        assert_eq!(next.current_index(), Some(expected));
        assert_eq!(next.shuffle_order()[0], expected);
    }

    #[test]
    fn shuffle_retreat_from_anchor_takes_last_entry() {
        let state = playing(&["a", "b", "c", "d"], 1).toggle_shuffle(&mut rng());
        let expected = *state.shuffle_order().last().unwrap();

        let prev = state.retreat(&mut rng());
        assert_eq!(prev.current_index(), Some(expected));
    }

    #[test]
    fn shuffle_single_track_stays_put() {
        let state = playing(&["only"], 0).toggle_shuffle(&mut rng());
        let next = state.advance(&mut rng());
        assert_eq!(next.current_index(), Some(0));
        assert_eq!(next.shuffle_order(), &[0]);
    }

    fn shuffled(ids: &[&str], at: usize, order: Vec<usize>) -> SequencerState {
        let q = queue(ids);
        SequencerState {
            current_track: Some(q[at].clone()),
            current_index: Some(at),
            shuffle_enabled: true,
            shuffle_order: order,
            queue: q,
            repeat_mode: RepeatMode::None,
        }
    }

    #[test]
    fn shuffle_advance_onto_duplicate_anchors_first_match() {
        let state = shuffled(&["a", "b", "a"], 1, vec![1, 2, 0]);
        let next = state.advance(&mut rng());

        assert_eq!(next.current_index(), Some(2));
        assert_eq!(next.current_track().unwrap().id.as_str(), "a");
        assert_eq!(next.shuffle_order()[0], 0);
        assert_eq!(next.shuffle_order().len(), 3);
    }

    #[test]
    fn shuffle_retreat_onto_duplicate_anchors_first_match() {
        let state = shuffled(&["a", "b", "a"], 1, vec![1, 0, 2]);
        let prev = state.retreat(&mut rng());

        assert_eq!(prev.current_index(), Some(2));
        assert_eq!(prev.shuffle_order()[0], 0);
    }

    #[test]
    fn exhausted_shuffle_cycle_reseeds_from_old_anchor() {
        // Index 3 repeats the id at 0, so it can sit last in an order
        // anchored at 0.
        let state = shuffled(&["a", "b", "c", "a"], 3, vec![0, 2, 1, 3]);

        let seed = 17;
        let fresh = generate_shuffled_indices(4, Some(0), &mut StdRng::seed_from_u64(seed));
        let next = state.advance(&mut StdRng::seed_from_u64(seed));

        assert_eq!(next.current_index(), Some(fresh[1]));
        assert_ne!(next.current_index(), Some(0));
        assert_eq!(next.shuffle_order().len(), 4);
    }

    #[test]
    fn exhausted_cycle_on_track_end_plays_reseeded_entry() {
        let state = shuffled(&["x", "y", "x"], 2, vec![0, 1, 2]);

        let seed = 5;
        let fresh = generate_shuffled_indices(3, Some(0), &mut StdRng::seed_from_u64(seed));
        let (next, cue) = state.on_track_ended(&mut StdRng::seed_from_u64(seed));

        assert_eq!(next.current_index(), Some(fresh[1]));
        assert_eq!(cue, Cue::Play(state.queue()[fresh[1]].clone()));
    }

    #[test]
    fn shuffle_enabled_before_queue_builds_order_on_play() {
        let state = SequencerState::new().toggle_shuffle(&mut rng());
        assert!(state.shuffle_order().is_empty());

        let q = queue(&["a", "b", "c"]);
        let state = state.play_track(q[2].clone(), Some(q), &mut rng());
        assert_eq!(state.shuffle_order().len(), 3);
        assert_eq!(state.shuffle_order()[0], 2);
    }

    #[test]
    fn repeat_one_replays_without_moving() {
        let state = playing(&["a", "b"], 0).with_repeat_mode(RepeatMode::One);
        let (after, cue) = state.on_track_ended(&mut rng());

        assert_eq!(cue, Cue::Replay);
        assert_eq!(after.current_index(), Some(0));
    }

    #[test]
    fn track_end_without_repeat_still_wraps() {
        let state = playing(&["a", "b", "c"], 2);
        let (after, cue) = state.on_track_ended(&mut rng());

        assert_eq!(after.current_index(), Some(0));
        assert_eq!(cue, Cue::Play(Track::new("a", "Song a", "Artist")));
    }

    #[test]
    fn track_end_with_nothing_queued_is_idle() {
        let (_, cue) = SequencerState::new().on_track_ended(&mut rng());
        assert_eq!(cue, Cue::Idle);

        let (_, cue) = SequencerState::new()
            .with_repeat_mode(RepeatMode::One)
            .on_track_ended(&mut rng());
        assert_eq!(cue, Cue::Idle);
    }

    #[test]
    fn repeat_mode_does_not_touch_traversal() {
        let state = playing(&["a", "b"], 1).cycle_repeat_mode();
        assert_eq!(state.repeat_mode(), RepeatMode::All);
        assert_eq!(state.current_index(), Some(1));
    }

    #[test]
    fn sequencer_wrapper_mutates_in_place() {
        let mut sequencer = Sequencer::seeded(1);
        let q = queue(&["a", "b", "c"]);

        sequencer.play_track(q[0].clone(), Some(q));
        assert_eq!(sequencer.advance().unwrap().id.as_str(), "b");
        assert_eq!(sequencer.retreat().unwrap().id.as_str(), "a");
        assert!(sequencer.toggle_shuffle());
        assert_eq!(sequencer.cycle_repeat_mode(), RepeatMode::All);
    }
}
