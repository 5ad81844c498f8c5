//! Volume control
//!
//! Level is a 0-100 percentage. Audio output receives it as a linear
//! 0.0-1.0 value, which is what browser and streaming audio engines expect.

/// Default level, half volume
pub const DEFAULT_VOLUME: u8 = 50;

/// Volume with a mute that remembers the previous level
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller, clamping `level` to 100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set volume level (0-100)
    ///
    /// Moving the level unmutes, like dragging a volume slider.
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
        self.muted = false;
    }

    /// Set the level from a linear 0.0-1.0 value
    pub fn set_output_level(&mut self, value: f32) {
        let value = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 };
        self.set_level((value * 100.0).round() as u8);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state, returning whether audio is now muted
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Linear value for audio output: 0.0 when muted or at level 0
    pub fn output_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            f32::from(self.level) / 100.0
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}
