//! Vote dialog state: one slider per direction and the active mode.

use crate::config::DialogConfig;
use crate::error::{ControllerError, Result};
use crate::preferences::{VoteDirection, VotePreferences};

/// Upvote slider bounds.
pub const UP_RANGE: (f64, f64) = (0.0, 100.0);

/// Downvote slider bounds; a downvote is never zero.
pub const DOWN_RANGE: (f64, f64) = (-100.0, -0.1);

/// Slider positions per percent (0.1% resolution).
pub const SLIDER_STEPS_PER_PERCENT: f64 = 10.0;

/// Open vote dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteDialog {
    mode: VoteDirection,
    up_value: f64,
    down_value: f64,
}

impl VoteDialog {
    /// Dialog in upvote mode with the given slider values (snapped to range).
    pub fn new(up_value: f64, down_value: f64) -> Self {
        Self {
            mode: VoteDirection::Up,
            up_value: snap(VoteDirection::Up, up_value),
            down_value: snap(VoteDirection::Down, down_value),
        }
    }

    /// Dialog restored from `username`'s stored slider values.
    pub fn load(preferences: &VotePreferences, username: &str, config: &DialogConfig) -> Self {
        Self::new(
            preferences.get_vote_value(VoteDirection::Up, username, config.default_up_value),
            preferences.get_vote_value(VoteDirection::Down, username, config.default_down_value),
        )
    }

    /// Active direction.
    pub fn mode(&self) -> VoteDirection {
        self.mode
    }

    /// Switch the active slider.
    pub fn change_mode(&mut self, mode: VoteDirection) {
        self.mode = mode;
    }

    pub fn up_value(&self) -> f64 {
        self.up_value
    }

    pub fn down_value(&self) -> f64 {
        self.down_value
    }

    /// Value of the active slider; this is what confirming submits.
    pub fn selected_percent(&self) -> f64 {
        match self.mode {
            VoteDirection::Up => self.up_value,
            VoteDirection::Down => self.down_value,
        }
    }

    /// Move the active slider, returning the value actually stored.
    pub fn set_value(&mut self, percent: f64) -> Result<f64> {
        if !percent.is_finite() {
            return Err(ControllerError::InvalidPercent(percent));
        }

        let value = snap(self.mode, percent);
        match self.mode {
            VoteDirection::Up => self.up_value = value,
            VoteDirection::Down => self.down_value = value,
        }
        Ok(value)
    }
}

/// Round to slider resolution and clamp into the direction's range.
fn snap(direction: VoteDirection, value: f64) -> f64 {
    let (min, max) = match direction {
        VoteDirection::Up => UP_RANGE,
        VoteDirection::Down => DOWN_RANGE,
    };
    if !value.is_finite() {
        return match direction {
            VoteDirection::Up => max,
            VoteDirection::Down => min,
        };
    }
    ((value * SLIDER_STEPS_PER_PERCENT).round() / SLIDER_STEPS_PER_PERCENT).clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryPreferenceStore;
    use std::sync::Arc;

    #[test]
    fn test_defaults_without_preferences() {
        let prefs = VotePreferences::new(Arc::new(MemoryPreferenceStore::new()));
        let dialog = VoteDialog::load(&prefs, "alice", &DialogConfig::default());

        assert_eq!(dialog.mode(), VoteDirection::Up);
        assert_eq!(dialog.up_value(), 100.0);
        assert_eq!(dialog.down_value(), -100.0);
        assert_eq!(dialog.selected_percent(), 100.0);
    }

    #[test]
    fn test_loads_stored_values() {
        let prefs = VotePreferences::new(Arc::new(MemoryPreferenceStore::new()));
        prefs.set_vote_value(VoteDirection::Up, "alice", 25.0);
        prefs.set_vote_value(VoteDirection::Down, "alice", -12.5);

        let dialog = VoteDialog::load(&prefs, "alice", &DialogConfig::default());
        assert_eq!(dialog.up_value(), 25.0);
        assert_eq!(dialog.down_value(), -12.5);
    }

    #[test]
    fn test_mode_selects_slider() {
        let mut dialog = VoteDialog::new(40.0, -60.0);
        assert_eq!(dialog.selected_percent(), 40.0);

        dialog.change_mode(VoteDirection::Down);
        assert_eq!(dialog.selected_percent(), -60.0);
    }

    #[test]
    fn test_set_value_clamps_to_mode_range() {
        let mut dialog = VoteDialog::new(100.0, -100.0);

        assert_eq!(dialog.set_value(150.0).unwrap(), 100.0);
        assert_eq!(dialog.set_value(-20.0).unwrap(), 0.0);
        assert_eq!(dialog.set_value(12.5).unwrap(), 12.5);

        dialog.change_mode(VoteDirection::Down);
        assert_eq!(dialog.set_value(0.0).unwrap(), -0.1);
        assert_eq!(dialog.set_value(-250.0).unwrap(), -100.0);

        assert_eq!(dialog.up_value(), 12.5);
        assert_eq!(dialog.down_value(), -100.0);
    }

    #[test]
    fn test_set_value_rounds_to_step() {
        let mut dialog = VoteDialog::new(100.0, -100.0);
        assert_eq!(dialog.set_value(33.333).unwrap(), 33.3);
        assert_eq!(dialog.set_value(0.04).unwrap(), 0.0);
    }

    #[test]
    fn test_rejects_nan() {
        let mut dialog = VoteDialog::new(100.0, -100.0);
        assert!(matches!(
            dialog.set_value(f64::NAN),
            Err(ControllerError::InvalidPercent(_))
        ));
        assert_eq!(dialog.up_value(), 100.0);
    }
}
