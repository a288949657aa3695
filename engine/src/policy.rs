use std::f64::consts::FRAC_PI_2;
use std::ops::{Range, RangeInclusive};

use crate::easing::Easing;

/// Pointer direction in the wheel's angle convention: straight up.
pub const POINTER_ANGLE: f64 = FRAC_PI_2;
pub const MIN_EXTRA_SPINS: u32 = 4;
pub const MAX_EXTRA_SPINS: u32 = 6;
pub const MIN_SPIN_DURATION_MS: f64 = 3400.0;
pub const MAX_SPIN_DURATION_MS: f64 = 4200.0;

/// Fixed policy of the engine. `Default` gives the production values;
/// tests swap in shorter durations or other curves.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinPolicy {
    pub pointer_angle: f64,
    pub extra_spins: RangeInclusive<u32>,
    pub duration_ms: Range<f64>,
    pub easing: Easing,
}

impl SpinPolicy {
    /// Same policy with a different duration window, in milliseconds.
    pub fn with_duration_ms(mut self, duration_ms: Range<f64>) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

impl Default for SpinPolicy {
    fn default() -> Self {
        Self {
            pointer_angle: POINTER_ANGLE,
            extra_spins: MIN_EXTRA_SPINS..=MAX_EXTRA_SPINS,
            duration_ms: MIN_SPIN_DURATION_MS..MAX_SPIN_DURATION_MS,
            easing: Easing::EASE_OUT_CUBIC,
        }
    }
}
