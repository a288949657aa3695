use crate::partition::TAU;

/// Wraps any angle into `[0, 2π)`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Current wheel angle and whether a spin is in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RotationState {
    angle: f64,
    in_motion: bool,
}

impl RotationState {
    pub fn new(angle: f64) -> Self {
        Self {
            angle,
            in_motion: false,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn is_in_motion(&self) -> bool {
        self.in_motion
    }

    pub(crate) fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    pub(crate) fn set_in_motion(&mut self, in_motion: bool) {
        self.in_motion = in_motion;
    }

    /// Brings the angle back into `[0, 2π)` without changing the
    /// orientation of the wheel.
    pub fn normalize(&mut self) {
        self.angle = wrap_angle(self.angle);
    }

    /// Rewinds to zero. Has no effect while in motion; returns whether the
    /// reset happened.
    pub fn reset(&mut self) -> bool {
        if self.in_motion {
            return false;
        }
        self.angle = 0.0;
        true
    }
}
