use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::error::SpinError;
use crate::partition::{slice_angle, TAU};
use crate::policy::SpinPolicy;
use crate::rotation::wrap_angle;

/// One planned spin: where it starts, where it stops and how long it takes.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinPlan {
    pub start_angle: f64,
    pub end_angle: f64,
    pub duration: Duration,
    pub target_slice: usize,
    pub extra_spins: u32,
}

/// Plans a spin from `current_rotation` onto a uniformly drawn slice.
///
/// Draws happen in a fixed order (extra spins, target slice, duration) so a
/// seeded generator always produces the same plan. The end angle is always
/// ahead of the start angle: the wheel never turns backwards.
pub fn plan_spin<R: Rng + ?Sized>(
    current_rotation: f64,
    slice_count: usize,
    policy: &SpinPolicy,
    rng: &mut R,
) -> Result<SpinPlan, SpinError> {
    let slice = slice_angle(slice_count)?;

    let extra_spins = if policy.extra_spins.is_empty() {
        *policy.extra_spins.start()
    } else {
        rng.random_range(policy.extra_spins.clone())
    };
    let target_slice = rng.random_range(0..slice_count);
    let duration_ms = if policy.duration_ms.is_empty() {
        policy.duration_ms.start
    } else {
        rng.random_range(policy.duration_ms.clone())
    };

    let slice_center = target_slice as f64 * slice + slice / 2.0;
    let alignment = wrap_angle(TAU - slice_center + policy.pointer_angle - current_rotation);
    let end_angle = current_rotation + TAU * extra_spins as f64 + alignment;

    let plan = SpinPlan {
        start_angle: current_rotation,
        end_angle,
        duration: Duration::from_secs_f64(duration_ms.max(0.0) / 1000.0),
        target_slice,
        extra_spins,
    };
    debug!(
        target_slice,
        extra_spins,
        start = plan.start_angle,
        end = plan.end_angle,
        duration_ms,
        "planned spin"
    );
    Ok(plan)
}
