//! Wheel state and the transitions that drive it.
//!
//! The state machine is Idle -> Spinning -> Idle. Every transition is a plain
//! function over [`WheelState`]; whoever owns the state decides when to call
//! [`tick`] (a frame timer, a test with a synthetic clock, ...).

use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use spin_wheel_shared::{SpinResult, WheelFrame};

use crate::error::SpinError;
use crate::partition::slices;
use crate::policy::SpinPolicy;
use crate::resolver::resolve_winner;
use crate::rotation::RotationState;
use crate::trajectory::{plan_spin, SpinPlan};

/// The spin currently being animated.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinSession {
    pub plan: SpinPlan,
    pub started_at: Instant,
}

impl SpinSession {
    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        let total = self.plan.duration.as_secs_f64();
        if total <= 0.0 {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at).as_secs_f64();
        (elapsed / total).min(1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No spin is active.
    Idle,
    /// The spin advanced; the wheel now sits at `rotation`.
    Frame { rotation: f64 },
    /// The spin just ended on this result.
    Finished(SpinResult),
}

#[derive(Debug, Clone, Default)]
pub struct WheelState {
    labels: Vec<String>,
    rotation: RotationState,
    session: Option<SpinSession>,
    last_result: Option<SpinResult>,
}

impl WheelState {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            ..Self::default()
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn session(&self) -> Option<&SpinSession> {
        self.session.as_ref()
    }

    pub fn last_result(&self) -> Option<&SpinResult> {
        self.last_result.as_ref()
    }

    pub fn is_spinning(&self) -> bool {
        self.rotation.is_in_motion()
    }

    pub fn frame(&self) -> WheelFrame {
        WheelFrame {
            labels: self.labels.clone(),
            rotation: self.rotation.angle(),
            spinning: self.is_spinning(),
            slices: slices(&self.labels, self.rotation.angle()),
        }
    }
}

/// Starts a spin at `now`. Rejected without touching the state when a spin
/// is already running or there is nothing to land on.
pub fn start_spin<R: Rng + ?Sized>(
    state: &mut WheelState,
    now: Instant,
    policy: &SpinPolicy,
    rng: &mut R,
) -> Result<SpinPlan, SpinError> {
    if state.is_spinning() {
        debug!("spin rejected, already spinning");
        return Err(SpinError::SpinAlreadyInProgress);
    }
    let plan = plan_spin(state.rotation.angle(), state.labels.len(), policy, rng)
        .inspect_err(|err| debug!(%err, "spin rejected"))?;

    state.rotation.set_in_motion(true);
    state.last_result = None;
    state.session = Some(SpinSession {
        plan: plan.clone(),
        started_at: now,
    });
    Ok(plan)
}

/// Advances the active spin to `now`.
pub fn tick(
    state: &mut WheelState,
    now: Instant,
    policy: &SpinPolicy,
) -> Result<TickOutcome, SpinError> {
    let Some(session) = &state.session else {
        return Ok(TickOutcome::Idle);
    };

    let t = session.progress(now);
    let eased = policy.easing.apply(t);
    let SpinPlan {
        start_angle,
        end_angle,
        ..
    } = session.plan;
    state
        .rotation
        .set_angle(start_angle + (end_angle - start_angle) * eased);

    if t < 1.0 {
        return Ok(TickOutcome::Frame {
            rotation: state.rotation.angle(),
        });
    }

    state.session = None;
    state.rotation.set_in_motion(false);
    state.rotation.normalize();

    let index = resolve_winner(
        state.rotation.angle(),
        state.labels.len(),
        policy.pointer_angle,
    )?;
    let label = state
        .labels
        .get(index)
        .cloned()
        .ok_or(SpinError::EmptyWheel)?;
    info!(index, label = %label, rotation = state.rotation.angle(), "spin finished");

    let result = SpinResult { index, label };
    state.last_result = Some(result.clone());
    Ok(TickOutcome::Finished(result))
}

/// Rewinds the wheel to zero. Ignored while spinning.
pub fn reset_rotation(state: &mut WheelState) -> bool {
    if !state.rotation.reset() {
        debug!("reset ignored while spinning");
        return false;
    }
    state.last_result = None;
    true
}

/// Swaps the option list. Ignored while spinning so the result always
/// refers to the list that was spun.
pub fn replace_labels(state: &mut WheelState, labels: Vec<String>) -> bool {
    if state.is_spinning() {
        debug!("label change ignored while spinning");
        return false;
    }
    state.labels = labels;
    state.last_result = None;
    true
}

pub(crate) fn labels_mut(state: &mut WheelState) -> Option<&mut Vec<String>> {
    if state.is_spinning() {
        return None;
    }
    state.last_result = None;
    Some(&mut state.labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::TAU;
    use crate::trajectory::plan_spin;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn abcd() -> WheelState {
        WheelState::new(["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect())
    }

    fn run_to_end(state: &mut WheelState, start: Instant, policy: &SpinPolicy) -> SpinResult {
        let mut now = start;
        loop {
            now += Duration::from_millis(16);
            match tick(state, now, policy).unwrap() {
                TickOutcome::Finished(result) => return result,
                TickOutcome::Frame { .. } => {}
                TickOutcome::Idle => panic!("spin vanished"),
            }
        }
    }

    #[test]
    fn empty_wheel_rejects_spin() {
        let mut state = WheelState::default();
        let mut rng = StdRng::seed_from_u64(0);
        let err = start_spin(&mut state, Instant::now(), &SpinPolicy::default(), &mut rng);
        assert_eq!(err, Err(SpinError::EmptyWheel));
        assert_eq!(state.rotation().angle(), 0.0);
        assert!(!state.is_spinning());
        assert!(state.session().is_none());
    }

    #[test]
    fn second_spin_is_rejected_without_effect() {
        let mut state = abcd();
        let policy = SpinPolicy::default();
        let mut rng = StdRng::seed_from_u64(5);
        let now = Instant::now();

        let plan = start_spin(&mut state, now, &policy, &mut rng).unwrap();
        let before = state.session().cloned();
        let err = start_spin(&mut state, now, &policy, &mut rng);

        assert_eq!(err, Err(SpinError::SpinAlreadyInProgress));
        assert_eq!(state.session().cloned(), before);
        assert_eq!(state.session().map(|s| &s.plan), Some(&plan));
    }

    #[test]
    fn reset_while_spinning_changes_nothing() {
        let mut state = abcd();
        let policy = SpinPolicy::default();
        let mut rng = StdRng::seed_from_u64(9);
        let start = Instant::now();
        start_spin(&mut state, start, &policy, &mut rng).unwrap();
        tick(&mut state, start + Duration::from_millis(500), &policy).unwrap();

        let angle = state.rotation().angle();
        assert!(!reset_rotation(&mut state));
        assert_eq!(state.rotation().angle(), angle);
        assert!(state.is_spinning());
    }

    #[test]
    fn rotation_never_goes_backwards() {
        let mut state = abcd();
        let policy = SpinPolicy::default();
        let mut rng = StdRng::seed_from_u64(11);
        let start = Instant::now();
        let plan = start_spin(&mut state, start, &policy, &mut rng).unwrap();

        let mut last = plan.start_angle;
        let mut now = start;
        loop {
            now += Duration::from_millis(7);
            match tick(&mut state, now, &policy).unwrap() {
                TickOutcome::Frame { rotation } => {
                    assert!(rotation >= last);
                    assert!(rotation <= plan.end_angle + 1e-9);
                    last = rotation;
                }
                TickOutcome::Finished(_) => break,
                TickOutcome::Idle => panic!("spin vanished"),
            }
        }
        assert!((plan.end_angle - last) < 1e-3);
    }

    #[test]
    fn finished_spin_is_idle_and_normalized() {
        let mut state = abcd();
        let policy = SpinPolicy::default();
        let mut rng = StdRng::seed_from_u64(21);
        let start = Instant::now();
        let plan = start_spin(&mut state, start, &policy, &mut rng).unwrap();
        let result = run_to_end(&mut state, start, &policy);

        assert_eq!(result.index, plan.target_slice);
        assert_eq!(result.label, state.labels()[plan.target_slice]);
        assert!(!state.is_spinning());
        assert!(state.session().is_none());
        assert!((0.0..TAU).contains(&state.rotation().angle()));
        assert_eq!(state.last_result(), Some(&result));

        let later = start + plan.duration + Duration::from_secs(1);
        assert_eq!(tick(&mut state, later, &policy), Ok(TickOutcome::Idle));
    }

    #[test]
    fn labels_are_locked_while_spinning() {
        let mut state = abcd();
        let policy = SpinPolicy::default();
        let mut rng = StdRng::seed_from_u64(2);
        start_spin(&mut state, Instant::now(), &policy, &mut rng).unwrap();

        assert!(!replace_labels(&mut state, vec!["X".into()]));
        assert_eq!(state.labels().len(), 4);
        assert!(labels_mut(&mut state).is_none());
    }

    #[test]
    fn seeded_spin_lands_on_c_from_any_start() {
        let policy = SpinPolicy::default();
        let seed = (0..10_000u64)
            .find(|&seed| {
                let plan = plan_spin(0.0, 4, &policy, &mut StdRng::seed_from_u64(seed)).unwrap();
                plan.target_slice == 2 && plan.extra_spins == 5
            })
            .expect("some seed draws slice 2 with 5 extra spins");

        for start_angle in [0.0, 0.7, 3.0, 12.5, -2.0, 1e4] {
            let mut state = abcd();
            state.rotation.set_angle(start_angle);
            let mut rng = StdRng::seed_from_u64(seed);
            let start = Instant::now();
            let plan = start_spin(&mut state, start, &policy, &mut rng).unwrap();
            assert_eq!((plan.target_slice, plan.extra_spins), (2, 5));

            let result = run_to_end(&mut state, start, &policy);
            assert_eq!(result.label, "C", "start angle {start_angle}");
            assert_eq!(result.index, 2);
        }
    }

    #[test]
    fn frame_carries_slice_layout() {
        let mut state = WheelState::new(vec!["A".into(), "an option with a long name".into()]);
        state.rotation.set_angle(0.5);
        let frame = state.frame();

        assert_eq!(frame.slices.len(), 2);
        assert_eq!(frame.slices[0].start_angle, 0.5);
        assert_eq!(frame.slices[0].display_label, "A");
        assert_eq!(frame.slices[1].display_label, "an option with a …");
        assert!(WheelState::default().frame().slices.is_empty());
    }

    #[test]
    fn zero_duration_finishes_on_first_tick() {
        let mut state = abcd();
        let policy = SpinPolicy::default().with_duration_ms(0.0..0.0);
        let mut rng = StdRng::seed_from_u64(4);
        let now = Instant::now();
        let plan = start_spin(&mut state, now, &policy, &mut rng).unwrap();
        match tick(&mut state, now, &policy).unwrap() {
            TickOutcome::Finished(result) => assert_eq!(result.index, plan.target_slice),
            other => panic!("expected finish, got {other:?}"),
        }
    }
}
