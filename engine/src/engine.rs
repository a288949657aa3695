use std::time::Instant;

use rand::Rng;

use spin_wheel_shared::WheelFrame;

use crate::error::SpinError;
use crate::labels::{parse_labels, shuffle_labels};
use crate::partition::{slices, SliceView};
use crate::policy::SpinPolicy;
use crate::trajectory::SpinPlan;
use crate::wheel::{self, TickOutcome, WheelState};

/// One wheel together with its policy and random source.
///
/// Thin owner around the transitions in [`crate::wheel`]; adapters hold a
/// `SpinEngine` and call [`SpinEngine::tick`] on every frame while
/// [`SpinEngine::is_spinning`] holds.
#[derive(Debug)]
pub struct SpinEngine<R> {
    state: WheelState,
    policy: SpinPolicy,
    rng: R,
}

impl<R: Rng> SpinEngine<R> {
    pub fn new(labels: Vec<String>, rng: R) -> Self {
        Self::with_policy(labels, SpinPolicy::default(), rng)
    }

    pub fn with_policy(labels: Vec<String>, policy: SpinPolicy, rng: R) -> Self {
        Self {
            state: WheelState::new(labels),
            policy,
            rng,
        }
    }

    pub fn state(&self) -> &WheelState {
        &self.state
    }

    pub fn policy(&self) -> &SpinPolicy {
        &self.policy
    }

    pub fn labels(&self) -> &[String] {
        self.state.labels()
    }

    pub fn rotation(&self) -> f64 {
        self.state.rotation().angle()
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning()
    }

    pub fn spin(&mut self, now: Instant) -> Result<SpinPlan, SpinError> {
        wheel::start_spin(&mut self.state, now, &self.policy, &mut self.rng)
    }

    pub fn tick(&mut self, now: Instant) -> Result<TickOutcome, SpinError> {
        wheel::tick(&mut self.state, now, &self.policy)
    }

    pub fn reset_rotation(&mut self) -> bool {
        wheel::reset_rotation(&mut self.state)
    }

    pub fn set_labels(&mut self, labels: Vec<String>) -> bool {
        wheel::replace_labels(&mut self.state, labels)
    }

    /// Replaces the options with those parsed from comma-separated text.
    pub fn set_labels_from_text(&mut self, text: &str) -> bool {
        self.set_labels(parse_labels(text))
    }

    pub fn shuffle(&mut self) -> bool {
        match wheel::labels_mut(&mut self.state) {
            Some(labels) => {
                shuffle_labels(labels, &mut self.rng);
                true
            }
            None => false,
        }
    }

    pub fn frame(&self) -> WheelFrame {
        self.state.frame()
    }

    pub fn slices(&self) -> Vec<SliceView> {
        slices(self.state.labels(), self.rotation())
    }
}
