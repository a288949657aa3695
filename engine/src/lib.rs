//! Spin engine for a "spin the wheel" picker.
//!
//! The engine owns the wheel's rotation, draws an unbiased target slice,
//! plans the trajectory to it, interpolates that trajectory tick by tick
//! and resolves the winner once the wheel stops. It never draws anything:
//! renderers consume [`WheelFrame`] descriptors.

pub mod easing;
pub mod engine;
pub mod error;
pub mod labels;
pub mod partition;
pub mod policy;
pub mod resolver;
pub mod rotation;
pub mod trajectory;
pub mod wheel;

pub use easing::Easing;
pub use engine::SpinEngine;
pub use error::SpinError;
pub use labels::{parse_labels, shuffle_labels};
pub use partition::{slice_angle, slices, SliceView, TAU};
pub use policy::SpinPolicy;
pub use resolver::resolve_winner;
pub use rotation::RotationState;
pub use trajectory::{plan_spin, SpinPlan};
pub use wheel::{SpinSession, TickOutcome, WheelState};

pub use spin_wheel_shared::{SpinResult, WheelFrame};
