use thiserror::Error;

use spin_wheel_shared::RejectReason;

/// Reasons a spin request is turned down. Neither changes any state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinError {
    #[error("the wheel has no options to land on")]
    EmptyWheel,

    #[error("a spin is already in progress")]
    SpinAlreadyInProgress,
}

impl From<SpinError> for RejectReason {
    fn from(err: SpinError) -> Self {
        match err {
            SpinError::EmptyWheel => RejectReason::EmptyWheel,
            SpinError::SpinAlreadyInProgress => RejectReason::SpinAlreadyInProgress,
        }
    }
}
