use crate::error::SpinError;
use crate::partition::{slice_angle, TAU};
use crate::rotation::wrap_angle;

/// Index of the slice sitting under the pointer at `rotation`.
///
/// `pointer_angle` must be the same value the trajectory was planned with.
pub fn resolve_winner(
    rotation: f64,
    slice_count: usize,
    pointer_angle: f64,
) -> Result<usize, SpinError> {
    let slice = slice_angle(slice_count)?;
    let normalized = wrap_angle(TAU - wrap_angle(rotation));
    let adjusted = wrap_angle(normalized + pointer_angle);
    let index = (adjusted / slice).floor() as usize;
    Ok(index.min(slice_count - 1) % slice_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::POINTER_ANGLE;

    #[test]
    fn empty_wheel_has_no_winner() {
        assert_eq!(resolve_winner(0.0, 0, POINTER_ANGLE), Err(SpinError::EmptyWheel));
    }

    #[test]
    fn single_option_always_wins() {
        for r in [0.0, 1.0, 3.3, 100.0, -4.0] {
            assert_eq!(resolve_winner(r, 1, POINTER_ANGLE), Ok(0));
        }
    }

    #[test]
    fn unrotated_four_slice_wheel() {
        // the pointer sits on the boundary between slices 0 and 1
        assert_eq!(resolve_winner(0.0, 4, POINTER_ANGLE), Ok(1));
        assert_eq!(resolve_winner(0.1, 4, POINTER_ANGLE), Ok(0));
        assert_eq!(resolve_winner(-0.1, 4, POINTER_ANGLE), Ok(1));
    }

    #[test]
    fn rotation_is_periodic() {
        for n in 1..=10 {
            for k in 0..5 {
                let r = 0.3 + k as f64 * TAU;
                assert_eq!(
                    resolve_winner(r, n, POINTER_ANGLE),
                    resolve_winner(0.3, n, POINTER_ANGLE)
                );
            }
        }
    }
}
