use glam::DVec2;

pub use spin_wheel_shared::SliceView;

use crate::error::SpinError;

pub const TAU: f64 = std::f64::consts::TAU;

/// Labels are placed at this fraction of the wheel radius.
pub const LABEL_RADIUS_FRACTION: f64 = 0.65;
/// Longer labels are cut and suffixed with an ellipsis.
pub const MAX_LABEL_CHARS: usize = 18;

/// Angular width of each of `n` equal slices.
pub fn slice_angle(n: usize) -> Result<f64, SpinError> {
    if n == 0 {
        return Err(SpinError::EmptyWheel);
    }
    Ok(TAU / n as f64)
}

/// Lays out every slice of the wheel at `rotation`. Empty for no labels.
pub fn slices(labels: &[String], rotation: f64) -> Vec<SliceView> {
    let Ok(slice) = slice_angle(labels.len()) else {
        return Vec::new();
    };

    labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let start_angle = rotation + index as f64 * slice;
            let center_angle = start_angle + slice / 2.0;
            let anchor = DVec2::from_angle(center_angle) * LABEL_RADIUS_FRACTION;
            SliceView {
                index,
                start_angle,
                end_angle: start_angle + slice,
                center_angle,
                label_anchor: anchor.into(),
                display_label: truncate_label(label),
            }
        })
        .collect()
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut out: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    out.push('…');
    out
}
