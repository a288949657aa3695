/// Maps linear progress `t` in `[0, 1]` to eased progress in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// `1 - (1 - t)^power`: fast start, smooth stop.
    EaseOut { power: i32 },
}

impl Easing {
    pub const EASE_OUT_CUBIC: Easing = Easing::EaseOut { power: 3 };

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut { power } => 1.0 - (1.0 - t).powi(power),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::EASE_OUT_CUBIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_hits_endpoints() {
        let e = Easing::EASE_OUT_CUBIC;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(1.0), 1.0);
        assert!((e.apply(0.5) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let e = Easing::EASE_OUT_CUBIC;
        assert_eq!(e.apply(-0.5), 0.0);
        assert_eq!(e.apply(3.0), 1.0);
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
    }

    #[test]
    fn ease_out_is_non_decreasing() {
        let e = Easing::default();
        let mut last = 0.0;
        for i in 0..=1000 {
            let v = e.apply(i as f64 / 1000.0);
            assert!(v >= last);
            last = v;
        }
    }
}
