use serde::{Deserialize, Serialize};

/// Interpolation curve applied to a normalised animation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Symmetric accelerate/decelerate curve used for packet flight.
    EaseInOut,
    /// Fast start, long settle: `1 - (1-t)^4`. Used by the animated counters.
    EaseOutQuart,
}

impl Easing {
    /// Maps progress `t` in [0, 1] through the curve. Inputs outside the
    /// range are clamped first.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => ease_in_out_cubic(t),
            Easing::EaseOutQuart => ease_out_quart(t),
        }
    }
}

/// Linear interpolation between `a` and `b` at progress `t`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv * inv / 2.0
    }
}

#[inline]
fn ease_out_quart(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv
}
