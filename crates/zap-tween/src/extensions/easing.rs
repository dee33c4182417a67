// extensions/easing.rs
//
// Pure easing functions for tween interpolation.
// No dependencies on tweens or bindings, just math.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Easing curve selector.
///
/// `Linear` plus ten families, each in `In`, `Out` and `InOut` phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EaseCurve {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    /// Stronger slow start.
    CubicIn,
    /// Stronger slow end.
    CubicOut,
    /// Stronger slow start and end.
    CubicInOut,
    /// Very strong slow start.
    QuartIn,
    /// Very strong slow end.
    QuartOut,
    /// Very strong slow start and end.
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    /// Sine wave easing (smooth).
    SineIn,
    SineOut,
    SineInOut,
    /// Exponential easing (dramatic).
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    /// Quarter-circle easing.
    CircIn,
    CircOut,
    CircInOut,
    /// Overshoot then settle.
    BackIn,
    BackOut,
    BackInOut,
    /// Elastic spring.
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    /// Bouncy finish.
    BounceIn,
    BounceOut,
    BounceInOut,
}

impl EaseCurve {
    /// Every curve, in declaration order.
    pub const ALL: [EaseCurve; 31] = [
        EaseCurve::Linear,
        EaseCurve::QuadIn,
        EaseCurve::QuadOut,
        EaseCurve::QuadInOut,
        EaseCurve::CubicIn,
        EaseCurve::CubicOut,
        EaseCurve::CubicInOut,
        EaseCurve::QuartIn,
        EaseCurve::QuartOut,
        EaseCurve::QuartInOut,
        EaseCurve::QuintIn,
        EaseCurve::QuintOut,
        EaseCurve::QuintInOut,
        EaseCurve::SineIn,
        EaseCurve::SineOut,
        EaseCurve::SineInOut,
        EaseCurve::ExpoIn,
        EaseCurve::ExpoOut,
        EaseCurve::ExpoInOut,
        EaseCurve::CircIn,
        EaseCurve::CircOut,
        EaseCurve::CircInOut,
        EaseCurve::BackIn,
        EaseCurve::BackOut,
        EaseCurve::BackInOut,
        EaseCurve::ElasticIn,
        EaseCurve::ElasticOut,
        EaseCurve::ElasticInOut,
        EaseCurve::BounceIn,
        EaseCurve::BounceOut,
        EaseCurve::BounceInOut,
    ];

    /// Apply the curve to a normalized time value `t`, nominally in [0, 1].
    ///
    /// Input is not clamped: values outside [0, 1] extrapolate the closed form.
    /// Back and Elastic overshoot [0, 1] even inside the nominal range.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            EaseCurve::Linear => t,

            // Quadratic
            EaseCurve::QuadIn => t * t,
            EaseCurve::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            EaseCurve::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            // Cubic
            EaseCurve::CubicIn => t * t * t,
            EaseCurve::CubicOut => 1.0 - (1.0 - t).powi(3),
            EaseCurve::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }

            // Quartic
            EaseCurve::QuartIn => t * t * t * t,
            EaseCurve::QuartOut => 1.0 - (1.0 - t).powi(4),
            EaseCurve::QuartInOut => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }

            // Quintic
            EaseCurve::QuintIn => t.powi(5),
            EaseCurve::QuintOut => 1.0 - (1.0 - t).powi(5),
            EaseCurve::QuintInOut => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }

            // Sine
            EaseCurve::SineIn => 1.0 - (t * PI / 2.0).cos(),
            EaseCurve::SineOut => (t * PI / 2.0).sin(),
            EaseCurve::SineInOut => -((PI * t).cos() - 1.0) / 2.0,

            // Exponential
            EaseCurve::ExpoIn => {
                if t == 0.0 { 0.0 } else { 2.0_f32.powf(10.0 * t - 10.0) }
            }
            EaseCurve::ExpoOut => {
                if t == 1.0 { 1.0 } else { 1.0 - 2.0_f32.powf(-10.0 * t) }
            }
            EaseCurve::ExpoInOut => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }

            // Circular. The radicand is floored at zero so extrapolation stays finite.
            EaseCurve::CircIn => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            EaseCurve::CircOut => (1.0 - (t - 1.0).powi(2)).max(0.0).sqrt(),
            EaseCurve::CircInOut => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).max(0.0).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).max(0.0).sqrt() + 1.0) / 2.0
                }
            }

            // Back (overshoot)
            EaseCurve::BackIn => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                C3 * t * t * t - C1 * t * t
            }
            EaseCurve::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
            EaseCurve::BackInOut => {
                const C1: f32 = 1.70158;
                const C2: f32 = C1 * 1.525;
                if t < 0.5 {
                    (2.0 * t).powi(2) * ((C2 + 1.0) * 2.0 * t - C2) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((C2 + 1.0) * (t * 2.0 - 2.0) + C2) + 2.0) / 2.0
                }
            }

            // Elastic
            EaseCurve::ElasticIn => {
                const C4: f32 = (2.0 * PI) / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * C4).sin()
                }
            }
            EaseCurve::ElasticOut => {
                const C4: f32 = (2.0 * PI) / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
                }
            }
            EaseCurve::ElasticInOut => {
                const C5: f32 = (2.0 * PI) / 4.5;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    -(2.0_f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * C5).sin()) / 2.0
                } else {
                    2.0_f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * C5).sin() / 2.0 + 1.0
                }
            }

            // Bounce
            EaseCurve::BounceIn => 1.0 - bounce_out(1.0 - t),
            EaseCurve::BounceOut => bounce_out(t),
            EaseCurve::BounceInOut => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
        }
    }
}

#[inline]
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

// ── Interpolation entry points ───────────────────────────────────────────

/// Eased value at time `t` of a transition from `start` by `delta` over `duration`.
///
/// Returns exactly `start` at `t == 0` and exactly `start + delta` at
/// `t == duration`, for every curve.
#[inline]
pub fn ease(curve: EaseCurve, t: f32, start: f32, delta: f32, duration: f32) -> f32 {
    if t == 0.0 {
        return start;
    }
    if t == duration {
        return start + delta;
    }
    start + delta * curve.apply(t / duration)
}

/// Per-axis [`ease`] over a `Vec3`.
#[inline]
pub fn ease_vec3(curve: EaseCurve, t: f32, start: Vec3, delta: Vec3, duration: f32) -> Vec3 {
    Vec3::new(
        ease(curve, t, start.x, delta.x, duration),
        ease(curve, t, start.y, delta.y, duration),
        ease(curve, t, start.z, delta.z, duration),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_curve_hits_both_endpoints_exactly() {
        let cases = [(0.0, 10.0, 1.0), (-3.5, 7.25, 0.4), (12.0, -12.0, 2.5), (0.3, 0.7, 0.016)];
        for curve in EaseCurve::ALL {
            for (start, delta, duration) in cases {
                assert_eq!(ease(curve, 0.0, start, delta, duration), start, "{:?} at t=0", curve);
                assert_eq!(
                    ease(curve, duration, start, delta, duration),
                    start + delta,
                    "{:?} at t=duration",
                    curve
                );
            }
        }
    }

    #[test]
    fn linear_midpoint() {
        assert_eq!(ease(EaseCurve::Linear, 0.5, 100.0, 100.0, 1.0), 150.0);
    }

    #[test]
    fn quad_out_faster_start() {
        // QuadOut should be > 0.5 at t=0.5 (faster start, slower end)
        let mid = EaseCurve::QuadOut.apply(0.5);
        assert!(mid > 0.5, "QuadOut at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn in_curves_lag_behind_linear() {
        for curve in [EaseCurve::QuadIn, EaseCurve::CubicIn, EaseCurve::QuintIn, EaseCurve::CircIn] {
            assert!(curve.apply(0.25) < 0.25, "{:?}", curve);
        }
    }

    #[test]
    fn back_overshoots() {
        let early = EaseCurve::BackOut.apply(0.3);
        assert!(early > 0.3, "BackOut should overshoot");
        assert!(EaseCurve::BackIn.apply(0.2) < 0.0, "BackIn should dip below zero");
    }

    #[test]
    fn elastic_leaves_unit_range() {
        let peak = (1..100)
            .map(|i| EaseCurve::ElasticOut.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "ElasticOut should overshoot 1.0, max was {}", peak);
    }

    #[test]
    fn bounce_stays_in_unit_range() {
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            for curve in [EaseCurve::BounceIn, EaseCurve::BounceOut, EaseCurve::BounceInOut] {
                let v = curve.apply(t);
                assert!((-1e-6..=1.0 + 1e-6).contains(&v), "{:?}({}) = {}", curve, t, v);
            }
        }
    }

    #[test]
    fn linear_extrapolates_past_duration() {
        assert!((ease(EaseCurve::Linear, 1.5, 0.0, 10.0, 1.0) - 15.0).abs() < 1e-5);
    }

    #[test]
    fn vector_ease_is_per_axis() {
        let start = Vec3::new(0.0, 10.0, -5.0);
        let delta = Vec3::new(4.0, -10.0, 5.0);
        let v = ease_vec3(EaseCurve::CubicInOut, 0.3, start, delta, 1.0);
        assert_eq!(v.x, ease(EaseCurve::CubicInOut, 0.3, 0.0, 4.0, 1.0));
        assert_eq!(v.y, ease(EaseCurve::CubicInOut, 0.3, 10.0, -10.0, 1.0));
        assert_eq!(v.z, ease(EaseCurve::CubicInOut, 0.3, -5.0, 5.0, 1.0));
        assert_eq!(ease_vec3(EaseCurve::BounceOut, 1.0, start, delta, 1.0), start + delta);
    }

    #[test]
    fn curves_deserialize_by_name() {
        let curve: EaseCurve = serde_json::from_str("\"ElasticInOut\"").unwrap();
        assert_eq!(curve, EaseCurve::ElasticInOut);
    }
}
