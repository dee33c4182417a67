// extensions/mod.rs
//
// Curve math shared by tweens. Pure functions, no state.

pub mod easing;

pub use easing::{ease, ease_vec3, EaseCurve};
