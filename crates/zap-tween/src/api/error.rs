//! Error types for tween construction and registry control.

use crate::components::binding::ValueShape;

/// Everything that can go wrong while building or addressing tweens.
///
/// All variants are raised synchronously at construction or lookup time.
/// Nothing fails during `update`/`tick`: a tween whose target disappears is
/// reclaimed silently.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum TweenError {
    /// The bound property's owner is gone (or was never valid).
    #[error("invalid target: the bound property's owner is not live")]
    InvalidTarget,

    /// Durations must be finite and strictly positive.
    #[error("invalid duration: {duration} (must be > 0)")]
    InvalidDuration { duration: f32 },

    /// Normalized channels only accept values inside [0, 1].
    #[error("invalid range: {value} is outside [0, 1]")]
    InvalidRange { value: f32 },

    /// The requested property kind is not one of move/scale/rotate/fade.
    #[error("invalid operation kind: {kind:?}")]
    InvalidOperationKind { kind: String },

    /// A scalar was given for a vector property, or the other way round.
    #[error("value kind mismatch: expected {expected:?}, got {actual:?}")]
    ValueKindMismatch {
        expected: ValueShape,
        actual: ValueShape,
    },

    /// A configuration or tween description failed to parse.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
