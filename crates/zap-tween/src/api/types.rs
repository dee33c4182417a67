use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tween. Assigned at creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TweenId(Uuid);

impl TweenId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TweenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

/// Identity of the host object that owns an animated property.
/// Assigned by the host; tweens only compare it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// What happened to a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TweenEventKind {
    /// The delay elapsed and the tween began advancing.
    Started,
    /// A loop cycle finished; carries the number of cycles passed so far.
    Looped(u32),
    /// Snapped to its end value.
    Completed,
    /// Restored to its start value.
    Cancelled,
    /// Halted in place.
    Stopped,
    /// Marked dead; it will be reclaimed on the next tick.
    Killed,
}

/// A lifecycle event queued by the registry for the host to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweenEvent {
    pub id: TweenId,
    pub kind: TweenEventKind,
}
