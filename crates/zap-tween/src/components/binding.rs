//! Bindings: the write targets a tween animates.
//!
//! The core never knows *what* it animates. A host object exposes each
//! animatable property through one of two small capability traits:
//! - [`VectorProperty`] for 3-vectors (position, scale, rotation)
//! - [`ScalarChannel`] for normalized [0, 1] channels (opacity and friends)
//!
//! [`Binding`] is the closed set of property kinds a tween can drive, each
//! carrying the adapter it needs.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::error::TweenError;
use crate::api::types::TargetId;

/// The host object behind a bound property.
pub trait Target {
    /// Identity of the owning object, used for by-target queries.
    fn target_id(&self) -> TargetId;
    /// Whether the owning object still exists. Dead targets get their tweens reclaimed.
    fn is_live(&self) -> bool;
}

/// A 3-vector property (position, scale, rotation).
pub trait VectorProperty: Target {
    /// Current value, or `None` if it cannot be read right now.
    fn read(&self) -> Option<Vec3>;
    fn write(&mut self, value: Vec3);
}

/// A normalized scalar channel in [0, 1] (alpha, fill amount, volume...).
pub trait ScalarChannel: Target {
    /// Current value, or `None` if it cannot be read right now.
    fn read(&self) -> Option<f32>;
    fn write(&mut self, value: f32);
}

/// A host object that can hand out bindings for the kinds it supports.
pub trait Animatable: Target {
    /// Adapter for `kind`, or `None` if this object has no such property.
    fn binding(&self, kind: PropertyKind) -> Option<Binding>;
}

/// Which property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Move,
    Scale,
    Rotate,
    Fade,
}

impl PropertyKind {
    pub fn name(self) -> &'static str {
        match self {
            PropertyKind::Move => "move",
            PropertyKind::Scale => "scale",
            PropertyKind::Rotate => "rotate",
            PropertyKind::Fade => "fade",
        }
    }

    /// Shape of the values this kind takes.
    pub fn shape(self) -> ValueShape {
        match self {
            PropertyKind::Fade => ValueShape::Scalar,
            _ => ValueShape::Vector,
        }
    }

    /// Normalized kinds saturate at [0, 1].
    pub fn is_normalized(self) -> bool {
        self == PropertyKind::Fade
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PropertyKind {
    type Err = TweenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "move" => Ok(PropertyKind::Move),
            "scale" => Ok(PropertyKind::Scale),
            "rotate" => Ok(PropertyKind::Rotate),
            "fade" => Ok(PropertyKind::Fade),
            other => Err(TweenError::InvalidOperationKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Scalar or vector, without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueShape {
    Scalar,
    Vector,
}

/// A value a tween interpolates from or to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TweenValue {
    Scalar(f32),
    Vector(Vec3),
}

impl TweenValue {
    pub fn shape(&self) -> ValueShape {
        match self {
            TweenValue::Scalar(_) => ValueShape::Scalar,
            TweenValue::Vector(_) => ValueShape::Vector,
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            TweenValue::Scalar(v) => Some(*v),
            TweenValue::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<Vec3> {
        match self {
            TweenValue::Vector(v) => Some(*v),
            TweenValue::Scalar(_) => None,
        }
    }
}

impl From<f32> for TweenValue {
    fn from(v: f32) -> Self {
        TweenValue::Scalar(v)
    }
}

impl From<Vec3> for TweenValue {
    fn from(v: Vec3) -> Self {
        TweenValue::Vector(v)
    }
}

/// A property kind together with the adapter that reads and writes it.
pub enum Binding {
    Move(Box<dyn VectorProperty>),
    Scale(Box<dyn VectorProperty>),
    Rotate(Box<dyn VectorProperty>),
    Fade(Box<dyn ScalarChannel>),
}

impl Binding {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Binding::Move(_) => PropertyKind::Move,
            Binding::Scale(_) => PropertyKind::Scale,
            Binding::Rotate(_) => PropertyKind::Rotate,
            Binding::Fade(_) => PropertyKind::Fade,
        }
    }

    pub fn target_id(&self) -> TargetId {
        match self {
            Binding::Move(p) | Binding::Scale(p) | Binding::Rotate(p) => p.target_id(),
            Binding::Fade(c) => c.target_id(),
        }
    }

    pub fn is_live(&self) -> bool {
        match self {
            Binding::Move(p) | Binding::Scale(p) | Binding::Rotate(p) => p.is_live(),
            Binding::Fade(c) => c.is_live(),
        }
    }

    /// Current value of the bound property, if the adapter can read it.
    pub fn read(&self) -> Option<TweenValue> {
        match self {
            Binding::Move(p) | Binding::Scale(p) | Binding::Rotate(p) => p.read().map(TweenValue::Vector),
            Binding::Fade(c) => c.read().map(TweenValue::Scalar),
        }
    }

    /// Write a value through the adapter. Tween construction checks shapes,
    /// so a mismatch here is a bug: it asserts in debug builds and is dropped otherwise.
    pub fn write(&mut self, value: TweenValue) {
        debug_assert_eq!(
            self.kind().shape(),
            value.shape(),
            "{} binding written with a value of the wrong shape",
            self.kind()
        );
        match (self, value) {
            (Binding::Move(p) | Binding::Scale(p) | Binding::Rotate(p), TweenValue::Vector(v)) => {
                p.write(v)
            }
            (Binding::Fade(c), TweenValue::Scalar(v)) => c.write(v),
            _ => {}
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("kind", &self.kind())
            .field("target", &self.target_id())
            .finish()
    }
}
