pub mod api;
pub mod core;
pub mod components;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{LoopDesc, RegistryConfig, TweenDesc};
pub use api::error::TweenError;
pub use api::types::{TargetId, TweenEvent, TweenEventKind, TweenId};
pub use components::binding::{
    Animatable, Binding, PropertyKind, ScalarChannel, Target, TweenValue, ValueShape, VectorProperty,
};
pub use components::node::{Node, NodeHandle, WeakNode};
pub use crate::core::registry::TweenRegistry;
pub use crate::core::tween::{LoopType, Tween, INFINITE_LOOPS};
pub use extensions::{ease, ease_vec3, EaseCurve};
