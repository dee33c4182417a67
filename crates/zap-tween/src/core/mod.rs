pub mod registry;
pub mod tween;
