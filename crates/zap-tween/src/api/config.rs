use serde::{Deserialize, Serialize};

use crate::api::error::TweenError;
use crate::components::binding::{Animatable, PropertyKind, TweenValue};
use crate::core::tween::{LoopType, Tween};
use crate::extensions::easing::EaseCurve;

/// Configuration for a tween registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Initial capacity of the tween map (default: 64).
    pub initial_capacity: usize,
    /// Curve given to tweens the registry creates (default: Linear).
    pub default_curve: EaseCurve,
    /// Whether registry-created tweens die once they finish (default: true).
    pub kill_on_end: bool,
    /// Queue lifecycle events for `drain_events` (default: false).
    /// The host must drain the queue when this is on.
    pub record_events: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            default_curve: EaseCurve::Linear,
            kill_on_end: true,
            record_events: false,
        }
    }
}

impl RegistryConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TweenError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Loop settings inside a [`TweenDesc`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoopDesc {
    /// Number of cycles; absent or <= 0 loops forever.
    #[serde(default)]
    pub count: Option<i32>,
    #[serde(default)]
    pub loop_type: LoopType,
}

/// Data description of a single tween, e.g. loaded from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweenDesc {
    /// Property kind name: "move", "scale", "rotate" or "fade".
    pub kind: String,
    /// Start value; the property's current value when absent.
    #[serde(default)]
    pub from: Option<TweenValue>,
    pub to: TweenValue,
    /// Duration in seconds.
    pub duration: f32,
    /// Falls back to the registry's default curve.
    #[serde(default)]
    pub curve: Option<EaseCurve>,
    #[serde(default)]
    pub delay: f32,
    #[serde(default)]
    pub loops: Option<LoopDesc>,
    /// Falls back to the registry's setting.
    #[serde(default)]
    pub kill_on_end: Option<bool>,
    #[serde(default)]
    pub paused: bool,
}

impl TweenDesc {
    /// Parse a description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, TweenError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The property kind this description names.
    pub fn kind(&self) -> Result<PropertyKind, TweenError> {
        self.kind.parse()
    }

    /// Build a tween on `target`. Unset options take their values from `defaults`.
    pub fn build(&self, target: &dyn Animatable, defaults: &RegistryConfig) -> Result<Tween, TweenError> {
        if !target.is_live() {
            return Err(TweenError::InvalidTarget);
        }
        let kind = self.kind()?;
        let binding = target
            .binding(kind)
            .ok_or_else(|| TweenError::InvalidOperationKind {
                kind: self.kind.clone(),
            })?;

        let tween = match self.from {
            Some(from) => Tween::from_to(binding, from, self.to, self.duration)?,
            None => Tween::new(binding, self.to, self.duration)?,
        };
        let mut tween = tween
            .with_curve(self.curve.unwrap_or(defaults.default_curve))
            .with_kill_on_end(self.kill_on_end.unwrap_or(defaults.kill_on_end))
            .with_delay(self.delay);
        if let Some(loops) = self.loops {
            tween = tween.with_loop(loops.count, loops.loop_type);
        }
        if self.paused {
            tween = tween.paused();
        }
        Ok(tween)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::TargetId;
    use crate::components::node::{Node, NodeHandle};
    use glam::Vec3;

    #[test]
    fn parse_partial_config() {
        let config = RegistryConfig::from_json(r#"{ "default_curve": "QuadOut" }"#).unwrap();
        assert_eq!(config.default_curve, EaseCurve::QuadOut);
        assert_eq!(config.initial_capacity, 64);
        assert!(config.kill_on_end);
        assert!(!config.record_events);
    }

    #[test]
    fn bad_config_is_a_config_error() {
        let err = RegistryConfig::from_json(r#"{ "kill_on_end": "maybe" }"#).unwrap_err();
        assert!(matches!(err, TweenError::Config(_)));
    }

    #[test]
    fn build_looping_move_from_json() {
        let json = r#"{
            "kind": "move",
            "to": [10.0, 0.0, 0.0],
            "duration": 0.5,
            "curve": "SineInOut",
            "delay": 0.25,
            "loops": { "count": 3, "loop_type": "oscillate" }
        }"#;
        let desc = TweenDesc::from_json(json).unwrap();
        let node = NodeHandle::new(Node::new(TargetId(1)));
        let tween = desc.build(&node, &RegistryConfig::default()).unwrap();

        assert_eq!(tween.kind(), PropertyKind::Move);
        assert_eq!(tween.curve(), EaseCurve::SineInOut);
        assert_eq!(tween.delay(), 0.25);
        assert_eq!(tween.loops_count(), 3);
        assert_eq!(tween.loop_type(), LoopType::Oscillate);
        assert_eq!(tween.to(), TweenValue::Vector(Vec3::new(10.0, 0.0, 0.0)));
        assert!(tween.is_running());
    }

    #[test]
    fn unset_options_fall_back_to_registry_defaults() {
        let desc = TweenDesc::from_json(r#"{ "kind": "fade", "from": 1.0, "to": 0.0, "duration": 1.0, "paused": true }"#)
            .unwrap();
        let defaults = RegistryConfig {
            default_curve: EaseCurve::ExpoOut,
            kill_on_end: false,
            ..RegistryConfig::default()
        };
        let node = NodeHandle::new(Node::new(TargetId(2)));
        let tween = desc.build(&node, &defaults).unwrap();

        assert_eq!(tween.curve(), EaseCurve::ExpoOut);
        assert!(!tween.kills_on_end());
        assert!(!tween.is_running());
        assert_eq!(tween.from(), TweenValue::Scalar(1.0));
    }

    #[test]
    fn unknown_kind_name_is_rejected() {
        let desc = TweenDesc::from_json(r#"{ "kind": "wobble", "to": 1.0, "duration": 1.0 }"#).unwrap();
        let node = NodeHandle::new(Node::new(TargetId(3)));
        let err = desc.build(&node, &RegistryConfig::default()).unwrap_err();
        assert!(matches!(err, TweenError::InvalidOperationKind { .. }));
    }

    #[test]
    fn construction_errors_pass_through() {
        let desc = TweenDesc::from_json(r#"{ "kind": "fade", "to": 2.0, "duration": 1.0 }"#).unwrap();
        let node = NodeHandle::new(Node::new(TargetId(4)));
        let err = desc.build(&node, &RegistryConfig::default()).unwrap_err();
        assert!(matches!(err, TweenError::InvalidRange { .. }));
    }
}
