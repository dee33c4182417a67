// core/registry.rs
//
// TweenRegistry: owns every tween, drives them once per frame, and reclaims
// the dead ones.
//
// Usage:
//   let mut tweens = TweenRegistry::new();
//   let id = tweens.create(node.bind(PropertyKind::Move), Vec3::X.into(), 0.5)?;
//   // per frame:
//   tweens.tick(dt);
//   for event in tweens.drain_events() { ... } // with `record_events` on

use std::collections::HashMap;

use log::{debug, trace};

use crate::api::config::{RegistryConfig, TweenDesc};
use crate::api::error::TweenError;
use crate::api::types::{TweenEvent, TweenId};
use crate::components::binding::{Animatable, Binding, Target, TweenValue};
use crate::core::tween::Tween;

/// Manages all tweens.
#[derive(Debug)]
pub struct TweenRegistry {
    tweens: HashMap<TweenId, Tween>,
    config: RegistryConfig,
    /// Lifecycle events to be polled.
    events: Vec<TweenEvent>,
    active: bool,
}

impl Default for TweenRegistry {
    fn default() -> Self {
        Self::with_config(RegistryConfig::default())
    }
}

impl TweenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            tweens: HashMap::with_capacity(config.initial_capacity),
            config,
            events: Vec::new(),
            active: false,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // -- Creation --

    /// Create a tween from the bound property's current value to `to`.
    pub fn create(&mut self, binding: Binding, to: TweenValue, duration: f32) -> Result<TweenId, TweenError> {
        let tween = self.with_defaults(Tween::new(binding, to, duration)?);
        Ok(self.add(tween))
    }

    /// Create a tween between explicit endpoints.
    pub fn create_from_to(
        &mut self,
        binding: Binding,
        from: TweenValue,
        to: TweenValue,
        duration: f32,
    ) -> Result<TweenId, TweenError> {
        let tween = self.with_defaults(Tween::from_to(binding, from, to, duration)?);
        Ok(self.add(tween))
    }

    /// Build a tween on `target` from a data description.
    pub fn create_from_desc(&mut self, desc: &TweenDesc, target: &dyn Animatable) -> Result<TweenId, TweenError> {
        let tween = desc.build(target, &self.config)?;
        Ok(self.add(tween))
    }

    /// Store a pre-built tween, keeping its settings. Event recording is
    /// switched on when the registry records events. Returns its handle.
    pub fn add(&mut self, mut tween: Tween) -> TweenId {
        if self.config.record_events {
            tween.set_record_events(true);
        }
        let id = tween.id();
        debug!("tween {} added ({} on target {})", id, tween.kind(), tween.target_id().0);
        self.tweens.insert(id, tween);
        if !self.active {
            self.active = true;
            debug!("tween registry active");
        }
        id
    }

    fn with_defaults(&self, tween: Tween) -> Tween {
        tween
            .with_curve(self.config.default_curve)
            .with_kill_on_end(self.config.kill_on_end)
    }

    // -- Lookup --

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(&id)
    }

    pub fn get_mut(&mut self, id: TweenId) -> Option<&mut Tween> {
        self.tweens.get_mut(&id)
    }

    /// Every stored tween, in no particular order.
    pub fn get_all(&self) -> impl Iterator<Item = &Tween> + '_ {
        self.tweens.values()
    }

    /// Tweens animating any property of `target`.
    pub fn get_by_target(&self, target: &dyn Target) -> Result<Vec<&Tween>, TweenError> {
        if !target.is_live() {
            return Err(TweenError::InvalidTarget);
        }
        let owner = target.target_id();
        Ok(self.tweens.values().filter(|t| t.target_id() == owner).collect())
    }

    pub fn contains(&self, id: TweenId) -> bool {
        self.tweens.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Whether the registry holds tweens it has not yet torn down.
    pub fn is_active(&self) -> bool {
        self.active
    }

    // -- Control by id --

    pub fn play(&mut self, id: TweenId) {
        self.with_tween(id, Tween::play);
    }

    pub fn pause(&mut self, id: TweenId) {
        self.with_tween(id, Tween::pause);
    }

    pub fn stop(&mut self, id: TweenId) {
        self.with_tween(id, Tween::stop);
    }

    pub fn complete(&mut self, id: TweenId) {
        self.with_tween(id, Tween::complete);
    }

    pub fn cancel(&mut self, id: TweenId) {
        self.with_tween(id, Tween::cancel);
    }

    pub fn reset(&mut self, id: TweenId, play_on_reset: bool) {
        self.with_tween(id, |t| t.reset(play_on_reset));
    }

    pub fn kill(&mut self, id: TweenId) {
        self.with_tween(id, Tween::kill);
    }

    // -- Control for every tween --

    pub fn play_all(&mut self) {
        self.for_each(Tween::play);
    }

    pub fn pause_all(&mut self) {
        self.for_each(Tween::pause);
    }

    pub fn stop_all(&mut self) {
        self.for_each(Tween::stop);
    }

    pub fn complete_all(&mut self) {
        self.for_each(Tween::complete);
    }

    pub fn cancel_all(&mut self) {
        self.for_each(Tween::cancel);
    }

    pub fn reset_all(&mut self, play_on_reset: bool) {
        self.for_each(|t| t.reset(play_on_reset));
    }

    pub fn kill_all(&mut self) {
        self.for_each(Tween::kill);
    }

    // -- Control by target --

    pub fn play_target(&mut self, target: &dyn Target) -> Result<(), TweenError> {
        self.for_target(target, Tween::play)
    }

    pub fn pause_target(&mut self, target: &dyn Target) -> Result<(), TweenError> {
        self.for_target(target, Tween::pause)
    }

    pub fn stop_target(&mut self, target: &dyn Target) -> Result<(), TweenError> {
        self.for_target(target, Tween::stop)
    }

    pub fn complete_target(&mut self, target: &dyn Target) -> Result<(), TweenError> {
        self.for_target(target, Tween::complete)
    }

    pub fn cancel_target(&mut self, target: &dyn Target) -> Result<(), TweenError> {
        self.for_target(target, Tween::cancel)
    }

    pub fn reset_target(&mut self, target: &dyn Target, play_on_reset: bool) -> Result<(), TweenError> {
        self.for_target(target, |t| t.reset(play_on_reset))
    }

    pub fn kill_target(&mut self, target: &dyn Target) -> Result<(), TweenError> {
        self.for_target(target, Tween::kill)
    }

    fn with_tween(&mut self, id: TweenId, f: impl FnOnce(&mut Tween)) {
        if let Some(tween) = self.tweens.get_mut(&id) {
            f(tween);
        }
    }

    fn for_each(&mut self, mut f: impl FnMut(&mut Tween)) {
        for tween in self.tweens.values_mut() {
            f(tween);
        }
    }

    fn for_target(&mut self, target: &dyn Target, mut f: impl FnMut(&mut Tween)) -> Result<(), TweenError> {
        if !target.is_live() {
            return Err(TweenError::InvalidTarget);
        }
        let owner = target.target_id();
        for tween in self.tweens.values_mut().filter(|t| t.target_id() == owner) {
            f(tween);
        }
        Ok(())
    }

    // -- Frame --

    /// Advance every live tween and reclaim the dead ones.
    /// Returns the number of tweens removed this tick.
    pub fn tick(&mut self, dt: f32) -> usize {
        let mut dead = Vec::new();

        for (&id, tween) in self.tweens.iter_mut() {
            if tween.is_alive() && tween.is_binding_live() {
                tween.update(dt);
            }
            self.events.extend(tween.drain_events().map(|kind| TweenEvent { id, kind }));

            if !tween.is_alive() || !tween.is_binding_live() {
                dead.push(id);
            }
        }

        let count = dead.len();
        for id in dead {
            self.tweens.remove(&id);
            trace!("tween {} reclaimed", id);
        }

        if self.active && self.tweens.is_empty() {
            self.active = false;
            debug!("tween registry idle");
        }

        count
    }

    /// Drain lifecycle events, oldest first. Empty unless the registry or
    /// the individual tweens record events.
    pub fn drain_events(&mut self) -> impl Iterator<Item = TweenEvent> + '_ {
        for (&id, tween) in self.tweens.iter_mut() {
            self.events.extend(tween.drain_events().map(|kind| TweenEvent { id, kind }));
        }
        self.events.drain(..)
    }

    /// Drop every tween without running its callbacks.
    pub fn clear(&mut self) {
        self.tweens.clear();
        self.events.clear();
        if self.active {
            self.active = false;
            debug!("tween registry cleared");
        }
    }
}
