// core/tween.rs
//
// Tween: one interpolation job bound to a property.
//
// Usage:
//   let mut tween = node.move_to(Vec3::new(100.0, 0.0, 0.0), 0.5)?
//       .with_curve(EaseCurve::QuadOut)
//       .with_loop(Some(3), LoopType::Oscillate);
//   tween.on_complete(|| println!("done"));
//   tween.update(dt); // once per frame, or let a TweenRegistry drive it
//
// Lifecycle events are only queued after `with_events(true)`; whoever turns
// them on must drain them.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::api::error::TweenError;
use crate::api::types::{TargetId, TweenEventKind, TweenId};
use crate::components::binding::{Binding, PropertyKind, TweenValue};
use crate::extensions::easing::{ease, ease_vec3, EaseCurve};

/// Loop count meaning "repeat forever".
pub const INFINITE_LOOPS: i32 = -1;

/// What happens at each loop boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopType {
    /// Jump back to the start value.
    #[default]
    Restart,
    /// Reverse direction (ping-pong). Each leg counts as one loop.
    Oscillate,
    /// Continue from the end value, adding the configured delta again.
    WithOffset,
}

type Callback = Box<dyn FnMut()>;
type LoopCallback = Box<dyn FnMut(u32)>;

/// Registered lifecycle handlers, fired in registration order.
#[derive(Default)]
struct Callbacks {
    on_start: Vec<Callback>,
    on_loop: Vec<LoopCallback>,
    on_complete: Vec<Callback>,
}

impl Callbacks {
    fn clear(&mut self) {
        self.on_start.clear();
        self.on_loop.clear();
        self.on_complete.clear();
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_start", &self.on_start.len())
            .field("on_loop", &self.on_loop.len())
            .field("on_complete", &self.on_complete.len())
            .finish()
    }
}

/// A single tween.
///
/// Phases:
/// - **active**: alive and not completed; advances on `update` while running
/// - **finished**: alive and completed; inert until `reset` or `kill`
/// - **dead**: terminal; a registry reclaims it on the next tick
#[derive(Debug)]
pub struct Tween {
    id: TweenId,
    binding: Binding,
    curve: EaseCurve,
    duration: f32,
    kill_on_end: bool,

    /// Configured endpoints. Completion and cancellation snap to these.
    from: TweenValue,
    to: TweenValue,
    /// Endpoints of the current cycle; `WithOffset` shifts them every loop.
    cycle_from: TweenValue,
    cycle_to: TweenValue,

    delay: f32,
    /// Time since creation, delay included.
    elapsed: f32,
    /// Time since the delay ended.
    play_time: f32,
    /// Position inside the current loop cycle.
    loop_time: f32,
    first_update: bool,
    delay_over: bool,

    looping: bool,
    loops_count: i32,
    loop_type: LoopType,
    passed_loops: u32,
    incrementing: bool,

    alive: bool,
    running: bool,
    completed: bool,

    callbacks: Callbacks,
    record_events: bool,
    events: Vec<TweenEventKind>,
}

impl Tween {
    /// Tween the bound property from its current value to `to`.
    pub fn new(binding: Binding, to: TweenValue, duration: f32) -> Result<Self, TweenError> {
        Self::build(binding, None, to, duration)
    }

    /// Tween the bound property between explicit endpoints.
    pub fn from_to(
        binding: Binding,
        from: TweenValue,
        to: TweenValue,
        duration: f32,
    ) -> Result<Self, TweenError> {
        Self::build(binding, Some(from), to, duration)
    }

    fn build(
        binding: Binding,
        from: Option<TweenValue>,
        to: TweenValue,
        duration: f32,
    ) -> Result<Self, TweenError> {
        if !binding.is_live() {
            return Err(TweenError::InvalidTarget);
        }
        if !(duration > 0.0 && duration.is_finite()) {
            return Err(TweenError::InvalidDuration { duration });
        }
        let kind = binding.kind();
        check_value(kind, &to)?;
        if let Some(from) = &from {
            check_value(kind, from)?;
        }

        let from = match from {
            Some(from) => from,
            None => binding.read().ok_or(TweenError::InvalidTarget)?,
        };
        Ok(Self {
            id: TweenId::new(),
            binding,
            curve: EaseCurve::Linear,
            duration,
            kill_on_end: true,
            from,
            to,
            cycle_from: from,
            cycle_to: to,
            delay: 0.0,
            elapsed: 0.0,
            play_time: 0.0,
            loop_time: 0.0,
            first_update: true,
            delay_over: false,
            looping: false,
            loops_count: 1,
            loop_type: LoopType::Restart,
            passed_loops: 0,
            incrementing: true,
            alive: true,
            running: true,
            completed: false,
            callbacks: Callbacks::default(),
            record_events: false,
            events: Vec::new(),
        })
    }

    // -- Builder methods --

    pub fn with_curve(mut self, curve: EaseCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.set_delay(delay);
        self
    }

    pub fn with_loop(mut self, count: Option<i32>, loop_type: LoopType) -> Self {
        self.set_loop(count, loop_type);
        self
    }

    pub fn with_kill_on_end(mut self, kill_on_end: bool) -> Self {
        self.kill_on_end = kill_on_end;
        self
    }

    /// Queue lifecycle events for [`Tween::drain_events`]. Off by default.
    pub fn with_events(mut self, record: bool) -> Self {
        self.set_record_events(record);
        self
    }

    /// Start paused; call [`Tween::play`] to begin.
    pub fn paused(mut self) -> Self {
        self.running = false;
        self
    }

    // -- Late configuration (only before the first update) --

    /// Wait `delay` seconds before starting. Negative delays count as zero.
    pub fn set_delay(&mut self, delay: f32) -> &mut Self {
        if !self.first_update {
            warn!("tween {}: delay changed after start, ignored", self.id);
            return self;
        }
        self.delay = delay.max(0.0);
        self
    }

    /// Enable looping. `None` or any count <= 0 loops forever.
    pub fn set_loop(&mut self, count: Option<i32>, loop_type: LoopType) -> &mut Self {
        if !self.first_update {
            warn!("tween {}: loop changed after start, ignored", self.id);
            return self;
        }
        self.looping = true;
        self.loops_count = match count {
            Some(n) if n > 0 => n,
            _ => INFINITE_LOOPS,
        };
        self.loop_type = loop_type;
        self
    }

    /// Turn event recording on or off. Turning it off drops anything queued.
    pub fn set_record_events(&mut self, record: bool) -> &mut Self {
        self.record_events = record;
        if !record {
            self.events.clear();
        }
        self
    }

    // -- Callbacks --

    /// Run `f` when the delay has elapsed and the tween starts moving.
    pub fn on_start(&mut self, f: impl FnMut() + 'static) -> &mut Self {
        self.callbacks.on_start.push(Box::new(f));
        self
    }

    /// Run `f` at every loop boundary with the number of loops passed so far.
    pub fn on_loop(&mut self, f: impl FnMut(u32) + 'static) -> &mut Self {
        self.callbacks.on_loop.push(Box::new(f));
        self
    }

    /// Run `f` when the tween completes (not when it is cancelled or stopped).
    pub fn on_complete(&mut self, f: impl FnMut() + 'static) -> &mut Self {
        self.callbacks.on_complete.push(Box::new(f));
        self
    }

    // -- Control --

    /// Resume a paused tween. No-op once finished or dead.
    pub fn play(&mut self) {
        if self.alive && !self.completed {
            self.running = true;
        }
    }

    pub fn pause(&mut self) {
        if self.alive && self.running {
            self.running = false;
        }
    }

    /// Advance by `dt` seconds and write the new value through the binding.
    pub fn update(&mut self, dt: f32) {
        if !self.alive || self.completed || !self.running || !self.binding.is_live() {
            return;
        }

        // The first frame only sets the baseline; its delta predates the tween.
        let mut dt = dt;
        if self.first_update {
            self.first_update = false;
            dt = 0.0;
        } else {
            self.elapsed += dt;
        }

        if !self.delay_over {
            if self.elapsed < self.delay {
                return;
            }
            self.delay_over = true;
            dt = self.elapsed - self.delay;
            self.fire_start();
        }

        self.play_time += dt;
        let progress = if self.looping {
            self.advance_loop(dt)
        } else {
            self.play_time
        };

        if self.play_time >= self.life_time() {
            self.complete();
            return;
        }

        let value = self.sample(progress);
        self.binding.write(value);
    }

    /// Snap to the configured end value and fire `on_complete`.
    pub fn complete(&mut self) {
        if !self.finish() {
            return;
        }
        self.apply(self.to);
        for f in &mut self.callbacks.on_complete {
            f();
        }
        self.emit(TweenEventKind::Completed);
        self.end_of_life();
    }

    /// Restore the configured start value. `on_complete` does not fire.
    pub fn cancel(&mut self) {
        if !self.finish() {
            return;
        }
        self.apply(self.from);
        self.emit(TweenEventKind::Cancelled);
        self.end_of_life();
    }

    /// Halt in place, leaving the property as it is.
    pub fn stop(&mut self) {
        if !self.finish() {
            return;
        }
        self.emit(TweenEventKind::Stopped);
        self.end_of_life();
    }

    /// Mark dead and drop every registered callback. Idempotent.
    pub fn kill(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.callbacks.clear();
        self.emit(TweenEventKind::Killed);
    }

    /// Rewind to the creation state and restore the start value.
    /// Dead tweens stay dead.
    pub fn reset(&mut self, play_on_reset: bool) {
        if !self.alive {
            return;
        }
        self.elapsed = 0.0;
        self.play_time = 0.0;
        self.loop_time = 0.0;
        self.first_update = true;
        self.delay_over = false;
        self.passed_loops = 0;
        self.incrementing = true;
        self.cycle_from = self.from;
        self.cycle_to = self.to;
        self.completed = false;
        self.running = play_on_reset;
        self.apply(self.from);
    }

    // -- Accessors --

    pub fn id(&self) -> TweenId {
        self.id
    }

    pub fn kind(&self) -> PropertyKind {
        self.binding.kind()
    }

    pub fn target_id(&self) -> TargetId {
        self.binding.target_id()
    }

    pub fn is_binding_live(&self) -> bool {
        self.binding.is_live()
    }

    pub fn curve(&self) -> EaseCurve {
        self.curve
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn from(&self) -> TweenValue {
        self.from
    }

    pub fn to(&self) -> TweenValue {
        self.to
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn play_time(&self) -> f32 {
        self.play_time
    }

    pub fn loop_time(&self) -> f32 {
        self.loop_time
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Configured loop count; [`INFINITE_LOOPS`] for endless loops.
    pub fn loops_count(&self) -> i32 {
        self.loops_count
    }

    pub fn loop_type(&self) -> LoopType {
        self.loop_type
    }

    pub fn passed_loops(&self) -> u32 {
        self.passed_loops
    }

    /// Oscillation direction (true = forward).
    pub fn is_incrementing(&self) -> bool {
        self.incrementing
    }

    pub fn is_delay_over(&self) -> bool {
        self.delay_over
    }

    pub fn records_events(&self) -> bool {
        self.record_events
    }

    pub fn kills_on_end(&self) -> bool {
        self.kill_on_end
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Total play time before the tween completes on its own; infinite for endless loops.
    pub fn life_time(&self) -> f32 {
        if !self.looping {
            self.duration
        } else if self.loops_count > 0 {
            self.duration * self.loops_count as f32
        } else {
            f32::INFINITY
        }
    }

    /// Normalized progress [0, 1] over the whole life time, or over the
    /// current cycle for endless loops.
    pub fn progress(&self) -> f32 {
        let life = self.life_time();
        let p = if life.is_finite() {
            self.play_time / life
        } else {
            self.loop_time / self.duration
        };
        p.clamp(0.0, 1.0)
    }

    /// Take the lifecycle events queued since the last drain.
    pub fn drain_events(&mut self) -> impl Iterator<Item = TweenEventKind> + '_ {
        self.events.drain(..)
    }

    // -- Internals --

    fn emit(&mut self, kind: TweenEventKind) {
        if self.record_events {
            self.events.push(kind);
        }
    }

    fn fire_start(&mut self) {
        for f in &mut self.callbacks.on_start {
            f();
        }
        self.emit(TweenEventKind::Started);
    }

    /// Advance the cycle clock and return the progress to sample.
    fn advance_loop(&mut self, dt: f32) -> f32 {
        match self.loop_type {
            LoopType::Restart | LoopType::WithOffset => {
                self.loop_time += dt;
                if self.loop_time >= self.duration {
                    self.loop_time = 0.0;
                    self.complete_loop();
                }
            }
            LoopType::Oscillate => {
                if self.incrementing {
                    self.loop_time += dt;
                    if self.loop_time >= self.duration {
                        self.loop_time = self.duration;
                        self.incrementing = false;
                        self.complete_loop();
                    }
                } else {
                    self.loop_time -= dt;
                    if self.loop_time <= 0.0 {
                        self.loop_time = 0.0;
                        self.incrementing = true;
                        self.complete_loop();
                    }
                }
            }
        }
        self.loop_time
    }

    fn complete_loop(&mut self) {
        self.passed_loops += 1;
        let count = self.passed_loops;
        for f in &mut self.callbacks.on_loop {
            f(count);
        }
        self.emit(TweenEventKind::Looped(count));

        if self.loop_type == LoopType::WithOffset {
            self.shift_cycle();
        }
    }

    /// Move the cycle forward by the configured delta. Normalized channels
    /// saturate at [0, 1]; vector properties drift without bound.
    fn shift_cycle(&mut self) {
        debug_assert_eq!(self.from.shape(), self.cycle_to.shape(), "tween endpoints changed shape");
        match (self.from, self.to, self.cycle_to) {
            (TweenValue::Scalar(from), TweenValue::Scalar(to), TweenValue::Scalar(end)) => {
                let mut next = end + (to - from);
                if self.binding.kind().is_normalized() {
                    next = next.clamp(0.0, 1.0);
                }
                self.cycle_from = TweenValue::Scalar(end);
                self.cycle_to = TweenValue::Scalar(next);
            }
            (TweenValue::Vector(from), TweenValue::Vector(to), TweenValue::Vector(end)) => {
                self.cycle_from = TweenValue::Vector(end);
                self.cycle_to = TweenValue::Vector(end + (to - from));
            }
            // Construction rules out mixed shapes.
            _ => {}
        }
    }

    fn sample(&self, t: f32) -> TweenValue {
        debug_assert_eq!(self.cycle_from.shape(), self.cycle_to.shape(), "tween endpoints changed shape");
        match (self.cycle_from, self.cycle_to) {
            (TweenValue::Scalar(a), TweenValue::Scalar(b)) => {
                TweenValue::Scalar(ease(self.curve, t, a, b - a, self.duration))
            }
            (TweenValue::Vector(a), TweenValue::Vector(b)) => {
                TweenValue::Vector(ease_vec3(self.curve, t, a, b - a, self.duration))
            }
            // Construction rules out mixed shapes.
            (a, _) => a,
        }
    }

    fn apply(&mut self, value: TweenValue) {
        if self.binding.is_live() {
            self.binding.write(value);
        }
    }

    /// Enter the finished phase. Returns false if already finished or dead.
    fn finish(&mut self) -> bool {
        if !self.alive || self.completed {
            return false;
        }
        self.completed = true;
        self.running = false;
        true
    }

    fn end_of_life(&mut self) {
        if self.kill_on_end {
            self.kill();
        }
    }
}

fn check_value(kind: PropertyKind, value: &TweenValue) -> Result<(), TweenError> {
    if value.shape() != kind.shape() {
        return Err(TweenError::ValueKindMismatch {
            expected: kind.shape(),
            actual: value.shape(),
        });
    }
    if let (true, TweenValue::Scalar(v)) = (kind.is_normalized(), value) {
        if !(0.0..=1.0).contains(v) {
            return Err(TweenError::InvalidRange { value: *v });
        }
    }
    Ok(())
}
