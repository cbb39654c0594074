use log::debug;
use std::collections::VecDeque;
use std::fmt;

use crate::math::{lerp, Easing};
use crate::traits::tween::{TweenDriver, TweenHandle};

/// Per-tick callback, receives the interpolated values
pub type UpdateFn = Box<dyn FnMut(&[f32])>;
/// Fired once when a finite stage reaches its end
pub type CompleteFn = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Forever,
}

/// One timed interpolation of a set of numeric fields
struct Stage {
    from: Vec<f32>,
    to: Vec<f32>,
    values: Vec<f32>,
    duration: f32,
    elapsed: f32,
    easing: Easing,
    repeat: Repeat,
    on_update: Vec<UpdateFn>,
    on_complete: Option<CompleteFn>,
}

impl Stage {
    fn new(from: &[f32], to: &[f32], duration: f32) -> Self {
        debug_assert_eq!(from.len(), to.len(), "tween endpoints differ in length");
        let len = from.len().min(to.len());
        Self {
            from: from[..len].to_vec(),
            to: to[..len].to_vec(),
            values: from[..len].to_vec(),
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing: Easing::Linear,
            repeat: Repeat::Once,
            on_update: Vec::new(),
            on_complete: None,
        }
    }

    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    fn sample(&mut self) {
        let t = self.easing.apply(self.progress());
        for ((value, &a), &b) in self.values.iter_mut().zip(&self.from).zip(&self.to) {
            *value = lerp(a, b, t);
        }
    }

    /// Advance by `delta`. Returns leftover time if a finite stage finished.
    fn advance(&mut self, delta: f32) -> Option<f32> {
        self.elapsed += delta;
        match self.repeat {
            Repeat::Once if self.elapsed >= self.duration => {
                let leftover = self.elapsed - self.duration;
                self.elapsed = self.duration;
                self.sample();
                Some(leftover)
            }
            Repeat::Forever if self.duration > 0.0 && self.elapsed >= self.duration => {
                self.elapsed %= self.duration;
                self.sample();
                None
            }
            _ => {
                self.sample();
                None
            }
        }
    }
}

/// A chain of stages started and cancelled as one unit
///
/// Builder methods configure the most recently added stage.
pub struct Tween {
    label: String,
    stages: VecDeque<Stage>,
    observers: Vec<UpdateFn>,
    stage_index: usize,
}

impl Tween {
    /// Interpolate `from` toward `to` over `duration` seconds
    pub fn new(from: &[f32], to: &[f32], duration: f32) -> Self {
        Self {
            label: String::from("tween"),
            stages: VecDeque::from([Stage::new(from, to, duration)]),
            observers: Vec::new(),
            stage_index: 0,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        if let Some(stage) = self.stages.back_mut() {
            stage.easing = easing;
        }
        self
    }

    /// Loop the last stage from its start value indefinitely
    pub fn repeat_forever(mut self) -> Self {
        if let Some(stage) = self.stages.back_mut() {
            stage.repeat = Repeat::Forever;
        }
        self
    }

    pub fn on_update(mut self, f: impl FnMut(&[f32]) + 'static) -> Self {
        if let Some(stage) = self.stages.back_mut() {
            stage.on_update.push(Box::new(f));
        }
        self
    }

    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        if let Some(stage) = self.stages.back_mut() {
            stage.on_complete = Some(Box::new(f));
        }
        self
    }

    /// Observe every tick of every stage
    pub fn inspect(mut self, f: impl FnMut(&[f32]) + 'static) -> Self {
        self.observers.push(Box::new(f));
        self
    }

    /// Run `next` once this tween's last stage completes, under the same handle
    pub fn chain(mut self, next: Tween) -> Self {
        self.stages.extend(next.stages);
        self.observers.extend(next.observers);
        self
    }

    pub fn name(&self) -> &str {
        &self.label
    }

    /// Advance by `delta`, firing callbacks. Returns false once every stage is done.
    fn advance(&mut self, mut delta: f32) -> bool {
        loop {
            let Some(stage) = self.stages.front_mut() else {
                return false;
            };
            let finished = stage.advance(delta);

            for f in stage.on_update.iter_mut() {
                f(&stage.values);
            }
            for f in self.observers.iter_mut() {
                f(&stage.values);
            }

            let Some(leftover) = finished else {
                return true;
            };
            if let Some(done) = self.stages.pop_front().and_then(|s| s.on_complete) {
                done();
            }
            debug!("{}: stage {} complete", self.label, self.stage_index);
            self.stage_index += 1;
            if self.stages.is_empty() {
                return false;
            }
            delta = leftover;
        }
    }

    fn info(&self) -> Option<TweenInfo> {
        self.stages.front().map(|stage| TweenInfo {
            label: self.label.clone(),
            stage_index: self.stage_index,
            stages_remaining: self.stages.len(),
            from: stage.from.clone(),
            to: stage.to.clone(),
            duration: stage.duration,
            elapsed: stage.elapsed,
            repeat: stage.repeat,
        })
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("label", &self.label)
            .field("stage_index", &self.stage_index)
            .field("stages", &self.stages.len())
            .finish()
    }
}

/// Snapshot of a live tween's current stage
#[derive(Debug, Clone, PartialEq)]
pub struct TweenInfo {
    pub label: String,
    pub stage_index: usize,
    pub stages_remaining: usize,
    pub from: Vec<f32>,
    pub to: Vec<f32>,
    pub duration: f32,
    pub elapsed: f32,
    pub repeat: Repeat,
}

/// Tween engine, updated once per frame by the host loop
#[derive(Debug, Default)]
pub struct Tweens {
    next_id: u64,
    running: Vec<(TweenHandle, Tween)>,
}

impl Tweens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every live tween by `delta` seconds and drop finished ones
    pub fn update(&mut self, delta: f32) {
        self.running.retain_mut(|(handle, tween)| {
            let alive = tween.advance(delta);
            if !alive {
                debug!("{} (#{}) finished", tween.label, handle.id());
            }
            alive
        });
    }

    pub fn describe(&self, handle: TweenHandle) -> Option<TweenInfo> {
        self.running
            .iter()
            .find(|(h, _)| *h == handle)
            .and_then(|(_, tween)| tween.info())
    }

    pub fn handles(&self) -> impl Iterator<Item = TweenHandle> + '_ {
        self.running.iter().map(|(h, _)| *h)
    }
}

impl TweenDriver for Tweens {
    fn start(&mut self, tween: Tween) -> TweenHandle {
        self.next_id += 1;
        let handle = TweenHandle::from_raw(self.next_id);
        debug!("{} (#{}) started", tween.label, handle.id());
        self.running.push((handle, tween));
        handle
    }

    fn cancel(&mut self, handle: TweenHandle) -> bool {
        let before = self.running.len();
        self.running.retain(|(h, _)| *h != handle);
        let removed = self.running.len() != before;
        if removed {
            debug!("tween #{} cancelled", handle.id());
        }
        removed
    }

    fn is_active(&self, handle: TweenHandle) -> bool {
        self.running.iter().any(|(h, _)| *h == handle)
    }

    fn active_count(&self) -> usize {
        self.running.len()
    }
}
