use glam::Vec3;
use log::{debug, info, trace};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::f32::consts::TAU;
use std::rc::Rc;

use crate::camera::{CameraPose, SharedCamera};
use crate::config::{Destination, Destinations};
use crate::core::tween::Tween;
use crate::math::{look_ahead, orbit_position, Easing};
use crate::mode::CameraMode;
use crate::traits::agent::TrackedAgent;
use crate::traits::tween::{TweenDriver, TweenHandle};

/// What the controller did with the camera on one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameOutcome {
    /// Tracking mode wrote this rig pose
    Tracked(CameraPose),
    /// A transition owns the camera; nothing written here
    Scripted,
    /// Tracking mode, but the agent's model is not loaded yet
    Skipped,
}

/// Rig pose that follows an agent: on its position, looking one unit ahead
pub fn tracking_pose(position: Vec3, heading: f32) -> CameraPose {
    CameraPose::new(position, look_ahead(position, heading))
}

/// Owns the camera mode and the single scripted transition that serves it
///
/// In `Home` the camera rig is placed on the agent every tick. Every other
/// mode runs exactly one tween that writes the camera itself; requesting a
/// new mode cancels that tween before anything else happens.
pub struct CameraModeController<T: TweenDriver, A: TrackedAgent> {
    camera: SharedCamera,
    tweens: Rc<RefCell<T>>,
    agent: Rc<RefCell<A>>,
    destinations: Destinations,
    current_mode: CameraMode,
    active_transition: Option<TweenHandle>,
    orbit_angle: Rc<Cell<f32>>,
    time_in_mode: f32,
}

impl<T: TweenDriver, A: TrackedAgent> CameraModeController<T, A> {
    /// Start in `Home`, following the agent
    pub fn new(
        camera: SharedCamera,
        tweens: Rc<RefCell<T>>,
        agent: Rc<RefCell<A>>,
        destinations: Destinations,
    ) -> Self {
        Self {
            camera,
            tweens,
            agent,
            destinations,
            current_mode: CameraMode::Home,
            active_transition: None,
            orbit_angle: Rc::new(Cell::new(0.0)),
            time_in_mode: 0.0,
        }
    }

    pub fn current_mode(&self) -> CameraMode {
        self.current_mode
    }

    pub fn active_transition(&self) -> Option<TweenHandle> {
        self.active_transition
    }

    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle.get()
    }

    /// Seconds of ticks since the last mode request
    pub fn time_in_mode(&self) -> f32 {
        self.time_in_mode
    }

    pub fn destinations(&self) -> &Destinations {
        &self.destinations
    }

    /// Switch modes, replacing any running transition
    ///
    /// Re-requesting the current mode restarts its transition from wherever
    /// the camera is now.
    pub fn request_mode_change(&mut self, target: CameraMode) {
        if let Some(handle) = self.active_transition.take() {
            let cancelled = self.tweens.borrow_mut().cancel(handle);
            debug!(
                "Cancelled {} transition #{} (live: {})",
                self.current_mode,
                handle.id(),
                cancelled
            );
        }

        info!("Camera mode {} -> {}", self.current_mode, target);
        self.current_mode = target;
        self.time_in_mode = 0.0;

        let Some(destination) = self.destinations.get(target).cloned() else {
            return;
        };

        let tween = match destination {
            Destination::Fixed {
                position,
                look_at,
                duration,
                easing,
            } => self.approach(CameraPose::new(position, look_at), duration, easing),
            Destination::Orbit {
                center,
                radius,
                height,
                approach_duration,
                period,
                easing,
            } => {
                self.orbit_angle.set(0.0);
                let start = CameraPose::new(orbit_position(center, radius, height, 0.0), center);
                self.approach(start, approach_duration, easing)
                    .chain(self.orbit_loop(center, radius, height, period))
            }
        };

        let handle = self.tweens.borrow_mut().start(tween.label(target.name()));
        self.active_transition = Some(handle);
    }

    /// Per-frame camera placement. Call after the agent has advanced.
    pub fn on_frame_tick(&mut self, delta: f32) -> FrameOutcome {
        self.time_in_mode += delta;

        match self.current_mode {
            CameraMode::Home => {
                debug_assert!(self.active_transition.is_none());

                let pose = {
                    let agent = self.agent.borrow();
                    if !agent.has_render_component() {
                        return FrameOutcome::Skipped;
                    }
                    tracking_pose(agent.position(), agent.heading())
                };

                self.camera.borrow_mut().set_rig_pose(pose);
                trace!("Tracking pose {:?}", pose);
                FrameOutcome::Tracked(pose)
            }
            CameraMode::Education | CameraMode::Experience | CameraMode::Projects => {
                FrameOutcome::Scripted
            }
        }
    }

    /// Position and look-at tweened in parallel from the camera's world pose
    fn approach(&self, target: CameraPose, duration: f32, easing: Easing) -> Tween {
        let from = self.camera.borrow().world_pose();
        let camera = Rc::clone(&self.camera);

        Tween::new(&from.to_fields(), &target.to_fields(), duration)
            .easing(easing)
            .on_update(move |fields| camera.borrow_mut().set_pose(CameraPose::from_fields(fields)))
    }

    /// Endless linear lap of the orbit angle, placing the camera every tick
    fn orbit_loop(&self, center: Vec3, radius: f32, height: f32, period: f32) -> Tween {
        let camera = Rc::clone(&self.camera);
        let angle = Rc::clone(&self.orbit_angle);

        Tween::new(&[0.0], &[TAU], period)
            .repeat_forever()
            .on_update(move |fields| {
                let a = fields[0];
                angle.set(a);
                camera
                    .borrow_mut()
                    .set_pose(CameraPose::new(orbit_position(center, radius, height, a), center));
            })
    }
}
