use glam::Vec3;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use crate::camera::{Camera, CameraPose, SharedCamera};
use crate::config::TourConfig;
use crate::core::controller::{CameraModeController, FrameOutcome};
use crate::core::path::{Path, PathFollower};
use crate::core::tween::Tweens;
use crate::loaders::CarModel;
use crate::mode::CameraMode;
use crate::traits::agent::TrackedAgent;

/// One rendered frame as the host saw it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub frame: u64,
    pub time: f32,
    pub mode: CameraMode,
    pub outcome: FrameOutcome,
    pub eye: Vec3,
    pub look_at: Vec3,
    pub agent_position: Vec3,
}

/// The car, the camera and everything that moves them
///
/// `tick` fixes the per-frame order: agent, tweens, camera mode, capture.
pub struct Scene {
    camera: SharedCamera,
    tweens: Rc<RefCell<Tweens>>,
    agent: Rc<RefCell<PathFollower>>,
    controller: CameraModeController<Tweens, PathFollower>,
    frame: u64,
    time: f32,
}

impl Scene {
    pub fn new(config: &TourConfig) -> Self {
        let camera = Camera::new(config.initial_pose(), config.camera.follow_offset).shared();
        let tweens = Rc::new(RefCell::new(Tweens::new()));

        let path = Path::new(config.path.waypoints.clone(), config.path.looped);
        let agent = Rc::new(RefCell::new(PathFollower::new(path, config.path.max_speed)));

        let controller = CameraModeController::new(
            Rc::clone(&camera),
            Rc::clone(&tweens),
            Rc::clone(&agent),
            config.destinations.clone(),
        );

        Self {
            camera,
            tweens,
            agent,
            controller,
            frame: 0,
            time: 0.0,
        }
    }

    /// Navigation entry point
    pub fn navigate(&mut self, mode: CameraMode) {
        self.controller.request_mode_change(mode);
    }

    /// The car model finished loading
    pub fn attach_model(&mut self, model: CarModel) {
        self.agent.borrow_mut().set_render_component(model);
    }

    /// Advance one frame by `delta` seconds
    pub fn tick(&mut self, delta: f32) -> FrameRecord {
        self.agent.borrow_mut().update(delta);
        self.tweens.borrow_mut().update(delta);
        let outcome = self.controller.on_frame_tick(delta);
        self.time += delta;

        let record = FrameRecord {
            frame: self.frame,
            time: self.time,
            mode: self.controller.current_mode(),
            outcome,
            eye: self.camera.borrow().eye(),
            look_at: self.camera.borrow().pose().look_at,
            agent_position: self.agent.borrow().position(),
        };

        self.frame += 1;
        record
    }

    pub fn mode(&self) -> CameraMode {
        self.controller.current_mode()
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.borrow().pose()
    }

    pub fn camera(&self) -> &SharedCamera {
        &self.camera
    }

    pub fn controller(&self) -> &CameraModeController<Tweens, PathFollower> {
        &self.controller
    }

    pub fn tweens(&self) -> &Rc<RefCell<Tweens>> {
        &self.tweens
    }

    pub fn agent(&self) -> &Rc<RefCell<PathFollower>> {
        &self.agent
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
