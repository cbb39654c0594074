use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use crate::math::heading_from_direction;

/// Camera handle shared between the controller and tween callbacks
pub type SharedCamera = Rc<RefCell<Camera>>;

/// Where the camera sits and what it looks at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub const fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Pack into tween fields: position xyz then look-at xyz
    pub fn to_fields(&self) -> [f32; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.look_at.x,
            self.look_at.y,
            self.look_at.z,
        ]
    }

    /// Inverse of `to_fields`. Missing trailing fields read as zero.
    pub fn from_fields(fields: &[f32]) -> Self {
        let at = |i: usize| fields.get(i).copied().unwrap_or(0.0);
        Self {
            position: Vec3::new(at(0), at(1), at(2)),
            look_at: Vec3::new(at(3), at(4), at(5)),
        }
    }
}

/// How the pose maps to the eye in world space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    /// Pose is the follow rig; the eye hangs off it at `follow_offset`
    Rig,
    /// Pose is the eye itself
    Free,
}

/// Scene camera with an optional follow rig
#[derive(Debug, Clone)]
pub struct Camera {
    pose: CameraPose,
    follow_offset: Vec3,
    mount: Mount,
    writes: u64,
}

impl Camera {
    pub fn new(pose: CameraPose, follow_offset: Vec3) -> Self {
        Self {
            pose,
            follow_offset,
            mount: Mount::Free,
            writes: 0,
        }
    }

    pub fn shared(self) -> SharedCamera {
        Rc::new(RefCell::new(self))
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn mount(&self) -> Mount {
        self.mount
    }

    pub fn follow_offset(&self) -> Vec3 {
        self.follow_offset
    }

    /// Number of pose writes applied so far
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Write the rig pose; the eye follows at the rig offset
    pub fn set_rig_pose(&mut self, pose: CameraPose) {
        self.mount = Mount::Rig;
        self.apply(pose);
    }

    /// Write a world-space eye pose, detaching from the rig
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.mount = Mount::Free;
        self.apply(pose);
    }

    fn apply(&mut self, pose: CameraPose) {
        self.pose = pose;
        self.writes += 1;
    }

    /// Rig yaw, derived from the direction the rig looks in
    pub fn rig_yaw(&self) -> f32 {
        heading_from_direction(self.pose.look_at - self.pose.position)
    }

    /// Eye position in world space
    pub fn eye(&self) -> Vec3 {
        match self.mount {
            Mount::Rig => {
                self.pose.position + Quat::from_rotation_y(self.rig_yaw()) * self.follow_offset
            }
            Mount::Free => self.pose.position,
        }
    }

    /// World-space pose as seen by the renderer
    pub fn world_pose(&self) -> CameraPose {
        CameraPose::new(self.eye(), self.pose.look_at)
    }

    pub fn forward(&self) -> Vec3 {
        (self.pose.look_at - self.eye()).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.pose.look_at, Vec3::Y)
    }
}
