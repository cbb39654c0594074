use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path as FsPath;

use crate::camera::CameraPose;
use crate::error::{ConfigSource, Result, TourError};
use crate::math::{orbit_position, Easing};
use crate::mode::CameraMode;

/// Everything needed to build a scene: car path, camera rig, destinations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    pub path: PathConfig,
    pub camera: CameraConfig,
    pub destinations: Destinations,
    /// Frame rate of the headless host loop
    pub fps: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub waypoints: Vec<Vec3>,
    pub looped: bool,
    pub max_speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial_position: Vec3,
    pub initial_look_at: Vec3,
    /// Eye offset from the follow rig, in the rig's local frame
    pub follow_offset: Vec3,
}

/// Scripted camera target for each non-tracking mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Destinations {
    pub education: Destination,
    pub experience: Destination,
    pub projects: Destination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Destination {
    /// Fly to a fixed pose and stay there
    Fixed {
        position: Vec3,
        look_at: Vec3,
        duration: f32,
        #[serde(default)]
        easing: Easing,
    },
    /// Approach the orbit start, then circle `center` forever
    Orbit {
        center: Vec3,
        radius: f32,
        height: f32,
        approach_duration: f32,
        /// Seconds per full turn
        period: f32,
        #[serde(default)]
        easing: Easing,
    },
}

impl Destination {
    /// Pose the camera reaches when the approach completes
    pub fn arrival_pose(&self) -> CameraPose {
        match *self {
            Destination::Fixed {
                position, look_at, ..
            } => CameraPose::new(position, look_at),
            Destination::Orbit {
                center,
                radius,
                height,
                ..
            } => CameraPose::new(orbit_position(center, radius, height, 0.0), center),
        }
    }

    fn validate(&self, mode: CameraMode) -> Result<()> {
        let invalid = |what: &str| -> Result<()> {
            Err(TourError::Validation(format!("{mode}: {what}")))
        };
        match *self {
            Destination::Fixed { duration, .. } if !(duration >= 0.0) => {
                invalid("duration must be non-negative")
            }
            Destination::Orbit {
                radius,
                approach_duration,
                period,
                ..
            } => {
                if !(radius > 0.0) {
                    invalid("orbit radius must be positive")
                } else if !(approach_duration >= 0.0) {
                    invalid("approach duration must be non-negative")
                } else if !(period > 0.0) {
                    invalid("orbit period must be positive")
                } else {
                    Ok(())
                }
            }
            Destination::Fixed { .. } => Ok(()),
        }
    }
}

impl Destinations {
    /// Destination for `mode`; `None` for the tracking mode
    pub fn get(&self, mode: CameraMode) -> Option<&Destination> {
        match mode {
            CameraMode::Home => None,
            CameraMode::Education => Some(&self.education),
            CameraMode::Experience => Some(&self.experience),
            CameraMode::Projects => Some(&self.projects),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            waypoints: vec![
                Vec3::new(60.0, 0.0, -80.0),
                Vec3::new(80.0, 0.0, 0.0),
                Vec3::new(60.0, 0.0, 80.0),
                Vec3::new(-60.0, 0.0, 80.0),
                Vec3::new(-80.0, 0.0, 0.0),
                Vec3::new(-60.0, 0.0, -80.0),
            ],
            looped: true,
            max_speed: 20.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_position: Vec3::new(62.685_604, 1.717_229, -84.089_88),
            initial_look_at: Vec3::new(0.0, -5.0, 200.0),
            follow_offset: Vec3::new(6.0, 3.0, -6.0),
        }
    }
}

impl Default for Destinations {
    fn default() -> Self {
        Self {
            education: Destination::Orbit {
                center: Vec3::new(100.0, 100.0, 100.0),
                radius: 50.0,
                height: 150.0,
                approach_duration: 3.0,
                period: 20.0,
                easing: Easing::CubicInOut,
            },
            experience: Destination::Fixed {
                position: Vec3::new(-30.0, 40.0, -60.0),
                look_at: Vec3::ZERO,
                duration: 2.5,
                easing: Easing::QuadraticInOut,
            },
            projects: Destination::Orbit {
                center: Vec3::ZERO,
                radius: 120.0,
                height: 60.0,
                approach_duration: 2.5,
                period: 30.0,
                easing: Easing::SineInOut,
            },
        }
    }
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            path: PathConfig::default(),
            camera: CameraConfig::default(),
            destinations: Destinations::default(),
            fps: 60.0,
        }
    }
}

impl TourConfig {
    /// Read a JSON config; omitted fields take their defaults
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self> {
        let path = path.as_ref();
        let wrap = |source: ConfigSource| TourError::Config {
            path: path.to_path_buf(),
            source,
        };

        let text = fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
        let config: TourConfig = serde_json::from_str(&text).map_err(|e| wrap(e.into()))?;
        config.validate()?;

        info!("Loaded tour config from {:?}", path);
        Ok(config)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.waypoints.len() < 2 {
            return Err(TourError::Validation(
                "path needs at least two waypoints".into(),
            ));
        }
        if !(self.path.max_speed > 0.0) {
            return Err(TourError::Validation("max_speed must be positive".into()));
        }
        if !(self.fps > 0.0) {
            return Err(TourError::Validation("fps must be positive".into()));
        }
        for mode in CameraMode::ALL {
            if let Some(destination) = self.destinations.get(mode) {
                destination.validate(mode)?;
            }
        }
        Ok(())
    }

    pub fn initial_pose(&self) -> CameraPose {
        CameraPose::new(self.camera.initial_position, self.camera.initial_look_at)
    }
}
