pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod frame;
pub mod loaders;
pub mod math;
pub mod mode;
pub mod scene;
pub mod trace;
pub mod traits;

pub use camera::{Camera, CameraPose};
pub use config::{Destination, TourConfig};
pub use error::TourError;
pub use mode::CameraMode;
pub use scene::Scene;
