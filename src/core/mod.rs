pub mod clock;
pub mod controller;
pub mod path;
pub mod tween;

pub use clock::Clock;
pub use controller::{tracking_pose, CameraModeController, FrameOutcome};
pub use path::{Path, PathFollower, RenderComponent};
pub use tween::{Repeat, Tween, TweenInfo, Tweens};
