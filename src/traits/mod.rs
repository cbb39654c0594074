pub mod agent;
pub mod tween;

pub use agent::*;
pub use tween::*;
