mod easing;
mod orbit;

pub use easing::{lerp, lerp_vec3, Easing};
pub use orbit::{heading_from_direction, look_ahead, orbit_position};
