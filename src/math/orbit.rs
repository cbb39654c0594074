use glam::Vec3;

/// Point on a horizontal circle around `center`, at absolute `height`
///
/// Angle 0 sits on +X from the center, angle π/2 on +Z.
pub fn orbit_position(center: Vec3, radius: f32, height: f32, angle: f32) -> Vec3 {
    Vec3::new(
        center.x + radius * angle.cos(),
        height,
        center.z + radius * angle.sin(),
    )
}

/// Point one unit ahead of `position` along a yaw heading
pub fn look_ahead(position: Vec3, heading: f32) -> Vec3 {
    position + Vec3::new(heading.sin(), 0.0, heading.cos())
}

/// Yaw of a direction in the XZ plane, inverse of `look_ahead`
pub fn heading_from_direction(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z)
}
