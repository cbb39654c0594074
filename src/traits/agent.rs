use glam::Vec3;

/// Entity the camera follows in tracking mode
///
/// Owned and advanced by the simulation side; the camera only reads it.
pub trait TrackedAgent {
    /// Advance the agent by `delta` seconds
    fn update(&mut self, delta: f32);

    /// World position
    fn position(&self) -> Vec3;

    /// Yaw in radians; heading 0 faces +Z
    fn heading(&self) -> f32;

    /// Whether the render-bound asset has finished loading and is attached
    fn has_render_component(&self) -> bool;
}
