use crate::core::tween::Tween;

/// Opaque reference to one in-flight tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenHandle(u64);

impl TweenHandle {
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Tween scheduling seen from the camera controller
///
/// Ticking is the host loop's job; the controller only starts and cancels.
pub trait TweenDriver {
    /// Register a tween; it runs from the next update on
    fn start(&mut self, tween: Tween) -> TweenHandle;

    /// Drop a tween immediately. None of its callbacks fire afterwards.
    /// Returns false when the handle was not live.
    fn cancel(&mut self, handle: TweenHandle) -> bool;

    /// Whether the tween is still running (including later chained stages)
    fn is_active(&self, handle: TweenHandle) -> bool;

    /// Number of live tweens
    fn active_count(&self) -> usize;
}
