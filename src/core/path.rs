use glam::{Mat4, Quat, Vec3};
use log::{debug, info};

use crate::loaders::CarModel;
use crate::math::heading_from_direction;
use crate::traits::agent::TrackedAgent;

/// Distance at which a waypoint counts as reached
const ARRIVE_EPSILON: f32 = 1e-4;

/// Ordered waypoints with a cursor on the one currently being approached
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    waypoints: Vec<Vec3>,
    index: usize,
    looped: bool,
}

impl Path {
    pub fn new(waypoints: Vec<Vec3>, looped: bool) -> Self {
        Self {
            waypoints,
            index: 0,
            looped,
        }
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    /// Waypoint currently being approached
    pub fn current(&self) -> Option<Vec3> {
        self.waypoints.get(self.index).copied()
    }

    /// Move the cursor on. Wraps when looped, otherwise sticks at the last waypoint.
    pub fn advance(&mut self) {
        if self.waypoints.is_empty() {
            return;
        }
        if self.index + 1 < self.waypoints.len() {
            self.index += 1;
        } else if self.looped {
            self.index = 0;
        }
    }

    pub fn finished(&self) -> bool {
        !self.looped && self.index + 1 >= self.waypoints.len()
    }

    /// Sum of segment lengths, including the closing segment when looped
    pub fn length(&self) -> f32 {
        let open: f32 = self
            .waypoints
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum();
        match (self.looped, self.waypoints.first(), self.waypoints.last()) {
            (true, Some(first), Some(last)) => open + last.distance(*first),
            _ => open,
        }
    }
}

/// Car model bound to an agent; its transform mirrors the agent's world matrix
#[derive(Debug, Clone)]
pub struct RenderComponent {
    pub model: CarModel,
    pub matrix: Mat4,
}

/// Kinematic path follower: constant speed, heading along the current segment
#[derive(Debug, Clone)]
pub struct PathFollower {
    path: Path,
    position: Vec3,
    heading: f32,
    max_speed: f32,
    distance_travelled: f32,
    render_component: Option<RenderComponent>,
}

impl PathFollower {
    /// Place the agent on the path's first waypoint, facing the next one
    pub fn new(mut path: Path, max_speed: f32) -> Self {
        let position = path.current().unwrap_or(Vec3::ZERO);
        path.advance();
        let heading = path
            .current()
            .map(|next| next - position)
            .filter(|dir| dir.length_squared() > 0.0)
            .map(heading_from_direction)
            .unwrap_or(0.0);

        Self {
            path,
            position,
            heading,
            max_speed,
            distance_travelled: 0.0,
            render_component: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn distance_travelled(&self) -> f32 {
        self.distance_travelled
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(Quat::from_rotation_y(self.heading), self.position)
    }

    /// Attach the loaded model; from now on it follows the agent
    pub fn set_render_component(&mut self, model: CarModel) {
        info!("Render component attached: {}", model.name);
        self.render_component = Some(RenderComponent {
            model,
            matrix: self.world_matrix(),
        });
    }

    pub fn render_component(&self) -> Option<&RenderComponent> {
        self.render_component.as_ref()
    }

    fn sync(&mut self) {
        let matrix = self.world_matrix();
        if let Some(component) = self.render_component.as_mut() {
            component.matrix = matrix;
        }
    }
}

impl TrackedAgent for PathFollower {
    fn update(&mut self, delta: f32) {
        let mut budget = self.max_speed * delta.max(0.0);
        // Consecutive arrivals without movement; bounded for degenerate paths
        let mut idle_hops = 0;

        while budget > 0.0 && idle_hops <= self.path.waypoints().len() {
            let Some(target) = self.path.current() else {
                break;
            };
            let to_target = target - self.position;
            let distance = to_target.length();

            if distance <= ARRIVE_EPSILON {
                if self.path.finished() {
                    break;
                }
                self.path.advance();
                idle_hops += 1;
                debug!("Agent heading to waypoint {:?}", self.path.current());
                continue;
            }

            self.heading = heading_from_direction(to_target);
            let step = budget.min(distance);
            if step < distance {
                self.position += to_target / distance * step;
            } else {
                self.position = target;
            }
            self.distance_travelled += step;
            budget -= step;
            idle_hops = 0;
        }

        self.sync();
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn heading(&self) -> f32 {
        self.heading
    }

    fn has_render_component(&self) -> bool {
        self.render_component.is_some()
    }
}
