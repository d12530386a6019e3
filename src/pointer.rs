// Latest pointer position and the repulsion it exerts on nearby particles.

use crate::config::FieldConfig;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerTracker {
    position: Option<[f64; 2]>,
}

impl PointerTracker {
    pub fn new() -> Self {
        PointerTracker { position: None }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.position = Some([x, y]);
    }

    // Pointer left the viewport
    pub fn leave(&mut self) {
        self.position = None;
    }

    pub fn position(&self) -> Option<[f64; 2]> {
        self.position
    }
}

/// Scalar push applied at `distance` from the pointer: linear from
/// `repulsion_strength` at the pointer down to zero at the interaction radius.
pub fn repulsion_strength(distance: f64, config: &FieldConfig) -> f64 {
    let radius = config.interaction_radius;
    if distance < 0.0 || !(distance < radius) {
        return 0.0;
    }
    (radius - distance) / radius * config.repulsion_strength
}

/// Displacement to add to a particle at `pos`, pushing it away from `pointer`.
///
/// A particle sitting exactly on the pointer has no direction to be pushed
/// in and is left where it is.
pub fn repulsion(pos: [f64; 2], pointer: [f64; 2], config: &FieldConfig) -> [f64; 2] {
    let to_pointer = glm::vec2(pointer[0] - pos[0], pointer[1] - pos[1]);
    let distance = glm::length(&to_pointer);
    if distance <= 0.0 || !(distance < config.interaction_radius) {
        return [0.0, 0.0];
    }
    let push = -(to_pointer / distance) * repulsion_strength(distance, config);
    [push.x, push.y]
}
