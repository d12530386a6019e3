//! Tunables for the particle field. Every field has a default matching the
//! site's original look, so a partial JS object is enough to override one.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::palette::Theme;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// One particle per this many pixels of viewport width.
    pub density_divisor: f64,
    /// Velocity components are drawn from `(-speed / 2, speed / 2)`.
    pub speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Pointer repulsion radius.
    pub interaction_radius: f64,
    /// Displacement at zero distance from the pointer.
    pub repulsion_strength: f64,
    /// Particles closer than this get a connector line.
    pub link_distance: f64,
    pub line_width: f64,
    pub theme: Theme,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            density_divisor: 15.0,
            speed: 0.5,
            min_radius: 1.0,
            max_radius: 3.0,
            interaction_radius: 150.0,
            repulsion_strength: 5.0,
            link_distance: 150.0,
            line_width: 1.0,
            theme: Theme::default(),
        }
    }
}

impl FieldConfig {
    /// Rejects values the field cannot draw with: non-finite or non-positive
    /// sizes and an inverted radius range.
    pub fn validate(&self) -> Result<(), FieldError> {
        let positive = [
            ("density_divisor", self.density_divisor),
            ("min_radius", self.min_radius),
            ("max_radius", self.max_radius),
            ("interaction_radius", self.interaction_radius),
            ("repulsion_strength", self.repulsion_strength),
            ("link_distance", self.link_distance),
            ("line_width", self.line_width),
        ];
        for (name, value) in positive.iter() {
            if !(value.is_finite() && *value > 0.0) {
                return Err(FieldError::Config(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(FieldError::Config(format!(
                "speed must be finite and not negative, got {}",
                self.speed
            )));
        }
        if self.min_radius > self.max_radius {
            return Err(FieldError::Config(format!(
                "min_radius {} is larger than max_radius {}",
                self.min_radius, self.max_radius
            )));
        }
        Ok(())
    }
}
