// Simple particle struct to keep track of individual position, velocity, and size

use rand::Rng;

use crate::config::FieldConfig;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, radius: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
        }
    }
}

/// Upper bound on the store size. Linking is quadratic in the count.
pub const MAX_PARTICLES: usize = 2000;

/// Number of particles for a viewport of the given width, at most
/// [`MAX_PARTICLES`].
pub fn particle_count(width: f64, config: &FieldConfig) -> usize {
    let count = (width / config.density_divisor).floor();
    if count.is_nan() || count <= 0.0 {
        0
    } else if count >= MAX_PARTICLES as f64 {
        MAX_PARTICLES
    } else {
        count as usize
    }
}

/// Builds a fresh particle collection for the viewport. Nothing from a
/// previous collection is carried over.
pub fn regenerate<R: Rng>(
    width: f64,
    height: f64,
    config: &FieldConfig,
    rng: &mut R,
) -> Vec<Particle> {
    let count = particle_count(width, config);
    let min_radius = config.min_radius.min(config.max_radius);
    let max_radius = config.min_radius.max(config.max_radius);
    let mut particles = Vec::with_capacity(count);
    for _ in 0..count {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * config.speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * config.speed;
        let radius = (rng.gen::<f64>() * (max_radius - min_radius) + min_radius).max(0.0);
        particles.push(Particle::new(pos_x, pos_y, vel_x, vel_y, radius));
    }
    log::debug!(
        "regenerated {} particles for {}x{} viewport",
        count,
        width,
        height
    );
    particles
}
