//! The particle field: a drifting set of dots that bounce off the viewport
//! edges, shy away from the pointer and link up with nearby neighbours.
//!
//! The field owns all of its state. A host drives it by forwarding viewport
//! and pointer changes and calling [`ParticleField::frame`] once per display
//! refresh; each call is one unit time step.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::FieldConfig;
use crate::palette::{Palette, Theme};
use crate::particle::{self, Particle};
use crate::pointer::{self, PointerTracker};
use crate::surface::DrawingSurface;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldState {
    Stopped,
    Running,
}

pub struct ParticleField<S: DrawingSurface> {
    surface: S,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    theme: Theme,
    pointer: PointerTracker,
    config: FieldConfig,
    rng: StdRng,
    state: FieldState,
}

impl<S: DrawingSurface> ParticleField<S> {
    pub fn new(surface: S, width: f64, height: f64) -> Self {
        Self::with_config(surface, width, height, FieldConfig::default())
    }

    pub fn with_config(surface: S, width: f64, height: f64, config: FieldConfig) -> Self {
        Self::with_rng(surface, width, height, config, StdRng::from_entropy())
    }

    pub fn with_rng(
        surface: S,
        width: f64,
        height: f64,
        config: FieldConfig,
        mut rng: StdRng,
    ) -> Self {
        let particles = particle::regenerate(width, height, &config, &mut rng);
        ParticleField {
            surface,
            width,
            height,
            particles,
            theme: config.theme,
            pointer: PointerTracker::new(),
            config,
            rng,
            state: FieldState::Stopped,
        }
    }

    /// Replaces the whole particle collection for the new viewport.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.particles = particle::regenerate(width, height, &self.config, &mut self.rng);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            log::info!("particle theme {} -> {}", self.theme, theme);
        }
        self.theme = theme;
    }

    /// Unknown ids fall back to the default theme.
    pub fn set_theme_id(&mut self, id: &str) {
        self.set_theme(Theme::from_id_or_default(id));
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.move_to(x, y);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.leave();
    }

    pub fn pointer(&self) -> Option<[f64; 2]> {
        self.pointer.position()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == FieldState::Running
    }

    pub fn start(&mut self) {
        if self.state != FieldState::Running {
            log::info!("particle field started with {} particles", self.particles.len());
            self.state = FieldState::Running;
        }
    }

    pub fn stop(&mut self) {
        if self.state != FieldState::Stopped {
            log::info!("particle field stopped");
            self.state = FieldState::Stopped;
        }
    }

    /// Runs one frame if the field is running. Returns whether the host should
    /// schedule another one.
    pub fn frame(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.tick();
        true
    }

    /// Advances every particle one step and draws the result.
    ///
    /// Particles are handled in store order, and each one is linked against
    /// the particles after it before those have moved this frame.
    pub fn tick(&mut self) {
        self.surface.clear(self.width, self.height);
        let palette = self.palette();
        let pointer = self.pointer.position();

        for i in 0..self.particles.len() {
            let p = {
                let p = &mut self.particles[i];
                p.pos[0] += p.vel[0];
                p.pos[1] += p.vel[1];

                // Bounce, without clamping back inside
                if p.pos[0] < 0.0 || p.pos[0] > self.width {
                    p.vel[0] = -p.vel[0];
                }
                if p.pos[1] < 0.0 || p.pos[1] > self.height {
                    p.vel[1] = -p.vel[1];
                }

                if let Some(pointer) = pointer {
                    let push = pointer::repulsion(p.pos, pointer, &self.config);
                    p.pos[0] += push[0];
                    p.pos[1] += push[1];
                }
                *p
            };

            self.surface.fill_disk(p.pos, p.radius, &palette.fill);

            for other in &self.particles[i + 1..] {
                let distance = glm::distance(
                    &glm::vec2(p.pos[0], p.pos[1]),
                    &glm::vec2(other.pos[0], other.pos[1]),
                );
                if distance < self.config.link_distance {
                    self.surface
                        .line(p.pos, other.pos, self.config.line_width, &palette.line);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::colors_for;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn field(width: f64, height: f64) -> ParticleField<RecordingSurface> {
        ParticleField::with_rng(
            RecordingSurface::new(),
            width,
            height,
            FieldConfig::default(),
            StdRng::seed_from_u64(3),
        )
    }

    fn still(x: f64, y: f64) -> Particle {
        Particle::new(x, y, 0.0, 0.0, 2.0)
    }

    #[test]
    fn viewport_sets_particle_count() {
        let mut field = field(1500.0, 800.0);
        assert_eq!(field.particles().len(), 100);
        field.resize(300.0, 200.0);
        assert_eq!(field.particles().len(), 20);
        assert_eq!(field.viewport(), (300.0, 200.0));
    }

    #[test]
    fn frame_clears_then_draws_every_particle() {
        let mut field = field(600.0, 400.0);
        field.tick();
        let commands = field.surface_mut().take();
        assert_eq!(
            commands[0],
            DrawCommand::Clear {
                width: 600.0,
                height: 400.0
            }
        );
        let disks = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Disk { .. }))
            .count();
        assert_eq!(disks, 40);
    }

    #[test]
    fn bounce_flips_velocity_and_keeps_it() {
        let mut field = field(100.0, 100.0);
        field.particles = vec![Particle::new(99.9, 50.0, 0.25, 0.0, 1.0)];

        field.tick();
        let p = field.particles()[0];
        assert_eq!(p.vel[0], -0.25);
        // No clamping: the particle is briefly outside
        assert!(p.pos[0] > 100.0);

        field.tick();
        field.tick();
        let p = field.particles()[0];
        assert_eq!(p.vel[0], -0.25);
        assert!(p.pos[0] < 100.0);
    }

    #[test]
    fn bounce_axes_are_independent() {
        let mut field = field(100.0, 100.0);
        field.particles = vec![Particle::new(50.0, 0.1, 0.2, -0.25, 1.0)];
        field.tick();
        let p = field.particles()[0];
        assert_eq!(p.vel, [0.2, 0.25]);
    }

    #[test]
    fn pointer_on_particle_leaves_it_finite() {
        let mut field = field(400.0, 400.0);
        field.particles = vec![still(120.0, 80.0)];
        field.pointer_moved(120.0, 80.0);
        field.tick();
        assert_eq!(field.particles()[0].pos, [120.0, 80.0]);
    }

    #[test]
    fn pointer_pushes_close_particles_only() {
        let mut field = field(1000.0, 1000.0);
        field.particles = vec![still(100.0, 100.0), still(600.0, 100.0)];
        field.pointer_moved(130.0, 100.0);
        field.tick();
        let near = field.particles()[0];
        let far = field.particles()[1];
        // (150 - 30) / 150 * 5 = 4, pushed away along -x
        assert!((near.pos[0] - 96.0).abs() < 1e-9);
        assert_eq!(near.pos[1], 100.0);
        assert_eq!(far.pos, [600.0, 100.0]);

        field.pointer_left();
        field.tick();
        assert!((field.particles()[0].pos[0] - 96.0).abs() < 1e-9);
    }

    #[test]
    fn links_pairs_closer_than_link_distance() {
        let mut field = field(1000.0, 1000.0);
        field.particles = vec![still(0.0, 0.0), still(149.9, 0.0)];
        field.tick();
        assert_eq!(field.surface().lines().count(), 1);

        field.surface_mut().take();
        field.particles = vec![still(0.0, 0.0), still(150.1, 0.0)];
        field.tick();
        assert_eq!(field.surface().lines().count(), 0);
    }

    #[test]
    fn each_close_pair_is_linked_once() {
        let mut field = field(1000.0, 1000.0);
        field.particles = vec![
            still(0.0, 0.0),
            still(100.0, 0.0),
            still(200.0, 0.0),
            still(900.0, 900.0),
        ];
        field.tick();
        let lines: Vec<_> = field.surface().lines().cloned().collect();
        // (0,1) and (1,2) are within reach, (0,2) is 200 apart
        assert_eq!(lines.len(), 2);
        for line in lines {
            match line {
                DrawCommand::Line {
                    width, color, from, to,
                } => {
                    assert_eq!(width, 1.0);
                    assert_eq!(color, colors_for("cyberpunk").line);
                    assert!((from[0] - to[0]).abs() < 150.0);
                }
                other => panic!("unexpected command {:?}", other),
            }
        }

        field.surface_mut().take();
        field.particles.reverse();
        field.tick();
        assert_eq!(field.surface().lines().count(), 2);
    }

    #[test]
    fn theme_changes_draw_colors() {
        let mut field = field(1000.0, 1000.0);
        field.particles = vec![still(10.0, 10.0)];
        field.set_theme_id("retro");
        field.tick();
        match field.surface().disks().next() {
            Some(DrawCommand::Disk { color, .. }) => {
                assert_eq!(*color, colors_for("retro").fill)
            }
            other => panic!("expected a disk, got {:?}", other),
        }

        field.set_theme_id("nonexistent");
        assert_eq!(field.theme(), Theme::Cyberpunk);
        assert_eq!(field.palette(), colors_for("cyberpunk"));
    }

    #[test]
    fn frames_only_run_while_started() {
        let mut field = field(300.0, 300.0);
        assert_eq!(field.state(), FieldState::Stopped);
        assert!(!field.frame());
        assert!(field.surface().commands.is_empty());

        field.start();
        assert!(field.frame());
        assert!(!field.surface().commands.is_empty());

        field.stop();
        field.surface_mut().take();
        assert!(!field.frame());
        assert!(field.surface().commands.is_empty());
        assert!(!field.is_running());
    }
}
