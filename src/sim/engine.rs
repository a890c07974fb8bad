//! Labyrinth engine: tilt in, outcome out
//!
//! Owns the ball and the current level. Stateless with respect to outcomes: a
//! ball sitting in a hole reports `Failed` on every tick until someone resets it.

use glam::{Vec2, Vec3};

use super::ball::Ball;
use super::collision::{Outcome, scan_tiles};
use super::rect::Aabb;
use super::tile::Tile;
use crate::LevelError;
use crate::levels::{Level, LevelSpec};
use crate::settings::PhysicsTuning;

/// One accelerometer reading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltSample {
    pub x: f32,
    pub y: f32,
    /// Not used by the integrator
    pub z: f32,
}

impl TiltSample {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// The two axes that drive the ball
    pub fn planar(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec3> for TiltSample {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[f32; 3]> for TiltSample {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

pub struct LabyrinthEngine {
    ball: Ball,
    level: Option<Level>,
}

impl LabyrinthEngine {
    /// Create an engine for a ball of the given radius. Tiles are `2 * radius` wide.
    pub fn new(radius: f32, tuning: PhysicsTuning) -> Self {
        Self {
            ball: Ball::new(radius, tuning),
            level: None,
        }
    }

    /// Surface geometry is known
    pub fn set_surface(&mut self, width: u32, height: u32) {
        self.ball.set_bounds(width, height);
    }

    pub fn tile_size(&self) -> f32 {
        self.ball.radius() * 2.0
    }

    /// Build and install a level, placing the ball at rest on its START tile
    ///
    /// On error the previous level (if any) stays loaded.
    pub fn load_level(&mut self, spec: &LevelSpec) -> Result<(), LevelError> {
        let level = spec.build(self.tile_size())?;
        self.ball.set_start(&level.start_tile().rect);
        self.ball.reset();
        log::info!(
            "Loaded level '{}' ({} tiles, start at {})",
            level.name(),
            level.tiles().len(),
            level.start_tile().cell
        );
        self.level = Some(level);
        Ok(())
    }

    /// Feed one tilt sample and report what the ball hit
    pub fn on_tilt(&mut self, sample: TiltSample) -> Outcome {
        if !sample.is_finite() {
            log::warn!("Discarding non-finite tilt sample {sample:?}");
            return Outcome::Continue;
        }

        let Some(bbox) = self.ball.integrate(sample.planar()) else {
            log::trace!("Tilt before ball setup, ignored");
            return Outcome::Continue;
        };

        let outcome = scan_tiles(self.tiles(), &bbox);
        if outcome.is_terminal() {
            log::info!("{outcome:?} at {}", self.ball.position());
        }
        outcome
    }

    /// Put the ball back on the START tile at rest
    pub fn reset(&mut self) {
        self.ball.reset();
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn tiles(&self) -> &[Tile] {
        match &self.level {
            Some(level) => level.tiles(),
            None => &[],
        }
    }

    pub fn level_name(&self) -> Option<&str> {
        self.level.as_ref().map(|level| level.name())
    }

    pub fn position(&self) -> Vec2 {
        self.ball.position()
    }

    pub fn velocity(&self) -> Vec2 {
        self.ball.velocity()
    }

    pub fn bounding_box(&self) -> Aabb {
        self.ball.bounding_box()
    }

    pub fn radius(&self) -> f32 {
        self.ball.radius()
    }
}
