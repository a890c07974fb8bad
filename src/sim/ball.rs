//! Ball state and tilt integrator

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::rect::Aabb;
use crate::settings::PhysicsTuning;

/// The player's ball
///
/// Velocity is in pixels per tick. Tilt is integrated with a crossed-axis
/// mapping: the device's x tilt moves the ball vertically and the y tilt moves
/// it horizontally (the surface is rotated relative to the sensor frame).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    radius: f32,
    pos: Vec2,
    vel: Vec2,
    /// Surface size, unknown until the surface is laid out
    bounds: Option<UVec2>,
    /// Center of the START tile
    initial_pos: Option<Vec2>,
    tuning: PhysicsTuning,
}

impl Ball {
    pub fn new(radius: f32, tuning: PhysicsTuning) -> Self {
        Self {
            radius,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            bounds: None,
            initial_pos: None,
            tuning,
        }
    }

    /// Set the simulation area (surface width and height)
    pub fn set_bounds(&mut self, width: u32, height: u32) {
        self.bounds = Some(UVec2::new(width, height));
    }

    /// Place the ball on a START tile rect and remember it as the reset point
    pub fn set_start(&mut self, start: &Aabb) {
        let initial = start.min + Vec2::splat(self.radius);
        self.initial_pos = Some(initial);
        self.pos = initial;
    }

    /// Both bounds and start position are known
    pub fn is_ready(&self) -> bool {
        self.bounds.is_some() && self.initial_pos.is_some()
    }

    /// Advance one tick from a raw tilt sample
    ///
    /// Returns the new bounding box, or `None` (with no state change) while the
    /// ball has no bounds or start position yet.
    pub fn integrate(&mut self, tilt: Vec2) -> Option<Aabb> {
        let bounds = self.bounds?;
        self.initial_pos?;

        let max = self.tuning.max_speed;
        self.vel += tilt / self.tuning.compensator;
        self.vel = self.vel.clamp(Vec2::splat(-max), Vec2::splat(max));

        // x is resolved first; a bounce there only changes vel.y, which y doesn't read
        self.set_x(self.pos.x + self.vel.y, bounds.x as f32);
        self.set_y(self.pos.y + self.vel.x, bounds.y as f32);

        Some(self.bounding_box())
    }

    fn set_x(&mut self, x: f32, width: f32) {
        self.pos.x = x;
        if x < self.radius {
            self.pos.x = self.radius;
            self.vel.y = -self.vel.y / self.tuning.rebound;
        } else if x > width - self.radius {
            self.pos.x = width - self.radius;
            self.vel.y = -self.vel.y / self.tuning.rebound;
        }
    }

    fn set_y(&mut self, y: f32, height: f32) {
        self.pos.y = y;
        if y < self.radius {
            self.pos.y = self.radius;
            self.vel.x = -self.vel.x / self.tuning.rebound;
        } else if y > height - self.radius {
            self.pos.y = height - self.radius;
            self.vel.x = -self.vel.x / self.tuning.rebound;
        }
    }

    /// Stop the ball and put it back on its start position
    pub fn reset(&mut self) {
        self.vel = Vec2::ZERO;
        if let Some(initial) = self.initial_pos {
            self.pos = initial;
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::around(self.pos, self.radius)
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn bounds(&self) -> Option<UVec2> {
        self.bounds
    }

    pub fn initial_position(&self) -> Option<Vec2> {
        self.initial_pos
    }
}
