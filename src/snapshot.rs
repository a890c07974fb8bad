//! Ball state published for a render loop
//!
//! The session is the only writer. Readers may live on another thread and
//! always see a whole snapshot, never a half-updated one.

use std::sync::Arc;

use glam::Vec2;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::sim::{Aabb, Ball};

/// Copy of everything a renderer needs to draw the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub bounding_box: Aabb,
    pub radius: f32,
}

impl From<&Ball> for BallSnapshot {
    fn from(ball: &Ball) -> Self {
        Self {
            position: ball.position(),
            velocity: ball.velocity(),
            bounding_box: ball.bounding_box(),
            radius: ball.radius(),
        }
    }
}

/// Shared handle to the latest snapshot
#[derive(Debug, Clone)]
pub struct SnapshotCell {
    inner: Arc<RwLock<BallSnapshot>>,
}

impl SnapshotCell {
    pub fn new(initial: BallSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn publish(&self, snapshot: BallSnapshot) {
        *self.inner.write() = snapshot;
    }

    pub fn read(&self) -> BallSnapshot {
        *self.inner.read()
    }
}
