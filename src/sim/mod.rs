//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One tick per sensor sample, no wall clock
//! - Stable iteration order (tile insertion order)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod engine;
pub mod motion;
pub mod rect;
pub mod session;
pub mod tile;

pub use ball::Ball;
pub use collision::{Outcome, first_hit, scan_tiles};
pub use engine::{LabyrinthEngine, TiltSample};
pub use motion::{ShakeMonitor, ShakeReading};
pub use rect::Aabb;
pub use session::{Session, SessionConfig, SessionPhase, TickReport};
pub use tile::{Tile, TileKind};
