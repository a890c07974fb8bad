//! Tilt Labyrinth - a tilt-controlled ball maze
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball integrator, tile collisions, session state)
//! - `levels`: Declarative level data and validation
//! - `settings`: Data-driven tuning and display configuration
//! - `ambient`: Tint mapping for the magnetic and light sensors
//! - `snapshot`: Read-only ball state for a render loop

pub mod ambient;
pub mod error;
pub mod levels;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use error::{LevelError, SessionError, SettingsError};
pub use levels::{LevelSpec, TileSpec};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Maximum speed of the ball along either axis (pixels per tick)
    pub const MAX_SPEED: f32 = 4.0;
    /// Divides raw tilt before it is added to velocity
    pub const COMPENSATOR: f32 = 8.0;
    /// Velocity divisor applied on a wall bounce
    pub const REBOUND: f32 = 1.75;

    /// Screen pixels not available to the playing surface (status/action bars)
    pub const RESERVED_HEIGHT: u32 = 143;
    /// Playing surface height expressed in ball radii
    pub const SURFACE_RATIO: u32 = 25;

    /// Standard gravity, resting magnitude of the accelerometer (m/s²)
    pub const GRAVITY_EARTH: f64 = 9.806_65;
    /// Samples per shake measurement window
    pub const SHAKE_WINDOW: u32 = 50;
    /// Average jerk above which the device counts as shaking
    pub const SHAKE_LIMIT: f64 = 0.3;
}

/// Magnitude of a raw three-axis sensor reading
#[inline]
pub fn field_magnitude(x: f32, y: f32, z: f32) -> f64 {
    let (x, y, z) = (x as f64, y as f64, z as f64);
    (x * x + y * y + z * z).sqrt()
}

