//! Colors driven by the ambient sensors
//!
//! The magnetic field tints the ball and ambient light picks the surface
//! background. Drawing is the renderer's job; this only classifies readings.

use serde::{Deserialize, Serialize};

/// Ball color bands by magnetic field strength (µT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BallTint {
    #[default]
    Lime,
    Rose,
    Orchid,
    Violet,
}

impl BallTint {
    pub fn from_magnetic_field(magnitude: f64) -> Self {
        if magnitude <= 100.0 {
            BallTint::Lime
        } else if magnitude <= 200.0 {
            BallTint::Rose
        } else if magnitude <= 300.0 {
            BallTint::Orchid
        } else {
            BallTint::Violet
        }
    }

    /// 0xRRGGBB
    pub fn rgb(&self) -> u32 {
        match self {
            BallTint::Lime => 0x66ff33,
            BallTint::Rose => 0xff0066,
            BallTint::Orchid => 0xff66ff,
            BallTint::Violet => 0x9900ff,
        }
    }
}

/// Surface background bands by ambient light (lux)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SurfaceTint {
    Gray,
    Blue,
    #[default]
    Cyan,
    Yellow,
}

impl SurfaceTint {
    pub fn from_luminosity(lux: f32) -> Self {
        if lux <= 100.0 {
            SurfaceTint::Gray
        } else if lux <= 200.0 {
            SurfaceTint::Blue
        } else if lux <= 290.0 {
            SurfaceTint::Cyan
        } else {
            SurfaceTint::Yellow
        }
    }

    pub fn rgb(&self) -> u32 {
        match self {
            SurfaceTint::Gray => 0x888888,
            SurfaceTint::Blue => 0x0000ff,
            SurfaceTint::Cyan => 0x00ffff,
            SurfaceTint::Yellow => 0xffff00,
        }
    }
}
