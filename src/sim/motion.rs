//! Shake detection from the raw accelerometer stream
//!
//! Tracks a smoothed jerk (change in acceleration magnitude) and reports its
//! average once per window.

use serde::{Deserialize, Serialize};

use crate::consts::GRAVITY_EARTH;
use crate::field_magnitude;
use crate::settings::ShakeConfig;

/// Average jerk over one full window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShakeReading {
    pub average: f64,
    /// Average is above the configured limit
    pub shaking: bool,
}

#[derive(Debug, Clone)]
pub struct ShakeMonitor {
    config: ShakeConfig,
    accel: f64,
    current: f64,
    last: f64,
    count: u32,
    sum: f64,
}

impl ShakeMonitor {
    pub fn new(config: ShakeConfig) -> Self {
        Self {
            config,
            accel: 0.0,
            current: GRAVITY_EARTH,
            last: GRAVITY_EARTH,
            count: 0,
            sum: 0.0,
        }
    }

    /// Feed one sample; returns a reading when a window completes
    pub fn push(&mut self, x: f32, y: f32, z: f32) -> Option<ShakeReading> {
        self.last = self.current;
        self.current = field_magnitude(x, y, z);
        self.accel = self.accel * 0.9 + (self.current - self.last);

        self.sum += self.accel.abs();
        self.count += 1;

        let window = self.config.window.max(1);
        if self.count < window {
            return None;
        }

        let average = self.sum / window as f64;
        self.count = 0;
        self.sum = 0.0;

        Some(ShakeReading {
            average,
            shaking: average > self.config.limit,
        })
    }

    /// Forget any partial window and smoothing state
    pub fn clear(&mut self) {
        *self = Self::new(self.config);
    }

    /// Current smoothed jerk
    pub fn acceleration(&self) -> f64 {
        self.accel
    }
}
