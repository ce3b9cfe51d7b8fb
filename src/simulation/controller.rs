//! Speed controller for the lane simulation
//!
//! A deterministic decision table: cruise at base speed while the lane
//! ahead is clear, drop to the configured caution speed once the gap
//! closes below the safe threshold. The larger awareness gap governs
//! only the advisory alert flag.

use anyhow::{ensure, Result};
use log::warn;

use super::sensor::SensorReading;
use super::types::{
    DEFAULT_AWARENESS_GAP, DEFAULT_CAUTION_FACTOR, DEFAULT_LOOP_LENGTH, DEFAULT_SAFE_GAP,
    DEFAULT_WRAP_MARGIN,
};

/// Reduced-speed policy applied while a vehicle is obstructed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CautionSpeed {
    /// The same fixed speed for every vehicle
    Fixed(f32),
    /// Each vehicle's own base speed scaled by a factor in `0.0..=1.0`
    FractionOfBase(f32),
}

impl CautionSpeed {
    /// Resolve the policy to a concrete speed for one vehicle
    pub fn resolve(&self, base_speed: f32) -> f32 {
        match self {
            CautionSpeed::Fixed(speed) => *speed,
            CautionSpeed::FractionOfBase(factor) => base_speed * factor,
        }
    }
}

/// Lane-wide configuration supplied by the driver at setup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneConfig {
    /// Minimum gap considered safe; below it the caution speed applies
    pub safe_gap: f32,
    /// Gap at which the advisory alert is raised; kept at or above
    /// `safe_gap` by validation
    pub awareness_gap: f32,
    /// Speed policy while obstructed
    pub caution: CautionSpeed,
    /// `Some(length)` makes the lane a loop of that length; `None`
    /// leaves it open-ended
    pub loop_length: Option<f32>,
    /// Distance past the end of the loop a vehicle travels before it is
    /// recycled to the start
    pub wrap_margin: f32,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            safe_gap: DEFAULT_SAFE_GAP,
            awareness_gap: DEFAULT_AWARENESS_GAP,
            caution: CautionSpeed::FractionOfBase(DEFAULT_CAUTION_FACTOR),
            loop_length: Some(DEFAULT_LOOP_LENGTH),
            wrap_margin: DEFAULT_WRAP_MARGIN,
        }
    }
}

impl LaneConfig {
    /// Check the configuration, clamping the awareness gap up to the
    /// safe gap so a vehicle forced to slow down is always flagged.
    pub fn validated(mut self) -> Result<Self> {
        ensure!(
            self.safe_gap.is_finite() && self.safe_gap >= 0.0,
            "safe gap must be finite and non-negative, got {}",
            self.safe_gap
        );
        ensure!(
            self.awareness_gap.is_finite() && self.awareness_gap >= 0.0,
            "awareness gap must be finite and non-negative, got {}",
            self.awareness_gap
        );
        match self.caution {
            CautionSpeed::Fixed(speed) => {
                ensure!(
                    speed.is_finite() && speed >= 0.0,
                    "caution speed must be finite and non-negative, got {}",
                    speed
                );
            }
            CautionSpeed::FractionOfBase(factor) => {
                ensure!(
                    factor.is_finite() && (0.0..=1.0).contains(&factor),
                    "caution factor must be within 0.0..=1.0, got {}",
                    factor
                );
            }
        }
        if let Some(length) = self.loop_length {
            ensure!(
                length.is_finite() && length > 0.0,
                "loop length must be finite and positive, got {}",
                length
            );
            ensure!(
                self.wrap_margin.is_finite() && self.wrap_margin >= 0.0,
                "wrap margin must be finite and non-negative, got {}",
                self.wrap_margin
            );
        }
        if self.awareness_gap < self.safe_gap {
            warn!(
                "awareness gap {} is below safe gap {}; raising it to match",
                self.awareness_gap, self.safe_gap
            );
            self.awareness_gap = self.safe_gap;
        }
        Ok(self)
    }
}

/// Outcome of the per-tick speed decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedDecision {
    /// Speed to apply this tick
    pub speed: f32,
    /// Advisory flag: a front car sits inside the awareness gap
    pub alert: bool,
}

/// Decide a vehicle's speed and alert state from its sensor reading.
///
/// A clear lane or a gap at/above the safe threshold keeps the base
/// speed; anything closer drops to the caution speed. The alert flag is
/// raised whenever a front car sits inside the awareness gap, whether or
/// not the speed was reduced.
pub fn decide_speed(
    reading: &SensorReading,
    base_speed: f32,
    config: &LaneConfig,
) -> SpeedDecision {
    let speed = match reading.front_car {
        Some(_) if reading.gap < config.safe_gap => config.caution.resolve(base_speed),
        _ => base_speed,
    };
    let alert = reading.front_car.is_some() && reading.gap < config.awareness_gap;

    SpeedDecision { speed, alert }
}
