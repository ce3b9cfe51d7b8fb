//! Vehicle state for the lane simulation
//!
//! Standalone data type; movement decisions live in the sensor and
//! controller modules.

use anyhow::{ensure, Result};

use super::types::VehicleId;

/// A vehicle on the lane
#[derive(Debug, Clone)]
pub struct SimVehicle {
    pub id: VehicleId,
    /// Display name used by summaries and the lane strip
    pub label: String,
    /// Longitudinal coordinate of the rear edge; increases in the
    /// direction of travel
    pub position: f32,
    /// Physical extent along the lane; front edge = position + width
    pub width: f32,
    /// Free-flow cruising speed, fixed for the vehicle's lifetime
    pub base_speed: f32,
    /// Speed applied this tick, set by the controller
    pub current_speed: f32,
    /// Advisory flag from the most recent tick
    pub alert: bool,
}

impl SimVehicle {
    /// Build a vehicle, rejecting malformed construction parameters so
    /// the tick loop never sees them.
    pub fn new(
        id: VehicleId,
        label: impl Into<String>,
        position: f32,
        width: f32,
        base_speed: f32,
    ) -> Result<Self> {
        ensure!(
            position.is_finite(),
            "vehicle position must be finite, got {}",
            position
        );
        ensure!(
            width.is_finite() && width >= 0.0,
            "vehicle width must be finite and non-negative, got {}",
            width
        );
        ensure!(
            base_speed.is_finite() && base_speed >= 0.0,
            "vehicle base speed must be finite and non-negative, got {}",
            base_speed
        );

        Ok(Self {
            id,
            label: label.into(),
            position,
            width,
            base_speed,
            current_speed: base_speed,
            alert: false,
        })
    }

    /// Leading edge along the direction of travel
    pub fn front_edge(&self) -> f32 {
        self.position + self.width
    }

    /// Trailing edge; coincides with `position`
    pub fn rear_edge(&self) -> f32 {
        self.position
    }
}
