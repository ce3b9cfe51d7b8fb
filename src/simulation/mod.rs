//! Standalone car-following simulation module
//!
//! This module contains all the core lane simulation logic and runs
//! headlessly. Any renderer sits on top of the public types re-exported
//! here; nothing inside depends on a display.

mod controller;
mod lane;
mod sensor;
mod types;
mod vehicle;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use controller::{decide_speed, CautionSpeed, LaneConfig, SpeedDecision};
#[allow(unused_imports)]
pub use lane::{LaneStats, SimLane};
#[allow(unused_imports)]
pub use sensor::{find_nearest_ahead, SensorReading};
#[allow(unused_imports)]
pub use types::{
    SimId, VehicleId, DEFAULT_AWARENESS_GAP, DEFAULT_CAUTION_FACTOR, DEFAULT_LOOP_LENGTH,
    DEFAULT_SAFE_GAP, DEFAULT_VEHICLE_WIDTH, DEFAULT_WRAP_MARGIN,
};
#[allow(unused_imports)]
pub use vehicle::SimVehicle;
