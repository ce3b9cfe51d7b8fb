//! Core types for the lane simulation
//!
//! Identity newtypes and the default tuning values shared by the
//! sensor, controller, and lane modules.

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimId(pub usize);

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub SimId);

/// Physical extent of a vehicle along the lane, in world units
pub const DEFAULT_VEHICLE_WIDTH: f32 = 60.0;

/// Gap below which a vehicle drops to its caution speed
pub const DEFAULT_SAFE_GAP: f32 = 100.0;

/// Gap below which the advisory alert is raised
pub const DEFAULT_AWARENESS_GAP: f32 = 150.0;

/// Fraction of base speed used while obstructed
pub const DEFAULT_CAUTION_FACTOR: f32 = 0.5;

/// Length of the demo loop lane, in world units
pub const DEFAULT_LOOP_LENGTH: f32 = 1280.0;

/// Distance past the end of the loop a vehicle travels before it is
/// recycled to the start
pub const DEFAULT_WRAP_MARGIN: f32 = 100.0;
