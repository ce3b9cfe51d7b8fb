//! Lane Simulation Library
//!
//! A single-lane car-following simulation that runs headlessly. Vehicles
//! sense the nearest car ahead, pick between their base and caution
//! speeds, and advance in fixed time steps.

pub mod simulation;
