//! Sensor query for the lane simulation
//!
//! Stateless nearest-ahead scan, recomputed from scratch every tick; no
//! distance state is cached between frames.

use ordered_float::OrderedFloat;

use super::types::VehicleId;
use super::vehicle::SimVehicle;

/// Result of a nearest-ahead scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// The nearest qualifying vehicle ahead, if any
    pub front_car: Option<VehicleId>,
    /// Distance from the subject's front edge to the front car's rear
    /// edge; `f32::INFINITY` when the lane ahead is clear
    pub gap: f32,
}

impl SensorReading {
    /// Reading for a clear lane
    pub fn clear() -> Self {
        Self {
            front_car: None,
            gap: f32::INFINITY,
        }
    }
}

/// Find the nearest vehicle ahead of `subject` within the fleet.
///
/// Candidates must sit strictly ahead of the subject by raw position and
/// leave a non-negative gap to the subject's front edge; a vehicle that
/// overlaps the subject's extent is not ahead for collision purposes even
/// though its raw position is greater. Ties are broken in favor of the
/// first candidate encountered in fleet order.
pub fn find_nearest_ahead(subject: &SimVehicle, fleet: &[SimVehicle]) -> SensorReading {
    debug_assert!(subject.position.is_finite() && subject.width.is_finite());

    let front_edge = subject.front_edge();
    let mut front_car = None;
    let mut min_gap = OrderedFloat(f32::INFINITY);

    for candidate in fleet {
        if candidate.id == subject.id {
            continue;
        }
        if candidate.position <= subject.position {
            continue;
        }
        let gap = candidate.rear_edge() - front_edge;
        if gap >= 0.0 && OrderedFloat(gap) < min_gap {
            min_gap = OrderedFloat(gap);
            front_car = Some(candidate.id);
        }
    }

    match front_car {
        Some(id) => SensorReading {
            front_car: Some(id),
            gap: min_gap.into_inner(),
        },
        None => SensorReading::clear(),
    }
}
