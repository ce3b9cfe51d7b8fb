//! The lane world that ties everything together
//!
//! Entry point for running the car-following simulation headlessly:
//! owns the fleet, the configuration, and the per-tick orchestration.

use anyhow::{ensure, Result};
use log::{debug, info};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::controller::{decide_speed, LaneConfig, SpeedDecision};
use super::sensor::{find_nearest_ahead, SensorReading};
use super::types::{SimId, VehicleId, DEFAULT_VEHICLE_WIDTH};
use super::vehicle::SimVehicle;

/// Aggregate counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneStats {
    /// Ticks processed
    pub ticks: u64,
    /// Vehicle-ticks spent below base speed
    pub caution_ticks: u64,
    /// Vehicle-ticks with the alert flag raised
    pub alert_ticks: u64,
    /// Vehicles recycled across the loop seam
    pub wraps: u64,
}

/// The single-lane simulation world
pub struct SimLane {
    /// Fleet in spawn order; the order doubles as the sensor tie-break
    pub vehicles: Vec<SimVehicle>,

    /// Thresholds, caution policy, and loop geometry
    pub config: LaneConfig,

    /// Simulated time in seconds
    pub time: f32,

    /// Run counters
    pub stats: LaneStats,

    /// Next ID to assign
    next_id: usize,

    /// Optional seeded RNG for reproducible fleets
    rng: Option<StdRng>,
}

impl Default for SimLane {
    fn default() -> Self {
        Self::new()
    }
}

impl SimLane {
    fn new_internal(config: LaneConfig, rng: Option<StdRng>) -> Self {
        Self {
            vehicles: Vec::new(),
            config,
            time: 0.0,
            stats: LaneStats::default(),
            next_id: 0,
            rng,
        }
    }

    pub fn new() -> Self {
        Self::new_internal(LaneConfig::default(), None)
    }

    /// Create a new SimLane with a seeded RNG for reproducible fleets
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_internal(LaneConfig::default(), Some(StdRng::seed_from_u64(seed)))
    }

    /// Create a new SimLane from a caller-supplied configuration
    pub fn with_config(config: LaneConfig) -> Result<Self> {
        Ok(Self::new_internal(config.validated()?, None))
    }

    /// Create a new SimLane from a configuration and a fixed RNG seed
    pub fn with_config_seeded(config: LaneConfig, seed: u64) -> Result<Self> {
        Ok(Self::new_internal(
            config.validated()?,
            Some(StdRng::seed_from_u64(seed)),
        ))
    }

    /// Get a random value in the given range, using seeded RNG if available
    fn random_range(&mut self, range: std::ops::Range<f32>) -> f32 {
        match &mut self.rng {
            Some(rng) => rng.random_range(range),
            None => rand::rng().random_range(range),
        }
    }

    fn next_sim_id(&mut self) -> SimId {
        let id = SimId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a vehicle to the lane. Construction parameters are validated
    /// here, before the tick loop ever runs.
    pub fn spawn_vehicle(
        &mut self,
        label: impl Into<String>,
        position: f32,
        width: f32,
        base_speed: f32,
    ) -> Result<VehicleId> {
        let id = VehicleId(self.next_sim_id());
        let vehicle = SimVehicle::new(id, label, position, width, base_speed)?;
        debug!(
            "spawned {} at {:.1} (width {:.1}, base speed {:.1})",
            vehicle.label, position, width, base_speed
        );
        self.vehicles.push(vehicle);
        Ok(id)
    }

    /// Spawn the three-car demo fleet on the default loop
    pub fn populate_demo(&mut self) -> Result<()> {
        self.spawn_vehicle("Red Car", 100.0, DEFAULT_VEHICLE_WIDTH, 5.0)?;
        self.spawn_vehicle("Blue Car", 400.0, DEFAULT_VEHICLE_WIDTH, 3.0)?;
        self.spawn_vehicle("Green Car", 700.0, DEFAULT_VEHICLE_WIDTH, 4.0)?;
        Ok(())
    }

    /// Spawn `count` evenly spaced vehicles with jittered positions and
    /// randomized base speeds
    pub fn populate_random(&mut self, count: usize) -> Result<()> {
        ensure!(count > 0, "fleet must have at least one vehicle");

        let length = self
            .config
            .loop_length
            .unwrap_or(count as f32 * 4.0 * DEFAULT_VEHICLE_WIDTH);
        let spacing = length / count as f32;
        ensure!(
            spacing > DEFAULT_VEHICLE_WIDTH,
            "no room for {} vehicles of width {} on a {}-unit lane",
            count,
            DEFAULT_VEHICLE_WIDTH,
            length
        );

        // Jitter stays below half the free space so neighbors never
        // start overlapped.
        let slack = (spacing - DEFAULT_VEHICLE_WIDTH) * 0.5;
        for index in 0..count {
            let jitter = if slack > 0.0 {
                self.random_range(0.0..slack)
            } else {
                0.0
            };
            let base_speed = self.random_range(2.0..6.0);
            self.spawn_vehicle(
                format!("Car {}", index + 1),
                index as f32 * spacing + jitter,
                DEFAULT_VEHICLE_WIDTH,
                base_speed,
            )?;
        }
        Ok(())
    }

    /// Create the default demo lane: the original three-car fleet on a
    /// 1280-unit loop
    pub fn create_demo_lane() -> Result<Self> {
        let mut lane = Self::new();
        lane.populate_demo()?;
        Ok(lane)
    }

    /// Look up a vehicle by id
    pub fn vehicle(&self, id: VehicleId) -> Option<&SimVehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    /// Current sensor reading for a vehicle, recomputed on demand
    pub fn reading_for(&self, id: VehicleId) -> Option<SensorReading> {
        self.vehicle(id)
            .map(|vehicle| find_nearest_ahead(vehicle, &self.vehicles))
    }

    /// Advance the simulation by one tick.
    ///
    /// Every vehicle's decision is computed against the same position
    /// snapshot before any of them moves, so updates are simultaneous
    /// rather than sequential-in-place.
    pub fn tick(&mut self, delta_secs: f32) {
        let decisions: Vec<SpeedDecision> = self
            .vehicles
            .iter()
            .map(|vehicle| {
                let reading = find_nearest_ahead(vehicle, &self.vehicles);
                decide_speed(&reading, vehicle.base_speed, &self.config)
            })
            .collect();

        let mut caution = 0u64;
        let mut alerts = 0u64;
        for (vehicle, decision) in self.vehicles.iter_mut().zip(decisions) {
            vehicle.current_speed = decision.speed;
            vehicle.alert = decision.alert;
            vehicle.position += vehicle.current_speed * delta_secs;

            if vehicle.current_speed < vehicle.base_speed {
                caution += 1;
            }
            if vehicle.alert {
                alerts += 1;
            }

            if let Some(length) = self.config.loop_length {
                if vehicle.position > length + self.config.wrap_margin {
                    vehicle.position = -self.config.wrap_margin;
                    self.stats.wraps += 1;
                }
            }
        }

        self.time += delta_secs;
        self.stats.ticks += 1;
        self.stats.caution_ticks += caution;
        self.stats.alert_ticks += alerts;

        debug!(
            "tick {} (t={:.2}s): {} slowed, {} alerted",
            self.stats.ticks, self.time, caution, alerts
        );
    }

    /// Print a summary of the lane state
    pub fn print_summary(&self) {
        println!("=== Lane Simulation Summary ===");
        println!("Time: {:.2}s (tick {})", self.time, self.stats.ticks);
        match self.config.loop_length {
            Some(length) => println!(
                "Vehicles: {} on a {:.0}-unit loop | safe gap {:.0}, awareness gap {:.0}",
                self.vehicles.len(),
                length,
                self.config.safe_gap,
                self.config.awareness_gap
            ),
            None => println!(
                "Vehicles: {} on an open lane | safe gap {:.0}, awareness gap {:.0}",
                self.vehicles.len(),
                self.config.safe_gap,
                self.config.awareness_gap
            ),
        }

        for vehicle in &self.vehicles {
            let reading = find_nearest_ahead(vehicle, &self.vehicles);
            let gap_text = match reading.front_car {
                Some(_) => format!("{:.1}", reading.gap),
                None => "clear".to_string(),
            };
            let state = if vehicle.current_speed < vehicle.base_speed {
                "caution"
            } else if vehicle.alert {
                "alert"
            } else {
                "cruising"
            };
            println!(
                "  {}: position={:.1}, speed={:.1} (base {:.1}), gap={}, {}",
                vehicle.label,
                vehicle.position,
                vehicle.current_speed,
                vehicle.base_speed,
                gap_text,
                state
            );
        }
    }

    /// Extent of the lane rendered by [`draw_lane`](Self::draw_lane)
    fn lane_extent(&self) -> (f32, f32) {
        match self.config.loop_length {
            Some(length) => (
                -self.config.wrap_margin,
                length + self.config.wrap_margin,
            ),
            None => {
                let mut min_x = f32::INFINITY;
                let mut max_x = f32::NEG_INFINITY;
                for vehicle in &self.vehicles {
                    min_x = min_x.min(vehicle.position);
                    max_x = max_x.max(vehicle.front_edge());
                }
                if min_x > max_x {
                    (0.0, 1.0)
                } else {
                    (min_x, max_x)
                }
            }
        }
    }

    /// Draw the lane as an ASCII strip in the terminal
    pub fn draw_lane(&self) {
        const STRIP_COLS: usize = 96;

        let (min_x, max_x) = self.lane_extent();
        let span = (max_x - min_x).max(1.0);
        let scale = (STRIP_COLS - 1) as f32 / span;

        let mut alert_row = vec![' '; STRIP_COLS];
        let mut lane_row = vec!['-'; STRIP_COLS];

        // Draw rear-to-front so a leader stays visible when glyphs
        // collide in one column.
        let mut order: Vec<&SimVehicle> = self.vehicles.iter().collect();
        order.sort_by_key(|vehicle| OrderedFloat(vehicle.position));

        for vehicle in order {
            let col = (((vehicle.position - min_x) * scale) as usize).min(STRIP_COLS - 1);
            lane_row[col] = vehicle
                .label
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or('V');
            if vehicle.alert {
                alert_row[col] = '!';
            }
        }

        println!();
        println!("=== Lane ({:.0}..{:.0}) ===", min_x, max_x);
        println!("Legend: letter=vehicle (first letter of label), !=alert");
        println!("{}", alert_row.iter().collect::<String>());
        println!("{}", lane_row.iter().collect::<String>());
        println!();
    }

    /// Log the end-of-run statistics
    pub fn report_stats(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Ticks run: {}", self.stats.ticks);
        info!("Simulated time: {:.2}s", self.time);
        info!("Fleet size: {}", self.vehicles.len());
        info!("Caution vehicle-ticks: {}", self.stats.caution_ticks);
        info!("Alert vehicle-ticks: {}", self.stats.alert_ticks);
        info!("Loop wraps: {}", self.stats.wraps);
    }
}
