//! Simulation parameters
//!
//! Everything the world needs at construction time. Parameters are fixed
//! for the lifetime of a world.

use super::error::{SimError, SimResult};
use super::types::{
    DEFAULT_DENSITY, DEFAULT_DETECTION_RADIUS, DEFAULT_HOLD_TICKS, DEFAULT_LIGHT_SPACING,
    DEFAULT_MAX_SPEED, DEFAULT_RANDOMISATION_P, DEFAULT_TRACK_LENGTH,
};

/// Parameters for a single simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub num_vehicles: usize,
    /// Maximum speed in cells per tick, shared by all vehicles
    pub vmax: u32,
    pub track_length: usize,
    /// Cells between consecutive street lights; the first sits at cell 0
    pub light_spacing: usize,
    /// A light sees vehicles within this cyclic distance
    pub detection_radius: usize,
    /// Ticks a light stays on after its last detection
    pub hold_ticks: u32,
    /// Probability of random slow-down per vehicle per tick
    pub randomisation_p: f64,
    /// Velocity every vehicle starts with
    pub initial_velocity: u32,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_vehicles: vehicles_for_density(DEFAULT_TRACK_LENGTH, DEFAULT_DENSITY),
            vmax: DEFAULT_MAX_SPEED,
            track_length: DEFAULT_TRACK_LENGTH,
            light_spacing: DEFAULT_LIGHT_SPACING,
            detection_radius: DEFAULT_DETECTION_RADIUS,
            hold_ticks: DEFAULT_HOLD_TICKS,
            randomisation_p: DEFAULT_RANDOMISATION_P,
            initial_velocity: 0,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Default parameters on a track of `track_length` cells filled to `density`
    pub fn with_density(track_length: usize, density: f64) -> Self {
        Self {
            num_vehicles: vehicles_for_density(track_length, density),
            track_length,
            ..Self::default()
        }
    }

    /// Vehicles per cell
    pub fn density(&self) -> f64 {
        if self.track_length == 0 {
            0.0
        } else {
            self.num_vehicles as f64 / self.track_length as f64
        }
    }

    /// Number of street lights this configuration places on the track
    pub fn light_count(&self) -> usize {
        if self.light_spacing == 0 {
            0
        } else {
            self.track_length.div_ceil(self.light_spacing)
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.track_length == 0 {
            return Err(SimError::invalid("track length must be greater than zero"));
        }
        if self.num_vehicles > self.track_length {
            return Err(SimError::invalid(format!(
                "{} vehicles do not fit on a track of {} cells",
                self.num_vehicles, self.track_length
            )));
        }
        if !(0.0..=1.0).contains(&self.randomisation_p) {
            return Err(SimError::invalid(format!(
                "randomisation probability {} is outside [0, 1]",
                self.randomisation_p
            )));
        }
        if self.light_spacing == 0 {
            return Err(SimError::invalid("light spacing must be greater than zero"));
        }
        if self.initial_velocity > self.vmax {
            return Err(SimError::invalid(format!(
                "initial velocity {} exceeds max speed {}",
                self.initial_velocity, self.vmax
            )));
        }
        Ok(())
    }
}

/// Vehicle count for a density, clamped to the track size
pub fn vehicles_for_density(track_length: usize, density: f64) -> usize {
    let count = (density.max(0.0) * track_length as f64).round() as usize;
    count.min(track_length)
}
