//! Vehicle logic for the traffic simulation
//!
//! Each method is one phase of the Nagel–Schreckenberg rule for a single
//! vehicle. The engine runs each phase across every vehicle before the next
//! one starts.

use rand::Rng;

use super::types::{Track, VehicleId, VehicleSnapshot};

/// A vehicle on the circular track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimVehicle {
    pub id: VehicleId,
    pub position: usize,
    pub velocity: u32,
    pub vmax: u32,
}

impl SimVehicle {
    pub fn new(id: VehicleId, position: usize, velocity: u32, vmax: u32) -> Self {
        Self {
            id,
            position,
            velocity,
            vmax,
        }
    }

    /// Phase 1: speed up by one cell per tick, up to max speed
    pub fn accelerate(&mut self) {
        self.velocity = self.velocity.saturating_add(1).min(self.vmax);
    }

    /// Phase 2: never move into or past the vehicle ahead
    pub fn brake(&mut self, gap: usize) {
        if (self.velocity as usize) > gap {
            self.velocity = gap as u32;
        }
    }

    /// Phase 3: slow down by one with probability `p`
    ///
    /// Takes exactly one draw per call, even when already stopped.
    pub fn randomise<R: Rng>(&mut self, p: f64, rng: &mut R) {
        if rng.random_bool(p) {
            self.velocity = self.velocity.saturating_sub(1);
        }
    }

    /// Phase 4a: where this vehicle ends up, without moving it
    pub fn next_position(&self, track: &Track) -> usize {
        track.advance(self.position, self.velocity as usize)
    }

    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            id: self.id,
            position: self.position,
            velocity: self.velocity,
        }
    }
}
