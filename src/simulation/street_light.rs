//! Street light logic for the traffic simulation
//!
//! A light switches on as soon as a vehicle comes within its detection
//! radius and switches off once it has seen nothing for longer than the
//! hold duration.

use log::trace;

use super::types::{LightId, LightSnapshot, Track};

/// Illumination state of a street light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightState {
    #[default]
    Off,
    On,
}

/// A street light at a fixed cell of the track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimStreetLight {
    pub id: LightId,
    pub position: usize,
    pub state: LightState,
    /// Ticks since a vehicle was last seen; only counts while on
    pub ticks_since_last_detection: u32,
}

impl SimStreetLight {
    pub fn new(id: LightId, position: usize) -> Self {
        Self {
            id,
            position,
            state: LightState::Off,
            ticks_since_last_detection: 0,
        }
    }

    pub fn is_on(&self) -> bool {
        self.state == LightState::On
    }

    /// Whether any vehicle position lies within `radius` cells of this light
    pub fn detect(
        &self,
        vehicle_positions: impl IntoIterator<Item = usize>,
        track: &Track,
        radius: usize,
    ) -> bool {
        vehicle_positions
            .into_iter()
            .any(|position| self.covers(position, track, radius))
    }

    /// Whether `position` is inside this light's range
    pub fn covers(&self, position: usize, track: &Track, radius: usize) -> bool {
        track.cyclic_distance(self.position, position) <= radius
    }

    /// Advance the state machine by one tick
    pub fn update(&mut self, detected: bool, hold_ticks: u32) {
        match (self.state, detected) {
            (LightState::Off, true) => {
                trace!("Light {:?} at cell {} switched on", self.id.0, self.position);
                self.state = LightState::On;
                self.ticks_since_last_detection = 0;
            }
            (LightState::Off, false) => {}
            (LightState::On, true) => {
                self.ticks_since_last_detection = 0;
            }
            (LightState::On, false) => {
                self.ticks_since_last_detection += 1;
                if self.ticks_since_last_detection > hold_ticks {
                    trace!("Light {:?} at cell {} switched off", self.id.0, self.position);
                    self.state = LightState::Off;
                    self.ticks_since_last_detection = 0;
                }
            }
        }
    }

    pub fn snapshot(&self) -> LightSnapshot {
        LightSnapshot {
            id: self.id,
            position: self.position,
            is_on: self.is_on(),
        }
    }
}
