//! Standalone traffic simulation module
//!
//! Nagel–Schreckenberg traffic on a circular one-lane track, with street
//! lights that switch on when vehicles come near.

mod config;
mod engine;
mod error;
mod stats;
mod street_light;
mod sweep;
mod types;
mod vehicle;
mod world;

pub use config::{vehicles_for_density, SimConfig};
pub use error::{SimError, SimResult};
pub use stats::{SimStats, TickMetrics};
pub use street_light::{LightState, SimStreetLight};
pub use sweep::{run_sweep, SweepRow, SweepSpec, DEFAULT_WARMUP_FRACTION};
pub use types::{
    LightId, LightSnapshot, SimId, SpeedClass, Track, VehicleId, VehicleSnapshot,
    DEFAULT_DENSITY, DEFAULT_DETECTION_RADIUS, DEFAULT_HOLD_TICKS, DEFAULT_LIGHT_SPACING,
    DEFAULT_MAX_SPEED, DEFAULT_RANDOMISATION_P, DEFAULT_TRACK_LENGTH,
    PLACEMENT_ATTEMPTS_PER_CELL,
};
pub use vehicle::SimVehicle;
pub use world::SimWorld;
