//! Core types for the traffic simulation
//!
//! The circular track, identifiers and the speed classification used by
//! the terminal renderer.

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimId(pub usize);

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub SimId);

/// A wrapper type for street light IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightId(pub SimId);

/// A circular one-lane road of `length` cells
///
/// Every position handed to the track is expected to be in `[0, length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    length: usize,
}

impl Track {
    /// Create a track, or `None` for a zero-length one
    pub fn new(length: usize) -> Option<Self> {
        (length > 0).then_some(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Position reached by moving `cells` forward from `position`
    pub fn advance(&self, position: usize, cells: usize) -> usize {
        (position + cells % self.length) % self.length
    }

    /// Cells travelled going forward from `from` to `to`
    pub fn forward_distance(&self, from: usize, to: usize) -> usize {
        (to + self.length - from) % self.length
    }

    /// Empty cells strictly between a vehicle at `from` and the one ahead at `ahead`
    ///
    /// When `ahead == from` the vehicle is alone and the whole track minus its
    /// own cell is free.
    pub fn gap(&self, from: usize, ahead: usize) -> usize {
        (ahead + self.length - from - 1) % self.length
    }

    /// Shortest distance between two positions going either way round
    pub fn cyclic_distance(&self, a: usize, b: usize) -> usize {
        let forward = self.forward_distance(a, b);
        forward.min(self.length - forward)
    }
}

/// Speed bucket used for display, after the red/orange/green scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedClass {
    /// Not moving
    Stopped,
    /// Moving at no more than half of max speed
    Slow,
    /// Moving faster than half of max speed
    Fast,
}

impl SpeedClass {
    pub fn classify(velocity: u32, vmax: u32) -> Self {
        if velocity == 0 {
            SpeedClass::Stopped
        } else if velocity > vmax / 2 {
            SpeedClass::Fast
        } else {
            SpeedClass::Slow
        }
    }

    /// Track glyph, uppercase when lit
    pub fn glyph(&self, lit: bool) -> char {
        let c = match self {
            SpeedClass::Stopped => 'R',
            SpeedClass::Slow => 'O',
            SpeedClass::Fast => 'G',
        };
        if lit {
            c
        } else {
            c.to_ascii_lowercase()
        }
    }
}

/// Read-only view of a vehicle handed to consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub position: usize,
    pub velocity: u32,
}

/// Read-only view of a street light handed to consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightSnapshot {
    pub id: LightId,
    pub position: usize,
    pub is_on: bool,
}

/// Default number of cells in the track
pub const DEFAULT_TRACK_LENGTH: usize = 60;

/// Default vehicle density used to derive the vehicle count
pub const DEFAULT_DENSITY: f64 = 0.2;

/// Default maximum speed in cells per tick
pub const DEFAULT_MAX_SPEED: u32 = 4;

/// Default probability of random slow-down
pub const DEFAULT_RANDOMISATION_P: f64 = 0.3;

/// Default cells between consecutive street lights
pub const DEFAULT_LIGHT_SPACING: usize = 10;

/// Default light detection radius in cells
pub const DEFAULT_DETECTION_RADIUS: usize = 2;

/// Default ticks a light stays on after losing detection
pub const DEFAULT_HOLD_TICKS: u32 = 3;

/// Random placement gives up after this many draws per track cell
pub const PLACEMENT_ATTEMPTS_PER_CELL: usize = 64;
