//! Simulation statistics
//!
//! Model-level measurements recorded once per completed tick.

/// Measurements for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickMetrics {
    /// Mean vehicle velocity in cells per tick
    pub average_speed: f64,
    /// Fraction of street lights switched on
    pub power: f64,
    /// Fraction of vehicles inside the range of a lit street light
    pub perceived_lighting: f64,
}

/// Per-tick metric histories for a world
#[derive(Debug, Clone, Default)]
pub struct SimStats {
    pub average_speeds: Vec<f64>,
    pub power: Vec<f64>,
    pub perceived_lighting: Vec<f64>,
}

impl SimStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, metrics: TickMetrics) {
        self.average_speeds.push(metrics.average_speed);
        self.power.push(metrics.power);
        self.perceived_lighting.push(metrics.perceived_lighting);
    }

    /// Number of recorded ticks
    pub fn len(&self) -> usize {
        self.average_speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.average_speeds.is_empty()
    }

    /// Most recent measurements, if any tick has run
    pub fn latest(&self) -> Option<TickMetrics> {
        Some(TickMetrics {
            average_speed: *self.average_speeds.last()?,
            power: *self.power.last()?,
            perceived_lighting: *self.perceived_lighting.last()?,
        })
    }

    /// Mean of `history` after dropping the first `warmup_fraction` of it
    ///
    /// Returns 0 when nothing is left to average.
    pub fn average_after_warmup(history: &[f64], warmup_fraction: f64) -> f64 {
        let skip = (history.len() as f64 * warmup_fraction.clamp(0.0, 1.0)) as usize;
        let settled = &history[skip.min(history.len())..];
        if settled.is_empty() {
            0.0
        } else {
            settled.iter().sum::<f64>() / settled.len() as f64
        }
    }
}
