//! Batch parameter sweep
//!
//! Runs the simulation over a grid of densities and max speeds, several
//! seeds per grid point, and reports settled averages for each run.

use log::info;
use ordered_float::OrderedFloat;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::{vehicles_for_density, SimConfig};
use super::error::{SimError, SimResult};
use super::stats::SimStats;
use super::world::SimWorld;

/// Fraction of each run discarded before averaging
pub const DEFAULT_WARMUP_FRACTION: f64 = 0.2;

/// Grid of runs to perform
#[derive(Debug, Clone)]
pub struct SweepSpec {
    /// Parameters shared by every run; density, vmax and seed are overridden
    pub base: SimConfig,
    pub densities: Vec<f64>,
    pub max_speeds: Vec<u32>,
    /// Runs per grid point; run `i` uses seed `base.seed + i`
    pub iterations: u32,
    pub max_steps: u64,
    pub warmup_fraction: f64,
}

/// Settled averages for one run
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    pub density: f64,
    pub vmax: u32,
    pub iteration: u32,
    pub average_speed: f64,
    pub average_power: f64,
    pub average_perceived_lighting: f64,
}

impl SweepSpec {
    fn run_configs(&self) -> Vec<(f64, u32, u32, SimConfig)> {
        let mut configs = Vec::new();
        for &density in &self.densities {
            for &vmax in &self.max_speeds {
                for iteration in 0..self.iterations {
                    let config = SimConfig {
                        num_vehicles: vehicles_for_density(self.base.track_length, density),
                        vmax,
                        initial_velocity: self.base.initial_velocity.min(vmax),
                        seed: self.base.seed.wrapping_add(iteration as u64),
                        ..self.base.clone()
                    };
                    configs.push((density, vmax, iteration, config));
                }
            }
        }
        configs
    }
}

fn run_one(
    (density, vmax, iteration, config): (f64, u32, u32, SimConfig),
    max_steps: u64,
    warmup_fraction: f64,
) -> SimResult<SweepRow> {
    let mut world = SimWorld::initialize(config)?;
    world.run(max_steps);
    let stats = world.stats();
    Ok(SweepRow {
        density,
        vmax,
        iteration,
        average_speed: SimStats::average_after_warmup(&stats.average_speeds, warmup_fraction),
        average_power: SimStats::average_after_warmup(&stats.power, warmup_fraction),
        average_perceived_lighting: SimStats::average_after_warmup(
            &stats.perceived_lighting,
            warmup_fraction,
        ),
    })
}

/// Run every grid point and return rows sorted by ascending average power
pub fn run_sweep(spec: &SweepSpec) -> SimResult<Vec<SweepRow>> {
    if spec.densities.iter().any(|d| !(0.0..=1.0).contains(d)) {
        return Err(SimError::invalid("sweep densities must lie in [0, 1]"));
    }

    let configs = spec.run_configs();
    info!(
        "Running sweep: {} runs of {} steps",
        configs.len(),
        spec.max_steps
    );

    #[cfg(not(feature = "parallel"))]
    let rows: SimResult<Vec<SweepRow>> = configs
        .into_iter()
        .map(|run| run_one(run, spec.max_steps, spec.warmup_fraction))
        .collect();

    #[cfg(feature = "parallel")]
    let rows: SimResult<Vec<SweepRow>> = configs
        .into_par_iter()
        .map(|run| run_one(run, spec.max_steps, spec.warmup_fraction))
        .collect();

    let mut rows = rows?;
    rows.sort_by_key(|r| {
        (
            OrderedFloat(r.average_power),
            OrderedFloat(r.density),
            r.vmax,
            r.iteration,
        )
    });
    Ok(rows)
}
