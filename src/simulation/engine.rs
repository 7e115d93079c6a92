//! Phase-separated step engine
//!
//! Each function runs one phase of a tick across all vehicles (or lights).
//! Vehicles are always passed in cyclic track order, so the vehicle ahead
//! of index `i` is at index `i + 1` wrapping to 0.
//!
//! Movement is split into [`plan_moves`] and [`commit_moves`]: every new
//! position is computed from the pre-move snapshot before any is written.

use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::street_light::SimStreetLight;
use super::types::Track;
use super::vehicle::SimVehicle;

/// Phase 1: acceleration
pub fn accelerate_all(vehicles: &mut [SimVehicle]) {
    #[cfg(not(feature = "parallel"))]
    {
        vehicles.iter_mut().for_each(SimVehicle::accelerate);
    }

    #[cfg(feature = "parallel")]
    {
        vehicles.par_iter_mut().for_each(SimVehicle::accelerate);
    }
}

/// Gap from each vehicle to the one ahead, read from current positions
pub fn gaps(vehicles: &[SimVehicle], track: &Track) -> Vec<usize> {
    let count = vehicles.len();
    let gap_at = |i: usize| {
        let ahead = &vehicles[(i + 1) % count];
        track.gap(vehicles[i].position, ahead.position)
    };

    #[cfg(not(feature = "parallel"))]
    {
        (0..count).map(gap_at).collect()
    }

    #[cfg(feature = "parallel")]
    {
        (0..count).into_par_iter().map(gap_at).collect()
    }
}

/// Phase 2: braking
pub fn brake_all(vehicles: &mut [SimVehicle], track: &Track) {
    let gaps = gaps(vehicles, track);

    #[cfg(not(feature = "parallel"))]
    {
        vehicles
            .iter_mut()
            .zip(gaps)
            .for_each(|(vehicle, gap)| vehicle.brake(gap));
    }

    #[cfg(feature = "parallel")]
    {
        vehicles
            .par_iter_mut()
            .zip(gaps)
            .for_each(|(vehicle, gap)| vehicle.brake(gap));
    }
}

/// Phase 3: random slow-down
///
/// Always sequential. The shared generator advances once per vehicle, in
/// track order.
pub fn randomise_all<R: Rng>(vehicles: &mut [SimVehicle], p: f64, rng: &mut R) {
    for vehicle in vehicles.iter_mut() {
        vehicle.randomise(p, rng);
    }
}

/// Phase 4a: compute every vehicle's next position without writing any
pub fn plan_moves(vehicles: &[SimVehicle], track: &Track) -> Vec<usize> {
    #[cfg(not(feature = "parallel"))]
    {
        vehicles.iter().map(|v| v.next_position(track)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        vehicles.par_iter().map(|v| v.next_position(track)).collect()
    }
}

/// Phase 4b: write all planned positions at once
pub fn commit_moves(vehicles: &mut [SimVehicle], next_positions: &[usize]) {
    debug_assert_eq!(vehicles.len(), next_positions.len());
    for (vehicle, &position) in vehicles.iter_mut().zip(next_positions) {
        vehicle.position = position;
    }
}

/// Rotate the vehicle list so it starts at the lowest position again
///
/// Vehicles that wrapped past the end of the track end up at the front.
/// Cyclic order is untouched.
pub fn restore_ascending_order(vehicles: &mut [SimVehicle]) {
    let lowest = vehicles
        .iter()
        .enumerate()
        .min_by_key(|(_, v)| v.position)
        .map(|(i, _)| i);
    if let Some(index) = lowest {
        vehicles.rotate_left(index);
    }
}

/// Whether positions are strictly increasing, i.e. sorted with no two equal
pub fn is_strictly_ascending(vehicles: &[SimVehicle]) -> bool {
    vehicles.windows(2).all(|w| w[0].position < w[1].position)
}

/// Phase 5: light update from the committed vehicle positions
pub fn update_lights(
    lights: &mut [SimStreetLight],
    vehicles: &[SimVehicle],
    track: &Track,
    detection_radius: usize,
    hold_ticks: u32,
) {
    for light in lights.iter_mut() {
        let detected = light.detect(vehicles.iter().map(|v| v.position), track, detection_radius);
        light.update(detected, hold_ticks);
    }
}
