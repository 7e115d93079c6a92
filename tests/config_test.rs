//! Construction-time validation

use nasch_lights::simulation::{vehicles_for_density, SimConfig, SimError, SimWorld};

fn assert_invalid(result: Result<SimWorld, SimError>, needle: &str) {
    match result {
        Err(SimError::InvalidConfiguration(message)) => assert!(
            message.contains(needle),
            "expected '{}' in '{}'",
            needle,
            message
        ),
        Ok(_) => panic!("configuration should have been rejected"),
    }
}

#[test]
fn test_default_config_matches_source_model() {
    let config = SimConfig::default();
    assert_eq!(config.track_length, 60);
    assert_eq!(config.num_vehicles, 12);
    assert_eq!(config.vmax, 4);
    assert!((config.density() - 0.2).abs() < 1e-12);
    assert_eq!(config.light_count(), 6);
    assert!(config.validate().is_ok());
}

#[test]
fn test_density_rounds_to_vehicle_count() {
    assert_eq!(vehicles_for_density(60, 0.2), 12);
    assert_eq!(vehicles_for_density(200, 0.01), 2);
    assert_eq!(vehicles_for_density(10, 1.5), 10);
    assert_eq!(vehicles_for_density(10, -0.5), 0);
    assert_eq!(SimConfig::with_density(100, 0.3).num_vehicles, 30);
}

#[test]
fn test_rejects_empty_track() {
    let config = SimConfig {
        track_length: 0,
        num_vehicles: 0,
        ..SimConfig::default()
    };
    assert_invalid(SimWorld::initialize(config), "track length");
}

#[test]
fn test_rejects_more_vehicles_than_cells() {
    let config = SimConfig {
        track_length: 10,
        num_vehicles: 11,
        ..SimConfig::default()
    };
    assert_invalid(SimWorld::initialize(config), "do not fit");
}

#[test]
fn test_rejects_probability_outside_unit_interval() {
    for p in [-0.1, 1.01, f64::NAN] {
        let config = SimConfig {
            randomisation_p: p,
            ..SimConfig::default()
        };
        assert_invalid(SimWorld::initialize(config), "randomisation probability");
    }
}

#[test]
fn test_accepts_probability_bounds() {
    for p in [0.0, 1.0] {
        let config = SimConfig {
            randomisation_p: p,
            ..SimConfig::default()
        };
        assert!(SimWorld::initialize(config).is_ok());
    }
}

#[test]
fn test_rejects_zero_light_spacing() {
    let config = SimConfig {
        light_spacing: 0,
        ..SimConfig::default()
    };
    assert_invalid(SimWorld::initialize(config), "light spacing");
}

#[test]
fn test_rejects_initial_velocity_above_max() {
    let config = SimConfig {
        vmax: 2,
        initial_velocity: 3,
        ..SimConfig::default()
    };
    assert_invalid(SimWorld::initialize(config), "initial velocity");
}

#[test]
fn test_explicit_layout_is_checked() {
    let config = SimConfig {
        track_length: 10,
        num_vehicles: 2,
        vmax: 2,
        ..SimConfig::default()
    };

    assert_invalid(
        SimWorld::with_vehicles(config.clone(), &[(3, 0), (3, 1)]),
        "two vehicles",
    );
    assert_invalid(
        SimWorld::with_vehicles(config.clone(), &[(3, 0), (10, 0)]),
        "off a track",
    );
    assert_invalid(
        SimWorld::with_vehicles(config.clone(), &[(3, 0), (5, 3)]),
        "exceeds max speed",
    );
    assert_invalid(SimWorld::with_vehicles(config.clone(), &[(3, 0)]), "expected 2");
    assert!(SimWorld::with_vehicles(config, &[(7, 2), (3, 0)]).is_ok());
}

#[test]
fn test_error_message_names_the_condition() {
    let config = SimConfig {
        track_length: 0,
        num_vehicles: 0,
        ..SimConfig::default()
    };
    let error = SimWorld::initialize(config).err().expect("should fail");
    assert!(error.to_string().starts_with("invalid configuration:"));
}
