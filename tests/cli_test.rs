use std::process::Command;

fn binary() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_nasch_lights"));
    command.env("RUST_LOG", "warn,nasch_lights=info");
    command
}

/// Test that the simulation runs in headless mode without crashing
#[test]
fn test_headless_run_completes() {
    let output = binary()
        .args(["run", "--ticks", "25", "--report-every", "10", "--draw"])
        .output()
        .expect("Failed to execute simulation");

    assert!(
        output.status.success(),
        "Simulation failed to run. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("--- After tick 10 ---"));
    assert!(stdout.contains("--- After tick 25 ---"));
    assert!(stdout.contains("Active lights:"));
    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
}

#[test]
fn test_overfull_track_is_rejected() {
    let output = binary()
        .args(["run", "--track-length", "10", "--vehicles", "11"])
        .output()
        .expect("Failed to execute simulation");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid configuration"),
        "missing error cause. stderr: {}",
        stderr
    );
}

#[test]
fn test_initial_velocity_flag_reaches_config() {
    let output = binary()
        .args(["run", "--max-speed", "4", "--initial-velocity", "9"])
        .output()
        .expect("Failed to execute simulation");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("initial velocity 9 exceeds max speed 4"),
        "missing error cause. stderr: {}",
        stderr
    );

    let output = binary()
        .args(["run", "--max-speed", "4", "--initial-velocity", "2", "--ticks", "5"])
        .output()
        .expect("Failed to execute simulation");
    assert!(output.status.success(), "Simulation failed to run");
}

#[test]
fn test_sweep_clamps_initial_velocity_to_each_max_speed() {
    let output = binary()
        .args([
            "sweep",
            "--densities",
            "0.1",
            "--max-speeds",
            "1",
            "--iterations",
            "1",
            "--steps",
            "10",
            "--initial-velocity",
            "5",
        ])
        .output()
        .expect("Failed to execute sweep");
    assert!(output.status.success(), "Sweep failed to run");
}

#[test]
fn test_sweep_prints_one_row_per_run() {
    let output = binary()
        .args([
            "sweep",
            "--densities",
            "0.1,0.2",
            "--max-speeds",
            "3",
            "--iterations",
            "2",
            "--steps",
            "50",
        ])
        .output()
        .expect("Failed to execute sweep");

    assert!(output.status.success(), "Sweep failed to run");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert!(lines.next().is_some_and(|header| header.contains("density")));
    assert_eq!(lines.filter(|l| !l.trim().is_empty()).count(), 4);
}
