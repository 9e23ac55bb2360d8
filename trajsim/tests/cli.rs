use render::VisualizerKind;
use rl::{Bounds, GridSpec, PolicyKind};
use std::path::{Path, PathBuf};
use trajsim::{run_policy_plot, run_simulation, PlotConfig, SimulationConfig};

fn logdir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/logdir")
}

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("trajsim-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn simulation(viz: VisualizerKind, output: Option<PathBuf>) -> SimulationConfig {
    SimulationConfig {
        rddl: "Navigation-v3".into(),
        policy: PolicyKind::Random,
        viz,
        horizon: 8,
        batch_size: 5,
        verbose: false,
        seed: Some(42),
        output,
    }
}

#[test]
fn simulation_reports_one_total_per_trajectory() {
    let summary = run_simulation(&simulation(VisualizerKind::Generic, None)).unwrap();
    assert_eq!(summary.performance.per_trajectory_total_reward.len(), 5);
    // rewards are negative distances to the goal
    assert!(summary.performance.average_total_reward < 0.0);
    assert!((summary.timing.time_per_step * 8.0 - summary.timing.uptime).abs() < 1e-9);
}

#[test]
fn seeded_simulations_repeat() {
    let a = run_simulation(&simulation(VisualizerKind::Generic, None)).unwrap();
    let b = run_simulation(&simulation(VisualizerKind::Generic, None)).unwrap();
    assert_eq!(a.performance, b.performance);
}

#[test]
fn navigation_visualizer_writes_plot() {
    let output = scratch("trajectories.png");
    run_simulation(&simulation(VisualizerKind::Navigation, Some(output.clone()))).unwrap();
    assert!(output.is_file());
}

#[test]
fn unknown_domain_fails() {
    let mut config = simulation(VisualizerKind::Generic, None);
    config.rddl = "Navigation-v9".into();
    assert!(run_simulation(&config).is_err());
}

fn plot_config(output: PathBuf) -> PlotConfig {
    PlotConfig {
        rddl: "Navigation-v2".into(),
        policy_config: logdir().join("policy.config.json"),
        checkpoint: logdir().join("policy.ckpt.json"),
        grid: GridSpec::new(Bounds::new(-5.0, 11.0, -2.0, 11.0).unwrap(), 6).unwrap(),
        output,
    }
}

#[test]
fn policy_plot_is_saved() {
    let output = scratch("policy.png");
    let saved = run_policy_plot(&plot_config(output.clone())).unwrap();
    assert_eq!(saved, output);
    assert!(output.is_file());
}

#[test]
fn missing_checkpoint_fails() {
    let mut config = plot_config(scratch("never.png"));
    config.checkpoint = logdir().join("missing.ckpt.json");
    assert!(run_policy_plot(&config).is_err());
    assert!(!config.output.exists());
}
