mod common;

use common::ConstantRewardModel;
use ml::{DefaultPolicy, Policy, PolicyError, Tensor};
use rl::{action_space, PerformanceStats, PolicyKind, RolloutError, Simulator};

#[test]
fn bundle_shapes_follow_horizon_and_batch() {
    for &(horizon, batch) in &[(1, 1), (1, 8), (5, 1), (40, 75), (13, 3)] {
        let model = ConstantRewardModel::new(1.0);
        let policy = PolicyKind::Random.build(&model, batch, Some(7));
        let mut sim = Simulator::new(model, policy, batch).unwrap();
        let bundle = sim.run(horizon).unwrap();

        assert_eq!(bundle.initial_state().shape(), &[batch, 1]);
        assert_eq!(bundle.actions().shape(), &[batch, horizon, 1]);
        assert_eq!(bundle.states().shape(), &[batch, horizon, 1]);
        assert_eq!(bundle.interms().shape(), &[batch, horizon, 1]);
        assert_eq!(bundle.next_states().shape(), &[batch, horizon, 1]);
        assert_eq!(bundle.rewards().shape(), &[batch, horizon]);
    }
}

#[test]
fn states_chain_from_step_to_step() {
    let model = ConstantRewardModel::new(0.0);
    let policy = DefaultPolicy::new(action_space(&model), 2);
    let mut sim = Simulator::new(model, policy, 2).unwrap();
    let bundle = sim.run(4).unwrap();
    for b in 0..2 {
        assert_eq!(bundle.state(b, 0), bundle.initial_state().row(b));
        for t in 1..4 {
            assert_eq!(bundle.state(b, t), bundle.next_state(b, t - 1));
        }
        // default action is +1 per step
        assert_eq!(bundle.next_state(b, 3), &[4.0]);
    }
}

#[test]
fn constant_reward_end_to_end() {
    let model = ConstantRewardModel::new(1.0);
    let policy = PolicyKind::Default.build(&model, 75, None);
    let mut sim = Simulator::new(model, policy, 75).unwrap();
    let bundle = sim.run(40).unwrap();
    let stats = rl::report_performance_stats(&bundle).unwrap();

    assert_eq!(stats.per_trajectory_total_reward.len(), 75);
    let report = stats.to_string();
    assert!(report.contains("Average total reward = 40.000000"), "{report}");
    assert!(report.contains("Stddev total reward  = 0.000000"), "{report}");
}

#[test]
fn single_trajectory_stddev_is_zero() {
    let model = ConstantRewardModel::new(-0.25);
    let policy = PolicyKind::Random.build(&model, 1, Some(3));
    let mut sim = Simulator::new(model, policy, 1).unwrap();
    let stats = PerformanceStats::from_bundle(&sim.run(10).unwrap()).unwrap();
    assert!((stats.average_total_reward + 2.5).abs() < 1e-6);
    assert_eq!(stats.stddev_total_reward, 0.0);
}

#[test]
fn invalid_dimensions_fail_before_stepping() {
    let model = ConstantRewardModel::new(1.0);
    let policy = PolicyKind::Default.build(&model, 4, None);
    assert!(matches!(
        Simulator::new(ConstantRewardModel::new(1.0), PolicyKind::Default.build(&model, 0, None), 0),
        Err(RolloutError::InvalidBatchSize(0))
    ));
    let mut sim = Simulator::new(model, policy, 4).unwrap();
    assert!(matches!(sim.run(0), Err(RolloutError::InvalidHorizon(0))));
}

struct WideAction;

impl Policy for WideAction {
    fn name(&self) -> &'static str {
        "wide"
    }

    fn act(&mut self, state: &Tensor, _timestep: Option<usize>) -> Result<Tensor, PolicyError> {
        Ok(Tensor::zeros(vec![state.rows(), 3]))
    }
}

#[test]
fn malformed_actions_abort_the_rollout() {
    let mut sim = Simulator::new(ConstantRewardModel::new(1.0), WideAction, 2).unwrap();
    let err = sim.run(3).unwrap_err();
    assert!(matches!(err, RolloutError::ShapeMismatch { what: "action", .. }), "{err}");
}

#[test]
fn policy_batch_mismatch_propagates() {
    let model = ConstantRewardModel::new(1.0);
    let policy = PolicyKind::Default.build(&model, 5, None);
    let mut sim = Simulator::new(model, policy, 4).unwrap();
    let err = sim.run(2).unwrap_err();
    assert!(matches!(err, RolloutError::Policy(PolicyError::BatchMismatch { expected: 5, actual: 4 })));
}
