use ml::{ActionSpace, FeedforwardConfig, FeedforwardPolicy, Policy, PolicyError, Tensor};
use std::path::Path;

fn space() -> ActionSpace {
    ActionSpace { size: 2, low: -1.0, high: 1.0, default: vec![0.0, 0.0] }
}

fn restored_policy() -> FeedforwardPolicy {
    let config = FeedforwardConfig::from_file(Path::new("tests/data/policy.config.json")).unwrap();
    let mut policy = FeedforwardPolicy::new(config, 2, space());
    policy.build().unwrap();
    policy.restore(Path::new("tests/data/policy.ckpt.json")).unwrap();
    policy
}

#[test]
fn identity_network_passes_through_relu_and_tanh() {
    let mut policy = restored_policy();
    let states = Tensor::from_vec(vec![2, 2], vec![0.5, -0.5, -1.0, 2.0]);
    let actions = policy.act(&states, None).unwrap();

    assert_eq!(actions.shape(), &[2, 2]);
    assert!((actions.row(0)[0] - 0.5f32.tanh()).abs() < 1e-6);
    assert!(actions.row(0)[1].abs() < 1e-6);
    assert!(actions.row(1)[0].abs() < 1e-6);
    assert!((actions.row(1)[1] - 2.0f32.tanh()).abs() < 1e-6);
}

#[test]
fn any_batch_size_is_accepted() {
    let mut policy = restored_policy();
    let states = Tensor::zeros(vec![400, 2]);
    let actions = policy.act(&states, None).unwrap();
    assert_eq!(actions.shape(), &[400, 2]);
}

#[test]
fn checkpoint_with_missing_layer_is_rejected() {
    let config = FeedforwardConfig::from_file(Path::new("tests/data/policy.config.json")).unwrap();
    let mut policy = FeedforwardPolicy::new(config, 2, space());
    policy.build().unwrap();
    let err = policy.restore(Path::new("tests/data/truncated.ckpt.json")).unwrap_err();
    assert!(matches!(err, PolicyError::CheckpointMismatch(_)), "got {err:?}");
}

#[test]
fn missing_checkpoint_propagates_io_error() {
    let config = FeedforwardConfig::from_file(Path::new("tests/data/policy.config.json")).unwrap();
    let mut policy = FeedforwardPolicy::new(config, 2, space());
    policy.build().unwrap();
    let err = policy.restore(Path::new("tests/data/does-not-exist.json")).unwrap_err();
    assert!(matches!(err, PolicyError::Io { .. }));
}

#[test]
fn wrong_state_width_is_a_shape_error() {
    let mut policy = restored_policy();
    let err = policy.act(&Tensor::zeros(vec![3, 3]), None).unwrap_err();
    assert!(matches!(err, PolicyError::Tensor(_)));
}
