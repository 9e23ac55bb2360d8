use ml::Tensor;
use model::{Model, ModelError, NavigationModel, NavigationParams, NonFluents, Zone};

fn params(noise: f32) -> NavigationParams {
    NavigationParams {
        name: "Navigation-test".into(),
        goal: [8.0, 9.0],
        start: [0.0, 0.0],
        zones: vec![Zone::new(5.0, 4.5, 1.15)],
        action_bounds: (-1.0, 1.0),
        noise_stddev: noise,
        seed: Some(3),
    }
}

#[test]
fn deterministic_step_without_noise() {
    let mut model = NavigationModel::new(params(0.0)).unwrap();
    let state = Tensor::tile_rows(&[0.0, 0.0], 3);
    let action = Tensor::tile_rows(&[1.0, 0.5], 3);
    let t = model.transition(&state, &action).unwrap();

    let zone = Zone::new(5.0, 4.5, 1.15);
    let lambda = zone.deceleration(0.0, 0.0);
    assert_eq!(t.next_state.shape(), &[3, 2]);
    assert_eq!(t.interm.shape(), &[3, 2]);
    assert_eq!(t.reward.shape(), &[3]);
    for row in t.next_state.iter_rows() {
        assert!((row[0] - lambda).abs() < 1e-6);
        assert!((row[1] - 0.5 * lambda).abs() < 1e-6);
    }
    let expected_reward = -((8.0 - lambda).powi(2) + (9.0 - 0.5 * lambda).powi(2)).sqrt();
    assert!((t.reward.data()[0] - expected_reward).abs() < 1e-5);
    assert!((t.interm.row(0)[0] - zone.distance(0.0, 0.0)).abs() < 1e-6);
    assert!((t.interm.row(0)[1] - lambda).abs() < 1e-6);
}

#[test]
fn actions_are_clipped_to_bounds() {
    let mut p = params(0.0);
    p.zones.clear();
    let mut model = NavigationModel::new(p).unwrap();
    let t = model
        .transition(&Tensor::zeros(vec![1, 2]), &Tensor::from_vec(vec![1, 2], vec![5.0, -5.0]))
        .unwrap();
    assert_eq!(t.next_state.data(), &[1.0, -1.0]);
    assert_eq!(t.interm.shape(), &[1, 0]);
}

#[test]
fn same_seed_same_noise() {
    let state = Tensor::zeros(vec![4, 2]);
    let action = Tensor::zeros(vec![4, 2]);
    let mut a = NavigationModel::new(params(0.1)).unwrap();
    let mut b = NavigationModel::new(params(0.1)).unwrap();
    assert_eq!(
        a.transition(&state, &action).unwrap(),
        b.transition(&state, &action).unwrap()
    );
}

#[test]
fn mismatched_batches_fail() {
    let mut model = NavigationModel::new(params(0.0)).unwrap();
    let err = model.transition(&Tensor::zeros(vec![3, 2]), &Tensor::zeros(vec![2, 2])).unwrap_err();
    assert!(matches!(err, ModelError::BatchMismatch { expected: 3, actual: 2, .. }));
    let err = model.transition(&Tensor::zeros(vec![3, 3]), &Tensor::zeros(vec![3, 2])).unwrap_err();
    assert!(matches!(err, ModelError::Tensor(_)));
}

#[test]
fn negative_decay_rejected_at_construction() {
    let mut p = params(0.0);
    p.zones.push(Zone::new(1.0, 1.0, -2.0));
    assert!(matches!(NavigationModel::new(p), Err(ModelError::InvalidDecay { index: 1, .. })));
}

#[test]
fn non_fluents_round_trip_into_typed_view() {
    let model = NavigationModel::new(params(0.0)).unwrap();
    let nf = NonFluents::from_model(&model).unwrap();
    assert_eq!(nf.goal, [8.0, 9.0]);
    assert_eq!(nf.start, [0.0, 0.0]);
    assert_eq!(nf.zones, vec![Zone::new(5.0, 4.5, 1.15)]);
    assert_eq!(model.initial_state_row().unwrap(), vec![0.0, 0.0]);
    assert_eq!(model.state_size(), 2);
    assert_eq!(model.interm_size(), 2);
}
