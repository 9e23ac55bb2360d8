use domain::{Domain, ZoneDef, BUILTIN};
use model::{Model, NonFluents};
use std::fs;

#[test]
fn parse_two_zone_file() {
    let json = fs::read_to_string("tests/data/two_zones.json").unwrap();
    let d = Domain::from_json(&json).unwrap();
    assert_eq!(d.zones.len(), 2);
    assert_eq!(d.start, [0.5, 0.5]);
    assert_eq!(d.seed, Some(11));
}

#[test]
fn defaults_fill_optional_fields() {
    let d = Domain::from_json(r#"{ "name": "n", "goal": [1.0, 2.0] }"#).unwrap();
    assert_eq!(d.start, [0.0, 0.0]);
    assert!(d.zones.is_empty());
    assert_eq!(d.action_bounds, [-1.0, 1.0]);
}

#[test]
fn load_prefers_files_then_builtins() {
    let from_file = Domain::load("tests/data/two_zones.json").unwrap();
    assert_eq!(from_file.name, "Navigation-custom");
    for id in BUILTIN {
        assert_eq!(Domain::load(id).unwrap().name, id);
    }
    assert!(Domain::load("Navigation-v9").is_err());
}

#[test]
fn model_exposes_domain_constants() {
    let model = Domain::load("tests/data/two_zones.json").unwrap().into_model().unwrap();
    let nf = NonFluents::from_model(&model).unwrap();
    assert_eq!(nf.start, [0.5, 0.5]);
    assert_eq!(nf.zones.len(), 2);
    assert_eq!(model.interm_size(), 4);
}

#[test]
fn negative_decay_fails_to_build() {
    let d = Domain::load("tests/data/negative_decay.json").unwrap();
    let Err(err) = d.into_model() else {
        panic!("negative decay must be rejected");
    };
    assert!(format!("{err:#}").contains("decay"));
}

#[test]
fn seed_override_only_when_given() {
    let d = Domain::builtin("Navigation-v1").unwrap();
    assert_eq!(d.clone().with_seed(None).seed, None);
    assert_eq!(d.with_seed(Some(5)).seed, Some(5));
}

#[test]
fn builtins_build_models() {
    let v2 = Domain::builtin("Navigation-v2").unwrap();
    assert_eq!(v2.zones, vec![ZoneDef::new(3.5, 2.5, 2.0), ZoneDef::new(6.5, 7.0, 1.6)]);
    for id in BUILTIN {
        let model = Domain::builtin(id).unwrap().into_model().unwrap();
        assert_eq!(model.name(), id);
        assert_eq!(NonFluents::from_model(&model).unwrap().goal, [8.0, 9.0]);
    }
    assert!(Domain::builtin("Navigation-v0").is_none());
}
