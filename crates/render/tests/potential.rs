use model::{ModelError, Zone};
use render::{compute_field, RenderError};
use rl::Bounds;

fn bounds() -> Bounds {
    Bounds::new(-5.0, 11.0, -2.0, 11.0).unwrap()
}

#[test]
fn no_zones_is_identically_one() {
    let field = compute_field(&bounds(), &[], 40).unwrap();
    assert_eq!(field.values().len(), 40 * 40);
    assert!(field.values().iter().all(|&v| v == 1.0));
}

#[test]
fn zero_decay_zone_vanishes_at_its_centre() {
    let b = Bounds::new(0.0, 4.0, 0.0, 4.0).unwrap();
    let field = compute_field(&b, &[Zone::new(2.0, 2.0, 0.0)], 5).unwrap();
    assert_eq!(field.at(2, 2), 0.0);
    // zero decay flattens the whole field
    assert!(field.values().iter().all(|&v| v == 0.0));
}

#[test]
fn field_is_product_of_zone_factors() {
    let zones = [Zone::new(5.0, 4.5, 1.15), Zone::new(2.5, 6.0, 1.8)];
    let field = compute_field(&bounds(), &zones, 17).unwrap();
    let (x, y) = (field.xs()[3], field.ys()[11]);
    let expected: f32 = zones.iter().map(|z| z.deceleration(x, y)).product();
    assert!((field.at(3, 11) - expected).abs() < 1e-6);
    assert!(field.values().iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn negative_decay_is_rejected() {
    let err = compute_field(&bounds(), &[Zone::new(0.0, 0.0, 1.0), Zone::new(1.0, 1.0, -0.5)], 10).unwrap_err();
    assert!(matches!(err, RenderError::Model(ModelError::InvalidDecay { index: 1, .. })));
}
