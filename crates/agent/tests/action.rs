use agent::action::{decode, round4, STEERING_SCALE_DEG};
use agent::{ActionDecoder, ClampMode, InferenceError, RawAction};
use road::Controls;

#[test]
fn rounding_is_pinned_to_the_exact_decimal_value() {
    // 0.12345 and 0.98765 are stored just above their midpoints
    let action = decode(RawAction::new(0.12345, 0.98765, -0.5));
    assert_eq!(action.throttle, 0.1235);
    assert_eq!(action.brake, 0.9877);
    assert_eq!(action.steering_degrees, -22.5);
}

#[test]
fn rounding_does_not_depend_on_the_scaled_product() {
    // 1.00005 * 1e4 rounds up to 10000.500000000002 in f64, 0.12345 * 1e4
    // rounds down to exactly 1234.5; both stored values lie above the tie
    assert_eq!(round4(1.00005), 1.0001);
    assert_eq!(round4(0.12345), 0.1235);
    assert_eq!(round4(-0.12345), -0.1235);
}

#[test]
fn exact_ties_round_to_even() {
    // 1/32 and 3/32 are exactly representable midpoints
    assert_eq!(round4(0.03125), 0.0312);
    assert_eq!(round4(0.09375), 0.0938);
    assert_eq!(round4(-0.03125), -0.0312);
}

#[test]
fn values_below_the_midpoint_round_down() {
    // 0.00015 is stored just below 1.5e-4
    assert_eq!(round4(0.00015), 0.0001);
    assert_eq!(round4(0.0), 0.0);
    assert_eq!(round4(1e-300), 0.0);
    assert_eq!(round4(1e15), 1e15);
}

#[test]
fn steering_scales_to_degrees() {
    for (normalised, degrees) in [(-1.0, -45.0), (0.0, 0.0), (0.5, 22.5), (1.0, 45.0)] {
        let action = decode(RawAction::new(0.0, 0.0, normalised));
        assert_eq!(action.steering_degrees, degrees);
    }
    assert_eq!(STEERING_SCALE_DEG, 45.0);
}

#[test]
fn steering_is_rounded_before_scaling() {
    let action = decode(RawAction::new(0.0, 0.0, 0.333_333));
    assert!((action.steering_degrees - 0.3333 * 45.0).abs() < 1e-12);
}

#[test]
fn rounding_is_idempotent() {
    for v in [0.0, 0.1, 0.12345, 0.5, 0.99999, 1.0, -0.77777] {
        let once = round4(v);
        assert_eq!(round4(once), once, "{v}");
    }
}

#[test]
fn decoded_action_feeds_the_environment_unchanged() {
    let action = decode(RawAction::new(0.25, 0.0, -0.2));
    let controls = Controls::from(action);
    assert_eq!(controls.throttle, action.throttle);
    assert_eq!(controls.brake, action.brake);
    assert_eq!(controls.steering_deg, action.steering_degrees);
}

#[test]
fn trust_mode_passes_out_of_range_values_through() {
    let raw = RawAction::new(1.5, -0.25, 2.0);
    assert!(!raw.within_bounds());
    let action = ActionDecoder::default().decode(raw);
    assert_eq!(action.throttle, 1.5);
    assert_eq!(action.brake, -0.25);
    assert_eq!(action.steering_degrees, 90.0);
}

#[test]
fn clamp_mode_projects_onto_the_action_space() {
    let action = ActionDecoder::new(ClampMode::Clamp).decode(RawAction::new(1.5, -0.25, -2.0));
    assert_eq!(action.throttle, 1.0);
    assert_eq!(action.brake, 0.0);
    assert_eq!(action.steering_degrees, -45.0);

    let inside = RawAction::new(0.3, 0.1, 0.5);
    assert_eq!(ActionDecoder::new(ClampMode::Clamp).decode(inside), decode(inside));
}

#[test]
fn output_rows_must_have_three_components() {
    let raw = RawAction::from_row(&[0.5, 0.25, -1.0]).unwrap();
    assert_eq!(raw, RawAction::new(0.5, 0.25, -1.0));

    for row in [&[0.5_f32, 0.25][..], &[0.0; 4][..], &[][..]] {
        match RawAction::from_row(row) {
            Err(InferenceError::OutputArity { expected, found }) => {
                assert_eq!(expected, 3);
                assert_eq!(found, row.len());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
