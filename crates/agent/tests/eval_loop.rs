mod common;

use agent::{
    ClampMode, ConfigurationError, EncodingError, EvalConfig, EvalError, EvalLoop, Outcome, Phase,
    RawAction,
};
use common::{centered, ego_at, lane_center, straight_road, ConstantAgent, ScriptedEnv};

fn cruise() -> ConstantAgent {
    ConstantAgent::new(RawAction::new(0.5, 0.0, 0.0))
}

#[test]
fn episode_terminates_when_the_environment_reports_done() {
    // shaped rewards: 1 * 100, 0.5 * 100, 2 * cos(60 deg) * 100
    let script = vec![
        (centered(), 1.0, false),
        (centered(), 0.5, false),
        (straight_road(ego_at(0.0, lane_center(1), -60.0), 3), 2.0, true),
        (centered(), 1000.0, false),
    ];
    let mut env = ScriptedEnv::new(centered(), script);
    let mut agent = cruise();

    let mut eval = EvalLoop::new(&mut env, &mut agent, EvalConfig::default());
    assert_eq!(eval.phase(), Phase::Created);
    let report = eval.run().unwrap();
    assert_eq!(eval.phase(), Phase::Terminated);

    assert!(report.outcome.is_terminated());
    assert_eq!(report.outcome.steps(), 3);
    assert!((report.outcome.total_reward() - 250.0).abs() < 1e-9, "{report:?}");
    assert!((report.mean_reward - 250.0 / 3.0).abs() < 1e-9);
    assert!(report.records.is_empty());

    assert_eq!(env.resets, 1);
    assert_eq!(env.submitted.len(), 3);
    assert_eq!(agent.seen.len(), 3);
}

#[test]
fn episode_is_exhausted_after_max_steps() {
    let mut env = ScriptedEnv::endless(0.1, 20);
    let mut agent = cruise();
    let config = EvalConfig {
        max_steps: 5,
        ..EvalConfig::default()
    };

    let mut eval = EvalLoop::new(&mut env, &mut agent, config);
    let report = eval.run().unwrap();
    assert_eq!(eval.phase(), Phase::Exhausted);
    match report.outcome {
        Outcome::Exhausted { steps, total_reward } => {
            assert_eq!(steps, 5);
            assert!((total_reward - 50.0).abs() < 1e-9);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(env.submitted.len(), 5);
}

#[test]
fn done_on_the_last_allowed_step_counts_as_terminated() {
    let script = vec![(centered(), 1.0, false), (centered(), 1.0, true)];
    let mut env = ScriptedEnv::new(centered(), script);
    let mut agent = cruise();
    let config = EvalConfig {
        max_steps: 2,
        ..EvalConfig::default()
    };
    let report = EvalLoop::new(&mut env, &mut agent, config).run().unwrap();
    assert!(report.outcome.is_terminated());
}

#[test]
fn decoded_actions_reach_the_environment() {
    let mut env = ScriptedEnv::new(centered(), vec![(centered(), 1.0, true)]);
    let mut agent = ConstantAgent::new(RawAction::new(0.12345, 0.98765, -0.5));
    EvalLoop::new(&mut env, &mut agent, EvalConfig::default())
        .run()
        .unwrap();

    let controls = env.submitted[0];
    assert_eq!(controls.throttle, 0.1235);
    assert_eq!(controls.brake, 0.9877);
    assert_eq!(controls.steering_deg, -22.5);
}

#[test]
fn clamp_mode_applies_inside_the_loop() {
    let mut env = ScriptedEnv::new(centered(), vec![(centered(), 1.0, true)]);
    let mut agent = ConstantAgent::new(RawAction::new(3.0, 0.0, 4.0));
    let config = EvalConfig {
        clamp: ClampMode::Clamp,
        ..EvalConfig::default()
    };
    EvalLoop::new(&mut env, &mut agent, config).run().unwrap();
    assert_eq!(env.submitted[0].throttle, 1.0);
    assert_eq!(env.submitted[0].steering_deg, 45.0);
}

#[test]
fn step_records_are_kept_on_request() {
    let script = vec![(centered(), 1.0, false), (centered(), 2.0, true)];
    let mut env = ScriptedEnv::new(centered(), script);
    let mut agent = cruise();
    let config = EvalConfig {
        record_steps: true,
        ..EvalConfig::default()
    };
    let report = EvalLoop::new(&mut env, &mut agent, config).run().unwrap();

    assert_eq!(report.records.len(), 2);
    let last = report.records[1];
    assert_eq!(last.step, 1);
    assert_eq!(last.base_reward, 2.0);
    assert!((last.shaped_reward - 200.0).abs() < 1e-9);
    assert!(last.done);
    assert_eq!(last.action.throttle, 0.5);
}

#[test]
fn empty_paths_abort_the_episode() {
    let mut broken = centered();
    broken.waypoint_paths.clear();
    let script = vec![(centered(), 1.0, false), (broken, 1.0, false), (centered(), 1.0, true)];
    let mut env = ScriptedEnv::new(centered(), script);
    let mut agent = cruise();

    let mut eval = EvalLoop::new(&mut env, &mut agent, EvalConfig::default());
    assert!(matches!(
        eval.run(),
        Err(EvalError::Encoding(EncodingError::NoCandidatePaths))
    ));
    assert_eq!(eval.phase(), Phase::Failed);
    // the failure surfaces while shaping step 2; step 3 never runs
    assert_eq!(env.submitted.len(), 2);
}

#[test]
fn environment_errors_abort_the_episode() {
    // script runs out after one non-terminal step
    let mut env = ScriptedEnv::new(centered(), vec![(centered(), 1.0, false)]);
    let mut agent = cruise();
    let mut eval = EvalLoop::new(&mut env, &mut agent, EvalConfig::default());
    assert!(matches!(eval.run(), Err(EvalError::Environment(_))));
    assert_eq!(eval.phase(), Phase::Failed);
}

#[test]
fn zero_max_steps_is_rejected_before_reset() {
    let mut env = ScriptedEnv::endless(1.0, 1);
    let mut agent = cruise();
    let config = EvalConfig {
        max_steps: 0,
        ..EvalConfig::default()
    };
    let mut eval = EvalLoop::new(&mut env, &mut agent, config);
    assert!(matches!(
        eval.run(),
        Err(EvalError::Configuration(ConfigurationError::ZeroMaxSteps))
    ));
    assert_eq!(eval.phase(), Phase::Failed);
    assert_eq!(env.resets, 0);
}

#[test]
fn default_config_allows_one_thousand_steps() {
    let config = EvalConfig::default();
    assert_eq!(config.max_steps, 1000);
    assert_eq!(config.clamp, ClampMode::Trust);
}
