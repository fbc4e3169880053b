use anyhow::Result;
use lanepilot::agent::ClampMode;
use lanepilot::config::{Overrides, RunConfig, DEFAULT_SEED};
use std::path::{Path, PathBuf};

#[test]
fn empty_config_uses_defaults() -> Result<()> {
    let config = RunConfig::from_json("{}")?;
    assert_eq!(config, RunConfig::default());
    assert_eq!(config.max_steps, 1000);
    assert_eq!(config.seed, DEFAULT_SEED);
    assert_eq!(config.clamp, ClampMode::Trust);
    assert!(config.scenario_path().is_err());
    assert!(config.model_dir().is_err());
    Ok(())
}

#[test]
fn load_reads_file_values() -> Result<()> {
    let config = RunConfig::load(Path::new("tests/data/run.json"))?;
    assert_eq!(config.scenario_path()?, Path::new("tests/data/short_road.json"));
    assert_eq!(config.max_steps, 50);
    assert_eq!(config.seed, 7);
    assert_eq!(config.clamp, ClampMode::Clamp);
    assert!(config.model.is_none());
    Ok(())
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(RunConfig::from_json(r#"{ "max_step": 10 }"#).is_err());
}

#[test]
fn missing_file_names_the_path() {
    let err = RunConfig::load(Path::new("tests/data/absent.json")).unwrap_err();
    assert!(format!("{err:#}").contains("absent.json"));
}

#[test]
fn flags_override_file_values() -> Result<()> {
    let config = RunConfig::load(Path::new("tests/data/run.json"))?.with_overrides(Overrides {
        model: Some(PathBuf::from("model")),
        seed: Some(1),
        ..Overrides::default()
    });
    assert_eq!(config.model_dir()?, Path::new("model"));
    assert_eq!(config.seed, 1);
    // untouched by flags
    assert_eq!(config.max_steps, 50);
    assert_eq!(config.clamp, ClampMode::Clamp);

    let eval = config.eval_config();
    assert_eq!(eval.max_steps, 50);
    assert!(!eval.record_steps);
    Ok(())
}
