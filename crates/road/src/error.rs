use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoadError {
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("non-finite controls: throttle={throttle}, brake={brake}, steering={steering_deg}")]
    InvalidControls {
        throttle: f64,
        brake: f64,
        steering_deg: f64,
    },
    #[error("environment stepped before reset")]
    NotReset,
    #[error("environment is closed")]
    Closed,
}
