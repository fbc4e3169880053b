use crate::action::RawAction;
use crate::adapter::{EndpointSchema, InferenceAdapter};
use crate::encoder::Observation;
use crate::error::InferenceError;
use std::path::PathBuf;

/// Anything that maps an [`Observation`] to a [`RawAction`].
///
/// The evaluation loop only talks to this trait, so scripted agents can
/// stand in for a loaded model.
pub trait Agent {
    /// # Errors
    ///
    /// Returns an [`InferenceError`] when no action can be produced.
    fn act(&mut self, observation: &Observation) -> Result<RawAction, InferenceError>;
}

#[derive(Debug, Clone)]
pub struct PolicyConfig {
    pub model_dir: PathBuf,
    pub schema: EndpointSchema,
}

impl PolicyConfig {
    #[must_use]
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            schema: EndpointSchema::default(),
        }
    }
}

/// Evaluation policy backed by an exported model.
///
/// `setup` acquires the inference session, `act` runs it, `teardown`
/// releases it. Dropping a policy that is still set up releases the session
/// as well.
pub struct Policy {
    config: PolicyConfig,
    adapter: Option<InferenceAdapter>,
}

impl Policy {
    #[must_use]
    pub fn new(config: PolicyConfig) -> Self {
        Self {
            config,
            adapter: None,
        }
    }

    /// Loads the model. A second call on a ready policy does nothing.
    ///
    /// # Errors
    ///
    /// Any [`InferenceAdapter::setup`] failure; the policy stays un-set-up.
    pub fn setup(&mut self) -> Result<(), InferenceError> {
        if self.adapter.is_some() {
            tracing::debug!("policy already set up");
            return Ok(());
        }
        let adapter = InferenceAdapter::setup(&self.config.model_dir, self.config.schema.clone())?;
        self.adapter = Some(adapter);
        Ok(())
    }

    /// Releases the model. Calling it again, or before `setup`, is a no-op.
    pub fn teardown(&mut self) {
        if let Some(adapter) = self.adapter.take() {
            adapter.teardown();
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.adapter.is_some()
    }
}

impl Agent for Policy {
    fn act(&mut self, observation: &Observation) -> Result<RawAction, InferenceError> {
        self.adapter
            .as_ref()
            .ok_or(InferenceError::NotSetUp)?
            .evaluate(observation)
    }
}
