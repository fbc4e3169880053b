//! # Inference adapter
//!
//! Binds an [`Observation`] to a loaded graph. The binding is an explicit,
//! versioned [`EndpointSchema`] (endpoint names and shapes agreed at export
//! time), checked once when the session is opened. An incompatible artifact
//! fails setup with an [`InferenceError`].

use crate::action::RawAction;
use crate::encoder::Observation;
use crate::error::InferenceError;
use crate::spaces::{self, ACTION_DIM};
use ml::{DictFlattener, Session, Tensor, TensorSpec, SERVE_TAG};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SCHEMA_VERSION: u32 = 1;

/// Input endpoint name used by the exported policies.
pub const INPUT_ENDPOINT: &str = "default_policy/observation:0";
/// Output endpoint name used by the exported policies.
pub const OUTPUT_ENDPOINT: &str = "default_policy/add:0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSchema {
    pub version: u32,
    pub tag: String,
    pub input: TensorSpec,
    pub output: TensorSpec,
}

impl Default for EndpointSchema {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            tag: SERVE_TAG.to_string(),
            input: TensorSpec::batched(INPUT_ENDPOINT, spaces::observation_space().flat_dim()),
            output: TensorSpec::batched(OUTPUT_ENDPOINT, ACTION_DIM),
        }
    }
}

impl EndpointSchema {
    /// Verifies that `session` exposes both endpoints with the agreed shapes.
    ///
    /// # Errors
    ///
    /// [`InferenceError::Model`] wrapping `UnknownTensor` for a missing
    /// endpoint, [`InferenceError::Schema`] for a shape mismatch.
    pub fn check(&self, session: &Session) -> Result<(), InferenceError> {
        let found_in = session.input(&self.input.name)?;
        self.expect_shape(&self.input, found_in)?;
        let found_out = session.output(&self.output.name)?;
        self.expect_shape(&self.output, found_out)
    }

    fn expect_shape(&self, expected: &TensorSpec, found: &TensorSpec) -> Result<(), InferenceError> {
        if expected.shape == found.shape {
            Ok(())
        } else {
            Err(InferenceError::Schema {
                name: expected.name.clone(),
                version: self.version,
                expected: expected.shape.clone(),
                found: found.shape.clone(),
            })
        }
    }
}

/// Owns the inference session for the lifetime of a policy.
pub struct InferenceAdapter {
    session: Session,
    flattener: DictFlattener,
    schema: EndpointSchema,
}

impl InferenceAdapter {
    /// Opens the artifact in `model_dir` and checks it against `schema`.
    ///
    /// If any check fails the partially opened session is dropped, which
    /// releases it.
    ///
    /// # Errors
    ///
    /// Any artifact loading failure, a schema mismatch, or a schema whose
    /// input width disagrees with the flattened observation space.
    pub fn setup(model_dir: &Path, schema: EndpointSchema) -> Result<Self, InferenceError> {
        let session = Session::open(model_dir, &schema.tag)?;
        let adapter = Self::with_session(session, schema)?;
        tracing::info!(
            path = %model_dir.display(),
            input = %adapter.schema.input.name,
            output = %adapter.schema.output.name,
            "inference adapter ready"
        );
        Ok(adapter)
    }

    /// Wraps an already opened session.
    ///
    /// # Errors
    ///
    /// As for [`InferenceAdapter::setup`], minus loading.
    pub fn with_session(session: Session, schema: EndpointSchema) -> Result<Self, InferenceError> {
        let flattener = DictFlattener::new(spaces::observation_space());
        let width = schema.input.features().unwrap_or_default();
        if width != flattener.size() {
            return Err(InferenceError::Schema {
                name: schema.input.name.clone(),
                version: schema.version,
                expected: vec![-1, flattener.size() as i64],
                found: schema.input.shape.clone(),
            });
        }
        if schema.output.features() != Some(ACTION_DIM) {
            return Err(InferenceError::Schema {
                name: schema.output.name.clone(),
                version: schema.version,
                expected: vec![-1, ACTION_DIM as i64],
                found: schema.output.shape.clone(),
            });
        }
        schema.check(&session)?;
        Ok(Self {
            session,
            flattener,
            schema,
        })
    }

    #[must_use]
    pub fn schema(&self) -> &EndpointSchema {
        &self.schema
    }

    /// One stateless forward pass: no recurrent state, no sequence lengths.
    ///
    /// # Errors
    ///
    /// Flattening or execution failures, or an output row of the wrong width.
    pub fn evaluate(&self, observation: &Observation) -> Result<RawAction, InferenceError> {
        let flat = self.flattener.transform(&observation.to_space_value())?;
        let input = Tensor::row_vector(flat);
        let output = self
            .session
            .run(&self.schema.output.name, &self.schema.input.name, &input)?;
        let row = output.row(0).ok_or(InferenceError::OutputArity {
            expected: ACTION_DIM,
            found: 0,
        })?;
        RawAction::from_row(row)
    }

    /// Closes the session. Dropping the adapter has the same effect.
    pub fn teardown(mut self) {
        self.session.close();
        tracing::info!("inference adapter torn down");
    }
}
