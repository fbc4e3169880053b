//! # Inference sessions
//!
//! A [`Session`] is the runtime context for one loaded graph. It is opened
//! once, addressed by endpoint name for every forward pass, and closed
//! explicitly or when dropped.

use crate::artifact::{ModelArtifact, TensorSpec};
use crate::error::ModelError;
use crate::nn::Layer;
use crate::tensor::Tensor;
use std::path::Path;

pub struct Session {
    graph: Option<ModelArtifact>,
}

impl Session {
    /// Loads the artifact in `dir` tagged `tag` and opens a session on it.
    ///
    /// # Errors
    ///
    /// Propagates any [`ModelArtifact::load`] failure.
    pub fn open(dir: &Path, tag: &str) -> Result<Self, ModelError> {
        let artifact = ModelArtifact::load(dir, tag)?;
        Ok(Self::from_artifact(artifact))
    }

    #[must_use]
    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        tracing::debug!("inference session opened");
        Self {
            graph: Some(artifact),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.graph.is_some()
    }

    fn graph(&self) -> Result<&ModelArtifact, ModelError> {
        self.graph.as_ref().ok_or(ModelError::SessionClosed)
    }

    /// Looks up a graph input by name.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnknownTensor`] if no input has that name,
    /// [`ModelError::SessionClosed`] after [`Session::close`].
    pub fn input(&self, name: &str) -> Result<&TensorSpec, ModelError> {
        self.graph()?
            .metadata
            .signature
            .inputs
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ModelError::UnknownTensor(name.to_string()))
    }

    /// Looks up a graph output by name.
    ///
    /// # Errors
    ///
    /// As for [`Session::input`].
    pub fn output(&self, name: &str) -> Result<&TensorSpec, ModelError> {
        self.graph()?
            .metadata
            .signature
            .outputs
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ModelError::UnknownTensor(name.to_string()))
    }

    /// Evaluates the `output` endpoint with `feed` bound to the `input`
    /// endpoint. `feed` is a `[batch, features]` tensor; every row is run
    /// through the graph independently and the result is `[batch, outputs]`.
    ///
    /// # Errors
    ///
    /// Fails for unknown endpoint names, a closed session, or a feed whose
    /// shape does not match the input endpoint.
    pub fn run(&self, output: &str, input: &str, feed: &Tensor) -> Result<Tensor, ModelError> {
        let in_spec = self.input(input)?;
        let out_spec = self.output(output)?;
        let network = &self.graph()?.network;

        let features = in_spec.features().unwrap_or_default();
        let batch = match feed.shape.as_slice() {
            [batch, cols] if *cols == features => *batch,
            _ => {
                return Err(ModelError::ShapeMismatch(format!(
                    "{input} expects {:?}, fed {:?}",
                    in_spec.shape, feed.shape
                )))
            }
        };

        let out_dim = out_spec.features().unwrap_or_else(|| network.out_dim());
        let mut data = Vec::with_capacity(batch * out_dim);
        for i in 0..batch {
            let row = &feed.data[i * features..(i + 1) * features];
            data.extend(network.forward(row));
        }
        Tensor::from_vec(vec![batch, out_dim], data)
    }

    /// Releases the loaded graph. Later calls fail with
    /// [`ModelError::SessionClosed`]; closing twice is harmless.
    pub fn close(&mut self) {
        if self.graph.take().is_some() {
            tracing::debug!("inference session closed");
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
