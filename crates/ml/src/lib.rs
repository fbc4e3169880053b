#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss
)]
//! # Lanepilot Inference Engine
//!
//! A small CPU executor for exported feed-forward policies.
//!
//! A trained policy is exported as a [`ModelArtifact`]: a directory holding
//! `export.json` (format version, tags, a signature naming one input and one
//! output endpoint, and the dense layer stack) next to `variables.bin` (the
//! raw `f32` weights). A [`Session`] owns a loaded artifact and runs forward
//! passes addressed by endpoint name, the same way a graph runtime is fed by
//! tensor name.
//!
//! Observations reach the network through a [`DictFlattener`], which turns a
//! structured value drawn from a [`Space`] into the flat feature vector the
//! exported graph expects.

pub mod artifact;
pub mod error;
pub mod nn;
pub mod preprocessor;
pub mod session;
pub mod space;
pub mod tensor;

pub use artifact::{
    ExportMetadata, LayerSpec, ModelArtifact, RandomInit, Signature, TensorSpec, EXPORT_FILE,
    FORMAT_VERSION, SERVE_TAG, VARIABLES_FILE,
};
pub use error::ModelError;
pub use nn::{Activation, Dense, Layer, Sequential};
pub use preprocessor::DictFlattener;
pub use session::Session;
pub use space::{Space, SpaceValue};
pub use tensor::Tensor;
