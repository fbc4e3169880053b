//! # Model artifacts
//!
//! On-disk layout of an exported policy:
//!
//! ```text
//! model/
//! ├── export.json    format version, tags, signature, layer stack
//! └── variables.bin  f32 weights, host byte order, layer by layer (W then b)
//! ```
//!
//! Endpoint shapes use `-1` for the batch dimension.

use crate::error::ModelError;
use crate::nn::{Activation, Dense, Layer, Sequential};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const EXPORT_FILE: &str = "export.json";
pub const VARIABLES_FILE: &str = "variables.bin";
pub const FORMAT_VERSION: u32 = 1;
pub const SERVE_TAG: &str = "serve";

/// A named graph endpoint and its shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorSpec {
    pub name: String,
    pub shape: Vec<i64>,
}

impl TensorSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, shape: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    /// `[-1, features]`: a batch of flat feature rows.
    #[must_use]
    pub fn batched(name: impl Into<String>, features: usize) -> Self {
        Self::new(name, vec![-1, features as i64])
    }

    /// Size of the innermost dimension, if it is fixed.
    #[must_use]
    pub fn features(&self) -> Option<usize> {
        self.shape.last().and_then(|&d| usize::try_from(d).ok())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub inputs: Vec<TensorSpec>,
    pub outputs: Vec<TensorSpec>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub units: usize,
    #[serde(default)]
    pub activation: Activation,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub format_version: u32,
    pub tags: Vec<String>,
    pub signature: Signature,
    pub input_dim: usize,
    pub layers: Vec<LayerSpec>,
}

impl ExportMetadata {
    /// Total number of weights the layer stack reads from `variables.bin`,
    /// or `None` if it does not fit in `usize`.
    #[must_use]
    pub fn param_count(&self) -> Option<usize> {
        let mut in_dim = self.input_dim;
        let mut total: usize = 0;
        for layer in &self.layers {
            let layer_params = in_dim.checked_mul(layer.units)?.checked_add(layer.units)?;
            total = total.checked_add(layer_params)?;
            in_dim = layer.units;
        }
        Some(total)
    }

    #[must_use]
    pub fn output_dim(&self) -> usize {
        self.layers.last().map_or(self.input_dim, |l| l.units)
    }

    /// The graph must expose exactly one input and one output, shaped
    /// `[-1, input_dim]` and `[-1, output_dim]`.
    fn validate_signature(&self) -> Result<(), ModelError> {
        let sig = &self.signature;
        if sig.inputs.len() != 1 || sig.outputs.len() != 1 {
            return Err(ModelError::Signature(format!(
                "expected one input and one output, found {} and {}",
                sig.inputs.len(),
                sig.outputs.len()
            )));
        }
        let expect = [
            (&sig.inputs[0], self.input_dim),
            (&sig.outputs[0], self.output_dim()),
        ];
        for (spec, dim) in expect {
            let fixed = i64::try_from(dim).is_ok_and(|d| spec.shape == [-1, d]);
            if !fixed {
                return Err(ModelError::Signature(format!(
                    "{} has shape {:?}, the graph produces [-1, {dim}]",
                    spec.name, spec.shape
                )));
            }
        }
        Ok(())
    }
}

/// Parameters for [`ModelArtifact::random`].
#[derive(Clone, Debug)]
pub struct RandomInit {
    pub input: String,
    pub output: String,
    pub input_dim: usize,
    pub hidden: Vec<usize>,
    pub output_dim: usize,
    pub seed: u64,
}

/// An exported policy: metadata plus the network it describes.
#[derive(Clone, Debug)]
pub struct ModelArtifact {
    pub metadata: ExportMetadata,
    pub network: Sequential,
}

impl ModelArtifact {
    /// Loads an artifact directory, requiring `tag` among its export tags.
    ///
    /// # Errors
    ///
    /// Fails if either file is missing or malformed, the format version or
    /// tag does not match, the weight count disagrees with the layer stack,
    /// or the signature does not describe the stack. A stack whose weights
    /// cannot be addressed in memory is a [`ModelError::Signature`].
    pub fn load(dir: &Path, tag: &str) -> Result<Self, ModelError> {
        let json = fs::read_to_string(dir.join(EXPORT_FILE))?;
        let metadata: ExportMetadata = serde_json::from_str(&json)?;
        if metadata.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                expected: FORMAT_VERSION,
                found: metadata.format_version,
            });
        }
        if !metadata.tags.iter().any(|t| t == tag) {
            return Err(ModelError::MissingTag(tag.to_string()));
        }
        metadata.validate_signature()?;
        let (expected, expected_bytes) = metadata
            .param_count()
            .and_then(|n| Some((n, n.checked_mul(std::mem::size_of::<f32>())?)))
            .ok_or_else(|| {
                ModelError::Signature(format!(
                    "layer stack over input_dim {} is too large to address",
                    metadata.input_dim
                ))
            })?;

        let bytes = fs::read(dir.join(VARIABLES_FILE))?;
        if bytes.len() != expected_bytes {
            return Err(ModelError::WeightCount {
                expected,
                found: bytes.len() / std::mem::size_of::<f32>(),
            });
        }
        let mut params = vec![0f32; expected];
        bytemuck::cast_slice_mut::<f32, u8>(&mut params).copy_from_slice(&bytes);

        let network = build_network(&metadata, &params)?;
        tracing::info!(
            path = %dir.display(),
            layers = metadata.layers.len(),
            params = expected,
            "loaded model artifact"
        );
        Ok(Self { metadata, network })
    }

    /// Writes `export.json` and `variables.bin` into `dir`, creating it.
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialisation error.
    pub fn write(&self, dir: &Path) -> Result<(), ModelError> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join(EXPORT_FILE), serde_json::to_string_pretty(&self.metadata)?)?;
        let params = self.network.flat_params();
        fs::write(dir.join(VARIABLES_FILE), bytemuck::cast_slice::<f32, u8>(&params))?;
        Ok(())
    }

    /// A freshly initialised dense policy: `tanh` hidden layers and a linear
    /// output layer, exported with the `serve` tag.
    #[must_use]
    pub fn random(init: &RandomInit) -> Self {
        let mut rng = fastrand::Rng::with_seed(init.seed);
        let mut layers = Vec::with_capacity(init.hidden.len() + 1);
        let mut specs = Vec::with_capacity(init.hidden.len() + 1);
        let mut in_dim = init.input_dim;
        let widths = init
            .hidden
            .iter()
            .map(|&w| (w, Activation::Tanh))
            .chain(std::iter::once((init.output_dim, Activation::Linear)));
        for (units, activation) in widths {
            layers.push(Dense::random(in_dim, units, activation, &mut rng));
            specs.push(LayerSpec { units, activation });
            in_dim = units;
        }
        let metadata = ExportMetadata {
            format_version: FORMAT_VERSION,
            tags: vec![SERVE_TAG.to_string()],
            signature: Signature {
                inputs: vec![TensorSpec::batched(init.input.clone(), init.input_dim)],
                outputs: vec![TensorSpec::batched(init.output.clone(), init.output_dim)],
            },
            input_dim: init.input_dim,
            layers: specs,
        };
        Self {
            metadata,
            network: Sequential { layers },
        }
    }
}

/// `params` holds exactly `metadata.param_count()` values, so every slice
/// below stays in bounds.
fn build_network(metadata: &ExportMetadata, params: &[f32]) -> Result<Sequential, ModelError> {
    let mut layers = Vec::with_capacity(metadata.layers.len());
    let mut offset = 0;
    let mut in_dim = metadata.input_dim;
    for spec in &metadata.layers {
        let w_len = in_dim * spec.units;
        let weights = params[offset..offset + w_len].to_vec();
        let bias = params[offset + w_len..offset + w_len + spec.units].to_vec();
        let layer = Dense::new(weights, bias, in_dim, spec.units, spec.activation)?;
        offset += layer.param_count();
        in_dim = spec.units;
        layers.push(layer);
    }
    Sequential::new(layers)
}
