#![allow(dead_code)]

use ml::{
    Activation, Dense, ExportMetadata, LayerSpec, ModelArtifact, Sequential, Signature, TensorSpec,
    FORMAT_VERSION, SERVE_TAG,
};

pub const IN: &str = "default_policy/observation:0";
pub const OUT: &str = "default_policy/add:0";

/// Single linear layer, 2 inputs to 3 outputs, with hand-picked weights.
pub fn tiny_artifact() -> ModelArtifact {
    let w = vec![
        1.0, 2.0, // out 0
        -1.0, 0.5, // out 1
        0.0, 1.0, // out 2
    ];
    let b = vec![0.1, 0.2, 0.3];
    let layer = Dense::new(w, b, 2, 3, Activation::Linear).unwrap();
    ModelArtifact {
        metadata: ExportMetadata {
            format_version: FORMAT_VERSION,
            tags: vec![SERVE_TAG.to_string()],
            signature: Signature {
                inputs: vec![TensorSpec::batched(IN, 2)],
                outputs: vec![TensorSpec::batched(OUT, 3)],
            },
            input_dim: 2,
            layers: vec![LayerSpec {
                units: 3,
                activation: Activation::Linear,
            }],
        },
        network: Sequential::new(vec![layer]).unwrap(),
    }
}
