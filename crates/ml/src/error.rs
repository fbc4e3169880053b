use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("tensor shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed export metadata: {0}")]
    Metadata(#[from] serde_json::Error),
    #[error("unsupported export format version {found} (expected {expected})")]
    UnsupportedVersion { expected: u32, found: u32 },
    #[error("artifact is not tagged {0:?}")]
    MissingTag(String),
    #[error("weight file holds {found} values but the layer stack needs {expected}")]
    WeightCount { expected: usize, found: usize },
    #[error("invalid signature: {0}")]
    Signature(String),
    #[error("no tensor named {0:?} in the graph")]
    UnknownTensor(String),
    #[error("value does not match observation space: {0}")]
    SpaceMismatch(String),
    #[error("session is closed")]
    SessionClosed,
}
