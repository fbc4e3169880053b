use crate::error::ModelError;
use crate::tensor::Tensor;
use serde::{Deserialize, Serialize};

/// A layer that maps one feature vector to another.
pub trait Layer {
    fn forward(&self, x: &[f32]) -> Vec<f32>;
    fn in_dim(&self) -> usize;
    fn out_dim(&self) -> usize;
    /// Number of trainable values the layer reads from the weight file.
    fn param_count(&self) -> usize {
        0
    }
}

/// Element-wise non-linearity applied after a dense layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// No activation; the layer output is the affine `Wx + b` ("add") node.
    #[default]
    Linear,
    Relu,
    Tanh,
    Sigmoid,
}

impl Activation {
    #[must_use]
    pub fn apply(self, v: f32) -> f32 {
        match self {
            Activation::Linear => v,
            Activation::Relu => v.max(0.0),
            Activation::Tanh => v.tanh(),
            Activation::Sigmoid => 1.0 / (1.0 + (-v).exp()),
        }
    }
}

/// A fully connected neural network layer.
#[derive(Clone, Debug)]
pub struct Dense {
    /// The weight matrix for the layer, `[out_dim, in_dim]`.
    pub w: Tensor,
    /// The bias vector for the layer.
    pub b: Tensor,
    pub activation: Activation,
    in_dim: usize,
    out_dim: usize,
}

impl Dense {
    /// Creates a new `Dense` layer with the given weights and biases.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ShapeMismatch`] if `weights` is not
    /// `in_dim * out_dim` long or `bias` is not `out_dim` long.
    pub fn new(
        weights: Vec<f32>,
        bias: Vec<f32>,
        in_dim: usize,
        out_dim: usize,
        activation: Activation,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            w: Tensor::from_vec(vec![out_dim, in_dim], weights)?,
            b: Tensor::from_vec(vec![out_dim], bias)?,
            activation,
            in_dim,
            out_dim,
        })
    }

    /// Glorot-uniform weights and zero bias.
    #[must_use]
    pub fn random(in_dim: usize, out_dim: usize, activation: Activation, rng: &mut fastrand::Rng) -> Self {
        let limit = (6.0 / (in_dim + out_dim) as f32).sqrt();
        let weights = (0..in_dim * out_dim)
            .map(|_| rng.f32() * 2.0 * limit - limit)
            .collect();
        Self {
            w: Tensor {
                data: weights,
                shape: vec![out_dim, in_dim],
            },
            b: Tensor {
                data: vec![0.0; out_dim],
                shape: vec![out_dim],
            },
            activation,
            in_dim,
            out_dim,
        }
    }
}

impl Layer for Dense {
    fn forward(&self, x: &[f32]) -> Vec<f32> {
        debug_assert_eq!(x.len(), self.in_dim);
        (0..self.out_dim)
            .map(|o| {
                let row = &self.w.data[o * self.in_dim..(o + 1) * self.in_dim];
                let sum = row.iter().zip(x).fold(self.b.data[o], |acc, (w, v)| acc + w * v);
                self.activation.apply(sum)
            })
            .collect()
    }

    fn in_dim(&self) -> usize {
        self.in_dim
    }

    fn out_dim(&self) -> usize {
        self.out_dim
    }

    fn param_count(&self) -> usize {
        self.in_dim * self.out_dim + self.out_dim
    }
}

/// A stack of dense layers applied in order.
#[derive(Clone, Debug, Default)]
pub struct Sequential {
    pub layers: Vec<Dense>,
}

impl Sequential {
    /// # Errors
    ///
    /// Returns [`ModelError::ShapeMismatch`] if adjacent layers disagree on
    /// their shared dimension.
    pub fn new(layers: Vec<Dense>) -> Result<Self, ModelError> {
        for pair in layers.windows(2) {
            if pair[0].out_dim() != pair[1].in_dim() {
                return Err(ModelError::ShapeMismatch(format!(
                    "layer outputs {} features but the next layer takes {}",
                    pair[0].out_dim(),
                    pair[1].in_dim()
                )));
            }
        }
        Ok(Self { layers })
    }

    /// Concatenation of every layer's weights then bias, in layer order.
    #[must_use]
    pub fn flat_params(&self) -> Vec<f32> {
        self.layers
            .iter()
            .flat_map(|l| l.w.data.iter().chain(&l.b.data).copied())
            .collect()
    }
}

impl Layer for Sequential {
    fn forward(&self, x: &[f32]) -> Vec<f32> {
        self.layers
            .iter()
            .fold(x.to_vec(), |h, layer| layer.forward(&h))
    }

    fn in_dim(&self) -> usize {
        self.layers.first().map_or(0, Dense::in_dim)
    }

    fn out_dim(&self) -> usize {
        self.layers.last().map_or(0, Dense::out_dim)
    }

    fn param_count(&self) -> usize {
        self.layers.iter().map(Layer::param_count).sum()
    }
}
