//! # Value spaces
//!
//! Declared, bounded domains for model inputs and outputs. A [`Space`] is
//! either a real box, a discrete enumeration, or a dictionary of named
//! sub-spaces. Dictionary keys are kept sorted, which fixes the order in which
//! [`crate::DictFlattener`] lays the fields out.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Space {
    /// Real-valued array with per-element bounds.
    Box {
        low: Vec<f64>,
        high: Vec<f64>,
        shape: Vec<usize>,
    },
    /// Integer in `[0, n)`.
    Discrete { n: usize },
    Dict { spaces: BTreeMap<String, Space> },
}

/// A value drawn from a [`Space`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpaceValue {
    Array(Vec<f64>),
    Index(usize),
    Dict(BTreeMap<String, SpaceValue>),
}

impl Space {
    /// A box with the same bounds for every element.
    #[must_use]
    pub fn uniform_box(low: f64, high: f64, shape: Vec<usize>) -> Self {
        let n = shape.iter().product();
        Space::Box {
            low: vec![low; n],
            high: vec![high; n],
            shape,
        }
    }

    /// A 1-D box with per-element bounds.
    #[must_use]
    pub fn bounded(low: Vec<f64>, high: Vec<f64>) -> Self {
        debug_assert_eq!(low.len(), high.len());
        let shape = vec![low.len()];
        Space::Box { low, high, shape }
    }

    #[must_use]
    pub fn dict<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Space)>,
        K: Into<String>,
    {
        Space::Dict {
            spaces: entries.into_iter().map(|(k, s)| (k.into(), s)).collect(),
        }
    }

    /// Length of the flat feature vector for values of this space.
    /// Discrete spaces are one-hot encoded.
    #[must_use]
    pub fn flat_dim(&self) -> usize {
        match self {
            Space::Box { shape, .. } => shape.iter().product(),
            Space::Discrete { n } => *n,
            Space::Dict { spaces } => spaces.values().map(Space::flat_dim).sum(),
        }
    }

    /// Whether `value` has the right structure and lies within the bounds.
    #[must_use]
    pub fn contains(&self, value: &SpaceValue) -> bool {
        match (self, value) {
            (Space::Box { low, high, .. }, SpaceValue::Array(v)) => {
                v.len() == low.len()
                    && v
                        .iter()
                        .zip(low.iter().zip(high))
                        .all(|(x, (lo, hi))| (*lo..=*hi).contains(x))
            }
            (Space::Discrete { n }, SpaceValue::Index(i)) => i < n,
            (Space::Dict { spaces }, SpaceValue::Dict(values)) => {
                spaces.len() == values.len()
                    && spaces
                        .iter()
                        .all(|(k, s)| values.get(k).is_some_and(|v| s.contains(v)))
            }
            _ => false,
        }
    }

    /// Clamp a box value element-wise into the bounds. Other spaces are
    /// returned unchanged.
    #[must_use]
    pub fn clip(&self, values: &[f64]) -> Vec<f64> {
        match self {
            Space::Box { low, high, .. } => values
                .iter()
                .zip(low.iter().zip(high))
                .map(|(v, (lo, hi))| v.clamp(*lo, *hi))
                .collect(),
            _ => values.to_vec(),
        }
    }
}
