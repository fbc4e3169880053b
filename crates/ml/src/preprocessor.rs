use crate::error::ModelError;
use crate::space::{Space, SpaceValue};

/// Flattens values of a declared [`Space`] into the feature vector an
/// exported graph consumes.
///
/// Dictionary fields are visited in key order, boxes are copied element by
/// element and discrete values become one-hot vectors.
#[derive(Clone, Debug)]
pub struct DictFlattener {
    space: Space,
    size: usize,
}

impl DictFlattener {
    #[must_use]
    pub fn new(space: Space) -> Self {
        let size = space.flat_dim();
        Self { space, size }
    }

    /// Length of every vector produced by [`DictFlattener::transform`].
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// # Errors
    ///
    /// Returns [`ModelError::SpaceMismatch`] when `value` does not have the
    /// structure of the space, or a discrete index is out of range.
    pub fn transform(&self, value: &SpaceValue) -> Result<Vec<f32>, ModelError> {
        let mut out = Vec::with_capacity(self.size);
        write_flat(&self.space, value, "", &mut out)?;
        debug_assert_eq!(out.len(), self.size);
        Ok(out)
    }
}

fn write_flat(space: &Space, value: &SpaceValue, path: &str, out: &mut Vec<f32>) -> Result<(), ModelError> {
    match (space, value) {
        (Space::Box { shape, .. }, SpaceValue::Array(values)) => {
            let n: usize = shape.iter().product();
            if values.len() != n {
                return Err(ModelError::SpaceMismatch(format!(
                    "{path}: expected {n} values, got {}",
                    values.len()
                )));
            }
            out.extend(values.iter().map(|&v| v as f32));
        }
        (Space::Discrete { n }, SpaceValue::Index(i)) => {
            if i >= n {
                return Err(ModelError::SpaceMismatch(format!(
                    "{path}: index {i} outside discrete({n})"
                )));
            }
            let start = out.len();
            out.resize(start + n, 0.0);
            out[start + i] = 1.0;
        }
        (Space::Dict { spaces }, SpaceValue::Dict(values)) => {
            if let Some(extra) = values.keys().find(|k| !spaces.contains_key(*k)) {
                return Err(ModelError::SpaceMismatch(format!("{path}: unexpected field {extra:?}")));
            }
            for (key, sub) in spaces {
                let v = values
                    .get(key)
                    .ok_or_else(|| ModelError::SpaceMismatch(format!("{path}: missing field {key:?}")))?;
                write_flat(sub, v, &format!("{path}/{key}"), out)?;
            }
        }
        _ => {
            return Err(ModelError::SpaceMismatch(format!(
                "{path}: value kind does not match the space"
            )))
        }
    }
    Ok(())
}
