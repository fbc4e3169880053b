use crate::error::ModelError;

/// Dense row-major `f32` tensor.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    pub data: Vec<f32>,
    pub shape: Vec<usize>,
}

impl Tensor {
    /// Builds a tensor, checking that `data` fills `shape` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ShapeMismatch`] when the element counts differ.
    pub fn from_vec(shape: Vec<usize>, data: Vec<f32>) -> Result<Self, ModelError> {
        let expected = shape.iter().product::<usize>();
        if expected != data.len() {
            return Err(ModelError::ShapeMismatch(format!(
                "shape {shape:?} needs {expected} elements, got {}",
                data.len()
            )));
        }
        Ok(Self { data, shape })
    }

    /// A `[1, n]` batch holding a single row.
    #[must_use]
    pub fn row_vector(data: Vec<f32>) -> Self {
        Self {
            shape: vec![1, data.len()],
            data,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Row `i` of a rank-2 tensor.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        match self.shape.as_slice() {
            [rows, cols] if i < *rows => Some(&self.data[i * cols..(i + 1) * cols]),
            _ => None,
        }
    }
}
