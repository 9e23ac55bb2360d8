use thiserror::Error;

/// Shape errors raised by tensor construction and reshaping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    #[error("shape {shape:?} holds {expected} elements, got {actual}")]
    ElementCount {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },
    #[error("expected a rank-{expected} tensor, got shape {shape:?}")]
    Rank { expected: usize, shape: Vec<usize> },
    #[error("row width mismatch: expected {expected} columns, got {actual}")]
    Columns { expected: usize, actual: usize },
}

/// Dense row-major `f32` tensor.
///
/// Batched quantities keep the batch on the leading axis, so a batch of `B`
/// two-dimensional states is a `[B, 2]` tensor and row `i` is the `i`-th
/// state.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    data: Vec<f32>,
    shape: Vec<usize>,
}

impl Tensor {
    /// Creates a tensor, panicking if `data` does not fill `shape`.
    ///
    /// Use [`Tensor::try_from_vec`] when the sizes come from outside the
    /// program.
    #[must_use]
    pub fn from_vec(shape: Vec<usize>, data: Vec<f32>) -> Self {
        assert_eq!(shape.iter().product::<usize>(), data.len());
        Self { data, shape }
    }

    pub fn try_from_vec(shape: Vec<usize>, data: Vec<f32>) -> Result<Self, TensorError> {
        let expected = shape.iter().product::<usize>();
        if expected != data.len() {
            return Err(TensorError::ElementCount {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    #[must_use]
    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        Self { data: vec![0.0; len], shape }
    }

    #[must_use]
    pub fn filled(shape: Vec<usize>, value: f32) -> Self {
        let len = shape.iter().product();
        Self { data: vec![value; len], shape }
    }

    /// Repeats `row` `n` times into an `[n, row.len()]` tensor.
    #[must_use]
    pub fn tile_rows(row: &[f32], n: usize) -> Self {
        let mut data = Vec::with_capacity(row.len() * n);
        for _ in 0..n {
            data.extend_from_slice(row);
        }
        Self { data, shape: vec![n, row.len()] }
    }

    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size of the leading (batch) axis. Scalars count as one row.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.shape.first().copied().unwrap_or(1)
    }

    /// Number of elements in one leading-axis slice.
    #[must_use]
    pub fn row_len(&self) -> usize {
        self.shape.iter().skip(1).product()
    }

    #[must_use]
    pub fn row(&self, i: usize) -> &[f32] {
        let w = self.row_len();
        &self.data[i * w..(i + 1) * w]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        // chunks_exact panics on zero width
        let w = self.row_len().max(1);
        let empty_rows = if self.row_len() == 0 { self.rows() } else { 0 };
        self.data
            .chunks_exact(w)
            .chain(std::iter::repeat(&self.data[..0]).take(empty_rows))
    }

    pub fn reshape(self, shape: Vec<usize>) -> Result<Self, TensorError> {
        Self::try_from_vec(shape, self.data)
    }

    /// Checks that the tensor is `[rows, cols]`.
    pub fn expect_matrix(&self, cols: usize) -> Result<usize, TensorError> {
        if self.shape.len() != 2 {
            return Err(TensorError::Rank { expected: 2, shape: self.shape.clone() });
        }
        if self.shape[1] != cols {
            return Err(TensorError::Columns { expected: cols, actual: self.shape[1] });
        }
        Ok(self.shape[0])
    }

    #[must_use]
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            shape: self.shape.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_vec_rejects_wrong_length() {
        let err = Tensor::try_from_vec(vec![2, 3], vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            TensorError::ElementCount { shape: vec![2, 3], expected: 6, actual: 5 }
        );
    }

    #[test]
    fn tile_rows_repeats() {
        let t = Tensor::tile_rows(&[1.0, 2.0], 3);
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.row(2), &[1.0, 2.0]);
        assert_eq!(t.iter_rows().count(), 3);
    }

    #[test]
    fn zero_width_rows_still_iterate() {
        let t = Tensor::zeros(vec![4, 0]);
        assert_eq!(t.iter_rows().count(), 4);
        assert!(t.iter_rows().all(<[f32]>::is_empty));
    }

    #[test]
    fn expect_matrix_checks_columns() {
        let t = Tensor::zeros(vec![5, 2]);
        assert_eq!(t.expect_matrix(2), Ok(5));
        assert!(matches!(t.expect_matrix(3), Err(TensorError::Columns { .. })));
        let v = Tensor::zeros(vec![5]);
        assert!(matches!(v.expect_matrix(1), Err(TensorError::Rank { .. })));
    }
}
