//! Dense containers for reduced-basis data and the packed-triangular index
//! convention shared by the model file format.

use std::ops::{Index, IndexMut};

/// Offset of `(i, j)`, `j <= i`, in packed lower-triangular storage.
#[inline]
pub const fn triangular_offset(i: usize, j: usize) -> usize {
    i * (i + 1) / 2 + j
}

/// Number of entries in the packed lower triangle of an `n × n` block.
#[inline]
pub const fn triangular_size(n: usize) -> usize {
    n * (n + 1) / 2
}

/// A dense vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseVector<T> {
    values: Vec<T>,
}

impl<T: Copy + Default> DenseVector<T> {
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![T::default(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }
}

impl<T> Index<usize> for DenseVector<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.values[i]
    }
}

impl<T> IndexMut<usize> for DenseVector<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.values[i]
    }
}

impl<T> From<Vec<T>> for DenseVector<T> {
    fn from(values: Vec<T>) -> Self {
        Self { values }
    }
}

/// A dense row-major matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseMatrix<T> {
    rows: usize,
    cols: usize,
    values: Vec<T>,
}

impl<T: Copy + Default> DenseMatrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![T::default(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }
}

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        debug_assert!(i < self.rows && j < self.cols);
        &self.values[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        debug_assert!(i < self.rows && j < self.cols);
        &mut self.values[i * self.cols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn packed_rows_are_contiguous(i in 0usize..4096, j in 0usize..4096) {
            let j = j % (i + 1);
            prop_assert_eq!(triangular_offset(i, 0), triangular_size(i));
            prop_assert!(triangular_offset(i, j) < triangular_size(i + 1));
        }
    }

    #[test]
    fn packed_offsets_for_five_basis_functions() {
        assert_eq!(triangular_offset(0, 0), 0);
        assert_eq!(triangular_offset(1, 0), 1);
        assert_eq!(triangular_offset(1, 1), 2);
        assert_eq!(triangular_offset(4, 4), 14);
        assert_eq!(triangular_size(5), 15);
    }

    #[test]
    fn packed_offsets_enumerate_the_triangle_in_order() {
        let n = 6;
        let mut expected = 0;
        for i in 0..n {
            for j in 0..=i {
                assert_eq!(triangular_offset(i, j), expected);
                expected += 1;
            }
        }
        assert_eq!(expected, triangular_size(n));
    }

    #[test]
    fn matrix_is_row_major() {
        let mut m = DenseMatrix::<f64>::zeros(2, 3);
        m[(1, 2)] = 5.0;
        m[(0, 1)] = 1.0;
        assert_eq!(m.as_slice(), &[0.0, 1.0, 0.0, 0.0, 0.0, 5.0]);
        assert_eq!((m.rows(), m.cols()), (2, 3));
    }

    #[test]
    fn vector_indexing() {
        let mut v = DenseVector::<f64>::zeros(3);
        v[2] = 1.5;
        assert_eq!(v.as_slice(), &[0.0, 0.0, 1.5]);
        assert_eq!(DenseVector::from(vec![1.0]).len(), 1);
        assert!(DenseVector::<f64>::zeros(0).is_empty());
    }
}
