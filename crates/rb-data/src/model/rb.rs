use crate::linalg::{triangular_size, DenseMatrix, DenseVector};
use crate::parameters::ParameterConfig;
use crate::scalar::{Number, Scalar};
use crate::theta::ThetaExpansion;

use super::RbEvaluation;

/// Online data of a steady reduced basis model.
///
/// The theta expansion is fixed at construction; the loaders size every
/// buffer from it and the basis count.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedBasisModel<T = Number> {
    theta: ThetaExpansion,
    n_basis_functions: u32,
    pub parameters: ParameterConfig,
    /// When set, the loaders also read the reduced inner product matrix.
    pub compute_rb_inner_product: bool,
    pub rb_fq_vectors: Vec<DenseVector<T>>,
    pub rb_aq_matrices: Vec<DenseMatrix<T>>,
    pub rb_inner_product_matrix: DenseMatrix<T>,
    /// `[output][term]`, each of length N.
    pub rb_output_vectors: Vec<Vec<DenseVector<T>>>,
    /// Packed-triangular over the Fq terms.
    pub fq_representor_innerprods: Vec<T>,
    /// `[q_f][q_a]`, each of length N.
    pub fq_aq_representor_innerprods: Vec<Vec<DenseVector<T>>>,
    /// Packed-triangular over the Aq terms, each N×N.
    pub aq_aq_representor_innerprods: Vec<DenseMatrix<T>>,
    /// `[output]`, packed-triangular over that output's terms.
    pub output_dual_innerprods: Vec<Vec<T>>,
}

impl<T: Scalar> ReducedBasisModel<T> {
    pub fn new(theta: ThetaExpansion) -> Self {
        Self {
            theta,
            n_basis_functions: 0,
            parameters: ParameterConfig::default(),
            compute_rb_inner_product: false,
            rb_fq_vectors: Vec::new(),
            rb_aq_matrices: Vec::new(),
            rb_inner_product_matrix: DenseMatrix::default(),
            rb_output_vectors: Vec::new(),
            fq_representor_innerprods: Vec::new(),
            fq_aq_representor_innerprods: Vec::new(),
            aq_aq_representor_innerprods: Vec::new(),
            output_dual_innerprods: Vec::new(),
        }
    }

    pub fn theta(&self) -> &ThetaExpansion {
        &self.theta
    }

    pub fn n_basis_functions(&self) -> u32 {
        self.n_basis_functions
    }

    pub fn set_n_basis_functions(&mut self, n: u32) {
        self.n_basis_functions = n;
    }

    pub fn initialize_parameters(&mut self, parameters: ParameterConfig) {
        self.parameters = parameters;
    }

    pub fn resize_data_structures(&mut self, n: usize, read_error_bound_data: bool) {
        let q_f = self.theta.n_f_terms();
        let q_a = self.theta.n_a_terms();

        self.rb_fq_vectors = vec![DenseVector::zeros(n); q_f];
        self.rb_aq_matrices = vec![DenseMatrix::zeros(n, n); q_a];
        self.rb_inner_product_matrix = if self.compute_rb_inner_product {
            DenseMatrix::zeros(n, n)
        } else {
            DenseMatrix::default()
        };
        self.rb_output_vectors = (0..self.theta.n_outputs())
            .map(|o| vec![DenseVector::zeros(n); self.theta.n_output_terms(o)])
            .collect();

        if read_error_bound_data {
            self.fq_representor_innerprods = vec![T::default(); triangular_size(q_f)];
            self.fq_aq_representor_innerprods = vec![vec![DenseVector::zeros(n); q_a]; q_f];
            self.aq_aq_representor_innerprods =
                vec![DenseMatrix::zeros(n, n); triangular_size(q_a)];
            self.output_dual_innerprods = (0..self.theta.n_outputs())
                .map(|o| vec![T::default(); triangular_size(self.theta.n_output_terms(o))])
                .collect();
        }
    }
}

impl<T: Scalar> RbEvaluation for ReducedBasisModel<T> {
    type Value = T;

    fn rb(&self) -> &ReducedBasisModel<T> {
        self
    }

    fn rb_mut(&mut self) -> &mut ReducedBasisModel<T> {
        self
    }
}
