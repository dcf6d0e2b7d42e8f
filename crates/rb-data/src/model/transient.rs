use crate::linalg::{triangular_size, DenseMatrix, DenseVector};
use crate::scalar::{Number, Scalar};
use crate::theta::TransientThetaExpansion;

use super::{RbEvaluation, ReducedBasisModel};

/// A time-dependent reduced basis model.
#[derive(Debug, Clone, PartialEq)]
pub struct TransientRbModel<T = Number> {
    pub base: ReducedBasisModel<T>,
    n_m_terms: usize,
    pub delta_t: f64,
    pub euler_theta: f64,
    pub n_time_steps: u32,
    pub time_step: u32,
    pub rb_l2_matrix: DenseMatrix<T>,
    pub rb_mq_matrices: Vec<DenseMatrix<T>>,
    /// Row `i` holds the initial condition of the `i + 1` dimensional basis.
    pub rb_initial_condition_all_n: Vec<DenseVector<T>>,
    pub initial_l2_error_all_n: Vec<f64>,
    /// `[q_f][q_m]`, each of length N.
    pub fq_mq_representor_innerprods: Vec<Vec<DenseVector<T>>>,
    /// Packed-triangular over the Mq terms, each N×N.
    pub mq_mq_representor_innerprods: Vec<DenseMatrix<T>>,
    /// `[q_a][q_m]`, each N×N.
    pub aq_mq_representor_innerprods: Vec<Vec<DenseMatrix<T>>>,
}

impl<T: Scalar> TransientRbModel<T> {
    pub fn new(theta: TransientThetaExpansion) -> Self {
        let n_m_terms = theta.n_m_terms();
        Self {
            base: ReducedBasisModel::new(theta.steady),
            n_m_terms,
            delta_t: 0.0,
            euler_theta: 0.0,
            n_time_steps: 0,
            time_step: 0,
            rb_l2_matrix: DenseMatrix::default(),
            rb_mq_matrices: Vec::new(),
            rb_initial_condition_all_n: Vec::new(),
            initial_l2_error_all_n: Vec::new(),
            fq_mq_representor_innerprods: Vec::new(),
            mq_mq_representor_innerprods: Vec::new(),
            aq_mq_representor_innerprods: Vec::new(),
        }
    }

    pub fn n_m_terms(&self) -> usize {
        self.n_m_terms
    }
}

impl<T: Scalar> RbEvaluation for TransientRbModel<T> {
    type Value = T;

    fn rb(&self) -> &ReducedBasisModel<T> {
        &self.base
    }

    fn rb_mut(&mut self) -> &mut ReducedBasisModel<T> {
        &mut self.base
    }

    fn resize_data_structures(&mut self, n: usize, read_error_bound_data: bool) {
        self.base.resize_data_structures(n, read_error_bound_data);

        let q_m = self.n_m_terms;
        self.rb_l2_matrix = DenseMatrix::zeros(n, n);
        self.rb_mq_matrices = vec![DenseMatrix::zeros(n, n); q_m];
        self.rb_initial_condition_all_n = (1..=n).map(DenseVector::zeros).collect();
        self.initial_l2_error_all_n = vec![0.0; n];

        if read_error_bound_data {
            let theta = self.base.theta();
            self.fq_mq_representor_innerprods =
                vec![vec![DenseVector::zeros(n); q_m]; theta.n_f_terms()];
            self.mq_mq_representor_innerprods =
                vec![DenseMatrix::zeros(n, n); triangular_size(q_m)];
            self.aq_mq_representor_innerprods =
                vec![vec![DenseMatrix::zeros(n, n); q_m]; theta.n_a_terms()];
        }
    }
}
