use crate::parameters::{ParameterConfig, RbParameters};
use crate::theta::ThetaExpansion;

/// Bounds data of the successive constraint method. Always real.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RbScmModel {
    theta: ThetaExpansion,
    pub parameters: ParameterConfig,
    /// One lower bound per Aq term.
    pub b_min: Vec<f64>,
    /// One upper bound per Aq term.
    pub b_max: Vec<f64>,
    /// The parameter samples the stability constants were computed at.
    pub c_j: Vec<RbParameters>,
    pub c_j_stability_vector: Vec<f64>,
    /// `[sample][q_a]`.
    pub scm_ub_vectors: Vec<Vec<f64>>,
}

impl RbScmModel {
    pub fn new(theta: ThetaExpansion) -> Self {
        Self {
            theta,
            ..Self::default()
        }
    }

    pub fn theta(&self) -> &ThetaExpansion {
        &self.theta
    }

    pub fn initialize_parameters(&mut self, parameters: ParameterConfig) {
        self.parameters = parameters;
    }
}
