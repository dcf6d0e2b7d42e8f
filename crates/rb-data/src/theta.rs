//! Affine-expansion term counts.
//!
//! These are configured by the application before a load and are never
//! read from a model file; every size check of a loader is derived from
//! them and the basis count.

/// Term counts of a steady affine expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThetaExpansion {
    n_f_terms: usize,
    n_a_terms: usize,
    output_terms: Vec<usize>,
}

impl ThetaExpansion {
    /// `output_terms[o]` is the number of affine terms of output `o`.
    pub fn new(n_f_terms: usize, n_a_terms: usize, output_terms: Vec<usize>) -> Self {
        Self {
            n_f_terms,
            n_a_terms,
            output_terms,
        }
    }

    pub fn n_f_terms(&self) -> usize {
        self.n_f_terms
    }

    pub fn n_a_terms(&self) -> usize {
        self.n_a_terms
    }

    pub fn n_outputs(&self) -> usize {
        self.output_terms.len()
    }

    /// # Panics
    ///
    /// Panics if `output_index >= self.n_outputs()`.
    pub fn n_output_terms(&self, output_index: usize) -> usize {
        self.output_terms[output_index]
    }
}

/// Term counts of a time-dependent affine expansion, which adds mass terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransientThetaExpansion {
    pub steady: ThetaExpansion,
    n_m_terms: usize,
}

impl TransientThetaExpansion {
    pub fn new(steady: ThetaExpansion, n_m_terms: usize) -> Self {
        Self { steady, n_m_terms }
    }

    pub fn n_m_terms(&self) -> usize {
        self.n_m_terms
    }
}
