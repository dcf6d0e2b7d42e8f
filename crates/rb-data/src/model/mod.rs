//! In-memory reduced basis models that the loaders populate.

mod eim;
mod rb;
#[cfg(feature = "scm")]
mod scm;
mod transient;

pub use eim::RbEimModel;
pub use rb::ReducedBasisModel;
#[cfg(feature = "scm")]
pub use scm::RbScmModel;
pub use transient::TransientRbModel;

use crate::scalar::Scalar;

/// A model that embeds a [`ReducedBasisModel`].
///
/// The base loader works on any implementor, so wrappers can size their own
/// buffers in [`resize_data_structures`](RbEvaluation::resize_data_structures)
/// at the moment the basis count becomes known.
pub trait RbEvaluation: Clone {
    type Value: Scalar;

    fn rb(&self) -> &ReducedBasisModel<Self::Value>;

    fn rb_mut(&mut self) -> &mut ReducedBasisModel<Self::Value>;

    /// Allocates every buffer that depends on the basis count `n`, zeroed.
    /// Error-bound tensors are only touched when `read_error_bound_data` is
    /// set.
    fn resize_data_structures(&mut self, n: usize, read_error_bound_data: bool) {
        self.rb_mut()
            .resize_data_structures(n, read_error_bound_data);
    }
}
