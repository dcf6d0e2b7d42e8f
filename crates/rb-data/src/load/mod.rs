//! Loaders that copy a decoded record into a model.
//!
//! Every loader works on a staged copy of its target and only commits it
//! once the whole record has been read, so a failed load leaves the model
//! as it was.

mod eim;
mod helpers;
mod rb;
#[cfg(feature = "scm")]
mod scm;
mod transient;

pub use eim::load_rb_eim_evaluation_data;
pub use helpers::{load_elem_into_mesh, load_parameter_ranges, load_point};
pub use rb::{load_rb_evaluation_data, MAX_BASIS_FUNCTIONS};
#[cfg(feature = "scm")]
pub use scm::load_rb_scm_evaluation_data;
pub use transient::load_transient_rb_evaluation_data;
