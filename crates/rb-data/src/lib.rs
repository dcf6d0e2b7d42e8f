//! Loads persisted reduced basis models.
//!
//! A model file holds one CBOR message whose root tag names the record it
//! carries: a steady reduced basis model, a time-dependent model, an
//! empirical interpolation model or successive constraint method bounds.
//! The deserializers in this crate open such a file and copy its data into
//! an existing model whose affine expansion has already been configured:
//!
//! ```no_run
//! use rb_data::{RbEvaluationDeserializer, ReducedBasisModel, ThetaExpansion};
//!
//! let mut model = ReducedBasisModel::<f64>::new(ThetaExpansion::new(2, 3, vec![2]));
//! RbEvaluationDeserializer::new(&mut model).read_from_file("rb_eval.bin", true)?;
//! assert!(model.n_basis_functions() > 0);
//! # Ok::<(), rb_data::LoadError>(())
//! ```
//!
//! # Features
//!
//! - `complex`: [`Number`] becomes `Complex64` and the default deserializers
//!   read the complex record variants.
//! - `scm` (default): successive constraint method support.

mod deserializer;
mod error;
pub mod linalg;
pub mod load;
pub mod mesh;
pub mod model;
mod parameters;
mod scalar;
pub mod schema;
mod theta;

#[cfg(feature = "scm")]
pub use deserializer::RbScmEvaluationDeserializer;
pub use deserializer::{
    RbEimEvaluationDeserializer, RbEvaluationDeserializer, TransientRbEvaluationDeserializer,
};
pub use error::LoadError;
#[cfg(feature = "scm")]
pub use model::RbScmModel;
pub use model::{RbEimModel, RbEvaluation, ReducedBasisModel, TransientRbModel};
pub use parameters::{ParameterConfig, RbParameters};
pub use rb_pack::ReaderOptions;
pub use scalar::{Number, Representation, Scalar};
pub use theta::{ThetaExpansion, TransientThetaExpansion};
