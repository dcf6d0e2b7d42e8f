//! Numeric representation of model data.
//!
//! Every loader converts cells through [`Scalar::from_cell`]; the
//! representation is a property of the model type, so one load can never
//! mix real and complex cells. [`Number`] is the representation picked for
//! the build by the `complex` feature.

use std::fmt::Debug;

use num_complex::Complex64;
use rb_pack::PackValue;

/// The two cell encodings a model file can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// A cell is a plain number.
    Real,
    /// A cell is a `{real, imag}` record.
    Complex,
}

/// A numeric type model data can be stored in.
pub trait Scalar: Copy + Default + PartialEq + Debug + Send + Sync + 'static {
    const REPRESENTATION: Representation;

    /// Human readable cell type, used in error messages.
    const CELL_KIND: &'static str;

    /// Converts one serialized cell, or returns `None` when the cell does
    /// not have this representation.
    fn from_cell(cell: &PackValue) -> Option<Self>;
}

impl Scalar for f64 {
    const REPRESENTATION: Representation = Representation::Real;
    const CELL_KIND: &'static str = "real number";

    fn from_cell(cell: &PackValue) -> Option<Self> {
        cell.as_f64()
    }
}

impl Scalar for Complex64 {
    const REPRESENTATION: Representation = Representation::Complex;
    const CELL_KIND: &'static str = "complex number record";

    fn from_cell(cell: &PackValue) -> Option<Self> {
        let re = cell.get("real")?.as_f64()?;
        let im = cell.get("imag")?.as_f64()?;
        Some(Complex64::new(re, im))
    }
}

/// Numeric type of model data in this build.
#[cfg(not(feature = "complex"))]
pub type Number = f64;

/// Numeric type of model data in this build.
#[cfg(feature = "complex")]
pub type Number = Complex64;
