//! Typed views over the records of a model file.
//!
//! A model file's root is a CBOR tag carrying a [`SchemaId`] around a map.
//! The readers here give named, typed access to that map and its nested
//! records and lists; they borrow the decoded [`Message`] and never copy
//! numeric data.

use std::fmt;

use rb_pack::{Message, PackValue};

use crate::scalar::{Representation, Scalar};
use crate::LoadError;

/// Root record variants. The numeric value is the CBOR tag of the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum SchemaId {
    RbEvaluationReal = 0x5242_0001,
    RbEvaluationComplex = 0x5242_0002,
    TransientRbEvaluationReal = 0x5242_0003,
    TransientRbEvaluationComplex = 0x5242_0004,
    RbEimEvaluationReal = 0x5242_0005,
    RbEimEvaluationComplex = 0x5242_0006,
    RbScmEvaluation = 0x5242_0007,
}

impl SchemaId {
    const ALL: [SchemaId; 7] = [
        SchemaId::RbEvaluationReal,
        SchemaId::RbEvaluationComplex,
        SchemaId::TransientRbEvaluationReal,
        SchemaId::TransientRbEvaluationComplex,
        SchemaId::RbEimEvaluationReal,
        SchemaId::RbEimEvaluationComplex,
        SchemaId::RbScmEvaluation,
    ];

    pub const fn tag(self) -> u64 {
        self as u64
    }

    pub fn from_tag(tag: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.tag() == tag)
    }

    pub const fn rb_evaluation(repr: Representation) -> Self {
        match repr {
            Representation::Real => SchemaId::RbEvaluationReal,
            Representation::Complex => SchemaId::RbEvaluationComplex,
        }
    }

    pub const fn transient_rb_evaluation(repr: Representation) -> Self {
        match repr {
            Representation::Real => SchemaId::TransientRbEvaluationReal,
            Representation::Complex => SchemaId::TransientRbEvaluationComplex,
        }
    }

    pub const fn rb_eim_evaluation(repr: Representation) -> Self {
        match repr {
            Representation::Real => SchemaId::RbEimEvaluationReal,
            Representation::Complex => SchemaId::RbEimEvaluationComplex,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SchemaId::RbEvaluationReal => "RbEvaluationReal",
            SchemaId::RbEvaluationComplex => "RbEvaluationComplex",
            SchemaId::TransientRbEvaluationReal => "TransientRbEvaluationReal",
            SchemaId::TransientRbEvaluationComplex => "TransientRbEvaluationComplex",
            SchemaId::RbEimEvaluationReal => "RbEimEvaluationReal",
            SchemaId::RbEimEvaluationComplex => "RbEimEvaluationComplex",
            SchemaId::RbScmEvaluation => "RbScmEvaluation",
        }
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the root record of `message` if it is tagged as `expected`.
pub fn select_root(message: &Message, expected: SchemaId) -> Result<&PackValue, LoadError> {
    match message.root_tag() {
        Some(tag) if tag == expected.tag() => Ok(message.root_value()),
        found => Err(LoadError::Schema { expected, found }),
    }
}

/// A record (CBOR map) with a schema name used in error messages.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    name: &'static str,
    value: &'a PackValue,
}

impl<'a> RecordView<'a> {
    pub fn new(name: &'static str, value: &'a PackValue) -> Result<Self, LoadError> {
        match value {
            PackValue::Object(_) => Ok(Self { name, value }),
            other => Err(LoadError::FieldType {
                field: name.to_owned(),
                expected: "record",
                found: other.kind(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn field(&self, field: &'static str) -> Result<&'a PackValue, LoadError> {
        self.value.get(field).ok_or(LoadError::MissingField {
            record: self.name,
            field,
        })
    }

    fn type_error(&self, field: &str, expected: &'static str, found: &PackValue) -> LoadError {
        LoadError::FieldType {
            field: format!("{}.{}", self.name, field),
            expected,
            found: found.kind(),
        }
    }

    pub fn list(&self, field: &'static str) -> Result<ListView<'a>, LoadError> {
        let value = self.field(field)?;
        let items = value
            .as_array()
            .ok_or_else(|| self.type_error(field, "list", value))?;
        Ok(ListView {
            label: format!("{}.{}", self.name, field),
            items,
        })
    }

    pub fn record(
        &self,
        field: &'static str,
        name: &'static str,
    ) -> Result<RecordView<'a>, LoadError> {
        let value = self.field(field)?;
        if value.as_object().is_none() {
            return Err(self.type_error(field, "record", value));
        }
        Ok(RecordView { name, value })
    }

    pub fn real(&self, field: &'static str) -> Result<f64, LoadError> {
        let value = self.field(field)?;
        value
            .as_f64()
            .ok_or_else(|| self.type_error(field, "real number", value))
    }

    pub fn uint(&self, field: &'static str) -> Result<u64, LoadError> {
        let value = self.field(field)?;
        value
            .as_u64()
            .ok_or_else(|| self.type_error(field, "unsigned integer", value))
    }

    pub fn text(&self, field: &'static str) -> Result<&'a str, LoadError> {
        let value = self.field(field)?;
        value
            .as_str()
            .ok_or_else(|| self.type_error(field, "text", value))
    }
}

/// A list field; `label` names it in error messages.
#[derive(Debug, Clone)]
pub struct ListView<'a> {
    label: String,
    items: &'a [PackValue],
}

impl<'a> ListView<'a> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fails with a size error naming `section` unless the list has exactly
    /// `expected` entries.
    pub fn expect_len(
        &self,
        expected: usize,
        section: impl Into<String>,
    ) -> Result<(), LoadError> {
        if self.items.len() != expected {
            return Err(LoadError::size(section, expected, self.items.len()));
        }
        Ok(())
    }

    fn item(&self, index: usize) -> Result<&'a PackValue, LoadError> {
        self.items.get(index).ok_or_else(|| {
            LoadError::size(self.label.clone(), index + 1, self.items.len())
        })
    }

    fn type_error(&self, index: usize, expected: &'static str, found: &PackValue) -> LoadError {
        LoadError::FieldType {
            field: format!("{}[{}]", self.label, index),
            expected,
            found: found.kind(),
        }
    }

    /// One numeric cell in the representation `T`.
    pub fn scalar<T: Scalar>(&self, index: usize) -> Result<T, LoadError> {
        let cell = self.item(index)?;
        T::from_cell(cell).ok_or_else(|| self.type_error(index, T::CELL_KIND, cell))
    }

    pub fn real(&self, index: usize) -> Result<f64, LoadError> {
        self.scalar::<f64>(index)
    }

    pub fn uint(&self, index: usize) -> Result<u64, LoadError> {
        let value = self.item(index)?;
        value
            .as_u64()
            .ok_or_else(|| self.type_error(index, "unsigned integer", value))
    }

    pub fn text(&self, index: usize) -> Result<&'a str, LoadError> {
        let value = self.item(index)?;
        value
            .as_str()
            .ok_or_else(|| self.type_error(index, "text", value))
    }

    /// A nested list.
    pub fn list(&self, index: usize) -> Result<ListView<'a>, LoadError> {
        let value = self.item(index)?;
        let items = value
            .as_array()
            .ok_or_else(|| self.type_error(index, "list", value))?;
        Ok(ListView {
            label: format!("{}[{}]", self.label, index),
            items,
        })
    }

    /// A nested record.
    pub fn record(&self, index: usize, name: &'static str) -> Result<RecordView<'a>, LoadError> {
        let value = self.item(index)?;
        if value.as_object().is_none() {
            return Err(self.type_error(index, "record", value));
        }
        Ok(RecordView { name, value })
    }
}

macro_rules! list_fields {
    ($($(#[$doc:meta])* $method:ident => $field:literal;)*) => {
        $(
            $(#[$doc])*
            pub fn $method(&self) -> Result<ListView<'a>, LoadError> {
                self.0.list($field)
            }
        )*
    };
}

/// `RbEvaluation` record: the data shared by every model variant.
#[derive(Debug, Clone, Copy)]
pub struct RbEvaluationReader<'a>(RecordView<'a>);

impl<'a> RbEvaluationReader<'a> {
    pub fn new(value: &'a PackValue) -> Result<Self, LoadError> {
        RecordView::new("RbEvaluation", value).map(Self)
    }

    pub fn n_bfs(&self) -> Result<u64, LoadError> {
        self.0.uint("nBfs")
    }

    pub fn parameter_ranges(&self) -> Result<ParameterRangesReader<'a>, LoadError> {
        self.0
            .record("parameterRanges", "ParameterRanges")
            .map(ParameterRangesReader)
    }

    pub fn discrete_parameters(&self) -> Result<DiscreteParameterListReader<'a>, LoadError> {
        self.0
            .record("discreteParameters", "DiscreteParameterList")
            .map(DiscreteParameterListReader)
    }

    list_fields! {
        fq_innerprods => "fqInnerprods";
        fq_aq_innerprods => "fqAqInnerprods";
        aq_aq_innerprods => "aqAqInnerprods";
        /// One packed-triangular list per output.
        output_dual_innerprods => "outputDualInnerprods";
        /// `[output][term][basis function]`.
        output_vectors => "outputVectors";
        rb_fq_vectors => "rbFqVectors";
        rb_aq_matrices => "rbAqMatrices";
        rb_inner_product_matrix => "rbInnerProductMatrix";
    }
}

/// `TransientRbEvaluation` record.
#[derive(Debug, Clone, Copy)]
pub struct TransientRbEvaluationReader<'a>(RecordView<'a>);

impl<'a> TransientRbEvaluationReader<'a> {
    pub fn new(value: &'a PackValue) -> Result<Self, LoadError> {
        RecordView::new("TransientRbEvaluation", value).map(Self)
    }

    /// The nested steady record.
    pub fn rb_evaluation(&self) -> Result<RbEvaluationReader<'a>, LoadError> {
        self.0
            .record("rbEvaluation", "RbEvaluation")
            .map(RbEvaluationReader)
    }

    pub fn delta_t(&self) -> Result<f64, LoadError> {
        self.0.real("deltaT")
    }

    pub fn euler_theta(&self) -> Result<f64, LoadError> {
        self.0.real("eulerTheta")
    }

    pub fn n_time_steps(&self) -> Result<u64, LoadError> {
        self.0.uint("nTimeSteps")
    }

    pub fn time_step(&self) -> Result<u64, LoadError> {
        self.0.uint("timeStep")
    }

    list_fields! {
        rb_l2_matrix => "rbL2Matrix";
        rb_mq_matrices => "rbMqMatrices";
        initial_l2_errors => "initialL2Errors";
        /// Ragged: row `i` holds `i + 1` cells.
        initial_conditions => "initialConditions";
        fq_mq_innerprods => "fqMqInnerprods";
        mq_mq_innerprods => "mqMqInnerprods";
        aq_mq_innerprods => "aqMqInnerprods";
    }
}

/// `RbEimEvaluation` record.
#[derive(Debug, Clone, Copy)]
pub struct RbEimEvaluationReader<'a>(RecordView<'a>);

impl<'a> RbEimEvaluationReader<'a> {
    pub fn new(value: &'a PackValue) -> Result<Self, LoadError> {
        RecordView::new("RbEimEvaluation", value).map(Self)
    }

    pub fn rb_evaluation(&self) -> Result<RbEvaluationReader<'a>, LoadError> {
        self.0
            .record("rbEvaluation", "RbEvaluation")
            .map(RbEvaluationReader)
    }

    list_fields! {
        /// Packed lower-triangular.
        interpolation_matrix => "interpolationMatrix";
        /// `Point3D` records.
        interpolation_points => "interpolationPoints";
        interpolation_points_var => "interpolationPointsVar";
        /// `MeshElem` records.
        interpolation_points_elems => "interpolationPointsElems";
    }
}

/// `RbScmEvaluation` record. Always real.
#[derive(Debug, Clone, Copy)]
pub struct RbScmEvaluationReader<'a>(RecordView<'a>);

impl<'a> RbScmEvaluationReader<'a> {
    pub fn new(value: &'a PackValue) -> Result<Self, LoadError> {
        RecordView::new("RbScmEvaluation", value).map(Self)
    }

    pub fn parameter_ranges(&self) -> Result<ParameterRangesReader<'a>, LoadError> {
        self.0
            .record("parameterRanges", "ParameterRanges")
            .map(ParameterRangesReader)
    }

    pub fn discrete_parameters(&self) -> Result<DiscreteParameterListReader<'a>, LoadError> {
        self.0
            .record("discreteParameters", "DiscreteParameterList")
            .map(DiscreteParameterListReader)
    }

    list_fields! {
        b_min => "bMin";
        b_max => "bMax";
        c_j_stability_vector => "cJStabilityVector";
        /// One list of `{name, value}` records per sample.
        c_j => "cJ";
        scm_ub_vectors => "scmUbVectors";
    }
}

/// `ParameterRanges` record.
#[derive(Debug, Clone, Copy)]
pub struct ParameterRangesReader<'a>(RecordView<'a>);

impl<'a> ParameterRangesReader<'a> {
    list_fields! {
        names => "names";
        min_values => "minValues";
        max_values => "maxValues";
    }
}

/// `DiscreteParameterList` record.
#[derive(Debug, Clone, Copy)]
pub struct DiscreteParameterListReader<'a>(RecordView<'a>);

impl<'a> DiscreteParameterListReader<'a> {
    list_fields! {
        names => "names";
        /// One list of reals per name.
        values => "values";
    }
}

/// `Point3D` record.
#[derive(Debug, Clone, Copy)]
pub struct Point3dReader<'a>(RecordView<'a>);

impl<'a> Point3dReader<'a> {
    pub fn new(view: RecordView<'a>) -> Self {
        Self(view)
    }

    pub fn x(&self) -> Result<f64, LoadError> {
        self.0.real("x")
    }

    pub fn y(&self) -> Result<f64, LoadError> {
        self.0.real("y")
    }

    pub fn z(&self) -> Result<f64, LoadError> {
        self.0.real("z")
    }
}

/// `MeshElem` record.
#[derive(Debug, Clone, Copy)]
pub struct MeshElemReader<'a>(RecordView<'a>);

impl<'a> MeshElemReader<'a> {
    pub fn new(view: RecordView<'a>) -> Self {
        Self(view)
    }

    pub fn elem_type(&self) -> Result<&'a str, LoadError> {
        self.0.text("type")
    }

    pub fn subdomain_id(&self) -> Result<u64, LoadError> {
        self.0.uint("subdomainId")
    }

    list_fields! {
        /// `Point3D` records, one per node.
        points => "points";
    }
}
