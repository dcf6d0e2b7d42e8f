#![allow(dead_code)]

//! Builders for model files used by the integration tests.

use std::io::Write;

use num_complex::Complex64;
use rb_data::{ThetaExpansion, TransientThetaExpansion};
use rb_pack::{CborEncoder, PackValue};
use tempfile::NamedTempFile;

/// A scalar type the fixtures can produce cells for.
pub trait FixtureScalar: rb_data::Scalar {
    fn sample(seed: u64, k: usize) -> Self;
    fn cell(self) -> PackValue;
}

/// Deterministic, non-integral value for cell `k` of section `seed`.
pub fn value(seed: u64, k: usize) -> f64 {
    seed as f64 * 1000.0 + k as f64 + 0.25
}

impl FixtureScalar for f64 {
    fn sample(seed: u64, k: usize) -> Self {
        value(seed, k)
    }

    fn cell(self) -> PackValue {
        PackValue::Float(self)
    }
}

impl FixtureScalar for Complex64 {
    fn sample(seed: u64, k: usize) -> Self {
        Complex64::new(value(seed, k), -value(seed, k) / 2.0)
    }

    fn cell(self) -> PackValue {
        PackValue::object([
            ("real", PackValue::Float(self.re)),
            ("imag", PackValue::Float(self.im)),
        ])
    }
}

pub fn cells<T: FixtureScalar>(seed: u64, len: usize) -> PackValue {
    PackValue::Array((0..len).map(|k| T::sample(seed, k).cell()).collect())
}

pub fn tri(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Replaces (or adds) field `key` of a record.
pub fn set(record: &mut PackValue, key: &str, value: PackValue) {
    if let PackValue::Object(fields) = record {
        match fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => fields.push((key.to_owned(), value)),
        }
    }
}

pub fn field<'a>(record: &'a mut PackValue, key: &str) -> &'a mut PackValue {
    match record {
        PackValue::Object(fields) => fields
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .expect("fixture field"),
        _ => panic!("fixture record is not a map"),
    }
}

/// Encodes `record` under `tag` into a temporary file.
pub fn write_model(tag: u64, record: PackValue) -> NamedTempFile {
    let bin = CborEncoder::new().encode(&PackValue::tagged(tag, record));
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(&bin).expect("write model");
    file.flush().expect("flush model");
    file
}

pub fn names(names: &[&str]) -> PackValue {
    PackValue::Array(names.iter().map(|&n| PackValue::from(n)).collect())
}

pub fn parameter_ranges() -> PackValue {
    PackValue::object([
        ("names", names(&["mu", "nu"])),
        ("minValues", PackValue::from(vec![0.0, -1.0])),
        ("maxValues", PackValue::from(vec![1.0, 2.0])),
    ])
}

pub fn discrete_parameters() -> PackValue {
    PackValue::object([
        ("names", names(&["k"])),
        ("values", PackValue::from(vec![vec![3.0, 1.0, 2.0]])),
    ])
}

/// Section seeds. Nested sections add their indices to these.
pub mod seed {
    pub const FQ: u64 = 1;
    pub const FQ_AQ: u64 = 2;
    pub const AQ_AQ: u64 = 3;
    pub const INNER_PRODUCT: u64 = 4;
    pub const L2: u64 = 5;
    pub const L2_ERRORS: u64 = 6;
    pub const FQ_MQ: u64 = 7;
    pub const MQ_MQ: u64 = 8;
    pub const AQ_MQ: u64 = 9;
    pub const INTERPOLATION: u64 = 10;
    pub const OUTPUT_DUAL: u64 = 100;
    pub const OUTPUT: u64 = 200;
    pub const FQ_VECTOR: u64 = 300;
    pub const AQ_MATRIX: u64 = 400;
    pub const MQ_MATRIX: u64 = 500;
    pub const INITIAL_CONDITION: u64 = 600;
}

/// Dimensions of a steady model file.
#[derive(Debug, Clone)]
pub struct RbFixture {
    pub q_f: usize,
    pub q_a: usize,
    pub output_terms: Vec<usize>,
    pub n: usize,
}

impl RbFixture {
    pub fn theta(&self) -> ThetaExpansion {
        ThetaExpansion::new(self.q_f, self.q_a, self.output_terms.clone())
    }

    pub fn record<T: FixtureScalar>(&self) -> PackValue {
        let n = self.n;
        let outputs = &self.output_terms;
        PackValue::object([
            ("nBfs", PackValue::UInteger(n as u64)),
            ("parameterRanges", parameter_ranges()),
            ("discreteParameters", discrete_parameters()),
            ("fqInnerprods", cells::<T>(seed::FQ, tri(self.q_f))),
            ("fqAqInnerprods", cells::<T>(seed::FQ_AQ, self.q_f * self.q_a * n)),
            ("aqAqInnerprods", cells::<T>(seed::AQ_AQ, tri(self.q_a) * n * n)),
            (
                "outputDualInnerprods",
                PackValue::Array(
                    (0..outputs.len())
                        .map(|o| cells::<T>(seed::OUTPUT_DUAL + o as u64, tri(outputs[o])))
                        .collect(),
                ),
            ),
            (
                "outputVectors",
                PackValue::Array(
                    (0..outputs.len())
                        .map(|o| {
                            PackValue::Array(
                                (0..outputs[o])
                                    .map(|q| cells::<T>(output_seed(o, q), n))
                                    .collect(),
                            )
                        })
                        .collect(),
                ),
            ),
            (
                "rbFqVectors",
                PackValue::Array(
                    (0..self.q_f)
                        .map(|q| cells::<T>(seed::FQ_VECTOR + q as u64, n))
                        .collect(),
                ),
            ),
            (
                "rbAqMatrices",
                PackValue::Array(
                    (0..self.q_a)
                        .map(|q| cells::<T>(seed::AQ_MATRIX + q as u64, n * n))
                        .collect(),
                ),
            ),
            ("rbInnerProductMatrix", cells::<T>(seed::INNER_PRODUCT, n * n)),
        ])
    }
}

pub fn output_seed(o: usize, q: usize) -> u64 {
    seed::OUTPUT + 10 * o as u64 + q as u64
}

/// Dimensions of a time-dependent model file.
#[derive(Debug, Clone)]
pub struct TransientFixture {
    pub steady: RbFixture,
    pub q_m: usize,
}

impl TransientFixture {
    pub fn theta(&self) -> TransientThetaExpansion {
        TransientThetaExpansion::new(self.steady.theta(), self.q_m)
    }

    pub fn record<T: FixtureScalar>(&self) -> PackValue {
        let n = self.steady.n;
        let (q_f, q_a, q_m) = (self.steady.q_f, self.steady.q_a, self.q_m);
        PackValue::object([
            ("rbEvaluation", self.steady.record::<T>()),
            ("deltaT", PackValue::Float(0.01)),
            ("eulerTheta", PackValue::Float(0.5)),
            ("nTimeSteps", PackValue::UInteger(100)),
            ("timeStep", PackValue::UInteger(7)),
            ("rbL2Matrix", cells::<T>(seed::L2, n * n)),
            (
                "rbMqMatrices",
                PackValue::Array(
                    (0..q_m)
                        .map(|q| cells::<T>(seed::MQ_MATRIX + q as u64, n * n))
                        .collect(),
                ),
            ),
            ("initialL2Errors", cells::<f64>(seed::L2_ERRORS, n)),
            (
                "initialConditions",
                PackValue::Array(
                    (0..n)
                        .map(|i| cells::<T>(seed::INITIAL_CONDITION + i as u64, i + 1))
                        .collect(),
                ),
            ),
            ("fqMqInnerprods", cells::<T>(seed::FQ_MQ, q_f * q_m * n)),
            ("mqMqInnerprods", cells::<T>(seed::MQ_MQ, tri(q_m) * n * n)),
            ("aqMqInnerprods", cells::<T>(seed::AQ_MQ, q_a * q_m * n * n)),
        ])
    }
}

pub fn point(x: f64, y: f64, z: f64) -> PackValue {
    PackValue::object([
        ("x", PackValue::Float(x)),
        ("y", PackValue::Float(y)),
        ("z", PackValue::Float(z)),
    ])
}

pub fn mesh_elem(elem_type: &str, subdomain_id: u64, points: Vec<PackValue>) -> PackValue {
    PackValue::object([
        ("type", PackValue::from(elem_type)),
        ("subdomainId", PackValue::UInteger(subdomain_id)),
        ("points", PackValue::Array(points)),
    ])
}

/// An EIM model file with one `EDGE2` element per interpolation point;
/// element `i` lies in subdomain `10 + i`.
pub fn eim_record<T: FixtureScalar>(steady: &RbFixture) -> PackValue {
    let n = steady.n;
    PackValue::object([
        ("rbEvaluation", steady.record::<T>()),
        ("interpolationMatrix", cells::<T>(seed::INTERPOLATION, tri(n))),
        (
            "interpolationPoints",
            PackValue::Array((0..n).map(|i| point(i as f64 + 0.5, 0.0, 0.0)).collect()),
        ),
        (
            "interpolationPointsVar",
            PackValue::Array((0..n).map(|i| PackValue::UInteger(i as u64 % 2)).collect()),
        ),
        (
            "interpolationPointsElems",
            PackValue::Array(
                (0..n)
                    .map(|i| {
                        let x = i as f64;
                        mesh_elem(
                            "EDGE2",
                            10 + i as u64,
                            vec![point(x, 0.0, 0.0), point(x + 1.0, 0.0, 0.0)],
                        )
                    })
                    .collect(),
            ),
        ),
    ])
}
