//! Loading steady reduced basis models from model files.

mod common;

use common::{cells, field, output_seed, seed, set, tri, write_model, FixtureScalar, RbFixture};
use num_complex::Complex64;
use rb_data::linalg::triangular_offset;
use rb_data::load::MAX_BASIS_FUNCTIONS;
use rb_data::schema::SchemaId;
use rb_data::{LoadError, RbEvaluationDeserializer, ReaderOptions, ReducedBasisModel, Scalar};
use rb_pack::{CborError, MessageError, PackValue};

fn fixture() -> RbFixture {
    RbFixture {
        q_f: 2,
        q_a: 3,
        output_terms: vec![2],
        n: 4,
    }
}

fn assert_matches_fixture<T: FixtureScalar>(
    model: &ReducedBasisModel<T>,
    fx: &RbFixture,
    error_bounds: bool,
) {
    let n = fx.n;
    assert_eq!(model.n_basis_functions(), n as u32);

    for q in 0..fx.q_f {
        for i in 0..n {
            assert_eq!(model.rb_fq_vectors[q][i], T::sample(seed::FQ_VECTOR + q as u64, i));
        }
    }
    for q in 0..fx.q_a {
        for i in 0..n {
            for j in 0..n {
                assert_eq!(
                    model.rb_aq_matrices[q][(i, j)],
                    T::sample(seed::AQ_MATRIX + q as u64, i * n + j)
                );
            }
        }
    }
    for (o, &terms) in fx.output_terms.iter().enumerate() {
        for q in 0..terms {
            for i in 0..n {
                assert_eq!(model.rb_output_vectors[o][q][i], T::sample(output_seed(o, q), i));
            }
        }
    }

    if !error_bounds {
        return;
    }
    let fq: Vec<T> = (0..tri(fx.q_f)).map(|k| T::sample(seed::FQ, k)).collect();
    assert_eq!(model.fq_representor_innerprods, fq);
    for q_f in 0..fx.q_f {
        for q_a in 0..fx.q_a {
            for i in 0..n {
                assert_eq!(
                    model.fq_aq_representor_innerprods[q_f][q_a][i],
                    T::sample(seed::FQ_AQ, q_f * fx.q_a * n + q_a * n + i)
                );
            }
        }
    }
    for t in 0..tri(fx.q_a) {
        for j in 0..n {
            for l in 0..n {
                assert_eq!(
                    model.aq_aq_representor_innerprods[t][(j, l)],
                    T::sample(seed::AQ_AQ, t * n * n + j * n + l)
                );
            }
        }
    }
    for (o, &terms) in fx.output_terms.iter().enumerate() {
        let dual: Vec<T> = (0..tri(terms))
            .map(|k| T::sample(seed::OUTPUT_DUAL + o as u64, k))
            .collect();
        assert_eq!(model.output_dual_innerprods[o], dual);
    }
}

#[test]
fn full_model_roundtrip() {
    let fx = fixture();
    let file = write_model(SchemaId::RbEvaluationReal.tag(), fx.record::<f64>());
    let mut model = ReducedBasisModel::<f64>::new(fx.theta());
    RbEvaluationDeserializer::new(&mut model)
        .read_from_file(file.path(), true)
        .unwrap();

    assert_matches_fixture(&model, &fx, true);
    assert_eq!(model.parameters.n_parameters(), 2);
    assert_eq!(model.parameters.min().value("nu"), Some(-1.0));
    assert_eq!(model.parameters.max().value("nu"), Some(2.0));
    assert_eq!(model.parameters.discrete_values()["k"], vec![3.0, 1.0, 2.0]);
    assert!(model.rb_inner_product_matrix.as_slice().is_empty());
}

#[test]
fn packed_dual_innerprods_follow_triangular_offsets() {
    let fx = fixture();
    let file = write_model(SchemaId::RbEvaluationReal.tag(), fx.record::<f64>());
    let mut model = ReducedBasisModel::<f64>::new(fx.theta());
    RbEvaluationDeserializer::new(&mut model)
        .read_from_file(file.path(), true)
        .unwrap();
    // (1, 1) of the Fq-Fq block of two terms is the last packed entry.
    assert_eq!(
        model.fq_representor_innerprods[triangular_offset(1, 1)],
        common::value(seed::FQ, 2)
    );
}

#[test]
fn error_bound_sections_are_optional() {
    let fx = fixture();
    let mut record = fx.record::<f64>();
    if let PackValue::Object(fields) = &mut record {
        fields.retain(|(k, _)| !k.ends_with("Innerprods"));
    }
    let file = write_model(SchemaId::RbEvaluationReal.tag(), record);
    let mut model = ReducedBasisModel::<f64>::new(fx.theta());
    RbEvaluationDeserializer::new(&mut model)
        .read_from_file(file.path(), false)
        .unwrap();
    assert_matches_fixture(&model, &fx, false);
    assert!(model.fq_representor_innerprods.is_empty());
}

#[test]
fn inner_product_matrix_is_read_on_request() {
    let fx = fixture();
    let file = write_model(SchemaId::RbEvaluationReal.tag(), fx.record::<f64>());
    let mut model = ReducedBasisModel::<f64>::new(fx.theta());
    model.compute_rb_inner_product = true;
    RbEvaluationDeserializer::new(&mut model)
        .read_from_file(file.path(), false)
        .unwrap();
    assert_eq!(model.rb_inner_product_matrix[(2, 3)], common::value(seed::INNER_PRODUCT, 11));
}

#[test]
fn truncated_aq_matrix_leaves_model_untouched() {
    let fx = fixture();
    let mut before = ReducedBasisModel::<f64>::new(fx.theta());
    let good = write_model(SchemaId::RbEvaluationReal.tag(), fx.record::<f64>());
    RbEvaluationDeserializer::new(&mut before)
        .read_from_file(good.path(), true)
        .unwrap();

    let mut record = fx.record::<f64>();
    if let PackValue::Array(matrices) = field(&mut record, "rbAqMatrices") {
        matrices[1] = cells::<f64>(9_999, 15);
    }
    let bad = write_model(SchemaId::RbEvaluationReal.tag(), record);

    let mut model = before.clone();
    let err = RbEvaluationDeserializer::new(&mut model)
        .read_from_file(bad.path(), true)
        .unwrap_err();
    assert_eq!(err.section(), Some("Aq matrix 1"));
    assert!(matches!(err, LoadError::Size { expected: 16, found: 15, .. }));
    assert_eq!(model, before);
}

#[test]
fn failed_first_load_keeps_fresh_model() {
    let fx = fixture();
    let mut record = fx.record::<f64>();
    set(&mut record, "rbFqVectors", PackValue::Array(vec![cells::<f64>(1, 4)]));
    let file = write_model(SchemaId::RbEvaluationReal.tag(), record);

    let mut model = ReducedBasisModel::<f64>::new(fx.theta());
    let err = RbEvaluationDeserializer::new(&mut model)
        .read_from_file(file.path(), false)
        .unwrap_err();
    assert_eq!(err.section(), Some("Fq vectors"));
    assert_eq!(model, ReducedBasisModel::new(fx.theta()));
    assert_eq!(model.n_basis_functions(), 0);
}

#[test]
fn basis_count_is_bounded() {
    let fx = fixture();
    for n_bfs in [0, u64::from(MAX_BASIS_FUNCTIONS) + 1, u64::MAX] {
        let mut record = fx.record::<f64>();
        set(&mut record, "nBfs", PackValue::UInteger(n_bfs));
        let file = write_model(SchemaId::RbEvaluationReal.tag(), record);
        let mut model = ReducedBasisModel::<f64>::new(fx.theta());
        let err = RbEvaluationDeserializer::new(&mut model)
            .read_from_file(file.path(), false)
            .unwrap_err();
        assert!(matches!(err, LoadError::BasisCount { n, .. } if n == n_bfs));
    }
}

#[test]
fn output_term_count_mismatch_names_the_output() {
    let fx = fixture();
    let mut record = fx.record::<f64>();
    set(
        &mut record,
        "outputVectors",
        PackValue::Array(vec![PackValue::Array(vec![cells::<f64>(1, 4)])]),
    );
    let file = write_model(SchemaId::RbEvaluationReal.tag(), record);
    let mut model = ReducedBasisModel::<f64>::new(fx.theta());
    let err = RbEvaluationDeserializer::new(&mut model)
        .read_from_file(file.path(), false)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "size error while reading output vectors of output 0: expected 2 entries, found 1"
    );
}

#[test]
fn complex_model_reads_complex_cells() {
    let fx = fixture();
    let mut record = fx.record::<Complex64>();
    if let PackValue::Array(vectors) = field(&mut record, "rbFqVectors") {
        vectors[0] = PackValue::Array(
            (0..4)
                .map(|_| {
                    PackValue::object([
                        ("real", PackValue::Integer(3)),
                        ("imag", PackValue::Integer(-1)),
                    ])
                })
                .collect(),
        );
    }
    let file = write_model(SchemaId::RbEvaluationComplex.tag(), record);
    let mut model = ReducedBasisModel::<Complex64>::new(fx.theta());
    RbEvaluationDeserializer::new(&mut model)
        .read_from_file(file.path(), true)
        .unwrap();
    assert_eq!(model.rb_fq_vectors[0][2], Complex64::new(3.0, -1.0));
    assert_eq!(
        model.rb_aq_matrices[2][(1, 0)],
        Complex64::sample(seed::AQ_MATRIX + 2, 4)
    );
}

#[test]
fn representation_must_match_root_schema() {
    let fx = fixture();
    let file = write_model(SchemaId::RbEvaluationReal.tag(), fx.record::<f64>());
    let mut model = ReducedBasisModel::<Complex64>::new(fx.theta());
    let err = RbEvaluationDeserializer::new(&mut model)
        .read_from_file(file.path(), false)
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::Schema {
            expected: SchemaId::RbEvaluationComplex,
            found: Some(tag)
        } if tag == SchemaId::RbEvaluationReal.tag()
    ));
}

#[test]
fn default_number_matches_build_representation() {
    let fx = fixture();
    let schema = SchemaId::rb_evaluation(rb_data::Number::REPRESENTATION);
    let file = write_model(schema.tag(), fx.record::<rb_data::Number>());
    let mut model: ReducedBasisModel = ReducedBasisModel::new(fx.theta());
    RbEvaluationDeserializer::new(&mut model)
        .read_from_file(file.path(), true)
        .unwrap();
    assert_matches_fixture(&model, &fx, true);
}

#[test]
fn missing_file_and_traversal_limit() {
    let fx = fixture();
    let mut model = ReducedBasisModel::<f64>::new(fx.theta());
    let err = RbEvaluationDeserializer::new(&mut model)
        .read_from_file("/nonexistent/rb_eval.bin", false)
        .unwrap_err();
    assert!(matches!(err, LoadError::Open { .. }));
    assert!(err.to_string().starts_with("couldn't open the buffer file /nonexistent/rb_eval.bin"));

    let file = write_model(SchemaId::RbEvaluationReal.tag(), fx.record::<f64>());
    let err = RbEvaluationDeserializer::new(&mut model)
        .with_options(ReaderOptions {
            traversal_limit: Some(16),
            ..ReaderOptions::default()
        })
        .read_from_file(file.path(), false)
        .unwrap_err();
    assert!(matches!(err, LoadError::Message(_)));
    assert_eq!(model.n_basis_functions(), 0);
}

fn load_with_basis_count(
    fx: &RbFixture,
    n_bfs: u64,
    compute_rb_inner_product: bool,
) -> (ReducedBasisModel<f64>, LoadError) {
    let mut record = fx.record::<f64>();
    set(&mut record, "nBfs", PackValue::from(n_bfs));
    let file = write_model(SchemaId::RbEvaluationReal.tag(), record);
    let mut model = ReducedBasisModel::<f64>::new(fx.theta());
    model.compute_rb_inner_product = compute_rb_inner_product;
    let err = RbEvaluationDeserializer::new(&mut model)
        .read_from_file(file.path(), true)
        .unwrap_err();
    (model, err)
}

#[test]
fn basis_count_is_checked_against_stored_data() {
    let n_bfs = u64::from(MAX_BASIS_FUNCTIONS);
    let n = MAX_BASIS_FUNCTIONS as usize;

    let fx = fixture();
    let (model, err) = load_with_basis_count(&fx, n_bfs, false);
    assert_eq!(err.section(), Some("Fq vector 0"));
    assert!(matches!(err, LoadError::Size { expected, found: 4, .. } if expected == n));
    assert_eq!(model, ReducedBasisModel::new(fx.theta()));

    let fx = RbFixture { q_f: 0, ..fixture() };
    let (model, err) = load_with_basis_count(&fx, n_bfs, false);
    assert_eq!(err.section(), Some("Aq matrix 0"));
    assert!(matches!(err, LoadError::Size { expected, found: 16, .. } if expected == n * n));
    assert!(model.rb_aq_matrices.is_empty());

    let fx = RbFixture {
        q_f: 0,
        q_a: 0,
        ..fixture()
    };
    let (_, err) = load_with_basis_count(&fx, n_bfs, true);
    assert_eq!(err.section(), Some("inner product matrix"));
}

#[test]
fn deeply_nested_file_is_rejected() {
    use std::io::Write;

    // 0x52420001([[[...0]]]) with 100 000 levels.
    let mut bin = vec![0xda, 0x52, 0x42, 0x00, 0x01];
    bin.extend(std::iter::repeat(0x81).take(100_000));
    bin.push(0x00);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bin).unwrap();
    file.flush().unwrap();

    let mut model = ReducedBasisModel::<f64>::new(fixture().theta());
    let err = RbEvaluationDeserializer::new(&mut model)
        .read_from_file(file.path(), true)
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::Message(MessageError::Decode(CborError::NestingLimit(64)))
    ));
    assert_eq!(model.n_basis_functions(), 0);
}
