use tracing::debug;

use crate::linalg::{triangular_size, DenseVector};
use crate::model::RbEvaluation;
use crate::schema::RbEvaluationReader;
use crate::theta::ThetaExpansion;
use crate::LoadError;

use super::helpers::{load_cells, load_matrix, load_parameter_ranges, load_vector};

/// Largest basis count a model file may declare.
pub const MAX_BASIS_FUNCTIONS: u32 = 16_384;

/// Loads the steady reduced basis data of `record` into `model`.
///
/// On error `model` is left unchanged.
pub fn load_rb_evaluation_data<M: RbEvaluation>(
    model: &mut M,
    record: RbEvaluationReader<'_>,
    read_error_bound_data: bool,
) -> Result<(), LoadError> {
    let mut staged = model.clone();
    fill_rb_evaluation_data(&mut staged, record, read_error_bound_data)?;
    *model = staged;
    Ok(())
}

/// Reads the declared basis count and checks it against the stored data.
///
/// No buffer is sized from the count alone: the first Fq vector must hold N
/// cells, the first Aq matrix N×N cells, and so must the inner product
/// matrix when `read_inner_product` is set.
pub(crate) fn basis_count(
    record: RbEvaluationReader<'_>,
    theta: &ThetaExpansion,
    read_inner_product: bool,
) -> Result<u32, LoadError> {
    let n_bfs = record.n_bfs()?;
    let n = match u32::try_from(n_bfs) {
        Ok(n) if (1..=MAX_BASIS_FUNCTIONS).contains(&n) => n,
        _ => {
            return Err(LoadError::BasisCount {
                n: n_bfs,
                limit: MAX_BASIS_FUNCTIONS,
            })
        }
    };
    let len = n as usize;

    if theta.n_f_terms() > 0 {
        let fq_vectors = record.rb_fq_vectors()?;
        fq_vectors.expect_len(theta.n_f_terms(), "Fq vectors")?;
        fq_vectors.list(0)?.expect_len(len, "Fq vector 0")?;
    }
    if theta.n_a_terms() > 0 {
        let aq_matrices = record.rb_aq_matrices()?;
        aq_matrices.expect_len(theta.n_a_terms(), "Aq matrices")?;
        aq_matrices.list(0)?.expect_len(len * len, "Aq matrix 0")?;
    }
    if read_inner_product {
        record
            .rb_inner_product_matrix()?
            .expect_len(len * len, "inner product matrix")?;
    }
    Ok(n)
}

pub(crate) fn fill_rb_evaluation_data<M: RbEvaluation>(
    model: &mut M,
    record: RbEvaluationReader<'_>,
    read_error_bound_data: bool,
) -> Result<(), LoadError> {
    let rb = model.rb();
    let n = basis_count(record, rb.theta(), rb.compute_rb_inner_product)?;
    model.rb_mut().set_n_basis_functions(n);
    let n = n as usize;
    model.resize_data_structures(n, read_error_bound_data);
    debug!(n_basis_functions = n, "resized reduced basis data");

    let parameters =
        load_parameter_ranges(record.parameter_ranges()?, record.discrete_parameters()?)?;
    debug!(n_parameters = parameters.n_parameters(), "loaded parameter ranges");
    model.rb_mut().initialize_parameters(parameters);

    let rb = model.rb_mut();
    let theta = rb.theta().clone();
    let q_f = theta.n_f_terms();
    let q_a = theta.n_a_terms();
    let n_outputs = theta.n_outputs();

    if read_error_bound_data {
        rb.fq_representor_innerprods = load_cells(
            &record.fq_innerprods()?,
            triangular_size(q_f),
            "Fq representor norm data",
        )?;

        let fq_aq = record.fq_aq_innerprods()?;
        fq_aq.expect_len(q_f * q_a * n, "Fq-Aq representor data")?;
        for q_f_index in 0..q_f {
            for q_a_index in 0..q_a {
                let mut row = DenseVector::<M::Value>::zeros(n);
                for i in 0..n {
                    row[i] = fq_aq.scalar(q_f_index * q_a * n + q_a_index * n + i)?;
                }
                rb.fq_aq_representor_innerprods[q_f_index][q_a_index] = row;
            }
        }

        let aq_aq = record.aq_aq_innerprods()?;
        let q_a_hat = triangular_size(q_a);
        aq_aq.expect_len(q_a_hat * n * n, "Aq-Aq representor data")?;
        for t in 0..q_a_hat {
            let block = &mut rb.aq_aq_representor_innerprods[t];
            for j in 0..n {
                for l in 0..n {
                    block[(j, l)] = aq_aq.scalar(t * n * n + j * n + l)?;
                }
            }
        }

        let output_dual = record.output_dual_innerprods()?;
        output_dual.expect_len(n_outputs, "output dual inner products")?;
        for o in 0..n_outputs {
            rb.output_dual_innerprods[o] = load_cells(
                &output_dual.list(o)?,
                triangular_size(theta.n_output_terms(o)),
                format!("output dual inner products of output {o}"),
            )?;
        }
        debug!(q_f, q_a, n_outputs, "loaded error bound data");
    }

    let outputs = record.output_vectors()?;
    outputs.expect_len(n_outputs, "output vectors")?;
    for o in 0..n_outputs {
        let terms = outputs.list(o)?;
        terms.expect_len(theta.n_output_terms(o), format!("output vectors of output {o}"))?;
        for q_l in 0..theta.n_output_terms(o) {
            rb.rb_output_vectors[o][q_l] =
                load_vector(&terms.list(q_l)?, n, format!("output vector {o}/{q_l}"))?;
        }
    }

    let fq_vectors = record.rb_fq_vectors()?;
    fq_vectors.expect_len(q_f, "Fq vectors")?;
    for q in 0..q_f {
        rb.rb_fq_vectors[q] = load_vector(&fq_vectors.list(q)?, n, format!("Fq vector {q}"))?;
    }

    let aq_matrices = record.rb_aq_matrices()?;
    aq_matrices.expect_len(q_a, "Aq matrices")?;
    for q in 0..q_a {
        rb.rb_aq_matrices[q] = load_matrix(&aq_matrices.list(q)?, n, format!("Aq matrix {q}"))?;
    }
    debug!(q_f, q_a, "loaded reduced vectors and matrices");

    if rb.compute_rb_inner_product {
        rb.rb_inner_product_matrix =
            load_matrix(&record.rb_inner_product_matrix()?, n, "inner product matrix")?;
        debug!("loaded reduced inner product matrix");
    }

    Ok(())
}
