use tracing::debug;

use crate::linalg::{triangular_size, DenseVector};
use crate::model::TransientRbModel;
use crate::scalar::Scalar;
use crate::schema::{RbEvaluationReader, TransientRbEvaluationReader};
use crate::LoadError;

use super::helpers::{load_cells, load_matrix};
use super::rb::{basis_count, fill_rb_evaluation_data};

/// Loads a time-dependent model: the steady data of `base_record` followed
/// by the time stepping data of `trans_record`.
///
/// On error `model` is left unchanged.
pub fn load_transient_rb_evaluation_data<T: Scalar>(
    model: &mut TransientRbModel<T>,
    base_record: RbEvaluationReader<'_>,
    trans_record: TransientRbEvaluationReader<'_>,
    read_error_bound_data: bool,
) -> Result<(), LoadError> {
    let base = &model.base;
    let n = basis_count(base_record, base.theta(), base.compute_rb_inner_product)? as usize;
    trans_record.rb_l2_matrix()?.expect_len(n * n, "L2 matrix")?;

    let mut staged = model.clone();
    fill_rb_evaluation_data(&mut staged, base_record, read_error_bound_data)?;
    fill_transient_data(&mut staged, trans_record, read_error_bound_data)?;
    *model = staged;
    Ok(())
}

fn fill_transient_data<T: Scalar>(
    model: &mut TransientRbModel<T>,
    record: TransientRbEvaluationReader<'_>,
    read_error_bound_data: bool,
) -> Result<(), LoadError> {
    let n = model.base.n_basis_functions() as usize;
    let q_m = model.n_m_terms();
    let q_f = model.base.theta().n_f_terms();
    let q_a = model.base.theta().n_a_terms();

    model.delta_t = record.delta_t()?;
    model.euler_theta = record.euler_theta()?;
    model.n_time_steps = time_count(record.n_time_steps()?, "nTimeSteps")?;
    model.time_step = time_count(record.time_step()?, "timeStep")?;

    model.rb_l2_matrix = load_matrix(&record.rb_l2_matrix()?, n, "L2 matrix")?;

    let mq_matrices = record.rb_mq_matrices()?;
    mq_matrices.expect_len(q_m, "Mq matrices")?;
    for q in 0..q_m {
        model.rb_mq_matrices[q] =
            load_matrix(&mq_matrices.list(q)?, n, format!("Mq matrix {q}"))?;
    }
    debug!(n, q_m, "loaded L2 and Mq matrices");

    model.initial_l2_error_all_n =
        load_cells(&record.initial_l2_errors()?, n, "initial L2 errors")?;

    let initial_conditions = record.initial_conditions()?;
    initial_conditions.expect_len(n, "initial conditions")?;
    for i in 0..n {
        let row = initial_conditions.list(i)?;
        if row.len() != i + 1 {
            return Err(LoadError::shape(
                format!("initial conditions row {i}"),
                i + 1,
                row.len(),
            ));
        }
        let mut values = DenseVector::<T>::zeros(i + 1);
        for j in 0..=i {
            values[j] = row.scalar(j)?;
        }
        model.rb_initial_condition_all_n[i] = values;
    }
    debug!(n, "loaded initial conditions");

    if read_error_bound_data {
        let fq_mq = record.fq_mq_innerprods()?;
        fq_mq.expect_len(q_f * q_m * n, "Fq-Mq representor data")?;
        for q_f_index in 0..q_f {
            for q_m_index in 0..q_m {
                let mut row = DenseVector::<T>::zeros(n);
                for i in 0..n {
                    row[i] = fq_mq.scalar(q_f_index * q_m * n + q_m_index * n + i)?;
                }
                model.fq_mq_representor_innerprods[q_f_index][q_m_index] = row;
            }
        }

        let mq_mq = record.mq_mq_innerprods()?;
        let q_m_hat = triangular_size(q_m);
        mq_mq.expect_len(q_m_hat * n * n, "Mq-Mq representor data")?;
        for t in 0..q_m_hat {
            let block = &mut model.mq_mq_representor_innerprods[t];
            for i in 0..n {
                for j in 0..n {
                    block[(i, j)] = mq_mq.scalar(t * n * n + i * n + j)?;
                }
            }
        }

        let aq_mq = record.aq_mq_innerprods()?;
        aq_mq.expect_len(q_a * q_m * n * n, "Aq-Mq representor data")?;
        for q_a_index in 0..q_a {
            for q_m_index in 0..q_m {
                let block = &mut model.aq_mq_representor_innerprods[q_a_index][q_m_index];
                let offset = q_a_index * q_m * n * n + q_m_index * n * n;
                for i in 0..n {
                    for j in 0..n {
                        block[(i, j)] = aq_mq.scalar(offset + i * n + j)?;
                    }
                }
            }
        }
        debug!(q_f, q_a, q_m, "loaded transient error bound data");
    }

    Ok(())
}

fn time_count(value: u64, field: &str) -> Result<u32, LoadError> {
    u32::try_from(value).map_err(|_| LoadError::FieldType {
        field: format!("TransientRbEvaluation.{field}"),
        expected: "32-bit count",
        found: "out of range integer",
    })
}
