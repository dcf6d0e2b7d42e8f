use tracing::{debug, warn};

use crate::model::RbScmModel;
use crate::parameters::RbParameters;
use crate::schema::RbScmEvaluationReader;
use crate::LoadError;

use super::helpers::{load_cells, load_parameter_ranges};

/// Loads successive constraint method data into `model`.
///
/// The stability vector is taken at its stored length; a length different
/// from the number of `C_J` samples is logged, not rejected.
/// On error `model` is left unchanged.
pub fn load_rb_scm_evaluation_data(
    model: &mut RbScmModel,
    record: RbScmEvaluationReader<'_>,
) -> Result<(), LoadError> {
    let mut staged = model.clone();
    fill_scm_data(&mut staged, record)?;
    *model = staged;
    Ok(())
}

fn fill_scm_data(
    model: &mut RbScmModel,
    record: RbScmEvaluationReader<'_>,
) -> Result<(), LoadError> {
    let parameters =
        load_parameter_ranges(record.parameter_ranges()?, record.discrete_parameters()?)?;
    model.initialize_parameters(parameters);

    let q_a = model.theta().n_a_terms();
    model.b_min = load_cells(&record.b_min()?, q_a, "B_min")?;
    model.b_max = load_cells(&record.b_max()?, q_a, "B_max")?;

    let stability = record.c_j_stability_vector()?;
    model.c_j_stability_vector = load_cells(&stability, stability.len(), "C_J stability vector")?;

    let samples = record.c_j()?;
    let mut c_j = Vec::with_capacity(samples.len());
    for i in 0..samples.len() {
        let pairs = samples.list(i)?;
        let mut sample = RbParameters::new();
        for j in 0..pairs.len() {
            let pair = pairs.record(j, "ParameterValue")?;
            sample.set_value(pair.text("name")?, pair.real("value")?);
        }
        c_j.push(sample);
    }
    if c_j.len() != model.c_j_stability_vector.len() {
        warn!(
            n_samples = c_j.len(),
            n_stability = model.c_j_stability_vector.len(),
            "C_J sample count differs from C_J stability vector length"
        );
    }

    let m = c_j.len();
    let ub = load_cells::<f64>(&record.scm_ub_vectors()?, m * q_a, "SCM UB vectors")?;
    model.scm_ub_vectors = (0..m).map(|i| ub[i * q_a..(i + 1) * q_a].to_vec()).collect();
    model.c_j = c_j;
    debug!(q_a, n_samples = m, "loaded SCM data");

    Ok(())
}
