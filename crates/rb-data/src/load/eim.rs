use tracing::debug;

use crate::linalg::{triangular_offset, triangular_size};
use crate::model::RbEimModel;
use crate::scalar::Scalar;
use crate::schema::{MeshElemReader, Point3dReader, RbEimEvaluationReader, RbEvaluationReader};
use crate::LoadError;

use super::helpers::{load_elem_into_mesh, load_point};
use super::rb::{basis_count, fill_rb_evaluation_data};

/// Loads an empirical interpolation model and rebuilds its interpolation
/// point mesh. Error-bound data is never read for EIM models.
///
/// On error `model` is left unchanged.
pub fn load_rb_eim_evaluation_data<T: Scalar>(
    model: &mut RbEimModel<T>,
    base_record: RbEvaluationReader<'_>,
    eim_record: RbEimEvaluationReader<'_>,
) -> Result<(), LoadError> {
    let base = &model.base;
    let n = basis_count(base_record, base.theta(), base.compute_rb_inner_product)? as usize;
    eim_record
        .interpolation_matrix()?
        .expect_len(triangular_size(n), "interpolation matrix")?;

    let mut staged = model.clone();
    fill_rb_evaluation_data(&mut staged, base_record, false)?;
    fill_eim_data(&mut staged, eim_record)?;
    *model = staged;
    Ok(())
}

fn fill_eim_data<T: Scalar>(
    model: &mut RbEimModel<T>,
    record: RbEimEvaluationReader<'_>,
) -> Result<(), LoadError> {
    let n = model.base.n_basis_functions() as usize;

    let matrix = record.interpolation_matrix()?;
    matrix.expect_len(triangular_size(n), "interpolation matrix")?;
    for i in 0..n {
        for j in 0..=i {
            model.interpolation_matrix[(i, j)] = matrix.scalar(triangular_offset(i, j))?;
        }
    }

    let points = record.interpolation_points()?;
    points.expect_len(n, "interpolation points")?;
    model.interpolation_points = (0..n)
        .map(|i| load_point(Point3dReader::new(points.record(i, "Point3D")?)))
        .collect::<Result<_, _>>()?;

    let vars = record.interpolation_points_var()?;
    vars.expect_len(n, "interpolation point variables")?;
    model.interpolation_points_var = (0..n)
        .map(|i| {
            let var = vars.uint(i)?;
            u32::try_from(var).map_err(|_| LoadError::FieldType {
                field: format!("RbEimEvaluation.interpolationPointsVar[{i}]"),
                expected: "32-bit variable number",
                found: "out of range integer",
            })
        })
        .collect::<Result<_, _>>()?;
    debug!(n, "loaded interpolation matrix and points");

    let elems = record.interpolation_points_elems()?;
    elems.expect_len(n, "interpolation elements")?;
    let mesh = model.interpolation_points_mesh_mut();
    mesh.clear();
    let mut elem_ids = Vec::with_capacity(n);
    for i in 0..n {
        let elem = MeshElemReader::new(elems.record(i, "MeshElem")?);
        elem_ids.push(load_elem_into_mesh(
            elem,
            mesh,
            format!("interpolation element {i}"),
        )?);
    }
    debug!(n_elem = mesh.n_elem(), n_nodes = mesh.n_nodes(), "rebuilt interpolation point mesh");
    model.interpolation_points_elem = elem_ids;

    Ok(())
}
