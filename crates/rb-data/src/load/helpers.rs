//! Section readers shared by the model loaders.

use std::collections::BTreeMap;

use crate::linalg::{DenseMatrix, DenseVector};
use crate::mesh::{ElemId, ElemType, Point, PointMesh};
use crate::parameters::{ParameterConfig, RbParameters};
use crate::scalar::Scalar;
use crate::schema::{
    DiscreteParameterListReader, ListView, MeshElemReader, ParameterRangesReader, Point3dReader,
};
use crate::LoadError;

/// Reads exactly `expected` cells of `list`.
pub(crate) fn load_cells<T: Scalar>(
    list: &ListView<'_>,
    expected: usize,
    section: impl Into<String>,
) -> Result<Vec<T>, LoadError> {
    list.expect_len(expected, section)?;
    (0..expected).map(|i| list.scalar::<T>(i)).collect()
}

pub(crate) fn load_vector<T: Scalar>(
    list: &ListView<'_>,
    n: usize,
    section: impl Into<String>,
) -> Result<DenseVector<T>, LoadError> {
    load_cells(list, n, section).map(DenseVector::from)
}

/// Reads an `n × n` matrix stored row-major.
pub(crate) fn load_matrix<T: Scalar>(
    list: &ListView<'_>,
    n: usize,
    section: impl Into<String>,
) -> Result<DenseMatrix<T>, LoadError> {
    list.expect_len(n * n, section)?;
    let mut matrix = DenseMatrix::<T>::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            matrix[(i, j)] = list.scalar(i * n + j)?;
        }
    }
    Ok(matrix)
}

/// Reads the continuous parameter ranges and the discrete parameter values
/// into one parameter domain.
pub fn load_parameter_ranges(
    ranges: ParameterRangesReader<'_>,
    discrete: DiscreteParameterListReader<'_>,
) -> Result<ParameterConfig, LoadError> {
    let names = ranges.names()?;
    let min_values = ranges.min_values()?;
    let max_values = ranges.max_values()?;
    if min_values.len() != names.len() || max_values.len() != names.len() {
        return Err(LoadError::Parameter(format!(
            "{} parameter names but {} minimum and {} maximum values",
            names.len(),
            min_values.len(),
            max_values.len()
        )));
    }

    let mut min = RbParameters::new();
    let mut max = RbParameters::new();
    for i in 0..names.len() {
        let name = names.text(i)?;
        min.set_value(name, min_values.real(i)?);
        max.set_value(name, max_values.real(i)?);
    }

    let discrete_names = discrete.names()?;
    let discrete_values = discrete.values()?;
    if discrete_values.len() != discrete_names.len() {
        return Err(LoadError::Parameter(format!(
            "{} discrete parameter names but {} value lists",
            discrete_names.len(),
            discrete_values.len()
        )));
    }
    let mut values = BTreeMap::new();
    for i in 0..discrete_names.len() {
        let list = discrete_values.list(i)?;
        let vals = (0..list.len())
            .map(|j| list.real(j))
            .collect::<Result<Vec<_>, _>>()?;
        values.insert(discrete_names.text(i)?.to_owned(), vals);
    }

    ParameterConfig::new(min, max, values)
}

pub fn load_point(point: Point3dReader<'_>) -> Result<Point, LoadError> {
    Ok(Point::new(point.x()?, point.y()?, point.z()?))
}

/// Adds one serialized element, and fresh nodes for its points, to `mesh`.
pub fn load_elem_into_mesh(
    elem: MeshElemReader<'_>,
    mesh: &mut PointMesh,
    section: impl Into<String>,
) -> Result<ElemId, LoadError> {
    let elem_type: ElemType = elem.elem_type()?.parse()?;
    let subdomain_id = elem.subdomain_id()?;
    let subdomain_id = u16::try_from(subdomain_id).map_err(|_| LoadError::FieldType {
        field: "MeshElem.subdomainId".to_owned(),
        expected: "16-bit subdomain id",
        found: "out of range integer",
    })?;

    let points = elem.points()?;
    if points.len() != elem_type.n_nodes() {
        return Err(LoadError::shape(section, elem_type.n_nodes(), points.len()));
    }
    let mut nodes = Vec::with_capacity(points.len());
    for i in 0..points.len() {
        let point = load_point(Point3dReader::new(points.record(i, "Point3D")?))?;
        nodes.push(mesh.add_point(point));
    }
    Ok(mesh.add_elem(elem_type, subdomain_id, nodes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RbEvaluationReader;
    use rb_pack::PackValue;

    fn names(names: &[&str]) -> PackValue {
        PackValue::Array(names.iter().map(|&n| PackValue::from(n)).collect())
    }

    fn evaluation(ranges: PackValue, discrete: PackValue) -> PackValue {
        PackValue::object([("parameterRanges", ranges), ("discreteParameters", discrete)])
    }

    fn no_discrete() -> PackValue {
        PackValue::object([("names", names(&[])), ("values", PackValue::Array(vec![]))])
    }

    fn load(value: &PackValue) -> Result<ParameterConfig, LoadError> {
        let reader = RbEvaluationReader::new(value)?;
        load_parameter_ranges(reader.parameter_ranges()?, reader.discrete_parameters()?)
    }

    #[test]
    fn ranges_and_discrete_values() {
        let value = evaluation(
            PackValue::object([
                ("names", names(&["mu", "nu"])),
                ("minValues", PackValue::from(vec![0.0, -1.0])),
                ("maxValues", PackValue::from(vec![1.0, 1.0])),
            ]),
            PackValue::object([
                ("names", names(&["k"])),
                ("values", PackValue::from(vec![vec![2.0, 1.0]])),
            ]),
        );
        let config = load(&value).unwrap();
        assert_eq!(config.min().value("nu"), Some(-1.0));
        assert_eq!(config.max().value("mu"), Some(1.0));
        assert_eq!(config.discrete_values()["k"], vec![2.0, 1.0]);
    }

    #[test]
    fn range_lists_must_agree() {
        let value = evaluation(
            PackValue::object([
                ("names", names(&["mu", "nu"])),
                ("minValues", PackValue::from(vec![0.0])),
                ("maxValues", PackValue::from(vec![1.0, 1.0])),
            ]),
            no_discrete(),
        );
        assert!(matches!(load(&value), Err(LoadError::Parameter(_))));
    }

    fn point(x: f64) -> PackValue {
        PackValue::object([
            ("x", PackValue::Float(x)),
            ("y", PackValue::Float(0.0)),
            ("z", PackValue::Float(0.0)),
        ])
    }

    fn elem(ty: &str, subdomain: u64, xs: &[f64]) -> PackValue {
        PackValue::object([
            ("type", PackValue::from(ty)),
            ("subdomainId", PackValue::UInteger(subdomain)),
            ("points", PackValue::Array(xs.iter().map(|&x| point(x)).collect())),
        ])
    }

    fn load_elem(value: &PackValue, mesh: &mut PointMesh) -> Result<ElemId, LoadError> {
        let holder = PackValue::object([("elems", PackValue::Array(vec![value.clone()]))]);
        let view = crate::schema::RecordView::new("Test", &holder)?.list("elems")?;
        load_elem_into_mesh(MeshElemReader::new(view.record(0, "MeshElem")?), mesh, "elem")
    }

    #[test]
    fn element_gets_its_own_nodes() {
        let mut mesh = PointMesh::new();
        let id = load_elem(&elem("EDGE2", 7, &[0.5, 1.5]), &mut mesh).unwrap();
        assert_eq!(id, ElemId(0));
        assert_eq!(mesh.n_nodes(), 2);
        assert_eq!(mesh.elem(id).map(|e| e.subdomain_id()), Some(7));
        let xs: Vec<f64> = mesh.elem_points(id).map(|p| p.x).collect();
        assert_eq!(xs, vec![0.5, 1.5]);
    }

    #[test]
    fn element_errors() {
        let mut mesh = PointMesh::new();
        let err = load_elem(&elem("EDGE9", 0, &[0.0]), &mut mesh).unwrap_err();
        assert_eq!(err.to_string(), "unknown element type `EDGE9`");

        let err = load_elem(&elem("TRI3", 0, &[0.0, 1.0]), &mut mesh).unwrap_err();
        assert_eq!(err.section(), Some("elem"));

        let err = load_elem(&elem("NODEELEM", 70_000, &[0.0]), &mut mesh).unwrap_err();
        assert!(matches!(err, LoadError::FieldType { .. }));
        assert_eq!(mesh.n_elem(), 0);
    }
}
