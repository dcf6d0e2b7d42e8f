use crate::linalg::DenseMatrix;
use crate::mesh::{ElemId, Point, PointMesh};
use crate::scalar::{Number, Scalar};
use crate::theta::ThetaExpansion;

use super::{RbEvaluation, ReducedBasisModel};

/// An empirical interpolation model.
///
/// Interpolation point `i` lies in element `interpolation_points_elem[i]` of
/// [`interpolation_points_mesh`](Self::interpolation_points_mesh), which owns
/// all of those elements.
#[derive(Debug, Clone, PartialEq)]
pub struct RbEimModel<T = Number> {
    pub base: ReducedBasisModel<T>,
    /// Lower triangle is meaningful, the rest stays zero.
    pub interpolation_matrix: DenseMatrix<T>,
    pub interpolation_points: Vec<Point>,
    pub interpolation_points_var: Vec<u32>,
    pub interpolation_points_elem: Vec<ElemId>,
    interpolation_points_mesh: PointMesh,
}

impl<T: Scalar> RbEimModel<T> {
    pub fn new(theta: ThetaExpansion) -> Self {
        Self {
            base: ReducedBasisModel::new(theta),
            interpolation_matrix: DenseMatrix::default(),
            interpolation_points: Vec::new(),
            interpolation_points_var: Vec::new(),
            interpolation_points_elem: Vec::new(),
            interpolation_points_mesh: PointMesh::new(),
        }
    }

    pub fn interpolation_points_mesh(&self) -> &PointMesh {
        &self.interpolation_points_mesh
    }

    pub fn interpolation_points_mesh_mut(&mut self) -> &mut PointMesh {
        &mut self.interpolation_points_mesh
    }
}

impl<T: Scalar> RbEvaluation for RbEimModel<T> {
    type Value = T;

    fn rb(&self) -> &ReducedBasisModel<T> {
        &self.base
    }

    fn rb_mut(&mut self) -> &mut ReducedBasisModel<T> {
        &mut self.base
    }

    fn resize_data_structures(&mut self, n: usize, read_error_bound_data: bool) {
        self.base.resize_data_structures(n, read_error_bound_data);
        self.interpolation_matrix = DenseMatrix::zeros(n, n);
    }
}
