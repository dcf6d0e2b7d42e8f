//! Minimal mesh used to hold the elements that contain EIM interpolation
//! points.
//!
//! The mesh is an arena: it owns every node and element it creates and hands
//! out [`NodeId`] / [`ElemId`] indices instead of references.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A point in 3-D space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElemId(pub usize);

macro_rules! elem_types {
    ($($variant:ident => $name:literal, $n_nodes:literal;)*) => {
        /// Geometric element type, identified in model files by its name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ElemType {
            $($variant,)*
        }

        impl ElemType {
            pub const ALL: &'static [ElemType] = &[$(ElemType::$variant,)*];

            /// Number of nodes of an element of this type.
            pub const fn n_nodes(self) -> usize {
                match self {
                    $(ElemType::$variant => $n_nodes,)*
                }
            }

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(ElemType::$variant => $name,)*
                }
            }
        }

        impl FromStr for ElemType {
            type Err = UnknownElemType;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(ElemType::$variant),)*
                    _ => Err(UnknownElemType(s.to_owned())),
                }
            }
        }
    };
}

elem_types! {
    NodeElem => "NODEELEM", 1;
    Edge2 => "EDGE2", 2;
    Edge3 => "EDGE3", 3;
    Edge4 => "EDGE4", 4;
    Tri3 => "TRI3", 3;
    Tri6 => "TRI6", 6;
    Tri7 => "TRI7", 7;
    Quad4 => "QUAD4", 4;
    Quad8 => "QUAD8", 8;
    Quad9 => "QUAD9", 9;
    Tet4 => "TET4", 4;
    Tet10 => "TET10", 10;
    Tet14 => "TET14", 14;
    Hex8 => "HEX8", 8;
    Hex20 => "HEX20", 20;
    Hex27 => "HEX27", 27;
    Prism6 => "PRISM6", 6;
    Prism15 => "PRISM15", 15;
    Prism18 => "PRISM18", 18;
    Pyramid5 => "PYRAMID5", 5;
    Pyramid13 => "PYRAMID13", 13;
    Pyramid14 => "PYRAMID14", 14;
}

impl fmt::Display for ElemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown element type `{0}`")]
pub struct UnknownElemType(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("{elem_type} element needs {expected} nodes, got {found}")]
    WrongNodeCount {
        elem_type: ElemType,
        expected: usize,
        found: usize,
    },
    #[error("node {0} does not exist")]
    UnknownNode(usize),
}

/// A mesh element: its type, subdomain and nodes in local order.
#[derive(Debug, Clone, PartialEq)]
pub struct Elem {
    id: ElemId,
    elem_type: ElemType,
    subdomain_id: u16,
    nodes: Vec<NodeId>,
}

impl Elem {
    pub fn id(&self) -> ElemId {
        self.id
    }

    pub fn elem_type(&self) -> ElemType {
        self.elem_type
    }

    pub fn subdomain_id(&self) -> u16 {
        self.subdomain_id
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }
}

/// A mesh of disconnected elements, one per interpolation point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointMesh {
    nodes: Vec<Point>,
    elems: Vec<Elem>,
}

impl PointMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every node and element; ids restart from 0.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.elems.clear();
    }

    pub fn add_point(&mut self, point: Point) -> NodeId {
        self.nodes.push(point);
        NodeId(self.nodes.len() - 1)
    }

    /// Creates an element on existing nodes. Elements are numbered in
    /// creation order.
    pub fn add_elem(
        &mut self,
        elem_type: ElemType,
        subdomain_id: u16,
        nodes: Vec<NodeId>,
    ) -> Result<ElemId, MeshError> {
        if nodes.len() != elem_type.n_nodes() {
            return Err(MeshError::WrongNodeCount {
                elem_type,
                expected: elem_type.n_nodes(),
                found: nodes.len(),
            });
        }
        if let Some(bad) = nodes.iter().find(|n| n.0 >= self.nodes.len()) {
            return Err(MeshError::UnknownNode(bad.0));
        }
        let id = ElemId(self.elems.len());
        self.elems.push(Elem {
            id,
            elem_type,
            subdomain_id,
            nodes,
        });
        Ok(id)
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_elem(&self) -> usize {
        self.elems.len()
    }

    pub fn point(&self, id: NodeId) -> Option<&Point> {
        self.nodes.get(id.0)
    }

    pub fn elem(&self, id: ElemId) -> Option<&Elem> {
        self.elems.get(id.0)
    }

    pub fn elems(&self) -> impl Iterator<Item = &Elem> {
        self.elems.iter()
    }

    /// Coordinates of an element's nodes, in local node order.
    pub fn elem_points(&self, id: ElemId) -> impl Iterator<Item = &Point> {
        self.elem(id)
            .into_iter()
            .flat_map(|elem| elem.nodes.iter())
            .filter_map(|node| self.point(*node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elem_type_names_roundtrip() {
        for &ty in ElemType::ALL {
            assert_eq!(ty.as_str().parse::<ElemType>(), Ok(ty));
        }
        assert_eq!(
            "EDGE5".parse::<ElemType>(),
            Err(UnknownElemType("EDGE5".into()))
        );
        assert_eq!(ElemType::Edge2.n_nodes(), 2);
        assert_eq!(ElemType::Hex27.n_nodes(), 27);
        assert_eq!(ElemType::Tri3.to_string(), "TRI3");
    }

    #[test]
    fn elements_are_numbered_sequentially() {
        let mut mesh = PointMesh::new();
        let a = mesh.add_point(Point::new(0.0, 0.0, 0.0));
        let b = mesh.add_point(Point::new(1.0, 0.0, 0.0));
        let c = mesh.add_point(Point::new(2.0, 0.0, 0.0));
        assert_eq!(mesh.add_elem(ElemType::Edge2, 1, vec![a, b]), Ok(ElemId(0)));
        assert_eq!(mesh.add_elem(ElemType::Edge2, 2, vec![b, c]), Ok(ElemId(1)));
        assert_eq!(mesh.n_elem(), 2);
        assert_eq!(mesh.elem(ElemId(1)).map(Elem::subdomain_id), Some(2));
        let xs: Vec<f64> = mesh.elem_points(ElemId(1)).map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0]);
    }

    #[test]
    fn clear_restarts_numbering() {
        let mut mesh = PointMesh::new();
        let a = mesh.add_point(Point::default());
        mesh.add_elem(ElemType::NodeElem, 0, vec![a]).unwrap();
        mesh.clear();
        assert_eq!(mesh.n_elem(), 0);
        assert_eq!(mesh.n_nodes(), 0);
        let a = mesh.add_point(Point::default());
        assert_eq!(mesh.add_elem(ElemType::NodeElem, 0, vec![a]), Ok(ElemId(0)));
    }

    #[test]
    fn node_count_must_match_type() {
        let mut mesh = PointMesh::new();
        let nodes: Vec<NodeId> = (0..3).map(|_| mesh.add_point(Point::default())).collect();
        assert_eq!(
            mesh.add_elem(ElemType::Edge2, 0, nodes),
            Err(MeshError::WrongNodeCount {
                elem_type: ElemType::Edge2,
                expected: 2,
                found: 3
            })
        );
        assert_eq!(mesh.n_elem(), 0);
    }

    #[test]
    fn nodes_must_exist() {
        let mut mesh = PointMesh::new();
        assert_eq!(
            mesh.add_elem(ElemType::NodeElem, 0, vec![NodeId(4)]),
            Err(MeshError::UnknownNode(4))
        );
    }
}
