//! Errors reported when constructing grids and bases.
use std::error::Error;
use std::fmt;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasisError {
    /// Only Lagrange bases of the given orders are available.
    UnsupportedLagrangeOrder { order: usize, supported: &'static [usize] },
    /// The children of a composite basis must be defined on the very same grid view instance.
    MismatchedGridViews { child_index: usize },
    /// The grid has a different dimension than what the basis was instantiated for.
    DimensionMismatch { expected: usize, actual: usize },
    /// The path does not designate a node in the basis tree.
    InvalidTreePath { path: Vec<usize> },
    /// A cell references a vertex that does not exist.
    InvalidConnectivity {
        cell_index: usize,
        vertex_index: usize,
        num_vertices: usize,
    },
    /// The grid view contains cells whose reference element is not supported by the basis.
    UnsupportedCell { element_index: usize, num_vertices: usize },
}

impl Display for BasisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasisError::UnsupportedLagrangeOrder { order, supported } => {
                write!(f, "Lagrange basis of order {order} is not supported (supported orders: {supported:?}).")
            }
            BasisError::MismatchedGridViews { child_index } => {
                write!(f, "Child {child_index} of composite basis is defined on a different grid view than child 0.")
            }
            BasisError::DimensionMismatch { expected, actual } => {
                write!(f, "Expected grid of dimension {expected}, but grid has dimension {actual}.")
            }
            BasisError::InvalidTreePath { path } => {
                write!(f, "Path {path:?} does not designate a node in the basis tree.")
            }
            BasisError::InvalidConnectivity {
                cell_index,
                vertex_index,
                num_vertices,
            } => write!(
                f,
                "Cell {cell_index} references vertex {vertex_index}, but the mesh only has {num_vertices} vertices."
            ),
            BasisError::UnsupportedCell {
                element_index,
                num_vertices,
            } => write!(
                f,
                "Element {element_index} has {num_vertices} vertices, but only triangles are supported."
            ),
        }
    }
}

impl Error for BasisError {}
