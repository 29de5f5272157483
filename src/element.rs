//! Local finite elements: shape functions on the reference triangle and element geometry.
//!
//! These are the per-element building blocks consumed by the leaves of a basis tree. The
//! indexing machinery in [`crate::basis`] never evaluates shape functions itself, it only
//! hands out the [`LagrangeFiniteElement`] that evaluation code should use.
use crate::Real;
use nalgebra::{Matrix2, MatrixViewMut2xX, Point2, Scalar};
use serde::{Deserialize, Serialize};

mod triangle;

pub use triangle::*;

pub trait ReferenceFiniteElement<T>
where
    T: Scalar,
{
    /// Returns the number of nodes in the element.
    fn num_nodes(&self) -> usize;

    /// Evaluates each basis function at the given reference coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `basis_values` does not have exactly one entry per node.
    fn populate_basis(&self, basis_values: &mut [T], reference_coords: &Point2<T>);

    /// Populates the columns of `basis_gradients` with the reference gradients of
    /// each shape function.
    ///
    /// # Panics
    ///
    /// Panics if `basis_gradients` does not have exactly one column per node.
    fn populate_basis_gradients(&self, basis_gradients: MatrixViewMut2xX<T>, reference_coords: &Point2<T>);
}

pub trait FiniteElement<T>: ReferenceFiniteElement<T>
where
    T: Scalar,
{
    /// Compute the Jacobian of the transformation from the reference element to the given
    /// element at the given reference coordinates.
    fn reference_jacobian(&self, reference_coords: &Point2<T>) -> Matrix2<T>;

    /// Maps reference coordinates to physical coordinates in the element.
    fn map_reference_coords(&self, reference_coords: &Point2<T>) -> Point2<T>;

    /// The diameter of the finite element, i.e. the largest distance between any two
    /// points in the element.
    fn diameter(&self) -> T;
}

/// Lagrange shape functions on the reference triangle.
///
/// The reference triangle is defined by the corners (-1, -1), (1, -1), (-1, 1).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LagrangeFiniteElement {
    /// Linear shape functions associated with the three vertices.
    Linear,
    /// Quadratic shape functions associated with the three vertices, followed by the
    /// midpoints of the edges (0, 1), (1, 2) and (2, 0).
    Quadratic,
}

impl LagrangeFiniteElement {
    pub const SUPPORTED_ORDERS: &'static [usize] = &[1, 2];

    pub fn from_order(order: usize) -> Option<Self> {
        match order {
            1 => Some(Self::Linear),
            2 => Some(Self::Quadratic),
            _ => None,
        }
    }

    pub fn order(&self) -> usize {
        match self {
            Self::Linear => 1,
            Self::Quadratic => 2,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Self::Linear => 3,
            Self::Quadratic => 6,
        }
    }

    /// The Lagrange nodes in reference coordinates, in the order of the shape functions.
    pub fn reference_nodes<T: Real>(&self) -> Vec<Point2<T>> {
        match self {
            Self::Linear => Tri3d2Element::reference().vertices().to_vec(),
            Self::Quadratic => Tri6d2Element::reference().vertices().to_vec(),
        }
    }
}

impl<T> ReferenceFiniteElement<T> for LagrangeFiniteElement
where
    T: Real,
{
    fn num_nodes(&self) -> usize {
        self.size()
    }

    fn populate_basis(&self, basis_values: &mut [T], reference_coords: &Point2<T>) {
        match self {
            Self::Linear => Tri3d2Element::reference().populate_basis(basis_values, reference_coords),
            Self::Quadratic => Tri6d2Element::reference().populate_basis(basis_values, reference_coords),
        }
    }

    fn populate_basis_gradients(&self, basis_gradients: MatrixViewMut2xX<T>, reference_coords: &Point2<T>) {
        match self {
            Self::Linear => Tri3d2Element::reference().populate_basis_gradients(basis_gradients, reference_coords),
            Self::Quadratic => {
                Tri6d2Element::reference().populate_basis_gradients(basis_gradients, reference_coords)
            }
        }
    }
}
