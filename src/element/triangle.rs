use crate::element::{FiniteElement, ReferenceFiniteElement};
use crate::Real;
use itertools::Itertools;
use nalgebra::{
    distance, Matrix1x3, Matrix1x6, Matrix2, Matrix2x3, Matrix2x6, MatrixViewMut2xX, OPoint, Point2, Scalar,
    Vector2,
};
use numeric_literals::replace_float_literals;

/// A finite element representing linear basis functions on a triangle, in two dimensions.
///
/// The reference element is chosen to be the triangle defined by the corners
/// (-1, -1), (1, -1), (-1, 1).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tri3d2Element<T>
where
    T: Scalar,
{
    vertices: [Point2<T>; 3],
}

impl<T> Tri3d2Element<T>
where
    T: Scalar,
{
    pub fn from_vertices(vertices: [Point2<T>; 3]) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point2<T>; 3] {
        &self.vertices
    }
}

impl<T> Tri3d2Element<T>
where
    T: Real,
{
    #[replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn reference() -> Self {
        Self::from_vertices([Point2::new(-1.0, -1.0), Point2::new(1.0, -1.0), Point2::new(-1.0, 1.0)])
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn evaluate_basis(&self, xi: &Point2<T>) -> Matrix1x3<T> {
        Matrix1x3::from_row_slice(&[
            -0.5 * xi.x - 0.5 * xi.y,
            0.5 * xi.x + 0.5,
            0.5 * xi.y + 0.5
        ])
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn gradients(&self, _: &Point2<T>) -> Matrix2x3<T> {
        Matrix2x3::from_columns(&[
            Vector2::new(-0.5, -0.5),
            Vector2::new(0.5, 0.0),
            Vector2::new(0.0, 0.5)
        ])
    }
}

impl<T> ReferenceFiniteElement<T> for Tri3d2Element<T>
where
    T: Real,
{
    fn num_nodes(&self) -> usize {
        3
    }

    fn populate_basis(&self, basis_values: &mut [T], reference_coords: &Point2<T>) {
        basis_values.copy_from_slice(self.evaluate_basis(reference_coords).as_slice());
    }

    fn populate_basis_gradients(&self, mut basis_gradients: MatrixViewMut2xX<T>, reference_coords: &Point2<T>) {
        basis_gradients.copy_from(&self.gradients(reference_coords));
    }
}

impl<T> FiniteElement<T> for Tri3d2Element<T>
where
    T: Real,
{
    #[allow(non_snake_case)]
    fn reference_jacobian(&self, xi: &Point2<T>) -> Matrix2<T> {
        let X: Matrix2x3<T> = Matrix2x3::from_fn(|i, j| self.vertices[j][i]);
        let G = self.gradients(xi);
        X * G.transpose()
    }

    #[allow(non_snake_case)]
    fn map_reference_coords(&self, xi: &Point2<T>) -> Point2<T> {
        let X: Matrix2x3<T> = Matrix2x3::from_fn(|i, j| self.vertices[j][i]);
        let N = self.evaluate_basis(xi);
        OPoint::from(X * N.transpose())
    }

    fn diameter(&self) -> T {
        self.vertices
            .iter()
            .tuple_combinations()
            .map(|(x, y)| distance(x, y))
            .fold(T::zero(), |a, b| a.max(b))
    }
}

/// A finite element representing quadratic basis functions on a triangle, in two dimensions.
///
/// Nodes 0, 1 and 2 are the vertices, nodes 3, 4 and 5 the midpoints of the
/// edges (0, 1), (1, 2) and (2, 0) respectively.
///
/// ```text
/// 2
/// |`\
/// |  `\
/// 5    `4
/// |      `\
/// |        `\
/// 0-----3----1
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tri6d2Element<T>
where
    T: Scalar,
{
    vertices: [Point2<T>; 6],
    tri3: Tri3d2Element<T>,
}

impl<T> Tri6d2Element<T>
where
    T: Scalar,
{
    pub fn from_vertices(vertices: [Point2<T>; 6]) -> Self {
        let v = &vertices;
        let tri = [v[0].clone(), v[1].clone(), v[2].clone()];
        Self {
            vertices,
            tri3: Tri3d2Element::from_vertices(tri),
        }
    }

    pub fn vertices(&self) -> &[Point2<T>; 6] {
        &self.vertices
    }
}

impl<'a, T> From<&'a Tri3d2Element<T>> for Tri6d2Element<T>
where
    T: Real,
{
    #[replace_float_literals(T::from_f64(literal).unwrap())]
    fn from(tri3: &'a Tri3d2Element<T>) -> Self {
        let midpoint = |a: &Point2<T>, b: &Point2<T>| Point2::from((a.coords + b.coords) * 0.5);

        let [a, b, c] = tri3.vertices;
        Self::from_vertices([a, b, c, midpoint(&a, &b), midpoint(&b, &c), midpoint(&c, &a)])
    }
}

impl<T> Tri6d2Element<T>
where
    T: Real,
{
    pub fn reference() -> Self {
        Self::from(&Tri3d2Element::reference())
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn evaluate_basis(&self, xi: &Point2<T>) -> Matrix1x6<T> {
        // The quadratic shape functions are products of the linear ones
        let psi = self.tri3.evaluate_basis(xi);
        Matrix1x6::from_row_slice(&[
            psi[0] * (2.0 * psi[0] - 1.0),
            psi[1] * (2.0 * psi[1] - 1.0),
            psi[2] * (2.0 * psi[2] - 1.0),
            4.0 * psi[0] * psi[1],
            4.0 * psi[1] * psi[2],
            4.0 * psi[0] * psi[2],
        ])
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn gradients(&self, xi: &Point2<T>) -> Matrix2x6<T> {
        let psi = self.tri3.evaluate_basis(xi);
        let g = self.tri3.gradients(xi);

        // Gradient of vertex node i
        let vertex_gradient = |i: usize| g.column(i) * (4.0 * psi[i] - 1.0);

        // Gradient of edge node on the edge between vertex i and j
        let edge_gradient = |i: usize, j: usize|
            g.column(i) * (4.0 * psi[j]) + g.column(j) * (4.0 * psi[i]);

        Matrix2x6::from_columns(&[
            vertex_gradient(0),
            vertex_gradient(1),
            vertex_gradient(2),
            edge_gradient(0, 1),
            edge_gradient(1, 2),
            edge_gradient(0, 2)
        ])
    }
}

impl<T> ReferenceFiniteElement<T> for Tri6d2Element<T>
where
    T: Real,
{
    fn num_nodes(&self) -> usize {
        6
    }

    fn populate_basis(&self, basis_values: &mut [T], reference_coords: &Point2<T>) {
        basis_values.copy_from_slice(self.evaluate_basis(reference_coords).as_slice());
    }

    fn populate_basis_gradients(&self, mut basis_gradients: MatrixViewMut2xX<T>, reference_coords: &Point2<T>) {
        basis_gradients.copy_from(&self.gradients(reference_coords));
    }
}

impl<T> FiniteElement<T> for Tri6d2Element<T>
where
    T: Real,
{
    fn reference_jacobian(&self, xi: &Point2<T>) -> Matrix2<T> {
        self.tri3.reference_jacobian(xi)
    }

    fn map_reference_coords(&self, xi: &Point2<T>) -> Point2<T> {
        self.tri3.map_reference_coords(xi)
    }

    fn diameter(&self) -> T {
        self.tri3.diameter()
    }
}
