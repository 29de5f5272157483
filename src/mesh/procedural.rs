//! Basic procedural mesh generation routines.
use crate::connectivity::Quad4d2Connectivity;
use crate::mesh::{QuadMesh2d, TriangleMesh2d};
use itertools::iproduct;
use nalgebra::{Point2, RealField, Vector2};

pub fn create_unit_square_uniform_quad_mesh_2d<T>(cells_per_dim: usize) -> QuadMesh2d<T>
where
    T: RealField,
{
    create_rectangular_uniform_quad_mesh_2d(T::one(), 1, 1, cells_per_dim, &Vector2::new(T::zero(), T::one()))
}

pub fn create_unit_square_uniform_tri_mesh_2d<T>(cells_per_dim: usize) -> TriangleMesh2d<T>
where
    T: RealField,
{
    create_unit_square_uniform_quad_mesh_2d(cells_per_dim).split_into_triangles()
}

/// Generates an axis-aligned rectangular uniform triangle mesh given a unit length,
/// dimensions as multipliers of the unit length and the number of cells per unit length.
///
/// Each square cell is split into two triangles.
pub fn create_rectangular_uniform_tri_mesh_2d<T>(
    unit_length: T,
    units_x: usize,
    units_y: usize,
    cells_per_unit: usize,
    top_left: &Vector2<T>,
) -> TriangleMesh2d<T>
where
    T: RealField,
{
    create_rectangular_uniform_quad_mesh_2d(unit_length, units_x, units_y, cells_per_unit, top_left)
        .split_into_triangles()
}

/// Generates an axis-aligned rectangular uniform quad mesh.
///
/// Vertices are numbered row by row, starting at `top_left` and moving in the positive x and
/// negative y directions. The mesh is empty if any of the counts is zero.
pub fn create_rectangular_uniform_quad_mesh_2d<T>(
    unit_length: T,
    units_x: usize,
    units_y: usize,
    cells_per_unit: usize,
    top_left: &Vector2<T>,
) -> QuadMesh2d<T>
where
    T: RealField,
{
    if cells_per_unit == 0 || units_x == 0 || units_y == 0 {
        return QuadMesh2d::from_vertices_and_connectivity(Vec::new(), Vec::new());
    }

    let from_usize = |n: usize| T::from_usize(n).expect("Must be able to fit usize in T");
    let cell_size = unit_length / from_usize(cells_per_unit);
    let (num_cells_x, num_cells_y) = (units_x * cells_per_unit, units_y * cells_per_unit);
    let vertex_index = |i: usize, j: usize| (num_cells_x + 1) * j + i;

    let vertices = iproduct!(0..=num_cells_y, 0..=num_cells_x)
        .map(|(j, i)| {
            let offset = Vector2::new(from_usize(i), -from_usize(j)) * cell_size.clone();
            Point2::from(top_left + offset)
        })
        .collect();

    // Counter-clockwise, starting at the bottom left corner of each cell
    let cells = iproduct!(0..num_cells_y, 0..num_cells_x)
        .map(|(j, i)| {
            Quad4d2Connectivity([
                vertex_index(i, j + 1),
                vertex_index(i + 1, j + 1),
                vertex_index(i + 1, j),
                vertex_index(i, j),
            ])
        })
        .collect();

    QuadMesh2d::from_vertices_and_connectivity(vertices, cells)
}
