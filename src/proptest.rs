//! Proptest strategies for meshes and elements.
use crate::element::Tri3d2Element;
use crate::mesh::procedural::create_rectangular_uniform_tri_mesh_2d;
use crate::mesh::TriangleMesh2d;
use ::proptest::prelude::*;
use nalgebra::{Point2, Vector2};
use std::cmp::max;

pub fn point2() -> impl Strategy<Value = Point2<f64>> {
    // Pick a reasonably small range to pick coordinates from,
    // otherwise we can easily get floating point numbers that are
    // so ridiculously large as to break anything we might want to do with them
    let range = -10.0..10.0;
    [range.clone(), range.clone()].prop_map(|[x, y]| Point2::new(x, y))
}

impl Arbitrary for Tri3d2Element<f64> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    /// Counter-clockwise, non-degenerate triangles.
    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        [point2(), point2(), point2()]
            .prop_filter_map("Triangle must not be degenerate", |[a, b, c]| {
                let twice_signed_area = (b - a).perp(&(c - a));
                if twice_signed_area.abs() < 1e-3 {
                    None
                } else if twice_signed_area > 0.0 {
                    Some(Tri3d2Element::from_vertices([a, b, c]))
                } else {
                    Some(Tri3d2Element::from_vertices([a, c, b]))
                }
            })
            .boxed()
    }
}

// Returns a strategy in which each value is a triplet (cells_per_unit, units_x, units_y)
// such that cells_per_unit^2 * units_x * units_y <= max_cells
fn rectangular_uniform_mesh_cell_distribution_strategy(
    max_cells: usize,
) -> impl Strategy<Value = (usize, usize, usize)> {
    let max_cells_per_unit = f64::floor(f64::sqrt(max_cells as f64)) as usize;
    (1..=max(1, max_cells_per_unit))
        .prop_flat_map(move |cells_per_unit| (Just(cells_per_unit), 0..=max_cells / (cells_per_unit * cells_per_unit)))
        .prop_flat_map(move |(cells_per_unit, units_x)| {
            let units_y_strategy = 0..=max_cells / (cells_per_unit * cells_per_unit * max(1, units_x));
            (Just(cells_per_unit), Just(units_x), units_y_strategy)
        })
}

/// Rectangular triangle meshes with at most `2 * max_cells` triangles.
///
/// The meshes may be empty.
pub fn rectangular_uniform_tri_mesh_strategy(
    unit_length: f64,
    max_cells: usize,
) -> impl Strategy<Value = TriangleMesh2d<f64>> {
    rectangular_uniform_mesh_cell_distribution_strategy(max_cells).prop_map(
        move |(cells_per_unit, units_x, units_y)| {
            create_rectangular_uniform_tri_mesh_2d(
                unit_length,
                units_x,
                units_y,
                cells_per_unit,
                &Vector2::new(0.0, 0.0),
            )
        },
    )
}
