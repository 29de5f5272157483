//! Interpolation and integration of fields through the local views and index sets of a basis.
use fenris_bases::basis::{taylor_hood, FunctionSpaceBasis, LagrangeBasis, LeafNode, SubspaceBasis};
use fenris_bases::element::{FiniteElement, ReferenceFiniteElement};
use fenris_bases::grid::{GridView, MeshGridView};
use fenris_bases::mesh::procedural::create_unit_square_uniform_tri_mesh_2d;
use fenris_bases::mesh::TriangleMesh2d;
use fenris_bases::quadrature;
use fenris_bases::quadrature::Quadrature;
use fenris_bases::traversal::for_each_bound_element;
use matrixcompare::assert_scalar_eq;
use nalgebra::Point2;

type TriangleGridView<'a> = MeshGridView<'a, f64, fenris_bases::connectivity::Tri3d2Connectivity>;

/// Computes the values of `f` at the Lagrange nodes of `leaf`, in the order of its shape functions.
fn nodal_values<F>(grid_view: &TriangleGridView, leaf: &LeafNode, f: F) -> Vec<f64>
where
    F: Fn(&Point2<f64>) -> f64,
{
    let element = grid_view.element(leaf.element()).unwrap();
    leaf.finite_element()
        .reference_nodes::<f64>()
        .iter()
        .map(|xi| f(&element.map_reference_coords(xi)))
        .collect()
}

/// Integrates the finite element function with the given nodal values of `leaf` over its element.
fn integrate_leaf(grid_view: &TriangleGridView, leaf: &LeafNode, nodal_values: &[f64]) -> f64 {
    let element = grid_view.element(leaf.element()).unwrap();
    let rule = quadrature::triangle::<f64>(3).unwrap();
    rule.integrate(|xi| {
        let mut phi = vec![0.0; leaf.size()];
        leaf.finite_element().populate_basis(&mut phi, xi);
        let u: f64 = phi.iter().zip(nodal_values).map(|(phi_j, u_j)| phi_j * u_j).sum();
        u * element.reference_jacobian(xi).determinant()
    })
}

fn unit_square(cells_per_dim: usize) -> TriangleMesh2d<f64> {
    create_unit_square_uniform_tri_mesh_2d(cells_per_dim)
}

#[test]
fn interpolated_quadratic_field_integrates_exactly() {
    let mesh = unit_square(4);
    let grid_view = MeshGridView::new(&mesh);
    let basis = LagrangeBasis::new(&grid_view, 2).unwrap();
    let f = |x: &Point2<f64>| x.x * x.y + x.x;

    let mut coefficients = vec![f64::NAN; basis.dimension()];
    for_each_bound_element(&basis, |local_view, local_index_set| {
        let leaf = local_view.tree().leaf().unwrap();
        for (j, value) in nodal_values(&grid_view, leaf, f).into_iter().enumerate() {
            let global = local_index_set.index(leaf.local_index(j)).as_flat().unwrap();
            coefficients[global] = value;
        }
    });
    assert!(coefficients.iter().all(|c| c.is_finite()));

    let mut integral = 0.0;
    for_each_bound_element(&basis, |local_view, local_index_set| {
        let leaf = local_view.tree().leaf().unwrap();
        let local_coefficients: Vec<_> = leaf
            .local_indices()
            .map(|i| coefficients[local_index_set.index(i).as_flat().unwrap()])
            .collect();
        integral += integrate_leaf(&grid_view, leaf, &local_coefficients);
    });

    // Integral of xy + x over the unit square
    assert_scalar_eq!(integral, 0.75, comp = abs, tol = 1e-12);
}

#[test]
fn taylor_hood_fields_interpolate_into_blocked_coefficients() {
    let mesh = unit_square(3);
    let grid_view = MeshGridView::new(&mesh);
    let basis = taylor_hood::<_, 2>(&grid_view).unwrap();

    // One block per child of the root, sized by the container descriptor
    let descriptor = basis.container_descriptor();
    let mut coefficients: Vec<Vec<f64>> = descriptor
        .children()
        .map(|block| vec![0.0; block.size()])
        .collect();
    assert_eq!(coefficients.len(), 2);
    assert_eq!(coefficients[0].len(), 2 * (16 + 33));
    assert_eq!(coefficients[1].len(), grid_view.size(2));

    let velocity_x = SubspaceBasis::new(&basis, &[0, 0]).unwrap();
    let velocity_y = SubspaceBasis::new(&basis, &[0, 1]).unwrap();
    let pressure = SubspaceBasis::new(&basis, &[1]).unwrap();
    let fields: [(&SubspaceBasis<_>, fn(&Point2<f64>) -> f64); 3] = [
        (&velocity_x, |x: &Point2<f64>| x.x),
        (&velocity_y, |x: &Point2<f64>| 2.0 * x.y),
        (&pressure, |x: &Point2<f64>| x.x + x.y - 1.0),
    ];

    for_each_bound_element(&basis, |local_view, local_index_set| {
        for (subspace, f) in &fields {
            let leaf = subspace.tree(local_view).leaf().unwrap();
            let indices = subspace.indices(local_view, local_index_set);
            for (index, value) in indices.iter().zip(nodal_values(&grid_view, leaf, f)) {
                coefficients[index[0]][index[1]] = value;
            }
        }
    });

    let mut integrals = [0.0; 3];
    for_each_bound_element(&basis, |local_view, local_index_set| {
        for (k, (subspace, _)) in fields.iter().enumerate() {
            let leaf = subspace.tree(local_view).leaf().unwrap();
            let local_coefficients: Vec<_> = subspace
                .indices(local_view, local_index_set)
                .iter()
                .map(|index| coefficients[index[0]][index[1]])
                .collect();
            integrals[k] += integrate_leaf(&grid_view, leaf, &local_coefficients);
        }
    });

    assert_scalar_eq!(integrals[0], 0.5, comp = abs, tol = 1e-12);
    assert_scalar_eq!(integrals[1], 1.0, comp = abs, tol = 1e-12);
    assert_scalar_eq!(integrals[2], 0.0, comp = abs, tol = 1e-12);
}
