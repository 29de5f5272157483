use crate::two_triangle_mesh;
use fenris_bases::connectivity::Tri3d2Connectivity;
use fenris_bases::basis::{
    taylor_hood, BasisDescription, BlockedInterleaved, BlockedLexicographic, CompositeBasis, FlatInterleaved,
    FlatLexicographic, FunctionSpaceBasis, LagrangeBasis, LocalNode, PowerBasis,
};
use fenris_bases::container_descriptors::ContainerDescriptor;
use fenris_bases::grid::MeshGridView;
use fenris_bases::mesh::procedural::create_unit_square_uniform_tri_mesh_2d;
use fenris_bases::mesh::TriangleMesh2d;
use fenris_bases::multi_index::MultiIndex;
use fenris_bases::traversal::{
    check_global_indices, flatten_index, for_each_bound_element, par_for_each_bound_element,
    try_for_each_bound_element, IndexCoverage, IndexCoverageError, IndexFlattener,
};
use nalgebra::Point2;
use std::sync::Mutex;

/// Wraps a basis and misreports its dimension and maximum local size.
struct Misreporting<B> {
    basis: B,
    extra_dofs: usize,
    max_node_size: Option<usize>,
}

impl<B: FunctionSpaceBasis> FunctionSpaceBasis for Misreporting<B> {
    type GridView = B::GridView;

    const MULTI_INDEX_MAX_SIZE: usize = B::MULTI_INDEX_MAX_SIZE;

    fn grid_view(&self) -> &Self::GridView {
        self.basis.grid_view()
    }

    fn dimension(&self) -> usize {
        self.basis.dimension() + self.extra_dofs
    }

    fn size(&self, prefix: &[usize]) -> usize {
        if prefix.is_empty() {
            self.dimension()
        } else {
            self.basis.size(prefix)
        }
    }

    fn max_node_size(&self) -> usize {
        self.max_node_size
            .unwrap_or_else(|| self.basis.max_node_size())
    }

    fn container_descriptor(&self) -> ContainerDescriptor {
        ContainerDescriptor::Unknown
    }

    fn description(&self) -> BasisDescription {
        self.basis.description()
    }

    fn create_node(&self) -> LocalNode {
        self.basis.create_node()
    }

    fn bind_node(&self, node: &mut LocalNode, element: usize, offset: usize, stride: usize) {
        self.basis.bind_node(node, element, offset, stride)
    }

    fn indices(&self, node: &LocalNode, indices: &mut [MultiIndex]) {
        self.basis.indices(node, indices)
    }
}

#[test]
fn global_indices_of_two_triangle_bases_cover_numbering() {
    let mesh = two_triangle_mesh();
    let grid_view = MeshGridView::new(&mesh);
    let p1 = LagrangeBasis::new(&grid_view, 1).unwrap();
    let p2 = LagrangeBasis::new(&grid_view, 2).unwrap();

    let coverage = |dimension, num_local_indices, max_local_size| IndexCoverage {
        dimension,
        num_local_indices,
        max_local_size,
    };

    assert_eq!(check_global_indices(&p1), Ok(coverage(4, 6, 3)));
    assert_eq!(check_global_indices(&p2), Ok(coverage(9, 12, 6)));
    assert_eq!(
        check_global_indices(&PowerBasis::<BlockedLexicographic, _, 2>::new(&p1)),
        Ok(coverage(8, 12, 6))
    );
    assert_eq!(
        check_global_indices(&PowerBasis::<BlockedInterleaved, _, 2>::new(&p1)),
        Ok(coverage(8, 12, 6))
    );
    assert_eq!(
        check_global_indices(&PowerBasis::<FlatLexicographic, _, 3>::new(&p2)),
        Ok(coverage(27, 36, 18))
    );
    assert_eq!(
        check_global_indices(&PowerBasis::<FlatInterleaved, _, 3>::new(&p2)),
        Ok(coverage(27, 36, 18))
    );
    assert_eq!(
        check_global_indices(&CompositeBasis::<FlatLexicographic, _>::new((&p1, &p2)).unwrap()),
        Ok(coverage(13, 18, 9))
    );
    assert_eq!(
        check_global_indices(&CompositeBasis::<BlockedLexicographic, _>::new((&p2, &p1, &p2)).unwrap()),
        Ok(coverage(22, 30, 15))
    );
    assert_eq!(
        check_global_indices(&taylor_hood::<_, 2>(&grid_view).unwrap()),
        Ok(coverage(22, 30, 15))
    );
}

#[test]
fn global_indices_of_nested_bases_cover_numbering() {
    let mesh = create_unit_square_uniform_tri_mesh_2d::<f64>(3);
    let grid_view = MeshGridView::new(&mesh);
    let p1 = LagrangeBasis::new(&grid_view, 1).unwrap();
    let p2 = LagrangeBasis::new(&grid_view, 2).unwrap();

    let inner = PowerBasis::<BlockedInterleaved, _, 2>::new(&p2);
    let outer = PowerBasis::<FlatLexicographic, _, 2>::new(&inner);
    let coverage = check_global_indices(&outer).unwrap();
    assert_eq!(coverage.dimension, 4 * p2.dimension());
    assert_eq!(coverage.max_local_size, 24);

    let mixed = CompositeBasis::<BlockedLexicographic, _>::new((
        PowerBasis::<BlockedLexicographic, _, 2>::new(&p2),
        CompositeBasis::<FlatLexicographic, _>::new((&p1, &p1)).unwrap(),
    ))
    .unwrap();
    let coverage = check_global_indices(&mixed).unwrap();
    assert_eq!(coverage.dimension, 2 * p2.dimension() + 2 * p1.dimension());
    assert_eq!(coverage.num_local_indices, 18 * 18);
}

#[test]
fn unreferenced_mesh_vertices_do_not_become_degrees_of_freedom() {
    let mesh = TriangleMesh2d::from_vertices_and_connectivity(
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
        ],
        vec![Tri3d2Connectivity([0, 1, 2])],
    );
    let grid_view = MeshGridView::new(&mesh);
    let p1 = LagrangeBasis::new(&grid_view, 1).unwrap();
    let basis = taylor_hood::<_, 2>(&grid_view).unwrap();

    assert_eq!(p1.dimension(), 3);
    assert_eq!(basis.dimension(), 2 * (3 + 3) + 3);
    assert_eq!(check_global_indices(&p1).map(|c| c.dimension), Ok(3));
    assert_eq!(
        check_global_indices(&basis),
        Ok(IndexCoverage {
            dimension: 15,
            num_local_indices: 15,
            max_local_size: 15
        })
    );
}

#[test]
fn check_global_indices_reports_uncovered_indices() {
    let mesh = two_triangle_mesh();
    let grid_view = MeshGridView::new(&mesh);
    let basis = Misreporting {
        basis: LagrangeBasis::new(&grid_view, 1).unwrap(),
        extra_dofs: 2,
        max_node_size: None,
    };
    assert_eq!(
        check_global_indices(&basis),
        Err(IndexCoverageError::Uncovered {
            missing: vec![4, 5],
            dimension: 6
        })
    );
}

#[test]
fn check_global_indices_reports_too_large_elements() {
    let mesh = two_triangle_mesh();
    let grid_view = MeshGridView::new(&mesh);
    let basis = Misreporting {
        basis: LagrangeBasis::new(&grid_view, 1).unwrap(),
        extra_dofs: 0,
        max_node_size: Some(2),
    };
    let error = check_global_indices(&basis).unwrap_err();
    assert_eq!(
        error,
        IndexCoverageError::LocalSizeExceedsMaximum {
            element: 0,
            size: 3,
            max_size: 2
        }
    );
    assert_eq!(
        error.to_string(),
        "Element 0 has 3 local degrees of freedom, but the maximum is 2."
    );
}

#[test]
fn flatten_index_counts_preceding_indices() {
    let mesh = two_triangle_mesh();
    let grid_view = MeshGridView::new(&mesh);
    let p1 = LagrangeBasis::new(&grid_view, 1).unwrap();
    let taylor_hood = taylor_hood::<_, 2>(&grid_view).unwrap();
    let interleaved = PowerBasis::<BlockedInterleaved, _, 2>::new(&p1);

    assert_eq!(flatten_index(&p1, &[3]), Some(3));
    assert_eq!(flatten_index(&p1, &[4]), None);
    assert_eq!(flatten_index(&taylor_hood, &[0, 17]), Some(17));
    assert_eq!(flatten_index(&taylor_hood, &[1, 2]), Some(20));
    assert_eq!(flatten_index(&taylor_hood, &[0, 18]), None);
    assert_eq!(flatten_index(&taylor_hood, &[2, 0]), None);
    // Incomplete multi-indices do not address a degree of freedom
    assert_eq!(flatten_index(&taylor_hood, &[1]), None);
    assert_eq!(flatten_index(&taylor_hood, &[1, 0, 0]), None);
    assert_eq!(flatten_index(&interleaved, &[2, 1]), Some(5));
}

#[test]
fn index_flattener_enumerates_indices_in_lexicographic_order() {
    let mesh = create_unit_square_uniform_tri_mesh_2d::<f64>(3);
    let grid_view = MeshGridView::new(&mesh);
    let p2 = LagrangeBasis::new(&grid_view, 2).unwrap();
    let interleaved = PowerBasis::<BlockedInterleaved, _, 2>::new(&p2);
    let taylor_hood = taylor_hood::<_, 2>(&grid_view).unwrap();

    fn check<B: FunctionSpaceBasis>(basis: &B) {
        let mut all_indices = Vec::new();
        for_each_bound_element(basis, |_, local_index_set| {
            all_indices.extend_from_slice(local_index_set.indices())
        });
        all_indices.sort();
        all_indices.dedup();
        assert_eq!(all_indices.len(), basis.dimension());

        let mut flattener = IndexFlattener::new(basis);
        for (i, index) in all_indices.iter().enumerate() {
            assert_eq!(flattener.flatten(index), Some(i));
        }
        let last = all_indices.last().unwrap();
        assert_eq!(flatten_index(basis, last), Some(basis.dimension() - 1));
    }

    check(&interleaved);
    check(&taylor_hood);
}

#[test]
fn parallel_traversal_visits_same_elements_as_sequential() {
    let mesh = create_unit_square_uniform_tri_mesh_2d::<f64>(4);
    let grid_view = MeshGridView::new(&mesh);
    let basis = taylor_hood::<_, 2>(&grid_view).unwrap();

    let mut sequential = Vec::new();
    for_each_bound_element(&basis, |view, local_index_set| {
        let element = view.element().unwrap().index();
        sequential.push((element, local_index_set.indices().to_vec()));
    });

    let parallel = Mutex::new(Vec::new());
    par_for_each_bound_element(&basis, |view, local_index_set| {
        let element = view.element().unwrap().index();
        parallel
            .lock()
            .unwrap()
            .push((element, local_index_set.indices().to_vec()));
    });
    let mut parallel = parallel.into_inner().unwrap();
    parallel.sort();

    assert_eq!(sequential.len(), 32);
    assert_eq!(parallel, sequential);
}

#[test]
fn try_for_each_bound_element_stops_at_first_error() {
    let mesh = create_unit_square_uniform_tri_mesh_2d::<f64>(2);
    let grid_view = MeshGridView::new(&mesh);
    let basis = LagrangeBasis::new(&grid_view, 2).unwrap();

    let mut visited = Vec::new();
    let result = try_for_each_bound_element(&basis, |view, _| {
        let element = view.element().unwrap().index();
        visited.push(element);
        if element == 3 {
            Err(element)
        } else {
            Ok(())
        }
    });
    assert_eq!(result, Err(3));
    assert_eq!(visited, vec![0, 1, 2, 3]);
}
