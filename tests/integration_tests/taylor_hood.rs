use fenris_bases::basis::{taylor_hood, FunctionSpaceBasis};
use fenris_bases::grid::{GridView, MeshGridView};
use fenris_bases::proptest::rectangular_uniform_tri_mesh_strategy;
use fenris_bases::traversal::{check_global_indices, for_each_bound_element};
use proptest::prelude::*;

proptest! {
    #[test]
    fn taylor_hood_numbering_covers_all_degrees_of_freedom(mesh in rectangular_uniform_tri_mesh_strategy(1.0, 16)) {
        let grid_view = MeshGridView::new(&mesh);
        let basis = taylor_hood::<_, 2>(&grid_view).unwrap();
        let num_vertices = grid_view.size(2);
        let num_edges = grid_view.size(1);

        prop_assert_eq!(basis.dimension(), 2 * (num_vertices + num_edges) + num_vertices);
        prop_assert_eq!(basis.size(&[0]), 2 * (num_vertices + num_edges));
        prop_assert_eq!(basis.size(&[1]), num_vertices);

        let coverage = check_global_indices(&basis).unwrap();
        prop_assert_eq!(coverage.num_local_indices, 15 * grid_view.size(0));
    }

    #[test]
    fn taylor_hood_local_offsets_follow_preceding_children(mesh in rectangular_uniform_tri_mesh_strategy(1.0, 16)) {
        let grid_view = MeshGridView::new(&mesh);
        let basis = taylor_hood::<_, 2>(&grid_view).unwrap();

        let mut visited = 0;
        for_each_bound_element(&basis, |local_view, local_index_set| {
            visited += 1;
            let tree = local_view.tree();
            let velocity = &tree.children()[0];
            let pressure = tree.children()[1].leaf().unwrap();

            assert_eq!(velocity.size(), 12);
            assert_eq!(pressure.offset(), velocity.size());
            for (c, component) in velocity.children().iter().enumerate() {
                let leaf = component.leaf().unwrap();
                assert_eq!((leaf.offset(), leaf.stride()), (c, 2));
            }

            // Velocity indices are in the first block, pressure indices in the second
            for i in 0..local_index_set.size() {
                let index = local_index_set.index(i);
                assert_eq!(index.len(), 2);
                assert_eq!(index[0], usize::from(i >= 12));
            }
        });
        prop_assert_eq!(visited, grid_view.size(0));
    }

    #[test]
    fn rebinding_local_views_reproduces_indices(mesh in rectangular_uniform_tri_mesh_strategy(1.0, 9)) {
        let grid_view = MeshGridView::new(&mesh);
        let basis = taylor_hood::<_, 2>(&grid_view).unwrap();

        let mut first_pass = Vec::new();
        for_each_bound_element(&basis, |_, local_index_set| first_pass.push(local_index_set.indices().to_vec()));

        // Traverse in reverse, reusing a single view for all elements
        let mut local_view = basis.local_view();
        let mut local_index_set = basis.index_set().local_index_set();
        for element in basis.elements().iter().rev() {
            local_view.bind(element);
            local_index_set.bind(&local_view);
            prop_assert_eq!(local_index_set.indices(), first_pass[element.index()].as_slice());
            local_index_set.unbind();
            local_view.unbind();
        }
    }
}
