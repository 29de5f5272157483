use fenris_bases::connectivity::{Connectivity, Quad4d2Connectivity, Segment2d2Connectivity, Tri3d2Connectivity};
use fenris_bases::error::BasisError;
use fenris_bases::mesh::procedural::{create_rectangular_uniform_tri_mesh_2d, create_unit_square_uniform_quad_mesh_2d};
use fenris_bases::mesh::TriangleMesh2d;
use nalgebra::{Point2, Vector2};

#[test]
fn tri3d2_faces_connect_consecutive_vertices() {
    let tri = Tri3d2Connectivity([4, 7, 9]);
    assert_eq!(tri.num_faces(), 3);
    assert_eq!(tri.get_face_connectivity(0), Some(Segment2d2Connectivity([4, 7])));
    assert_eq!(tri.get_face_connectivity(1), Some(Segment2d2Connectivity([7, 9])));
    assert_eq!(tri.get_face_connectivity(2), Some(Segment2d2Connectivity([9, 4])));
    assert_eq!(tri.get_face_connectivity(3), None);
}

#[test]
fn quad_split_preserves_orientation() {
    let quad = Quad4d2Connectivity([0, 1, 2, 3]);
    assert_eq!(
        quad.split_into_triangles(),
        [Tri3d2Connectivity([0, 1, 2]), Tri3d2Connectivity([0, 2, 3])]
    );
}

#[test]
fn unit_square_quad_mesh() {
    let mesh = create_unit_square_uniform_quad_mesh_2d::<f64>(2);
    assert_eq!(mesh.vertices().len(), 9);
    assert_eq!(mesh.connectivity().len(), 4);
    assert_eq!(mesh.vertices()[0], Point2::new(0.0, 1.0));
    assert_eq!(mesh.vertices()[8], Point2::new(1.0, 0.0));
}

#[test]
fn rectangular_tri_mesh_cell_counts() {
    let mesh = create_rectangular_uniform_tri_mesh_2d(1.0, 3, 2, 2, &Vector2::new(0.0, 0.0));
    // 6 x 4 squares, each split into two triangles
    assert_eq!(mesh.connectivity().len(), 48);
    assert_eq!(mesh.vertices().len(), 7 * 5);

    let empty = create_rectangular_uniform_tri_mesh_2d(1.0, 0, 2, 2, &Vector2::new(0.0, 0.0));
    assert!(empty.connectivity().is_empty());
    assert!(empty.vertices().is_empty());
}

#[test]
fn triangles_of_procedural_mesh_are_counter_clockwise() {
    let mesh = create_rectangular_uniform_tri_mesh_2d(1.0, 2, 1, 3, &Vector2::new(-1.0, 0.5));
    for Tri3d2Connectivity([a, b, c]) in mesh.connectivity() {
        let [a, b, c] = [a, b, c].map(|&i| mesh.vertices()[i]);
        assert!((b - a).perp(&(c - a)) > 0.0);
    }
}

#[test]
fn try_from_vertices_and_connectivity_rejects_invalid_vertices() {
    let vertices = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)];
    let valid = TriangleMesh2d::try_from_vertices_and_connectivity(vertices.clone(), vec![Tri3d2Connectivity([0, 1, 2])]);
    assert!(valid.is_ok());

    let invalid = TriangleMesh2d::try_from_vertices_and_connectivity(
        vertices,
        vec![Tri3d2Connectivity([0, 1, 2]), Tri3d2Connectivity([1, 3, 2])],
    );
    assert_eq!(
        invalid,
        Err(BasisError::InvalidConnectivity {
            cell_index: 1,
            vertex_index: 3,
            num_vertices: 3
        })
    );
}

#[test]
fn mesh_serde_roundtrip() {
    let mesh = create_rectangular_uniform_tri_mesh_2d(1.0, 1, 1, 1, &Vector2::new(0.0, 1.0));
    let json = serde_json::to_string(&mesh).unwrap();
    let deserialized: TriangleMesh2d<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, mesh);
}

#[test]
fn translate_moves_all_vertices() {
    let mut mesh = create_rectangular_uniform_tri_mesh_2d(1.0, 1, 1, 1, &Vector2::new(0.0, 1.0));
    mesh.translate(&Vector2::new(2.0, -1.0));
    assert_eq!(mesh.vertices()[0], Point2::new(2.0, 0.0));
    assert_eq!(mesh.cell_vertex_indices(0), Some(&[2, 3, 1][..]));
    assert_eq!(mesh.cell_vertex_indices(2), None);
}
