//! Grid views: the read-only entity structure of a discretized domain.
//!
//! A [`GridView`] exposes the entities of a conforming grid, organized by codimension.
//! Codimension 0 entities are the elements (cells), codimension `dimension()` entities
//! are the vertices. Entities of each codimension are numbered consecutively starting
//! from zero, so that an entity is fully identified by its codimension and index.
use crate::connectivity::{Connectivity, Tri3d2Connectivity};
use crate::element::Tri3d2Element;
use crate::mesh::Mesh2d;
use crate::Real;
use log::debug;
use nalgebra::Scalar;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use std::ops::Range;

/// A handle to an entity of a grid.
///
/// Entities are owned by the grid. The handle only stores the codimension and the index
/// of the entity among all entities of the same codimension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity {
    codim: usize,
    index: usize,
}

impl Entity {
    pub fn new(codim: usize, index: usize) -> Self {
        Self { codim, index }
    }

    /// An entity of codimension zero.
    pub fn element(index: usize) -> Self {
        Self::new(0, index)
    }

    pub fn codim(&self) -> usize {
        self.codim
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Read-only view of the entities of a conforming grid.
pub trait GridView {
    /// The topological dimension of the elements.
    fn dimension(&self) -> usize;

    /// The number of entities of the given codimension.
    fn size(&self, codim: usize) -> usize;

    /// The number of subentities of the given codimension contained in the element.
    fn num_sub_entities(&self, element: usize, codim: usize) -> usize;

    /// The index of the `local_index`-th subentity of the given codimension of the element.
    ///
    /// The local numbering of subentities follows the reference element of the cell.
    fn sub_entity(&self, element: usize, codim: usize, local_index: usize) -> usize;

    fn contains(&self, entity: &Entity) -> bool {
        entity.codim() <= self.dimension() && entity.index() < self.size(entity.codim())
    }

    fn entities(&self, codim: usize) -> Entities {
        Entities {
            codim,
            indices: 0..self.size(codim),
        }
    }

    fn elements(&self) -> Entities {
        self.entities(0)
    }
}

impl<'a, G: GridView> GridView for &'a G {
    fn dimension(&self) -> usize {
        G::dimension(self)
    }

    fn size(&self, codim: usize) -> usize {
        G::size(self, codim)
    }

    fn num_sub_entities(&self, element: usize, codim: usize) -> usize {
        G::num_sub_entities(self, element, codim)
    }

    fn sub_entity(&self, element: usize, codim: usize, local_index: usize) -> usize {
        G::sub_entity(self, element, codim, local_index)
    }
}

/// Iterator over all entities of a fixed codimension.
#[derive(Debug, Clone)]
pub struct Entities {
    codim: usize,
    indices: Range<usize>,
}

impl Iterator for Entities {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        let codim = self.codim;
        self.indices.next().map(|index| Entity::new(codim, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl DoubleEndedIterator for Entities {
    fn next_back(&mut self) -> Option<Self::Item> {
        let codim = self.codim;
        self.indices.next_back().map(|index| Entity::new(codim, index))
    }
}

impl ExactSizeIterator for Entities {}

impl FusedIterator for Entities {}

/// A grid view of a two-dimensional mesh.
///
/// Codimension 1 entities are the faces (edges) of the cells. Faces shared by two cells are
/// only counted once, and faces are numbered in the order of their first appearance when
/// traversing the faces of each cell in order.
///
/// Codimension 2 entities are the mesh vertices referenced by at least one cell. They keep
/// the relative order of the mesh vertices, so a mesh without unreferenced vertices has the
/// same vertex numbering as its grid view.
#[derive(Debug, Clone)]
pub struct MeshGridView<'a, T, C>
where
    T: Scalar,
{
    mesh: &'a Mesh2d<T, C>,
    num_faces: usize,
    cell_face_offsets: Vec<usize>,
    cell_faces: Vec<usize>,
    num_vertices: usize,
    vertex_labels: Vec<Option<usize>>,
}

impl<'a, T, C> MeshGridView<'a, T, C>
where
    T: Scalar,
    C: Connectivity,
{
    pub fn new(mesh: &'a Mesh2d<T, C>) -> Self {
        let mut face_labels = FxHashMap::default();
        let mut cell_face_offsets = Vec::with_capacity(mesh.connectivity().len() + 1);
        let mut cell_faces = Vec::new();
        let mut sorted_face_vertices = Vec::new();

        cell_face_offsets.push(0);
        for cell in mesh.connectivity() {
            for local_index in 0..cell.num_faces() {
                let face = cell
                    .get_face_connectivity(local_index)
                    .expect("Local face index is in bounds");
                sorted_face_vertices.clear();
                sorted_face_vertices.extend_from_slice(face.vertex_indices());
                sorted_face_vertices.sort_unstable();

                let next_label = face_labels.len();
                let label = *face_labels
                    .entry(sorted_face_vertices.clone())
                    .or_insert(next_label);
                cell_faces.push(label);
            }
            cell_face_offsets.push(cell_faces.len());
        }

        let mut vertex_labels = vec![None; mesh.vertices().len()];
        for cell in mesh.connectivity() {
            for &v in cell.vertex_indices() {
                vertex_labels[v] = Some(0);
            }
        }
        let mut num_vertices = 0;
        for label in vertex_labels.iter_mut().flatten() {
            *label = num_vertices;
            num_vertices += 1;
        }

        debug!(
            "Constructed grid view with {} cells, {} faces and {} vertices ({} unreferenced).",
            mesh.connectivity().len(),
            face_labels.len(),
            num_vertices,
            mesh.vertices().len() - num_vertices
        );

        Self {
            mesh,
            num_faces: face_labels.len(),
            cell_face_offsets,
            cell_faces,
            num_vertices,
            vertex_labels,
        }
    }

    /// The codimension 2 index of the given mesh vertex, or `None` if no cell references it.
    pub fn vertex_index(&self, mesh_vertex: usize) -> Option<usize> {
        self.vertex_labels.get(mesh_vertex).copied().flatten()
    }

    pub fn mesh(&self) -> &'a Mesh2d<T, C> {
        self.mesh
    }

    fn faces_of_cell(&self, element: usize) -> &[usize] {
        &self.cell_faces[self.cell_face_offsets[element]..self.cell_face_offsets[element + 1]]
    }
}

impl<'a, T, C> GridView for MeshGridView<'a, T, C>
where
    T: Scalar,
    C: Connectivity,
{
    fn dimension(&self) -> usize {
        2
    }

    fn size(&self, codim: usize) -> usize {
        match codim {
            0 => self.mesh.connectivity().len(),
            1 => self.num_faces,
            2 => self.num_vertices,
            _ => 0,
        }
    }

    fn num_sub_entities(&self, element: usize, codim: usize) -> usize {
        match codim {
            0 => 1,
            1 => self.faces_of_cell(element).len(),
            2 => self.mesh.connectivity()[element].vertex_indices().len(),
            _ => 0,
        }
    }

    fn sub_entity(&self, element: usize, codim: usize, local_index: usize) -> usize {
        match codim {
            0 => {
                debug_assert_eq!(local_index, 0);
                element
            }
            1 => self.faces_of_cell(element)[local_index],
            2 => {
                let mesh_vertex = self.mesh.connectivity()[element].vertex_indices()[local_index];
                self.vertex_labels[mesh_vertex].expect("Vertices of cells are always labeled")
            }
            _ => panic!("Grid view of dimension 2 has no entities of codimension {codim}."),
        }
    }
}

impl<'a, T> MeshGridView<'a, T, Tri3d2Connectivity>
where
    T: Real,
{
    /// The geometry of the given element.
    ///
    /// The element maps reference coordinates to physical coordinates, and its Jacobian
    /// determinant gives the integration element.
    pub fn element(&self, index: usize) -> Option<Tri3d2Element<T>> {
        let Tri3d2Connectivity(indices) = self.mesh.connectivity().get(index)?;
        let vertices = self.mesh.vertices();
        Some(Tri3d2Element::from_vertices([
            vertices.get(indices[0]).copied()?,
            vertices.get(indices[1]).copied()?,
            vertices.get(indices[2]).copied()?,
        ]))
    }
}
