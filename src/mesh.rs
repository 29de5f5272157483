use crate::connectivity::{Connectivity, Quad4d2Connectivity, Tri3d2Connectivity};
use crate::error::BasisError;
use nalgebra::allocator::Allocator;
use nalgebra::{DefaultAllocator, DimName, OPoint, OVector, RealField, Scalar, U2};
use serde::{Deserialize, Serialize};

pub mod procedural;

/// Index-based data structure for conforming meshes (i.e. no hanging nodes).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Mesh<T: Scalar, D, Connectivity>
where
    D: DimName,
    DefaultAllocator: Allocator<T, D>,
{
    // serde's not able correctly determine the necessary trait bounds in this case,
    // so write our own
    #[serde(bound(
        serialize = "<DefaultAllocator as Allocator<T, D>>::Buffer: Serialize",
        deserialize = "<DefaultAllocator as Allocator<T, D>>::Buffer: Deserialize<'de>"
    ))]
    vertices: Vec<OPoint<T, D>>,
    #[serde(bound(
        serialize = "Connectivity: Serialize",
        deserialize = "Connectivity: Deserialize<'de>"
    ))]
    connectivity: Vec<Connectivity>,
}

pub type Mesh2d<T, Connectivity> = Mesh<T, U2, Connectivity>;

pub type TriangleMesh2d<T> = Mesh2d<T, Tri3d2Connectivity>;
pub type QuadMesh2d<T> = Mesh2d<T, Quad4d2Connectivity>;

impl<T, D, C> Mesh<T, D, C>
where
    T: Scalar,
    D: DimName,
    DefaultAllocator: Allocator<T, D>,
{
    pub fn vertices(&self) -> &[OPoint<T, D>] {
        &self.vertices
    }

    pub fn connectivity(&self) -> &[C] {
        &self.connectivity
    }

    /// Construct a mesh from vertices and connectivity.
    ///
    /// The connectivity is trusted to only reference vertices in bounds. Code consuming the
    /// mesh is permitted to panic if it encounters invalid indices. Use
    /// [`Mesh::try_from_vertices_and_connectivity`] for untrusted input.
    pub fn from_vertices_and_connectivity(vertices: Vec<OPoint<T, D>>, connectivity: Vec<C>) -> Self {
        Self { vertices, connectivity }
    }
}

impl<T, D, C> Mesh<T, D, C>
where
    T: Scalar,
    D: DimName,
    C: Connectivity,
    DefaultAllocator: Allocator<T, D>,
{
    /// Construct a mesh from vertices and connectivity, checking that every cell only
    /// references vertices in bounds.
    pub fn try_from_vertices_and_connectivity(
        vertices: Vec<OPoint<T, D>>,
        connectivity: Vec<C>,
    ) -> Result<Self, BasisError> {
        for (cell_index, cell) in connectivity.iter().enumerate() {
            if let Some(&vertex_index) = cell.vertex_indices().iter().find(|&&v| v >= vertices.len()) {
                return Err(BasisError::InvalidConnectivity {
                    cell_index,
                    vertex_index,
                    num_vertices: vertices.len(),
                });
            }
        }
        Ok(Self::from_vertices_and_connectivity(vertices, connectivity))
    }

    /// Returns the indices of the vertices of the given cell, if the cell exists.
    pub fn cell_vertex_indices(&self, cell_index: usize) -> Option<&[usize]> {
        self.connectivity.get(cell_index).map(C::vertex_indices)
    }
}

impl<T, D, C> Mesh<T, D, C>
where
    T: RealField,
    D: DimName,
    DefaultAllocator: Allocator<T, D>,
{
    /// Translates all vertices of the mesh by the given translation vector.
    pub fn translate(&mut self, translation: &OVector<T, D>) {
        self.transform_vertices(|p| *p += translation);
    }

    /// Transform all vertices of the mesh by the given transformation function.
    pub fn transform_vertices<F>(&mut self, mut transformation: F)
    where
        F: FnMut(&mut OPoint<T, D>),
    {
        for p in &mut self.vertices {
            transformation(p);
        }
    }
}

impl<T> QuadMesh2d<T>
where
    T: RealField,
{
    /// Split every quadrilateral into two triangles along the diagonal through its first vertex.
    pub fn split_into_triangles(self) -> TriangleMesh2d<T> {
        let triangles = self
            .connectivity()
            .iter()
            .flat_map(Quad4d2Connectivity::split_into_triangles)
            .collect();

        TriangleMesh2d::from_vertices_and_connectivity(self.vertices, triangles)
    }
}
