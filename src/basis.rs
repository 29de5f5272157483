//! Function space bases with blocked multi-index numbering.
//!
//! A basis is a tree. Leaves are scalar bases such as [`LagrangeBasis`], inner nodes combine
//! children either as `N` copies of the same basis ([`PowerBasis`]) or as a fixed list of
//! distinct bases ([`CompositeBasis`]). How the global indices of the children are merged
//! into the global index of the parent is controlled by an [index merging strategy](strategy).
//!
//! Per-element work goes through a [`LocalView`], which is bound to one element at a time and
//! exposes the local tree of shape functions, and a [`LocalIndexSet`], which is bound to a
//! local view and maps each local index to its global [`MultiIndex`].
//!
//! ```
//! use fenris_bases::basis::{taylor_hood, FunctionSpaceBasis};
//! use fenris_bases::grid::MeshGridView;
//! use fenris_bases::mesh::procedural::create_unit_square_uniform_tri_mesh_2d;
//!
//! let mesh = create_unit_square_uniform_tri_mesh_2d::<f64>(1);
//! let grid_view = MeshGridView::new(&mesh);
//! let basis = taylor_hood::<_, 2>(&grid_view).unwrap();
//!
//! let mut local_view = basis.local_view();
//! let mut local_index_set = basis.index_set().local_index_set();
//! for element in basis.elements() {
//!     local_view.bind(element);
//!     local_index_set.bind(&local_view);
//!     assert_eq!(local_index_set.size(), 15);
//!     local_index_set.unbind();
//!     local_view.unbind();
//! }
//! ```
use crate::container_descriptors::ContainerDescriptor;
use crate::entity_set::ElementSet;
use crate::grid::GridView;
use crate::multi_index::MultiIndex;

mod composite;
mod description;
mod index_set;
mod lagrange;
mod local_view;
mod power;
pub mod strategy;
mod subspace;
mod taylor_hood;
mod tree;

pub use composite::*;
pub use description::*;
pub use index_set::*;
pub use lagrange::*;
pub use local_view::*;
pub use power::*;
pub use strategy::{BlockedInterleaved, BlockedLexicographic, FlatInterleaved, FlatLexicographic};
pub use subspace::*;
pub use taylor_hood::*;
pub use tree::*;

/// A global basis of a function space defined on a grid view.
///
/// Implementors describe one node of a basis tree. The local tree of an element is created
/// once by [`create_node`](Self::create_node) and updated in place by
/// [`bind_node`](Self::bind_node) whenever the element changes. Most users never call these
/// directly, and instead go through [`LocalView`] and [`LocalIndexSet`].
pub trait FunctionSpaceBasis {
    type GridView: GridView;

    /// The maximum number of entries of the multi-indices produced by the basis.
    const MULTI_INDEX_MAX_SIZE: usize;

    fn grid_view(&self) -> &Self::GridView;

    /// The total number of global degrees of freedom.
    fn dimension(&self) -> usize;

    /// The number of possible values of the next multi-index entry following `prefix`.
    ///
    /// The size for the empty prefix is the number of top-level blocks (or the number of
    /// degrees of freedom for a flat basis). The size is zero if `prefix` is already a
    /// complete multi-index.
    fn size(&self, prefix: &[usize]) -> usize;

    /// An upper bound for the number of local degrees of freedom on any element.
    fn max_node_size(&self) -> usize;

    /// Describes the nesting of a blocked coefficient container matching the
    /// multi-indices of the basis.
    fn container_descriptor(&self) -> ContainerDescriptor;

    fn description(&self) -> BasisDescription;

    /// Creates an unbound local tree with the structure of this basis.
    fn create_node(&self) -> LocalNode;

    /// Binds `node` to the given element.
    ///
    /// Local degree of freedom `j` of the subtree is assigned the local index
    /// `offset + j * stride` in the numbering of the root tree.
    ///
    /// # Panics
    ///
    /// May panic if `node` was not created by [`create_node`](Self::create_node) of the same basis.
    fn bind_node(&self, node: &mut LocalNode, element: usize, offset: usize, stride: usize);

    /// Writes the global multi-index of each local degree of freedom of the bound `node`
    /// into `indices`, at the position given by its local index.
    fn indices(&self, node: &LocalNode, indices: &mut [MultiIndex]);

    fn local_view(&self) -> LocalView<'_, Self>
    where
        Self: Sized,
    {
        LocalView::new(self)
    }

    fn index_set(&self) -> IndexSet<'_, Self>
    where
        Self: Sized,
    {
        IndexSet::new(self)
    }

    fn elements(&self) -> ElementSet<'_, Self::GridView> {
        ElementSet::new(self.grid_view())
    }
}

impl<'a, B> FunctionSpaceBasis for &'a B
where
    B: FunctionSpaceBasis,
{
    type GridView = B::GridView;

    const MULTI_INDEX_MAX_SIZE: usize = B::MULTI_INDEX_MAX_SIZE;

    fn grid_view(&self) -> &Self::GridView {
        B::grid_view(self)
    }

    fn dimension(&self) -> usize {
        B::dimension(self)
    }

    fn size(&self, prefix: &[usize]) -> usize {
        B::size(self, prefix)
    }

    fn max_node_size(&self) -> usize {
        B::max_node_size(self)
    }

    fn container_descriptor(&self) -> ContainerDescriptor {
        B::container_descriptor(self)
    }

    fn description(&self) -> BasisDescription {
        B::description(self)
    }

    fn create_node(&self) -> LocalNode {
        B::create_node(self)
    }

    fn bind_node(&self, node: &mut LocalNode, element: usize, offset: usize, stride: usize) {
        B::bind_node(self, node, element, offset, stride)
    }

    fn indices(&self, node: &LocalNode, indices: &mut [MultiIndex]) {
        B::indices(self, node, indices)
    }
}
