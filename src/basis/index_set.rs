use crate::basis::{FunctionSpaceBasis, LocalView};
use crate::grid::Entity;
use crate::multi_index::MultiIndex;
use std::ops::Deref;

/// The global numbering of a basis.
#[derive(Debug)]
pub struct IndexSet<'b, B> {
    basis: &'b B,
}

impl<'b, B> Clone for IndexSet<'b, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'b, B> Copy for IndexSet<'b, B> {}

impl<'b, B> IndexSet<'b, B>
where
    B: FunctionSpaceBasis,
{
    pub fn new(basis: &'b B) -> Self {
        Self { basis }
    }

    /// The number of possible values of the multi-index entry following `prefix`.
    ///
    /// See [`FunctionSpaceBasis::size`].
    pub fn size(&self, prefix: &[usize]) -> usize {
        self.basis.size(prefix)
    }

    /// The number of top-level blocks.
    pub fn root_size(&self) -> usize {
        self.basis.size(&[])
    }

    /// The total number of global degrees of freedom.
    pub fn dimension(&self) -> usize {
        self.basis.dimension()
    }

    /// Creates an unbound local index set.
    pub fn local_index_set(&self) -> LocalIndexSet<'b, B> {
        LocalIndexSet::new(self.basis)
    }
}

/// Maps the local indices of a bound [`LocalView`] to global multi-indices.
///
/// The global indices are computed when the index set is bound, so the local view may be
/// rebound afterwards without affecting the index set. Rebinding the local view without
/// rebinding the index set leaves the index set describing the old element.
#[derive(Debug)]
pub struct LocalIndexSet<'b, B> {
    basis: &'b B,
    element: Option<Entity>,
    size: usize,
    indices: Vec<MultiIndex>,
}

impl<'b, B> LocalIndexSet<'b, B>
where
    B: FunctionSpaceBasis,
{
    pub fn new(basis: &'b B) -> Self {
        Self {
            basis,
            element: None,
            size: 0,
            indices: Vec::new(),
        }
    }

    /// Binds the index set to a local view that is bound to an element.
    pub fn bind(&mut self, local_view: &LocalView<'b, B>) {
        debug_assert!(local_view.is_bound(), "Local view must be bound before binding local index set.");
        debug_assert!(
            std::ptr::eq(local_view.global_basis(), self.basis),
            "Local view belongs to a different basis."
        );
        let size = local_view.size();
        // Keep the allocations of previously computed indices around
        if self.indices.len() < size {
            self.indices.resize_with(size, MultiIndex::new);
        }
        self.basis
            .indices(local_view.tree(), &mut self.indices[..size]);
        self.size = size;
        self.element = local_view.element();
    }

    /// Binds the index set for the lifetime of the returned guard.
    ///
    /// The index set is unbound when the guard is dropped.
    pub fn bound(&mut self, local_view: &LocalView<'b, B>) -> BoundLocalIndexSet<'_, 'b, B> {
        self.bind(local_view);
        BoundLocalIndexSet { index_set: self }
    }

    pub fn unbind(&mut self) {
        self.element = None;
        self.size = 0;
    }

    pub fn is_bound(&self) -> bool {
        self.element.is_some()
    }

    /// The element of the local view the index set was bound to.
    pub fn element(&self) -> Option<Entity> {
        self.element
    }

    /// The number of local degrees of freedom.
    pub fn size(&self) -> usize {
        debug_assert!(self.is_bound(), "Local index set must be bound.");
        self.size
    }

    /// The global multi-index of the degree of freedom with the given local index.
    pub fn index(&self, local_index: usize) -> &MultiIndex {
        debug_assert!(self.is_bound(), "Local index set must be bound.");
        debug_assert!(local_index < self.size, "Local index out of bounds.");
        &self.indices[local_index]
    }

    /// The global multi-indices of all local degrees of freedom, ordered by local index.
    pub fn indices(&self) -> &[MultiIndex] {
        debug_assert!(self.is_bound(), "Local index set must be bound.");
        &self.indices[..self.size]
    }

    pub fn global_basis(&self) -> &'b B {
        self.basis
    }
}

/// A local index set that is bound for the lifetime of the guard.
#[derive(Debug)]
pub struct BoundLocalIndexSet<'s, 'b, B>
where
    B: FunctionSpaceBasis,
{
    index_set: &'s mut LocalIndexSet<'b, B>,
}

impl<'s, 'b, B> Deref for BoundLocalIndexSet<'s, 'b, B>
where
    B: FunctionSpaceBasis,
{
    type Target = LocalIndexSet<'b, B>;

    fn deref(&self) -> &Self::Target {
        self.index_set
    }
}

impl<'s, 'b, B> Drop for BoundLocalIndexSet<'s, 'b, B>
where
    B: FunctionSpaceBasis,
{
    fn drop(&mut self) {
        self.index_set.unbind();
    }
}
