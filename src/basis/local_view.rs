use crate::basis::{FunctionSpaceBasis, LocalNode};
use crate::grid::{Entity, GridView};
use log::trace;
use std::ops::Deref;

/// A view of a global basis restricted to a single element.
///
/// The view is created unbound. After [`bind`](Self::bind), [`tree`](Self::tree) describes the
/// local shape functions on the element and the position of each of them in the local
/// numbering. The view can be rebound to different elements any number of times.
#[derive(Debug)]
pub struct LocalView<'b, B> {
    basis: &'b B,
    element: Option<Entity>,
    tree: LocalNode,
}

impl<'b, B> LocalView<'b, B>
where
    B: FunctionSpaceBasis,
{
    pub fn new(basis: &'b B) -> Self {
        Self {
            basis,
            element: None,
            tree: basis.create_node(),
        }
    }

    /// Binds the view to the given element.
    ///
    /// The local tree is updated in place. Offsets between the children of composite nodes
    /// are recomputed from the sizes of the freshly bound children on every bind.
    pub fn bind(&mut self, element: Entity) {
        debug_assert_eq!(element.codim(), 0, "Local views can only be bound to elements.");
        debug_assert!(
            self.basis.grid_view().contains(&element),
            "Element {} is not contained in the grid view.",
            element.index()
        );
        self.basis.bind_node(&mut self.tree, element.index(), 0, 1);
        self.element = Some(element);
        trace!("Bound local view to element {} ({} local dofs).", element.index(), self.tree.size());
    }

    /// Releases the element. Querying the view while unbound is a logic error.
    pub fn unbind(&mut self) {
        self.element = None;
    }

    /// Binds the view to the element for the lifetime of the returned guard.
    ///
    /// The view is unbound when the guard is dropped.
    pub fn bound(&mut self, element: Entity) -> BoundLocalView<'_, 'b, B> {
        self.bind(element);
        BoundLocalView { view: self }
    }

    pub fn is_bound(&self) -> bool {
        self.element.is_some()
    }

    /// The element the view is bound to.
    pub fn element(&self) -> Option<Entity> {
        self.element
    }

    /// The number of local degrees of freedom on the bound element.
    pub fn size(&self) -> usize {
        debug_assert!(self.is_bound(), "Local view must be bound.");
        self.tree.size()
    }

    /// An upper bound for [`size`](Self::size) over all elements, available before binding.
    pub fn max_size(&self) -> usize {
        self.basis.max_node_size()
    }

    /// The local tree of shape functions on the bound element.
    pub fn tree(&self) -> &LocalNode {
        debug_assert!(self.is_bound(), "Local view must be bound.");
        &self.tree
    }

    pub fn global_basis(&self) -> &'b B {
        self.basis
    }
}

/// A local view that is bound for the lifetime of the guard.
#[derive(Debug)]
pub struct BoundLocalView<'v, 'b, B>
where
    B: FunctionSpaceBasis,
{
    view: &'v mut LocalView<'b, B>,
}

impl<'v, 'b, B> Deref for BoundLocalView<'v, 'b, B>
where
    B: FunctionSpaceBasis,
{
    type Target = LocalView<'b, B>;

    fn deref(&self) -> &Self::Target {
        self.view
    }
}

impl<'v, 'b, B> Drop for BoundLocalView<'v, 'b, B>
where
    B: FunctionSpaceBasis,
{
    fn drop(&mut self) {
        self.view.unbind();
    }
}
