use crate::basis::{BasisDescription, FunctionSpaceBasis, LocalIndexSet, LocalNode, LocalView};
use crate::error::BasisError;
use crate::multi_index::MultiIndex;

/// The restriction of a basis to the subtree at a given path.
///
/// A subspace basis does not renumber anything: the degrees of freedom of the subspace are
/// identified by the global multi-indices of the root basis. This allows working with,
/// say, the velocity of a Taylor-Hood basis while reading and writing a coefficient vector
/// of the full basis.
#[derive(Debug, Clone)]
pub struct SubspaceBasis<'b, B> {
    root: &'b B,
    path: Vec<usize>,
    description: BasisDescription,
}

impl<'b, B> SubspaceBasis<'b, B>
where
    B: FunctionSpaceBasis,
{
    /// Restricts `root` to the subtree at `path`.
    ///
    /// Fails if `path` does not designate a node of the basis tree.
    pub fn new(root: &'b B, path: &[usize]) -> Result<Self, BasisError> {
        let description = root
            .description()
            .get(path)
            .cloned()
            .ok_or_else(|| BasisError::InvalidTreePath { path: path.to_vec() })?;
        Ok(Self {
            root,
            path: path.to_vec(),
            description,
        })
    }

    /// Restricts the subspace further, appending `path` to the current path.
    pub fn subspace(&self, path: &[usize]) -> Result<Self, BasisError> {
        let full_path: Vec<usize> = self.path.iter().chain(path).copied().collect();
        Self::new(self.root, &full_path)
    }

    pub fn root_basis(&self) -> &'b B {
        self.root
    }

    /// The path of the subtree, relative to the root basis.
    pub fn prefix_path(&self) -> &[usize] {
        &self.path
    }

    /// The description of the subtree.
    pub fn description(&self) -> &BasisDescription {
        &self.description
    }

    /// The local view of the root basis. Use [`tree`](Self::tree) to access the subtree.
    pub fn local_view(&self) -> LocalView<'b, B> {
        self.root.local_view()
    }

    pub fn local_index_set(&self) -> LocalIndexSet<'b, B> {
        self.root.index_set().local_index_set()
    }

    /// The subtree of the bound local view of the root basis.
    pub fn tree<'v>(&self, local_view: &'v LocalView<'b, B>) -> &'v LocalNode {
        debug_assert!(std::ptr::eq(local_view.global_basis(), self.root));
        local_view
            .tree()
            .descendant(&self.path)
            .expect("Subspace path is validated on construction")
    }

    /// The number of local degrees of freedom of the subspace on the bound element.
    pub fn local_size(&self, local_view: &LocalView<'b, B>) -> usize {
        self.tree(local_view).size()
    }

    /// Collects the global multi-indices of the root basis for the local degrees of freedom
    /// of the subspace, in depth-first order of the subtree leaves.
    pub fn indices(&self, local_view: &LocalView<'b, B>, local_index_set: &LocalIndexSet<'b, B>) -> Vec<MultiIndex> {
        debug_assert_eq!(local_view.element(), local_index_set.element());
        let subtree = self.tree(local_view);
        let mut indices = Vec::with_capacity(subtree.size());
        subtree.visit_local_indices(&mut |i| indices.push(local_index_set.index(i).clone()));
        indices
    }
}
