//! Element-wise traversal of a basis.
//!
//! The helpers here bind a [`LocalView`] and a [`LocalIndexSet`] to every element in turn,
//! always binding the view before the index set and unbinding in reverse order, also when
//! the per-element callback returns early with an error or panics.
use crate::basis::{FunctionSpaceBasis, LocalIndexSet, LocalView};
use crate::grid::{Entity, GridView};
use crate::multi_index::MultiIndex;
use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// Calls `f` with the bound local view and local index set of every element of the basis.
pub fn for_each_bound_element<'b, B, F>(basis: &'b B, mut f: F)
where
    B: FunctionSpaceBasis,
    F: FnMut(&LocalView<'b, B>, &LocalIndexSet<'b, B>),
{
    let result: Result<(), std::convert::Infallible> = try_for_each_bound_element(basis, |view, indices| {
        f(view, indices);
        Ok(())
    });
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Like [`for_each_bound_element`], but stops at the first element for which `f` fails.
pub fn try_for_each_bound_element<'b, B, F, E>(basis: &'b B, mut f: F) -> Result<(), E>
where
    B: FunctionSpaceBasis,
    F: FnMut(&LocalView<'b, B>, &LocalIndexSet<'b, B>) -> Result<(), E>,
{
    let mut local_view = basis.local_view();
    let mut local_index_set = basis.index_set().local_index_set();
    for element in basis.elements() {
        let view = local_view.bound(element);
        let indices = local_index_set.bound(&view);
        f(&view, &indices)?;
    }
    Ok(())
}

/// Calls `f` with the bound local view and local index set of every element, in parallel.
///
/// Each worker thread binds its own local view and local index set.
pub fn par_for_each_bound_element<'b, B, F>(basis: &'b B, f: F)
where
    B: FunctionSpaceBasis + Sync,
    F: Fn(&LocalView<'b, B>, &LocalIndexSet<'b, B>) + Sync + Send,
{
    let num_elements = basis.grid_view().size(0);
    (0..num_elements).into_par_iter().for_each_init(
        || (basis.local_view(), basis.index_set().local_index_set()),
        |(local_view, local_index_set), element_index| {
            let view = local_view.bound(Entity::element(element_index));
            let indices = local_index_set.bound(&view);
            f(&view, &indices);
        },
    );
}

/// Summary of the global indices produced by a basis over all elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCoverage {
    /// The dimension of the basis.
    pub dimension: usize,
    /// The number of (element, local index) pairs visited.
    pub num_local_indices: usize,
    /// The largest number of local degrees of freedom on any element.
    pub max_local_size: usize,
}

/// Violations of the coverage property of a global numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexCoverageError {
    /// A multi-index does not address a valid degree of freedom.
    OutOfBounds { element: usize, index: MultiIndex },
    /// A local index set produced the same global index twice on one element.
    DuplicateLocalIndex { element: usize, index: MultiIndex },
    /// Some global indices were never produced by any element.
    Uncovered { missing: Vec<usize>, dimension: usize },
    /// An element has more local degrees of freedom than the maximum reported by the basis.
    LocalSizeExceedsMaximum { element: usize, size: usize, max_size: usize },
}

impl Display for IndexCoverageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexCoverageError::OutOfBounds { element, index } => {
                write!(f, "Element {element} produced out of bounds index {index}.")
            }
            IndexCoverageError::DuplicateLocalIndex { element, index } => {
                write!(f, "Element {element} produced index {index} more than once.")
            }
            IndexCoverageError::Uncovered { missing, dimension } => write!(
                f,
                "{} of {} global indices were never produced (first missing: {:?}).",
                missing.len(),
                dimension,
                missing.first()
            ),
            IndexCoverageError::LocalSizeExceedsMaximum {
                element,
                size,
                max_size,
            } => write!(
                f,
                "Element {element} has {size} local degrees of freedom, but the maximum is {max_size}."
            ),
        }
    }
}

impl Error for IndexCoverageError {}

/// Flattens a multi-index of the basis into a single index in `0..basis.dimension()`.
///
/// Blocks are flattened lexicographically: the flat index is the number of complete
/// multi-indices that precede `index` in lexicographic order. Returns `None` if the
/// multi-index does not address a degree of freedom of the basis.
///
/// Use an [`IndexFlattener`] to flatten many indices of the same basis.
pub fn flatten_index<B>(basis: &B, index: &[usize]) -> Option<usize>
where
    B: FunctionSpaceBasis,
{
    IndexFlattener::new(basis).flatten(index)
}

/// Flattens multi-indices of a basis, see [`flatten_index`].
///
/// The flat offsets of the blocks below a prefix are computed the first time the prefix is
/// visited and reused afterwards, so flattening all indices of a basis takes time
/// proportional to its dimension.
#[derive(Debug)]
pub struct IndexFlattener<'b, B> {
    basis: &'b B,
    // Entry `i` is the number of complete indices in the blocks `prefix ++ [0..i]`
    block_offsets: FxHashMap<Vec<usize>, Vec<usize>>,
}

impl<'b, B> IndexFlattener<'b, B>
where
    B: FunctionSpaceBasis,
{
    pub fn new(basis: &'b B) -> Self {
        Self {
            basis,
            block_offsets: FxHashMap::default(),
        }
    }

    pub fn flatten(&mut self, index: &[usize]) -> Option<usize> {
        let mut flat = 0;
        for depth in 0..index.len() {
            let offsets = self.offsets_below(&index[..depth]);
            if index[depth] + 1 >= offsets.len() {
                return None;
            }
            flat += offsets[index[depth]];
        }
        (self.basis.size(index) == 0).then_some(flat)
    }

    fn offsets_below(&mut self, prefix: &[usize]) -> &[usize] {
        if !self.block_offsets.contains_key(prefix) {
            let size = self.basis.size(prefix);
            let mut offsets = Vec::with_capacity(size + 1);
            offsets.push(0);
            let mut child = prefix.to_vec();
            for i in 0..size {
                child.push(i);
                let count = self.num_complete_indices(&child);
                child.pop();
                offsets.push(offsets[i] + count);
            }
            self.block_offsets.insert(prefix.to_vec(), offsets);
        }
        &self.block_offsets[prefix]
    }

    fn num_complete_indices(&mut self, prefix: &[usize]) -> usize {
        if self.basis.size(prefix) == 0 {
            1
        } else {
            self.offsets_below(prefix).last().copied().unwrap_or(0)
        }
    }
}

/// Checks that the global indices produced over all elements cover the global numbering.
///
/// Every produced multi-index must address a degree of freedom of the basis, no element may
/// produce the same index twice, and every one of the `dimension()` degrees of freedom must
/// be produced by at least one element.
pub fn check_global_indices<B>(basis: &B) -> Result<IndexCoverage, IndexCoverageError>
where
    B: FunctionSpaceBasis,
{
    let dimension = basis.dimension();
    let max_size = basis.max_node_size();
    let mut hit = vec![false; dimension];
    let mut element_hits = Vec::new();
    let mut flattener = IndexFlattener::new(basis);
    let mut coverage = IndexCoverage {
        dimension,
        num_local_indices: 0,
        max_local_size: 0,
    };

    try_for_each_bound_element(basis, |view, local_index_set| {
        let element = view.element().map_or(0, |e| e.index());
        let size = local_index_set.size();
        if size > max_size {
            return Err(IndexCoverageError::LocalSizeExceedsMaximum {
                element,
                size,
                max_size,
            });
        }
        coverage.num_local_indices += size;
        coverage.max_local_size = coverage.max_local_size.max(size);

        element_hits.clear();
        for index in local_index_set.indices() {
            let flat = flattener
                .flatten(index)
                .filter(|&flat| flat < dimension)
                .ok_or_else(|| IndexCoverageError::OutOfBounds {
                    element,
                    index: index.clone(),
                })?;
            if element_hits.contains(&flat) {
                return Err(IndexCoverageError::DuplicateLocalIndex {
                    element,
                    index: index.clone(),
                });
            }
            element_hits.push(flat);
            hit[flat] = true;
        }
        Ok(())
    })?;

    let missing: Vec<usize> = hit
        .iter()
        .enumerate()
        .filter(|(_, &is_hit)| !is_hit)
        .map(|(i, _)| i)
        .collect();
    if !missing.is_empty() {
        return Err(IndexCoverageError::Uncovered { missing, dimension });
    }

    debug!(
        "Verified {} global indices from {} local indices.",
        dimension, coverage.num_local_indices
    );
    Ok(coverage)
}
