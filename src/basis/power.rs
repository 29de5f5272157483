use crate::basis::strategy::IndexMergingStrategy;
use crate::basis::{BasisDescription, FunctionSpaceBasis, IndexLayout, InnerNode, LocalNode};
use crate::container_descriptors::{flat_array, flat_vector, uniform_array, uniform_vector, ContainerDescriptor};
use crate::multi_index::MultiIndex;
use log::debug;
use std::marker::PhantomData;

/// `N` copies of the same basis, e.g. the components of a vector-valued field.
///
/// The strategy `S` determines how the global indices of the copies are merged, see
/// [`strategy`](crate::basis::strategy).
#[derive(Debug, Clone)]
pub struct PowerBasis<S, B, const N: usize> {
    child: B,
    marker: PhantomData<S>,
}

impl<S, B, const N: usize> PowerBasis<S, B, N>
where
    S: IndexMergingStrategy,
    B: FunctionSpaceBasis,
{
    pub fn new(child: B) -> Self {
        debug!(
            "Constructed power basis with {} children and {} degrees of freedom.",
            N,
            N * child.dimension()
        );
        Self {
            child,
            marker: PhantomData,
        }
    }

    pub fn child(&self) -> &B {
        &self.child
    }

    /// The number of copies of the child basis.
    pub fn exponent(&self) -> usize {
        N
    }

    /// Turns the index of a degree of freedom of child `k` into an index of the power basis.
    fn merge_index(&self, index: &mut MultiIndex, k: usize, child_size: usize) {
        match (S::BLOCKED, S::INTERLEAVED) {
            (true, false) => index.push_front(k),
            (true, true) => index.push(k),
            (false, false) => index[0] += k * child_size,
            (false, true) => index[0] = index[0] * N + k,
        }
    }

    /// The size of a prefix of an index of the blocked interleaved basis, where the child
    /// index is the last entry.
    fn blocked_interleaved_size(&self, prefix: &[usize]) -> usize {
        let child_size = self.child.size(prefix);
        if child_size > 0 {
            return child_size;
        }
        match prefix.split_last() {
            // The prefix is a complete index of the child basis
            Some((_, init)) if self.child.size(init) > 0 => N,
            _ => 0,
        }
    }
}

impl<S, B, const N: usize> FunctionSpaceBasis for PowerBasis<S, B, N>
where
    S: IndexMergingStrategy,
    B: FunctionSpaceBasis,
{
    type GridView = B::GridView;

    const MULTI_INDEX_MAX_SIZE: usize = B::MULTI_INDEX_MAX_SIZE + S::BLOCKED as usize;

    fn grid_view(&self) -> &Self::GridView {
        self.child.grid_view()
    }

    fn dimension(&self) -> usize {
        N * self.child.dimension()
    }

    fn size(&self, prefix: &[usize]) -> usize {
        match (S::BLOCKED, S::INTERLEAVED) {
            (true, false) => match prefix.split_first() {
                None => N,
                Some((&k, rest)) => {
                    debug_assert!(k < N, "Child index {k} out of bounds for power basis with {N} children.");
                    self.child.size(rest)
                }
            },
            (true, true) => {
                if prefix.is_empty() {
                    self.child.size(&[])
                } else {
                    self.blocked_interleaved_size(prefix)
                }
            }
            (false, interleaved) => {
                let child_size = self.child.size(&[]);
                if prefix.is_empty() {
                    return N * child_size;
                }
                if child_size == 0 {
                    return 0;
                }
                let mut child_prefix = MultiIndex::from_slice(prefix);
                child_prefix[0] = if interleaved {
                    prefix[0] / N
                } else {
                    prefix[0] % child_size
                };
                self.child.size(&child_prefix)
            }
        }
    }

    fn max_node_size(&self) -> usize {
        N * self.child.max_node_size()
    }

    fn container_descriptor(&self) -> ContainerDescriptor {
        let child = self.child.container_descriptor();
        match (S::BLOCKED, S::INTERLEAVED) {
            (true, false) => uniform_array(N, child),
            (true, true) if child.is_flat() => uniform_vector(child.size(), flat_array(N)),
            (false, _) if child.is_flat() => flat_vector(N * child.size()),
            _ => ContainerDescriptor::Unknown,
        }
    }

    fn description(&self) -> BasisDescription {
        let layout = if S::INTERLEAVED {
            IndexLayout::Interleaved
        } else {
            IndexLayout::Lexicographic
        };
        BasisDescription::power(self.child.description(), N)
            .with_blocked(S::BLOCKED)
            .with_layout(layout)
    }

    fn create_node(&self) -> LocalNode {
        LocalNode::Power(InnerNode::new((0..N).map(|_| self.child.create_node()).collect()))
    }

    fn bind_node(&self, node: &mut LocalNode, element: usize, offset: usize, stride: usize) {
        let node = node.expect_power_mut();
        let mut size = 0;
        for (k, child) in node.children_mut().iter_mut().enumerate() {
            if S::INTERLEAVED {
                self.child.bind_node(child, element, offset + k * stride, N * stride);
            } else {
                self.child.bind_node(child, element, offset + size * stride, stride);
            }
            size += child.size();
        }
        node.set_size(size);
    }

    fn indices(&self, node: &LocalNode, indices: &mut [MultiIndex]) {
        let node = node.expect_power();
        let child_size = self.child.size(&[]);
        for (k, child) in node.children().iter().enumerate() {
            self.child.indices(child, indices);
            child.visit_local_indices(&mut |i| self.merge_index(&mut indices[i], k, child_size));
        }
    }
}
