use crate::basis::strategy::LexicographicStrategy;
use crate::basis::{BasisDescription, FunctionSpaceBasis, InnerNode, LocalNode};
use crate::container_descriptors::{flat_vector, make_descriptor, ContainerDescriptor};
use crate::error::BasisError;
use crate::grid::GridView;
use crate::multi_index::MultiIndex;
use log::debug;
use std::marker::PhantomData;

/// A fixed list of (possibly distinct) bases on the same grid view.
///
/// Implemented for tuples of up to six bases. Children are addressed by their position in
/// the tuple.
pub trait BasisTuple {
    type GridView: GridView;

    const LEN: usize;
    const MULTI_INDEX_MAX_SIZE: usize;

    /// The grid view of the first child.
    fn grid_view(&self) -> &Self::GridView;

    /// Checks that all children are defined on the very same grid view instance.
    fn check_grid_views(&self) -> Result<(), BasisError>;

    fn dimension(&self, child: usize) -> usize;
    fn size(&self, child: usize, prefix: &[usize]) -> usize;
    fn max_node_size(&self, child: usize) -> usize;
    fn container_descriptor(&self, child: usize) -> ContainerDescriptor;
    fn description(&self, child: usize) -> BasisDescription;
    fn create_node(&self, child: usize) -> LocalNode;
    fn bind_node(&self, child: usize, node: &mut LocalNode, element: usize, offset: usize, stride: usize);
    fn indices(&self, child: usize, node: &LocalNode, indices: &mut [MultiIndex]);
}

const fn max_of(values: &[usize]) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < values.len() {
        if values[i] > max {
            max = values[i];
        }
        i += 1;
    }
    max
}

macro_rules! impl_basis_tuple {
    ($len:expr; $($idx:tt => $basis:ident),+) => {
        impl<G, $($basis),+> BasisTuple for ($($basis,)+)
        where
            G: GridView,
            $($basis: FunctionSpaceBasis<GridView = G>),+
        {
            type GridView = G;

            const LEN: usize = $len;
            const MULTI_INDEX_MAX_SIZE: usize = max_of(&[$($basis::MULTI_INDEX_MAX_SIZE),+]);

            fn grid_view(&self) -> &Self::GridView {
                self.0.grid_view()
            }

            fn check_grid_views(&self) -> Result<(), BasisError> {
                $(
                    if !std::ptr::eq(self.0.grid_view(), self.$idx.grid_view()) {
                        return Err(BasisError::MismatchedGridViews { child_index: $idx });
                    }
                )+
                Ok(())
            }

            fn dimension(&self, child: usize) -> usize {
                match child {
                    $($idx => self.$idx.dimension(),)+
                    _ => panic!("Child index {child} out of bounds for composite basis with {} children.", $len),
                }
            }

            fn size(&self, child: usize, prefix: &[usize]) -> usize {
                match child {
                    $($idx => self.$idx.size(prefix),)+
                    _ => panic!("Child index {child} out of bounds for composite basis with {} children.", $len),
                }
            }

            fn max_node_size(&self, child: usize) -> usize {
                match child {
                    $($idx => self.$idx.max_node_size(),)+
                    _ => panic!("Child index {child} out of bounds for composite basis with {} children.", $len),
                }
            }

            fn container_descriptor(&self, child: usize) -> ContainerDescriptor {
                match child {
                    $($idx => self.$idx.container_descriptor(),)+
                    _ => panic!("Child index {child} out of bounds for composite basis with {} children.", $len),
                }
            }

            fn description(&self, child: usize) -> BasisDescription {
                match child {
                    $($idx => self.$idx.description(),)+
                    _ => panic!("Child index {child} out of bounds for composite basis with {} children.", $len),
                }
            }

            fn create_node(&self, child: usize) -> LocalNode {
                match child {
                    $($idx => self.$idx.create_node(),)+
                    _ => panic!("Child index {child} out of bounds for composite basis with {} children.", $len),
                }
            }

            fn bind_node(&self, child: usize, node: &mut LocalNode, element: usize, offset: usize, stride: usize) {
                match child {
                    $($idx => self.$idx.bind_node(node, element, offset, stride),)+
                    _ => panic!("Child index {child} out of bounds for composite basis with {} children.", $len),
                }
            }

            fn indices(&self, child: usize, node: &LocalNode, indices: &mut [MultiIndex]) {
                match child {
                    $($idx => self.$idx.indices(node, indices),)+
                    _ => panic!("Child index {child} out of bounds for composite basis with {} children.", $len),
                }
            }
        }
    };
}

impl_basis_tuple!(1; 0 => B0);
impl_basis_tuple!(2; 0 => B0, 1 => B1);
impl_basis_tuple!(3; 0 => B0, 1 => B1, 2 => B2);
impl_basis_tuple!(4; 0 => B0, 1 => B1, 2 => B2, 3 => B3);
impl_basis_tuple!(5; 0 => B0, 1 => B1, 2 => B2, 3 => B3, 4 => B4);
impl_basis_tuple!(6; 0 => B0, 1 => B1, 2 => B2, 3 => B3, 4 => B4, 5 => B5);

/// A composition of distinct bases, e.g. the velocity and pressure fields of a flow problem.
///
/// The local degrees of freedom of the children are numbered consecutively: the degrees of
/// freedom of child `k` start right after those of child `k - 1` on the same element.
/// Children are merged with a [lexicographic strategy](LexicographicStrategy).
#[derive(Debug, Clone)]
pub struct CompositeBasis<S, C> {
    children: C,
    marker: PhantomData<S>,
}

impl<S, C> CompositeBasis<S, C>
where
    S: LexicographicStrategy,
    C: BasisTuple,
{
    /// Combines the children into a composite basis.
    ///
    /// Fails if the children are not all defined on the same grid view instance.
    pub fn new(children: C) -> Result<Self, BasisError> {
        children.check_grid_views()?;
        let basis = Self {
            children,
            marker: PhantomData,
        };
        debug!(
            "Constructed composite basis with {} children and {} degrees of freedom.",
            C::LEN,
            basis.dimension()
        );
        Ok(basis)
    }

    pub fn children(&self) -> &C {
        &self.children
    }

    pub fn num_children(&self) -> usize {
        C::LEN
    }

    /// The first top-level index of each child in a flat numbering.
    fn root_offset(&self, child: usize) -> usize {
        (0..child).map(|k| self.children.size(k, &[])).sum()
    }
}

impl<S, C> FunctionSpaceBasis for CompositeBasis<S, C>
where
    S: LexicographicStrategy,
    C: BasisTuple,
{
    type GridView = C::GridView;

    const MULTI_INDEX_MAX_SIZE: usize = C::MULTI_INDEX_MAX_SIZE + S::BLOCKED as usize;

    fn grid_view(&self) -> &Self::GridView {
        self.children.grid_view()
    }

    fn dimension(&self) -> usize {
        (0..C::LEN).map(|k| self.children.dimension(k)).sum()
    }

    fn size(&self, prefix: &[usize]) -> usize {
        match prefix.split_first() {
            None if S::BLOCKED => C::LEN,
            None => (0..C::LEN).map(|k| self.children.size(k, &[])).sum(),
            Some((&k, rest)) if S::BLOCKED => {
                debug_assert!(k < C::LEN, "Child index {k} out of bounds for composite basis.");
                self.children.size(k, rest)
            }
            Some((&first, _)) => {
                let mut offset = 0;
                for k in 0..C::LEN {
                    let child_size = self.children.size(k, &[]);
                    if first < offset + child_size {
                        let mut child_prefix = MultiIndex::from_slice(prefix);
                        child_prefix[0] -= offset;
                        return self.children.size(k, &child_prefix);
                    }
                    offset += child_size;
                }
                0
            }
        }
    }

    fn max_node_size(&self) -> usize {
        (0..C::LEN).map(|k| self.children.max_node_size(k)).sum()
    }

    fn container_descriptor(&self) -> ContainerDescriptor {
        let children: Vec<_> = (0..C::LEN)
            .map(|k| self.children.container_descriptor(k))
            .collect();
        if S::BLOCKED {
            make_descriptor(children)
        } else if children.iter().all(ContainerDescriptor::is_flat) {
            flat_vector(children.iter().map(ContainerDescriptor::size).sum())
        } else {
            ContainerDescriptor::Unknown
        }
    }

    fn description(&self) -> BasisDescription {
        BasisDescription::composite((0..C::LEN).map(|k| self.children.description(k)).collect())
            .with_blocked(S::BLOCKED)
    }

    fn create_node(&self) -> LocalNode {
        LocalNode::Composite(InnerNode::new((0..C::LEN).map(|k| self.children.create_node(k)).collect()))
    }

    fn bind_node(&self, node: &mut LocalNode, element: usize, offset: usize, stride: usize) {
        let node = node.expect_composite_mut();
        // The offset of each child depends on the size of the preceding children on this
        // element, so it is only known after the preceding children have been bound
        let mut size = 0;
        for (k, child) in node.children_mut().iter_mut().enumerate() {
            self.children
                .bind_node(k, child, element, offset + size * stride, stride);
            size += child.size();
        }
        node.set_size(size);
    }

    fn indices(&self, node: &LocalNode, indices: &mut [MultiIndex]) {
        let node = node.expect_composite();
        for (k, child) in node.children().iter().enumerate() {
            self.children.indices(k, child, indices);
            if S::BLOCKED {
                child.visit_local_indices(&mut |i| indices[i].push_front(k));
            } else {
                let root_offset = self.root_offset(k);
                child.visit_local_indices(&mut |i| indices[i][0] += root_offset);
            }
        }
    }
}
