use crate::element::LagrangeFiniteElement;
use std::fmt;
use std::fmt::Display;

/// The local tree of shape functions of a basis on a single element.
///
/// The structure of the tree mirrors the structure of the basis. Every leaf carries the
/// local finite element of a scalar basis together with the position of its degrees of
/// freedom in the local numbering of the whole tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalNode {
    Leaf(LeafNode),
    Power(InnerNode),
    Composite(InnerNode),
}

/// Leaf of a local tree.
///
/// Local degree of freedom `j` of the leaf has local index `offset + j * stride` in the
/// tree the leaf belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    finite_element: LagrangeFiniteElement,
    element: usize,
    offset: usize,
    stride: usize,
}

/// Power or composite node of a local tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerNode {
    children: Vec<LocalNode>,
    size: usize,
}

impl LeafNode {
    pub fn new(finite_element: LagrangeFiniteElement) -> Self {
        Self {
            finite_element,
            element: 0,
            offset: 0,
            stride: 1,
        }
    }

    pub(crate) fn bind(&mut self, element: usize, offset: usize, stride: usize) {
        debug_assert!(stride > 0);
        self.element = element;
        self.offset = offset;
        self.stride = stride;
    }

    pub fn finite_element(&self) -> &LagrangeFiniteElement {
        &self.finite_element
    }

    /// The index of the element the leaf was last bound to.
    pub fn element(&self) -> usize {
        self.element
    }

    pub fn size(&self) -> usize {
        self.finite_element.size()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The index of the `j`-th shape function of the leaf in the local numbering of the tree.
    pub fn local_index(&self, j: usize) -> usize {
        debug_assert!(j < self.size(), "Shape function index out of bounds.");
        self.offset + j * self.stride
    }

    pub fn local_indices(&self) -> impl '_ + ExactSizeIterator<Item = usize> {
        (0..self.size()).map(move |j| self.offset + j * self.stride)
    }
}

impl InnerNode {
    pub fn new(children: Vec<LocalNode>) -> Self {
        Self { children, size: 0 }
    }

    pub fn children(&self) -> &[LocalNode] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [LocalNode] {
        &mut self.children
    }

    pub fn child(&self, index: usize) -> &LocalNode {
        &self.children[index]
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: usize) {
        self.size = size;
    }
}

impl LocalNode {
    /// The number of local degrees of freedom in the subtree.
    pub fn size(&self) -> usize {
        match self {
            Self::Leaf(leaf) => leaf.size(),
            Self::Power(node) | Self::Composite(node) => node.size(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub fn num_children(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Power(node) | Self::Composite(node) => node.children().len(),
        }
    }

    pub fn leaf(&self) -> Option<&LeafNode> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn children(&self) -> &[LocalNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Power(node) | Self::Composite(node) => node.children(),
        }
    }

    /// Returns the node at the given path of child indices, if it exists.
    pub fn descendant(&self, path: &[usize]) -> Option<&LocalNode> {
        match path.split_first() {
            None => Some(self),
            Some((&first, rest)) => self.children().get(first)?.descendant(rest),
        }
    }

    /// Calls `f` with every leaf of the subtree in depth-first order.
    pub fn visit_leaves<F>(&self, f: &mut F)
    where
        F: FnMut(&LeafNode),
    {
        match self {
            Self::Leaf(leaf) => f(leaf),
            Self::Power(node) | Self::Composite(node) => {
                for child in node.children() {
                    child.visit_leaves(f);
                }
            }
        }
    }

    /// Calls `f` with the local index of every degree of freedom of the subtree, visiting
    /// the leaves in depth-first order.
    pub fn visit_local_indices<F>(&self, f: &mut F)
    where
        F: FnMut(usize),
    {
        self.visit_leaves(&mut |leaf: &LeafNode| leaf.local_indices().for_each(&mut *f));
    }

    /// The local indices of the subtree in depth-first leaf order.
    pub fn local_indices(&self) -> Vec<usize> {
        let mut indices = Vec::with_capacity(self.size());
        self.visit_local_indices(&mut |i| indices.push(i));
        indices
    }

    pub(crate) fn expect_leaf_mut(&mut self) -> &mut LeafNode {
        match self {
            Self::Leaf(leaf) => leaf,
            other => panic!("Expected leaf node, but got {} node.", other.kind()),
        }
    }

    pub(crate) fn expect_leaf(&self) -> &LeafNode {
        match self {
            Self::Leaf(leaf) => leaf,
            other => panic!("Expected leaf node, but got {} node.", other.kind()),
        }
    }

    pub(crate) fn expect_power_mut(&mut self) -> &mut InnerNode {
        match self {
            Self::Power(node) => node,
            other => panic!("Expected power node, but got {} node.", other.kind()),
        }
    }

    pub(crate) fn expect_power(&self) -> &InnerNode {
        match self {
            Self::Power(node) => node,
            other => panic!("Expected power node, but got {} node.", other.kind()),
        }
    }

    pub(crate) fn expect_composite_mut(&mut self) -> &mut InnerNode {
        match self {
            Self::Composite(node) => node,
            other => panic!("Expected composite node, but got {} node.", other.kind()),
        }
    }

    pub(crate) fn expect_composite(&self) -> &InnerNode {
        match self {
            Self::Composite(node) => node,
            other => panic!("Expected composite node, but got {} node.", other.kind()),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "leaf",
            Self::Power(_) => "power",
            Self::Composite(_) => "composite",
        }
    }
}

impl Display for LocalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(leaf) => write!(
                f,
                "P{}[offset: {}, stride: {}]",
                leaf.finite_element().order(),
                leaf.offset(),
                leaf.stride()
            ),
            Self::Power(node) | Self::Composite(node) => {
                let (open, close) = if matches!(self, Self::Power(_)) { ("[", "]") } else { ("(", ")") };
                write!(f, "{}", open)?;
                for (i, child) in node.children().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, "{}", close)
            }
        }
    }
}
