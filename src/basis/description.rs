use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;
use std::ops::Mul;

/// Order in which the degrees of freedom of the children of a node are numbered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexLayout {
    Lexicographic,
    Interleaved,
}

/// A symbolic description of the tree structure of a basis.
///
/// Descriptions compare equal if they describe the same tree, independently of the grid
/// the basis is defined on. Every basis reports its description through
/// [`FunctionSpaceBasis::description`](crate::basis::FunctionSpaceBasis::description).
///
/// ```
/// use fenris_bases::basis::BasisDescription;
///
/// let taylor_hood = BasisDescription::power(BasisDescription::lagrange(2), 2) * BasisDescription::lagrange(1);
/// assert_eq!(taylor_hood.to_string(), "([Lagrange<2>]^2 * Lagrange<1>)");
/// assert_eq!(taylor_hood.get(&[0, 1]), Some(&BasisDescription::lagrange(2)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasisDescription {
    Lagrange {
        order: usize,
    },
    Power {
        child: Box<BasisDescription>,
        exponent: usize,
        blocked: bool,
        layout: IndexLayout,
    },
    Composite {
        children: Vec<BasisDescription>,
        blocked: bool,
        layout: IndexLayout,
    },
}

impl BasisDescription {
    pub fn lagrange(order: usize) -> Self {
        Self::Lagrange { order }
    }

    /// A flat lexicographic power node.
    pub fn power(child: BasisDescription, exponent: usize) -> Self {
        Self::Power {
            child: Box::new(child),
            exponent,
            blocked: false,
            layout: IndexLayout::Lexicographic,
        }
    }

    /// A flat lexicographic composite node.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn composite(children: Vec<BasisDescription>) -> Self {
        assert!(!children.is_empty(), "Composite nodes must have at least one child.");
        Self::Composite {
            children,
            blocked: false,
            layout: IndexLayout::Lexicographic,
        }
    }

    /// Sets the blocked flag of a power or composite node. Has no effect on leaves.
    pub fn with_blocked(mut self, is_blocked: bool) -> Self {
        match &mut self {
            Self::Lagrange { .. } => {}
            Self::Power { blocked, .. } | Self::Composite { blocked, .. } => *blocked = is_blocked,
        }
        self
    }

    /// Sets the index layout of a power or composite node. Has no effect on leaves.
    pub fn with_layout(mut self, index_layout: IndexLayout) -> Self {
        match &mut self {
            Self::Lagrange { .. } => {}
            Self::Power { layout, .. } | Self::Composite { layout, .. } => *layout = index_layout,
        }
        self
    }

    /// The number of children of the node. A power node has `exponent` children.
    pub fn num_children(&self) -> usize {
        match self {
            Self::Lagrange { .. } => 0,
            Self::Power { exponent, .. } => *exponent,
            Self::Composite { children, .. } => children.len(),
        }
    }

    pub fn child(&self, index: usize) -> Option<&BasisDescription> {
        match self {
            Self::Lagrange { .. } => None,
            Self::Power { child, exponent, .. } => (index < *exponent).then(|| child.as_ref()),
            Self::Composite { children, .. } => children.get(index),
        }
    }

    /// Returns the node at the given path of child indices.
    pub fn get(&self, path: &[usize]) -> Option<&BasisDescription> {
        match path.split_first() {
            None => Some(self),
            Some((&first, rest)) => self.child(first)?.get(rest),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Lagrange { .. })
    }
}

impl Display for BasisDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lagrange { order } => write!(f, "Lagrange<{}>", order),
            Self::Power { child, exponent, .. } if *exponent == 1 => write!(f, "{}", child),
            Self::Power { child, exponent, .. } => write!(f, "[{}]^{}", child, exponent),
            Self::Composite { children, .. } => {
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " * ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Combines two descriptions into a composite node with two children.
impl Mul for BasisDescription {
    type Output = BasisDescription;

    fn mul(self, rhs: Self) -> Self::Output {
        BasisDescription::composite(vec![self, rhs])
    }
}
