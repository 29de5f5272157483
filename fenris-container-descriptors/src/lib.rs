//! Lightweight descriptions of the (hierarchical) size and block structure of coefficient
//! containers.
//!
//! A container descriptor is a reduced container interface: it knows how many children a
//! block has ([`ContainerDescriptor::size`]) and how to access each child descriptor
//! ([`ContainerDescriptor::child`], or simply indexing with `[]`). A tree of descriptors
//! mirrors exactly the nesting of a blocked coefficient container that can be accessed
//! by the multi-indices of a function space basis.
//!
//! The descriptor is *not* a container. It holds no coefficients and performs no bounds
//! checking beyond what is needed for memory safety.
//!
//! ```
//! use fenris_container_descriptors::{flat_vector, make_descriptor, ContainerDescriptor};
//!
//! // A velocity block with 18 entries followed by a pressure block with 4 entries
//! let descriptor = make_descriptor(vec![flat_vector(18), flat_vector(4)]);
//! assert!(matches!(descriptor, ContainerDescriptor::Array(_)));
//! assert_eq!(descriptor.size(), 2);
//! assert_eq!(descriptor[0].size(), 18);
//! assert_eq!(descriptor[1].size(), 4);
//! assert_eq!(descriptor.scalar_count(), Some(22));
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;
use std::ops::Index;

/// A node in a container descriptor tree.
///
/// The variants form a closed set. *Static* and *dynamic* refer to whether the number of
/// children is considered part of the structural type of the node, which affects
/// [`ContainerDescriptor::is_same_type`] and therefore the representation chosen by
/// [`make_descriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerDescriptor {
    /// Fallback descriptor if nothing else fits.
    Unknown,
    /// Placeholder for a single scalar value. Has no children.
    Value,
    /// Children of possibly different structure, static size.
    Tuple(Vec<ContainerDescriptor>),
    /// Children of the same structure, static size.
    Array(Vec<ContainerDescriptor>),
    /// Children of the same structure, dynamic size.
    Vector(Vec<ContainerDescriptor>),
    /// `size` identical children sharing a single stored child, static size.
    UniformArray { size: usize, child: Box<ContainerDescriptor> },
    /// `size` identical children sharing a single stored child, dynamic size.
    UniformVector { size: usize, child: Box<ContainerDescriptor> },
}

/// The number of children of a uniform descriptor, together with whether the number
/// is a static or a dynamic property.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Extent {
    Static(usize),
    Dynamic(usize),
}

impl Default for ContainerDescriptor {
    fn default() -> Self {
        Self::Unknown
    }
}

impl ContainerDescriptor {
    /// The number of direct children.
    ///
    /// Both [`ContainerDescriptor::Value`] and [`ContainerDescriptor::Unknown`] have size zero.
    pub fn size(&self) -> usize {
        match self {
            Self::Unknown | Self::Value => 0,
            Self::Tuple(children) | Self::Array(children) | Self::Vector(children) => children.len(),
            Self::UniformArray { size, .. } | Self::UniformVector { size, .. } => *size,
        }
    }

    /// Access the child descriptor with the given index.
    ///
    /// Uniform descriptors return their single stored child for every index.
    ///
    /// Accessing a child of a `Value` (or `Unknown`) placeholder is a logic error. It is
    /// caught by a debug assertion, and returns the placeholder itself in release builds.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for a non-uniform descriptor. Uniform descriptors
    /// only check the index in debug builds.
    pub fn child(&self, index: usize) -> &ContainerDescriptor {
        match self {
            Self::Unknown | Self::Value => {
                debug_assert!(false, "Value placeholders do not have children.");
                self
            }
            Self::Tuple(children) | Self::Array(children) | Self::Vector(children) => &children[index],
            Self::UniformArray { size, child } | Self::UniformVector { size, child } => {
                debug_assert!(index < *size, "Index {index} out of bounds for size {size}.");
                child
            }
        }
    }

    /// Access the descriptor found by successively indexing with each entry of `path`.
    pub fn descendant(&self, path: &[usize]) -> &ContainerDescriptor {
        path.iter().fold(self, |node, &i| node.child(i))
    }

    /// Iterate over all children in order.
    ///
    /// For uniform descriptors the same child is yielded `size` times.
    pub fn children(&self) -> impl '_ + Iterator<Item = &ContainerDescriptor> {
        (0..self.size()).map(move |i| self.child(i))
    }

    /// Whether the node is a leaf placeholder (`Value` or `Unknown`).
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Unknown | Self::Value)
    }

    /// Whether the descriptor describes a flat container, i.e. a single block of scalar values.
    pub fn is_flat(&self) -> bool {
        match self {
            Self::UniformArray { child, .. } | Self::UniformVector { child, .. } => **child == Self::Value,
            Self::Tuple(children) | Self::Array(children) | Self::Vector(children) => {
                children.iter().all(|child| *child == Self::Value)
            }
            Self::Unknown | Self::Value => false,
        }
    }

    /// The total number of scalar values in a container described by this descriptor.
    ///
    /// Returns `None` if the tree contains an `Unknown` node.
    pub fn scalar_count(&self) -> Option<usize> {
        match self {
            Self::Unknown => None,
            Self::Value => Some(1),
            Self::Tuple(children) | Self::Array(children) | Self::Vector(children) => children
                .iter()
                .map(ContainerDescriptor::scalar_count)
                .sum(),
            Self::UniformArray { size, child } | Self::UniformVector { size, child } => {
                child.scalar_count().map(|count| size * count)
            }
        }
    }

    /// The maximum depth of any `Value` in the tree, i.e. the length of the longest
    /// multi-index that can address a scalar in the described container.
    pub fn depth(&self) -> usize {
        match self {
            Self::Unknown | Self::Value => 0,
            Self::Tuple(children) | Self::Array(children) | Self::Vector(children) => {
                1 + children.iter().map(ContainerDescriptor::depth).max().unwrap_or(0)
            }
            Self::UniformArray { child, .. } | Self::UniformVector { child, .. } => 1 + child.depth(),
        }
    }

    /// Whether two descriptors have the same structural type.
    ///
    /// Two descriptors have the same type if they are the same variant with children of
    /// the same type, and, for the static variants, the same number of children. The number
    /// of children of the dynamic variants is a runtime property and is ignored.
    pub fn is_same_type(&self, other: &ContainerDescriptor) -> bool {
        use ContainerDescriptor::*;
        match (self, other) {
            (Unknown, Unknown) | (Value, Value) => true,
            (Tuple(a), Tuple(b)) => a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.is_same_type(y)),
            // All children of an array have the same type, so comparing the first suffices
            (Array(a), Array(b)) => {
                a.len() == b.len()
                    && a.first()
                        .zip(b.first())
                        .map_or(true, |(x, y)| x.is_same_type(y))
            }
            (Vector(a), Vector(b)) => a
                .first()
                .zip(b.first())
                .map_or(true, |(x, y)| x.is_same_type(y)),
            (UniformArray { size: n, child: a }, UniformArray { size: m, child: b }) => n == m && a.is_same_type(b),
            (UniformVector { child: a, .. }, UniformVector { child: b, .. }) => a.is_same_type(b),
            _ => false,
        }
    }
}

impl Index<usize> for ContainerDescriptor {
    type Output = ContainerDescriptor;

    fn index(&self, index: usize) -> &Self::Output {
        self.child(index)
    }
}

impl Display for ContainerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_list(f: &mut fmt::Formatter<'_>, children: &[ContainerDescriptor]) -> fmt::Result {
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{child}")?;
            }
            Ok(())
        }

        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Value => write!(f, "Value"),
            Self::Tuple(children) => {
                write!(f, "Tuple(")?;
                write_list(f, children)?;
                write!(f, ")")
            }
            Self::Array(children) => {
                write!(f, "Array[")?;
                write_list(f, children)?;
                write!(f, "]")
            }
            Self::Vector(children) => {
                write!(f, "Vector[")?;
                write_list(f, children)?;
                write!(f, "]")
            }
            Self::UniformArray { size, child } => write!(f, "UniformArray<{child}; {size}>"),
            Self::UniformVector { size, child } => write!(f, "UniformVector<{child}>({size})"),
        }
    }
}

/// Generate a descriptor with the given children, each stored independently.
///
/// If all children have the same type (see [`ContainerDescriptor::is_same_type`]), the compact
/// homogeneous [`ContainerDescriptor::Array`] is used, otherwise [`ContainerDescriptor::Tuple`].
/// The choice does not affect the observable `size` and child access.
pub fn make_descriptor(children: Vec<ContainerDescriptor>) -> ContainerDescriptor {
    let homogeneous = children
        .split_first()
        .map_or(true, |(first, rest)| rest.iter().all(|child| first.is_same_type(child)));
    if homogeneous {
        ContainerDescriptor::Array(children)
    } else {
        ContainerDescriptor::Tuple(children)
    }
}

/// Generate a descriptor for a dynamically sized sequence of children of the same type.
pub fn make_vector_descriptor(children: Vec<ContainerDescriptor>) -> ContainerDescriptor {
    debug_assert!(
        children
            .split_first()
            .map_or(true, |(first, rest)| rest.iter().all(|child| first.is_same_type(child))),
        "All children of a vector descriptor must have the same type."
    );
    ContainerDescriptor::Vector(children)
}

/// Generate a uniform descriptor storing only a single child.
pub fn make_uniform_descriptor(extent: Extent, child: ContainerDescriptor) -> ContainerDescriptor {
    match extent {
        Extent::Static(size) => uniform_array(size, child),
        Extent::Dynamic(size) => uniform_vector(size, child),
    }
}

pub fn uniform_array(size: usize, child: ContainerDescriptor) -> ContainerDescriptor {
    ContainerDescriptor::UniformArray {
        size,
        child: Box::new(child),
    }
}

pub fn uniform_vector(size: usize, child: ContainerDescriptor) -> ContainerDescriptor {
    ContainerDescriptor::UniformVector {
        size,
        child: Box::new(child),
    }
}

/// A uniform array of value placeholders.
pub fn flat_array(size: usize) -> ContainerDescriptor {
    uniform_array(size, ContainerDescriptor::Value)
}

/// A uniform vector of value placeholders.
pub fn flat_vector(size: usize) -> ContainerDescriptor {
    uniform_vector(size, ContainerDescriptor::Value)
}
