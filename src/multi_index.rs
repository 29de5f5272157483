use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::fmt::{Debug, Display};
use std::iter::FromIterator;
use std::ops::{Deref, DerefMut};

/// A structured global degree of freedom index.
///
/// Entry 0 is the outermost block selector, subsequent entries refine the position
/// within that block. A multi-index of length one is a plain flat index.
///
/// Multi-indices of up to four entries are stored inline.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MultiIndex(SmallVec<[usize; 4]>);

impl MultiIndex {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    pub fn from_slice(indices: &[usize]) -> Self {
        Self(SmallVec::from_slice(indices))
    }

    pub fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    /// Inserts `index` as the new outermost entry.
    pub fn push_front(&mut self, index: usize) {
        self.0.insert(0, index);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Replaces the contents with a single flat index, reusing the storage.
    pub fn set_flat(&mut self, index: usize) {
        self.0.clear();
        self.0.push(index);
    }

    /// Returns the index if the multi-index has exactly one entry.
    pub fn as_flat(&self) -> Option<usize> {
        match self.0.as_slice() {
            &[index] => Some(index),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl Deref for MultiIndex {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MultiIndex {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[usize; N]> for MultiIndex {
    fn from(indices: [usize; N]) -> Self {
        Self::from_slice(&indices)
    }
}

impl<'a> From<&'a [usize]> for MultiIndex {
    fn from(indices: &'a [usize]) -> Self {
        Self::from_slice(indices)
    }
}

impl FromIterator<usize> for MultiIndex {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Debug for MultiIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_slice())
    }
}

impl Display for MultiIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, index) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, ")")
    }
}
