//! Index merging strategies.
//!
//! A strategy determines how the global multi-index of child `k` of a power or composite
//! basis is turned into a multi-index of the parent:
//!
//! | Strategy                 | Power basis (child index `c`, `n` children)  | Composite basis                  |
//! |--------------------------|----------------------------------------------|----------------------------------|
//! | [`BlockedLexicographic`] | `(k, c...)`                                  | `(k, c...)`                      |
//! | [`BlockedInterleaved`]   | `(c..., k)`                                  | not supported                    |
//! | [`FlatLexicographic`]    | `(k * child_size + c[0], c[1..]...)`         | `(offset_k + c[0], c[1..]...)`   |
//! | [`FlatInterleaved`]      | `(c[0] * n + k, c[1..]...)`                  | not supported                    |
//!
//! Here `child_size` is the top-level size of the child basis and `offset_k` is the sum of
//! the top-level sizes of the children preceding `k`.
//!
//! Interleaved strategies also interleave the local numbering of the children of a power
//! basis, so that the local index `i` belongs to child `i % n`.
use std::fmt::Debug;

pub trait IndexMergingStrategy: Debug + Default + Copy + Send + Sync + 'static {
    /// Whether the child index is stored in a separate multi-index entry.
    const BLOCKED: bool;
    /// Whether the degrees of freedom of the children are interleaved.
    const INTERLEAVED: bool;
}

/// Marker for strategies that keep the degrees of freedom of each child contiguous.
///
/// Only lexicographic strategies can merge the children of a composite basis, since the
/// children may have different sizes.
pub trait LexicographicStrategy: IndexMergingStrategy {}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BlockedLexicographic;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BlockedInterleaved;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FlatLexicographic;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FlatInterleaved;

impl IndexMergingStrategy for BlockedLexicographic {
    const BLOCKED: bool = true;
    const INTERLEAVED: bool = false;
}

impl IndexMergingStrategy for BlockedInterleaved {
    const BLOCKED: bool = true;
    const INTERLEAVED: bool = true;
}

impl IndexMergingStrategy for FlatLexicographic {
    const BLOCKED: bool = false;
    const INTERLEAVED: bool = false;
}

impl IndexMergingStrategy for FlatInterleaved {
    const BLOCKED: bool = false;
    const INTERLEAVED: bool = true;
}

impl LexicographicStrategy for BlockedLexicographic {}
impl LexicographicStrategy for FlatLexicographic {}
