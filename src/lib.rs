//! Function space bases with blocked multi-index numbering for finite element computations.
//!
//! The central abstraction is [`FunctionSpaceBasis`](basis::FunctionSpaceBasis), describing
//! how the degrees of freedom of a (possibly vector-valued or mixed) finite element space on
//! a [grid view](grid::GridView) are numbered, both locally on each element and globally.
//! [Container descriptors](container_descriptors) describe the block structure of coefficient
//! containers matching the global numbering.
use nalgebra::RealField;

pub mod basis;
pub mod connectivity;
pub mod element;
pub mod entity_set;
pub mod error;
pub mod grid;
pub mod mesh;
pub mod multi_index;
pub mod quadrature;
pub mod traversal;

pub mod container_descriptors {
    pub use fenris_container_descriptors::*;
}

#[cfg(feature = "proptest")]
pub mod proptest;

pub extern crate nalgebra;

/// Trait alias for the real scalar types supported by the crate.
pub trait Real: RealField + Copy {}

impl<T> Real for T where T: RealField + Copy {}
