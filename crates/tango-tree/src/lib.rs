//! Tango tree: an ordered set whose binary search tree never changes shape,
//! partitioned into preferred paths that each live in a splay tree.
//!
//! An access marks the root-to-key search path as preferred and regroups
//! the auxiliary trees to match, so a key set sits in `O(log log n)`
//! auxiliary trees along any search path.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`tango`] | [`Tango`], the public set surface |
//! [`reference`] | [`ReferenceTree`](reference::ReferenceTree): fixed-shape BST, search paths, removal |
//! [`auxiliary`] | [`AuxForest`](auxiliary::AuxForest): one splay tree per preferred path |
//! [`decomposition`] | preferred marking, full rebuild, incremental cut and link |
//! [`config`] | [`TangoConfig`], [`RebuildPolicy`] |
//! [`error`] | [`TangoError`], [`InvariantViolation`] |
//!
//! Enable the `tracing` feature to emit `tracing` events for builds,
//! accesses and structural updates.

pub mod auxiliary;
pub mod config;
pub mod decomposition;
pub mod error;
mod invariants;
pub mod reference;
pub mod tango;
mod trace;

pub use config::{RebuildPolicy, TangoConfig};
pub use error::{InvariantViolation, TangoError};
pub use tango::Tango;
