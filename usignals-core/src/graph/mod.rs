//! Dependency Graph
//!
//! The dependency graph is a directed acyclic graph where:
//!
//! - Nodes are signals, either sources or derived
//! - Edges are declared dependencies: if B is derived from A, A's *touched*
//!   channel holds B's recompute handler
//!
//! Edges are fixed when a derived signal is constructed and only ever removed
//! by disposal. There is no way to add an edge later, so the cycle check in
//! [`check_acyclic`] runs exactly once per node.

mod cycle;
mod node;

pub use cycle::check_acyclic;
pub use node::{NodeId, NodeKind};
