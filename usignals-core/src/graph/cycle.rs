//! Cycle Detection
//!
//! The graph only changes when a derived signal is constructed, so the
//! single check below, run before the new node subscribes to anything, keeps
//! the whole graph acyclic.
//!
//! # Algorithm
//!
//! For each proposed dependency we walk its transitive dependencies depth
//! first. The current path is kept in an ordered set; reaching the node under
//! construction fails with the path that led to it. Shared upstream nodes are
//! simply walked again; graphs are small enough that no memo is kept.

use std::sync::Arc;

use indexmap::IndexSet;
use tracing::trace;

use super::NodeId;
use crate::error::{Result, SignalError};
use crate::reactive::Observable;

/// Fail if `node` is, or is reachable from, any of `dependencies`.
pub fn check_acyclic(node: NodeId, dependencies: &[Arc<dyn Observable>]) -> Result<()> {
    let mut path = IndexSet::new();
    for dependency in dependencies {
        visit(node, dependency.as_ref(), &mut path)?;
        debug_assert!(path.is_empty());
    }
    trace!(node = %node, dependencies = dependencies.len(), "dependency graph is acyclic");
    Ok(())
}

fn visit(node: NodeId, current: &dyn Observable, path: &mut IndexSet<NodeId>) -> Result<()> {
    let id = current.node_id();
    let fresh = path.insert(id);

    if id == node {
        return Err(SignalError::CircularDependency {
            node,
            path: path.iter().copied().collect(),
        });
    }

    // Upstream nodes already form a loop; the walk would never end.
    if !fresh {
        let mut cycle: Vec<NodeId> = path.iter().copied().collect();
        cycle.push(id);
        return Err(SignalError::CircularDependency { node: id, path: cycle });
    }

    for upstream in current.upstream() {
        visit(node, upstream.as_ref(), path)?;
    }

    path.pop();
    Ok(())
}
