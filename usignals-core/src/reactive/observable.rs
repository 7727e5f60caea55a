//! Type-erased view of a signal as a graph node.
//!
//! A derived signal may depend on signals of any value type. It only ever
//! needs their identity, their *touched* channel and, for the cycle check,
//! their own dependencies, so dependencies are held as `Arc<dyn Observable>`.

use std::sync::Arc;

use super::subscriber::Channel;
use crate::graph::NodeId;

/// A node that can be declared as a dependency of a derived signal.
pub trait Observable: Send + Sync {
    /// Identity of the node.
    fn node_id(&self) -> NodeId;

    /// Channel fired on every write or recompute of the node.
    fn touched(&self) -> &Channel;

    /// Snapshot of the node's declared dependencies.
    fn upstream(&self) -> Vec<Arc<dyn Observable>>;

    /// Shared, type-erased handle to the node.
    fn share(&self) -> Arc<dyn Observable>;
}
