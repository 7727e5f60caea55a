//! Reactive Primitives
//!
//! This module implements the signal: a value that is either written
//! directly or derived from other signals, and that notifies observers when
//! it is written or recomputed.
//!
//! # Concepts
//!
//! ## Sources and derived signals
//!
//! A source signal is written by its owner. A derived signal is produced by a
//! compute function over a fixed, non-empty list of dependencies declared at
//! construction. Dependencies may hold any value type; they are seen through
//! the [`Observable`] trait.
//!
//! ## Channels
//!
//! Each signal has two [`Channel`]s. *touched* fires on every write and
//! recompute. *distinct* fires only when the value changed. Derived signals
//! listen on their dependencies' *touched* channel.
//!
//! # Implementation Notes
//!
//! Propagation is push based, synchronous and depth first. There is no
//! batching and no topological ordering: a node reached through two changed
//! paths recomputes twice. A node that is evaluating ignores both writes and
//! further recompute requests, which stops a compute function from recursing
//! into itself.

mod context;
mod observable;
mod options;
mod signal;
mod subscriber;

pub use observable::Observable;
pub use options::SignalOptions;
pub use signal::Signal;
pub use subscriber::{Channel, SubscriberId};
