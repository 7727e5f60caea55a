//! USignals Core
//!
//! This crate provides a minimal reactive-value engine. It implements:
//!
//! - Source signals, written directly by their owner
//! - Derived signals, recomputed from their dependencies on every change
//! - *touched* and *distinct* change notifications
//! - Construction-time cycle detection and explicit disposal
//!
//! # Architecture
//!
//! - `reactive`: the `Signal` type, its notification channels and options
//! - `graph`: node identity and the cycle check
//! - `error`: the `SignalError` type
//!
//! Everything runs synchronously on the caller's thread. A write returns
//! after every transitive dependent has recomputed.
//!
//! # Example
//!
//! ```rust,ignore
//! use usignals_core::Signal;
//!
//! let count = Signal::new(2);
//!
//! let count_clone = count.clone();
//! let doubled = Signal::derived(move || count_clone.get() * 2, &[&count])?;
//!
//! doubled.on_distinct(|| println!("doubled changed"));
//!
//! count.set(5)?;
//! assert_eq!(doubled.get(), 10);
//! ```

pub mod error;
pub mod graph;
pub mod reactive;

pub use error::{BoxError, Result, SignalError};
pub use graph::{NodeId, NodeKind};
pub use reactive::{Channel, Observable, Signal, SignalOptions, SubscriberId};
