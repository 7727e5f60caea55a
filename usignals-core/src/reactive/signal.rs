//! Signal Implementation
//!
//! A Signal is the only reactive primitive. It holds a value and, when it is
//! derived, the compute function and dependencies that produce that value.
//!
//! # How Signals Work
//!
//! 1. A source signal is written directly with [`Signal::set`].
//!
//! 2. A derived signal declares its dependencies up front. Its recompute
//!    handler is subscribed to each dependency's *touched* channel, and it
//!    evaluates once during construction.
//!
//! 3. Every write or recompute fires *touched*; *distinct* fires only when the
//!    new value differs from the previous one.
//!
//! 4. Propagation is depth first and synchronous: a write returns only after
//!    every transitive dependent has recomputed. A dependent reached through
//!    two paths recomputes once per path.
//!
//! # Ownership
//!
//! A derived signal holds its dependencies strongly. The handler it leaves in
//! a dependency's channel only holds a weak reference back, so dropping the
//! last handle of a derived signal frees it and unlinks it.
//!
//! # Locking
//!
//! Per-node state sits behind a `RwLock`. No lock is held while a compute
//! function, an equality function or a subscriber runs.

use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use super::context::EvaluationGuard;
use super::observable::Observable;
use super::options::{partial_eq, EqualsFn, SignalOptions};
use super::subscriber::{Channel, SubscriberId};
use crate::error::{BoxError, Result, SignalError};
use crate::graph::{check_acyclic, NodeId, NodeKind};

type ComputeFn<T> = Box<dyn Fn() -> std::result::Result<T, BoxError> + Send + Sync>;

/// Subscription of a derived signal to one of its dependencies.
struct Link {
    node: Arc<dyn Observable>,
    subscription: SubscriberId,
}

struct State<T> {
    value: T,
    dependencies: Vec<Link>,
    disposed: bool,
}

struct SignalInner<T> {
    id: NodeId,
    label: Option<Cow<'static, str>>,

    /// Present iff the signal is derived. Never changes.
    compute: Option<ComputeFn<T>>,
    equals: EqualsFn<T>,

    state: RwLock<State<T>>,

    /// True while `compute` runs and its notifications go out.
    evaluating: AtomicBool,

    touched: Channel,
    distinct: Channel,
}

/// A reactive value, either set directly (source) or derived from other
/// signals (derived).
///
/// `Signal` is a handle; clones share the same node.
///
/// # Example
///
/// ```rust,ignore
/// let a = Signal::new(5);
/// let b = Signal::new(10);
///
/// let (a2, b2) = (a.clone(), b.clone());
/// let c = Signal::derived(move || a2.get() + b2.get(), &[&a, &b])?;
///
/// let c2 = c.clone();
/// let d = Signal::derived(move || c2.get() * 2, &[&c])?;
///
/// a.set(15)?;
/// assert_eq!(d.get(), 50);
/// ```
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Signal<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a source signal with the given initial value.
    pub fn new(value: T) -> Self {
        Self::source_with(value, SignalOptions::new())
    }

    /// Create a derived signal.
    ///
    /// `compute` runs once immediately and again whenever a dependency is
    /// touched. It may read any signal; only `dependencies` trigger it.
    pub fn derived<F>(compute: F, dependencies: &[&dyn Observable]) -> Result<Self>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::derived_with(compute, dependencies, SignalOptions::new())
    }

    /// Create a derived signal whose compute function can fail.
    ///
    /// A failure is returned as [`SignalError::ComputeFailure`] to whoever
    /// triggered the evaluation and leaves the cached value untouched.
    pub fn try_derived<F, E>(compute: F, dependencies: &[&dyn Observable]) -> Result<Self>
    where
        F: Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::try_derived_with(compute, dependencies, SignalOptions::new())
    }

    /// Create a source signal with explicit options.
    pub fn source_with(value: T, options: SignalOptions<T>) -> Self {
        let id = NodeId::new();
        let (label, equals) = options.into_parts(partial_eq);
        debug!(node = %id, label = ?label, kind = "source", "signal created");

        Self {
            inner: Arc::new(SignalInner {
                id,
                label,
                compute: None,
                equals,
                state: RwLock::new(State {
                    value,
                    dependencies: Vec::new(),
                    disposed: false,
                }),
                evaluating: AtomicBool::new(false),
                touched: Channel::new(),
                distinct: Channel::new(),
            }),
        }
    }

    /// Create a derived signal with explicit options.
    pub fn derived_with<F>(
        compute: F,
        dependencies: &[&dyn Observable],
        options: SignalOptions<T>,
    ) -> Result<Self>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::build(
            NodeId::new(),
            Box::new(move || Ok(compute())),
            dependencies,
            options,
        )
    }

    /// Create a derived signal with a fallible compute function and explicit
    /// options.
    pub fn try_derived_with<F, E>(
        compute: F,
        dependencies: &[&dyn Observable],
        options: SignalOptions<T>,
    ) -> Result<Self>
    where
        F: Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::build(
            NodeId::new(),
            Box::new(move || compute().map_err(Into::into)),
            dependencies,
            options,
        )
    }

    /// Validate, evaluate once, then subscribe. Nothing is subscribed unless
    /// every step before it succeeded.
    fn build(
        id: NodeId,
        compute: ComputeFn<T>,
        dependencies: &[&dyn Observable],
        options: SignalOptions<T>,
    ) -> Result<Self> {
        if dependencies.is_empty() {
            return Err(SignalError::InvalidConstruction);
        }

        let dependencies: Vec<Arc<dyn Observable>> =
            dependencies.iter().map(|dependency| dependency.share()).collect();
        check_acyclic(id, &dependencies)?;

        let value = compute().map_err(|source| SignalError::ComputeFailure { node: id, source })?;

        let (label, equals) = options.into_parts(partial_eq);
        let inner = Arc::new(SignalInner {
            id,
            label,
            compute: Some(compute),
            equals,
            state: RwLock::new(State {
                value,
                dependencies: Vec::with_capacity(dependencies.len()),
                disposed: false,
            }),
            evaluating: AtomicBool::new(false),
            touched: Channel::new(),
            distinct: Channel::new(),
        });

        let links = dependencies
            .into_iter()
            .map(|node| {
                let weak = Arc::downgrade(&inner);
                let subscription = node.touched().subscribe_fallible(move || match weak.upgrade() {
                    Some(inner) => inner.recompute(),
                    None => Ok(()),
                });
                Link { node, subscription }
            })
            .collect::<Vec<_>>();

        let upstream: Vec<NodeId> = links.iter().map(|link| link.node.node_id()).collect();
        debug!(
            node = %id,
            label = ?inner.label,
            kind = "derived",
            dependencies = ?upstream,
            "signal created"
        );
        inner.state.write().dependencies = links;

        Ok(Self { inner })
    }

    /// Get the signal's unique ID.
    pub fn id(&self) -> NodeId {
        self.inner.id
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    pub fn kind(&self) -> NodeKind {
        if self.inner.compute.is_some() {
            NodeKind::Derived
        } else {
            NodeKind::Source
        }
    }

    pub fn is_derived(&self) -> bool {
        self.kind().is_derived()
    }

    /// Get a clone of the current value. Never recomputes.
    pub fn get(&self) -> T {
        self.inner.state.read().value.clone()
    }

    /// Borrow the current value.
    ///
    /// `f` runs under a read lock; it may read signals but must not write
    /// this one.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.state.read().value)
    }

    /// Write a source signal.
    ///
    /// Fails with [`SignalError::InvalidMutation`] on a derived signal. The
    /// write is dropped while the node is evaluating. Otherwise the value is
    /// stored, *touched* fires, and *distinct* fires if the value changed.
    /// Dependents recompute before this returns; the first one that fails
    /// aborts propagation and its error is returned.
    pub fn set(&self, value: T) -> Result<()> {
        if self.inner.compute.is_some() {
            return Err(SignalError::InvalidMutation {
                node: self.inner.id,
            });
        }

        if self.inner.evaluating.load(Ordering::Acquire) {
            trace!(node = %self.inner.id, "write dropped, node is evaluating");
            return Ok(());
        }

        let Some(changed) = self.inner.store(value) else {
            trace!(node = %self.inner.id, "write dropped, node is disposed");
            return Ok(());
        };
        trace!(node = %self.inner.id, label = ?self.inner.label, changed, "value written");
        self.inner.notify(changed)
    }

    /// Write a value computed from the current one.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> Result<()> {
        let next = self.with(f);
        self.set(next)
    }

    /// Fire *touched* again for the current value, so dependents recompute
    /// without a change. *distinct* does not fire.
    pub fn refresh(&self) -> Result<()> {
        self.inner.refresh()
    }

    /// Re-run the compute function now. On a source signal this is
    /// [`Signal::refresh`].
    pub fn recompute(&self) -> Result<()> {
        self.inner.recompute()
    }

    /// Channel fired on every write and recompute.
    pub fn touched(&self) -> &Channel {
        &self.inner.touched
    }

    /// Channel fired when a write or recompute changes the value.
    pub fn distinct(&self) -> &Channel {
        &self.inner.distinct
    }

    pub fn on_touched<F>(&self, notify: F) -> SubscriberId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.touched.subscribe(notify)
    }

    pub fn on_distinct<F>(&self, notify: F) -> SubscriberId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.distinct.subscribe(notify)
    }

    pub fn is_evaluating(&self) -> bool {
        self.inner.evaluating.load(Ordering::Acquire)
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.state.read().disposed
    }

    /// Number of dependencies this signal is subscribed to.
    pub fn dependency_count(&self) -> usize {
        self.inner.state.read().dependencies.len()
    }
}

impl<T> Signal<T>
where
    T: Clone + Default + PartialEq + Send + Sync + 'static,
{
    /// Detach the signal from the graph.
    ///
    /// Unsubscribes from every dependency, clears both channels and resets
    /// the value to `T::default()`. Dependents of this signal stay subscribed
    /// but never hear from it again. Disposing twice is a no-op.
    pub fn dispose(&self) {
        let (links, previous) = {
            let mut state = self.inner.state.write();
            if state.disposed {
                return;
            }
            state.disposed = true;
            (
                std::mem::take(&mut state.dependencies),
                std::mem::take(&mut state.value),
            )
        };
        drop(previous);

        unlink(links);
        self.inner.touched.clear();
        self.inner.distinct.clear();
        debug!(node = %self.inner.id, label = ?self.inner.label, "signal disposed");
    }
}

impl<T> SignalInner<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Store `next`, returning whether it differs from the previous value.
    /// A disposed node keeps its default value and yields `None`.
    fn store(&self, next: T) -> Option<bool> {
        let previous = {
            let mut state = self.state.write();
            if state.disposed {
                return None;
            }
            std::mem::replace(&mut state.value, next.clone())
        };
        Some(!(self.equals)(&previous, &next))
    }

    fn notify(&self, changed: bool) -> Result<()> {
        if self.state.read().disposed {
            return Ok(());
        }
        trace!(node = %self.id, changed, "notifying");
        self.touched.emit()?;
        if changed {
            self.distinct.emit()?;
        }
        Ok(())
    }

    fn refresh(&self) -> Result<()> {
        trace!(node = %self.id, label = ?self.label, "refresh");
        self.notify(false)
    }

    fn recompute(&self) -> Result<()> {
        let Some(compute) = &self.compute else {
            return self.refresh();
        };

        if self.state.read().disposed {
            return Ok(());
        }

        let Some(_guard) = EvaluationGuard::enter(&self.evaluating) else {
            trace!(node = %self.id, "recompute skipped, node is already evaluating");
            return Ok(());
        };

        let next = compute().map_err(|source| SignalError::ComputeFailure {
            node: self.id,
            source,
        })?;
        let Some(changed) = self.store(next) else {
            trace!(node = %self.id, "disposed while evaluating, result dropped");
            return Ok(());
        };
        trace!(node = %self.id, label = ?self.label, changed, "recomputed");

        self.notify(changed)
    }
}

impl<T> Drop for SignalInner<T> {
    fn drop(&mut self) {
        let links = std::mem::take(&mut self.state.get_mut().dependencies);
        if !links.is_empty() {
            trace!(node = %self.id, "dropped without dispose, unlinking");
            unlink(links);
        }
    }
}

fn unlink(links: Vec<Link>) {
    for link in links {
        link.node.touched().unsubscribe(link.subscription);
    }
}

impl<T> Observable for Signal<T>
where
    T: Send + Sync + 'static,
{
    fn node_id(&self) -> NodeId {
        self.inner.id
    }

    fn touched(&self) -> &Channel {
        &self.inner.touched
    }

    fn upstream(&self) -> Vec<Arc<dyn Observable>> {
        self.inner
            .state
            .read()
            .dependencies
            .iter()
            .map(|link| Arc::clone(&link.node))
            .collect()
    }

    fn share(&self) -> Arc<dyn Observable> {
        Arc::new(self.clone())
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner.state.read().value, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("Signal")
            .field("id", &self.inner.id)
            .field("label", &self.inner.label)
            .field("derived", &self.inner.compute.is_some())
            .field("value", &state.value)
            .field("dependency_count", &state.dependencies.len())
            .field("disposed", &state.disposed)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicI32;

    fn counter() -> (Arc<AtomicI32>, impl Fn() + Send + Sync + 'static) {
        let count = Arc::new(AtomicI32::new(0));
        let count_clone = count.clone();
        (count, move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn source_stores_initial_value() {
        let signal = Signal::new(10);
        assert_eq!(signal.get(), 10);
        assert_eq!(signal.kind(), NodeKind::Source);
        assert_eq!(signal.dependency_count(), 0);
    }

    #[test]
    fn set_updates_value() {
        let signal = Signal::new(5);
        signal.set(20).unwrap();
        assert_eq!(signal.get(), 20);
    }

    #[test]
    fn update_uses_current_value() {
        let signal = Signal::new(10);
        signal.update(|v| v + 5).unwrap();
        assert_eq!(signal.get(), 15);
    }

    #[test]
    fn unchanged_write_is_touched_not_distinct() {
        let signal = Signal::new(1);
        let (touched, on_touched) = counter();
        let (distinct, on_distinct) = counter();
        signal.on_touched(on_touched);
        signal.on_distinct(on_distinct);

        signal.set(1).unwrap();
        assert_eq!(touched.load(Ordering::SeqCst), 1);
        assert_eq!(distinct.load(Ordering::SeqCst), 0);

        signal.set(2).unwrap();
        assert_eq!(touched.load(Ordering::SeqCst), 2);
        assert_eq!(distinct.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn derived_rejects_direct_write() {
        let flag = Signal::new(true);
        let signal = Signal::derived(|| 42, &[&flag]).unwrap();

        let result = signal.set(10);
        assert!(matches!(result, Err(SignalError::InvalidMutation { node }) if node == signal.id()));
        assert_eq!(signal.get(), 42);
    }

    #[test]
    fn derived_requires_dependency() {
        let result = Signal::derived(|| 10, &[]);
        assert!(matches!(result, Err(SignalError::InvalidConstruction)));
    }

    #[test]
    fn derived_tracks_other_value_types() {
        let enabled = Signal::new(false);
        let enabled_clone = enabled.clone();
        let label = Signal::derived(
            move || (if enabled_clone.get() { "on" } else { "off" }).to_string(),
            &[&enabled],
        )
        .unwrap();

        assert_eq!(label.get(), "off");
        enabled.set(true).unwrap();
        assert_eq!(label.get(), "on");
    }

    #[test]
    fn refresh_fires_touched_only() {
        let signal = Signal::new(5);
        let (touched, on_touched) = counter();
        let (distinct, on_distinct) = counter();
        signal.on_touched(on_touched);
        signal.on_distinct(on_distinct);

        signal.refresh().unwrap();
        assert_eq!(signal.get(), 5);
        assert_eq!(touched.load(Ordering::SeqCst), 1);
        assert_eq!(distinct.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn refresh_recomputes_dependents() {
        let calls = Arc::new(AtomicI32::new(0));
        let calls_clone = calls.clone();
        let base = Signal::new(1);
        let base_clone = base.clone();
        let _derived = Signal::derived(
            move || {
                calls_clone.fetch_add(1, Ordering::SeqCst);
                base_clone.get()
            },
            &[&base],
        )
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        base.refresh().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn refresh_on_derived_rebroadcasts_without_recompute() {
        let calls = Arc::new(AtomicI32::new(0));
        let calls_clone = calls.clone();
        let base = Signal::new(1);
        let base_clone = base.clone();
        let derived = Signal::derived(
            move || {
                calls_clone.fetch_add(1, Ordering::SeqCst);
                base_clone.get() * 2
            },
            &[&base],
        )
        .unwrap();

        let (touched, on_touched) = counter();
        let (distinct, on_distinct) = counter();
        derived.on_touched(on_touched);
        derived.on_distinct(on_distinct);

        derived.refresh().unwrap();
        assert_eq!(derived.get(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(touched.load(Ordering::SeqCst), 1);
        assert_eq!(distinct.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn recompute_with_equal_result_is_not_distinct() {
        let base = Signal::new(2);
        let base_clone = base.clone();
        let parity = Signal::derived(move || base_clone.get() % 2, &[&base]).unwrap();

        let (touched, on_touched) = counter();
        let (distinct, on_distinct) = counter();
        parity.on_touched(on_touched);
        parity.on_distinct(on_distinct);

        base.set(4).unwrap();
        assert_eq!(touched.load(Ordering::SeqCst), 1);
        assert_eq!(distinct.load(Ordering::SeqCst), 0);

        base.set(3).unwrap();
        assert_eq!(touched.load(Ordering::SeqCst), 2);
        assert_eq!(distinct.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn manual_recompute_reads_fresh_values() {
        let external = Arc::new(AtomicI32::new(1));
        let external_clone = external.clone();
        let trigger = Signal::new(());
        let derived =
            Signal::derived(move || external_clone.load(Ordering::SeqCst), &[&trigger]).unwrap();

        external.store(7, Ordering::SeqCst);
        assert_eq!(derived.get(), 1);

        derived.recompute().unwrap();
        assert_eq!(derived.get(), 7);
    }

    #[test]
    fn compute_failure_keeps_previous_value() {
        let base = Signal::new(1);
        let base_clone = base.clone();
        let checked = Signal::try_derived(
            move || {
                let value = base_clone.get();
                if value < 0 {
                    Err(format!("negative input {value}"))
                } else {
                    Ok(value * 10)
                }
            },
            &[&base],
        )
        .unwrap();

        let result = base.set(-1);
        match result {
            Err(SignalError::ComputeFailure { node, source }) => {
                assert_eq!(node, checked.id());
                assert_eq!(source.to_string(), "negative input -1");
            }
            other => panic!("expected compute failure, got {other:?}"),
        }
        assert_eq!(base.get(), -1);
        assert_eq!(checked.get(), 10);
        assert!(!checked.is_evaluating());

        base.set(3).unwrap();
        assert_eq!(checked.get(), 30);
    }

    #[test]
    fn initial_compute_failure_leaves_no_subscription() {
        let base = Signal::new(0);
        let result = Signal::<i32>::try_derived(|| Err("boom"), &[&base]);

        assert!(matches!(result, Err(SignalError::ComputeFailure { .. })));
        assert!(base.touched().is_empty());
    }

    #[test]
    fn circular_dependency_leaves_no_subscription() {
        let base = Signal::new(0);
        let id = NodeId::new();

        // Claim the id of the node under construction for an existing node.
        let impostor = Signal::<i32> {
            inner: Arc::new(SignalInner {
                id,
                label: None,
                compute: None,
                equals: partial_eq(),
                state: RwLock::new(State {
                    value: 0,
                    dependencies: Vec::new(),
                    disposed: false,
                }),
                evaluating: AtomicBool::new(false),
                touched: Channel::new(),
                distinct: Channel::new(),
            }),
        };

        let result = Signal::<i32>::build(
            id,
            Box::new(|| Ok(1)),
            &[&base, &impostor],
            SignalOptions::new(),
        );

        assert!(matches!(result, Err(SignalError::CircularDependency { node, .. }) if node == id));
        assert!(base.touched().is_empty());
        assert!(impostor.touched().is_empty());
    }

    #[test]
    fn write_while_evaluating_is_dropped() {
        let base = Signal::new(1);
        base.inner.evaluating.store(true, Ordering::SeqCst);

        base.set(2).unwrap();
        assert_eq!(base.get(), 1);

        base.inner.evaluating.store(false, Ordering::SeqCst);
        base.set(2).unwrap();
        assert_eq!(base.get(), 2);
    }

    #[test]
    fn dispose_unlinks_and_resets() {
        let base = Signal::new(1);
        let base_clone = base.clone();
        let derived = Signal::derived(move || base_clone.get() + 1, &[&base]).unwrap();
        let (touched, on_touched) = counter();
        derived.on_touched(on_touched);
        assert_eq!(base.touched().len(), 1);

        derived.dispose();
        assert!(derived.is_disposed());
        assert_eq!(derived.get(), 0);
        assert_eq!(derived.dependency_count(), 0);
        assert!(base.touched().is_empty());
        assert!(derived.touched().is_empty());

        base.set(2).unwrap();
        assert_eq!(base.get(), 2);
        assert_eq!(derived.get(), 0);
        assert_eq!(touched.load(Ordering::SeqCst), 0);

        derived.dispose();
        assert!(derived.is_disposed());
    }

    #[test]
    fn dispose_during_compute_keeps_default() {
        let base = Signal::new(1);
        let base_clone = base.clone();
        let slot: Arc<parking_lot::Mutex<Option<Signal<i32>>>> =
            Arc::new(parking_lot::Mutex::new(None));
        let slot_clone = slot.clone();

        let scaled = Signal::derived(
            move || {
                let value = base_clone.get();
                if value == 2 {
                    if let Some(this) = slot_clone.lock().take() {
                        this.dispose();
                    }
                }
                value * 100
            },
            &[&base],
        )
        .unwrap();
        *slot.lock() = Some(scaled.clone());

        let (touched, on_touched) = counter();
        scaled.on_touched(on_touched);

        base.set(2).unwrap();
        assert!(scaled.is_disposed());
        assert_eq!(scaled.get(), 0);
        assert_eq!(touched.load(Ordering::SeqCst), 0);
        assert!(base.touched().is_empty());
    }

    #[test]
    fn disposed_signal_stays_silent() {
        let signal = Signal::new(1);
        signal.dispose();

        let (touched, on_touched) = counter();
        signal.on_touched(on_touched);
        signal.set(5).unwrap();
        signal.refresh().unwrap();

        assert_eq!(touched.load(Ordering::SeqCst), 0);
        assert_eq!(signal.get(), 0);
    }

    #[test]
    fn dropping_derived_unlinks() {
        let base = Signal::new(1);
        let base_clone = base.clone();
        let derived = Signal::derived(move || base_clone.get(), &[&base]).unwrap();
        assert_eq!(base.touched().len(), 1);

        drop(derived);
        assert!(base.touched().is_empty());
        base.set(2).unwrap();
    }

    #[test]
    fn custom_equals_decides_distinct() {
        let signal = Signal::source_with(
            1.0_f64,
            SignalOptions::new()
                .label("position")
                .equals(|a: &f64, b: &f64| (a - b).abs() < 0.5),
        );
        let (distinct, on_distinct) = counter();
        signal.on_distinct(on_distinct);

        signal.set(1.2).unwrap();
        assert_eq!(distinct.load(Ordering::SeqCst), 0);
        signal.set(2.0).unwrap();
        assert_eq!(distinct.load(Ordering::SeqCst), 1);
        assert_eq!(signal.label(), Some("position"));
    }

    #[test]
    fn display_matches_value() {
        let signal = Signal::new(42);
        assert_eq!(signal.to_string(), "42");
    }

    #[test]
    fn clone_shares_state() {
        let signal1 = Signal::new(0);
        let signal2 = signal1.clone();

        signal1.set(42).unwrap();
        assert_eq!(signal2.get(), 42);
        assert_eq!(signal1.id(), signal2.id());
    }
}
