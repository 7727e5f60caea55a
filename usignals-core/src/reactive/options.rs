//! Per-signal configuration.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Equality used to decide whether a write is *distinct*.
pub(crate) type EqualsFn<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Options applied when a signal is constructed.
///
/// # Example
///
/// ```rust,ignore
/// let position = Signal::source_with(
///     0.0_f64,
///     SignalOptions::new()
///         .label("position")
///         .equals(|a: &f64, b: &f64| (a - b).abs() < 1e-9),
/// );
/// ```
pub struct SignalOptions<T> {
    pub(crate) label: Option<Cow<'static, str>>,
    pub(crate) equals: Option<EqualsFn<T>>,
}

impl<T> SignalOptions<T> {
    pub fn new() -> Self {
        Self {
            label: None,
            equals: None,
        }
    }

    /// Name shown in tracing output and `Debug`.
    pub fn label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Replace `PartialEq` when deciding whether a new value is distinct.
    pub fn equals<F>(mut self, equals: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.equals = Some(Arc::new(equals));
        self
    }

    pub(crate) fn into_parts(
        self,
        default_equals: impl FnOnce() -> EqualsFn<T>,
    ) -> (Option<Cow<'static, str>>, EqualsFn<T>) {
        let equals = self.equals.unwrap_or_else(default_equals);
        (self.label, equals)
    }
}

impl<T> Default for SignalOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SignalOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalOptions")
            .field("label", &self.label)
            .field("custom_equals", &self.equals.is_some())
            .finish()
    }
}

/// `PartialEq`-based equality.
pub(crate) fn partial_eq<T: PartialEq + 'static>() -> EqualsFn<T> {
    Arc::new(|a: &T, b: &T| a == b)
}
