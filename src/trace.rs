//! Tracing macros for the ISR sweep and scan I/O.
//!
//! With the `tracing` feature enabled these forward to the `tracing` crate;
//! without it they compile to nothing, so the sweep pays no logging cost.

/// Open an info-level span around a sweep, a scan read, or a full ISR run.
///
/// When the `tracing` feature is enabled, this creates a `tracing::info_span!`.
/// When disabled, it returns a `NoopSpan` so `let _span = ...entered();`
/// still type-checks.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Record an info-level result such as the final ISR or a loaded scan shape.
///
/// When the `tracing` feature is disabled the field values are still
/// evaluated, then discarded.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

/// Report sweep progress at debug level as `done` of `total` rows.
///
/// Purely observational; the sweep result never depends on it.
#[cfg(feature = "tracing")]
macro_rules! trace_progress {
    ($name:expr, $done:expr, $total:expr) => {
        tracing::debug!(name: $name, done = $done, total = $total)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_progress {
    ($name:expr, $done:expr, $total:expr) => {
        let _ = ($done, $total);
    };
}

pub(crate) use trace_event;
pub(crate) use trace_progress;
pub(crate) use trace_span;

/// Span guard returned by `trace_span!` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Returns self, standing in for `Span::entered()`.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
