//! Ordered strategy chains.
//!
//! A cascade is a list of named parsing attempts. The driver runs them in
//! order and adopts the first output that recognized anything; the
//! remaining strategies never run. Strategies do not fail: recognizing
//! nothing is an empty output.

use std::collections::BTreeMap;

/// Output of a parsing attempt that can be empty.
pub trait Recognized {
    /// Number of records recognized.
    fn record_count(&self) -> usize;

    fn is_unrecognized(&self) -> bool {
        self.record_count() == 0
    }
}

impl<T> Recognized for Vec<T> {
    fn record_count(&self) -> usize {
        self.len()
    }
}

impl<K, V> Recognized for BTreeMap<K, V> {
    fn record_count(&self) -> usize {
        self.len()
    }
}

/// A named parsing attempt.
pub struct Strategy<T> {
    pub name: &'static str,
    pub attempt: fn(&str) -> T,
}

impl<T> Strategy<T> {
    pub const fn new(name: &'static str, attempt: fn(&str) -> T) -> Self {
        Self { name, attempt }
    }
}

/// The adopted output and the strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cascaded<T> {
    pub output: T,
    /// `None` when every strategy came back empty.
    pub strategy: Option<&'static str>,
}

/// Run `strategies` over `text` in order, stopping at the first
/// non-empty output.
pub fn run_cascade<T>(text: &str, strategies: &[Strategy<T>]) -> Cascaded<T>
where
    T: Recognized + Default,
{
    for strategy in strategies {
        let output = (strategy.attempt)(text);
        if !output.is_unrecognized() {
            tracing::debug!(
                strategy = strategy.name,
                records = output.record_count(),
                "cascade strategy adopted"
            );
            return Cascaded {
                output,
                strategy: Some(strategy.name),
            };
        }
        tracing::trace!(strategy = strategy.name, "cascade strategy recognized nothing");
    }

    tracing::warn!("no cascade strategy recognized any records");
    Cascaded {
        output: T::default(),
        strategy: None,
    }
}
