// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric sinks counted alongside log calls.
//!
//! A logger with an attached [`Metric`] records one occurrence on every
//! `info` and `error` call, whether or not the line passes the threshold.  That
//! way log verbosity can be turned down without losing occurrence counts.

use crate::context::ContextCarrier;
use crate::value::Value;
use std::fmt::Debug;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

pub trait Metric: Debug + Send + Sync {
    /// Records `value` occurrences.  `ctx` may be used for labels.
    fn record_context(&self, ctx: &dyn ContextCarrier, value: f64);
}

/// A [`Metric`] that counts in memory.
///
/// ```rust
/// use kvlog::{CountingMetric, InMemorySink, Level, Logger};
/// use std::sync::Arc;
///
/// let errors = Arc::new(CountingMetric::new());
/// let logger = Logger::new(Arc::new(InMemorySink::new())).attach_metric(errors.clone());
///
/// logger.set_level(Level::Error);
/// logger.info("suppressed, but counted", &[]);
/// assert_eq!(errors.count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CountingMetric {
    count: AtomicU64,
    last_context: Mutex<Vec<Value>>,
}

impl CountingMetric {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of recorded values, truncated to whole occurrences.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// The context key-values seen by the most recent record.
    pub fn last_context(&self) -> Vec<Value> {
        self.last_context
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Metric for CountingMetric {
    fn record_context(&self, ctx: &dyn ContextCarrier, value: f64) {
        self.count.fetch_add(value as u64, Ordering::Relaxed);
        *self
            .last_context
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = ctx.key_values();
    }
}

#[cfg(feature = "metrics")]
pub use counter::MetricsCounter;

#[cfg(feature = "metrics")]
mod counter {
    use super::Metric;
    use crate::context::ContextCarrier;

    /**
    Records to a counter of the installed `metrics` recorder.

    Context key-values become labels; pairs whose key is not a string are
    skipped.  The counter handle is resolved on every record since labels
    depend on the context.
    */
    #[derive(Debug, Clone)]
    pub struct MetricsCounter {
        name: String,
    }

    impl MetricsCounter {
        pub fn new(name: impl Into<String>) -> Self {
            Self { name: name.into() }
        }

        pub fn name(&self) -> &str {
            &self.name
        }
    }

    impl Metric for MetricsCounter {
        fn record_context(&self, ctx: &dyn ContextCarrier, value: f64) {
            let key_values = ctx.key_values();
            let labels: Vec<metrics::Label> = key_values
                .chunks(2)
                .filter_map(|pair| match pair {
                    [key, value] => Some(metrics::Label::new(
                        key.as_str()?.to_string(),
                        value.to_string(),
                    )),
                    _ => None,
                })
                .collect();
            metrics::counter!(self.name.clone(), labels).increment(value as u64);
        }
    }

}
