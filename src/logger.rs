//SPDX-License-Identifier: MIT OR Apache-2.0
use crate::config::Config;
use crate::context::{Context, ContextCarrier};
use crate::level::Level;
use crate::metric::Metric;
use crate::sink::Sink;
use crate::threshold::Threshold;
use crate::value::{Value, extend_pairs};
use std::sync::Arc;

#[derive(Debug)]
struct LoggerInner {
    context: Arc<dyn ContextCarrier>,
    fields: Vec<Value>,
    metric: Option<Arc<dyn Metric>>,
    threshold: Threshold,
    sink: Arc<dyn Sink>,
}

/**
A leveled key-value logger.

Loggers are immutable snapshots.  [`Logger::with`], [`Logger::attach_context`]
and [`Logger::attach_metric`] each return a new logger; the only state they
share with their ancestor that can change is the severity threshold, so
[`Logger::set_level`] on any of them affects all of them.

Each line handed to the sink is, in order: `msg`, `level`, `error` (error calls
only), the context's key-values, the fields attached via `with`, and finally
the key-values of the call itself.

```rust
use kvlog::{InMemorySink, Logger, Value, kv};
use std::sync::Arc;

let sink = Arc::new(InMemorySink::new());
let logger = Logger::new(sink.clone()).with(&kv!["component", "db"]);

logger.info("connected", &kv!["attempt", 2]);

assert_eq!(
    sink.drain_lines()[0],
    kv!["msg", "connected", "level", "info", "component", "db", "attempt", 2].to_vec()
);
```
*/
#[derive(Debug, Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    /// A root logger writing to `sink` with a fresh threshold at [`Level::Info`].
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self::with_threshold(sink, Threshold::new(Level::Info))
    }

    /// A root logger whose threshold is taken from `config`.
    ///
    /// The configured level is stored as-is, so [`Level::None`] silences the
    /// logger entirely.
    pub fn from_config(sink: Arc<dyn Sink>, config: &Config) -> Self {
        Self::with_threshold(sink, Threshold::new(config.level))
    }

    fn with_threshold(sink: Arc<dyn Sink>, threshold: Threshold) -> Self {
        Logger {
            inner: Arc::new(LoggerInner {
                context: Arc::new(Context::background()),
                fields: Vec::new(),
                metric: None,
                threshold,
                sink,
            }),
        }
    }

    /**
    Sets the threshold shared with every related logger.

    The level is normalized with [`Level::normalize`]; in particular
    `set_level(Level::None)` results in [`Level::Error`].  Safe for concurrent
    use at runtime.
    */
    pub fn set_level(&self, level: Level) {
        self.set_level_raw(level as i32);
    }

    /// [`Logger::set_level`] for integers that are not one of the tiers.
    pub fn set_level_raw(&self, requested: i32) {
        let level = self.inner.threshold.set(requested);
        tracing::debug!(requested, level = level.name(), "log threshold changed");
    }

    /// The current shared threshold.
    pub fn level(&self) -> Level {
        self.inner.threshold.current()
    }

    /// Whether a call at `level` would currently be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        self.inner.threshold.admits(level)
    }

    /// Debug logging with key-value pairs.  Never touches the metric.
    pub fn debug(&self, msg: &str, key_values: &[Value]) {
        if !self.enabled(Level::Debug) {
            return;
        }
        self.emit(msg, Level::Debug, None, key_values);
    }

    /**
    Info logging with key-value pairs.

    For informational, not directly actionable conditions.  Attaching a metric
    is recommended: a single occurrence might not warrant action but a change in
    the rate of occurrences does.  The metric is recorded even when the line
    itself is below the threshold.
    */
    pub fn info(&self, msg: &str, key_values: &[Value]) {
        self.record_metric();
        if !self.enabled(Level::Info) {
            return;
        }
        self.emit(msg, Level::Info, None, key_values);
    }

    /**
    Error logging with key-value pairs.

    For conditions where application state and stability are at risk.  `err`
    is rendered into the `error` field (nil when absent).  As with
    [`Logger::info`], an attached metric is recorded unconditionally.
    */
    pub fn error(
        &self,
        msg: &str,
        err: Option<&(dyn std::error::Error + 'static)>,
        key_values: &[Value],
    ) {
        self.record_metric();
        if !self.enabled(Level::Error) {
            return;
        }
        let err = err.map_or(Value::Nil, Value::from_error);
        self.emit(msg, Level::Error, Some(err), key_values);
    }

    fn record_metric(&self) {
        if let Some(metric) = &self.inner.metric {
            metric.record_context(self.inner.context.as_ref(), 1.0);
        }
    }

    fn emit(&self, msg: &str, level: Level, err: Option<Value>, key_values: &[Value]) {
        let context = self.inner.context.key_values();
        let mut line = Vec::with_capacity(
            6 + context.len() + self.inner.fields.len() + key_values.len(),
        );
        line.push(Value::from("msg"));
        line.push(Value::from(msg.to_string()));
        line.push(Value::from("level"));
        line.push(Value::from(level.name()));
        if let Some(err) = err {
            line.push(Value::from("error"));
            line.push(err);
        }
        line.extend(context);
        line.extend(self.inner.fields.iter().cloned());
        line.extend(key_values.iter().cloned());

        if let Err(e) = self.inner.sink.log(line) {
            tracing::trace!(error = %e, level = level.name(), "log sink dropped a line");
        }
    }

    /**
    Returns a logger with `key_values` appended to the attached fields.

    The input alternates keys and values.  An odd-length input gets
    `"(MISSING)"` paired with its trailing key, and pairs whose key is not a
    string are dropped.  Empty input returns this same logger.
    */
    pub fn with(&self, key_values: &[Value]) -> Logger {
        if key_values.is_empty() {
            return self.clone();
        }
        let mut fields = Vec::with_capacity(self.inner.fields.len() + key_values.len() + 1);
        fields.extend(self.inner.fields.iter().cloned());
        extend_pairs(&mut fields, key_values);
        self.derive(
            self.inner.context.clone(),
            fields,
            self.inner.metric.clone(),
        )
    }

    /// Returns a logger whose lines and metric records use `ctx`.
    pub fn attach_context(&self, ctx: Arc<dyn ContextCarrier>) -> Logger {
        self.derive(ctx, self.inner.fields.clone(), self.inner.metric.clone())
    }

    /// Returns a logger that records `metric` on each info and error call.
    pub fn attach_metric(&self, metric: Arc<dyn Metric>) -> Logger {
        self.derive(
            self.inner.context.clone(),
            self.inner.fields.clone(),
            Some(metric),
        )
    }

    fn derive(
        &self,
        context: Arc<dyn ContextCarrier>,
        fields: Vec<Value>,
        metric: Option<Arc<dyn Metric>>,
    ) -> Logger {
        Logger {
            inner: Arc::new(LoggerInner {
                context,
                fields,
                metric,
                threshold: self.inner.threshold.clone(),
                sink: self.inner.sink.clone(),
            }),
        }
    }

    /**
    Places `key_values` into a new carrier derived from `ctx`.

    Use this rather than building carriers by hand so that loggers of different
    kinds present in one application see the same context key-values.
    */
    pub fn key_values_to_context(
        &self,
        ctx: &dyn ContextCarrier,
        key_values: &[Value],
    ) -> Arc<dyn ContextCarrier> {
        ctx.with_key_values(key_values)
    }

    /// The fields attached through [`Logger::with`], as alternating keys and values.
    pub fn fields(&self) -> &[Value] {
        &self.inner.fields
    }

    /// Whether both handles are the same logger instance.
    pub fn ptr_eq(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Whether both loggers share a threshold, i.e. descend from the same root.
    pub fn shares_level_with(&self, other: &Logger) -> bool {
        self.inner.threshold.same_slot(&other.inner.threshold)
    }
}

/*
Boilerplate notes.

# Logger

Clone is cheap and yields the same instance, which is what `with(&[])` returns.
PartialEq is not implemented: instance identity is available through ptr_eq and
field equality is not a meaningful notion of logger equality.
Default would need a sink, so no.
Send/Sync: automatic, since every facet is Send + Sync.
*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory_sink::InMemorySink;
    use crate::kv;
    use crate::metric::CountingMetric;
    use crate::sink::SinkError;

    fn logger() -> (Logger, Arc<InMemorySink>) {
        let sink = Arc::new(InMemorySink::new());
        (Logger::new(sink.clone()), sink)
    }

    #[test]
    fn test_default_level_is_info() {
        let (logger, sink) = logger();
        assert_eq!(logger.level(), Level::Info);
        logger.debug("hidden", &[]);
        assert!(sink.is_empty());
        logger.info("shown", &[]);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_debug_emits_at_debug() {
        let (logger, sink) = logger();
        logger.set_level(Level::Debug);
        logger.debug("details", &kv!["n", 1]);
        assert_eq!(
            sink.drain_lines(),
            vec![kv!["msg", "details", "level", "debug", "n", 1].to_vec()]
        );
    }

    #[test]
    fn test_error_without_error_value() {
        let (logger, sink) = logger();
        logger.error("failed", None, &[]);
        assert_eq!(
            sink.drain_lines()[0],
            vec![
                Value::from("msg"),
                Value::from("failed"),
                Value::from("level"),
                Value::from("error"),
                Value::from("error"),
                Value::Nil
            ]
        );
    }

    #[test]
    fn test_error_gate_at_error_threshold() {
        let (logger, sink) = logger();
        logger.set_level(Level::None);
        assert_eq!(logger.level(), Level::Error);
        logger.info("hidden", &[]);
        logger.error("shown", None, &[]);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_none_from_config_silences_everything() {
        let sink = Arc::new(InMemorySink::new());
        let logger = Logger::from_config(sink.clone(), &Config { level: Level::None });
        assert_eq!(logger.level(), Level::None);
        logger.error("hidden", None, &[]);
        logger.info("hidden", &[]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_debug_never_records_metric() {
        let (logger, _sink) = logger();
        let metric = Arc::new(CountingMetric::new());
        let logger = logger.attach_metric(metric.clone());
        logger.set_level(Level::Debug);
        logger.debug("a", &[]);
        assert_eq!(metric.count(), 0);
        logger.info("b", &[]);
        logger.error("c", None, &[]);
        assert_eq!(metric.count(), 2);
    }

    #[test]
    fn test_with_empty_returns_same_instance() {
        let (logger, _sink) = logger();
        let same = logger.with(&[]);
        assert!(same.ptr_eq(&logger));
        let other = logger.with(&kv!["a", 1]);
        assert!(!other.ptr_eq(&logger));
        assert!(other.shares_level_with(&logger));
    }

    #[test]
    fn test_attach_copies_fields() {
        let (logger, _sink) = logger();
        let parent = logger.with(&kv!["a", 1]);
        let child = parent.attach_metric(Arc::new(CountingMetric::new()));
        assert_eq!(child.fields(), parent.fields());
        assert_ne!(child.fields().as_ptr(), parent.fields().as_ptr());
        let grandchild = child.with(&kv!["b", 2]);
        assert_eq!(parent.fields(), &kv!["a", 1]);
        assert_eq!(grandchild.fields(), &kv!["a", 1, "b", 2]);
    }

    #[test]
    fn test_metric_uses_attached_context() {
        let (logger, _sink) = logger();
        let metric = Arc::new(CountingMetric::new());
        let ctx = Context::background().with_key_values(&kv!["route", "/users"]);
        let logger = logger.attach_metric(metric.clone()).attach_context(ctx);
        logger.info("hit", &[]);
        assert_eq!(metric.last_context(), kv!["route", "/users"].to_vec());
    }

    #[test]
    fn test_key_values_to_context() {
        let (logger, sink) = logger();
        let ctx = logger.key_values_to_context(&Context::background(), &kv!["trace", "abc"]);
        logger.attach_context(ctx).info("traced", &[]);
        assert_eq!(
            sink.drain_lines()[0],
            kv!["msg", "traced", "level", "info", "trace", "abc"].to_vec()
        );
    }

    #[derive(Debug)]
    struct FailingSink;

    impl Sink for FailingSink {
        fn log(&self, _key_values: Vec<Value>) -> Result<(), SinkError> {
            Err(SinkError::Closed)
        }
    }

    #[test]
    fn test_sink_failure_is_swallowed() {
        let logger = Logger::new(Arc::new(FailingSink));
        let metric = Arc::new(CountingMetric::new());
        let logger = logger.attach_metric(metric.clone());
        logger.info("lost", &[]);
        logger.error("lost", None, &[]);
        assert_eq!(metric.count(), 2);
    }
}
