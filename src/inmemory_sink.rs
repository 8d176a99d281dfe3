// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Sink
//!
//! A [`Sink`] that keeps every line it receives, for tests and for inspecting
//! what a logger emits.
//!
//! Lines are stored behind a `Mutex`, so one sink can back loggers used from
//! many threads at once.

use crate::sink::{Sink, SinkError};
use crate::value::Value;
use std::sync::{Mutex, MutexGuard};

/// A sink that stores lines in a `Vec`.
///
/// # Example
///
/// ```rust
/// use kvlog::{InMemorySink, Logger, Value, kv};
/// use std::sync::Arc;
///
/// let sink = Arc::new(InMemorySink::new());
/// let logger = Logger::new(sink.clone());
///
/// logger.info("started", &kv!["port", 8080]);
///
/// let lines = sink.drain_lines();
/// assert_eq!(lines.len(), 1);
/// assert_eq!(lines[0][1], Value::from("started"));
/// ```
#[derive(Debug, Default)]
pub struct InMemorySink {
    lines: Mutex<Vec<Vec<Value>>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug/Default: Derived, Default is an empty buffer
// - Clone: NOT implemented - loggers share the sink through an Arc instead
// - PartialEq/Eq/Hash: NOT implemented - comparing mutex contents is not meaningful
// - Send/Sync: Automatic via Mutex (required by Sink)

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<Vec<Value>>> {
        //a panic while holding the lock cannot leave a half-pushed line behind
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Takes every line recorded so far, leaving the buffer empty.
    pub fn drain_lines(&self) -> Vec<Vec<Value>> {
        std::mem::take(&mut *self.buffer())
    }

    /// A copy of the recorded lines, leaving the buffer untouched.
    pub fn lines(&self) -> Vec<Vec<Value>> {
        self.buffer().clone()
    }

    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }
}

impl Sink for InMemorySink {
    fn log(&self, key_values: Vec<Value>) -> Result<(), SinkError> {
        self.buffer().push(key_values);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_drain_empties_buffer() {
        let sink = InMemorySink::new();
        sink.log(vec!["msg".into(), "a".into()]).unwrap();
        sink.log(vec!["msg".into(), "b".into()]).unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.lines().len(), 2);

        let lines = sink.drain_lines();
        assert_eq!(lines[1], vec![Value::from("msg"), Value::from("b")]);
        assert!(sink.is_empty());
        assert!(sink.drain_lines().is_empty());
    }

    #[test]
    fn test_concurrent_writers() {
        let sink = Arc::new(InMemorySink::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let sink = sink.clone();
                thread::spawn(move || {
                    for j in 0..50 {
                        sink.log(vec!["msg".into(), (i * 100 + j).into()]).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("Thread should complete successfully");
        }
        assert_eq!(sink.len(), 200);
    }
}
