// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context carriers: scope-bound key-value metadata.
//!
//! A logger holds one carrier and extracts its key-values on every call, so
//! request- or call-scoped values show up on every line without being passed
//! around explicitly.
//!
//! [`ContextCarrier`] is the capability a logger needs.  [`Context`] is the
//! carrier this crate ships: an immutable chain of key-value sets where each
//! child remembers its parent.
//!
//! ```rust
//! use kvlog::context::{Context, ContextCarrier};
//! use kvlog::{Value, kv};
//!
//! let request = Context::background().with_key_values(&kv!["request_id", "r-1"]);
//! let step = request.with_key_values(&kv!["step", 2]);
//!
//! assert_eq!(
//!     step.key_values(),
//!     vec![Value::from("request_id"), Value::from("r-1"), Value::from("step"), Value::I64(2)]
//! );
//! ```

use crate::value::{Value, extend_pairs};
use std::fmt::Debug;
use std::sync::Arc;

pub trait ContextCarrier: Debug + Send + Sync {
    /// The key-values to add to each line, in a stable order.
    fn key_values(&self) -> Vec<Value>;

    /// A new carrier holding this carrier's key-values followed by `key_values`.
    fn with_key_values(&self, key_values: &[Value]) -> Arc<dyn ContextCarrier>;
}

#[derive(Debug)]
struct ContextInner {
    parent: Option<Context>,
    key_values: Vec<Value>,
}

/// The default [`ContextCarrier`].
///
/// Cloning is cheap (Arc-based) and children share their ancestors rather
/// than copying them.
#[derive(Debug, Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl Context {
    /// An empty root context.
    pub fn background() -> Self {
        Context {
            inner: Arc::new(ContextInner {
                parent: None,
                key_values: Vec::new(),
            }),
        }
    }

    /// A child of this context carrying `key_values` in addition to ours.
    ///
    /// The input is repaired the same way [`Logger::with`](crate::Logger::with)
    /// repairs it.  Empty input returns this same context.
    pub fn child(&self, key_values: &[Value]) -> Context {
        if key_values.is_empty() {
            return self.clone();
        }
        let mut own = Vec::with_capacity(key_values.len() + 1);
        extend_pairs(&mut own, key_values);
        Context {
            inner: Arc::new(ContextInner {
                parent: Some(self.clone()),
                key_values: own,
            }),
        }
    }
}

impl ContextCarrier for Context {
    fn key_values(&self) -> Vec<Value> {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(ctx) = current {
            chain.push(ctx);
            current = ctx.inner.parent.as_ref();
        }
        let len = chain.iter().map(|ctx| ctx.inner.key_values.len()).sum();
        let mut out = Vec::with_capacity(len);
        for ctx in chain.into_iter().rev() {
            out.extend(ctx.inner.key_values.iter().cloned());
        }
        out
    }

    fn with_key_values(&self, key_values: &[Value]) -> Arc<dyn ContextCarrier> {
        Arc::new(self.child(key_values))
    }
}
