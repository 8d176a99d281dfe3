//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# kvlog

kvlog is a leveled, key-value logging facade.

# The model

A [`Logger`] is an immutable value made of four facets:

* **fields**: key-value pairs attached with [`Logger::with`]
* **context**: a [`ContextCarrier`](context::ContextCarrier) whose key-values are
  extracted on every call, attached with [`Logger::attach_context`]
* **metric**: an optional [`Metric`] counted on every info and error call,
  attached with [`Logger::attach_metric`]
* **threshold**: the severity [`Level`] below which lines are dropped

Deriving a logger copies the first three and *shares* the threshold.  Changing
the level through any logger changes it for the root and every logger derived
from it, which is what you want when an operator turns up verbosity at runtime.

Lines go to a [`Sink`], which receives one flat `[key, value, key, value, ...]`
sequence per line.  Formatting and writing are the sink's business; kvlog only
decides *whether* to emit and *what* goes in the line.

# Levels

| Name  | Value | Metric recorded | Emitted when threshold is at least |
|-------|-------|-----------------|------------------------------------|
| debug | 10    | never           | debug                              |
| info  | 5     | always          | info                               |
| error | 1     | always          | error                              |

The metric is recorded even when the line is not emitted, so turning the level
down never loses occurrence counts.

# The API

```rust
use kvlog::{CountingMetric, InMemorySink, Level, Logger, kv};
use kvlog::context::Context;
use std::sync::Arc;

let sink = Arc::new(InMemorySink::new());
let root = Logger::new(sink.clone());

let failures = Arc::new(CountingMetric::new());
let db = root
    .with(&kv!["component", "db"])
    .attach_metric(failures.clone())
    .attach_context(Arc::new(Context::background().child(&kv!["request_id", "r-7"])));

let err = std::io::Error::other("disk full");
db.error("write failed", Some(&err), &kv!["path", "/tmp"]);
db.debug("not emitted at the default level", &[]);

root.set_level(Level::Debug);
assert!(db.enabled(Level::Debug));

assert_eq!(sink.len(), 1);
assert_eq!(failures.count(), 1);
```

# Errors

Logging never fails the caller.  Malformed key-value input is repaired (an odd
trailing key is paired with `"(MISSING)"`) or dropped (pairs with non-string
keys), and a [`SinkError`] is discarded after being reported through `tracing`
at trace level.

# Features

* `serde`: `Serialize`/`Deserialize` for [`Level`] (by name) and [`Config`]
* `metrics`: [`MetricsCounter`], a [`Metric`] backed by the `metrics` crate
*/

#[macro_use]
mod macros;
mod level;
mod threshold;
mod value;
mod sink;
mod inmemory_sink;
mod metric;
mod config;
mod logger;
pub mod context;

pub use level::{Level, ParseLevelError};
pub use value::{MISSING, Value};
pub use sink::{Sink, SinkError};
pub use inmemory_sink::InMemorySink;
pub use metric::{CountingMetric, Metric};
#[cfg(feature = "metrics")]
pub use metric::MetricsCounter;
pub use config::Config;
pub use logger::Logger;
