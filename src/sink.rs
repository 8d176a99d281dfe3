//SPDX-License-Identifier: MIT OR Apache-2.0
use crate::value::Value;
use std::fmt::Debug;

/// Why a sink could not record a line.
///
/// Loggers discard these; they exist so sinks can report failures to their own
/// callers and to the crate's diagnostics.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SinkError {
    #[error("failed to write log line")]
    Io(#[from] std::io::Error),
    #[error("log line rejected: {0}")]
    Rejected(String),
    #[error("sink is closed")]
    Closed,
}

pub trait Sink: Debug + Send + Sync {
    /**
    Records one line.

    `key_values` alternates keys and values, starting with `msg` and `level`.
    Sinks shared between loggers are called concurrently and must serialize
    writes themselves.
    */
    fn log(&self, key_values: Vec<Value>) -> Result<(), SinkError>;
}

/*
Boilerplate notes.

# Sink

Clone is up to the implementation; loggers hold sinks behind an Arc.
PartialEq, Eq, Hash: data equality vs. provenance is unclear, same as for loggers.
Default is not sensible since a sink usually needs a destination.
Send/Sync are required because one sink backs every logger derived from a root.
*/
