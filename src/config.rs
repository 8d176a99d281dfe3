// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logger configuration.
//!
//! The crate reads no files or environment itself.  Applications load a
//! [`Config`] however they load the rest of their settings (with the `serde`
//! feature it deserializes directly) and pass it to
//! [`Logger::from_config`](crate::Logger::from_config).

use crate::level::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Config {
    /// Initial threshold of the root logger.
    pub level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Config { level: Level::Info }
    }
}

impl Config {
    pub fn new(level: Level) -> Self {
        Config { level }
    }
}
