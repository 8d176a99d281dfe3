// SPDX-License-Identifier: MIT OR Apache-2.0

//! Severity levels.
//!
//! Levels are ordered by verbosity: a threshold of [`Level::Debug`] admits every
//! call, a threshold of [`Level::None`] admits nothing.  The numeric values are
//! part of the contract since thresholds are stored and compared as integers.

use std::fmt::Display;
use std::str::FromStr;

/// An ordered logging verbosity tier.
///
/// ```rust
/// use kvlog::Level;
/// assert!(Level::Debug > Level::Info);
/// assert_eq!(Level::Info as i32, 5);
/// assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(i32)]
pub enum Level {
    /// Nothing is logged.  Only reachable as the zero state of a threshold.
    #[default]
    None = 0,
    /// Application state and stability are at risk.
    Error = 1,
    /// Informational, not directly actionable.
    Info = 5,
    /// Verbose diagnostics.
    Debug = 10,
}

impl Level {
    /// The name written into the `level` field of emitted lines.
    pub const fn name(self) -> &'static str {
        match self {
            Level::None => "none",
            Level::Error => "error",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    /// Reverse of [`Level::name`].
    pub fn from_name(name: &str) -> Option<Level> {
        match name {
            "none" => Some(Level::None),
            "error" => Some(Level::Error),
            "info" => Some(Level::Info),
            "debug" => Some(Level::Debug),
            _ => None,
        }
    }

    /// Exact conversion from the integer representation.
    ///
    /// Returns `None` for integers that are not one of the four tiers; see
    /// [`Level::normalize`] for the clamping conversion.
    pub const fn from_raw(raw: i32) -> Option<Level> {
        match raw {
            0 => Some(Level::None),
            1 => Some(Level::Error),
            5 => Some(Level::Info),
            10 => Some(Level::Debug),
            _ => None,
        }
    }

    /**
    Clamps an arbitrary requested value to a tier.

    Anything below Info becomes Error, anything below Debug becomes Info, and
    everything else becomes Debug.  Note that this never yields [`Level::None`],
    not even for a request of 0.

    ```rust
    use kvlog::Level;
    assert_eq!(Level::normalize(0), Level::Error);
    assert_eq!(Level::normalize(7), Level::Info);
    assert_eq!(Level::normalize(99), Level::Debug);
    ```
    */
    pub const fn normalize(requested: i32) -> Level {
        if requested < Level::Info as i32 {
            Level::Error
        } else if requested < Level::Debug as i32 {
            Level::Info
        } else {
            Level::Debug
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing a name that is not one of the level names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level {0:?}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::from_name(s).ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

impl From<Level> for i32 {
    fn from(level: Level) -> Self {
        level as i32
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Level {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Level {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
