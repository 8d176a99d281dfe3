// SPDX-License-Identifier: MIT OR Apache-2.0

//! Values carried in key-value sequences.
//!
//! A line handed to a [`Sink`](crate::Sink) is a flat `[key, value, key, value, ...]`
//! sequence of [`Value`]s.  Keys are always [`Value::Str`] once a line is assembled,
//! but input to [`Logger::with`](crate::Logger::with) may contain anything, and
//! pairs whose key is not a string are dropped there.

use std::borrow::Cow;
use std::fmt::Display;

/// Paired with a trailing key when a key-value list has odd length.
pub const MISSING: &str = "(MISSING)";

/// A dynamically-typed element of a key-value sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value, e.g. the `error` field of an error call without an error.
    Nil,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Str(Cow<'static, str>),
    /// The rendered text of an error.
    Error(String),
}

impl Value {
    /// The string content, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// Renders an error with its `Display` text.
    ///
    /// The `source` chain is not walked; errors that want their cause on the
    /// line include it in their own message.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Value {
        Value::Error(err.to_string())
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::I64(i) => write!(f, "{i}"),
            Value::U64(u) => write!(f, "{u}"),
            Value::F64(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Error(e) => f.write_str(e),
        }
    }
}

impl From<&'static str> for Value {
    fn from(s: &'static str) -> Self {
        Value::Str(Cow::Borrowed(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Cow::Owned(s))
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(Cow::Owned(s.clone()))
    }
}

impl From<Cow<'static, str>> for Value {
    fn from(s: Cow<'static, str>) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(i: $t) -> Self {
                Value::I64(i as i64)
            }
        })*
    };
}
from_signed!(i8, i16, i32, i64, isize);

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(u: $t) -> Self {
                Value::U64(u as u64)
            }
        })*
    };
}
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::F64(x as f64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::F64(x)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

/**
Interprets `input` as alternating keys and values and appends the well-formed
pairs to `out`.

An odd-length input gets [`MISSING`] paired with its trailing key.  A pair
whose key is not a string is skipped entirely.
*/
pub(crate) fn extend_pairs(out: &mut Vec<Value>, input: &[Value]) {
    for pair in input.chunks(2) {
        let Some(key) = pair.first().filter(|key| key.is_str()) else {
            continue;
        };
        out.push(key.clone());
        out.push(pair.get(1).cloned().unwrap_or(Value::from(MISSING)));
    }
}
