// SPDX-License-Identifier: MIT OR Apache-2.0

/**
Builds an array of [`Value`](crate::Value)s from heterogeneous expressions.

Each element goes through `Value::from`, so string literals, integers,
floats, bools and `Option`s of those all work.  Borrow the result to pass it
to a logger.

```rust
use kvlog::{Value, kv};

let pairs = kv!["path", "/tmp", "retries", 3, "dry_run", false];
assert_eq!(pairs[3], Value::I64(3));
```
*/
#[macro_export]
macro_rules! kv {
    () => {{
        let empty: [$crate::Value; 0] = [];
        empty
    }};
    ($($value:expr),+ $(,)?) => {
        [$($crate::Value::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use crate::Value;

    #[test]
    fn test_kv_empty() {
        let empty = kv![];
        assert!(empty.is_empty());
    }

    #[test]
    fn test_kv_mixed() {
        let name = String::from("alice");
        let values = kv![name, 1u8, 2.5, None::<i32>,];
        assert_eq!(
            values,
            [
                Value::from("alice"),
                Value::U64(1),
                Value::F64(2.5),
                Value::Nil
            ]
        );
    }
}
