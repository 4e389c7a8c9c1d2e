//! Assertion helpers with field-naming failure messages.

use std::fmt::Debug;

use tfverify_terraform::OutputValue;

use crate::error::{HarnessError, HarnessResult};

/// Assert two values are equal.
pub fn expect_eq<T: PartialEq + Debug>(field: &str, actual: T, expected: T) -> HarnessResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::assertion(
            field,
            format!("expected {:?}, got {:?}", expected, actual),
        ))
    }
}

/// Assert a boolean field is true.
pub fn expect_true(field: &str, actual: bool) -> HarnessResult<()> {
    if actual {
        Ok(())
    } else {
        Err(HarnessError::assertion(field, "expected true, got false"))
    }
}

/// Assert a string is non-empty.
pub fn expect_non_empty(field: &str, actual: &str) -> HarnessResult<()> {
    if actual.is_empty() {
        Err(HarnessError::assertion(field, "expected a non-empty value"))
    } else {
        Ok(())
    }
}

/// Assert the length of a sequence, mapping, or string value.
pub fn expect_len(value: &OutputValue<'_>, expected: usize) -> HarnessResult<()> {
    let actual = value.len()?;
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::assertion(
            value.path(),
            format!("expected length {}, got {}", expected, actual),
        ))
    }
}

/// Assert a mapping carries the given key.
pub fn expect_contains_key(value: &OutputValue<'_>, key: &str) -> HarnessResult<()> {
    if value.contains_key(key)? {
        Ok(())
    } else {
        Err(HarnessError::assertion(
            value.path(),
            format!("expected key '{}'", key),
        ))
    }
}
