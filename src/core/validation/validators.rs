//! Reusable field validators
//!
//! Each validator is a small closure returning the configured message on
//! failure. The product rules in the parent module compose them per field.

use validator::{ValidateLength, ValidateRange};

/// Message reported when a required field is absent
pub fn required_message(field: &str) -> String {
    format!("Path `{}` is required.", field)
}

/// Validator: string length (in characters) must be within range
pub fn string_length(
    min: u64,
    max: u64,
    too_short: &'static str,
    too_long: &'static str,
) -> impl Fn(&str) -> Result<(), String> + Send + Sync + Clone {
    move |value: &str| {
        if !value.validate_length(Some(min), None, None) {
            Err(too_short.to_string())
        } else if !value.validate_length(None, Some(max), None) {
            Err(too_long.to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: number must be greater than or equal to `min`
pub fn min_value(
    min: f64,
    message: &'static str,
) -> impl Fn(f64) -> Result<(), String> + Send + Sync + Clone {
    move |value: f64| {
        if value.validate_range(Some(min), None, None, None) {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Validator: number must be less than or equal to `max`
pub fn max_value(
    max: f64,
    message: &'static str,
) -> impl Fn(f64) -> Result<(), String> + Send + Sync + Clone {
    move |value: f64| {
        if value.validate_range(None, Some(max), None, None) {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Validator: number must be finite (no NaN, no infinity)
pub fn finite(message: &'static str) -> impl Fn(f64) -> Result<(), String> + Send + Sync + Clone {
    move |value: f64| {
        if value.is_finite() {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Validator: number must have no fractional part
pub fn integer(message: &'static str) -> impl Fn(f64) -> Result<(), String> + Send + Sync + Clone {
    move |value: f64| {
        if value.is_finite() && value.fract() == 0.0 {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}
