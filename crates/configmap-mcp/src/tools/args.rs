//! Type-checked extraction of loosely-typed tool arguments.
//!
//! Nothing here coerces: a value is either exactly the expected JSON type or it
//! is treated as missing.

use serde_json::{Map, Value};
use thiserror::Error;

use super::messages::{EMPTY_NAME, MISSING_NAME};
use crate::params::ValueMap;

/// Raw arguments of one tool call.
pub type Arguments = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("{}", MISSING_NAME)]
    MissingName,
    #[error("{}", EMPTY_NAME)]
    EmptyName,
}

/// Reads the required `name` argument.
pub fn required_name(args: &Arguments) -> Result<String, ArgumentError> {
    match args.get("name") {
        None | Some(Value::Null) => Err(ArgumentError::MissingName),
        Some(Value::String(name)) if !name.is_empty() => Ok(name.clone()),
        Some(_) => Err(ArgumentError::EmptyName),
    }
}

/// Non-empty string argument, or `None`.
pub fn optional_string(args: &Arguments, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// String argument, or `""` when absent or not a string.
pub fn string_or_default(args: &Arguments, key: &str) -> String {
    args.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Boolean argument; anything but a JSON `true` is `false`.
pub fn optional_bool(args: &Arguments, key: &str) -> bool {
    matches!(args.get(key), Some(Value::Bool(true)))
}

/// String-keyed object argument, or `None` when absent or of another shape.
pub fn optional_map(args: &Arguments, key: &str) -> Option<ValueMap> {
    args.get(key).and_then(Value::as_object).cloned()
}
