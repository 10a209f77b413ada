//! Request parameter validation
//!
//! Every operator API method declares a fixed contract over its parameter
//! mapping: which fields are required, which are optional, which JSON type
//! each must hold, and for some fields which values are accepted. This module
//! checks a `Params` mapping against such a contract before anything is sent.
//!
//! The checks are nominal. A string field must hold a JSON string and an
//! integer field must hold a JSON whole number; nothing is coerced, so
//! `"30"` is not an integer and `3.0` is not an integer either.
//!
//! Two forms are offered:
//!
//! - **Primitives**: `required_param`, `optional_param` and `strict_values`
//!   for ad-hoc checks
//! - **Rule tables**: `FieldRule` slices applied with `validate`, which is how
//!   the client declares each method's contract as `const` data
//!
//! # Examples
//!
//! ```rust
//! use mascot_core::validation::{self, FieldRule, ParamType};
//! use serde_json::json;
//!
//! const RULES: &[FieldRule] = &[
//!     FieldRule::required("SessionId", ParamType::String),
//!     FieldRule::required("ExpiryInSeconds", ParamType::Integer),
//! ];
//!
//! let params = validation::to_params(json!({"SessionId": "s1", "ExpiryInSeconds": 600})).unwrap();
//! assert!(validation::validate(&params, RULES).is_ok());
//!
//! let params = validation::to_params(json!({"SessionId": "s1"})).unwrap();
//! let err = validation::validate(&params, RULES).unwrap_err();
//! assert_eq!(err.field(), Some("ExpiryInSeconds"));
//! ```

use crate::error::{Error, ValidationError};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Request parameters: field name to JSON value
pub type Params = serde_json::Map<String, Value>;

/// Result of a single validation check
pub type ValidationResult = std::result::Result<(), ValidationError>;

/// Nominal type of a request field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// A JSON string
    String,
    /// A JSON whole number
    Integer,
}

impl ParamType {
    /// Whether `value` holds this type, without coercion
    pub fn matches(self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::String => write!(f, "string"),
            ParamType::Integer => write!(f, "integer"),
        }
    }
}

/// One field of a method's parameter contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Wire name of the field (case-sensitive)
    pub name: &'static str,
    /// Whether the field must be present
    pub required: bool,
    /// Nominal type the value must have
    pub param_type: ParamType,
    /// Accepted values, when the field is restricted to a fixed set
    pub allowed: Option<&'static [&'static str]>,
}

impl FieldRule {
    /// A field that must be present
    pub const fn required(name: &'static str, param_type: ParamType) -> Self {
        Self {
            name,
            required: true,
            param_type,
            allowed: None,
        }
    }

    /// A field that may be absent
    pub const fn optional(name: &'static str, param_type: ParamType) -> Self {
        Self {
            name,
            required: false,
            param_type,
            allowed: None,
        }
    }

    /// Restrict the field to a fixed set of values
    pub const fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Some(allowed);
        self
    }

    /// Check this rule against `params`
    pub fn check(&self, params: &Params) -> ValidationResult {
        match (self.required, self.allowed) {
            (true, None) => required_param(params, self.name, self.param_type),
            (true, Some(allowed)) => {
                required_param(params, self.name, self.param_type)?;
                strict_values(params, self.name, allowed)
            }
            (false, None) => optional_param(params, self.name, self.param_type, None),
            (false, Some(allowed)) => optional_param(
                params,
                self.name,
                self.param_type,
                Some(&|params: &Params, key: &str, _: ParamType| strict_values(params, key, allowed)),
            ),
        }
    }
}

/// Extra check run by `optional_param` once the field is known to be present
/// and well-typed
pub type ExtraCheck<'a> = &'a dyn Fn(&Params, &str, ParamType) -> ValidationResult;

/// Require `key` to be present and of type `param_type`
pub fn required_param(params: &Params, key: &str, param_type: ParamType) -> ValidationResult {
    match params.get(key) {
        None => Err(ValidationError::Missing {
            field: key.to_string(),
        }),
        Some(value) => check_type(key, value, param_type),
    }
}

/// Allow `key` to be absent; when present it must be of type `param_type`
/// and pass `extra_check`, if one is given
pub fn optional_param(
    params: &Params,
    key: &str,
    param_type: ParamType,
    extra_check: Option<ExtraCheck<'_>>,
) -> ValidationResult {
    let Some(value) = params.get(key) else {
        return Ok(());
    };
    check_type(key, value, param_type)?;
    match extra_check {
        Some(check) => check(params, key, param_type),
        None => Ok(()),
    }
}

/// Require `params[key]` to be one of `allowed`
///
/// An absent key is treated as a value outside the set.
pub fn strict_values(params: &Params, key: &str, allowed: &[&str]) -> ValidationResult {
    let value = params.get(key);
    let accepted = value
        .and_then(Value::as_str)
        .map(|s| allowed.contains(&s))
        .unwrap_or(false);

    if accepted {
        return Ok(());
    }

    Err(ValidationError::NotAllowed {
        field: key.to_string(),
        allowed: allowed.iter().map(|s| s.to_string()).collect(),
        actual: value.map(Value::to_string).unwrap_or_else(|| "nothing".to_string()),
    })
}

/// Apply `rules` in order, stopping at the first violation
pub fn validate(params: &Params, rules: &[FieldRule]) -> ValidationResult {
    rules.iter().try_for_each(|rule| rule.check(params))
}

/// Serialize `value` into a parameter mapping
///
/// Accepts typed request structs as well as `serde_json::json!` objects.
/// Anything that does not serialize to a JSON object is rejected.
pub fn to_params<T: Serialize>(value: T) -> crate::Result<Params> {
    match serde_json::to_value(value).map_err(|e| Error::Serialization(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(ValidationError::NotAnObject {
            actual: json_type_name(&other),
        }
        .into()),
    }
}

/// JSON type name used in error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_type(key: &str, value: &Value, param_type: ParamType) -> ValidationResult {
    if param_type.matches(value) {
        Ok(())
    } else {
        Err(ValidationError::TypeMismatch {
            field: key.to_string(),
            expected: param_type,
            actual: json_type_name(value),
        })
    }
}
