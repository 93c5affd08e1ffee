//! Token coercion shared by both dialect decoders.
//!
//! Every header value and data token passes through one of two coercion
//! variants. Neither can fail: a token that is not a number survives as
//! [`Value::Text`] so free-text header fields are never lost.

use crate::constants::{TAG_PART_SEPARATOR, UNDEF_SENTINEL, VOID_SENTINEL};
use crate::models::Dialect;
use serde::Serialize;

/// A single decoded header value or measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl Value {
    /// Numeric view of the value, integers widened to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Render the value as header text, `None` for null
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Text(s) => Some(s.clone()),
            Value::Null => None,
        }
    }
}

/// Integer first, then float, else the token unchanged.
///
/// Distinguishes `"1"` (integer) from `"1.0"` (float). Integers too large
/// for i64 fall through to the float branch.
pub fn coerce_number(token: &str) -> Value {
    if let Ok(i) = token.parse::<i64>() {
        return Value::Integer(i);
    }
    match token.parse::<f64>() {
        Ok(f) => Value::Float(f),
        Err(_) => Value::Text(token.to_string()),
    }
}

/// Float after replacing decimal commas, else the original token.
///
/// There is no integer branch: `"0,0"` and `"3"` both decode as floats.
pub fn coerce_decimal_comma(token: &str) -> Value {
    match token.replace(',', ".").parse::<f64>() {
        Ok(f) => Value::Float(f),
        Err(_) => Value::Text(token.to_string()),
    }
}

/// Check whether a data token is a missing value marker for the dialect
pub fn is_sentinel(token: &str, dialect: Dialect) -> bool {
    match dialect {
        Dialect::Colon => token == UNDEF_SENTINEL,
        Dialect::Tag => token == UNDEF_SENTINEL || token == VOID_SENTINEL,
    }
}

/// Coerce one whitespace-separated data token
pub fn coerce_row_token(token: &str, dialect: Dialect) -> Value {
    if is_sentinel(token, dialect) {
        return Value::Null;
    }
    match dialect {
        Dialect::Colon => coerce_decimal_comma(token),
        Dialect::Tag => coerce_number(token),
    }
}

/// A decoded tag header value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    /// Raw value without commas
    Scalar(Value),
    /// Comma separated parts of one tag line
    List(Vec<Value>),
    /// Every occurrence of a tag that appears more than once, in file order
    Repeated(Vec<TagValue>),
}

impl TagValue {
    /// Split a raw tag value on commas and coerce each part
    pub fn parse(raw: &str) -> Self {
        if raw.contains(TAG_PART_SEPARATOR) {
            TagValue::List(
                raw.split(TAG_PART_SEPARATOR)
                    .map(|part| coerce_number(part.trim()))
                    .collect(),
            )
        } else {
            TagValue::Scalar(coerce_number(raw.trim()))
        }
    }

    /// Fold another occurrence of the same tag into this value
    pub fn accumulate(self, next: TagValue) -> Self {
        match self {
            TagValue::Repeated(mut occurrences) => {
                occurrences.push(next);
                TagValue::Repeated(occurrences)
            }
            single => TagValue::Repeated(vec![single, next]),
        }
    }

    /// All occurrences of the tag; a tag seen once yields itself
    pub fn occurrences(&self) -> &[TagValue] {
        match self {
            TagValue::Repeated(occurrences) => occurrences,
            other => std::slice::from_ref(other),
        }
    }

    /// Positional part of a single occurrence (a scalar is its own part 0)
    pub fn part(&self, index: usize) -> Option<&Value> {
        match self {
            TagValue::Scalar(v) if index == 0 => Some(v),
            TagValue::List(parts) => parts.get(index),
            _ => None,
        }
    }
}
