//! Converters between raw command-line tokens and typed values.
//!
//! A converter is the capability that gives an argument its value type:
//! anything with a lawful string round-trip can be bound. Converters are
//! attached per specification and dispatched dynamically through the
//! binding slots, so specifications of heterogeneous value types coexist
//! in one registry.

use thiserror::Error;

/// Failure produced by a converter, before it is tied to an argument.
///
/// The binder annotates this with the specification's name when it raises
/// the crate-level conversion error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ConvertError {
    /// The raw token that failed to convert
    pub value: String,

    /// Complete human-readable description of the failure
    pub message: String,
}

impl ConvertError {
    pub fn new(value: &str, message: String) -> Self {
        Self {
            value: value.to_string(),
            message,
        }
    }
}

/// Capability contract turning raw tokens into typed values and back.
pub trait Convert {
    /// The value type this converter produces.
    type Value;

    /// Convert a raw token into a typed value.
    fn from_str(&self, raw: &str) -> Result<Self::Value, ConvertError>;

    /// Render a value back into its raw form.
    ///
    /// Used for default rendering and diagnostics; for values that round-trip
    /// exactly, `from_str(to_str(v))` yields `v` again.
    fn to_str(&self, value: &Self::Value) -> String;

    /// The finite domain of valid raw tokens, for converters that have one.
    fn default_choices(&self) -> Option<Vec<String>> {
        None
    }

    /// The fixed value a toggle flag stores, for converters that have one.
    fn true_value(&self) -> Option<Self::Value> {
        None
    }
}

/// Identity converter for string-valued arguments.
pub struct StringConvert;

impl Convert for StringConvert {
    type Value = String;

    fn from_str(&self, raw: &str) -> Result<String, ConvertError> {
        Ok(raw.to_string())
    }

    fn to_str(&self, value: &String) -> String {
        value.clone()
    }
}

/// Strict integer converter.
///
/// Only integral lexical forms are accepted; `"300.5"` is rejected rather
/// than truncated.
pub struct IntConvert;

impl Convert for IntConvert {
    type Value = i64;

    fn from_str(&self, raw: &str) -> Result<i64, ConvertError> {
        raw.parse::<i64>().map_err(|_| {
            ConvertError::new(raw, format!("Invalid conversion from '{}' to integer", raw))
        })
    }

    fn to_str(&self, value: &i64) -> String {
        value.to_string()
    }
}

/// Floating-point converter.
///
/// Accepts both integral and fractional lexical forms; `"2"` and `"2.0"`
/// convert to the same value.
pub struct FloatConvert;

impl Convert for FloatConvert {
    type Value = f64;

    fn from_str(&self, raw: &str) -> Result<f64, ConvertError> {
        raw.parse::<f64>().map_err(|_| {
            ConvertError::new(
                raw,
                format!("Invalid conversion from '{}' to floating-point", raw),
            )
        })
    }

    fn to_str(&self, value: &f64) -> String {
        value.to_string()
    }
}

/// Boolean converter over the textual on/off domain.
///
/// `"on"` and `"off"` are the only accepted spellings; the conversion error
/// for anything else enumerates the domain.
pub struct OnOffConvert;

impl Convert for OnOffConvert {
    type Value = bool;

    fn from_str(&self, raw: &str) -> Result<bool, ConvertError> {
        match raw {
            "on" => Ok(true),
            "off" => Ok(false),
            _ => {
                let domain = self
                    .default_choices()
                    .unwrap_or_default()
                    .join(", ");
                Err(ConvertError::new(
                    raw,
                    format!(
                        "Invalid conversion from '{}' to boolean (expected one of: {})",
                        raw, domain
                    ),
                ))
            }
        }
    }

    fn to_str(&self, value: &bool) -> String {
        if *value { "on" } else { "off" }.to_string()
    }

    fn default_choices(&self) -> Option<Vec<String>> {
        Some(vec!["on".to_string(), "off".to_string()])
    }

    fn true_value(&self) -> Option<bool> {
        Some(true)
    }
}
