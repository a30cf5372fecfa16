//! Error types for the uv-args system.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the uv-args system.
///
/// Registration-time failures (`DuplicateName`, `InvalidSpec`) surface from
/// `register` and should abort consumer startup; everything else aborts the
/// `parse` call that raised it. The first error encountered wins — there is
/// no accumulation across one parse.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgsError {
    /// An argument name or short form is already registered
    #[error("Duplicate argument name: '{0}'")]
    DuplicateName(String),

    /// A specification failed registration-time validation
    #[error("Invalid specification for '{name}': {reason}")]
    InvalidSpec { name: String, reason: String },

    /// A token looks like an option but is not registered
    #[error("Unknown option: '{0}'")]
    UnknownOption(String),

    /// An option expects a value and the command line ended
    #[error("Missing value for option '{0}'")]
    MissingValue(String),

    /// An option was given the wrong number of values
    #[error("Option '{name}' expects {expected} value(s), got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// More positional tokens than declared positional arguments
    #[error("Unexpected positional argument: '{0}'")]
    ExtraPositional(String),

    /// A required argument was never supplied and has no default
    #[error("Missing required argument: '{0}'")]
    MissingArgument(String),

    /// A raw token could not be converted to the argument's value type
    #[error("{message} (argument '{name}')")]
    Conversion {
        name: String,
        value: String,
        message: String,
    },

    /// A raw token falls outside the argument's declared choice set
    #[error("Invalid value '{value}' for argument '{name}' (expected one of: {choices})")]
    InvalidChoice {
        name: String,
        value: String,
        choices: String,
    },
}

/// Result type alias for uv-args operations
pub type Result<T> = std::result::Result<T, ArgsError>;
