//! Argument parsing for Ultraviolet command-line tools.
//!
//! This crate provides the engine a command-line application uses to
//! declare, validate, and bind arguments to typed program variables:
//! argument registration, single-pass tokenization and matching, type
//! conversion through pluggable converters, choice validation, default
//! application, and structured error reporting. Help rendering is a thin
//! layer on top of the same registry; terminal presentation stays with the
//! consumer.

mod binder;
mod binding;
mod convert;
mod error;
mod help;
mod parser;
mod registry;
mod scanner;
mod spec;

// Re-export core types
pub use binder::ParseReport;
pub use binding::{ArgRef, BindSlot, ListSlot, ValueSlot};
pub use convert::{Convert, ConvertError, FloatConvert, IntConvert, OnOffConvert, StringConvert};
pub use error::{ArgsError, Result};
pub use parser::ArgParser;
pub use registry::Registry;
pub use spec::{Action, ArgSpec, Arity, ShowIn};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
