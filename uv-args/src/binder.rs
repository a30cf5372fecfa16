//! Binds matched raw values through converters into destinations.
//!
//! The binder runs after the scanner: it applies each matched pair in scan
//! order (choice validation on the raw form, then conversion, then the
//! write through the slot), records which arguments were explicitly
//! supplied, binds defaults for everything else, and enforces required
//! arguments. Any error aborts the call immediately; bound storage after a
//! failed parse is unspecified.

use serde::{Deserialize, Serialize};

use crate::convert::ConvertError;
use crate::error::{ArgsError, Result};
use crate::registry::Registry;
use crate::scanner::MatchedArg;
use crate::spec::{Action, ArgSpec};

/// Record of which arguments were explicitly supplied on one command line.
///
/// Distinguishes "explicitly supplied" from "defaulted" without probing
/// bound storage. One report is produced per `parse` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseReport {
    supplied: Vec<String>,
}

impl ParseReport {
    pub(crate) fn new(supplied: Vec<String>) -> Self {
        Self { supplied }
    }

    /// Whether the named argument appeared explicitly on the command line.
    pub fn supplied(&self, name: &str) -> bool {
        self.supplied.iter().any(|n| n == name)
    }

    /// Canonical names of explicitly supplied arguments, in match order.
    pub fn supplied_names(&self) -> &[String] {
        &self.supplied
    }
}

fn conversion_error(spec: &ArgSpec, err: ConvertError) -> ArgsError {
    ArgsError::Conversion {
        name: spec.name().to_string(),
        value: err.value,
        message: err.message,
    }
}

/// Validate the raw tokens against the declared choice set, when one exists.
fn check_choices(spec: &ArgSpec, raws: &[&str]) -> Result<()> {
    let Some(choices) = spec.declared_choices() else {
        return Ok(());
    };
    for raw in raws {
        if !choices.iter().any(|c| c == raw) {
            return Err(ArgsError::InvalidChoice {
                name: spec.name().to_string(),
                value: raw.to_string(),
                choices: choices.join(", "),
            });
        }
    }
    Ok(())
}

pub(crate) fn bind(registry: &Registry, matches: &[MatchedArg]) -> Result<ParseReport> {
    let mut supplied: Vec<String> = Vec::new();

    // 1. Bind every matched pair in scan order.
    for matched in matches {
        let spec = registry.spec(matched.index);

        match spec.action() {
            Action::StoreTrue => {
                spec.slot
                    .assign_true()
                    .map_err(|err| conversion_error(spec, err))?;
            }
            Action::Assign => {
                let raws: Vec<&str> = matched.values.iter().map(String::as_str).collect();
                check_choices(spec, &raws)?;
                spec.slot
                    .assign(&raws)
                    .map_err(|err| conversion_error(spec, err))?;
            }
        }

        if !supplied.iter().any(|n| n == spec.name()) {
            supplied.push(spec.name().to_string());
        }
    }

    // 2. Everything not explicitly supplied gets its default, and required
    //    arguments with no default fail the parse.
    for spec in registry.iter() {
        if supplied.iter().any(|n| n == spec.name()) {
            continue;
        }
        if let Some(default) = spec.default_raw() {
            // Flags bind their default through conversion too ("off" -> false).
            spec.slot
                .assign(&[default])
                .map_err(|err| conversion_error(spec, err))?;
        } else if spec.is_required() {
            return Err(ArgsError::MissingArgument(spec.name().to_string()));
        }
    }

    Ok(ParseReport::new(supplied))
}
