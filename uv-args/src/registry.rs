//! Ordered registry of argument specifications.
//!
//! The registry owns every specification, keeps positionals in declaration
//! order, and resolves long and short option forms to the same entry. All
//! registration-time validation lives here, so a registry that accepted a
//! specification can trust it for the lifetime of the parser.

use std::collections::HashMap;

use crate::error::{ArgsError, Result};
use crate::spec::{Action, ArgSpec, Arity};

/// Ordered collection of argument specifications.
pub struct Registry {
    specs: Vec<ArgSpec>,

    /// Indices into `specs`, in declaration order
    positionals: Vec<usize>,

    /// Long and short option tokens, both resolving to the same index
    options: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            specs: Vec::new(),
            positionals: Vec::new(),
            options: HashMap::new(),
        }
    }

    /// Register a specification, validating it against the rules the parse
    /// path relies on. Fails fast; a rejected specification is dropped.
    pub fn register(&mut self, spec: ArgSpec) -> Result<()> {
        self.validate_shape(&spec)?;
        self.validate_uniqueness(&spec)?;
        self.validate_semantics(&spec)?;
        self.validate_default(&spec)?;

        let index = self.specs.len();
        if spec.is_positional() {
            self.positionals.push(index);
        } else {
            self.options.insert(spec.name().to_string(), index);
            if let Some(short) = spec.short_token() {
                self.options.insert(short, index);
            }
        }
        self.specs.push(spec);
        Ok(())
    }

    /// Resolve an option token (long or short form) to its specification.
    pub fn lookup(&self, token: &str) -> Option<&ArgSpec> {
        self.lookup_index(token).map(|index| &self.specs[index])
    }

    pub(crate) fn lookup_index(&self, token: &str) -> Option<usize> {
        self.options.get(token).copied()
    }

    pub(crate) fn spec(&self, index: usize) -> &ArgSpec {
        &self.specs[index]
    }

    pub(crate) fn positional_indexes(&self) -> &[usize] {
        &self.positionals
    }

    /// All specifications in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ArgSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    fn invalid(spec: &ArgSpec, reason: &str) -> ArgsError {
        ArgsError::InvalidSpec {
            name: spec.name().to_string(),
            reason: reason.to_string(),
        }
    }

    fn validate_shape(&self, spec: &ArgSpec) -> Result<()> {
        if spec.is_positional() {
            if spec.name().starts_with('-') {
                return Err(Self::invalid(spec, "positional names may not begin with '-'"));
            }
            if spec.short_token().is_some() {
                return Err(Self::invalid(spec, "positionals may not declare a short form"));
            }
        } else {
            if !spec.name().starts_with("--") || spec.name().len() <= 2 {
                return Err(Self::invalid(spec, "option names must begin with '--'"));
            }
            if let Some(short) = spec.short {
                if short == '-' {
                    return Err(Self::invalid(spec, "short forms must be a single non-'-' character"));
                }
            }
        }
        Ok(())
    }

    fn validate_uniqueness(&self, spec: &ArgSpec) -> Result<()> {
        if self.specs.iter().any(|s| s.name() == spec.name()) {
            return Err(ArgsError::DuplicateName(spec.name().to_string()));
        }
        if let Some(short) = spec.short_token() {
            if self.options.contains_key(&short) {
                return Err(ArgsError::DuplicateName(short));
            }
        }
        Ok(())
    }

    fn validate_semantics(&self, spec: &ArgSpec) -> Result<()> {
        match (spec.arity(), spec.action()) {
            (Arity::Flag, Action::Assign) => {
                return Err(Self::invalid(spec, "flag arity requires the store-true action"));
            }
            (arity, Action::StoreTrue) if arity != Arity::Flag => {
                return Err(Self::invalid(spec, "the store-true action consumes no value tokens"));
            }
            _ => {}
        }

        if spec.action() == Action::StoreTrue && !spec.slot.supports_store_true() {
            return Err(Self::invalid(spec, "converter has no truthy value to store"));
        }

        match spec.arity() {
            Arity::Exactly(0) => {
                return Err(Self::invalid(spec, "fixed arity must be at least one"));
            }
            Arity::Exactly(_) => {
                if !spec.slot.supports_many() {
                    return Err(Self::invalid(spec, "fixed arity requires a list destination"));
                }
                if spec.default_raw().is_some() {
                    return Err(Self::invalid(spec, "fixed-arity options may not declare a default"));
                }
            }
            Arity::ZeroOrOne => {
                if spec.default_raw().is_none() {
                    return Err(Self::invalid(spec, "an optional value requires a default"));
                }
            }
            _ => {}
        }

        if spec.is_positional() {
            if spec.arity() != Arity::One {
                return Err(Self::invalid(spec, "positionals consume exactly one token"));
            }
            if spec.is_required() {
                // Declaration-order matching cannot skip a defaulted
                // positional to fill a required one behind it.
                let defaulted_before = self
                    .positionals
                    .iter()
                    .any(|&i| !self.specs[i].is_required());
                if defaulted_before {
                    return Err(Self::invalid(
                        spec,
                        "a required positional may not follow an optional one",
                    ));
                }
            } else if spec.default_raw().is_none() {
                return Err(Self::invalid(spec, "an optional positional requires a default"));
            }
        }

        Ok(())
    }

    fn validate_default(&self, spec: &ArgSpec) -> Result<()> {
        let Some(default) = spec.default_raw() else {
            return Ok(());
        };

        if let Some(choices) = spec.declared_choices() {
            if !choices.iter().any(|c| c == default) {
                return Err(Self::invalid(
                    spec,
                    &format!(
                        "default '{}' is not one of the declared choices ({})",
                        default,
                        choices.join(", ")
                    ),
                ));
            }
        }

        // Defaults are converted once here so a failure is a configuration
        // error at startup, never a parse-time surprise.
        spec.slot.probe(default).map_err(|err| {
            Self::invalid(spec, &format!("default does not convert: {}", err.message))
        })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ArgRef;
    use crate::convert::{IntConvert, OnOffConvert, StringConvert};
    use pretty_assertions::assert_eq;

    #[test]
    fn long_and_short_forms_resolve_to_the_same_spec() {
        let mut registry = Registry::new();
        let dest = ArgRef::new(String::new());
        registry
            .register(ArgSpec::option("--output", &dest, StringConvert).short('o'))
            .unwrap();

        assert_eq!(registry.lookup("--output").unwrap().name(), "--output");
        assert_eq!(registry.lookup("-o").unwrap().name(), "--output");
        assert!(registry.lookup("--missing").is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = Registry::new();
        let dest = ArgRef::new(String::new());
        registry
            .register(ArgSpec::option("--output", &dest, StringConvert))
            .unwrap();
        let err = registry
            .register(ArgSpec::option("--output", &dest, StringConvert))
            .unwrap_err();
        assert_eq!(err, ArgsError::DuplicateName("--output".to_string()));
    }

    #[test]
    fn duplicate_short_forms_are_rejected() {
        let mut registry = Registry::new();
        let dest = ArgRef::new(String::new());
        registry
            .register(ArgSpec::option("--output", &dest, StringConvert).short('o'))
            .unwrap();
        let err = registry
            .register(ArgSpec::option("--outfile", &dest, StringConvert).short('o'))
            .unwrap_err();
        assert_eq!(err, ArgsError::DuplicateName("-o".to_string()));
    }

    #[test]
    fn defaults_outside_choices_are_rejected() {
        let mut registry = Registry::new();
        let dest = ArgRef::new(String::new());
        let err = registry
            .register(
                ArgSpec::option("--route_type", &dest, StringConvert)
                    .choices(["global", "detailed"])
                    .default_value("express"),
            )
            .unwrap_err();
        assert!(matches!(err, ArgsError::InvalidSpec { .. }));
    }

    #[test]
    fn unconvertible_defaults_are_rejected() {
        let mut registry = Registry::new();
        let dest = ArgRef::new(0i64);
        let err = registry
            .register(ArgSpec::option("--seed", &dest, IntConvert).default_value("lots"))
            .unwrap_err();
        assert!(matches!(err, ArgsError::InvalidSpec { .. }));
    }

    #[test]
    fn store_true_requires_a_truthy_converter() {
        let mut registry = Registry::new();
        let dest = ArgRef::new(String::new());
        let err = registry
            .register(ArgSpec::flag("--pack", &dest, StringConvert))
            .unwrap_err();
        assert!(matches!(err, ArgsError::InvalidSpec { .. }));
    }

    #[test]
    fn optional_value_requires_a_default() {
        let mut registry = Registry::new();
        let dest = ArgRef::new(String::new());
        let err = registry
            .register(ArgSpec::option("--fix_pins", &dest, StringConvert).optional_value())
            .unwrap_err();
        assert!(matches!(err, ArgsError::InvalidSpec { .. }));
    }

    #[test]
    fn required_positionals_may_not_follow_optional_ones() {
        let mut registry = Registry::new();
        let dest = ArgRef::new(String::new());
        registry
            .register(
                ArgSpec::positional("architecture", &dest, StringConvert).default_value("arch.xml"),
            )
            .unwrap();
        let err = registry
            .register(ArgSpec::positional("circuit", &dest, StringConvert))
            .unwrap_err();
        assert!(matches!(err, ArgsError::InvalidSpec { .. }));
    }

    #[test]
    fn option_names_require_the_long_prefix() {
        let mut registry = Registry::new();
        let dest = ArgRef::new(false);
        let err = registry
            .register(ArgSpec::flag("pack", &dest, OnOffConvert))
            .unwrap_err();
        assert!(matches!(err, ArgsError::InvalidSpec { .. }));
    }

    #[test]
    fn positionals_keep_declaration_order() {
        let mut registry = Registry::new();
        let dest = ArgRef::new(String::new());
        registry
            .register(ArgSpec::positional("architecture", &dest, StringConvert))
            .unwrap();
        registry
            .register(ArgSpec::positional("circuit", &dest, StringConvert))
            .unwrap();

        let names: Vec<&str> = registry
            .positional_indexes()
            .iter()
            .map(|&i| registry.spec(i).name())
            .collect();
        assert_eq!(names, vec!["architecture", "circuit"]);
    }
}
