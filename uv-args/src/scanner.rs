//! Single-pass tokenizer/matcher for raw command lines.
//!
//! The scanner walks the token list left to right exactly once, classifying
//! each token as an option or a positional and pairing option tokens with
//! their value tokens according to arity. It produces (specification,
//! raw-values) matches for the binder, or the first error encountered —
//! there is no recovery and no backtracking.

use crate::error::{ArgsError, Result};
use crate::registry::Registry;
use crate::spec::Arity;

/// One matched argument: the specification it resolved to and the raw
/// value tokens consumed for it (empty for flags).
#[derive(Debug, Clone)]
pub(crate) struct MatchedArg {
    pub(crate) index: usize,
    pub(crate) values: Vec<String>,
}

/// Whether a token has the shape of an option (`--long` or `-s`).
fn is_option_shaped(token: &str) -> bool {
    token.starts_with('-') && token.len() > 1
}

/// Split `--name=value` into the lookup key and the attached value.
fn split_attached(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (token, None),
    }
}

/// Whether a token would be consumed as an option rather than a value.
fn is_registered_option(registry: &Registry, token: &str) -> bool {
    is_option_shaped(token) && registry.lookup_index(split_attached(token).0).is_some()
}

pub(crate) fn scan(registry: &Registry, tokens: &[String]) -> Result<Vec<MatchedArg>> {
    let mut matches = Vec::new();
    let mut next_positional = 0;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        i += 1;

        if is_option_shaped(token) {
            let (key, attached) = split_attached(token);
            let Some(index) = registry.lookup_index(key) else {
                return Err(ArgsError::UnknownOption(key.to_string()));
            };
            let spec = registry.spec(index);

            let mut values = Vec::new();
            if let Some(value) = attached {
                values.push(value.to_string());
            }

            match spec.arity() {
                Arity::Flag => {
                    // `--flag=value` is the dedicated unexpected-value case;
                    // a free-standing token after a flag stays in the stream
                    // and is classified as the next positional.
                    if !values.is_empty() {
                        return Err(ArgsError::ArityMismatch {
                            name: spec.name().to_string(),
                            expected: 0,
                            found: values.len(),
                        });
                    }
                }
                Arity::One => {
                    if values.is_empty() {
                        if i < tokens.len() {
                            values.push(tokens[i].clone());
                            i += 1;
                        } else {
                            return Err(ArgsError::MissingValue(spec.name().to_string()));
                        }
                    }
                }
                Arity::ZeroOrOne => {
                    if values.is_empty() {
                        let take = i < tokens.len() && !is_registered_option(registry, &tokens[i]);
                        if take {
                            values.push(tokens[i].clone());
                            i += 1;
                        } else if let Some(default) = spec.default_raw() {
                            values.push(default.to_string());
                        }
                    }
                }
                Arity::Exactly(n) => {
                    while values.len() < n && i < tokens.len() {
                        values.push(tokens[i].clone());
                        i += 1;
                    }
                    if values.len() != n {
                        return Err(ArgsError::ArityMismatch {
                            name: spec.name().to_string(),
                            expected: n,
                            found: values.len(),
                        });
                    }
                }
            }

            matches.push(MatchedArg { index, values });
        } else {
            // Positional tokens fill declared positionals strictly in order.
            match registry.positional_indexes().get(next_positional) {
                Some(&index) => {
                    matches.push(MatchedArg {
                        index,
                        values: vec![token.clone()],
                    });
                    next_positional += 1;
                }
                None => return Err(ArgsError::ExtraPositional(token.clone())),
            }
        }
    }

    // Unfilled required positionals surface here, before any binding runs.
    for &index in &registry.positional_indexes()[next_positional..] {
        let spec = registry.spec(index);
        if spec.is_required() {
            return Err(ArgsError::MissingArgument(spec.name().to_string()));
        }
    }

    Ok(matches)
}
