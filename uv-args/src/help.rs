//! Usage and help rendering for a parser's registered arguments.
//!
//! Plain strings, no wrapping, no colors — terminal presentation is the
//! consumer's concern. The usage line shows positionals and the options
//! marked for it; the help listing shows everything, with defaults and
//! choice domains appended.

use crate::parser::ArgParser;
use crate::spec::{ArgSpec, Arity, ShowIn};

/// Placeholder for an argument's value in usage and help output.
fn metavar(spec: &ArgSpec) -> String {
    if let Some(metavar) = &spec.metavar {
        return metavar.clone();
    }
    let domain = spec
        .declared_choices()
        .map(|choices| choices.to_vec())
        .or_else(|| spec.slot.converter_choices());
    if let Some(domain) = domain {
        return format!("{{{}}}", domain.join(","));
    }
    spec.name
        .trim_start_matches('-')
        .replace('-', "_")
        .to_uppercase()
}

/// The token(s) an option is invoked with, short form first.
fn invocation(spec: &ArgSpec) -> String {
    match spec.short_token() {
        Some(short) => format!("{}, {}", short, spec.name),
        None => spec.name.clone(),
    }
}

/// Usage-line stub for one option.
fn usage_stub(spec: &ArgSpec) -> String {
    match spec.arity() {
        Arity::Flag => spec.name.clone(),
        Arity::One => format!("{} {}", spec.name, metavar(spec)),
        Arity::ZeroOrOne => format!("{} [{}]", spec.name, metavar(spec)),
        Arity::Exactly(n) => {
            let mut stub = spec.name.clone();
            for _ in 0..n {
                stub.push(' ');
                stub.push_str(&metavar(spec));
            }
            stub
        }
    }
}

/// Help-listing stub for one argument (invocation plus metavar).
fn help_stub(spec: &ArgSpec) -> String {
    if spec.is_positional() {
        return spec.name.clone();
    }
    match spec.arity() {
        Arity::Flag => invocation(spec),
        _ => format!("{} {}", invocation(spec), metavar(spec)),
    }
}

/// Bracketed annotations appended after the help text.
fn annotations(spec: &ArgSpec) -> String {
    let mut notes = String::new();
    if let Some(default) = spec.default_raw() {
        notes.push_str(&format!(" [default: {}]", default));
    }
    if let Some(choices) = spec.declared_choices() {
        notes.push_str(&format!(" [choices: {}]", choices.join(", ")));
    }
    notes
}

pub(crate) fn format_usage(parser: &ArgParser) -> String {
    let mut line = format!("Usage: {}", parser.prog);

    for spec in parser.registry().iter() {
        if spec.is_positional() || spec.show_in == ShowIn::HelpOnly {
            continue;
        }
        line.push_str(&format!(" [{}]", usage_stub(spec)));
    }

    for spec in parser.registry().iter() {
        if !spec.is_positional() {
            continue;
        }
        if spec.is_required() {
            line.push_str(&format!(" {}", spec.name));
        } else {
            line.push_str(&format!(" [{}]", spec.name));
        }
    }

    line
}

/// Two-column listing of the given specs, stubs padded to one width.
fn listing<'a>(specs: impl Iterator<Item = &'a ArgSpec>) -> String {
    let entries: Vec<(String, String)> = specs
        .map(|spec| {
            let mut text = spec.help.clone();
            text.push_str(&annotations(spec));
            (help_stub(spec), text)
        })
        .collect();

    let width = entries.iter().map(|(stub, _)| stub.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (stub, text) in entries {
        if text.is_empty() {
            out.push_str(&format!("  {}\n", stub));
        } else {
            out.push_str(&format!("  {:<width$}  {}\n", stub, text, width = width));
        }
    }
    out
}

pub(crate) fn format_help(parser: &ArgParser) -> String {
    let mut out = format_usage(parser);
    out.push('\n');

    if !parser.description.is_empty() {
        out.push_str(&format!("\n{}\n", parser.description));
    }

    let registry = parser.registry();
    if registry.iter().any(|s| s.is_positional()) {
        out.push_str("\npositional arguments:\n");
        out.push_str(&listing(registry.iter().filter(|s| s.is_positional())));
    }

    if registry.iter().any(|s| !s.is_positional()) {
        out.push_str("\noptions:\n");
        out.push_str(&listing(registry.iter().filter(|s| !s.is_positional())));
    }

    if !parser.epilog.is_empty() {
        out.push_str(&format!("\n{}\n", parser.epilog));
    }

    out
}
