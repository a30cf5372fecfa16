//! Argument specification model.
//!
//! An `ArgSpec` is the registered description of one positional or optional
//! argument: its names, how many value tokens it consumes, what happens on
//! a match, its default and choice set, and the slot it binds through.
//! Specifications are built with chained setters and handed to the registry,
//! which validates them as a whole.

use std::fmt;

use crate::binding::{ArgRef, BindSlot, ListSlot, ValueSlot};
use crate::convert::Convert;

/// How many value tokens an argument consumes per match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one value token
    One,

    /// An optional value token; the declared default stands in when omitted
    ZeroOrOne,

    /// A fixed number of value tokens, bound into a `Vec` destination
    Exactly(usize),

    /// No value tokens; a boolean toggle
    Flag,
}

/// Behavior on match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Consume value token(s), convert, store
    Assign,

    /// Consume nothing, store the converter's fixed truthy value
    StoreTrue,
}

/// Where an argument appears in rendered output. Display-only metadata,
/// never consulted by the parse path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowIn {
    /// Listed in the usage line and the help listing
    UsageAndHelp,

    /// Listed in the help listing only
    HelpOnly,
}

/// Specification for one command-line argument.
pub struct ArgSpec {
    pub(crate) name: String,
    pub(crate) short: Option<char>,
    pub(crate) positional: bool,
    pub(crate) arity: Arity,
    pub(crate) action: Action,
    pub(crate) slot: Box<dyn BindSlot>,
    pub(crate) default_raw: Option<String>,
    pub(crate) choices: Option<Vec<String>>,
    pub(crate) required: Option<bool>,
    pub(crate) help: String,
    pub(crate) metavar: Option<String>,
    pub(crate) show_in: ShowIn,
}

impl ArgSpec {
    fn with_slot(name: &str, positional: bool, arity: Arity, action: Action, slot: Box<dyn BindSlot>) -> Self {
        Self {
            name: name.to_string(),
            short: None,
            positional,
            arity,
            action,
            slot,
            default_raw: None,
            choices: None,
            required: None,
            help: String::new(),
            metavar: None,
            show_in: ShowIn::UsageAndHelp,
        }
    }

    /// Specification for a positional argument, matched by declaration order.
    pub fn positional<C>(name: &str, dest: &ArgRef<C::Value>, converter: C) -> Self
    where
        C: Convert + 'static,
        C::Value: 'static,
    {
        Self::with_slot(
            name,
            true,
            Arity::One,
            Action::Assign,
            Box::new(ValueSlot::new(dest, converter)),
        )
    }

    /// Specification for a value-taking option (`--name value`).
    pub fn option<C>(name: &str, dest: &ArgRef<C::Value>, converter: C) -> Self
    where
        C: Convert + 'static,
        C::Value: 'static,
    {
        Self::with_slot(
            name,
            false,
            Arity::One,
            Action::Assign,
            Box::new(ValueSlot::new(dest, converter)),
        )
    }

    /// Specification for a toggle flag: consumes no value, stores the
    /// converter's fixed truthy value when present.
    pub fn flag<C>(name: &str, dest: &ArgRef<C::Value>, converter: C) -> Self
    where
        C: Convert + 'static,
        C::Value: 'static,
    {
        Self::with_slot(
            name,
            false,
            Arity::Flag,
            Action::StoreTrue,
            Box::new(ValueSlot::new(dest, converter)),
        )
    }

    /// Specification for an option consuming a fixed number of values into
    /// a `Vec` destination.
    pub fn list<C>(name: &str, count: usize, dest: &ArgRef<Vec<C::Value>>, converter: C) -> Self
    where
        C: Convert + 'static,
        C::Value: 'static,
    {
        Self::with_slot(
            name,
            false,
            Arity::Exactly(count),
            Action::Assign,
            Box::new(ListSlot::new(dest, converter)),
        )
    }

    /// Attach a single-character short form (`-x`).
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Raw default, converted and bound when the argument is absent.
    pub fn default_value(mut self, raw: &str) -> Self {
        self.default_raw = Some(raw.to_string());
        self
    }

    /// Closed set of valid raw values, checked before conversion.
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Make the value token optional; the default stands in when omitted.
    pub fn optional_value(mut self) -> Self {
        self.arity = Arity::ZeroOrOne;
        self
    }

    /// Override the implicit required rule (positionals without defaults
    /// are required, options are optional).
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Help text shown in the help listing.
    pub fn help(mut self, text: &str) -> Self {
        self.help = text.to_string();
        self
    }

    /// Placeholder name for the value in usage and help output.
    pub fn metavar(mut self, text: &str) -> Self {
        self.metavar = Some(text.to_string());
        self
    }

    /// Control visibility in rendered output.
    pub fn show_in(mut self, show_in: ShowIn) -> Self {
        self.show_in = show_in;
        self
    }

    /// Canonical name (`architecture`, `--route_type`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The short-form token (`-x`), when declared.
    pub fn short_token(&self) -> Option<String> {
        self.short.map(|c| format!("-{}", c))
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn is_positional(&self) -> bool {
        self.positional
    }

    pub fn default_raw(&self) -> Option<&str> {
        self.default_raw.as_deref()
    }

    pub fn declared_choices(&self) -> Option<&[String]> {
        self.choices.as_deref()
    }

    /// Whether this argument must appear (explicitly or via default) for a
    /// parse to succeed.
    pub fn is_required(&self) -> bool {
        match self.required {
            Some(explicit) => explicit,
            None => self.positional && self.default_raw.is_none(),
        }
    }

    /// Render the currently bound value in raw form.
    pub fn render_bound(&self) -> String {
        self.slot.render()
    }
}

impl fmt::Debug for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgSpec")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("positional", &self.positional)
            .field("arity", &self.arity)
            .field("action", &self.action)
            .field("default_raw", &self.default_raw)
            .field("choices", &self.choices)
            .finish()
    }
}
