//! Parser facade owning the registry and program metadata.

use crate::binder::{self, ParseReport};
use crate::error::Result;
use crate::help;
use crate::registry::Registry;
use crate::scanner;
use crate::spec::ArgSpec;

/// A reusable command-line parser.
///
/// Construct once, register specifications, then parse any number of token
/// lists against it. Parsing never mutates the parser itself, only the
/// caller-owned destinations behind the registered slots — so two parses
/// with the same tokens against freshly-defaulted destinations bind
/// identical values.
pub struct ArgParser {
    pub(crate) prog: String,
    pub(crate) description: String,
    pub(crate) epilog: String,
    registry: Registry,
}

impl ArgParser {
    /// Create a parser for the named program.
    pub fn new(prog: &str) -> Self {
        Self {
            prog: prog.to_string(),
            description: String::new(),
            epilog: String::new(),
            registry: Registry::new(),
        }
    }

    /// One-line description shown at the top of the help listing.
    pub fn description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    /// Trailing text shown at the bottom of the help listing.
    pub fn epilog(mut self, text: &str) -> Self {
        self.epilog = text.to_string();
        self
    }

    /// Register an argument specification.
    ///
    /// Fails with a registration-time error (duplicate name, invalid
    /// default, malformed specification); consumers should treat that as a
    /// startup failure, not user input to recover from.
    pub fn register(&mut self, spec: ArgSpec) -> Result<()> {
        self.registry.register(spec)
    }

    /// Parse one command line.
    ///
    /// # Arguments
    ///
    /// * `args` - The raw tokens, without the program name
    ///
    /// # Returns
    ///
    /// On success every registered destination has been bound, explicitly
    /// or from its default, and the report records which arguments were
    /// explicitly supplied. On failure the first error encountered is
    /// returned and the state of bound storage is unspecified.
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<ParseReport> {
        let tokens: Vec<String> = args.iter().map(|s| s.as_ref().to_string()).collect();

        // 1. Scan the raw tokens against the registry.
        let matches = scanner::scan(&self.registry, &tokens)?;

        // 2. Bind matched values, then defaults, then required checks.
        binder::bind(&self.registry, &matches)
    }

    /// The one-line usage summary.
    pub fn format_usage(&self) -> String {
        help::format_usage(self)
    }

    /// The full help listing.
    pub fn format_help(&self) -> String {
        help::format_help(self)
    }

    /// The registered specifications, for consumers that render their own
    /// output.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
