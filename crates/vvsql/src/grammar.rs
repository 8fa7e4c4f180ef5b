//! The vvSQL grammar definition as strongly typed data.
//!
//! This module models the tree-sitter JSON grammar format and parses the
//! embedded vvSQL grammar into it with [`facet_json`]. The parsed [`Grammar`]
//! is the content behind the process-wide language handle: rule structure,
//! extras, external tokens, and the hidden/inline bookkeeping the validator
//! and the handle's lookup tables are built from.

use facet::Facet;
use std::collections::HashMap;

pub mod rules;

pub use rules::{Rule, RuleType, RuleValue};

/// A full grammar definition in the tree-sitter JSON format.
///
/// The field set mirrors the serialized form produced by
/// `tree-sitter generate --json`; for vvSQL the interesting parts are the
/// rule map (the `VISUALISE` statement and its clauses), the extras
/// (whitespace and `--` comments), and the single external token that the
/// original project used to skim over the SQL prefix of a query.
///
/// See <https://tree-sitter.github.io/tree-sitter/assets/schemas/grammar.schema.json>
#[derive(Debug, Clone, Facet)]
pub struct Grammar {
    /// Optional `$schema` field, kept for round-trip fidelity.
    #[facet(rename = "$schema")]
    #[facet(default)]
    pub schema: Option<String>,

    /// The short name of the grammar (`"vvsql"` for the embedded asset).
    pub name: String,

    /// Name of a base grammar this one inherits from, if any.
    #[facet(default)]
    pub inherits: Option<String>,

    /// Map of rule names to their definitions.
    pub rules: HashMap<String, Rule>,

    /// Rules allowed between any two tokens, such as whitespace or comments.
    #[facet(default)]
    pub extras: Option<Vec<Rule>>,

    /// Tokens produced by an external scanner rather than by grammar rules.
    #[facet(default)]
    pub externals: Option<Vec<Rule>>,

    /// Names of rules inlined into their call sites and absent from trees.
    #[facet(default)]
    pub inline: Option<Vec<String>>,

    /// Named precedence orderings.
    #[facet(default)]
    pub precedences: Option<Vec<Vec<Precedence>>>,

    /// Rule groups with expected parse conflicts.
    #[facet(default)]
    pub conflicts: Option<Vec<Vec<String>>>,

    /// Context-specific reserved word sets.
    #[facet(default)]
    pub reserved: Option<HashMap<String, Vec<Rule>>>,

    /// The rule treated as the word token for keyword extraction.
    #[facet(default)]
    pub word: Option<String>,

    /// Node supertypes grouping related syntactic forms.
    #[facet(default)]
    pub supertypes: Option<Vec<String>>,
}

/// One entry in a named precedence ordering.
#[derive(Debug, Clone, Facet)]
#[repr(u8)]
pub enum Precedence {
    /// A literal precedence name.
    String(String),

    /// A reference to a symbol's precedence.
    Symbol {
        /// The identifier of the referenced symbol.
        name: String,
    },
}

/// Errors raised while parsing or validating grammar assets.
#[derive(Debug)]
pub enum GrammarError {
    /// The input JSON was syntactically invalid or did not match the schema.
    JsonParse(String),

    /// A structural or semantic validation failure.
    Validation(String),
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GrammarError::JsonParse(e) => write!(f, "JSON parse error: {e}"),
            GrammarError::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for GrammarError {}

/// Parse a JSON grammar definition into a [`Grammar`].
///
/// # Errors
///
/// Returns [`GrammarError::JsonParse`] if the input is not valid JSON or
/// fails schema deserialization.
pub fn parse_grammar(json: &str) -> Result<Grammar, GrammarError> {
    facet_json::from_str(json).map_err(|e| GrammarError::JsonParse(e.to_string()))
}

impl Grammar {
    /// Returns `true` if a rule name is hidden (leading underscore).
    ///
    /// Hidden rules structure the grammar but never appear as nodes in a
    /// parse tree, so they are exempt from node-types coverage.
    #[must_use]
    pub fn is_hidden(name: &str) -> bool {
        name.starts_with('_')
    }

    /// Returns `true` if the named rule is inlined into its call sites.
    #[must_use]
    pub fn is_inlined(&self, name: &str) -> bool {
        self.inline.as_ref().is_some_and(|v| v.iter().any(|n| n == name))
    }

    /// Names of tokens supplied by the external scanner.
    #[must_use]
    pub fn external_names(&self) -> Vec<&str> {
        self.externals
            .iter()
            .flatten()
            .filter_map(Rule::symbol_name)
            .collect()
    }

    /// Names of rules that produce visible parse-tree nodes.
    ///
    /// Excludes hidden and inlined rules; the order follows the rule map and
    /// is not significant.
    #[must_use]
    pub fn visible_rule_names(&self) -> Vec<&str> {
        self.rules
            .keys()
            .map(String::as_str)
            .filter(|name| !Self::is_hidden(name) && !self.is_inlined(name))
            .collect()
    }
}
