//! Rust-native tree-sitter grammar and language handle for vvSQL.
//!
//! vvSQL extends SQL with a `VISUALISE` clause for declarative data
//! visualization (`SELECT ... VISUALISE x, y DRAW point`). This crate embeds
//! the vvSQL grammar definition, node-types inventory, and highlighting
//! queries; models and validates them; and serves them through a
//! process-wide singleton [`Language`] handle reachable from Rust
//! ([`language`]), from C ([`tree_sitter_vvsql`]), and from Python (the
//! `vvsql-py` crate in this workspace).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::multiple_crate_versions)]

/// Core structures and parsing logic for the grammar definition.
///
/// This module defines how the crate understands the declarative shape of
/// the language: the grammar itself. Everything else builds upon these
/// types.
pub mod grammar;

/// The node-kind inventory that accompanies the grammar.
pub mod node_types;

/// Grammar and node-types validation.
///
/// Validation protects the language handle from malformed assets. It
/// enforces tree-sitter's structural invariants and checks that the grammar
/// and the node-types inventory agree with each other.
pub mod validate;

/// The process-wide language handle built from the embedded assets.
pub mod language;

/// The C ABI export, `tree_sitter_vvsql`.
pub mod ffi;

pub use ffi::tree_sitter_vvsql;
pub use grammar::{parse_grammar, Grammar, GrammarError, Rule, RuleType, RuleValue};
pub use language::{language, Language, ABI_VERSION};
pub use node_types::{parse_node_types, ChildQuantity, NodeType, NodeTypeRef};
pub use validate::{check_node_types, validate, ValidationWarning, ENTRY_RULE};

/// The vvSQL grammar definition in the tree-sitter JSON format.
pub const GRAMMAR_JSON: &str = include_str!("../grammar/vvsql.json");

/// The node-types inventory for the vvSQL grammar.
///
/// See <https://tree-sitter.github.io/tree-sitter/using-parsers#static-node-types>
pub const NODE_TYPES: &str = include_str!("../grammar/node-types.json");

/// The syntax highlighting queries for vvSQL.
pub const HIGHLIGHTS_QUERY: &str = include_str!("../queries/highlights.scm");
