//! The node-types inventory shipped alongside the grammar.
//!
//! `node-types.json` is the static description of every node kind a parse
//! tree can contain: its name, whether it is named, its fields and the node
//! kinds those fields may hold. The language handle derives its node-kind id
//! table from this file, so entry order matters and is preserved.

use facet::Facet;
use std::collections::HashMap;

use crate::grammar::GrammarError;

/// One entry in the node-types inventory.
#[derive(Debug, Clone, Facet)]
pub struct NodeType {
    /// The node kind, e.g. `"visualise_statement"` or `","`.
    #[facet(rename = "type")]
    pub kind: String,

    /// Whether the node is named (rule-produced) or an anonymous token.
    pub named: bool,

    /// Set on the root node kind (`source_file`).
    #[facet(default)]
    pub root: Option<bool>,

    /// Set on extras such as comments.
    #[facet(default)]
    pub extra: Option<bool>,

    /// Field names and the node kinds each field can hold.
    #[facet(default)]
    pub fields: Option<HashMap<String, ChildQuantity>>,

    /// Unnamed children: everything not captured by a field.
    #[facet(default)]
    pub children: Option<ChildQuantity>,

    /// For supertype entries, the concrete kinds grouped under this name.
    #[facet(default)]
    pub subtypes: Option<Vec<NodeTypeRef>>,
}

/// Cardinality and admissible kinds for a field or child slot.
#[derive(Debug, Clone, Facet)]
pub struct ChildQuantity {
    /// Whether more than one child can occupy the slot.
    pub multiple: bool,

    /// Whether at least one child always occupies the slot.
    pub required: bool,

    /// The node kinds admissible in the slot.
    pub types: Vec<NodeTypeRef>,
}

/// A reference to a node kind from a field, child, or subtype list.
#[derive(Debug, Clone, Facet)]
pub struct NodeTypeRef {
    /// The referenced node kind.
    #[facet(rename = "type")]
    pub kind: String,

    /// Whether the referenced kind is named.
    pub named: bool,
}

/// Parse a `node-types.json` document into its entries, preserving order.
///
/// # Errors
///
/// Returns [`GrammarError::JsonParse`] if the input is not valid JSON or
/// fails schema deserialization.
pub fn parse_node_types(json: &str) -> Result<Vec<NodeType>, GrammarError> {
    facet_json::from_str(json).map_err(|e| GrammarError::JsonParse(e.to_string()))
}

impl NodeType {
    /// Returns `true` if this entry describes a supertype grouping.
    #[must_use]
    pub fn is_supertype(&self) -> bool {
        self.subtypes.is_some()
    }

    /// Field names declared on this node kind, sorted.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .fields
            .iter()
            .flat_map(HashMap::keys)
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }
}
