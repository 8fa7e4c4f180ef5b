//! The process-wide vvSQL language handle.
//!
//! [`Language`] is the concrete object behind the `tree_sitter_vvsql`
//! accessor: an immutable description of the vvSQL grammar built once from
//! the embedded assets and shared for the lifetime of the process. It owns
//! the node-kind and field id tables that consumers use to interpret parse
//! trees, and the keyword set of the `VISUALISE` statement.

use std::num::NonZeroU16;
use std::sync::OnceLock;

use crate::grammar::{parse_grammar, Grammar, GrammarError};
use crate::node_types::parse_node_types;
use crate::validate;
use crate::{GRAMMAR_JSON, NODE_TYPES};

/// Version of the handle's table layout and id assignment scheme.
///
/// Bumped whenever the meaning of node-kind or field ids changes, so
/// consumers holding serialized ids can detect incompatibility.
pub const ABI_VERSION: u32 = 1;

/// Keywords of the `VISUALISE` statement, both statement spellings included.
///
/// Membership is case-insensitive; SQL keywords of the query prefix are
/// deliberately absent, that text is opaque to this grammar.
const KEYWORDS: &[&str] = &[
    "AS",
    "BY",
    "COORD",
    "DRAW",
    "FACET",
    "LABEL",
    "MAPPING",
    "SCALE",
    "SETTING",
    "THEME",
    "VISUALISE",
    "VISUALIZE",
];

/// An immutable description of the vvSQL grammar.
///
/// Node-kind ids are assigned from node-types order, starting at 1; id 0 is
/// reserved and never names a kind. Field ids are 1-based over the sorted
/// field-name set. Both assignments are stable for a given asset pair.
#[derive(Debug)]
pub struct Language {
    grammar: Grammar,
    node_kinds: Vec<NodeKind>,
    fields: Vec<String>,
}

#[derive(Debug)]
struct NodeKind {
    name: String,
    named: bool,
}

impl Language {
    /// Builds a language from grammar and node-types JSON sources.
    ///
    /// Both documents are parsed and fully validated; node-kind and field
    /// tables are derived from the node-types inventory.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError`] if either document fails to parse or if
    /// validation finds a hard violation.
    pub fn from_sources(grammar_json: &str, node_types_json: &str) -> Result<Self, GrammarError> {
        let grammar = parse_grammar(grammar_json)?;
        let node_types = parse_node_types(node_types_json)?;

        validate::validate(&grammar)?;
        validate::check_node_types(&grammar, &node_types)?;

        let node_kinds = node_types
            .iter()
            .map(|t| NodeKind {
                name: t.kind.clone(),
                named: t.named,
            })
            .collect();

        let mut fields: Vec<String> = node_types
            .iter()
            .filter_map(|t| t.fields.as_ref())
            .flat_map(|f| f.keys().cloned())
            .collect();
        fields.sort_unstable();
        fields.dedup();

        Ok(Self {
            grammar,
            node_kinds,
            fields,
        })
    }

    /// The grammar's short name, `"vvsql"` for the embedded assets.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.grammar.name
    }

    /// The handle's table-layout version.
    #[must_use]
    pub const fn abi_version(&self) -> u32 {
        ABI_VERSION
    }

    /// The underlying parsed grammar definition.
    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Number of node kinds, not counting the reserved id 0.
    #[must_use]
    pub fn node_kind_count(&self) -> usize {
        self.node_kinds.len()
    }

    /// The kind name for an id, or `None` for 0 and out-of-range ids.
    #[must_use]
    pub fn node_kind_for_id(&self, id: u16) -> Option<&str> {
        let index = usize::from(id).checked_sub(1)?;
        self.node_kinds.get(index).map(|k| k.name.as_str())
    }

    /// The id for a kind name, or 0 if the kind is unknown.
    ///
    /// `named` disambiguates rule-produced nodes from anonymous tokens with
    /// the same spelling, matching how node-types lists them.
    #[must_use]
    pub fn id_for_node_kind(&self, kind: &str, named: bool) -> u16 {
        self.node_kinds
            .iter()
            .position(|k| k.name == kind && k.named == named)
            .and_then(|index| u16::try_from(index + 1).ok())
            .unwrap_or(0)
    }

    /// Whether the kind with this id is named; `false` for unknown ids.
    #[must_use]
    pub fn node_kind_is_named(&self, id: u16) -> bool {
        usize::from(id)
            .checked_sub(1)
            .and_then(|index| self.node_kinds.get(index))
            .is_some_and(|k| k.named)
    }

    /// Number of distinct field names.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// The field name for a 1-based field id.
    #[must_use]
    pub fn field_name_for_id(&self, id: u16) -> Option<&str> {
        let index = usize::from(id).checked_sub(1)?;
        self.fields.get(index).map(String::as_str)
    }

    /// The 1-based field id for a name.
    #[must_use]
    pub fn field_id_for_name(&self, name: &str) -> Option<NonZeroU16> {
        let index = self.fields.iter().position(|f| f == name)?;
        u16::try_from(index + 1).ok().and_then(NonZeroU16::new)
    }

    /// Case-insensitive membership in the `VISUALISE` keyword set.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word))
    }

    /// The canonical keyword spellings, uppercase and sorted.
    #[must_use]
    pub fn keywords(&self) -> &'static [&'static str] {
        KEYWORDS
    }
}

/// Returns the process-wide [`Language`] singleton.
///
/// The handle is built from the embedded assets on first call and shared
/// thereafter; repeated calls return the same reference.
///
/// # Panics
///
/// Panics if the embedded grammar assets fail to parse or validate. The
/// assets are fixed at compile time and covered by tests, so this indicates
/// a defective build rather than a runtime condition.
#[must_use]
pub fn language() -> &'static Language {
    static LANGUAGE: OnceLock<Language> = OnceLock::new();
    LANGUAGE.get_or_init(|| {
        Language::from_sources(GRAMMAR_JSON, NODE_TYPES)
            .expect("embedded vvSQL grammar assets are valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_GRAMMAR: &str = r#"{
        "name": "vvsql",
        "rules": {
            "source_file": {
                "type": "SEQ",
                "members": [
                    { "type": "SYMBOL", "name": "keyword_visualise" },
                    { "type": "SYMBOL", "name": "mapping" }
                ]
            },
            "mapping": {
                "type": "SEQ",
                "members": [
                    {
                        "type": "FIELD",
                        "name": "value",
                        "content": { "type": "SYMBOL", "name": "identifier" }
                    },
                    { "type": "STRING", "value": "," }
                ]
            },
            "keyword_visualise": {
                "type": "TOKEN",
                "content": { "type": "PATTERN", "value": "(?i)visuali[sz]e" }
            },
            "identifier": { "type": "PATTERN", "value": "[A-Za-z_][A-Za-z0-9_]*" }
        }
    }"#;

    const TEST_NODE_TYPES: &str = r#"[
        { "type": "source_file", "named": true, "root": true },
        {
            "type": "mapping",
            "named": true,
            "fields": {
                "value": {
                    "multiple": false,
                    "required": true,
                    "types": [ { "type": "identifier", "named": true } ]
                }
            }
        },
        { "type": "keyword_visualise", "named": true },
        { "type": "identifier", "named": true },
        { "type": ",", "named": false }
    ]"#;

    fn test_language() -> Language {
        Language::from_sources(TEST_GRAMMAR, TEST_NODE_TYPES).unwrap()
    }

    #[test]
    fn ids_follow_node_types_order() {
        let lang = test_language();
        assert_eq!(lang.node_kind_count(), 5);
        assert_eq!(lang.id_for_node_kind("source_file", true), 1);
        assert_eq!(lang.id_for_node_kind("mapping", true), 2);
        assert_eq!(lang.node_kind_for_id(3), Some("keyword_visualise"));
    }

    #[test]
    fn id_zero_is_reserved() {
        let lang = test_language();
        assert_eq!(lang.node_kind_for_id(0), None);
        assert!(!lang.node_kind_is_named(0));
    }

    #[test]
    fn unknown_kinds_map_to_zero() {
        let lang = test_language();
        assert_eq!(lang.id_for_node_kind("select_statement", true), 0);
        // Spelled right but with the wrong namedness.
        assert_eq!(lang.id_for_node_kind(",", true), 0);
        assert_ne!(lang.id_for_node_kind(",", false), 0);
    }

    #[test]
    fn kind_lookup_round_trips() {
        let lang = test_language();
        for id in 1..=u16::try_from(lang.node_kind_count()).unwrap() {
            let kind = lang.node_kind_for_id(id).unwrap();
            let named = lang.node_kind_is_named(id);
            assert_eq!(lang.id_for_node_kind(kind, named), id);
        }
    }

    #[test]
    fn field_ids_are_one_based() {
        let lang = test_language();
        assert_eq!(lang.field_count(), 1);
        let id = lang.field_id_for_name("value").unwrap();
        assert_eq!(id.get(), 1);
        assert_eq!(lang.field_name_for_id(1), Some("value"));
        assert_eq!(lang.field_name_for_id(0), None);
        assert!(lang.field_id_for_name("geom").is_none());
    }

    #[test]
    fn keyword_membership_is_case_insensitive() {
        let lang = test_language();
        assert!(lang.is_keyword("VISUALISE"));
        assert!(lang.is_keyword("visualize"));
        assert!(lang.is_keyword("Draw"));
        assert!(!lang.is_keyword("SELECT"));
        assert!(!lang.is_keyword("point"));
    }

    #[test]
    fn singleton_returns_the_same_reference() {
        assert!(std::ptr::eq(language(), language()));
    }

    #[test]
    fn singleton_is_built_from_the_embedded_assets() {
        let lang = language();
        assert_eq!(lang.name(), "vvsql");
        assert_eq!(lang.abi_version(), ABI_VERSION);
        assert_ne!(lang.id_for_node_kind("visualise_statement", true), 0);
    }
}
