//! End-to-end checks of the embedded vvSQL assets and the language handle.

use vvsql::{
    check_node_types, language, parse_grammar, parse_node_types, tree_sitter_vvsql, validate,
    GRAMMAR_JSON, HIGHLIGHTS_QUERY, NODE_TYPES,
};

#[test]
fn embedded_grammar_parses_and_validates_clean() {
    let grammar = parse_grammar(GRAMMAR_JSON).unwrap();
    assert_eq!(grammar.name, "vvsql");

    let warnings = validate(&grammar).unwrap();
    assert!(warnings.is_empty(), "grammar warnings: {warnings:?}");

    let node_types = parse_node_types(NODE_TYPES).unwrap();
    let warnings = check_node_types(&grammar, &node_types).unwrap();
    assert!(warnings.is_empty(), "node-types warnings: {warnings:?}");
}

#[test]
fn accessor_returns_one_process_wide_handle() {
    let first = tree_sitter_vvsql();
    let second = tree_sitter_vvsql();
    assert!(!first.is_null());
    assert_eq!(first, second);
    assert_eq!(first, std::ptr::from_ref(language()));
}

#[test]
fn every_visible_rule_has_a_node_kind_id() {
    let lang = language();
    for name in lang.grammar().visible_rule_names() {
        assert_ne!(
            lang.id_for_node_kind(name, true),
            0,
            "rule '{name}' missing from the node-kind table"
        );
    }
}

#[test]
fn statement_fields_resolve_to_ids() {
    let lang = language();
    assert_eq!(lang.field_count(), 7);
    for field in ["aesthetic", "geom", "name", "system", "target", "text", "value"] {
        assert!(
            lang.field_id_for_name(field).is_some(),
            "field '{field}' missing"
        );
    }
    assert!(lang.field_id_for_name("columns").is_none());
}

#[test]
fn keyword_set_covers_both_statement_spellings() {
    let lang = language();
    for keyword in [
        "VISUALISE",
        "visualize",
        "draw",
        "mapping",
        "setting",
        "scale",
        "facet",
        "by",
        "coord",
        "label",
        "theme",
        "as",
    ] {
        assert!(lang.is_keyword(keyword), "'{keyword}' should be a keyword");
    }
    for word in ["select", "from", "point", "x"] {
        assert!(!lang.is_keyword(word), "'{word}' should not be a keyword");
    }
}

#[test]
fn geom_inventory_matches_the_original_set() {
    let lang = language();
    let geom_rule = &lang.grammar().rules["geom_type"];
    let pattern = geom_rule
        .content
        .as_deref()
        .and_then(vvsql::Rule::pattern_value)
        .unwrap();
    for geom in [
        "point", "line", "bar", "area", "boxplot", "violin", "text", "label", "segment",
        "polygon", "path", "ribbon", "arrow", "errorbar",
    ] {
        assert!(pattern.contains(geom), "geom '{geom}' missing from {pattern}");
    }
}

#[test]
fn clause_supertype_groups_all_six_clauses() {
    let node_types = parse_node_types(NODE_TYPES).unwrap();
    let clause = node_types.iter().find(|t| t.kind == "_clause").unwrap();
    let subtypes = clause.subtypes.as_ref().unwrap();
    let mut kinds: Vec<&str> = subtypes.iter().map(|s| s.kind.as_str()).collect();
    kinds.sort_unstable();
    assert_eq!(
        kinds,
        [
            "coord_clause",
            "draw_clause",
            "facet_clause",
            "label_clause",
            "scale_clause",
            "theme_clause"
        ]
    );
}

#[test]
fn word_rule_is_the_identifier() {
    let grammar = language().grammar();
    assert_eq!(grammar.word.as_deref(), Some("identifier"));
    assert!(grammar.rules.contains_key("identifier"));
}

#[test]
fn highlights_reference_only_known_kinds_and_fields() {
    let lang = language();
    let (kinds, fields, anonymous) = scan_query(HIGHLIGHTS_QUERY);

    assert!(!kinds.is_empty());
    for kind in kinds {
        assert_ne!(
            lang.id_for_node_kind(&kind, true),
            0,
            "highlights references unknown node kind '{kind}'"
        );
    }
    for field in fields {
        assert!(
            lang.field_id_for_name(&field).is_some(),
            "highlights references unknown field '{field}'"
        );
    }
    for token in anonymous {
        assert_ne!(
            lang.id_for_node_kind(&token, false),
            0,
            "highlights references unknown token '{token}'"
        );
    }
}

/// Pulls node kinds `(kind`, field names `name:`, and quoted anonymous
/// tokens out of a query file. Comment lines (`;`) are skipped.
fn scan_query(query: &str) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut kinds = Vec::new();
    let mut fields = Vec::new();
    let mut anonymous = Vec::new();

    for line in query.lines() {
        let line = line.trim();
        if line.starts_with(';') {
            continue;
        }
        let bytes = line.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'(' => {
                    let word = take_word(line, i + 1);
                    if !word.is_empty() {
                        kinds.push(word.to_owned());
                    }
                    i += 1 + word.len();
                }
                b'"' => {
                    if let Some(end) = line[i + 1..].find('"') {
                        anonymous.push(line[i + 1..i + 1 + end].to_owned());
                        i += end + 2;
                    } else {
                        i += 1;
                    }
                }
                b'a'..=b'z' | b'_' => {
                    let word = take_word(line, i);
                    if line[i + word.len()..].starts_with(':') {
                        fields.push(word.to_owned());
                    }
                    i += word.len();
                }
                b'@' => {
                    // Skip the capture name, dots included.
                    i += 1;
                    while i < bytes.len()
                        && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'.' || bytes[i] == b'_')
                    {
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        }
    }

    (kinds, fields, anonymous)
}

fn take_word(line: &str, start: usize) -> &str {
    let rest = &line[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_lowercase() && c != '_')
        .unwrap_or(rest.len());
    &rest[..end]
}
