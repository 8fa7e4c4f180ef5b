//! Structural validation of the grammar and node-types assets.
//!
//! The embedded assets are trusted at runtime, so every invariant the
//! language handle relies on is checked here and exercised by tests:
//! symbol references resolve, the entry rule exists, every visible rule is
//! reachable, and the node-types inventory agrees with the rule map.
//! Hard violations are [`GrammarError::Validation`] errors; advisory
//! findings are returned as [`ValidationWarning`] values for the caller to
//! report.

use crate::grammar::{Grammar, GrammarError, Rule, RuleType};
use crate::node_types::NodeType;
use std::collections::{HashMap, HashSet};

/// The rule every vvSQL parse starts from.
///
/// The rule map is unordered, so reachability is anchored here explicitly
/// rather than at whichever rule happens to come first.
pub const ENTRY_RULE: &str = "source_file";

/// An advisory finding from validation.
///
/// Warnings flag constructs that are legal but suspicious, such as a rule
/// nothing references. They never prevent the language handle from loading.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The human-readable description of the finding.
    pub message: String,
}

impl ValidationWarning {
    fn new(msg: impl Into<String>) -> Self {
        Self { message: msg.into() }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Validates a parsed grammar.
///
/// Runs these passes in order:
///
/// - every `SYMBOL` reference resolves to a rule or an external token;
/// - the entry rule [`ENTRY_RULE`] exists;
/// - the declared `word` rule, if any, resolves;
/// - rules unreachable from the entry rule (with extras and externals as
///   additional roots) are reported as warnings;
/// - immediate left recursion is reported as a warning;
/// - rules wrapped in conflicting numeric precedence levels are warnings.
///
/// # Errors
///
/// Returns [`GrammarError::Validation`] on the first hard violation.
pub fn validate(grammar: &Grammar) -> Result<Vec<ValidationWarning>, GrammarError> {
    let mut warnings = Vec::new();

    check_symbol_references(grammar)?;
    check_entry_and_word(grammar)?;
    check_reachability(grammar, &mut warnings);
    check_left_recursion(grammar, &mut warnings);
    check_precedence(grammar, &mut warnings);

    Ok(warnings)
}

/// Cross-checks the node-types inventory against the grammar.
///
/// Every named, non-supertype node kind must correspond to a rule or an
/// external token; every visible rule missing from the inventory is
/// reported as a warning.
///
/// # Errors
///
/// Returns [`GrammarError::Validation`] if the inventory names a kind the
/// grammar cannot produce.
pub fn check_node_types(
    grammar: &Grammar,
    node_types: &[NodeType],
) -> Result<Vec<ValidationWarning>, GrammarError> {
    let mut warnings = Vec::new();
    let externals: HashSet<&str> = grammar.external_names().into_iter().collect();

    for entry in node_types {
        if !entry.named {
            continue;
        }
        let known = grammar.rules.contains_key(&entry.kind)
            || externals.contains(entry.kind.as_str())
            || aliases(grammar).contains(entry.kind.as_str());
        if !known {
            return Err(GrammarError::Validation(format!(
                "node type '{}' has no corresponding grammar rule",
                entry.kind
            )));
        }
    }

    let inventory: HashSet<&str> = node_types.iter().map(|t| t.kind.as_str()).collect();
    for name in grammar.visible_rule_names() {
        if !inventory.contains(name) {
            warnings.push(ValidationWarning::new(format!(
                "rule '{name}' does not appear in node-types"
            )));
        }
    }

    Ok(warnings)
}

fn aliases(grammar: &Grammar) -> HashSet<&str> {
    let mut names = HashSet::new();
    for rule in grammar.rules.values() {
        rule.walk(&mut |r| {
            if matches!(r.rule_type, RuleType::Alias) && r.named == Some(true) {
                if let Some(name) = r.name.as_deref() {
                    names.insert(name);
                }
            }
        });
    }
    names
}

fn check_symbol_references(grammar: &Grammar) -> Result<(), GrammarError> {
    let mut defined: HashSet<&str> = grammar.rules.keys().map(String::as_str).collect();
    defined.extend(grammar.external_names());

    for (rule_name, rule) in &grammar.rules {
        let mut unresolved = None;
        rule.walk(&mut |r| {
            if unresolved.is_none() {
                if let Some(name) = r.symbol_name() {
                    if !defined.contains(name) {
                        unresolved = Some(name.to_owned());
                    }
                }
            }
        });
        if let Some(name) = unresolved {
            return Err(GrammarError::Validation(format!(
                "undefined symbol '{name}' referenced in rule '{rule_name}'"
            )));
        }
    }

    for extra in grammar.extras.iter().flatten() {
        if let Some(name) = extra.symbol_name() {
            if !defined.contains(name) {
                return Err(GrammarError::Validation(format!(
                    "undefined symbol '{name}' referenced in extras"
                )));
            }
        }
    }

    Ok(())
}

fn check_entry_and_word(grammar: &Grammar) -> Result<(), GrammarError> {
    if grammar.rules.is_empty() {
        return Err(GrammarError::Validation("grammar has no rules".into()));
    }
    if !grammar.rules.contains_key(ENTRY_RULE) {
        return Err(GrammarError::Validation(format!(
            "grammar has no '{ENTRY_RULE}' entry rule"
        )));
    }
    if let Some(word) = &grammar.word {
        if !grammar.rules.contains_key(word) {
            return Err(GrammarError::Validation(format!(
                "word rule '{word}' is not defined"
            )));
        }
    }
    Ok(())
}

fn check_reachability(grammar: &Grammar, warnings: &mut Vec<ValidationWarning>) {
    // Extras and external tokens are consumed outside the rule graph, so
    // they seed the walk alongside the entry rule.
    let mut to_visit = vec![ENTRY_RULE.to_owned()];
    for extra in grammar.extras.iter().flatten() {
        if let Some(name) = extra.symbol_name() {
            to_visit.push(name.to_owned());
        }
    }
    for name in grammar.external_names() {
        to_visit.push(name.to_owned());
    }

    let mut reachable = HashSet::new();
    while let Some(rule_name) = to_visit.pop() {
        if !reachable.insert(rule_name.clone()) {
            continue;
        }
        if let Some(rule) = grammar.rules.get(&rule_name) {
            rule.walk(&mut |r| {
                if let Some(name) = r.symbol_name() {
                    to_visit.push(name.to_owned());
                }
            });
        }
    }

    for rule_name in grammar.rules.keys() {
        if !reachable.contains(rule_name) && !grammar.is_inlined(rule_name) {
            warnings.push(ValidationWarning::new(format!(
                "unreachable rule '{rule_name}'"
            )));
        }
    }
}

fn check_left_recursion(grammar: &Grammar, warnings: &mut Vec<ValidationWarning>) {
    for (rule_name, rule) in &grammar.rules {
        if starts_with_self(rule, rule_name) {
            warnings.push(ValidationWarning::new(format!(
                "rule '{rule_name}' is immediately left-recursive"
            )));
        }
    }
}

fn starts_with_self(rule: &Rule, target: &str) -> bool {
    match rule.rule_type {
        RuleType::Symbol => rule.name.as_deref() == Some(target),

        RuleType::Seq => rule
            .members
            .first()
            .is_some_and(|first| starts_with_self(first, target)),

        RuleType::Choice => rule
            .members
            .iter()
            .any(|member| starts_with_self(member, target)),

        RuleType::Repeat
        | RuleType::Repeat1
        | RuleType::Prec
        | RuleType::PrecLeft
        | RuleType::PrecRight
        | RuleType::Field
        | RuleType::Alias => rule
            .content
            .as_deref()
            .is_some_and(|content| starts_with_self(content, target)),

        _ => false,
    }
}

fn check_precedence(grammar: &Grammar, warnings: &mut Vec<ValidationWarning>) {
    let mut levels: HashMap<&str, Vec<i32>> = HashMap::new();

    for (rule_name, rule) in &grammar.rules {
        rule.walk(&mut |r| {
            if let Some(level) = r.precedence() {
                levels.entry(rule_name.as_str()).or_default().push(level);
            }
        });
    }

    for (rule_name, mut found) in levels {
        found.sort_unstable();
        found.dedup();
        if found.len() > 1 {
            warnings.push(ValidationWarning::new(format!(
                "rule '{rule_name}' mixes precedence levels {found:?}"
            )));
        }
    }
}
