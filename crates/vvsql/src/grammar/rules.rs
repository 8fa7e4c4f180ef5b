//! Types modelling individual grammar rules.
//!
//! A grammar in the tree-sitter JSON format is a map from rule names to rule
//! nodes. Each node is a small tagged object whose `type` discriminant says
//! which combinator it is, with type-specific payload fields alongside it.
//! These types mirror that shape one-to-one so the embedded vvSQL grammar can
//! be deserialized without an intermediate DOM.

use facet::Facet;

/// A single rule node in the grammar's rule graph.
///
/// A `Rule` is either atomic (a literal, a pattern, a symbol reference) or
/// composite (a sequence, a choice, a repetition, a precedence or field
/// wrapper). Composite rules carry their operands in `content` (unary
/// combinators) or `members` (n-ary combinators).
#[derive(Debug, Clone, Facet)]
pub struct Rule {
    /// The discriminant identifying which combinator this rule is.
    #[facet(rename = "type")]
    pub rule_type: RuleType,

    /// Literal or numeric payload, for `STRING`, `PATTERN` and `PREC*` rules.
    #[facet(default)]
    pub value: Option<RuleValue>,

    /// Referenced name, for `SYMBOL`, `FIELD` and `ALIAS` rules.
    #[facet(default)]
    pub name: Option<String>,

    /// Nested operand for unary combinators (`REPEAT`, `TOKEN`, `PREC*`, ...).
    #[facet(default)]
    pub content: Option<Box<Rule>>,

    /// Operands for n-ary combinators (`SEQ`, `CHOICE`).
    #[facet(default)]
    pub members: Vec<Rule>,

    /// Whether an `ALIAS` produces a named node.
    #[facet(default)]
    pub named: Option<bool>,

    /// Generator-specific modifier flags, preserved verbatim.
    #[facet(default)]
    pub flags: Option<String>,

    /// Context label used by reserved-word rules.
    #[facet(default)]
    pub context_name: Option<String>,
}

/// Scalar payload attached to a rule node.
#[derive(Debug, Clone, Facet)]
#[facet(untagged)]
#[repr(u8)]
pub enum RuleValue {
    /// A string payload: literal match text or a pattern source.
    String(String),

    /// An integer payload: a numeric precedence level.
    Integer(i32),
}

/// The combinators recognised in the tree-sitter JSON grammar format.
///
/// Each variant corresponds to one of the `type` strings emitted by
/// `tree-sitter generate`. Together they are the atoms from which every
/// rule in the grammar is composed.
#[derive(Debug, Clone, Facet)]
#[repr(u8)]
pub enum RuleType {
    /// An empty production.
    #[facet(rename = "BLANK")]
    Blank,
    /// A literal string token, e.g. `","`.
    #[facet(rename = "STRING")]
    String,
    /// A regular-expression token, e.g. the vvSQL identifier pattern.
    #[facet(rename = "PATTERN")]
    Pattern,
    /// A reference to another named rule.
    #[facet(rename = "SYMBOL")]
    Symbol,
    /// One of several alternatives.
    #[facet(rename = "CHOICE")]
    Choice,
    /// A sequential composition.
    #[facet(rename = "SEQ")]
    Seq,
    /// Zero-or-more repetition.
    #[facet(rename = "REPEAT")]
    Repeat,
    /// One-or-more repetition.
    #[facet(rename = "REPEAT1")]
    Repeat1,
    /// A precedence wrapper with no associativity.
    #[facet(rename = "PREC")]
    Prec,
    /// A left-associative precedence wrapper.
    #[facet(rename = "PREC_LEFT")]
    PrecLeft,
    /// A right-associative precedence wrapper.
    #[facet(rename = "PREC_RIGHT")]
    PrecRight,
    /// A dynamic (runtime-resolved) precedence wrapper.
    #[facet(rename = "PREC_DYNAMIC")]
    PrecDynamic,
    /// A named field applied to a subrule, e.g. `geom:` on a draw clause.
    #[facet(rename = "FIELD")]
    Field,
    /// An alias giving a node an alternate public name.
    #[facet(rename = "ALIAS")]
    Alias,
    /// A tokenization wrapper: the content lexes as a single token.
    #[facet(rename = "TOKEN")]
    Token,
    /// A token that must follow the previous one with no trivia between.
    #[facet(rename = "IMMEDIATE_TOKEN")]
    ImmediateToken,
    /// A reserved-word placeholder.
    #[facet(rename = "RESERVED")]
    Reserved,
}

impl Rule {
    /// Returns the canonical wire name of this rule's combinator.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self.rule_type {
            RuleType::Blank => "BLANK",
            RuleType::String => "STRING",
            RuleType::Pattern => "PATTERN",
            RuleType::Symbol => "SYMBOL",
            RuleType::Choice => "CHOICE",
            RuleType::Seq => "SEQ",
            RuleType::Repeat => "REPEAT",
            RuleType::Repeat1 => "REPEAT1",
            RuleType::Prec => "PREC",
            RuleType::PrecLeft => "PREC_LEFT",
            RuleType::PrecRight => "PREC_RIGHT",
            RuleType::PrecDynamic => "PREC_DYNAMIC",
            RuleType::Field => "FIELD",
            RuleType::Alias => "ALIAS",
            RuleType::Token => "TOKEN",
            RuleType::ImmediateToken => "IMMEDIATE_TOKEN",
            RuleType::Reserved => "RESERVED",
        }
    }

    /// Returns `true` if this rule lexes directly as a token.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.rule_type,
            RuleType::String | RuleType::Pattern | RuleType::Token | RuleType::ImmediateToken
        )
    }

    /// Returns `true` if this rule is a reference to another rule.
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        matches!(self.rule_type, RuleType::Symbol)
    }

    /// Returns the referenced rule name for `SYMBOL` rules.
    #[must_use]
    pub fn symbol_name(&self) -> Option<&str> {
        if self.is_symbol() {
            self.name.as_deref()
        } else {
            None
        }
    }

    /// Returns the numeric level for precedence wrappers.
    #[must_use]
    pub fn precedence(&self) -> Option<i32> {
        match self.rule_type {
            RuleType::Prec | RuleType::PrecLeft | RuleType::PrecRight | RuleType::PrecDynamic => {
                self.value.as_ref().and_then(|v| match v {
                    RuleValue::Integer(i) => Some(*i),
                    RuleValue::String(_) => None,
                })
            }
            _ => None,
        }
    }

    /// Returns the literal text for `STRING` rules.
    #[must_use]
    pub fn string_value(&self) -> Option<&str> {
        if matches!(self.rule_type, RuleType::String) {
            self.value.as_ref().and_then(RuleValue::as_str)
        } else {
            None
        }
    }

    /// Returns the pattern source for `PATTERN` rules.
    #[must_use]
    pub fn pattern_value(&self) -> Option<&str> {
        if matches!(self.rule_type, RuleType::Pattern) {
            self.value.as_ref().and_then(RuleValue::as_str)
        } else {
            None
        }
    }

    /// Visits this rule and every rule nested beneath it, depth-first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Rule)) {
        visit(self);
        if let Some(content) = &self.content {
            content.walk(visit);
        }
        for member in &self.members {
            member.walk(visit);
        }
    }
}

impl RuleValue {
    /// Returns the string payload, if this value holds one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RuleValue::String(s) => Some(s.as_str()),
            RuleValue::Integer(_) => None,
        }
    }
}
