//! Pretty-print rule resolution
//!
//! A tag definition carries an ordered list of rules mapping decoded raw
//! values to human-readable labels. Resolution scans the list once:
//! the first exact or range match wins and ends the scan, a default
//! label is remembered but does not end it, and the raw value is
//! returned unchanged when nothing applies.

use std::fmt;

/// How an exact-match key is compared with the raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyKind {
    #[default]
    Integer,
    Character,
    String,
}

impl KeyKind {
    /// Parses the catalog spelling of a key kind
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => Some(KeyKind::Integer),
            "char" | "character" => Some(KeyKind::Character),
            "string" | "str" => Some(KeyKind::String),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeyKind::Integer => "int",
            KeyKind::Character => "char",
            KeyKind::String => "string",
        }
    }
}

/// One pretty-print rule of a tag definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrettyPrintRule {
    /// Label for a single key
    ExactMatch {
        key: String,
        key_kind: KeyKind,
        label: String,
    },
    /// Label for an inclusive integer range
    RangeMatch { from: i64, to: i64, label: String },
    /// Label used when no other rule matches
    DefaultLabel { label: String },
}

impl PrettyPrintRule {
    pub fn exact(key: &str, key_kind: KeyKind, label: &str) -> Self {
        PrettyPrintRule::ExactMatch {
            key: key.to_string(),
            key_kind,
            label: label.to_string(),
        }
    }

    pub fn range(from: i64, to: i64, label: &str) -> Self {
        PrettyPrintRule::RangeMatch {
            from,
            to,
            label: label.to_string(),
        }
    }

    pub fn default_label(label: &str) -> Self {
        PrettyPrintRule::DefaultLabel {
            label: label.to_string(),
        }
    }

    /// The label this rule produces
    pub fn label(&self) -> &str {
        match self {
            PrettyPrintRule::ExactMatch { label, .. }
            | PrettyPrintRule::RangeMatch { label, .. }
            | PrettyPrintRule::DefaultLabel { label } => label,
        }
    }

    /// Returns the label if this exact or range rule matches `raw_value`
    ///
    /// Default rules never match here; the resolver handles them.
    pub fn matches(&self, raw_value: &str) -> Option<&str> {
        match self {
            PrettyPrintRule::ExactMatch { key, key_kind, label } => {
                if key_matches(key, *key_kind, raw_value) {
                    Some(label)
                } else {
                    None
                }
            }
            PrettyPrintRule::RangeMatch { from, to, label } => match parse_integer(raw_value) {
                Some(value) if *from <= value && value <= *to => Some(label),
                _ => None,
            },
            PrettyPrintRule::DefaultLabel { .. } => None,
        }
    }
}

impl fmt::Display for PrettyPrintRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrettyPrintRule::ExactMatch { key, key_kind, label } => {
                write!(f, "{} ({}) => {}", key, key_kind.name(), label)
            }
            PrettyPrintRule::RangeMatch { from, to, label } => {
                write!(f, "{}..={} => {}", from, to, label)
            }
            PrettyPrintRule::DefaultLabel { label } => write!(f, "otherwise => {}", label),
        }
    }
}

/// Resolves the human-readable label for `raw_value`
pub fn resolve(raw_value: &str, rules: &[PrettyPrintRule]) -> String {
    let mut fallback: Option<&str> = None;

    for rule in rules {
        if let PrettyPrintRule::DefaultLabel { .. } = rule {
            fallback = Some(rule.label());
            continue;
        }

        if let Some(label) = rule.matches(raw_value) {
            return label.to_string();
        }
    }

    fallback.unwrap_or(raw_value).to_string()
}

fn key_matches(key: &str, key_kind: KeyKind, raw_value: &str) -> bool {
    match key_kind {
        KeyKind::Integer => match (parse_integer(key), parse_integer(raw_value)) {
            (Some(k), Some(v)) => k == v,
            _ => false,
        },
        KeyKind::Character => match (parse_char(key), parse_char(raw_value)) {
            (Some(k), Some(v)) => k == v,
            _ => false,
        },
        KeyKind::String => key == raw_value,
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

/// A string holding exactly one character
fn parse_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
