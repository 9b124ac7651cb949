//! Tag definitions
//!
//! Textual and formatting data for one tag id, as read from the catalog.

use std::fmt;

use crate::tags::pretty_print::{self, PrettyPrintRule};
use crate::tags::types::FormatInstruction;

/// Catalog entry describing one tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    /// Tag id (unique key in the catalog)
    pub id: u32,
    /// Category such as "EXIF" or "GPS"
    pub category: String,
    /// Short tag name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Decoding directive
    pub format_instruction: FormatInstruction,
    /// Ordered pretty-print rules
    pub rules: Vec<PrettyPrintRule>,
}

impl TagDefinition {
    /// Creates a definition with no description, instruction or rules
    pub fn new(id: u32, category: &str, name: &str) -> Self {
        TagDefinition {
            id,
            category: category.to_string(),
            name: name.to_string(),
            description: String::new(),
            format_instruction: FormatInstruction::None,
            rules: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_format(mut self, instruction: FormatInstruction) -> Self {
        self.format_instruction = instruction;
        self
    }

    pub fn with_rules(mut self, rules: Vec<PrettyPrintRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Pretty-print value for a decoded raw value
    pub fn pretty_print(&self, raw_value: &str) -> String {
        pretty_print::resolve(raw_value, &self.rules)
    }
}

impl fmt::Display for TagDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.id, self.name, self.category)?;
        if self.format_instruction != FormatInstruction::None {
            write!(f, " format={}", self.format_instruction)?;
        }
        if !self.rules.is_empty() {
            write!(f, " rules={}", self.rules.len())?;
        }
        Ok(())
    }
}
