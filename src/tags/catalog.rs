//! Tag catalog and its TOML loader
//!
//! The catalog is an id-keyed map of tag definitions, built once and
//! read-only afterwards. Definitions come from a TOML document; entries
//! that are malformed produce diagnostics instead of aborting the load,
//! and only an unreadable or unparsable document is a hard failure.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use log::{debug, info, warn};
use toml::{Table, Value};

use crate::tags::definition::TagDefinition;
use crate::tags::errors::{PhotoError, PhotoResult};
use crate::tags::pretty_print::{KeyKind, PrettyPrintRule};
use crate::tags::types::FormatInstruction;

// Catalog shipped with the crate
const BUILTIN_CATALOG_TOML: &str = include_str!("../../photo_tags.toml");

const TOP_LEVEL_KEYS: &[&str] = &["category", "tag"];
const TAG_KEYS: &[&str] = &["id", "category", "name", "description", "format", "rules"];
const RULE_KEYS: &[&str] = &["key", "key_type", "label", "from", "to", "default"];

lazy_static! {
    // Parse the embedded catalog on first use
    static ref BUILTIN_CATALOG: CatalogLoad = {
        CatalogLoader::from_str(BUILTIN_CATALOG_TOML).unwrap_or_else(|e| {
            warn!("Failed to parse built-in tag catalog: {}", e);
            CatalogLoad::default()
        })
    };
}

/// Immutable id-keyed collection of tag definitions
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    definitions: HashMap<u32, Arc<TagDefinition>>,
}

impl TagCatalog {
    /// Builds a catalog; a later definition with the same id replaces an earlier one
    pub fn build<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = TagDefinition>,
    {
        let mut map = HashMap::new();
        for definition in definitions {
            if let Some(previous) = map.insert(definition.id, Arc::new(definition)) {
                debug!("Tag {} ({}) redefined, keeping the later definition", previous.id, previous.name);
            }
        }

        TagCatalog { definitions: map }
    }

    /// Looks up a definition by tag id
    pub fn get(&self, id: u32) -> Option<&Arc<TagDefinition>> {
        self.definitions.get(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.definitions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All definitions in ascending id order
    pub fn sorted(&self) -> Vec<&Arc<TagDefinition>> {
        let mut all: Vec<_> = self.definitions.values().collect();
        all.sort_by_key(|definition| definition.id);
        all
    }
}

/// A built catalog plus the diagnostics collected while reading it
#[derive(Debug, Clone, Default)]
pub struct CatalogLoad {
    pub catalog: TagCatalog,
    pub diagnostics: Vec<String>,
}

impl CatalogLoad {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Converts any diagnostic into an aggregate load failure
    pub fn into_strict(self) -> PhotoResult<TagCatalog> {
        if self.diagnostics.is_empty() {
            Ok(self.catalog)
        } else {
            Err(PhotoError::CatalogLoad {
                message: "Errors were found while loading the tag catalog.".to_string(),
                diagnostics: self.diagnostics,
            })
        }
    }
}

/// Reads tag catalogs from TOML
pub struct CatalogLoader;

impl CatalogLoader {
    /// Returns the catalog embedded in the crate
    pub fn builtin() -> CatalogLoad {
        BUILTIN_CATALOG.clone()
    }

    /// Loads a catalog from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> PhotoResult<CatalogLoad> {
        let path = path.as_ref();
        info!("Loading tag catalog: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| PhotoError::CatalogLoad {
            message: format!("Unable to read tag catalog {}", path.display()),
            diagnostics: vec![e.to_string()],
        })?;

        Self::from_str(&content)
    }

    /// Parses a catalog from TOML text
    pub fn from_str(content: &str) -> PhotoResult<CatalogLoad> {
        let document: Table = content.parse().map_err(|e: toml::de::Error| PhotoError::CatalogLoad {
            message: "Tag catalog is not valid TOML".to_string(),
            diagnostics: vec![e.to_string()],
        })?;

        let mut diagnostics = Vec::new();
        let definitions = parse_document(&document, &mut diagnostics);
        let catalog = TagCatalog::build(definitions);

        for diagnostic in &diagnostics {
            warn!("Catalog: {}", diagnostic);
        }
        debug!("Loaded {} tag definitions ({} diagnostics)", catalog.len(), diagnostics.len());

        Ok(CatalogLoad { catalog, diagnostics })
    }
}

fn parse_document(document: &Table, diagnostics: &mut Vec<String>) -> Vec<TagDefinition> {
    for key in document.keys() {
        if !TOP_LEVEL_KEYS.contains(&key.as_str()) {
            diagnostics.push(format!("Unknown top-level key: {}", key));
        }
    }

    let default_category = match document.get("category") {
        Some(Value::String(category)) => category.clone(),
        Some(other) => {
            diagnostics.push(format!("Top-level 'category' must be a string, found {}", other.type_str()));
            String::new()
        }
        None => String::new(),
    };

    let entries = match document.get("tag") {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            diagnostics.push(format!("'tag' must be an array of tables, found {}", other.type_str()));
            return Vec::new();
        }
        None => return Vec::new(),
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry.as_table() {
            Some(table) => parse_tag(index, table, &default_category, diagnostics),
            None => {
                diagnostics.push(format!("tag[{}]: expected a table, found {}", index, entry.type_str()));
                None
            }
        })
        .collect()
}

fn parse_tag(
    index: usize,
    table: &Table,
    default_category: &str,
    diagnostics: &mut Vec<String>,
) -> Option<TagDefinition> {
    let id = match table.get("id") {
        Some(Value::Integer(id)) if *id >= 0 && *id <= u32::MAX as i64 => *id as u32,
        Some(other) => {
            diagnostics.push(format!("tag[{}]: invalid 'id' {}", index, other));
            return None;
        }
        None => {
            diagnostics.push(format!("tag[{}]: missing 'id'", index));
            return None;
        }
    };
    let context = format!("tag[{}] (id {})", index, id);

    for key in table.keys() {
        if !TAG_KEYS.contains(&key.as_str()) {
            diagnostics.push(format!("{}: unknown field '{}'", context, key));
        }
    }

    let category = string_field(table, "category", &context, diagnostics)
        .unwrap_or_else(|| default_category.to_string());
    let name = string_field(table, "name", &context, diagnostics).unwrap_or_default();
    let description = string_field(table, "description", &context, diagnostics).unwrap_or_default();

    let format_instruction = match string_field(table, "format", &context, diagnostics) {
        Some(text) => FormatInstruction::parse(&text).unwrap_or_else(|| {
            diagnostics.push(format!("{}: unknown format instruction '{}'", context, text));
            FormatInstruction::None
        }),
        None => FormatInstruction::None,
    };

    let rules = match table.get("rules") {
        Some(Value::Array(rules)) => rules
            .iter()
            .enumerate()
            .filter_map(|(rule_index, rule)| {
                let rule_context = format!("{} rule {}", context, rule_index);
                parse_rule(rule, &rule_context, diagnostics)
            })
            .collect(),
        Some(other) => {
            diagnostics.push(format!("{}: 'rules' must be an array, found {}", context, other.type_str()));
            Vec::new()
        }
        None => Vec::new(),
    };

    Some(TagDefinition {
        id,
        category,
        name,
        description,
        format_instruction,
        rules,
    })
}

fn parse_rule(value: &Value, context: &str, diagnostics: &mut Vec<String>) -> Option<PrettyPrintRule> {
    let table = match value.as_table() {
        Some(table) => table,
        None => {
            diagnostics.push(format!("{}: expected a table, found {}", context, value.type_str()));
            return None;
        }
    };

    for key in table.keys() {
        if !RULE_KEYS.contains(&key.as_str()) {
            diagnostics.push(format!("{}: unknown field '{}'", context, key));
        }
    }

    if table.contains_key("default") {
        return string_field(table, "default", context, diagnostics)
            .map(|label| PrettyPrintRule::DefaultLabel { label });
    }

    let label = match string_field(table, "label", context, diagnostics) {
        Some(label) => label,
        None => {
            diagnostics.push(format!("{}: missing 'label'", context));
            return None;
        }
    };

    if let Some(key) = table.get("key") {
        let key = match key {
            Value::String(text) => text.clone(),
            Value::Integer(number) => number.to_string(),
            other => {
                diagnostics.push(format!("{}: 'key' must be a string or integer, found {}", context, other.type_str()));
                return None;
            }
        };

        let key_kind = match string_field(table, "key_type", context, diagnostics) {
            Some(text) => match KeyKind::parse(&text) {
                Some(kind) => kind,
                None => {
                    diagnostics.push(format!("{}: unknown key_type '{}'", context, text));
                    return None;
                }
            },
            None => KeyKind::Integer,
        };

        return Some(PrettyPrintRule::ExactMatch { key, key_kind, label });
    }

    match (table.get("from"), table.get("to")) {
        (Some(Value::Integer(from)), Some(Value::Integer(to))) => Some(PrettyPrintRule::RangeMatch {
            from: *from,
            to: *to,
            label,
        }),
        (None, None) => {
            diagnostics.push(format!("{}: rule needs 'key', 'from'/'to' or 'default'", context));
            None
        }
        _ => {
            diagnostics.push(format!("{}: range rule needs integer 'from' and 'to'", context));
            None
        }
    }
}

/// Reads an optional string field, reporting a type mismatch
fn string_field(table: &Table, key: &str, context: &str, diagnostics: &mut Vec<String>) -> Option<String> {
    match table.get(key) {
        Some(Value::String(text)) => Some(text.clone()),
        Some(other) => {
            diagnostics.push(format!("{}: '{}' must be a string, found {}", context, key, other.type_str()));
            None
        }
        None => None,
    }
}
