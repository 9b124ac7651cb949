//! Tag analysis
//!
//! Joins the raw tags of one image with the catalog, decodes each known
//! tag and collects the results in ascending id order. `PhotoProperties`
//! wraps this in a session that owns the catalog and the latest result.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Local};
use log::{debug, info, trace};

use crate::output::{self, ResultOptions};
use crate::source;
use crate::tags::catalog::{CatalogLoader, TagCatalog};
use crate::tags::decoder;
use crate::tags::definition::TagDefinition;
use crate::tags::errors::{PhotoError, PhotoResult};
use crate::tags::types::RawTag;

/// Decoded value of one tag in an analyzed image
#[derive(Debug, Clone)]
pub struct TagDatum {
    /// Tag id
    pub id: u32,
    /// Catalog definition the value was decoded with
    pub definition: Option<Arc<TagDefinition>>,
    /// Decoded raw value
    pub raw_value: String,
}

impl TagDatum {
    pub fn new(id: u32, definition: Option<Arc<TagDefinition>>, raw_value: String) -> Self {
        TagDatum {
            id,
            definition,
            raw_value,
        }
    }

    pub fn category(&self) -> &str {
        self.definition.as_ref().map_or("", |d| d.category.as_str())
    }

    pub fn name(&self) -> &str {
        self.definition.as_ref().map_or("", |d| d.name.as_str())
    }

    pub fn description(&self) -> &str {
        self.definition.as_ref().map_or("", |d| d.description.as_str())
    }

    /// Label resolved from the definition's rules, computed on each call
    pub fn pretty_print_value(&self) -> String {
        match &self.definition {
            Some(definition) => definition.pretty_print(&self.raw_value),
            None => self.raw_value.clone(),
        }
    }
}

/// Tags of one analyzed image, sorted by id
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Identifier of the analyzed image (usually its path)
    pub image: String,
    /// When the analysis ran
    pub created: DateTime<Local>,
    /// Decoded tags in ascending id order
    pub data: Vec<TagDatum>,
}

impl AnalysisResult {
    /// A result with no tags, stamped now
    pub fn empty(image: &str) -> Self {
        AnalysisResult {
            image: image.to_string(),
            created: Local::now(),
            data: Vec::new(),
        }
    }

    /// Looks up the datum for a tag id
    pub fn get(&self, id: u32) -> Option<&TagDatum> {
        self.data
            .binary_search_by_key(&id, |datum| datum.id)
            .ok()
            .map(|index| &self.data[index])
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TagDatum> {
        self.data.iter()
    }
}

/// Decodes the tags of one image against a catalog
///
/// Tags without a definition are skipped; tags whose decode step fails
/// are dropped. Neither stops the analysis.
pub fn analyze(image: &str, raw_tags: &[RawTag], catalog: &TagCatalog) -> AnalysisResult {
    let mut data = Vec::with_capacity(raw_tags.len());

    for raw_tag in raw_tags {
        let definition = match catalog.get(raw_tag.id) {
            Some(definition) => definition,
            None => {
                trace!("Tag {} not in catalog, skipping", raw_tag.id);
                continue;
            }
        };

        match decode_tag(raw_tag, definition) {
            Ok(raw_value) => {
                trace!("Tag {} ({}) = {}", raw_tag.id, definition.name, raw_value);
                data.push(TagDatum::new(raw_tag.id, Some(Arc::clone(definition)), raw_value));
            }
            Err(e) => debug!("Dropping tag {} ({}): {}", raw_tag.id, definition.name, e),
        }
    }

    data.sort_by_key(|datum| datum.id);

    AnalysisResult {
        image: image.to_string(),
        created: Local::now(),
        data,
    }
}

/// Decodes one tag, failing when its declared length overruns its buffer
pub fn decode_tag(raw_tag: &RawTag, definition: &TagDefinition) -> PhotoResult<String> {
    let value = &raw_tag.value;
    if !value.is_consistent() {
        return Err(PhotoError::MalformedTag {
            id: raw_tag.id,
            declared: value.byte_length,
            available: value.bytes.len(),
        });
    }

    Ok(decoder::decode(value, definition.format_instruction))
}

/// Analysis session holding a catalog and the most recent result
#[derive(Debug, Default)]
pub struct PhotoProperties {
    catalog: Option<Arc<TagCatalog>>,
    result: Option<AnalysisResult>,
}

impl PhotoProperties {
    pub fn new() -> Self {
        PhotoProperties::default()
    }

    /// Loads the catalog from `path`, or the built-in catalog when `None`
    ///
    /// Returns the diagnostics collected while reading the catalog.
    pub fn initialize(&mut self, path: Option<&Path>) -> PhotoResult<Vec<String>> {
        let load = match path {
            Some(path) => CatalogLoader::from_file(path)?,
            None => CatalogLoader::builtin(),
        };

        info!("Tag catalog ready with {} definitions", load.catalog.len());
        self.initialize_with(load.catalog);
        Ok(load.diagnostics)
    }

    /// Like `initialize`, but any diagnostic fails the load
    pub fn initialize_strict(&mut self, path: Option<&Path>) -> PhotoResult<()> {
        let load = match path {
            Some(path) => CatalogLoader::from_file(path)?,
            None => CatalogLoader::builtin(),
        };

        let catalog = load.into_strict()?;
        self.initialize_with(catalog);
        Ok(())
    }

    /// Uses an already built catalog
    pub fn initialize_with(&mut self, catalog: TagCatalog) {
        self.catalog = Some(Arc::new(catalog));
        self.result = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn catalog(&self) -> PhotoResult<&TagCatalog> {
        self.catalog.as_deref().ok_or(PhotoError::NotInitialized)
    }

    /// Analyzes a set of raw tags, replacing the previous result
    pub fn analyze(&mut self, image: &str, raw_tags: &[RawTag]) -> PhotoResult<&AnalysisResult> {
        let catalog = self.catalog.as_ref().ok_or(PhotoError::NotInitialized)?;

        let result = analyze(image, raw_tags, catalog);
        info!("Analyzed {}: {} of {} tags recognized", image, result.len(), raw_tags.len());

        Ok(self.result.insert(result))
    }

    /// Reads the tags of an image file and analyzes them
    pub fn analyze_file<P: AsRef<Path>>(&mut self, path: P) -> PhotoResult<&AnalysisResult> {
        if !self.is_initialized() {
            return Err(PhotoError::NotInitialized);
        }

        let path = path.as_ref();
        let raw_tags = source::read_file(path)?;
        self.analyze(&path.display().to_string(), &raw_tags)
    }

    /// The result of the most recent analysis
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// The datum for one tag id in the most recent analysis
    pub fn tag_datum(&self, id: u32) -> Option<&TagDatum> {
        self.result.as_ref().and_then(|result| result.get(id))
    }

    /// Writes the most recent analysis as an XML document
    ///
    /// Before any analysis the document has an empty `tagData` element.
    pub fn write_xml<W: Write>(
        &self,
        writer: W,
        options: &ResultOptions,
    ) -> PhotoResult<()> {
        if !self.is_initialized() {
            return Err(PhotoError::NotInitialized);
        }

        match &self.result {
            Some(result) => output::write_xml(writer, result, options),
            // Nothing analyzed yet: an empty document
            None => output::write_xml(writer, &AnalysisResult::empty(""), options),
        }
    }
}
