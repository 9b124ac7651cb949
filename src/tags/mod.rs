//! Tag decoding and pretty-print engine
//!
//! This module turns raw, typed tag values into display text and resolves
//! them into human-readable labels using a catalog of tag definitions.

pub mod errors;
pub mod constants;
pub mod types;
pub mod rational;
pub mod decoder;
pub mod pretty_print;
pub mod definition;
pub mod catalog;
pub mod analysis;
mod tests;

pub use errors::{PhotoError, PhotoResult};
pub use types::{BinaryTypeCode, FormatInstruction, RawTag, RawTagValue};
pub use pretty_print::{KeyKind, PrettyPrintRule};
pub use definition::TagDefinition;
pub use catalog::{CatalogLoad, CatalogLoader, TagCatalog};
pub use analysis::{analyze, AnalysisResult, PhotoProperties, TagDatum};
