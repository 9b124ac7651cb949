pub mod io;
pub mod tags;
pub mod source;
pub mod output;
pub mod utils;
pub mod commands;

pub use tags::{
    analyze, AnalysisResult, CatalogLoad, CatalogLoader, FormatInstruction, PhotoError,
    PhotoProperties, PhotoResult, PrettyPrintRule, RawTag, RawTagValue, TagCatalog, TagDatum,
    TagDefinition,
};
pub use output::ResultOptions;
