//! XML result writer
//!
//! Serializes an analysis result as a `photoTagProperties` document:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <photoTagProperties>
//!   <imageFile>IMG_0001.JPG</imageFile>
//!   <created>2024-01-06T23:35:48.593750-05:00</created>
//!   <createdLocal>1/6/2024 11:35:48 PM</createdLocal>
//!   <tagData>
//!     <tagDatum id="33434" category="EXIF">
//!       <name>ExposureTime</name>
//!       <description>Exposure time, measured in seconds.</description>
//!       <value>1/50</value>
//!     </tagDatum>
//!   </tagData>
//! </photoTagProperties>
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::SecondsFormat;
use log::{debug, info};
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::tags::analysis::{AnalysisResult, TagDatum};
use crate::tags::errors::{PhotoError, PhotoResult};
use crate::utils::string_utils;

const INDENT_SIZE: usize = 2;

/// Options affecting the XML document
#[derive(Debug, Clone)]
pub struct ResultOptions {
    /// Namespace declared on the root element
    pub xml_namespace: Option<String>,
    /// Stylesheet referenced by an `xml-stylesheet` instruction
    pub xslt_href: Option<String>,
    /// Whether to emit the stylesheet instruction at all
    pub include_xslt: bool,
}

impl Default for ResultOptions {
    fn default() -> Self {
        ResultOptions {
            xml_namespace: None,
            xslt_href: None,
            include_xslt: true,
        }
    }
}

/// Writes `result` to the file at `path`
pub fn write_xml_file<P: AsRef<Path>>(path: P, result: &AnalysisResult, options: &ResultOptions) -> PhotoResult<()> {
    let path = path.as_ref();
    info!("Writing XML analysis to: {}", path.display());

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_xml(&mut writer, result, options)?;
    writer.flush()?;
    Ok(())
}

/// Writes `result` as an XML document to `inner`
pub fn write_xml<W: Write>(inner: W, result: &AnalysisResult, options: &ResultOptions) -> PhotoResult<()> {
    let mut writer = Writer::new_with_indent(inner, b' ', INDENT_SIZE);

    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    if options.include_xslt {
        if let Some(href) = &options.xslt_href {
            let instruction = format!("xml-stylesheet type='text/xsl' href='{}'", href);
            emit(&mut writer, Event::PI(BytesPI::new(instruction.as_str())))?;
        }
    }

    let mut root = BytesStart::new("photoTagProperties");
    if let Some(namespace) = &options.xml_namespace {
        root.push_attribute(("xmlns", namespace.as_str()));
    }
    emit(&mut writer, Event::Start(root))?;

    write_text_element(&mut writer, "imageFile", &result.image)?;
    write_text_element(
        &mut writer,
        "created",
        &result.created.to_rfc3339_opts(SecondsFormat::AutoSi, false),
    )?;
    write_text_element(
        &mut writer,
        "createdLocal",
        &result.created.format("%-m/%-d/%Y %-I:%M:%S %p").to_string(),
    )?;

    emit(&mut writer, Event::Start(BytesStart::new("tagData")))?;
    for datum in result.iter() {
        write_datum(&mut writer, datum)?;
    }
    emit(&mut writer, Event::End(BytesEnd::new("tagData")))?;

    emit(&mut writer, Event::End(BytesEnd::new("photoTagProperties")))?;

    debug!("Wrote {} tag data elements", result.len());
    Ok(())
}

fn write_datum<W: Write>(writer: &mut Writer<W>, datum: &TagDatum) -> PhotoResult<()> {
    let id = datum.id.to_string();
    let mut start = BytesStart::new("tagDatum");
    start.push_attribute(("id", id.as_str()));
    start.push_attribute(("category", datum.category()));
    emit(writer, Event::Start(start))?;

    write_text_element(writer, "name", datum.name())?;
    write_text_element(writer, "description", datum.description())?;
    write_text_element(writer, "value", &datum.raw_value)?;

    let pretty = datum.pretty_print_value();
    if pretty != datum.raw_value {
        write_text_element(writer, "prettyPrintValue", &pretty)?;
    }

    emit(writer, Event::End(BytesEnd::new("tagDatum")))
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> PhotoResult<()> {
    let text = string_utils::xml_safe(text);
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(&text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> PhotoResult<()> {
    writer
        .write_event(event)
        .map_err(|e| PhotoError::Output(e.to_string()))
}
