//! Tests for tag analysis and the analysis session

use std::fs;

use crate::output::ResultOptions;
use crate::tags::analysis::{analyze, decode_tag, PhotoProperties, TagDatum};
use crate::tags::catalog::TagCatalog;
use crate::tags::constants::{tags, type_codes};
use crate::tags::definition::TagDefinition;
use crate::tags::errors::PhotoError;
use crate::tags::types::{RawTag, RawTagValue};

use super::test_utils::{raw_tag, rational_bytes, sample_definitions, sample_raw_tags, short_bytes};

fn sample_catalog() -> TagCatalog {
    TagCatalog::build(sample_definitions())
}

#[test]
fn test_analyze_decodes_known_tags_in_id_order() {
    let result = analyze("IMG_0001.JPG", &sample_raw_tags(), &sample_catalog());

    assert_eq!(result.image, "IMG_0001.JPG");
    let ids: Vec<u32> = result.iter().map(|datum| datum.id).collect();
    assert_eq!(
        ids,
        vec![
            tags::MAKE,
            tags::ORIENTATION,
            tags::EXPOSURE_TIME,
            tags::F_NUMBER,
            tags::EXIF_VERSION,
            tags::EXPOSURE_BIAS_VALUE,
            tags::FLASH,
        ]
    );
}

#[test]
fn test_analyze_values() {
    let result = analyze("IMG_0001.JPG", &sample_raw_tags(), &sample_catalog());

    let value = |id: u32| result.get(id).map(|datum| datum.raw_value.clone());
    assert_eq!(value(tags::MAKE).as_deref(), Some("Canon"));
    assert_eq!(value(tags::EXPOSURE_TIME).as_deref(), Some("1/30"));
    assert_eq!(value(tags::F_NUMBER).as_deref(), Some("2.8"));
    assert_eq!(value(tags::EXIF_VERSION).as_deref(), Some("0230"));
    assert_eq!(value(tags::EXPOSURE_BIAS_VALUE).as_deref(), Some("-1/3"));
    assert_eq!(value(tags::SHUTTER_SPEED_VALUE), None);
}

#[test]
fn test_analyze_pretty_print_values() {
    let result = analyze("IMG_0001.JPG", &sample_raw_tags(), &sample_catalog());

    let orientation = result.get(tags::ORIENTATION).unwrap();
    assert_eq!(orientation.raw_value, "6");
    assert_eq!(orientation.pretty_print_value(), "Right side, top (Rotate 90 CW)");
    assert_eq!(orientation.category(), "TIFF");
    assert_eq!(orientation.name(), "Orientation");

    let flash = result.get(tags::FLASH).unwrap();
    assert_eq!(flash.pretty_print_value(), "Flash fired");

    let exposure = result.get(tags::EXPOSURE_TIME).unwrap();
    assert_eq!(exposure.pretty_print_value(), "1/30");
    assert_eq!(exposure.description(), "Exposure time, measured in seconds.");
}

#[test]
fn test_exposure_time_end_to_end() {
    let catalog = sample_catalog();
    let raw_tags = vec![raw_tag(tags::EXPOSURE_TIME, type_codes::RATIONAL, rational_bytes(&[(1, 50)]))];

    let result = analyze("shot.tif", &raw_tags, &catalog);
    assert_eq!(result.len(), 1);
    assert_eq!(result.data[0].raw_value, "1/50");
    assert_eq!(result.data[0].pretty_print_value(), "1/50");
}

#[test]
fn test_malformed_tag_is_dropped() {
    let raw_tags = vec![
        RawTag::new(tags::ORIENTATION, RawTagValue::with_length(type_codes::SHORT, 10, vec![1, 0])),
        raw_tag(tags::MAKE, type_codes::ASCII, b"Nikon\0".to_vec()),
    ];

    let result = analyze("broken.jpg", &raw_tags, &sample_catalog());
    assert_eq!(result.len(), 1);
    assert!(result.get(tags::ORIENTATION).is_none());
    assert_eq!(result.get(tags::MAKE).unwrap().raw_value, "Nikon");
}

#[test]
fn test_decode_tag_reports_malformed_length() {
    let definition = TagDefinition::new(tags::ORIENTATION, "TIFF", "Orientation");
    let raw = RawTag::new(tags::ORIENTATION, RawTagValue::with_length(type_codes::SHORT, 4, vec![1, 0]));

    match decode_tag(&raw, &definition) {
        Err(PhotoError::MalformedTag { id, declared, available }) => {
            assert_eq!(id, tags::ORIENTATION);
            assert_eq!(declared, 4);
            assert_eq!(available, 2);
        }
        other => panic!("expected MalformedTag, got {:?}", other),
    }
}

#[test]
fn test_unsupported_type_keeps_empty_value() {
    let raw_tags = vec![raw_tag(tags::MAKE, type_codes::DOUBLE, vec![0; 8])];

    let result = analyze("odd.tif", &raw_tags, &sample_catalog());
    assert_eq!(result.len(), 1);
    assert_eq!(result.data[0].raw_value, "");
}

#[test]
fn test_empty_catalog_yields_empty_result() {
    let result = analyze("IMG_0001.JPG", &sample_raw_tags(), &TagCatalog::default());
    assert!(result.is_empty());
}

#[test]
fn test_datum_without_definition() {
    let datum = TagDatum::new(9, None, "raw".to_string());
    assert_eq!(datum.pretty_print_value(), "raw");
    assert_eq!(datum.name(), "");
    assert_eq!(datum.category(), "");
}

#[test]
fn test_session_requires_initialization() {
    let mut properties = PhotoProperties::new();
    assert!(!properties.is_initialized());

    assert!(matches!(
        properties.analyze("IMG_0001.JPG", &sample_raw_tags()),
        Err(PhotoError::NotInitialized)
    ));
    assert!(matches!(properties.catalog(), Err(PhotoError::NotInitialized)));
    assert!(matches!(
        properties.write_xml(Vec::new(), &ResultOptions::default()),
        Err(PhotoError::NotInitialized)
    ));
    assert!(matches!(
        properties.analyze_file("IMG_0001.JPG"),
        Err(PhotoError::NotInitialized)
    ));
}

#[test]
fn test_session_analysis() {
    let mut properties = PhotoProperties::new();
    properties.initialize_with(sample_catalog());
    assert!(properties.is_initialized());
    assert!(properties.result().is_none());

    let count = properties.analyze("IMG_0001.JPG", &sample_raw_tags()).unwrap().len();
    assert_eq!(count, 7);
    assert_eq!(properties.tag_datum(tags::MAKE).unwrap().raw_value, "Canon");

    // A second analysis replaces the first
    let raw_tags = vec![raw_tag(tags::ORIENTATION, type_codes::SHORT, short_bytes(&[3]))];
    properties.analyze("IMG_0002.JPG", &raw_tags).unwrap();
    let result = properties.result().unwrap();
    assert_eq!(result.image, "IMG_0002.JPG");
    assert_eq!(result.len(), 1);
    assert!(properties.tag_datum(tags::MAKE).is_none());
    assert_eq!(properties.tag_datum(tags::ORIENTATION).unwrap().pretty_print_value(), "Reserved");
}

#[test]
fn test_session_write_xml() {
    let mut properties = PhotoProperties::new();
    properties.initialize_with(sample_catalog());

    let mut empty = Vec::new();
    properties.write_xml(&mut empty, &ResultOptions::default()).unwrap();
    let empty = String::from_utf8(empty).unwrap();
    assert!(empty.contains("<tagData>"));
    assert!(!empty.contains("<tagDatum"));

    let mut buffer = Vec::new();
    properties.analyze("IMG_0001.JPG", &sample_raw_tags()).unwrap();
    properties.write_xml(&mut buffer, &ResultOptions::default()).unwrap();

    let xml = String::from_utf8(buffer).unwrap();
    assert!(xml.contains("<imageFile>IMG_0001.JPG</imageFile>"));
    assert!(xml.contains("<tagDatum id=\"33434\" category=\"EXIF\">"));
    assert!(xml.contains("<value>1/30</value>"));
    assert!(xml.contains("<prettyPrintValue>Flash fired</prettyPrintValue>"));
}

#[test]
fn test_initialize_with_builtin_catalog() {
    let mut properties = PhotoProperties::new();
    let diagnostics = properties.initialize(None).unwrap();
    assert!(diagnostics.is_empty());
    assert!(properties.catalog().unwrap().contains(tags::FLASH));

    let mut strict = PhotoProperties::new();
    strict.initialize_strict(None).unwrap();
    assert!(strict.is_initialized());
}

#[test]
fn test_initialize_strict_rejects_diagnostics() {
    let path = std::env::temp_dir().join("phototags_strict_test.toml");
    fs::write(&path, "[[tag]]\nid = 1\nname = \"Bad\"\nformat = \"ROT13\"\n").unwrap();

    let mut lenient = PhotoProperties::new();
    let diagnostics = lenient.initialize(Some(path.as_path())).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert!(lenient.is_initialized());

    let mut strict = PhotoProperties::new();
    assert!(matches!(
        strict.initialize_strict(Some(path.as_path())),
        Err(PhotoError::CatalogLoad { .. })
    ));
    assert!(!strict.is_initialized());

    fs::remove_file(&path).ok();
}
