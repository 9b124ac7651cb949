//! String utility functions
//!
//! Utilities for turning tag bytes into text.

/// Replacement for bytes outside the 7-bit range
const NON_ASCII_REPLACEMENT: char = '?';

/// Decodes bytes as 7-bit ASCII text
///
/// Bytes above 0x7F become `?`. NUL bytes are kept.
pub fn ascii_text(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { NON_ASCII_REPLACEMENT })
        .collect()
}

/// Drops characters that may not appear in an XML document
pub fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|&c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_text_replaces_high_bytes() {
        assert_eq!(ascii_text(b"Nikon"), "Nikon");
        assert_eq!(ascii_text(&[0x41, 0xE9, 0x42]), "A?B");
        assert_eq!(ascii_text(&[]), "");
    }

    #[test]
    fn test_xml_safe_strips_nul() {
        assert_eq!(xml_safe("ASCII\0\0\0Hello"), "ASCIIHello");
        assert_eq!(xml_safe("line\nbreak"), "line\nbreak");
    }
}
