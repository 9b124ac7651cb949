//! Tag value decoding
//!
//! Turns the raw little-endian payload of a tag into display text
//! according to its binary type code and the tag's format instruction.
//! Decoding never fails: short buffers stop at the last complete
//! element and unknown type codes produce an empty string.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use byteorder::{ByteOrder, LittleEndian};
use log::trace;

use crate::tags::constants::widths;
use crate::tags::rational;
use crate::tags::types::{BinaryTypeCode, FormatInstruction, RawTagValue};
use crate::utils::string_utils;

/// Most fractional digits shown for a decimal rational
const MAX_FRACTION_DIGITS: usize = 5;

/// Decodes a raw tag value to its display text
pub fn decode(raw: &RawTagValue, instruction: FormatInstruction) -> String {
    decode_bytes(raw.type_code, raw.payload(), instruction)
}

/// Decodes `bytes` laid out as `type_code`
pub fn decode_bytes(type_code: u16, bytes: &[u8], instruction: FormatInstruction) -> String {
    let binary_type = match BinaryTypeCode::from_code(type_code) {
        Some(t) => t,
        None => {
            trace!("Unsupported type code {}, decoding to empty string", type_code);
            return String::new();
        }
    };

    if instruction != FormatInstruction::None && !instruction.applies_to(binary_type) {
        trace!("Ignoring {} instruction for {} value", instruction, binary_type.name());
    }

    match binary_type {
        BinaryTypeCode::Byte => {
            if instruction == FormatInstruction::Base64 {
                BASE64_STANDARD.encode(bytes)
            } else {
                hex_pairs(bytes)
            }
        }
        BinaryTypeCode::Ascii => {
            // The final byte is the NUL terminator
            let text_len = bytes.len().saturating_sub(1);
            string_utils::ascii_text(&bytes[..text_len])
        }
        BinaryTypeCode::Short => join_elements(bytes, widths::SHORT, |chunk| {
            LittleEndian::read_u16(chunk).to_string()
        }),
        BinaryTypeCode::Long => join_elements(bytes, widths::LONG, |chunk| {
            LittleEndian::read_u32(chunk).to_string()
        }),
        BinaryTypeCode::SLong => join_elements(bytes, widths::LONG, |chunk| {
            LittleEndian::read_i32(chunk).to_string()
        }),
        BinaryTypeCode::Rational => join_elements(bytes, widths::RATIONAL, |chunk| {
            let numer = LittleEndian::read_u32(&chunk[..4]);
            let denom = LittleEndian::read_u32(&chunk[4..]);
            if instruction == FormatInstruction::Fraction {
                rational::reduce_unsigned(numer, denom)
            } else {
                format_quotient(numer as f64, denom as f64)
            }
        }),
        BinaryTypeCode::SRational => join_elements(bytes, widths::RATIONAL, |chunk| {
            let numer = LittleEndian::read_i32(&chunk[..4]);
            let denom = LittleEndian::read_i32(&chunk[4..]);
            if instruction == FormatInstruction::Fraction {
                rational::reduce_signed(numer, denom)
            } else {
                format_quotient(numer as f64, denom as f64)
            }
        }),
        BinaryTypeCode::Undefined => {
            if instruction == FormatInstruction::AllCharacters {
                string_utils::ascii_text(bytes)
            } else {
                hex_pairs(bytes)
            }
        }
    }
}

/// Formats `value` with one mandatory and up to four optional fractional digits
///
/// Rounds half away from zero to five places, then strips trailing zeros
/// beyond the first fractional digit. Negative zero prints as `0.0`.
pub fn format_decimal(value: f64) -> String {
    let scale = 10f64.powi(MAX_FRACTION_DIGITS as i32);
    let rounded = (value * scale).round() / scale;
    let mut text = format!("{:.*}", MAX_FRACTION_DIGITS, rounded);

    while text.ends_with('0') && !text.ends_with(".0") {
        text.pop();
    }

    if text == "-0.0" {
        text.remove(0);
    }

    text
}

fn format_quotient(numer: f64, denom: f64) -> String {
    let value = if denom == 0.0 { 0.0 } else { numer / denom };
    format_decimal(value)
}

/// Uppercase hex pairs joined by `-`
fn hex_pairs(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join("-")
}

/// Renders each complete `width`-byte element and joins them with spaces
fn join_elements<F>(bytes: &[u8], width: usize, render: F) -> String
where
    F: Fn(&[u8]) -> String,
{
    let chunks = bytes.chunks_exact(width);
    if !chunks.remainder().is_empty() {
        trace!("Dropping {} trailing bytes of a {}-byte element", chunks.remainder().len(), width);
    }

    chunks.map(render).collect::<Vec<_>>().join(" ")
}
