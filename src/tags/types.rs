//! Core tag data structures

use std::fmt;

use crate::tags::constants::type_codes;

/// Binary layouts the decoder understands
///
/// Any other code found in a directory entry is carried through as a raw
/// number and decodes to an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryTypeCode {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    Undefined,
    SLong,
    SRational,
}

impl BinaryTypeCode {
    /// Maps a numeric type code to a supported layout
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            type_codes::BYTE => Some(BinaryTypeCode::Byte),
            type_codes::ASCII => Some(BinaryTypeCode::Ascii),
            type_codes::SHORT => Some(BinaryTypeCode::Short),
            type_codes::LONG => Some(BinaryTypeCode::Long),
            type_codes::RATIONAL => Some(BinaryTypeCode::Rational),
            type_codes::UNDEFINED => Some(BinaryTypeCode::Undefined),
            type_codes::SLONG => Some(BinaryTypeCode::SLong),
            type_codes::SRATIONAL => Some(BinaryTypeCode::SRational),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BinaryTypeCode::Byte => "BYTE",
            BinaryTypeCode::Ascii => "ASCII",
            BinaryTypeCode::Short => "SHORT",
            BinaryTypeCode::Long => "LONG",
            BinaryTypeCode::Rational => "RATIONAL",
            BinaryTypeCode::Undefined => "UNDEFINED",
            BinaryTypeCode::SLong => "SLONG",
            BinaryTypeCode::SRational => "SRATIONAL",
        }
    }
}

/// Optional per-tag directive altering the default decoding
///
/// Each instruction only applies to certain layouts; paired with any
/// other layout it is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatInstruction {
    #[default]
    None,
    /// Reduced fraction for RATIONAL and SRATIONAL
    Fraction,
    /// Whole buffer as text for UNDEFINED
    AllCharacters,
    /// Standard base64 for BYTE
    Base64,
}

impl FormatInstruction {
    /// Parses the catalog spelling of an instruction
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_uppercase().as_str() {
            "NONE" | "NO_OP" => Some(FormatInstruction::None),
            "FRACTION" => Some(FormatInstruction::Fraction),
            "ALL_CHARACTERS" | "ALLCHAR" => Some(FormatInstruction::AllCharacters),
            "BASE64" => Some(FormatInstruction::Base64),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormatInstruction::None => "NONE",
            FormatInstruction::Fraction => "FRACTION",
            FormatInstruction::AllCharacters => "ALL_CHARACTERS",
            FormatInstruction::Base64 => "BASE64",
        }
    }

    /// Whether this instruction changes the decoding of `type_code`
    pub fn applies_to(&self, type_code: BinaryTypeCode) -> bool {
        match self {
            FormatInstruction::None => false,
            FormatInstruction::Fraction => matches!(
                type_code,
                BinaryTypeCode::Rational | BinaryTypeCode::SRational
            ),
            FormatInstruction::AllCharacters => type_code == BinaryTypeCode::Undefined,
            FormatInstruction::Base64 => type_code == BinaryTypeCode::Byte,
        }
    }
}

impl fmt::Display for FormatInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw value of one tag as handed over by the image source
///
/// Multi-byte elements are always little-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTagValue {
    /// Numeric binary type code
    pub type_code: u16,
    /// Number of payload bytes the source declared
    pub byte_length: usize,
    /// Payload buffer
    pub bytes: Vec<u8>,
}

impl RawTagValue {
    /// Creates a value whose declared length matches its buffer
    pub fn new(type_code: u16, bytes: Vec<u8>) -> Self {
        RawTagValue {
            type_code,
            byte_length: bytes.len(),
            bytes,
        }
    }

    /// Creates a value with an explicit declared length
    pub fn with_length(type_code: u16, byte_length: usize, bytes: Vec<u8>) -> Self {
        RawTagValue {
            type_code,
            byte_length,
            bytes,
        }
    }

    /// The bytes the decoder should look at
    ///
    /// Never longer than the buffer, even when the declared length is.
    pub fn payload(&self) -> &[u8] {
        let end = self.byte_length.min(self.bytes.len());
        &self.bytes[..end]
    }

    /// Whether the declared length fits inside the buffer
    pub fn is_consistent(&self) -> bool {
        self.byte_length <= self.bytes.len()
    }
}

/// A raw tag value together with its tag id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub id: u32,
    pub value: RawTagValue,
}

impl RawTag {
    pub fn new(id: u32, value: RawTagValue) -> Self {
        RawTag { id, value }
    }
}
