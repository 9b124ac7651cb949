//! Byte order handling for TIFF/Exif tag containers
//!
//! This module implements the Strategy pattern for handling different
//! byte orders (little-endian vs big-endian) when reading directory
//! entries, and for normalizing tag payloads to little-endian.

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::Result;

use crate::io::seekable::SeekableReader;
use crate::tags::constants::{header, type_codes};
use crate::tags::errors::{PhotoError, PhotoResult};

/// Represents the byte order of a TIFF structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Detects the byte order from the TIFF header
    pub fn detect(reader: &mut dyn SeekableReader) -> PhotoResult<Self> {
        let marker = reader.read_u16::<LittleEndian>()?;
        match marker {
            header::LITTLE_ENDIAN_MARKER => Ok(ByteOrder::LittleEndian),
            header::BIG_ENDIAN_MARKER => Ok(ByteOrder::BigEndian),
            _ => Err(PhotoError::InvalidImage(format!("invalid byte order marker {:#06x}", marker))),
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

/// Trait for byte order handling strategies
pub trait ByteOrderHandler: Send + Sync {
    /// Read a u16 value
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16>;

    /// Read a u32 value
    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32>;

    /// Rewrites a payload of `type_code` elements in little-endian order
    fn to_little_endian(&self, type_code: u16, bytes: &mut [u8]);
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        reader.read_u16::<LittleEndian>()
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        reader.read_u32::<LittleEndian>()
    }

    fn to_little_endian(&self, _type_code: u16, _bytes: &mut [u8]) {}
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        reader.read_u16::<BigEndian>()
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        reader.read_u32::<BigEndian>()
    }

    fn to_little_endian(&self, type_code: u16, bytes: &mut [u8]) {
        // Rationals are two independent 4-byte fields
        let swap_width = match type_code {
            type_codes::SHORT | type_codes::SSHORT => 2,
            type_codes::LONG | type_codes::SLONG | type_codes::FLOAT => 4,
            type_codes::RATIONAL | type_codes::SRATIONAL => 4,
            type_codes::DOUBLE => 8,
            _ => return,
        };

        for element in bytes.chunks_exact_mut(swap_width) {
            element.reverse();
        }
    }
}

/// Size in bytes of one element of `type_code`, if known
pub fn element_size(type_code: u16) -> Option<usize> {
    match type_code {
        type_codes::BYTE | type_codes::ASCII | type_codes::SBYTE | type_codes::UNDEFINED => Some(1),
        type_codes::SHORT | type_codes::SSHORT => Some(2),
        type_codes::LONG | type_codes::SLONG | type_codes::FLOAT => Some(4),
        type_codes::RATIONAL | type_codes::SRATIONAL | type_codes::DOUBLE => Some(8),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::Cursor;

    #[test]
    fn test_byte_order_detection() {
        let mut cursor = Cursor::new(vec![0x49, 0x49]);
        assert_eq!(ByteOrder::detect(&mut cursor).unwrap(), ByteOrder::LittleEndian);

        let mut cursor = Cursor::new(vec![0x4D, 0x4D]);
        assert_eq!(ByteOrder::detect(&mut cursor).unwrap(), ByteOrder::BigEndian);

        let mut cursor = Cursor::new(vec![0x12, 0x34]);
        assert!(ByteOrder::detect(&mut cursor).is_err());
    }

    #[test]
    fn test_big_endian_handler_reads() {
        let mut buffer = Vec::new();
        buffer.write_u16::<BigEndian>(0x1234).unwrap();
        buffer.write_u32::<BigEndian>(0x12345678).unwrap();
        let mut cursor = Cursor::new(buffer);

        let handler = BigEndianHandler;
        assert_eq!(handler.read_u16(&mut cursor).unwrap(), 0x1234);
        assert_eq!(handler.read_u32(&mut cursor).unwrap(), 0x12345678);
    }

    #[test]
    fn test_big_endian_rational_normalization() {
        let mut buffer = Vec::new();
        buffer.write_u32::<BigEndian>(1).unwrap();
        buffer.write_u32::<BigEndian>(50).unwrap();

        BigEndianHandler.to_little_endian(type_codes::RATIONAL, &mut buffer);
        assert_eq!(buffer, vec![1, 0, 0, 0, 50, 0, 0, 0]);
    }

    #[test]
    fn test_single_byte_types_untouched() {
        let mut buffer = b"Canon\0".to_vec();
        BigEndianHandler.to_little_endian(type_codes::ASCII, &mut buffer);
        assert_eq!(buffer, b"Canon\0".to_vec());
    }
}
