//! Image File Directory entries
//!
//! A directory entry names a tag, its binary type and element count, and
//! holds either the value itself (when it fits in four bytes) or the
//! offset where the value is stored.

use std::io::Cursor;

use log::trace;

use crate::io::byte_order::{element_size, ByteOrderHandler};
use crate::tags::constants::pointers;

/// Bytes available for an inline value in a classic TIFF entry
pub const INLINE_VALUE_SIZE: u64 = 4;

/// Represents an entry in an Image File Directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag identifier
    pub tag: u16,
    /// Binary type code
    pub field_type: u16,
    /// Number of elements
    pub count: u32,
    /// Raw value-or-offset field, still in file byte order
    pub value_field: [u8; 4],
}

impl IfdEntry {
    pub fn new(tag: u16, field_type: u16, count: u32, value_field: [u8; 4]) -> Self {
        IfdEntry {
            tag,
            field_type,
            count,
            value_field,
        }
    }

    /// Total payload size in bytes, if the type is known
    pub fn payload_size(&self) -> Option<u64> {
        element_size(self.field_type).map(|size| size as u64 * self.count as u64)
    }

    /// Whether the payload sits in the value field itself
    pub fn is_value_inline(&self) -> bool {
        let inline = matches!(self.payload_size(), Some(size) if size <= INLINE_VALUE_SIZE);
        trace!("Tag {} payload {:?} bytes, inline: {}", self.tag, self.payload_size(), inline);
        inline
    }

    /// Whether this entry points at a nested directory
    pub fn is_directory_pointer(&self) -> bool {
        matches!(
            self.tag,
            pointers::EXIF_IFD | pointers::GPS_IFD | pointers::INTEROP_IFD
        )
    }

    /// Whether this entry points at a directory whose tags are read
    pub fn is_tag_directory(&self) -> bool {
        matches!(self.tag, pointers::EXIF_IFD | pointers::GPS_IFD)
    }

    /// Reads the value field as an offset
    pub fn offset(&self, handler: &dyn ByteOrderHandler) -> u64 {
        let mut cursor = Cursor::new(&self.value_field[..]);
        // Four bytes are always available
        handler.read_u32(&mut cursor).map(u64::from).unwrap_or(0)
    }
}
