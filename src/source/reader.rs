//! TIFF/Exif directory reader
//!
//! Walks the primary image directory and the Exif and GPS
//! sub-directories it points to, producing one raw tag per entry.
//! Payloads are normalized to little-endian. Interoperability and
//! thumbnail directories are not visited: their small tag ids overlap
//! the GPS ids.

use log::{debug, info, trace, warn};
use std::collections::HashSet;
use std::io::SeekFrom;

use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::source::ifd::IfdEntry;
use crate::tags::constants::header;
use crate::tags::errors::{PhotoError, PhotoResult};
use crate::tags::types::{RawTag, RawTagValue};

/// Reader for the tag directories of a TIFF structure
pub struct TagReader {
    /// Byte order handler for the current structure
    handler: Box<dyn ByteOrderHandler>,
    /// Size of the structure in bytes
    size: u64,
    /// Directory offsets already visited
    visited: HashSet<u64>,
    /// Tag ids already emitted
    seen: HashSet<u16>,
}

impl TagReader {
    /// Reads every raw tag of the TIFF structure in `reader`
    ///
    /// The structure must start at offset 0 of the reader.
    pub fn read(reader: &mut dyn SeekableReader) -> PhotoResult<Vec<RawTag>> {
        let size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let byte_order = ByteOrder::detect(reader)?;
        debug!("Detected byte order: {}", byte_order.name());
        let handler = byte_order.create_handler();

        let version = handler.read_u16(reader)?;
        if version != header::TIFF_VERSION {
            return Err(PhotoError::InvalidImage(format!("unsupported TIFF version {}", version)));
        }

        let first_ifd_offset = handler.read_u32(reader)? as u64;
        debug!("First IFD offset: {}", first_ifd_offset);

        let mut tag_reader = TagReader {
            handler,
            size,
            visited: HashSet::new(),
            seen: HashSet::new(),
        };

        let mut tags = Vec::new();
        tag_reader.read_directory(reader, first_ifd_offset, &mut tags)?;

        info!("Read {} raw tags", tags.len());
        Ok(tags)
    }

    /// Reads one directory and any sub-directories it points to
    fn read_directory(
        &mut self,
        reader: &mut dyn SeekableReader,
        offset: u64,
        tags: &mut Vec<RawTag>,
    ) -> PhotoResult<()> {
        if offset == 0 || offset + 2 > self.size {
            warn!("Directory offset {} outside of {} byte structure", offset, self.size);
            return Ok(());
        }
        if !self.visited.insert(offset) {
            warn!("Directory at offset {} already visited, skipping", offset);
            return Ok(());
        }

        let entries = self.read_entries(reader, offset)?;
        debug!("Directory at offset {} has {} entries", offset, entries.len());

        let mut sub_directories = Vec::new();
        for entry in &entries {
            if entry.is_directory_pointer() {
                if entry.is_tag_directory() {
                    sub_directories.push(entry.offset(self.handler.as_ref()));
                } else {
                    debug!("Skipping directory pointed to by tag {}", entry.tag);
                }
                continue;
            }

            if self.seen.contains(&entry.tag) {
                trace!("Tag {} repeated, keeping the first occurrence", entry.tag);
                continue;
            }

            match self.read_payload(reader, entry)? {
                Some(bytes) => {
                    self.seen.insert(entry.tag);
                    tags.push(RawTag::new(entry.tag as u32, RawTagValue::new(entry.field_type, bytes)));
                }
                None => debug!("Tag {} value not accessible, omitting", entry.tag),
            }
        }

        for sub_offset in sub_directories {
            self.read_directory(reader, sub_offset, tags)?;
        }

        Ok(())
    }

    fn read_entries(&self, reader: &mut dyn SeekableReader, offset: u64) -> PhotoResult<Vec<IfdEntry>> {
        reader.seek(SeekFrom::Start(offset))?;
        let count = self.handler.read_u16(reader)?;

        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let tag = self.handler.read_u16(reader)?;
            let field_type = self.handler.read_u16(reader)?;
            let element_count = self.handler.read_u32(reader)?;
            let mut value_field = [0u8; 4];
            reader.read_exact(&mut value_field)?;

            entries.push(IfdEntry::new(tag, field_type, element_count, value_field));
        }

        Ok(entries)
    }

    /// Reads an entry's payload in little-endian order
    ///
    /// Returns `None` when the type is unknown or the value lies outside
    /// the structure.
    fn read_payload(&self, reader: &mut dyn SeekableReader, entry: &IfdEntry) -> PhotoResult<Option<Vec<u8>>> {
        let size = match entry.payload_size() {
            Some(size) => size,
            None => {
                debug!("Tag {} has unknown type {}", entry.tag, entry.field_type);
                return Ok(None);
            }
        };

        let mut bytes = if entry.is_value_inline() {
            entry.value_field[..size as usize].to_vec()
        } else {
            let value_offset = entry.offset(self.handler.as_ref());
            if value_offset + size > self.size {
                return Ok(None);
            }
            reader.seek(SeekFrom::Start(value_offset))?;
            let mut bytes = vec![0u8; size as usize];
            reader.read_exact(&mut bytes)?;
            bytes
        };

        self.handler.to_little_endian(entry.field_type, &mut bytes);
        Ok(Some(bytes))
    }
}
