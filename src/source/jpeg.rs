//! JPEG Exif segment location
//!
//! A JPEG keeps its tags in an APP1 segment that opens with `Exif\0\0`
//! followed by a complete TIFF structure.

use byteorder::{BigEndian, ReadBytesExt};
use log::debug;
use std::io::SeekFrom;

use crate::io::seekable::SeekableReader;
use crate::tags::constants::header;
use crate::tags::errors::{PhotoError, PhotoResult};

const MARKER_PREFIX: u8 = 0xFF;
const END_OF_IMAGE: u8 = 0xD9;

/// Whether the stream starts with a JPEG start-of-image marker
pub fn is_jpeg(reader: &mut dyn SeekableReader) -> PhotoResult<bool> {
    reader.seek(SeekFrom::Start(0))?;
    let mut soi = [0u8; 2];
    let is_jpeg = reader.read_exact(&mut soi).is_ok() && soi == header::JPEG_SOI;
    reader.seek(SeekFrom::Start(0))?;
    Ok(is_jpeg)
}

/// Returns the TIFF structure embedded in the first Exif APP1 segment
pub fn find_exif_block(reader: &mut dyn SeekableReader) -> PhotoResult<Vec<u8>> {
    reader.seek(SeekFrom::Start(header::JPEG_SOI.len() as u64))?;

    loop {
        let mut marker = reader.read_u8()?;
        if marker != MARKER_PREFIX {
            return Err(PhotoError::InvalidImage(format!("expected JPEG marker, found {:#04x}", marker)));
        }
        // Fill bytes may pad the prefix
        while marker == MARKER_PREFIX {
            marker = reader.read_u8()?;
        }

        if marker == header::JPEG_SOS || marker == END_OF_IMAGE {
            break;
        }
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            continue;
        }

        let length = reader.read_u16::<BigEndian>()?;
        if length < 2 {
            return Err(PhotoError::InvalidImage(format!("JPEG segment {:#04x} too short", marker)));
        }
        let payload_len = (length - 2) as usize;

        if marker == header::JPEG_APP1 {
            let mut payload = vec![0u8; payload_len];
            reader.read_exact(&mut payload)?;
            if payload.starts_with(header::EXIF_IDENTIFIER) {
                debug!("Found Exif APP1 segment of {} bytes", payload_len);
                return Ok(payload.split_off(header::EXIF_IDENTIFIER.len()));
            }
        } else {
            reader.seek(SeekFrom::Current(payload_len as i64))?;
        }
    }

    Err(PhotoError::InvalidImage("no Exif segment found".to_string()))
}
