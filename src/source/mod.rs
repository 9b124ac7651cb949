//! Raw tag extraction from image files
//!
//! Reads TIFF files and JPEG files with an Exif segment and hands back
//! the flat list of raw tags the analysis consumes.

pub mod ifd;
pub mod jpeg;
pub mod reader;

use log::info;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use crate::io::seekable::SeekableReader;
use crate::tags::errors::PhotoResult;
use crate::tags::types::RawTag;

pub use reader::TagReader;

/// Reads the raw tags of an image file
pub fn read_file<P: AsRef<Path>>(path: P) -> PhotoResult<Vec<RawTag>> {
    let path = path.as_ref();
    info!("Reading tags from: {}", path.display());

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_tags(&mut reader)
}

/// Reads the raw tags of a TIFF or JPEG stream
pub fn read_tags(reader: &mut dyn SeekableReader) -> PhotoResult<Vec<RawTag>> {
    if jpeg::is_jpeg(reader)? {
        let block = jpeg::find_exif_block(reader)?;
        TagReader::read(&mut Cursor::new(block))
    } else {
        TagReader::read(reader)
    }
}
