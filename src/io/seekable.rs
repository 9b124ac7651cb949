//! Seekable reader trait
//!
//! Directory walking jumps between offsets, so every tag source reads
//! through something that can both read and seek.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
