//! Tag format constants
//!
//! Numeric codes shared by the decoder and the image source adapter,
//! named so the rest of the crate never deals in magic numbers.

/// Binary type codes as they appear in a TIFF/EXIF directory entry
pub mod type_codes {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 7-bit ASCII, NUL terminated
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;      // 8-bit signed integer
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with tag-defined meaning
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
}

/// Element widths, in bytes, of the decodable type codes
pub mod widths {
    pub const SHORT: usize = 2;
    pub const LONG: usize = 4;
    pub const RATIONAL: usize = 8;
}

/// Tags that point at nested directories rather than carrying a value
pub mod pointers {
    pub const EXIF_IFD: u16 = 34665;
    pub const GPS_IFD: u16 = 34853;
    pub const INTEROP_IFD: u16 = 40965;
}

/// TIFF and JPEG container markers
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// "II" byte order marker for little-endian
    pub const LITTLE_ENDIAN_MARKER: u16 = 0x4949;

    /// "MM" byte order marker for big-endian
    pub const BIG_ENDIAN_MARKER: u16 = 0x4D4D;

    /// JPEG start-of-image marker
    pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

    /// JPEG APP1 segment marker (carries Exif)
    pub const JPEG_APP1: u8 = 0xE1;

    /// JPEG start-of-scan marker, no metadata segments follow it
    pub const JPEG_SOS: u8 = 0xDA;

    /// Identifier that opens an Exif APP1 payload
    pub const EXIF_IDENTIFIER: &[u8; 6] = b"Exif\0\0";
}

/// Well-known tag ids used in docs and tests
pub mod tags {
    pub const MAKE: u32 = 271;
    pub const MODEL: u32 = 272;
    pub const ORIENTATION: u32 = 274;
    pub const EXPOSURE_TIME: u32 = 33434;
    pub const F_NUMBER: u32 = 33437;
    pub const EXIF_VERSION: u32 = 36864;
    pub const SHUTTER_SPEED_VALUE: u32 = 37377;
    pub const EXPOSURE_BIAS_VALUE: u32 = 37380;
    pub const FLASH: u32 = 37385;
}
