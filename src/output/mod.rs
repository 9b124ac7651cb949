//! Result serialization
//!
//! Writers that hand an analysis result to the outside world.

pub mod xml_writer;

pub use xml_writer::{write_xml, write_xml_file, ResultOptions};
