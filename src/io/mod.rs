//! I/O utilities for tag containers
//!
//! This module provides the seekable reader alias and byte order strategies.

pub mod seekable;
pub mod byte_order;
