//! Logger utility for application-wide logging
//!
//! This module provides a custom logger implementation that works alongside
//! the standard log crate, but adds file output capabilities.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Metadata, LevelFilter};

use crate::tags::analysis::AnalysisResult;

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level this logger records
    level: LevelFilter,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str) -> io::Result<Self> {
        Self::with_level(log_file, LevelFilter::Debug)
    }

    /// Creates a logger that records messages up to `level`
    pub fn with_level(log_file: &str, level: LevelFilter) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level,
        })
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                writeln!(file, "{}", message)?;
                file.flush()?;
            }
        }
        Ok(())
    }

    /// Logs the tag table of an analysis
    ///
    /// # Arguments
    ///
    /// * `result` - The analysis to record
    pub fn log_tag_data(&self, result: &AnalysisResult) -> io::Result<()> {
        self.log(&format!("Image: {} ({} tags)", result.image, result.len()))?;

        for datum in result.iter() {
            let pretty = datum.pretty_print_value();
            let message = if pretty == datum.raw_value {
                format!("  {:>5} {:<6} {}: {}", datum.id, datum.category(), datum.name(), datum.raw_value)
            } else {
                format!("  {:>5} {:<6} {}: {} ({})", datum.id, datum.category(), datum.name(), pretty, datum.raw_value)
            };
            self.log(&message)?;
        }

        Ok(())
    }

    /// Logs catalog diagnostics, one per line
    pub fn log_diagnostics(&self, diagnostics: &[String]) -> io::Result<()> {
        if diagnostics.is_empty() {
            return Ok(());
        }

        self.log("Catalog diagnostics:")?;
        for diagnostic in diagnostics {
            self.log(&format!("  {}", diagnostic))?;
        }
        Ok(())
    }

    /// Static method to initialize the global logger
    pub fn init_global_logger(log_file: &str, level: LevelFilter) -> io::Result<()> {
        // Create a dedicated logger for the log crate
        let global_logger = Logger::with_level(log_file, level)?;

        // Set up the global logger - we'll ignore the SetLoggerError
        // since we only call this once at startup
        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level);
        Ok(())
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = Logger::log(self, &message);

            // Also print to console
            println!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}
