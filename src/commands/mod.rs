//! CLI commands
//!
//! `phototags` either analyzes images or lists its tag catalog. Each mode
//! is a `Command`, and `PhotoTagsCommandFactory` picks one from the
//! parsed arguments.

pub mod analyze_command;
pub mod catalog_command;

pub use analyze_command::AnalyzeCommand;
pub use catalog_command::CatalogCommand;

use clap::ArgMatches;

use crate::tags::errors::PhotoResult;
use crate::utils::logger::Logger;

/// A CLI mode ready to run
pub trait Command {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    fn execute(&self) -> PhotoResult<()>;
}

/// Builds the command selected by the CLI arguments
pub trait CommandFactory<'a> {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> PhotoResult<Box<dyn Command + 'a>>;
}

/// Chooses between catalog listing and image analysis
#[derive(Default)]
pub struct PhotoTagsCommandFactory;

impl PhotoTagsCommandFactory {
    pub fn new() -> Self {
        PhotoTagsCommandFactory
    }
}

impl<'a> CommandFactory<'a> for PhotoTagsCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> PhotoResult<Box<dyn Command + 'a>> {
        if args.get_flag("list-catalog") {
            Ok(Box::new(CatalogCommand::new(args, logger)?))
        } else {
            Ok(Box::new(AnalyzeCommand::new(args, logger)?))
        }
    }
}
