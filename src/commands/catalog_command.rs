//! Tag catalog listing command
//!
//! Loads a tag catalog, reports its diagnostics and lists every
//! definition with its pretty-print rules.

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::Command;
use crate::tags::catalog::CatalogLoader;
use crate::tags::errors::PhotoResult;
use crate::utils::logger::Logger;

/// Command for listing the tag catalog
pub struct CatalogCommand<'a> {
    /// Catalog file, or the built-in catalog when absent
    catalog: Option<String>,
    /// Show rules for each definition
    verbose: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> CatalogCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> PhotoResult<Self> {
        Ok(CatalogCommand {
            catalog: args.get_one::<String>("catalog").cloned(),
            verbose: args.get_flag("verbose"),
            logger,
        })
    }
}

impl<'a> Command for CatalogCommand<'a> {
    fn name(&self) -> &'static str {
        "list-catalog"
    }

    fn execute(&self) -> PhotoResult<()> {
        let load = match &self.catalog {
            Some(path) => CatalogLoader::from_file(path)?,
            None => CatalogLoader::builtin(),
        };

        if load.has_diagnostics() {
            warn!("{} catalog diagnostics:", load.diagnostics.len());
            for diagnostic in &load.diagnostics {
                warn!("  {}", diagnostic);
            }
            self.logger.log_diagnostics(&load.diagnostics)?;
        }

        info!("Tag catalog: {} definitions", load.catalog.len());
        for definition in load.catalog.sorted() {
            info!("  {}", definition);
            if self.verbose {
                for rule in &definition.rules {
                    info!("      {}", rule);
                }
            }
        }

        Ok(())
    }
}
