//! Image tag analysis command
//!
//! This module implements the command for analyzing the tag properties
//! of one or more images and displaying or exporting the results.

use std::io;
use std::path::PathBuf;

use clap::ArgMatches;
use log::{debug, error, info, warn};

use crate::commands::Command;
use crate::output::{self, ResultOptions};
use crate::tags::analysis::{AnalysisResult, PhotoProperties, TagDatum};
use crate::tags::errors::{PhotoError, PhotoResult};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Output target meaning "standard output"
const STDOUT_TARGET: &str = "-";

/// Command for analyzing image tag properties
pub struct AnalyzeCommand<'a> {
    /// Images to analyze
    inputs: Vec<String>,
    /// Catalog file, or the built-in catalog when absent
    catalog: Option<PathBuf>,
    /// Fail on any catalog diagnostic
    strict: bool,
    /// XML output target
    output: Option<String>,
    /// XML document options
    result_options: ResultOptions,
    /// Only show this tag id
    tag: Option<u32>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> AnalyzeCommand<'a> {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new AnalyzeCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> PhotoResult<Self> {
        let inputs: Vec<String> = args
            .get_many::<String>("input")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        if inputs.is_empty() {
            return Err(PhotoError::GenericError("Missing input image".to_string()));
        }

        let output = args.get_one::<String>("output").cloned();
        if output.as_deref().is_some_and(|target| target != STDOUT_TARGET) && inputs.len() > 1 {
            return Err(PhotoError::GenericError(
                "An output file can only be used with a single input image".to_string(),
            ));
        }

        let tag = match args.get_one::<String>("tag") {
            Some(text) => Some(text.parse::<u32>().map_err(|_| {
                PhotoError::GenericError(format!("Invalid tag id: {}", text))
            })?),
            None => None,
        };

        let result_options = ResultOptions {
            xml_namespace: args.get_one::<String>("namespace").cloned(),
            xslt_href: args.get_one::<String>("xslt").cloned(),
            include_xslt: !args.get_flag("no-xslt"),
        };

        Ok(AnalyzeCommand {
            inputs,
            catalog: args.get_one::<String>("catalog").map(PathBuf::from),
            strict: args.get_flag("strict"),
            output,
            result_options,
            tag,
            logger,
        })
    }

    /// Initialize the session with the configured catalog
    fn initialize(&self, properties: &mut PhotoProperties) -> PhotoResult<()> {
        let catalog = self.catalog.as_deref();

        if self.strict {
            return properties.initialize_strict(catalog);
        }

        let diagnostics = properties.initialize(catalog)?;
        if !diagnostics.is_empty() {
            warn!("Tag catalog loaded with {} diagnostics", diagnostics.len());
            self.logger.log_diagnostics(&diagnostics)?;
        }
        Ok(())
    }

    /// Display one tag datum
    fn display_datum(&self, datum: &TagDatum) {
        let pretty = datum.pretty_print_value();
        if pretty == datum.raw_value {
            info!("  {:>5} [{}] {}: {}", datum.id, datum.category(), datum.name(), datum.raw_value);
        } else {
            info!("  {:>5} [{}] {}: {} ({})", datum.id, datum.category(), datum.name(), pretty, datum.raw_value);
        }
    }

    /// Display the analysis of one image
    fn display_result(&self, result: &AnalysisResult) {
        info!("\nTag analysis for {}:", result.image);

        match self.tag {
            Some(id) => match result.get(id) {
                Some(datum) => {
                    self.display_datum(datum);
                    if !datum.description().is_empty() {
                        info!("        {}", datum.description());
                    }
                }
                None => info!("  Tag {} not present", id),
            },
            None => {
                info!("  {} tags", result.len());
                for datum in result.iter() {
                    self.display_datum(datum);
                }
            }
        }
    }

    /// Write the XML document for one image if an output was requested
    fn export_result(&self, result: &AnalysisResult) -> PhotoResult<()> {
        match self.output.as_deref() {
            Some(STDOUT_TARGET) => {
                let stdout = io::stdout();
                output::write_xml(stdout.lock(), result, &self.result_options)?;
                println!();
                Ok(())
            }
            Some(path) => output::write_xml_file(path, result, &self.result_options),
            None => Ok(()),
        }
    }

    /// Analyze one image and report it
    fn process_input(&self, properties: &mut PhotoProperties, input: &str) -> PhotoResult<()> {
        let result = properties.analyze_file(input)?;
        debug!("Analysis of {} created at {}", input, result.created);

        self.display_result(result);
        self.logger.log_tag_data(result)?;
        self.export_result(result)
    }
}

impl<'a> Command for AnalyzeCommand<'a> {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn execute(&self) -> PhotoResult<()> {
        let mut properties = PhotoProperties::new();
        self.initialize(&mut properties)?;

        let progress = if self.inputs.len() > 1 {
            Some(ProgressTracker::new(self.inputs.len() as u64, "Analyzing images"))
        } else {
            None
        };

        let mut failures = 0;
        for input in &self.inputs {
            if let Some(progress) = &progress {
                progress.set_message(input);
            }

            if let Err(e) = self.process_input(&mut properties, input) {
                error!("Failed to analyze {}: {}", input, e);
                failures += 1;
            }

            if let Some(progress) = &progress {
                progress.increment(1);
            }
        }

        if let Some(progress) = &progress {
            progress.finish();
        }

        if failures > 0 {
            return Err(PhotoError::GenericError(format!(
                "{} of {} images could not be analyzed",
                failures,
                self.inputs.len()
            )));
        }

        Ok(())
    }
}
