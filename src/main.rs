use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::{debug, error, LevelFilter};

use phototags::utils::logger::Logger;
use phototags::commands::{CommandFactory, PhotoTagsCommandFactory};

fn main() {
    let matches = ClapCommand::new("PhotoTags")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Analyze and pretty-print the tag properties of TIFF and JPEG images")
        .arg(
            Arg::new("input")
                .help("Input image files")
                .required_unless_present("list-catalog")
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .help("Tag catalog TOML file (defaults to the built-in catalog)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail if the tag catalog has any diagnostics")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the analysis as XML to this file ('-' for standard output)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("namespace")
                .long("namespace")
                .help("XML namespace of the output document")
                .value_name("URI")
                .required(false),
        )
        .arg(
            Arg::new("xslt")
                .long("xslt")
                .help("Stylesheet to reference from the output document")
                .value_name("HREF")
                .required(false),
        )
        .arg(
            Arg::new("no-xslt")
                .long("no-xslt")
                .help("Omit the stylesheet instruction even if --xslt is given")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tag")
                .short('t')
                .long("tag")
                .help("Show only this tag id")
                .value_name("ID")
                .required(false),
        )
        .arg(
            Arg::new("list-catalog")
                .long("list-catalog")
                .help("List the tag catalog instead of analyzing images")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file = "phototags.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("phototags-global.log", level) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = PhotoTagsCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            debug!("Running {} command", command.name());
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
