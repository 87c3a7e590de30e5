use clap::{value_parser, Arg, ArgAction, Command};
use log::{error, info};
use simplelog::{
    format_description, ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::PathBuf;
use std::process::exit;

use combine_galil_code::application;
use combine_galil_code::constants::{DEFAULT_LIMITS_FILE, DEFAULT_SOURCE_DIR};

fn main() {
    // Parse the command line arguments
    let matches = Command::new("combine galil code")
        .about("Combines and checks all the Galil code files for a given device.")
        .arg(
            Arg::new("device")
                .help("Device name (e.g. \"35m M2\").")
                .required(true),
        )
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .help("Directory that contains the Galil source code files.")
                .default_value(DEFAULT_SOURCE_DIR)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path. Default is \"Combined <device> <date>.gal\" in the source directory.")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("limits")
                .long("limits")
                .help("Controller limits file.")
                .default_value(DEFAULT_LIMITS_FILE)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("check")
                .short('c')
                .long("check")
                .action(ArgAction::SetTrue)
                .help("Check the code without writing the combined file"),
        )
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the validation issues as JSON to the standard output"),
        )
        .arg(
            Arg::new("level")
                .short('l')
                .long("log-level")
                .help("Log level: 0 (Off), 1 (Error), 2 (Warn), 3 (Info), 4 (Debug), 5 (Trace)")
                .default_value("3")
                .value_parser(value_parser!(u32)),
        )
        .get_matches();

    let device: &String = matches
        .get_one("device")
        .expect("There should be a device name.");
    let dir: &PathBuf = matches
        .get_one("dir")
        .expect("There should be a source directory.");
    let output = matches.get_one::<PathBuf>("output");
    let limits: &PathBuf = matches
        .get_one("limits")
        .expect("There should be a limits file.");

    let is_check_only = matches.get_flag("check");
    let is_json = matches.get_flag("json");

    // Check the log filter
    let log_filter = get_log_filter(matches.get_one::<u32>("level"));

    // Initiate the logger
    initiate_logger(log_filter, "application.log");
    info!("Log level: {log_filter}.");

    // Run the application
    if let Err(message) = application::run(
        device,
        dir,
        output.map(|filepath| filepath.as_path()),
        limits,
        is_check_only,
        is_json,
    ) {
        error!("{message}");
        exit(1);
    }
}

/// Get the log filter.
///
/// # Arguments
/// * `log_level` - Log level.
///
/// # Returns
/// Log filter.
fn get_log_filter(log_level: Option<&u32>) -> LevelFilter {
    match log_level {
        Some(level) => match level {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            5 => LevelFilter::Trace,
            _ => LevelFilter::Info,
        },
        None => LevelFilter::Info,
    }
}

/// Initiate the logger.
///
/// # Arguments
/// * `level` - Log level.
/// * `filepath` - Log file path.
fn initiate_logger(level: LevelFilter, filepath: &str) {
    let config = ConfigBuilder::new()
        .set_time_format_custom(format_description!(
            "[year]/[month]/[day] [hour]:[minute]:[second].[subsecond]"
        ))
        .build();

    // Log to the terminal
    let logger_terminal = TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    // Log to the file
    let logger_file: Option<Box<WriteLogger<File>>>;
    match File::create(filepath) {
        Ok(file) => {
            logger_file = Some(WriteLogger::new(level, config.clone(), file));
        }
        Err(error) => {
            logger_file = None;
            eprintln!("Failed to create the log file: {error}.");
        }
    }

    if logger_file.is_some() {
        let _ = CombinedLogger::init(vec![logger_terminal, logger_file.unwrap()]);
    } else {
        let _ = CombinedLogger::init(vec![logger_terminal]);
    }
}
