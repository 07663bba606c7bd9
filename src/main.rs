mod config;
mod demos;
mod logging;
pub mod seq;
mod sim;

use clap::Parser;
use log::{LevelFilter, error, info};
use std::fs;
use std::process;

use crate::seq::interpreter::Interpreter;
use crate::seq::motor::MotorCalibration;
use crate::seq::program::Program;
use crate::sim::{SimClock, SimMotors, SimRng};

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sequence file to execute.
    #[arg(required_unless_present_any = ["demo", "list_demos"])]
    sequence_file: Option<String>,

    /// Run a built-in demo sequence by name instead of a file.
    #[arg(long, conflicts_with = "sequence_file")]
    demo: Option<String>,

    /// List the built-in demo sequences and exit.
    #[arg(long)]
    list_demos: bool,

    /// Left motor calibration trim, subtracted from the scaled magnitude.
    #[arg(long, default_value_t = 0)]
    left_offset: i16,

    /// Right motor calibration trim, subtracted from the scaled magnitude.
    #[arg(long, default_value_t = 0)]
    right_offset: i16,

    /// Seed for LOAD_RAND draws; unseeded runs differ between invocations.
    #[arg(long)]
    seed: Option<u64>,

    /// Elide WAIT delays instead of sleeping.
    #[arg(long)]
    fast: bool,

    /// Debug filter to specify log topics (e.g., "seq,motor")
    /// Available topics: seq, motor
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let log_level = match args.log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    if let Err(e) = logging::init_logger(log_level, args.debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    if args.list_demos {
        for name in demos::demo_names() {
            println!("{}", name.trim_end_matches(".seq"));
        }
        return;
    }

    let source = if let Some(name) = &args.demo {
        match demos::get_demo_bytes(&format!("{}.seq", name)) {
            Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            None => {
                error!("Unknown demo sequence '{}'; see --list-demos", name);
                process::exit(1);
            }
        }
    } else {
        let filename = args
            .sequence_file
            .as_deref()
            .expect("clap enforces a sequence file");
        info!("Loading sequence from file: {}", filename);
        match fs::read_to_string(filename) {
            Ok(content) => content,
            Err(e) => {
                error!("Error reading file {}: {}", filename, e);
                process::exit(1);
            }
        }
    };

    let parsed = match seq::parser::parse_sequence(&source) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("Error parsing sequence: {}", e);
            process::exit(1);
        }
    };

    let program = match Program::new(parsed.instructions) {
        Ok(program) => program,
        Err(e) => {
            error!("Rejected sequence: {}", e);
            process::exit(1);
        }
    };

    let calibration = MotorCalibration {
        left: args.left_offset,
        right: args.right_offset,
    };
    let mut interpreter = Interpreter::new(
        &program,
        calibration,
        SimMotors,
        SimClock { fast: args.fast },
        SimRng::new(args.seed),
    );

    info!("Executing sequence ({} instructions).", program.len());
    match interpreter.run() {
        Ok(()) => info!("Sequence finished."),
        Err(e) => {
            error!("Sequence aborted: {}", e);
            process::exit(1);
        }
    }
}
