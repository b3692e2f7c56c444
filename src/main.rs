//! NewLang command line driver.
//!
//! Usage:
//!   newlang [OPTIONS] <FILE>
//!
//! Examples:
//!   newlang hello.nl                    # Print the JavaScript translation
//!   newlang --emit analyzed hello.nl    # Dump the analyzed program
//!   newlang -o hello.js hello.nl        # Write the translation to a file

use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};
use newlang::{compile, display_error, CompileOptions, OutputType};

/// Compiles NewLang programs to JavaScript
#[derive(Parser, Debug)]
#[command(name = "newlang")]
#[command(version)]
#[command(about = "Compiles NewLang programs to JavaScript", long_about = None)]
struct Cli {
    /// Source file to compile
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Last stage to run
    #[arg(long, value_enum, default_value = "js")]
    emit: OutputType,

    /// Generate from the analyzed program without optimizing it
    #[arg(long)]
    no_optimize: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    debug!("Input file: {:?}", cli.input);

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read input file: {:?}", cli.input))?;

    let options = CompileOptions {
        emit: cli.emit,
        optimize: !cli.no_optimize,
    };

    let output = match compile(&source, &options) {
        Ok(output) => output,
        Err(err) => {
            error!("{}", err);
            eprint!("{}", display_error(&err, &source, &cli.input));
            return Ok(ExitCode::FAILURE);
        }
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, format!("{}\n", output))
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            info!("Wrote {:?}", path);
        }
        None => println!("{}", output),
    }

    Ok(ExitCode::SUCCESS)
}
