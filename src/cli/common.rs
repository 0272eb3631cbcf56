//! Argument parsing, logging setup and file handling shared by `compress` and `decompress`.

use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};
use color_eyre::eyre::{self, WrapErr};
use tracing::level_filters::LevelFilter;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::progress::ProgressMonitor;

#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// File to read
    pub input: PathBuf,
    /// File to write, replaced if it already exists
    pub output: PathBuf,
    /// Log more details, pass twice for debug output of the library
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
    /// Never draw a progress bar while reading the input
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::ERROR,
            (false, 0) => LevelFilter::INFO,
            (false, 1) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
        }
    }

    /// Progress is only drawn for interactive terminals
    pub fn show_progress(&self) -> bool {
        !self.no_progress && !self.quiet && console::Term::stderr().is_term()
    }
}

/// Parse the command line. Usage errors, like a wrong number of arguments,
/// print the usage and exit with status 1.
pub fn parse_args(about: &'static str) -> Args {
    let parsed = Args::command()
        .about(about)
        .try_get_matches()
        .and_then(|matches| Args::from_arg_matches(&matches));
    match parsed {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            std::process::exit(exit_code(&err));
        }
    }
}

/// Help and version requests succeed, every other parse error is a usage error
fn exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Route log output through the progress bar layer so lines don't tear the bar
pub fn init_logging(args: &Args) {
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(args.log_level())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .init();
}

/// Read the whole input file, this is the `filesize`/`reset` friendly form the codec wants
pub fn read_input(path: &Path, show_progress: bool) -> eyre::Result<Vec<u8>> {
    let mut file =
        File::open(path).wrap_err_with(|| format!("failed to open input {}", path.display()))?;
    let size = file
        .metadata()
        .wrap_err_with(|| format!("failed to stat input {}", path.display()))?
        .len() as usize;

    let mut data = Vec::with_capacity(size);
    let read = if show_progress && size > 0 {
        ProgressMonitor::new(&mut file, size).read_to_end(&mut data)
    } else {
        file.read_to_end(&mut data)
    };
    read.wrap_err_with(|| format!("failed to read input {}", path.display()))?;
    Ok(data)
}

pub fn create_output(path: &Path) -> eyre::Result<BufWriter<File>> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create output {}", path.display()))?;
    Ok(BufWriter::new(file))
}
