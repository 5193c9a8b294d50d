/*!
 * Command-line interface for arcscan
 */

use std::io::{self, Write};
use std::process;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use rayon::ThreadPoolBuilder;

use arcscan::clipboard::copy_to_clipboard;
use arcscan::config::{Args, ScanCriteria};
use arcscan::error::Result;
use arcscan::report::{Reporter, ScanReport};
use arcscan::scanner::Scanner;
use arcscan::writer::OutputSink;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        generate(shell, &mut Args::command(), "arcscan", &mut io::stdout());
        return;
    }

    setup_logging(args.quiet, args.verbose);

    let exit_code = match run(&args) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run(args: &Args) -> Result<()> {
    args.validate()?;

    // Configure thread pool
    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
    {
        log::warn!("Failed to set thread pool size: {}", e);
    }

    let scanner = Scanner::new(ScanCriteria::from_args(args));
    let mut sink = OutputSink::for_mode(args.clipboard, args.quiet);

    let start_time = Instant::now();
    let scanned = args
        .paths
        .iter()
        .try_for_each(|path| scanner.scan_path(path, &mut sink));
    sink.flush()?;
    let duration = start_time.elapsed();

    // Whatever was produced before a fatal error still reaches the clipboard
    if let Some(text) = sink.into_buffered_text() {
        match copy_to_clipboard(&text) {
            Ok(()) => log::info!("Copied {} bytes to the clipboard", text.len()),
            Err(e) if !args.quiet => eprintln!("Warning: {}", e),
            Err(_) => {}
        }
    }

    if args.summary {
        Reporter::print_report(&ScanReport {
            roots: args.paths.len(),
            duration,
            statistics: scanner.statistics(),
        });
    }

    scanned
}
