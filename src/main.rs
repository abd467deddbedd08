//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::process::ExitCode;

use huffpack::compression::compress::compress;
use huffpack::compression::decompress::{decompress, test_file};
use huffpack::tools::cli::{init_huff_opts, Mode, Verbosity};
use huffpack::Report;

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    // Available log levels are Error, Warn, Info, Debug, Trace
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Could not start the logger: {}", e);
    }

    // Narrows the log level to what the user asked for
    let options = init_huff_opts();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => compress(&options),
        Mode::Unzip => decompress(&options),
        Mode::Test => test_file(&options),
    };

    match result {
        Ok(report) => {
            if options.verbose > Verbosity::Quiet {
                summarize(options.op_mode, &report);
            }
            info!("Done.\n");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{} of {} failed: {}", options.op_mode, options.file, e);
            ExitCode::FAILURE
        }
    }
}

/// Tell the user how it went. Printed directly, since release builds drop info! messages.
fn summarize(mode: Mode, report: &Report) {
    match mode {
        Mode::Zip => {
            let ratio = if report.bytes_in == 0 {
                0.0
            } else {
                report.bytes_out as f64 / report.bytes_in as f64 * 100.0
            };
            println!(
                "File compressed successfully: {} -> {} bytes ({:.1}%), {} symbols, {} payload bits.",
                report.bytes_in, report.bytes_out, ratio, report.symbols, report.payload_bits
            );
        }
        Mode::Unzip => println!(
            "File decompressed successfully: {} -> {} bytes.",
            report.bytes_in, report.bytes_out
        ),
        Mode::Test => println!(
            "File tested successfully: {} bytes decode to {} bytes.",
            report.bytes_in, report.bytes_out
        ),
    }
}
