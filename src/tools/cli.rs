use clap::Parser;
use log::{info, LevelFilter};
use std::{fmt::Display, fmt::Formatter};

/// Default container name written by compression.
pub const DEFAULT_COMPRESSED: &str = "compressed.bin";
/// Default file name written by decompression.
pub const DEFAULT_DECOMPRESSED: &str = "decompressed.txt";

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// The log filter matching this verbosity.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Everything an operation needs to know, independent of how it was requested.
#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// Name of the file to read for input
    pub file: String,
    /// Name of the file to write. None means the default name for the mode.
    pub output: Option<String>,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Print the code table after compressing
    pub print_codes: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            file: String::new(),
            output: None,
            op_mode: Mode::Zip,
            force_overwrite: false,
            print_codes: false,
            verbose: Verbosity::Info,
        }
    }

    /// The file the current mode writes to (None in test mode).
    pub fn output_path(&self) -> Option<String> {
        match self.op_mode {
            Mode::Test => None,
            Mode::Zip => Some(
                self.output
                    .clone()
                    .unwrap_or_else(|| DEFAULT_COMPRESSED.to_string()),
            ),
            Mode::Unzip => Some(
                self.output
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DECOMPRESSED.to_string()),
            ),
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A static Huffman file compressor",
    long_about = "
    Counts the bytes of the input file, builds a Huffman code from those counts and writes
    the code table followed by the bit-packed data. Decompression reads the table back and
    restores the original bytes exactly."
)]
pub struct Args {
    /// Filename of file to process
    #[clap()]
    filename: String,

    /// Perform compression on the input file (the default)
    #[clap(short = 'z', long = "compress", conflicts_with_all = &["decompress", "test"])]
    compress: bool,

    /// Perform decompression on the input file
    #[clap(short = 'd', long = "decompress", conflicts_with = "test")]
    decompress: bool,

    /// Test compressed file integrity without writing any output
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Output file (defaults to compressed.bin or decompressed.txt)
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Print the code table after compressing
    #[clap(long = "codes")]
    codes: bool,

    /// Suppress all messages
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,

    /// Be verbose (a 2nd -v gives more)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Parse the process arguments and set the log level.
pub fn init_huff_opts() -> HuffOpts {
    let opts = huff_opts_from(Args::parse());
    log::set_max_level(opts.verbose.level_filter());

    // Below we report initialization status to the user
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Getting input from the file {}", opts.file);
    if let Some(out) = opts.output_path() {
        info!("Sending output to the file {}", out);
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    opts
}

/// Put command line information from CLAP into our internal structure.
pub fn huff_opts_from(args: Args) -> HuffOpts {
    let op_mode = if args.decompress {
        Mode::Unzip
    } else if args.test {
        Mode::Test
    } else {
        Mode::Zip
    };
    let verbose = if args.quiet {
        Verbosity::Quiet
    } else {
        match args.verbose {
            0 => Verbosity::Info,
            1 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    };
    HuffOpts {
        file: args.filename,
        output: args.output,
        op_mode,
        force_overwrite: args.force,
        print_codes: args.codes,
        verbose,
    }
}

#[cfg(test)]
mod test {
    use super::{huff_opts_from, Args, Mode, Verbosity};
    use clap::Parser;

    fn parse(args: &[&str]) -> super::HuffOpts {
        huff_opts_from(Args::try_parse_from(args).unwrap())
    }

    #[test]
    fn defaults_test() {
        let opts = parse(&["huffpack", "input.txt"]);
        assert_eq!(opts.file, "input.txt");
        assert_eq!(opts.op_mode, Mode::Zip);
        assert_eq!(opts.output_path(), Some("compressed.bin".to_string()));
        assert_eq!(opts.verbose, Verbosity::Info);
        assert!(!opts.force_overwrite);
        assert!(!opts.print_codes);
    }

    #[test]
    fn decompress_test() {
        let opts = parse(&["huffpack", "-d", "compressed.bin"]);
        assert_eq!(opts.op_mode, Mode::Unzip);
        assert_eq!(opts.output_path(), Some("decompressed.txt".to_string()));
    }

    #[test]
    fn output_override_test() {
        let opts = parse(&["huffpack", "-d", "-f", "-o", "out.dat", "in.bin"]);
        assert_eq!(opts.output_path(), Some("out.dat".to_string()));
        assert!(opts.force_overwrite);
    }

    #[test]
    fn test_mode_has_no_output_test() {
        let opts = parse(&["huffpack", "-t", "in.bin"]);
        assert_eq!(opts.op_mode, Mode::Test);
        assert_eq!(opts.output_path(), None);
    }

    #[test]
    fn verbosity_test() {
        assert_eq!(parse(&["huffpack", "-q", "x"]).verbose, Verbosity::Quiet);
        assert_eq!(parse(&["huffpack", "-v", "x"]).verbose, Verbosity::Debug);
        assert_eq!(parse(&["huffpack", "-vv", "x"]).verbose, Verbosity::Trace);
    }

    #[test]
    fn conflicting_modes_test() {
        assert!(Args::try_parse_from(&["huffpack", "-z", "-d", "x"]).is_err());
        assert!(Args::try_parse_from(&["huffpack", "x"]).is_ok());
        assert!(Args::try_parse_from(&["huffpack"]).is_err());
    }
}
