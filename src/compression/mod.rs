//! The compression module runs the whole pipeline in both directions.
//!
//! Compression happens in the following steps:
//! - Frequency count: how often every byte value occurs in the input.
//! - Tree build: merge the two lightest nodes until one root remains.
//! - Code generation: label every path from the root, 0 for left and 1 for right.
//! - Serialization: write the code table, the exact payload bit length and the packed payload.
//!
//! Decompression parses the container, rebuilds a decode tree from the code table and walks it
//! one payload bit at a time.
//!
//! The whole input is held in memory. Output files are first written next to their final
//! location and renamed into place only once complete, so a failed run never leaves a partial
//! file behind under the requested name.
//!

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};

use crate::error::HuffError;

pub mod compress;
pub mod container;
pub mod decompress;

/// Temporary output names tried before giving up.
const MAX_PARTIAL_ATTEMPTS: u32 = 100;

/// Summary of one operation, for reporting to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Report {
    /// Bytes read from the input file
    pub bytes_in: u64,
    /// Bytes produced (written, or decoded in test mode)
    pub bytes_out: u64,
    /// Distinct symbols in the code table
    pub symbols: usize,
    /// Exact payload length in bits
    pub payload_bits: u64,
}

/// Write `data` to `path` all or nothing. Refuses to replace an existing file unless `force`.
pub(crate) fn write_output(path: &Path, data: &[u8], force: bool) -> Result<(), HuffError> {
    if path.exists() && !force {
        return Err(HuffError::InvalidInput(format!(
            "output file {} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let (tmp, f_out) = create_partial(path)?;

    let result = (|| -> Result<(), HuffError> {
        let mut f_out = f_out;
        f_out.write_all(data)?;
        f_out.sync_all()?;
        drop(f_out);
        fs::rename(&tmp, path)?;
        Ok(())
    })();

    match result {
        Ok(()) => {
            debug!("Wrote {} bytes to {}.", data.len(), path.display());
            Ok(())
        }
        Err(e) => {
            if let Err(rm) = fs::remove_file(&tmp) {
                warn!("Could not remove {}: {}", tmp.display(), rm);
            }
            Err(e)
        }
    }
}

/// Create a fresh `<name>.partial` (or `<name>.partial.N`) next to `path`. Never opens a file
/// that already exists, so nothing the user owns is truncated or later removed.
fn create_partial(path: &Path) -> Result<(PathBuf, File), HuffError> {
    let base = path.file_name().unwrap_or_default().to_os_string();
    for attempt in 0..MAX_PARTIAL_ATTEMPTS {
        let mut name = base.clone();
        name.push(".partial");
        if attempt > 0 {
            name.push(format!(".{}", attempt));
        }
        let mut tmp = PathBuf::from(path);
        tmp.set_file_name(name);
        match OpenOptions::new().write(true).create_new(true).open(&tmp) {
            Ok(file) => return Ok((tmp, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                trace!("{} is taken, trying another name.", tmp.display());
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(HuffError::InvalidInput(format!(
        "could not find a free temporary name next to {}",
        path.display()
    )))
}

/// Reject writing the output over the input.
pub(crate) fn check_distinct(input: &str, output: &str) -> Result<(), HuffError> {
    let same = match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => input == output,
    };
    if same {
        return Err(HuffError::InvalidInput(format!(
            "input and output are the same file: {}",
            input
        )));
    }
    Ok(())
}
