use std::path::Path;

use log::{error, info};

use super::container::Container;
use super::{check_distinct, write_output, Report};
use crate::bitstream::bitreader::BitReader;
use crate::error::HuffError;
use crate::huffman_coding::decode_tree::DecodeTree;
use crate::tools::cli::HuffOpts;

/// Decode the payload of a parsed container.
pub fn decode(container: &Container) -> Result<Vec<u8>, HuffError> {
    let tree = DecodeTree::from_table(&container.table)?;
    let mut br = BitReader::new(&container.payload);
    tree.decode(&mut br, container.bit_len)
}

/// Restore the original bytes from a complete container.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>, HuffError> {
    decode(&Container::from_bytes(data)?)
}

/// Read and decode the file named in opts. Returns the input size, the container and the decoded bytes.
fn read_and_decode(opts: &HuffOpts) -> Result<(u64, Container, Vec<u8>), HuffError> {
    let data = std::fs::read(&opts.file)?;
    info!("Read {} bytes from {}.", data.len(), opts.file);
    let container = Container::from_bytes(&data).map_err(|e| {
        error!("Fatal error: {} is not a valid huffpack file.", opts.file);
        e
    })?;
    let decoded = decode(&container)?;
    Ok((data.len() as u64, container, decoded))
}

/// Decompress the file specified in opts (HuffOpts).
pub fn decompress(opts: &HuffOpts) -> Result<Report, HuffError> {
    let out_name = opts
        .output_path()
        .ok_or_else(|| HuffError::InvalidInput("decompression needs an output file".to_string()))?;
    check_distinct(&opts.file, &out_name)?;

    let (bytes_in, container, decoded) = read_and_decode(opts)?;
    write_output(Path::new(&out_name), &decoded, opts.force_overwrite)?;
    info!("Wrote {} bytes to {}.", decoded.len(), out_name);

    Ok(Report {
        bytes_in,
        bytes_out: decoded.len() as u64,
        symbols: container.table.len(),
        payload_bits: container.bit_len,
    })
}

/// Check that the file specified in opts decodes cleanly, without writing anything.
pub fn test_file(opts: &HuffOpts) -> Result<Report, HuffError> {
    let (bytes_in, container, decoded) = read_and_decode(opts)?;
    info!("{}: ok, {} bytes decoded.", opts.file, decoded.len());
    Ok(Report {
        bytes_in,
        bytes_out: decoded.len() as u64,
        symbols: container.table.len(),
        payload_bits: container.bit_len,
    })
}
