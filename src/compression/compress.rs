use std::path::Path;

use log::{debug, info, trace};

use super::container::{payload_bytes, Container};
use super::{check_distinct, write_output, Report};
use crate::bitstream::bitwriter::BitWriter;
use crate::error::HuffError;
use crate::huffman_coding::code_table::{Code, CodeTable};
use crate::huffman_coding::tree::CodeTree;
use crate::tools::cli::HuffOpts;
use crate::tools::freq_count::FrequencyTable;

/// Build the code table for `data` and encode it. Empty input gives an empty container.
pub fn encode(data: &[u8]) -> Result<Container, HuffError> {
    let freqs = FrequencyTable::from_bytes(data);
    if freqs.is_empty() {
        debug!("Empty input, writing an empty container.");
        return Ok(Container {
            table: CodeTable::new(),
            bit_len: 0,
            payload: Vec::new(),
        });
    }

    let tree = CodeTree::build(&freqs)?;
    let table = CodeTable::from_tree(&tree)?;
    debug_assert!(table.is_prefix_free());

    let bit_len = table.encoded_bit_len(&freqs)?;
    info!(
        "{} symbols, {} input bytes encode to {} bits.",
        table.len(),
        data.len(),
        bit_len
    );

    // Direct lookup by byte value instead of hashing every input byte.
    let lookup: Vec<Option<&Code>> = (0..=255_u8).map(|s| table.get(s)).collect();
    let mut bw = BitWriter::new(payload_bytes(bit_len) as usize);
    for &byte in data {
        let code = lookup[byte as usize].ok_or_else(|| {
            HuffError::InvalidInput(format!("no huffman code for symbol {}", byte))
        })?;
        bw.out_code(code.bits());
    }
    debug_assert_eq!(bw.bit_len(), bit_len);
    trace!("Payload ends at {}.", bw.loc());

    Ok(Container {
        table,
        bit_len,
        payload: bw.into_bytes(),
    })
}

/// Compress a byte slice into a complete container.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>, HuffError> {
    Ok(encode(data)?.to_bytes())
}

/// Compress the input file defined in opts <HuffOpts>.
pub fn compress(opts: &HuffOpts) -> Result<Report, HuffError> {
    let out_name = opts
        .output_path()
        .ok_or_else(|| HuffError::InvalidInput("compression needs an output file".to_string()))?;
    check_distinct(&opts.file, &out_name)?;

    let data = std::fs::read(&opts.file)?;
    info!("Read {} bytes from {}.", data.len(), opts.file);

    let container = encode(&data)?;
    if opts.print_codes {
        print_codes(&container.table);
    }
    let bytes = container.to_bytes();
    write_output(Path::new(&out_name), &bytes, opts.force_overwrite)?;
    info!("Wrote {} bytes to {}.", bytes.len(), out_name);

    Ok(Report {
        bytes_in: data.len() as u64,
        bytes_out: bytes.len() as u64,
        symbols: container.table.len(),
        payload_bits: container.bit_len,
    })
}

/// Print the code table, one symbol per line.
pub fn print_codes(table: &CodeTable) {
    for (symbol, code) in table.entries() {
        let shown = if symbol.is_ascii_graphic() {
            format!("'{}'", symbol as char)
        } else {
            format!("0x{:02x}", symbol)
        };
        println!("{:>5} {}", shown, code);
    }
}

#[cfg(test)]
mod test {
    use super::{compress_bytes, encode};

    #[test]
    fn empty_input_test() {
        let container = encode(&[]).unwrap();
        assert!(container.table.is_empty());
        assert_eq!(container.bit_len, 0);
        assert!(container.payload.is_empty());
    }

    #[test]
    fn single_symbol_test() {
        let container = encode(&[b'a'; 1000]).unwrap();
        assert_eq!(container.table.len(), 1);
        assert_eq!(container.bit_len, 1000);
        assert_eq!(container.payload, vec![0; 125]);
    }

    #[test]
    fn abracadabra_payload_test() {
        // a=0 c=100 d=101 b=110 r=111
        let container = encode(b"abracadabra").unwrap();
        assert_eq!(container.bit_len, 23);
        // 0 110 111 0 100 0 101 0 110 111 0 -> 01101110 10001010 1101110(0)
        assert_eq!(container.payload, vec![0b0110_1110, 0b1000_1010, 0b1101_1100]);
    }

    #[test]
    fn skewed_input_shrinks_test() {
        let container = encode(b"aaaaaaaab").unwrap();
        assert!(container.bit_len < 8 * 9);
        assert_eq!(container.bit_len, 9);
    }

    #[test]
    fn deterministic_test() {
        let data = b"the quick brown fox jumps over the lazy dog".repeat(20);
        assert_eq!(compress_bytes(&data).unwrap(), compress_bytes(&data).unwrap());
    }
}
