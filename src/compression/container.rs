//! On-disk layout of a huffpack file.
//!
//! All integers are big-endian.
//!
//! ```text
//! [entry_count: u32]                    0..=256
//! entry_count times:
//!   [symbol: u8]
//!   [code_length: u8]                   1..=255
//!   [code: code_length bytes of ASCII '0' / '1']
//! [delimiter: u8]                       b'\n'
//! [payload_bit_length: u64]             exact, without padding
//! [payload: ceil(payload_bit_length / 8) bytes, most significant bit first]
//! ```
//!
//! The payload is zero padded only up to the next byte boundary, so its size is fully
//! determined by the stored bit length. Anything shorter or longer is rejected.
//!

use log::{debug, trace};

use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::HuffError;
use crate::huffman_coding::code_table::{Code, CodeTable};

/// Marks the end of the code table.
pub const DELIMITER: u8 = b'\n';
/// One code per possible byte value.
pub const MAX_ENTRIES: u32 = 256;

/// A code table plus the payload encoded with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub table: CodeTable,
    /// Exact number of meaningful payload bits.
    pub bit_len: u64,
    /// Packed payload, zero padded to a whole byte.
    pub payload: Vec<u8>,
}

/// Number of bytes needed to hold `bit_len` bits.
pub fn payload_bytes(bit_len: u64) -> u64 {
    bit_len / 8 + (bit_len % 8 != 0) as u64
}

impl Container {
    /// Serialize the container.
    pub fn to_bytes(&self) -> Vec<u8> {
        let entries = self.table.entries();
        let table_size: usize = entries.iter().map(|(_, c)| c.len() + 2).sum();
        let mut bw = BitWriter::new(4 + table_size + 1 + 8 + self.payload.len());

        bw.out32(entries.len() as u32);
        for (symbol, code) in entries {
            bw.out8(symbol);
            bw.out8(code.len() as u8);
            code.to_ascii().iter().for_each(|&c| bw.out8(c));
        }
        bw.out8(DELIMITER);
        bw.out64(self.bit_len);
        trace!("Code table ends at {}.", bw.loc());

        // Everything so far is whole bytes, so the payload can be appended directly.
        let mut out = bw.into_bytes();
        out.extend_from_slice(&self.payload);
        debug!(
            "Serialized container: {} table bytes, {} payload bytes.",
            table_size,
            self.payload.len()
        );
        out
    }

    /// Parse and structurally validate a container.
    pub fn from_bytes(data: &[u8]) -> Result<Self, HuffError> {
        let mut br = BitReader::new(data);

        let count = br.u32_be().ok_or_else(|| HuffError::truncated("entry count"))?;
        if count > MAX_ENTRIES {
            return Err(HuffError::CorruptContainer(format!(
                "entry count {} exceeds {}",
                count, MAX_ENTRIES
            )));
        }

        let mut table = CodeTable::new();
        for entry in 0..count {
            let symbol = br.byte().ok_or_else(|| HuffError::truncated("code table"))?;
            let len = br.byte().ok_or_else(|| HuffError::truncated("code table"))?;
            if len == 0 {
                return Err(HuffError::CorruptContainer(format!(
                    "entry {} (symbol {}) has an empty code",
                    entry, symbol
                )));
            }
            let text = br
                .bytes(len as usize)
                .ok_or_else(|| HuffError::truncated("code table"))?;
            let code = Code::from_ascii(&text)?;
            trace!("Read code {} for symbol {}.", code, symbol);
            if table.insert(symbol, code).is_some() {
                return Err(HuffError::CorruptContainer(format!(
                    "symbol {} appears twice in the code table",
                    symbol
                )));
            }
        }

        let delimiter = br.byte().ok_or_else(|| HuffError::truncated("delimiter"))?;
        if delimiter != DELIMITER {
            return Err(HuffError::CorruptContainer(format!(
                "expected delimiter 0x{:02x} at {}, found 0x{:02x}",
                DELIMITER,
                br.loc(),
                delimiter
            )));
        }

        let bit_len = br
            .u64_be()
            .ok_or_else(|| HuffError::truncated("payload length"))?;
        let expected = payload_bytes(bit_len);
        let remaining = br.remaining_bytes() as u64;
        if remaining < expected {
            return Err(HuffError::CorruptContainer(format!(
                "payload truncated: {} bytes present, {} needed for {} bits",
                remaining, expected, bit_len
            )));
        }
        if remaining > expected {
            return Err(HuffError::CorruptContainer(format!(
                "{} unexpected bytes after the payload",
                remaining - expected
            )));
        }
        if bit_len > 0 && table.is_empty() {
            return Err(HuffError::CorruptContainer(
                "payload present but the code table is empty".to_string(),
            ));
        }
        let payload = br
            .bytes(expected as usize)
            .ok_or_else(|| HuffError::truncated("payload"))?;

        debug!(
            "Parsed container: {} codes, {} payload bits.",
            table.len(),
            bit_len
        );
        Ok(Self {
            table,
            bit_len,
            payload,
        })
    }
}
