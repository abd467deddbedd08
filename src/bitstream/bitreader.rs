//! BitReader: reads the packed bitstream of a huffpack container.
//!
//! The whole container is held in memory, so the reader simply walks a borrowed slice.
//! Every read returns None when the data runs out; the caller decides what that means.
//!

const BIT_MASK: u8 = 0xff;

/// Reads a packed bitstream, most significant bit first.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader over the buffer.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
        }
    }

    /// Return bit as Option<usize> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<usize> {
        let byte = *self.buffer.get(self.cursor)?;
        let bit = (byte & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Some(bit as usize)
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Return Option<u64> of the next n bits (n <= 64), or None if there is not enough data.
    /// Nothing is consumed when the read fails.
    pub fn bint(&mut self, n: usize) -> Option<u64> {
        debug_assert!(n <= 64);
        if self.remaining_bits() < n {
            return None;
        }
        let mut result = 0_u64;
        for _ in 0..n {
            result = result << 1 | self.bit()? as u64;
        }
        Some(result)
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to read.
    pub fn byte(&mut self) -> Option<u8> {
        if self.bit_index == 0 {
            let byte = *self.buffer.get(self.cursor)?;
            self.cursor += 1;
            Some(byte)
        } else {
            self.bint(8).map(|byte| byte as u8)
        }
    }

    /// Returns an Option<Vec<u8>> of n bytes, or None if there are fewer than n bytes left.
    pub fn bytes(&mut self, n: usize) -> Option<Vec<u8>> {
        if self.remaining_bits() < n * 8 {
            return None;
        }
        let mut result: Vec<u8> = Vec::with_capacity(n);
        for _ in 0..n {
            result.push(self.byte()?);
        }
        Some(result)
    }

    /// Big-endian u32.
    pub fn u32_be(&mut self) -> Option<u32> {
        self.bint(32).map(|v| v as u32)
    }

    /// Big-endian u64.
    pub fn u64_be(&mut self) -> Option<u64> {
        self.bint(64)
    }

    /// Bits left to read.
    pub fn remaining_bits(&self) -> usize {
        (self.buffer.len().saturating_sub(self.cursor)) * 8 - self.bit_index
    }

    /// Whole bytes left to read from a byte-aligned position.
    pub fn remaining_bytes(&self) -> usize {
        self.buffer.len().saturating_sub(self.cursor)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}
