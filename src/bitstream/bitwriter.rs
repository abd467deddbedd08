use log::error;

/// Creates a packed bitstream for output. Bits are written most significant bit first.
/// Call flush() to push any partial byte to the output before using the buffer.
pub struct BitWriter {
    /// Output buffer holding the packed bytes.
    pub output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
    /// Count of bits written so far, not counting flush padding.
    bits_written: u64,
}

impl BitWriter {
    /// Create a new BitWriter with an output buffer of the capacity specified.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
            bits_written: 0,
        }
    }

    /// Internal bitstream write function common to all out.XX functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Put a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.queue = (self.queue << 1) | bit as u64;
        self.q_bits += 1;
        self.bits_written += 1;
        self.write_stream();
    }

    /// Put every bit of a code on the stream, first bit first.
    pub fn out_code(&mut self, bits: &[bool]) {
        bits.iter().for_each(|&bit| self.out_bit(bit));
    }

    /// Put a byte on the stream.
    pub fn out8(&mut self, data: u8) {
        self.queue <<= 8; //shift queue by one byte
        self.queue |= data as u64; //add the byte to queue
        self.q_bits += 8; //update depth of queue bits
        self.bits_written += 8;
        self.write_stream();
    }

    /// Puts a 32 bit word on the stream, big end first.
    pub fn out32(&mut self, data: u32) {
        self.queue <<= 32;
        self.queue |= data as u64;
        self.q_bits += 32;
        self.bits_written += 32;
        self.write_stream();
    }

    /// Puts a 64 bit word on the stream, big end first.
    pub fn out64(&mut self, data: u64) {
        self.out32((data >> 32) as u32);
        self.out32(data as u32);
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits. Returns the number of padding bits added.
    pub fn flush(&mut self) -> u8 {
        let mut padding = 0;
        if self.q_bits > 0 {
            padding = 8 - self.q_bits;
            self.queue <<= padding; //pad the queue with zeros
            self.q_bits += padding;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitWriter queue.");
            }
        }
        padding
    }

    /// Number of bits written, excluding any flush padding.
    pub fn bit_len(&self) -> u64 {
        self.bits_written
    }

    /// Consume the writer, flushing first, and return the packed bytes.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.flush();
        self.output
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        let bits = (self.output.len() * 8) + self.q_bits as usize;
        format!("[{}.{}]", bits / 8, bits % 8)
    }
}
