//! Static Huffman file compressor.
//!
//! Version 0.1.0
//!
//! Derives a prefix-free code from the byte frequencies of an input file, stores the code
//! table together with the bit-packed data, and restores the original bytes exactly.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffpack test.txt`
//!
//! This will compress the file and create the file compressed.bin. Decompress it again with
//!
//! `$> huffpack -d compressed.bin`
//!
//! which writes decompressed.txt. Use `-o` to pick another output name.
//!
//! The library entry points work on byte slices:
//!
//! ```
//! let packed = huffpack::compress_bytes(b"abracadabra").unwrap();
//! assert_eq!(huffpack::decompress_bytes(&packed).unwrap(), b"abracadabra");
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::compress_bytes;
pub use compression::decompress::decompress_bytes;
pub use compression::Report;
pub use error::HuffError;
