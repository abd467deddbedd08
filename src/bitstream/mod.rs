//! The bitstream module forms the I/O subsystem for huffpack.
//!
//! Huffman codes rarely land on byte boundaries, so the payload is assembled a bit at a time
//! and packed most significant bit first. The same reader is used to parse the container
//! header (whole bytes and big-endian words) and to walk the payload bits during decoding.
//!
//! This I/O subsystem is designed to efficiently interface with the other modules within huffpack.
//! It is not intended for more general use.
//!
pub mod bitreader;
pub mod bitwriter;
