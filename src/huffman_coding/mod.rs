//! The huffman_coding module turns symbol frequencies into a prefix-free code and back.
//!
//! - tree: builds the merge tree by repeatedly combining the two lightest nodes.
//! - code_table: walks the tree to give every byte its code (0 going left, 1 going right).
//! - decode_tree: rebuilds a trie from a stored code table so the payload can be decoded
//!   one bit at a time.
//!
//! A single code table is used for the whole input. The tree itself is never stored; only the
//! codes are written into the container.
//!
//! The process of encoding and decoding is inherently sequential and does not benefit from multithreading.
//!

pub mod code_table;
pub mod decode_tree;
pub mod tree;
