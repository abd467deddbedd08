//! Decode side of the huffman coding.
//!
//! The code table read from a container is turned back into a binary trie so that each payload
//! bit costs a single child lookup, instead of comparing a growing candidate code against every
//! table entry.
//!

use log::{debug, trace};

use super::code_table::CodeTable;
use crate::bitstream::bitreader::BitReader;
use crate::error::HuffError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeNode {
    /// Children for a 0 bit and a 1 bit. A child is missing when no code takes that path.
    Branch([Option<usize>; 2]),
    Leaf(u8),
}

/// Binary trie rebuilt from a code table.
#[derive(Debug, Clone)]
pub struct DecodeTree {
    nodes: Vec<DecodeNode>,
}

const ROOT: usize = 0;

impl DecodeTree {
    /// Rebuild the trie. Fails if the table is not prefix free.
    pub fn from_table(table: &CodeTable) -> Result<Self, HuffError> {
        let mut nodes = vec![DecodeNode::Branch([None, None])];

        for (symbol, code) in table.entries() {
            let mut current = ROOT;
            let last = code.len() - 1;
            for (depth, &bit) in code.bits().iter().enumerate() {
                let kids = match nodes[current] {
                    DecodeNode::Branch(kids) => kids,
                    DecodeNode::Leaf(other) => {
                        return Err(HuffError::CorruptContainer(format!(
                            "code for symbol {} is prefixed by the code for symbol {}",
                            symbol, other
                        )))
                    }
                };
                let slot = bit as usize;
                match (kids[slot], depth == last) {
                    (Some(next), false) => current = next,
                    (Some(_), true) => {
                        return Err(HuffError::CorruptContainer(format!(
                            "code {} for symbol {} collides with another code",
                            code, symbol
                        )))
                    }
                    (None, at_end) => {
                        let next = nodes.len();
                        nodes.push(if at_end {
                            DecodeNode::Leaf(symbol)
                        } else {
                            DecodeNode::Branch([None, None])
                        });
                        if let DecodeNode::Branch(ref mut kids) = nodes[current] {
                            kids[slot] = Some(next);
                        }
                        current = next;
                    }
                }
            }
        }
        debug!("Rebuilt decode tree with {} nodes.", nodes.len());
        Ok(Self { nodes })
    }

    /// Decode exactly `bit_len` bits from the reader into symbols.
    pub fn decode(&self, br: &mut BitReader<'_>, bit_len: u64) -> Result<Vec<u8>, HuffError> {
        let mut out = Vec::with_capacity((bit_len / 2) as usize);
        let mut current = ROOT;
        for consumed in 0..bit_len {
            let bit = br.bit().ok_or_else(|| {
                HuffError::CorruptContainer(format!(
                    "payload ends after {} of {} bits",
                    consumed, bit_len
                ))
            })?;
            let next = match self.nodes[current] {
                DecodeNode::Branch(kids) => kids[bit],
                // Leaves are never left as the current node.
                DecodeNode::Leaf(_) => None,
            };
            let next = next.ok_or_else(|| {
                HuffError::CorruptContainer(format!(
                    "bit {} at {} does not continue any code",
                    consumed,
                    br.loc()
                ))
            })?;
            match self.nodes[next] {
                DecodeNode::Leaf(symbol) => {
                    out.push(symbol);
                    current = ROOT;
                }
                DecodeNode::Branch(_) => current = next,
            }
        }
        if current != ROOT {
            return Err(HuffError::CorruptContainer(
                "payload ends in the middle of a code".to_string(),
            ));
        }
        trace!("Decoded {} symbols from {} bits.", out.len(), bit_len);
        Ok(out)
    }
}
