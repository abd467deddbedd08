use std::fmt::{Display, Formatter};

use log::debug;
use rustc_hash::FxHashMap;

use super::tree::{CodeTree, NodeData, NodeId};
use crate::error::HuffError;
use crate::tools::freq_count::FrequencyTable;

/// Longest code the container can describe (the length is stored in one byte).
pub const MAX_CODE_LEN: usize = 255;

/// A non-empty Huffman code. `false` is a 0 bit, `true` is a 1 bit, first bit first.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    /// Wrap a bit sequence, rejecting empty codes and codes longer than MAX_CODE_LEN.
    pub fn new(bits: Vec<bool>) -> Result<Self, HuffError> {
        if bits.is_empty() {
            return Err(HuffError::InvalidInput("empty huffman code".to_string()));
        }
        if bits.len() > MAX_CODE_LEN {
            return Err(HuffError::InvalidInput(format!(
                "huffman code of {} bits exceeds the {} bit limit",
                bits.len(),
                MAX_CODE_LEN
            )));
        }
        Ok(Self { bits })
    }

    /// Parse a code written as ASCII '0' / '1' characters.
    pub fn from_ascii(text: &[u8]) -> Result<Self, HuffError> {
        let bits = text
            .iter()
            .map(|&c| match c {
                b'0' => Ok(false),
                b'1' => Ok(true),
                other => Err(HuffError::CorruptContainer(format!(
                    "invalid code character 0x{:02x}",
                    other
                ))),
            })
            .collect::<Result<Vec<bool>, HuffError>>()?;
        Self::new(bits)
    }

    /// The code as ASCII '0' / '1' characters.
    pub fn to_ascii(&self) -> Vec<u8> {
        self.bits.iter().map(|&b| if b { b'1' } else { b'0' }).collect()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false; kept for API symmetry with len().
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// True if self is a prefix of (or equal to) other.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for &bit in &self.bits {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Mapping from input byte to its Huffman code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: FxHashMap<u8, Code>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the tree depth first, appending 0 going left and 1 going right, and record the
    /// path to every leaf. A tree that is a single leaf gets the one bit code 0.
    pub fn from_tree(tree: &CodeTree) -> Result<Self, HuffError> {
        let mut table = CodeTable::new();
        let root = tree.node(tree.root());
        if let NodeData::Leaf(symbol) = root.node_data {
            table.insert(symbol, Code::new(vec![false])?);
            debug!("Single symbol alphabet, assigned code 0 to {}.", symbol);
            return Ok(table);
        }

        // Explicit stack so deep (skewed) trees cannot overflow the call stack.
        let mut stack: Vec<(NodeId, Vec<bool>)> = vec![(tree.root(), Vec::new())];
        while let Some((id, path)) = stack.pop() {
            match tree.node(id).node_data {
                NodeData::Kids(left, right) => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((right, right_path));
                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((left, left_path));
                }
                NodeData::Leaf(symbol) => {
                    table.insert(symbol, Code::new(path)?);
                }
            }
        }
        debug!("Generated {} huffman codes.", table.len());
        Ok(table)
    }

    /// Add (or replace) a code. Returns the previous code for the symbol, if any.
    pub fn insert(&mut self, symbol: u8, code: Code) -> Option<Code> {
        self.codes.insert(symbol, code)
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// All entries in ascending symbol order.
    pub fn entries(&self) -> Vec<(u8, &Code)> {
        let mut entries: Vec<(u8, &Code)> = self.codes.iter().map(|(&s, c)| (s, c)).collect();
        entries.sort_unstable_by_key(|&(s, _)| s);
        entries
    }

    /// Check that no code is a prefix of another. Sorting the codes puts any prefix directly
    /// in front of a code it prefixes, so only neighbours need comparing.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&Code> = self.codes.values().collect();
        codes.sort_unstable();
        codes.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    /// Number of payload bits needed to encode data with these frequencies.
    pub fn encoded_bit_len(&self, freqs: &FrequencyTable) -> Result<u64, HuffError> {
        freqs.iter().try_fold(0_u64, |acc, (symbol, count)| {
            let code = self.get(symbol).ok_or_else(|| {
                HuffError::InvalidInput(format!("no huffman code for symbol {}", symbol))
            })?;
            Ok(acc + count * code.len() as u64)
        })
    }
}
