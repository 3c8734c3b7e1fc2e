//! Code table generation.
//!
//! Codes are read off the tree depth-first: `0` for a left edge, `1` for a
//! right edge. A one-leaf tree has an empty root path, which cannot encode
//! anything, so its single symbol is assigned the code `0` instead.

use std::fmt;

use huffpress_core::{Error, Result};
use serde::Serialize;
use smallvec::SmallVec;
use tracing::debug;

use crate::bits::{BitWriter, PackedBits};
use crate::frequency::{FrequencyTable, MAX_SYMBOLS};
use crate::tree::{HuffmanTree, Node};

/// Inline capacity for code bits; longer codes spill to the heap.
const INLINE_CODE_BITS: usize = 24;

/// A prefix code: an ordered sequence of bits, first bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: SmallVec<[bool; INLINE_CODE_BITS]>,
}

impl Code {
    /// Build a code from its bits.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        Self {
            bits: bits.into_iter().collect(),
        }
    }

    /// Code length in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits in transmission order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from symbol to code, one entry per tree leaf.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
    len: usize,
    max_len: usize,
}

impl CodeTable {
    /// Derive the code table from a tree.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; MAX_SYMBOLS];

        match tree.root() {
            Node::Leaf { symbol, .. } => {
                codes[*symbol as usize] = Some(Code::from_bits([false]));
            }
            root => {
                let mut path = SmallVec::<[bool; INLINE_CODE_BITS]>::new();
                assign(root, &mut path, &mut codes);
            }
        }

        let len = codes.iter().flatten().count();
        let max_len = codes.iter().flatten().map(Code::len).max().unwrap_or(0);
        debug!(symbols = len, max_len, "generated code table");

        Self {
            codes,
            len,
            max_len,
        }
    }

    /// Code for `symbol`, if the tree has a leaf for it.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u8, c)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Longest code length in bits.
    pub fn max_code_len(&self) -> usize {
        self.max_len
    }

    /// Exact encoded length in bits for an input with these frequencies.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> Result<usize> {
        frequencies.iter().try_fold(0usize, |total, (symbol, count)| {
            let code = self.get(symbol).ok_or(Error::UnknownSymbol { symbol })?;
            Ok(total + code.len() * count as usize)
        })
    }

    /// Encode `data` by table lookup into `writer`.
    pub fn encode_into(&self, data: &[u8], writer: &mut BitWriter) -> Result<()> {
        for &symbol in data {
            let code = self.get(symbol).ok_or(Error::UnknownSymbol { symbol })?;
            writer.write_code(code);
        }
        Ok(())
    }

    /// Encode `data` and pack the resulting bits.
    pub fn encode(&self, data: &[u8]) -> Result<PackedBits> {
        let mut writer = BitWriter::with_bit_capacity(data.len() * self.max_len.max(1));
        self.encode_into(data, &mut writer)?;
        Ok(writer.finish())
    }

    /// Serializable view of the table for diagnostic reports.
    pub fn entries(&self) -> Vec<CodeEntry> {
        self.iter()
            .map(|(symbol, code)| CodeEntry {
                symbol,
                display: display_symbol(symbol),
                code: code.to_string(),
            })
            .collect()
    }
}

fn assign(
    node: &Node,
    path: &mut SmallVec<[bool; INLINE_CODE_BITS]>,
    codes: &mut [Option<Code>],
) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes[*symbol as usize] = Some(Code { bits: path.clone() });
        }
        Node::Internal { left, right, .. } => {
            path.push(false);
            assign(left, path, codes);
            path.pop();

            path.push(true);
            assign(right, path, codes);
            path.pop();
        }
    }
}

/// One line of the diagnostic code listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeEntry {
    /// Raw symbol value.
    pub symbol: u8,
    /// Printable form of the symbol.
    pub display: String,
    /// Code as a string of `0`/`1`.
    pub code: String,
}

/// Printable rendering of a byte: graphic ASCII as-is, everything else escaped.
pub fn display_symbol(symbol: u8) -> String {
    match symbol {
        b' ' => "' '".to_string(),
        s if s.is_ascii_graphic() => (s as char).to_string(),
        s => std::ascii::escape_default(s).to_string(),
    }
}

impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self.iter() {
            writeln!(f, "{} {}", display_symbol(symbol), code)?;
        }
        Ok(())
    }
}
