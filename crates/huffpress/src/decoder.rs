//! Tree-driven decoding.
//!
//! The decoder keeps a cursor at the root, follows the left child on a `0`
//! bit and the right child on a `1` bit, and emits a symbol whenever it
//! lands on a leaf, returning to the root afterwards.
//!
//! Packed buffers carry no bit length, so the final byte may hold up to seven
//! padding bits. Three entry points handle that differently:
//!
//! - [`TreeDecoder::decode`] reads every bit and silently drops a partial
//!   path left at the end. Padding that happens to spell a complete code
//!   still decodes to extra symbols; the raw format cannot tell them apart.
//!   A one-symbol tree has code `0`, so every padding bit of its stream
//!   decodes to one more copy of the symbol: `"aaaa"` packs to one byte and
//!   reads back as `"aaaaaaaa"`.
//! - [`TreeDecoder::decode_exact`] reads only `bit_len` bits and rejects a
//!   partial path.
//! - [`TreeDecoder::decode_symbols`] stops after a known symbol count.

use huffpress_core::{Error, Result};
use serde::Deserialize;
use tracing::{trace, warn};

use crate::bits::BitReader;
use crate::tree::{HuffmanTree, Node};

/// How trailing bits of a packed buffer are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Decode exactly the recorded bit length.
    #[default]
    Exact,
    /// Decode every bit and drop an incomplete trailing path.
    Tolerant,
}

/// Decoder bound to one tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeDecoder<'t> {
    tree: &'t HuffmanTree,
}

impl<'t> TreeDecoder<'t> {
    pub fn new(tree: &'t HuffmanTree) -> Self {
        Self { tree }
    }

    /// Decode a bit sequence, tolerating an incomplete path at the end.
    pub fn decode<I>(&self, bits: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = bool>,
    {
        let bits = bits.into_iter();
        let mut output = Vec::with_capacity(bits.size_hint().0 / 2);
        let dangling = self.walk(bits, usize::MAX, &mut output)?;
        if dangling > 0 {
            warn!(dangling, "discarding incomplete code at end of input");
        }
        trace!(symbols = output.len(), "tolerant decode finished");
        Ok(output)
    }

    /// Decode the first `bit_len` bits of a packed buffer.
    ///
    /// Fails if the bits end partway down the tree.
    pub fn decode_exact(&self, packed: &[u8], bit_len: usize) -> Result<Vec<u8>> {
        let reader = BitReader::with_bit_len(packed, bit_len)?;
        let mut output = Vec::with_capacity(bit_len / 2);
        let dangling = self.walk(reader, usize::MAX, &mut output)?;
        if dangling > 0 {
            return Err(Error::corrupted_at("incomplete code", bit_len - dangling));
        }
        trace!(symbols = output.len(), bit_len, "exact decode finished");
        Ok(output)
    }

    /// Decode exactly `count` symbols from a packed buffer.
    ///
    /// Bits after the last symbol are ignored.
    pub fn decode_symbols(&self, packed: &[u8], count: usize) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(count);
        self.walk(BitReader::new(packed), count, &mut output)?;
        if output.len() < count {
            return Err(Error::unexpected_eof(packed.len()));
        }
        trace!(symbols = count, "counted decode finished");
        Ok(output)
    }

    /// Run the cursor over `bits`, pushing at most `limit` symbols.
    ///
    /// Returns the number of bits consumed into an unfinished path.
    fn walk<I>(&self, bits: I, limit: usize, output: &mut Vec<u8>) -> Result<usize>
    where
        I: Iterator<Item = bool>,
    {
        let root = self.tree.root();
        if limit == 0 {
            return Ok(0);
        }

        let mut current = root;
        let mut dangling = 0usize;

        for (offset, bit) in bits.enumerate() {
            let Some(next) = current.child(bit) else {
                // Only a one-symbol tree has a leaf root; its code is `0`.
                if bit {
                    return Err(Error::corrupted_at(
                        "unexpected 1 bit in single-symbol stream",
                        offset,
                    ));
                }
                output.extend(current.symbol());
                if output.len() == limit {
                    return Ok(0);
                }
                continue;
            };

            match next {
                Node::Leaf { symbol, .. } => {
                    output.push(*symbol);
                    current = root;
                    dangling = 0;
                    if output.len() == limit {
                        return Ok(0);
                    }
                }
                Node::Internal { .. } => {
                    current = next;
                    dangling += 1;
                }
            }
        }

        Ok(dangling)
    }
}
