//! Huffman codec: owns one tree and its code table for a whole run.
//!
//! The tree is derived from the input's own frequencies and is never written
//! to the output. Encoding and decoding must therefore go through the same
//! [`HuffmanCodec`] instance (or one rebuilt from identical input).

use std::time::Instant;

use huffpress_core::{Codec, CompressionStats, Compressor, Decompressor, Error, Result};
use tracing::{debug, warn};

use crate::bits::{BitReader, PackedBits};
use crate::code::CodeTable;
use crate::decoder::{DecodeMode, TreeDecoder};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

/// Codec name reported through the core traits.
const NAME: &str = "huffman";

/// Packed output of one encode plus the lengths the raw bytes cannot carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedStream {
    /// Packed code bits, MSB first, zero-padded.
    pub bytes: Vec<u8>,
    /// Number of meaningful bits in `bytes`.
    pub bit_len: usize,
    /// Number of symbols encoded.
    pub symbol_count: usize,
}

impl EncodedStream {
    fn from_packed(packed: PackedBits, symbol_count: usize) -> Self {
        Self {
            bytes: packed.bytes,
            bit_len: packed.bit_len,
            symbol_count,
        }
    }

    /// Number of padding bits in the final byte.
    pub fn padding(&self) -> usize {
        self.bytes.len() * 8 - self.bit_len
    }
}

/// Static Huffman codec built from one input's frequencies.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    frequencies: FrequencyTable,
    tree: HuffmanTree,
    table: CodeTable,
}

impl HuffmanCodec {
    /// Count `data` and build its tree and code table.
    pub fn from_input(data: &[u8]) -> Result<Self> {
        Self::from_frequencies(FrequencyTable::from_bytes(data))
    }

    /// Build from an existing frequency table.
    pub fn from_frequencies(frequencies: FrequencyTable) -> Result<Self> {
        let tree = HuffmanTree::build(&frequencies)?;
        let table = CodeTable::from_tree(&tree);
        Ok(Self {
            frequencies,
            tree,
            table,
        })
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    /// Decoder borrowing this codec's tree.
    pub fn decoder(&self) -> TreeDecoder<'_> {
        TreeDecoder::new(&self.tree)
    }

    /// Encode `data` symbol by symbol and pack the bits.
    pub fn encode(&self, data: &[u8]) -> Result<EncodedStream> {
        let packed = self.table.encode(data)?;
        debug!(
            symbols = data.len(),
            bits = packed.bit_len,
            bytes = packed.bytes.len(),
            "encoded input"
        );
        Ok(EncodedStream::from_packed(packed, data.len()))
    }

    /// Decode a stream produced by [`HuffmanCodec::encode`].
    ///
    /// `Exact` decodes `bit_len` bits and checks the symbol count;
    /// `Tolerant` decodes every byte as the raw file format would.
    pub fn decode(&self, stream: &EncodedStream, mode: DecodeMode) -> Result<Vec<u8>> {
        match mode {
            DecodeMode::Exact => {
                let output = self.decoder().decode_exact(&stream.bytes, stream.bit_len)?;
                if output.len() != stream.symbol_count {
                    return Err(Error::corrupted(format!(
                        "expected {} symbols, decoded {}",
                        stream.symbol_count,
                        output.len()
                    )));
                }
                Ok(output)
            }
            DecodeMode::Tolerant => {
                let output = self.decode_packed(&stream.bytes)?;
                if output.len() != stream.symbol_count {
                    warn!(
                        expected = stream.symbol_count,
                        decoded = output.len(),
                        "padding decoded to extra symbols"
                    );
                }
                Ok(output)
            }
        }
    }

    /// Decode raw packed bytes with no length information.
    pub fn decode_packed(&self, packed: &[u8]) -> Result<Vec<u8>> {
        self.decoder().decode(BitReader::new(packed))
    }

    /// Statistics for an encode of `data` that took `elapsed_us`.
    pub fn stats_for(
        &self,
        data: &[u8],
        stream: &EncodedStream,
        elapsed_us: u64,
    ) -> CompressionStats {
        CompressionStats {
            distinct_symbols: self.table.len(),
            max_code_len: self.table.max_code_len(),
            ..CompressionStats::from_operation(
                data.len(),
                stream.bytes.len(),
                stream.bit_len,
                elapsed_us,
            )
        }
    }
}

impl Compressor for HuffmanCodec {
    fn name(&self) -> &'static str {
        NAME
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(self.encode(input)?.bytes)
    }

    fn max_compressed_size(&self, input_len: usize) -> usize {
        (input_len * self.table.max_code_len()).div_ceil(8)
    }

    fn stats(&self, input: &[u8]) -> Option<CompressionStats> {
        let start = Instant::now();
        let stream = self.encode(input).ok()?;
        let elapsed = start.elapsed().as_micros() as u64;
        Some(self.stats_for(input, &stream, elapsed))
    }
}

impl Decompressor for HuffmanCodec {
    fn name(&self) -> &'static str {
        NAME
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.decode_packed(input)
    }

    fn decompress_with_size(&self, input: &[u8], output_size: usize) -> Result<Vec<u8>> {
        self.decoder().decode_symbols(input, output_size)
    }
}

impl Codec for HuffmanCodec {}
