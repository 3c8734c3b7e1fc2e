//! # Huffpress
//!
//! Static Huffman coding for byte streams.
//!
//! A run counts symbol frequencies, builds one prefix-code tree, encodes the
//! input by table lookup, packs the bits MSB-first into bytes, and decodes
//! by walking the same tree. The packed output is raw: no header, no tree,
//! no length. The tree and the bit length stay in memory for the run.
//!
//! ## Components
//!
//! - [`FrequencyTable`] - exact per-byte counts
//! - [`HuffmanTree`] - greedy minimum-weight merge with a deterministic tie-break
//! - [`CodeTable`] - symbol to bit-string mapping derived from the tree
//! - [`BitWriter`] / [`BitReader`] - MSB-first packing and unpacking
//! - [`TreeDecoder`] - bit-by-bit tree walk
//! - [`HuffmanCodec`] - owns the tree and drives encode/decode
//! - [`Pipeline`] - file-to-file run with atomic writes
//!
//! ## Example
//!
//! ```
//! use huffpress::{DecodeMode, HuffmanCodec};
//!
//! let data = b"abracadabra";
//! let codec = HuffmanCodec::from_input(data)?;
//! let stream = codec.encode(data)?;
//! assert_eq!(stream.bytes.len(), stream.bit_len.div_ceil(8));
//!
//! let decoded = codec.decode(&stream, DecodeMode::Exact)?;
//! assert_eq!(decoded, data);
//! # Ok::<(), huffpress::Error>(())
//! ```

pub mod bits;
pub mod code;
pub mod codec;
pub mod config;
pub mod decoder;
pub mod frequency;
pub mod pipeline;
pub mod tree;

// Re-export main types
pub use bits::{pack, unpack, BitReader, BitWriter, PackedBits};
pub use code::{Code, CodeEntry, CodeTable};
pub use codec::{EncodedStream, HuffmanCodec};
pub use config::PipelineConfig;
pub use decoder::{DecodeMode, TreeDecoder};
pub use frequency::FrequencyTable;
pub use pipeline::{Pipeline, PipelinePaths, PipelineReport};
pub use tree::{HuffmanTree, Node};

pub use huffpress_core::{Error, Result};
