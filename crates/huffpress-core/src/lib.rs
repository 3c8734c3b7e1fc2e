//! # Huffpress Core
//!
//! Core traits, error and statistics types shared by the huffpress codecs.
//!
//! ## Core Traits
//!
//! - [`Compressor`] - One-shot compression operations
//! - [`Decompressor`] - One-shot decompression operations
//! - [`Codec`] - Combined compress/decompress capability
//!
//! ## Example
//!
//! ```ignore
//! use huffpress::HuffmanCodec;
//! use huffpress_core::{Codec, Compressor, Decompressor};
//!
//! let codec = HuffmanCodec::from_input(data)?;
//! let compressed = codec.compress(data)?;
//! let original = codec.decompress_with_size(&compressed, data.len())?;
//! ```

pub mod error;
pub mod stats;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use stats::{CompressionStats, Metrics};
pub use traits::{Codec, Compressor, Decompressor};
pub use types::CompressionRatio;
