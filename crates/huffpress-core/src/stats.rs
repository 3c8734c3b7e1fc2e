//! Statistics and metrics for encode/decode runs.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::CompressionRatio;

/// Statistics from one encode (and optional decode) operation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompressionStats {
    /// Original (uncompressed) size in bytes.
    pub original_size: usize,

    /// Compressed size in bytes, padding included.
    pub compressed_size: usize,

    /// Number of meaningful bits in the compressed output.
    pub encoded_bits: usize,

    /// Number of distinct symbols in the input alphabet.
    pub distinct_symbols: usize,

    /// Longest code length in bits.
    pub max_code_len: usize,

    /// Time taken in microseconds.
    pub time_us: u64,
}

impl CompressionStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create stats from a completed encode.
    pub fn from_operation(
        original_size: usize,
        compressed_size: usize,
        encoded_bits: usize,
        time_us: u64,
    ) -> Self {
        CompressionStats {
            original_size,
            compressed_size,
            encoded_bits,
            time_us,
            ..Default::default()
        }
    }

    /// Get compression ratio.
    pub fn ratio(&self) -> CompressionRatio {
        CompressionRatio::new(self.original_size, self.compressed_size)
    }

    /// Average code length over the input, in bits per symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.encoded_bits as f64 / self.original_size as f64
    }

    /// Number of zero bits appended to fill the last byte.
    pub fn padding_bits(&self) -> usize {
        (self.compressed_size * 8).saturating_sub(self.encoded_bits)
    }

    /// Get throughput in bytes per second.
    pub fn throughput_bps(&self) -> f64 {
        if self.time_us == 0 {
            return 0.0;
        }
        self.original_size as f64 * 1_000_000.0 / self.time_us as f64
    }

    /// Get throughput in MB/s.
    pub fn throughput_mbs(&self) -> f64 {
        self.throughput_bps() / 1_000_000.0
    }

    /// Get space savings as percentage.
    pub fn savings_percent(&self) -> f64 {
        self.ratio().savings_percent()
    }
}

/// Metrics collector for aggregate statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Metrics {
    /// Total operations performed.
    pub total_operations: u64,

    /// Total bytes encoded.
    pub total_bytes_in: u64,

    /// Total bytes produced.
    pub total_bytes_out: u64,

    /// Total time spent in microseconds.
    pub total_time_us: u64,

    /// Number of errors encountered.
    pub error_count: u64,

    /// Error counts keyed by [`Error::category`](crate::Error::category).
    pub errors_by_category: BTreeMap<&'static str, u64>,
}

impl Metrics {
    /// Create new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed operation.
    pub fn record(&mut self, stats: &CompressionStats) {
        self.total_operations += 1;
        self.total_bytes_in += stats.original_size as u64;
        self.total_bytes_out += stats.compressed_size as u64;
        self.total_time_us += stats.time_us;
    }

    /// Record a failed operation under its error category.
    pub fn record_error(&mut self, error: &crate::Error) {
        self.error_count += 1;
        *self.errors_by_category.entry(error.category()).or_insert(0) += 1;
    }

    /// Get average compression ratio.
    pub fn average_ratio(&self) -> f64 {
        if self.total_bytes_out == 0 {
            return 1.0;
        }
        self.total_bytes_in as f64 / self.total_bytes_out as f64
    }

    /// Get error rate (0.0 to 1.0).
    pub fn error_rate(&self) -> f64 {
        let attempts = self.total_operations + self.error_count;
        if attempts == 0 {
            return 0.0;
        }
        self.error_count as f64 / attempts as f64
    }

    /// Reset all metrics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Get metrics summary as string.
    pub fn summary(&self) -> String {
        format!(
            "Operations: {}, Bytes: {} -> {} (ratio: {:.2}x), Errors: {}",
            self.total_operations,
            self.total_bytes_in,
            self.total_bytes_out,
            self.average_ratio(),
            self.error_count,
        )
    }
}
