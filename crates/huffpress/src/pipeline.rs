//! File-to-file encode/decode pipeline.
//!
//! One run reads an input file, encodes it to the raw packed format, reads
//! the encoded file back and decodes it with the same tree into a third
//! file. Output files are written to a temporary sibling, flushed, synced
//! and renamed into place, so a failed run never leaves a partial file at a
//! destination path.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use huffpress_core::{CompressionStats, Error, Metrics, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::codec::{EncodedStream, HuffmanCodec};
use crate::code::CodeEntry;
use crate::config::PipelineConfig;
use crate::decoder::DecodeMode;
use crate::frequency::FrequencyTable;

/// The three files a run touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    pub input: PathBuf,
    pub encoded: PathBuf,
    pub decoded: PathBuf,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Code listing in ascending symbol order.
    pub codes: Vec<CodeEntry>,
    /// Encode statistics.
    pub stats: CompressionStats,
    pub encoded_path: PathBuf,
    pub decoded_path: PathBuf,
    /// Number of bytes written to the decoded file.
    pub decoded_len: usize,
    /// Whether the decoded output matched the input byte for byte.
    pub verified: bool,
    /// Totals over every run of this pipeline, this one included.
    pub metrics: Metrics,
}

/// Encode/decode pipeline driven by a [`PipelineConfig`].
///
/// Every run, successful or not, is recorded in the pipeline's [`Metrics`].
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
    metrics: Metrics,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            metrics: Metrics::new(),
        }
    }

    /// Totals over the runs made so far.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Run the full pipeline over `paths`.
    pub fn run(&mut self, paths: &PipelinePaths) -> Result<PipelineReport> {
        match self.run_once(paths) {
            Ok(mut report) => {
                self.metrics.record(&report.stats);
                report.metrics = self.metrics.clone();
                Ok(report)
            }
            Err(err) => {
                self.metrics.record_error(&err);
                warn!(category = err.category(), error = %err, "run failed");
                Err(err)
            }
        }
    }

    fn run_once(&self, paths: &PipelinePaths) -> Result<PipelineReport> {
        let input = read_file(&paths.input)?;
        info!(path = %paths.input.display(), bytes = input.len(), "read input");

        let start = Instant::now();
        let codec = HuffmanCodec::from_frequencies(self.count(&input))?;
        let stream = codec.encode(&input)?;
        let stats = codec.stats_for(&input, &stream, start.elapsed().as_micros() as u64);

        write_atomic(&paths.encoded, &stream.bytes)?;
        info!(
            path = %paths.encoded.display(),
            bytes = stream.bytes.len(),
            bits = stream.bit_len,
            "wrote encoded file"
        );

        let persisted = read_file(&paths.encoded)?;
        if persisted.len() != stream.bytes.len() {
            return Err(Error::corrupted(format!(
                "encoded file holds {} bytes, expected {}",
                persisted.len(),
                stream.bytes.len()
            )));
        }
        let reread = EncodedStream {
            bytes: persisted,
            ..stream
        };

        let decoded = codec.decode(&reread, self.config.decode_mode)?;
        let verified = decoded == input;
        if !verified && self.config.verify {
            match self.config.decode_mode {
                DecodeMode::Exact => {
                    return Err(Error::corrupted("decoded output differs from input"));
                }
                DecodeMode::Tolerant => warn!(
                    input = input.len(),
                    decoded = decoded.len(),
                    "decoded output differs from input"
                ),
            }
        }

        write_atomic(&paths.decoded, &decoded)?;
        info!(path = %paths.decoded.display(), bytes = decoded.len(), "wrote decoded file");

        Ok(PipelineReport {
            codes: codec.code_table().entries(),
            stats,
            encoded_path: paths.encoded.clone(),
            decoded_path: paths.decoded.clone(),
            decoded_len: decoded.len(),
            verified,
            metrics: Metrics::default(),
        })
    }

    fn count(&self, data: &[u8]) -> FrequencyTable {
        #[cfg(feature = "parallel")]
        {
            if data.len() >= self.config.parallel_threshold {
                let shard = data.len().div_ceil(rayon::current_num_threads());
                debug!(shard, "counting frequencies in parallel");
                return FrequencyTable::from_bytes_parallel(data, shard);
            }
        }

        debug!(bytes = data.len(), "counting frequencies");
        FrequencyTable::from_bytes(data)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| Error::io_at(path, e))
}

/// Write `bytes` to `path` through a synced temporary file and a rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::io(format!("{}: not a file path", path.display())))?;
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    let result = write_synced(&tmp_path, bytes)
        .and_then(|()| std::fs::rename(&tmp_path, path).map_err(|e| Error::io_at(path, e)));

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    result
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io_at(path, e))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(|e| Error::io_at(path, e))?;
    let file = writer
        .into_inner()
        .map_err(|e| Error::io_at(path, e.into_error()))?;
    file.sync_all().map_err(|e| Error::io_at(path, e))?;
    Ok(())
}
