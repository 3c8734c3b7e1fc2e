//! File pipeline tests over temporary directories.

use std::path::Path;

use huffpress::{DecodeMode, Error, HuffmanCodec, Pipeline, PipelineConfig, PipelinePaths};
use tempfile::tempdir;

fn paths_in(dir: &Path) -> PipelinePaths {
    PipelinePaths {
        input: dir.join("input.txt"),
        encoded: dir.join("encoded.huff"),
        decoded: dir.join("decoded.txt"),
    }
}

fn sample_text() -> Vec<u8> {
    b"Huffman coding assigns shorter codes to more frequent symbols. \
      The quick brown fox jumps over the lazy dog. 0123456789\n"
        .repeat(40)
}

#[test]
fn encoded_file_is_raw_packed_bits() {
    let dir = tempdir().unwrap();
    let paths = paths_in(dir.path());
    let text = sample_text();
    std::fs::write(&paths.input, &text).unwrap();

    let report = Pipeline::default().run(&paths).unwrap();

    // No header: the file is exactly the packed stream of this input.
    let expected = HuffmanCodec::from_input(&text).unwrap().encode(&text).unwrap();
    assert_eq!(std::fs::read(&paths.encoded).unwrap(), expected.bytes);
    assert_eq!(report.stats.encoded_bits, expected.bit_len);
    assert_eq!(report.stats.compressed_size, expected.bit_len.div_ceil(8));

    assert!(report.verified);
    assert_eq!(std::fs::read(&paths.decoded).unwrap(), text);
    assert!(report.stats.ratio().is_effective());
}

#[test]
fn tolerant_mode_reports_padding_symbols() {
    let dir = tempdir().unwrap();
    let paths = paths_in(dir.path());
    std::fs::write(&paths.input, b"ab").unwrap();

    let config = PipelineConfig {
        decode_mode: DecodeMode::Tolerant,
        ..PipelineConfig::default()
    };
    let report = Pipeline::new(config).run(&paths).unwrap();

    assert!(!report.verified);
    assert_eq!(report.decoded_len, 8);
    assert_eq!(std::fs::read(&paths.decoded).unwrap(), b"abaaaaaa");
}

#[test]
fn tolerant_mode_is_exact_when_bits_fill_the_last_byte() {
    let dir = tempdir().unwrap();
    let paths = paths_in(dir.path());
    // a=0 b=1, eight symbols fill one byte exactly.
    std::fs::write(&paths.input, b"abababab").unwrap();

    let config = PipelineConfig {
        decode_mode: DecodeMode::Tolerant,
        ..PipelineConfig::default()
    };
    let report = Pipeline::new(config).run(&paths).unwrap();

    assert!(report.verified);
    assert_eq!(report.stats.padding_bits(), 0);
}

#[test]
fn existing_outputs_survive_a_failed_run() {
    let dir = tempdir().unwrap();
    let paths = paths_in(dir.path());
    std::fs::write(&paths.input, b"").unwrap();
    std::fs::write(&paths.encoded, b"previous encoded").unwrap();
    std::fs::write(&paths.decoded, b"previous decoded").unwrap();

    let err = Pipeline::default().run(&paths).unwrap_err();
    assert!(matches!(err, Error::EmptyInput));

    assert_eq!(std::fs::read(&paths.encoded).unwrap(), b"previous encoded");
    assert_eq!(std::fs::read(&paths.decoded).unwrap(), b"previous decoded");
}

#[test]
fn unwritable_destination_is_an_io_error() {
    let dir = tempdir().unwrap();
    let mut paths = paths_in(dir.path());
    std::fs::write(&paths.input, b"hello").unwrap();
    paths.encoded = dir.path().join("no-such-dir").join("encoded.huff");

    let err = Pipeline::default().run(&paths).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(!paths.decoded.exists());
}

#[test]
fn report_serializes_to_json() {
    let dir = tempdir().unwrap();
    let paths = paths_in(dir.path());
    std::fs::write(&paths.input, b"aabbbcccc").unwrap();

    let report = Pipeline::default().run(&paths).unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert_eq!(json["codes"][0]["display"], "a");
    assert_eq!(json["codes"][0]["code"], "10");
    assert_eq!(json["stats"]["encoded_bits"], 14);
    assert_eq!(json["verified"], true);
    assert_eq!(json["metrics"]["total_operations"], 1);
    assert_eq!(json["metrics"]["error_count"], 0);
}

#[test]
fn failed_runs_are_counted_by_category() {
    let dir = tempdir().unwrap();
    let paths = paths_in(dir.path());
    let mut pipeline = Pipeline::default();

    assert!(matches!(pipeline.run(&paths), Err(Error::Io(_))));
    std::fs::write(&paths.input, b"xyzzy").unwrap();
    let report = pipeline.run(&paths).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["metrics"]["total_operations"], 1);
    assert_eq!(json["metrics"]["errors_by_category"]["io_error"], 1);
}
