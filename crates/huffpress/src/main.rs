//! Huffpress command-line tool
//!
//! Encodes a file with a Huffman code built from its own byte frequencies,
//! writes the packed bits, then decodes them back into a second file.
//!
//! ## Usage
//!
//! ```bash
//! # Prompt for all three paths
//! huffpress
//!
//! # Non-interactive
//! huffpress input.txt encoded.bin decoded.txt
//!
//! # Decode padding as symbols, no code listing, JSON report
//! huffpress input.txt encoded.bin decoded.txt --tolerant --no-codes --json
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use huffpress::{DecodeMode, Pipeline, PipelineConfig, PipelinePaths, PipelineReport};

#[derive(Parser, Debug)]
#[command(name = "huffpress")]
#[command(author = "Daemoniorum LLC")]
#[command(version)]
#[command(about = "Static Huffman file encoder/decoder", long_about = None)]
struct Args {
    /// File to encode
    input: Option<PathBuf>,

    /// Destination for the packed encoded bits
    encoded: Option<PathBuf>,

    /// Destination for the decoded output
    decoded: Option<PathBuf>,

    /// Configuration file path (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Do not print the code table
    #[arg(long)]
    no_codes: bool,

    /// Decode every byte of the encoded file, dropping an incomplete trailing code
    #[arg(long)]
    tolerant: bool,

    /// Skip comparing the decoded output with the input
    #[arg(long)]
    no_verify: bool,

    /// Print the run report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    if args.no_codes {
        config.print_codes = false;
    }
    if args.tolerant {
        config.decode_mode = DecodeMode::Tolerant;
    }
    if args.no_verify {
        config.verify = false;
    }
    config.validate()?;

    // Logs go to stderr so stdout carries only the report
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.tracing_level()?)
        .with_target(true)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // With --json, stdout carries only the report
    let prompts: Box<dyn Write> = if args.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let paths = resolve_paths(
        args.input,
        args.encoded,
        args.decoded,
        io::stdin().lock(),
        prompts,
    )?;
    info!(
        input = %paths.input.display(),
        encoded = %paths.encoded.display(),
        decoded = %paths.decoded.display(),
        mode = ?config.decode_mode,
        "starting run"
    );

    let print_codes = config.print_codes;
    let report = Pipeline::new(config).run(&paths)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, print_codes);
    }

    Ok(())
}

/// Fill in any path not given on the command line by prompting.
///
/// Answers are read line by line from `answers`; prompts go to `prompts`.
fn resolve_paths<R: BufRead, W: Write>(
    input: Option<PathBuf>,
    encoded: Option<PathBuf>,
    decoded: Option<PathBuf>,
    mut answers: R,
    mut prompts: W,
) -> io::Result<PipelinePaths> {
    let mut ask = |given: Option<PathBuf>, prompt: &str| -> io::Result<PathBuf> {
        if let Some(path) = given {
            return Ok(path);
        }
        write!(prompts, "{prompt}")?;
        prompts.flush()?;

        let mut line = String::new();
        answers.read_line(&mut line)?;
        let answer = line.trim();
        if answer.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no file name given",
            ));
        }
        Ok(PathBuf::from(answer))
    };

    Ok(PipelinePaths {
        input: ask(input, "Enter the input file name: ")?,
        encoded: ask(
            encoded,
            "Enter the output file name for the encoded binary string: ",
        )?,
        decoded: ask(decoded, "Enter the output file name for the decoded string: ")?,
    })
}

fn print_report(report: &PipelineReport, print_codes: bool) {
    if print_codes {
        println!("Huffman Codes are:");
        for entry in &report.codes {
            println!("{} {}", entry.display, entry.code);
        }
        println!();
    }

    println!(
        "Encoded binary string saved to {}",
        report.encoded_path.display()
    );
    println!("Decoded string saved to {}", report.decoded_path.display());

    let stats = &report.stats;
    println!(
        "{} -> {} bytes ({:.1}% saved), {:.3} bits/symbol, {} padding bits{}",
        stats.original_size,
        stats.compressed_size,
        stats.savings_percent(),
        stats.bits_per_symbol(),
        stats.padding_bits(),
        if report.verified { "" } else { ", output differs from input" },
    );
}
