//! huffcode: Huffman encoder and decoder
//!
//! Reads bytes, builds a code table, and writes either a text transcript or
//! a binary frame. `decode` reverses either form.

mod config;
mod input_gen;
mod metrics;
mod transcript;

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use config::{Command, Config, Format};
use huffcode_core::framing::{self, MAGIC};
use huffcode_core::{decode, encode, CodeTable, FrequencyTable};
use metrics::Metrics;
use tracing::{debug, info, warn};
use transcript::TranscriptError;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Run with --help for usage");
            return ExitCode::from(2);
        }
    };

    init_tracing(config.verbose);

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(config: &Config) -> Result<()> {
    let mut metrics = Metrics::new();

    let input = read_input(config)?;
    metrics.input_bytes = input.len() as u64;
    debug!(bytes = input.len(), "read input");

    let output = match config.command {
        Command::Encode => encode_input(config, &input, &mut metrics)?,
        Command::Decode => decode_input(config, &input, &mut metrics)?,
        Command::Table => {
            let table = build_table(&input, &mut metrics)?;
            transcript::render_table(&table).into_bytes()
        }
    };

    write_output(config, &output)?;
    metrics.output_bytes = output.len() as u64;
    metrics.complete();

    info!(
        input_bytes = metrics.input_bytes,
        output_bytes = metrics.output_bytes,
        duration_ms = metrics.duration().as_millis() as u64,
        "done"
    );

    if config.print_stats {
        metrics.print_summary();
    }
    if let Some(path) = &config.metrics_file {
        write_metrics(path, &metrics)?;
        debug!(path = %path.display(), "wrote metrics");
    }

    Ok(())
}

fn build_table(input: &[u8], metrics: &mut Metrics) -> Result<CodeTable> {
    let frequencies = FrequencyTable::from_symbols(input);
    let table = CodeTable::from_frequencies(&frequencies)?;
    metrics.record_table(&frequencies, &table);
    metrics.encoded_bits = table.weighted_length(&frequencies);

    debug!(
        symbols = table.len(),
        max_code_len = table.max_code_len(),
        "built code table"
    );
    Ok(table)
}

fn encode_input(config: &Config, input: &[u8], metrics: &mut Metrics) -> Result<Vec<u8>> {
    let table = build_table(input, metrics)?;
    let bits = encode(input, &table)?;
    debug!(bits = bits.len(), "encoded");

    match config.format {
        Format::Text => Ok(transcript::render(&table, &bits).into_bytes()),
        Format::Binary => {
            let frame = framing::Frame {
                symbol_count: input.len() as u64,
                table,
                payload: bits,
            };
            Ok(framing::serialize_frame(&frame)?)
        }
    }
}

fn decode_input(config: &Config, input: &[u8], metrics: &mut Metrics) -> Result<Vec<u8>> {
    let (table, symbols) = match config.format {
        Format::Text => {
            if input.starts_with(&MAGIC) {
                warn!("input looks like a binary frame; try --format binary");
            }
            let text = std::str::from_utf8(input).context("transcript is not valid UTF-8")?;
            let parsed = transcript::parse(text)?;
            let symbols = decode(&parsed.content, &parsed.table)?;
            metrics.encoded_bits = parsed.content.len() as u64;
            (parsed.table, symbols)
        }
        Format::Binary => {
            let frame = framing::parse_frame(input)?;
            let symbols = framing::decode_frame(&frame)?;
            metrics.encoded_bits = frame.payload.len() as u64;
            (frame.table, symbols)
        }
    };

    let frequencies = FrequencyTable::from_symbols(&symbols);
    metrics.record_table(&frequencies, &table);
    debug!(symbols = symbols.len(), "decoded");

    Ok(symbols)
}

fn read_input(config: &Config) -> Result<Vec<u8>> {
    if let Some(size) = config.sample_bytes {
        info!(size, seed = config.seed, "generating sample input");
        return Ok(input_gen::generate_sample_data(config.seed, size));
    }

    if let Some(text) = &config.text {
        return Ok(text.as_bytes().to_vec());
    }

    if let Some(path) = &config.input_file {
        return fs::read(path).with_context(|| format!("failed to read {}", path.display()));
    }

    let mut data = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut data)
        .context("failed to read stdin")?;
    Ok(data)
}

fn write_output(config: &Config, data: &[u8]) -> Result<()> {
    match &config.output_file {
        Some(path) => {
            fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data).context("failed to write stdout")?;
            stdout.flush().context("failed to write stdout")
        }
    }
}

fn write_metrics(path: &Path, metrics: &Metrics) -> Result<()> {
    fs::write(path, metrics.export_text())
        .with_context(|| format!("failed to write metrics to {}", path.display()))
}

/// Map an error to the process exit code.
///
/// 3 for codec errors, 4 for malformed transcripts or frames, 1 otherwise.
fn exit_code(error: &anyhow::Error) -> u8 {
    for cause in error.chain() {
        if cause.is::<TranscriptError>() || cause.is::<std::str::Utf8Error>() {
            return 4;
        }
        if let Some(core) = cause.downcast_ref::<huffcode_core::Error>() {
            return match core {
                huffcode_core::Error::Huffman(_) => 3,
                huffcode_core::Error::BitIo(_)
                | huffcode_core::Error::Framing(_)
                | huffcode_core::Error::Crc { .. } => 4,
            };
        }
    }
    1
}
