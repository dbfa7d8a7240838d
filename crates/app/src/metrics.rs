//! Metrics collection and reporting for one encode or decode run.
//!
//! This module provides observable insight into how well the code fits the
//! input:
//! - Byte counts in and out
//! - Code table shape (distinct symbols, longest code)
//! - Average code length against the entropy bound
//! - Timing
//!
//! Summaries go to stderr; stdout carries only data.

use std::time::{Duration, Instant};

use huffcode_core::{CodeTable, FrequencyTable};

/// Metrics for one run of the tool.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input/Output ===
    /// Bytes read (raw data for encode, transcript or frame for decode)
    pub input_bytes: u64,

    /// Bytes written
    pub output_bytes: u64,

    // === Code table ===
    /// Symbols with a code
    pub distinct_symbols: usize,

    /// Longest code in bits
    pub max_code_len: usize,

    /// Shannon entropy of the message in bits per symbol
    pub entropy: f64,

    // === Bitstream ===
    /// Symbols encoded or decoded
    pub symbols: u64,

    /// Length of the encoded bitstream
    pub encoded_bits: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            output_bytes: 0,
            distinct_symbols: 0,
            max_code_len: 0,
            entropy: 0.0,
            symbols: 0,
            encoded_bits: 0,
        }
    }

    /// Record the shape of the code table and the message it covers.
    pub fn record_table(&mut self, frequencies: &FrequencyTable, table: &CodeTable) {
        self.distinct_symbols = table.len();
        self.max_code_len = table.max_code_len();
        self.entropy = frequencies.entropy();
        self.symbols = frequencies.total();
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Packed bitstream size relative to the raw symbols (bits / 8 bits).
    ///
    /// Returns 0.0 if there were no symbols.
    pub fn compression_ratio(&self) -> f64 {
        if self.symbols == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / (self.symbols as f64 * 8.0)
        }
    }

    /// Average code length in bits per symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbols == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.symbols as f64
        }
    }

    /// Entropy divided by average code length; 1.0 is a perfect fit.
    pub fn efficiency(&self) -> f64 {
        let average = self.bits_per_symbol();
        if average == 0.0 {
            0.0
        } else {
            self.entropy / average
        }
    }

    /// Compute throughput in input bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stderr.
    pub fn print_summary(&self) {
        eprintln!("\n=== Summary ===");
        eprintln!("Duration: {} ms", self.duration().as_millis());
        eprintln!("Input:  {} bytes", self.input_bytes);
        eprintln!("Output: {} bytes", self.output_bytes);
        eprintln!();

        eprintln!("=== Code Table ===");
        eprintln!("Distinct symbols: {}", self.distinct_symbols);
        eprintln!("Longest code: {} bits", self.max_code_len);
        eprintln!();

        eprintln!("=== Bitstream ===");
        eprintln!("Symbols: {}", self.symbols);
        eprintln!("Encoded: {} bits ({} bytes packed)", self.encoded_bits, self.encoded_bits.div_ceil(8));
        eprintln!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        eprintln!("Average code length: {:.3} bits/symbol", self.bits_per_symbol());
        eprintln!("Entropy: {:.3} bits/symbol", self.entropy);
        eprintln!("Efficiency: {:.1}%", self.efficiency() * 100.0);
        eprintln!();

        eprintln!("=== Performance ===");
        eprintln!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_bytes={}\n\
             output_bytes={}\n\
             distinct_symbols={}\n\
             max_code_len={}\n\
             symbols={}\n\
             encoded_bits={}\n\
             compression_ratio={:.4}\n\
             bits_per_symbol={:.4}\n\
             entropy={:.4}\n",
            self.duration().as_millis(),
            self.input_bytes,
            self.output_bytes,
            self.distinct_symbols,
            self.max_code_len,
            self.symbols,
            self.encoded_bits,
            self.compression_ratio(),
            self.bits_per_symbol(),
            self.entropy,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
