//! Configuration for the huffcode tool.
//!
//! Handles parsing command-line arguments and resolving defaults in one
//! place. The resolved configuration (including the sample seed) can be
//! printed so runs are reproducible.

use std::path::PathBuf;

/// What the tool should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Encode input into a transcript or frame
    Encode,
    /// Decode a transcript or frame back into bytes
    Decode,
    /// Print only the code table for the input
    Table,
}

/// Representation of encoded data on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `[Codes]` / `[Content]` text transcript
    Text,
    /// Binary frame with CRC
    Binary,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,

    // === Input ===
    /// Input file path (None = TEXT arguments or stdin)
    pub input_file: Option<PathBuf>,

    /// Literal input given as trailing arguments, joined with spaces
    pub text: Option<String>,

    /// Generate this many bytes of sample input instead of reading any
    pub sample_bytes: Option<usize>,

    /// Seed for sample generation
    pub seed: u64,

    // === Output ===
    /// Output file path (None = stdout)
    pub output_file: Option<PathBuf>,

    pub format: Format,

    // === Behavior ===
    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print a compression summary
    pub print_stats: bool,

    /// Write machine-readable metrics (`key=value` lines) to this path
    pub metrics_file: Option<PathBuf>,

    /// Debug logging
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (program name
    /// excluded).
    ///
    /// The first argument is the command. Remaining non-flag arguments are
    /// literal input text for `encode` and `table`.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut command: Option<Command> = None;
        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut words: Vec<&str> = Vec::new();
        let mut sample_bytes: Option<usize> = None;
        let mut seed: Option<u64> = None;
        let mut format = Format::Text;
        let mut print_config = false;
        let mut print_stats = false;
        let mut metrics_file: Option<PathBuf> = None;
        let mut verbose = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output_file = Some(PathBuf::from(&args[i]));
                }
                "--format" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--format requires text or binary".to_string());
                    }
                    format = match args[i].as_str() {
                        "text" => Format::Text,
                        "binary" => Format::Binary,
                        other => return Err(format!("unknown format: {other}")),
                    };
                }
                "--sample" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--sample requires a byte count".to_string());
                    }
                    sample_bytes = Some(args[i].parse().map_err(|_| "invalid sample size")?);
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--stats" => {
                    print_stats = true;
                }
                "--metrics-out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--metrics-out requires a path".to_string());
                    }
                    metrics_file = Some(PathBuf::from(&args[i]));
                }
                "--print-config" => {
                    print_config = true;
                }
                "--verbose" | "-v" => {
                    verbose = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                "--" => {
                    words.extend(args[i + 1..].iter().map(String::as_str));
                    break;
                }
                flag if flag.starts_with("--") => {
                    return Err(format!("unknown argument: {flag}"));
                }
                word if command.is_none() => {
                    command = Some(match word {
                        "encode" => Command::Encode,
                        "decode" => Command::Decode,
                        "table" => Command::Table,
                        other => return Err(format!("unknown command: {other}")),
                    });
                }
                word => words.push(word),
            }
            i += 1;
        }

        let command = command.ok_or("missing command: expected encode, decode or table")?;
        let text = (!words.is_empty()).then(|| words.join(" "));

        if command == Command::Decode {
            if text.is_some() {
                return Err("decode reads from --in or stdin, not from arguments".to_string());
            }
            if sample_bytes.is_some() {
                return Err("--sample only applies to encode and table".to_string());
            }
        }
        let sources = [input_file.is_some(), text.is_some(), sample_bytes.is_some()];
        if sources.iter().filter(|&&given| given).count() > 1 {
            return Err("give at most one of --in, --sample or TEXT".to_string());
        }

        // Time based unless given, so --print-config shows how to repeat a run
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            command,
            input_file,
            text,
            sample_bytes,
            seed,
            output_file,
            format,
            print_config,
            print_stats,
            metrics_file,
            verbose,
        })
    }

    /// Human-readable form of the configuration.
    pub fn describe(&self) -> String {
        let input = match (&self.input_file, &self.text, self.sample_bytes) {
            (Some(path), _, _) => path.display().to_string(),
            (None, Some(text), _) => format!("{} bytes of argument text", text.len()),
            (None, None, Some(n)) => format!("{n} sample bytes (seed {})", self.seed),
            (None, None, None) => "stdin".to_string(),
        };
        let output = self
            .output_file
            .as_ref()
            .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());

        format!(
            "=== Configuration ===\n\
             Command: {:?}\n\
             Format:  {:?}\n\
             Input:   {}\n\
             Output:  {}\n\
             Seed:    {}\n",
            self.command, self.format, input, output, self.seed
        )
    }

    /// Print the configuration to stderr.
    pub fn print(&self) {
        eprintln!("{}", self.describe());
    }
}

fn print_help() {
    println!("huffcode: Huffman encoder and decoder");
    println!();
    println!("USAGE:");
    println!("    huffcode <encode|decode|table> [OPTIONS] [TEXT...]");
    println!();
    println!("COMMANDS:");
    println!("    encode                  Encode input into a code table and bitstream");
    println!("    decode                  Decode a transcript or frame back into bytes");
    println!("    table                   Print the code table for the input");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>             Input file (default: TEXT, else stdin)");
    println!("    --out <PATH>            Output file (default: stdout)");
    println!("    --format <F>            text or binary (default: text)");
    println!("    --sample <BYTES>        Use generated sample data as input");
    println!("    --seed <N>              Seed for --sample (default: time based)");
    println!();
    println!("    --stats                 Print a compression summary to stderr");
    println!("    --metrics-out <PATH>    Write key=value metrics to a file");
    println!("    --print-config          Print resolved configuration to stderr");
    println!("    --verbose, -v           Debug logging to stderr");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXIT CODES:");
    println!("    0 success, 1 I/O error, 2 usage error,");
    println!("    3 codec error, 4 malformed transcript or frame");
    println!();
    println!("EXAMPLES:");
    println!("    huffcode encode foo                            # Transcript for \"foo\"");
    println!("    huffcode encode --in a.txt --format binary --out a.huf");
    println!("    huffcode decode --in a.huf --format binary --out a.txt");
    println!("    huffcode table --sample 4096 --seed 42 --stats");
    println!();
}
