//! Text transcript format.
//!
//! A transcript shows the code table and the encoded bits as text:
//!
//! ```text
//! [Codes]
//! 0='f'
//! 1='o'
//! [Content]
//! 011
//! ```
//!
//! Entries are sorted by code length, then by code. Symbols are written as
//! single-quoted literals: printable ASCII as itself, `\\`, `\'`, `\n`,
//! `\r`, `\t`, and `\xNN` for everything else.
//!
//! When parsing, lines before `[Codes]` are ignored, blank lines in the
//! code section are skipped, and content lines are concatenated.

use huffcode_core::{BitString, CodeTable};
use thiserror::Error;

const CODES_HEADER: &str = "[Codes]";
const CONTENT_HEADER: &str = "[Content]";

/// Transcript parsing errors.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// A section header never appeared
    #[error("missing {0} section")]
    MissingSection(&'static str),

    /// A code line is not `<code>=<literal>`
    #[error("line {line}: expected <code>=<symbol>, got {text:?}")]
    MalformedEntry { line: usize, text: String },

    /// The symbol literal could not be read
    #[error("line {line}: invalid symbol literal {text:?}")]
    InvalidLiteral { line: usize, text: String },

    /// Code or content bits contained something other than 0 and 1
    #[error("line {line}: {source}")]
    InvalidBits {
        line: usize,
        #[source]
        source: huffcode_core::Error,
    },

    /// The codes do not form a valid prefix-free table
    #[error("invalid code table: {0}")]
    Table(#[source] huffcode_core::Error),
}

/// A parsed transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub table: CodeTable,
    pub content: BitString,
}

/// Render only the `[Codes]` section.
pub fn render_table(table: &CodeTable) -> String {
    let mut entries: Vec<(u8, &BitString)> = table.iter().collect();
    entries.sort_by(|a, b| a.1.len().cmp(&b.1.len()).then_with(|| a.1.cmp(b.1)));

    let mut out = String::from(CODES_HEADER);
    out.push('\n');
    for (symbol, code) in entries {
        out.push_str(&format!("{code}={}\n", render_literal(symbol)));
    }
    out
}

/// Render a full transcript.
pub fn render(table: &CodeTable, content: &BitString) -> String {
    let mut out = render_table(table);
    out.push_str(CONTENT_HEADER);
    out.push('\n');
    out.push_str(&content.to_string());
    out.push('\n');
    out
}

/// Parse a transcript produced by [`render`].
pub fn parse(text: &str) -> Result<Transcript, TranscriptError> {
    enum State {
        Preamble,
        Codes,
        Content,
    }

    let mut state = State::Preamble;
    let mut codes = Vec::new();
    let mut content = BitString::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim_end();

        match state {
            State::Preamble => {
                if line.trim() == CODES_HEADER {
                    state = State::Codes;
                }
            }
            State::Codes => {
                if line.trim() == CONTENT_HEADER {
                    state = State::Content;
                } else if !line.is_empty() {
                    codes.push(parse_entry(line_no, line)?);
                }
            }
            State::Content => {
                let bits: BitString = line.trim().parse().map_err(|source| {
                    TranscriptError::InvalidBits {
                        line: line_no,
                        source,
                    }
                })?;
                content.extend_from_bits(&bits);
            }
        }
    }

    match state {
        State::Preamble => Err(TranscriptError::MissingSection(CODES_HEADER)),
        State::Codes => Err(TranscriptError::MissingSection(CONTENT_HEADER)),
        State::Content => Ok(Transcript {
            table: CodeTable::from_codes(codes).map_err(TranscriptError::Table)?,
            content,
        }),
    }
}

fn parse_entry(line_no: usize, line: &str) -> Result<(u8, BitString), TranscriptError> {
    let (code, literal) = line
        .split_once('=')
        .ok_or_else(|| TranscriptError::MalformedEntry {
            line: line_no,
            text: line.to_string(),
        })?;

    let code: BitString = code
        .trim()
        .parse()
        .map_err(|source| TranscriptError::InvalidBits {
            line: line_no,
            source,
        })?;
    let symbol = parse_literal(literal).ok_or_else(|| TranscriptError::InvalidLiteral {
        line: line_no,
        text: literal.to_string(),
    })?;

    Ok((symbol, code))
}

/// Quote a symbol for display.
pub fn render_literal(symbol: u8) -> String {
    match symbol {
        b'\\' => "'\\\\'".to_string(),
        b'\'' => "'\\''".to_string(),
        b'\n' => "'\\n'".to_string(),
        b'\r' => "'\\r'".to_string(),
        b'\t' => "'\\t'".to_string(),
        0x20..=0x7e => format!("'{}'", symbol as char),
        _ => format!("'\\x{symbol:02x}'"),
    }
}

/// Read a literal written by [`render_literal`].
pub fn parse_literal(literal: &str) -> Option<u8> {
    let inner = literal.strip_prefix('\'')?.strip_suffix('\'')?;

    if let Some(escape) = inner.strip_prefix('\\') {
        return match escape {
            "\\" => Some(b'\\'),
            "'" => Some(b'\''),
            "n" => Some(b'\n'),
            "r" => Some(b'\r'),
            "t" => Some(b'\t'),
            _ => {
                let hex = escape.strip_prefix('x')?;
                if hex.len() != 2 {
                    return None;
                }
                u8::from_str_radix(hex, 16).ok()
            }
        };
    }

    match inner.as_bytes() {
        &[byte] if (0x20..=0x7e).contains(&byte) => Some(byte),
        _ => None,
    }
}
