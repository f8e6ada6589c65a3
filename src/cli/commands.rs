use dotquad::bench::{ParsePath, PlatformInfo, detect_available_paths, parse_with_path};
use dotquad::core::tables::{FIELD_COUNT, field_lengths, tables};
use dotquad::{ParseError, parse_padded};
use rand::Rng;
use std::fmt;
use std::io::{BufRead, Write};

use super::config::{ErrorMode, PathChoice, Settings};
use super::output::{format_address, format_error};

/// A token rejected while running in `fail` mode
#[derive(Debug)]
pub struct InvalidToken {
    pub token: String,
    pub line: usize,
    pub error: ParseError,
}

impl fmt::Display for InvalidToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.error)?;
        write!(f, "  line {}: {:?}", self.line, self.token)
    }
}

impl std::error::Error for InvalidToken {}

/// Resolve the configured path choice to a concrete backend.
///
/// `None` means automatic dispatch.
pub fn resolve_path(
    choice: PathChoice,
    quiet: bool,
) -> Result<Option<ParsePath>, Box<dyn std::error::Error>> {
    match choice {
        PathChoice::Auto => Ok(None),
        PathChoice::Scalar => Ok(Some(ParsePath::Scalar)),
        PathChoice::Simd => {
            if detect_available_paths().contains(&ParsePath::Simd) {
                Ok(Some(ParsePath::Simd))
            } else {
                if !quiet {
                    eprintln!(
                        "Warning: no SIMD backend on {}",
                        PlatformInfo::detect().display()
                    );
                }
                Err("SIMD parse path requested but not available on this CPU".into())
            }
        }
    }
}

/// Parse every whitespace-delimited token of `input`, one result per line.
pub fn parse_stream<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    settings: &Settings,
    path: Option<ParsePath>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = settings.output.format;
    let mut line = Vec::new();
    let mut line_no = 0usize;

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        line_no += 1;

        for (start, len) in tokens(&line) {
            let token = &line[start..start + len];
            let result = match path {
                None => parse_padded(&line[start..], len),
                Some(path) => parse_with_path(token, path)
                    .ok_or("parse path became unavailable")?,
            };

            let text = String::from_utf8_lossy(token);
            match result {
                Ok(address) => writeln!(out, "{}", format_address(&text, address, format)?)?,
                Err(error) => match settings.errors.mode {
                    ErrorMode::Report => writeln!(
                        out,
                        "{}",
                        format_error(&text, error, format, &settings.errors.message)?
                    )?,
                    ErrorMode::Skip => {}
                    ErrorMode::Fail => {
                        out.flush()?;
                        return Err(Box::new(InvalidToken {
                            token: text.into_owned(),
                            line: line_no,
                            error,
                        }));
                    }
                },
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Offsets and lengths of the ASCII-whitespace separated tokens in `line`
fn tokens(line: &[u8]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut pos = 0;
    std::iter::from_fn(move || {
        while pos < line.len() && line[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= line.len() {
            return None;
        }
        let start = pos;
        while pos < line.len() && !line[pos].is_ascii_whitespace() {
            pos += 1;
        }
        Some((start, pos - start))
    })
}

/// Print every valid dot mask with its field lengths and shuffle pattern
pub fn list_patterns<W: Write>(out: &mut W) -> std::io::Result<()> {
    let tables = tables();
    writeln!(out, "{} valid dot masks\n", tables.len())?;
    writeln!(out, "  id  mask              fields   pattern")?;

    for mask in tables.masks() {
        let Some(id) = tables.id_for(mask) else {
            continue;
        };
        let lengths = field_lengths(mask).unwrap_or([0; FIELD_COUNT]);
        let lengths: Vec<String> = lengths.iter().map(|l| l.to_string()).collect();
        let pattern: Vec<String> = tables
            .pattern(id)
            .iter()
            .map(|lane| format!("{:>2}", lane))
            .collect();
        writeln!(
            out,
            "  {:>2}  {:016b}  {}  [{}]",
            id,
            mask,
            lengths.join("-"),
            pattern.join(" ")
        )?;
    }

    Ok(())
}

/// Print the detected platform and the parse paths that can run on it
pub fn show_platform<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Platform: {}", PlatformInfo::detect().display())?;
    let paths: Vec<String> = detect_available_paths()
        .iter()
        .map(|p| p.to_string())
        .collect();
    writeln!(out, "Parse paths: {}", paths.join(", "))
}

/// Emit `count` random dotted-decimal addresses, one per line
pub fn generate_addresses<W: Write>(out: &mut W, count: usize) -> std::io::Result<()> {
    let mut rng = rand::rng();
    for _ in 0..count {
        let [a, b, c, d]: [u8; 4] = rng.random();
        writeln!(out, "{}.{}.{}.{}", a, b, c, d)?;
    }
    out.flush()
}
