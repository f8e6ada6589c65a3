mod commands;
mod config;
mod global;
mod output;

use clap::Parser;
use std::fs;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use config::{ErrorMode, OutputFormat, PathChoice, Settings};
use global::GlobalArgs;

#[derive(Parser)]
#[command(name = "dotquad")]
#[command(version)]
#[command(about = "Parse dotted-decimal IPv4 addresses with a single SIMD load per address", long_about = None)]
struct Cli {
    /// File to read addresses from (if not provided, reads from stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output format for parsed addresses
    #[arg(short = 'f', long, value_enum)]
    format: Option<OutputFormat>,

    /// Parser backend to use
    #[arg(long, value_enum)]
    path: Option<PathChoice>,

    /// What to do with tokens that are not valid addresses
    #[arg(long, value_enum)]
    on_error: Option<ErrorMode>,

    /// Extra config file merged over the built-in and user configs
    #[arg(long, value_name = "PATH")]
    config: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    show_config: bool,

    /// List every valid dot mask with its shuffle pattern and exit
    #[arg(long)]
    patterns: bool,

    /// Show detected SIMD support and exit
    #[arg(long)]
    platform: bool,

    /// Print N random addresses and exit
    #[arg(long, value_name = "N", conflicts_with = "file")]
    generate: Option<usize>,

    #[command(flatten)]
    global: GlobalArgs,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.global.no_color {
        // Unsafe: environment variable access (not thread-safe)
        // Runs before any other thread exists.
        unsafe {
            std::env::set_var("NO_COLOR", "1");
        }
    }

    let mut settings = Settings::load_with_overrides(cli.config.as_deref(), cli.global.quiet)?;

    // Command-line flags win over every config layer
    if let Some(format) = cli.format {
        settings.output.format = format;
    }
    if let Some(path) = cli.path {
        settings.parse.path = path;
    }
    if let Some(mode) = cli.on_error {
        settings.errors.mode = mode;
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if cli.show_config {
        write!(out, "{}", settings.to_toml()?)?;
        out.flush()?;
        return Ok(());
    }

    if cli.patterns {
        commands::list_patterns(&mut out)?;
        out.flush()?;
        return Ok(());
    }

    if cli.platform {
        commands::show_platform(&mut out)?;
        out.flush()?;
        return Ok(());
    }

    if let Some(count) = cli.generate {
        return Ok(commands::generate_addresses(&mut out, count)?);
    }

    let path = commands::resolve_path(settings.parse.path, cli.global.quiet)?;

    match &cli.file {
        Some(file_path) => {
            let file = fs::File::open(file_path)
                .map_err(|e| format!("Cannot open '{}': {}", file_path.display(), e))?;
            commands::parse_stream(BufReader::new(file), &mut out, &settings, path)
        }
        None => commands::parse_stream(io::stdin().lock(), &mut out, &settings, path),
    }
}
