//! CLI entry point: decode one message file and print it.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use email_decoder::{DirStore, DiscardStore, FileStore, output, parse_message};

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Msgpack,
    Summary,
}

#[derive(Parser)]
#[command(name = "email-decode", version, about = "Decode an email into a normalized record")]
struct Cli {
    /// Raw RFC 5322 message file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: Format,

    /// Directory to write attachments into (discarded if omitted)
    #[arg(long, value_name = "DIR")]
    store_dir: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !cli.file.is_file() {
        anyhow::bail!("The file specified does not exist: {}", cli.file.display());
    }
    let raw = std::fs::read(&cli.file)
        .with_context(|| format!("reading {}", cli.file.display()))?;

    let store: Box<dyn FileStore> = match &cli.store_dir {
        Some(dir) => Box::new(DirStore::new(dir)?),
        None => Box::new(DiscardStore),
    };
    let message = parse_message(&raw, store.as_ref())?;

    let mut stdout = std::io::stdout().lock();
    match cli.format {
        Format::Json => writeln!(stdout, "{}", output::to_json(&message)?)?,
        Format::Msgpack => stdout.write_all(&output::to_msgpack(&message)?)?,
        Format::Summary => write!(stdout, "{}", output::summary(&message))?,
    }

    Ok(())
}
