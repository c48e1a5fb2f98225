use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use hanpin::{ConversionResult, Pinyin};
use hanpin_core::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// pin yin
    None,
    /// pīn yīn
    Unicode,
    /// pin1 yin1
    Ascii,
    /// pin-yin
    Permalink,
    /// p-y
    Abbr,
}

#[derive(Parser)]
#[command(name = "hanpin", about = "Convert Chinese text to pinyin")]
struct Args {
    /// TOML config file (defaults to HANPIN_CONFIG, then built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dictionary directory, overrides the config
    #[arg(long)]
    dict_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::None)]
    format: Format,

    /// Treat input as a personal name (surname readings first)
    #[arg(long)]
    name: bool,

    /// Delimiter for permalink/abbr output (defaults to the config's)
    #[arg(long)]
    delimiter: Option<String>,

    /// Text to convert; reads stdin line by line when omitted
    text: Vec<String>,
}

fn render(result: &ConversionResult, format: Format, delimiter: &str) -> String {
    match format {
        Format::None => result.none().join(" "),
        Format::Unicode => result.unicode().join(" "),
        Format::Ascii => result.ascii().join(" "),
        Format::Permalink => result.permalink(delimiter),
        Format::Abbr => result.abbr(delimiter),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_toml(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::from_env().context("loading config from environment")?,
    };
    if let Some(dir) = args.dict_dir {
        config.dict_dir = dir;
    }
    let delimiter = args.delimiter.unwrap_or_else(|| config.delimiter.clone());
    let engine = Pinyin::from_config(config);

    let convert = |line: &str| {
        let result = if args.name {
            engine.name(line)
        } else {
            engine.result(line)
        };
        render(&result, args.format, &delimiter)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !args.text.is_empty() {
        writeln!(out, "{}", convert(&args.text.join(" ")))?;
        return Ok(());
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        writeln!(out, "{}", convert(&line))?;
    }
    Ok(())
}
