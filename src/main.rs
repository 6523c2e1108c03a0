//! text-huffman CLI
//!
//!   text-huffman compress   <input> [-o <output>]
//!   text-huffman decompress <input> [-o <output>]
//!   text-huffman inspect    <input>

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use text_huffman::config::CliConfig;
use text_huffman::{Container, HuffmanCodec, Result};

/// Compress and decompress text files with static Huffman coding.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log filter, e.g. `debug` or `text_huffman=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Compress a UTF-8 text file
    Compress {
        input: PathBuf,
        /// Defaults to the input name with a `.huff` extension
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore the text from a compressed file
    Decompress {
        input: PathBuf,
        /// Defaults to `<stem>_decompressed.txt` next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the header and code table of a compressed file
    Inspect { input: PathBuf },
}

fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(text_huffman::config::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn compress(config: &CliConfig, input: &Path, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| config.compressed_path_for(input));
    info!(input = %input.display(), output = %output.display(), "compressing");

    let reader = BufReader::new(File::open(input)?);
    let mut compressed = Vec::new();
    let stats = HuffmanCodec::encode_from_file(reader, &mut compressed)?;
    fs::write(&output, &compressed)?;

    println!(
        "{} -> {}: {} bytes -> {} bytes ({:.1}% saved)",
        input.display(),
        output.display(),
        stats.original_bytes,
        stats.compressed_bytes,
        stats.ratio_percent()
    );
    Ok(())
}

fn decompress(config: &CliConfig, input: &Path, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| config.decompressed_path_for(input));
    info!(input = %input.display(), output = %output.display(), "decompressing");

    let data = fs::read(input)?;
    let text = HuffmanCodec::decompress(&data)?;
    fs::write(&output, text.as_bytes())?;

    println!(
        "{} -> {}: {} bytes -> {} bytes",
        input.display(),
        output.display(),
        data.len(),
        text.len()
    );
    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let data = fs::read(input)?;
    let container = Container::parse(&data)?;

    println!("file:          {}", input.display());
    println!("size:          {} bytes", data.len());
    println!("symbols:       {}", container.symbol_count);
    println!("alphabet:      {}", container.table.len());
    println!("payload:       {} bytes, {} bits", container.payload.len(), container.payload_bits());
    println!("padding:       {} bits", container.padding);
    println!("codes:");
    for (symbol, code) in container.table.iter() {
        println!("  {:<10} {}", format!("{symbol:?}"), code);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = CliConfig::from_env(args.log_level.as_deref());
    init_tracing(&config);

    let result = match args.mode {
        Mode::Compress { input, output } => compress(&config, &input, output),
        Mode::Decompress { input, output } => decompress(&config, &input, output),
        Mode::Inspect { input } => inspect(&input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
