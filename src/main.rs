//! qrsmith CLI - encode text into a QR code
//!
//! Prints the symbol to the terminal, or writes a PNG with `--output`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qrsmith::{ECLevel, MaskPattern, QRBuilder, Version};

/// Encode text as a byte mode QR code
#[derive(Parser)]
#[command(name = "qrsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Text to encode
    text: String,

    /// Error correction level
    #[arg(short, long, value_enum, default_value_t = EcLevelArg::M)]
    ec_level: EcLevelArg,

    /// Symbol version, smallest fitting version if omitted
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=40))]
    symbol_version: Option<u8>,

    /// Mask pattern, lowest penalty mask if omitted
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=7))]
    mask: Option<u8>,

    /// Write a PNG image instead of printing to the terminal
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pixels per module for PNG output
    #[arg(long, default_value = "8")]
    scale: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum EcLevelArg {
    L,
    M,
    Q,
    H,
}

impl From<EcLevelArg> for ECLevel {
    fn from(arg: EcLevelArg) -> Self {
        match arg {
            EcLevelArg::L => ECLevel::L,
            EcLevelArg::M => ECLevel::M,
            EcLevelArg::Q => ECLevel::Q,
            EcLevelArg::H => ECLevel::H,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut builder = QRBuilder::new(cli.text.as_bytes());
    builder.ec_level(cli.ec_level.into());
    if let Some(v) = cli.symbol_version {
        builder.version(Version::new(v as usize)?);
    }
    if let Some(m) = cli.mask {
        builder.mask(MaskPattern::new(m)?);
    }

    let qr = builder.build().with_context(|| format!("Failed to encode {}", builder.metadata()))?;
    info!("Generated QR {}", qr.metadata());

    match cli.output {
        Some(path) => {
            qr.to_image(cli.scale)
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Saved to {}", path.display());
        }
        None => println!("{}", qr.to_str(1)),
    }

    Ok(())
}
