use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use notification_options::{Codec, CodecConfig, Options};

#[derive(Debug, Parser)]
#[command(name = "notification-options", version, about = "Convert local notification options between XML records and JSON")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read an <options/> record and print the descriptor as JSON.
    Parse {
        /// Record file; stdin when omitted.
        input: Option<PathBuf>,
    },
    /// Read a JSON descriptor and print the <options/> record.
    Serialize {
        /// JSON file; stdin when omitted.
        input: Option<PathBuf>,
    },
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let codec = Codec::new(CodecConfig::from_env().context("loading NOTIFICATION_OPTIONS_* config")?);
    tracing::debug!(config = ?codec.config(), "codec configured");

    match cli.command {
        Command::Parse { input } => {
            let record = read_input(input.as_ref())?;
            let options = codec.parse(record.trim()).context("parsing options record")?;
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
        Command::Serialize { input } => {
            let json = read_input(input.as_ref())?;
            let options: Options = serde_json::from_str(&json).context("decoding options JSON")?;
            if !options.attachments.is_empty() || !options.buttons.is_empty() {
                tracing::warn!(id = options.id, "attachments and buttons are not carried by the record");
            }
            println!("{}", codec.serialize(&options).context("serializing options record")?);
        }
    }

    Ok(())
}
