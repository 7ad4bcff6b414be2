//! Command-line entry point for shardrs.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use shardrs::{PathTemplate, ShardConfig, ShardWriter};

/// Splits a sorted password-hash list file into smaller per-prefix files.
///
/// This might be useful for k-anonymous access. This tool expects
/// hash-ordered input.
#[derive(Parser, Debug)]
#[command(name = "shardrs", version)]
struct Cli {
    /// Input file; reads standard input when omitted
    file: Option<PathBuf>,

    /// Path to store shards at, with '%' as the wildcard
    #[arg(long = "path", default_value = shardrs::DEFAULT_PATH_TEMPLATE)]
    path: String,

    /// Line length of the input in bytes
    #[arg(long, default_value_t = shardrs::DEFAULT_RECORD_SIZE)]
    hash_size: usize,

    /// Number of hashes to read at once
    #[arg(long, default_value_t = shardrs::DEFAULT_BUFFER_RECORDS)]
    buffer_size: usize,

    /// Show the prefix currently being processed on standard error
    #[arg(long)]
    progress: bool,

    /// Strip the prefix from each line (default)
    #[arg(long, overrides_with = "no_strip_prefix")]
    strip_prefix: bool,

    /// Keep the prefix on each line
    #[arg(long)]
    no_strip_prefix: bool,
}

impl Cli {
    fn config(&self) -> Result<ShardConfig, shardrs::ShardError> {
        // The two flags override each other; whichever was given last wins.
        let strip = self.strip_prefix || !self.no_strip_prefix;
        Ok(
            ShardConfig::new(self.hash_size, self.buffer_size, PathTemplate::new(&self.path))?
                .with_strip_prefix(strip),
        )
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.config()?;

    let input: Box<dyn Read> = match &cli.file {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        ),
        None => Box::new(io::stdin()),
    };

    let mut wrote_progress = false;
    for shard in ShardWriter::new(config).split(input) {
        match shard {
            Ok(shard) => {
                if cli.progress {
                    eprint!("\r{}", String::from_utf8_lossy(&shard.prefix));
                    wrote_progress = true;
                }
            }
            Err(e) => {
                if wrote_progress {
                    eprintln!();
                }
                return Err(e.into());
            }
        }
    }
    if wrote_progress {
        eprintln!();
    }

    Ok(())
}
