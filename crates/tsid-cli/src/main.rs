//! # `tsid` command-line tool
//!
//! Mints Time-Sorted Unique Identifiers, or decodes existing ones.
//!
//! ## Usage
//!
//! ```bash
//! tsid --count 10 --node 3 --node-bits 10
//! tsid --format json --threads 0 --count 100000
//! tsid decode 0AWE5HZP3SKTK --node-bits 10
//! ```
//!
//! Settings may also come from `TSID_*` environment variables or a `.env`
//! file. Logs go to stderr and are filtered with `RUST_LOG`.

mod cli;

use clap::Parser;
use cli::{
    config::{CliArgs, Command, DecodeConfig, GenerateConfig},
    run::{run_decode, run_generate},
    telemetry::init_tracing,
};
use std::io::{BufWriter, Write};

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    init_tracing()?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match args.command {
        Some(Command::Decode(decode)) => {
            let config = DecodeConfig::try_from(decode)?;
            run_decode(&config, &mut out)?;
        }
        None => {
            let config = GenerateConfig::try_from(args.generate)?;
            run_generate(&config, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
