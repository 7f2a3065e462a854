use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::time::Duration;
use tsid::{TSID_EPOCH, TsidConfig, ValidConfig};

/// Command-line arguments for the `tsid` binary.
///
/// Every generation setting can also come from the environment (or a `.env`
/// file), so a fleet can assign node numbers without changing the command
/// line.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "tsid",
    version,
    about = "Mint and inspect Time-Sorted Unique Identifiers",
    args_conflicts_with_subcommands = true
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub generate: GenerateArgs,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the fields of one or more TSIDs.
    Decode(DecodeArgs),
}

/// Layout settings shared by generation and decoding.
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Width of the node sub-field, 0 to 20.
    ///
    /// Environment variable: `TSID_NODE_BITS`
    #[arg(long, env = "TSID_NODE_BITS", default_value_t = 0)]
    pub node_bits: u8,

    /// Epoch the time field is measured from, in Unix milliseconds.
    ///
    /// Environment variable: `TSID_EPOCH_MILLIS`
    #[arg(long, env = "TSID_EPOCH_MILLIS", default_value_t = TSID_EPOCH.as_millis() as u64)]
    pub epoch_millis: u64,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of identifiers to print.
    ///
    /// Environment variable: `TSID_COUNT`
    #[arg(short = 'n', long, env = "TSID_COUNT", default_value_t = 1)]
    pub count: usize,

    /// Node identifier embedded in every id. Masked to `--node-bits` bits.
    ///
    /// Environment variable: `TSID_NODE`
    #[arg(long, env = "TSID_NODE", default_value_t = 0)]
    pub node: u32,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Output format.
    ///
    /// Environment variable: `TSID_FORMAT`
    #[arg(short, long, env = "TSID_FORMAT", value_enum, default_value_t = Format::Base32)]
    pub format: Format,

    /// Threads minting concurrently from one shared generator. `0` uses one
    /// thread per CPU.
    ///
    /// Environment variable: `TSID_THREADS`
    #[arg(long, env = "TSID_THREADS", default_value_t = 1)]
    pub threads: usize,
}

#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    /// Crockford base32 identifiers to inspect.
    #[arg(required = true)]
    pub ids: Vec<String>,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// How each identifier is written to stdout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Canonical upper-case Crockford base32.
    Base32,
    /// Lower-case Crockford base32.
    Lower,
    /// Decimal integer.
    Number,
    /// One JSON object per line with every field.
    Json,
}

impl LayoutArgs {
    fn tsid_config(&self, node: u32) -> anyhow::Result<ValidConfig> {
        TsidConfig::default()
            .with_node(node)
            .with_node_bits(self.node_bits)
            .with_epoch(Duration::from_millis(self.epoch_millis))
            .validate()
            .context("invalid TSID layout")
    }
}

/// Validated settings for the generate path.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub tsid: ValidConfig,
    pub count: usize,
    pub format: Format,
    pub threads: usize,
}

impl TryFrom<GenerateArgs> for GenerateConfig {
    type Error = anyhow::Error;

    fn try_from(args: GenerateArgs) -> Result<Self, Self::Error> {
        let tsid = args.layout.tsid_config(args.node)?;

        let threads = match args.threads {
            0 => num_cpus::get().min(args.count.max(1)),
            n => n,
        };
        if threads > args.count.max(1) {
            bail!(
                "TSID_THREADS ({threads}) exceeds the number of ids requested ({})",
                args.count
            );
        }

        Ok(Self {
            tsid,
            count: args.count,
            format: args.format,
            threads,
        })
    }
}

/// Validated settings for the decode path.
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    pub ids: Vec<String>,
    pub node_bits: u8,
    pub epoch: Duration,
}

impl TryFrom<DecodeArgs> for DecodeConfig {
    type Error = anyhow::Error;

    fn try_from(args: DecodeArgs) -> Result<Self, Self::Error> {
        let tsid = args.layout.tsid_config(0)?;
        Ok(Self {
            ids: args.ids,
            node_bits: tsid.node_bits(),
            epoch: tsid.epoch(),
        })
    }
}
