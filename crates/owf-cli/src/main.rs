/// OWF command-line tool: inspect, validate, dump and summarise `.owf`
/// waveform files.
///
/// # Command overview
///
/// ```text
/// owf <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Stream every entity in a file, one line each
///   validate   Check a file for structural correctness
///   dump       Materialise a file and print it as an outline or JSON
///   stats      Print entity counts, sample totals and time span
///   help       Print help information
///
/// Global options:
///   -v, --verbose          Log decoder activity at debug level
///   --max-alloc <BYTES>    Largest variable-length field to accept
///   -h, --help             Print help
///   -V, --version          Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owf_decoder::config::DEFAULT_MAX_ALLOC;
use owf_decoder::{DecoderConfig, OwfDecoder};

mod cmd_dump;
mod cmd_inspect;
mod cmd_stats;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The OWF (Open Waveform Format) command-line tool.
#[derive(Parser)]
#[command(name = "owf", version, about = "Open Waveform Format CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder activity at debug level (`RUST_LOG` still wins when set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Largest string or sample array, in bytes, the decoder will allocate.
    #[arg(long, global = true, value_name = "BYTES", default_value_t = DEFAULT_MAX_ALLOC)]
    max_alloc: u32,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Stream every entity in an OWF file, one line each.
    Inspect(InspectArgs),
    /// Check an OWF file for structural correctness.
    Validate(ValidateArgs),
    /// Materialise an OWF file and print it as an outline or JSON.
    Dump(DumpArgs),
    /// Print entity counts, sample totals and the covered time span.
    Stats(StatsArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `owf inspect`.
///
/// Streams the file through a visitor, so memory use stays flat no matter
/// how large the file is. Skipped containers are rejected at the visitor
/// and their children are never decoded.
///
/// ```text
/// ┌──────────────────────┬─────────────────────────────────────────────┐
/// │ Flag                 │ Effect                                      │
/// ├──────────────────────┼─────────────────────────────────────────────┤
/// │ --skip-channel ID    │ Reject channels with this id (repeatable)   │
/// │ --skip-namespace ID  │ Reject namespaces with this id (repeatable) │
/// └──────────────────────┴─────────────────────────────────────────────┘
/// ```
///
/// Ids are compared without their trailing NUL padding.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the `.owf` file to inspect.
    pub file: PathBuf,

    /// Skip every channel with this id.
    #[arg(long = "skip-channel", value_name = "ID")]
    pub skip_channels: Vec<String>,

    /// Skip every namespace with this id.
    #[arg(long = "skip-namespace", value_name = "ID")]
    pub skip_namespaces: Vec<String>,
}

/// Arguments for `owf validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the `.owf` file to validate.
    pub file: PathBuf,
}

/// Arguments for `owf dump`.
#[derive(clap::Args)]
pub struct DumpArgs {
    /// Path to the `.owf` file to dump.
    pub file: PathBuf,

    /// Print pretty JSON instead of the indented outline.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `owf stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Path to the `.owf` file to analyse.
    pub file: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let decoder = OwfDecoder::with_config(DecoderConfig::with_max_alloc(cli.max_alloc));
    log::debug!("decoder config: {:?}", decoder.config());

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args, &decoder),
        Commands::Validate(args) => cmd_validate::run(&args, &decoder),
        Commands::Dump(args) => cmd_dump::run(&args, &decoder),
        Commands::Stats(args) => cmd_stats::run(&args, &decoder),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Open `path` as a buffered byte source for the streaming commands.
pub(crate) fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    Ok(BufReader::new(file))
}
