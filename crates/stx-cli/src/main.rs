/// STX command-line tool: inspect, validate, and tail Stacks P2P message
/// streams.
///
/// # Command overview
///
/// ```text
/// stx <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print one summary line per message in a capture file
///   validate   Decode a capture file and report the first error
///   tail       Follow a live peer connection (or a file) message by message
///   help       Print help information
///
/// Global options:
///   -v, --verbose            Raise log level (-v debug, -vv trace)
///   --max-payload-len <N>    Reject preambles declaring more than N bytes
///   -h, --help               Print help
///   -V, --version            Print version
/// ```
///
/// A capture file is the raw bytes of a peer connection: back-to-back
/// messages, each a 148-byte preamble followed by its payload.
///
/// # Exit codes
///
/// | Code | Meaning                                  |
/// |------|------------------------------------------|
/// | 0    | Success                                  |
/// | 1    | Error (I/O failure, undecodable message) |
///
/// Logs and error details go to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use stx_decoder::{DecoderConfig, DEFAULT_MAX_PAYLOAD_LEN};
use tracing_subscriber::EnvFilter;

mod cmd_inspect;
mod cmd_tail;
mod cmd_validate;
mod summary;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Stacks P2P wire decoder.
#[derive(Parser)]
#[command(name = "stx", version, about = "Stacks P2P message decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise log verbosity. `RUST_LOG` overrides this when set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Largest payload length accepted from a preamble, in bytes.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_PAYLOAD_LEN)]
    max_payload_len: u32,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print a summary of each message in a capture file.
    Inspect(InspectArgs),
    /// Check that every message in a capture file decodes.
    Validate(ValidateArgs),
    /// Decode messages from a peer connection or file as they arrive.
    Tail(TailArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `stx inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Capture file of concatenated messages.
    pub file: PathBuf,

    /// List each transaction under its message.
    #[arg(long)]
    pub transactions: bool,
}

/// Arguments for `stx validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Capture file of concatenated messages.
    pub file: PathBuf,
}

/// Arguments for `stx tail`.
///
/// ```text
/// ┌──────────────────┬───────────────────────────────────────────┐
/// │ Flag             │ Source                                    │
/// ├──────────────────┼───────────────────────────────────────────┤
/// │ --connect ADDR   │ TCP connection to a peer (host:port)      │
/// │ --file PATH      │ capture file, read through the async loop │
/// └──────────────────┴───────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct TailArgs {
    /// Peer address to connect to.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub connect: Option<String>,

    /// Capture file to stream from.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// List each transaction under its message.
    #[arg(long)]
    pub transactions: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = DecoderConfig::default().with_max_payload_len(cli.max_payload_len);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args, config),
        Commands::Validate(args) => cmd_validate::run(&args, config),
        Commands::Tail(args) => cmd_tail::run(&args, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
