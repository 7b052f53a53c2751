use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use framelens_core::{Frame, PacketSource, PcapFileSource, decode_frame};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FRAMELENS_BUILD_COMMIT"),
    " ",
    env!("FRAMELENS_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "framelens")]
#[command(version = VERSION)]
#[command(
    about = "Passive dissector for captured network frames (Ethernet / 802.3).",
    long_about = None,
    after_help = "Examples:\n  framelens dissect capture.pcapng\n  framelens dissect capture.pcap --verbose --hexdump\n  framelens dissect capture.pcapng --json > frames.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode every frame in a capture file and print summaries.
    #[command(
        after_help = "Examples:\n  framelens dissect capture.pcapng\n  framelens dissect capture.pcap --count 10 --verbose\n  framelens dissect capture.pcapng --json > frames.json"
    )]
    Dissect {
        /// Path to a .pcap or .pcapng file
        input: PathBuf,

        /// Multi-line decode detail per frame
        #[arg(short, long)]
        verbose: bool,

        /// Hexdump of the captured bytes after each frame
        #[arg(long)]
        hexdump: bool,

        /// One JSON object per frame instead of text summaries
        #[arg(long, conflicts_with_all = ["verbose", "hexdump"])]
        json: bool,

        /// Stop after this many frames
        #[arg(short = 'c', long)]
        count: Option<u64>,

        /// Suppress the trailing frame-count line
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dissect {
            input,
            verbose,
            hexdump,
            json,
            count,
            quiet,
        } => cmd_dissect(input, verbose, hexdump, json, count, quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_dissect(
    input: PathBuf,
    verbose: bool,
    hexdump: bool,
    json: bool,
    count: Option<u64>,
    quiet: bool,
) -> Result<(), CliError> {
    validate_input_file(&input)?;

    let meta = fs::metadata(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .pcap or .pcapng file".to_string()),
        ));
    }

    let mut source = PcapFileSource::open(&input)
        .with_context(|| format!("Failed to open capture: {}", input.display()))?;

    let mut number = 0u64;
    while let Some(event) = source.next_packet().context("PCAP/PCAPNG read failed")? {
        number += 1;
        let frame = decode_frame(&event.data, event.ts, event.original_length, Some(number));

        if json {
            let line = serde_json::to_string(&frame).context("JSON serialization failed")?;
            println!("{line}");
        } else {
            print_frame(&frame, verbose, hexdump);
        }

        if count.is_some_and(|limit| number >= limit) {
            break;
        }
    }

    if !quiet && !json {
        eprintln!("{number} frames");
    }
    Ok(())
}

fn print_frame(frame: &Frame, verbose: bool, hexdump: bool) {
    let number = frame.number.unwrap_or(0);
    match frame.timestamp_string() {
        Some(ts) => println!("{number:5}  {ts}  {frame}"),
        None => println!("{number:5}  {frame}"),
    }
    if verbose {
        println!("       {}", frame.verbose_description());
    }
    if hexdump {
        print!("{}", framelens_core::wire::hexdump(&frame.data));
    }
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .pcap or .pcapng file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "pcap" && ext != "pcapng" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .pcap or .pcapng file".to_string()),
        ));
    }
    Ok(())
}
