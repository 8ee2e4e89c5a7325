use std::process::ExitCode;

use clap::Parser;
use sensavg_core::config::Config;
use sensavg_core::framer::FramingMode;
use sensavg_core::parser::NumericPolicy;
use sensavg_core::{EmissionGate, OutputFormat, Pipeline, SystemClock};
use sensavg_feeds::{open_serial, run_with_sink, IngestError};
use tokio_util::sync::CancellationToken;

/// Exit status when the serial device cannot be opened.
const EXIT_DEVICE_OPEN: u8 = 255;

#[derive(Parser)]
#[command(name = "sensavg", version, about = "Average `<a>,<b>` sensor records from a serial device")]
struct Cli {
    /// Serial device to read, e.g. /dev/ttyUSB0.
    device_path: String,

    /// Minimum whole seconds between printed averages [default: 5].
    interval_seconds: Option<u32>,

    /// Line framing across reads: per_chunk or carry_over.
    #[arg(long)]
    framing: Option<FramingMode>,

    /// Non-numeric field handling: sentinel or strict.
    #[arg(long)]
    numeric_policy: Option<NumericPolicy>,

    /// Output line format: csv or jsonl.
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Write debug logs to /tmp/sensavg-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(interval) = self.interval_seconds {
            config.interval_secs = interval;
        }
        if let Some(framing) = self.framing {
            config.framing = framing;
        }
        if let Some(policy) = self.numeric_policy {
            config.numeric_policy = policy;
        }
        if let Some(format) = self.format {
            config.output_format = format;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.debug) {
        eprintln!("sensavg: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<IngestError>() {
            Some(open) if matches!(open, IngestError::DeviceOpen { .. }) => {
                tracing::debug!(error = ?open, "device open failed");
                eprintln!("{open}");
                ExitCode::from(EXIT_DEVICE_OPEN)
            }
            _ => {
                eprintln!("sensavg: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    cli.apply(&mut config);
    tracing::debug!(?config, "configuration resolved");

    let port = open_serial(&cli.device_path)?;

    let gate = EmissionGate::new(SystemClock, config.interval_secs);
    let pipeline = Pipeline::new(config.framing, config.numeric_policy, gate);
    let cancel = CancellationToken::new();

    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received; shutting down");
                cancel.cancel();
            }
        }
    });

    let (stats, written) =
        run_with_sink(port, pipeline, tokio::io::stdout(), config.output_format, cancel).await?;
    tracing::info!(?stats, written, "sensavg finished");
    Ok(())
}

fn init_logging(debug: bool) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/sensavg-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("sensavg debug log started; tail -f /tmp/sensavg-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
    Ok(())
}
