//! netprobe - ping and mtr over HTTP as JSON or NDJSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use netprobe::commands::{run_probe, OutputMode};
use netprobe::config::{AppConfig, ConfigLoader};
use netprobe::probe::ProbeKind;
use netprobe::server::ProbeServer;

#[derive(Parser)]
#[command(
    name = "netprobe",
    about = "Run ping and mtr and report results as JSON",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of the default search paths.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the probe API over HTTP.
    Serve {
        /// Address to bind (overrides config).
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config).
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Ping a target once and print the replies.
    Latency {
        /// IPv4 address or domain name.
        target: String,
        /// Print one JSON array after the run instead of streaming NDJSON.
        #[arg(long)]
        buffered: bool,
    },
    /// Trace the route to a target and print hops and timings.
    Route {
        /// IPv4 address or domain name.
        target: String,
        /// Print one JSON array after the run instead of streaming NDJSON.
        #[arg(long)]
        buffered: bool,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn output_mode(buffered: bool) -> OutputMode {
    if buffered {
        OutputMode::Buffered
    } else {
        OutputMode::Stream
    }
}

async fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> ExitCode {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl-C");
            shutdown.cancel();
        }
    });

    match ProbeServer::new(config).with_cancellation(cancel).run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn probe(config: &AppConfig, kind: ProbeKind, target: &str, buffered: bool) -> ExitCode {
    let result = run_probe(
        kind,
        &config.tools,
        target,
        output_mode(buffered),
        tokio::io::stdout(),
    )
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(probe = %kind, error = %e, "Probe failed");
            eprintln!("netprobe: {e}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loader = cli.config.map_or_else(ConfigLoader::new, ConfigLoader::with_path);
    let config = match loader.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("netprobe: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Serve { host, port } => serve(config, host, port).await,
        Commands::Latency { target, buffered } => {
            probe(&config, ProbeKind::Latency, &target, buffered).await
        }
        Commands::Route { target, buffered } => {
            probe(&config, ProbeKind::Route, &target, buffered).await
        }
    }
}
