//! logdoctor CLI — run the triage service or analyze a log offline.

use clap::{Parser, Subcommand};
use logdoctor::config::Config;
use logdoctor::diagnose;
use logdoctor::server;
use logdoctor::telemetry::{TelemetryConfig, init_telemetry};
use std::io::Read as _;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logdoctor", about = "Build-log triage for Render deployments")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Listen port (overrides the PORT environment variable)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Diagnose a build log from a file or stdin, without the network
    Analyze {
        /// Log file to read; stdin when omitted
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port } => cmd_serve(port).await,
        Command::Analyze { file } => cmd_analyze(file),
    }
}

async fn cmd_serve(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(port) = port {
        config.port = port;
    }

    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "logdoctor".to_string(),
    })?;

    server::serve(config).await?;
    Ok(())
}

fn cmd_analyze(file: Option<PathBuf>) -> anyhow::Result<()> {
    let log_text = match file {
        Some(path) => std::fs::read_to_string(&path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    print!("{}", diagnose::report(&log_text));
    Ok(())
}
