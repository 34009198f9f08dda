//! pandora-get: run a Pandora query on a schedule and print the results.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build the client from the merged configuration.
//! - Drive the query loop and translate its outcome into an exit code.
//!
//! Does NOT handle:
//! - Job lifecycle or REST API details (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap defaults.
//! - Results go to stdout; logs and error messages go to stderr.

mod args;
mod cancellation;
mod config;
mod error;
mod input;
mod logging;
mod output;
mod query_loop;

use args::Cli;
use cancellation::{cancel_on_ctrl_c, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use pandora_client::{CancellationToken, MetricsCollector, MetricsExporter, PandoraClient};
use pandora_config::ConfigLoader;

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();
    logging::init(cli.log_format);

    let metrics_exporter = if let Some(ref bind_addr) = cli.metrics_bind {
        match MetricsExporter::install(bind_addr) {
            Ok(exporter) => {
                tracing::info!("Metrics exporter started on http://{}/metrics", bind_addr);
                Some(exporter)
            }
            Err(e) => {
                eprintln!("Failed to start metrics exporter: {}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        }
    } else {
        None
    };

    let config = match config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    let exit_code = match run(&cli, &config, metrics_exporter.is_some()).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

async fn run(cli: &Cli, config: &pandora_config::Config, metrics: bool) -> anyhow::Result<()> {
    let settings = config::loop_settings(config, cli)?;
    let query = input::read_query(cli.file.as_deref())?;

    let mut builder = PandoraClient::builder()
        .from_config(config)
        .on_job_abandoned(|handle| {
            tracing::info!(job = %handle, "Job left running on the server");
        });
    if metrics {
        builder = builder.metrics(MetricsCollector::new());
    }
    let client = builder.build()?;

    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(&cancel);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    query_loop::run(&client, &settings, &query, &cancel, &mut out).await
}
