//! cpair - closest pair of points read from stdin.
//!
//! The same binary is the root of the worker tree and every worker below it:
//! it reads `<float> <float>` lines from stdin until end-of-stream and writes
//! its answer to stdout in the same format. Logs go to stderr only.

use clap::Parser;
use cpair_core::{ClosestPairBuilder, CpairError, ErrorCategory, RuntimeConfig, WorkerMode};
use std::process::ExitCode;
use tracing::{debug, info_span, Instrument};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Printed after any malformed-input error.
const INPUT_USAGE: &str = "Only pairs of float types are accepted in input lines!\nUsage: FLOAT FLOAT";

/// Printed after any argument error.
const ARGS_USAGE: &str = "Usage: cpair < POINTS";

#[derive(Parser, Debug)]
#[command(name = "cpair")]
#[command(about = "Closest pair of 2-D points from stdin, one `X Y` pair per line")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // The program takes no arguments at all.
    if let Err(err) = Args::try_parse() {
        report(&usage_error(&err));
        return ExitCode::FAILURE;
    }

    let config = match RuntimeConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("cpair: {err}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config);

    let span = info_span!("node", depth = config.depth, pid = std::process::id());
    match run(&config).instrument(span).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &RuntimeConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(cpair_core::config::EnvConfig::DEFAULT_LOG_FILTER));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();
}

async fn run(config: &RuntimeConfig) -> cpair_core::Result<()> {
    let mut builder = ClosestPairBuilder::from_runtime_config(config);

    if config.worker_mode == WorkerMode::Process {
        let program = std::env::current_exe()
            .map_err(|e| CpairError::io("resolving current executable", e))?;
        builder = builder.worker_program(program);
    }

    let solver = builder.build()?;
    debug!(mode = %solver.worker_mode(), "node starting");

    solver.run(tokio::io::stdin(), tokio::io::stdout()).await
}

/// Fold a clap rejection into the usage category, keeping its headline.
fn usage_error(err: &clap::Error) -> CpairError {
    let rendered = err.to_string();
    let headline = rendered.lines().next().unwrap_or_default();
    CpairError::Usage {
        message: headline.trim_start_matches("error: ").to_string(),
    }
}

fn report(err: &CpairError) {
    debug!(error = %err, "node failed");

    match err.category() {
        ErrorCategory::Usage if matches!(err, CpairError::Usage { .. }) => {
            eprintln!("cpair: {err}\n{ARGS_USAGE}")
        }
        ErrorCategory::Usage => eprintln!("cpair: {err}\n\n{INPUT_USAGE}"),
        ErrorCategory::Resource => eprintln!("cpair: system error: {err}"),
        ErrorCategory::Worker => eprintln!("cpair: {err}"),
    }
}
