//! flowcheck CLI: drive a linear login → navigate → logout smoke flow
//! against a running web application.
//!
//! ## Usage
//!
//! ```bash
//! flowcheck --email admin@example.com --password adminpassword
//! flowcheck --base-url http://staging.local --headed -v
//! FLOWCHECK_EMAIL=... FLOWCHECK_PASSWORD=... flowcheck --quiet
//! ```

use clap::Parser;
use std::process::ExitCode;

mod config;
mod error;
mod output;

use config::Cli;
use error::CliResult;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let flow = config::flow_config(&cli)?;
    let browser = config::browser_config(&cli);
    let mut reporter = output::ConsoleReporter::new(cli.quiet);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(flowcheck::execute(flow, browser, &mut reporter))?;

    if !cli.quiet {
        println!(
            "{} of {} pages verified",
            report.cases_passed, report.cases_attempted
        );
    }
    Ok(())
}

/// Initialize the tracing subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise `-v` maps to info and `-vv` to debug.
fn init_tracing(cli: &Cli) {
    use tracing_subscriber::EnvFilter;

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "flowcheck=info",
        _ => "flowcheck=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
