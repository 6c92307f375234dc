//! CLI arguments and their mapping onto flow configuration.
//!
//! The navigation case list mirrors the application's navbar; everything
//! else (URL, credentials, timeouts) is injected per run via flags or
//! environment variables rather than living as constants in the library.

use clap::Parser;
use flowcheck::{BrowserConfig, FlowConfig, NavigationCase, Selector, WaitOptions};

use crate::error::{CliError, CliResult};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(
    name = "flowcheck",
    version,
    about = "Linear browser smoke test: log in, click through the navbar, verify each page renders, log out"
)]
pub struct Cli {
    /// Base URL of the application under test
    #[arg(long, env = "FLOWCHECK_BASE_URL", default_value = "http://localhost:5173")]
    pub base_url: String,

    /// Login email
    #[arg(long, env = "FLOWCHECK_EMAIL")]
    pub email: String,

    /// Login password
    #[arg(long, env = "FLOWCHECK_PASSWORD")]
    pub password: String,

    /// Display name shown on the user-menu trigger
    #[arg(long, env = "FLOWCHECK_ADMIN_NAME", default_value = "Admin")]
    pub admin_name: String,

    /// Run with a visible browser window
    #[arg(long)]
    pub headed: bool,

    /// Path to a chromium binary (auto-detected when omitted)
    #[arg(long, env = "CHROMIUM_PATH")]
    pub chromium_path: Option<String>,

    /// Disable the chromium sandbox (containers/CI)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Per-step wait timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Poll interval for visibility checks in milliseconds
    #[arg(long, default_value_t = 100)]
    pub poll_interval: u64,

    /// Suppress per-case progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// The fixed ordered list of navbar items to click and verify.
///
/// Order matches the application's navbar and determines click order.
pub fn default_cases() -> Vec<NavigationCase> {
    vec![
        NavigationCase::new("Dashboard", Selector::text("Dashboard")),
        NavigationCase::new("Customers", Selector::text("Customers")),
        NavigationCase::new("Vehicles", Selector::text("Vehicles")),
        NavigationCase::new("Estimates", Selector::text("Estimates")),
        NavigationCase::new("Invoices", Selector::text("Invoices")),
        NavigationCase::new("Appointments", Selector::text("Appointments")),
        NavigationCase::new("Reports", Selector::text("Reports")),
        NavigationCase::new("Inventory", Selector::text("Inventory")),
        NavigationCase::new("Parts & Labor", Selector::text("Parts")),
    ]
}

/// Build the flow configuration from CLI arguments.
///
/// # Errors
///
/// Returns a configuration error for a non-HTTP base URL.
pub fn flow_config(cli: &Cli) -> CliResult<FlowConfig> {
    if !cli.base_url.starts_with("http://") && !cli.base_url.starts_with("https://") {
        return Err(CliError::config(format!(
            "base URL must start with http:// or https://, got {}",
            cli.base_url
        )));
    }

    Ok(
        FlowConfig::new(&cli.base_url, &cli.email, &cli.password)
            .with_admin_name(&cli.admin_name)
            .with_cases(default_cases())
            .with_wait(
                WaitOptions::new()
                    .with_timeout(cli.timeout.saturating_mul(1_000))
                    .with_poll_interval(cli.poll_interval),
            ),
    )
}

/// Build the browser configuration from CLI arguments
pub fn browser_config(cli: &Cli) -> BrowserConfig {
    let mut config = BrowserConfig::default().with_headless(!cli.headed);
    if let Some(ref path) = cli.chromium_path {
        config = config.with_chromium_path(path);
    }
    if cli.no_sandbox {
        config = config.with_no_sandbox();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["flowcheck", "--email", "a@b.c", "--password", "pw"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_default_cases_match_navbar_order() {
        let cases = default_cases();
        assert_eq!(cases.len(), 9);
        assert_eq!(cases[0].label, "Dashboard");
        assert_eq!(cases[6].label, "Reports");
        assert_eq!(cases[8].label, "Parts & Labor");
        assert_eq!(cases[8].target, Selector::text("Parts"));
    }

    #[test]
    fn test_flow_config_maps_wait_options() {
        let cli = parse(&["--timeout", "3", "--poll-interval", "50"]);
        let flow = flow_config(&cli).unwrap();
        assert_eq!(flow.wait.timeout_ms, 3_000);
        assert_eq!(flow.wait.poll_interval_ms, 50);
        assert_eq!(flow.cases.len(), 9);
        assert_eq!(flow.email, "a@b.c");
    }

    #[test]
    fn test_flow_config_rejects_non_http_url() {
        let cli = parse(&["--base-url", "ftp://example.com"]);
        let result = flow_config(&cli);
        assert!(result.is_err());
    }

    #[test]
    fn test_browser_config_headed_and_sandbox() {
        let cli = parse(&["--headed", "--no-sandbox"]);
        let config = browser_config(&cli);
        assert!(!config.headless);
        assert!(!config.sandbox);
    }

    #[test]
    fn test_browser_defaults_to_headless() {
        let cli = parse(&[]);
        let config = browser_config(&cli);
        assert!(config.headless);
        assert!(config.sandbox);
    }
}
