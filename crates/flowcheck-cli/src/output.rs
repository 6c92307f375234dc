//! Console progress reporting for flow runs.
//!
//! One line per navigation case on stdout, in click order, plus a final
//! success marker. Quiet mode keeps the success marker and drops the rest.

use console::style;
use flowcheck::ProgressSink;

/// Progress sink printing styled lines to stdout
#[derive(Debug)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ProgressSink for ConsoleReporter {
    fn login_ok(&mut self) {
        if !self.quiet {
            println!("{} logged in", style("✓").green());
        }
    }

    fn case_started(&mut self, label: &str) {
        if !self.quiet {
            println!("Testing page: {label}");
        }
    }

    fn case_passed(&mut self, label: &str) {
        tracing::debug!(label, "page marker visible");
    }

    fn logout_ok(&mut self) {
        if !self.quiet {
            println!("{} logged out", style("✓").green());
        }
    }

    fn flow_completed(&mut self) {
        println!(
            "{} Flow test completed successfully!",
            style("✅").green().bold()
        );
    }
}
