//! The flow runner: login, navigate-and-verify, logout.
//!
//! [`FlowRunner`] executes a strict sequence against a [`FlowDriver`]:
//! navigate to the login page, authenticate, wait for the dashboard
//! landmark, click each configured navigation case in order and wait for
//! its marker element, then log out through the user menu. The first
//! failed step aborts the remainder of the run; there is no retry.

use crate::browser::{Browser, BrowserConfig, Page};
use crate::result::{FlowError, FlowResult};
use crate::selector::Selector;
use crate::wait::WaitOptions;
use async_trait::async_trait;
use tracing::info;

/// One navigation item to click and verify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationCase {
    /// Display name, also used as the click target text in the navbar
    pub label: String,
    /// Selector expected to be visible after navigation
    pub target: Selector,
}

impl NavigationCase {
    /// Create a new navigation case
    #[must_use]
    pub fn new(label: impl Into<String>, target: Selector) -> Self {
        Self {
            label: label.into(),
            target,
        }
    }

    /// Selector for this case's navbar entry
    #[must_use]
    pub fn nav_selector(&self) -> Selector {
        Selector::css_with_text("nav a, nav button", &self.label)
    }
}

/// Configuration for one flow run.
///
/// Everything the runner needs is passed in here; the library holds no
/// process-wide state, credentials or case lists.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Base URL of the application under test
    pub base_url: String,
    /// Login email
    pub email: String,
    /// Login password
    pub password: String,
    /// Display name shown on the user-menu trigger
    pub admin_name: String,
    /// Element whose visibility signals that login completed
    pub dashboard_landmark: Selector,
    /// Element whose visibility signals return to the login view
    pub login_view: Selector,
    /// Ordered navigation cases; order determines click order
    pub cases: Vec<NavigationCase>,
    /// Bounds for every visibility wait in the run
    pub wait: WaitOptions,
}

impl FlowConfig {
    /// Create a new flow configuration
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            email: email.into(),
            password: password.into(),
            admin_name: String::from("Admin"),
            dashboard_landmark: Selector::text("Dashboard"),
            login_view: Selector::text("Login"),
            cases: Vec::new(),
            wait: WaitOptions::default(),
        }
    }

    /// Set the navigation cases
    #[must_use]
    pub fn with_cases(mut self, cases: Vec<NavigationCase>) -> Self {
        self.cases = cases;
        self
    }

    /// Set the user-menu trigger text
    #[must_use]
    pub fn with_admin_name(mut self, name: impl Into<String>) -> Self {
        self.admin_name = name.into();
        self
    }

    /// Set the post-login landmark
    #[must_use]
    pub fn with_dashboard_landmark(mut self, landmark: Selector) -> Self {
        self.dashboard_landmark = landmark;
        self
    }

    /// Set the login-view landmark used to confirm logout
    #[must_use]
    pub fn with_login_view(mut self, landmark: Selector) -> Self {
        self.login_view = landmark;
        self
    }

    /// Set the wait options
    #[must_use]
    pub fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    fn login_url(&self) -> String {
        format!("{}/login", self.base_url.trim_end_matches('/'))
    }
}

/// Outcome of a completed flow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowReport {
    /// Navigation cases attempted
    pub cases_attempted: usize,
    /// Navigation cases whose marker became visible
    pub cases_passed: usize,
}

/// Abstract page operations the runner needs.
///
/// Implemented by [`Page`] and by test doubles, so the sequence logic can
/// be exercised without a browser.
#[async_trait]
pub trait FlowDriver {
    /// Navigate to a URL
    async fn goto(&mut self, url: &str) -> FlowResult<()>;
    /// Fill a form field
    async fn fill(&mut self, selector: &Selector, value: &str) -> FlowResult<()>;
    /// Click an element
    async fn click(&mut self, selector: &Selector) -> FlowResult<()>;
    /// Poll until a selector is visible, bounded by the wait options
    async fn wait_for_visible(
        &mut self,
        selector: &Selector,
        options: &WaitOptions,
    ) -> FlowResult<()>;
}

// UFCS keeps these pinned to the inherent methods: a plain `self.x()` on
// `&mut self` can resolve back to this trait impl and recurse.
#[async_trait]
impl FlowDriver for Page {
    async fn goto(&mut self, url: &str) -> FlowResult<()> {
        Page::goto(self, url).await
    }

    async fn fill(&mut self, selector: &Selector, value: &str) -> FlowResult<()> {
        Page::fill(self, selector, value).await
    }

    async fn click(&mut self, selector: &Selector) -> FlowResult<()> {
        Page::click(self, selector).await
    }

    async fn wait_for_visible(
        &mut self,
        selector: &Selector,
        options: &WaitOptions,
    ) -> FlowResult<()> {
        Page::wait_for_visible(self, selector, options).await
    }
}

/// Receiver for progress events during a run.
///
/// The CLI prints styled lines; tests record events to assert ordering.
/// All methods default to no-ops.
pub trait ProgressSink {
    /// Login completed, dashboard landmark visible
    fn login_ok(&mut self) {}
    /// A navigation case is about to be clicked
    fn case_started(&mut self, _label: &str) {}
    /// A navigation case's marker became visible
    fn case_passed(&mut self, _label: &str) {}
    /// Logout completed, login view visible again
    fn logout_ok(&mut self) {}
    /// The whole flow completed successfully
    fn flow_completed(&mut self) {}
}

/// Executes the scripted sequence against a driver
#[derive(Debug)]
pub struct FlowRunner {
    config: FlowConfig,
}

impl FlowRunner {
    /// Create a runner for the given configuration
    #[must_use]
    pub fn new(config: FlowConfig) -> Self {
        Self { config }
    }

    /// Get the runner configuration
    #[must_use]
    pub const fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Run the full sequence: login, each navigation case in order, logout.
    ///
    /// # Errors
    ///
    /// Returns the first step's error; remaining steps are never attempted.
    pub async fn run<D: FlowDriver + ?Sized>(
        &self,
        driver: &mut D,
        sink: &mut dyn ProgressSink,
    ) -> FlowResult<FlowReport> {
        self.login(driver).await?;
        sink.login_ok();

        let mut attempted = 0;
        for case in &self.config.cases {
            sink.case_started(&case.label);
            attempted += 1;
            self.verify_case(driver, case).await?;
            sink.case_passed(&case.label);
        }

        self.logout(driver).await?;
        sink.logout_ok();
        sink.flow_completed();

        Ok(FlowReport {
            cases_attempted: attempted,
            cases_passed: attempted,
        })
    }

    async fn login<D: FlowDriver + ?Sized>(&self, driver: &mut D) -> FlowResult<()> {
        let url = self.config.login_url();
        info!(url = %url, "navigating to login page");
        driver.goto(&url).await?;

        driver
            .fill(&Selector::css("input[name='email']"), &self.config.email)
            .await?;
        driver
            .fill(
                &Selector::css("input[name='password']"),
                &self.config.password,
            )
            .await?;
        driver
            .click(&Selector::css_with_text("button", "Login"))
            .await?;

        driver
            .wait_for_visible(&self.config.dashboard_landmark, &self.config.wait)
            .await
            .map_err(|e| {
                FlowError::login(format!("dashboard landmark never became visible ({e})"))
            })?;
        info!("login completed");
        Ok(())
    }

    async fn verify_case<D: FlowDriver + ?Sized>(
        &self,
        driver: &mut D,
        case: &NavigationCase,
    ) -> FlowResult<()> {
        info!(label = %case.label, "checking navigation case");
        driver
            .click(&case.nav_selector())
            .await
            .map_err(|_| FlowError::PageAssertion {
                label: case.label.clone(),
            })?;
        driver
            .wait_for_visible(&case.target, &self.config.wait)
            .await
            .map_err(|_| FlowError::PageAssertion {
                label: case.label.clone(),
            })
    }

    async fn logout<D: FlowDriver + ?Sized>(&self, driver: &mut D) -> FlowResult<()> {
        info!(admin = %self.config.admin_name, "opening user menu");
        driver
            .click(&Selector::css_with_text("button", &self.config.admin_name))
            .await
            .map_err(|e| FlowError::logout(format!("user menu did not open ({e})")))?;

        let logout = Selector::text("Logout");
        driver
            .wait_for_visible(&logout, &self.config.wait)
            .await
            .map_err(|e| FlowError::logout(format!("logout entry never appeared ({e})")))?;
        driver
            .click(&logout)
            .await
            .map_err(|e| FlowError::logout(e.to_string()))?;

        driver
            .wait_for_visible(&self.config.login_view, &self.config.wait)
            .await
            .map_err(|e| FlowError::logout(format!("login view never reappeared ({e})")))?;
        info!("logout completed");
        Ok(())
    }
}

/// Launch a browser, run the flow, and close the browser on every exit
/// path before propagating the outcome.
///
/// The browser is owned exclusively for the duration of the run and
/// released exactly once, success or failure.
///
/// # Errors
///
/// Returns the first failing step's error; a close error surfaces only
/// when the flow itself succeeded.
pub async fn execute(
    flow: FlowConfig,
    browser: BrowserConfig,
    sink: &mut dyn ProgressSink,
) -> FlowResult<FlowReport> {
    let browser = Browser::launch(browser).await?;
    let mut page = match browser.new_page().await {
        Ok(page) => page,
        Err(e) => {
            let _ = browser.close().await;
            return Err(e);
        }
    };

    let runner = FlowRunner::new(flow);
    let outcome = runner.run(&mut page, sink).await;
    let closed = browser.close().await;

    let report = outcome?;
    closed?;
    Ok(report)
}


#[cfg(all(test, not(feature = "browser")))]
mod execute_tests {
    use super::*;

    struct NullSink;
    impl ProgressSink for NullSink {}

    #[tokio::test]
    async fn test_flow_runs_through_a_page_driver() {
        // Exercises the FlowDriver impl for Page: every call must reach the
        // inherent method, not loop back into the trait.
        let mut page = Page::new();
        for marker in ["Dashboard", "Customers", "Logout", "Login"] {
            page.set_visible(&Selector::text(marker));
        }

        let flow = FlowConfig::new("http://localhost:5173", "a@b.c", "pw")
            .with_cases(vec![NavigationCase::new(
                "Customers",
                Selector::text("Customers"),
            )])
            .with_wait(WaitOptions::new().with_timeout(50).with_poll_interval(5));

        let report = FlowRunner::new(flow)
            .run(&mut page, &mut NullSink)
            .await
            .unwrap();

        assert_eq!(report.cases_passed, 1);
        assert_eq!(page.actions()[0], "goto http://localhost:5173/login");
        assert!(page
            .actions()
            .contains(&"click nav a, nav button >> text=Customers".to_string()));
    }

    #[tokio::test]
    async fn test_execute_surfaces_login_failure_after_releasing_browser() {
        // The mock page reports nothing visible, so the dashboard landmark
        // wait expires and the run aborts at the login step.
        let flow = FlowConfig::new("http://localhost:5173", "a@b.c", "pw")
            .with_wait(WaitOptions::new().with_timeout(30).with_poll_interval(5));
        let result = execute(flow, BrowserConfig::default(), &mut NullSink).await;
        assert!(matches!(result, Err(FlowError::Login { .. })));
    }
}
