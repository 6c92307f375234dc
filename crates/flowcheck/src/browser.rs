//! Browser control for headless smoke runs.
//!
//! This module provides real browser control via the Chrome DevTools
//! Protocol. When compiled with the `browser` feature, it uses chromiumoxide
//! for full CDP support. Without the feature, it provides a mock
//! implementation for unit testing.

use crate::result::FlowResult;

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{BrowserConfig, FlowResult};
    use crate::result::FlowError;
    use crate::selector::Selector;
    use crate::wait::{wait_until, WaitOptions};
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tracing::debug;

    /// Browser instance with real CDP connection
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch a new browser instance with real CDP
        ///
        /// # Errors
        ///
        /// Returns [`FlowError::BrowserLaunch`] if the browser cannot start.
        pub async fn launch(config: BrowserConfig) -> FlowResult<Self> {
            let mut builder =
                CdpConfig::builder().window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|e| FlowError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| FlowError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            // Drive the CDP event stream until the connection drops
            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            debug!(headless = config.headless, "browser launched");

            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Create a new page
        ///
        /// # Errors
        ///
        /// Returns error if the page cannot be created
        pub async fn new_page(&self) -> FlowResult<Page> {
            let browser = self.inner.lock().await;
            let cdp_page =
                browser
                    .new_page("about:blank")
                    .await
                    .map_err(|e| FlowError::Page {
                        message: e.to_string(),
                    })?;

            Ok(Page {
                url: String::from("about:blank"),
                inner: Arc::new(Mutex::new(cdp_page)),
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser, releasing all resources.
        ///
        /// Consumes the instance: a browser can only be closed once.
        pub async fn close(self) -> FlowResult<()> {
            let mut browser = self.inner.lock().await;
            browser
                .close()
                .await
                .map_err(|e| FlowError::BrowserLaunch {
                    message: e.to_string(),
                })?;
            debug!("browser closed");
            Ok(())
        }
    }

    /// A browser page with real CDP connection
    #[derive(Debug)]
    pub struct Page {
        url: String,
        inner: Arc<Mutex<CdpPage>>,
    }

    impl Page {
        /// Navigate to a URL
        ///
        /// # Errors
        ///
        /// Returns [`FlowError::Navigation`] if navigation fails
        pub async fn goto(&mut self, url: &str) -> FlowResult<()> {
            let page = self.inner.lock().await;
            page.goto(url).await.map_err(|e| FlowError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
            drop(page);
            self.url = url.to_string();
            Ok(())
        }

        /// Evaluate a JavaScript expression producing a boolean
        async fn eval_bool(&self, expr: &str) -> FlowResult<bool> {
            let page = self.inner.lock().await;
            let result = page
                .evaluate(expr)
                .await
                .map_err(|e| FlowError::Evaluation {
                    message: e.to_string(),
                })?;
            result.into_value().map_err(|e| FlowError::Evaluation {
                message: e.to_string(),
            })
        }

        /// Fill a form field and dispatch input/change events
        ///
        /// # Errors
        ///
        /// Returns [`FlowError::Page`] if no element matches the selector
        pub async fn fill(&self, selector: &Selector, value: &str) -> FlowResult<()> {
            if self.eval_bool(&selector.to_fill_query(value)).await? {
                Ok(())
            } else {
                Err(FlowError::page(format!(
                    "no element matching {selector} to fill"
                )))
            }
        }

        /// Click the element matching the selector
        ///
        /// # Errors
        ///
        /// Returns [`FlowError::Page`] if no element matches the selector
        pub async fn click(&self, selector: &Selector) -> FlowResult<()> {
            if self.eval_bool(&selector.to_click_query()).await? {
                Ok(())
            } else {
                Err(FlowError::page(format!(
                    "no element matching {selector} to click"
                )))
            }
        }

        /// Check whether the element matching the selector is visible
        ///
        /// # Errors
        ///
        /// Returns error if the visibility script cannot be evaluated
        pub async fn is_visible(&self, selector: &Selector) -> FlowResult<bool> {
            self.eval_bool(&selector.to_visibility_query()).await
        }

        /// Poll until the selector is visible, bounded by the wait options
        ///
        /// # Errors
        ///
        /// Returns [`FlowError::Timeout`] if the element never became visible
        pub async fn wait_for_visible(
            &self,
            selector: &Selector,
            options: &WaitOptions,
        ) -> FlowResult<()> {
            let page = &*self;
            wait_until(move || page.is_visible(selector), options).await
        }

        /// Get current URL
        #[must_use]
        pub fn current_url(&self) -> &str {
            &self.url
        }
    }
}

// ============================================================================
// Mock Implementation (when `browser` feature is NOT enabled)
// ============================================================================

#[cfg(not(feature = "browser"))]
mod mock {
    use super::{BrowserConfig, FlowResult};
    use crate::selector::Selector;
    use crate::wait::{wait_until, WaitOptions};
    use std::collections::HashSet;

    /// Browser instance for testing (mock when `browser` feature disabled)
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
    }

    impl Browser {
        /// Launch a new browser instance (mock)
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub async fn launch(config: BrowserConfig) -> FlowResult<Self> {
            Ok(Self { config })
        }

        /// Create a new page
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub async fn new_page(&self) -> FlowResult<Page> {
            Ok(Page::new())
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser (mock)
        ///
        /// Consumes the instance: a browser can only be closed once.
        pub async fn close(self) -> FlowResult<()> {
            Ok(())
        }
    }

    /// A browser page for testing (mock when `browser` feature disabled)
    #[derive(Debug)]
    pub struct Page {
        url: String,
        visible: HashSet<String>,
        actions: Vec<String>,
    }

    impl Default for Page {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Page {
        /// Create a new mock page
        #[must_use]
        pub fn new() -> Self {
            Self {
                url: String::from("about:blank"),
                visible: HashSet::new(),
                actions: Vec::new(),
            }
        }

        /// Mark a selector as visible for subsequent checks
        pub fn set_visible(&mut self, selector: &Selector) {
            self.visible.insert(selector.to_string());
        }

        /// Actions performed on this page, in order
        #[must_use]
        pub fn actions(&self) -> &[String] {
            &self.actions
        }

        /// Navigate to a URL (recorded)
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub async fn goto(&mut self, url: &str) -> FlowResult<()> {
            self.actions.push(format!("goto {url}"));
            self.url = url.to_string();
            Ok(())
        }

        /// Fill a form field (recorded)
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub async fn fill(&mut self, selector: &Selector, value: &str) -> FlowResult<()> {
            self.actions.push(format!("fill {selector} = {value}"));
            Ok(())
        }

        /// Click an element (recorded)
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub async fn click(&mut self, selector: &Selector) -> FlowResult<()> {
            self.actions.push(format!("click {selector}"));
            Ok(())
        }

        /// Check whether a selector was marked visible
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub async fn is_visible(&self, selector: &Selector) -> FlowResult<bool> {
            Ok(self.visible.contains(&selector.to_string()))
        }

        /// Poll until the selector is visible, bounded by the wait options
        ///
        /// # Errors
        ///
        /// Returns [`crate::FlowError::Timeout`] if never marked visible
        pub async fn wait_for_visible(
            &self,
            selector: &Selector,
            options: &WaitOptions,
        ) -> FlowResult<()> {
            let page = &*self;
            wait_until(move || page.is_visible(selector), options).await
        }

        /// Get current URL
        #[must_use]
        pub fn current_url(&self) -> &str {
            &self.url
        }
    }
}

// Re-export based on feature
#[cfg(feature = "browser")]
pub use cdp::{Browser, Page};

#[cfg(not(feature = "browser"))]
pub use mock::{Browser, Page};

#[cfg(all(test, not(feature = "browser")))]
mod tests {
    use super::*;
    use crate::result::FlowError;
    use crate::selector::Selector;
    use crate::wait::WaitOptions;

    #[tokio::test]
    async fn test_mock_launch_and_close() {
        let browser = Browser::launch(BrowserConfig::default()).await.unwrap();
        assert!(browser.config().headless);
        browser.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_mock_page_records_actions() {
        let browser = Browser::launch(BrowserConfig::default()).await.unwrap();
        let mut page = browser.new_page().await.unwrap();

        page.goto("http://localhost:5173/login").await.unwrap();
        page.fill(&Selector::css("input[name='email']"), "admin@example.com")
            .await
            .unwrap();
        page.click(&Selector::css_with_text("button", "Login"))
            .await
            .unwrap();

        assert_eq!(page.current_url(), "http://localhost:5173/login");
        assert_eq!(
            page.actions(),
            &[
                "goto http://localhost:5173/login",
                "fill input[name='email'] = admin@example.com",
                "click button >> text=Login",
            ]
        );
    }

    #[tokio::test]
    async fn test_mock_visibility() {
        let mut page = Page::new();
        let landmark = Selector::text("Dashboard");
        assert!(!page.is_visible(&landmark).await.unwrap());

        page.set_visible(&landmark);
        assert!(page.is_visible(&landmark).await.unwrap());

        let options = WaitOptions::new().with_timeout(50).with_poll_interval(5);
        page.wait_for_visible(&landmark, &options).await.unwrap();
    }

    #[tokio::test]
    async fn test_mock_wait_times_out_when_never_visible() {
        let page = Page::new();
        let options = WaitOptions::new().with_timeout(30).with_poll_interval(5);
        let result = page
            .wait_for_visible(&Selector::text("Dashboard"), &options)
            .await;
        assert!(matches!(result, Err(FlowError::Timeout { ms: 30 })));
    }

    #[test]
    fn test_browser_config_builders() {
        let config = BrowserConfig::default()
            .with_headless(false)
            .with_viewport(1920, 1080)
            .with_chromium_path("/usr/bin/chromium")
            .with_no_sandbox();
        assert!(!config.headless);
        assert_eq!(config.viewport_width, 1920);
        assert_eq!(config.viewport_height, 1080);
        assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
        assert!(!config.sandbox);
    }
}
