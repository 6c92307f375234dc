//! Flowcheck: linear end-to-end smoke flows for web applications.
//!
//! Drives a real browser through a fixed sequence: log in, click through an
//! ordered list of navigation items, verify each resulting page renders its
//! marker element, exercise the user-menu logout, close the browser. The
//! first failed step aborts the remainder of the run.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌────────────┐    ┌────────────┐
//! │ FlowConfig │───►│ FlowRunner │───►│ Headless   │
//! │ (cases)    │    │ (sequence) │    │ Browser    │
//! └────────────┘    └────────────┘    └────────────┘
//! ```
//!
//! With the `browser` feature the [`browser`] module speaks the Chrome
//! DevTools Protocol via chromiumoxide. Without it, a mock implementation
//! backs the same API so the flow logic stays unit-testable.

#![warn(missing_docs)]

pub mod browser;
pub mod flow;
pub mod result;
pub mod selector;
pub mod wait;

pub use browser::{Browser, BrowserConfig, Page};
pub use flow::{
    execute, FlowConfig, FlowDriver, FlowReport, FlowRunner, NavigationCase, ProgressSink,
};
pub use result::{FlowError, FlowResult};
pub use selector::Selector;
pub use wait::{wait_until, WaitOptions};
