//! Element selectors rendered to JavaScript query expressions.
//!
//! A [`Selector`] describes how to locate one element on the page. It is
//! evaluated inside the page via `Runtime.evaluate`, so every variant
//! renders to a JavaScript expression producing the element (or
//! `null`/`undefined` when nothing matches).

use std::fmt;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g. `input[name='email']`)
    Css(String),
    /// Text content selector: the innermost element containing the text
    Text(String),
    /// CSS selector filtered by text content (e.g. a button labelled "Login")
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

/// Escape a Rust string as a JavaScript string literal.
///
/// JSON string escaping is valid JavaScript for the full Unicode range,
/// unlike Rust's `{:?}` formatting.
fn js(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""))
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a CSS selector with a text filter
    #[must_use]
    pub fn css_with_text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Self::CssWithText {
            css: css.into(),
            text: text.into(),
        }
    }

    /// Render to a JavaScript expression yielding the matched element
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({})", js(s)),
            // `.pop()` keeps the last match in document order, which is the
            // innermost element containing the text rather than <html>.
            Self::Text(t) => format!(
                "Array.from(document.querySelectorAll('*')).filter(el => el.textContent.includes({})).pop()",
                js(t)
            ),
            Self::CssWithText { css, text } => format!(
                "Array.from(document.querySelectorAll({})).find(el => el.textContent.includes({}))",
                js(css),
                js(text)
            ),
        }
    }

    /// Render to a JavaScript expression checking element visibility.
    ///
    /// Visible means the element exists and has a non-empty client rect,
    /// matching Playwright's `is_visible` semantics.
    #[must_use]
    pub fn to_visibility_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; \
             const rect = el.getBoundingClientRect(); \
             return rect.width > 0 && rect.height > 0; }})()",
            self.to_query()
        )
    }

    /// Render to a JavaScript expression clicking the matched element.
    ///
    /// Evaluates to `true` when an element matched, `false` otherwise.
    #[must_use]
    pub fn to_click_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; el.click(); return true; }})()",
            self.to_query()
        )
    }

    /// Render to a JavaScript expression filling the matched form field.
    ///
    /// Sets the value through the prototype's native setter and dispatches
    /// `input` and `change` events so framework-controlled inputs (React,
    /// Vue) observe the update.
    #[must_use]
    pub fn to_fill_query(&self, value: &str) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; \
             const desc = Object.getOwnPropertyDescriptor(Object.getPrototypeOf(el), 'value'); \
             if (desc && desc.set) {{ desc.set.call(el, {v}); }} else {{ el.value = {v}; }} \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
             return true; }})()",
            self.to_query(),
            v = js(value)
        )
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "{s}"),
            Self::Text(t) => write!(f, "text={t}"),
            Self::CssWithText { css, text } => write!(f, "{css} >> text={text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_query() {
        let sel = Selector::css("input[name='email']");
        assert_eq!(
            sel.to_query(),
            "document.querySelector(\"input[name='email']\")"
        );
    }

    #[test]
    fn test_text_query_takes_innermost_match() {
        let sel = Selector::text("Dashboard");
        let query = sel.to_query();
        assert!(query.contains("textContent.includes(\"Dashboard\")"));
        assert!(query.ends_with(".pop()"));
    }

    #[test]
    fn test_css_with_text_query() {
        let sel = Selector::css_with_text("button", "Login");
        let query = sel.to_query();
        assert!(query.contains("querySelectorAll(\"button\")"));
        assert!(query.contains("includes(\"Login\")"));
    }

    #[test]
    fn test_visibility_query_checks_client_rect() {
        let sel = Selector::css("main");
        let query = sel.to_visibility_query();
        assert!(query.contains("getBoundingClientRect"));
        assert!(query.contains("rect.width > 0"));
    }

    #[test]
    fn test_fill_query_dispatches_input_events() {
        let sel = Selector::css("input[name='password']");
        let query = sel.to_fill_query("hunter2");
        assert!(query.contains("\"hunter2\""));
        assert!(query.contains("new Event('input', { bubbles: true })"));
        assert!(query.contains("new Event('change', { bubbles: true })"));
    }

    #[test]
    fn test_fill_query_escapes_quotes() {
        let sel = Selector::css("input");
        let query = sel.to_fill_query("pa\"ss");
        assert!(query.contains("\"pa\\\"ss\""));
    }

    #[test]
    fn test_display() {
        assert_eq!(Selector::css("nav").to_string(), "nav");
        assert_eq!(Selector::text("Logout").to_string(), "text=Logout");
        assert_eq!(
            Selector::css_with_text("button", "Admin").to_string(),
            "button >> text=Admin"
        );
    }
}
