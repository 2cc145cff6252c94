//! Browser action types
//!
//! Actions are instructions executed by the vendor's remote browser. The
//! client never runs them; it only serializes them into the option bag.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of browser action to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserActionKind {
    /// Click an element.
    Click,
    /// Type text into an element.
    Type,
    /// Navigate to a URL.
    Goto,
    /// Wait for a fixed time.
    Wait,
    /// Wait until a selector appears.
    WaitForSelector,
    /// Wait until a JavaScript function returns truthy.
    WaitForFunction,
    /// Wait for a page load state.
    WaitForLoadState,
    /// Wait until a cookie is present.
    WaitForCookie,
    /// Execute a JavaScript snippet.
    ExecuteJs,
    /// Scroll the page.
    Scroll,
    /// Hover over an element.
    Hover,
    /// Send raw keyboard input.
    Keyboard,
    /// Select a dropdown option.
    Dropdown,
    /// Switch into an iframe.
    SwitchIframe,
    /// Resize the viewport.
    SetViewport,
    /// Run nested actions when a condition holds.
    If,
    /// Repeat nested actions while a condition holds.
    While,
    /// Solve a captcha on the page.
    SolveCaptcha,
    /// Strip all iframes from the page.
    RemoveIframes,
}

/// Captcha families the vendor can solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptchaKind {
    /// Cloudflare Turnstile.
    Turnstile,
    /// Google reCAPTCHA (autodetected version).
    Recaptcha,
    /// Google reCAPTCHA v2.
    Recaptchav2,
    /// Google reCAPTCHA v3.
    Recaptchav3,
    /// hCaptcha.
    Hcaptcha,
    /// Arkose Labs FunCaptcha.
    Funcaptcha,
    /// PerimeterX press-and-hold.
    Perimeterx,
    /// MTCaptcha.
    Mtcaptcha,
    /// A vendor-configured custom solver.
    Custom,
}

/// When an action runs relative to page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionPhase {
    /// Before the page starts loading.
    #[serde(rename = "beforeload")]
    BeforeLoad,
    /// After the page has loaded.
    #[serde(rename = "afterload")]
    AfterLoad,
}

/// One step in a vendor-side browser script.
///
/// Only the fields relevant to the action kind are set; everything else is
/// omitted from the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserAction {
    /// The action to perform.
    #[serde(rename = "type")]
    pub kind: BrowserActionKind,
    /// CSS selector for the target element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_selector: Option<String>,
    /// Text to type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// URL to navigate to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Milliseconds to pause after the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait: Option<u64>,
    /// Selector to wait for after the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_selector: Option<String>,
    /// JavaScript code to execute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// JavaScript condition for `if`/`while` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Nested actions run when the condition is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<Vec<BrowserAction>>,
    /// Nested actions run when the condition is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub or: Option<Vec<BrowserAction>>,
    /// Iteration cap for `while` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    /// Captcha family for `solve_captcha`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha: Option<CaptchaKind>,
    /// Extra solver data for `solve_captcha`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha_data: Option<Value>,
    /// When the action runs relative to page load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<ActionPhase>,
    /// Keep going if this action fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_errors: Option<bool>,
    /// Per-action timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Skip cursor simulation and act directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct: Option<bool>,
}

impl BrowserAction {
    /// Creates an action of the given kind with no fields set.
    #[must_use]
    pub const fn new(kind: BrowserActionKind) -> Self {
        Self {
            kind,
            css_selector: None,
            text: None,
            url: None,
            wait: None,
            wait_for_selector: None,
            code: None,
            condition: None,
            then: None,
            or: None,
            max_attempts: None,
            captcha: None,
            captcha_data: None,
            when: None,
            ignore_errors: None,
            timeout: None,
            direct: None,
        }
    }

    /// A click on the element matching `selector`.
    #[must_use]
    pub fn click(selector: impl Into<String>) -> Self {
        let mut action = Self::new(BrowserActionKind::Click);
        action.css_selector = Some(selector.into());
        action
    }

    /// Typing `text` into the element matching `selector`.
    #[must_use]
    pub fn type_text(selector: impl Into<String>, text: impl Into<String>) -> Self {
        let mut action = Self::new(BrowserActionKind::Type);
        action.css_selector = Some(selector.into());
        action.text = Some(text.into());
        action
    }

    /// Navigation to `url`.
    #[must_use]
    pub fn goto(url: impl Into<String>) -> Self {
        let mut action = Self::new(BrowserActionKind::Goto);
        action.url = Some(url.into());
        action
    }

    /// A fixed pause of `millis`.
    #[must_use]
    pub const fn wait_ms(millis: u64) -> Self {
        let mut action = Self::new(BrowserActionKind::Wait);
        action.wait = Some(millis);
        action
    }

    /// Execution of a JavaScript snippet.
    #[must_use]
    pub fn execute_js(code: impl Into<String>) -> Self {
        let mut action = Self::new(BrowserActionKind::ExecuteJs);
        action.code = Some(code.into());
        action
    }

    /// Solving a captcha of the given family.
    #[must_use]
    pub const fn solve_captcha(kind: CaptchaKind) -> Self {
        let mut action = Self::new(BrowserActionKind::SolveCaptcha);
        action.captcha = Some(kind);
        action
    }

    /// Sets the phase the action runs in.
    #[must_use]
    pub const fn in_phase(mut self, phase: ActionPhase) -> Self {
        self.when = Some(phase);
        self
    }

    /// Marks the action as non-fatal on failure.
    #[must_use]
    pub const fn ignoring_errors(mut self) -> Self {
        self.ignore_errors = Some(true);
        self
    }
}
