use async_trait::async_trait;
use script_core::{CheckoutProvider, ViewBinding, ViewCapabilities};
use shared::{
    error::{ErrorReport, FlowError},
    protocol::{CheckoutHandoff, ScriptView, SessionSnapshot, StepIndicator},
};
use tracing::info;

/// Prints wizard progress to stdout. Silent when `--json` is requested.
pub struct TerminalView {
    quiet: bool,
}

impl TerminalView {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    fn emit(&self, line: String) {
        if !self.quiet {
            println!("{line}");
        }
    }
}

impl ViewBinding for TerminalView {
    fn capabilities(&self) -> ViewCapabilities {
        ViewCapabilities::ALL
    }

    fn show_step(&mut self, snapshot: &SessionSnapshot) {
        self.emit(step_line(&snapshot.steps));
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            self.emit("  ... working".into());
        }
    }

    fn show_error(&mut self, error: &ErrorReport) {
        eprintln!("error [{:?}]: {}", error.code, error.message);
    }

    fn show_preview(&mut self, snapshot: &SessionSnapshot) {
        if let Some(line) = preview_line(snapshot) {
            self.emit(line);
        }
    }
}

/// `[1 Input] > [2 Preview*] > 3 Payment > 4 Delivery`: brackets mark reached
/// steps, the star marks the current one.
pub fn step_line(steps: &[StepIndicator]) -> String {
    steps
        .iter()
        .map(|indicator| {
            let label = format!("{} {}", indicator.step.number(), indicator.step.title());
            match (indicator.reached, indicator.current) {
                (_, true) => format!("[{label}*]"),
                (true, false) => format!("[{label}]"),
                (false, false) => label,
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

pub fn preview_line(snapshot: &SessionSnapshot) -> Option<String> {
    let script = snapshot.current_script()?;
    let counter = snapshot.counter.as_deref().unwrap_or_default();
    Some(format!("  preview {counter}: {}", script.title))
}

pub fn delivery_card(view: &ScriptView) -> String {
    format!(
        "== {} ==\n{}\n{}\n\nTrending sound: {}\nHashtags: {}\n",
        view.heading, view.title, view.body, view.trending_sound, view.hashtags
    )
}

/// Stands in for the browser redirect by printing the checkout URL.
pub struct TerminalCheckout {
    quiet: bool,
}

impl TerminalCheckout {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

#[async_trait]
impl CheckoutProvider for TerminalCheckout {
    async fn open(&self, handoff: &CheckoutHandoff) -> Result<(), FlowError> {
        info!(url = %handoff.url, method = %handoff.method, "console: checkout opened");
        if !self.quiet {
            println!("Open to pay with {}: {}", handoff.method, handoff.url);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
