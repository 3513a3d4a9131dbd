use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use chrono::{DateTime, Utc};
use shared::{
    domain::{PaymentMethod, Platform, WizardStep},
    error::{ErrorReport, FlowError, Rejection},
    protocol::{CheckoutHandoff, ScriptView, SessionSnapshot},
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub mod backend;
pub mod checkout;
pub mod delivery;
pub mod session;
pub mod template;
pub mod view;
pub mod wizard;

pub use backend::{
    CheckoutProvider, GenerationMode, MockScriptBackend, RecordingCheckoutProvider,
    ScriptBackend, UnavailableScriptBackend,
};
pub use checkout::{CheckoutConfig, CheckoutConfigError};
pub use session::Session;
pub use view::{DetachedView, ViewBinding, ViewCapabilities};

use view::ViewHandle;

/// Result of an operation that suspends and may be overtaken by a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Applied(T),
    /// A later operation started while this one was suspended; its result was dropped.
    Superseded,
}

impl<T> Outcome<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Outcome::Superseded)
    }
}

struct ControllerState {
    session: Session,
    view: ViewHandle,
}

impl ControllerState {
    fn fail<T>(&mut self, err: FlowError) -> Result<T, FlowError> {
        warn!(
            session_id = %self.session.id(),
            step = %self.session.step(),
            code = ?err.code(),
            "wizard: {err}"
        );
        self.view.error(&ErrorReport::from(&err));
        Err(err)
    }

    fn require_delivery(&mut self, action: &str) -> Result<(), FlowError> {
        if self.session.step() == WizardStep::Delivery {
            return Ok(());
        }
        self.fail(FlowError::precondition(format!(
            "{action} is only available once payment has completed"
        )))
    }
}

/// Owns the single session and sequences every user-triggered operation on it.
///
/// The state lock is never held across a backend or provider call. Each
/// suspending operation takes a ticket; when it resumes and a newer ticket has
/// been issued, its result is discarded.
pub struct WizardController {
    state: Mutex<ControllerState>,
    epoch: AtomicU64,
    backend: Arc<dyn ScriptBackend>,
    checkout: Arc<dyn CheckoutProvider>,
    checkout_config: CheckoutConfig,
}

impl WizardController {
    pub fn new(
        backend: Arc<dyn ScriptBackend>,
        checkout: Arc<dyn CheckoutProvider>,
        checkout_config: CheckoutConfig,
    ) -> Self {
        Self {
            state: Mutex::new(ControllerState {
                session: Session::default(),
                view: ViewHandle::new(Box::new(DetachedView)),
            }),
            epoch: AtomicU64::new(0),
            backend,
            checkout,
            checkout_config,
        }
    }

    pub fn with_view(mut self, binding: Box<dyn ViewBinding>) -> Self {
        self.state.get_mut().view = ViewHandle::new(binding);
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.state.get_mut().session.set_platform(platform);
        self
    }

    fn next_ticket(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == ticket
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.lock().await.session.snapshot()
    }

    /// Validates the topic, generates scripts and moves Input → Preview.
    /// Called again from Preview it replaces the batch in place.
    pub async fn submit_topic(
        &self,
        raw_topic: &str,
        platform: Platform,
    ) -> Result<Outcome<SessionSnapshot>, FlowError> {
        let topic = normalize_topic(raw_topic);
        let (session_id, ticket) = {
            let mut state = self.state.lock().await;
            if topic.is_empty() {
                return state.fail(FlowError::validation("please enter a topic"));
            }
            let from = state.session.step();
            if !matches!(from, WizardStep::Input | WizardStep::Preview) {
                return state.fail(
                    Rejection::NotAllowed {
                        from,
                        to: WizardStep::Preview,
                    }
                    .into(),
                );
            }
            state.view.loading(true);
            (state.session.id(), self.next_ticket())
        };

        info!(%session_id, %platform, topic = %topic, "wizard: generating scripts");
        let generated = self.backend.generate(&topic, platform).await;

        let mut state = self.state.lock().await;
        let step = state.session.step();
        if !self.is_current(ticket) || !matches!(step, WizardStep::Input | WizardStep::Preview) {
            debug!(%session_id, ticket, %step, "wizard: stale generation discarded");
            return Ok(Outcome::Superseded);
        }
        state.view.loading(false);

        let scripts = match generated {
            Ok(scripts) if scripts.is_empty() => {
                return state.fail(FlowError::unavailable(
                    "script backend",
                    "no scripts were returned",
                ));
            }
            Ok(scripts) => scripts,
            Err(err) => return state.fail(err),
        };

        let count = scripts.len();
        state.session.set_topic(topic);
        state.session.set_platform(platform);
        state.session.replace_scripts(scripts);
        if state.session.step() == WizardStep::Input {
            if let Err(rejection) = wizard::transition(&mut state.session, WizardStep::Preview) {
                return state.fail(rejection.into());
            }
        }
        info!(%session_id, count, "wizard: scripts ready for preview");

        let snapshot = state.session.snapshot();
        state.view.step(&snapshot);
        state.view.preview(&snapshot);
        Ok(Outcome::Applied(snapshot))
    }

    /// Records the platform; with a previewed batch in place, regenerates for it.
    pub async fn select_platform(
        &self,
        platform: Platform,
    ) -> Result<Outcome<SessionSnapshot>, FlowError> {
        let topic = {
            let mut state = self.state.lock().await;
            match state.session.step() {
                WizardStep::Input => {
                    state.session.set_platform(platform);
                    return Ok(Outcome::Applied(state.session.snapshot()));
                }
                WizardStep::Preview => state.session.topic().to_string(),
                WizardStep::Payment | WizardStep::Delivery => {
                    return state.fail(FlowError::precondition(
                        "platform cannot change once checkout has started",
                    ));
                }
            }
        };
        self.submit_topic(&topic, platform).await
    }

    pub async fn select_payment_method(&self, method: PaymentMethod) -> SessionSnapshot {
        let mut state = self.state.lock().await;
        state.session.set_payment_method(method);
        state.session.snapshot()
    }

    /// Builds the checkout URL, hands it to the provider and moves Preview → Payment.
    pub async fn request_checkout(&self) -> Result<Outcome<CheckoutHandoff>, FlowError> {
        let (session_id, ticket, handoff) = {
            let mut state = self.state.lock().await;
            let handoff = match checkout::begin_checkout(&state.session, &self.checkout_config)
            {
                Ok(handoff) => handoff,
                Err(err) => return state.fail(err),
            };
            if let Err(rejection) = wizard::check(&state.session, WizardStep::Payment) {
                return state.fail(rejection.into());
            }
            state.view.loading(true);
            (state.session.id(), self.next_ticket(), handoff)
        };

        info!(%session_id, method = %handoff.method, url = %handoff.url, "checkout: handing off");
        let opened = self.checkout.open(&handoff).await;

        let mut state = self.state.lock().await;
        if !self.is_current(ticket) {
            debug!(%session_id, ticket, "checkout: stale hand-off discarded");
            return Ok(Outcome::Superseded);
        }
        state.view.loading(false);
        if let Err(err) = opened {
            return state.fail(err);
        }
        if let Err(rejection) = wizard::transition(&mut state.session, WizardStep::Payment) {
            return state.fail(rejection.into());
        }

        let snapshot = state.session.snapshot();
        state.view.step(&snapshot);
        Ok(Outcome::Applied(handoff))
    }

    /// Success callback from the checkout provider. The reference is trusted as-is.
    pub async fn complete_checkout(&self, reference: &str) -> Result<SessionSnapshot, FlowError> {
        let mut state = self.state.lock().await;
        let reference = match checkout::accept_reference(reference) {
            Ok(reference) => reference,
            Err(err) => return state.fail(err),
        };

        let previous = state.session.payment_reference().cloned();
        state.session.set_payment_reference(Some(reference));
        if let Err(rejection) = wizard::transition(&mut state.session, WizardStep::Delivery) {
            state.session.set_payment_reference(previous);
            return state.fail(rejection.into());
        }
        self.next_ticket();
        info!(
            session_id = %state.session.id(),
            reference = state.session.payment_reference().map(|r| r.as_str()),
            "checkout: completed, delivering scripts"
        );

        let snapshot = state.session.snapshot();
        state.view.step(&snapshot);
        Ok(snapshot)
    }

    /// Back to Input, dropping scripts and payment reference. Also invalidates
    /// any generation or hand-off still in flight.
    pub async fn restart(&self) -> Result<SessionSnapshot, FlowError> {
        let mut state = self.state.lock().await;
        if let Err(rejection) = wizard::transition(&mut state.session, WizardStep::Input) {
            return state.fail(rejection.into());
        }
        self.next_ticket();
        info!(session_id = %state.session.id(), "wizard: restarted");

        state.view.loading(false);
        let snapshot = state.session.snapshot();
        state.view.step(&snapshot);
        Ok(snapshot)
    }

    /// Direct step request, as from a step-indicator click. `Input` behaves like
    /// [`Self::restart`]; other steps are applied only if the wizard allows them.
    /// A successful move supersedes any generation or hand-off in flight.
    pub async fn transition(&self, to: WizardStep) -> Result<SessionSnapshot, FlowError> {
        if to == WizardStep::Input {
            return self.restart().await;
        }
        let mut state = self.state.lock().await;
        if let Err(rejection) = wizard::transition(&mut state.session, to) {
            return state.fail(rejection.into());
        }
        self.next_ticket();
        state.view.loading(false);
        let snapshot = state.session.snapshot();
        state.view.step(&snapshot);
        Ok(snapshot)
    }

    pub async fn next_script(&self) -> SessionSnapshot {
        let mut state = self.state.lock().await;
        if state.session.advance_cursor() {
            let snapshot = state.session.snapshot();
            state.view.preview(&snapshot);
            return snapshot;
        }
        state.session.snapshot()
    }

    pub async fn previous_script(&self) -> SessionSnapshot {
        let mut state = self.state.lock().await;
        if state.session.rewind_cursor() {
            let snapshot = state.session.snapshot();
            state.view.preview(&snapshot);
            return snapshot;
        }
        state.session.snapshot()
    }

    pub async fn render(&self) -> Vec<ScriptView> {
        delivery::render(&self.state.lock().await.session)
    }

    pub async fn export(&self, exported_at: DateTime<Utc>) -> Result<String, FlowError> {
        let mut state = self.state.lock().await;
        state.require_delivery("export")?;
        Ok(delivery::export(&state.session, exported_at))
    }

    pub async fn export_file_name(&self, exported_at: DateTime<Utc>) -> String {
        delivery::export_file_name(self.state.lock().await.session.topic(), exported_at)
    }

    pub async fn share_link(&self, page_url: &str) -> Result<String, FlowError> {
        let mut state = self.state.lock().await;
        state.require_delivery("sharing")?;
        Ok(delivery::share_link(&state.session, page_url))
    }
}

/// Collapses every run of whitespace (line breaks included) into one space and
/// drops other control characters, so a topic always stays on a single line.
pub fn normalize_topic(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| word.chars().filter(|c| !c.is_control()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turns an example chip label such as "🏋️ Fitness Tips" into a form topic.
pub fn topic_from_example_tag(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
