use shared::{
    domain::{PaymentMethod, Platform, SessionId, WizardStep},
    protocol::{GeneratedScript, PaymentReference, SessionSnapshot, StepIndicator},
};

/// State for one wizard run.
///
/// Fields are private so the step/script invariant can only be changed through
/// [`crate::wizard::transition`] and the controller.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    topic: String,
    platform: Platform,
    scripts: Vec<GeneratedScript>,
    step: WizardStep,
    payment_method: PaymentMethod,
    payment_reference: Option<PaymentReference>,
    cursor: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Platform::default())
    }
}

impl Session {
    pub fn new(platform: Platform) -> Self {
        Self {
            id: SessionId::new(),
            topic: String::new(),
            platform,
            scripts: Vec::new(),
            step: WizardStep::Input,
            payment_method: PaymentMethod::default(),
            payment_reference: None,
            cursor: 0,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn scripts(&self) -> &[GeneratedScript] {
        &self.scripts
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn payment_reference(&self) -> Option<&PaymentReference> {
        self.payment_reference.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn has_scripts(&self) -> bool {
        !self.scripts.is_empty()
    }

    pub(crate) fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub(crate) fn set_platform(&mut self, platform: Platform) {
        self.platform = platform;
    }

    pub(crate) fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Replaces the batch wholesale and rewinds the preview cursor.
    pub(crate) fn replace_scripts(&mut self, scripts: Vec<GeneratedScript>) {
        self.scripts = scripts;
        self.cursor = 0;
    }

    pub(crate) fn set_payment_reference(&mut self, reference: Option<PaymentReference>) {
        self.payment_reference = reference;
    }

    pub(crate) fn set_step(&mut self, step: WizardStep) {
        self.step = step;
    }

    pub(crate) fn clear_results(&mut self) {
        self.scripts.clear();
        self.payment_reference = None;
        self.cursor = 0;
    }

    pub fn can_go_previous(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.cursor + 1 < self.scripts.len()
    }

    pub(crate) fn advance_cursor(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub(crate) fn rewind_cursor(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let current = self.step.number();
        let steps = WizardStep::ALL
            .into_iter()
            .map(|step| StepIndicator {
                step,
                reached: step.number() <= current,
                current: step == self.step,
            })
            .collect();
        let counter = (!self.scripts.is_empty())
            .then(|| format!("{}/{}", self.cursor + 1, self.scripts.len()));

        SessionSnapshot {
            session_id: self.id,
            topic: self.topic.clone(),
            platform: self.platform,
            step: self.step,
            steps,
            scripts: self.scripts.clone(),
            payment_method: self.payment_method,
            payment_reference: self.payment_reference.clone(),
            cursor: self.cursor,
            counter,
            can_go_previous: self.can_go_previous(),
            can_go_next: self.can_go_next(),
        }
    }
}
