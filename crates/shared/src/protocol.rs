use serde::{Deserialize, Serialize};

use crate::domain::{PaymentMethod, Platform, SessionId, WizardStep};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedScript {
    pub ordinal: usize,
    pub title: String,
    pub body: String,
    pub platform: Platform,
}

/// Opaque reference returned by the external checkout provider. Never validated locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentReference(pub String);

impl PaymentReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutHandoff {
    pub url: String,
    pub topic: String,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepIndicator {
    pub step: WizardStep,
    pub reached: bool,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub topic: String,
    pub platform: Platform,
    pub step: WizardStep,
    pub steps: Vec<StepIndicator>,
    pub scripts: Vec<GeneratedScript>,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<PaymentReference>,
    pub cursor: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter: Option<String>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl SessionSnapshot {
    pub fn current_script(&self) -> Option<&GeneratedScript> {
        self.scripts.get(self.cursor)
    }
}

/// One delivery card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptView {
    pub ordinal: usize,
    pub heading: String,
    pub title: String,
    pub body: String,
    pub trending_sound: String,
    pub hashtags: String,
}
