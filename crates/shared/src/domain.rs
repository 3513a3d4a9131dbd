use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(SessionId);

/// Social platform a batch of scripts is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    Tiktok,
    Youtube,
    Instagram,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Tiktok, Platform::Youtube, Platform::Instagram];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Tiktok => "tiktok",
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
        }
    }

    /// Case-insensitive lookup by wire name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Input,
    Preview,
    Payment,
    Delivery,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Input,
        WizardStep::Preview,
        WizardStep::Payment,
        WizardStep::Delivery,
    ];

    /// 1-based position in the wizard, as shown by the step indicator.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Input => 1,
            WizardStep::Preview => 2,
            WizardStep::Payment => 3,
            WizardStep::Delivery => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Input => "Enter topic",
            WizardStep::Preview => "Preview",
            WizardStep::Payment => "Payment",
            WizardStep::Delivery => "Your scripts",
        }
    }

    /// Steps that require a non-empty script batch.
    pub fn requires_scripts(self) -> bool {
        !matches!(self, WizardStep::Input)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::Input => "input",
            WizardStep::Preview => "preview",
            WizardStep::Payment => "payment",
            WizardStep::Delivery => "delivery",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Paypal,
    Crypto,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Crypto => "crypto",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "card" | "stripe" => Some(PaymentMethod::Card),
            "paypal" => Some(PaymentMethod::Paypal),
            "crypto" => Some(PaymentMethod::Crypto),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_lookup_ignores_case_and_whitespace() {
        assert_eq!(Platform::from_name(" YouTube "), Some(Platform::Youtube));
        assert_eq!(Platform::from_name("snapchat"), None);
    }

    #[test]
    fn steps_are_numbered_in_wizard_order() {
        let numbers: Vec<u8> = WizardStep::ALL.iter().map(|step| step.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert!(!WizardStep::Input.requires_scripts());
        assert!(WizardStep::Delivery.requires_scripts());
    }

    #[test]
    fn wire_names_are_snake_case() {
        let json = serde_json::to_string(&PaymentMethod::Paypal).expect("serialize");
        assert_eq!(json, "\"paypal\"");
        let step: WizardStep = serde_json::from_str("\"delivery\"").expect("deserialize");
        assert_eq!(step, WizardStep::Delivery);
    }
}
