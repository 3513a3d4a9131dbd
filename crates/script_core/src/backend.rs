use std::time::Duration;

use async_trait::async_trait;
use shared::{
    domain::Platform,
    error::FlowError,
    protocol::{CheckoutHandoff, GeneratedScript},
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::template::{self, DEFAULT_SEEDED_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    #[default]
    Catalog,
    Seeded { seed: u64, count: usize },
}

impl GenerationMode {
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded {
            seed,
            count: DEFAULT_SEEDED_COUNT,
        }
    }
}

#[async_trait]
pub trait ScriptBackend: Send + Sync {
    async fn generate(
        &self,
        topic: &str,
        platform: Platform,
    ) -> Result<Vec<GeneratedScript>, FlowError>;
}

#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Sends the user to the external checkout page. Success arrives later
    /// through [`crate::WizardController::complete_checkout`].
    async fn open(&self, handoff: &CheckoutHandoff) -> Result<(), FlowError>;
}

/// Stands in for a generation service: waits `delay`, then fills templates locally.
pub struct MockScriptBackend {
    delay: Duration,
    mode: GenerationMode,
}

impl MockScriptBackend {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            mode: GenerationMode::Catalog,
        }
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }
}

#[async_trait]
impl ScriptBackend for MockScriptBackend {
    async fn generate(
        &self,
        topic: &str,
        platform: Platform,
    ) -> Result<Vec<GeneratedScript>, FlowError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let scripts = match self.mode {
            GenerationMode::Catalog => template::generate(topic, platform),
            GenerationMode::Seeded { seed, count } => {
                template::generate_seeded(topic, platform, seed, count)
            }
        };
        debug!(
            %platform,
            count = scripts.len(),
            catalog_version = template::CATALOG_VERSION,
            "backend: mock scripts generated"
        );
        Ok(scripts)
    }
}

pub struct UnavailableScriptBackend;

#[async_trait]
impl ScriptBackend for UnavailableScriptBackend {
    async fn generate(
        &self,
        _topic: &str,
        platform: Platform,
    ) -> Result<Vec<GeneratedScript>, FlowError> {
        Err(FlowError::unavailable(
            "script backend",
            format!("no generator configured for {platform}"),
        ))
    }
}

/// Records every hand-off instead of opening a browser.
#[derive(Default)]
pub struct RecordingCheckoutProvider {
    delay: Duration,
    opened: Mutex<Vec<CheckoutHandoff>>,
}

impl RecordingCheckoutProvider {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            opened: Mutex::new(Vec::new()),
        }
    }

    pub async fn opened(&self) -> Vec<CheckoutHandoff> {
        self.opened.lock().await.clone()
    }
}

#[async_trait]
impl CheckoutProvider for RecordingCheckoutProvider {
    async fn open(&self, handoff: &CheckoutHandoff) -> Result<(), FlowError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.opened.lock().await.push(handoff.clone());
        Ok(())
    }
}
