//! Hand-off to the external checkout page.
//!
//! Only the topic leaves this process, as a tracking query parameter. Amounts,
//! signing and card data are entirely the provider's business, and the
//! reference that comes back on the success callback is recorded as-is.

use chrono::{DateTime, Utc};
use shared::{
    error::FlowError,
    protocol::{CheckoutHandoff, PaymentReference},
};
use thiserror::Error;
use url::Url;

use crate::session::Session;

pub const DEFAULT_CHECKOUT_URL: &str = "https://www.stripe.com/test_6ou00kginbN30ldgo2gA800";
pub const TOPIC_PARAM: &str = "topic";

#[derive(Debug, Error)]
pub enum CheckoutConfigError {
    #[error("invalid checkout endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
    #[error("checkout endpoint '{0}' must use http or https")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    endpoint: Url,
}

impl CheckoutConfig {
    pub fn new(endpoint: &str) -> Result<Self, CheckoutConfigError> {
        let endpoint = endpoint.trim();
        let url = Url::parse(endpoint).map_err(|source| CheckoutConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CheckoutConfigError::UnsupportedScheme(endpoint.to_string()));
        }
        Ok(Self { endpoint: url })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Endpoint with `topic=<percent-encoded topic>` appended to any existing query.
    pub fn checkout_url(&self, topic: &str) -> Url {
        let mut url = self.endpoint.clone();
        let param = format!("{TOPIC_PARAM}={}", urlencoding::encode(topic));
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{param}"),
            _ => param,
        };
        url.set_query(Some(&query));
        url
    }
}

pub fn begin_checkout(
    session: &Session,
    config: &CheckoutConfig,
) -> Result<CheckoutHandoff, FlowError> {
    if !session.has_scripts() {
        return Err(FlowError::precondition(
            "generate scripts before starting checkout",
        ));
    }
    Ok(CheckoutHandoff {
        url: config.checkout_url(session.topic()).to_string(),
        topic: session.topic().to_string(),
        method: session.payment_method(),
    })
}

/// Accepts any non-blank reference. Nothing here can tell a real one from a forged one.
pub fn accept_reference(raw: &str) -> Result<PaymentReference, FlowError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FlowError::validation("payment reference must not be empty"));
    }
    Ok(PaymentReference(raw.to_string()))
}

/// Placeholder reference used when no provider callback is wired up.
pub fn mock_reference(now: DateTime<Utc>) -> PaymentReference {
    PaymentReference(format!("mock_intent_{}", now.timestamp_millis()))
}

#[cfg(test)]
#[path = "tests/checkout_tests.rs"]
mod tests;
