//! Linear four-step wizard: Input → Preview → Payment → Delivery, plus restart.

use shared::{domain::WizardStep, error::Rejection};
use tracing::debug;

use crate::session::Session;

/// Checks whether `session` may move to `to` without changing anything.
pub fn check(session: &Session, to: WizardStep) -> Result<(), Rejection> {
    let from = session.step();

    // Data preconditions win over edge legality so callers get the actionable reason.
    if to.requires_scripts() && !session.has_scripts() {
        return Err(Rejection::NoScripts);
    }
    if to == WizardStep::Delivery && session.payment_reference().is_none() {
        return Err(Rejection::NoPaymentReference);
    }

    let allowed = matches!(
        (from, to),
        (WizardStep::Input, WizardStep::Preview)
            | (WizardStep::Preview, WizardStep::Payment)
            | (WizardStep::Payment, WizardStep::Delivery)
            | (
                WizardStep::Preview | WizardStep::Payment | WizardStep::Delivery,
                WizardStep::Input
            )
    );
    if allowed {
        Ok(())
    } else {
        Err(Rejection::NotAllowed { from, to })
    }
}

/// Applies a transition. Returning to `Input` clears the scripts and the
/// payment reference; the topic and platform are kept for the form.
pub fn transition(session: &mut Session, to: WizardStep) -> Result<WizardStep, Rejection> {
    check(session, to)?;
    let from = session.step();
    if to == WizardStep::Input {
        session.clear_results();
    }
    session.set_step(to);
    debug!(session_id = %session.id(), %from, %to, "wizard: step changed");
    Ok(from)
}

#[cfg(test)]
#[path = "tests/wizard_tests.rs"]
mod tests;
