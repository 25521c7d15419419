//! Payslip payment status transitions.
//!
//! This module implements the per-payslip payment sub-state machine:
//! Pending -> {Paid, OnHold, Failed}, with OnHold retryable to Paid or
//! Failed. Transitions are idempotent-guarded and the Paid transition
//! stamps the payment date and a uniqueness-bearing payment reference.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::PayrollSettings;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{PaymentStatus, Payslip};

/// The outcome of a payment status transition.
#[derive(Debug, Clone)]
pub struct PaymentTransitionResult {
    /// The payslip after the transition.
    pub payslip: Payslip,
    /// False when the request was an idempotent re-issue of the current
    /// status and nothing changed.
    pub changed: bool,
}

/// Generates a payment reference token.
///
/// References must stay unique under concurrent Paid transitions, so the
/// token is UUID-derived rather than timestamp-derived.
pub fn generate_payment_reference(settings: &PayrollSettings) -> String {
    format!(
        "{}-{}",
        settings.payment_reference_prefix,
        Uuid::new_v4().simple()
    )
}

/// Applies a payment status transition to a payslip.
///
/// Re-issuing the payslip's current status is a no-op that leaves
/// `payment_date` and `payment_reference` untouched. A transition into
/// Paid stamps `payment_date = today` and a generated reference.
///
/// # Errors
///
/// Returns [`PayrollError::InvalidPaymentTransition`] when the requested
/// status is not reachable from the current one (Pending -> Paid and
/// Pending -> Failed are mutually exclusive outcomes; whichever lands
/// first wins).
pub fn transition_payment(
    mut payslip: Payslip,
    new_status: PaymentStatus,
    today: NaiveDate,
    settings: &PayrollSettings,
) -> PayrollResult<PaymentTransitionResult> {
    if payslip.payment_status == new_status {
        return Ok(PaymentTransitionResult {
            payslip,
            changed: false,
        });
    }

    if !payslip.payment_status.can_transition_to(new_status) {
        return Err(PayrollError::InvalidPaymentTransition {
            from: payslip.payment_status,
            to: new_status,
        });
    }

    payslip.payment_status = new_status;
    if new_status == PaymentStatus::Paid {
        payslip.payment_date = Some(today);
        payslip.payment_reference = Some(generate_payment_reference(settings));
    }

    Ok(PaymentTransitionResult {
        payslip,
        changed: true,
    })
}
