//! Payslip model and payment sub-states.
//!
//! This module defines the per-employee, per-run [`Payslip`] with its
//! itemized earnings and deductions, and the [`PaymentStatus`] sub-state
//! machine each payslip carries once its run is completed.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::AttendanceFacts;

/// Payment sub-states of an individual payslip.
///
/// Independent of the parent run's lifecycle once the run is Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Initial state; payment not yet attempted.
    Pending,
    /// Payment completed; `payment_date` and `payment_reference` are set.
    Paid,
    /// Payment held back pending review; can still be paid or failed.
    OnHold,
    /// Payment attempt failed; terminal.
    Failed,
}

impl PaymentStatus {
    /// Returns true if moving from this status to `next` is legal.
    ///
    /// Re-issuing the current status is handled upstream as an idempotent
    /// no-op, so `next == self` is not considered a transition here.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::PaymentStatus;
    ///
    /// assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Paid));
    /// assert!(PaymentStatus::OnHold.can_transition_to(PaymentStatus::Paid));
    /// assert!(!PaymentStatus::Paid.can_transition_to(PaymentStatus::Failed));
    /// ```
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Pending, PaymentStatus::Paid)
                | (PaymentStatus::Pending, PaymentStatus::OnHold)
                | (PaymentStatus::Pending, PaymentStatus::Failed)
                | (PaymentStatus::OnHold, PaymentStatus::Paid)
                | (PaymentStatus::OnHold, PaymentStatus::Failed)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::OnHold => "on_hold",
            PaymentStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One itemized line on a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipComponent {
    /// The component name at generation time.
    pub component_name: String,
    /// The component amount at generation time.
    pub amount: Decimal,
}

/// The itemized earnings and deductions of a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipComponents {
    /// Earning and allowance lines.
    pub earnings: Vec<PayslipComponent>,
    /// Deduction lines.
    pub deductions: Vec<PayslipComponent>,
}

/// The per-employee, per-run computed pay breakdown.
///
/// A payslip is a value copy of the salary structure it was generated
/// from: later structure edits never alter an issued payslip. Its
/// `net_salary` is always recomputable from the itemized lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for the payslip.
    pub id: Uuid,
    /// The payroll run this payslip belongs to.
    pub payroll_run_id: Uuid,
    /// The employee this payslip is for.
    pub employee_id: String,
    /// Employee name, denormalized for display.
    pub employee_name: String,
    /// Employee code, denormalized for display.
    pub employee_code: String,
    /// Department id, denormalized for display.
    #[serde(default)]
    pub department_id: Option<String>,
    /// Designation id, denormalized for display.
    #[serde(default)]
    pub designation_id: Option<String>,
    /// Attendance facts for the run's period.
    pub attendance: AttendanceFacts,
    /// Itemized earnings and deductions.
    pub components: PayslipComponents,
    /// Gross salary snapshot from the source structure, when available.
    #[serde(default)]
    pub gross_salary: Option<Decimal>,
    /// Sum of the earnings lines.
    pub total_earnings: Decimal,
    /// Sum of the deduction lines.
    pub total_deductions: Decimal,
    /// Take-home amount: `total_earnings - total_deductions`.
    pub net_salary: Decimal,
    /// The payment sub-state of this payslip.
    pub payment_status: PaymentStatus,
    /// Set when the payslip transitions into Paid.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// Uniqueness-bearing token set when the payslip is paid.
    #[serde(default)]
    pub payment_reference: Option<String>,
}

impl Payslip {
    /// Recomputes net salary from the itemized lists.
    ///
    /// The stored `net_salary` must always equal this value; the itemized
    /// lists are the only source of truth.
    pub fn recomputed_net(&self) -> Decimal {
        let earnings: Decimal = self.components.earnings.iter().map(|c| c.amount).sum();
        let deductions: Decimal = self.components.deductions.iter().map(|c| c.amount).sum();
        earnings - deductions
    }
}
