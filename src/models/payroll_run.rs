//! Payroll run model and lifecycle states.
//!
//! This module defines the [`PayrollRun`] entity grouping one
//! organization's payroll for one calendar month, the [`PayrollStatus`]
//! lifecycle enum and the [`RunTotals`] aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle states of a payroll run.
///
/// A run moves Draft -> Processing -> Completed -> Paid. Processing and
/// Completed are reached through [`process`](crate::engine::PayrollEngine::process_run);
/// Paid is reached only by an explicit, confirmed status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Initial state; the run exists but no payslips were generated.
    Draft,
    /// Employees selected, payslip generation in flight or partially done.
    Processing,
    /// Every selected employee has a generated payslip.
    Completed,
    /// Terminal state; the run has been paid out.
    Paid,
}

impl PayrollStatus {
    /// Returns true if moving from this status to `next` is a legal
    /// lifecycle transition.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::PayrollStatus;
    ///
    /// assert!(PayrollStatus::Draft.can_transition_to(PayrollStatus::Processing));
    /// assert!(PayrollStatus::Completed.can_transition_to(PayrollStatus::Paid));
    /// assert!(!PayrollStatus::Draft.can_transition_to(PayrollStatus::Paid));
    /// assert!(!PayrollStatus::Completed.can_transition_to(PayrollStatus::Draft));
    /// ```
    pub fn can_transition_to(&self, next: PayrollStatus) -> bool {
        matches!(
            (self, next),
            (PayrollStatus::Draft, PayrollStatus::Processing)
                | (PayrollStatus::Processing, PayrollStatus::Processing)
                | (PayrollStatus::Processing, PayrollStatus::Completed)
                | (PayrollStatus::Completed, PayrollStatus::Paid)
        )
    }

    /// Returns true if employee processing may start or continue in this
    /// status. Only Draft and Processing runs accept processing.
    pub fn can_process(&self) -> bool {
        matches!(self, PayrollStatus::Draft | PayrollStatus::Processing)
    }
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayrollStatus::Draft => "draft",
            PayrollStatus::Processing => "processing",
            PayrollStatus::Completed => "completed",
            PayrollStatus::Paid => "paid",
        };
        f.write_str(name)
    }
}

/// Run-level totals rolled up from the run's payslips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Number of payslips in the run.
    pub total_employees: u32,
    /// Sum of payslip gross salaries.
    pub total_gross_amount: Decimal,
    /// Sum of payslip net salaries.
    pub total_net_amount: Decimal,
}

impl RunTotals {
    /// Returns zeroed totals for a freshly created run.
    pub fn zero() -> Self {
        Self {
            total_employees: 0,
            total_gross_amount: Decimal::ZERO,
            total_net_amount: Decimal::ZERO,
        }
    }
}

/// One organization's payroll cycle for one calendar month and year.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayrollRun, PayrollStatus};
/// use chrono::NaiveDate;
///
/// let run = PayrollRun::new("org_001".to_string(), 3, 2025).unwrap();
/// assert_eq!(run.status, PayrollStatus::Draft);
/// assert_eq!(run.period_from, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
/// assert_eq!(run.period_to, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Unique identifier for the run.
    pub id: Uuid,
    /// The organization this run belongs to.
    pub organization_id: String,
    /// The calendar month (1-12) of the pay period.
    pub month: u32,
    /// The calendar year of the pay period.
    pub year: i32,
    /// First calendar day of the pay period, derived from month/year.
    pub period_from: NaiveDate,
    /// Last calendar day of the pay period, derived from month/year.
    pub period_to: NaiveDate,
    /// The run's lifecycle status.
    pub status: PayrollStatus,
    /// Totals rolled up from the run's payslips.
    pub totals: RunTotals,
    /// Set when the run transitions into Paid.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// Who triggered processing for this run.
    #[serde(default)]
    pub processed_by: Option<String>,
    /// When processing last ran.
    #[serde(default)]
    pub processed_date: Option<DateTime<Utc>>,
}

impl PayrollRun {
    /// Creates a Draft run for the given organization and period.
    ///
    /// The pay period bounds are auto-derived as the first and last
    /// calendar day of the month. Returns `None` when the month is not in
    /// 1-12.
    pub fn new(organization_id: String, month: u32, year: i32) -> Option<Self> {
        let (period_from, period_to) = Self::period_bounds(month, year)?;
        Some(Self {
            id: Uuid::new_v4(),
            organization_id,
            month,
            year,
            period_from,
            period_to,
            status: PayrollStatus::Draft,
            totals: RunTotals::zero(),
            payment_date: None,
            processed_by: None,
            processed_date: None,
        })
    }

    /// Derives the first and last calendar day of a month.
    ///
    /// Returns `None` when the month is not in 1-12.
    pub fn period_bounds(month: u32, year: i32) -> Option<(NaiveDate, NaiveDate)> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_month_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let last = next_month_first.pred_opt()?;
        Some((first, last))
    }
}
