//! Run-level aggregation.
//!
//! This module rolls the payslips of a payroll run up into [`RunTotals`].
//! Totals are always recomputed from scratch into a fresh value that the
//! caller swaps in; they are never incrementally patched, so they cannot
//! drift from the payslips they summarize.

use rust_decimal::Decimal;

use crate::models::{Payslip, RunTotals};

/// Recomputes run totals from the full set of payslips.
///
/// `total_gross_amount` sums each payslip's gross salary, falling back to
/// its total earnings when no gross figure was captured.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::recompute_totals;
///
/// let totals = recompute_totals([]);
/// assert_eq!(totals.total_employees, 0);
/// ```
pub fn recompute_totals<'a>(payslips: impl IntoIterator<Item = &'a Payslip>) -> RunTotals {
    let mut total_employees: u32 = 0;
    let mut total_gross_amount = Decimal::ZERO;
    let mut total_net_amount = Decimal::ZERO;

    for payslip in payslips {
        total_employees += 1;
        total_gross_amount += payslip.gross_salary.unwrap_or(payslip.total_earnings);
        total_net_amount += payslip.net_salary;
    }

    RunTotals {
        total_employees,
        total_gross_amount,
        total_net_amount,
    }
}
