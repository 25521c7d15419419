//! Payslip generation.
//!
//! This module combines an employee's current salary structure with
//! attendance facts to produce a [`Payslip`]. Generation is a value copy:
//! the payslip snapshots the structure's assignments, so later structure
//! edits never alter an issued payslip.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::directory::EmployeeProfile;
use crate::models::{
    AttendanceFacts, PayrollRun, PaymentStatus, Payslip, PayslipComponent, PayslipComponents,
    SalaryStructure,
};

/// Resolves the structure current for a pay period.
///
/// A structure is current when `effective_from <= period_to` and
/// `effective_to` is unset or `>= period_from`. When revisions leave more
/// than one candidate, the latest `effective_from` wins.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolve_current_structure;
/// use chrono::NaiveDate;
///
/// let none: Vec<payroll_engine::models::SalaryStructure> = vec![];
/// let from = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let to = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
/// assert!(resolve_current_structure(&none, from, to).is_none());
/// ```
pub fn resolve_current_structure(
    structures: &[SalaryStructure],
    period_from: NaiveDate,
    period_to: NaiveDate,
) -> Option<&SalaryStructure> {
    structures
        .iter()
        .filter(|s| s.covers(period_from, period_to))
        .max_by_key(|s| s.effective_from)
}

/// Generates a payslip for one employee in one payroll run.
///
/// Each structure assignment is snapshotted into an earnings or
/// deductions line by component type: earnings and allowances land on the
/// earnings side, deductions on the deductions side, and reimbursements
/// on neither. Totals are computed from the itemized lines, never copied:
/// `net_salary = total_earnings - total_deductions`. The payment status
/// starts Pending.
pub fn generate_payslip(
    profile: &EmployeeProfile,
    run: &PayrollRun,
    structure: &SalaryStructure,
    attendance: AttendanceFacts,
) -> Payslip {
    let mut earnings = Vec::new();
    let mut deductions = Vec::new();

    for assignment in &structure.assignments {
        let line = PayslipComponent {
            component_name: assignment.component_name.clone(),
            amount: assignment.amount,
        };
        if assignment.component_type.contributes_to_gross() {
            earnings.push(line);
        } else if assignment.component_type.is_deduction() {
            deductions.push(line);
        }
        // Reimbursements are tracked on the structure but appear on
        // neither side of the payslip.
    }

    let total_earnings: Decimal = earnings.iter().map(|c| c.amount).sum();
    let total_deductions: Decimal = deductions.iter().map(|c| c.amount).sum();

    Payslip {
        id: Uuid::new_v4(),
        payroll_run_id: run.id,
        employee_id: profile.id.clone(),
        employee_name: profile.name.clone(),
        employee_code: profile.code.clone(),
        department_id: profile.department_id.clone(),
        designation_id: profile.designation_id.clone(),
        attendance,
        components: PayslipComponents {
            earnings,
            deductions,
        },
        gross_salary: Some(structure.gross_salary),
        total_earnings,
        total_deductions,
        net_salary: total_earnings - total_deductions,
        payment_status: PaymentStatus::Pending,
        payment_date: None,
        payment_reference: None,
    }
}
