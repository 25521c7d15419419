//! Salary structure model and related types.
//!
//! This module defines the [`SalaryStructure`] attached to an employee for
//! an effective date range, along with its [`ComponentAssignment`] entries
//! and the [`PaymentMode`] enum.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{CalculationType, ComponentType};

/// Represents how an employee's salary is disbursed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    /// Direct deposit to the employee's bank account.
    BankTransfer,
    /// Cash payment.
    Cash,
    /// Payment by cheque.
    Cheque,
    /// UPI transfer.
    Upi,
}

/// One salary component attached to a structure with a concrete amount.
///
/// The assignment snapshots the catalog fields it needs so that later
/// catalog edits do not change the meaning of an existing structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentAssignment {
    /// The catalog component this assignment references.
    pub component_id: Uuid,
    /// The component's code at assignment time.
    pub component_code: String,
    /// The component's name at assignment time.
    pub component_name: String,
    /// The component's pay category.
    pub component_type: ComponentType,
    /// How the component's amount is determined.
    pub calculation_type: CalculationType,
    /// The monthly currency amount for this component (>= 0).
    pub amount: Decimal,
    /// The percentage value (0-100) for percentage-calculated components.
    #[serde(default)]
    pub percentage_value: Option<Decimal>,
    /// The opaque formula string for formula-calculated components.
    #[serde(default)]
    pub calculation_formula: Option<String>,
    /// Whether this assignment is shown as a payslip line.
    pub display_in_payslip: bool,
    /// Display ordering within the payslip.
    pub sort_order: u32,
}

/// The versioned set of components and amounts effective for an employee
/// over a date range.
///
/// `gross_salary` and `net_salary` are derived from the assignments and
/// are recomputed by every mutating operation; they are never edited
/// independently.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PaymentMode, SalaryStructure};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let structure = SalaryStructure {
///     id: Uuid::new_v4(),
///     employee_id: "emp_001".to_string(),
///     effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     effective_to: None,
///     ctc_annual: Decimal::new(600_000, 0),
///     ctc_monthly: Decimal::new(50_000, 0),
///     gross_salary: Decimal::ZERO,
///     net_salary: Decimal::ZERO,
///     payment_mode: PaymentMode::BankTransfer,
///     assignments: vec![],
/// };
/// assert!(structure.is_ongoing());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStructure {
    /// Unique identifier for the structure.
    pub id: Uuid,
    /// The employee this structure belongs to.
    pub employee_id: String,
    /// The first date this structure is effective (inclusive).
    pub effective_from: NaiveDate,
    /// The last date this structure is effective (inclusive).
    /// `None` means the structure is ongoing.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// Annual cost-to-company.
    pub ctc_annual: Decimal,
    /// Monthly cost-to-company, derived from `ctc_annual / 12`.
    pub ctc_monthly: Decimal,
    /// Derived: sum of earning and allowance amounts.
    pub gross_salary: Decimal,
    /// Derived: gross salary minus deduction amounts.
    pub net_salary: Decimal,
    /// How the salary is disbursed.
    pub payment_mode: PaymentMode,
    /// The components attached to this structure.
    pub assignments: Vec<ComponentAssignment>,
}

impl SalaryStructure {
    /// Computes gross salary from the current assignments.
    ///
    /// Gross is the sum of amounts whose component type contributes to
    /// gross (earnings and allowances). Reimbursements are excluded.
    pub fn computed_gross(&self) -> Decimal {
        self.assignments
            .iter()
            .filter(|a| a.component_type.contributes_to_gross())
            .map(|a| a.amount)
            .sum()
    }

    /// Computes net salary from the current assignments.
    ///
    /// Net is gross minus the sum of deduction amounts.
    pub fn computed_net(&self) -> Decimal {
        let deductions: Decimal = self
            .assignments
            .iter()
            .filter(|a| a.component_type.is_deduction())
            .map(|a| a.amount)
            .sum();
        self.computed_gross() - deductions
    }

    /// Returns a copy with `gross_salary` and `net_salary` recomputed
    /// from the assignments.
    ///
    /// Every mutating operation goes through this so the derived fields
    /// can never drift from the itemized list.
    pub fn recomputed(mut self) -> Self {
        self.gross_salary = self.computed_gross();
        self.net_salary = self.computed_net();
        self
    }

    /// Adds an assignment and returns the recomputed structure.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::DuplicateAssignment`] if the component is
    /// already attached to this structure.
    pub fn with_assignment(mut self, assignment: ComponentAssignment) -> PayrollResult<Self> {
        if self
            .assignments
            .iter()
            .any(|a| a.component_id == assignment.component_id)
        {
            return Err(PayrollError::DuplicateAssignment {
                code: assignment.component_code,
            });
        }
        self.assignments.push(assignment);
        Ok(self.recomputed())
    }

    /// Removes the assignment for a component and returns the recomputed
    /// structure. Removing an absent component is a no-op.
    pub fn without_assignment(mut self, component_id: Uuid) -> Self {
        self.assignments.retain(|a| a.component_id != component_id);
        self.recomputed()
    }

    /// Changes the amount of an existing assignment and returns the
    /// recomputed structure.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::ComponentNotFound`] if the component is
    /// not attached to this structure.
    pub fn with_amount(mut self, component_id: Uuid, amount: Decimal) -> PayrollResult<Self> {
        let assignment = self
            .assignments
            .iter_mut()
            .find(|a| a.component_id == component_id)
            .ok_or(PayrollError::ComponentNotFound { id: component_id })?;
        assignment.amount = amount;
        Ok(self.recomputed())
    }

    /// Returns true if the structure has no end date.
    pub fn is_ongoing(&self) -> bool {
        self.effective_to.is_none()
    }

    /// Returns true if the structure's effective range covers any part of
    /// the given period.
    ///
    /// A structure covers a period when it starts on or before the
    /// period's end and either is ongoing or ends on or after the
    /// period's start.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{PaymentMode, SalaryStructure};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let structure = SalaryStructure {
    ///     id: Uuid::new_v4(),
    ///     employee_id: "emp_001".to_string(),
    ///     effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    ///     effective_to: Some(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()),
    ///     ctc_annual: Decimal::ZERO,
    ///     ctc_monthly: Decimal::ZERO,
    ///     gross_salary: Decimal::ZERO,
    ///     net_salary: Decimal::ZERO,
    ///     payment_mode: PaymentMode::Cash,
    ///     assignments: vec![],
    /// };
    ///
    /// let march_1 = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    /// let march_31 = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
    /// assert!(structure.covers(march_1, march_31));
    ///
    /// let july_1 = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    /// let july_31 = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();
    /// assert!(!structure.covers(july_1, july_31));
    /// ```
    pub fn covers(&self, period_from: NaiveDate, period_to: NaiveDate) -> bool {
        self.effective_from <= period_to
            && self.effective_to.map_or(true, |to| to >= period_from)
    }

    /// Returns true if this structure's effective range overlaps another's.
    pub fn overlaps(&self, other: &SalaryStructure) -> bool {
        let starts_before_other_ends = match other.effective_to {
            Some(to) => self.effective_from <= to,
            None => true,
        };
        let other_starts_before_self_ends = match self.effective_to {
            Some(to) => other.effective_from <= to,
            None => true,
        };
        starts_before_other_ends && other_starts_before_self_ends
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn assignment(
        code: &str,
        component_type: ComponentType,
        amount: Decimal,
    ) -> ComponentAssignment {
        ComponentAssignment {
            component_id: Uuid::new_v4(),
            component_code: code.to_string(),
            component_name: code.to_string(),
            component_type,
            calculation_type: CalculationType::Fixed,
            amount,
            percentage_value: None,
            calculation_formula: None,
            display_in_payslip: true,
            sort_order: 1,
        }
    }

    fn empty_structure() -> SalaryStructure {
        SalaryStructure {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            effective_to: None,
            ctc_annual: dec("600000"),
            ctc_monthly: dec("50000"),
            gross_salary: Decimal::ZERO,
            net_salary: Decimal::ZERO,
            payment_mode: PaymentMode::BankTransfer,
            assignments: vec![],
        }
    }

    /// Basic 30000 + HRA 12000 - PF 3600.
    #[test]
    fn test_gross_and_net_from_mixed_assignments() {
        let structure = empty_structure()
            .with_assignment(assignment("BASIC", ComponentType::Earning, dec("30000")))
            .unwrap()
            .with_assignment(assignment("HRA", ComponentType::Allowance, dec("12000")))
            .unwrap()
            .with_assignment(assignment("PF", ComponentType::Deduction, dec("3600")))
            .unwrap();

        assert_eq!(structure.gross_salary, dec("42000"));
        assert_eq!(structure.net_salary, dec("38400"));
    }

    #[test]
    fn test_reimbursement_excluded_from_gross_and_net() {
        let structure = empty_structure()
            .with_assignment(assignment("BASIC", ComponentType::Earning, dec("30000")))
            .unwrap()
            .with_assignment(assignment(
                "FUEL",
                ComponentType::Reimbursement,
                dec("5000"),
            ))
            .unwrap();

        assert_eq!(structure.gross_salary, dec("30000"));
        assert_eq!(structure.net_salary, dec("30000"));
    }

    #[test]
    fn test_net_equals_gross_with_no_deductions() {
        let structure = empty_structure()
            .with_assignment(assignment("BASIC", ComponentType::Earning, dec("25000")))
            .unwrap();

        assert_eq!(structure.gross_salary, dec("25000"));
        assert_eq!(structure.net_salary, dec("25000"));
    }

    #[test]
    fn test_duplicate_assignment_rejected() {
        let basic = assignment("BASIC", ComponentType::Earning, dec("30000"));
        let duplicate = ComponentAssignment {
            amount: dec("35000"),
            ..basic.clone()
        };

        let result = empty_structure()
            .with_assignment(basic)
            .unwrap()
            .with_assignment(duplicate);

        match result.unwrap_err() {
            PayrollError::DuplicateAssignment { code } => assert_eq!(code, "BASIC"),
            other => panic!("Expected DuplicateAssignment, got {:?}", other),
        }
    }

    #[test]
    fn test_without_assignment_recomputes() {
        let basic = assignment("BASIC", ComponentType::Earning, dec("30000"));
        let basic_id = basic.component_id;

        let structure = empty_structure()
            .with_assignment(basic)
            .unwrap()
            .with_assignment(assignment("HRA", ComponentType::Allowance, dec("12000")))
            .unwrap()
            .without_assignment(basic_id);

        assert_eq!(structure.assignments.len(), 1);
        assert_eq!(structure.gross_salary, dec("12000"));
        assert_eq!(structure.net_salary, dec("12000"));
    }

    #[test]
    fn test_with_amount_recomputes() {
        let basic = assignment("BASIC", ComponentType::Earning, dec("30000"));
        let basic_id = basic.component_id;

        let structure = empty_structure()
            .with_assignment(basic)
            .unwrap()
            .with_amount(basic_id, dec("32000"))
            .unwrap();

        assert_eq!(structure.gross_salary, dec("32000"));
    }

    #[test]
    fn test_with_amount_unknown_component_fails() {
        let result = empty_structure().with_amount(Uuid::new_v4(), dec("100"));
        assert!(matches!(
            result.unwrap_err(),
            PayrollError::ComponentNotFound { .. }
        ));
    }

    #[test]
    fn test_covers_period_ongoing_structure() {
        let structure = empty_structure();
        let from = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2030, 1, 31).unwrap();
        assert!(structure.covers(from, to));
    }

    #[test]
    fn test_covers_period_before_effective_from() {
        let structure = empty_structure();
        let from = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert!(!structure.covers(from, to));
    }

    #[test]
    fn test_covers_period_after_effective_to() {
        let mut structure = empty_structure();
        structure.effective_to = Some(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        let from = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();
        assert!(!structure.covers(from, to));
    }

    #[test]
    fn test_covers_partial_overlap_at_range_edge() {
        let mut structure = empty_structure();
        structure.effective_to = Some(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        let from = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert!(structure.covers(from, to));
    }

    #[test]
    fn test_overlaps_bounded_ranges() {
        let mut first = empty_structure();
        first.effective_to = Some(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());

        let mut second = empty_structure();
        second.effective_from = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        second.effective_to = Some(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());

        assert!(first.overlaps(&second));
        assert!(second.overlaps(&first));
    }

    #[test]
    fn test_disjoint_ranges_do_not_overlap() {
        let mut first = empty_structure();
        first.effective_to = Some(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());

        let mut second = empty_structure();
        second.effective_from = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        second.effective_to = None;

        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn test_two_ongoing_structures_overlap() {
        let first = empty_structure();
        let mut second = empty_structure();
        second.effective_from = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(first.overlaps(&second));
    }

    #[test]
    fn test_payment_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&PaymentMode::BankTransfer).unwrap(),
            "\"bank_transfer\""
        );
        assert_eq!(serde_json::to_string(&PaymentMode::Upi).unwrap(), "\"upi\"");
    }

    #[test]
    fn test_structure_serialization_round_trip() {
        let structure = empty_structure()
            .with_assignment(assignment("BASIC", ComponentType::Earning, dec("30000")))
            .unwrap();

        let json = serde_json::to_string(&structure).unwrap();
        let deserialized: SalaryStructure = serde_json::from_str(&json).unwrap();
        assert_eq!(structure, deserialized);
    }
}
