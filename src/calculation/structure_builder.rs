//! Salary structure building and validation.
//!
//! This module turns a caller-supplied structure request into a computed
//! [`SalaryStructure`]: it validates the request field-by-field, resolves
//! each assignment against the component catalog, derives the monthly CTC
//! and computes gross and net salary from the assignments.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::ComponentCatalog;
use crate::config::PayrollSettings;
use crate::error::{FieldError, PayrollError, PayrollResult};
use crate::models::{CalculationType, ComponentAssignment, PaymentMode, SalaryStructure};

/// One requested component assignment, before catalog resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    /// The catalog component to assign.
    pub component_id: Uuid,
    /// The monthly currency amount (>= 0).
    pub amount: Decimal,
    /// Percentage value (0-100) for percentage-calculated components.
    #[serde(default)]
    pub percentage_value: Option<Decimal>,
    /// Opaque formula string for formula-calculated components.
    #[serde(default)]
    pub calculation_formula: Option<String>,
}

/// A request to build a salary structure for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRequest {
    /// The employee the structure is for.
    pub employee_id: String,
    /// First effective date (inclusive).
    pub effective_from: NaiveDate,
    /// Last effective date (inclusive); `None` means ongoing.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// Annual cost-to-company; must be positive.
    pub ctc_annual: Decimal,
    /// How the salary is disbursed.
    pub payment_mode: PaymentMode,
    /// The components to attach.
    pub assignments: Vec<AssignmentRequest>,
}

/// Derives the monthly CTC from the annual figure.
///
/// The result is rounded to the configured currency precision using the
/// configured rounding mode.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::monthly_ctc;
/// use payroll_engine::config::PayrollSettings;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let settings = PayrollSettings::default();
/// let monthly = monthly_ctc(Decimal::from_str("600000").unwrap(), &settings);
/// assert_eq!(monthly, Decimal::from_str("50000").unwrap());
/// ```
pub fn monthly_ctc(ctc_annual: Decimal, settings: &PayrollSettings) -> Decimal {
    (ctc_annual / Decimal::from(12))
        .round_dp_with_strategy(settings.currency_precision, settings.rounding.strategy())
}

/// Builds a computed salary structure from a request.
///
/// Validation failures are collected field-by-field and reported together
/// in one [`PayrollError::Validation`]; nothing is computed or stored when
/// any field is invalid. A component listed twice is rejected as a
/// user-visible [`PayrollError::DuplicateAssignment`], and assigning a
/// deactivated component is rejected with
/// [`PayrollError::InactiveComponent`].
///
/// # Errors
///
/// - [`PayrollError::ComponentNotFound`] when an assignment references an
///   unknown component.
/// - [`PayrollError::DuplicateAssignment`] for a component listed twice.
/// - [`PayrollError::InactiveComponent`] for a deactivated component.
/// - [`PayrollError::Validation`] for malformed fields.
pub fn build_structure(
    request: StructureRequest,
    catalog: &ComponentCatalog,
    settings: &PayrollSettings,
) -> PayrollResult<SalaryStructure> {
    let mut errors = Vec::new();

    if request.employee_id.trim().is_empty() {
        errors.push(FieldError::new("employee_id", "must not be empty"));
    }
    if request.ctc_annual <= Decimal::ZERO {
        errors.push(FieldError::new("ctc_annual", "must be greater than zero"));
    }
    if request.assignments.is_empty() {
        errors.push(FieldError::new("assignments", "must not be empty"));
    }
    if let Some(effective_to) = request.effective_to {
        if effective_to < request.effective_from {
            errors.push(FieldError::new(
                "effective_to",
                "must not be before effective_from",
            ));
        }
    }

    // Resolve each assignment against the catalog before validating the
    // per-assignment fields; calculation_type lives on the component.
    let mut seen: Vec<Uuid> = Vec::new();
    let mut resolved: Vec<ComponentAssignment> = Vec::new();

    for (index, assignment) in request.assignments.iter().enumerate() {
        let component = catalog.get(assignment.component_id)?;

        if seen.contains(&component.id) {
            return Err(PayrollError::DuplicateAssignment {
                code: component.code.clone(),
            });
        }
        seen.push(component.id);

        if !component.is_active {
            return Err(PayrollError::InactiveComponent {
                code: component.code.clone(),
            });
        }

        if assignment.amount < Decimal::ZERO {
            errors.push(FieldError::new(
                format!("assignments[{}].amount", index),
                "must not be negative",
            ));
        }

        match component.calculation_type {
            CalculationType::Percentage => match assignment.percentage_value {
                Some(value) if value < Decimal::ZERO || value > Decimal::from(100) => {
                    errors.push(FieldError::new(
                        format!("assignments[{}].percentage_value", index),
                        "must be between 0 and 100",
                    ));
                }
                None => {
                    errors.push(FieldError::new(
                        format!("assignments[{}].percentage_value", index),
                        "required for percentage components",
                    ));
                }
                _ => {}
            },
            CalculationType::Formula => {
                let formula_missing = assignment
                    .calculation_formula
                    .as_ref()
                    .map_or(true, |f| f.trim().is_empty());
                if formula_missing {
                    errors.push(FieldError::new(
                        format!("assignments[{}].calculation_formula", index),
                        "required for formula components",
                    ));
                }
            }
            CalculationType::Fixed => {}
        }

        resolved.push(ComponentAssignment {
            component_id: component.id,
            component_code: component.code.clone(),
            component_name: component.name.clone(),
            component_type: component.component_type,
            calculation_type: component.calculation_type,
            amount: assignment.amount,
            percentage_value: assignment.percentage_value,
            calculation_formula: assignment.calculation_formula.clone(),
            display_in_payslip: component.display_in_payslip,
            sort_order: component.sort_order,
        });
    }

    if !errors.is_empty() {
        return Err(PayrollError::Validation { errors });
    }

    resolved.sort_by_key(|a| (a.sort_order, a.component_code.clone()));

    let structure = SalaryStructure {
        id: Uuid::new_v4(),
        employee_id: request.employee_id,
        effective_from: request.effective_from,
        effective_to: request.effective_to,
        ctc_annual: request.ctc_annual,
        ctc_monthly: monthly_ctc(request.ctc_annual, settings),
        gross_salary: Decimal::ZERO,
        net_salary: Decimal::ZERO,
        payment_mode: request.payment_mode,
        assignments: resolved,
    };

    Ok(structure.recomputed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundingMode;
    use crate::models::{ComponentDefinition, ComponentType};
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn definition(
        code: &str,
        component_type: ComponentType,
        calculation_type: CalculationType,
        sort_order: u32,
    ) -> ComponentDefinition {
        ComponentDefinition {
            name: format!("{} component", code),
            code: code.to_string(),
            component_type,
            calculation_type,
            is_taxable: true,
            is_fixed: true,
            display_in_payslip: true,
            sort_order,
        }
    }

    struct Fixture {
        catalog: ComponentCatalog,
        basic_id: Uuid,
        hra_id: Uuid,
        pf_id: Uuid,
    }

    fn fixture() -> Fixture {
        let mut catalog = ComponentCatalog::new();
        let basic_id = catalog
            .create(
                "org_001",
                definition("BASIC", ComponentType::Earning, CalculationType::Fixed, 1),
            )
            .unwrap()
            .id;
        let hra_id = catalog
            .create(
                "org_001",
                definition("HRA", ComponentType::Allowance, CalculationType::Fixed, 2),
            )
            .unwrap()
            .id;
        let pf_id = catalog
            .create(
                "org_001",
                definition("PF", ComponentType::Deduction, CalculationType::Fixed, 3),
            )
            .unwrap()
            .id;
        Fixture {
            catalog,
            basic_id,
            hra_id,
            pf_id,
        }
    }

    fn assignment(component_id: Uuid, amount: &str) -> AssignmentRequest {
        AssignmentRequest {
            component_id,
            amount: dec(amount),
            percentage_value: None,
            calculation_formula: None,
        }
    }

    fn request(fixture: &Fixture) -> StructureRequest {
        StructureRequest {
            employee_id: "emp_001".to_string(),
            effective_from: date(2025, 1, 1),
            effective_to: None,
            ctc_annual: dec("600000"),
            payment_mode: PaymentMode::BankTransfer,
            assignments: vec![
                assignment(fixture.basic_id, "30000"),
                assignment(fixture.hra_id, "12000"),
                assignment(fixture.pf_id, "3600"),
            ],
        }
    }

    /// Basic 30000 + HRA 12000 - PF 3600.
    #[test]
    fn test_build_structure_computes_gross_and_net() {
        let fixture = fixture();
        let settings = PayrollSettings::default();

        let structure = build_structure(request(&fixture), &fixture.catalog, &settings).unwrap();

        assert_eq!(structure.gross_salary, dec("42000"));
        assert_eq!(structure.net_salary, dec("38400"));
        assert_eq!(structure.ctc_monthly, dec("50000"));
        assert_eq!(structure.assignments.len(), 3);
    }

    #[test]
    fn test_assignments_sorted_by_component_sort_order() {
        let fixture = fixture();
        let settings = PayrollSettings::default();
        let mut req = request(&fixture);
        req.assignments.reverse();

        let structure = build_structure(req, &fixture.catalog, &settings).unwrap();
        let codes: Vec<&str> = structure
            .assignments
            .iter()
            .map(|a| a.component_code.as_str())
            .collect();
        assert_eq!(codes, vec!["BASIC", "HRA", "PF"]);
    }

    #[test]
    fn test_monthly_ctc_half_up() {
        let settings = PayrollSettings::default();
        // 485000 / 12 = 40416.666... rounds up
        assert_eq!(monthly_ctc(dec("485000"), &settings), dec("40416.67"));
    }

    #[test]
    fn test_monthly_ctc_truncate_matches_fixed_point() {
        let settings = PayrollSettings {
            rounding: RoundingMode::Truncate,
            ..PayrollSettings::default()
        };
        assert_eq!(monthly_ctc(dec("485000"), &settings), dec("40416.66"));
    }

    #[test]
    fn test_zero_ctc_rejected() {
        let fixture = fixture();
        let settings = PayrollSettings::default();
        let mut req = request(&fixture);
        req.ctc_annual = Decimal::ZERO;

        match build_structure(req, &fixture.catalog, &settings).unwrap_err() {
            PayrollError::Validation { errors } => {
                assert!(errors.iter().any(|e| e.field == "ctc_annual"));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_assignments_rejected() {
        let fixture = fixture();
        let settings = PayrollSettings::default();
        let mut req = request(&fixture);
        req.assignments.clear();

        match build_structure(req, &fixture.catalog, &settings).unwrap_err() {
            PayrollError::Validation { errors } => {
                assert!(errors.iter().any(|e| e.field == "assignments"));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_effective_to_before_from_rejected() {
        let fixture = fixture();
        let settings = PayrollSettings::default();
        let mut req = request(&fixture);
        req.effective_from = date(2025, 6, 1);
        req.effective_to = Some(date(2025, 1, 1));

        match build_structure(req, &fixture.catalog, &settings).unwrap_err() {
            PayrollError::Validation { errors } => {
                assert!(errors.iter().any(|e| e.field == "effective_to"));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_component_rejected() {
        let fixture = fixture();
        let settings = PayrollSettings::default();
        let mut req = request(&fixture);
        req.assignments.push(assignment(fixture.basic_id, "1000"));

        match build_structure(req, &fixture.catalog, &settings).unwrap_err() {
            PayrollError::DuplicateAssignment { code } => assert_eq!(code, "BASIC"),
            other => panic!("Expected DuplicateAssignment, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_component_rejected() {
        let fixture = fixture();
        let settings = PayrollSettings::default();
        let mut req = request(&fixture);
        req.assignments.push(assignment(Uuid::new_v4(), "1000"));

        assert!(matches!(
            build_structure(req, &fixture.catalog, &settings).unwrap_err(),
            PayrollError::ComponentNotFound { .. }
        ));
    }

    #[test]
    fn test_inactive_component_rejected() {
        let mut fixture = fixture();
        let settings = PayrollSettings::default();
        fixture.catalog.deactivate(fixture.pf_id).unwrap();

        match build_structure(request(&fixture), &fixture.catalog, &settings).unwrap_err() {
            PayrollError::InactiveComponent { code } => assert_eq!(code, "PF"),
            other => panic!("Expected InactiveComponent, got {:?}", other),
        }
    }

    #[test]
    fn test_percentage_component_requires_value_in_range() {
        let mut catalog = ComponentCatalog::new();
        let hra_id = catalog
            .create(
                "org_001",
                definition("HRA", ComponentType::Allowance, CalculationType::Percentage, 1),
            )
            .unwrap()
            .id;
        let settings = PayrollSettings::default();

        let without_value = StructureRequest {
            employee_id: "emp_001".to_string(),
            effective_from: date(2025, 1, 1),
            effective_to: None,
            ctc_annual: dec("600000"),
            payment_mode: PaymentMode::BankTransfer,
            assignments: vec![assignment(hra_id, "12000")],
        };
        assert!(matches!(
            build_structure(without_value.clone(), &catalog, &settings).unwrap_err(),
            PayrollError::Validation { .. }
        ));

        let mut out_of_range = without_value.clone();
        out_of_range.assignments[0].percentage_value = Some(dec("140"));
        assert!(matches!(
            build_structure(out_of_range, &catalog, &settings).unwrap_err(),
            PayrollError::Validation { .. }
        ));

        let mut valid = without_value;
        valid.assignments[0].percentage_value = Some(dec("40"));
        let structure = build_structure(valid, &catalog, &settings).unwrap();
        assert_eq!(structure.assignments[0].percentage_value, Some(dec("40")));
    }

    #[test]
    fn test_formula_component_requires_formula() {
        let mut catalog = ComponentCatalog::new();
        let bonus_id = catalog
            .create(
                "org_001",
                definition("BONUS", ComponentType::Earning, CalculationType::Formula, 1),
            )
            .unwrap()
            .id;
        let settings = PayrollSettings::default();

        let mut req = StructureRequest {
            employee_id: "emp_001".to_string(),
            effective_from: date(2025, 1, 1),
            effective_to: None,
            ctc_annual: dec("600000"),
            payment_mode: PaymentMode::Cash,
            assignments: vec![assignment(bonus_id, "5000")],
        };
        assert!(matches!(
            build_structure(req.clone(), &catalog, &settings).unwrap_err(),
            PayrollError::Validation { .. }
        ));

        // The formula string is carried opaquely, never evaluated.
        req.assignments[0].calculation_formula = Some("basic * 0.1".to_string());
        let structure = build_structure(req, &catalog, &settings).unwrap();
        assert_eq!(
            structure.assignments[0].calculation_formula.as_deref(),
            Some("basic * 0.1")
        );
    }

    #[test]
    fn test_validation_collects_multiple_errors() {
        let fixture = fixture();
        let settings = PayrollSettings::default();
        let mut req = request(&fixture);
        req.employee_id = "".to_string();
        req.ctc_annual = dec("-1");

        match build_structure(req, &fixture.catalog, &settings).unwrap_err() {
            PayrollError::Validation { errors } => {
                assert!(errors.len() >= 2);
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"employee_id"));
                assert!(fields.contains(&"ctc_annual"));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    proptest! {
        /// Gross/net invariant: for any assignment amounts,
        /// gross == sum of earning+allowance and net == gross - deductions.
        #[test]
        fn prop_gross_net_invariant(
            basic in 0u64..10_000_000,
            hra in 0u64..10_000_000,
            pf in 0u64..10_000_000,
        ) {
            let fixture = fixture();
            let settings = PayrollSettings::default();
            let req = StructureRequest {
                employee_id: "emp_001".to_string(),
                effective_from: date(2025, 1, 1),
                effective_to: None,
                ctc_annual: dec("600000"),
                payment_mode: PaymentMode::BankTransfer,
                assignments: vec![
                    assignment(fixture.basic_id, &basic.to_string()),
                    assignment(fixture.hra_id, &hra.to_string()),
                    assignment(fixture.pf_id, &pf.to_string()),
                ],
            };

            let structure = build_structure(req, &fixture.catalog, &settings).unwrap();
            let expected_gross = Decimal::from(basic) + Decimal::from(hra);
            prop_assert_eq!(structure.gross_salary, expected_gross);
            prop_assert_eq!(structure.net_salary, expected_gross - Decimal::from(pf));
        }

        /// Monthly CTC derivation: ctc_monthly == round(ctc_annual / 12, 2).
        #[test]
        fn prop_monthly_ctc_rounded_to_precision(annual in 1u64..100_000_000) {
            let settings = PayrollSettings::default();
            let monthly = monthly_ctc(Decimal::from(annual), &settings);
            prop_assert!(monthly.scale() <= 2);
            // Recomputing from scratch must give the same figure.
            let expected = (Decimal::from(annual) / Decimal::from(12))
                .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
            prop_assert_eq!(monthly, expected);
        }
    }
}
