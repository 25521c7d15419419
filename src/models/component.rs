//! Salary component model and related types.
//!
//! This module defines the [`SalaryComponent`] catalog entry and the
//! [`ComponentType`] / [`CalculationType`] enums used to classify it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the pay category of a salary component.
///
/// The category decides which side of the payslip a component lands on
/// and whether it contributes to gross and net salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    /// Regular earning such as basic pay.
    Earning,
    /// Amount withheld from pay, such as provident fund or tax.
    Deduction,
    /// Additional earning such as house rent allowance.
    Allowance,
    /// Expense pass-through, tracked but excluded from gross and net.
    Reimbursement,
}

impl ComponentType {
    /// Returns true if amounts of this type count towards gross salary.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::ComponentType;
    ///
    /// assert!(ComponentType::Earning.contributes_to_gross());
    /// assert!(ComponentType::Allowance.contributes_to_gross());
    /// assert!(!ComponentType::Deduction.contributes_to_gross());
    /// assert!(!ComponentType::Reimbursement.contributes_to_gross());
    /// ```
    pub fn contributes_to_gross(&self) -> bool {
        match self {
            ComponentType::Earning | ComponentType::Allowance => true,
            ComponentType::Deduction | ComponentType::Reimbursement => false,
        }
    }

    /// Returns true if amounts of this type are subtracted from gross pay.
    pub fn is_deduction(&self) -> bool {
        matches!(self, ComponentType::Deduction)
    }
}

/// Represents how a component's amount is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    /// A fixed currency amount.
    Fixed,
    /// A percentage of another figure, carried as `percentage_value`.
    Percentage,
    /// An opaque formula string. The engine carries it, never evaluates it.
    Formula,
}

/// The caller-supplied definition of a salary component.
///
/// Used when creating or updating catalog entries; the catalog assigns
/// the id and the active flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    /// Human-readable component name (e.g., "House Rent Allowance").
    pub name: String,
    /// Unique short code within the organization (uppercase, max 20 chars).
    pub code: String,
    /// The pay category of the component.
    pub component_type: ComponentType,
    /// How the component's amount is determined.
    pub calculation_type: CalculationType,
    /// Whether the component is subject to tax.
    pub is_taxable: bool,
    /// Whether the amount is fixed across structures.
    pub is_fixed: bool,
    /// Whether the component is shown as a payslip line.
    pub display_in_payslip: bool,
    /// Display ordering within the payslip, starting at 1.
    pub sort_order: u32,
}

/// A reusable salary component registered in an organization's catalog.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CalculationType, ComponentType, SalaryComponent};
/// use uuid::Uuid;
///
/// let basic = SalaryComponent {
///     id: Uuid::new_v4(),
///     organization_id: "org_001".to_string(),
///     name: "Basic Salary".to_string(),
///     code: "BASIC".to_string(),
///     component_type: ComponentType::Earning,
///     calculation_type: CalculationType::Fixed,
///     is_taxable: true,
///     is_fixed: true,
///     display_in_payslip: true,
///     sort_order: 1,
///     is_active: true,
/// };
/// assert!(basic.component_type.contributes_to_gross());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// Unique identifier for the component.
    pub id: Uuid,
    /// The organization that owns this catalog entry.
    pub organization_id: String,
    /// Human-readable component name.
    pub name: String,
    /// Unique short code within the organization.
    pub code: String,
    /// The pay category of the component.
    pub component_type: ComponentType,
    /// How the component's amount is determined.
    pub calculation_type: CalculationType,
    /// Whether the component is subject to tax.
    pub is_taxable: bool,
    /// Whether the amount is fixed across structures.
    pub is_fixed: bool,
    /// Whether the component is shown as a payslip line.
    pub display_in_payslip: bool,
    /// Display ordering within the payslip, starting at 1.
    pub sort_order: u32,
    /// False once the component has been soft-deactivated.
    pub is_active: bool,
}
