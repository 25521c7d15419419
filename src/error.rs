//! Error types for the Payroll Computation Core.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll processing.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{PayrollStatus, PaymentStatus};

/// A single field-level validation failure.
///
/// Validation errors are collected per field so the caller can report
/// every problem with a request at once instead of one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The name of the field that failed validation.
    pub field: String,
    /// A description of what made the field invalid.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// The main error type for the Payroll Computation Core.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::NoActiveStructure {
///     employee_id: "emp_001".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "No active salary structure for employee 'emp_001'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// One or more request fields failed validation. No state was changed.
    #[error("Validation failed: {}", format_field_errors(errors))]
    Validation {
        /// The individual field failures, reported together.
        errors: Vec<FieldError>,
    },

    /// The same salary component was assigned twice to one structure.
    #[error("Component '{code}' is already added to this structure")]
    DuplicateAssignment {
        /// The code of the component that was added twice.
        code: String,
    },

    /// A component with this code already exists in the organization.
    #[error("Component code '{code}' already exists in organization '{organization_id}'")]
    DuplicateComponentCode {
        /// The conflicting component code.
        code: String,
        /// The organization that already holds the code.
        organization_id: String,
    },

    /// A payroll run already exists for this organization and period.
    #[error("Payroll run already exists for organization '{organization_id}' in {month}/{year}")]
    DuplicateRun {
        /// The organization the run belongs to.
        organization_id: String,
        /// The calendar month (1-12).
        month: u32,
        /// The calendar year.
        year: i32,
    },

    /// A new salary structure overlaps an existing one for the employee.
    #[error("Salary structure dates overlap an existing structure for employee '{employee_id}'")]
    StructureOverlap {
        /// The employee whose structures overlap.
        employee_id: String,
    },

    /// The employee id could not be resolved in the directory.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        id: String,
    },

    /// The organization id could not be resolved in the directory.
    #[error("Organization not found: {id}")]
    OrganizationNotFound {
        /// The organization id that was not found.
        id: String,
    },

    /// The salary component id does not exist in the catalog.
    #[error("Salary component not found: {id}")]
    ComponentNotFound {
        /// The component id that was not found.
        id: Uuid,
    },

    /// The payroll run id does not exist.
    #[error("Payroll run not found: {id}")]
    RunNotFound {
        /// The run id that was not found.
        id: Uuid,
    },

    /// The payslip id does not exist.
    #[error("Payslip not found: {id}")]
    PayslipNotFound {
        /// The payslip id that was not found.
        id: Uuid,
    },

    /// The component has been deactivated and cannot be newly assigned.
    #[error("Component '{code}' is deactivated and cannot be assigned")]
    InactiveComponent {
        /// The code of the deactivated component.
        code: String,
    },

    /// The employee has no salary structure covering the run's period.
    #[error("No active salary structure for employee '{employee_id}'")]
    NoActiveStructure {
        /// The employee without a covering structure.
        employee_id: String,
    },

    /// Attendance facts could not be fetched for the employee.
    #[error("Attendance unavailable for employee '{employee_id}': {message}")]
    AttendanceUnavailable {
        /// The employee whose attendance lookup failed.
        employee_id: String,
        /// A description of the lookup failure.
        message: String,
    },

    /// The requested payroll run status change is not a legal transition.
    #[error("Invalid payroll status transition: {from} -> {to}")]
    InvalidTransition {
        /// The run's current status.
        from: PayrollStatus,
        /// The requested status.
        to: PayrollStatus,
    },

    /// The requested payslip payment status change is not legal.
    #[error("Invalid payment status transition: {from} -> {to}")]
    InvalidPaymentTransition {
        /// The payslip's current payment status.
        from: PaymentStatus,
        /// The requested payment status.
        to: PaymentStatus,
    },

    /// An irreversible operation was invoked without explicit confirmation.
    #[error("Confirmation required for irreversible action: {action}")]
    ConfirmationRequired {
        /// A description of the action awaiting confirmation.
        action: String,
    },

    /// Settings file was not found at the specified path.
    #[error("Settings file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Settings file could not be parsed.
    #[error("Failed to parse settings file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
