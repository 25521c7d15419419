//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the payroll
//! endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{AssignmentRequest, StructureRequest};
use crate::models::{
    CalculationType, ComponentDefinition, ComponentType, PayrollStatus, PaymentMode, PaymentStatus,
};

/// Request body for the `POST /components` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComponentRequest {
    /// The organization the component belongs to.
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
}

impl CreateComponentRequest {
    /// Extracts the catalog definition from the request.
    pub fn definition(&self) -> ComponentDefinition {
        ComponentDefinition {
            name: self.name.clone(),
            code: self.code.clone(),
            component_type: self.component_type,
            calculation_type: self.calculation_type,
            is_taxable: self.is_taxable,
            is_fixed: self.is_fixed,
            display_in_payslip: self.display_in_payslip,
            sort_order: self.sort_order,
        }
    }
}

/// One component assignment in a structure request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentBody {
    /// The catalog component to assign.
    pub component_id: Uuid,
    /// The monthly currency amount.
    pub amount: Decimal,
    /// Percentage value for percentage-calculated components.
    #[serde(default)]
    pub percentage_value: Option<Decimal>,
    /// Opaque formula string for formula-calculated components.
    #[serde(default)]
    pub calculation_formula: Option<String>,
}

impl From<AssignmentBody> for AssignmentRequest {
    fn from(body: AssignmentBody) -> Self {
        AssignmentRequest {
            component_id: body.component_id,
            amount: body.amount,
            percentage_value: body.percentage_value,
            calculation_formula: body.calculation_formula,
        }
    }
}

/// Request body for the `POST /structures` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStructureRequest {
    /// The employee the structure is for.
    pub employee_id: String,
    /// First effective date (inclusive).
    pub effective_from: NaiveDate,
    /// Last effective date (inclusive); omitted means ongoing.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// Annual cost-to-company.
    pub ctc_annual: Decimal,
    /// How the salary is disbursed.
    pub payment_mode: PaymentMode,
    /// The components to attach.
    pub assignments: Vec<AssignmentBody>,
}

impl From<CreateStructureRequest> for StructureRequest {
    fn from(body: CreateStructureRequest) -> Self {
        StructureRequest {
            employee_id: body.employee_id,
            effective_from: body.effective_from,
            effective_to: body.effective_to,
            ctc_annual: body.ctc_annual,
            payment_mode: body.payment_mode,
            assignments: body.assignments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Request body for the `POST /payroll-runs` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRunRequest {
    /// The organization the run belongs to.
    pub organization_id: String,
    /// The calendar month (1-12).
    pub month: u32,
    /// The calendar year.
    pub year: i32,
}

/// Request body for the `POST /payroll-runs/:id/process` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRunRequest {
    /// The employees to generate payslips for.
    pub employee_ids: Vec<String>,
    /// Who triggered the processing.
    pub processed_by: String,
}

/// Request body for the `PATCH /payroll-runs/:id/status` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRunStatusRequest {
    /// The requested status.
    pub status: PayrollStatus,
    /// Explicit acknowledgment for irreversible transitions.
    #[serde(default)]
    pub confirmed: bool,
}

/// Query parameters for the `DELETE /payroll-runs/:id` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRunParams {
    /// Explicit acknowledgment of the destructive delete.
    #[serde(default)]
    pub confirmed: bool,
}

/// Request body for the `PATCH /payslips/:id/payment-status` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    /// The requested payment status.
    pub status: PaymentStatus,
}
