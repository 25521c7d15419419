//! Response types for the payroll engine API.
//!
//! This module defines the error response structures and the mapping
//! from [`PayrollError`] to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::ProcessReport;
use crate::error::PayrollError;
use crate::models::PayrollRun;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

fn error_code(error: &PayrollError) -> &'static str {
    match error {
        PayrollError::Validation { .. } => "VALIDATION_ERROR",
        PayrollError::DuplicateAssignment { .. } => "DUPLICATE_ASSIGNMENT",
        PayrollError::DuplicateComponentCode { .. } => "DUPLICATE_COMPONENT_CODE",
        PayrollError::DuplicateRun { .. } => "DUPLICATE_RUN",
        PayrollError::StructureOverlap { .. } => "STRUCTURE_OVERLAP",
        PayrollError::EmployeeNotFound { .. } => "EMPLOYEE_NOT_FOUND",
        PayrollError::OrganizationNotFound { .. } => "ORGANIZATION_NOT_FOUND",
        PayrollError::ComponentNotFound { .. } => "COMPONENT_NOT_FOUND",
        PayrollError::RunNotFound { .. } => "RUN_NOT_FOUND",
        PayrollError::PayslipNotFound { .. } => "PAYSLIP_NOT_FOUND",
        PayrollError::InactiveComponent { .. } => "INACTIVE_COMPONENT",
        PayrollError::NoActiveStructure { .. } => "NO_ACTIVE_STRUCTURE",
        PayrollError::AttendanceUnavailable { .. } => "ATTENDANCE_UNAVAILABLE",
        PayrollError::InvalidTransition { .. } => "INVALID_TRANSITION",
        PayrollError::InvalidPaymentTransition { .. } => "INVALID_PAYMENT_TRANSITION",
        PayrollError::ConfirmationRequired { .. } => "CONFIRMATION_REQUIRED",
        PayrollError::ConfigNotFound { .. } | PayrollError::ConfigParseError { .. } => {
            "CONFIG_ERROR"
        }
    }
}

fn error_status(error: &PayrollError) -> StatusCode {
    match error {
        PayrollError::Validation { .. }
        | PayrollError::DuplicateAssignment { .. }
        | PayrollError::InactiveComponent { .. }
        | PayrollError::NoActiveStructure { .. }
        | PayrollError::InvalidTransition { .. }
        | PayrollError::InvalidPaymentTransition { .. }
        | PayrollError::ConfirmationRequired { .. } => StatusCode::BAD_REQUEST,
        PayrollError::DuplicateComponentCode { .. }
        | PayrollError::DuplicateRun { .. }
        | PayrollError::StructureOverlap { .. } => StatusCode::CONFLICT,
        PayrollError::EmployeeNotFound { .. }
        | PayrollError::OrganizationNotFound { .. }
        | PayrollError::ComponentNotFound { .. }
        | PayrollError::RunNotFound { .. }
        | PayrollError::PayslipNotFound { .. } => StatusCode::NOT_FOUND,
        PayrollError::AttendanceUnavailable { .. } => StatusCode::BAD_GATEWAY,
        PayrollError::ConfigNotFound { .. } | PayrollError::ConfigParseError { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<&PayrollError> for ApiError {
    fn from(error: &PayrollError) -> Self {
        ApiError::new(error_code(error), error.to_string())
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        ApiErrorResponse {
            status: error_status(&error),
            error: ApiError::from(&error),
        }
    }
}

/// Per-employee entry in a processing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResultBody {
    /// The employee this entry is for.
    pub employee_id: String,
    /// The generated payslip id, when generation succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payslip_id: Option<Uuid>,
    /// The per-employee failure, when generation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Response body for the `POST /payroll-runs/:id/process` endpoint.
///
/// Processing is a batch with per-employee outcomes: the endpoint
/// responds 200 even when some employees failed, and the caller reads
/// the per-employee entries to find out which.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// The run after processing.
    pub run: PayrollRun,
    /// Per-employee results, in request order.
    pub results: Vec<EmployeeResultBody>,
}

impl From<ProcessReport> for ProcessResponse {
    fn from(report: ProcessReport) -> Self {
        let results = report
            .results
            .into_iter()
            .map(|result| match result.outcome {
                Ok(payslip_id) => EmployeeResultBody {
                    employee_id: result.employee_id,
                    payslip_id: Some(payslip_id),
                    error: None,
                },
                Err(error) => EmployeeResultBody {
                    employee_id: result.employee_id,
                    payslip_id: None,
                    error: Some(ApiError::from(&error)),
                },
            })
            .collect();
        ProcessResponse {
            run: report.run,
            results,
        }
    }
}
