//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::Confirmation;

use super::request::{
    CreateComponentRequest, CreateRunRequest, CreateStructureRequest, DeleteRunParams,
    ProcessRunRequest, UpdatePaymentStatusRequest, UpdateRunStatusRequest,
};
use super::response::{ApiError, ApiErrorResponse, ProcessResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/components", post(create_component_handler))
        .route("/structures", post(create_structure_handler))
        .route("/payroll-runs", post(create_run_handler))
        .route("/payroll-runs/:id/process", post(process_run_handler))
        .route("/payroll-runs/:id/status", patch(update_run_status_handler))
        .route("/payroll-runs/:id", delete(delete_run_handler))
        .route("/payroll-runs/:id/summary", get(run_summary_handler))
        .route(
            "/payslips/:id/payment-status",
            patch(update_payment_status_handler),
        )
        .with_state(state)
}

/// Converts a JSON extraction rejection into an error response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (StatusCode::BAD_REQUEST, Json(error)).into_response()
}

/// Unwraps a JSON payload or produces the 400 response for its rejection.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => Err(rejection_response(rejection, correlation_id)),
    }
}

/// Handler for `POST /components`.
async fn create_component_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateComponentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        organization_id = %request.organization_id,
        code = %request.code,
        "Creating salary component"
    );

    let mut engine = state.engine().write().await;
    match engine.create_component(
        &request.organization_id,
        request.definition(),
        state.organizations(),
    ) {
        Ok(component) => (StatusCode::CREATED, Json(component)).into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Component creation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /structures`.
async fn create_structure_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateStructureRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        assignments = request.assignments.len(),
        "Building salary structure"
    );

    let mut engine = state.engine().write().await;
    match engine.add_structure(request.into(), state.employees()) {
        Ok(structure) => {
            info!(
                correlation_id = %correlation_id,
                structure_id = %structure.id,
                gross = %structure.gross_salary,
                net = %structure.net_salary,
                "Salary structure created"
            );
            (StatusCode::CREATED, Json(structure)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Structure creation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /payroll-runs`.
async fn create_run_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        organization_id = %request.organization_id,
        month = request.month,
        year = request.year,
        "Creating payroll run"
    );

    let mut engine = state.engine().write().await;
    match engine.create_run(
        &request.organization_id,
        request.month,
        request.year,
        state.organizations(),
    ) {
        Ok(run) => (StatusCode::CREATED, Json(run)).into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Run creation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /payroll-runs/:id/process`.
///
/// Responds 200 with per-employee results even when a subset of
/// employees failed; the run-level error cases (unknown run, illegal
/// state, empty selection) are the only non-200 outcomes.
async fn process_run_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
    payload: Result<Json<ProcessRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        run_id = %run_id,
        employees = request.employee_ids.len(),
        "Processing payroll run"
    );

    let mut engine = state.engine().write().await;
    match engine.process_run(
        run_id,
        &request.employee_ids,
        &request.processed_by,
        state.employees(),
        state.attendance(),
    ) {
        Ok(report) => (StatusCode::OK, Json(ProcessResponse::from(report))).into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Run processing failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `PATCH /payroll-runs/:id/status`.
async fn update_run_status_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
    payload: Result<Json<UpdateRunStatusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let confirmation = if request.confirmed {
        Confirmation::Confirmed
    } else {
        Confirmation::Unconfirmed
    };

    let mut engine = state.engine().write().await;
    match engine.update_run_status(run_id, request.status, confirmation) {
        Ok(run) => (StatusCode::OK, Json(run)).into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Status update failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `DELETE /payroll-runs/:id`.
async fn delete_run_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
    Query(params): Query<DeleteRunParams>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let confirmation = if params.confirmed {
        Confirmation::Confirmed
    } else {
        Confirmation::Unconfirmed
    };

    let mut engine = state.engine().write().await;
    match engine.delete_run(run_id, confirmation) {
        Ok(run) => {
            info!(correlation_id = %correlation_id, run_id = %run_id, "Payroll run deleted");
            (StatusCode::OK, Json(run)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Run deletion failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /payroll-runs/:id/summary`.
async fn run_summary_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> Response {
    let engine = state.engine().read().await;
    match engine.run_summary(run_id) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for `PATCH /payslips/:id/payment-status`.
async fn update_payment_status_handler(
    State(state): State<AppState>,
    Path(payslip_id): Path<Uuid>,
    payload: Result<Json<UpdatePaymentStatusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let mut engine = state.engine().write().await;
    match engine.update_payment_status(payslip_id, request.status) {
        Ok(payslip) => (StatusCode::OK, Json(payslip)).into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Payment update failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}
