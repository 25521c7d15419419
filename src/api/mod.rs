//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for managing salary
//! components, salary structures, payroll runs and payslip payment
//! statuses.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AssignmentBody, CreateComponentRequest, CreateRunRequest, CreateStructureRequest,
    DeleteRunParams, ProcessRunRequest, UpdatePaymentStatusRequest, UpdateRunStatusRequest,
};
pub use response::{ApiError, EmployeeResultBody, ProcessResponse};
pub use state::AppState;
