//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::directory::{AttendanceService, EmployeeDirectory, OrganizationDirectory};
use crate::engine::PayrollEngine;

/// Shared application state.
///
/// Contains the payroll engine plus the external collaborators the
/// engine consults during processing. The engine sits behind an async
/// `RwLock`; handlers take the write half for mutating operations, which
/// serializes writes to run totals and payslip payment states.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RwLock<PayrollEngine>>,
    employees: Arc<dyn EmployeeDirectory + Send + Sync>,
    attendance: Arc<dyn AttendanceService + Send + Sync>,
    organizations: Arc<dyn OrganizationDirectory + Send + Sync>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        engine: PayrollEngine,
        employees: Arc<dyn EmployeeDirectory + Send + Sync>,
        attendance: Arc<dyn AttendanceService + Send + Sync>,
        organizations: Arc<dyn OrganizationDirectory + Send + Sync>,
    ) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
            employees,
            attendance,
            organizations,
        }
    }

    /// Returns the shared engine lock.
    pub fn engine(&self) -> &Arc<RwLock<PayrollEngine>> {
        &self.engine
    }

    /// Returns the employee directory collaborator.
    pub fn employees(&self) -> &(dyn EmployeeDirectory + Send + Sync) {
        self.employees.as_ref()
    }

    /// Returns the attendance service collaborator.
    pub fn attendance(&self) -> &(dyn AttendanceService + Send + Sync) {
        self.attendance.as_ref()
    }

    /// Returns the organization directory collaborator.
    pub fn organizations(&self) -> &(dyn OrganizationDirectory + Send + Sync) {
        self.organizations.as_ref()
    }
}
