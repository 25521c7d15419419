//! External collaborator interfaces.
//!
//! The payroll core consumes the employee directory, the attendance
//! service and the organization directory as opaque collaborators behind
//! traits, so the engine never couples to their transport. A lookup
//! failure or timeout is mapped to a per-employee error
//! ([`PayrollError::EmployeeNotFound`] /
//! [`PayrollError::AttendanceUnavailable`]) and never aborts a batch.
//!
//! In-memory implementations are provided for tests and for serving the
//! HTTP API without a backing platform.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{PayrollError, PayrollResult};
use crate::models::AttendanceFacts;

/// The resolved identity of an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeProfile {
    /// Unique employee id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Employee code (e.g., "E001").
    pub code: String,
    /// Department id, if assigned.
    pub department_id: Option<String>,
    /// Designation id, if assigned.
    pub designation_id: Option<String>,
}

/// Resolves employee ids to profiles.
pub trait EmployeeDirectory {
    /// Resolves an employee by id.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::EmployeeNotFound`] if the id is unknown.
    fn resolve(&self, employee_id: &str) -> PayrollResult<EmployeeProfile>;
}

/// Supplies attendance facts for an employee over a period.
pub trait AttendanceService {
    /// Fetches attendance facts for the employee over the period.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::AttendanceUnavailable`] when the facts
    /// cannot be fetched; the failure is scoped to the one employee.
    fn attendance_for(
        &self,
        employee_id: &str,
        period_from: NaiveDate,
        period_to: NaiveDate,
    ) -> PayrollResult<AttendanceFacts>;
}

/// Validates organization ids.
pub trait OrganizationDirectory {
    /// Returns true if the organization exists.
    fn exists(&self, organization_id: &str) -> bool;
}

/// In-memory employee directory backed by a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeDirectory {
    employees: HashMap<String, EmployeeProfile>,
}

impl InMemoryEmployeeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee profile.
    pub fn insert(&mut self, profile: EmployeeProfile) {
        self.employees.insert(profile.id.clone(), profile);
    }
}

impl EmployeeDirectory for InMemoryEmployeeDirectory {
    fn resolve(&self, employee_id: &str) -> PayrollResult<EmployeeProfile> {
        self.employees
            .get(employee_id)
            .cloned()
            .ok_or_else(|| PayrollError::EmployeeNotFound {
                id: employee_id.to_string(),
            })
    }
}

/// In-memory attendance service backed by per-employee facts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttendanceService {
    facts: HashMap<String, AttendanceFacts>,
}

impl InMemoryAttendanceService {
    /// Creates an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the attendance facts returned for an employee.
    pub fn insert(&mut self, employee_id: impl Into<String>, facts: AttendanceFacts) {
        self.facts.insert(employee_id.into(), facts);
    }
}

impl AttendanceService for InMemoryAttendanceService {
    fn attendance_for(
        &self,
        employee_id: &str,
        _period_from: NaiveDate,
        _period_to: NaiveDate,
    ) -> PayrollResult<AttendanceFacts> {
        self.facts
            .get(employee_id)
            .cloned()
            .ok_or_else(|| PayrollError::AttendanceUnavailable {
                employee_id: employee_id.to_string(),
                message: "no attendance recorded for period".to_string(),
            })
    }
}

/// In-memory organization directory backed by a set of known ids.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrganizationDirectory {
    organizations: Vec<String>,
}

impl InMemoryOrganizationDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an organization id.
    pub fn insert(&mut self, organization_id: impl Into<String>) {
        self.organizations.push(organization_id.into());
    }
}

impl OrganizationDirectory for InMemoryOrganizationDirectory {
    fn exists(&self, organization_id: &str) -> bool {
        self.organizations.iter().any(|o| o == organization_id)
    }
}
