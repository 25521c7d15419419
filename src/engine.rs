//! The stateful payroll engine.
//!
//! This module ties the pure calculation functions together with an
//! in-memory registry of catalogs, structures, runs and payslips, and
//! drives the payroll run lifecycle: Draft -> Processing -> Completed ->
//! Paid. Every mutating operation goes through `&mut self`, so writes to
//! a run's totals and transitions on a single payslip are serialized by
//! construction; independent runs live in independent engine values and
//! do not contend.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    StructureRequest, build_structure, generate_payslip, recompute_totals,
    resolve_current_structure, transition_payment,
};
use crate::catalog::ComponentCatalog;
use crate::config::PayrollSettings;
use crate::directory::{AttendanceService, EmployeeDirectory, OrganizationDirectory};
use crate::error::{FieldError, PayrollError, PayrollResult};
use crate::models::{
    ComponentDefinition, PayrollRun, PayrollStatus, PaymentStatus, Payslip, SalaryComponent,
    SalaryStructure,
};

/// Caller acknowledgment for irreversible operations.
///
/// The engine never prompts; instead, an irreversible operation invoked
/// with [`Confirmation::Unconfirmed`] returns
/// [`PayrollError::ConfirmationRequired`] so the caller can obtain the
/// confirmation and re-invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    /// The caller has not confirmed the irreversible action.
    Unconfirmed,
    /// The caller explicitly confirmed; the engine performs the action
    /// unconditionally.
    Confirmed,
}

/// The per-employee outcome of one processing pass.
#[derive(Debug)]
pub struct EmployeeProcessResult {
    /// The employee this result is for.
    pub employee_id: String,
    /// The generated payslip id, or the per-employee failure.
    pub outcome: PayrollResult<Uuid>,
}

/// The outcome of a [`PayrollEngine::process_run`] call.
#[derive(Debug)]
pub struct ProcessReport {
    /// The run after processing, with refreshed totals and status.
    pub run: PayrollRun,
    /// Per-employee results, in request order.
    pub results: Vec<EmployeeProcessResult>,
}

/// A run together with its payslips.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// The payroll run.
    pub run: PayrollRun,
    /// The run's payslips.
    pub payslips: Vec<Payslip>,
}

/// In-memory payroll engine holding catalogs, structures, runs and
/// payslips for any number of organizations.
///
/// # Example
///
/// ```
/// use payroll_engine::engine::PayrollEngine;
///
/// let engine = PayrollEngine::with_defaults();
/// assert_eq!(engine.settings().currency_precision, 2);
/// ```
#[derive(Debug)]
pub struct PayrollEngine {
    settings: PayrollSettings,
    catalog: ComponentCatalog,
    structures: HashMap<String, Vec<SalaryStructure>>,
    runs: HashMap<Uuid, PayrollRun>,
    run_index: HashMap<(String, u32, i32), Uuid>,
    payslips: HashMap<Uuid, Payslip>,
    payslip_index: HashMap<(Uuid, String), Uuid>,
}

impl PayrollEngine {
    /// Creates an engine with the given settings.
    pub fn new(settings: PayrollSettings) -> Self {
        Self {
            settings,
            catalog: ComponentCatalog::new(),
            structures: HashMap::new(),
            runs: HashMap::new(),
            run_index: HashMap::new(),
            payslips: HashMap::new(),
            payslip_index: HashMap::new(),
        }
    }

    /// Creates an engine with the built-in default settings.
    pub fn with_defaults() -> Self {
        Self::new(PayrollSettings::default())
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns the component catalog.
    pub fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    /// Registers a salary component for an organization.
    ///
    /// The organization id is validated through the directory before the
    /// catalog is touched.
    pub fn create_component(
        &mut self,
        organization_id: &str,
        definition: ComponentDefinition,
        organizations: &dyn OrganizationDirectory,
    ) -> PayrollResult<SalaryComponent> {
        if !organizations.exists(organization_id) {
            return Err(PayrollError::OrganizationNotFound {
                id: organization_id.to_string(),
            });
        }
        self.catalog.create(organization_id, definition)
    }

    /// Replaces the definition of an existing component.
    pub fn update_component(
        &mut self,
        component_id: Uuid,
        definition: ComponentDefinition,
    ) -> PayrollResult<SalaryComponent> {
        self.catalog.update(component_id, definition)
    }

    /// Soft-deactivates a component; existing structures keep resolving it.
    pub fn deactivate_component(&mut self, component_id: Uuid) -> PayrollResult<SalaryComponent> {
        self.catalog.deactivate(component_id)
    }

    /// Builds and stores a salary structure for an employee.
    ///
    /// The employee must resolve in the directory. An ongoing structure
    /// that the new one starts after is closed the day before the new
    /// `effective_from` (a revision supersedes, it never edits history);
    /// any other overlap is rejected with
    /// [`PayrollError::StructureOverlap`] before anything is stored.
    pub fn add_structure(
        &mut self,
        request: StructureRequest,
        directory: &dyn EmployeeDirectory,
    ) -> PayrollResult<SalaryStructure> {
        directory.resolve(&request.employee_id)?;

        let structure = build_structure(request, &self.catalog, &self.settings)?;
        let employee_id = structure.employee_id.clone();

        // Plan all supersede closures before mutating anything, so an
        // overlap rejection leaves existing structures untouched.
        let mut closures: Vec<(Uuid, chrono::NaiveDate)> = Vec::new();
        if let Some(existing_list) = self.structures.get(&employee_id) {
            for existing in existing_list {
                if !existing.overlaps(&structure) {
                    continue;
                }
                let supersedes = existing.is_ongoing()
                    && structure.effective_from > existing.effective_from;
                let close_on = structure.effective_from.pred_opt();
                match (supersedes, close_on) {
                    (true, Some(close_on)) => closures.push((existing.id, close_on)),
                    _ => {
                        return Err(PayrollError::StructureOverlap { employee_id });
                    }
                }
            }
        }

        let entries = self.structures.entry(employee_id).or_default();
        for (structure_id, close_on) in closures {
            if let Some(superseded) = entries.iter_mut().find(|s| s.id == structure_id) {
                superseded.effective_to = Some(close_on);
            }
        }
        entries.push(structure.clone());
        Ok(structure)
    }

    /// Returns the stored structures for an employee, oldest first.
    pub fn structures_for(&self, employee_id: &str) -> &[SalaryStructure] {
        self.structures
            .get(employee_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Creates a Draft payroll run for an organization and period.
    ///
    /// # Errors
    ///
    /// - [`PayrollError::OrganizationNotFound`] for an unknown organization.
    /// - [`PayrollError::Validation`] for a month outside 1-12.
    /// - [`PayrollError::DuplicateRun`] when a run already exists for the
    ///   (organization, month, year) triple.
    pub fn create_run(
        &mut self,
        organization_id: &str,
        month: u32,
        year: i32,
        organizations: &dyn OrganizationDirectory,
    ) -> PayrollResult<PayrollRun> {
        if !organizations.exists(organization_id) {
            return Err(PayrollError::OrganizationNotFound {
                id: organization_id.to_string(),
            });
        }

        let key = (organization_id.to_string(), month, year);
        if self.run_index.contains_key(&key) {
            return Err(PayrollError::DuplicateRun {
                organization_id: organization_id.to_string(),
                month,
                year,
            });
        }

        let run = PayrollRun::new(organization_id.to_string(), month, year).ok_or_else(|| {
            PayrollError::Validation {
                errors: vec![FieldError::new("month", "must be between 1 and 12")],
            }
        })?;

        info!(
            run_id = %run.id,
            organization_id,
            month,
            year,
            "Created payroll run"
        );
        self.run_index.insert(key, run.id);
        self.runs.insert(run.id, run.clone());
        Ok(run)
    }

    /// Looks up a payroll run by id.
    pub fn run(&self, run_id: Uuid) -> PayrollResult<&PayrollRun> {
        self.runs
            .get(&run_id)
            .ok_or(PayrollError::RunNotFound { id: run_id })
    }

    /// Returns the payslips belonging to a run.
    pub fn payslips_for_run(&self, run_id: Uuid) -> Vec<&Payslip> {
        let mut payslips: Vec<&Payslip> = self
            .payslips
            .values()
            .filter(|p| p.payroll_run_id == run_id)
            .collect();
        payslips.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        payslips
    }

    /// Looks up a payslip by id.
    pub fn payslip(&self, payslip_id: Uuid) -> PayrollResult<&Payslip> {
        self.payslips
            .get(&payslip_id)
            .ok_or(PayrollError::PayslipNotFound { id: payslip_id })
    }

    /// Returns a run together with its payslips.
    pub fn run_summary(&self, run_id: Uuid) -> PayrollResult<RunSummary> {
        let run = self.run(run_id)?.clone();
        let payslips = self
            .payslips_for_run(run_id)
            .into_iter()
            .cloned()
            .collect();
        Ok(RunSummary { run, payslips })
    }

    /// Processes the selected employees of a payroll run.
    ///
    /// Legal only while the run is Draft or Processing. Payslip
    /// generation failures are collected per employee and never abort the
    /// batch: payslips already generated for other employees are
    /// retained, and the run only advances to Completed when every
    /// requested employee ended up with a payslip. Totals are recomputed
    /// in a single aggregation pass after all generations finish.
    pub fn process_run(
        &mut self,
        run_id: Uuid,
        employee_ids: &[String],
        processed_by: &str,
        directory: &dyn EmployeeDirectory,
        attendance: &dyn AttendanceService,
    ) -> PayrollResult<ProcessReport> {
        let run = self
            .runs
            .get(&run_id)
            .ok_or(PayrollError::RunNotFound { id: run_id })?;

        if !run.status.can_process() {
            return Err(PayrollError::InvalidTransition {
                from: run.status,
                to: PayrollStatus::Processing,
            });
        }
        if employee_ids.is_empty() {
            return Err(PayrollError::Validation {
                errors: vec![FieldError::new("employee_ids", "must not be empty")],
            });
        }

        let period_from = run.period_from;
        let period_to = run.period_to;
        let run_snapshot = run.clone();

        let mut results = Vec::with_capacity(employee_ids.len());
        for employee_id in employee_ids {
            let outcome = self.generate_for_employee(
                &run_snapshot,
                employee_id,
                period_from,
                period_to,
                directory,
                attendance,
            );
            if let Err(error) = &outcome {
                warn!(
                    run_id = %run_id,
                    employee_id = %employee_id,
                    error = %error,
                    "Payslip generation failed"
                );
            }
            results.push(EmployeeProcessResult {
                employee_id: employee_id.clone(),
                outcome,
            });
        }

        // Single aggregation pass over the run's payslips; the fresh
        // totals replace the stored ones wholesale.
        let totals = recompute_totals(
            self.payslips
                .values()
                .filter(|p| p.payroll_run_id == run_id),
        );

        let all_generated = results.iter().all(|r| r.outcome.is_ok());
        let run = self
            .runs
            .get_mut(&run_id)
            .ok_or(PayrollError::RunNotFound { id: run_id })?;
        run.totals = totals;
        run.processed_by = Some(processed_by.to_string());
        run.processed_date = Some(Utc::now());
        run.status = if all_generated {
            PayrollStatus::Completed
        } else {
            PayrollStatus::Processing
        };

        info!(
            run_id = %run_id,
            employees = employee_ids.len(),
            generated = results.iter().filter(|r| r.outcome.is_ok()).count(),
            status = %run.status,
            total_net = %run.totals.total_net_amount,
            "Processed payroll run"
        );

        Ok(ProcessReport {
            run: run.clone(),
            results,
        })
    }

    fn generate_for_employee(
        &mut self,
        run: &PayrollRun,
        employee_id: &str,
        period_from: chrono::NaiveDate,
        period_to: chrono::NaiveDate,
        directory: &dyn EmployeeDirectory,
        attendance: &dyn AttendanceService,
    ) -> PayrollResult<Uuid> {
        // One payslip per (run, employee): re-processing an employee who
        // already has one returns it instead of generating a duplicate.
        if let Some(existing) = self.payslip_index.get(&(run.id, employee_id.to_string())) {
            return Ok(*existing);
        }

        let profile = directory.resolve(employee_id)?;

        let structures = self.structures_for(employee_id);
        let structure = resolve_current_structure(structures, period_from, period_to).ok_or_else(
            || PayrollError::NoActiveStructure {
                employee_id: employee_id.to_string(),
            },
        )?;

        let facts = attendance.attendance_for(employee_id, period_from, period_to)?;

        let payslip = generate_payslip(&profile, run, structure, facts);
        let payslip_id = payslip.id;
        self.payslip_index
            .insert((run.id, employee_id.to_string()), payslip_id);
        self.payslips.insert(payslip_id, payslip);
        Ok(payslip_id)
    }

    /// Applies an explicit status update to a payroll run.
    ///
    /// Only Completed -> Paid is accepted, and only with
    /// [`Confirmation::Confirmed`]; the transition stamps `payment_date`.
    /// Re-issuing the run's current status is an idempotent no-op.
    pub fn update_run_status(
        &mut self,
        run_id: Uuid,
        new_status: PayrollStatus,
        confirmation: Confirmation,
    ) -> PayrollResult<PayrollRun> {
        let run = self
            .runs
            .get(&run_id)
            .ok_or(PayrollError::RunNotFound { id: run_id })?;

        if run.status == new_status {
            return Ok(run.clone());
        }
        if !(run.status == PayrollStatus::Completed && new_status == PayrollStatus::Paid) {
            return Err(PayrollError::InvalidTransition {
                from: run.status,
                to: new_status,
            });
        }
        if confirmation != Confirmation::Confirmed {
            return Err(PayrollError::ConfirmationRequired {
                action: "mark payroll run as paid".to_string(),
            });
        }

        let run = self
            .runs
            .get_mut(&run_id)
            .ok_or(PayrollError::RunNotFound { id: run_id })?;
        run.status = PayrollStatus::Paid;
        run.payment_date = Some(Utc::now().date_naive());
        info!(run_id = %run_id, "Payroll run marked as paid");
        Ok(run.clone())
    }

    /// Deletes a payroll run and all of its payslips.
    ///
    /// Permitted in any state but destructive and irreversible, so it
    /// requires [`Confirmation::Confirmed`]. Returns the deleted run.
    pub fn delete_run(
        &mut self,
        run_id: Uuid,
        confirmation: Confirmation,
    ) -> PayrollResult<PayrollRun> {
        if !self.runs.contains_key(&run_id) {
            return Err(PayrollError::RunNotFound { id: run_id });
        }
        if confirmation != Confirmation::Confirmed {
            return Err(PayrollError::ConfirmationRequired {
                action: "delete payroll run".to_string(),
            });
        }

        let run = self
            .runs
            .remove(&run_id)
            .ok_or(PayrollError::RunNotFound { id: run_id })?;
        self.run_index
            .remove(&(run.organization_id.clone(), run.month, run.year));
        self.payslips.retain(|_, p| p.payroll_run_id != run_id);
        self.payslip_index.retain(|(r, _), _| *r != run_id);

        info!(run_id = %run_id, organization_id = %run.organization_id, "Deleted payroll run");
        Ok(run)
    }

    /// Applies a payment status transition to a payslip.
    ///
    /// Transitions are idempotent-guarded; a transition into Paid stamps
    /// the payment date and a generated payment reference. Transitions on
    /// the same payslip are serialized through `&mut self`, so Paid and
    /// Failed can never both land.
    pub fn update_payment_status(
        &mut self,
        payslip_id: Uuid,
        new_status: PaymentStatus,
    ) -> PayrollResult<Payslip> {
        let payslip = self
            .payslips
            .get(&payslip_id)
            .ok_or(PayrollError::PayslipNotFound { id: payslip_id })?
            .clone();

        let today = Utc::now().date_naive();
        let result = transition_payment(payslip, new_status, today, &self.settings)?;
        if result.changed {
            info!(
                payslip_id = %payslip_id,
                status = %result.payslip.payment_status,
                "Payslip payment status updated"
            );
        }
        self.payslips.insert(payslip_id, result.payslip.clone());
        Ok(result.payslip)
    }
}
