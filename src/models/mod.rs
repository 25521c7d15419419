//! Core data models for the Payroll Computation Core.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod component;
mod payroll_run;
mod payslip;
mod structure;

pub use attendance::AttendanceFacts;
pub use component::{CalculationType, ComponentDefinition, ComponentType, SalaryComponent};
pub use payroll_run::{PayrollRun, PayrollStatus, RunTotals};
pub use payslip::{PaymentStatus, Payslip, PayslipComponent, PayslipComponents};
pub use structure::{ComponentAssignment, PaymentMode, SalaryStructure};
