//! Settings loading and management for the payroll engine.
//!
//! This module provides functionality to load engine settings from a YAML
//! file: currency precision, the monetary rounding mode and the payment
//! reference prefix.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::SettingsLoader;
//!
//! let loader = SettingsLoader::load("./config/payroll.yaml").unwrap();
//! println!("Rounding: {:?}", loader.settings().rounding);
//! ```

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::{PayrollSettings, RoundingMode};
