//! Attendance facts consumed during payslip generation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Attendance facts for one employee over one pay period.
///
/// Supplied by the external attendance collaborator and copied verbatim
/// onto the generated payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceFacts {
    /// Days the employee was present.
    pub present_days: u32,
    /// Days the employee was absent without leave.
    pub absent_days: u32,
    /// Paid leave days taken.
    pub paid_leaves: u32,
    /// Working days in the period.
    pub total_working_days: u32,
    /// Overtime hours worked (>= 0).
    pub overtime_hours: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_attendance_facts() {
        let json = r#"{
            "present_days": 21,
            "absent_days": 0,
            "paid_leaves": 2,
            "total_working_days": 23,
            "overtime_hours": "6.5"
        }"#;

        let facts: AttendanceFacts = serde_json::from_str(json).unwrap();
        assert_eq!(facts.present_days, 21);
        assert_eq!(facts.paid_leaves, 2);
        assert_eq!(facts.overtime_hours, Decimal::from_str("6.5").unwrap());
    }

    #[test]
    fn test_serialization_round_trip() {
        let facts = AttendanceFacts {
            present_days: 20,
            absent_days: 1,
            paid_leaves: 2,
            total_working_days: 23,
            overtime_hours: Decimal::ZERO,
        };
        let json = serde_json::to_string(&facts).unwrap();
        let deserialized: AttendanceFacts = serde_json::from_str(&json).unwrap();
        assert_eq!(facts, deserialized);
    }
}
