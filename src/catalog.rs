//! Salary component catalog.
//!
//! This module provides the [`ComponentCatalog`], the per-organization
//! registry of reusable salary components. Component codes are unique
//! within an organization and components are soft-deactivated, never
//! removed, so existing structures keep resolving them.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{FieldError, PayrollError, PayrollResult};
use crate::models::{ComponentDefinition, SalaryComponent};

/// Maximum length of a component code.
pub const MAX_CODE_LENGTH: usize = 20;

/// Registry of salary components across organizations.
///
/// # Example
///
/// ```
/// use payroll_engine::catalog::ComponentCatalog;
/// use payroll_engine::models::{CalculationType, ComponentDefinition, ComponentType};
///
/// let mut catalog = ComponentCatalog::new();
/// let basic = catalog
///     .create("org_001", ComponentDefinition {
///         name: "Basic Salary".to_string(),
///         code: "BASIC".to_string(),
///         component_type: ComponentType::Earning,
///         calculation_type: CalculationType::Fixed,
///         is_taxable: true,
///         is_fixed: true,
///         display_in_payslip: true,
///         sort_order: 1,
///     })
///     .unwrap();
/// assert!(basic.is_active);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    components: HashMap<Uuid, SalaryComponent>,
}

impl ComponentCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new component for an organization.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Validation`] when the definition is
    /// malformed (reported field-by-field) and
    /// [`PayrollError::DuplicateComponentCode`] when the code is already
    /// taken within the organization. No state changes on error.
    pub fn create(
        &mut self,
        organization_id: &str,
        definition: ComponentDefinition,
    ) -> PayrollResult<SalaryComponent> {
        validate_definition(&definition)?;

        if self.find_by_code(organization_id, &definition.code).is_some() {
            return Err(PayrollError::DuplicateComponentCode {
                code: definition.code,
                organization_id: organization_id.to_string(),
            });
        }

        let component = SalaryComponent {
            id: Uuid::new_v4(),
            organization_id: organization_id.to_string(),
            name: definition.name,
            code: definition.code,
            component_type: definition.component_type,
            calculation_type: definition.calculation_type,
            is_taxable: definition.is_taxable,
            is_fixed: definition.is_fixed,
            display_in_payslip: definition.display_in_payslip,
            sort_order: definition.sort_order,
            is_active: true,
        };
        self.components.insert(component.id, component.clone());
        Ok(component)
    }

    /// Replaces the definition of an existing component.
    ///
    /// Changing the code re-checks uniqueness within the organization.
    pub fn update(
        &mut self,
        component_id: Uuid,
        definition: ComponentDefinition,
    ) -> PayrollResult<SalaryComponent> {
        validate_definition(&definition)?;

        let existing = self
            .components
            .get(&component_id)
            .ok_or(PayrollError::ComponentNotFound { id: component_id })?;
        let organization_id = existing.organization_id.clone();

        if definition.code != existing.code
            && self.find_by_code(&organization_id, &definition.code).is_some()
        {
            return Err(PayrollError::DuplicateComponentCode {
                code: definition.code,
                organization_id,
            });
        }

        let component = self
            .components
            .get_mut(&component_id)
            .ok_or(PayrollError::ComponentNotFound { id: component_id })?;
        component.name = definition.name;
        component.code = definition.code;
        component.component_type = definition.component_type;
        component.calculation_type = definition.calculation_type;
        component.is_taxable = definition.is_taxable;
        component.is_fixed = definition.is_fixed;
        component.display_in_payslip = definition.display_in_payslip;
        component.sort_order = definition.sort_order;
        Ok(component.clone())
    }

    /// Soft-deactivates a component.
    ///
    /// The component stays resolvable for structures that already
    /// reference it; it can no longer be newly assigned.
    pub fn deactivate(&mut self, component_id: Uuid) -> PayrollResult<SalaryComponent> {
        let component = self
            .components
            .get_mut(&component_id)
            .ok_or(PayrollError::ComponentNotFound { id: component_id })?;
        component.is_active = false;
        Ok(component.clone())
    }

    /// Looks up a component by id.
    pub fn get(&self, component_id: Uuid) -> PayrollResult<&SalaryComponent> {
        self.components
            .get(&component_id)
            .ok_or(PayrollError::ComponentNotFound { id: component_id })
    }

    /// Looks up a component by organization and code.
    pub fn find_by_code(&self, organization_id: &str, code: &str) -> Option<&SalaryComponent> {
        self.components
            .values()
            .find(|c| c.organization_id == organization_id && c.code == code)
    }

    /// Returns an organization's components sorted by `sort_order`.
    pub fn components_for(&self, organization_id: &str) -> Vec<&SalaryComponent> {
        let mut components: Vec<&SalaryComponent> = self
            .components
            .values()
            .filter(|c| c.organization_id == organization_id)
            .collect();
        components.sort_by_key(|c| (c.sort_order, c.code.clone()));
        components
    }
}

/// Validates a component definition, collecting every field failure.
fn validate_definition(definition: &ComponentDefinition) -> PayrollResult<()> {
    let mut errors = Vec::new();

    if definition.name.trim().is_empty() {
        errors.push(FieldError::new("name", "must not be empty"));
    }
    if definition.code.is_empty() {
        errors.push(FieldError::new("code", "must not be empty"));
    } else {
        if definition.code.len() > MAX_CODE_LENGTH {
            errors.push(FieldError::new(
                "code",
                format!("must be at most {} characters", MAX_CODE_LENGTH),
            ));
        }
        if !definition
            .code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        {
            errors.push(FieldError::new(
                "code",
                "must contain only uppercase letters, digits and underscores",
            ));
        }
    }
    if definition.sort_order < 1 {
        errors.push(FieldError::new("sort_order", "must be at least 1"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(PayrollError::Validation { errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalculationType, ComponentType};

    fn definition(code: &str, component_type: ComponentType) -> ComponentDefinition {
        ComponentDefinition {
            name: format!("{} component", code),
            code: code.to_string(),
            component_type,
            calculation_type: CalculationType::Fixed,
            is_taxable: true,
            is_fixed: true,
            display_in_payslip: true,
            sort_order: 1,
        }
    }

    #[test]
    fn test_create_component() {
        let mut catalog = ComponentCatalog::new();
        let component = catalog
            .create("org_001", definition("BASIC", ComponentType::Earning))
            .unwrap();

        assert_eq!(component.code, "BASIC");
        assert!(component.is_active);
        assert_eq!(catalog.get(component.id).unwrap().code, "BASIC");
    }

    #[test]
    fn test_duplicate_code_within_org_rejected() {
        let mut catalog = ComponentCatalog::new();
        catalog
            .create("org_001", definition("BASIC", ComponentType::Earning))
            .unwrap();

        let result = catalog.create("org_001", definition("BASIC", ComponentType::Allowance));
        match result.unwrap_err() {
            PayrollError::DuplicateComponentCode {
                code,
                organization_id,
            } => {
                assert_eq!(code, "BASIC");
                assert_eq!(organization_id, "org_001");
            }
            other => panic!("Expected DuplicateComponentCode, got {:?}", other),
        }
    }

    #[test]
    fn test_same_code_allowed_across_orgs() {
        let mut catalog = ComponentCatalog::new();
        catalog
            .create("org_001", definition("BASIC", ComponentType::Earning))
            .unwrap();
        let result = catalog.create("org_002", definition("BASIC", ComponentType::Earning));
        assert!(result.is_ok());
    }

    #[test]
    fn test_lowercase_code_rejected() {
        let mut catalog = ComponentCatalog::new();
        let result = catalog.create("org_001", definition("basic", ComponentType::Earning));

        match result.unwrap_err() {
            PayrollError::Validation { errors } => {
                assert!(errors.iter().any(|e| e.field == "code"));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_overlong_code_rejected() {
        let mut catalog = ComponentCatalog::new();
        let result = catalog.create(
            "org_001",
            definition("A_VERY_LONG_CODE_OVER_TWENTY", ComponentType::Earning),
        );
        assert!(matches!(
            result.unwrap_err(),
            PayrollError::Validation { .. }
        ));
    }

    #[test]
    fn test_validation_collects_all_field_errors() {
        let mut catalog = ComponentCatalog::new();
        let mut bad = definition("", ComponentType::Earning);
        bad.name = "  ".to_string();
        bad.sort_order = 0;

        match catalog.create("org_001", bad).unwrap_err() {
            PayrollError::Validation { errors } => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"name"));
                assert!(fields.contains(&"code"));
                assert!(fields.contains(&"sort_order"));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_deactivate_keeps_component_resolvable() {
        let mut catalog = ComponentCatalog::new();
        let component = catalog
            .create("org_001", definition("PF", ComponentType::Deduction))
            .unwrap();

        catalog.deactivate(component.id).unwrap();

        let resolved = catalog.get(component.id).unwrap();
        assert!(!resolved.is_active);
        assert_eq!(resolved.code, "PF");
    }

    #[test]
    fn test_update_changes_fields() {
        let mut catalog = ComponentCatalog::new();
        let component = catalog
            .create("org_001", definition("HRA", ComponentType::Allowance))
            .unwrap();

        let mut updated_def = definition("HRA", ComponentType::Allowance);
        updated_def.name = "House Rent Allowance".to_string();
        updated_def.sort_order = 3;

        let updated = catalog.update(component.id, updated_def).unwrap();
        assert_eq!(updated.name, "House Rent Allowance");
        assert_eq!(updated.sort_order, 3);
    }

    #[test]
    fn test_update_code_rechecks_uniqueness() {
        let mut catalog = ComponentCatalog::new();
        catalog
            .create("org_001", definition("BASIC", ComponentType::Earning))
            .unwrap();
        let hra = catalog
            .create("org_001", definition("HRA", ComponentType::Allowance))
            .unwrap();

        let result = catalog.update(hra.id, definition("BASIC", ComponentType::Allowance));
        assert!(matches!(
            result.unwrap_err(),
            PayrollError::DuplicateComponentCode { .. }
        ));
    }

    #[test]
    fn test_update_unknown_component_fails() {
        let mut catalog = ComponentCatalog::new();
        let result = catalog.update(Uuid::new_v4(), definition("X", ComponentType::Earning));
        assert!(matches!(
            result.unwrap_err(),
            PayrollError::ComponentNotFound { .. }
        ));
    }

    #[test]
    fn test_components_for_sorted_by_sort_order() {
        let mut catalog = ComponentCatalog::new();
        let mut pf = definition("PF", ComponentType::Deduction);
        pf.sort_order = 3;
        let mut basic = definition("BASIC", ComponentType::Earning);
        basic.sort_order = 1;
        let mut hra = definition("HRA", ComponentType::Allowance);
        hra.sort_order = 2;

        catalog.create("org_001", pf).unwrap();
        catalog.create("org_001", basic).unwrap();
        catalog.create("org_001", hra).unwrap();
        catalog
            .create("org_002", definition("OTHER", ComponentType::Earning))
            .unwrap();

        let codes: Vec<&str> = catalog
            .components_for("org_001")
            .iter()
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(codes, vec!["BASIC", "HRA", "PF"]);
    }
}
