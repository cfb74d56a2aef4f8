use serde::Serialize;
use thiserror::Error;

use crate::{Action, Department, Module, Principal};

/// Admission failure for a requested (module, action, department) tuple.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("access denied: insufficient department privileges")]
    DepartmentDenied,

    #[error("no permission to {action} {module} resources")]
    PermissionDenied { module: Module, action: Action },

    #[error("user account is deactivated")]
    AccountDeactivated,
}

impl AccessError {
    /// Transport mapping: missing identity is 401, refusals are 403.
    pub fn http_status(&self) -> u16 {
        match self {
            AccessError::AccountDeactivated => 401,
            AccessError::DepartmentDenied | AccessError::PermissionDenied { .. } => 403,
        }
    }
}

/// Identity & permission check: may `principal` perform `action` on `module`?
///
/// - Admins pass unconditionally, regardless of grants.
/// - Everyone else passes iff a grant for `module` lists `action`.
/// - No IO, no panics; a missing grant is a negative answer, not an error.
pub fn check(principal: &Principal, module: Module, action: Action) -> bool {
    principal.role.is_admin() || principal.grants.allows(module, action)
}

/// Full admission decision for a request against department-scoped resources.
///
/// Two independent gates, both required:
/// 1. Department scoping — admin, the `all` wildcard, or membership in one of
///    the target departments.
/// 2. Action permission — [`check`].
///
/// The department gate is evaluated first, so a request failing both surfaces
/// `DepartmentDenied`. The decision is pure; the caller applies it.
pub fn admit(
    principal: &Principal,
    module: Module,
    action: Action,
    targets: &[Department],
) -> Result<(), AccessError> {
    let department_ok = principal.role.is_admin()
        || principal.department == Department::All
        || targets.contains(&principal.department);

    if !department_ok {
        tracing::debug!(
            user_id = %principal.user_id,
            tenant_id = %principal.tenant_id,
            department = %principal.department,
            %module,
            %action,
            "admission refused: department out of scope"
        );
        return Err(AccessError::DepartmentDenied);
    }

    if !check(principal, module, action) {
        tracing::debug!(
            user_id = %principal.user_id,
            tenant_id = %principal.tenant_id,
            role = %principal.role,
            %module,
            %action,
            "admission refused: missing permission"
        );
        return Err(AccessError::PermissionDenied { module, action });
    }

    Ok(())
}

/// Serializable record of an admission decision, for audit surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub module: Module,
    pub action: Action,
    pub granted: bool,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denial: Option<DenialKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    DepartmentDenied,
    PermissionDenied,
}

/// Explain why an admission decision was (or would be) made.
///
/// Same decision procedure as [`admit`], with a human-readable account of the
/// outcome.
pub fn explain(
    principal: &Principal,
    module: Module,
    action: Action,
    targets: &[Department],
) -> AccessExplanation {
    match admit(principal, module, action, targets) {
        Ok(()) => {
            let reason = if principal.role.is_admin() {
                "admin role grants every module and action".to_string()
            } else {
                format!(
                    "department '{}' is in scope and grants allow {} on {}",
                    principal.department, action, module
                )
            };
            AccessExplanation {
                module,
                action,
                granted: true,
                reason,
                denial: None,
            }
        }
        Err(AccessError::DepartmentDenied) => AccessExplanation {
            module,
            action,
            granted: false,
            reason: format!(
                "department '{}' is not among the resource's departments",
                principal.department
            ),
            denial: Some(DenialKind::DepartmentDenied),
        },
        Err(_) => AccessExplanation {
            module,
            action,
            granted: false,
            reason: format!("no grant for {} on {}", action, module),
            denial: Some(DenialKind::PermissionDenied),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{Grant, PermissionSet, default_grants};
    use crate::Role;
    use innkeep_core::{TenantId, UserId};

    fn principal(role: Role, department: Department, grants: PermissionSet) -> Principal {
        Principal {
            user_id: UserId::new(),
            tenant_id: TenantId::new(),
            role,
            department,
            grants,
        }
    }

    #[test]
    fn admin_passes_every_module_action_pair_with_empty_grants() {
        let p = principal(Role::Admin, Department::All, PermissionSet::empty());
        for module in Module::ALL {
            for action in Action::ALL {
                assert!(check(&p, module, action));
            }
        }
    }

    #[test]
    fn non_admin_passes_only_literal_grants() {
        let p = principal(
            Role::Waiter,
            Department::Restaurant,
            PermissionSet::new(vec![Grant::new(
                Module::Restaurant,
                vec![Action::Create, Action::Read],
            )]),
        );
        for module in Module::ALL {
            for action in Action::ALL {
                let expected = module == Module::Restaurant
                    && matches!(action, Action::Create | Action::Read);
                assert_eq!(check(&p, module, action), expected);
            }
        }
    }

    #[test]
    fn department_scoping_rejects_cross_department_access() {
        // Hotel staff are rejected for restaurant resources even when their
        // grants would allow the action.
        let p = principal(
            Role::Manager,
            Department::Hotel,
            PermissionSet::new(vec![Grant::full(Module::Restaurant)]),
        );
        assert_eq!(
            admit(&p, Module::Restaurant, Action::Read, &[Department::Restaurant]),
            Err(AccessError::DepartmentDenied)
        );
    }

    #[test]
    fn wildcard_department_passes_scoping() {
        let p = principal(
            Role::Accountant,
            Department::All,
            default_grants(Role::Accountant, Department::All),
        );
        assert_eq!(
            admit(&p, Module::Accounting, Action::Approve, &[Department::Accounting]),
            Ok(())
        );
    }

    #[test]
    fn admin_bypasses_both_gates() {
        let p = principal(Role::Admin, Department::Hotel, PermissionSet::empty());
        assert_eq!(
            admit(&p, Module::Users, Action::Delete, &[Department::Accounting]),
            Ok(())
        );
    }

    #[test]
    fn department_gate_is_surfaced_first() {
        // Fails both gates; the department error wins.
        let p = principal(Role::Waiter, Department::Pub, PermissionSet::empty());
        assert_eq!(
            admit(&p, Module::Restaurant, Action::Create, &[Department::Restaurant]),
            Err(AccessError::DepartmentDenied)
        );
    }

    #[test]
    fn permission_gate_applies_after_department_passes() {
        let p = principal(Role::Waiter, Department::Restaurant, PermissionSet::empty());
        assert_eq!(
            admit(&p, Module::Restaurant, Action::Delete, &[Department::Restaurant]),
            Err(AccessError::PermissionDenied {
                module: Module::Restaurant,
                action: Action::Delete,
            })
        );
    }

    #[test]
    fn multi_department_resources_accept_any_member() {
        let p = principal(
            Role::Waiter,
            Department::Pub,
            default_grants(Role::Waiter, Department::Pub),
        );
        assert_eq!(
            admit(
                &p,
                Module::Pub,
                Action::Read,
                &[Department::Restaurant, Department::Pub],
            ),
            Ok(())
        );
    }

    #[test]
    fn explain_matches_admit() {
        let p = principal(Role::Waiter, Department::Pub, PermissionSet::empty());
        let explanation = explain(&p, Module::Restaurant, Action::Create, &[Department::Restaurant]);
        assert!(!explanation.granted);
        assert_eq!(explanation.denial, Some(DenialKind::DepartmentDenied));

        let admin = principal(Role::Admin, Department::All, PermissionSet::empty());
        let explanation = explain(&admin, Module::Users, Action::Delete, &[Department::Accounting]);
        assert!(explanation.granted);
        assert!(explanation.denial.is_none());
    }

    #[test]
    fn errors_map_to_transport_statuses() {
        assert_eq!(AccessError::DepartmentDenied.http_status(), 403);
        assert_eq!(
            AccessError::PermissionDenied {
                module: Module::Hotel,
                action: Action::Read,
            }
            .http_status(),
            403
        );
        assert_eq!(AccessError::AccountDeactivated.http_status(), 401);
    }
}
