use serde::{Deserialize, Serialize};

use innkeep_core::{TenantId, UserId};

use crate::authorize::AccessError;
use crate::{Department, PermissionSet, Role};

/// A fully resolved principal for authorization decisions.
///
/// Constructed once per authenticated request from verified token claims (or
/// a loaded account) and immutable for the duration of the request. No IO.
/// The tenant id scopes the principal to one property; resource lookups are
/// always performed within it by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub tenant_id: TenantId,
    pub role: Role,
    pub department: Department,
    pub grants: PermissionSet,
}

/// A stored staff account, as the identity layer hands it to us.
///
/// Password hashes and login mechanics live outside this crate; the only
/// account state the policy cares about is whether it has been deactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub tenant_id: TenantId,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    pub department: Department,
    pub grants: PermissionSet,
    pub is_active: bool,
}

impl UserAccount {
    /// Resolve this account into a request principal.
    ///
    /// Deactivated accounts never become principals.
    pub fn principal(&self) -> Result<Principal, AccessError> {
        if !self.is_active {
            return Err(AccessError::AccountDeactivated);
        }
        Ok(Principal {
            user_id: self.id,
            tenant_id: self.tenant_id,
            role: self.role,
            department: self.department,
            grants: self.grants.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::default_grants;

    fn account(is_active: bool) -> UserAccount {
        UserAccount {
            id: UserId::new(),
            tenant_id: TenantId::new(),
            username: "receptionist1".to_string(),
            display_name: "Mary Receptionist".to_string(),
            role: Role::Receptionist,
            department: Department::Hotel,
            grants: default_grants(Role::Receptionist, Department::Hotel),
            is_active,
        }
    }

    #[test]
    fn active_account_resolves_to_principal() {
        let account = account(true);
        let principal = account.principal().unwrap();
        assert_eq!(principal.user_id, account.id);
        assert_eq!(principal.tenant_id, account.tenant_id);
        assert_eq!(principal.department, Department::Hotel);
    }

    #[test]
    fn deactivated_account_is_rejected() {
        let err = account(false).principal().unwrap_err();
        assert_eq!(err, AccessError::AccountDeactivated);
        assert_eq!(err.http_status(), 401);
    }
}
