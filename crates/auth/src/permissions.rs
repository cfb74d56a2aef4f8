//! Module/action grants held by a principal.

use serde::{Deserialize, Serialize};

use crate::{Department, Role};

/// A business area subject to access control.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Hotel,
    Restaurant,
    Pub,
    Accounting,
    Store,
    Procurement,
    Reports,
    Users,
}

impl Module {
    pub const ALL: [Module; 8] = [
        Module::Hotel,
        Module::Restaurant,
        Module::Pub,
        Module::Accounting,
        Module::Store,
        Module::Procurement,
        Module::Reports,
        Module::Users,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Module::Hotel => "hotel",
            Module::Restaurant => "restaurant",
            Module::Pub => "pub",
            Module::Accounting => "accounting",
            Module::Store => "store",
            Module::Procurement => "procurement",
            Module::Reports => "reports",
            Module::Users => "users",
        }
    }
}

impl core::fmt::Display for Module {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation on a module's resources.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Approve,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Approve,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Approve => "approve",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (module, permitted-actions) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub module: Module,
    pub actions: Vec<Action>,
}

impl Grant {
    pub fn new(module: Module, actions: impl Into<Vec<Action>>) -> Self {
        Self {
            module,
            actions: actions.into(),
        }
    }

    pub fn full(module: Module) -> Self {
        Self::new(module, Action::ALL)
    }
}

/// The set of grants held by a principal.
///
/// A module with no grant (or an empty action list) simply yields a negative
/// authorization result; it is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(Vec<Grant>);

impl PermissionSet {
    pub fn new(grants: impl Into<Vec<Grant>>) -> Self {
        Self(grants.into())
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn allows(&self, module: Module, action: Action) -> bool {
        self.0
            .iter()
            .any(|g| g.module == module && g.actions.contains(&action))
    }

    pub fn grants(&self) -> &[Grant] {
        &self.0
    }
}

impl From<Vec<Grant>> for PermissionSet {
    fn from(grants: Vec<Grant>) -> Self {
        Self(grants)
    }
}

/// Grants seeded for a newly created account, by role and home department.
///
/// Admins get everything explicitly even though the permission check bypasses
/// grants for them; it keeps audit listings honest.
pub fn default_grants(role: Role, department: Department) -> PermissionSet {
    use Action::*;

    let dept_module = department.module();
    let grants = match role {
        Role::Admin => Module::ALL.into_iter().map(Grant::full).collect(),
        Role::Manager => {
            let mut grants = Vec::new();
            if let Some(module) = dept_module {
                grants.push(Grant::new(module, vec![Create, Read, Update, Approve]));
            }
            grants.push(Grant::new(Module::Reports, vec![Read]));
            grants
        }
        Role::Waiter | Role::Receptionist => dept_module
            .map(|module| vec![Grant::new(module, vec![Create, Read, Update])])
            .unwrap_or_default(),
        Role::Accountant => vec![
            Grant::new(Module::Accounting, vec![Create, Read, Update, Approve]),
            Grant::new(Module::Reports, vec![Read]),
        ],
        Role::StoreKeeper => vec![
            Grant::new(Module::Store, vec![Create, Read, Update]),
            Grant::new(Module::Procurement, vec![Read]),
        ],
    };

    PermissionSet(grants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_requires_module_and_action() {
        let set = PermissionSet::new(vec![Grant::new(
            Module::Restaurant,
            vec![Action::Create, Action::Read],
        )]);
        assert!(set.allows(Module::Restaurant, Action::Create));
        assert!(!set.allows(Module::Restaurant, Action::Delete));
        assert!(!set.allows(Module::Hotel, Action::Read));
    }

    #[test]
    fn empty_set_denies_everything() {
        let set = PermissionSet::empty();
        for module in Module::ALL {
            for action in Action::ALL {
                assert!(!set.allows(module, action));
            }
        }
    }

    #[test]
    fn admin_defaults_cover_every_module_and_action() {
        let set = default_grants(Role::Admin, Department::All);
        for module in Module::ALL {
            for action in Action::ALL {
                assert!(set.allows(module, action));
            }
        }
    }

    #[test]
    fn manager_defaults_follow_the_home_department() {
        let set = default_grants(Role::Manager, Department::Hotel);
        assert!(set.allows(Module::Hotel, Action::Approve));
        assert!(set.allows(Module::Reports, Action::Read));
        assert!(!set.allows(Module::Hotel, Action::Delete));
        assert!(!set.allows(Module::Restaurant, Action::Read));
    }

    #[test]
    fn waiter_defaults_have_no_approve() {
        let set = default_grants(Role::Waiter, Department::Restaurant);
        assert!(set.allows(Module::Restaurant, Action::Create));
        assert!(!set.allows(Module::Restaurant, Action::Approve));
        assert!(!set.allows(Module::Reports, Action::Read));
    }

    #[test]
    fn store_keeper_can_read_procurement() {
        let set = default_grants(Role::StoreKeeper, Department::Store);
        assert!(set.allows(Module::Store, Action::Update));
        assert!(set.allows(Module::Procurement, Action::Read));
        assert!(!set.allows(Module::Procurement, Action::Create));
    }
}
