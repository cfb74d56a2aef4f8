use serde::{Deserialize, Serialize};

/// Staff role. Closed set: the role vocabulary is fixed by the product, so an
/// enum (rather than opaque strings) makes the admin bypass impossible to
/// misspell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Waiter,
    Receptionist,
    Accountant,
    StoreKeeper,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Manager,
        Role::Waiter,
        Role::Receptionist,
        Role::Accountant,
        Role::StoreKeeper,
    ];

    /// Admins hold every permission implicitly, regardless of grants.
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Waiter => "waiter",
            Role::Receptionist => "receptionist",
            Role::Accountant => "accountant",
            Role::StoreKeeper => "store_keeper",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
