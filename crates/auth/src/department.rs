use serde::{Deserialize, Serialize};

use crate::permissions::Module;

/// Organizational scope of a principal or resource record.
///
/// `All` is the wildcard held by cross-department staff; resources themselves
/// are always owned by a concrete department.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Hotel,
    Restaurant,
    Pub,
    Accounting,
    Store,
    Procurement,
    All,
}

impl Department {
    /// The access-control module this department's resources belong to.
    /// `All` is a principal-side wildcard and maps to no single module.
    pub const fn module(&self) -> Option<Module> {
        match self {
            Department::Hotel => Some(Module::Hotel),
            Department::Restaurant => Some(Module::Restaurant),
            Department::Pub => Some(Module::Pub),
            Department::Accounting => Some(Module::Accounting),
            Department::Store => Some(Module::Store),
            Department::Procurement => Some(Module::Procurement),
            Department::All => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Department::Hotel => "hotel",
            Department::Restaurant => "restaurant",
            Department::Pub => "pub",
            Department::Accounting => "accounting",
            Department::Store => "store",
            Department::Procurement => "procurement",
            Department::All => "all",
        }
    }
}

impl core::fmt::Display for Department {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
