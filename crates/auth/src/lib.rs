//! `innkeep-auth` — pure authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it answers
//! "may this principal perform this action on this resource" from values the
//! transport layer has already authenticated. Token signature verification,
//! password hashing and session storage live outside.

pub mod authorize;
pub mod claims;
pub mod department;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use authorize::{AccessError, AccessExplanation, DenialKind, admit, check, explain};
pub use claims::{AuthClaims, TokenValidationError, validate_claims};
pub use department::Department;
pub use permissions::{Action, Grant, Module, PermissionSet, default_grants};
pub use principal::{Principal, UserAccount};
pub use roles::Role;
