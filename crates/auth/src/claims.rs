use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use innkeep_core::{TenantId, UserId};

use crate::{Department, PermissionSet, Principal, Role};

/// Bearer-token claims model (transport-agnostic).
///
/// This is the minimal set of claims the core expects once a token has been
/// decoded and signature-verified by whatever transport/security layer is in
/// use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject / user identifier.
    pub sub: UserId,

    /// Tenant (property/business) the subject belongs to.
    pub tenant: TenantId,

    /// Staff role within the business.
    pub role: Role,

    /// Home department (or the `all` wildcard).
    pub department: Department,

    /// Per-module action grants.
    pub grants: PermissionSet,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl AuthClaims {
    /// Build the request principal carried by these claims.
    ///
    /// Call [`validate_claims`] first; this conversion itself cannot fail.
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.sub,
            tenant_id: self.tenant,
            role: self.role,
            department: self.department,
            grants: self.grants.clone(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

impl TokenValidationError {
    /// Transport mapping: every claims failure is a 401.
    pub fn http_status(&self) -> u16 {
        401
    }
}

/// Deterministically validate token claims.
///
/// Note: this validates the *claims* only. Signature verification / decoding
/// is intentionally outside this crate.
pub fn validate_claims(
    claims: &AuthClaims,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> AuthClaims {
        AuthClaims {
            sub: UserId::new(),
            tenant: TenantId::new(),
            role: Role::Waiter,
            department: Department::Restaurant,
            grants: PermissionSet::empty(),
            issued_at,
            expires_at,
        }
    }

    #[test]
    fn valid_window_passes() {
        let now = Utc::now();
        let c = claims(now - Duration::minutes(5), now + Duration::hours(1));
        assert!(validate_claims(&c, now).is_ok());
        let principal = c.principal();
        assert_eq!(principal.department, Department::Restaurant);
        assert_eq!(principal.tenant_id, c.tenant);
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now();
        let c = claims(now - Duration::hours(2), now - Duration::minutes(1));
        assert_eq!(
            validate_claims(&c, now).unwrap_err(),
            TokenValidationError::Expired
        );
    }

    #[test]
    fn future_issued_at_is_rejected() {
        let now = Utc::now();
        let c = claims(now + Duration::minutes(10), now + Duration::hours(1));
        assert_eq!(
            validate_claims(&c, now).unwrap_err(),
            TokenValidationError::NotYetValid
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        let now = Utc::now();
        let c = claims(now, now - Duration::hours(1));
        assert_eq!(
            validate_claims(&c, now).unwrap_err(),
            TokenValidationError::InvalidTimeWindow
        );
    }
}
