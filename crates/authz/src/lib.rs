//! Role guards for the single-session access model.
//!
//! Roles are self-asserted at login; these guards only enforce what the
//! session claims.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role carried by the signed-in principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can report the role of the current principal.
pub trait Principal {
    fn role(&self) -> Role;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("sign in required")]
    SignInRequired,

    #[error("role '{required}' required, session has '{actual}'")]
    RoleRequired { required: Role, actual: Role },
}

/// Require any signed-in principal.
pub fn require_signed_in<P: Principal>(principal: Option<&P>) -> Result<&P, AccessError> {
    principal.ok_or_else(|| {
        tracing::debug!(target: "libraryhub-authz", "anonymous access refused");
        AccessError::SignInRequired
    })
}

/// Require a signed-in principal holding `required`.
pub fn require_role<P: Principal>(principal: Option<&P>, required: Role) -> Result<&P, AccessError> {
    let principal = require_signed_in(principal)?;
    let actual = principal.role();
    if actual != required {
        tracing::debug!(
            target: "libraryhub-authz",
            %required,
            %actual,
            "role check failed"
        );
        return Err(AccessError::RoleRequired { required, actual });
    }
    Ok(principal)
}
