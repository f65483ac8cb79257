use libraryhub_authz::{require_role, AccessError, Role};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::User;

/// Top-level screen the client is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Catalog,
    Admin,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("admin view requires an admin session: {0}")]
    AdminRequired(#[from] AccessError),

    #[error("admin view is not active")]
    AdminViewInactive,
}

impl From<ViewError> for libraryhub_http::error::AppError {
    fn from(err: ViewError) -> Self {
        match err {
            ViewError::AdminRequired(AccessError::SignInRequired) => Self::unauthorized(err.to_string()),
            ViewError::AdminRequired(AccessError::RoleRequired { .. })
            | ViewError::AdminViewInactive => Self::forbidden(err.to_string()),
        }
    }
}

/// Two-state switch between the catalog and the admin dashboard.
#[derive(Debug, Default)]
pub struct ViewCoordinator {
    current: View,
}

impl ViewCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// Move to `target`. Entering the admin view needs an admin `user`.
    pub fn switch_to(&mut self, target: View, user: Option<&User>) -> Result<View, ViewError> {
        if target == View::Admin {
            require_role(user, Role::Admin)?;
        }
        if self.current != target {
            tracing::debug!(from = ?self.current, to = ?target, "view switched");
        }
        self.current = target;
        Ok(self.current)
    }

    /// Back to the catalog, unconditionally.
    pub fn reset(&mut self) {
        self.current = View::Catalog;
    }

    /// Succeeds only while the admin view is active and `user` is an admin.
    pub fn require_admin<'a>(&self, user: Option<&'a User>) -> Result<&'a User, ViewError> {
        let user = require_role(user, Role::Admin)?;
        if self.current != View::Admin {
            return Err(ViewError::AdminViewInactive);
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User::synthesize("someone@library.test", role)
    }

    #[test]
    fn starts_in_catalog() {
        assert_eq!(ViewCoordinator::new().current(), View::Catalog);
    }

    #[test]
    fn admin_can_enter_admin_view() {
        let admin = user(Role::Admin);
        let mut views = ViewCoordinator::new();

        assert_eq!(views.switch_to(View::Admin, Some(&admin)), Ok(View::Admin));
        assert!(views.require_admin(Some(&admin)).is_ok());
    }

    #[test]
    fn plain_user_and_anonymous_are_refused() {
        let plain = user(Role::User);
        let mut views = ViewCoordinator::new();

        assert!(matches!(
            views.switch_to(View::Admin, Some(&plain)),
            Err(ViewError::AdminRequired(AccessError::RoleRequired { .. }))
        ));
        assert_eq!(
            views.switch_to(View::Admin, None),
            Err(ViewError::AdminRequired(AccessError::SignInRequired))
        );
        assert_eq!(views.current(), View::Catalog);
    }

    #[test]
    fn catalog_is_always_reachable() {
        let mut views = ViewCoordinator::new();
        assert_eq!(views.switch_to(View::Catalog, None), Ok(View::Catalog));
    }

    #[test]
    fn admin_guard_needs_active_admin_view() {
        let admin = user(Role::Admin);
        let mut views = ViewCoordinator::new();
        assert_eq!(
            views.require_admin(Some(&admin)).unwrap_err(),
            ViewError::AdminViewInactive
        );

        views.switch_to(View::Admin, Some(&admin)).unwrap();
        views.reset();
        assert_eq!(views.current(), View::Catalog);
        assert!(views.require_admin(Some(&admin)).is_err());
    }
}
