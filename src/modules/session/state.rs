use libraryhub_authz::Role;
use thiserror::Error;

use super::models::User;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("{0} is required")]
    MissingCredential(&'static str),
}

impl From<SessionError> for libraryhub_http::error::AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::MissingCredential(field) => {
                Self::invalid_field(field, "required", err.to_string())
            }
        }
    }
}

/// At most one signed-in user.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign in, replacing any existing session.
    ///
    /// Only presence of both credentials is checked; the role is whatever the
    /// caller asked for.
    pub fn login(&mut self, email: &str, password: &str, is_admin: bool) -> Result<&User, SessionError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(SessionError::MissingCredential("email"));
        }
        if password.is_empty() {
            return Err(SessionError::MissingCredential("password"));
        }

        if let Some(previous) = &self.current {
            tracing::info!(user_id = %previous.id, "replacing existing session");
        }

        let user = User::synthesize(email, Role::from_admin_flag(is_admin));
        tracing::info!(user_id = %user.id, email = %user.email, role = %user.role, "user logged in");
        Ok(&*self.current.insert(user))
    }

    /// Clear the session, returning the user that was signed in.
    pub fn logout(&mut self) -> Option<User> {
        let previous = self.current.take();
        if let Some(user) = &previous {
            tracing::info!(user_id = %user.id, "user logged out");
        }
        previous
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_credentials() {
        let mut session = Session::new();
        assert_eq!(
            session.login("", "secret", false).unwrap_err(),
            SessionError::MissingCredential("email")
        );
        assert_eq!(
            session.login("ada@library.test", "", false).unwrap_err(),
            SessionError::MissingCredential("password")
        );
        assert!(session.current().is_none());
    }

    #[test]
    fn role_follows_admin_flag() {
        let mut session = Session::new();
        assert_eq!(session.login("ada@library.test", "x", true).unwrap().role, Role::Admin);
        assert_eq!(session.login("bob@library.test", "x", false).unwrap().role, Role::User);
    }

    #[test]
    fn new_login_replaces_previous_user() {
        let mut session = Session::new();
        session.login("ada@library.test", "x", true).unwrap();
        session.login("bob@library.test", "x", false).unwrap();

        assert_eq!(session.current().unwrap().email, "bob@library.test");
    }

    #[test]
    fn logout_clears_session() {
        let mut session = Session::new();
        session.login("ada@library.test", "x", false).unwrap();

        let previous = session.logout().unwrap();
        assert_eq!(previous.email, "ada@library.test");
        assert!(session.current().is_none());
        assert!(session.logout().is_none());
    }
}
