use std::collections::BTreeSet;

use libraryhub_authz::{Principal, Role};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::modules::catalog::models::BookId;

/// The signed-in principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Kept for clients; nothing in the catalog reads or writes it.
    pub borrowed_books: BTreeSet<BookId>,
    #[serde(with = "time::serde::rfc3339")]
    pub join_date: OffsetDateTime,
}

impl User {
    /// Synthesize a user from login input. No credential store is consulted.
    pub fn synthesize(email: &str, role: Role) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: display_name(email).to_string(),
            email: email.to_string(),
            role,
            borrowed_books: BTreeSet::new(),
            join_date: OffsetDateTime::now_utc(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl Principal for User {
    fn role(&self) -> Role {
        self.role
    }
}

/// Login form payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Local part of the email, or the whole email when that part is empty.
fn display_name(email: &str) -> &str {
    match email.split_once('@') {
        Some((local, _)) if !local.is_empty() => local,
        _ => email,
    }
}
