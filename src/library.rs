//! Process-wide application state: the catalog, the session and the current view.

use std::sync::Arc;

use libraryhub_authz::{require_signed_in, AccessError};
use libraryhub_kernel::settings::CatalogSettings;
use tokio::sync::RwLock;

use crate::modules::catalog::{seed, store::CatalogStore};
use crate::modules::session::{
    models::User,
    state::{Session, SessionError},
    view::{View, ViewCoordinator, ViewError},
};

/// Handle shared by every module's handlers. One lock guards the whole state so
/// check-then-mutate sequences (borrow, view switches) run atomically.
pub type SharedLibrary = Arc<RwLock<Library>>;

#[derive(Debug)]
pub struct Library {
    pub catalog: CatalogStore,
    pub session: Session,
    pub views: ViewCoordinator,
}

impl Library {
    pub fn new(catalog: CatalogStore) -> Self {
        Self {
            catalog,
            session: Session::new(),
            views: ViewCoordinator::new(),
        }
    }

    pub fn from_settings(settings: &CatalogSettings) -> Self {
        let catalog = if settings.seed_sample {
            CatalogStore::with_books(&settings.default_cover_url, seed::sample_books())
        } else {
            CatalogStore::new(&settings.default_cover_url)
        };
        tracing::info!(books = catalog.len(), "catalog ready");
        Self::new(catalog)
    }

    pub fn into_shared(self) -> SharedLibrary {
        Arc::new(RwLock::new(self))
    }

    /// Sign in. A non-admin login drops the view back to the catalog.
    pub fn login(&mut self, email: &str, password: &str, is_admin: bool) -> Result<&User, SessionError> {
        let user = self.session.login(email, password, is_admin)?;
        if !user.is_admin() {
            self.views.reset();
        }
        Ok(user)
    }

    /// Clear the session and return to the catalog view.
    pub fn logout(&mut self) -> Option<User> {
        self.views.reset();
        self.session.logout()
    }

    pub fn switch_view(&mut self, target: View) -> Result<View, ViewError> {
        self.views.switch_to(target, self.session.current())
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current()
    }

    pub fn require_signed_in(&self) -> Result<&User, AccessError> {
        require_signed_in(self.session.current())
    }

    pub fn require_admin(&self) -> Result<&User, ViewError> {
        self.views.require_admin(self.session.current())
    }
}
