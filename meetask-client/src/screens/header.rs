/// Header / layout chrome
///
/// Shows the authenticated user's name and avatar and the global
/// navigation. The current user is fetched through the cache like any
/// other read and handed to the view as data — no ambient singleton.
use std::sync::Arc;

use meetask_shared::models::user::CurrentUser;

use crate::error::ClientError;
use crate::routes::Route;
use crate::store::Store;

use super::ScreenState;

/// Controller for the layout header
pub struct HeaderScreen {
    store: Store,
    user: ScreenState<Arc<CurrentUser>>,
}

impl HeaderScreen {
    pub fn new(store: Store) -> Self {
        HeaderScreen {
            store,
            user: ScreenState::Loading,
        }
    }

    /// Fetches the session user
    ///
    /// An unauthenticated session is not an error banner; the caller
    /// checks `needs_login` and navigates to the login entry.
    pub async fn load(&mut self) {
        self.user = self.store.me().await.into();
    }

    /// The session user, once loaded
    pub fn user(&self) -> &ScreenState<Arc<CurrentUser>> {
        &self.user
    }

    /// Whether the session is gone and the browser should go to login
    pub fn needs_login(&self) -> bool {
        matches!(
            self.user,
            ScreenState::Failed(ClientError::Unauthenticated)
        )
    }

    /// Global navigation entries
    pub fn nav(&self) -> [(&'static str, Route); 2] {
        [("My groups", Route::Groups), ("New group", Route::NewGroup)]
    }

    /// Browser navigation target for logout
    pub fn logout_url(&self) -> String {
        self.store.logout_url()
    }
}
