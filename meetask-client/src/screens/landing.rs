/// Landing screen: login entry
///
/// The only screen reachable without a session. Login is redirect-based
/// OAuth, so the controller just exposes the browser navigation target;
/// there is nothing to fetch.
use crate::routes::Route;
use crate::store::Store;

/// Controller for the login landing page
pub struct LandingScreen {
    store: Store,
}

impl LandingScreen {
    pub fn new(store: Store) -> Self {
        LandingScreen { store }
    }

    /// Where the "log in" button navigates (browser navigation, not XHR)
    pub fn login_url(&self) -> String {
        self.store.login_url()
    }

    /// Where an authenticated visitor is routed instead
    pub fn authenticated_route(&self) -> Route {
        Route::Groups
    }
}
