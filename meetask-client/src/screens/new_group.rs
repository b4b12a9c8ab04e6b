/// Group creation screen
///
/// A name-only form. Validation failures and server rejections both keep
/// the typed name and re-enable the form; success hands back the new
/// board route to navigate to.
use meetask_shared::models::group::{CreateGroup, Group};

use crate::error::{ClientError, ClientResult};
use crate::routes::Route;
use crate::store::Store;

/// Controller for the "new group" form
pub struct NewGroupScreen {
    store: Store,
    name: String,
    submitting: bool,
    error: Option<ClientError>,
}

impl NewGroupScreen {
    pub fn new(store: Store) -> Self {
        NewGroupScreen {
            store,
            name: String::new(),
            submitting: false,
            error: None,
        }
    }

    /// Current form value
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Updates the form value and clears any stale error
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.error = None;
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self) -> bool {
        !self.submitting
    }

    /// The last submission error, if any
    pub fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }

    /// Creates the group
    ///
    /// Returns the board route of the new group on success. On failure
    /// the form stays populated and re-enabled, with the error exposed
    /// via `error()`.
    pub async fn submit(&mut self) -> ClientResult<(Group, Route)> {
        if self.submitting {
            return Err(ClientError::Busy);
        }
        self.submitting = true;

        let payload = CreateGroup {
            name: self.name.clone(),
        };
        let result = self.store.create_group(&payload).await;
        self.submitting = false;

        match result {
            Ok(group) => {
                self.error = None;
                let route = Route::Group(group.id);
                Ok((group, route))
            }
            Err(err) => {
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }
}
