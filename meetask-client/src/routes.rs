/// Client-side route table
///
/// The canonical URL shape for every screen. The routing library itself
/// is an external collaborator; this module only renders and parses the
/// paths so navigation targets are typed values rather than strings.
use std::fmt;

/// A navigable screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login landing page
    Landing,

    /// The caller's group list
    Groups,

    /// Group creation form
    NewGroup,

    /// Kanban board of one group
    Group(i64),

    /// Minutes upload/paste for one group
    Extraction(i64),

    /// Extraction review for one group
    ExtractionResult(i64),

    /// Detail/editor of one task
    Task(i64),
}

impl Route {
    /// Renders the route's path
    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Groups => "/groups".to_string(),
            Route::NewGroup => "/groups/new".to_string(),
            Route::Group(id) => format!("/groups/{id}"),
            Route::Extraction(id) => format!("/groups/{id}/extraction"),
            Route::ExtractionResult(id) => format!("/groups/{id}/extraction/result"),
            Route::Task(id) => format!("/tasks/{id}"),
        }
    }

    /// Parses a path back into a route
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::Landing),
            ["groups"] => Some(Route::Groups),
            ["groups", "new"] => Some(Route::NewGroup),
            ["groups", id] => id.parse().ok().map(Route::Group),
            ["groups", id, "extraction"] => id.parse().ok().map(Route::Extraction),
            ["groups", id, "extraction", "result"] => {
                id.parse().ok().map(Route::ExtractionResult)
            }
            ["tasks", id] => id.parse().ok().map(Route::Task),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
