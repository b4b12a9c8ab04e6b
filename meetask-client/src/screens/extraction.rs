/// Extraction flow: minutes in, reviewed tasks out
///
/// One controller spans the upload/paste screen and the review screen,
/// because the draft batch lives only in navigation-transfer state
/// between them.
///
/// # State machine
///
/// ```text
/// Idle ──extract──▶ Extracting ──ok──▶ ReviewReady ──save──▶ Saving ──ok──▶ Saved
///  ▲                    │                 ▲  │ edit/delete      │
///  └──────── error ◀────┘                 └──└───── error ◀─────┘
/// ```
///
/// Transitions happen only on explicit user action or network
/// completion; no timers, no automatic retries. Extraction failure
/// returns to `Idle` with an error (input re-enabled, text kept by the
/// view); save failure returns to `ReviewReady` with the drafts exactly
/// as they were.
use chrono::NaiveDate;

use meetask_shared::board::PriorityCounts;
use meetask_shared::models::task::{DraftTask, Priority, Status};

use crate::error::{ClientError, ClientResult};
use crate::routes::Route;
use crate::store::Store;

/// Where the extraction flow currently stands
#[derive(Debug, Clone)]
pub enum ExtractionState {
    /// Text/file input editable; `error` holds a failed attempt's cause
    Idle {
        /// Why the previous extraction failed, if it did
        error: Option<ClientError>,
    },

    /// Extraction call pending; input disabled
    Extracting,

    /// Draft list editable: per-draft delete and field edits
    ReviewReady {
        /// The batch under review, in extraction order
        drafts: Vec<DraftTask>,

        /// Why the previous save failed, if it did
        error: Option<ClientError>,
    },

    /// Save-all pending; review actions disabled
    Saving,

    /// Batch persisted; navigate to the board
    Saved {
        /// The group board to navigate to
        board: Route,
    },
}

/// Controller for the extraction → review → save flow
pub struct ExtractionScreen {
    store: Store,
    group_id: i64,
    state: ExtractionState,
}

impl ExtractionScreen {
    pub fn new(store: Store, group_id: i64) -> Self {
        ExtractionScreen {
            store,
            group_id,
            state: ExtractionState::Idle { error: None },
        }
    }

    /// Current flow state
    pub fn state(&self) -> &ExtractionState {
        &self.state
    }

    /// Whether the minutes input accepts edits
    pub fn input_enabled(&self) -> bool {
        matches!(self.state, ExtractionState::Idle { .. })
    }

    /// The drafts under review, when reviewing
    pub fn drafts(&self) -> Option<&[DraftTask]> {
        match &self.state {
            ExtractionState::ReviewReady { drafts, .. } => Some(drafts),
            _ => None,
        }
    }

    /// Draft count and per-priority breakdown for the statistics panel
    pub fn stats(&self) -> Option<(usize, PriorityCounts)> {
        self.drafts().map(|drafts| {
            (
                drafts.len(),
                PriorityCounts::tally(drafts.iter().map(|d| d.priority)),
            )
        })
    }

    /// Runs extraction over the pasted minutes
    ///
    /// Only legal from `Idle`. On success the flow moves to
    /// `ReviewReady`; on failure it returns to `Idle` carrying the error.
    pub async fn extract(&mut self, text: &str) -> ClientResult<()> {
        if !matches!(self.state, ExtractionState::Idle { .. }) {
            return Err(ClientError::Busy);
        }
        self.state = ExtractionState::Extracting;

        match self.store.extract_tasks(self.group_id, text).await {
            Ok(drafts) => {
                self.state = ExtractionState::ReviewReady {
                    drafts,
                    error: None,
                };
                Ok(())
            }
            Err(err) => {
                self.state = ExtractionState::Idle {
                    error: Some(err.clone()),
                };
                Err(err)
            }
        }
    }

    /// Removes one draft from the batch; returns whether anything changed
    pub fn remove_draft(&mut self, index: usize) -> bool {
        match &mut self.state {
            ExtractionState::ReviewReady { drafts, .. } if index < drafts.len() => {
                drafts.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Edits one draft's title
    pub fn set_draft_title(&mut self, index: usize, title: impl Into<String>) -> bool {
        self.edit_draft(index, |draft| draft.title = title.into())
    }

    /// Edits one draft's description
    pub fn set_draft_description(&mut self, index: usize, description: impl Into<String>) -> bool {
        self.edit_draft(index, |draft| draft.description = description.into())
    }

    /// Edits one draft's deadline (`None` clears it)
    pub fn set_draft_deadline(&mut self, index: usize, deadline: Option<NaiveDate>) -> bool {
        self.edit_draft(index, |draft| draft.deadline = deadline)
    }

    /// Edits one draft's priority
    pub fn set_draft_priority(&mut self, index: usize, priority: Priority) -> bool {
        self.edit_draft(index, |draft| draft.priority = priority)
    }

    /// Edits one draft's initial status
    pub fn set_draft_status(&mut self, index: usize, status: Status) -> bool {
        self.edit_draft(index, |draft| draft.status = status)
    }

    /// Edits one draft's assignee (`None` unassigns)
    pub fn set_draft_assignee(&mut self, index: usize, member_id: Option<i64>) -> bool {
        self.edit_draft(index, |draft| draft.assign = member_id)
    }

    fn edit_draft(&mut self, index: usize, apply: impl FnOnce(&mut DraftTask)) -> bool {
        match &mut self.state {
            ExtractionState::ReviewReady { drafts, .. } if index < drafts.len() => {
                apply(&mut drafts[index]);
                true
            }
            _ => false,
        }
    }

    /// Persists the reviewed batch
    ///
    /// Only legal from `ReviewReady`. On success the flow ends at
    /// `Saved` with the board route; on failure the review state comes
    /// back untouched, carrying the error.
    pub async fn save(&mut self) -> ClientResult<Route> {
        let drafts = match std::mem::replace(&mut self.state, ExtractionState::Saving) {
            ExtractionState::ReviewReady { drafts, .. } => drafts,
            other => {
                self.state = other;
                return Err(ClientError::Busy);
            }
        };

        match self.store.save_extracted(self.group_id, &drafts).await {
            Ok(()) => {
                let board = Route::Group(self.group_id);
                self.state = ExtractionState::Saved { board };
                Ok(board)
            }
            Err(err) => {
                self.state = ExtractionState::ReviewReady {
                    drafts,
                    error: Some(err.clone()),
                };
                Err(err)
            }
        }
    }
}
