//! Normalized comment items and mount lifecycle slots.

use std::fmt;
use std::sync::mpsc::Sender;

use serde::Serialize;

use crate::activity::ReviewActivity;

/// Callback that unmounts a comment widget.
pub type Teardown = Box<dyn FnOnce()>;

/// Caller-owned lifecycle slots for a mounted comment widget.
///
/// Both slots start unset and are populated by whichever caller mounts the
/// widget onto a located row; this crate only carries them and never invokes
/// them. Callers must run `teardown` before anchors are recomputed.
#[derive(Default)]
pub struct MountHandle {
    pub teardown: Option<Teardown>,
    /// Notification channel for pushing refreshed comment lists into the
    /// mounted widget.
    pub updates: Option<Sender<Vec<CommentItem>>>,
}

impl MountHandle {
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.teardown.is_some()
    }
}

impl fmt::Debug for MountHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountHandle")
            .field("teardown", &self.teardown.is_some())
            .field("updates", &self.updates.is_some())
            .finish()
    }
}

/// One normalized comment in a thread.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommentItem {
    pub id: i64,
    pub author: Option<String>,
    pub created: Option<i64>,
    pub edited: Option<i64>,
    pub updated: Option<i64>,
    pub deleted: Option<i64>,
    /// True when the commented position no longer matches current content.
    pub outdated: bool,
    pub content: Option<String>,
    /// Original record, retained for downstream consumers.
    pub payload: ReviewActivity,
}

/// Project a raw activity into its normalized comment form.
///
/// Total over any record shape: missing fields degrade to `None`/zero. The
/// content falls back from the plain text field to the payload's message.
#[must_use]
pub fn to_comment_item(activity: &ReviewActivity) -> CommentItem {
    CommentItem {
        id: activity.id.unwrap_or(0),
        author: activity
            .author
            .as_ref()
            .and_then(|author| author.display_name.clone()),
        created: activity.created,
        edited: activity.edited,
        updated: activity.updated,
        deleted: activity.deleted,
        outdated: activity
            .code_comment
            .as_ref()
            .is_some_and(|code_comment| code_comment.outdated),
        content: activity
            .text
            .as_ref()
            .filter(|text| !text.is_empty())
            .cloned()
            .or_else(|| {
                activity
                    .payload
                    .as_ref()
                    .and_then(|payload| payload.message().map(ToOwned::to_owned))
            }),
        payload: activity.clone(),
    }
}
