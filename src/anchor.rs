//! Per-file diff comment anchors.
//!
//! An anchor keys an ordered comment thread to one (file, side, line)
//! position. Anchors are derived data: rebuilt from the activity list every
//! time it changes, never mutated in place. Callers tear down any mounted
//! widgets before recomputing.

use crate::activity::{ActivityPayload, ReviewActivity};
use crate::comment::{CommentItem, MountHandle, to_comment_item};
use crate::render::{LEFT_PANE_CLASS, RIGHT_PANE_CLASS};

/// Which pane of the diff a comment is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffSide {
    /// Old/base content.
    Left,
    /// New content.
    Right,
}

impl DiffSide {
    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::Left)
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Pane class marker for this side in the rendered tree.
    #[must_use]
    pub const fn pane_class(self) -> &'static str {
        match self {
            Self::Left => LEFT_PANE_CLASS,
            Self::Right => RIGHT_PANE_CLASS,
        }
    }
}

/// A comment thread pinned to one (file, side, line) position in the diff.
#[derive(Debug)]
pub struct CommentAnchor {
    pub file_path: String,
    pub side: DiffSide,
    /// Old-side line number when `side` is left, new-side otherwise. `0` when
    /// the position block carries no line.
    pub line_number: i64,
    /// Root comment first, replies after in their original order. Never
    /// empty.
    pub comments: Vec<CommentItem>,
    /// Widget lifecycle slots, populated by the mounting caller.
    pub mount: MountHandle,
}

/// Build the anchors for one file from the full activity list.
///
/// Activities whose code-comment path equals `file_path` each become one
/// anchor, in input order. Replies (any activity whose `parent_id` matches
/// the root's id) are appended after the root's own projection, preserving
/// their relative order. Activities without a code-comment position never
/// match and are silently excluded. Two anchors may share a (side, line)
/// position; stacking them is the caller's decision.
#[must_use]
pub fn build_anchors(file_path: &str, activities: &[ReviewActivity]) -> Vec<CommentAnchor> {
    let anchors: Vec<CommentAnchor> = activities
        .iter()
        .filter(|activity| {
            activity
                .code_comment
                .as_ref()
                .and_then(|code_comment| code_comment.path.as_deref())
                == Some(file_path)
        })
        .map(|activity| {
            let mut comments = vec![to_comment_item(activity)];
            comments.extend(
                activities
                    .iter()
                    .filter(|reply| activity.id.is_some() && reply.parent_id == activity.id)
                    .map(to_comment_item),
            );

            let side = if activity
                .payload
                .as_ref()
                .is_some_and(ActivityPayload::starts_on_new_side)
            {
                DiffSide::Right
            } else {
                DiffSide::Left
            };
            let line_number = activity
                .code_comment
                .as_ref()
                .and_then(|code_comment| match side {
                    DiffSide::Right => code_comment.line_new,
                    DiffSide::Left => code_comment.line_old,
                })
                .unwrap_or(0);

            CommentAnchor {
                file_path: file_path.to_string(),
                side,
                line_number,
                comments,
                mount: MountHandle::default(),
            }
        })
        .collect();

    tracing::debug!(
        "Built {} comment anchors for {}",
        anchors.len(),
        file_path
    );
    anchors
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::activity::CodeComment;

    fn code_comment_activity(id: i64, path: &str, line_new: Option<i64>) -> ReviewActivity {
        ReviewActivity {
            id: Some(id),
            text: Some(format!("comment {id}")),
            code_comment: Some(CodeComment {
                path: Some(path.to_string()),
                line_new,
                line_old: Some(3),
                ..CodeComment::default()
            }),
            payload: line_new.map(|line| {
                serde_json::from_value(serde_json::json!({
                    "type": "code-comment",
                    "line_start_new": line,
                }))
                .unwrap()
            }),
            ..ReviewActivity::default()
        }
    }

    fn reply_activity(id: i64, parent_id: i64) -> ReviewActivity {
        ReviewActivity {
            id: Some(id),
            parent_id: Some(parent_id),
            text: Some(format!("reply {id}")),
            ..ReviewActivity::default()
        }
    }

    #[test]
    fn one_anchor_per_matching_activity() {
        let activities = vec![
            code_comment_activity(1, "a.go", Some(5)),
            reply_activity(2, 1),
            code_comment_activity(3, "b.go", Some(9)),
        ];

        let anchors = build_anchors("a.go", &activities);

        assert_eq!(anchors.len(), 1);
        let anchor = &anchors[0];
        assert_eq!(anchor.file_path, "a.go");
        assert_eq!(anchor.side, DiffSide::Right);
        assert_eq!(anchor.line_number, 5);
        let ids: Vec<i64> = anchor.comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn replies_keep_their_relative_order() {
        let activities = vec![
            code_comment_activity(1, "a.go", Some(5)),
            reply_activity(20, 1),
            reply_activity(10, 1),
        ];

        let anchors = build_anchors("a.go", &activities);

        let ids: Vec<i64> = anchors[0].comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 20, 10]);
    }

    #[test]
    fn replies_do_not_get_their_own_anchor() {
        let activities = vec![
            code_comment_activity(1, "a.go", Some(5)),
            reply_activity(2, 1),
        ];

        let anchors = build_anchors("a.go", &activities);
        assert_eq!(anchors.len(), 1);
    }

    #[test]
    fn reply_with_matching_path_also_anchors() {
        // A reply that independently matches the file filter produces its own
        // anchor in addition to appearing in its parent's thread.
        let mut reply = code_comment_activity(2, "a.go", None);
        reply.parent_id = Some(1);
        let activities = vec![code_comment_activity(1, "a.go", Some(5)), reply];

        let anchors = build_anchors("a.go", &activities);

        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].comments.len(), 2);
        assert_eq!(anchors[1].comments[0].id, 2);
    }

    #[test]
    fn zero_start_line_resolves_to_right() {
        let activities = vec![code_comment_activity(1, "a.go", Some(0))];

        let anchors = build_anchors("a.go", &activities);

        assert_eq!(anchors[0].side, DiffSide::Right);
        assert_eq!(anchors[0].line_number, 0);
    }

    #[test]
    fn absent_start_marker_resolves_to_left_with_old_line() {
        let activities = vec![code_comment_activity(1, "a.go", None)];

        let anchors = build_anchors("a.go", &activities);

        assert_eq!(anchors[0].side, DiffSide::Left);
        assert_eq!(anchors[0].line_number, 3);
    }

    #[test]
    fn false_start_marker_resolves_to_left() {
        let mut activity = code_comment_activity(1, "a.go", Some(5));
        activity.payload = Some(
            serde_json::from_value(serde_json::json!({
                "type": "code-comment",
                "line_start_new": false,
            }))
            .unwrap(),
        );

        let anchors = build_anchors("a.go", &[activity]);
        assert_eq!(anchors[0].side, DiffSide::Left);
    }

    #[test]
    fn missing_line_number_defaults_to_zero() {
        let mut activity = code_comment_activity(1, "a.go", Some(5));
        activity.code_comment.as_mut().unwrap().line_new = None;

        let anchors = build_anchors("a.go", &[activity]);

        assert_eq!(anchors[0].side, DiffSide::Right);
        assert_eq!(anchors[0].line_number, 0);
    }

    #[test]
    fn activities_without_position_are_excluded() {
        let activities = vec![
            ReviewActivity {
                id: Some(1),
                text: Some("top-level comment".to_string()),
                ..ReviewActivity::default()
            },
            code_comment_activity(2, "a.go", Some(8)),
        ];

        let anchors = build_anchors("a.go", &activities);

        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].comments[0].id, 2);
    }

    #[test]
    fn duplicate_positions_are_not_deduplicated() {
        let activities = vec![
            code_comment_activity(1, "a.go", Some(5)),
            code_comment_activity(2, "a.go", Some(5)),
        ];

        let anchors = build_anchors("a.go", &activities);
        assert_eq!(anchors.len(), 2);
    }

    #[test]
    fn idless_root_collects_no_replies() {
        let mut root = code_comment_activity(1, "a.go", Some(5));
        root.id = None;
        let orphan = ReviewActivity {
            id: Some(2),
            ..ReviewActivity::default()
        };

        let anchors = build_anchors("a.go", &[root, orphan]);

        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].comments.len(), 1);
    }
}
