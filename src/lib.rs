//! diff-anchor - comment-thread anchoring and row alignment for rendered diffs
//!
//! The diff itself is computed and rendered by an external diff2html-style
//! collaborator driven by the declarative bundle in [`render`]. This crate
//! maps review-comment activities onto the rendered output: [`anchor`] derives
//! per-file (side, line, thread) anchors from raw activities, [`locate`] finds
//! each anchor's row in the rendered tree and resolves its vertically-aligned
//! counterpart in the opposite pane, synthesizing placeholder rows where the
//! renderer emitted none. Mounting the actual comment widgets is the
//! embedder's job; this crate only says where.

pub mod activity;
pub mod anchor;
pub mod comment;
pub mod locate;
pub mod render;
pub mod tree;

pub use activity::{
    ActivityAuthor, ActivityPayload, CodeComment, ReviewActivity, activities_from_json,
};
pub use anchor::{CommentAnchor, DiffSide, build_anchors};
pub use comment::{CommentItem, MountHandle, Teardown, to_comment_item};
pub use locate::{
    RowLocation, create_opposite_placeholder, has_rendered_content, locate_comment_row,
    placeholder_for_line,
};
pub use render::{DIFF_VIEWER_HEADER_HEIGHT, RenderConfig, RowTemplates, ViewStyle};
pub use tree::{NodeId, RenderTree};
