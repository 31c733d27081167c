//! Row location and pane alignment over the rendered diff tree.
//!
//! Pure queries over the renderer-owned tree: nothing here mutates rendered
//! content except placeholder synthesis, which builds a detached row for the
//! caller to insert. Missing trees, missing file subtrees and missing rows
//! all degrade to "not found" results.

use crate::anchor::{CommentAnchor, DiffSide};
use crate::render::{
    ANNOTATED_ATTR, CONTENT_LINE_NUMBER_ATTR, DIFF_BODY_CLASS, FILE_PATH_ATTR, FILES_DIFF_CLASS,
    LINE_NUMBER_ATTR, NEW_LINE_NUMBER_CLASS, OLD_LINE_NUMBER_CLASS, PLACEHOLDER_LINE_ATTR,
    ROW_TAG, SIDE_PANE_CLASS, ViewStyle,
};
use crate::tree::{NodeId, RenderTree};

/// Where an anchor lands in the rendered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLocation {
    /// The located row, absent when the line was never rendered.
    pub row: Option<NodeId>,
    /// 1-based ordinal among sibling rows in the row's pane. `1` when no row
    /// was found.
    pub position: usize,
    /// True when the row already carries a mounted thread widget.
    pub annotated: bool,
    /// Row at the same position in the opposite pane. Side-by-side mode
    /// only; absent when the position exceeds that pane's rows.
    pub opposite_row: Option<NodeId>,
}

impl RowLocation {
    const NOT_FOUND: Self = Self {
        row: None,
        position: 1,
        annotated: false,
        opposite_row: None,
    };
}

/// Find the rendered row for `anchor` under the given view style.
///
/// The search scopes to the file wrapper matching the anchor's path, falling
/// back to the whole tree when that wrapper is absent, then narrows to the
/// pane body the anchor's side selects. The content annotation marker is the
/// canonical row match; line-by-line rendering additionally falls back to the
/// combined line-number pair, picking the column by side. That fallback has
/// no meaning for side-by-side rendering, where the content match is
/// authoritative.
#[must_use]
pub fn locate_comment_row(
    tree: &RenderTree,
    anchor: &CommentAnchor,
    view_style: ViewStyle,
) -> RowLocation {
    let scope = if anchor.file_path.is_empty() {
        tree.root()
    } else {
        tree.find_descendant(tree.root(), |t, n| {
            t.attr(n, FILE_PATH_ATTR) == Some(anchor.file_path.as_str())
        })
        .unwrap_or(tree.root())
    };

    let body = match view_style {
        ViewStyle::SideBySide => tree
            .find_descendant(scope, |t, n| {
                t.has_class(n, SIDE_PANE_CLASS) && t.has_class(n, anchor.side.pane_class())
            })
            .and_then(|pane| tree.find_descendant(pane, |t, n| t.has_class(n, DIFF_BODY_CLASS))),
        ViewStyle::LineByLine => {
            tree.find_descendant(scope, |t, n| t.has_class(n, DIFF_BODY_CLASS))
        }
    };
    let Some(body) = body else {
        tracing::trace!(
            "No diff body for {} line {}",
            anchor.file_path,
            anchor.line_number
        );
        return RowLocation::NOT_FOUND;
    };

    let line = anchor.line_number.to_string();
    let candidate = tree
        .find_descendant(body, |t, n| {
            t.attr(n, CONTENT_LINE_NUMBER_ATTR) == Some(line.as_str())
        })
        .or_else(|| match view_style {
            ViewStyle::LineByLine => {
                let column_class = if anchor.side.is_left() {
                    OLD_LINE_NUMBER_CLASS
                } else {
                    NEW_LINE_NUMBER_CLASS
                };
                tree.find_descendant(body, |t, n| {
                    t.has_class(n, column_class) && t.attr(n, LINE_NUMBER_ATTR) == Some(line.as_str())
                })
            }
            ViewStyle::SideBySide => None,
        });
    let Some(row) = candidate.and_then(|n| tree.closest(n, |t, m| t.tag(m) == ROW_TAG)) else {
        return RowLocation::NOT_FOUND;
    };

    let position = tree.preceding_siblings(row) + 1;
    let annotated = tree.attr(row, ANNOTATED_ATTR).is_some();
    let opposite_row = match view_style {
        ViewStyle::SideBySide => opposite_pane_row(tree, row, anchor.side, position),
        ViewStyle::LineByLine => None,
    };

    RowLocation {
        row: Some(row),
        position,
        annotated,
        opposite_row,
    }
}

// Alignment is positional, not line-number based: the renderer pads both
// panes to equal row counts, so the Nth row on one side faces the Nth row on
// the other.
fn opposite_pane_row(
    tree: &RenderTree,
    row: NodeId,
    side: DiffSide,
    position: usize,
) -> Option<NodeId> {
    let files_diff = tree.closest(row, |t, n| t.has_class(n, FILES_DIFF_CLASS))?;
    let pane = tree.find_descendant(files_diff, |t, n| {
        t.tag(n) == "div" && t.has_class(n, side.opposite().pane_class())
    })?;
    let body = tree.find_descendant(pane, |t, n| t.has_class(n, DIFF_BODY_CLASS))?;
    tree.nth_child(body, position)
        .filter(|&n| tree.tag(n) == ROW_TAG)
}

/// Build a detached placeholder row standing in for `line_number` on the
/// opposite pane: an empty line-number cell plus an empty content cell, the
/// visual shape of a real empty diff row.
///
/// The row is not inserted, and no existing-placeholder check is performed —
/// callers look first via [`placeholder_for_line`] and insert through the
/// tree's insertion surface.
pub fn create_opposite_placeholder(tree: &mut RenderTree, line_number: i64) -> NodeId {
    let row = tree.create_element(ROW_TAG);
    tree.set_attr(row, PLACEHOLDER_LINE_ATTR, &line_number.to_string());

    let number_cell = tree.create_element("td");
    tree.set_attr(number_cell, "height", "0px");
    for class in [
        "d2h-code-side-linenumber",
        "d2h-code-side-emptyplaceholder",
        "d2h-cntx",
        "d2h-emptyplaceholder",
    ] {
        tree.add_class(number_cell, class);
    }
    tree.append_child(row, number_cell);

    let content_cell = tree.create_element("td");
    tree.set_attr(content_cell, "height", "0px");
    tree.add_class(content_cell, "d2h-cntx");
    tree.add_class(content_cell, "d2h-emptyplaceholder");
    tree.append_child(row, content_cell);

    let content = tree.create_element("div");
    tree.add_class(content, "d2h-code-side-line");
    tree.add_class(content, "d2h-code-side-emptyplaceholder");
    tree.append_child(content_cell, content);

    let prefix = tree.create_element("span");
    tree.add_class(prefix, "d2h-code-line-prefix");
    tree.set_text(prefix, "\u{a0}");
    tree.append_child(content, prefix);

    let code = tree.create_element("span");
    tree.add_class(code, "d2h-code-line-ctn");
    tree.add_class(code, "hljs");
    tree.append_child(content, code);

    row
}

/// Existing placeholder row for `line_number` within `scope`, if any.
#[must_use]
pub fn placeholder_for_line(tree: &RenderTree, scope: NodeId, line_number: i64) -> Option<NodeId> {
    let line = line_number.to_string();
    tree.find_descendant(scope, |t, n| {
        t.attr(n, PLACEHOLDER_LINE_ATTR) == Some(line.as_str())
    })
}

/// True once the renderer has emitted at least one content-bearing row.
///
/// Callers poll this before anchoring comments, since anchors located against
/// a not-yet-rendered tree would all come back "not found".
#[must_use]
pub fn has_rendered_content(tree: &RenderTree) -> bool {
    tree.find_descendant(tree.root(), |t, n| {
        t.attr(n, CONTENT_LINE_NUMBER_ATTR).is_some()
    })
    .is_some()
}
