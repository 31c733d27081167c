//! Rendered element tree handle.
//!
//! The external diff renderer owns the element tree it emits; this crate only
//! needs a narrow query/insert surface over it. [`RenderTree`] is the
//! structural stand-in for that output: a flat arena of elements addressed by
//! [`NodeId`], each carrying a tag, classes and attributes. The locator reads
//! through the query surface, and the only mutation surface is node creation
//! plus child insertion, used by callers to place synthesized placeholder
//! rows.

use std::collections::BTreeMap;

/// Handle to one element in a [`RenderTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct ElementData {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Element tree emitted by the external diff renderer.
///
/// The root is a plain container element; file wrappers, pane tables and rows
/// hang off it in whatever shape the renderer's templates produce.
#[derive(Debug, Clone)]
pub struct RenderTree {
    nodes: Vec<ElementData>,
}

impl Default for RenderTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTree {
    /// Create a tree holding only the root container element.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![ElementData {
                tag: "div".to_string(),
                ..ElementData::default()
            }],
        }
    }

    /// The root container element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached element with the given tag.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ElementData {
            tag: tag.to_string(),
            ..ElementData::default()
        });
        id
    }

    /// Attach `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Insert `node` among `reference`'s siblings, immediately before it.
    ///
    /// No effect when `reference` is detached or the root.
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) {
        let Some(parent) = self.nodes[reference.0].parent else {
            return;
        };
        self.detach(node);
        let idx = self.child_index(parent, reference);
        self.nodes[parent.0].children.insert(idx, node);
        self.nodes[node.0].parent = Some(parent);
    }

    /// Insert `node` among `reference`'s siblings, immediately after it.
    ///
    /// No effect when `reference` is detached or the root.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) {
        let Some(parent) = self.nodes[reference.0].parent else {
            return;
        };
        self.detach(node);
        let idx = self.child_index(parent, reference) + 1;
        self.nodes[parent.0].children.insert(idx, node);
        self.nodes[node.0].parent = Some(parent);
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        self.nodes[id.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0].attrs.get(name).map(String::as_str)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let classes = &mut self.nodes[id.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes[id.0].classes.iter().any(|c| c == class)
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.nodes[id.0].text = text.to_string();
    }

    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    #[must_use]
    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Number of siblings preceding `id` under its parent.
    ///
    /// Detached nodes (and the root) have no preceding siblings.
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> usize {
        self.nodes[id.0]
            .parent
            .map_or(0, |parent| self.child_index(parent, id))
    }

    /// The 1-based `position`th child of `parent`, if it exists.
    #[must_use]
    pub fn nth_child(&self, parent: NodeId, position: usize) -> Option<NodeId> {
        position
            .checked_sub(1)
            .and_then(|idx| self.nodes[parent.0].children.get(idx))
            .copied()
    }

    /// First descendant of `scope` (in document order, excluding `scope`
    /// itself) for which `pred` holds.
    pub fn find_descendant<P>(&self, scope: NodeId, pred: P) -> Option<NodeId>
    where
        P: Fn(&Self, NodeId) -> bool,
    {
        let mut stack: Vec<NodeId> = self.nodes[scope.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if pred(self, id) {
                return Some(id);
            }
            stack.extend(self.nodes[id.0].children.iter().rev());
        }
        None
    }

    /// Nearest ancestor of `id` (including `id` itself) for which `pred`
    /// holds.
    pub fn closest<P>(&self, id: NodeId, pred: P) -> Option<NodeId>
    where
        P: Fn(&Self, NodeId) -> bool,
    {
        let mut current = Some(id);
        while let Some(node) = current {
            if pred(self, node) {
                return Some(node);
            }
            current = self.nodes[node.0].parent;
        }
        None
    }

    fn child_index(&self, parent: NodeId, child: NodeId) -> usize {
        self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == child)
            .unwrap_or(0)
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_descendant_is_document_order() {
        let mut tree = RenderTree::new();
        let a = tree.create_element("div");
        let b = tree.create_element("span");
        let c = tree.create_element("span");
        tree.append_child(tree.root(), a);
        tree.append_child(a, b);
        tree.append_child(tree.root(), c);

        // b is nested under the first child, so it comes before c.
        let found = tree.find_descendant(tree.root(), |t, n| t.tag(n) == "span");
        assert_eq!(found, Some(b));
    }

    #[test]
    fn find_descendant_excludes_scope() {
        let mut tree = RenderTree::new();
        let a = tree.create_element("div");
        tree.append_child(tree.root(), a);
        tree.set_attr(a, "data", "x");

        assert_eq!(tree.find_descendant(a, |t, n| t.attr(n, "data").is_some()), None);
    }

    #[test]
    fn closest_includes_self() {
        let mut tree = RenderTree::new();
        let row = tree.create_element("tr");
        let cell = tree.create_element("td");
        tree.append_child(tree.root(), row);
        tree.append_child(row, cell);

        assert_eq!(tree.closest(row, |t, n| t.tag(n) == "tr"), Some(row));
        assert_eq!(tree.closest(cell, |t, n| t.tag(n) == "tr"), Some(row));
        assert_eq!(tree.closest(cell, |t, n| t.tag(n) == "table"), None);
    }

    #[test]
    fn preceding_siblings_and_nth_child() {
        let mut tree = RenderTree::new();
        let body = tree.create_element("tbody");
        tree.append_child(tree.root(), body);
        let rows: Vec<NodeId> = (0..3)
            .map(|_| {
                let row = tree.create_element("tr");
                tree.append_child(body, row);
                row
            })
            .collect();

        assert_eq!(tree.preceding_siblings(rows[0]), 0);
        assert_eq!(tree.preceding_siblings(rows[2]), 2);
        assert_eq!(tree.nth_child(body, 1), Some(rows[0]));
        assert_eq!(tree.nth_child(body, 3), Some(rows[2]));
        assert_eq!(tree.nth_child(body, 4), None);
        assert_eq!(tree.nth_child(body, 0), None);
    }

    #[test]
    fn insert_before_and_after_reorder_siblings() {
        let mut tree = RenderTree::new();
        let body = tree.create_element("tbody");
        tree.append_child(tree.root(), body);
        let first = tree.create_element("tr");
        let last = tree.create_element("tr");
        tree.append_child(body, first);
        tree.append_child(body, last);

        let before = tree.create_element("tr");
        tree.insert_before(first, before);
        let after = tree.create_element("tr");
        tree.insert_after(first, after);

        assert_eq!(tree.children(body), &[before, first, after, last]);
        assert_eq!(tree.preceding_siblings(first), 1);
    }

    #[test]
    fn insert_before_detached_reference_is_noop() {
        let mut tree = RenderTree::new();
        let detached = tree.create_element("tr");
        let node = tree.create_element("tr");
        tree.insert_before(detached, node);

        assert_eq!(tree.parent(node), None);
    }

    #[test]
    fn append_child_moves_between_parents() {
        let mut tree = RenderTree::new();
        let a = tree.create_element("div");
        let b = tree.create_element("div");
        let child = tree.create_element("span");
        tree.append_child(tree.root(), a);
        tree.append_child(tree.root(), b);
        tree.append_child(a, child);
        tree.append_child(b, child);

        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), &[child]);
        assert_eq!(tree.parent(child), Some(b));
    }

    #[test]
    fn add_class_is_idempotent() {
        let mut tree = RenderTree::new();
        let node = tree.create_element("td");
        tree.add_class(node, "d2h-cntx");
        tree.add_class(node, "d2h-cntx");

        assert!(tree.has_class(node, "d2h-cntx"));
        assert!(!tree.has_class(node, "d2h-del"));
    }
}
