#![forbid(unsafe_code)]

//! Navigation trees and the UX map renderer.
//!
//! The two trees mirror the prototype's screen hierarchy. A [`UxMap`] is a
//! pure snapshot of one tree against the controller's current step label:
//! the step is normalized, then exactly the row whose `key` equals the
//! normalized step is marked active. Labels may repeat across a tree
//! (the wallet tree has two "My Cards" nodes); keys may not.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::OnceLock;

/// A node in a navigation tree.
///
/// Immutable once built. `label` is what the map displays; `key` is what
/// step matching uses, and must be unique within its tree.
#[derive(Debug, Clone)]
pub struct NavNode {
    label: String,
    key: String,
    children: Vec<NavNode>,
}

impl NavNode {
    /// Node whose key equals its label, the common case.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let key = label.clone();
        Self {
            label,
            key,
            children: Vec::new(),
        }
    }

    /// Node with a key distinct from its display label.
    #[must_use]
    pub fn with_key(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            children: Vec::new(),
        }
    }

    /// Add a child node.
    #[must_use]
    pub fn child(mut self, node: NavNode) -> Self {
        self.children.push(node);
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn children(&self) -> &[NavNode] {
        &self.children
    }

    /// Total node count, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NavNode::node_count).sum::<usize>()
    }

    fn collect_keys<'a>(&'a self, out: &mut HashSet<&'a str>) -> bool {
        let mut unique = out.insert(self.key.as_str());
        for child in &self.children {
            unique &= child.collect_keys(out);
        }
        unique
    }

    /// Whether every key in this tree is unique.
    #[must_use]
    pub fn keys_unique(&self) -> bool {
        self.collect_keys(&mut HashSet::new())
    }
}

/// One flattened row of a [`UxMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UxRow {
    pub depth: usize,
    pub label: String,
    pub key: String,
    /// True for at most one row per snapshot.
    pub active: bool,
    /// Guide prefix for text rendering ("├── ", "└── ", nested bars).
    guides: String,
}

impl UxRow {
    #[must_use]
    pub fn guides(&self) -> &str {
        &self.guides
    }
}

/// Flattened, marked snapshot of a navigation tree.
#[derive(Debug, Clone)]
pub struct UxMap {
    current_step: String,
    rows: Vec<UxRow>,
}

const GUIDE_BRANCH: &str = "\u{251C}\u{2500}\u{2500} ";
const GUIDE_LAST: &str = "\u{2514}\u{2500}\u{2500} ";
const GUIDE_VERTICAL: &str = "\u{2502}   ";
const GUIDE_SPACE: &str = "    ";

impl UxMap {
    /// Snapshot `tree` against an already-normalized step key.
    ///
    /// Pure: the tree is only read. Exactly the rows whose key equals
    /// `step` are marked, which is at most one row when the tree upholds
    /// its key-uniqueness invariant.
    #[must_use]
    pub fn snapshot(tree: &NavNode, step: &str) -> Self {
        debug_assert!(tree.keys_unique(), "navigation tree has duplicate keys");
        let mut rows = Vec::with_capacity(tree.node_count());
        flatten(tree, step, 0, "", "", &mut rows);
        Self {
            current_step: step.to_owned(),
            rows,
        }
    }

    /// The normalized step this snapshot was taken against.
    #[must_use]
    pub fn current_step(&self) -> &str {
        &self.current_step
    }

    #[must_use]
    pub fn rows(&self) -> &[UxRow] {
        &self.rows
    }

    /// Key of the marked row, if the step matched any node.
    #[must_use]
    pub fn active_key(&self) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.active)
            .map(|r| r.key.as_str())
    }

    /// Render the map with Unicode tree guides and `●`/`○` state markers.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let marker = if row.active { '\u{25CF}' } else { '\u{25CB}' };
            let _ = writeln!(out, "{}{} {}", row.guides, marker, row.label);
        }
        out
    }
}

fn flatten(
    node: &NavNode,
    step: &str,
    depth: usize,
    guide: &str,
    child_prefix: &str,
    rows: &mut Vec<UxRow>,
) {
    rows.push(UxRow {
        depth,
        label: node.label.clone(),
        key: node.key.clone(),
        active: node.key == step,
        guides: guide.to_owned(),
    });
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        let branch = if last { GUIDE_LAST } else { GUIDE_BRANCH };
        let cont = if last { GUIDE_SPACE } else { GUIDE_VERTICAL };
        flatten(
            child,
            step,
            depth + 1,
            &format!("{child_prefix}{branch}"),
            &format!("{child_prefix}{cont}"),
            rows,
        );
    }
}

/// The wallet prototype's screen hierarchy.
#[must_use]
pub fn wallet_tree() -> &'static NavNode {
    static TREE: OnceLock<NavNode> = OnceLock::new();
    TREE.get_or_init(|| {
        NavNode::new("Loading").child(
            NavNode::new("Auth")
                .child(NavNode::new("My Cards"))
                .child(
                    NavNode::with_key("My Cards", "My Cards Root")
                        .child(NavNode::new("OTC Card"))
                        .child(NavNode::new("Uber Card"))
                        .child(NavNode::new("Discover Card"))
                        .child(NavNode::new("Walmart Card")),
                )
                .child(NavNode::new("My Actions").child(NavNode::new("Action Detail")))
                .child(NavNode::new("My Program"))
                .child(NavNode::new("Help"))
                .child(
                    NavNode::new("Scanner")
                        .child(NavNode::new("Launch Scanner"))
                        .child(NavNode::new("Report Missing Product")),
                ),
        )
    })
}

/// The eligibility flow's screen hierarchy.
#[must_use]
pub fn eligibility_tree() -> &'static NavNode {
    static TREE: OnceLock<NavNode> = OnceLock::new();
    TREE.get_or_init(|| {
        NavNode::new("Welcome").child(
            NavNode::new("Actions")
                .child(
                    NavNode::new("Immunizations")
                        .child(NavNode::new("Confirm Eligibility"))
                        .child(NavNode::new("Immunization Details"))
                        .child(NavNode::new("Review & Submit")),
                )
                .child(NavNode::new("Annual Physical"))
                .child(NavNode::new("Dental Cleaning"))
                .child(NavNode::new("Vision Exam")),
        )
    })
}

/// Collapse step variants onto wallet tree keys.
///
/// Action detail steps arrive as `"Action Detail: <key>"` and all map to
/// the single "Action Detail" node.
#[must_use]
pub fn normalize_wallet_step(step: &str) -> &str {
    if step.starts_with("Action Detail") {
        "Action Detail"
    } else {
        step
    }
}

/// Collapse step variants onto eligibility tree keys.
///
/// Wizard steps arrive as `"Immunizations: <step>"`; the prefix is dropped
/// so they match the wizard's child nodes.
#[must_use]
pub fn normalize_eligibility_step(step: &str) -> &str {
    step.strip_prefix("Immunizations: ").unwrap_or(step)
}

/// Wallet UX map for the given raw step label.
#[must_use]
pub fn wallet_map(step: &str) -> UxMap {
    UxMap::snapshot(wallet_tree(), normalize_wallet_step(step))
}

/// Eligibility UX map for the given raw step label.
#[must_use]
pub fn eligibility_map(step: &str) -> UxMap {
    UxMap::snapshot(eligibility_tree(), normalize_eligibility_step(step))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_labels(map: &UxMap) -> Vec<&str> {
        map.rows()
            .iter()
            .filter(|r| r.active)
            .map(|r| r.key.as_str())
            .collect()
    }

    #[test]
    fn both_trees_have_unique_keys() {
        assert!(wallet_tree().keys_unique());
        assert!(eligibility_tree().keys_unique());
    }

    #[test]
    fn wallet_tree_shape() {
        let tree = wallet_tree();
        assert_eq!(tree.key(), "Loading");
        assert_eq!(tree.node_count(), 15);
        let auth = &tree.children()[0];
        assert_eq!(auth.key(), "Auth");
        assert_eq!(auth.children().len(), 6);
    }

    #[test]
    fn marks_exactly_one_row_on_match() {
        let map = wallet_map("OTC Card");
        assert_eq!(active_labels(&map), ["OTC Card"]);
        assert_eq!(map.active_key(), Some("OTC Card"));
    }

    #[test]
    fn unknown_step_marks_nothing() {
        let map = wallet_map("Settings");
        assert!(active_labels(&map).is_empty());
        assert_eq!(map.active_key(), None);
    }

    #[test]
    fn duplicate_label_disambiguated_by_key() {
        let map = wallet_map("My Cards");
        let marked: Vec<_> = map.rows().iter().filter(|r| r.active).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].key, "My Cards");

        let map = wallet_map("My Cards Root");
        let marked: Vec<_> = map.rows().iter().filter(|r| r.active).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].key, "My Cards Root");
        assert_eq!(marked[0].label, "My Cards");
    }

    #[test]
    fn action_detail_steps_collapse() {
        let map = wallet_map("Action Detail: immunizations");
        assert_eq!(map.active_key(), Some("Action Detail"));
        assert_eq!(map.current_step(), "Action Detail");
    }

    #[test]
    fn immunizations_prefix_is_stripped() {
        let map = eligibility_map("Immunizations: Review & Submit");
        assert_eq!(map.active_key(), Some("Review & Submit"));

        let map = eligibility_map("Immunizations");
        assert_eq!(map.active_key(), Some("Immunizations"));
    }

    #[test]
    fn snapshot_depths_follow_structure() {
        let map = wallet_map("Help");
        assert_eq!(map.rows()[0].depth, 0);
        let help = map.rows().iter().find(|r| r.key == "Help").unwrap();
        assert_eq!(help.depth, 2);
        let otc = map.rows().iter().find(|r| r.key == "OTC Card").unwrap();
        assert_eq!(otc.depth, 3);
    }

    #[test]
    fn snapshot_does_not_mutate_tree() {
        let before = wallet_tree().node_count();
        let _ = wallet_map("Scanner");
        let _ = wallet_map("Help");
        assert_eq!(wallet_tree().node_count(), before);
    }

    #[test]
    fn text_rendering_uses_guides_and_markers() {
        let text = wallet_map("Help").to_text();
        assert!(text.contains('\u{251C}'));
        assert!(text.contains('\u{2514}'));
        assert!(text.contains("\u{25CF} Help"));
        assert_eq!(text.matches('\u{25CF}').count(), 1);
        assert_eq!(
            text.matches('\u{25CB}').count(),
            wallet_tree().node_count() - 1
        );
    }
}
