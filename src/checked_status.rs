use crate::linked_tree::Node;
use crate::selection::Selection;

/// Selection state of a node when multiple items can be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "json",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CheckedStatus {
    Checked,
    Unchecked,
    /// Some but not all descendants of the node are selected.
    Indeterminate,
}

impl CheckedStatus {
    /// Status of `node` under the `selected` items.
    ///
    /// A node without children is checked when it is selected.
    /// A node with children follows them: checked when all of its descendants are selected, indeterminate when only some are.
    /// With none of its descendants selected it is checked only when it is selected itself.
    ///
    /// # Example
    ///
    /// ```
    /// # use tui_tree_control::{CheckedStatus, Item, LinkedTree, Selection};
    /// let tree = LinkedTree::from_items(vec![
    ///     Item::new("root", "Root"),
    ///     Item::new("one", "One").with_parent("root"),
    ///     Item::new("two", "Two").with_parent("root"),
    /// ])?;
    /// let selected = Selection::Multiple(vec![Item::new("one", "One").with_parent("root")]);
    ///
    /// let root = tree.find("root").unwrap();
    /// assert_eq!(CheckedStatus::of(root, Some(&selected)), CheckedStatus::Indeterminate);
    /// # Ok::<(), tui_tree_control::Error>(())
    /// ```
    #[must_use]
    pub fn of(node: Node<'_>, selected: Option<&Selection>) -> Self {
        let Some(selected) = selected else {
            return Self::Unchecked;
        };
        let values = selected.values();
        Self::from_lookup(node, |value| values.contains(value))
    }

    pub(crate) fn from_lookup<F>(node: Node<'_>, is_selected: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let own = if is_selected(node.data().value.as_str()) {
            Self::Checked
        } else {
            Self::Unchecked
        };

        let mut any_selected = false;
        let mut any_unselected = false;
        for descendant in node.descendants() {
            if is_selected(descendant.data().value.as_str()) {
                any_selected = true;
            } else {
                any_unselected = true;
            }
            if any_selected && any_unselected {
                return Self::Indeterminate;
            }
        }

        if any_selected {
            Self::Checked
        } else {
            own
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Checked => "checked",
            Self::Unchecked => "unchecked",
            Self::Indeterminate => "indeterminate",
        }
    }
}

impl std::fmt::Display for CheckedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
