/// One flat, selectable entry of a tree.
///
/// A collection of `Item`s describes a tree through the `parent` of each item which references the `value` of another item.
/// Items without a `parent` are on the top level.
/// Use [`LinkedTree::from_items`](crate::LinkedTree::from_items) to resolve these references.
///
/// # Example
///
/// ```
/// # use tui_tree_control::Item;
/// let root = Item::new("1", "Root");
/// let child = Item::new("2", "Child").with_parent("1");
/// assert_eq!(child.parent.as_deref(), Some("1"));
/// # let _ = root;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    #[cfg_attr(
        feature = "json",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub parent: Option<String>,

    /// Unique within a collection of items.
    pub value: String,

    pub label: String,
}

impl Item {
    /// Create a new top level `Item`.
    #[must_use]
    pub fn new<V, L>(value: V, label: L) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        Self {
            parent: None,
            value: value.into(),
            label: label.into(),
        }
    }

    #[must_use]
    pub fn with_parent<P: Into<String>>(mut self, parent: P) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
