use std::collections::HashSet;

use crate::item::Item;
use crate::linked_tree::Node;

/// The selected [`Item`]s of a tree, or the payload of a selection change.
///
/// Which variant is used depends on whether the tree allows `multiple` selected items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Single(Item),
    Multiple(Vec<Item>),
}

impl Selection {
    #[must_use]
    pub fn items(&self) -> &[Item] {
        match self {
            Self::Single(item) => std::slice::from_ref(item),
            Self::Multiple(items) => items,
        }
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        match self {
            Self::Single(item) => vec![item],
            Self::Multiple(items) => items,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.items().iter().any(|item| item.value == value)
    }

    /// Apply an `on_select` payload to this selection.
    ///
    /// A single selection is replaced.
    /// Multiple selections get the new items appended while already selected items keep their position.
    pub fn apply_select(&mut self, added: Self) {
        match (self, added) {
            (Self::Multiple(items), added) => {
                for item in added.into_items() {
                    if !items.iter().any(|existing| existing.value == item.value) {
                        items.push(item);
                    }
                }
            }
            (current, added) => *current = added,
        }
    }

    /// Apply an `on_remove` payload to this selection.
    ///
    /// Returns `false` when nothing remains selected.
    /// A single selection only remains when a different item was removed.
    #[must_use]
    pub fn apply_remove(&mut self, removed: &Self) -> bool {
        match self {
            Self::Single(item) => !removed.contains(&item.value),
            Self::Multiple(items) => {
                items.retain(|item| !removed.contains(&item.value));
                !items.is_empty()
            }
        }
    }

    /// The variant a tree with or without `multiple` selected items works with.
    ///
    /// With `multiple` a single item becomes [`Selection::Multiple`].
    /// Without it a [`Selection::Multiple`] of one item becomes [`Selection::Single`] and an empty one `None`.
    /// Several items stay [`Selection::Multiple`] and are all shown as selected.
    #[must_use]
    pub fn normalize(self, multiple: bool) -> Option<Self> {
        match (self, multiple) {
            (Self::Single(item), true) => Some(Self::Multiple(vec![item])),
            (Self::Multiple(mut items), false) if items.len() <= 1 => items.pop().map(Self::Single),
            (selection, _) => Some(selection),
        }
    }

    pub(crate) fn values(&self) -> HashSet<&str> {
        self.items().iter().map(|item| item.value.as_str()).collect()
    }
}

/// A [`Selection`] together with its values for constant time lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectedItems {
    selection: Selection,
    values: HashSet<String>,
}

impl SelectedItems {
    pub(crate) fn new(selection: Selection) -> Self {
        let values = selection
            .items()
            .iter()
            .map(|item| item.value.clone())
            .collect();
        Self { selection, values }
    }

    pub(crate) const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub(crate) fn into_selection(self) -> Selection {
        self.selection
    }

    pub(crate) fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }
}

/// Items to report when `node` gets selected.
///
/// With `multiple` these are the ancestors of the node (top level first), the node itself and its descendants in pre-order.
/// Otherwise only the node.
#[must_use]
pub fn cascade_select(node: Node<'_>, multiple: bool) -> Selection {
    if !multiple {
        return Selection::Single(node.data().clone());
    }

    let mut ancestors = node.ancestors().collect::<Vec<_>>();
    ancestors.reverse();
    let items = ancestors
        .into_iter()
        .chain(std::iter::once(node))
        .chain(node.descendants())
        .map(|node| node.data().clone())
        .collect::<Vec<_>>();
    log::trace!(
        "selecting {} cascades to {} items",
        node.data().value,
        items.len()
    );
    Selection::Multiple(items)
}

/// Items to report when `node` gets unselected.
///
/// With `multiple` these are the node itself and its descendants followed by each ancestor (closest first) as long as that ancestor has no other selected item below it.
/// Otherwise only the node.
#[must_use]
pub fn cascade_remove(node: Node<'_>, selected: Option<&Selection>, multiple: bool) -> Selection {
    if !multiple {
        return Selection::Single(node.data().clone());
    }

    let mut removed = std::iter::once(node)
        .chain(node.descendants())
        .collect::<Vec<_>>();

    let mut remaining = selected.map(Selection::values).unwrap_or_default();
    for gone in &removed {
        remaining.remove(gone.data().value.as_str());
    }

    // Everything below `below` is already known to be unselected, only its siblings need a look
    let mut below = node;
    for ancestor in node.ancestors() {
        let keeps_selection = ancestor
            .children()
            .filter(|&child| child != below)
            .flat_map(|child| std::iter::once(child).chain(child.descendants()))
            .any(|descendant| remaining.contains(descendant.data().value.as_str()));
        if keeps_selection {
            break;
        }
        remaining.remove(ancestor.data().value.as_str());
        removed.push(ancestor);
        below = ancestor;
    }

    log::trace!(
        "unselecting {} cascades to {} items",
        node.data().value,
        removed.len()
    );
    Selection::Multiple(removed.into_iter().map(|node| node.data().clone()).collect())
}
