use std::collections::BTreeMap;
use std::rc::Rc;

use ratatui::text::Text;

use crate::checked_status::CheckedStatus;
use crate::error::{Error, Result};
use crate::linked_tree::Node;
use crate::selection::{cascade_remove, cascade_select, SelectedItems, Selection};

/// Notified with the items to select or to unselect.
pub type SelectionCallback<'a> = Rc<dyn Fn(Selection) + 'a>;
/// Creates the label shown for a node.
pub type LabelHook<'a> = Rc<dyn for<'n> Fn(Node<'n>) -> Text<'n> + 'a>;
/// Decides something about a node, like whether it is expanded.
pub type NodePredicate<'a> = Rc<dyn for<'n> Fn(Node<'n>) -> bool + 'a>;

/// Selection related props shared between [`TreeProps`](crate::TreeProps), [`TreeItemProps`](crate::TreeItemProps) and [`TreeControlProps`](crate::TreeControlProps).
///
/// The selection is controlled: it is never changed here.
/// Interactions only notify `on_select` / `on_remove` and the owner of the selection decides what to do with it.
///
/// The selection is shared with every [`TreeItemProps`](crate::TreeItemProps) created from the same props.
#[derive(Clone, Default)]
pub struct SelectionProps<'a> {
    selected: Option<Rc<SelectedItems>>,
    multiple: bool,
    on_select: Option<SelectionCallback<'a>>,
    on_remove: Option<SelectionCallback<'a>>,
}

impl<'a> SelectionProps<'a> {
    #[must_use]
    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_deref().map(SelectedItems::selection)
    }

    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        self.multiple
    }

    #[must_use]
    pub fn is_selected(&self, node: Node<'_>) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|selected| selected.contains(&node.data().value))
    }

    #[must_use]
    pub fn checked_status(&self, node: Node<'_>) -> CheckedStatus {
        if self.multiple {
            self.selected.as_ref().map_or(CheckedStatus::Unchecked, |selected| {
                CheckedStatus::from_lookup(node, |value| selected.contains(value))
            })
        } else if self.is_selected(node) {
            CheckedStatus::Checked
        } else {
            CheckedStatus::Unchecked
        }
    }

    /// Notify `on_select` about selecting `node`.
    ///
    /// Returns `false` when there is no `on_select` to notify.
    pub fn select(&self, node: Node<'_>) -> bool {
        let Some(on_select) = &self.on_select else {
            return false;
        };
        on_select(cascade_select(node, self.multiple));
        true
    }

    /// Notify `on_remove` about unselecting `node`.
    ///
    /// Returns `false` when there is no `on_remove` to notify.
    pub fn remove(&self, node: Node<'_>) -> bool {
        let Some(on_remove) = &self.on_remove else {
            return false;
        };
        on_remove(cascade_remove(node, self.selected(), self.multiple));
        true
    }

    /// Unselect a checked `node`, select it otherwise.
    ///
    /// An [`Indeterminate`](CheckedStatus::Indeterminate) node gets selected.
    /// Returns `false` when there is no callback to notify.
    pub fn toggle(&self, node: Node<'_>) -> bool {
        match self.checked_status(node) {
            CheckedStatus::Checked => self.remove(node),
            CheckedStatus::Unchecked | CheckedStatus::Indeterminate => self.select(node),
        }
    }

    /// Store `selected` as the variant matching [`is_multiple`](Self::is_multiple), see [`Selection::normalize`].
    pub(crate) fn set_selected(&mut self, selected: Option<Selection>) {
        self.selected = selected
            .and_then(|selected| selected.normalize(self.multiple))
            .map(|selected| Rc::new(SelectedItems::new(selected)));
    }

    pub(crate) fn set_multiple(&mut self, multiple: bool) {
        self.multiple = multiple;
        let selected = self.selected.take().map(|selected| {
            Rc::try_unwrap(selected).map_or_else(
                |shared| shared.selection().clone(),
                SelectedItems::into_selection,
            )
        });
        self.set_selected(selected);
    }

    pub(crate) fn set_on_select<F>(&mut self, on_select: F)
    where
        F: Fn(Selection) + 'a,
    {
        self.on_select = Some(Rc::new(on_select));
    }

    pub(crate) fn set_on_remove<F>(&mut self, on_remove: F)
    where
        F: Fn(Selection) + 'a,
    {
        self.on_remove = Some(Rc::new(on_remove));
    }
}

impl std::fmt::Debug for SelectionProps<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionProps")
            .field("selected", &self.selected())
            .field("multiple", &self.multiple)
            .field("on_select", &self.on_select.is_some())
            .field("on_remove", &self.on_remove.is_some())
            .finish()
    }
}

/// Customization hooks for each rendered node.
#[derive(Clone, Default)]
pub struct ItemHooks<'a> {
    pub(crate) label: Option<LabelHook<'a>>,
    pub(crate) expanded: Option<NodePredicate<'a>>,
    pub(crate) highlighted: Option<NodePredicate<'a>>,
}

impl ItemHooks<'_> {
    /// The label of `node`. Without a hook this is the label of its [`Item`](crate::Item).
    #[must_use]
    pub fn label<'n>(&self, node: Node<'n>) -> Text<'n> {
        self.label.as_ref().map_or_else(
            || Text::from(node.data().label.as_str()),
            |label| label(node),
        )
    }

    /// Nodes are expanded unless a hook says otherwise.
    #[must_use]
    pub fn expanded(&self, node: Node<'_>) -> bool {
        self.expanded.as_ref().map_or(true, |expanded| expanded(node))
    }

    #[must_use]
    pub fn highlighted(&self, node: Node<'_>) -> bool {
        self.highlighted
            .as_ref()
            .is_some_and(|highlighted| highlighted(node))
    }
}

impl std::fmt::Debug for ItemHooks<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemHooks")
            .field("label", &self.label.is_some())
            .field("expanded", &self.expanded.is_some())
            .field("highlighted", &self.highlighted.is_some())
            .finish()
    }
}

/// Further attributes of the rendered element which are passed through unchanged.
///
/// Everything except the selection handling is allowed, see [`Attributes::RESERVED`].
///
/// # Example
///
/// ```
/// # use tui_tree_control::Attributes;
/// let mut attributes = Attributes::default();
/// attributes.insert("aria-label", "Categories")?;
/// assert_eq!(attributes.get("aria-label"), Some("Categories"));
/// assert!(attributes.insert("onSelect", "ignored").is_err());
/// # Ok::<(), tui_tree_control::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    /// Attribute name replaced by `on_select`. Compared case insensitive.
    pub const RESERVED: &'static str = "onselect";

    /// Set an attribute and return its previous value.
    ///
    /// # Errors
    ///
    /// Errors when the `name` is [reserved](Self::RESERVED).
    pub fn insert<N, V>(&mut self, name: N, value: V) -> Result<Option<String>>
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        if name.eq_ignore_ascii_case(Self::RESERVED) {
            return Err(Error::ReservedAttribute(name));
        }
        Ok(self.0.insert(name, value.into()))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{Item, LinkedTree};

    #[test]
    fn without_callbacks_nothing_is_notified() {
        let tree = LinkedTree::example();
        let props = SelectionProps::default();
        let node = tree.find("b").unwrap();
        assert!(!props.select(node));
        assert!(!props.remove(node));
        assert!(!props.toggle(node));
    }

    #[test]
    fn toggle_selects_indeterminate() {
        let tree = LinkedTree::example();
        let notified = RefCell::new(Vec::new());
        let mut props = SelectionProps::default();
        props.set_multiple(true);
        props.set_selected(Some(Selection::Multiple(vec![
            Item::new("c", "Charlie").with_parent("b"),
        ])));
        props.set_on_select(|selection| notified.borrow_mut().push(("select", selection)));
        props.set_on_remove(|selection| notified.borrow_mut().push(("remove", selection)));

        assert!(props.toggle(tree.find("b").unwrap()));
        assert!(props.toggle(tree.find("c").unwrap()));
        drop(props);

        let notified = notified.into_inner();
        assert_eq!(notified.len(), 2);
        assert_eq!(notified[0].0, "select");
        assert_eq!(notified[0].1.len(), 6);
        assert_eq!(notified[1].0, "remove");
        assert_eq!(notified[1].1.items()[0].value, "c");
    }

    #[test]
    fn selected_follows_multiple() {
        let item = Item::new("a", "Alfa");
        let mut props = SelectionProps::default();
        props.set_selected(Some(Selection::Single(item.clone())));
        assert_eq!(props.selected(), Some(&Selection::Single(item.clone())));

        props.set_multiple(true);
        assert_eq!(
            props.selected(),
            Some(&Selection::Multiple(vec![item.clone()]))
        );

        let shared = props.clone();
        props.set_multiple(false);
        assert_eq!(props.selected(), Some(&Selection::Single(item.clone())));
        assert_eq!(shared.selected(), Some(&Selection::Multiple(vec![item])));

        props.set_selected(Some(Selection::Multiple(Vec::new())));
        assert_eq!(props.selected(), None);
    }

    #[test]
    fn default_hooks() {
        let tree = LinkedTree::example();
        let hooks = ItemHooks::default();
        let node = tree.find("d").unwrap();
        assert_eq!(hooks.label(node), Text::from("Delta"));
        assert!(hooks.expanded(node));
        assert!(!hooks.highlighted(node));
    }

    #[test]
    #[should_panic = "ReservedAttribute"]
    fn reserved_attribute_errors() {
        let mut attributes = Attributes::default();
        attributes.insert("ONSELECT", "nope").unwrap();
    }

    #[test]
    fn attributes_pass_through() {
        let mut attributes = Attributes::default();
        assert_eq!(attributes.insert("id", "first").unwrap(), None);
        assert_eq!(
            attributes.insert("id", "second").unwrap().as_deref(),
            Some("first")
        );
        attributes.insert("data-kind", "category").unwrap();
        let all = attributes.iter().collect::<Vec<_>>();
        assert_eq!(all, [("data-kind", "category"), ("id", "second")]);
    }
}
