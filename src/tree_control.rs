use std::rc::Rc;

use ratatui::text::Text;

use crate::error::Result;
use crate::item::Item;
use crate::linked_tree::{LinkedTree, Node};
use crate::props::{Attributes, ItemHooks, SelectionProps};
use crate::selection::Selection;
use crate::tree_props::TreeProps;

/// Entry point props: like [`TreeProps`] but with a flat list of [`Item`]s and always starting at the top level.
///
/// # Example
///
/// ```
/// # use tui_tree_control::{Item, TreeControlProps};
/// let control = TreeControlProps::new(vec![
///     Item::new("1", "Root"),
///     Item::new("2", "Child").with_parent("1"),
/// ])
/// .multiple(true)
/// .build()?;
///
/// let props = control.tree_props();
/// assert_eq!(props.get_level(), 0);
/// assert_eq!(props.items().len(), 1);
/// # Ok::<(), tui_tree_control::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TreeControlProps<'a> {
    selection: SelectionProps<'a>,
    items: Vec<Item>,
    hooks: ItemHooks<'a>,
    attributes: Attributes,
}

impl<'a> TreeControlProps<'a> {
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            selection: SelectionProps::default(),
            items,
            hooks: ItemHooks::default(),
            attributes: Attributes::default(),
        }
    }

    /// See [`TreeProps::selected`].
    #[must_use]
    pub fn selected(mut self, selected: Selection) -> Self {
        self.selection.set_selected(Some(selected));
        self
    }

    #[must_use]
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.selection.set_multiple(multiple);
        self
    }

    /// See [`TreeProps::on_select`].
    #[must_use]
    pub fn on_select<F>(mut self, on_select: F) -> Self
    where
        F: Fn(Selection) + 'a,
    {
        self.selection.set_on_select(on_select);
        self
    }

    /// See [`TreeProps::on_remove`].
    #[must_use]
    pub fn on_remove<F>(mut self, on_remove: F) -> Self
    where
        F: Fn(Selection) + 'a,
    {
        self.selection.set_on_remove(on_remove);
        self
    }

    #[must_use]
    pub fn get_item_label<F>(mut self, get_item_label: F) -> Self
    where
        F: for<'n> Fn(Node<'n>) -> Text<'n> + 'a,
    {
        self.hooks.label = Some(Rc::new(get_item_label));
        self
    }

    #[must_use]
    pub fn is_item_expanded<F>(mut self, is_item_expanded: F) -> Self
    where
        F: for<'n> Fn(Node<'n>) -> bool + 'a,
    {
        self.hooks.expanded = Some(Rc::new(is_item_expanded));
        self
    }

    #[must_use]
    pub fn is_item_highlighted<F>(mut self, is_item_highlighted: F) -> Self
    where
        F: for<'n> Fn(Node<'n>) -> bool + 'a,
    {
        self.hooks.highlighted = Some(Rc::new(is_item_highlighted));
        self
    }

    /// Pass an attribute through.
    ///
    /// # Errors
    ///
    /// Errors when the name is [reserved](Attributes::RESERVED).
    pub fn attribute<N, V>(mut self, name: N, value: V) -> Result<Self>
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.attributes.insert(name, value)?;
        Ok(self)
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Link the items into a tree.
    ///
    /// # Errors
    ///
    /// Errors when the items do not form a tree, see [`LinkedTree::from_items`].
    pub fn build(self) -> Result<TreeControl<'a>> {
        TreeControl::new(self)
    }
}

/// A [`LinkedTree`] built from [`TreeControlProps`] together with the rest of the props.
#[derive(Debug, Clone)]
pub struct TreeControl<'a> {
    tree: LinkedTree,
    selection: SelectionProps<'a>,
    hooks: ItemHooks<'a>,
    attributes: Attributes,
}

impl<'a> TreeControl<'a> {
    /// Link the items into a tree.
    ///
    /// # Errors
    ///
    /// Errors when the items do not form a tree, see [`LinkedTree::from_items`].
    pub fn new(props: TreeControlProps<'a>) -> Result<Self> {
        let TreeControlProps {
            selection,
            items,
            hooks,
            attributes,
        } = props;
        Ok(Self {
            tree: LinkedTree::from_items(items)?,
            selection,
            hooks,
            attributes,
        })
    }

    #[must_use]
    pub const fn tree(&self) -> &LinkedTree {
        &self.tree
    }

    /// Replace the current selection, for example after a callback was notified.
    ///
    /// Kept as the variant matching `multiple`, see [`Selection::normalize`].
    pub fn set_selected(&mut self, selected: Option<Selection>) {
        self.selection.set_selected(selected);
    }

    #[must_use]
    pub fn get_selected(&self) -> Option<&Selection> {
        self.selection.selected()
    }

    /// [`TreeProps`] of the top level.
    #[must_use]
    pub fn tree_props(&self) -> TreeProps<'_> {
        TreeProps {
            selection: self.selection.clone(),
            items: self.tree.roots().collect(),
            level: None,
            hooks: self.hooks.clone(),
            attributes: self.attributes.clone(),
        }
    }
}
