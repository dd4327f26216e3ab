use std::rc::Rc;

use ratatui::text::Text;

use crate::error::Result;
use crate::linked_tree::Node;
use crate::props::{Attributes, ItemHooks, SelectionProps};
use crate::selection::Selection;
use crate::tree_item_props::TreeItemProps;

/// Props of one level of a tree: the nodes on this level and how to present and select them.
///
/// The children of each node are described by the [`TreeProps`] returned from [`TreeItemProps::children_props`].
///
/// # Example
///
/// ```
/// # use std::cell::RefCell;
/// # use tui_tree_control::{Item, LinkedTree, Selection, TreeProps};
/// let tree = LinkedTree::from_items(vec![
///     Item::new("A", "A"),
///     Item::new("B", "B").with_parent("A"),
///     Item::new("C", "C").with_parent("B"),
/// ])?;
///
/// let selected = RefCell::new(Vec::new());
/// let props = TreeProps::new(tree.roots())
///     .multiple(true)
///     .on_select(|selection| selected.borrow_mut().extend(selection.into_items()));
///
/// props.select(tree.find("C").unwrap());
/// # drop(props);
/// let values = selected.into_inner().into_iter().map(|item| item.value).collect::<Vec<_>>();
/// assert_eq!(values, ["A", "B", "C"]);
/// # Ok::<(), tui_tree_control::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TreeProps<'a> {
    pub(crate) selection: SelectionProps<'a>,
    pub(crate) items: Vec<Node<'a>>,
    pub(crate) level: Option<usize>,
    pub(crate) hooks: ItemHooks<'a>,
    pub(crate) attributes: Attributes,
}

impl<'a> TreeProps<'a> {
    #[must_use]
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Node<'a>>,
    {
        Self {
            selection: SelectionProps::default(),
            items: items.into_iter().collect(),
            level: None,
            hooks: ItemHooks::default(),
            attributes: Attributes::default(),
        }
    }

    /// The currently selected item(s).
    ///
    /// Kept as the variant matching [`multiple`](Self::multiple) regardless of the order these are set, see [`Selection::normalize`].
    #[must_use]
    pub fn selected(mut self, selected: Selection) -> Self {
        self.selection.set_selected(Some(selected));
        self
    }

    /// Select multiple items with cascading to ancestors and descendants.
    #[must_use]
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.selection.set_multiple(multiple);
        self
    }

    /// Called with the items to select.
    ///
    /// When `multiple` is true and a child is selected all its ancestors and its descendants are selected too.
    /// Otherwise only the node itself.
    #[must_use]
    pub fn on_select<F>(mut self, on_select: F) -> Self
    where
        F: Fn(Selection) + 'a,
    {
        self.selection.set_on_select(on_select);
        self
    }

    /// Called with the items to unselect.
    ///
    /// When `multiple` is true and a child is unselected its descendants are unselected too.
    /// Its ancestors are unselected as long as nothing else below them remains selected.
    /// Otherwise only the node itself.
    #[must_use]
    pub fn on_remove<F>(mut self, on_remove: F) -> Self
    where
        F: Fn(Selection) + 'a,
    {
        self.selection.set_on_remove(on_remove);
        self
    }

    #[must_use]
    pub const fn level(mut self, level: usize) -> Self {
        self.level = Some(level);
        self
    }

    /// Show something else than the label of the [`Item`](crate::Item).
    #[must_use]
    pub fn get_item_label<F>(mut self, get_item_label: F) -> Self
    where
        F: for<'n> Fn(Node<'n>) -> Text<'n> + 'a,
    {
        self.hooks.label = Some(Rc::new(get_item_label));
        self
    }

    /// Control from outside whether the children of a node are shown.
    ///
    /// All nodes are expanded without it.
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
    pub fn items(&self) -> &[Node<'a>] {
        &self.items
    }

    /// Depth of this level. Top level is 0.
    #[must_use]
    pub fn get_level(&self) -> usize {
        self.level.unwrap_or_default()
    }

    #[must_use]
    pub fn get_selected(&self) -> Option<&Selection> {
        self.selection.selected()
    }

    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        self.selection.is_multiple()
    }

    #[must_use]
    pub const fn get_attributes(&self) -> &Attributes {
        &self.attributes
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionProps<'a> {
        &self.selection
    }

    #[must_use]
    pub const fn hooks(&self) -> &ItemHooks<'a> {
        &self.hooks
    }

    /// Props for each node on this level.
    #[must_use]
    pub fn item_props(&self) -> Vec<TreeItemProps<'a>> {
        let level = self.get_level();
        self.items
            .iter()
            .enumerate()
            .map(|(index, &item)| TreeItemProps {
                selection: self.selection.clone(),
                level,
                item,
                index,
                hooks: self.hooks.clone(),
                attributes: Attributes::default(),
            })
            .collect()
    }

    /// See [`SelectionProps::select`].
    pub fn select(&self, node: Node<'_>) -> bool {
        self.selection.select(node)
    }

    /// See [`SelectionProps::remove`].
    pub fn remove(&self, node: Node<'_>) -> bool {
        self.selection.remove(node)
    }

    /// See [`SelectionProps::toggle`].
    pub fn toggle(&self, node: Node<'_>) -> bool {
        self.selection.toggle(node)
    }
}
