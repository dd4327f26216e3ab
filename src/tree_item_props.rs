use std::rc::Rc;

use ratatui::text::Text;

use crate::checked_status::CheckedStatus;
use crate::error::Result;
use crate::linked_tree::Node;
use crate::props::{Attributes, ItemHooks, SelectionProps};
use crate::selection::Selection;
use crate::tree_props::TreeProps;

/// Props of a single node inside a tree.
///
/// Usually created by [`TreeProps::item_props`] which passes down the selection and the hooks.
#[derive(Debug, Clone)]
pub struct TreeItemProps<'a> {
    pub(crate) selection: SelectionProps<'a>,
    pub(crate) level: usize,
    pub(crate) item: Node<'a>,
    pub(crate) index: usize,
    pub(crate) hooks: ItemHooks<'a>,
    pub(crate) attributes: Attributes,
}

impl<'a> TreeItemProps<'a> {
    #[must_use]
    pub fn new(item: Node<'a>, level: usize, index: usize) -> Self {
        Self {
            selection: SelectionProps::default(),
            level,
            item,
            index,
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
    pub fn get_label<F>(mut self, get_label: F) -> Self
    where
        F: for<'n> Fn(Node<'n>) -> Text<'n> + 'a,
    {
        self.hooks.label = Some(Rc::new(get_label));
        self
    }

    #[must_use]
    pub fn is_expanded<F>(mut self, is_expanded: F) -> Self
    where
        F: for<'n> Fn(Node<'n>) -> bool + 'a,
    {
        self.hooks.expanded = Some(Rc::new(is_expanded));
        self
    }

    #[must_use]
    pub fn is_highlighted<F>(mut self, is_highlighted: F) -> Self
    where
        F: for<'n> Fn(Node<'n>) -> bool + 'a,
    {
        self.hooks.highlighted = Some(Rc::new(is_highlighted));
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
    pub const fn item(&self) -> Node<'a> {
        self.item
    }

    #[must_use]
    pub const fn get_level(&self) -> usize {
        self.level
    }

    /// Position among its siblings.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
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
    pub fn label(&self) -> Text<'a> {
        self.hooks.label(self.item)
    }

    #[must_use]
    pub fn expanded(&self) -> bool {
        self.hooks.expanded(self.item)
    }

    #[must_use]
    pub fn highlighted(&self) -> bool {
        self.hooks.highlighted(self.item)
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selection.is_selected(self.item)
    }

    #[must_use]
    pub fn checked_status(&self) -> CheckedStatus {
        self.selection.checked_status(self.item)
    }

    /// Notify about selecting this node. See [`SelectionProps::select`].
    pub fn select(&self) -> bool {
        self.selection.select(self.item)
    }

    /// Notify about unselecting this node. See [`SelectionProps::remove`].
    pub fn remove(&self) -> bool {
        self.selection.remove(self.item)
    }

    /// See [`SelectionProps::toggle`].
    pub fn toggle(&self) -> bool {
        self.selection.toggle(self.item)
    }

    /// Props for the children one level deeper.
    ///
    /// `None` when there are no children or the node is collapsed.
    #[must_use]
    pub fn children_props(&self) -> Option<TreeProps<'a>> {
        if !self.item.has_children() || !self.expanded() {
            return None;
        }
        Some(TreeProps {
            selection: self.selection.clone(),
            items: self.item.children().collect(),
            level: Some(self.level + 1),
            hooks: self.hooks.clone(),
            attributes: Attributes::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{Item, LinkedTree};

    #[test]
    fn children_props_go_one_level_deeper() {
        let tree = LinkedTree::example();
        let props = TreeItemProps::new(tree.find("b").unwrap(), 0, 1);
        let children = props.children_props().unwrap();
        assert_eq!(children.get_level(), 1);
        let values = children
            .items()
            .iter()
            .map(|node| node.data().value.as_str())
            .collect::<Vec<_>>();
        assert_eq!(values, ["c", "d", "g"]);
    }

    #[test]
    fn leaf_has_no_children_props() {
        let tree = LinkedTree::example();
        let props = TreeItemProps::new(tree.find("a").unwrap(), 0, 0);
        assert!(props.children_props().is_none());
    }

    #[test]
    fn collapsed_has_no_children_props() {
        let tree = LinkedTree::example();
        let props =
            TreeItemProps::new(tree.find("b").unwrap(), 0, 1).is_expanded(|node| node.data().value != "b");
        assert!(!props.expanded());
        assert!(props.children_props().is_none());
    }

    #[test]
    fn hooks_are_passed_to_children() {
        let tree = LinkedTree::example();
        let props = TreeItemProps::new(tree.find("b").unwrap(), 0, 1)
            .get_label(|node| Text::from(node.data().label.to_uppercase()))
            .is_highlighted(|node| node.data().value == "d");
        assert_eq!(props.label(), Text::from("BRAVO"));
        assert!(!props.highlighted());

        let children = props.children_props().unwrap().item_props();
        assert_eq!(children[1].label(), Text::from("DELTA"));
        assert!(children[1].highlighted());
        assert_eq!(children[1].index(), 1);
    }

    #[test]
    fn checked_status_in_single_mode() {
        let tree = LinkedTree::example();
        let selected = Selection::Single(Item::new("d", "Delta").with_parent("b"));
        let props = TreeItemProps::new(tree.find("b").unwrap(), 0, 1).selected(selected.clone());
        assert!(!props.is_selected());
        assert_eq!(props.checked_status(), CheckedStatus::Unchecked);

        let props = TreeItemProps::new(tree.find("d").unwrap(), 1, 1).selected(selected);
        assert!(props.is_selected());
        assert_eq!(props.checked_status(), CheckedStatus::Checked);
    }

    #[test]
    fn toggle_in_single_mode() {
        let tree = LinkedTree::example();
        let events = RefCell::new(Vec::new());
        let node = tree.find("g").unwrap();
        let props = TreeItemProps::new(node, 1, 2)
            .on_select(|selection| events.borrow_mut().push(("select", selection)))
            .on_remove(|selection| events.borrow_mut().push(("remove", selection)));
        assert!(props.toggle());
        let props = props.selected(Selection::Single(node.data().clone()));
        assert!(props.toggle());
        drop(props);

        let expected = Selection::Single(node.data().clone());
        assert_eq!(
            events.into_inner(),
            [("select", expected.clone()), ("remove", expected)]
        );
    }
}
