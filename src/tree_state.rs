use crate::flatten::flatten;
use crate::tree_item_props::TreeItemProps;
use crate::tree_props::TreeProps;

/// Keeps the view state of a [`Tree`](crate::Tree): the scroll position and the focused node.
///
/// Which items are selected or expanded is not part of this state.
/// That is controlled from the outside through the [`TreeProps`].
///
/// # Example
///
/// ```
/// # use tui_tree_control::TreeState;
/// let mut state = TreeState::default();
/// state.focus(Some("shirts".to_owned()));
/// assert_eq!(state.focused(), Some("shirts"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct TreeState {
    pub(super) offset: usize,
    pub(super) focused: Option<String>,
    pub(super) ensure_focused_in_view_on_next_render: bool,
}

impl TreeState {
    #[must_use]
    pub const fn get_offset(&self) -> usize {
        self.offset
    }

    /// Value of the focused [`Item`](crate::Item).
    #[must_use]
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Get a flat list of all visible (= below expanded) nodes.
    #[must_use]
    pub fn flatten<'a>(&self, props: &TreeProps<'a>) -> Vec<TreeItemProps<'a>> {
        flatten(props)
    }

    /// Focus the node with the given value.
    ///
    /// Returns `true` when the focus changed.
    pub fn focus(&mut self, value: Option<String>) -> bool {
        self.ensure_focused_in_view_on_next_render = true;
        let changed = self.focused != value;
        self.focused = value;
        changed
    }

    /// Focus the first node.
    ///
    /// Returns `true` when the focus changed.
    pub fn focus_first(&mut self, props: &TreeProps) -> bool {
        let value = props
            .items()
            .first()
            .map(|node| node.data().value.clone());
        self.focus(value)
    }

    /// Focus the last visible node.
    ///
    /// Returns `true` when the focus changed.
    pub fn focus_last(&mut self, props: &TreeProps) -> bool {
        let value = self
            .flatten(props)
            .last()
            .map(|item| item.item().data().value.clone());
        self.focus(value)
    }

    /// Focus the node visible on the given index.
    ///
    /// Returns `true` when the focus changed.
    ///
    /// This can be useful for mouse clicks.
    pub fn focus_visible_index(&mut self, props: &TreeProps, new_index: usize) -> bool {
        let visible = self.flatten(props);
        let new_index = new_index.min(visible.len().saturating_sub(1));
        let value = visible
            .get(new_index)
            .map(|item| item.item().data().value.clone());
        self.focus(value)
    }

    /// Move the focus with the direction/amount by the given function.
    ///
    /// Returns `true` when the focus changed.
    ///
    /// # Example
    ///
    /// ```
    /// # use tui_tree_control::{LinkedTree, TreeProps, TreeState};
    /// # let tree = LinkedTree::default();
    /// # let props = TreeProps::new(tree.roots());
    /// # let mut state = TreeState::default();
    /// // Move the focus one down
    /// state.focus_visible_relative(&props, |current| {
    ///     current.map_or(0, |current| current.saturating_add(1))
    /// });
    /// ```
    pub fn focus_visible_relative<F>(&mut self, props: &TreeProps, change_function: F) -> bool
    where
        F: FnOnce(Option<usize>) -> usize,
    {
        let visible = self.flatten(props);
        let current_index = self.focused_index(&visible);
        let new_index = change_function(current_index).min(visible.len().saturating_sub(1));
        let value = visible
            .get(new_index)
            .map(|item| item.item().data().value.clone());
        self.focus(value)
    }

    /// Select or unselect the focused node, see [`SelectionProps::toggle`](crate::SelectionProps::toggle).
    ///
    /// Returns `false` when the focused node is not visible or nothing was notified.
    pub fn toggle_focused(&mut self, props: &TreeProps) -> bool {
        self.ensure_focused_in_view_on_next_render = true;
        let visible = self.flatten(props);
        self.focused_index(&visible)
            .is_some_and(|index| visible[index].toggle())
    }

    /// Ensure the focused node is visible on next render
    pub fn scroll_focused_into_view(&mut self) {
        self.ensure_focused_in_view_on_next_render = true;
    }

    /// Scroll the specified amount of lines up
    ///
    /// Returns `true` when the scroll position changed.
    /// Returns `false` when the scrolling has reached the top.
    pub fn scroll_up(&mut self, lines: usize) -> bool {
        let before = self.offset;
        self.offset = self.offset.saturating_sub(lines);
        before != self.offset
    }

    /// Scroll the specified amount of lines down
    ///
    /// In contrast to [`scroll_up()`](Self::scroll_up) this can not return whether the view position changed or not as the actual change is determined on render.
    /// Always returns `true`.
    pub fn scroll_down(&mut self, lines: usize) -> bool {
        self.offset = self.offset.saturating_add(lines);
        true
    }

    pub(super) fn focused_index(&self, visible: &[TreeItemProps]) -> Option<usize> {
        let focused = self.focused.as_deref()?;
        visible
            .iter()
            .position(|item| item.item().data().value == focused)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{LinkedTree, Selection};

    #[test]
    fn focus_moves_through_visible() {
        let tree = LinkedTree::example();
        let props = TreeProps::new(tree.roots()).is_item_expanded(|node| node.data().value != "d");
        let mut state = TreeState::default();

        assert!(state.focus_first(&props));
        assert_eq!(state.focused(), Some("a"));
        assert!(state.focus_last(&props));
        assert_eq!(state.focused(), Some("h"));
        assert!(state.focus_visible_index(&props, 3));
        assert_eq!(state.focused(), Some("d"));
        assert!(state.focus_visible_relative(&props, |current| {
            current.map_or(0, |current| current.saturating_add(1))
        }));
        assert_eq!(state.focused(), Some("g"));
        assert!(!state.focus_visible_index(&props, 4));
        assert!(state.focus_visible_index(&props, 100));
        assert_eq!(state.focused(), Some("h"));
    }

    #[test]
    fn focus_on_empty_tree_clears() {
        let tree = LinkedTree::default();
        let props = TreeProps::new(tree.roots());
        let mut state = TreeState::default();
        state.focus(Some("gone".to_owned()));
        assert!(state.focus_first(&props));
        assert_eq!(state.focused(), None);
    }

    #[test]
    fn toggle_focused_notifies() {
        let tree = LinkedTree::example();
        let selected = RefCell::new(None);
        let props = TreeProps::new(tree.roots()).on_select(|selection| {
            selected.replace(Some(selection));
        });
        let mut state = TreeState::default();
        assert!(!state.toggle_focused(&props));
        state.focus(Some("f".to_owned()));
        assert!(state.toggle_focused(&props));
        drop(props);
        assert_eq!(
            selected.into_inner(),
            Some(Selection::Single(tree.find("f").unwrap().data().clone()))
        );
    }

    #[test]
    fn scroll_works() {
        let mut state = TreeState::default();
        assert!(!state.scroll_up(1));
        assert!(state.scroll_down(4));
        assert!(state.scroll_up(1));
        assert_eq!(state.get_offset(), 3);
    }
}
