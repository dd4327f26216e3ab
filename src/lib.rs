#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]

/*!
Controlled tree selection widget.

A flat list of [`Item`]s is linked into a [`LinkedTree`].
[`TreeProps`] describe how to present it and notify `on_select` / `on_remove` about selection changes, cascading to ancestors and descendants when `multiple` items can be selected.
The [`Tree`] widget renders these props while the [`TreeState`] only keeps the scroll position and the focused node.
*/

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Scrollbar, ScrollbarState, StatefulWidget, Widget};
use unicode_width::UnicodeWidthStr;

mod checked_status;
mod error;
mod flatten;
mod item;
#[cfg(feature = "json")]
pub mod json;
mod linked_tree;
mod props;
mod selection;
mod tree_control;
mod tree_item_props;
mod tree_props;
mod tree_state;

pub use crate::checked_status::CheckedStatus;
pub use crate::error::{Error, Result};
pub use crate::flatten::flatten;
pub use crate::item::Item;
pub use crate::linked_tree::{LinkedTree, Node, NodeId};
pub use crate::props::{
    Attributes, ItemHooks, LabelHook, NodePredicate, SelectionCallback, SelectionProps,
};
pub use crate::selection::{cascade_remove, cascade_select, Selection};
pub use crate::tree_control::{TreeControl, TreeControlProps};
pub use crate::tree_item_props::TreeItemProps;
pub use crate::tree_props::TreeProps;
pub use crate::tree_state::TreeState;

/// A `Tree` which can be rendered.
///
/// What is shown and selected is described by its [`TreeProps`].
/// The [`TreeState`] keeps track of the scroll position and the focused node.
///
/// # Example
///
/// ```
/// # use tui_tree_control::{Item, Tree, TreeControlProps, TreeState};
/// # use ratatui::backend::TestBackend;
/// # use ratatui::Terminal;
/// # use ratatui::widgets::Block;
/// # let mut terminal = Terminal::new(TestBackend::new(32, 32)).unwrap();
/// let mut state = TreeState::default();
///
/// let control = TreeControlProps::new(vec![Item::new("l", "leaf")])
///     .build()
///     .expect("all item values are unique");
///
/// terminal.draw(|frame| {
///     let area = frame.size();
///
///     let tree_widget = Tree::new(control.tree_props())
///         .block(Block::bordered().title("Tree Widget"));
///
///     frame.render_stateful_widget(tree_widget, area, &mut state);
/// })?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Tree<'a> {
    props: TreeProps<'a>,

    block: Option<Block<'a>>,
    scrollbar: Option<Scrollbar<'a>>,
    /// Style used as a base style for the widget
    style: Style,

    /// Style used to render the focused node
    focus_style: Style,
    /// Symbol in front of the focused node (Shift all nodes to the right)
    focus_symbol: &'a str,

    /// Style used to render nodes which are highlighted by [`TreeProps::is_item_highlighted`]
    highlight_style: Style,
    /// Style used to render selected nodes
    selected_style: Style,

    /// Symbol displayed in front of a collapsed node (As in the children are currently not visible)
    node_closed_symbol: &'a str,
    /// Symbol displayed in front of an expanded node. (As in the children are currently visible)
    node_open_symbol: &'a str,
    /// Symbol displayed in front of a node without children.
    node_no_children_symbol: &'a str,

    /// Checkbox symbols displayed in front of the label when multiple items can be selected.
    checked_symbol: &'a str,
    unchecked_symbol: &'a str,
    indeterminate_symbol: &'a str,
}

impl<'a> Tree<'a> {
    #[must_use]
    pub const fn new(props: TreeProps<'a>) -> Self {
        Self {
            props,
            block: None,
            scrollbar: None,
            style: Style::new(),
            focus_style: Style::new(),
            focus_symbol: "",
            highlight_style: Style::new(),
            selected_style: Style::new(),
            node_closed_symbol: "\u{25b6} ", // Arrow to right
            node_open_symbol: "\u{25bc} ",   // Arrow down
            node_no_children_symbol: "  ",
            checked_symbol: "[x] ",
            unchecked_symbol: "[ ] ",
            indeterminate_symbol: "[-] ",
        }
    }

    #[allow(clippy::missing_const_for_fn)]
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Show the scrollbar when rendering this widget.
    ///
    /// Experimental: Can change on any release without any additional notice.
    #[allow(clippy::missing_const_for_fn)]
    #[must_use]
    pub fn experimental_scrollbar(mut self, scrollbar: Option<Scrollbar<'a>>) -> Self {
        self.scrollbar = scrollbar;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn focus_style(mut self, style: Style) -> Self {
        self.focus_style = style;
        self
    }

    #[must_use]
    pub const fn focus_symbol(mut self, focus_symbol: &'a str) -> Self {
        self.focus_symbol = focus_symbol;
        self
    }

    #[must_use]
    pub const fn highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = style;
        self
    }

    #[must_use]
    pub const fn selected_style(mut self, style: Style) -> Self {
        self.selected_style = style;
        self
    }

    #[must_use]
    pub const fn node_closed_symbol(mut self, symbol: &'a str) -> Self {
        self.node_closed_symbol = symbol;
        self
    }

    #[must_use]
    pub const fn node_open_symbol(mut self, symbol: &'a str) -> Self {
        self.node_open_symbol = symbol;
        self
    }

    #[must_use]
    pub const fn node_no_children_symbol(mut self, symbol: &'a str) -> Self {
        self.node_no_children_symbol = symbol;
        self
    }

    #[must_use]
    pub const fn checked_symbol(mut self, symbol: &'a str) -> Self {
        self.checked_symbol = symbol;
        self
    }

    #[must_use]
    pub const fn unchecked_symbol(mut self, symbol: &'a str) -> Self {
        self.unchecked_symbol = symbol;
        self
    }

    #[must_use]
    pub const fn indeterminate_symbol(mut self, symbol: &'a str) -> Self {
        self.indeterminate_symbol = symbol;
        self
    }

    const fn checkbox_symbol(&self, status: CheckedStatus) -> &'a str {
        match status {
            CheckedStatus::Checked => self.checked_symbol,
            CheckedStatus::Unchecked => self.unchecked_symbol,
            CheckedStatus::Indeterminate => self.indeterminate_symbol,
        }
    }
}

impl<'a> StatefulWidget for Tree<'a> {
    type State = TreeState;

    #[allow(clippy::too_many_lines)]
    fn render(self, full_area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        buf.set_style(full_area, self.style);

        // Get the inner area inside a possible block, otherwise use the full area
        let area = self.block.as_ref().map_or(full_area, |block| {
            let inner_area = block.inner(full_area);
            block.clone().render(full_area, buf);
            inner_area
        });

        if area.width < 1 || area.height < 1 {
            return;
        }

        let visible = state.flatten(&self.props);
        if visible.is_empty() {
            return;
        }
        let labels = visible.iter().map(TreeItemProps::label).collect::<Vec<_>>();
        let available_height = area.height as usize;

        let ensure_index_in_view = if state.ensure_focused_in_view_on_next_render {
            state.focused_index(&visible)
        } else {
            None
        };

        // Ensure last line is still visible
        let mut start = state.offset.min(visible.len().saturating_sub(1));

        if let Some(ensure_index_in_view) = ensure_index_in_view {
            start = start.min(ensure_index_in_view);
        }

        let mut end = start;
        let mut height = 0;
        for item_height in labels.iter().skip(start).map(ratatui::text::Text::height) {
            if height + item_height > available_height {
                break;
            }
            height += item_height;
            end += 1;
        }

        if let Some(ensure_index_in_view) = ensure_index_in_view {
            while ensure_index_in_view >= end {
                height += labels[end].height();
                end += 1;
                while height > available_height {
                    height = height.saturating_sub(labels[start].height());
                    start += 1;
                }
            }
        }

        state.offset = start;
        state.ensure_focused_in_view_on_next_render = false;

        if let Some(scrollbar) = self.scrollbar.clone() {
            let mut scrollbar_state = ScrollbarState::new(visible.len().saturating_sub(height))
                .position(start)
                .viewport_content_length(height);
            let scrollbar_area = Rect {
                // Inner height to be exactly as the content
                y: area.y,
                height: area.height,
                // Outer width to stay on the right border
                x: full_area.x,
                width: full_area.width,
            };
            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);
        }

        let blank_symbol = " ".repeat(self.focus_symbol.width());
        let focused_index = state.focused_index(&visible);
        let multiple = self.props.is_multiple();

        let mut current_height = 0;
        #[allow(clippy::cast_possible_truncation)]
        for (index, (item, text)) in visible
            .iter()
            .zip(&labels)
            .enumerate()
            .skip(start)
            .take(end - start)
        {
            let x = area.x;
            let y = area.y + current_height;
            let height = text.height() as u16;
            current_height += height;

            let area = Rect {
                x,
                y,
                width: area.width,
                height,
            };

            let mut item_style = self.style;
            if item.highlighted() {
                item_style = item_style.patch(self.highlight_style);
            }
            if item.is_selected() {
                item_style = item_style.patch(self.selected_style);
            }
            buf.set_style(area, item_style);

            let is_focused = focused_index == Some(index);
            let after_focus_symbol_x = if focused_index.is_some() {
                let symbol = if is_focused {
                    self.focus_symbol
                } else {
                    &blank_symbol
                };
                let (x, _) = buf.set_stringn(x, y, symbol, area.width as usize, item_style);
                x
            } else {
                x
            };

            let after_depth_x = {
                let indent_width = item.get_level() * 2;
                let (after_indent_x, _) = buf.set_stringn(
                    after_focus_symbol_x,
                    y,
                    " ".repeat(indent_width),
                    indent_width,
                    item_style,
                );
                let symbol = if !item.item().has_children() {
                    self.node_no_children_symbol
                } else if item.expanded() {
                    self.node_open_symbol
                } else {
                    self.node_closed_symbol
                };
                let max_width = area.width.saturating_sub(after_indent_x - x);
                let (x, _) =
                    buf.set_stringn(after_indent_x, y, symbol, max_width as usize, item_style);
                x
            };

            let after_checkbox_x = if multiple {
                let symbol = self.checkbox_symbol(item.checked_status());
                let max_width = area.width.saturating_sub(after_depth_x - x);
                let (x, _) =
                    buf.set_stringn(after_depth_x, y, symbol, max_width as usize, item_style);
                x
            } else {
                after_depth_x
            };

            let max_element_width = area.width.saturating_sub(after_checkbox_x - x);
            for (j, line) in text.lines.iter().enumerate() {
                buf.set_line(after_checkbox_x, y + j as u16, line, max_element_width);
            }
            if is_focused {
                buf.set_style(area, self.focus_style);
            }
        }
    }
}

impl<'a> Widget for Tree<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut state = TreeState::default();
        StatefulWidget::render(self, area, buf, &mut state);
    }
}

#[cfg(test)]
mod render_tests {
    use super::*;

    fn rendered(tree: Tree, state: &mut TreeState, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        StatefulWidget::render(tree, area, &mut buffer, state);
        buffer
            .content
            .chunks(width as usize)
            .map(|row| {
                row.iter()
                    .map(ratatui::buffer::Cell::symbol)
                    .collect::<String>()
                    .trim_end()
                    .to_owned()
            })
            .collect()
    }

    #[test]
    fn renders_everything_expanded() {
        let tree = LinkedTree::example();
        let props = TreeProps::new(tree.roots());
        let lines = rendered(Tree::new(props), &mut TreeState::default(), 16, 8);
        assert_eq!(
            lines,
            [
                "  Alfa",
                "\u{25bc} Bravo",
                "    Charlie",
                "  \u{25bc} Delta",
                "      Echo",
                "      Foxtrot",
                "    Golf",
                "  Hotel",
            ]
        );
    }

    #[test]
    fn renders_checkboxes_when_multiple() {
        let tree = LinkedTree::example();
        let selected = Selection::Multiple(vec![
            tree.find("d").unwrap().data().clone(),
            tree.find("e").unwrap().data().clone(),
            tree.find("f").unwrap().data().clone(),
        ]);
        let props = TreeProps::new(tree.roots())
            .multiple(true)
            .selected(selected)
            .is_item_expanded(|node| node.data().value != "d");
        let lines = rendered(Tree::new(props), &mut TreeState::default(), 20, 6);
        assert_eq!(
            lines,
            [
                "  [ ] Alfa",
                "\u{25bc} [-] Bravo",
                "    [ ] Charlie",
                "  \u{25b6} [x] Delta",
                "    [ ] Golf",
                "  [ ] Hotel",
            ]
        );
    }

    #[test]
    fn renders_focus_symbol_and_label_hook() {
        let tree = LinkedTree::example();
        let props = TreeProps::new(tree.roots())
            .is_item_expanded(|_| false)
            .get_item_label(|node| ratatui::text::Text::from(node.data().value.as_str()));
        let mut state = TreeState::default();
        state.focus(Some("b".to_owned()));
        let lines = rendered(Tree::new(props).focus_symbol(">> "), &mut state, 12, 3);
        assert_eq!(lines, ["     a", ">> \u{25b6} b", "     h"]);
    }

    #[test]
    fn scrolls_focused_into_view() {
        let tree = LinkedTree::example();
        let props = TreeProps::new(tree.roots());
        let mut state = TreeState::default();
        state.focus(Some("g".to_owned()));
        let lines = rendered(Tree::new(props), &mut state, 16, 2);
        assert_eq!(state.get_offset(), 5);
        assert_eq!(lines, ["      Foxtrot", "    Golf"]);
    }

    #[test]
    fn patches_styles_in_order() {
        use ratatui::style::{Color, Modifier};

        let tree = LinkedTree::example();
        let props = TreeProps::new(tree.roots())
            .selected(Selection::Single(tree.find("b").unwrap().data().clone()))
            .is_item_expanded(|_| false)
            .is_item_highlighted(|_| true);
        let widget = Tree::new(props)
            .highlight_style(Style::new().fg(Color::Yellow))
            .selected_style(Style::new().fg(Color::Red).bg(Color::Blue))
            .focus_style(Style::new().fg(Color::Black).add_modifier(Modifier::BOLD));
        let mut state = TreeState::default();
        state.focus(Some("h".to_owned()));

        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        StatefulWidget::render(widget, area, &mut buffer, &mut state);

        let style = |x, y| {
            let cell = buffer.get(x, y);
            (cell.fg, cell.bg, cell.modifier)
        };
        // Highlighted only
        assert_eq!(style(0, 0), (Color::Yellow, Color::Reset, Modifier::empty()));
        assert_eq!(style(9, 0), (Color::Yellow, Color::Reset, Modifier::empty()));
        // Selected is patched over highlighted
        assert_eq!(style(0, 1), (Color::Red, Color::Blue, Modifier::empty()));
        assert_eq!(style(9, 1), (Color::Red, Color::Blue, Modifier::empty()));
        // Focus is on top of everything
        assert_eq!(style(0, 2), (Color::Black, Color::Reset, Modifier::BOLD));
        assert_eq!(style(9, 2), (Color::Black, Color::Reset, Modifier::BOLD));
    }

    #[test]
    fn renders_nothing_without_items() {
        let tree = LinkedTree::default();
        let props = TreeProps::new(tree.roots());
        let lines = rendered(Tree::new(props), &mut TreeState::default(), 4, 2);
        assert_eq!(lines, ["", ""]);
    }
}
