use std::cell::RefCell;
use std::collections::HashSet;

use crossterm::event::{Event, KeyCode, MouseEventKind};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Scrollbar, ScrollbarOrientation};
use ratatui::Terminal;

use tui_tree_control::{Item, Selection, Tree, TreeControl, TreeControlProps, TreeState};

/// Selection and expansion are owned here, the tree only reports what should change.
#[derive(Default)]
struct Shared {
    selected: RefCell<Option<Selection>>,
    collapsed: RefCell<HashSet<String>>,
}

fn items() -> Vec<Item> {
    vec![
        Item::new("clothing", "Clothing"),
        Item::new("tshirts", "T-Shirts").with_parent("clothing"),
        Item::new("hoodies", "Hoodies").with_parent("clothing"),
        Item::new("zip", "Zip Hoodies").with_parent("hoodies"),
        Item::new("pullover", "Pullover").with_parent("hoodies"),
        Item::new("accessories", "Accessories").with_parent("clothing"),
        Item::new("music", "Music"),
        Item::new("vinyl", "Vinyl").with_parent("music"),
        Item::new("cd", "CD").with_parent("music"),
        Item::new("decor", "Decor"),
        Item::new("posters", "Posters").with_parent("decor"),
        Item::new("uncategorized", "Uncategorized"),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let shared = Shared::default();
    let control = TreeControlProps::new(items())
        .multiple(true)
        .on_select(|added| {
            let mut selected = shared.selected.borrow_mut();
            match selected.as_mut() {
                Some(selected) => selected.apply_select(added),
                None => *selected = Some(added),
            }
        })
        .on_remove(|removed| {
            let mut selected = shared.selected.borrow_mut();
            let keep = selected
                .as_mut()
                .is_some_and(|selected| selected.apply_remove(&removed));
            if !keep {
                *selected = None;
            }
        })
        .is_item_expanded(|node| !shared.collapsed.borrow().contains(&node.data().value))
        .is_item_highlighted(|node| node.data().value == "uncategorized")
        .build()?;

    // Terminal initialization
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, control, &shared);

    // restore terminal
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut control: TreeControl,
    shared: &Shared,
) -> std::io::Result<()> {
    let mut state = TreeState::default();
    loop {
        control.set_selected(shared.selected.borrow().clone());

        terminal.draw(|frame| {
            let area = frame.size();
            let selected = control
                .get_selected()
                .map_or(0, Selection::len);
            let widget = Tree::new(control.tree_props())
                .block(
                    Block::bordered()
                        .title("Tree Control")
                        .title_bottom(format!("{selected} selected")),
                )
                .experimental_scrollbar(Some(
                    Scrollbar::new(ScrollbarOrientation::VerticalRight)
                        .begin_symbol(None)
                        .track_symbol(None)
                        .end_symbol(None),
                ))
                .focus_style(
                    Style::new()
                        .fg(Color::Black)
                        .bg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_style(Style::new().fg(Color::Yellow))
                .selected_style(Style::new().add_modifier(Modifier::BOLD))
                .focus_symbol(">> ");
            frame.render_stateful_widget(widget, area, &mut state);
        })?;

        let props = control.tree_props();
        match crossterm::event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('\n' | ' ') => {
                    state.toggle_focused(&props);
                }
                KeyCode::Left | KeyCode::Right => {
                    if let Some(focused) = state.focused() {
                        let mut collapsed = shared.collapsed.borrow_mut();
                        if !collapsed.remove(focused) {
                            collapsed.insert(focused.to_owned());
                        }
                    }
                }
                KeyCode::Down => {
                    state.focus_visible_relative(&props, |current| {
                        current.map_or(0, |current| current.saturating_add(1))
                    });
                }
                KeyCode::Up => {
                    state.focus_visible_relative(&props, |current| {
                        current.map_or(usize::MAX, |current| current.saturating_sub(1))
                    });
                }
                KeyCode::Home => {
                    state.focus_first(&props);
                }
                KeyCode::End => {
                    state.focus_last(&props);
                }
                KeyCode::PageDown => {
                    state.scroll_down(3);
                }
                KeyCode::PageUp => {
                    state.scroll_up(3);
                }
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => {
                    state.scroll_down(1);
                }
                MouseEventKind::ScrollUp => {
                    state.scroll_up(1);
                }
                _ => {}
            },
            _ => {}
        }
    }
}
