use crate::tree_item_props::TreeItemProps;
use crate::tree_props::TreeProps;

/// Get a flat list of all visible [`TreeItemProps`].
///
/// The nodes on the level of `props` are always visible while the children of a node are only visible when it is expanded.
#[must_use]
pub fn flatten<'a>(props: &TreeProps<'a>) -> Vec<TreeItemProps<'a>> {
    let mut result = Vec::new();
    // Reversed so the next item to visit is on top
    let mut stack = props.item_props();
    stack.reverse();
    while let Some(item) = stack.pop() {
        if let Some(children) = item.children_props() {
            stack.extend(children.item_props().into_iter().rev());
        }
        result.push(item);
    }
    result
}

#[cfg(test)]
fn flatten_works(collapsed: &'static [&'static str], expected: &[&str]) {
    let tree = crate::LinkedTree::example();
    let props = TreeProps::new(tree.roots())
        .is_item_expanded(|node| !collapsed.iter().any(|value| *value == node.data().value));
    let actual = flatten(&props)
        .into_iter()
        .map(|flattened| flattened.item().data().value.clone())
        .collect::<Vec<_>>();
    assert_eq!(actual, expected);
}

#[test]
fn depth_works() {
    let tree = crate::LinkedTree::example();
    let depths = flatten(&TreeProps::new(tree.roots()))
        .into_iter()
        .map(|flattened| flattened.get_level())
        .collect::<Vec<_>>();
    assert_eq!(depths, [0, 0, 1, 1, 2, 2, 1, 0]);
}

#[test]
fn flatten_nothing_collapsed_is_everything() {
    flatten_works(&[], &["a", "b", "c", "d", "e", "f", "g", "h"]);
}

#[test]
fn flatten_collapsed_leaf_changes_nothing() {
    flatten_works(&["a", "e"], &["a", "b", "c", "d", "e", "f", "g", "h"]);
}

#[test]
fn flatten_one_is_collapsed() {
    flatten_works(&["d"], &["a", "b", "c", "d", "g", "h"]);
}

#[test]
fn flatten_all_collapsed_is_top_level() {
    flatten_works(&["b", "d"], &["a", "b", "h"]);
}

#[test]
fn flatten_keeps_sibling_index() {
    let tree = crate::LinkedTree::example();
    let indices = flatten(&TreeProps::new(tree.roots()))
        .into_iter()
        .map(|flattened| flattened.index())
        .collect::<Vec<_>>();
    assert_eq!(indices, [0, 1, 0, 1, 0, 1, 2, 2]);
}

#[test]
fn flatten_deep_chain() {
    let tree = crate::LinkedTree::chain(10_000);
    let flattened = flatten(&TreeProps::new(tree.roots()));
    assert_eq!(flattened.len(), 10_000);
    let last = flattened.last().unwrap();
    assert_eq!(last.get_level(), 9_999);
    assert_eq!(last.item().data().value, "9999");
}
