use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::item::Item;

/// Index of a node inside a [`LinkedTree`].
///
/// Only valid for the [`LinkedTree`] which created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Entry {
    parent: Option<NodeId>,
    data: Item,
    children: Vec<NodeId>,
}

/// A tree of [`Item`]s with resolved parent and children links.
///
/// All nodes live in one arena and reference each other by [`NodeId`].
/// The children are the owning relation, the parent link is only used to walk upwards.
/// Use [`Node`] handles to navigate.
///
/// # Example
///
/// ```
/// # use tui_tree_control::{Item, LinkedTree};
/// let tree = LinkedTree::from_items(vec![
///     Item::new("1", "Root"),
///     Item::new("2", "Child").with_parent("1"),
/// ])?;
///
/// let root = tree.roots().next().expect("one root");
/// let child = root.children().next().expect("one child");
/// assert_eq!(root.data().value, "1");
/// assert_eq!(child.parent(), Some(root));
/// # Ok::<(), tui_tree_control::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinkedTree {
    entries: Vec<Entry>,
    roots: Vec<NodeId>,
    values: HashMap<String, NodeId>,
}

impl LinkedTree {
    /// Resolve the `parent` references of a flat collection of [`Item`]s.
    ///
    /// The order of the items is kept between siblings.
    /// Parents do not need to appear before their children.
    ///
    /// # Errors
    ///
    /// Errors when a value is duplicated, a parent does not exist or the parents form a cycle.
    pub fn from_items(items: Vec<Item>) -> Result<Self> {
        let mut values = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if values.insert(item.value.clone(), NodeId(index)).is_some() {
                return Err(Error::DuplicateValue(item.value.clone()));
            }
        }

        let mut entries = items
            .into_iter()
            .map(|data| Entry {
                parent: None,
                data,
                children: Vec::new(),
            })
            .collect::<Vec<_>>();

        let mut roots = Vec::new();
        for index in 0..entries.len() {
            let id = NodeId(index);
            let Some(parent) = entries[index].data.parent.as_ref() else {
                roots.push(id);
                continue;
            };
            let parent_id = *values
                .get(parent)
                .ok_or_else(|| Error::UnknownParent {
                    value: entries[index].data.value.clone(),
                    parent: parent.clone(),
                })?;
            if parent_id == id {
                return Err(Error::Cycle(entries[index].data.value.clone()));
            }
            entries[index].parent = Some(parent_id);
            entries[parent_id.0].children.push(id);
        }

        let tree = Self {
            entries,
            roots,
            values,
        };

        // Every node has exactly one parent, so nodes not reachable from a root hang on a cycle
        let reachable = tree.iter().count();
        if reachable != tree.len() {
            let mut visited = vec![false; tree.len()];
            for node in tree.iter() {
                visited[node.id.0] = true;
            }
            let index = visited.iter().position(|visited| !visited).unwrap_or(0);
            return Err(Error::Cycle(tree.entries[index].data.value.clone()));
        }

        log::debug!(
            "built linked tree with {} nodes and {} roots",
            tree.len(),
            tree.roots.len()
        );
        Ok(tree)
    }

    /// Add an [`Item`] to the tree.
    ///
    /// Its parent has to be part of the tree already.
    /// The new node becomes the last child of its parent or the last root.
    ///
    /// # Errors
    ///
    /// Errors when the value already exists or the parent is unknown.
    pub fn add(&mut self, item: Item) -> Result<NodeId> {
        if self.values.contains_key(&item.value) {
            return Err(Error::DuplicateValue(item.value));
        }
        let parent = match &item.parent {
            None => None,
            Some(parent) => Some(*self.values.get(parent).ok_or_else(|| {
                Error::UnknownParent {
                    value: item.value.clone(),
                    parent: parent.clone(),
                }
            })?),
        };

        let id = NodeId(self.entries.len());
        match parent {
            None => self.roots.push(id),
            Some(parent) => self.entries[parent.0].children.push(id),
        }
        self.values.insert(item.value.clone(), id);
        self.entries.push(Entry {
            parent,
            data: item,
            children: Vec::new(),
        });
        Ok(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top level nodes in their original order.
    pub fn roots(&self) -> impl ExactSizeIterator<Item = Node<'_>> + '_ {
        self.roots.iter().map(move |&id| Node { tree: self, id })
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.entries.len()).then_some(Node { tree: self, id })
    }

    /// Find the node wrapping the [`Item`] with the given `value`.
    #[must_use]
    pub fn find(&self, value: &str) -> Option<Node<'_>> {
        self.values
            .get(value)
            .map(|&id| Node { tree: self, id })
    }

    /// All nodes in pre-order: each node is followed by its descendants.
    pub fn iter(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        PreOrder {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// The [`Item`]s in pre-order.
    ///
    /// Items sharing a parent stay in the order they were given to [`from_items`](Self::from_items).
    #[must_use]
    pub fn flatten(&self) -> Vec<&Item> {
        self.iter().map(Node::data).collect()
    }

    /// Check that every parent link has a matching children entry (and the other way around) and that there are no cycles.
    ///
    /// A debugging aid: trees built with [`from_items`](Self::from_items) and [`add`](Self::add) always pass.
    ///
    /// # Errors
    ///
    /// Errors on the first node violating these.
    pub fn verify(&self) -> Result<()> {
        for (index, entry) in self.entries.iter().enumerate() {
            let id = NodeId(index);
            for child in &entry.children {
                let linked_back = self
                    .entries
                    .get(child.0)
                    .is_some_and(|child| child.parent == Some(id));
                if !linked_back {
                    return Err(Error::Inconsistent(entry.data.value.clone()));
                }
            }

            let siblings = match entry.parent {
                None => &self.roots,
                Some(parent) => &self.entries[parent.0].children,
            };
            if siblings.iter().filter(|&&sibling| sibling == id).count() != 1 {
                return Err(Error::Inconsistent(entry.data.value.clone()));
            }

            let mut current = entry.parent;
            let mut steps = 0;
            while let Some(parent) = current {
                steps += 1;
                if parent == id || steps > self.entries.len() {
                    return Err(Error::Cycle(entry.data.value.clone()));
                }
                current = self.entries[parent.0].parent;
            }
        }
        Ok(())
    }
}

/// Handle to one node of a [`LinkedTree`].
///
/// Cheap to copy. Two handles are equal when they point to the same node of the same tree.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    tree: &'a LinkedTree,
    id: NodeId,
}

impl<'a> Node<'a> {
    fn entry(self) -> &'a Entry {
        &self.tree.entries[self.id.0]
    }

    #[must_use]
    pub const fn id(self) -> NodeId {
        self.id
    }

    #[must_use]
    pub const fn tree(self) -> &'a LinkedTree {
        self.tree
    }

    #[must_use]
    pub fn data(self) -> &'a Item {
        &self.entry().data
    }

    #[must_use]
    pub fn parent(self) -> Option<Self> {
        let tree = self.tree;
        self.entry().parent.map(|id| Self { tree, id })
    }

    pub fn children(self) -> impl ExactSizeIterator<Item = Self> + 'a {
        let tree = self.tree;
        self.entry()
            .children
            .iter()
            .map(move |&id| Self { tree, id })
    }

    #[must_use]
    pub fn has_children(self) -> bool {
        !self.entry().children.is_empty()
    }

    /// Parent, grandparent, … up to the root.
    pub fn ancestors(self) -> impl Iterator<Item = Self> + 'a {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// All nodes below this one in pre-order.
    pub fn descendants(self) -> impl Iterator<Item = Self> + 'a {
        PreOrder {
            tree: self.tree,
            stack: self.entry().children.iter().rev().copied().collect(),
        }
    }

    /// Zero based depth. Depth 0 means top level.
    #[must_use]
    pub fn depth(self) -> usize {
        self.ancestors().count()
    }

    /// Position among its siblings.
    #[must_use]
    pub fn index(self) -> usize {
        let siblings = match self.entry().parent {
            None => &self.tree.roots,
            Some(parent) => &self.tree.entries[parent.0].children,
        };
        siblings
            .iter()
            .position(|&sibling| sibling == self.id)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_ancestor_of(self, other: Self) -> bool {
        other.ancestors().any(|ancestor| ancestor == self)
    }
}

/// Pre-order walk with an explicit stack, the next node is on top.
struct PreOrder<'a> {
    tree: &'a LinkedTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let children = &self.tree.entries[id.0].children;
        self.stack.extend(children.iter().rev());
        Some(Node {
            tree: self.tree,
            id,
        })
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("value", &self.data().value)
            .finish()
    }
}

impl LinkedTree {
    #[cfg(test)]
    pub(crate) fn example_items() -> Vec<Item> {
        vec![
            Item::new("a", "Alfa"),
            Item::new("b", "Bravo"),
            Item::new("c", "Charlie").with_parent("b"),
            Item::new("d", "Delta").with_parent("b"),
            Item::new("e", "Echo").with_parent("d"),
            Item::new("f", "Foxtrot").with_parent("d"),
            Item::new("g", "Golf").with_parent("b"),
            Item::new("h", "Hotel"),
        ]
    }

    #[cfg(test)]
    pub(crate) fn example() -> Self {
        Self::from_items(Self::example_items()).expect("example items are well formed")
    }

    /// `0` is the root, every further item is the only child of the one before.
    #[cfg(test)]
    pub(crate) fn chain(len: usize) -> Self {
        let items = (0..len)
            .map(|index| {
                let item = Item::new(index.to_string(), format!("Item {index}"));
                match index.checked_sub(1) {
                    Some(parent) => item.with_parent(parent.to_string()),
                    None => item,
                }
            })
            .collect();
        Self::from_items(items).expect("chain items are well formed")
    }
}

#[cfg(test)]
fn values<'a>(nodes: impl IntoIterator<Item = Node<'a>>) -> Vec<&'a str> {
    nodes
        .into_iter()
        .map(|node| node.data().value.as_str())
        .collect()
}

#[test]
fn builds_root_with_child() {
    let tree = LinkedTree::from_items(vec![
        Item::new("1", "Root"),
        Item::new("2", "Child").with_parent("1"),
    ])
    .unwrap();
    assert_eq!(tree.len(), 2);
    let roots = tree.roots().collect::<Vec<_>>();
    assert_eq!(roots.len(), 1);
    let root = roots[0];
    assert_eq!(root.data().value, "1");
    let children = root.children().collect::<Vec<_>>();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].data().value, "2");
    assert_eq!(children[0].parent(), Some(root));
}

#[test]
fn children_before_parents_are_resolved() {
    let tree = LinkedTree::from_items(vec![
        Item::new("c", "Child").with_parent("p"),
        Item::new("p", "Parent"),
    ])
    .unwrap();
    let root = tree.roots().next().unwrap();
    assert_eq!(root.data().value, "p");
    assert_eq!(root.children().next().unwrap().data().value, "c");
}

#[test]
fn flatten_groups_children_below_parents() {
    let tree = LinkedTree::from_items(vec![
        Item::new("a1", "A1").with_parent("a"),
        Item::new("b", "B"),
        Item::new("a", "A"),
        Item::new("b1", "B1").with_parent("b"),
        Item::new("a2", "A2").with_parent("a"),
    ])
    .unwrap();
    let flat = tree
        .flatten()
        .into_iter()
        .map(|item| item.value.as_str())
        .collect::<Vec<_>>();
    assert_eq!(flat, ["b", "b1", "a", "a1", "a2"]);
}

#[test]
fn flatten_keeps_every_item() {
    let items = LinkedTree::example_items();
    let tree = LinkedTree::from_items(items.clone()).unwrap();
    let flat = tree.flatten();
    assert_eq!(flat.len(), items.len());
    for item in &items {
        assert!(flat.contains(&item));
    }
    // The example is already in pre-order
    assert_eq!(flat, items.iter().collect::<Vec<_>>());
}

#[test]
fn children_link_back_to_their_parent() {
    let tree = LinkedTree::example();
    for node in tree.iter() {
        for child in node.children() {
            assert_eq!(child.parent(), Some(node));
        }
        assert!(!node.is_ancestor_of(node));
    }
    tree.verify().unwrap();
}

#[test]
fn depth_works() {
    let tree = LinkedTree::example();
    let depths = tree.iter().map(Node::depth).collect::<Vec<_>>();
    assert_eq!(depths, [0, 0, 1, 1, 2, 2, 1, 0]);
    assert_eq!(values(tree.iter()), ["a", "b", "c", "d", "e", "f", "g", "h"]);
}

#[test]
fn navigation_works() {
    let tree = LinkedTree::example();
    let e = tree.find("e").unwrap();
    assert_eq!(values(e.ancestors()), ["d", "b"]);
    assert_eq!(e.index(), 0);
    assert_eq!(tree.find("g").unwrap().index(), 2);
    assert_eq!(tree.find("h").unwrap().index(), 2);
    assert_eq!(values(tree.find("b").unwrap().descendants()), ["c", "d", "e", "f", "g"]);
    assert!(tree.find("b").unwrap().is_ancestor_of(e));
    assert!(!tree.find("a").unwrap().is_ancestor_of(e));
    assert!(tree.find("z").is_none());
}

#[test]
fn deep_chain_is_walked_without_recursion() {
    let tree = LinkedTree::chain(50_000);
    assert_eq!(tree.len(), 50_000);
    assert_eq!(tree.flatten().len(), 50_000);
    let root = tree.roots().next().unwrap();
    assert_eq!(root.descendants().count(), 49_999);
    let leaf = tree.find("49999").unwrap();
    assert_eq!(leaf.depth(), 49_999);
    assert!(root.is_ancestor_of(leaf));
}

#[test]
fn add_appends_to_parent() {
    let mut tree = LinkedTree::example();
    let id = tree.add(Item::new("i", "India").with_parent("d")).unwrap();
    let node = tree.node(id).unwrap();
    assert_eq!(node.index(), 2);
    assert_eq!(node.depth(), 2);
    tree.verify().unwrap();
}

#[test]
#[should_panic = "DuplicateValue"]
fn from_items_errors_with_duplicate_values() {
    LinkedTree::from_items(vec![Item::new("same", "A"), Item::new("same", "B")]).unwrap();
}

#[test]
#[should_panic = "UnknownParent"]
fn from_items_errors_with_unknown_parent() {
    LinkedTree::from_items(vec![Item::new("child", "Child").with_parent("nope")]).unwrap();
}

#[test]
#[should_panic = "Cycle"]
fn from_items_errors_with_self_parent() {
    LinkedTree::from_items(vec![Item::new("self", "Self").with_parent("self")]).unwrap();
}

#[test]
#[should_panic = "Cycle"]
fn from_items_errors_with_cycle() {
    LinkedTree::from_items(vec![
        Item::new("root", "Root"),
        Item::new("x", "X").with_parent("y"),
        Item::new("y", "Y").with_parent("x"),
    ])
    .unwrap();
}

#[test]
#[should_panic = "DuplicateValue"]
fn add_errors_with_duplicate_value() {
    let mut tree = LinkedTree::example();
    tree.add(Item::new("a", "Again")).unwrap();
}

#[test]
#[should_panic = "UnknownParent"]
fn add_errors_with_unknown_parent() {
    let mut tree = LinkedTree::example();
    tree.add(Item::new("z", "Zulu").with_parent("y")).unwrap();
}
