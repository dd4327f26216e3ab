use serde_json::Value;

use crate::error::Result;
use crate::item::Item;
use crate::linked_tree::LinkedTree;

/// Parse a JSON array of items like `[{"value": "2", "parent": "1", "label": "Child"}]`.
///
/// # Errors
///
/// Errors when the input is not such an array.
pub fn items(json: &str) -> Result<Vec<Item>> {
    Ok(serde_json::from_str(json)?)
}

/// Same as [`items`] for an already parsed [JSON](Value), for example an API response.
///
/// # Errors
///
/// Errors when the value is not an array of items.
pub fn items_from_value(value: Value) -> Result<Vec<Item>> {
    Ok(serde_json::from_value(value)?)
}

/// Parse the items and link them into a tree.
///
/// # Errors
///
/// Errors when the input is not an array of items or the items do not form a tree.
pub fn linked_tree(json: &str) -> Result<LinkedTree> {
    LinkedTree::from_items(items(json)?)
}

/// Serialize the items of a tree in pre-order.
///
/// # Errors
///
/// Errors when serialization fails.
pub fn to_string(tree: &LinkedTree) -> Result<String> {
    Ok(serde_json::to_string(&tree.flatten())?)
}

#[test]
fn parses_items() {
    let items = items(r#"[{"value":"1","label":"Root"},{"value":"2","parent":"1","label":"Child"}]"#)
        .unwrap();
    assert_eq!(
        items,
        [Item::new("1", "Root"), Item::new("2", "Child").with_parent("1")]
    );
}

#[test]
fn parses_value() {
    let value = serde_json::json!([{ "value": "a", "label": "Alfa" }]);
    assert_eq!(items_from_value(value).unwrap(), [Item::new("a", "Alfa")]);
}

#[test]
#[should_panic = "missing field"]
fn errors_without_label() {
    items(r#"[{"value":"1"}]"#).unwrap();
}

#[test]
#[should_panic = "UnknownParent"]
fn linked_tree_errors_with_unknown_parent() {
    linked_tree(r#"[{"value":"2","parent":"1","label":"Child"}]"#).unwrap();
}

#[test]
fn serializes_without_missing_parent() {
    let tree = linked_tree(r#"[{"value":"2","parent":"1","label":"Child"},{"value":"1","label":"Root"}]"#)
        .unwrap();
    assert_eq!(
        to_string(&tree).unwrap(),
        r#"[{"value":"1","label":"Root"},{"parent":"1","value":"2","label":"Child"}]"#
    );
}
