#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Standard menu tests.

use agora_kernel::menu::{Attributes, Menu, MenuItem, into_attributes};
use serde_json::json;

fn names(menu: &Menu) -> Vec<String> {
    menu.iter().map(|item| item.name().to_string()).collect()
}

#[test]
fn test_add_item_with_explicit_order() {
    let mut menu = Menu::new("test", "");
    menu.add_item("item_1", Some(0), Attributes::new());

    assert!(menu.contains_item("item_1"));
    assert_eq!(menu.len(), 1);
    assert_eq!(menu.get("item_1").unwrap().order(), 0);
}

#[test]
fn test_add_item_without_order_appends() {
    let mut menu = Menu::new("test", "");
    menu.add_item("item_1", None, Attributes::new());
    assert_eq!(menu.get("item_1").unwrap().order(), 0);

    menu.add_item("item_2", None, Attributes::new());
    assert_eq!(menu.get("item_2").unwrap().order(), 1);
    assert_eq!(menu.highest_position(), 1);
}

#[test]
fn test_remove_item() {
    let mut menu = Menu::new("test", "");
    menu.add_item("item_1", None, Attributes::new());

    assert!(menu.remove_item("item_1"));
    assert_eq!(menu.len(), 0);
    assert!(!menu.contains_item("item_1"));
}

#[test]
fn test_remove_missing_item_leaves_menu_unchanged() {
    let mut menu = Menu::new("test", "");
    menu.add_item("item_1", None, Attributes::new());

    assert!(!menu.remove_item("item_2"));
    assert_eq!(menu.len(), 1);
}

#[test]
fn test_highest_position_of_empty_menu() {
    let menu = Menu::new("test", "");
    assert_eq!(menu.highest_position(), -1);
    assert!(menu.is_empty());
}

#[test]
fn test_items_are_sorted() {
    let mut menu = Menu::new("test", "");
    menu.add_item("item_1", Some(2), Attributes::new());
    menu.add_item("item_2", Some(0), Attributes::new());
    menu.add_item("item_3", Some(1), Attributes::new());

    assert_eq!(names(&menu), vec!["item_2", "item_3", "item_1"]);

    let orders: Vec<i64> = (&menu).into_iter().map(MenuItem::order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[test]
fn test_negative_orders_sort_first() {
    let mut menu = Menu::new("test", "");
    menu.add_item("home", None, Attributes::new());
    menu.add_item("pinned", Some(-5), Attributes::new());

    assert_eq!(names(&menu), vec!["pinned", "home"]);
    assert_eq!(menu.highest_position(), 0);
}

#[test]
fn test_set_order_moves_item() {
    let mut menu = Menu::new("test", "");
    menu.add_item("a", Some(0), Attributes::new());
    menu.add_item("b", Some(1), Attributes::new());

    menu.get_mut("a").unwrap().set_order(5);
    assert_eq!(names(&menu), vec!["b", "a"]);
}

#[test]
fn test_raw_items_can_be_edited() {
    let mut menu = Menu::new("test", "");
    menu.add_item(
        "compose",
        Some(0),
        into_attributes(json!({ "link": "private.php?action=send" })),
    );

    let item = menu.raw_items_mut().get_mut("compose").unwrap();
    item.attributes
        .insert("link".to_string(), json!("private.php?action=send&preview=1"));

    assert_eq!(
        menu.get("compose").unwrap().attribute("link"),
        Some(&json!("private.php?action=send&preview=1"))
    );
    assert_eq!(menu.raw_items().len(), 1);
}

#[test]
fn test_submenu_is_attached_to_item() {
    let mut child = Menu::new("child", "child.html");
    child.add_item("leaf", None, Attributes::new());

    let mut menu = Menu::new("root", "root.html");
    menu.add_submenu("branch", Some(3), Attributes::new(), child);

    let branch = menu.get("branch").unwrap();
    assert_eq!(branch.order(), 3);
    let nested = branch.children.as_ref().unwrap().as_menu().unwrap();
    assert_eq!(nested.name(), "child");
    assert!(nested.contains_item("leaf"));
}

#[test]
fn test_rename_menu() {
    let mut menu = Menu::new("old", "old.html");
    menu.set_name("new");
    menu.set_template_name("new.html");
    assert_eq!(menu.name(), "new");
    assert_eq!(menu.template_name(), "new.html");
}
