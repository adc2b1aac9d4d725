//! Tests for the block catalog and property resolution.
mod common;
use botforge::catalog::{BlockFeature, LISTENER_EVENTS, PERMISSIONS};
use botforge::prelude::*;
use common::*;
use serde_json::{Value, json};

#[test]
fn test_builtin_catalog_has_every_block_family() {
    let catalog = BlockCatalog::builtin();
    for block_type in [
        "command_slash",
        "on_button_click",
        "on_select_menu",
        "on_modal_submit",
        "event_listener",
        "action_reply",
        "action_send_message",
        "action_send_embed",
        "action_edit_reply",
        "action_defer_reply",
        "action_send_dm",
        "action_react",
        "action_delete_message",
        "action_reply_with_button",
        "action_show_modal",
        "action_wait",
        "action_log",
        "mod_kick",
        "mod_ban",
        "mod_timeout",
        "mod_add_role",
        "mod_remove_role",
        "mod_purge",
        "condition_has_permission",
        "condition_has_role",
        "data_set_variable",
        "data_get_variable",
        "data_increment",
        "data_delete_variable",
        "voice_join",
        "voice_leave",
    ] {
        assert!(catalog.contains(block_type), "missing {}", block_type);
    }
    assert_eq!(catalog.len(), 31);
    assert!(catalog.lookup("foo_bar_baz").is_none());
}

#[test]
fn test_builtin_catalog_is_shared() {
    assert!(std::ptr::eq(BlockCatalog::builtin(), BlockCatalog::builtin()));
}

#[test]
fn test_definition_shapes() {
    let catalog = BlockCatalog::builtin();

    let trigger = catalog.lookup("command_slash").unwrap();
    assert_eq!(trigger.category, BlockCategory::Triggers);
    assert_eq!(trigger.inputs, 0);
    assert_eq!(trigger.outputs, 1);

    let condition = catalog.lookup("condition_has_permission").unwrap();
    assert_eq!(condition.outputs, 2);
    let permission = condition.property_spec("permission").unwrap();
    assert_eq!(permission.kind, PropertyKind::Select);
    assert_eq!(permission.options.len(), PERMISSIONS.len());

    let event = catalog.lookup("event_listener").unwrap();
    assert_eq!(event.property_spec("event").unwrap().options.len(), LISTENER_EVENTS.len());

    assert!(catalog.lookup("voice_join").unwrap().has_feature(BlockFeature::Voice));
    assert!(catalog.lookup("data_set_variable").unwrap().has_feature(BlockFeature::DataStore));
    assert!(catalog.lookup("mod_kick").unwrap().has_feature(BlockFeature::TargetMember));
    assert!(!catalog.lookup("mod_purge").unwrap().has_feature(BlockFeature::TargetMember));
}

#[test]
fn test_definitions_are_sorted_by_type_id() {
    let ids: Vec<&str> = BlockCatalog::builtin()
        .definitions()
        .iter()
        .map(|d| d.type_id.as_str())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[test]
fn test_numeric_defaults() {
    let catalog = BlockCatalog::builtin();
    assert_eq!(catalog.resolve_number(&block("w", "action_wait", 0.0), "duration"), 1.0);
    assert_eq!(catalog.resolve_number(&block("t", "mod_timeout", 0.0), "minutes"), 10.0);
    assert_eq!(catalog.resolve_number(&block("p", "mod_purge", 0.0), "amount"), 10.0);
    assert_eq!(catalog.resolve_number(&block("i", "data_increment", 0.0), "amount"), 1.0);
}

#[test]
fn test_stored_value_wins_over_default() {
    let catalog = BlockCatalog::builtin();
    let reply = block("r", "action_reply", 0.0).with_property("content", "Pong!");
    assert_eq!(catalog.resolve_property(&reply, "content"), json!("Pong!"));
    assert_eq!(catalog.resolve_str(&reply, "content"), "Pong!");
}

#[test]
fn test_null_and_blank_values_fall_back_to_default() {
    let catalog = BlockCatalog::builtin();
    let blank = block("r", "action_reply", 0.0).with_property("content", "   ");
    assert_eq!(catalog.resolve_str(&blank, "content"), "Hello!");

    let null = block("r", "action_reply", 0.0).with_property("content", Value::Null);
    assert_eq!(catalog.resolve_str(&null, "content"), "Hello!");
}

#[test]
fn test_unknown_keys_and_types_never_miss() {
    let catalog = BlockCatalog::builtin();
    let reply = block("r", "action_reply", 0.0);
    assert_eq!(catalog.resolve_property(&reply, "nonexistent"), json!(""));

    let unknown = Block::new("u", "foo_bar_baz", BlockCategory::Actions);
    assert_eq!(catalog.resolve_str(&unknown, "anything"), "");
    assert_eq!(catalog.resolve_number(&unknown, "anything"), 0.0);
    assert!(!catalog.resolve_bool(&unknown, "anything"));
}

#[test]
fn test_required_property_without_default_uses_neutral_value() {
    let catalog = BlockCatalog::builtin();
    let role = block("r", "mod_add_role", 0.0);
    assert_eq!(catalog.resolve_property(&role, "role_id"), json!(""));
}

#[test]
fn test_typed_helpers_coerce_loose_values() {
    let catalog = BlockCatalog::builtin();
    let wait = block("w", "action_wait", 0.0).with_property("duration", "2.5");
    assert_eq!(catalog.resolve_number(&wait, "duration"), 2.5);

    let garbage = block("w", "action_wait", 0.0).with_property("duration", "soon");
    assert_eq!(catalog.resolve_number(&garbage, "duration"), 1.0);

    let reply = block("r", "action_reply", 0.0).with_property("ephemeral", "true");
    assert!(catalog.resolve_bool(&reply, "ephemeral"));
    assert!(!catalog.resolve_bool(&block("r", "action_reply", 0.0), "ephemeral"));
}

#[test]
fn test_custom_catalog_overrides_and_extends() {
    let catalog = BlockCatalog::with_builtin_blocks()
        .with_definition(
            BlockDefinition::new("action_reply", "Reply", BlockCategory::Messages)
                .property(PropertySpec::textarea("content", "Message").default_value("Hi there")),
        )
        .with_definition(BlockDefinition::new("action_shrug", "Shrug", BlockCategory::Actions));

    assert_eq!(catalog.len(), BlockCatalog::builtin().len() + 1);
    assert_eq!(
        catalog.resolve_str(&block("r", "action_reply", 0.0), "content"),
        "Hi there"
    );
    assert!(catalog.contains("action_shrug"));

    let empty = BlockCatalog::new();
    assert!(empty.is_empty());
}

#[test]
fn test_category_of_prefers_catalog() {
    let catalog = BlockCatalog::builtin();
    let mislabeled = Block::new("k", "mod_kick", BlockCategory::Actions);
    assert_eq!(catalog.category_of(&mislabeled), BlockCategory::Moderation);

    let unknown = Block::new("u", "foo_bar_baz", BlockCategory::Data);
    assert_eq!(catalog.category_of(&unknown), BlockCategory::Data);
}

#[test]
fn test_unknown_category_deserializes_to_other() {
    let category: BlockCategory = serde_json::from_str("\"widgets\"").unwrap();
    assert_eq!(category, BlockCategory::Other);
    let category: BlockCategory = serde_json::from_str("\"triggers\"").unwrap();
    assert_eq!(category, BlockCategory::Triggers);
}
