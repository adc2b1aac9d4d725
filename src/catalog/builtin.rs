use super::definition::{BlockCategory, BlockDefinition, BlockFeature, PropertySpec};
use ahash::AHashMap;

/// Event names offered by the `event_listener` trigger, in the discord.js spelling.
pub const LISTENER_EVENTS: &[&str] = &[
    "ready",
    "messageCreate",
    "messageDelete",
    "messageReactionAdd",
    "guildMemberAdd",
    "guildMemberRemove",
];

/// Member permissions a `condition_has_permission` block can require.
pub const PERMISSIONS: &[&str] = &[
    "Administrator",
    "KickMembers",
    "BanMembers",
    "ManageMessages",
    "ManageRoles",
    "ModerateMembers",
];

pub const BUTTON_STYLES: &[&str] = &["Primary", "Secondary", "Success", "Danger"];

fn triggers() -> Vec<BlockDefinition> {
    vec![
        BlockDefinition::trigger("command_slash", "Slash Command")
            .property(
                PropertySpec::text("name", "Command name")
                    .required()
                    .default_value("ping")
                    .placeholder("ping")
                    .helper("Lowercase, no spaces. This is what users type after '/'."),
            )
            .property(
                PropertySpec::text("description", "Description")
                    .default_value("A custom command"),
            )
            .property(
                PropertySpec::select("command_type", "Command type", &["chat_input", "user", "message"])
                    .default_value("chat_input"),
            ),
        BlockDefinition::trigger("on_button_click", "Button Click").property(
            PropertySpec::text("custom_id", "Button custom ID")
                .required()
                .default_value("button_1"),
        ),
        BlockDefinition::trigger("on_select_menu", "Select Menu").property(
            PropertySpec::text("custom_id", "Menu custom ID")
                .required()
                .default_value("select_1"),
        ),
        BlockDefinition::trigger("on_modal_submit", "Modal Submit").property(
            PropertySpec::text("custom_id", "Modal custom ID")
                .required()
                .default_value("modal_1"),
        ),
        BlockDefinition::trigger("event_listener", "Event Listener").property(
            PropertySpec::select("event", "Event", LISTENER_EVENTS).default_value("ready"),
        ),
    ]
}

fn messages() -> Vec<BlockDefinition> {
    use BlockCategory::Messages;
    vec![
        BlockDefinition::new("action_reply", "Reply", Messages)
            .property(
                PropertySpec::textarea("content", "Message")
                    .required()
                    .default_value("Hello!"),
            )
            .property(
                PropertySpec::boolean("ephemeral", "Only visible to the user").default_value(false),
            ),
        BlockDefinition::new("action_send_message", "Send Message", Messages)
            .property(
                PropertySpec::text("channel_id", "Channel ID")
                    .placeholder("Leave empty for the current channel")
                    .helper("Prefer a configurable value over a pasted numeric ID."),
            )
            .property(
                PropertySpec::textarea("content", "Message")
                    .required()
                    .default_value("Hello!"),
            ),
        BlockDefinition::new("action_send_embed", "Send Embed", Messages)
            .property(PropertySpec::text("title", "Title").default_value("Embed title"))
            .property(PropertySpec::textarea("description", "Description").default_value(""))
            .property(PropertySpec::color("color", "Color").default_value("#5865F2"))
            .property(PropertySpec::boolean("ephemeral", "Only visible to the user").default_value(false)),
        BlockDefinition::new("action_edit_reply", "Edit Reply", Messages).property(
            PropertySpec::textarea("content", "New message")
                .required()
                .default_value("Updated!"),
        ),
        BlockDefinition::new("action_defer_reply", "Defer Reply", Messages)
            .property(PropertySpec::boolean("ephemeral", "Ephemeral").default_value(false)),
        BlockDefinition::new("action_send_dm", "Direct Message", Messages).property(
            PropertySpec::textarea("content", "Message")
                .required()
                .default_value("Hello!"),
        ),
        BlockDefinition::new("action_react", "Add Reaction", Messages)
            .property(PropertySpec::text("emoji", "Emoji").required().default_value("👍")),
        BlockDefinition::new("action_delete_message", "Delete Message", Messages),
    ]
}

fn components() -> Vec<BlockDefinition> {
    use BlockCategory::Components;
    vec![
        BlockDefinition::new("action_reply_with_button", "Reply With Button", Components)
            .property(PropertySpec::textarea("content", "Message").default_value("Click below"))
            .property(
                PropertySpec::text("custom_id", "Button custom ID")
                    .required()
                    .default_value("button_1"),
            )
            .property(PropertySpec::text("label", "Button label").default_value("Click me"))
            .property(PropertySpec::select("style", "Style", BUTTON_STYLES).default_value("Primary")),
        BlockDefinition::new("action_show_modal", "Show Modal", Components)
            .property(
                PropertySpec::text("custom_id", "Modal custom ID")
                    .required()
                    .default_value("modal_1"),
            )
            .property(PropertySpec::text("title", "Title").default_value("Form"))
            .property(PropertySpec::text("input_label", "Input label").default_value("Your answer")),
    ]
}

fn actions() -> Vec<BlockDefinition> {
    use BlockCategory::Actions;
    vec![
        BlockDefinition::new("action_wait", "Wait", Actions).property(
            PropertySpec::number("duration", "Duration (seconds)")
                .required()
                .default_value(1),
        ),
        BlockDefinition::new("action_log", "Log to Console", Actions)
            .property(PropertySpec::text("message", "Message").default_value("Block executed")),
    ]
}

fn moderation() -> Vec<BlockDefinition> {
    use BlockCategory::Moderation;
    let reason = || PropertySpec::text("reason", "Reason").default_value("No reason provided");
    let on_member = |type_id: &str, label: &str| {
        BlockDefinition::new(type_id, label, Moderation).feature(BlockFeature::TargetMember)
    };
    vec![
        on_member("mod_kick", "Kick Member").property(reason()),
        on_member("mod_ban", "Ban Member")
            .property(reason())
            .property(PropertySpec::number("delete_days", "Delete message history (days)").default_value(0)),
        on_member("mod_timeout", "Timeout Member")
            .property(PropertySpec::number("minutes", "Duration (minutes)").default_value(10))
            .property(reason()),
        on_member("mod_add_role", "Add Role")
            .property(PropertySpec::text("role_id", "Role ID").required()),
        on_member("mod_remove_role", "Remove Role")
            .property(PropertySpec::text("role_id", "Role ID").required()),
        BlockDefinition::new("mod_purge", "Purge Messages", Moderation)
            .property(PropertySpec::number("amount", "Messages to delete").default_value(10)),
    ]
}

fn conditions() -> Vec<BlockDefinition> {
    use BlockCategory::Conditions;
    vec![
        BlockDefinition::new("condition_has_permission", "Has Permission", Conditions)
            .branching()
            .property(
                PropertySpec::select("permission", "Permission", PERMISSIONS)
                    .default_value("Administrator"),
            ),
        BlockDefinition::new("condition_has_role", "Has Role", Conditions)
            .branching()
            .property(PropertySpec::text("role_id", "Role ID").required()),
    ]
}

fn data() -> Vec<BlockDefinition> {
    use BlockCategory::Data;
    let key = || PropertySpec::text("key", "Variable name").required().default_value("counter");
    vec![
        BlockDefinition::new("data_set_variable", "Set Variable", Data)
            .feature(BlockFeature::DataStore)
            .property(key())
            .property(PropertySpec::text("value", "Value")),
        BlockDefinition::new("data_get_variable", "Get Variable", Data)
            .feature(BlockFeature::DataStore)
            .property(key()),
        BlockDefinition::new("data_increment", "Increment Variable", Data)
            .feature(BlockFeature::DataStore)
            .property(key())
            .property(PropertySpec::number("amount", "Amount").default_value(1)),
        BlockDefinition::new("data_delete_variable", "Delete Variable", Data)
            .feature(BlockFeature::DataStore)
            .property(key()),
    ]
}

fn voice() -> Vec<BlockDefinition> {
    use BlockCategory::Voice;
    vec![
        BlockDefinition::new("voice_join", "Join Voice Channel", Voice)
            .feature(BlockFeature::Voice)
            .property(
                PropertySpec::text("channel_id", "Channel ID")
                    .placeholder("Leave empty for the member's channel"),
            ),
        BlockDefinition::new("voice_leave", "Leave Voice Channel", Voice).feature(BlockFeature::Voice),
    ]
}

/// Registers every built-in block definition.
pub(super) fn register_default_blocks(registry: &mut AHashMap<String, BlockDefinition>) {
    let groups = [
        triggers(),
        messages(),
        components(),
        actions(),
        moderation(),
        conditions(),
        data(),
        voice(),
    ];
    for definition in groups.into_iter().flatten() {
        registry.insert(definition.type_id.clone(), definition);
    }
}
