use crate::catalog::BlockCatalog;
use crate::graph::Block;

/// The three kinds of application command a `command_slash` trigger can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    ChatInput,
    User,
    Message,
}

impl CommandType {
    pub fn parse(value: &str) -> Self {
        match value {
            "user" => CommandType::User,
            "message" => CommandType::Message,
            _ => CommandType::ChatInput,
        }
    }

    /// Discord's numeric application command type.
    pub fn api_type(&self) -> u8 {
        match self {
            CommandType::ChatInput => 1,
            CommandType::User => 2,
            CommandType::Message => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Button,
    SelectMenu,
    ModalSubmit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TriggerKind {
    SlashCommand {
        name: String,
        description: String,
        command_type: CommandType,
    },
    Component {
        kind: ComponentKind,
        custom_id: String,
    },
    Event {
        event: String,
    },
    /// A block in the triggers category whose type the emitter has no rule for.
    Unknown {
        block_type: String,
    },
}

impl TriggerKind {
    /// Emission group: slash commands first, then component triggers, then events.
    pub fn group(&self) -> u8 {
        match self {
            TriggerKind::SlashCommand { .. } => 0,
            TriggerKind::Component { .. } => 1,
            TriggerKind::Event { .. } => 2,
            TriggerKind::Unknown { .. } => 3,
        }
    }
}

/// A trigger block resolved against the catalog, ready to be wrapped around a body.
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub block_id: String,
    /// Position in emission order, used to keep generated handler names unique.
    pub ordinal: usize,
    pub kind: TriggerKind,
}

impl Trigger {
    pub fn from_block(block: &Block, catalog: &BlockCatalog, ordinal: usize) -> Self {
        let component = |kind| TriggerKind::Component {
            kind,
            custom_id: catalog.resolve_str(block, "custom_id"),
        };

        let kind = match block.block_type.as_str() {
            "command_slash" => TriggerKind::SlashCommand {
                name: catalog.resolve_str(block, "name"),
                description: catalog.resolve_str(block, "description"),
                command_type: CommandType::parse(&catalog.resolve_str(block, "command_type")),
            },
            "on_button_click" => component(ComponentKind::Button),
            "on_select_menu" => component(ComponentKind::SelectMenu),
            "on_modal_submit" => component(ComponentKind::ModalSubmit),
            "event_listener" => TriggerKind::Event {
                event: catalog.resolve_str(block, "event"),
            },
            other => TriggerKind::Unknown {
                block_type: other.to_string(),
            },
        };

        Self {
            block_id: block.id.clone(),
            ordinal,
            kind,
        }
    }
}
