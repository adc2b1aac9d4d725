use crate::backend::{CommandType, ComponentKind, TargetLanguage, TriggerKind};
use crate::emitter::EmittedProgram;
use std::collections::BTreeMap;

/// Renders the README shipped with the project. Contains no credentials; the token
/// line only names the variable the bot reads.
pub(super) fn render(
    language: TargetLanguage,
    program: &EmittedProgram,
    client_id: &str,
    dependencies: &BTreeMap<String, String>,
) -> String {
    let mut out = String::new();
    out.push_str("# Discord Bot\n\n");
    out.push_str(&format!(
        "Generated by botforge for {}. Regenerate it from the canvas instead of editing it by hand.\n\n",
        language
    ));

    out.push_str("## Handlers\n\n");
    if program.triggers.is_empty() {
        out.push_str("This bot has no triggers yet.\n");
    }
    for trigger in &program.triggers {
        let line = match &trigger.kind {
            TriggerKind::SlashCommand {
                name,
                description,
                command_type,
            } => match command_type {
                CommandType::ChatInput => format!("`/{}`: {}", name, description),
                CommandType::User => format!("User context menu `{}`", name),
                CommandType::Message => format!("Message context menu `{}`", name),
            },
            TriggerKind::Component { kind, custom_id } => {
                let what = match kind {
                    ComponentKind::Button => "Button",
                    ComponentKind::SelectMenu => "Select menu",
                    ComponentKind::ModalSubmit => "Modal",
                };
                format!("{} `{}`", what, custom_id)
            }
            TriggerKind::Event { event } => format!("Event `{}`", event),
            TriggerKind::Unknown { block_type } => format!("Unsupported trigger `{}`", block_type),
        };
        out.push_str(&format!("- {}\n", line));
    }
    out.push('\n');

    out.push_str("## Dependencies\n\n");
    for (name, version) in dependencies {
        out.push_str(&format!("- `{}` {}\n", name, version));
    }
    out.push('\n');

    let client_id = if client_id.trim().is_empty() {
        "your-application-id"
    } else {
        client_id
    };

    out.push_str("## Setup\n\n");
    match language {
        TargetLanguage::DiscordJs => {
            out.push_str("1. Install Node.js 18 or newer.\n");
            out.push_str("2. Run `npm install` in this directory.\n");
        }
        TargetLanguage::DiscordPy => {
            out.push_str("1. Install Python 3.10 or newer.\n");
            out.push_str("2. Run `pip install -r requirements.txt` in this directory.\n");
        }
    }
    out.push_str("3. Create a `.env` file next to the entry point:\n\n");
    out.push_str("```\nDISCORD_TOKEN=your-bot-token\n");
    out.push_str(&format!("CLIENT_ID={}\n", client_id));
    out.push_str("```\n\n");

    let run = match language {
        TargetLanguage::DiscordJs => "npm start",
        TargetLanguage::DiscordPy => "python main.py",
    };
    out.push_str(&format!("4. Start the bot with `{}`.\n", run));

    if program.features.voice {
        out.push_str("\nVoice blocks need the FFmpeg binary on the host `PATH`.\n");
    }
    if program.features.data_store {
        out.push_str("\nStored variables live in memory and reset when the bot restarts.\n");
    }
    out
}
