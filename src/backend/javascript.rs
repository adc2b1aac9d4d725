//! discord.js (v14) code generation.

use super::{
    format_number, indent, scaled, single_line, ComponentKind, LanguageBackend, ProgramContext,
    TargetLanguage, Trigger, TriggerKind, MAX_BAN_DELETE_SECONDS, MAX_TIMEOUT_MINUTES,
    MAX_TIMER_MS,
};
use crate::catalog::{BlockCatalog, BUTTON_STYLES, PERMISSIONS};
use crate::graph::Block;
use itertools::Itertools;

const INDENT: usize = 2;

pub struct JavaScriptBackend;

impl JavaScriptBackend {
    fn quote(&self, text: &str) -> String {
        format!("'{}'", self.escape(text))
    }

    /// Registration payload for every command trigger, one object per line.
    fn command_definitions(&self, program: &ProgramContext<'_>) -> String {
        let user_option = if program.features.target_member {
            ", options: [{ name: 'user', description: 'Target member', type: 6, required: false }]"
        } else {
            ""
        };

        program
            .triggers
            .iter()
            .filter_map(|trigger| match &trigger.kind {
                TriggerKind::SlashCommand {
                    name,
                    description,
                    command_type,
                } => Some(if command_type.api_type() == 1 {
                    format!(
                        "  {{ name: {}, description: {}, type: 1{} }},\n",
                        self.quote(name),
                        self.quote(description),
                        user_option
                    )
                } else {
                    format!(
                        "  {{ name: {}, type: {} }},\n",
                        self.quote(name),
                        command_type.api_type()
                    )
                }),
                _ => None,
            })
            .collect()
    }

    fn denied(&self, message: &str) -> String {
        format!(
            "  await interaction.reply({{ content: {}, ephemeral: true }});\n  return;\n",
            self.quote(message)
        )
    }
}

impl LanguageBackend for JavaScriptBackend {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::DiscordJs
    }

    fn entry_point(&self) -> &'static str {
        "index.js"
    }

    fn noop_body(&self) -> &'static str {
        "// Define logic components..."
    }

    fn comment(&self, text: &str) -> String {
        format!("// {}\n", single_line(text))
    }

    fn escape(&self, text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '\\' => escaped.push_str("\\\\"),
                '\'' => escaped.push_str("\\'"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                '\u{2028}' => escaped.push_str("\\u2028"),
                '\u{2029}' => escaped.push_str("\\u2029"),
                other => escaped.push(other),
            }
        }
        escaped
    }

    fn header(&self, program: &ProgramContext<'_>) -> String {
        let mut code = String::new();
        code.push_str("// Auto-generated by botforge\n");
        code.push_str("// DO NOT EDIT - Changes will be overwritten on the next export\n\n");
        code.push_str("require('dotenv').config();\n\n");
        code.push_str("const {\n");
        for import in [
            "ActionRowBuilder",
            "ButtonBuilder",
            "ButtonStyle",
            "Client",
            "EmbedBuilder",
            "GatewayIntentBits",
            "ModalBuilder",
            "PermissionFlagsBits",
            "REST",
            "Routes",
            "TextInputBuilder",
            "TextInputStyle",
        ] {
            code.push_str(&format!("  {},\n", import));
        }
        code.push_str("} = require('discord.js');\n");
        if program.features.voice {
            code.push_str(
                "const { joinVoiceChannel, getVoiceConnection } = require('@discordjs/voice');\n",
            );
        }
        code.push('\n');

        code.push_str(&format!(
            "const PREFIX = {};\n",
            self.quote(program.settings.prefix_or_default())
        ));
        code.push_str(&format!(
            "const CLIENT_ID = process.env.CLIENT_ID || {};\n\n",
            self.quote(&program.settings.client_id)
        ));

        code.push_str("const client = new Client({\n  intents: [\n");
        let mut intents = vec!["Guilds", "GuildMessages", "MessageContent", "GuildMembers"];
        if program.features.voice {
            intents.push("GuildVoiceStates");
        }
        for intent in intents {
            code.push_str(&format!("    GatewayIntentBits.{},\n", intent));
        }
        code.push_str("  ],\n});\n\n");

        if program.features.data_store {
            code.push_str("const dataStore = new Map();\n\n");
        }
        if program.features.target_member {
            code.push_str("function targetMember(interaction) {\n");
            code.push_str(
                "  return interaction.options?.getMember?.('user') ?? interaction.targetMember ?? null;\n",
            );
            code.push_str("}\n\n");
        }

        code.push_str("const commands = [\n");
        code.push_str(&self.command_definitions(program));
        code.push_str("];\n\n");

        code.push_str("client.once('ready', async () => {\n");
        code.push_str("  console.log(`Logged in as ${client.user.tag}`);\n");
        code.push_str("  if (commands.length === 0) return;\n");
        code.push_str("  const rest = new REST({ version: '10' }).setToken(process.env.DISCORD_TOKEN);\n");
        code.push_str("  await rest.put(Routes.applicationCommands(CLIENT_ID), { body: commands });\n");
        code.push_str("});\n\n");
        code
    }

    fn emit_action(&self, block: &Block, catalog: &BlockCatalog) -> String {
        let text = |key: &str| self.quote(&catalog.resolve_str(block, key));
        let flag = |key: &str| catalog.resolve_bool(block, key);
        let number = |key: &str| catalog.resolve_number(block, key);

        match block.block_type.as_str() {
            "action_reply" => format!(
                "await interaction.reply({{ content: {}, ephemeral: {} }});\n",
                text("content"),
                flag("ephemeral")
            ),
            "action_send_message" => {
                let channel_id = catalog.resolve_str(block, "channel_id");
                if channel_id.is_empty() {
                    format!("await interaction.channel.send({});\n", text("content"))
                } else {
                    format!(
                        "{{\n  const channel = await client.channels.fetch({});\n  await channel.send({});\n}}\n",
                        self.quote(&channel_id),
                        text("content")
                    )
                }
            }
            "action_send_embed" => {
                let mut code = String::from("{\n  const embed = new EmbedBuilder()\n");
                code.push_str(&format!("    .setTitle({})\n", text("title")));
                if !catalog.resolve_str(block, "description").is_empty() {
                    code.push_str(&format!("    .setDescription({})\n", text("description")));
                }
                code.push_str(&format!("    .setColor({});\n", text("color")));
                code.push_str(&format!(
                    "  await interaction.reply({{ embeds: [embed], ephemeral: {} }});\n}}\n",
                    flag("ephemeral")
                ));
                code
            }
            "action_edit_reply" => format!(
                "await interaction.editReply({{ content: {} }});\n",
                text("content")
            ),
            "action_defer_reply" => format!(
                "await interaction.deferReply({{ ephemeral: {} }});\n",
                flag("ephemeral")
            ),
            "action_send_dm" => format!("await interaction.user.send({});\n", text("content")),
            "action_react" => format!("await interaction.message?.react({});\n", text("emoji")),
            "action_delete_message" => "await interaction.message?.delete();\n".to_string(),
            "action_reply_with_button" => {
                let style = catalog.resolve_str(block, "style");
                let style = if BUTTON_STYLES.contains(&style.as_str()) {
                    style
                } else {
                    "Primary".to_string()
                };
                format!(
                    "{{\n  const row = new ActionRowBuilder().addComponents(\n    new ButtonBuilder().setCustomId({}).setLabel({}).setStyle(ButtonStyle.{}),\n  );\n  await interaction.reply({{ content: {}, components: [row] }});\n}}\n",
                    text("custom_id"),
                    text("label"),
                    style,
                    text("content")
                )
            }
            "action_show_modal" => {
                let input_id = format!("{}_input", catalog.resolve_str(block, "custom_id"));
                format!(
                    "{{\n  const modal = new ModalBuilder().setCustomId({}).setTitle({});\n  const input = new TextInputBuilder().setCustomId({}).setLabel({}).setStyle(TextInputStyle.Short);\n  modal.addComponents(new ActionRowBuilder().addComponents(input));\n  await interaction.showModal(modal);\n}}\n",
                    text("custom_id"),
                    text("title"),
                    self.quote(&input_id),
                    text("input_label")
                )
            }
            // Block durations are seconds; setTimeout takes milliseconds.
            "action_wait" => format!(
                "await new Promise((resolve) => setTimeout(resolve, {}));\n",
                format_number(scaled(number("duration"), 1000.0, MAX_TIMER_MS))
            ),
            "action_log" => format!("console.log({});\n", text("message")),
            "mod_kick" => format!(
                "await targetMember(interaction)?.kick({});\n",
                text("reason")
            ),
            "mod_ban" => format!(
                "await targetMember(interaction)?.ban({{ reason: {}, deleteMessageSeconds: {} }});\n",
                text("reason"),
                format_number(scaled(number("delete_days"), 86_400.0, MAX_BAN_DELETE_SECONDS))
            ),
            "mod_timeout" => format!(
                "await targetMember(interaction)?.timeout({}, {});\n",
                format_number(scaled(number("minutes"), 60_000.0, MAX_TIMEOUT_MINUTES * 60_000.0)),
                text("reason")
            ),
            "mod_add_role" => format!(
                "await targetMember(interaction)?.roles.add({});\n",
                text("role_id")
            ),
            "mod_remove_role" => format!(
                "await targetMember(interaction)?.roles.remove({});\n",
                text("role_id")
            ),
            // bulkDelete accepts at most 100 messages per call.
            "mod_purge" => format!(
                "await interaction.channel.bulkDelete({}, true);\n",
                format_number(number("amount").clamp(1.0, 100.0).trunc())
            ),
            "condition_has_permission" => {
                let permission = catalog.resolve_str(block, "permission");
                let permission = if PERMISSIONS.contains(&permission.as_str()) {
                    permission
                } else {
                    "Administrator".to_string()
                };
                format!(
                    "if (!interaction.memberPermissions?.has(PermissionFlagsBits.{})) {{\n{}}}\n",
                    permission,
                    self.denied("You do not have permission to do that.")
                )
            }
            "condition_has_role" => format!(
                "if (!interaction.member?.roles?.cache?.has({})) {{\n{}}}\n",
                text("role_id"),
                self.denied("You do not have the required role.")
            ),
            "data_set_variable" => format!(
                "dataStore.set({}, {});\n",
                text("key"),
                text("value")
            ),
            "data_get_variable" => format!(
                "console.log({}, dataStore.get({}));\n",
                self.quote(&format!("{} =", catalog.resolve_str(block, "key"))),
                text("key")
            ),
            "data_increment" => format!(
                "dataStore.set({key}, (Number(dataStore.get({key})) || 0) + {});\n",
                format_number(number("amount")),
                key = text("key")
            ),
            "data_delete_variable" => format!("dataStore.delete({});\n", text("key")),
            "voice_join" => {
                let channel_id = catalog.resolve_str(block, "channel_id");
                let channel = if channel_id.is_empty() {
                    "interaction.member?.voice?.channelId".to_string()
                } else {
                    self.quote(&channel_id)
                };
                format!(
                    "joinVoiceChannel({{\n  channelId: {},\n  guildId: interaction.guildId,\n  adapterCreator: interaction.guild.voiceAdapterCreator,\n}});\n",
                    channel
                )
            }
            "voice_leave" => "getVoiceConnection(interaction.guildId)?.destroy();\n".to_string(),
            other => {
                tracing::warn!("No discord.js rule for block type '{}', emitting a placeholder", other);
                self.comment(&format!("Unknown block type: {}", other))
            }
        }
    }

    fn wrap_trigger(&self, trigger: &Trigger, body: &str, _program: &ProgramContext<'_>) -> String {
        match &trigger.kind {
            TriggerKind::SlashCommand { name, .. } => {
                let branches = [
                    "isChatInputCommand",
                    "isUserContextMenuCommand",
                    "isMessageContextMenuCommand",
                ]
                .iter()
                .map(|check| format!("if (interaction.{}()) {{\n{}}}", check, indent(body, 1, INDENT)))
                .join(" else ");

                format!(
                    "// Command: {}\nclient.on('interactionCreate', async (interaction) => {{\n  if (interaction.isCommand() && interaction.commandName === {}) {{\n{}  }}\n}});\n",
                    single_line(name),
                    self.quote(name),
                    indent(&format!("{}\n", branches), 2, INDENT)
                )
            }
            TriggerKind::Component { kind, custom_id } => {
                let check = match kind {
                    ComponentKind::Button => "isButton",
                    ComponentKind::SelectMenu => "isStringSelectMenu",
                    ComponentKind::ModalSubmit => "isModalSubmit",
                };
                format!(
                    "client.on('interactionCreate', async (interaction) => {{\n  if (interaction.{}() && interaction.customId === {}) {{\n{}  }}\n}});\n",
                    check,
                    self.quote(custom_id),
                    indent(body, 2, INDENT)
                )
            }
            TriggerKind::Event { event } => format!(
                "client.on({}, async (...args) => {{\n  const interaction = args[0];\n{}}});\n",
                self.quote(event),
                indent(body, 1, INDENT)
            ),
            TriggerKind::Unknown { block_type } => {
                self.comment(&format!("Unknown trigger type: {}", block_type))
            }
        }
    }

    fn footer(&self, _program: &ProgramContext<'_>) -> String {
        "client.login(process.env.DISCORD_TOKEN);\n".to_string()
    }
}
