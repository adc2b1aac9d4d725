//! discord.py (2.x) code generation.

use super::{
    format_number, identifier, indent, scaled, single_line, MAX_BAN_DELETE_SECONDS,
    MAX_TIMEOUT_MINUTES, MAX_TIMER_MS, CommandType, ComponentKind, LanguageBackend,
    ProgramContext, TargetLanguage, Trigger, TriggerKind,
};
use crate::catalog::{BlockCatalog, BUTTON_STYLES, PERMISSIONS};
use crate::graph::Block;

const INDENT: usize = 4;

pub struct PythonBackend;

impl PythonBackend {
    fn quote(&self, text: &str) -> String {
        format!("\"{}\"", self.escape(text))
    }

    fn denied(&self, message: &str) -> String {
        format!(
            "    await interaction.response.send_message({}, ephemeral=True)\n    return\n",
            self.quote(message)
        )
    }

    /// `True`/`False` spelling of a boolean.
    fn boolean(&self, value: bool) -> &'static str {
        if value { "True" } else { "False" }
    }

    /// The body prologue binding `user`, the member moderation blocks act on.
    fn unbound_target(&self, program: &ProgramContext<'_>) -> &'static str {
        if program.features.target_member {
            "user = None\n"
        } else {
            ""
        }
    }
}

/// Maps a discord.js event name to its discord.py listener name.
pub fn listener_name(event: &str) -> String {
    match event {
        "ready" => "on_ready".to_string(),
        "messageCreate" => "on_message".to_string(),
        "messageDelete" => "on_message_delete".to_string(),
        "messageReactionAdd" => "on_reaction_add".to_string(),
        "guildMemberAdd" => "on_member_join".to_string(),
        "guildMemberRemove" => "on_member_remove".to_string(),
        other => format!("on_{}", snake_case(other)),
    }
}

/// `ManageMessages` -> `manage_messages`.
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            out.push('_');
        }
    }
    out
}

impl LanguageBackend for PythonBackend {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::DiscordPy
    }

    fn entry_point(&self) -> &'static str {
        "main.py"
    }

    fn noop_body(&self) -> &'static str {
        "pass"
    }

    fn comment(&self, text: &str) -> String {
        format!("# {}\n", single_line(text))
    }

    fn escape(&self, text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                other => escaped.push(other),
            }
        }
        escaped
    }

    fn header(&self, program: &ProgramContext<'_>) -> String {
        let mut code = String::new();
        code.push_str("# Auto-generated by botforge\n");
        code.push_str("# DO NOT EDIT - Changes will be overwritten on the next export\n\n");
        code.push_str("import asyncio\nimport os\nfrom datetime import timedelta\n\n");
        code.push_str("import discord\nfrom discord.ext import commands\nfrom dotenv import load_dotenv\n\n");
        code.push_str("load_dotenv()\n\n");

        code.push_str(&format!(
            "PREFIX = {}\n",
            self.quote(program.settings.prefix_or_default())
        ));
        code.push_str(&format!(
            "CLIENT_ID = os.getenv(\"CLIENT_ID\", {})\n\n",
            self.quote(&program.settings.client_id)
        ));

        code.push_str("intents = discord.Intents.default()\n");
        code.push_str("intents.message_content = True\n");
        code.push_str("intents.members = True\n");
        if program.features.voice {
            code.push_str("intents.voice_states = True\n");
        }
        code.push_str(
            "\nbot = commands.Bot(\n    command_prefix=PREFIX,\n    intents=intents,\n    application_id=int(CLIENT_ID) if CLIENT_ID.isdigit() else None,\n)\n",
        );
        if program.features.data_store {
            code.push_str("data_store = {}\n");
        }

        code.push_str("\n\n@bot.event\nasync def setup_hook():\n    await bot.tree.sync()\n\n\n");
        code.push_str("@bot.listen(\"on_ready\")\nasync def announce_login():\n    print(f\"Logged in as {bot.user}\")\n\n\n");
        code
    }

    fn emit_action(&self, block: &Block, catalog: &BlockCatalog) -> String {
        let text = |key: &str| self.quote(&catalog.resolve_str(block, key));
        let flag = |key: &str| self.boolean(catalog.resolve_bool(block, key));
        let number = |key: &str| catalog.resolve_number(block, key);

        match block.block_type.as_str() {
            "action_reply" => format!(
                "await interaction.response.send_message({}, ephemeral={})\n",
                text("content"),
                flag("ephemeral")
            ),
            "action_send_message" => {
                let channel_id = catalog.resolve_str(block, "channel_id");
                if channel_id.is_empty() {
                    format!("await interaction.channel.send({})\n", text("content"))
                } else {
                    format!(
                        "channel = bot.get_channel(int({}))\nif channel is not None:\n    await channel.send({})\n",
                        self.quote(&channel_id),
                        text("content")
                    )
                }
            }
            "action_send_embed" => format!(
                "embed = discord.Embed(title={}, description={}, color=discord.Color.from_str({}))\nawait interaction.response.send_message(embed=embed, ephemeral={})\n",
                text("title"),
                text("description"),
                text("color"),
                flag("ephemeral")
            ),
            "action_edit_reply" => format!(
                "await interaction.edit_original_response(content={})\n",
                text("content")
            ),
            "action_defer_reply" => format!(
                "await interaction.response.defer(ephemeral={})\n",
                flag("ephemeral")
            ),
            "action_send_dm" => format!("await interaction.user.send({})\n", text("content")),
            "action_react" => format!(
                "if getattr(interaction, \"message\", None) is not None:\n    await interaction.message.add_reaction({})\n",
                text("emoji")
            ),
            "action_delete_message" => {
                "if getattr(interaction, \"message\", None) is not None:\n    await interaction.message.delete()\n"
                    .to_string()
            }
            "action_reply_with_button" => {
                let style = catalog.resolve_str(block, "style");
                let style = if BUTTON_STYLES.contains(&style.as_str()) {
                    style.to_ascii_lowercase()
                } else {
                    "primary".to_string()
                };
                format!(
                    "view = discord.ui.View()\nview.add_item(discord.ui.Button(label={}, custom_id={}, style=discord.ButtonStyle.{}))\nawait interaction.response.send_message({}, view=view)\n",
                    text("label"),
                    text("custom_id"),
                    style,
                    text("content")
                )
            }
            "action_show_modal" => {
                let input_id = format!("{}_input", catalog.resolve_str(block, "custom_id"));
                format!(
                    "modal = discord.ui.Modal(title={}, custom_id={})\nmodal.add_item(discord.ui.TextInput(label={}, custom_id={}))\nawait interaction.response.send_modal(modal)\n",
                    text("title"),
                    text("custom_id"),
                    text("input_label"),
                    self.quote(&input_id)
                )
            }
            // asyncio.sleep takes seconds, the block's own unit.
            "action_wait" => format!(
                "await asyncio.sleep({})\n",
                format_number(scaled(number("duration"), 1.0, MAX_TIMER_MS / 1000.0))
            ),
            "action_log" => format!("print({})\n", text("message")),
            "mod_kick" => format!(
                "if user is not None:\n    await user.kick(reason={})\n",
                text("reason")
            ),
            "mod_ban" => format!(
                "if user is not None:\n    await user.ban(reason={}, delete_message_seconds={})\n",
                text("reason"),
                format_number(scaled(number("delete_days"), 86_400.0, MAX_BAN_DELETE_SECONDS))
            ),
            "mod_timeout" => format!(
                "if user is not None:\n    await user.timeout(timedelta(minutes={}), reason={})\n",
                format_number(scaled(number("minutes"), 1.0, MAX_TIMEOUT_MINUTES)),
                text("reason")
            ),
            "mod_add_role" => format!(
                "if user is not None:\n    await user.add_roles(discord.Object(id=int({})))\n",
                text("role_id")
            ),
            "mod_remove_role" => format!(
                "if user is not None:\n    await user.remove_roles(discord.Object(id=int({})))\n",
                text("role_id")
            ),
            "mod_purge" => format!(
                "await interaction.channel.purge(limit={})\n",
                format_number(number("amount").clamp(1.0, 100.0).trunc())
            ),
            "condition_has_permission" => {
                let permission = catalog.resolve_str(block, "permission");
                let permission = if PERMISSIONS.contains(&permission.as_str()) {
                    snake_case(&permission)
                } else {
                    "administrator".to_string()
                };
                format!(
                    "if not interaction.permissions.{}:\n{}",
                    permission,
                    self.denied("You do not have permission to do that.")
                )
            }
            "condition_has_role" => format!(
                "if not any(str(role.id) == {} for role in getattr(interaction.user, \"roles\", [])):\n{}",
                text("role_id"),
                self.denied("You do not have the required role.")
            ),
            "data_set_variable" => format!("data_store[{}] = {}\n", text("key"), text("value")),
            "data_get_variable" => format!(
                "print({}, data_store.get({}))\n",
                self.quote(&format!("{} =", catalog.resolve_str(block, "key"))),
                text("key")
            ),
            "data_increment" => format!(
                "data_store[{key}] = (data_store.get({key}) or 0) + {}\n",
                format_number(number("amount")),
                key = text("key")
            ),
            "data_delete_variable" => format!("data_store.pop({}, None)\n", text("key")),
            "voice_join" => {
                let channel_id = catalog.resolve_str(block, "channel_id");
                let channel = if channel_id.is_empty() {
                    "getattr(getattr(interaction.user, \"voice\", None), \"channel\", None)"
                        .to_string()
                } else {
                    format!("bot.get_channel(int({}))", self.quote(&channel_id))
                };
                format!(
                    "voice_channel = {}\nif voice_channel is not None:\n    await voice_channel.connect()\n",
                    channel
                )
            }
            "voice_leave" => {
                "if interaction.guild is not None and interaction.guild.voice_client is not None:\n    await interaction.guild.voice_client.disconnect()\n"
                    .to_string()
            }
            other => {
                tracing::warn!("No discord.py rule for block type '{}', emitting a placeholder", other);
                self.comment(&format!("Unknown block type: {}", other))
            }
        }
    }

    fn wrap_trigger(&self, trigger: &Trigger, body: &str, program: &ProgramContext<'_>) -> String {
        let ordinal = trigger.ordinal + 1;
        match &trigger.kind {
            TriggerKind::SlashCommand {
                name,
                description,
                command_type,
            } => {
                let handler = format!("{}_{}", identifier(name), ordinal);
                match command_type {
                    CommandType::ChatInput => {
                        let target = if program.features.target_member {
                            ", user: discord.Member = None"
                        } else {
                            ""
                        };
                        format!(
                            "@bot.tree.command(name={}, description={})\nasync def command_{}(interaction: discord.Interaction{}):\n{}",
                            self.quote(name),
                            self.quote(description),
                            handler,
                            target,
                            indent(body, 1, INDENT)
                        )
                    }
                    CommandType::User => format!(
                        "@bot.tree.context_menu(name={})\nasync def user_menu_{}(interaction: discord.Interaction, user: discord.Member):\n{}",
                        self.quote(name),
                        handler,
                        indent(body, 1, INDENT)
                    ),
                    CommandType::Message => {
                        let target = if program.features.target_member {
                            "user = message.author\n"
                        } else {
                            ""
                        };
                        format!(
                            "@bot.tree.context_menu(name={})\nasync def message_menu_{}(interaction: discord.Interaction, message: discord.Message):\n{}",
                            self.quote(name),
                            handler,
                            indent(&format!("{}{}", target, body), 1, INDENT)
                        )
                    }
                }
            }
            TriggerKind::Component { kind, custom_id } => {
                let (interaction_type, component_check, prefix) = match kind {
                    ComponentKind::Button => {
                        ("component", " or interaction.data.get(\"component_type\") != 2", "button")
                    }
                    ComponentKind::SelectMenu => {
                        ("component", " or interaction.data.get(\"component_type\") != 3", "select")
                    }
                    ComponentKind::ModalSubmit => ("modal_submit", "", "modal"),
                };
                let guard = format!(
                    "if interaction.type != discord.InteractionType.{}{}:\n    return\nif interaction.data.get(\"custom_id\") != {}:\n    return\n",
                    interaction_type,
                    component_check,
                    self.quote(custom_id)
                );
                format!(
                    "@bot.listen(\"on_interaction\")\nasync def on_{}_{}_{}(interaction: discord.Interaction):\n{}",
                    prefix,
                    identifier(custom_id),
                    ordinal,
                    indent(
                        &format!("{}{}{}", guard, self.unbound_target(program), body),
                        1,
                        INDENT
                    )
                )
            }
            TriggerKind::Event { event } => {
                let listener = listener_name(event);
                format!(
                    "@bot.listen({})\nasync def {}_listener_{}(*args):\n{}",
                    self.quote(&listener),
                    listener,
                    ordinal,
                    indent(
                        &format!(
                            "interaction = args[0] if args else None\n{}{}",
                            self.unbound_target(program),
                            body
                        ),
                        1,
                        INDENT
                    )
                )
            }
            TriggerKind::Unknown { block_type } => {
                self.comment(&format!("Unknown trigger type: {}", block_type))
            }
        }
    }

    fn separator(&self) -> &'static str {
        "\n\n"
    }

    fn footer(&self, _program: &ProgramContext<'_>) -> String {
        "bot.run(os.getenv(\"DISCORD_TOKEN\"))\n".to_string()
    }
}
