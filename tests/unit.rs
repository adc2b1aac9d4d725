//! Unit tests for core botforge types.
mod common;
use botforge::backend::{CommandType, Trigger, TriggerKind};
use botforge::prelude::*;
use common::*;

#[test]
fn test_target_language_parsing() {
    assert_eq!("discord.js".parse::<TargetLanguage>().unwrap(), TargetLanguage::DiscordJs);
    assert_eq!(" DISCORD.PY\n".parse::<TargetLanguage>().unwrap(), TargetLanguage::DiscordPy);
    assert!("javascript".parse::<TargetLanguage>().is_err());
    assert!("".parse::<TargetLanguage>().is_err());
}

#[test]
fn test_target_language_display_and_backend() {
    assert_eq!(format!("{}", TargetLanguage::DiscordJs), "discord.js");
    assert_eq!(format!("{}", TargetLanguage::DiscordPy), "discord.py");
    assert_eq!(TargetLanguage::DiscordJs.backend().entry_point(), "index.js");
    assert_eq!(TargetLanguage::DiscordPy.backend().entry_point(), "main.py");
    assert_eq!(
        TargetLanguage::DiscordPy.backend().language(),
        TargetLanguage::DiscordPy
    );
}

#[test]
fn test_error_messages() {
    let err = ExportError::UnsupportedLanguage("discord.rb".to_string());
    assert_eq!(
        err.to_string(),
        "Unsupported target language 'discord.rb' (expected 'discord.js' or 'discord.py')"
    );

    let io = PackagingError::Io {
        path: "index.js".to_string(),
        source: std::io::Error::other("disk full"),
    };
    let wrapped: ExportError = io.into();
    assert!(wrapped.to_string().starts_with("Code was generated, but packaging it failed"));
    assert!(wrapped.to_string().contains("index.js"));

    let parse = Canvas::from_json("not json").unwrap_err();
    assert!(parse.to_string().starts_with("Failed to parse canvas JSON"));
}

#[test]
fn test_severity_ordering_and_display() {
    assert!(Severity::Critical > Severity::High);
    assert!(Severity::High > Severity::Medium);
    assert!(Severity::Medium > Severity::Low);
    assert_eq!(Severity::Critical.to_string(), "critical");
    assert_eq!(FindingCategory::Accessibility.to_string(), "accessibility");
}

#[test]
fn test_generated_file_name_and_extension() {
    let nested = GeneratedFile::new("src/commands/ping.js", "x");
    assert_eq!(nested.file_name(), "ping.js");
    assert_eq!(nested.extension(), Some("js"));

    let bare = GeneratedFile::new("Procfile", "x");
    assert_eq!(bare.file_name(), "Procfile");
    assert_eq!(bare.extension(), None);
}

#[test]
fn test_command_type_parsing() {
    assert_eq!(CommandType::parse("user").api_type(), 2);
    assert_eq!(CommandType::parse("message").api_type(), 3);
    assert_eq!(CommandType::parse("slash"), CommandType::ChatInput);
    assert_eq!(CommandType::parse("").api_type(), 1);
}

#[test]
fn test_trigger_from_block() {
    let catalog = BlockCatalog::builtin();
    let slash = Trigger::from_block(&slash_command("t1", "ping", 0.0), catalog, 0);
    assert_eq!(
        slash.kind,
        TriggerKind::SlashCommand {
            name: "ping".to_string(),
            description: "A custom command".to_string(),
            command_type: CommandType::ChatInput,
        }
    );

    let event = Trigger::from_block(&block("e", "event_listener", 0.0), catalog, 3);
    assert_eq!(event.ordinal, 3);
    assert_eq!(event.kind, TriggerKind::Event { event: "ready".to_string() });

    let odd = Block::new("o", "on_reaction_add", BlockCategory::Triggers);
    let unknown = Trigger::from_block(&odd, catalog, 0);
    assert_eq!(unknown.kind.group(), 3);
}

#[test]
fn test_finding_builder() {
    let finding = Finding::new("r", "Title", "Desc", FindingCategory::Logic, Severity::High)
        .affecting(vec!["a".to_string(), "b".to_string()])
        .with_fix("Do it");
    assert_eq!(finding.affected_block_ids, vec!["a", "b"]);
    assert_eq!(finding.fix_suggestion.as_deref(), Some("Do it"));

    let json = serde_json::to_value(Finding::new(
        "r",
        "Title",
        "Desc",
        FindingCategory::Style,
        Severity::Low,
    ))
    .unwrap();
    assert!(json.get("fixSuggestion").is_none());
}

#[test]
fn test_format_finding() {
    let finding = Finding::new(
        "missing-perm-check",
        "Moderation without permission check",
        "Anyone can kick.",
        FindingCategory::Security,
        Severity::Critical,
    )
    .affecting(["m1", "m2"])
    .with_fix("Add a check.");

    assert_eq!(
        FindingFormatter::format_finding(&finding),
        "[CRITICAL] missing-perm-check (security): Moderation without permission check\n    \
         Anyone can kick.\n    blocks: m1, m2\n    fix: Add a check.\n"
    );
}

#[test]
fn test_format_findings_sorted_with_summary() {
    let low = Finding::new("public-reply", "Public", "d", FindingCategory::Style, Severity::Low);
    let critical = Finding::new("infinite-loop-self", "Loop", "d", FindingCategory::Optimization, Severity::Critical);
    let medium = Finding::new("dead-end-trigger", "Dead", "d", FindingCategory::Logic, Severity::Medium);
    let findings = vec![low, critical, medium.clone(), medium];

    let text = FindingFormatter::format_findings(&findings);
    let first = text.find("[CRITICAL]").unwrap();
    let second = text.find("[MEDIUM]").unwrap();
    let last = text.find("[LOW]").unwrap();
    assert!(first < second && second < last);
    assert!(text.ends_with("4 findings (1 critical, 2 medium, 1 low)\n"));

    assert_eq!(FindingFormatter::format_findings(&[]), "No findings.\n");
    assert_eq!(FindingFormatter::summary(&findings[..1]), "1 finding (1 low)");
}

#[test]
fn test_format_preview() {
    let preview = FilePreview {
        path: "main.py".to_string(),
        size: 42,
        preview: "import discord".to_string(),
        issues: vec!["Missing bot.run(...) call".to_string()],
    };
    assert_eq!(
        FindingFormatter::format_preview(&preview),
        "== main.py (42 bytes) ==\nimport discord\n  ! Missing bot.run(...) call\n"
    );
}

#[test]
fn test_python_listener_names() {
    for (event, listener) in [
        ("messageCreate", "on_message"),
        ("guildMemberAdd", "on_member_join"),
        ("messageDelete", "on_message_delete"),
    ] {
        let canvas = Canvas::new(
            vec![block("ev", "event_listener", 0.0).with_property("event", event)],
            vec![],
        );
        let py = entry_source(canvas, "discord.py");
        assert!(py.contains(&format!("@bot.listen(\"{}\")", listener)), "{}", event);
    }
}
