//! Tests for graph heuristics and generated-file lint.
mod common;
use botforge::prelude::*;
use common::*;

fn findings(canvas: &Canvas) -> Vec<Finding> {
    GraphValidator::default().validate(canvas, BlockCatalog::builtin())
}

fn with_rule<'a>(findings: &'a [Finding], rule_id: &str) -> Vec<&'a Finding> {
    findings.iter().filter(|f| f.rule_id == rule_id).collect()
}

#[test]
fn test_default_rules_in_declaration_order() {
    assert_eq!(
        GraphValidator::default().rule_ids(),
        vec![
            "orphaned-block",
            "dead-end-trigger",
            "infinite-loop-self",
            "missing-perm-check",
            "public-reply",
            "hardcoded-channel-id",
            "heavy-db-usage",
        ]
    );
}

#[test]
fn test_clean_graph_has_only_style_note() {
    let all = findings(&ping_pong_canvas());
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].rule_id, "public-reply");
    assert_eq!(all[0].severity, Severity::Low);
    assert_eq!(all[0].category, FindingCategory::Style);
    assert_eq!(all[0].affected_block_ids, vec!["a1"]);
}

#[test]
fn test_ephemeral_reply_is_not_flagged() {
    let canvas = Canvas::new(
        vec![
            slash_command("t1", "ping", 0.0),
            block("a1", "action_reply", 100.0).with_property("ephemeral", true),
        ],
        chain(&["t1", "a1"]),
    );
    assert!(findings(&canvas).is_empty());
}

#[test]
fn test_orphaned_block_one_per_block() {
    let canvas = Canvas::new(
        vec![
            slash_command("t1", "ping", 0.0),
            block("a1", "action_log", 10.0),
            block("lonely", "action_log", 20.0),
            block("alone", "action_wait", 30.0),
        ],
        chain(&["t1", "a1"]),
    );
    let all = findings(&canvas);
    let orphans = with_rule(&all, "orphaned-block");
    assert_eq!(orphans.len(), 2);
    assert_eq!(orphans[0].affected_block_ids, vec!["lonely"]);
    assert_eq!(orphans[1].affected_block_ids, vec!["alone"]);
    assert!(orphans.iter().all(|f| f.severity == Severity::High));
    assert!(orphans.iter().all(|f| f.category == FindingCategory::Logic));
}

#[test]
fn test_dead_end_trigger() {
    let canvas = Canvas::new(
        vec![
            slash_command("t1", "ping", 0.0),
            block("ev", "event_listener", 0.0),
        ],
        vec![],
    );
    let all = findings(&canvas);
    let dead = with_rule(&all, "dead-end-trigger");
    assert_eq!(dead.len(), 2);
    assert_eq!(dead[0].severity, Severity::Medium);
    assert_eq!(dead[1].affected_block_ids, vec!["ev"]);
}

#[test]
fn test_self_loop_is_critical() {
    let mut canvas = ping_pong_canvas();
    canvas.connections.push(Connection::new("loop", "a1", "a1"));

    let all = findings(&canvas);
    let loops = with_rule(&all, "infinite-loop-self");
    assert_eq!(loops.len(), 1);
    assert_eq!(loops[0].severity, Severity::Critical);
    assert_eq!(loops[0].category, FindingCategory::Optimization);
    assert_eq!(loops[0].affected_block_ids, vec!["a1"]);
    assert!(with_rule(&all, "missing-perm-check").is_empty());
}

#[test]
fn test_missing_permission_check_is_critical() {
    let all = findings(&unguarded_moderation_canvas());
    let missing = with_rule(&all, "missing-perm-check");
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].severity, Severity::Critical);
    assert_eq!(missing[0].category, FindingCategory::Security);
    assert_eq!(missing[0].affected_block_ids, vec!["m1", "m2"]);
    assert!(missing[0].fix_suggestion.is_some());
    assert!(with_rule(&all, "infinite-loop-self").is_empty());
}

#[test]
fn test_permission_check_anywhere_satisfies_rule() {
    let mut canvas = unguarded_moderation_canvas();
    canvas
        .blocks
        .push(block("c1", "condition_has_permission", 500.0));
    canvas.connections.push(Connection::new("e9", "m2", "c1"));
    assert!(with_rule(&findings(&canvas), "missing-perm-check").is_empty());
}

#[test]
fn test_hardcoded_channel_id() {
    let canvas = Canvas::new(
        vec![
            slash_command("t1", "announce", 0.0),
            block("s1", "action_send_message", 10.0).with_property("channel_id", "123456789012345678"),
            block("s2", "action_send_message", 20.0).with_property("channel_id", "general"),
            block("s3", "action_send_message", 30.0),
        ],
        chain(&["t1", "s1", "s2", "s3"]),
    );
    let all = findings(&canvas);
    let hardcoded = with_rule(&all, "hardcoded-channel-id");
    assert_eq!(hardcoded.len(), 1);
    assert_eq!(hardcoded[0].affected_block_ids, vec!["s1"]);
    assert_eq!(hardcoded[0].severity, Severity::Medium);
}

#[test]
fn test_heavy_data_usage_above_threshold() {
    let mut blocks = vec![slash_command("t1", "count", 0.0)];
    let mut ids = vec!["t1".to_string()];
    for i in 0..6 {
        let id = format!("d{}", i);
        blocks.push(block(&id, "data_increment", 10.0 * i as f64));
        ids.push(id);
    }
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let canvas = Canvas::new(blocks.clone(), chain(&id_refs));

    let all = findings(&canvas);
    let heavy = with_rule(&all, "heavy-db-usage");
    assert_eq!(heavy.len(), 1);
    assert!(heavy[0].affected_block_ids.is_empty());

    let five = Canvas::new(blocks[..6].to_vec(), chain(&id_refs[..6]));
    assert!(with_rule(&findings(&five), "heavy-db-usage").is_empty());
}

#[test]
fn test_findings_follow_rule_order() {
    let canvas = Canvas::new(
        vec![
            slash_command("t1", "ping", 0.0),
            block("orphan", "mod_kick", 10.0),
            block("r1", "action_reply", 20.0),
        ],
        vec![Connection::new("loop", "r1", "r1")],
    );
    let order: Vec<String> = findings(&canvas).into_iter().map(|f| f.rule_id).collect();
    assert_eq!(
        order,
        vec![
            "orphaned-block",
            "dead-end-trigger",
            "infinite-loop-self",
            "missing-perm-check",
            "public-reply",
        ]
    );
}

struct NoEmbedsRule;

impl GraphRule for NoEmbedsRule {
    fn rule_id(&self) -> &'static str {
        "no-embeds"
    }

    fn check(&self, canvas: &Canvas, _catalog: &BlockCatalog) -> Vec<Finding> {
        canvas
            .blocks
            .iter()
            .filter(|b| b.block_type == "action_send_embed")
            .map(|b| {
                Finding::new(
                    self.rule_id(),
                    "Embed",
                    "Embeds are not allowed here",
                    FindingCategory::Accessibility,
                    Severity::Low,
                )
                .affecting([b.id.as_str()])
            })
            .collect()
    }
}

#[test]
fn test_custom_rule_runs_after_builtins() {
    let canvas = Canvas::new(
        vec![slash_command("t1", "show", 0.0), block("e1", "action_send_embed", 10.0)],
        chain(&["t1", "e1"]),
    );
    let validator = GraphValidator::empty().with_rule(Box::new(NoEmbedsRule));
    let only = validator.validate(&canvas, BlockCatalog::builtin());
    assert_eq!(only.len(), 1);
    assert_eq!(only[0].category, FindingCategory::Accessibility);

    let exporter = BotExporter::builder().with_rule(Box::new(NoEmbedsRule)).build();
    let result = exporter.export(&request(canvas, "discord.js")).unwrap();
    assert_eq!(result.findings.last().unwrap().rule_id, "no-embeds");
}

#[test]
fn test_finding_serializes_camel_case() {
    let all = findings(&unguarded_moderation_canvas());
    let value = serde_json::to_value(&all[0]).unwrap();
    assert!(value.get("ruleId").is_some());
    assert!(value.get("affectedBlockIds").is_some());
    assert_eq!(value["severity"], "critical");
    assert_eq!(value["category"], "security");
}

#[test]
fn test_lint_accepts_generated_project() {
    for language in ["discord.js", "discord.py"] {
        let result = BotExporter::default()
            .export(&request(ping_pong_canvas(), language))
            .unwrap();
        for file in &result.files {
            assert!(validate_file(file).is_empty(), "{}: {:?}", file.path, validate_file(file));
        }
    }
}

#[test]
fn test_lint_empty_file() {
    let issues = validate_file(&GeneratedFile::new("", "   "));
    assert_eq!(issues.len(), 2);
}

#[test]
fn test_lint_javascript_problems() {
    let issues = validate_file(&GeneratedFile::new("index.js", "const x = (1 + [2);\n"));
    assert!(issues.iter().any(|i| i.contains("discord.js import")));
    assert!(issues.iter().any(|i| i.contains("client.login")));
    assert!(issues.iter().any(|i| i.contains("closes '['")));

    let unclosed = validate_file(&GeneratedFile::new(
        "index.js",
        "const { Client } = require('discord.js');\nfunction f() {\n  // } not a brace\n  const s = '}';\nclient.login(process.env.DISCORD_TOKEN);\n",
    ));
    assert_eq!(unclosed, vec!["Line 2: '{' is never closed".to_string()]);
}

#[test]
fn test_lint_python_problems() {
    let source = "import discord\n\nasync def handler():\nreturn 1\n\tx = 1\n  y = 2\n";
    let issues = validate_file(&GeneratedFile::new("main.py", source));
    assert!(issues.iter().any(|i| i.contains("bot.run")));
    assert!(issues.iter().any(|i| i.contains("Line 3: expected an indented block")));
    assert!(issues.iter().any(|i| i.contains("tabs")));
}

#[test]
fn test_lint_manifests() {
    let broken = validate_file(&GeneratedFile::new("package.json", "{ \"name\": "));
    assert!(broken[0].contains("not valid JSON"));

    let no_dep = validate_file(&GeneratedFile::new("package.json", "{ \"dependencies\": {} }"));
    assert_eq!(no_dep, vec!["package.json does not depend on discord.js".to_string()]);

    let reqs = validate_file(&GeneratedFile::new("requirements.txt", "python-dotenv>=1.0\n"));
    assert_eq!(reqs, vec!["requirements.txt does not list discord.py".to_string()]);
}

#[test]
fn test_lint_flags_token_like_strings() {
    let file = GeneratedFile::new(
        "README.md",
        "token: MTA5ODc2NTQzMjEwOTg3NjU0.GhIjKl.abcdefghijklmnopqrstuvwxyz0123456789\n",
    );
    let issues = validate_file(&file);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].contains("hard-coded bot token"));
}

#[test]
fn test_lint_never_panics_on_odd_input() {
    for content in ["\u{0}", "'", "/*", "}}}}", "é:\n", "`${", "\\", "#:\n:"] {
        for path in ["a.js", "a.py", "package.json", "requirements.txt", "x", ".py"] {
            let _ = validate_file(&GeneratedFile::new(path, content));
        }
    }
}
