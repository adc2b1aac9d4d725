//! Common test utilities for building canvases and export requests.
use botforge::prelude::*;

/// A block whose category is taken from the built-in catalog.
#[allow(dead_code)]
pub fn block(id: &str, block_type: &str, y: f64) -> Block {
    let category = BlockCatalog::builtin()
        .lookup(block_type)
        .map(|d| d.category)
        .unwrap_or(BlockCategory::Actions);
    Block::new(id, block_type, category).at(0.0, y)
}

/// A `command_slash` trigger named `name`.
#[allow(dead_code)]
pub fn slash_command(id: &str, name: &str, y: f64) -> Block {
    block(id, "command_slash", y).with_property("name", name)
}

/// Connects the given block ids in sequence: `a -> b -> c`.
#[allow(dead_code)]
pub fn chain(ids: &[&str]) -> Vec<Connection> {
    ids.windows(2)
        .enumerate()
        .map(|(i, pair)| Connection::new(&format!("e{}", i + 1), pair[0], pair[1]))
        .collect()
}

/// `/ping` replying "Pong!".
#[allow(dead_code)]
pub fn ping_pong_canvas() -> Canvas {
    Canvas::new(
        vec![
            slash_command("t1", "ping", 0.0),
            block("a1", "action_reply", 100.0).with_property("content", "Pong!"),
        ],
        chain(&["t1", "a1"]),
    )
}

/// `/kick` that kicks the target member with no permission check in front.
#[allow(dead_code)]
pub fn unguarded_moderation_canvas() -> Canvas {
    Canvas::new(
        vec![
            slash_command("t1", "kick", 0.0),
            block("m1", "mod_kick", 100.0).with_property("reason", "Spam"),
            block("m2", "mod_timeout", 200.0),
        ],
        chain(&["t1", "m1", "m2"]),
    )
}

/// A canvas touching every runtime feature: voice, data store and member targeting.
#[allow(dead_code)]
pub fn feature_rich_canvas() -> Canvas {
    Canvas::new(
        vec![
            slash_command("t1", "party", 0.0),
            block("c1", "condition_has_permission", 50.0).with_property("permission", "KickMembers"),
            block("d1", "data_increment", 100.0).with_property("key", "visits"),
            block("v1", "voice_join", 150.0),
            block("m1", "mod_ban", 200.0).with_property("delete_days", 1),
            block("w1", "action_wait", 250.0).with_property("duration", 2),
        ],
        chain(&["t1", "c1", "d1", "v1", "m1", "w1"]),
    )
}

#[allow(dead_code)]
pub fn settings() -> ExportSettings {
    ExportSettings::new("123456789012345678")
}

#[allow(dead_code)]
pub fn request(canvas: Canvas, language: &str) -> ExportRequest {
    ExportRequest::new(canvas, language, settings())
}

/// Content of the generated entry point for `canvas` in `language`.
#[allow(dead_code)]
pub fn entry_source(canvas: Canvas, language: &str) -> String {
    let result = BotExporter::default()
        .export(&request(canvas, language))
        .expect("export should succeed");
    result
        .entry_point()
        .expect("entry point should exist")
        .content
        .clone()
}
