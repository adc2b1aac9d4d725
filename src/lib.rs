//! # botforge - Discord Bot Project Generator
//!
//! **botforge** turns a visual graph of blocks (triggers, actions, conditions) into a
//! ready-to-run Discord bot project for either discord.js or discord.py. The graph is
//! linearized per trigger, emitted by a language backend, checked by advisory graph
//! rules and optionally packed into a zip archive.
//!
//! ## Core Workflow
//!
//! 1.  **Load a canvas**: Parse the editor's JSON with [`graph::Canvas::from_json`], or
//!     implement [`graph::IntoCanvas`] for your own graph format.
//! 2.  **Describe the export**: Build an [`exporter::ExportRequest`] with the target
//!     language name and the bot settings.
//! 3.  **Export**: Use `BotExporter::builder()` to pick the catalog and ordering policy,
//!     then call `export`, `export_preview` or `export_zip`.
//! 4.  **Review**: Inspect the returned findings; they never block the export.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use botforge::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let canvas = Canvas::new(
//!         vec![
//!             Block::new("t1", "command_slash", BlockCategory::Triggers)
//!                 .at(0.0, 0.0)
//!                 .with_property("name", "ping"),
//!             Block::new("a1", "action_reply", BlockCategory::Messages)
//!                 .at(0.0, 100.0)
//!                 .with_property("content", "Pong!"),
//!         ],
//!         vec![Connection::new("e1", "t1", "a1")],
//!     );
//!     let request = ExportRequest::new(canvas, "discord.js", ExportSettings::new("123456"));
//!
//!     let exporter = BotExporter::builder().build();
//!     let result = exporter.export(&request)?;
//!     for file in &result.files {
//!         println!("{} ({} bytes)", file.path, file.content.len());
//!     }
//!     print!("{}", FindingFormatter::format_findings(&result.findings));
//!
//!     let archive = exporter.export_zip(&request)?;
//!     std::fs::write("bot.zip", archive)?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod catalog;
pub mod emitter;
pub mod error;
pub mod exporter;
pub mod graph;
pub mod linearizer;
pub mod packager;
pub mod prelude;
pub mod report;
pub mod validator;
