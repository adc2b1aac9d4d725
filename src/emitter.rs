//! Program assembly: linearizes each trigger's actions, asks the backend for code and
//! stitches header, handlers and footer into one source file.

use crate::backend::{LanguageBackend, ProgramContext, RuntimeFeatures, Trigger};
use crate::catalog::BlockCatalog;
use crate::exporter::ExportSettings;
use crate::graph::{Block, Canvas};
use crate::linearizer::FlowLinearizer;

/// The generated entry-point source plus the facts the exporter needs about it.
#[derive(Debug, Clone)]
pub struct EmittedProgram {
    pub source: String,
    pub features: RuntimeFeatures,
    pub triggers: Vec<Trigger>,
    /// Block types that fell back to a placeholder comment, in first-seen order.
    pub unknown_block_types: Vec<String>,
}

pub struct CodeEmitter<'a> {
    backend: &'a dyn LanguageBackend,
    catalog: &'a BlockCatalog,
    linearizer: FlowLinearizer,
}

impl<'a> CodeEmitter<'a> {
    pub fn new(
        backend: &'a dyn LanguageBackend,
        catalog: &'a BlockCatalog,
        linearizer: FlowLinearizer,
    ) -> Self {
        Self {
            backend,
            catalog,
            linearizer,
        }
    }

    /// Emits the body for an ordered action list.
    ///
    /// An empty list yields exactly the backend's no-op line.
    pub fn emit_body(&self, actions: &[&Block]) -> String {
        if actions.is_empty() {
            return format!("{}\n", self.backend.noop_body());
        }
        actions
            .iter()
            .map(|block| {
                tracing::debug!("Emitting block {} ({})", block.id, block.block_type);
                self.backend.emit_action(block, self.catalog)
            })
            .collect()
    }

    /// Generates the complete entry-point program for `canvas`.
    pub fn emit_program(&self, canvas: &Canvas, settings: &ExportSettings) -> EmittedProgram {
        let (trigger_blocks, triggers) = self.ordered_triggers(canvas);

        let features = RuntimeFeatures::scan(&canvas.blocks, self.catalog);
        let program = ProgramContext {
            settings,
            features,
            triggers: &triggers,
        };

        let mut source = self.backend.header(&program);

        if triggers.is_empty() {
            source.push_str(&self.backend.comment(
                "No triggers on this canvas. Add a slash command, component or event trigger.",
            ));
            source.push_str(self.backend.separator());
        }

        for (trigger, block) in triggers.iter().zip(&trigger_blocks) {
            let actions = self.linearizer.linearize(canvas, block);
            tracing::debug!(
                "Trigger {} ({}) runs {} action(s)",
                block.id,
                block.block_type,
                actions.len()
            );
            let body = self.emit_body(&actions);
            source.push_str(&self.backend.wrap_trigger(trigger, &body, &program));
            source.push_str(self.backend.separator());
        }

        source.push_str(&self.backend.footer(&program));

        EmittedProgram {
            source,
            features,
            triggers,
            unknown_block_types: self.unknown_block_types(canvas),
        }
    }

    /// Trigger blocks in emission order: slash commands, then component triggers, then
    /// event listeners, each group in document order.
    fn ordered_triggers<'c>(&self, canvas: &'c Canvas) -> (Vec<&'c Block>, Vec<Trigger>) {
        let mut resolved: Vec<(&Block, Trigger)> = canvas
            .triggers()
            .map(|block| (block, Trigger::from_block(block, self.catalog, 0)))
            .collect();
        resolved.sort_by_key(|(_, trigger)| trigger.kind.group());

        resolved
            .into_iter()
            .enumerate()
            .map(|(ordinal, (block, mut trigger))| {
                trigger.ordinal = ordinal;
                (block, trigger)
            })
            .unzip()
    }

    fn unknown_block_types(&self, canvas: &Canvas) -> Vec<String> {
        let mut unknown: Vec<String> = Vec::new();
        for block in &canvas.blocks {
            if !self.catalog.contains(&block.block_type) && !unknown.contains(&block.block_type) {
                unknown.push(block.block_type.clone());
            }
        }
        unknown
    }
}
