//! Export orchestration: turns an [`ExportRequest`] into project files, a preview or a
//! zip archive.

use crate::backend::TargetLanguage;
use crate::catalog::BlockCatalog;
use crate::emitter::CodeEmitter;
use crate::error::ExportError;
use crate::linearizer::{FlowLinearizer, LinearizationPolicy};
use crate::packager;
use crate::validator::{GraphRule, GraphValidator, validate_file};

mod instructions;
mod manifest;
pub mod request;

pub use request::*;

/// Number of lines shown per file by [`BotExporter::export_preview`].
pub const PREVIEW_LINES: usize = 20;

pub struct BotExporter<'a> {
    catalog: &'a BlockCatalog,
    linearizer: FlowLinearizer,
    validator: GraphValidator,
}

pub struct BotExporterBuilder<'a> {
    catalog: &'a BlockCatalog,
    policy: LinearizationPolicy,
    validator: GraphValidator,
}

impl BotExporterBuilder<'static> {
    pub fn new() -> Self {
        Self {
            catalog: BlockCatalog::builtin(),
            policy: LinearizationPolicy::default(),
            validator: GraphValidator::default(),
        }
    }
}

impl Default for BotExporterBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> BotExporterBuilder<'a> {
    /// Replaces the built-in catalog, e.g. to add custom block definitions.
    pub fn with_catalog<'b>(self, catalog: &'b BlockCatalog) -> BotExporterBuilder<'b> {
        BotExporterBuilder {
            catalog,
            policy: self.policy,
            validator: self.validator,
        }
    }

    pub fn with_policy(mut self, policy: LinearizationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Appends a graph rule after the built-in ones.
    pub fn with_rule(mut self, rule: Box<dyn GraphRule>) -> Self {
        self.validator = self.validator.with_rule(rule);
        self
    }

    pub fn build(self) -> BotExporter<'a> {
        BotExporter {
            catalog: self.catalog,
            linearizer: FlowLinearizer::new(self.policy),
            validator: self.validator,
        }
    }
}

impl BotExporter<'static> {
    pub fn builder() -> BotExporterBuilder<'static> {
        BotExporterBuilder::new()
    }
}

impl Default for BotExporter<'static> {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl<'a> BotExporter<'a> {
    pub fn catalog(&self) -> &BlockCatalog {
        self.catalog
    }

    pub fn policy(&self) -> LinearizationPolicy {
        self.linearizer.policy()
    }

    /// Generates the full project for `request`.
    ///
    /// Fails only when the language is not supported. Unknown block types become
    /// placeholder comments and graph findings are advisory.
    pub fn export(&self, request: &ExportRequest) -> Result<ExportResult, ExportError> {
        let language: TargetLanguage = request.language.parse()?;
        let mut canvas = request.canvas.clone();
        self.catalog.classify(&mut canvas);
        let canvas = &canvas;
        tracing::info!(
            "Exporting {} block(s) and {} connection(s) to {} ({:?})",
            canvas.blocks.len(),
            canvas.connections.len(),
            language,
            self.linearizer.policy()
        );

        let backend = language.backend();
        let emitter = CodeEmitter::new(backend.as_ref(), self.catalog, self.linearizer);
        let program = emitter.emit_program(canvas, &request.settings);
        for block_type in &program.unknown_block_types {
            tracing::warn!("No emission rule for block type '{}'; left a placeholder", block_type);
        }
        tracing::info!(
            "Emitted {} handler(s), {} bytes of {}",
            program.triggers.len(),
            program.source.len(),
            backend.entry_point()
        );

        let dependencies = manifest::dependencies(language, program.features);
        let instructions = instructions::render(
            language,
            &program,
            &request.settings.client_id,
            &dependencies,
        );

        let files = vec![
            GeneratedFile::new(backend.entry_point(), program.source),
            manifest::manifest_file(language, &dependencies),
            GeneratedFile::new("README.md", instructions.clone()),
        ];

        let findings = self.validator.validate(canvas, self.catalog);
        tracing::info!("Validation produced {} finding(s)", findings.len());

        Ok(ExportResult {
            files,
            dependencies,
            instructions,
            findings,
        })
    }

    /// Exports and summarizes each file: byte size, first lines and lint issues.
    pub fn export_preview(&self, request: &ExportRequest) -> Result<ExportPreview, ExportError> {
        let result = self.export(request)?;
        let files: Vec<FilePreview> = result
            .files
            .iter()
            .map(|file| FilePreview {
                path: file.path.clone(),
                size: file.content.len(),
                preview: file
                    .content
                    .lines()
                    .take(PREVIEW_LINES)
                    .collect::<Vec<_>>()
                    .join("\n"),
                issues: validate_file(file),
            })
            .collect();

        let issue_count: usize = files.iter().map(|f| f.issues.len()).sum();
        tracing::info!("Preview of {} file(s), {} lint issue(s)", files.len(), issue_count);

        Ok(ExportPreview {
            language: request.language.trim().to_ascii_lowercase(),
            files,
            findings: result.findings,
        })
    }

    /// Exports and packs the project files into a zip archive.
    pub fn export_zip(&self, request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
        let result = self.export(request)?;
        let archive = packager::package(&result.files)?;
        tracing::info!(
            "Packaged {} file(s) into {} bytes",
            result.files.len(),
            archive.len()
        );
        Ok(archive)
    }

    /// [`export`](Self::export) for async hosts. Runs to completion on first poll.
    pub async fn export_async(&self, request: &ExportRequest) -> Result<ExportResult, ExportError> {
        self.export(request)
    }

    /// [`export_zip`](Self::export_zip) for async hosts.
    pub async fn export_zip_async(&self, request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
        self.export_zip(request)
    }
}
