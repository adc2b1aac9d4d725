use crate::catalog::{BlockCatalog, BlockFeature};
use crate::error::ExportError;
use crate::exporter::ExportSettings;
use crate::graph::Block;
use std::fmt;
use std::str::FromStr;

mod javascript;
mod python;
pub mod trigger;

pub use javascript::JavaScriptBackend;
pub use python::PythonBackend;
pub use trigger::*;

/// Program-wide facts a backend needs to write its header and wrappers.
#[derive(Debug, Clone, Copy)]
pub struct ProgramContext<'a> {
    pub settings: &'a ExportSettings,
    pub features: RuntimeFeatures,
    pub triggers: &'a [Trigger],
}

/// Optional runtime pieces the generated program has to set up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeFeatures {
    pub voice: bool,
    pub data_store: bool,
    pub target_member: bool,
}

impl RuntimeFeatures {
    /// Collects the features declared by the catalog definitions of `blocks`.
    pub fn scan<'a>(blocks: impl IntoIterator<Item = &'a Block>, catalog: &BlockCatalog) -> Self {
        let mut features = Self::default();
        for definition in blocks
            .into_iter()
            .filter_map(|b| catalog.lookup(&b.block_type))
        {
            features.voice |= definition.has_feature(BlockFeature::Voice);
            features.data_store |= definition.has_feature(BlockFeature::DataStore);
            features.target_member |= definition.has_feature(BlockFeature::TargetMember);
        }
        features
    }
}

/// A code-generation strategy for one target language.
///
/// Adding a target language means implementing this trait; the emitter and exporter
/// never branch on the language themselves.
pub trait LanguageBackend: Send + Sync {
    fn language(&self) -> TargetLanguage;

    /// Path of the program file inside the exported project.
    fn entry_point(&self) -> &'static str;

    /// The single line used as the handler body when a trigger has no actions.
    fn noop_body(&self) -> &'static str;

    fn comment(&self, text: &str) -> String;

    /// Escapes `text` for use inside the backend's string literals.
    fn escape(&self, text: &str) -> String;

    /// Imports, client construction and shared helpers.
    fn header(&self, program: &ProgramContext<'_>) -> String;

    /// Statements for one action block, unindented and newline-terminated.
    fn emit_action(&self, block: &Block, catalog: &BlockCatalog) -> String;

    /// Wraps an already-emitted body in the trigger's handler.
    fn wrap_trigger(&self, trigger: &Trigger, body: &str, program: &ProgramContext<'_>) -> String;

    /// Login/run call, reading the credential from the environment.
    fn footer(&self, program: &ProgramContext<'_>) -> String;

    /// Blank lines placed between top-level handlers.
    fn separator(&self) -> &'static str {
        "\n"
    }
}

/// The supported export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetLanguage {
    DiscordJs,
    DiscordPy,
}

impl TargetLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::DiscordJs => "discord.js",
            TargetLanguage::DiscordPy => "discord.py",
        }
    }

    pub fn backend(&self) -> Box<dyn LanguageBackend> {
        match self {
            TargetLanguage::DiscordJs => Box::new(JavaScriptBackend),
            TargetLanguage::DiscordPy => Box::new(PythonBackend),
        }
    }
}

impl FromStr for TargetLanguage {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discord.js" => Ok(TargetLanguage::DiscordJs),
            "discord.py" => Ok(TargetLanguage::DiscordPy),
            _ => Err(ExportError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Prefixes every non-empty line of `text` with `levels * width` spaces.
pub(crate) fn indent(text: &str, levels: usize, width: usize) -> String {
    let pad = " ".repeat(levels * width);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                "\n".to_string()
            } else {
                format!("{}{}\n", pad, line)
            }
        })
        .collect()
}

/// Longest delay `setTimeout` honours, in milliseconds.
pub(crate) const MAX_TIMER_MS: f64 = 2_147_483_647.0;

/// Discord times members out for at most 28 days.
pub(crate) const MAX_TIMEOUT_MINUTES: f64 = 40_320.0;

/// Discord deletes at most 7 days of messages when banning.
pub(crate) const MAX_BAN_DELETE_SECONDS: f64 = 604_800.0;

/// Converts a block quantity into another unit, bounded to `0..=max`.
///
/// The bound applies to the product, so huge inputs saturate at `max` instead of
/// overflowing to infinity.
pub(crate) fn scaled(value: f64, factor: f64, max: f64) -> f64 {
    (value.max(0.0) * factor).min(max)
}

/// Renders whole numbers without a fractional part. Non-finite values render as `0`.
pub(crate) fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Lowercase identifier made of ASCII alphanumerics and underscores.
pub(crate) fn identifier(raw: &str) -> String {
    let mut ident: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Makes a comment payload single-line.
pub(crate) fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}
