//! Advisory checks over the canvas graph and over generated files.
//!
//! Graph rules look for structural problems (orphans, self-loops) and risky
//! patterns (moderation without a permission check). They never block an export.

use crate::catalog::BlockCatalog;
use crate::graph::Canvas;
use serde::Serialize;
use std::fmt;

mod lint;
pub mod rules;

pub use lint::validate_file;
use rules::register_default_rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingCategory {
    Optimization,
    Security,
    Logic,
    Style,
    Accessibility,
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FindingCategory::Optimization => "optimization",
            FindingCategory::Security => "security",
            FindingCategory::Logic => "logic",
            FindingCategory::Style => "style",
            FindingCategory::Accessibility => "accessibility",
        };
        f.write_str(name)
    }
}

/// One advisory result of a graph rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub rule_id: String,
    pub title: String,
    pub description: String,
    pub category: FindingCategory,
    pub severity: Severity,
    pub affected_block_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_suggestion: Option<String>,
}

impl Finding {
    pub fn new(
        rule_id: &str,
        title: &str,
        description: impl Into<String>,
        category: FindingCategory,
        severity: Severity,
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            title: title.to_string(),
            description: description.into(),
            category,
            severity,
            affected_block_ids: Vec::new(),
            fix_suggestion: None,
        }
    }

    pub fn affecting<I, S>(mut self, block_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.affected_block_ids = block_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fix(mut self, suggestion: &str) -> Self {
        self.fix_suggestion = Some(suggestion.to_string());
        self
    }
}

/// A single graph heuristic.
///
/// Rules see the whole canvas plus the catalog used for the export and return their
/// findings in block order.
pub trait GraphRule: Send + Sync {
    fn rule_id(&self) -> &'static str;
    fn check(&self, canvas: &Canvas, catalog: &BlockCatalog) -> Vec<Finding>;
}

/// Runs its rules in registration order.
pub struct GraphValidator {
    rules: Vec<Box<dyn GraphRule>>,
}

impl GraphValidator {
    /// A validator with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: Box<dyn GraphRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.rule_id()).collect()
    }

    pub fn validate(&self, canvas: &Canvas, catalog: &BlockCatalog) -> Vec<Finding> {
        self.rules
            .iter()
            .flat_map(|rule| {
                let findings = rule.check(canvas, catalog);
                if !findings.is_empty() {
                    tracing::debug!("Rule {} reported {} finding(s)", rule.rule_id(), findings.len());
                }
                findings
            })
            .collect()
    }
}

impl Default for GraphValidator {
    fn default() -> Self {
        let mut rules: Vec<Box<dyn GraphRule>> = Vec::new();
        register_default_rules(&mut rules);
        Self { rules }
    }
}
