use crate::exporter::FilePreview;
use crate::validator::{Finding, Severity};

/// Formats validation findings and file previews into human-readable text
pub struct FindingFormatter;

impl FindingFormatter {
    /// One finding as a headline plus indented detail lines.
    pub fn format_finding(finding: &Finding) -> String {
        let mut out = format!(
            "{} {} ({}): {}\n    {}\n",
            Self::marker(finding.severity),
            finding.rule_id,
            finding.category,
            finding.title,
            finding.description
        );
        if !finding.affected_block_ids.is_empty() {
            out.push_str(&format!(
                "    blocks: {}\n",
                finding.affected_block_ids.join(", ")
            ));
        }
        if let Some(fix) = &finding.fix_suggestion {
            out.push_str(&format!("    fix: {}\n", fix));
        }
        out
    }

    /// All findings, most severe first, followed by a count summary.
    pub fn format_findings(findings: &[Finding]) -> String {
        if findings.is_empty() {
            return "No findings.\n".to_string();
        }

        let mut sorted: Vec<&Finding> = findings.iter().collect();
        // Stable, so findings of equal severity keep rule order.
        sorted.sort_by(|a, b| b.severity.cmp(&a.severity));

        let mut out: String = sorted.into_iter().map(Self::format_finding).collect();
        out.push_str(&Self::summary(findings));
        out.push('\n');
        out
    }

    /// e.g. `3 findings (1 critical, 2 medium)`.
    pub fn summary(findings: &[Finding]) -> String {
        let levels = [
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
        ];
        let counts: Vec<String> = levels
            .iter()
            .filter_map(|level| {
                let n = findings.iter().filter(|f| f.severity == *level).count();
                (n > 0).then(|| format!("{} {}", n, level))
            })
            .collect();

        let noun = if findings.len() == 1 { "finding" } else { "findings" };
        if counts.is_empty() {
            format!("{} {}", findings.len(), noun)
        } else {
            format!("{} {} ({})", findings.len(), noun, counts.join(", "))
        }
    }

    /// A file preview with its lint issues.
    pub fn format_preview(file: &FilePreview) -> String {
        let mut out = format!("== {} ({} bytes) ==\n{}\n", file.path, file.size, file.preview);
        for issue in &file.issues {
            out.push_str(&format!("  ! {}\n", issue));
        }
        out
    }

    fn marker(severity: Severity) -> &'static str {
        match severity {
            Severity::Critical => "[CRITICAL]",
            Severity::High => "[HIGH]",
            Severity::Medium => "[MEDIUM]",
            Severity::Low => "[LOW]",
        }
    }
}
