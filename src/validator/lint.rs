use crate::exporter::GeneratedFile;

const UNKNOWN_BLOCK_MARKER: &str = "Unknown block type:";

/// Lightweight structural checks on a generated file.
///
/// Returns human-readable issues, empty when the file looks sound. This is not a
/// parser: it catches the mistakes a broken generator would make, such as a missing
/// import, unbalanced brackets or a pasted credential.
pub fn validate_file(file: &GeneratedFile) -> Vec<String> {
    let mut issues = Vec::new();

    if file.path.trim().is_empty() {
        issues.push("File path is empty".to_string());
    }
    if file.content.trim().is_empty() {
        issues.push("File content is empty".to_string());
        return issues;
    }

    match (file.file_name(), file.extension()) {
        ("package.json", _) => check_package_json(&file.content, &mut issues),
        ("requirements.txt", _) => check_requirements(&file.content, &mut issues),
        (_, Some("js" | "mjs" | "cjs")) => check_javascript(&file.content, &mut issues),
        (_, Some("py")) => check_python(&file.content, &mut issues),
        _ => {}
    }

    check_unknown_blocks(&file.content, &mut issues);
    if contains_token_like(&file.content) {
        issues.push("Possible hard-coded bot token; read it from DISCORD_TOKEN instead".to_string());
    }
    issues
}

fn check_javascript(content: &str, issues: &mut Vec<String>) {
    let imports = ["require('discord.js')", "require(\"discord.js\")", "from 'discord.js'"];
    if !imports.iter().any(|i| content.contains(i)) {
        issues.push("Missing discord.js import".to_string());
    }
    if !content.contains("client.login(") {
        issues.push("Missing client.login(...) call".to_string());
    }
    if let Some(issue) = bracket_issue(content) {
        issues.push(issue);
    }
}

/// First bracket mismatch outside string literals and comments.
fn bracket_issue(content: &str) -> Option<String> {
    #[derive(PartialEq)]
    enum State {
        Code,
        Str(char),
        LineComment,
        BlockComment,
    }

    let mut state = State::Code;
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
        }
        match state {
            State::Code => match c {
                '\'' | '"' | '`' => state = State::Str(c),
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                '(' | '[' | '{' => stack.push((c, line)),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match stack.pop() {
                        Some((open, _)) if open == expected => {}
                        Some((open, opened_at)) => {
                            return Some(format!(
                                "Line {}: '{}' closes '{}' opened on line {}",
                                line, c, open, opened_at
                            ));
                        }
                        None => return Some(format!("Line {}: unmatched '{}'", line, c)),
                    }
                }
                _ => {}
            },
            State::Str(quote) => {
                if c == '\\' {
                    if chars.next() == Some('\n') {
                        line += 1;
                    }
                } else if c == quote {
                    state = State::Code;
                } else if c == '\n' && quote != '`' {
                    return Some(format!("Line {}: unterminated string literal", line - 1));
                }
            }
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
        }
    }

    if let State::Str(_) = state {
        return Some("Unterminated string literal at end of file".to_string());
    }
    stack
        .last()
        .map(|(open, opened_at)| format!("Line {}: '{}' is never closed", opened_at, open))
}

fn check_python(content: &str, issues: &mut Vec<String>) {
    let has_import = content
        .lines()
        .any(|l| l.trim_start().starts_with("import discord") || l.trim_start().starts_with("from discord"));
    if !has_import {
        issues.push("Missing discord import".to_string());
    }
    if !content.contains("bot.run(") {
        issues.push("Missing bot.run(...) call".to_string());
    }

    let mut tab_indented = false;
    let mut space_indented = false;
    for (idx, line) in content.lines().enumerate() {
        let leading: String = line.chars().take_while(|c| *c == ' ' || *c == '\t').collect();
        if leading.contains(' ') && leading.contains('\t') {
            issues.push(format!("Line {}: indentation mixes tabs and spaces", idx + 1));
        }
        tab_indented |= leading.starts_with('\t');
        space_indented |= leading.starts_with(' ');
    }
    if tab_indented && space_indented {
        issues.push("File indents some lines with tabs and others with spaces".to_string());
    }

    let code: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .filter(|(_, l)| {
            let trimmed = l.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .collect();
    for pair in code.windows(2) {
        let (idx, line) = pair[0];
        let (_, next) = pair[1];
        if line.trim_end().ends_with(':') && indent_width(next) <= indent_width(line) {
            issues.push(format!("Line {}: expected an indented block after ':'", idx + 1));
        }
    }
    if let Some((idx, last)) = code.last()
        && last.trim_end().ends_with(':')
    {
        issues.push(format!("Line {}: expected an indented block after ':'", idx + 1));
    }
}

fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

fn check_package_json(content: &str, issues: &mut Vec<String>) {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(manifest) => {
            if manifest
                .get("dependencies")
                .and_then(|deps| deps.get("discord.js"))
                .is_none()
            {
                issues.push("package.json does not depend on discord.js".to_string());
            }
        }
        Err(e) => issues.push(format!("package.json is not valid JSON: {}", e)),
    }
}

fn check_requirements(content: &str, issues: &mut Vec<String>) {
    let listed = content.lines().any(|line| {
        let name: String = line
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            .collect();
        name.eq_ignore_ascii_case("discord.py")
    });
    if !listed {
        issues.push("requirements.txt does not list discord.py".to_string());
    }
}

fn check_unknown_blocks(content: &str, issues: &mut Vec<String>) {
    let mut seen: Vec<&str> = Vec::new();
    for line in content.lines() {
        if let Some(idx) = line.find(UNKNOWN_BLOCK_MARKER) {
            let block_type = line[idx + UNKNOWN_BLOCK_MARKER.len()..].trim();
            if !seen.contains(&block_type) {
                seen.push(block_type);
                issues.push(format!("Placeholder left for unknown block type '{}'", block_type));
            }
        }
    }
}

/// Discord bot tokens are three base64url segments joined by dots.
fn contains_token_like(content: &str) -> bool {
    let is_segment_char = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
    content
        .split(|c: char| !(is_segment_char(c) || c == '.'))
        .any(|word| {
            let parts: Vec<&str> = word.split('.').collect();
            parts.len() == 3
                && parts[0].len() >= 20
                && parts[1].len() >= 5
                && parts[2].len() >= 20
                && parts.iter().all(|p| p.chars().all(is_segment_char))
                && parts[0].chars().any(|c| c.is_ascii_digit())
        })
}
