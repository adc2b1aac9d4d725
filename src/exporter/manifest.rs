use super::request::GeneratedFile;
use crate::backend::{RuntimeFeatures, TargetLanguage};
use serde_json::json;
use std::collections::BTreeMap;

const JS_BASE: &[(&str, &str)] = &[("discord.js", "^14.14.1"), ("dotenv", "^16.4.5")];
const JS_VOICE: &[(&str, &str)] = &[
    ("@discordjs/voice", "^0.16.1"),
    ("libsodium-wrappers", "^0.7.13"),
];

const PY_BASE: &[(&str, &str)] = &[("discord.py", ">=2.3.2"), ("python-dotenv", ">=1.0.0")];
const PY_VOICE: &[(&str, &str)] = &[("PyNaCl", ">=1.5.0")];

/// Third-party packages the generated program imports.
pub(super) fn dependencies(
    language: TargetLanguage,
    features: RuntimeFeatures,
) -> BTreeMap<String, String> {
    let (base, voice) = match language {
        TargetLanguage::DiscordJs => (JS_BASE, JS_VOICE),
        TargetLanguage::DiscordPy => (PY_BASE, PY_VOICE),
    };

    let mut deps = BTreeMap::new();
    let extra: &[(&str, &str)] = if features.voice { voice } else { &[] };
    for (name, version) in base.iter().chain(extra) {
        deps.insert(name.to_string(), version.to_string());
    }
    deps
}

/// The package manifest for `language`: `package.json` or `requirements.txt`.
pub(super) fn manifest_file(
    language: TargetLanguage,
    dependencies: &BTreeMap<String, String>,
) -> GeneratedFile {
    match language {
        TargetLanguage::DiscordJs => GeneratedFile::new("package.json", package_json(dependencies)),
        TargetLanguage::DiscordPy => {
            GeneratedFile::new("requirements.txt", requirements_txt(dependencies))
        }
    }
}

fn package_json(dependencies: &BTreeMap<String, String>) -> String {
    let manifest = json!({
        "name": "discord-bot",
        "version": "1.0.0",
        "private": true,
        "description": "Discord bot generated by botforge",
        "main": "index.js",
        "scripts": { "start": "node index.js" },
        "engines": { "node": ">=18" },
        "dependencies": dependencies,
    });
    format!("{:#}\n", manifest)
}

fn requirements_txt(dependencies: &BTreeMap<String, String>) -> String {
    dependencies
        .iter()
        .map(|(name, version)| format!("{}{}\n", name, version))
        .collect()
}
