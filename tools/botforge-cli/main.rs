use botforge::prelude::*;
use clap::{Parser, ValueEnum};
use std::fs;
use std::time::Instant;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LanguageCli {
    #[value(name = "discord.js", alias = "js")]
    DiscordJs,
    #[value(name = "discord.py", alias = "py")]
    DiscordPy,
}

impl LanguageCli {
    fn as_str(self) -> &'static str {
        match self {
            LanguageCli::DiscordJs => TargetLanguage::DiscordJs.as_str(),
            LanguageCli::DiscordPy => TargetLanguage::DiscordPy.as_str(),
        }
    }
}

/// Generates a Discord bot project from a botforge canvas
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the canvas JSON file
    canvas_path: String,

    /// Target language of the generated bot
    #[arg(short, long, value_enum, default_value = "discord.js")]
    language: LanguageCli,

    /// Optional settings JSON file ({"botToken", "clientId", "prefix"})
    #[arg(short, long)]
    settings: Option<String>,

    /// Application (client) ID, overrides the settings file
    #[arg(long)]
    client_id: Option<String>,

    /// Message command prefix, overrides the settings file
    #[arg(long)]
    prefix: Option<String>,

    /// Write the project as a zip archive to this path
    #[arg(short, long)]
    output: Option<String>,

    /// Print the head of each generated file and its lint issues
    #[arg(short, long)]
    preview: bool,

    /// Order actions by following connections instead of by vertical position
    #[arg(long)]
    traverse_connections: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let total_start = Instant::now();

    // --- 1. Input Loading ---
    let canvas_json = fs::read_to_string(&cli.canvas_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read canvas file '{}': {}",
            &cli.canvas_path, e
        ))
    });
    let canvas = Canvas::from_json(&canvas_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid canvas: {}", e)));

    let mut settings = match &cli.settings {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read settings file '{}': {}", path, e))
            });
            serde_json::from_str::<ExportSettings>(&text)
                .unwrap_or_else(|e| exit_with_error(&format!("Invalid settings JSON: {}", e)))
        }
        None => ExportSettings::default(),
    };
    if let Some(client_id) = cli.client_id {
        settings.client_id = client_id;
    }
    if let Some(prefix) = cli.prefix {
        settings.prefix = Some(prefix);
    }

    println!(
        "Loaded canvas with {} blocks and {} connections.",
        canvas.blocks.len(),
        canvas.connections.len()
    );

    // --- 2. Export ---
    let policy = if cli.traverse_connections {
        LinearizationPolicy::ConnectionTraversal
    } else {
        LinearizationPolicy::VerticalPosition
    };
    let exporter = BotExporter::builder().with_policy(policy).build();
    let request = ExportRequest::new(canvas, cli.language.as_str(), settings);

    let export_start = Instant::now();
    let result = exporter
        .export(&request)
        .unwrap_or_else(|e| exit_with_error(&format!("Export failed: {}", e)));
    let export_duration = export_start.elapsed();

    println!("\nGenerated {} files for {}:", result.files.len(), request.language);
    for file in &result.files {
        println!("  - {} ({} bytes)", file.path, file.content.len());
    }
    println!("\nDependencies:");
    for (name, version) in &result.dependencies {
        println!("  - {} {}", name, version);
    }

    // --- 3. Findings ---
    println!("\n--- Graph Findings ---");
    print!("{}", FindingFormatter::format_findings(&result.findings));

    // --- 4. Preview ---
    if cli.preview {
        let preview = exporter
            .export_preview(&request)
            .unwrap_or_else(|e| exit_with_error(&format!("Preview failed: {}", e)));
        println!("\n--- File Preview ---");
        for file in &preview.files {
            println!("{}", FindingFormatter::format_preview(file));
        }
    }

    // --- 5. Packaging ---
    if let Some(output) = &cli.output {
        let archive = package(&result.files)
            .unwrap_or_else(|e| exit_with_error(&format!("Packaging failed: {}", e)));
        fs::write(output, &archive)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", output, e)));
        println!("\nWrote {} bytes to '{}'", archive.len(), output);
    }

    println!("\n--- Performance Summary ---");
    println!("Export:           {:?}", export_duration);
    println!("Total Execution:  {:?}", total_start.elapsed());
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
