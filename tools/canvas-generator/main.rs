use botforge::catalog::{BlockCatalog, BlockCategory, BlockDefinition, PropertyKind};
use botforge::graph::{Block, Canvas, Connection};
use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use serde_json::Value;
use std::fs;

/// A CLI tool to generate random canvases for exercising the botforge exporter
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_canvas.json")]
    output: String,

    /// Number of trigger blocks
    #[arg(long, default_value_t = 3)]
    triggers: usize,

    /// The minimum number of actions chained after each trigger
    #[arg(long, default_value_t = 1)]
    min: usize,

    /// The maximum number of actions chained after each trigger
    #[arg(long, default_value_t = 8)]
    max: usize,

    /// Probability of leaving a block with its catalog defaults
    #[arg(long, default_value_t = 0.3)]
    default_ratio: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    let catalog = BlockCatalog::builtin();
    let (triggers, actions): (Vec<&BlockDefinition>, Vec<&BlockDefinition>) = catalog
        .definitions()
        .into_iter()
        .partition(|d| d.category == BlockCategory::Triggers);

    println!(
        "Generating canvas with {} trigger(s), {} to {} actions each...",
        cli.triggers, cli.min, cli.max
    );

    let mut blocks = Vec::new();
    let mut connections = Vec::new();
    let mut y = 0.0;

    for t in 0..cli.triggers {
        let Some(definition) = triggers.choose(&mut rng) else {
            break;
        };
        let trigger_id = format!("trigger_{}", t);
        let x = t as f64 * 400.0;
        blocks.push(random_block(&mut rng, &trigger_id, definition, x, y, cli.default_ratio));
        y += 100.0;

        let mut previous = trigger_id;
        for a in 0..rng.random_range(cli.min..=cli.max) {
            let Some(definition) = actions.choose(&mut rng) else {
                break;
            };
            let block_id = format!("block_{}_{}", t, a);
            blocks.push(random_block(&mut rng, &block_id, definition, x, y, cli.default_ratio));
            connections.push(Connection::new(
                &format!("edge_{}", connections.len()),
                &previous,
                &block_id,
            ));
            previous = block_id;
            y += rng.random_range(60.0..140.0);
        }
    }

    let canvas = Canvas::new(blocks, connections);
    let json_output = serde_json::to_string_pretty(&canvas)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated {} blocks and {} connections to '{}'",
        canvas.blocks.len(),
        canvas.connections.len(),
        cli.output
    );

    Ok(())
}

/// A block of the given type with randomly filled properties.
fn random_block(
    rng: &mut ThreadRng,
    id: &str,
    definition: &BlockDefinition,
    x: f64,
    y: f64,
    default_ratio: f64,
) -> Block {
    let mut block = Block::new(id, &definition.type_id, definition.category).at(x, y);
    if rng.random_bool(default_ratio.clamp(0.0, 1.0)) {
        return block;
    }

    for spec in &definition.properties {
        let value = match spec.kind {
            PropertyKind::Text if spec.key == "name" || spec.key == "custom_id" => {
                Value::from(format!("{}_{}", definition.category, rng.random_range(1..1000)))
            }
            PropertyKind::Text if spec.key.ends_with("_id") => {
                let snowflake = rng.random_range(100_000_000_000_000_000u64..999_999_999_999_999_999);
                Value::from(snowflake.to_string())
            }
            PropertyKind::Text | PropertyKind::Textarea => {
                Value::from(format!("{} {}", spec.label, rng.random_range(1..1000)))
            }
            PropertyKind::Number => Value::from(rng.random_range(1i64..60)),
            PropertyKind::Boolean => Value::from(rng.random_bool(0.5)),
            PropertyKind::Select => match spec.options.choose(rng) {
                Some(option) => Value::from(option.as_str()),
                None => continue,
            },
            PropertyKind::Color => {
                Value::from(format!("#{:06X}", rng.random_range(0u32..0xFF_FFFF)))
            }
        };
        block = block.with_property(&spec.key, value);
    }
    block
}
