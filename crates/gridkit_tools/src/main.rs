//! Synthetic dataset generator for exercising the grid with many rows.
//!
//! Writes a JSON dataset with the same column set as the built-in demo, so
//! the output can be opened directly with `GRIDKIT_DATASET`.
//!
//! # Usage
//!
//! ```bash
//! # 500 rows (default) into deals.json
//! cargo run -p gridkit_tools --bin generate-dataset
//!
//! # 10k rows, reproducible
//! cargo run -p gridkit_tools --bin generate-dataset -- --rows 10000 --seed 7 --output /tmp/big.json
//! ```

use clap::Parser;
use gridkit_core::dataset::{stage_options, tag_options};
use gridkit_core::models::RowRecord;
use gridkit_core::{Dataset, SelectOption};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Instant;

/// Synthetic dataset generator for the grid.
#[derive(Parser)]
#[command(
    name = "generate-dataset",
    about = "Generate a synthetic JSON dataset for gridkit"
)]
struct Args {
    /// Number of rows to generate
    #[arg(short, long, default_value = "500")]
    rows: usize,

    /// Output file
    #[arg(short, long, env = "GRIDKIT_DATASET", default_value = "deals.json")]
    output: PathBuf,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of rows whose notes are left empty
    #[arg(long, default_value_t = 0.25)]
    empty_notes: f64,
}

const COMPANY_PREFIXES: &[&str] = &[
    "Acme", "Globex", "Initech", "Umbrella", "Stark", "Wayne", "Hooli", "Vandelay", "Soylent",
    "Tyrell", "Cyberdyne", "Wonka", "Aperture", "Massive", "Oscorp", "Nakatomi",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Corp", "Labs", "Logistics", "Health", "Systems", "Foods", "Imports", "Industries",
];

const OWNERS: &[(&str, &str)] = &[
    ("Avery Chen", "avery@example.com"),
    ("Jordan Patel", "jordan@example.com"),
    ("Sam Okafor", "sam@example.com"),
    ("Riley Novak", "riley@example.com"),
    ("Morgan Silva", "morgan@example.com"),
    ("Casey Ito", "casey@example.com"),
];

const NOTES: &[&str] = &[
    "Follow up next week",
    "Waiting on legal review",
    "Budget approved",
    "Needs pricing update",
    "Champion changed roles",
    "Send case study",
];

fn pick<'a, T: ?Sized>(rng: &mut impl Rng, items: &'a [&'a T], fallback: &'a T) -> &'a T {
    items.choose(rng).copied().unwrap_or(fallback)
}

fn enabled_values(options: &[SelectOption]) -> Vec<Value> {
    options
        .iter()
        .filter(|option| !option.disabled)
        .map(|option| option.value.clone())
        .collect()
}

/// Builds one row matching the demo column set.
fn generate_row(rng: &mut impl Rng, index: usize, empty_notes: f64) -> RowRecord {
    let stages = enabled_values(&stage_options());
    let tags = enabled_values(&tag_options());
    let (owner, email) = OWNERS.choose(rng).copied().unwrap_or(OWNERS[0]);

    let tag_count = rng.gen_range(0..=3);
    let row_tags: Vec<Value> = tags.choose_multiple(rng, tag_count).cloned().collect();
    let notes = if rng.gen_bool(empty_notes.clamp(0.0, 1.0)) {
        Value::Null
    } else {
        json!(pick(rng, NOTES, "Follow up"))
    };

    let value = json!({
        "_id": format!("deal-{:05}", index + 1),
        "name": format!(
            "{} {}",
            pick(rng, COMPANY_PREFIXES, "Acme"),
            pick(rng, COMPANY_SUFFIXES, "Corp")
        ),
        "user": { "name": owner, "email": email },
        "amount": rng.gen_range(500..500_000),
        "stage": stages.choose(rng).cloned().unwrap_or(Value::Null),
        "probability": rng.gen_range(0..=100),
        "close_date": format!("2025-{:02}-{:02}", rng.gen_range(1..=12), rng.gen_range(1..=28)),
        "tags": row_tags,
        "active": rng.gen_bool(0.8),
        "notes": notes,
    });
    RowRecord::from_value(value).unwrap_or_default()
}

fn generate_dataset(rng: &mut impl Rng, rows: usize, empty_notes: f64) -> Dataset {
    let rows = (0..rows)
        .map(|index| generate_row(rng, index, empty_notes))
        .collect();
    Dataset {
        detail_field: Some("name".to_string()),
        ..Dataset::new(Dataset::demo_columns(), rows)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("Generating {} rows...", args.rows);
    let start = Instant::now();
    let dataset = generate_dataset(&mut rng, args.rows, args.empty_notes);
    dataset.validate()?;
    dataset.save(&args.output)?;

    let elapsed = start.elapsed();
    println!("\nGeneration complete:");
    println!("  Rows:    {}", dataset.rows.len());
    println!("  Columns: {}", dataset.columns.len());
    println!("  Time:    {:.2}s", elapsed.as_secs_f64());
    println!("\nDataset path: {}", args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn seeded_generation_is_reproducible() {
        let first = generate_dataset(&mut StdRng::seed_from_u64(42), 20, 0.25);
        let second = generate_dataset(&mut StdRng::seed_from_u64(42), 20, 0.25);
        assert_eq!(first, second);
    }

    #[test]
    fn generated_rows_match_demo_columns_and_validate() {
        let dataset = generate_dataset(&mut StdRng::seed_from_u64(1), 50, 0.0);
        dataset.validate().expect("valid dataset");
        assert_eq!(dataset.columns, Dataset::demo_columns());
        for (index, row) in dataset.rows.iter().enumerate() {
            assert_eq!(
                row.id(&dataset.id_field),
                Some(format!("deal-{:05}", index + 1))
            );
            assert!(row.value_at("notes").is_string());
            assert_ne!(row.value_at("stage"), json!("archived"));
            let probability = row.value_at("probability").as_i64().expect("probability");
            assert!((0..=100).contains(&probability));
        }
    }

    #[test]
    fn generated_dataset_loads_back_from_disk() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("generated.json");
        let dataset = generate_dataset(&mut StdRng::seed_from_u64(9), 12, 1.0);
        dataset.save(&path).expect("save");

        let loaded = Dataset::load(&path).expect("load");
        assert_eq!(loaded.rows.len(), 12);
        assert_eq!(loaded.detail_field.as_deref(), Some("name"));
        assert!(loaded.rows.iter().all(|row| row.value_at("notes").is_null()));
    }
}
