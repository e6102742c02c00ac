//! Writes a deterministic listings CSV for trying out the CLI.

use anyhow::{Context, Result};
use clap::Parser;
use rand::prelude::*;

#[derive(Parser, Debug)]
#[command(about = "Write a deterministic sample listings CSV")]
struct Args {
    /// Output CSV path
    #[arg(default_value = "sample_listings.csv")]
    output: String,

    /// Number of listings to generate
    #[arg(default_value_t = 200)]
    rows: u64,

    /// Seed for the random generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const NEIGHBOURHOODS: [&str; 5] = ["Mission", "SoMa", "Nob Hill", "Sunset", "Castro"];
const ROOM_TYPES: [&str; 3] = ["Entire home/apt", "Private room", "Shared room"];

fn main() -> Result<()> {
    let args = Args::parse();
    let output_path = args.output;
    let rows = args.rows;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "id",
        "host_id",
        "name",
        "neighbourhood",
        "room_type",
        "price",
        "accommodates",
        "review_scores_rating",
    ])?;

    // A small pool of hosts so rankings have repeats.
    let host_pool = (rows / 4).max(1);

    for id in 1..=rows {
        let host_id = 1000 + rng.gen_range(0..host_pool);
        let neighbourhood = NEIGHBOURHOODS.choose(&mut rng).copied().unwrap_or_default();
        let room_type = ROOM_TYPES.choose(&mut rng).copied().unwrap_or_default();
        let accommodates: u32 = rng.gen_range(0..7);
        let price: f64 = rng.gen_range(40.0..500.0);

        // Some rows carry blank or unparsable values on purpose.
        let review = if rng.gen_bool(0.1) {
            String::new()
        } else {
            format!("{:.2}", rng.gen_range(3.0_f64..=5.0))
        };
        let price_text = if rng.gen_bool(0.05) {
            "N/A".to_string()
        } else {
            format_price(price)
        };

        writer.write_record([
            id.to_string(),
            host_id.to_string(),
            format!("{room_type} in {neighbourhood} #{id}"),
            neighbourhood.to_string(),
            room_type.to_string(),
            price_text,
            accommodates.to_string(),
            review,
        ])?;
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {rows} listings ({host_pool} hosts) to {output_path}");
    Ok(())
}

/// `1234.5` → `$1,234.50`
fn format_price(value: f64) -> String {
    let cents = (value * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.{:02}", cents % 100)
}
