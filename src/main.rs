use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use listing_stats::report;
use listing_stats::{ConfigError, ExportOptions, FilterCriteria, Session};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Filter short-term rental listings and compute price and host statistics",
    long_about = "Loads a listings CSV (columns id, host_id, price, accommodates, \
                  review_scores_rating) and opens an interactive menu to filter, \
                  inspect and export the results as JSON.\n\n\
                  EXAMPLES:\n  \
                  listing-stats listings.csv\n  \
                  listing-stats listings.csv --top 20 --no-records"
)]
struct Args {
    /// Path to the listings CSV file
    input: Option<PathBuf>,

    /// Number of hosts shown in the ranking view
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Leave the filtered listings out of exported files
    #[arg(long)]
    no_records: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let input = args.input.clone().ok_or(ConfigError::MissingInput)?;

    let mut session = Session::with_export_options(ExportOptions {
        include_records: !args.no_records,
    });
    session
        .load(&input)
        .with_context(|| format!("loading {}", input.display()))?;
    println!("Success! File loaded.");

    run_menu(&mut session, &args)
}

// ---------------------------------------------------------------------------
// Interactive loop
// ---------------------------------------------------------------------------

fn run_menu(session: &mut Session, args: &Args) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\nOptions:");
        println!("Enter 1 to start filtering");
        println!("Enter 2 to export results");
        println!("Enter 3 to exit");
        println!("Enter 4 to see the max price");

        let Some(choice) = prompt(&mut lines, "\nEnter: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let Some(criteria) = prompt_criteria(&mut lines)? else {
                    return Ok(());
                };

                println!("\n---------------Result Starts---------------");
                session
                    .filter(&criteria)
                    .compute_stats()
                    .compute_host_rankings();
                report::print_stats(session.active_len(), session.price_per_room());
                report::print_host_rankings(
                    session.top_hosts(args.top),
                    session.host_rankings().len(),
                );
                println!("\n---------------End of Result---------------");
            }
            "2" => {
                let Some(file_name) = prompt(&mut lines, "\nEnter filename (for example, out.json): ")?
                else {
                    return Ok(());
                };
                if file_name.is_empty() {
                    warn!("No filename given, nothing exported");
                    continue;
                }
                match session.export(&file_name) {
                    Ok(_) => println!("Results exported to {file_name}"),
                    Err(e) => eprintln!("Failure! {e}"),
                }
            }
            "3" => {
                println!("\nSee you next time!\n");
                return Ok(());
            }
            "4" => {
                let all = session.all_records();
                report::print_max_price(all.len(), Session::find_max_price(all));
            }
            other => {
                info!("Unrecognised menu choice {other:?}");
                println!("WARNING: Invalid choice. Please try again.");
            }
        }
    }
}

type Lines<'a> = io::Lines<io::StdinLock<'a>>;

/// Print `message` and read one trimmed line. `None` on end of input.
fn prompt(lines: &mut Lines<'_>, message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush().context("flushing stdout")?;

    match lines.next() {
        Some(line) => Ok(Some(line.context("reading stdin")?.trim().to_string())),
        None => Ok(None),
    }
}

/// Ask for the three lower bounds. Blank or non-numeric answers leave the
/// bound unset.
fn prompt_criteria(lines: &mut Lines<'_>) -> Result<Option<FilterCriteria>> {
    let Some(price) = prompt(lines, "\nMinimum price ($): ")? else {
        return Ok(None);
    };
    let Some(rooms) = prompt(lines, "Minimum number of rooms: ")? else {
        return Ok(None);
    };
    let Some(review) = prompt(lines, "Minimum review score (max 5.0): ")? else {
        return Ok(None);
    };

    Ok(Some(FilterCriteria {
        min_price: parse_amount_bound(&price, "price"),
        min_accommodates: parse_bound(&rooms, "rooms"),
        min_review_score: parse_amount_bound(&review, "review score"),
    }))
}

fn parse_bound<T: std::str::FromStr>(answer: &str, what: &str) -> Option<T> {
    if answer.is_empty() {
        return None;
    }
    let parsed = answer.parse().ok();
    if parsed.is_none() {
        warn!("Ignoring minimum {what} {answer:?}: not a number");
    }
    parsed
}

/// Like [`parse_bound`], but `nan` and infinities also leave the bound unset.
fn parse_amount_bound(answer: &str, what: &str) -> Option<f64> {
    let parsed = parse_bound::<f64>(answer, what)?;
    if !parsed.is_finite() {
        warn!("Ignoring minimum {what} {answer:?}: not a finite number");
        return None;
    }
    Some(parsed)
}
