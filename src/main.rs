// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;

use rtfti::{execute, generate, to_json, write_report, Entity, CASE_STUDY_SEED, DEFAULT_MONTHS};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("score") => run_score(parse_seed(&args)),
        Some("report") => run_report(parse_seed(&args)),
        Some("export") => run_export(parse_seed(&args)),
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(1);
        }
        None => run_terminal(),
    }
}

fn print_usage() {
    println!("RTFTI Protocol Terminal v{}", rtfti::VERSION);
    println!();
    println!("Usage:");
    println!("  rtfti               Launch the interactive terminal");
    println!("  rtfti score  [seed] Execute the protocol and print the run as JSON");
    println!("  rtfti report [seed] Execute the protocol and write trust_report.md");
    println!("  rtfti export [seed] Write the generated tables to ./records/*.csv");
}

/// Optional trailing seed argument; the case-study seed otherwise
fn parse_seed(args: &[String]) -> u64 {
    args.get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(CASE_STUDY_SEED)
}

fn run_score(seed: u64) -> Result<()> {
    let entity = Entity::case_study();
    let records = generate(&entity, DEFAULT_MONTHS, seed);
    let run = execute(&entity, &records);

    println!("{}", to_json(&run)?);
    Ok(())
}

fn run_report(seed: u64) -> Result<()> {
    println!("🛰️  RTFTI Protocol - Assessment Report");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let entity = Entity::case_study();
    let records = generate(&entity, DEFAULT_MONTHS, seed);
    let run = execute(&entity, &records);

    let path = "trust_report.md";
    write_report(&run, path)?;

    println!("✓ Entity: {} (seed {})", entity.name, seed);
    println!("✓ FTS: {}/100 — {}", run.trust.fts, run.trust.rating());
    println!("✓ Report written to {}", path);
    Ok(())
}

fn run_export(seed: u64) -> Result<()> {
    println!("📂 RTFTI Protocol - Table Export");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let entity = Entity::case_study();
    let records = generate(&entity, DEFAULT_MONTHS, seed);
    records.export_csv("records")?;

    println!("✓ {} records written to records/", records.record_count());
    Ok(())
}

#[cfg(feature = "tui")]
fn run_terminal() -> Result<()> {
    println!("🖥️  Loading RTFTI Protocol Terminal...\n");

    let mut app = ui::App::new(Entity::case_study(), CASE_STUDY_SEED);
    ui::run_ui(&mut app)?;

    println!("\n✅ Terminal closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_terminal() -> Result<()> {
    eprintln!("❌ Terminal mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the API: cargo run --bin rtfti-server --features server");
    std::process::exit(1);
}
