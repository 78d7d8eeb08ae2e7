mod catalog;
mod error;
mod loader;
mod model;
mod output;
mod parser;
mod pipeline;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use catalog::ALL_MEDIUMS;
use loader::ReadPolicy;
use pipeline::{ExtractOptions, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_PATH};

#[derive(Parser)]
#[command(name = "artwork_extractor", about = "Build the artwork catalog from the legacy site backup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every .html page of the backup into the JSON catalog
    Extract {
        /// Directory holding the backed-up html pages
        #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,
        /// Catalog file to (over)write
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,
        /// What to do with a page that cannot be read
        #[arg(long, value_enum, default_value_t = ReadPolicy::Abort)]
        on_unreadable: ReadPolicy,
    },
    /// Catalog overview table, as the gallery page will show it
    List {
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        catalog: PathBuf,
        /// Only show one medium (e.g. "Bronze")
        #[arg(short, long, default_value = ALL_MEDIUMS)]
        medium: String,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// Counts per medium and id collisions
    Stats {
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        catalog: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            output,
            on_unreadable,
        } => {
            let opts = ExtractOptions {
                input_dir: input,
                output,
                on_unreadable,
                ..Default::default()
            };
            let summary = pipeline::run(&opts).with_context(|| {
                format!("Extraction from {} failed", opts.input_dir.display())
            })?;
            summary.print();
            Ok(())
        }
        Commands::List {
            catalog: path,
            medium,
            limit,
        } => {
            let entries = catalog::load(&path)?;
            let rows = catalog::filter(&entries, &medium);
            if rows.is_empty() {
                println!("No artworks found.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<28} | {:<12} | {:<32} | {:<30}",
                "#", "Title", "Medium", "Image", "Description"
            );
            println!("{}", "-".repeat(118));

            for (i, e) in rows.iter().take(limit).enumerate() {
                println!(
                    "{:>3} | {:<28} | {:<12} | {:<32} | {:<30}",
                    i + 1,
                    truncate(&e.title, 28),
                    e.medium,
                    truncate(&e.image, 32),
                    truncate(e.description.as_deref().unwrap_or(""), 30),
                );
            }

            println!(
                "\n{} of {} artworks | filters: {}",
                rows.len().min(limit),
                rows.len(),
                catalog::mediums(&entries).join(", ")
            );
            Ok(())
        }
        Commands::Stats { catalog: path } => {
            let entries = catalog::load(&path)?;
            println!("Artworks: {}", entries.len());
            for medium in catalog::mediums(&entries).iter().skip(1) {
                println!(
                    "  {:<12} {:>5}",
                    medium,
                    catalog::filter(&entries, medium).len()
                );
            }

            let dups = catalog::duplicate_ids(&entries);
            if !dups.is_empty() {
                println!("\n--- Colliding ids ---");
                for (id, n) in &dups {
                    tracing::warn!("id {:?} is shared by {} artworks", id, n);
                    println!("  {}: {}", id, n);
                }
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
