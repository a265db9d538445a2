use anyhow::{Context, Result};
use bb::reference::ReferenceData;
use clap::Parser;
use std::path::PathBuf;

/// Suggest brands and substitutes for an ingredient
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// The ingredient, spelled as in the recipe (e.g. "Lime juice")
    name: String,
    /// Use suggestion tables from this JSON file instead of the built-in ones
    #[arg(long, env = "BB_REFERENCE")]
    reference: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let loaded;
    let reference = match &args.reference {
        Some(path) => {
            loaded = ReferenceData::load(path)
                .with_context(|| format!("Loading reference data from {}", path.display()))?;
            &loaded
        }
        None => ReferenceData::builtin(),
    };

    println!("{}\n", args.name);
    println!("Popular Brands:");
    for brand in reference.brands_for(&args.name) {
        println!("  - {}", brand);
    }
    println!("\nAlternatives:");
    for substitute in reference.substitutes_for(&args.name) {
        println!("  - {}", substitute);
    }
    Ok(())
}
