use anyhow::{Context, Result};
use bb_client::collection::CollectionStore;
use bb_client::display::format_recipe;
use bb_client::storage::SqliteStore;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse and prune your saved cocktails
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Where the collection is stored
    #[arg(long, env = "BB_STORE", default_value = "data/backbar.db")]
    store: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every saved cocktail
    List,
    /// Show one saved cocktail in full
    Show { id: i64 },
    /// Delete a saved cocktail
    Delete { id: i64 },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let store = SqliteStore::open(&args.store).context("Opening the collection store")?;
    let mut collection = CollectionStore::initialize(store).context("Loading the collection")?;

    match args.command {
        Command::List => {
            if collection.list().is_empty() {
                println!("No saved cocktails yet. Create your first one with bb-add!");
            }
            for recipe in collection.list() {
                println!(
                    "{:>15}  {}  (served in: {})",
                    recipe.id,
                    recipe.name,
                    recipe.glass.as_deref().unwrap_or("any glass")
                );
            }
        }
        Command::Show { id } => match collection.get(id) {
            Some(recipe) => println!("{}", format_recipe(recipe)),
            None => {
                eprintln!("No saved cocktail with id {}", id);
                std::process::exit(1);
            }
        },
        Command::Delete { id } => {
            if collection.delete(id)? {
                println!("Deleted cocktail {}", id);
            } else {
                println!("Nothing to delete: no saved cocktail with id {}", id);
            }
        }
    }
    Ok(())
}
