use anyhow::{Context, Result};
use bb::basic_models::{DraftIngredient, RecipeDraft};
use bb_client::collection::CollectionStore;
use bb_client::display::format_recipe;
use bb_client::storage::SqliteStore;
use clap::Parser;
use std::path::PathBuf;

/// Add a cocktail of your own to the collection
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// The name of the cocktail
    name: String,
    /// An ingredient, as "name" or "name=measure". Repeat for each ingredient, in order.
    #[arg(short, long = "ingredient", value_parser = parse_ingredient)]
    ingredients: Vec<DraftIngredient>,
    /// The glass to serve it in
    #[arg(short, long)]
    glass: Option<String>,
    /// How to make it
    #[arg(long)]
    instructions: Option<String>,
    /// A picture of the finished drink
    #[arg(long)]
    image: Option<String>,
    /// Where the collection is stored
    #[arg(long, env = "BB_STORE", default_value = "data/backbar.db")]
    store: PathBuf,
    /// Dry run mode: show the cocktail but don't save it
    #[arg(long)]
    dry: bool,
}

/// Split "Lime juice=1 oz" into name and measure. A missing measure means "To taste".
fn parse_ingredient(text: &str) -> Result<DraftIngredient, String> {
    let (name, measure) = match text.split_once('=') {
        Some((name, measure)) => (name, Some(measure.to_string())),
        None => (text, None),
    };
    if name.trim().is_empty() {
        return Err("ingredient name is empty".to_string());
    }
    Ok(DraftIngredient {
        name: name.to_string(),
        measure,
    })
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let draft = RecipeDraft {
        name: args.name,
        glass: args.glass,
        instructions: args.instructions,
        image_url: args.image,
        ingredients: args.ingredients,
    };

    if args.dry {
        let preview = draft.into_recipe(0)?;
        println!("{}", format_recipe(&preview));
        println!("Dry run mode enabled, not saving");
        return Ok(());
    }

    let store = SqliteStore::open(&args.store).context("Opening the collection store")?;
    let mut collection = CollectionStore::initialize(store).context("Loading the collection")?;
    let recipe = collection.create(draft)?;
    println!("{}", format_recipe(&recipe));
    println!("\n🍹 {} has been saved to your collection!", recipe.name);
    Ok(())
}
