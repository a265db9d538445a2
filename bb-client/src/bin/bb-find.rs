use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use bb::basic_models::Liquor;
use bb_client::display::format_recipe;
use bb_client::search::{SearchError, SearchRequest, Searcher};
use bb_client::source::{CocktailDb, DEFAULT_API_BASE};
use clap::{ArgGroup, Parser};

/// Search the cocktail catalog
#[derive(Parser, Debug)]
#[command(version, about)]
#[command(group(ArgGroup::new("mode").required(true).args(["name", "ingredient", "liquor", "random"])))]
pub struct Args {
    /// Find cocktails whose name matches
    #[arg(short, long)]
    name: Option<String>,
    /// Find cocktails made with an ingredient (e.g. vodka, lime)
    #[arg(short, long)]
    ingredient: Option<String>,
    /// Find cocktails built on a base liquor
    #[arg(short, long)]
    liquor: Option<Liquor>,
    /// Pick a random cocktail
    #[arg(short, long)]
    random: bool,
    /// Base URL of the recipe catalog
    #[arg(long, env = "BB_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,
    /// Give up on the catalog after this many seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

impl Args {
    fn request(&self) -> SearchRequest {
        match (&self.name, &self.ingredient, self.liquor) {
            (Some(term), _, _) => SearchRequest::ByName(term.clone()),
            (_, Some(term), _) => SearchRequest::ByIngredient(term.clone()),
            (_, _, Some(liquor)) => SearchRequest::ByLiquor(liquor),
            _ => SearchRequest::Random,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let catalog = CocktailDb::new(&args.api_base, Duration::from_secs(args.timeout_secs))?;
    let searcher = Searcher::new(Arc::new(catalog));
    let request = args.request();

    println!("Mixing up some cocktails...\n");
    match searcher.search(&request).await {
        Ok(recipes) => {
            for recipe in recipes {
                println!("{}\n", format_recipe(&recipe));
            }
        }
        Err(err @ SearchError::Source(_)) => {
            tracing::debug!("Search failed: {}", err);
            eprintln!("{}", err.user_message(&request));
            std::process::exit(1);
        }
        Err(SearchError::Superseded) => {}
    }
    Ok(())
}
