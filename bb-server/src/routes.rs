use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::Form;
use bb::basic_models::{DraftIngredient, Liquor, Recipe, RecipeDraft};
use bb_client::collection::CollectionError;
use bb_client::search::{SearchError, SearchMode, SearchRequest};
use minijinja::context;
use serde::Deserialize;
use strum::IntoEnumIterator;

use crate::errors::{WebError, WebResult};
use crate::state::AppState;

/// Blank ingredient rows offered by the authoring form.
const FORM_ROWS: usize = 6;

lazy_static::lazy_static! {
    static ref TEMPLATES: minijinja::Environment<'static> = {
        let mut env = minijinja::Environment::new();
        for (name, template) in &[
            ("base.html.jinja", include_str!("../templates/base.html.jinja")),
            ("index.html.jinja", include_str!("../templates/index.html.jinja")),
            ("recipe.html.jinja", include_str!("../templates/recipe.html.jinja")),
            ("ingredient.html.jinja", include_str!("../templates/ingredient.html.jinja")),
            ("cabinet.html.jinja", include_str!("../templates/cabinet.html.jinja")),
        ] {
            env.add_template(name, template)
                .expect("Failed to register template");
        }
        env
    };
}

fn render(template: &str, ctx: minijinja::Value) -> WebResult<Html<String>> {
    Ok(Html(TEMPLATES.get_template(template)?.render(ctx)?))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/search", get(search))
        .route("/liquor/:liquor", get(search_by_liquor))
        .route("/recipe/:recipe_id", get(get_recipe))
        .route("/ingredient/*name", get(get_ingredient))
        .route("/cabinet", get(get_cabinet).post(create_recipe))
        .route("/cabinet/:recipe_id", get(get_saved_recipe))
        .route("/cabinet/:recipe_id/delete", post(delete_recipe))
        .route("/health", get(health))
        .route("/static/*path", get(serve_static))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Run a search and render the results page, with a message in place of results
/// when nothing comes back. Every request draws its own page, so searches here
/// skip the stale-result guard.
async fn render_search(
    state: &AppState,
    request: SearchRequest,
    mode: SearchMode,
    query: &str,
) -> WebResult<Html<String>> {
    let (recipes, message) = match state.searcher.search_unguarded(&request).await {
        Ok(recipes) => (recipes, None),
        Err(err) => (vec![], Some(SearchError::from(err).user_message(&request))),
    };
    let liquor = match &request {
        SearchRequest::ByLiquor(liquor) => Some(liquor.to_string()),
        _ => None,
    };
    render(
        "index.html.jinja",
        context! {
            mode => mode,
            query => query,
            liquor => liquor,
            liquors => Liquor::iter().map(|l| l.to_string()).collect::<Vec<_>>(),
            recipes => recipes,
            message => message,
        },
    )
}

/// The landing page greets the user with one random cocktail.
async fn root(State(state): State<AppState>) -> WebResult<Html<String>> {
    render_search(&state, SearchRequest::Random, SearchMode::Name, "").await
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    mode: SearchMode,
    #[serde(default)]
    query: String,
}

async fn search(
    State(state): State<AppState>,
    Query(search_query): Query<SearchQuery>,
) -> WebResult<Html<String>> {
    let request = SearchRequest::from_mode(search_query.mode, &search_query.query);
    render_search(&state, request, search_query.mode, &search_query.query).await
}

async fn search_by_liquor(
    State(state): State<AppState>,
    Path(liquor): Path<String>,
) -> WebResult<Html<String>> {
    let liquor = Liquor::from_str(&liquor).map_err(|_| WebError::NotFound)?;
    render_search(
        &state,
        SearchRequest::ByLiquor(liquor),
        SearchMode::Ingredient,
        "",
    )
    .await
}

async fn get_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> WebResult<Html<String>> {
    let recipe = state.searcher.recipe(&recipe_id).await?;
    render("recipe.html.jinja", context! { recipe => recipe })
}

async fn get_ingredient(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> WebResult<Html<String>> {
    render(
        "ingredient.html.jinja",
        context! {
            name => name,
            brands => state.reference.brands_for(&name),
            substitutes => state.reference.substitutes_for(&name),
        },
    )
}

/// The authoring form next to the saved collection.
fn render_cabinet(
    recipes: &[Recipe],
    draft: &RecipeDraft,
    error: Option<String>,
) -> WebResult<Html<String>> {
    let mut rows = draft.ingredients.clone();
    if rows.len() < FORM_ROWS {
        rows.resize(FORM_ROWS, DraftIngredient::default());
    }
    render(
        "cabinet.html.jinja",
        context! {
            recipes => recipes,
            draft => draft,
            rows => rows,
            error => error,
        },
    )
}

async fn get_cabinet(State(state): State<AppState>) -> WebResult<Html<String>> {
    let collection = state.collection.lock().await;
    render_cabinet(collection.list(), &RecipeDraft::default(), None)
}

/// The authoring form as posted. Ingredient rows arrive as repeated
/// `ingredient_name` / `ingredient_measure` pairs, in row order.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CabinetForm {
    name: String,
    glass: String,
    instructions: String,
    image_url: String,
    ingredient_name: Vec<String>,
    ingredient_measure: Vec<String>,
}

impl CabinetForm {
    fn into_draft(self) -> RecipeDraft {
        let measures = self.ingredient_measure;
        let ingredients = self
            .ingredient_name
            .into_iter()
            .enumerate()
            .map(|(i, name)| DraftIngredient {
                name,
                measure: measures.get(i).cloned(),
            })
            .collect();
        RecipeDraft {
            name: self.name,
            glass: Some(self.glass),
            instructions: Some(self.instructions),
            image_url: Some(self.image_url),
            ingredients,
        }
    }
}

async fn create_recipe(
    State(state): State<AppState>,
    Form(form): Form<CabinetForm>,
) -> WebResult<Response> {
    let draft = form.into_draft();
    let mut collection = state.collection.lock().await;
    match collection.create(draft.clone()) {
        Ok(recipe) => {
            let location = format!("/cabinet/{}", recipe.id);
            Ok(Redirect::to(&location).into_response())
        }
        Err(CollectionError::Validation(err)) => {
            let page = render_cabinet(collection.list(), &draft, Some(err.to_string()))?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

async fn get_saved_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<i64>,
) -> WebResult<Html<String>> {
    let collection = state.collection.lock().await;
    let recipe = collection.get(recipe_id).ok_or(WebError::NotFound)?;
    render("recipe.html.jinja", context! { recipe => recipe })
}

async fn delete_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<i64>,
) -> WebResult<Redirect> {
    state.collection.lock().await.delete(recipe_id)?;
    Ok(Redirect::to("/cabinet"))
}

// Just reply that everything is okay
async fn health() -> StatusCode {
    StatusCode::OK
}

/// Serve static files from memory using `include_dir!`
async fn serve_static(Path(path): Path<String>) -> WebResult<impl IntoResponse> {
    let dir = include_dir::include_dir!("$CARGO_MANIFEST_DIR/static");
    let bytes = dir.get_file(&path).ok_or(WebError::NotFound)?.contents();
    let header = (
        "Content-Type",
        match path.split('.').last() {
            Some("css") => "text/css",
            Some("js") => "text/javascript",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("svg") => "image/svg+xml",
            _ => "application/octet-stream",
        },
    );
    Ok(([header], bytes).into_response())
}
