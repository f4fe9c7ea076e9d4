pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod grocery;
pub mod html;
pub mod ingredients;
pub mod model;
pub mod pipelines;
pub mod scoring;

// Re-export commonly used types
pub use builder::{InputSource, RecipeImporter, RecipeImporterBuilder};
pub use config::{load_config, ImportConfig, PlannerConfig};
pub use error::ImportError;
pub use grocery::render::{render_html, render_text};
pub use grocery::{aggregate, aggregate_state, GroceryList, StoreGroup};
pub use ingredients::{parse_ingredient_line, parse_ingredient_text, ParsedIngredients};
pub use model::{
    DayMode, DayPlan, ExtractedRecipe, GroceryLineItem, HouseholdState, Ingredient,
    IngredientCatalog, MealMode, MealPlan, MealSlot, Recipe, WeekPlan, Weekday,
};
pub use pipelines::url::{FetchSource, UrlImport};
pub use pipelines::{extract, Extraction};
pub use scoring::{rank_candidates, ScoredCandidate};

/// Extract a recipe from page text. Never fails.
///
/// # Example
/// ```
/// use mealplan::{extract_recipe, IngredientCatalog};
///
/// let recipe = extract_recipe(
///     "Pancakes\nIngredients\n1 cup flour\n2 eggs\nSteps\nWhisk.\nFry.",
///     "https://example.com/pancakes",
///     &IngredientCatalog::new(),
///     &[],
/// );
/// assert_eq!(recipe.ingredients.len(), 2);
/// ```
pub fn extract_recipe(
    text: &str,
    url: &str,
    catalog: &IngredientCatalog,
    stores: &[String],
) -> ExtractedRecipe {
    pipelines::extract(text, url, catalog, stores).recipe
}

/// Fetch a URL (directly and through the read proxy) and extract the best
/// recipe, using settings from `config.toml` and `MEALPLAN__*` variables.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipe = mealplan::import_recipe("https://example.com/recipe").await?;
/// println!("{}", recipe.title);
/// # Ok(())
/// # }
/// ```
pub async fn import_recipe(url: &str) -> Result<ExtractedRecipe, ImportError> {
    let config = load_config()?;
    let imported = pipelines::url::import_from_url(
        url,
        &config.import,
        &IngredientCatalog::new(),
        &config.stores,
    )
    .await?;
    Ok(imported.extraction.recipe)
}

/// Aggregate a household snapshot and render it as a text checklist.
pub fn grocery_text(state: &HouseholdState) -> String {
    render_text(&aggregate_state(state))
}
