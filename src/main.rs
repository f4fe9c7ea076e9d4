use log::{debug, error};
use mealplan::grocery::aggregate_state;
use mealplan::pipelines::url::{import_from_text, import_from_url};
use mealplan::{
    load_config, parse_ingredient_text, render_html, render_text, HouseholdState,
    IngredientCatalog, PlannerConfig,
};
use std::env;

const USAGE: &str = "Usage:
  mealplan import <url>
  mealplan extract <file> [url]
  mealplan ingredients <file>
  mealplan grocery <state.json> [--html]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).ok_or(USAGE)?;
    let config = load_config()?;
    debug!("Loaded config: {:?}", config);

    match command.as_str() {
        "import" => {
            let url = args.get(2).ok_or("Please provide a URL as an argument")?;
            let imported =
                import_from_url(url, &config.import, &IngredientCatalog::new(), &config.stores)
                    .await
                    .inspect_err(|e| error!("Import of {} failed: {}", url, e))?;
            println!("{}", serde_json::to_string_pretty(&imported)?);
        }
        "extract" => {
            let path = args.get(2).ok_or("Please provide a file to extract from")?;
            let url = args.get(3).map(String::as_str).unwrap_or_default();
            let text = tokio::fs::read_to_string(path).await?;
            let extraction =
                import_from_text(&text, url, &IngredientCatalog::new(), &config.stores)?;
            println!("{}", serde_json::to_string_pretty(&extraction)?);
        }
        "ingredients" => {
            let path = args.get(2).ok_or("Please provide an ingredient list file")?;
            let text = tokio::fs::read_to_string(path).await?;
            let parsed = parse_ingredient_text(&text, &IngredientCatalog::new(), &config.stores);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        "grocery" => {
            let path = args.get(2).ok_or("Please provide a household state file")?;
            let html = args.iter().skip(3).any(|arg| arg == "--html");
            let state = read_state(path, &config).await?;
            let list = aggregate_state(&state);
            if html {
                print!("{}", render_html(&list));
            } else {
                print!("{}", render_text(&list));
            }
        }
        other => {
            error!("Unknown command: {}", other);
            return Err(USAGE.into());
        }
    }

    Ok(())
}

/// Read a household snapshot, filling stores and servings from config when
/// the snapshot has none.
async fn read_state(
    path: &str,
    config: &PlannerConfig,
) -> Result<HouseholdState, Box<dyn std::error::Error>> {
    let raw = tokio::fs::read_to_string(path).await?;
    let mut state: HouseholdState = serde_json::from_str(&raw)?;
    if state.stores.is_empty() {
        state.stores = config.stores.clone();
    }
    if state.household_servings.is_none() {
        state.household_servings = Some(config.household_servings);
    }
    Ok(state)
}
