pub mod url;

use crate::extractors::{default_extractors, Candidate, ParsingContext, Strategy};
use crate::model::{ExtractedRecipe, IngredientCatalog, MealSlot, DEFAULT_SERVINGS};
use log::{debug, info};
use serde::Serialize;

/// Result of running the extraction strategies over one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub recipe: ExtractedRecipe,
    /// Strategy whose candidate was taken whole; `None` when fields were merged
    pub strategy: Option<Strategy>,
    /// Ingredient lines that did not parse, from the chosen ingredient list
    pub skipped_lines: Vec<String>,
}

/// Run the strategies in priority order over page text.
///
/// The first usable candidate wins. Without one, the recipe is composed field
/// by field from everything the strategies found. Never fails: empty input
/// gives an empty recipe titled after the URL.
pub fn extract(
    text: &str,
    url: &str,
    catalog: &IngredientCatalog,
    stores: &[String],
) -> Extraction {
    let context = ParsingContext::new(text, url, catalog, stores);
    let mut candidates = Vec::new();

    for extractor in default_extractors() {
        let Some(candidate) = extractor.parse(&context) else {
            debug!("{:?}: no candidate", extractor.strategy());
            continue;
        };
        debug!(
            "{:?}: score {} ({} ingredients, {} steps)",
            candidate.strategy,
            candidate.score(),
            candidate.ingredients.len(),
            candidate.steps.len()
        );

        if candidate.is_usable() {
            info!("Using {:?} candidate for {}", candidate.strategy, url);
            let strategy = candidate.strategy;
            let skipped_lines = candidate.skipped_lines.clone();
            return Extraction {
                recipe: into_recipe(candidate, url),
                strategy: Some(strategy),
                skipped_lines,
            };
        }
        candidates.push(candidate);
    }

    info!(
        "No usable candidate for {}, merging {} partial candidates",
        url,
        candidates.len()
    );
    compose_fallback(candidates, url)
}

fn into_recipe(candidate: Candidate, url: &str) -> ExtractedRecipe {
    let title = candidate.title.unwrap_or_else(|| title_from_url(url));
    let meal_type = candidate
        .meal_type
        .or_else(|| MealSlot::infer(&title))
        .unwrap_or_default();
    ExtractedRecipe {
        title,
        meal_type,
        description: candidate.description.unwrap_or_default(),
        servings: candidate.servings.unwrap_or(DEFAULT_SERVINGS).max(1),
        ingredients: candidate.ingredients,
        steps: candidate.steps,
        source_url: url.to_string(),
    }
}

/// Take each field from the best candidate that has it.
fn compose_fallback(candidates: Vec<Candidate>, url: &str) -> Extraction {
    let longest = |len: fn(&Candidate) -> usize| {
        candidates
            .iter()
            .enumerate()
            .fold(None::<(usize, usize)>, |best, (index, candidate)| match best {
                Some((_, best_len)) if len(candidate) <= best_len => best,
                _ => Some((index, len(candidate))),
            })
            .map(|(index, _)| index)
    };
    let ingredient_source = longest(|candidate| candidate.ingredients.len());
    let step_source = longest(|candidate| candidate.steps.len());

    let merged = Candidate {
        strategy: Strategy::Heuristic,
        title: candidates.iter().find_map(|c| c.title.clone()),
        description: candidates.iter().find_map(|c| c.description.clone()),
        servings: candidates.iter().find_map(|c| c.servings),
        meal_type: candidates.iter().find_map(|c| c.meal_type),
        ingredients: ingredient_source
            .map(|index| candidates[index].ingredients.clone())
            .unwrap_or_default(),
        steps: step_source
            .map(|index| candidates[index].steps.clone())
            .unwrap_or_default(),
        skipped_lines: ingredient_source
            .map(|index| candidates[index].skipped_lines.clone())
            .unwrap_or_default(),
    };

    let skipped_lines = merged.skipped_lines.clone();
    Extraction {
        recipe: into_recipe(merged, url),
        strategy: None,
        skipped_lines,
    }
}

/// Readable title from the last meaningful path segment, else the host.
pub fn title_from_url(url: &str) -> String {
    let parsed = ::url::Url::parse(url).or_else(|_| ::url::Url::parse(&format!("https://{url}")));
    let Ok(parsed) = parsed else {
        return "Imported Recipe".to_string();
    };

    let slug = parsed
        .path_segments()
        .into_iter()
        .flatten()
        .rev()
        .map(|segment| segment.split('.').next().unwrap_or_default())
        .find(|segment| segment.chars().any(|c| c.is_alphabetic()));

    match slug {
        Some(slug) => slug
            .split(['-', '_', '+'])
            .filter(|word| !word.is_empty())
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" "),
        None => match parsed.host_str() {
            Some(host) => host.trim_start_matches("www.").to_string(),
            None => "Imported Recipe".to_string(),
        },
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
