//! Ranking extraction results from several fetches of the same page.

use crate::model::{ExtractedRecipe, IngredientCatalog};
use crate::pipelines::{extract, Extraction};
use log::debug;

/// Most ingredients kept on a stored recipe.
pub const MAX_PERSISTED_INGREDIENTS: usize = 40;
/// Most steps kept on a stored recipe.
pub const MAX_PERSISTED_STEPS: usize = 25;

/// Ingredient counts above this are penalized as likely page noise.
const INGREDIENT_NOISE_THRESHOLD: i64 = 25;
/// Step counts above this are penalized as likely page noise.
const STEP_NOISE_THRESHOLD: i64 = 15;

/// Whether a line carries content worth keeping.
///
/// Rejects separator runs, markdown images, image/photo captions and anything
/// shorter than three characters.
pub fn is_meaningful_line(line: &str) -> bool {
    let line = line.trim();
    if line.chars().count() < 3 {
        return false;
    }
    if line.chars().all(|c| matches!(c, '-' | '_' | '=' | '*' | '~' | '#' | '|' | ' ')) {
        return false;
    }
    let lower = line.to_lowercase();
    !(line.starts_with("![") || lower.starts_with("image") || lower.starts_with("photo"))
}

/// A recipe cleaned for storage, with counts of what was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedRecipe {
    pub recipe: ExtractedRecipe,
    pub invalid_ingredients: usize,
    pub invalid_steps: usize,
}

/// Drop meaningless ingredients and steps, then cap both lists.
pub fn sanitize_recipe(mut recipe: ExtractedRecipe) -> SanitizedRecipe {
    let ingredient_count = recipe.ingredients.len();
    recipe
        .ingredients
        .retain(|ingredient| is_meaningful_line(&ingredient.name));
    let invalid_ingredients = ingredient_count - recipe.ingredients.len();
    recipe.ingredients.truncate(MAX_PERSISTED_INGREDIENTS);

    let step_count = recipe.steps.len();
    recipe.steps.retain(|step| is_meaningful_line(step));
    let invalid_steps = step_count - recipe.steps.len();
    recipe.steps.truncate(MAX_PERSISTED_STEPS);

    SanitizedRecipe {
        recipe,
        invalid_ingredients,
        invalid_steps,
    }
}

/// Quality score of a sanitized recipe; higher is better.
pub fn score_recipe(sanitized: &SanitizedRecipe) -> i64 {
    let recipe = &sanitized.recipe;
    let ingredients = recipe.ingredients.len() as i64;
    let steps = recipe.steps.len() as i64;

    let mut score = ingredients * 4 + steps * 4;
    score += i64::from(!recipe.title.trim().is_empty());
    score += i64::from(!recipe.description.trim().is_empty());
    score -= sanitized.invalid_ingredients as i64 * 2;
    score -= sanitized.invalid_steps as i64 * 2;
    score -= (ingredients - INGREDIENT_NOISE_THRESHOLD).max(0) * 3;
    score -= (steps - STEP_NOISE_THRESHOLD).max(0) * 10;
    score
}

/// One fetched text after extraction and scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// Position of the source text in fetch order
    pub index: usize,
    pub score: i64,
    /// Extraction with the recipe already sanitized for storage
    pub extraction: Extraction,
}

/// Extract every text and order the results best first.
///
/// Equal scores keep fetch order.
pub fn rank_candidates<S: AsRef<str>>(
    texts: &[S],
    url: &str,
    catalog: &IngredientCatalog,
    stores: &[String],
) -> Vec<ScoredCandidate> {
    let mut ranked: Vec<ScoredCandidate> = texts
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let Extraction {
                recipe,
                strategy,
                skipped_lines,
            } = extract(text.as_ref(), url, catalog, stores);
            let sanitized = sanitize_recipe(recipe);
            let score = score_recipe(&sanitized);
            debug!(
                "Candidate {}: score {} ({} ingredients, {} steps)",
                index,
                score,
                sanitized.recipe.ingredients.len(),
                sanitized.recipe.steps.len()
            );
            ScoredCandidate {
                index,
                score,
                extraction: Extraction {
                    recipe: sanitized.recipe,
                    strategy,
                    skipped_lines,
                },
            }
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Highest scoring extraction, earliest on ties.
pub fn best_candidate<S: AsRef<str>>(
    texts: &[S],
    url: &str,
    catalog: &IngredientCatalog,
    stores: &[String],
) -> Option<ScoredCandidate> {
    rank_candidates(texts, url, catalog, stores).into_iter().next()
}
