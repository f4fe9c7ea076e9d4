use crate::model::{Ingredient, IngredientCatalog, MealSlot};
use scraper::Html;
use serde::Serialize;

mod domain;
mod heuristic;
mod json_ld;
mod sections;

pub use domain::{adapter_for_url, DomainAdapterExtractor, SiteAdapter, SITE_ADAPTERS};
pub use heuristic::HeuristicExtractor;
pub use json_ld::JsonLdExtractor;

/// Everything a strategy may look at for one page.
pub struct ParsingContext<'a> {
    pub url: String,
    pub text: String,
    pub document: Html,
    pub catalog: &'a IngredientCatalog,
    pub stores: &'a [String],
}

impl<'a> ParsingContext<'a> {
    pub fn new(
        text: &str,
        url: &str,
        catalog: &'a IngredientCatalog,
        stores: &'a [String],
    ) -> Self {
        ParsingContext {
            url: url.to_string(),
            text: text.to_string(),
            document: Html::parse_document(text),
            catalog,
            stores,
        }
    }
}

/// Which strategy produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    JsonLd,
    DomainAdapter,
    Heuristic,
}

/// A partially filled recipe produced by one strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub strategy: Strategy,
    pub title: Option<String>,
    pub description: Option<String>,
    pub servings: Option<u32>,
    pub meal_type: Option<MealSlot>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    /// Ingredient lines the parser rejected
    pub skipped_lines: Vec<String>,
}

impl Candidate {
    pub fn new(strategy: Strategy) -> Self {
        Candidate {
            strategy,
            title: None,
            description: None,
            servings: None,
            meal_type: None,
            ingredients: Vec::new(),
            steps: Vec::new(),
            skipped_lines: Vec::new(),
        }
    }

    /// `title + ingredient count + step count`
    pub fn score(&self) -> usize {
        usize::from(self.title.is_some()) + self.ingredients.len() + self.steps.len()
    }

    /// Good enough to win outright without field-level merging.
    pub fn is_usable(&self) -> bool {
        self.score() >= 3 && !self.ingredients.is_empty() && !self.steps.is_empty()
    }
}

pub trait Extractor {
    fn strategy(&self) -> Strategy;
    fn parse(&self, context: &ParsingContext) -> Option<Candidate>;
}

/// Strategies in priority order.
pub fn default_extractors() -> Vec<Box<dyn Extractor>> {
    vec![
        Box::new(JsonLdExtractor),
        Box::new(DomainAdapterExtractor),
        Box::new(HeuristicExtractor),
    ]
}

/// First run of ASCII digits in `text`, e.g. `4` in "Serves 4-6".
pub(crate) fn first_integer(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Trimmed, non-empty text or nothing.
pub(crate) fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_score() {
        let mut candidate = Candidate::new(Strategy::Heuristic);
        assert_eq!(candidate.score(), 0);
        assert!(!candidate.is_usable());

        candidate.title = Some("Soup".to_string());
        candidate.steps = vec!["Boil.".to_string(), "Serve.".to_string()];
        assert_eq!(candidate.score(), 3);
        assert!(!candidate.is_usable());

        candidate.ingredients.push(Ingredient {
            name: "water".to_string(),
            qty: 1.0,
            unit: "l".to_string(),
            store: "Unassigned".to_string(),
        });
        assert_eq!(candidate.score(), 4);
        assert!(candidate.is_usable());
    }

    #[test]
    fn test_first_integer() {
        assert_eq!(first_integer("Serves 4-6"), Some(4));
        assert_eq!(first_integer("12 cookies"), Some(12));
        assert_eq!(first_integer("a few"), None);
    }
}
