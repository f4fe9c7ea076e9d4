use super::sections::{build_candidate, GENERIC_INGREDIENT_HEADINGS, GENERIC_STEP_HEADINGS};
use super::{Candidate, Extractor, ParsingContext, Strategy};
use crate::html::document_lines;
use log::debug;

/// Generic fallback: strip the page to lines and cut it at common headings.
pub struct HeuristicExtractor;

impl Extractor for HeuristicExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::Heuristic
    }

    fn parse(&self, context: &ParsingContext) -> Option<Candidate> {
        let lines = document_lines(&context.document);
        if lines.is_empty() {
            debug!("HeuristicExtractor: no text in page {}", context.url);
            return None;
        }

        let candidate = build_candidate(
            Strategy::Heuristic,
            &lines,
            context,
            GENERIC_INGREDIENT_HEADINGS,
            GENERIC_STEP_HEADINGS,
        );
        debug!(
            "HeuristicExtractor: {} ingredients, {} steps",
            candidate.ingredients.len(),
            candidate.steps.len()
        );
        Some(candidate)
    }
}
