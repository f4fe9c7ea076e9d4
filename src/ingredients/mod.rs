use crate::model::{Ingredient, IngredientCatalog};
use serde::Serialize;

mod parser;
mod quantity;
pub mod units;

pub use parser::{parse_ingredient_line, resolve_store};
pub(crate) use parser::is_markdown_media;
pub use quantity::parse_quantity;

/// Parsed ingredients plus the lines that could not be interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIngredients {
    pub ingredients: Vec<Ingredient>,
    pub skipped_lines: Vec<String>,
}

/// Parse a text blob holding one ingredient per line. Blank lines are ignored.
pub fn parse_ingredient_text(
    text: &str,
    catalog: &IngredientCatalog,
    stores: &[String],
) -> ParsedIngredients {
    parse_ingredient_lines(text.lines(), catalog, stores)
}

pub fn parse_ingredient_lines<I, S>(
    lines: I,
    catalog: &IngredientCatalog,
    stores: &[String],
) -> ParsedIngredients
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedIngredients::default();
    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        match parse_ingredient_line(line, catalog, stores) {
            Some(ingredient) => parsed.ingredients.push(ingredient),
            None => parsed.skipped_lines.push(line.to_string()),
        }
    }
    parsed
}
