//! Heading-delimited section detection over line-oriented page text.
//!
//! Shared by the domain adapters and the generic heuristic; only the heading
//! vocabulary differs between them.

use super::{first_integer, non_empty, Candidate, ParsingContext, Strategy};
use crate::ingredients::{is_markdown_media, parse_ingredient_lines};
use crate::model::MealSlot;
use log::debug;

pub(crate) const GENERIC_INGREDIENT_HEADINGS: &[&str] =
    &["Ingredients", "Ingredient List", "What You Need", "You Will Need"];

pub(crate) const GENERIC_STEP_HEADINGS: &[&str] = &[
    "Steps",
    "Instructions",
    "Directions",
    "Method",
    "Preparation",
    "How to Make",
];

/// Headings that end the steps section.
pub(crate) const STOP_HEADINGS: &[&str] = &[
    "Nutrition",
    "Notes",
    "Recipe Notes",
    "Video",
    "Related",
    "Comments",
    "Reviews",
    "Tags",
    "Equipment",
    "Footnotes",
    "You May Also Like",
    "More Recipes",
    "Did You Make This",
    "Share This",
];

/// Lines longer than this are prose, never a heading.
const MAX_HEADING_CHARS: usize = 60;

/// Header labels some read proxies put at the top of their output.
const PROXY_LABELS: &[&str] = &["url source:", "published time:", "markdown content:"];

const SERVINGS_LABELS: &[&str] = &["servings", "serves", "yield", "makes"];

/// Lowercase and keep only letters and digits.
pub(crate) fn normalize_heading(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Equality or prefix match of the normalized line against any heading.
pub(crate) fn matches_heading(line: &str, headings: &[&str]) -> bool {
    if line.chars().count() > MAX_HEADING_CHARS {
        return false;
    }
    let normalized = normalize_heading(line);
    if normalized.is_empty() {
        return false;
    }
    headings.iter().any(|heading| {
        let heading = normalize_heading(heading);
        !heading.is_empty() && normalized.starts_with(&heading)
    })
}

/// Index ranges of the ingredients and steps sections.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Sections {
    pub ingredients: Option<(usize, usize)>,
    pub steps: Option<(usize, usize)>,
}

pub(crate) fn find_sections(
    lines: &[String],
    ingredient_headings: &[&str],
    step_headings: &[&str],
) -> Sections {
    let ingredient_heading = lines
        .iter()
        .position(|line| matches_heading(line, ingredient_headings));

    let search_from = ingredient_heading.map_or(0, |index| index + 1);
    let step_heading = find_from(lines, search_from, step_headings)
        .or_else(|| find_from(lines, 0, step_headings));

    let next_stop = |from: usize| find_from(lines, from, STOP_HEADINGS).unwrap_or(lines.len());

    let ingredients = ingredient_heading.map(|heading| {
        let start = heading + 1;
        let mut end = next_stop(start);
        if let Some(steps) = step_heading.filter(|steps| *steps > heading) {
            end = end.min(steps);
        }
        (start, end)
    });

    let steps = step_heading.map(|heading| {
        let start = heading + 1;
        let mut end = next_stop(start);
        if let Some(ingredients) = ingredient_heading.filter(|ingredients| *ingredients > heading)
        {
            end = end.min(ingredients);
        }
        (start, end)
    });

    Sections { ingredients, steps }
}

fn find_from(lines: &[String], from: usize, headings: &[&str]) -> Option<usize> {
    lines
        .get(from..)?
        .iter()
        .position(|line| matches_heading(line, headings))
        .map(|index| index + from)
}

/// Build a candidate from page lines with the given heading vocabulary.
pub(crate) fn build_candidate(
    strategy: Strategy,
    lines: &[String],
    context: &ParsingContext,
    ingredient_headings: &[&str],
    step_headings: &[&str],
) -> Candidate {
    let sections = find_sections(lines, ingredient_headings, step_headings);
    debug!("{:?}: sections {:?}", strategy, sections);

    let mut candidate = Candidate::new(strategy);
    let (title, title_index) = find_title(lines);
    candidate.title = title;
    candidate.description = find_description(lines, title_index, &sections);
    candidate.servings = find_servings(lines);
    candidate.meal_type = candidate.title.as_deref().and_then(MealSlot::infer);

    if let Some((start, end)) = sections.ingredients {
        let parsed = parse_ingredient_lines(&lines[start..end], context.catalog, context.stores);
        candidate.ingredients = parsed.ingredients;
        candidate.skipped_lines = parsed.skipped_lines;
    }

    if let Some((start, end)) = sections.steps {
        candidate.steps = lines[start..end]
            .iter()
            .filter_map(|line| clean_step(line))
            .collect();
    }

    candidate
}

/// Title from a `Title:` line, else the first line.
fn find_title(lines: &[String]) -> (Option<String>, Option<usize>) {
    if let Some((index, title)) = lines
        .iter()
        .enumerate()
        .find_map(|(index, line)| labeled_value(line, "title").map(|value| (index, value)))
    {
        return (Some(title), Some(index));
    }
    match lines.first() {
        Some(first) => {
            let title = first.trim_start_matches(['#', '-', '*']).trim().to_string();
            (non_empty(title), Some(0))
        }
        None => (None, None),
    }
}

/// Description from a `Description:` line, else the first long body line
/// outside the recipe sections that is not a bare URL.
fn find_description(
    lines: &[String],
    title_index: Option<usize>,
    sections: &Sections,
) -> Option<String> {
    if let Some(description) = lines
        .iter()
        .find_map(|line| labeled_value(line, "description"))
    {
        return Some(description);
    }

    let inside = |index: usize, range: Option<(usize, usize)>| {
        range.is_some_and(|(start, end)| index + 1 >= start && index < end)
    };

    lines
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != title_index)
        .filter(|(index, _)| !inside(*index, sections.ingredients) && !inside(*index, sections.steps))
        .map(|(_, line)| line.trim_start_matches(['#', '-', '*']).trim())
        .find(|line| {
            let lower = line.to_lowercase();
            line.chars().count() >= 30
                && !is_bare_url(line)
                && !is_markdown_media(line)
                && !PROXY_LABELS.iter().any(|label| lower.starts_with(label))
                && !lower.starts_with("title:")
        })
        .map(str::to_string)
}

fn find_servings(lines: &[String]) -> Option<u32> {
    lines
        .iter()
        .filter(|line| line.chars().count() <= 40)
        .find_map(|line| {
            let lower = line.to_lowercase();
            let lower = lower.trim_start_matches(['-', '*', ' ']);
            if SERVINGS_LABELS.iter().any(|label| lower.starts_with(label)) {
                first_integer(lower).filter(|servings| *servings > 0)
            } else {
                None
            }
        })
}

/// Value of a `Label: value` line, label compared case-insensitively.
fn labeled_value(line: &str, label: &str) -> Option<String> {
    let (key, value) = line.split_once(':')?;
    if key.trim().eq_ignore_ascii_case(label) {
        non_empty(value.to_string())
    } else {
        None
    }
}

fn is_bare_url(line: &str) -> bool {
    let lower = line.to_lowercase();
    (lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www."))
        && !line.contains(char::is_whitespace)
}

/// Strip bullets and step numbering; drop lines with nothing left to cook.
pub(crate) fn clean_step(line: &str) -> Option<String> {
    let mut text = line.trim().trim_start_matches(['-', '*', '•']).trim_start();

    let lower = text.to_lowercase();
    if lower.starts_with("step ") {
        let after = text.get(5..).unwrap_or_default().trim_start();
        let digits = after.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 {
            text = after[digits..].trim_start_matches([':', '.', ')']).trim_start();
        }
    } else {
        let digits = text.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 && text[digits..].starts_with(['.', ')']) {
            text = text[digits + 1..].trim_start();
        }
    }

    if text.chars().count() < 3
        || !text.chars().any(char::is_alphanumeric)
        || is_markdown_media(text)
    {
        return None;
    }
    Some(text.to_string())
}
