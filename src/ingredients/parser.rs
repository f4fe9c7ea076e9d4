use super::quantity::parse_quantity;
use super::units::{canonical_unit, normalize_unit, DEFAULT_UNIT};
use crate::html::{decode_html_symbols, fragment_text};
use crate::model::{normalize_name, Ingredient, IngredientCatalog, UNASSIGNED_STORE};
use log::debug;

/// Commerce and page-chrome phrases that never belong to an ingredient.
const NOISE_PHRASES: &[&str] = &[
    "add to cart",
    "add to bag",
    "add to basket",
    "sold out",
    "select size",
    "select a size",
    "shop now",
    "buy now",
    "out of stock",
    "quick view",
    "view cart",
    "free shipping",
    "jump to recipe",
    "print recipe",
    "pin recipe",
    "save recipe",
    "rate this recipe",
];

/// Lines that are noise only when they make up the whole line.
const NOISE_WORDS: &[&str] = &[
    "shop",
    "cart",
    "checkout",
    "print",
    "save",
    "share",
    "pin",
    "subscribe",
    "advertisement",
    "menu",
    "search",
];

/// Section headings, compared after normalization.
const SECTION_HEADINGS: &[&str] = &[
    "ingredients",
    "ingredient",
    "instructions",
    "instruction",
    "directions",
    "direction",
    "method",
    "steps",
    "step",
    "preparation",
    "notes",
    "nutrition",
    "equipment",
];

/// Intermediate result before store resolution.
struct ParsedLine {
    name: String,
    qty: f64,
    unit: String,
    store: Option<String>,
}

/// Parse one ingredient line.
///
/// Accepts `name, qty, unit, store` rows as well as freeform lines such as
/// `1 1/2 cups flour` or `(1/2 cup) butter`. Returns `None` for noise and for
/// lines without a usable name.
pub fn parse_ingredient_line(
    line: &str,
    catalog: &IngredientCatalog,
    stores: &[String],
) -> Option<Ingredient> {
    let cleaned = clean_line(line);
    if is_noise(&cleaned) {
        debug!("Skipping noise line: {:?}", line);
        return None;
    }

    let parsed = if is_csv_line(&cleaned) {
        parse_csv(&cleaned)
    } else {
        parse_freeform(&cleaned)
    };

    let Some(parsed) = parsed else {
        debug!("No ingredient name in line: {:?}", line);
        return None;
    };

    let store = resolve_store(parsed.store.as_deref(), &parsed.name, catalog, stores);
    Some(Ingredient {
        name: parsed.name,
        qty: parsed.qty,
        unit: parsed.unit,
        store,
    })
}

/// Pick the effective store: an explicit store on the allow-list, then the
/// catalog's store for this name, then `Unassigned`.
///
/// Stores are matched case-insensitively and returned in the allow-list's spelling.
pub fn resolve_store(
    explicit: Option<&str>,
    name: &str,
    catalog: &IngredientCatalog,
    stores: &[String],
) -> String {
    explicit
        .and_then(|store| known_store(store, stores))
        .or_else(|| {
            catalog
                .lookup(name)
                .and_then(|entry| known_store(&entry.store, stores))
        })
        .unwrap_or_else(|| UNASSIGNED_STORE.to_string())
}

fn known_store(candidate: &str, stores: &[String]) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate.eq_ignore_ascii_case(UNASSIGNED_STORE) {
        return None;
    }
    stores
        .iter()
        .find(|store| store.trim().eq_ignore_ascii_case(candidate))
        .cloned()
}

fn clean_line(line: &str) -> String {
    let decoded = decode_html_symbols(line);
    let text = fragment_text(&decoded);
    let without_bullet = text.trim_start_matches(['-', '*', '•', '·']).trim_start();
    without_bullet.to_string()
}

fn is_noise(line: &str) -> bool {
    if line.chars().count() < 3 {
        return true;
    }
    if !line.chars().any(char::is_alphanumeric) {
        return true;
    }
    if is_markdown_media(line) {
        return true;
    }

    let lower = line.to_lowercase();
    if NOISE_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        return true;
    }

    let bare = lower.trim_matches(|c: char| !c.is_alphanumeric());
    if NOISE_WORDS.contains(&bare) {
        return true;
    }

    let heading: String = lower.chars().filter(|c| c.is_alphanumeric()).collect();
    SECTION_HEADINGS.contains(&heading.as_str())
}

/// `![alt](src)` or a line that is nothing but `[text](href)`.
pub(crate) fn is_markdown_media(line: &str) -> bool {
    let line = line.trim();
    if line.starts_with("![") {
        return true;
    }
    line.starts_with('[') && line.ends_with(')') && line.contains("](")
}

/// A comma-separated row, unless the line opens with a quantity, in which case
/// the commas belong to a freeform line ("1 cup butter, softened").
fn is_csv_line(line: &str) -> bool {
    let Some((first_field, _)) = line.split_once(',') else {
        return false;
    };
    leading_measurement(first_field).is_none()
}

fn parse_csv(line: &str) -> Option<ParsedLine> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let name = clean_name(fields.first().copied().unwrap_or_default());
    if name.is_empty() {
        return None;
    }

    let qty = fields
        .get(1)
        .and_then(|raw| parse_quantity(raw))
        .unwrap_or(1.0);
    let unit = normalize_unit(fields.get(2).copied().unwrap_or_default());
    let store = fields
        .get(3)
        .filter(|store| !store.is_empty())
        .map(|store| store.to_string());

    Some(ParsedLine {
        name,
        qty,
        unit,
        store,
    })
}

fn parse_freeform(line: &str) -> Option<ParsedLine> {
    let (qty, unit, rest) = leading_measurement(line).unwrap_or((1.0, None, line));

    // drop a trailing preparation note: "butter, softened"
    let rest = rest.split(',').next().unwrap_or_default();
    let name = clean_name(rest);
    if name.is_empty() {
        return None;
    }

    Some(ParsedLine {
        name,
        qty,
        unit: unit.unwrap_or(DEFAULT_UNIT).to_string(),
        store: None,
    })
}

/// Leading quantity and optional unit, plus the text after them.
///
/// Handles balanced leading parenthesized measurements recursively, so
/// `(1/2 cup) butter` and `((2 tbsp)) oil` both yield a measurement.
fn leading_measurement(text: &str) -> Option<(f64, Option<&'static str>, &str)> {
    let text = text.trim_start();

    if text.starts_with('(') {
        let close = matching_paren(text)?;
        let (qty, unit, inner_rest) = leading_measurement(&text[1..close])?;
        if !inner_rest.trim().is_empty() {
            return None;
        }
        let rest = &text[close + 1..];
        return Some(match unit {
            Some(unit) => (qty, Some(unit), rest),
            None => match leading_unit(rest) {
                Some((unit, after)) => (qty, Some(unit), after),
                None => (qty, None, rest),
            },
        });
    }

    let (first, after_first) = next_token(text)?;
    let (qty, rest) = match next_token(after_first) {
        Some((second, after_second)) => match parse_quantity(&format!("{first} {second}")) {
            Some(qty) => (qty, after_second),
            // a malformed fraction after the whole part spoils the mixed number: "2 1/0"
            None if single_quantity(first).is_some()
                && is_numeric_token(second)
                && parse_quantity(second).is_none() =>
            {
                (1.0, after_second)
            }
            None => (single_quantity(first)?, after_first),
        },
        None => (single_quantity(first)?, after_first),
    };

    Some(match leading_unit(rest) {
        Some((unit, after)) => (qty, Some(unit), after),
        None => (qty, None, rest),
    })
}

/// A numeric-looking token that does not parse ("1/0") still counts as a
/// quantity of 1.
fn single_quantity(token: &str) -> Option<f64> {
    parse_quantity(token).or_else(|| is_numeric_token(token).then_some(1.0))
}

fn is_numeric_token(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '/' | '.' | ',' | '-'))
}

fn leading_unit(text: &str) -> Option<(&'static str, &str)> {
    let (token, rest) = next_token(text)?;
    let unit = canonical_unit(token.trim_end_matches(','))?;
    Some((unit, rest))
}

fn next_token(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.find(char::is_whitespace) {
        Some(end) => Some((&text[..end], &text[end..])),
        None => Some((text, "")),
    }
}

/// Byte index of the `)` closing the `(` at the start of `text`.
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

fn clean_name(raw: &str) -> String {
    let name = normalize_name(raw);
    let name = name.trim_matches(|c: char| !c.is_alphanumeric() && c != ')' && c != '(');
    let name = name.strip_prefix("of ").unwrap_or(name);
    name.trim().to_string()
}
