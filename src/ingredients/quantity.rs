//! Numeric quantity parsing: integers, decimals, fractions, mixed numbers and
//! unicode vulgar fractions.

use super::units::fraction_for_glyph;

/// Parse a quantity such as `2`, `0.5`, `1/2`, `1 1/2`, `1-1/2`, `½` or `1½`.
///
/// Returns `None` for anything that is not a finite positive number, including
/// a zero denominator. A comma is accepted as decimal point (`1,5`) and a
/// trailing comma is ignored. A range like `2-3` resolves to its lower bound.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let expanded = expand_fraction_glyphs(raw);
    let text = expanded.trim().trim_end_matches(',').trim();
    if text.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let value = match tokens.as_slice() {
        [single] => parse_token(single)?,
        [whole, fraction] if !whole.contains('/') && fraction.contains('/') => {
            parse_number(whole)? + parse_fraction(fraction)?
        }
        _ => return None,
    };

    (value.is_finite() && value > 0.0).then_some(value)
}

/// Replace fraction glyphs with ASCII, separating a glyph glued to a digit.
fn expand_fraction_glyphs(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    for c in raw.chars() {
        match fraction_for_glyph(c) {
            Some(ascii) => {
                if out.chars().last().is_some_and(|p| p.is_ascii_digit()) {
                    out.push(' ');
                }
                out.push_str(ascii);
            }
            None => out.push(c),
        }
    }
    out
}

fn parse_token(token: &str) -> Option<f64> {
    if let Some((whole, rest)) = token.split_once('-') {
        let whole = parse_number(whole)?;
        if rest.contains('/') {
            return Some(whole + parse_fraction(rest)?);
        }
        // range: keep the lower bound, but only if the upper bound is numeric too
        parse_number(rest)?;
        return Some(whole);
    }
    if token.contains('/') {
        parse_fraction(token)
    } else {
        parse_number(token)
    }
}

fn parse_fraction(token: &str) -> Option<f64> {
    let (numerator, denominator) = token.split_once('/')?;
    let numerator = parse_number(numerator)?;
    let denominator = parse_number(denominator)?;
    let value = if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    };
    value.is_finite().then_some(value)
}

fn parse_number(token: &str) -> Option<f64> {
    let token = token.trim().trim_end_matches(',');
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }
    let separators = token.chars().filter(|c| *c == '.' || *c == ',').count();
    if separators > 1 || !token.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    token.replace(',', ".").parse::<f64>().ok()
}
