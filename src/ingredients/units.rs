//! Static lookup tables for quantities and units.

/// Unicode vulgar fractions and their ASCII spelling.
pub const FRACTION_GLYPHS: &[(char, &str)] = &[
    ('¼', "1/4"),
    ('½', "1/2"),
    ('¾', "3/4"),
    ('⅐', "1/7"),
    ('⅑', "1/9"),
    ('⅒', "1/10"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('⅕', "1/5"),
    ('⅖', "2/5"),
    ('⅗', "3/5"),
    ('⅘', "4/5"),
    ('⅙', "1/6"),
    ('⅚', "5/6"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
];

/// Unit used when a line names no measurement.
pub const DEFAULT_UNIT: &str = "each";

/// Every recognized spelling mapped to its canonical token.
const UNIT_SYNONYMS: &[(&str, &str)] = &[
    ("tablespoon", "tbsp"),
    ("tablespoons", "tbsp"),
    ("tbsp", "tbsp"),
    ("tbsps", "tbsp"),
    ("tbs", "tbsp"),
    ("tbl", "tbsp"),
    ("teaspoon", "tsp"),
    ("teaspoons", "tsp"),
    ("tsp", "tsp"),
    ("tsps", "tsp"),
    ("cup", "cup"),
    ("cups", "cup"),
    ("c", "cup"),
    ("pound", "lb"),
    ("pounds", "lb"),
    ("lb", "lb"),
    ("lbs", "lb"),
    ("ounce", "oz"),
    ("ounces", "oz"),
    ("oz", "oz"),
    ("gram", "g"),
    ("grams", "g"),
    ("g", "g"),
    ("kilogram", "kg"),
    ("kilograms", "kg"),
    ("kg", "kg"),
    ("milliliter", "ml"),
    ("milliliters", "ml"),
    ("millilitre", "ml"),
    ("millilitres", "ml"),
    ("ml", "ml"),
    ("liter", "l"),
    ("liters", "l"),
    ("litre", "l"),
    ("litres", "l"),
    ("l", "l"),
    ("pint", "pint"),
    ("pints", "pint"),
    ("pt", "pint"),
    ("quart", "quart"),
    ("quarts", "quart"),
    ("qt", "quart"),
    ("gallon", "gallon"),
    ("gallons", "gallon"),
    ("gal", "gallon"),
    ("clove", "clove"),
    ("cloves", "clove"),
    ("can", "can"),
    ("cans", "can"),
    ("package", "package"),
    ("packages", "package"),
    ("pkg", "package"),
    ("slice", "slice"),
    ("slices", "slice"),
    ("pinch", "pinch"),
    ("pinches", "pinch"),
    ("dash", "dash"),
    ("dashes", "dash"),
    ("bunch", "bunch"),
    ("bunches", "bunch"),
    ("stick", "stick"),
    ("sticks", "stick"),
    ("piece", "piece"),
    ("pieces", "piece"),
    ("pc", "piece"),
    ("pcs", "piece"),
    ("head", "head"),
    ("heads", "head"),
    ("jar", "jar"),
    ("jars", "jar"),
    ("bottle", "bottle"),
    ("bottles", "bottle"),
    ("bag", "bag"),
    ("bags", "bag"),
    ("box", "box"),
    ("boxes", "box"),
    ("sprig", "sprig"),
    ("sprigs", "sprig"),
    ("each", "each"),
    ("ea", "each"),
];

/// ASCII spelling of a unicode fraction glyph.
pub fn fraction_for_glyph(glyph: char) -> Option<&'static str> {
    FRACTION_GLYPHS
        .iter()
        .find(|(g, _)| *g == glyph)
        .map(|(_, ascii)| *ascii)
}

pub fn is_fraction_glyph(c: char) -> bool {
    fraction_for_glyph(c).is_some()
}

/// Canonical token for a recognized unit spelling, ignoring case and a trailing period.
pub fn canonical_unit(token: &str) -> Option<&'static str> {
    let lower = token.trim().trim_end_matches('.').to_lowercase();
    UNIT_SYNONYMS
        .iter()
        .find(|(spelling, _)| *spelling == lower)
        .map(|(_, canonical)| *canonical)
}

/// Canonical token when recognized, otherwise the lowercased input; `each` when blank.
pub fn normalize_unit(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return DEFAULT_UNIT.to_string();
    }
    canonical_unit(trimmed)
        .map(str::to_string)
        .unwrap_or_else(|| trimmed.to_lowercase())
}
