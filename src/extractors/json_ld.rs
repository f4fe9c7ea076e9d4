use super::{first_integer, non_empty, Candidate, Extractor, ParsingContext, Strategy};
use crate::html::{decode_html_symbols, fragment_lines, fragment_text};
use crate::ingredients::parse_ingredient_lines;
use crate::model::MealSlot;
use log::debug;
use scraper::Selector;
use serde_json::Value;

/// Reads schema.org `Recipe` nodes from JSON-LD blocks.
pub struct JsonLdExtractor;

impl JsonLdExtractor {
    /// Raw JSON-LD payloads: every ld+json script, or the whole text when the
    /// input is a bare JSON document.
    fn payloads(&self, context: &ParsingContext) -> Vec<String> {
        let mut payloads = Vec::new();
        if let Ok(selector) = Selector::parse("script[type*='ld+json']") {
            payloads.extend(
                context
                    .document
                    .select(&selector)
                    .map(|script| script.inner_html()),
            );
        }
        debug!(
            "JsonLdExtractor: Found {} JSON-LD script tags",
            payloads.len()
        );

        if payloads.is_empty() {
            let trimmed = context.text.trim();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                debug!("JsonLdExtractor: treating whole input as JSON-LD");
                payloads.push(trimmed.to_string());
            }
        }
        payloads
    }

    fn convert_to_candidate(&self, node: &Value, context: &ParsingContext) -> Candidate {
        let mut candidate = Candidate::new(Strategy::JsonLd);

        candidate.title = node.get("name").and_then(text_value);
        candidate.description = node.get("description").and_then(|description| {
            text_value(description).or_else(|| description.get("text").and_then(text_value))
        });
        candidate.servings = node.get("recipeYield").and_then(yield_servings);
        candidate.meal_type = ["recipeCategory", "keywords"]
            .iter()
            .filter_map(|key| node.get(*key))
            .flat_map(string_values)
            .find_map(|value| MealSlot::infer(&value))
            .or_else(|| candidate.title.as_deref().and_then(MealSlot::infer));

        let parsed =
            parse_ingredient_lines(ingredient_lines(node), context.catalog, context.stores);
        candidate.ingredients = parsed.ingredients;
        candidate.skipped_lines = parsed.skipped_lines;
        candidate.steps = instruction_lines(node);

        candidate
    }
}

impl Extractor for JsonLdExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::JsonLd
    }

    fn parse(&self, context: &ParsingContext) -> Option<Candidate> {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.url);

        let documents: Vec<Value> = self
            .payloads(context)
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| {
                let parsed = parse_payload(raw);
                if parsed.is_none() {
                    debug!("JsonLdExtractor: Failed to parse JSON-LD {}", index);
                }
                parsed
            })
            .collect();

        let mut nodes = Vec::new();
        for document in &documents {
            collect_recipe_nodes(document, &mut nodes);
        }
        debug!("JsonLdExtractor: Found {} Recipe nodes", nodes.len());

        // richest node wins; ties keep document order
        let mut best: Option<(&Value, usize)> = None;
        for node in nodes {
            let size = ingredient_lines(node).len() + instruction_lines(node).len();
            if best.map_or(true, |(_, best_size)| size > best_size) {
                best = Some((node, size));
            }
        }

        best.map(|(node, _)| self.convert_to_candidate(node, context))
    }
}

fn parse_payload(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    serde_json::from_str::<Value>(trimmed)
        .ok()
        .or_else(|| serde_json::from_str::<Value>(&sanitize_json(trimmed)).ok())
}

/// Light repair for hand-written JSON-LD: CDATA/comment wrappers and
/// trailing commas before a closing bracket.
fn sanitize_json(json_str: &str) -> String {
    let unwrapped = json_str
        .trim()
        .trim_start_matches("//<![CDATA[")
        .trim_start_matches("<!--")
        .trim_end_matches("//]]>")
        .trim_end_matches("-->")
        .trim();

    let mut cleaned = String::with_capacity(unwrapped.len());
    let mut in_string = false;
    let mut escaped = false;
    let chars: Vec<char> = unwrapped.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            cleaned.push(c);
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                cleaned.push(c);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if !matches!(next, Some(']') | Some('}')) {
                    cleaned.push(c);
                }
            }
            _ => cleaned.push(c),
        }
    }
    cleaned
}

/// Collect every node whose `@type` names Recipe, walking arrays, `@graph`
/// and nested objects.
fn collect_recipe_nodes<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_recipe_nodes(item, out);
            }
        }
        Value::Object(map) => {
            if is_recipe_type(value) {
                out.push(value);
            }
            for child in map.values() {
                collect_recipe_nodes(child, out);
            }
        }
        _ => {}
    }
}

fn is_recipe_type(value: &Value) -> bool {
    let names_recipe = |type_value: &Value| {
        type_value.as_str().is_some_and(|type_str| {
            let local = type_str.rsplit(['/', ':']).next().unwrap_or(type_str);
            local.trim().eq_ignore_ascii_case("recipe")
        })
    };
    match value.get("@type") {
        Some(Value::Array(types)) => types.iter().any(names_recipe),
        Some(type_value) => names_recipe(type_value),
        None => false,
    }
}

fn ingredient_lines(node: &Value) -> Vec<String> {
    let Some(ingredients) = node
        .get("recipeIngredient")
        .or_else(|| node.get("ingredients"))
    else {
        return Vec::new();
    };

    match ingredients {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(_) => {
                    let name = item.get("name").and_then(text_value)?;
                    match item.get("amount").and_then(text_value) {
                        Some(amount) => Some(format!("{amount} {name}")),
                        None => Some(name),
                    }
                }
                other => text_value(other),
            })
            .collect(),
        Value::String(text) => fragment_lines(&decode_html_symbols(text)),
        _ => Vec::new(),
    }
}

fn instruction_lines(node: &Value) -> Vec<String> {
    let mut steps = Vec::new();
    if let Some(instructions) = node.get("recipeInstructions") {
        collect_steps(instructions, &mut steps);
    }
    steps
}

/// Flatten strings, `HowToStep`s and `HowToSection.itemListElement` lists.
fn collect_steps(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(text) => {
            // block markup inside a single instruction string separates steps
            out.extend(fragment_lines(&decode_html_symbols(text)));
        }
        Value::Array(items) => {
            for item in items {
                collect_steps(item, out);
            }
        }
        Value::Object(_) => {
            if let Some(elements) = value.get("itemListElement") {
                collect_steps(elements, out);
            } else if let Some(text) = value.get("text").filter(|text| text.is_string()) {
                collect_steps(text, out);
            } else if let Some(name) = value.get("name").filter(|name| name.is_string()) {
                collect_steps(name, out);
            }
        }
        _ => {}
    }
}

/// Decoded, tag-free, whitespace-collapsed text of a JSON string or number.
fn text_value(value: &Value) -> Option<String> {
    let raw = match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    non_empty(fragment_text(&decode_html_symbols(&raw)))
}

fn string_values(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(text_value).collect(),
        other => text_value(other).into_iter().collect(),
    }
}

fn yield_servings(value: &Value) -> Option<u32> {
    let servings = match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().map(|n| n.round() as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => first_integer(text),
        Value::Array(items) => items.iter().find_map(yield_servings),
        _ => None,
    };
    servings.filter(|servings| *servings > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IngredientCatalog;
    use serde_json::json;

    fn create_html_document(json_ld: &str) -> String {
        format!(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <script type="application/ld+json">
                    {json_ld}
                </script>
            </head>
            <body><h1>Incorrect fallback title</h1></body>
            </html>
            "#
        )
    }

    fn parse_html(html: &str) -> Option<Candidate> {
        let catalog = IngredientCatalog::new();
        let context = ParsingContext::new(html, "https://example.com/recipe", &catalog, &[]);
        JsonLdExtractor.parse(&context)
    }

    #[test]
    fn test_parse_basic_recipe() {
        let html = create_html_document(
            r#"{"@type":"Recipe","name":"JSON-LD Lemon Salmon","recipeYield":"4 servings","recipeIngredient":["1 lb salmon","2 tbsp lemon juice"],"recipeInstructions":[{"@type":"HowToStep","text":"Season the salmon."},{"@type":"HowToStep","text":"Bake for 15 minutes."}]}"#,
        );

        let candidate = parse_html(&html).unwrap();

        assert_eq!(candidate.title.as_deref(), Some("JSON-LD Lemon Salmon"));
        assert_eq!(candidate.servings, Some(4));
        assert_eq!(candidate.ingredients.len(), 2);
        assert_eq!(candidate.ingredients[1].name, "lemon juice");
        assert_eq!(
            candidate.steps,
            vec!["Season the salmon.", "Bake for 15 minutes."]
        );
    }

    #[test]
    fn test_graph_and_type_arrays() {
        let html = create_html_document(
            r#"{
                "@context": "https://schema.org",
                "@graph": [
                    {"@type": "WebPage", "name": "Page"},
                    {"@type": ["Recipe", "NewsArticle"], "name": "Graph Pancakes",
                     "recipeCategory": ["Breakfast"],
                     "recipeIngredient": ["2 cups flour", "2 eggs"],
                     "recipeInstructions": [
                        {"@type": "HowToSection", "name": "Batter", "itemListElement": [
                            {"@type": "HowToStep", "text": "Whisk everything."},
                            {"@type": "HowToStep", "name": "Rest 10 minutes."}
                        ]},
                        {"@type": "HowToSection", "name": "Cook", "itemListElement": [
                            {"@type": "HowToStep", "text": "Fry in butter."}
                        ]}
                     ]}
                ]
            }"#,
        );

        let candidate = parse_html(&html).unwrap();

        assert_eq!(candidate.title.as_deref(), Some("Graph Pancakes"));
        assert_eq!(candidate.meal_type, Some(MealSlot::Breakfast));
        assert_eq!(
            candidate.steps,
            vec!["Whisk everything.", "Rest 10 minutes.", "Fry in butter."]
        );
    }

    #[test]
    fn test_picks_richest_recipe_node() {
        let html = format!(
            "{}{}",
            create_html_document(
                r#"{"@type":"recipe","name":"Teaser","recipeIngredient":["1 egg"]}"#
            ),
            create_html_document(
                r#"[{"@type":"Recipe","name":"Full","recipeIngredient":["1 egg","1 cup milk"],"recipeInstructions":"Whisk.\nCook."}]"#
            )
        );

        let candidate = parse_html(&html).unwrap();

        assert_eq!(candidate.title.as_deref(), Some("Full"));
        assert_eq!(candidate.steps, vec!["Whisk.", "Cook."]);
    }

    #[test]
    fn test_malformed_json_is_ignored() {
        let html = create_html_document(r#"{"@type": "Recipe", "name": "#);
        assert!(parse_html(&html).is_none());
    }

    #[test]
    fn test_trailing_commas_are_repaired() {
        let html = create_html_document(
            r#"{"@type": "Recipe", "name": "Lax, Dill", "recipeIngredient": ["1 lb salmon",],}"#,
        );
        let candidate = parse_html(&html).unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Lax, Dill"));
        assert_eq!(candidate.ingredients.len(), 1);
    }

    #[test]
    fn test_raw_json_input() {
        let raw = r#"{"@type":"Recipe","name":"Raw","recipeIngredient":["1 onion"],"recipeInstructions":["Chop."]}"#;
        let candidate = parse_html(raw).unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Raw"));
        assert_eq!(candidate.steps, vec!["Chop."]);
    }

    #[test]
    fn test_no_recipe_nodes() {
        let html = create_html_document(r#"{"@type":"Organization","name":"Acme"}"#);
        assert!(parse_html(&html).is_none());
    }

    #[test]
    fn test_yield_servings() {
        assert_eq!(yield_servings(&json!(6)), Some(6));
        assert_eq!(yield_servings(&json!("Serves 8")), Some(8));
        assert_eq!(yield_servings(&json!(["a batch", "12 cookies"])), Some(12));
        assert_eq!(yield_servings(&json!("0")), None);
        assert_eq!(yield_servings(&json!(null)), None);
    }

    #[test]
    fn test_description_object_and_entities() {
        let html = create_html_document(
            r#"{"@type":"Recipe","name":"Mac &amp;amp; Cheese","description":{"text":"<p>Creamy &amp; rich</p>"}}"#,
        );
        let candidate = parse_html(&html).unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Mac & Cheese"));
        assert_eq!(candidate.description.as_deref(), Some("Creamy & rich"));
    }
}
