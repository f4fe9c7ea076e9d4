use mealplan::extractors::Strategy;
use mealplan::{extract, extract_recipe, IngredientCatalog, MealSlot};

fn run(text: &str, url: &str) -> mealplan::Extraction {
    extract(text, url, &IngredientCatalog::new(), &[])
}

#[test]
fn test_json_ld_beats_misleading_markup() {
    let html = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <script type="application/ld+json">
            {"@type":"Recipe","name":"JSON-LD Lemon Salmon","recipeYield":"4 servings","recipeIngredient":["1 lb salmon","2 tbsp lemon juice"],"recipeInstructions":[{"@type":"HowToStep","text":"Season the salmon."},{"@type":"HowToStep","text":"Bake for 15 minutes."}]}
            </script>
        </head>
        <body>
            <h1>Incorrect fallback title</h1>
            <h2>Ingredients</h2>
            <ul><li>1 cup of something else</li></ul>
        </body>
        </html>
    "#;

    let extraction = run(html, "https://example.com/lemon-salmon");

    assert_eq!(extraction.strategy, Some(Strategy::JsonLd));
    let recipe = extraction.recipe;
    assert_eq!(recipe.title, "JSON-LD Lemon Salmon");
    assert_eq!(recipe.servings, 4);
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.ingredients[0].name, "salmon");
    assert_eq!(recipe.ingredients[1].unit, "tbsp");
    assert_eq!(recipe.steps, vec!["Season the salmon.", "Bake for 15 minutes."]);
    assert_eq!(recipe.source_url, "https://example.com/lemon-salmon");
}

#[test]
fn test_malformed_json_ld_falls_through_to_heuristic() {
    let html = r#"
        <html><head>
        <script type="application/ld+json">{"@type": "Recipe", "name": </script>
        </head><body>
        <h1>Banana Bread</h1>
        <h2>Ingredients</h2>
        <ul><li>3 ripe bananas</li><li>2 cups flour</li></ul>
        <h2>Directions</h2>
        <ol><li>Mash the bananas.</li><li>Fold in the flour and bake.</li></ol>
        <h3>Comments</h3>
        <p>Loved it!</p>
        </body></html>
    "#;

    let extraction = run(html, "https://example.com/banana-bread");

    assert_eq!(extraction.strategy, Some(Strategy::Heuristic));
    assert_eq!(extraction.recipe.title, "Banana Bread");
    assert_eq!(extraction.recipe.ingredients.len(), 2);
    assert_eq!(
        extraction.recipe.steps,
        vec!["Mash the bananas.", "Fold in the flour and bake."]
    );
}

#[test]
fn test_domain_adapter_vocabulary() {
    let html = r#"
        <h1>Shakshuka</h1>
        <h2>Ingredients</h2>
        <ul><li>6 eggs</li><li>1 can crushed tomatoes</li></ul>
        <h2>Preparation</h2>
        <p>Simmer the tomatoes.</p>
        <p>Crack in the eggs and cover.</p>
    "#;

    let extraction = run(html, "https://cooking.nytimes.com/recipes/1234-shakshuka");

    assert_eq!(extraction.strategy, Some(Strategy::DomainAdapter));
    assert_eq!(extraction.recipe.ingredients.len(), 2);
    assert_eq!(extraction.recipe.steps.len(), 2);
}

#[test]
fn test_read_proxy_markdown() {
    let text = "Title: Overnight Oatmeal\n\nURL Source: https://example.com/oats\n\nMarkdown Content:\n![oats](https://example.com/oats.jpg)\n\n## Ingredients\n\n*   1/2 cup rolled oats\n*   1/2 cup milk\n*   1 tbsp maple syrup\n\n## Instructions\n\n1.  Stir everything together.\n2.  Chill overnight.\n\n## Nutrition\n\nCalories: 300";

    let recipe = extract_recipe(text, "https://example.com/oats", &IngredientCatalog::new(), &[]);

    assert_eq!(recipe.title, "Overnight Oatmeal");
    assert_eq!(recipe.description, "");
    assert_eq!(recipe.meal_type, MealSlot::Breakfast);
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.steps, vec!["Stir everything together.", "Chill overnight."]);
}

#[test]
fn test_empty_input_gives_default_recipe() {
    let recipe = extract_recipe("", "https://example.com/weeknight-tacos", &IngredientCatalog::new(), &[]);

    assert_eq!(recipe.title, "Weeknight Tacos");
    assert_eq!(recipe.servings, 4);
    assert_eq!(recipe.meal_type, MealSlot::Dinner);
    assert!(recipe.ingredients.is_empty());
    assert!(recipe.steps.is_empty());
}

#[test]
fn test_extracted_recipe_json_shape() {
    let recipe = extract_recipe(
        "Tea\nIngredients\n1 bag tea\nSteps\nSteep it.",
        "https://example.com/tea",
        &IngredientCatalog::new(),
        &[],
    );
    let json = serde_json::to_value(&recipe).unwrap();

    assert_eq!(json["title"], "Tea");
    assert_eq!(json["mealType"], "dinner");
    assert_eq!(json["sourceUrl"], "https://example.com/tea");
    assert_eq!(json["ingredients"][0]["unit"], "bag");
    assert_eq!(json["ingredients"][0]["store"], "Unassigned");
}

#[test]
fn test_self_closing_svg_does_not_hide_the_recipe() {
    let html = r#"<header><svg class="logo" viewBox="0 0 10 10"/></header><h1>Onion Soup</h1><h2>Ingredients</h2><ul><li>2 onions</li><li>1 l stock</li></ul><h2>Instructions</h2><ol><li>Slice the onions.</li><li>Simmer in stock.</li></ol>"#;

    let extraction = run(html, "https://example.com/soup");

    assert_eq!(extraction.strategy, Some(Strategy::Heuristic));
    let recipe = extraction.recipe;
    assert_eq!(recipe.title, "Onion Soup");
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.ingredients[1].unit, "l");
    assert_eq!(recipe.ingredients[1].name, "stock");
    assert_eq!(recipe.steps, vec!["Slice the onions.", "Simmer in stock."]);
}

#[test]
fn test_paragraphs_inside_list_items_leave_no_skipped_lines() {
    let html = "<h1>Flatbread</h1><h2>Ingredients</h2><ul><li><p>3 cups flour</p></li><li><p>1 tsp salt</p></li></ul><h2>Steps</h2><ol><li><p>Mix the dough.</p></li><li><p>Cook in a hot pan.</p></li></ol>";

    let extraction = run(html, "https://example.com/flatbread");

    assert!(extraction.skipped_lines.is_empty(), "{:?}", extraction.skipped_lines);
    assert_eq!(extraction.recipe.ingredients.len(), 2);
    assert_eq!(extraction.recipe.ingredients[0].name, "flour");
    assert_eq!(extraction.recipe.steps, vec!["Mix the dough.", "Cook in a hot pan."]);
}
