use mealplan::{parse_ingredient_line, parse_ingredient_text, IngredientCatalog};

#[test]
fn test_commerce_noise_is_skipped() {
    let parsed = parse_ingredient_text(
        "Add To Cart\nShop\n1/2 cup butter\nSold out",
        &IngredientCatalog::new(),
        &[],
    );

    assert_eq!(parsed.ingredients.len(), 1);
    let butter = &parsed.ingredients[0];
    assert_eq!(butter.name, "butter");
    assert_eq!(butter.qty, 0.5);
    assert_eq!(butter.unit, "cup");
    assert_eq!(butter.store, "Unassigned");
    assert_eq!(parsed.skipped_lines, vec!["Add To Cart", "Shop", "Sold out"]);
}

#[test]
fn test_blank_lines_are_not_reported() {
    let parsed = parse_ingredient_text("\n\n2 eggs\n   \n", &IngredientCatalog::new(), &[]);
    assert_eq!(parsed.ingredients.len(), 1);
    assert!(parsed.skipped_lines.is_empty());
}

#[test]
fn test_malformed_fraction_does_not_fail() {
    let ingredient =
        parse_ingredient_line("1/0 cup sugar", &IngredientCatalog::new(), &[]).unwrap();
    assert_eq!(ingredient.qty, 1.0);
    assert_eq!(ingredient.name, "sugar");
}

#[test]
fn test_mixed_glyph_and_entities() {
    let catalog = IngredientCatalog::new();

    let ingredient = parse_ingredient_line("1½ cups rolled oats", &catalog, &[]).unwrap();
    assert_eq!(ingredient.qty, 1.5);
    assert_eq!(ingredient.unit, "cup");
    assert_eq!(ingredient.name, "rolled oats");

    let ingredient =
        parse_ingredient_line("&lt;b&gt;2&lt;/b&gt; Tbsp. honey", &catalog, &[]).unwrap();
    assert_eq!(ingredient.qty, 2.0);
    assert_eq!(ingredient.unit, "tbsp");
    assert_eq!(ingredient.name, "honey");
}

#[test]
fn test_catalog_assigns_allow_listed_store() {
    let stores = vec!["Trader Joe's".to_string(), "Safeway".to_string()];
    let mut catalog = IngredientCatalog::new();
    catalog.insert("Greek Yogurt", "Trader Joe's", "dairy");
    catalog.insert("bananas", "Whole Foods", "produce");

    let parsed = parse_ingredient_text(
        "2 cups greek yogurt\n3 bananas\nbread, 1, loaf, SAFEWAY",
        &catalog,
        &stores,
    );

    let stores: Vec<&str> = parsed
        .ingredients
        .iter()
        .map(|ingredient| ingredient.store.as_str())
        .collect();
    assert_eq!(stores, vec!["Trader Joe's", "Unassigned", "Safeway"]);
    assert_eq!(parsed.ingredients[2].unit, "loaf");
}
