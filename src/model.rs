use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Store name used when neither the line nor the catalog names one.
pub const UNASSIGNED_STORE: &str = "Unassigned";

/// Servings assumed when a page states no yield.
pub const DEFAULT_SERVINGS: u32 = 4;

/// A single structured ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub qty: f64,
    pub unit: String,
    pub store: String,
}

/// Breakfast, lunch or dinner. Doubles as the meal type of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    #[default]
    Dinner,
}

impl MealSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }

    /// Guess a meal slot from free text such as a recipe category or title.
    pub fn infer(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        if ["breakfast", "brunch", "pancake", "waffle", "oatmeal", "granola"]
            .iter()
            .any(|w| lower.contains(w))
        {
            Some(MealSlot::Breakfast)
        } else if ["lunch", "sandwich", "salad", "wrap"]
            .iter()
            .any(|w| lower.contains(w))
        {
            Some(MealSlot::Lunch)
        } else if ["dinner", "main course", "main dish", "entree", "supper"]
            .iter()
            .any(|w| lower.contains(w))
        {
            Some(MealSlot::Dinner)
        } else {
            None
        }
    }
}

/// The structured result of running the extraction pipeline over page text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecipe {
    pub title: String,
    pub meal_type: MealSlot,
    pub description: String,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    pub source_url: String,
}

/// A recipe owned by the persistence layer, read by the grocery engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub meal_type: MealSlot,
    #[serde(default)]
    pub description: String,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub source_url: String,
}

impl Recipe {
    /// Turn an approved import draft into a stored recipe.
    pub fn from_extracted(id: impl Into<String>, recipe: ExtractedRecipe) -> Self {
        Recipe {
            id: id.into(),
            title: recipe.title,
            meal_type: recipe.meal_type,
            description: recipe.description,
            servings: recipe.servings.max(1),
            ingredients: recipe.ingredients,
            steps: recipe.steps,
            source_url: recipe.source_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub store: String,
    #[serde(default)]
    pub tag: String,
}

/// Normalized ingredient name to preferred store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl IngredientCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, store: impl Into<String>, tag: impl Into<String>) {
        self.entries.insert(
            normalize_name(name),
            CatalogEntry {
                store: store.into(),
                tag: tag.into(),
            },
        );
    }

    pub fn lookup(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lowercase, trim and collapse inner whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayMode {
    #[default]
    Planned,
    Leftovers,
    EatOut,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealMode {
    Recipe,
    Leftovers,
    EatOut,
    #[default]
    Skip,
}

/// One meal slot of a day.
///
/// `recipe_id` is only ever set when `mode` is [`MealMode::Recipe`]; both the
/// constructors and deserialization drop a stray id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MealPlanRecord")]
pub struct MealPlan {
    mode: MealMode,
    recipe_id: Option<String>,
    servings_override: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealPlanRecord {
    #[serde(default)]
    mode: MealMode,
    #[serde(default)]
    recipe_id: Option<String>,
    #[serde(default)]
    servings_override: Option<u32>,
}

impl From<MealPlanRecord> for MealPlan {
    fn from(record: MealPlanRecord) -> Self {
        match record.mode {
            MealMode::Recipe => MealPlan {
                mode: MealMode::Recipe,
                recipe_id: record.recipe_id,
                servings_override: record.servings_override,
            },
            mode => MealPlan::with_mode(mode),
        }
    }
}

impl MealPlan {
    pub fn recipe(recipe_id: impl Into<String>, servings_override: Option<u32>) -> Self {
        MealPlan {
            mode: MealMode::Recipe,
            recipe_id: Some(recipe_id.into()),
            servings_override,
        }
    }

    /// A slot without a recipe (`leftovers`, `eat-out` or `skip`).
    pub fn with_mode(mode: MealMode) -> Self {
        MealPlan {
            mode,
            recipe_id: None,
            servings_override: None,
        }
    }

    pub fn mode(&self) -> MealMode {
        self.mode
    }

    pub fn recipe_id(&self) -> Option<&str> {
        self.recipe_id.as_deref()
    }

    pub fn servings_override(&self) -> Option<u32> {
        self.servings_override
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: Weekday,
    #[serde(default)]
    pub day_mode: DayMode,
    #[serde(default)]
    pub breakfast: MealPlan,
    #[serde(default)]
    pub lunch: MealPlan,
    #[serde(default)]
    pub dinner: MealPlan,
}

impl DayPlan {
    pub fn new(day: Weekday) -> Self {
        DayPlan {
            day,
            day_mode: DayMode::Planned,
            breakfast: MealPlan::default(),
            lunch: MealPlan::default(),
            dinner: MealPlan::default(),
        }
    }

    pub fn set_meal(&mut self, slot: MealSlot, meal: MealPlan) {
        match slot {
            MealSlot::Breakfast => self.breakfast = meal,
            MealSlot::Lunch => self.lunch = meal,
            MealSlot::Dinner => self.dinner = meal,
        }
    }

    /// Slots in breakfast, lunch, dinner order.
    pub fn meals(&self) -> [(MealSlot, &MealPlan); 3] {
        [
            (MealSlot::Breakfast, &self.breakfast),
            (MealSlot::Lunch, &self.lunch),
            (MealSlot::Dinner, &self.dinner),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub days: Vec<DayPlan>,
}

/// One merged row of a grocery list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryLineItem {
    pub name: String,
    pub qty: f64,
    pub unit: String,
    pub store: String,
}

/// Everything the grocery engine reads, as handed over by the state store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdState {
    pub week_plan: WeekPlan,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub pantry: Vec<String>,
    #[serde(default)]
    pub catalog: IngredientCatalog,
    #[serde(default)]
    pub stores: Vec<String>,
    #[serde(default)]
    pub household_servings: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_plan_drops_recipe_id_outside_recipe_mode() {
        let meal: MealPlan =
            serde_json::from_str(r#"{"mode":"eat-out","recipeId":"r1","servingsOverride":2}"#)
                .unwrap();
        assert_eq!(meal.mode(), MealMode::EatOut);
        assert!(meal.recipe_id().is_none());
        assert!(meal.servings_override().is_none());

        let meal: MealPlan =
            serde_json::from_str(r#"{"mode":"recipe","recipeId":"r1","servingsOverride":6}"#)
                .unwrap();
        assert_eq!(meal.recipe_id(), Some("r1"));
        assert_eq!(meal.servings_override(), Some(6));
    }

    #[test]
    fn test_day_plan_wire_format() {
        let day: DayPlan = serde_json::from_str(
            r#"{"day":"friday","dayMode":"eat-out","dinner":{"mode":"recipe","recipeId":"tacos"}}"#,
        )
        .unwrap();
        assert_eq!(day.day, Weekday::Friday);
        assert_eq!(day.day_mode, DayMode::EatOut);
        assert_eq!(day.breakfast.mode(), MealMode::Skip);
        assert_eq!(day.dinner.recipe_id(), Some("tacos"));
    }

    #[test]
    fn test_catalog_lookup_is_normalized() {
        let mut catalog = IngredientCatalog::new();
        catalog.insert("  Olive   Oil ", "Costco", "pantry");
        assert_eq!(catalog.lookup("olive oil").unwrap().store, "Costco");
        assert_eq!(catalog.lookup("OLIVE OIL").unwrap().tag, "pantry");
        assert!(catalog.lookup("butter").is_none());
    }

    #[test]
    fn test_extracted_recipe_serializes_camel_case() {
        let recipe = ExtractedRecipe {
            title: "Toast".to_string(),
            meal_type: MealSlot::Breakfast,
            description: String::new(),
            servings: 1,
            ingredients: vec![],
            steps: vec!["Toast the bread.".to_string()],
            source_url: "https://example.com/toast".to_string(),
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["mealType"], "breakfast");
        assert_eq!(json["sourceUrl"], "https://example.com/toast");
    }

    #[test]
    fn test_recipe_from_extracted() {
        let extracted = ExtractedRecipe {
            title: "Toast".to_string(),
            meal_type: MealSlot::Breakfast,
            description: "Crisp.".to_string(),
            servings: 0,
            ingredients: vec![Ingredient {
                name: "bread".to_string(),
                qty: 2.0,
                unit: "slice".to_string(),
                store: UNASSIGNED_STORE.to_string(),
            }],
            steps: vec!["Toast the bread.".to_string()],
            source_url: "https://example.com/toast".to_string(),
        };

        let recipe = Recipe::from_extracted("toast", extracted);

        assert_eq!(recipe.id, "toast");
        assert_eq!(recipe.title, "Toast");
        assert_eq!(recipe.meal_type, MealSlot::Breakfast);
        assert_eq!(recipe.servings, 1);
        assert_eq!(recipe.ingredients.len(), 1);
        assert_eq!(recipe.source_url, "https://example.com/toast");
    }

    #[test]
    fn test_meal_slot_inference() {
        assert_eq!(MealSlot::infer("Breakfast"), Some(MealSlot::Breakfast));
        assert_eq!(MealSlot::infer("Main Course"), Some(MealSlot::Dinner));
        assert_eq!(MealSlot::infer("Chicken Caesar Salad"), Some(MealSlot::Lunch));
        assert_eq!(MealSlot::infer("Lemon Salmon"), None);
    }
}
