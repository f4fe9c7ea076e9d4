//! Week plan to store-grouped shopping list.

pub mod render;

use crate::ingredients::units::normalize_unit;
use crate::model::{
    normalize_name, DayMode, GroceryLineItem, HouseholdState, IngredientCatalog, MealMode, Recipe,
    WeekPlan, DEFAULT_SERVINGS, UNASSIGNED_STORE,
};
use log::debug;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Merged items for one store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreGroup {
    pub store: String,
    pub items: Vec<GroceryLineItem>,
}

/// Store groups in display order: allow-listed stores first, then any other
/// store a recipe named, then `Unassigned`.
///
/// Serializes as a JSON object keyed by store, preserving that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroceryList {
    groups: Vec<StoreGroup>,
}

impl GroceryList {
    pub fn groups(&self) -> &[StoreGroup] {
        &self.groups
    }

    pub fn items(&self, store: &str) -> Option<&[GroceryLineItem]> {
        self.groups
            .iter()
            .find(|group| group.store == store)
            .map(|group| group.items.as_slice())
    }

    pub fn stores(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.store.as_str())
    }

    /// Total number of line items across all stores.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for GroceryList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.store, &group.items)?;
        }
        map.end()
    }
}

/// Build the grocery list for a week.
///
/// Only planned days and recipe slots count. Each recipe is scaled from its
/// own servings to the slot override, or to `household_servings`. Pantry
/// items are left out. Quantities merge per `(store, name, unit)`; the totals
/// do not depend on the order of days, meals or recipes.
pub fn aggregate(
    plan: &WeekPlan,
    recipes: &[Recipe],
    pantry: &[String],
    catalog: &IngredientCatalog,
    stores: &[String],
    household_servings: u32,
) -> GroceryList {
    // first recipe wins on duplicate ids
    let mut by_id: HashMap<&str, &Recipe> = HashMap::new();
    for recipe in recipes {
        by_id.entry(recipe.id.as_str()).or_insert(recipe);
    }

    let pantry: HashSet<String> = pantry
        .iter()
        .map(|name| normalize_name(name))
        .filter(|name| !name.is_empty())
        .collect();
    let household_servings = household_servings.max(1);

    let mut contributions: BTreeMap<(String, String, String), Vec<f64>> = BTreeMap::new();

    for day in plan.days.iter().filter(|day| day.day_mode == DayMode::Planned) {
        for (slot, meal) in day.meals() {
            if meal.mode() != MealMode::Recipe {
                continue;
            }
            let Some(recipe_id) = meal.recipe_id() else {
                continue;
            };
            let Some(recipe) = by_id.get(recipe_id) else {
                debug!(
                    "Skipping unknown recipe {} for {:?} {}",
                    recipe_id,
                    day.day,
                    slot.as_str()
                );
                continue;
            };

            let target = meal.servings_override().unwrap_or(household_servings).max(1);
            let scale = f64::from(target) / f64::from(recipe.servings.max(1));

            for ingredient in &recipe.ingredients {
                let name = normalize_name(&ingredient.name);
                if name.is_empty() || pantry.contains(&name) {
                    continue;
                }
                let qty = if ingredient.qty.is_finite() && ingredient.qty > 0.0 {
                    ingredient.qty
                } else {
                    1.0
                };
                let store = effective_store(&ingredient.store, &name, catalog, stores);
                let unit = normalize_unit(&ingredient.unit);
                contributions
                    .entry((store, name, unit))
                    .or_default()
                    .push(qty * scale);
            }
        }
    }

    let mut grouped: BTreeMap<String, Vec<GroceryLineItem>> = BTreeMap::new();
    for ((store, name, unit), mut amounts) in contributions {
        // fixed summation order keeps totals bit-identical
        amounts.sort_by(f64::total_cmp);
        let qty = amounts.iter().sum();
        grouped
            .entry(store.clone())
            .or_default()
            .push(GroceryLineItem {
                name,
                qty,
                unit,
                store,
            });
    }

    let mut groups = Vec::new();
    for store in known_stores(stores) {
        let items = grouped.remove(&store).unwrap_or_default();
        groups.push(StoreGroup { store, items });
    }
    let unassigned = grouped.remove(UNASSIGNED_STORE).unwrap_or_default();
    for (store, items) in grouped {
        groups.push(StoreGroup { store, items });
    }
    groups.push(StoreGroup {
        store: UNASSIGNED_STORE.to_string(),
        items: unassigned,
    });

    for group in &mut groups {
        group.items.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.unit.cmp(&b.unit))
        });
    }

    GroceryList { groups }
}

/// [`aggregate`] over a whole household snapshot.
pub fn aggregate_state(state: &HouseholdState) -> GroceryList {
    aggregate(
        &state.week_plan,
        &state.recipes,
        &state.pantry,
        &state.catalog,
        &state.stores,
        state.household_servings.unwrap_or(DEFAULT_SERVINGS),
    )
}

/// Allow-listed stores, trimmed and deduplicated, without `Unassigned`.
fn known_stores(stores: &[String]) -> Vec<String> {
    let mut known: Vec<String> = Vec::new();
    for store in stores {
        let store = store.trim();
        if store.is_empty()
            || store.eq_ignore_ascii_case(UNASSIGNED_STORE)
            || known.iter().any(|k| k.eq_ignore_ascii_case(store))
        {
            continue;
        }
        known.push(store.to_string());
    }
    known
}

/// The ingredient's own store unless it is `Unassigned`, then the catalog's,
/// then `Unassigned`. Allow-listed stores keep their allow-list spelling.
fn effective_store(
    explicit: &str,
    name: &str,
    catalog: &IngredientCatalog,
    stores: &[String],
) -> String {
    let named = |store: &str| {
        let store = store.trim();
        if store.is_empty() || store.eq_ignore_ascii_case(UNASSIGNED_STORE) {
            return None;
        }
        let spelled = stores
            .iter()
            .map(|known| known.trim())
            .find(|known| known.eq_ignore_ascii_case(store))
            .unwrap_or(store);
        Some(spelled.to_string())
    };

    named(explicit)
        .or_else(|| catalog.lookup(name).and_then(|entry| named(&entry.store)))
        .unwrap_or_else(|| UNASSIGNED_STORE.to_string())
}
