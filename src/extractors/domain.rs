use super::sections::build_candidate;
use super::{Candidate, Extractor, ParsingContext, Strategy};
use crate::html::document_lines;
use log::debug;
use url::Url;

/// Heading vocabulary for one family of recipe sites.
#[derive(Debug)]
pub struct SiteAdapter {
    pub name: &'static str,
    /// Hosts this adapter applies to; subdomains match too
    pub hostname_suffixes: &'static [&'static str],
    pub ingredient_headings: &'static [&'static str],
    pub step_headings: &'static [&'static str],
}

pub static SITE_ADAPTERS: &[SiteAdapter] = &[
    SiteAdapter {
        name: "Food Network",
        hostname_suffixes: &["foodnetwork.com", "foodnetwork.co.uk"],
        // the ingredient checklist opens with a "Deselect All" toggle
        ingredient_headings: &["Deselect All", "Ingredients"],
        step_headings: &["Directions"],
    },
    SiteAdapter {
        name: "Allrecipes",
        hostname_suffixes: &["allrecipes.com"],
        ingredient_headings: &["Ingredients"],
        step_headings: &["Directions", "Steps"],
    },
    SiteAdapter {
        name: "BBC Good Food",
        hostname_suffixes: &["bbcgoodfood.com"],
        ingredient_headings: &["Ingredients"],
        step_headings: &["Method"],
    },
    SiteAdapter {
        name: "NYT Cooking",
        hostname_suffixes: &["cooking.nytimes.com"],
        ingredient_headings: &["Ingredients"],
        step_headings: &["Preparation"],
    },
    SiteAdapter {
        name: "Conde Nast",
        hostname_suffixes: &["bonappetit.com", "epicurious.com"],
        ingredient_headings: &["Ingredients"],
        step_headings: &["Preparation"],
    },
    SiteAdapter {
        name: "Serious Eats",
        hostname_suffixes: &["seriouseats.com", "simplyrecipes.com"],
        ingredient_headings: &["Ingredients"],
        step_headings: &["Directions", "Method"],
    },
    SiteAdapter {
        name: "WordPress recipe card",
        hostname_suffixes: &["budgetbytes.com", "cookieandkate.com", "minimalistbaker.com"],
        ingredient_headings: &["Ingredients"],
        step_headings: &["Instructions"],
    },
];

/// Adapter whose suffix matches the URL's host, ignoring a leading `www.`.
pub fn adapter_for_url(url: &str) -> Option<&'static SiteAdapter> {
    let parsed = Url::parse(url)
        .or_else(|_| Url::parse(&format!("https://{url}")))
        .ok()?;
    let host = parsed.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    SITE_ADAPTERS.iter().find(|adapter| {
        adapter
            .hostname_suffixes
            .iter()
            .any(|suffix| host == *suffix || host.ends_with(&format!(".{suffix}")))
    })
}

/// Section detection with a per-site heading vocabulary.
pub struct DomainAdapterExtractor;

impl Extractor for DomainAdapterExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::DomainAdapter
    }

    fn parse(&self, context: &ParsingContext) -> Option<Candidate> {
        let adapter = adapter_for_url(&context.url)?;
        debug!("DomainAdapterExtractor: using {} adapter", adapter.name);

        let lines = document_lines(&context.document);
        if lines.is_empty() {
            return None;
        }

        Some(build_candidate(
            Strategy::DomainAdapter,
            &lines,
            context,
            adapter.ingredient_headings,
            adapter.step_headings,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IngredientCatalog;

    #[test]
    fn test_adapter_matching() {
        assert_eq!(
            adapter_for_url("https://www.foodnetwork.com/recipes/x").map(|a| a.name),
            Some("Food Network")
        );
        assert_eq!(
            adapter_for_url("https://cooking.nytimes.com/recipes/1").map(|a| a.name),
            Some("NYT Cooking")
        );
        assert_eq!(
            adapter_for_url("www.bbcgoodfood.com/recipes/y").map(|a| a.name),
            Some("BBC Good Food")
        );
        assert!(adapter_for_url("https://nytimes.com/section").is_none());
        assert!(adapter_for_url("https://notallrecipes.com/x").is_none());
        assert!(adapter_for_url("not a url").is_none());
    }

    #[test]
    fn test_food_network_vocabulary() {
        let html = r#"
            <h1>Baked Ziti</h1>
            <section>
              <h2>Level: Easy</h2>
              <label>Deselect All</label>
              <ul>
                <li>1 pound ziti</li>
                <li>2 cups marinara sauce</li>
                <li>8 ounces mozzarella</li>
              </ul>
              <h2>Directions</h2>
              <ol>
                <li>Boil the ziti until al dente.</li>
                <li>Toss with sauce, top with cheese and bake.</li>
              </ol>
              <h3>Related Recipes</h3>
              <ul><li>Lasagna Roll-Ups</li></ul>
            </section>
        "#;
        let catalog = IngredientCatalog::new();
        let context = ParsingContext::new(
            html,
            "https://www.foodnetwork.com/recipes/baked-ziti",
            &catalog,
            &[],
        );

        let candidate = DomainAdapterExtractor.parse(&context).unwrap();

        assert_eq!(candidate.strategy, Strategy::DomainAdapter);
        assert_eq!(candidate.title.as_deref(), Some("Baked Ziti"));
        assert_eq!(candidate.ingredients.len(), 3);
        assert_eq!(candidate.ingredients[0].unit, "lb");
        assert_eq!(candidate.ingredients[2].name, "mozzarella");
        assert_eq!(candidate.steps.len(), 2);
        assert!(candidate.is_usable());
    }

    #[test]
    fn test_unknown_site_yields_nothing() {
        let catalog = IngredientCatalog::new();
        let context = ParsingContext::new("Ingredients\n1 egg", "https://example.com", &catalog, &[]);
        assert!(DomainAdapterExtractor.parse(&context).is_none());
    }
}
