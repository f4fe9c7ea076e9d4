use std::time::Duration;

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::model::IngredientCatalog;
use crate::pipelines::url::{import_from_text, import_from_url};
use crate::pipelines::Extraction;

/// Represents the input source for a recipe
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Fetch the page directly and through the read proxy
    Url(String),
    /// Page text already in hand, with the URL it came from
    Text { text: String, url: String },
}

/// Builder for configuring and executing recipe imports
#[derive(Debug, Default)]
pub struct RecipeImporterBuilder {
    source: Option<InputSource>,
    config: Option<ImportConfig>,
    catalog: IngredientCatalog,
    stores: Vec<String>,
    timeout: Option<Duration>,
}

impl RecipeImporterBuilder {
    /// Set the input source to a URL
    ///
    /// # Example
    /// ```
    /// use mealplan::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Url(url.into()));
        self
    }

    /// Set the input source to page text fetched elsewhere
    ///
    /// The URL is used for domain adapters and as a title fallback.
    ///
    /// # Example
    /// ```
    /// use mealplan::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .text("<html>...</html>", "https://example.com/recipe");
    /// ```
    pub fn text(mut self, text: impl Into<String>, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text {
            text: text.into(),
            url: url.into(),
        });
        self
    }

    /// Ingredient catalog used to assign stores
    pub fn catalog(mut self, catalog: IngredientCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Stores an ingredient may be assigned to
    pub fn stores(mut self, stores: Vec<String>) -> Self {
        self.stores = stores;
        self
    }

    /// Fetch settings; defaults to [`ImportConfig::default`]
    pub fn config(mut self, config: ImportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// Overrides the timeout from [`config`](Self::config).
    ///
    /// # Example
    /// ```
    /// use mealplan::RecipeImporter;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Build and execute the recipe import operation
    ///
    /// # Errors
    /// Returns `ImportError` if:
    /// - No input source was specified
    /// - The text is blank
    /// - Every fetch fails, or nothing usable was found at the URL
    ///
    /// # Example
    /// ```no_run
    /// # use mealplan::RecipeImporter;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let extraction = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .build()
    ///     .await?;
    /// println!("{}", extraction.recipe.title);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<Extraction, ImportError> {
        let source = self.source.ok_or_else(|| {
            ImportError::BuilderError(
                "No input source specified. Use .url() or .text()".to_string(),
            )
        })?;

        match source {
            InputSource::Url(url) => {
                let mut config = self.config.unwrap_or_default();
                if let Some(timeout) = self.timeout {
                    config.timeout = whole_seconds(timeout);
                }
                let imported = import_from_url(&url, &config, &self.catalog, &self.stores).await?;
                Ok(imported.extraction)
            }
            InputSource::Text { text, url } => {
                import_from_text(&text, &url, &self.catalog, &self.stores)
            }
        }
    }
}

/// Config timeouts are whole seconds; partial seconds round up.
fn whole_seconds(duration: Duration) -> u64 {
    let partial = u64::from(duration.subsec_nanos() > 0);
    duration.as_secs().saturating_add(partial).max(1)
}

/// Main entry point for the builder API
pub struct RecipeImporter;

impl RecipeImporter {
    /// Creates a new builder for importing recipes
    ///
    /// # Example
    /// ```
    /// use mealplan::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder();
    /// ```
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }
}
