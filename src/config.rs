use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main planner configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// Stores the household shops at, in display order
    #[serde(default)]
    pub stores: Vec<String>,
    /// Default number of servings a planned meal is cooked for
    #[serde(default = "default_household_servings")]
    pub household_servings: u32,
    /// Recipe import settings
    #[serde(default)]
    pub import: ImportConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            stores: Vec::new(),
            household_servings: default_household_servings(),
            import: ImportConfig::default(),
        }
    }
}

/// Configuration for fetching recipe pages
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Request timeout in seconds, applied to each fetch separately
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with direct fetches
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whether to fetch the page directly
    #[serde(default = "default_true")]
    pub direct_fetch: bool,
    /// Base URL of a read proxy that returns page text for `<base>/<url>`
    #[serde(default = "default_reader_proxy_url")]
    pub reader_proxy_url: Option<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            direct_fetch: true,
            reader_proxy_url: default_reader_proxy_url(),
        }
    }
}

// Default value functions
fn default_household_servings() -> u32 {
    4
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; MealplanBot/1.0)".to_string()
}

fn default_true() -> bool {
    true
}

fn default_reader_proxy_url() -> Option<String> {
    Some("https://r.jina.ai".to_string())
}

impl PlannerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MEALPLAN__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MEALPLAN__IMPORT__TIMEOUT
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// `MEALPLAN__STORES` takes a comma separated list.
pub fn load_config() -> Result<PlannerConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix("MEALPLAN")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("stores")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
