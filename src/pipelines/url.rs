use super::{extract, Extraction};
use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::fetchers::{ReaderFetcher, RequestFetcher};
use crate::model::IngredientCatalog;
use crate::scoring::{rank_candidates, sanitize_recipe};
use log::{info, warn};
use serde::Serialize;
use std::time::Duration;

/// Where a fetched page text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchSource {
    Direct,
    ReadProxy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub source: FetchSource,
    pub text: String,
}

/// A recipe imported from a URL, sanitized for storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlImport {
    #[serde(flatten)]
    pub extraction: Extraction,
    pub source: FetchSource,
    pub score: i64,
}

/// Fetch the page directly and through the read proxy at the same time.
///
/// Failed or empty fetches are dropped; an error is returned only when
/// nothing came back at all.
pub async fn fetch_pages(url: &str, config: &ImportConfig) -> Result<Vec<FetchedPage>, ImportError> {
    let timeout = Duration::from_secs(config.timeout);

    let direct = async {
        if config.direct_fetch {
            Some(fetch_direct(url, timeout, &config.user_agent).await)
        } else {
            None
        }
    };
    let proxied = async {
        match &config.reader_proxy_url {
            Some(base) => Some(fetch_proxied(url, base, timeout, &config.user_agent).await),
            None => None,
        }
    };
    let (direct, proxied) = tokio::join!(direct, proxied);

    let mut pages = Vec::new();
    let mut last_error = None;
    for (source, result) in [(FetchSource::Direct, direct), (FetchSource::ReadProxy, proxied)] {
        match result {
            Some(Ok(text)) if !text.trim().is_empty() => pages.push(FetchedPage { source, text }),
            Some(Ok(_)) => warn!("{:?} fetch of {} returned an empty page", source, url),
            Some(Err(e)) => {
                warn!("{:?} fetch of {} failed: {}", source, url, e);
                last_error = Some(e);
            }
            None => {}
        }
    }

    if pages.is_empty() {
        return Err(last_error.unwrap_or(ImportError::EmptyInput));
    }
    Ok(pages)
}

async fn fetch_direct(url: &str, timeout: Duration, user_agent: &str) -> Result<String, ImportError> {
    RequestFetcher::new(timeout, user_agent)?.fetch(url).await
}

async fn fetch_proxied(
    url: &str,
    base: &str,
    timeout: Duration,
    user_agent: &str,
) -> Result<String, ImportError> {
    ReaderFetcher::new(base, timeout, user_agent)?.fetch(url).await
}

/// Fetch a recipe page and return the best-scoring extraction.
///
/// # Errors
/// Fails when no fetch succeeded, or when the best extraction found neither
/// ingredients nor steps.
pub async fn import_from_url(
    url: &str,
    config: &ImportConfig,
    catalog: &IngredientCatalog,
    stores: &[String],
) -> Result<UrlImport, ImportError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let pages = fetch_pages(url, config).await?;
    let texts: Vec<&str> = pages.iter().map(|page| page.text.as_str()).collect();

    let best = rank_candidates(&texts, url, catalog, stores)
        .into_iter()
        .next()
        .ok_or_else(|| ImportError::NoUsableContent(url.to_string()))?;

    let recipe = &best.extraction.recipe;
    if recipe.ingredients.is_empty() && recipe.steps.is_empty() {
        return Err(ImportError::NoUsableContent(url.to_string()));
    }

    let source = pages[best.index].source;
    info!(
        "Imported \"{}\" from {} ({:?}, score {})",
        recipe.title, url, source, best.score
    );
    Ok(UrlImport {
        extraction: best.extraction,
        source,
        score: best.score,
    })
}

/// Extract a recipe from text the caller already has.
///
/// # Errors
/// Only blank text is rejected; anything else yields a recipe.
pub fn import_from_text(
    text: &str,
    url: &str,
    catalog: &IngredientCatalog,
    stores: &[String],
) -> Result<Extraction, ImportError> {
    if text.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }
    let mut extraction = extract(text, url, catalog, stores);
    extraction.recipe = sanitize_recipe(extraction.recipe).recipe;
    Ok(extraction)
}
