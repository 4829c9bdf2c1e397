//! Finding the university's page on the registry.
//!
//! Two paths, first hit wins: drive the on-page search widget, then fall
//! back to scanning anchors for listing-like links and probing the first
//! few. Anchor scanning and the mention test are pure over the HTML so they
//! are testable without a driver.

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::session::Session;
use log::{info, warn};
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::path::Path;
use thirtyfour::prelude::*;

/// Search-widget cascade, most specific first.
const SEARCH_INPUT_SELECTORS: &[&str] = &[
    "input[type='search']",
    "input[placeholder*='cari']",
    "input[placeholder*='search']",
    "input[type='text']",
];

/// Markers that indicate the entry page finished rendering.
const READY_MARKERS: &[&str] = &["input", "table", "a[href]"];

/// Markers that indicate a search produced some result list.
const RESULT_MARKERS: &[&str] = &[
    ".search-result",
    ".result-item",
    ".university-item",
    "table",
    ".card",
    ".list-group-item",
];

/// Anchor keywords that plausibly lead to an institution listing.
const LISTING_KEYWORDS: &[&str] = &["perguruan tinggi", "universitas", "pt"];

/// Only this many anchor candidates get visited.
const CANDIDATE_LIMIT: usize = 3;

/// A link worth visiting while hunting for the university's page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    pub text: String,
    pub href: String,
}

/// Try to land on a page mentioning the target university and return its
/// HTML. `Ok(None)` means every path was exhausted without a match; that is
/// a normal terminal state, answered upstream with the fallback dataset.
pub async fn locate(
    session: &Session,
    config: &ScraperConfig,
) -> Result<Option<String>, ScrapeError> {
    session
        .goto_within(&config.entry_url, config.nav_timeout())
        .await?;
    info!("Loaded entry page {}", config.entry_url);

    session
        .wait_until_ready(READY_MARKERS, config.ready_ceiling(), config.ready_poll())
        .await;

    if let Some(screenshot) = &config.debug_screenshot {
        session.screenshot(Path::new(screenshot)).await;
    }

    match search_widget_path(session, config).await {
        Ok(Some(html)) => return Ok(Some(html)),
        Ok(None) => info!("Search widget yielded nothing usable"),
        Err(e) => warn!("Search widget path failed: {}", e),
    }

    anchor_scan_path(session, config).await
}

/// Type the university name into the first matching search input and
/// submit. Accept the resulting page only if it mentions the target.
async fn search_widget_path(
    session: &Session,
    config: &ScraperConfig,
) -> Result<Option<String>, ScrapeError> {
    let driver = session.driver();

    for css in SEARCH_INPUT_SELECTORS {
        let inputs = driver.find_all(By::Css(*css)).await.unwrap_or_default();
        let input = match inputs.into_iter().next() {
            Some(element) => element,
            None => continue,
        };

        info!("Submitting search via {}", css);
        if input.send_keys(config.university_name.as_str()).await.is_err() {
            continue;
        }
        if input.send_keys(Key::Enter.to_string()).await.is_err() {
            continue;
        }

        session
            .wait_until_ready(RESULT_MARKERS, config.ready_ceiling(), config.ready_poll())
            .await;

        let page = session.source().await?;
        if page_mentions(&page, &config.target_substring) {
            return Ok(Some(page));
        }
        return Ok(None);
    }

    Ok(None)
}

/// Scan the current page's anchors for listing-like links and probe the
/// first few for a page mentioning the target.
async fn anchor_scan_path(
    session: &Session,
    config: &ScraperConfig,
) -> Result<Option<String>, ScrapeError> {
    let html = session.source().await?;
    let candidates = scan_candidate_links(&html, &config.entry_url);
    info!("Found {} candidate links", candidates.len());

    for link in candidates.iter().take(CANDIDATE_LIMIT) {
        info!("Trying candidate: {} ({})", link.text, link.href);
        if let Err(e) = session
            .goto_within(&link.href, config.candidate_timeout())
            .await
        {
            warn!("Candidate failed: {}", e);
            continue;
        }
        session
            .wait_until_ready(RESULT_MARKERS, config.ready_ceiling(), config.ready_poll())
            .await;

        let page = session.source().await?;
        if page_mentions(&page, &config.target_substring) {
            info!("Candidate page mentions '{}'", config.target_substring);
            return Ok(Some(page));
        }
    }

    Ok(None)
}

/// Collect anchors whose text or href carries a listing keyword, resolved
/// to absolute URLs and deduplicated, in document order.
pub fn scan_candidate_links(html: &str, base_url: &str) -> Vec<CandidateLink> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for anchor in document.select(&selector) {
            let raw = match anchor.value().attr("href") {
                Some(href) => href,
                None => continue,
            };
            let text = anchor.text().collect::<Vec<_>>().join(" ").trim().to_string();

            let lower_text = text.to_lowercase();
            let lower_href = raw.to_lowercase();
            let hit = LISTING_KEYWORDS
                .iter()
                .any(|k| lower_text.contains(k) || lower_href.contains(k));
            if !hit {
                continue;
            }

            let href = match resolve_href(raw, base_url) {
                Some(resolved) => resolved,
                None => continue,
            };
            if seen.insert(href.clone()) {
                candidates.push(CandidateLink { text, href });
            }
        }
    }

    candidates
}

/// Case-insensitive test for the target substring over the rendered text.
pub fn page_mentions(html: &str, needle: &str) -> bool {
    let document = Html::parse_document(html);
    let text = document.root_element().text().collect::<Vec<_>>().join(" ");
    text.to_lowercase().contains(&needle.to_lowercase())
}

/// Resolve an href against the page it came from. String handling is enough
/// for the registry's links; fragments and script pseudo-links are dropped.
fn resolve_href(href: &str, base_url: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    if let Some(rest) = href.strip_prefix('/') {
        let scheme_end = base_url.find("://")?;
        let after_scheme = &base_url[scheme_end + 3..];
        let host_end = after_scheme
            .find('/')
            .map(|i| scheme_end + 3 + i)
            .unwrap_or(base_url.len());
        return Some(format!("{}/{}", &base_url[..host_end], rest));
    }
    Some(format!("{}/{}", base_url.trim_end_matches('/'), href))
}
