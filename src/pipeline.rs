//! Pipeline orchestration.
//!
//! Init → Navigated → Located → Extracted → (Exported | FallbackApplied →
//! Exported) → Closed. Every failure short of the final export lands on the
//! fallback path so a run always produces a CSV; the browser session is
//! closed on all exits. Only a failed export propagates out.

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::export;
use crate::extractor;
use crate::fallback;
use crate::locator;
use crate::session::Session;
use crate::types::Institution;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Where the exported record set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Scraped,
    Fallback,
}

#[derive(Debug)]
pub struct RunReport {
    pub institution: Institution,
    pub origin: DataOrigin,
    pub csv_path: PathBuf,
}

/// Run the whole pipeline once. The exporter is called exactly once and
/// always receives a non-empty program list.
pub async fn run(config: &ScraperConfig) -> Result<RunReport, ScrapeError> {
    let live = scrape_live(config).await;
    let (institution, origin) = choose_records(live, &config.root);

    let csv_path = export::export_csv(&institution, Path::new(&config.output_file))?;

    Ok(RunReport {
        institution,
        origin,
        csv_path,
    })
}

/// Decide what gets exported. Pure, so the fallback contract is testable
/// without a browser.
pub fn choose_records(
    live: Result<Option<Institution>, ScrapeError>,
    root: &str,
) -> (Institution, DataOrigin) {
    match live {
        Ok(Some(scraped)) if !scraped.programs.is_empty() => (scraped, DataOrigin::Scraped),
        Ok(Some(_)) => {
            info!("Extraction produced no programs, applying fallback dataset");
            (fallback::institution(root), DataOrigin::Fallback)
        }
        Ok(None) => {
            info!("University not found on the registry, applying fallback dataset");
            (fallback::institution(root), DataOrigin::Fallback)
        }
        Err(e) => {
            warn!("Scraping failed ({}), applying fallback dataset", e);
            (fallback::institution(root), DataOrigin::Fallback)
        }
    }
}

/// The live path: open a session, locate the university, extract. The
/// session is closed before returning, whatever happened.
async fn scrape_live(config: &ScraperConfig) -> Result<Option<Institution>, ScrapeError> {
    let session = Session::open(config).await?;
    let outcome = locate_and_extract(&session, config).await;
    session.close().await;
    outcome
}

async fn locate_and_extract(
    session: &Session,
    config: &ScraperConfig,
) -> Result<Option<Institution>, ScrapeError> {
    let html = match locator::locate(session, config).await? {
        Some(html) => html,
        None => {
            info!("No page mentioning the university was found");
            return Ok(None);
        }
    };
    info!("Located a page mentioning the university");
    Ok(Some(extractor::extract(&html, &config.university_name)))
}
