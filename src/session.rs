//! Browser session management.
//!
//! Owns one chromedriver-backed WebDriver session and the navigation
//! primitives the locator builds on: bounded-timeout navigation, a polled
//! readiness wait instead of fixed sleeps, and an optional debug screenshot.

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use log::{info, warn};
use std::path::Path;
use std::time::Duration;
use thirtyfour::prelude::*;
use tokio::time::{sleep, timeout, Instant};

pub struct Session {
    driver: WebDriver,
}

impl Session {
    /// Connect to chromedriver and open a single controlled page.
    pub async fn open(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_chrome_option(
            "args",
            vec![
                "--headless=new".to_string(),
                "--no-sandbox".to_string(),
                "--disable-setuid-sandbox".to_string(),
                "--disable-dev-shm-usage".to_string(),
                "--disable-gpu".to_string(),
                "--disable-blink-features=AutomationControlled".to_string(),
                format!("--window-size={},{}", config.window_width, config.window_height),
                format!("--user-agent={}", config.user_agent),
            ],
        )
        .map_err(|e| ScrapeError::Session(e.to_string()))?;

        let driver = WebDriver::new(&config.webdriver_url, caps).await.map_err(|e| {
            ScrapeError::Session(format!(
                "cannot reach chromedriver at {}: {}",
                config.webdriver_url, e
            ))
        })?;

        // The registry probes navigator.webdriver; blank it out before the
        // first real navigation.
        if let Err(e) = driver
            .execute(
                "Object.defineProperty(navigator, 'webdriver', { get: () => undefined });",
                vec![],
            )
            .await
        {
            warn!("Could not override navigator.webdriver: {}", e);
        }

        info!("Browser session ready");
        Ok(Session { driver })
    }

    /// Navigate with a hard upper bound on page-load time.
    pub async fn goto_within(&self, url: &str, limit: Duration) -> Result<(), ScrapeError> {
        match timeout(limit, self.driver.goto(url)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(ScrapeError::Navigation(format!("{}: {}", url, e))),
            Err(_) => Err(ScrapeError::Navigation(format!(
                "{}: timed out after {}s",
                url,
                limit.as_secs()
            ))),
        }
    }

    /// Poll until one of the marker selectors is present, or the ceiling
    /// elapses. Elapsing is not an error; the caller works with whatever the
    /// page holds at that point.
    pub async fn wait_until_ready(&self, markers: &[&str], ceiling: Duration, step: Duration) {
        let deadline = Instant::now() + ceiling;
        loop {
            if self.looks_ready(markers).await {
                return;
            }
            if Instant::now() >= deadline {
                warn!("Page never settled within {}s, continuing anyway", ceiling.as_secs());
                return;
            }
            sleep(step).await;
        }
    }

    async fn looks_ready(&self, markers: &[&str]) -> bool {
        for css in markers {
            if let Ok(found) = self.driver.find_all(By::Css(*css)).await {
                if !found.is_empty() {
                    return true;
                }
            }
        }
        // No marker yet; a body with real text is good enough.
        match self.driver.find(By::Tag("body")).await {
            Ok(body) => body
                .text()
                .await
                .map(|t| t.trim().len() > 40)
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    /// HTML source of the current page.
    pub async fn source(&self) -> Result<String, ScrapeError> {
        self.driver
            .source()
            .await
            .map_err(|e| ScrapeError::Navigation(format!("reading page source: {}", e)))
    }

    /// Debug capture; failure is logged, never fatal.
    pub async fn screenshot(&self, path: &Path) {
        match self.driver.screenshot(path).await {
            Ok(()) => info!("Saved debug screenshot to {}", path.display()),
            Err(e) => warn!("Debug screenshot failed: {}", e),
        }
    }

    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    /// Quit the browser. Called on every exit path, success or failure.
    pub async fn close(self) {
        if let Err(e) = self.driver.quit().await {
            warn!("Failed to quit browser cleanly: {}", e);
        }
    }
}
