use thiserror::Error;

/// Failure taxonomy for the pipeline.
///
/// "University not found" is deliberately absent: the locator reports it as
/// `Ok(None)` and the pipeline answers with the fallback dataset. Only a
/// failed export is allowed to take the process down.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The WebDriver session could not be started.
    #[error("browser session could not be started: {0}")]
    Session(String),

    /// A page load timed out or was rejected by the driver.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The CSV export could not be written.
    #[error("CSV export failed: {0}")]
    Write(#[from] csv::Error),
}
