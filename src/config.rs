use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime knobs for one scraping run. Everything has a built-in default
/// matching the registry; `config/scraper.yml` under the root may override
/// any subset. There are no CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub entry_url: String,
    pub university_name: String,
    /// Case-insensitive substring confirming a page is about the target.
    pub target_substring: String,
    pub webdriver_url: String,
    pub user_agent: String,
    pub window_width: u32,
    pub window_height: u32,
    pub nav_timeout_secs: u64,
    pub candidate_timeout_secs: u64,
    pub ready_ceiling_secs: u64,
    pub ready_poll_millis: u64,
    pub output_file: String,
    /// Debug capture of the first loaded page; `null` disables it.
    pub debug_screenshot: Option<String>,
    /// Directory holding `config/`; taken from the ROOT env var, not the file.
    #[serde(skip)]
    pub root: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            entry_url: "https://pddikti.kemdikti.go.id/".to_string(),
            university_name: "Universitas Ekasakti".to_string(),
            target_substring: "ekasakti".to_string(),
            webdriver_url: "http://localhost:9515".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            window_width: 1366,
            window_height: 768,
            nav_timeout_secs: 30,
            candidate_timeout_secs: 15,
            ready_ceiling_secs: 10,
            ready_poll_millis: 500,
            output_file: "universitas_ekasakti_prodi.csv".to_string(),
            debug_screenshot: Some("debug-homepage.png".to_string()),
            root: ".".to_string(),
        }
    }
}

impl ScraperConfig {
    /// Load overrides from `config/scraper.yml` under `root`. A missing file
    /// is the normal case; a malformed one is reported and ignored so a bad
    /// edit can never change the exit-code contract.
    pub fn load(root: &str) -> Self {
        let path = PathBuf::from(root).join("config/scraper.yml");
        let mut config = match fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("Ignoring malformed {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        config.root = root.to_string();
        config
    }

    pub fn nav_timeout(&self) -> Duration {
        Duration::from_secs(self.nav_timeout_secs)
    }

    pub fn candidate_timeout(&self) -> Duration {
        Duration::from_secs(self.candidate_timeout_secs)
    }

    pub fn ready_ceiling(&self) -> Duration {
        Duration::from_secs(self.ready_ceiling_secs)
    }

    pub fn ready_poll(&self) -> Duration {
        Duration::from_millis(self.ready_poll_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_registry() {
        let config = ScraperConfig::default();
        assert_eq!(config.entry_url, "https://pddikti.kemdikti.go.id/");
        assert_eq!(config.university_name, "Universitas Ekasakti");
        assert_eq!(config.output_file, "universitas_ekasakti_prodi.csv");
        assert_eq!(config.nav_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ScraperConfig::load("/definitely/not/a/real/root");
        assert_eq!(config.entry_url, ScraperConfig::default().entry_url);
        assert_eq!(config.root, "/definitely/not/a/real/root");
    }

    #[test]
    fn test_partial_yaml_overrides_only_named_keys() {
        let parsed: ScraperConfig =
            serde_yaml::from_str("output_file: other.csv\nnav_timeout_secs: 5\n").unwrap();
        assert_eq!(parsed.output_file, "other.csv");
        assert_eq!(parsed.nav_timeout_secs, 5);
        assert_eq!(parsed.entry_url, ScraperConfig::default().entry_url);
    }
}
