use crate::core::fetcher::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::core::report::DEFAULT_TITLE;
use crate::core::walker::{
    DEFAULT_DELAY, DEFAULT_PAGE_COUNT, DEFAULT_START_PAGE, MAX_PAGE_COUNT, MAX_START_PAGE,
};
use crate::core::ConfigProvider;
use crate::domain::model::{default_sites, page_numbers, Site};
use crate::utils::error::{Result, ScrapeError};
use crate::utils::logger::{self, LogFormat, DEFAULT_LOG_LEVEL, LOG_LEVELS};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub scraper: ScraperSection,
    #[serde(default = "default_sites")]
    pub sites: Vec<Site>,
    #[serde(default)]
    pub output: OutputSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScraperSection {
    pub pages: Option<usize>,
    pub start_page: Option<usize>,
    pub delay_ms: Option<u64>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            title: default_title(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<String>,
}

fn default_output_path() -> String {
    "hyderabad_firms.pdf".to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScrapeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScrapeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SITE_HOST})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) else {
            return Ok(LogFormat::default());
        };
        LogFormat::parse(format).ok_or_else(|| ScrapeError::InvalidConfigValueError {
            field: "logging.format".to_string(),
            value: format.to_string(),
            reason: "Supported formats: compact, json".to_string(),
        })
    }

    /// `logging.level`, lowercased. Defaults to `info`.
    pub fn log_level(&self) -> String {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }

    /// URLs a run would request, page by page, in site order.
    pub fn planned_urls(&self) -> Vec<(String, String)> {
        let (start, count) = (self.start_page(), self.pages());
        self.sites
            .iter()
            .flat_map(|site| {
                page_numbers(start, count).map(move |page| (site.name.clone(), site.page_url(page)))
            })
            .collect()
    }
}

impl ConfigProvider for TomlConfig {
    fn sites(&self) -> &[Site] {
        &self.sites
    }

    fn pages(&self) -> usize {
        self.scraper.pages.unwrap_or(DEFAULT_PAGE_COUNT)
    }

    fn start_page(&self) -> usize {
        self.scraper.start_page.unwrap_or(DEFAULT_START_PAGE)
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn report_title(&self) -> &str {
        &self.output.title
    }

    fn delay(&self) -> Duration {
        self.scraper
            .delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DELAY)
    }

    fn request_timeout(&self) -> Duration {
        self.scraper
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    fn user_agent(&self) -> &str {
        self.scraper.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range("scraper.pages", self.pages(), 1, MAX_PAGE_COUNT)?;
        validation::validate_range("scraper.start_page", self.start_page(), 1, MAX_START_PAGE)?;
        if let Some(timeout) = self.scraper.timeout_seconds {
            validation::validate_positive_number("scraper.timeout_seconds", timeout as usize, 1)?;
        }
        if let Some(user_agent) = &self.scraper.user_agent {
            validation::validate_non_empty_string("scraper.user_agent", user_agent)?;
        }
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_sites("sites", &self.sites)?;
        self.log_format()?;
        let level = self.log_level();
        if !logger::is_known_level(&level) {
            return Err(ScrapeError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: level,
                reason: format!("Supported levels: {}", LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[scraper]
pages = 5
start_page = 2
delay_ms = 250
timeout_seconds = 4
user_agent = "Mozilla/5.0 (X11)"

[[sites]]
name = "Alpha"
url_template = "https://alpha.example/list?page={page}"

[[sites]]
name = "Beta"
url_template = "https://beta.example/p/{page}"

[output]
path = "reports/firms.pdf"
title = "Firms"

[logging]
level = "debug"
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pages(), 5);
        assert_eq!(config.start_page(), 2);
        assert_eq!(config.delay(), Duration::from_millis(250));
        assert_eq!(config.request_timeout(), Duration::from_secs(4));
        assert_eq!(config.user_agent(), "Mozilla/5.0 (X11)");
        assert_eq!(config.sites().len(), 2);
        assert_eq!(config.sites()[1].name, "Beta");
        assert_eq!(config.output_path(), "reports/firms.pdf");
        assert_eq!(config.report_title(), "Firms");
        assert_eq!(config.log_format().unwrap(), LogFormat::Json);
        assert_eq!(config.log_level(), "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.pages(), 3);
        assert_eq!(config.start_page(), 1);
        assert_eq!(config.delay(), Duration::from_secs(1));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.user_agent(), "Mozilla/5.0");
        assert_eq!(config.output_path(), "hyderabad_firms.pdf");
        assert_eq!(config.sites().len(), 3);
        assert_eq!(config.log_format().unwrap(), LogFormat::Compact);
        assert_eq!(config.log_level(), "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FIRM_SCRAPER_TEST_HOST", "listings.example");

        let toml_content = r#"
[[sites]]
name = "Env"
url_template = "https://${FIRM_SCRAPER_TEST_HOST}/p/{page}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.sites()[0].url_template,
            "https://listings.example/p/{page}"
        );

        std::env::remove_var("FIRM_SCRAPER_TEST_HOST");
    }

    #[test]
    fn test_unknown_env_var_is_left_in_place() {
        let toml_content = r#"
[output]
path = "${FIRM_SCRAPER_UNSET_VAR}.pdf"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_path(), "${FIRM_SCRAPER_UNSET_VAR}.pdf");
    }

    #[test]
    fn test_template_without_placeholder_fails_validation() {
        let toml_content = r#"
[[sites]]
name = "Static"
url_template = "https://static.example/list"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_format_fails_validation() {
        let config = TomlConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_levels() {
        let config = TomlConfig::from_toml_str("[logging]\nlevel = \"TRACE\"\n").unwrap();
        assert_eq!(config.log_level(), "trace");
        assert!(config.validate().is_ok());

        let config = TomlConfig::from_toml_str("[logging]\nlevel = \"warn\"\n").unwrap();
        assert!(config.validate().is_ok());

        let config = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_page_bounds_fail_validation() {
        let config =
            TomlConfig::from_toml_str(&format!("[scraper]\nstart_page = {}\n", i64::MAX)).unwrap();
        assert!(config.validate().is_err());
        // the URL plan stays finite even for an unvalidated config
        assert_eq!(config.planned_urls().len(), 9);

        let config = TomlConfig::from_toml_str("[scraper]\npages = 1000000\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[scraper\npages = ").unwrap_err();
        assert!(matches!(err, ScrapeError::ConfigError { .. }));
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().starts_with("Invalid configuration: TOML parsing error"));
    }

    #[test]
    fn test_planned_urls() {
        let toml_content = r#"
[scraper]
pages = 2
start_page = 3

[[sites]]
name = "A"
url_template = "https://a.example/{page}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.planned_urls(),
            vec![
                ("A".to_string(), "https://a.example/3".to_string()),
                ("A".to_string(), "https://a.example/4".to_string()),
            ]
        );
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[scraper]\npages = 1\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pages(), 1);
    }
}
