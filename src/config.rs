//! Configuration loading.
//!
//! Loaded from an explicit path, ./moocnotify.yml, or
//! ~/.config/moocnotify/moocnotify.yml, falling back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{NotifyError, Result};

/// Environment variable overriding `mooc.cookie`
pub const COOKIE_ENV: &str = "MOOCNOTIFY_COOKIE";

/// Environment variable overriding `smtp.password`
pub const SMTP_PASSWORD_ENV: &str = "MOOCNOTIFY_SMTP_PASSWORD";

pub const DEFAULT_API_BASE_URL: &str = "https://www.icourse163.org/web/j/courseBean.getLastLearnedMocTermDto.rpc";

const REDACTED: &str = "********";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub mooc: MoocConfig,
    pub email: EmailConfig,
    pub smtp: SmtpConfig,
    pub schedule: ScheduleConfig,
}

/// MOOC platform access and reminder thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MoocConfig {
    /// Session cookie copied from a logged-in browser.
    pub cookie: String,
    /// CSRF key (the NTESSTUDYSI cookie value).
    pub csrf_key: String,
    /// Course term ids to watch.
    pub term_ids: Vec<String>,
    pub api_base_url: String,
    /// Hours before a deadline at which a reminder is due.
    pub reminder_hours: Vec<i64>,
    pub timeout_secs: u64,
}

impl Default for MoocConfig {
    fn default() -> Self {
        Self {
            cookie: String::new(),
            csrf_key: String::new(),
            term_ids: Vec::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            reminder_hours: vec![24, 1],
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub enabled: bool,
    pub recipients: Vec<String>,
    pub subject_prefix: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            recipients: Vec::new(),
            subject_prefix: "[MOOC Homework Reminder]".to_string(),
        }
    }
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// Implicit TLS (usually port 465)
    Tls,
    /// Plain connection upgraded via STARTTLS (usually port 587)
    StartTls,
    /// Unencrypted; only for local relays
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub security: SmtpSecurity,
    pub timeout_secs: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 465,
            username: String::new(),
            password: String::new(),
            from: String::new(),
            security: SmtpSecurity::Tls,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Delay before the first check after startup.
    pub initial_delay_secs: u64,
    pub interval_secs: u64,
    /// Run at the top of each hour instead of a fixed delay.
    pub align_to_hour: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            initial_delay_secs: 60,
            interval_secs: 3600,
            align_to_hour: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            mooc: MoocConfig::default(),
            email: EmailConfig::default(),
            smtp: SmtpConfig::default(),
            schedule: ScheduleConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file(config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file(config_path: Option<&PathBuf>) -> Result<Self> {
        // Explicit path takes precedence and must load
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let project_name = env!("CARGO_PKG_NAME");

        let local_config = PathBuf::from(format!("{}.yml", project_name));
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Override secrets from the environment when present and non-empty.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(cookie) = lookup(COOKIE_ENV).filter(|v| !v.is_empty()) {
            self.mooc.cookie = cookie;
        }
        if let Some(password) = lookup(SMTP_PASSWORD_ENV).filter(|v| !v.is_empty()) {
            self.smtp.password = password;
        }
    }

    /// Validate the configuration.
    ///
    /// Empty term ids or recipients are allowed; those are skipped at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.mooc.reminder_hours.is_empty() {
            return Err(NotifyError::Config("mooc.reminder_hours must not be empty".to_string()));
        }
        if let Some(h) = self.mooc.reminder_hours.iter().find(|h| **h <= 0) {
            return Err(NotifyError::Config(format!("mooc.reminder_hours must be > 0, got {}", h)));
        }
        if self.schedule.interval_secs == 0 {
            return Err(NotifyError::Config("schedule.interval_secs must be > 0".to_string()));
        }
        if self.email.enabled && !self.email.recipients.is_empty() {
            if self.smtp.host.is_empty() {
                return Err(NotifyError::Config("smtp.host is required when email is enabled".to_string()));
            }
            if self.smtp.from.is_empty() {
                return Err(NotifyError::Config("smtp.from is required when email is enabled".to_string()));
            }
        }
        Ok(())
    }

    /// Copy of the configuration with secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        for secret in [&mut config.mooc.cookie, &mut config.mooc.csrf_key, &mut config.smtp.password] {
            if !secret.is_empty() {
                *secret = REDACTED.to_string();
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.email.recipients = vec!["student@example.com".to_string()];
        config.smtp.host = "smtp.example.com".to_string();
        config.smtp.from = "bot@example.com".to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.mooc.reminder_hours, vec![24, 1]);
        assert_eq!(config.mooc.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.email.enabled);
        assert!(config.email.recipients.is_empty());
        assert_eq!(config.smtp.security, SmtpSecurity::Tls);
        assert_eq!(config.schedule.interval_secs, 3600);
        assert_eq!(config.schedule.initial_delay_secs, 60);
    }

    #[test]
    fn test_load_from_file_partial_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("moocnotify.yml");
        fs::write(
            &path,
            r#"
mooc:
  term_ids: ["1001", "1002"]
  reminder_hours: [48, 12]
email:
  recipients: ["a@example.com"]
smtp:
  host: smtp.example.com
  security: starttls
  port: 587
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.mooc.term_ids, vec!["1001", "1002"]);
        assert_eq!(config.mooc.reminder_hours, vec![48, 12]);
        assert_eq!(config.email.recipients, vec!["a@example.com"]);
        assert_eq!(config.smtp.security, SmtpSecurity::StartTls);
        assert_eq!(config.smtp.port, 587);
        // Untouched sections keep defaults
        assert_eq!(config.email.subject_prefix, "[MOOC Homework Reminder]");
        assert!(config.schedule.align_to_hour);
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = serde_yaml::from_str(include_str!("../moocnotify.example.yml")).unwrap();
        assert_eq!(config.mooc.term_ids, vec!["1234567890"]);
        assert_eq!(config.smtp.security, SmtpSecurity::Tls);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_missing_file_is_error() {
        let path = PathBuf::from("/nonexistent/moocnotify.yml");
        assert!(matches!(Config::load_file(Some(&path)), Err(NotifyError::Io(_))));
    }

    #[test]
    fn test_load_invalid_yaml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yml");
        fs::write(&path, "mooc: [not, a, map").unwrap();
        assert!(matches!(Config::load_from_file(&path), Err(NotifyError::Yaml(_))));
    }

    #[test]
    fn test_apply_env_overrides_secrets() {
        let mut config = Config::default();
        config.smtp.password = "from-file".to_string();
        config.apply_env(|key| match key {
            COOKIE_ENV => Some("NTESSTUDYSI=abc".to_string()),
            SMTP_PASSWORD_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.mooc.cookie, "NTESSTUDYSI=abc");
        // Empty env values do not clobber the file value
        assert_eq!(config.smtp.password, "from-file");
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid_config().validate().is_ok());
        // No recipients means no SMTP requirement
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        let mut config = valid_config();
        config.mooc.reminder_hours = Vec::new();
        assert!(config.validate().is_err());

        config.mooc.reminder_hours = vec![24, 0];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("got 0"));
    }

    #[test]
    fn test_validate_requires_smtp_host() {
        let mut config = valid_config();
        config.smtp.host = String::new();
        assert!(config.validate().is_err());

        config.email.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = valid_config();
        config.schedule.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redacted_masks_secrets() {
        let mut config = valid_config();
        config.mooc.cookie = "secret-cookie".to_string();
        config.smtp.password = "hunter2".to_string();

        let shown = config.redacted();
        assert_eq!(shown.mooc.cookie, REDACTED);
        assert_eq!(shown.smtp.password, REDACTED);
        // Empty secrets stay empty so a missing value is visible
        assert!(shown.mooc.csrf_key.is_empty());
        assert_eq!(shown.smtp.host, "smtp.example.com");
    }
}
