#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::Credentials;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str =
    "http://softuni-qa-loadbalancer-2137572849.eu-north-1.elb.amazonaws.com:86";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

pub const ENV_BASE_URL: &str = "FOODY_BASE_URL";
pub const ENV_USERNAME: &str = "FOODY_USERNAME";
pub const ENV_PASSWORD: &str = "FOODY_PASSWORD";

/// 各項檢查使用的測試資料
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixtures {
    pub food_name: String,
    pub food_description: String,
    pub food_url: String,
    pub updated_food_name: String,
    pub missing_food_id: String,
    pub missing_food_name: String,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            food_name: "New Food".to_string(),
            food_description: "Test Description".to_string(),
            food_url: String::new(),
            updated_food_name: "Updated Food Name".to_string(),
            missing_food_id: "123".to_string(),
            missing_food_name: "New Food Title".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub fail_fast: bool,
    pub cleanup: bool,
    pub report_path: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            fail_fast: false,
            cleanup: true,
            report_path: None,
        }
    }
}

/// 解析完成的設定
#[derive(Debug, Clone)]
pub struct SuiteSettings {
    pub base_url: String,
    pub credentials: Credentials,
    pub timeout_seconds: u64,
    pub fixtures: Fixtures,
    pub run: RunOptions,
}

impl SuiteSettings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }
}

impl ConfigProvider for SuiteSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for SuiteSettings {
    fn validate(&self) -> Result<()> {
        validate_url("target.base_url", &self.base_url)?;
        validate_non_empty_string("credentials.username", &self.credentials.username)?;
        validate_non_empty_string("credentials.password", &self.credentials.password)?;
        validate_range(
            "target.timeout_seconds",
            self.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validate_non_empty_string("fixtures.missing_food_id", &self.fixtures.missing_food_id)?;
        Ok(())
    }
}

/// 逐層套用設定來源：預設值、TOML、環境變數、命令列，後者覆蓋前者
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub fixtures: Fixtures,
    pub run: RunOptions,
}

impl SettingsBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.run.fail_fast = fail_fast;
        self
    }

    pub fn cleanup(mut self, cleanup: bool) -> Self {
        self.run.cleanup = cleanup;
        self
    }

    /// 讀取 FOODY_BASE_URL / FOODY_USERNAME / FOODY_PASSWORD
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// 以指定的查詢函式套用環境變數層，空白值視為未設定
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(value) = lookup(ENV_BASE_URL) {
            self.base_url = Some(value);
        }
        if let Some(value) = lookup(ENV_USERNAME) {
            self.username = Some(value);
        }
        if let Some(value) = lookup(ENV_PASSWORD) {
            self.password = Some(value);
        }
        self
    }

    pub fn build(self) -> Result<SuiteSettings> {
        let username = validate_required_field("credentials.username", &self.username)?;
        let password = validate_required_field("credentials.password", &self.password)?;

        let settings = SuiteSettings {
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            credentials: Credentials {
                username: username.clone(),
                password: password.clone(),
            },
            timeout_seconds: self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            fixtures: self.fixtures,
            run: self.run,
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FoodyError;

    #[test]
    fn test_builder_defaults() {
        let settings = SuiteSettings::builder()
            .credentials("alice", "secret")
            .build()
            .unwrap();

        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.fixtures.missing_food_id, "123");
        assert!(settings.run.cleanup);
        assert!(!settings.run.fail_fast);
    }

    #[test]
    fn test_builder_requires_credentials() {
        let err = SuiteSettings::builder().build().unwrap_err();
        assert!(matches!(err, FoodyError::MissingConfigError { field } if field == "credentials.username"));

        let err = SuiteSettings::builder()
            .credentials("alice", " ")
            .build()
            .unwrap_err();
        assert!(matches!(err, FoodyError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_env_layer_ignores_blank_values() {
        let settings = SuiteSettings::builder()
            .base_url("http://from-file:86")
            .credentials("file-user", "file-pass")
            .with_env_from(|key| match key {
                ENV_BASE_URL => Some(String::new()),
                ENV_USERNAME => Some("  ".to_string()),
                ENV_PASSWORD => Some("env-pass".to_string()),
                _ => None,
            })
            .build()
            .unwrap();

        assert_eq!(settings.base_url, "http://from-file:86");
        assert_eq!(settings.credentials.username, "file-user");
        assert_eq!(settings.credentials.password, "env-pass");
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        assert!(SuiteSettings::builder()
            .base_url("localhost:86")
            .credentials("alice", "secret")
            .build()
            .is_err());

        assert!(SuiteSettings::builder()
            .credentials("alice", "secret")
            .timeout_seconds(0)
            .build()
            .is_err());
    }
}
