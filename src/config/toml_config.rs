use crate::config::SettingsBuilder;
use crate::utils::error::{FoodyError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub target: Option<TargetConfig>,
    pub credentials: Option<CredentialsConfig>,
    pub fixtures: Option<FixturesConfig>,
    pub run: Option<RunConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixturesConfig {
    pub food_name: Option<String>,
    pub food_description: Option<String>,
    pub food_url: Option<String>,
    pub updated_food_name: Option<String>,
    pub missing_food_id: Option<String>,
    pub missing_food_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    pub fail_fast: Option<bool>,
    pub cleanup: Option<bool>,
    pub report_path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FoodyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FoodyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FOODY_PASSWORD})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| FoodyError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 把檔案中有設定的欄位套用到 builder
    pub fn apply_to(&self, mut builder: SettingsBuilder) -> SettingsBuilder {
        if let Some(target) = &self.target {
            if let Some(base_url) = &target.base_url {
                builder.base_url = Some(base_url.clone());
            }
            if let Some(timeout) = target.timeout_seconds {
                builder.timeout_seconds = Some(timeout);
            }
        }

        if let Some(credentials) = &self.credentials {
            if let Some(username) = &credentials.username {
                builder.username = Some(username.clone());
            }
            if let Some(password) = &credentials.password {
                builder.password = Some(password.clone());
            }
        }

        if let Some(fixtures) = &self.fixtures {
            let target = &mut builder.fixtures;
            let overrides = [
                (&fixtures.food_name, &mut target.food_name),
                (&fixtures.food_description, &mut target.food_description),
                (&fixtures.food_url, &mut target.food_url),
                (&fixtures.updated_food_name, &mut target.updated_food_name),
                (&fixtures.missing_food_id, &mut target.missing_food_id),
                (&fixtures.missing_food_name, &mut target.missing_food_name),
            ];
            for (source, slot) in overrides {
                if let Some(value) = source {
                    *slot = value.clone();
                }
            }
        }

        if let Some(run) = &self.run {
            if let Some(fail_fast) = run.fail_fast {
                builder.run.fail_fast = fail_fast;
            }
            if let Some(cleanup) = run.cleanup {
                builder.run.cleanup = cleanup;
            }
            if let Some(report_path) = &run.report_path {
                builder.run.report_path = Some(report_path.clone());
            }
        }

        builder
    }
}
