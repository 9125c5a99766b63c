use crate::config::toml_config::TomlConfig;
use crate::config::SuiteSettings;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "foody-checks")]
#[command(about = "Runs the Food API CRUD checks against a live service")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Base URL of the Food API")]
    pub base_url: Option<String>,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long, help = "Per-request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Stop after the first failing check")]
    pub fail_fast: bool,

    #[arg(long, help = "Do not delete a food left behind by the run")]
    pub skip_cleanup: bool,

    #[arg(long, help = "Write a JSON report to this path")]
    pub report: Option<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 預設值 < TOML 檔案 < 環境變數 < 命令列參數
    pub fn resolve(&self) -> Result<SuiteSettings> {
        self.resolve_with_env(|key| std::env::var(key).ok())
    }

    pub fn resolve_with_env<F>(&self, env: F) -> Result<SuiteSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = SuiteSettings::builder();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration from {}", path);
            builder = TomlConfig::from_file(path)?.apply_to(builder);
        }

        builder = builder.with_env_from(env);

        if let Some(base_url) = &self.base_url {
            builder.base_url = Some(base_url.clone());
        }
        if let Some(username) = &self.username {
            builder.username = Some(username.clone());
        }
        if let Some(password) = &self.password {
            builder.password = Some(password.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            builder.timeout_seconds = Some(timeout);
        }
        if self.fail_fast {
            builder.run.fail_fast = true;
        }
        if self.skip_cleanup {
            builder.run.cleanup = false;
        }
        if let Some(report) = &self.report {
            builder.run.report_path = Some(report.clone());
        }

        builder.build()
    }
}
