use crate::core::sequence::{Outcome, ScenarioResult};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CleanupOutcome {
    pub food_id: String,
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total_duration_ms: u64,
}

/// 一次完整執行的報告
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub execution_id: String,
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub results: Vec<ScenarioResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<CleanupOutcome>,
    pub summary: SuiteSummary,
}

impl SuiteReport {
    pub fn new(
        execution_id: String,
        base_url: String,
        started_at: DateTime<Utc>,
        results: Vec<ScenarioResult>,
        cleanup: Option<CleanupOutcome>,
    ) -> Self {
        let summary = Self::summarize(&results);
        Self {
            execution_id,
            base_url,
            started_at,
            results,
            cleanup,
            summary,
        }
    }

    pub fn summarize(results: &[ScenarioResult]) -> SuiteSummary {
        let count = |outcome: Outcome| results.iter().filter(|r| r.outcome == outcome).count();
        SuiteSummary {
            total: results.len(),
            passed: count(Outcome::Passed),
            failed: count(Outcome::Failed),
            skipped: count(Outcome::Skipped),
            total_duration_ms: results.iter().map(|r| r.duration_ms).sum(),
        }
    }

    /// 全部通過且沒有略過才算成功
    pub fn is_success(&self) -> bool {
        self.summary.failed == 0 && self.summary.skipped == 0 && self.summary.total > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter().filter(|r| r.outcome == Outcome::Failed)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        tracing::debug!("📝 Report written to {}", path.display());
        Ok(())
    }
}
