use crate::adapters::http::FoodyClient;
use crate::app::scenarios::standard_suite;
use crate::config::SuiteSettings;
use crate::core::report::{CleanupOutcome, SuiteReport};
use crate::core::sequence::SuiteContext;
use crate::domain::ports::{ConfigProvider, FoodApi};
use crate::utils::error::Result;
use chrono::Utc;
use reqwest::StatusCode;

pub fn new_execution_id() -> String {
    format!("foody-{}", Utc::now().format("%Y%m%dT%H%M%S%3fZ"))
}

/// 一次完整執行：登入、依序跑完所有檢查、清理，回傳報告
pub async fn run_suite(settings: &SuiteSettings) -> Result<SuiteReport> {
    let started_at = Utc::now();
    let execution_id = new_execution_id();
    tracing::info!(
        "🚀 Running Food API checks against {} ({})",
        settings.base_url(),
        execution_id
    );

    let login_client = FoodyClient::from_config(settings)?;
    let token = login_client.authenticate(settings.credentials()).await?;
    tracing::info!("🔐 Authenticated as '{}'", settings.credentials().username);
    let client = login_client.with_token(token);

    let suite = standard_suite(
        execution_id.clone(),
        &settings.fixtures,
        settings.run.fail_fast,
    );
    let context = suite.execute_all(&client).await;

    let cleanup = if settings.run.cleanup {
        cleanup_leftover_food(&client, &context).await
    } else {
        if let Some(food_id) = context.leftover_food_id() {
            tracing::warn!("🧹 Cleanup disabled, food {} left on the server", food_id);
        }
        None
    };

    Ok(SuiteReport::new(
        execution_id,
        settings.base_url().to_string(),
        started_at,
        context.previous_results,
        cleanup,
    ))
}

/// 寫出 JSON 報告。寫檔失敗只警告，檢查結果不受影響。
pub fn persist_report(report: &SuiteReport, path: &str) -> bool {
    match report.write_to(path) {
        Ok(()) => {
            tracing::info!("📝 Report saved to {}", path);
            true
        }
        Err(e) => {
            tracing::warn!("📝 Could not write report to {}: {}", path, e);
            false
        }
    }
}

/// 刪除執行中建立但沒被刪掉的 food。失敗只記錄，不影響結果。
pub async fn cleanup_leftover_food(
    api: &dyn FoodApi,
    context: &SuiteContext,
) -> Option<CleanupOutcome> {
    let food_id = context.leftover_food_id()?.to_string();
    tracing::info!("🧹 Deleting leftover food {}", food_id);

    let outcome = match api.delete_food(&food_id).await {
        Ok(response) if response.status == StatusCode::OK => CleanupOutcome {
            food_id,
            deleted: true,
            message: None,
        },
        Ok(response) => CleanupOutcome {
            food_id,
            deleted: false,
            message: Some(format!("delete returned HTTP {}", response.status)),
        },
        Err(e) => CleanupOutcome {
            food_id,
            deleted: false,
            message: Some(e.to_string()),
        },
    };

    if let Some(message) = &outcome.message {
        tracing::warn!("🧹 Cleanup of food {} failed: {}", outcome.food_id, message);
    }
    Some(outcome)
}
