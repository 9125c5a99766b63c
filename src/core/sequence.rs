use crate::domain::ports::FoodApi;
use crate::utils::error::Result;
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
}

/// 單一檢查的執行結果
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub order: u32,
    pub outcome: Outcome,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ScenarioResult {
    fn new(scenario: &dyn Scenario, outcome: Outcome, duration: Duration, message: Option<String>) -> Self {
        Self {
            name: scenario.name().to_string(),
            order: scenario.order(),
            outcome,
            duration_ms: duration.as_millis() as u64,
            message,
        }
    }

    fn skipped(scenario: &dyn Scenario, reason: String) -> Self {
        Self::new(scenario, Outcome::Skipped, Duration::ZERO, Some(reason))
    }
}

/// 檢查之間共用的狀態，例如建立出來的 food id
#[derive(Debug, Clone)]
pub struct SuiteContext {
    pub execution_id: String,
    pub previous_results: Vec<ScenarioResult>,
    created_food_id: Option<String>,
    created_food_deleted: bool,
}

impl SuiteContext {
    pub fn new(execution_id: String) -> Self {
        Self {
            execution_id,
            previous_results: Vec::new(),
            created_food_id: None,
            created_food_deleted: false,
        }
    }

    pub fn set_created_food_id(&mut self, food_id: String) {
        self.created_food_id = Some(food_id);
        self.created_food_deleted = false;
    }

    pub fn created_food_id(&self) -> Option<&str> {
        self.created_food_id.as_deref()
    }

    pub fn mark_created_food_deleted(&mut self) {
        self.created_food_deleted = true;
    }

    pub fn created_food_deleted(&self) -> bool {
        self.created_food_deleted
    }

    /// 建立了但還沒刪除的 food，teardown 時要清掉
    pub fn leftover_food_id(&self) -> Option<&str> {
        if self.created_food_deleted {
            None
        } else {
            self.created_food_id()
        }
    }

    pub fn add_result(&mut self, result: ScenarioResult) {
        self.previous_results.push(result);
    }

    pub fn get_result_by_name(&self, name: &str) -> Option<&ScenarioResult> {
        self.previous_results.iter().find(|r| r.name == name)
    }
}

/// 一項針對 Food API 的檢查
#[async_trait::async_trait]
pub trait Scenario: Send + Sync {
    fn name(&self) -> &str;

    /// 執行順序，數字小的先跑
    fn order(&self) -> u32;

    /// 回傳 Some(原因) 表示前置條件不成立，這項檢查會被略過
    fn skip_reason(&self, _context: &SuiteContext) -> Option<String> {
        None
    }

    async fn run(&self, api: &dyn FoodApi, context: &mut SuiteContext) -> Result<()>;
}

/// 依序執行所有檢查
pub struct ScenarioSequence {
    scenarios: Vec<Box<dyn Scenario>>,
    execution_id: String,
    fail_fast: bool,
}

impl ScenarioSequence {
    pub fn new(execution_id: String) -> Self {
        Self {
            scenarios: Vec::new(),
            execution_id,
            fail_fast: false,
        }
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn add_scenario(&mut self, scenario: Box<dyn Scenario>) {
        self.scenarios.push(scenario);
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// 執行所有檢查。失敗會記錄在結果裡，不會中斷呼叫端。
    pub async fn execute_all(&self, api: &dyn FoodApi) -> SuiteContext {
        let mut context = SuiteContext::new(self.execution_id.clone());

        let mut ordered: Vec<&dyn Scenario> = self.scenarios.iter().map(|s| s.as_ref()).collect();
        ordered.sort_by_key(|s| s.order());

        let mut stopped = false;
        for scenario in ordered {
            if stopped {
                context.add_result(ScenarioResult::skipped(
                    scenario,
                    "run stopped after failure".to_string(),
                ));
                continue;
            }

            if let Some(reason) = scenario.skip_reason(&context) {
                tracing::info!("⏭️ Skipping check: {} ({})", scenario.name(), reason);
                context.add_result(ScenarioResult::skipped(scenario, reason));
                continue;
            }

            tracing::debug!("▶️ [{}] {}", scenario.order(), scenario.name());
            let start_time = Instant::now();
            let outcome = scenario.run(api, &mut context).await;
            let duration = start_time.elapsed();

            let result = match outcome {
                Ok(()) => {
                    tracing::info!("✅ {} ({:?})", scenario.name(), duration);
                    ScenarioResult::new(scenario, Outcome::Passed, duration, None)
                }
                Err(e) => {
                    tracing::error!("❌ {} failed: {}", scenario.name(), e);
                    if self.fail_fast {
                        stopped = true;
                    }
                    ScenarioResult::new(scenario, Outcome::Failed, duration, Some(e.to_string()))
                }
            };
            context.add_result(result);
        }

        context
    }
}
