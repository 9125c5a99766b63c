//! The Food API checks, in execution order:
//!
//! 1. create a food and remember its id
//! 2. list all foods
//! 3. rename the created food
//! 4. delete the created food
//! 5. create with empty required fields
//! 6. edit a food that does not exist
//! 7. delete a food that does not exist

use crate::config::Fixtures;
use crate::core::expect::{expect_non_empty_array, expect_status, expect_string_field};
use crate::core::sequence::{Scenario, ScenarioSequence, SuiteContext};
use crate::domain::model::{NewFood, PatchOperation};
use crate::domain::ports::FoodApi;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::StatusCode;

const NO_CREATED_FOOD: &str = "no food id from create_food_returns_created";

fn created_food_skip_reason(context: &SuiteContext) -> Option<String> {
    match context.created_food_id() {
        None => Some(NO_CREATED_FOOD.to_string()),
        Some(_) if context.created_food_deleted() => Some("created food already deleted".to_string()),
        Some(_) => None,
    }
}

pub struct CreateFoodReturnsCreated {
    food: NewFood,
}

#[async_trait]
impl Scenario for CreateFoodReturnsCreated {
    fn name(&self) -> &str {
        "create_food_returns_created"
    }

    fn order(&self) -> u32 {
        1
    }

    async fn run(&self, api: &dyn FoodApi, context: &mut SuiteContext) -> Result<()> {
        let response = api.create_food(&self.food).await?;
        expect_status(&response, StatusCode::CREATED)?;

        let food_id = expect_string_field(&response, "foodId")?;
        tracing::info!("🍲 Created food {}", food_id);
        context.set_created_food_id(food_id);
        Ok(())
    }
}

pub struct ListFoodsReturnsNonEmptyList;

#[async_trait]
impl Scenario for ListFoodsReturnsNonEmptyList {
    fn name(&self) -> &str {
        "list_foods_returns_non_empty_list"
    }

    fn order(&self) -> u32 {
        2
    }

    async fn run(&self, api: &dyn FoodApi, _context: &mut SuiteContext) -> Result<()> {
        let response = api.list_foods().await?;
        expect_status(&response, StatusCode::OK)?;

        let count = expect_non_empty_array(&response)?;
        tracing::debug!("Listed {} foods", count);
        Ok(())
    }
}

pub struct EditFoodNameReturnsOk {
    new_name: String,
}

#[async_trait]
impl Scenario for EditFoodNameReturnsOk {
    fn name(&self) -> &str {
        "edit_food_name_returns_ok"
    }

    fn order(&self) -> u32 {
        3
    }

    fn skip_reason(&self, context: &SuiteContext) -> Option<String> {
        created_food_skip_reason(context)
    }

    async fn run(&self, api: &dyn FoodApi, context: &mut SuiteContext) -> Result<()> {
        let food_id = context.created_food_id().unwrap_or_default().to_string();
        let changes = [PatchOperation::replace("/name", self.new_name.as_str())];

        let response = api.edit_food(&food_id, &changes).await?;
        expect_status(&response, StatusCode::OK)
    }
}

pub struct DeleteFoodReturnsOk;

#[async_trait]
impl Scenario for DeleteFoodReturnsOk {
    fn name(&self) -> &str {
        "delete_food_returns_ok"
    }

    fn order(&self) -> u32 {
        4
    }

    fn skip_reason(&self, context: &SuiteContext) -> Option<String> {
        created_food_skip_reason(context)
    }

    async fn run(&self, api: &dyn FoodApi, context: &mut SuiteContext) -> Result<()> {
        let food_id = context.created_food_id().unwrap_or_default().to_string();

        let response = api.delete_food(&food_id).await?;
        expect_status(&response, StatusCode::OK)?;
        context.mark_created_food_deleted();
        Ok(())
    }
}

pub struct CreateFoodWithoutRequiredFieldsReturnsBadRequest;

#[async_trait]
impl Scenario for CreateFoodWithoutRequiredFieldsReturnsBadRequest {
    fn name(&self) -> &str {
        "create_food_without_required_fields_returns_bad_request"
    }

    fn order(&self) -> u32 {
        5
    }

    async fn run(&self, api: &dyn FoodApi, _context: &mut SuiteContext) -> Result<()> {
        let food = NewFood {
            name: String::new(),
            description: String::new(),
            url: None,
        };

        let response = api.create_food(&food).await?;
        expect_status(&response, StatusCode::BAD_REQUEST)
    }
}

pub struct EditMissingFoodReturnsNotFound {
    food_id: String,
    new_name: String,
}

#[async_trait]
impl Scenario for EditMissingFoodReturnsNotFound {
    fn name(&self) -> &str {
        "edit_missing_food_returns_not_found"
    }

    fn order(&self) -> u32 {
        6
    }

    async fn run(&self, api: &dyn FoodApi, _context: &mut SuiteContext) -> Result<()> {
        let changes = [PatchOperation::replace("/name", self.new_name.as_str())];

        let response = api.edit_food(&self.food_id, &changes).await?;
        expect_status(&response, StatusCode::NOT_FOUND)
    }
}

pub struct DeleteMissingFoodReturnsBadRequest {
    food_id: String,
}

#[async_trait]
impl Scenario for DeleteMissingFoodReturnsBadRequest {
    fn name(&self) -> &str {
        "delete_missing_food_returns_bad_request"
    }

    fn order(&self) -> u32 {
        7
    }

    async fn run(&self, api: &dyn FoodApi, _context: &mut SuiteContext) -> Result<()> {
        let response = api.delete_food(&self.food_id).await?;
        expect_status(&response, StatusCode::BAD_REQUEST)
    }
}

/// 組出完整的七項檢查
pub fn standard_suite(execution_id: String, fixtures: &Fixtures, fail_fast: bool) -> ScenarioSequence {
    let mut sequence = ScenarioSequence::new(execution_id).with_fail_fast(fail_fast);

    sequence.add_scenario(Box::new(CreateFoodReturnsCreated {
        food: NewFood {
            name: fixtures.food_name.clone(),
            description: fixtures.food_description.clone(),
            url: Some(fixtures.food_url.clone()),
        },
    }));
    sequence.add_scenario(Box::new(ListFoodsReturnsNonEmptyList));
    sequence.add_scenario(Box::new(EditFoodNameReturnsOk {
        new_name: fixtures.updated_food_name.clone(),
    }));
    sequence.add_scenario(Box::new(DeleteFoodReturnsOk));
    sequence.add_scenario(Box::new(CreateFoodWithoutRequiredFieldsReturnsBadRequest));
    sequence.add_scenario(Box::new(EditMissingFoodReturnsNotFound {
        food_id: fixtures.missing_food_id.clone(),
        new_name: fixtures.missing_food_name.clone(),
    }));
    sequence.add_scenario(Box::new(DeleteMissingFoodReturnsBadRequest {
        food_id: fixtures.missing_food_id.clone(),
    }));

    sequence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequence::Outcome;
    use crate::domain::model::ApiResponse;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// 記憶體內的 Food API，行為對齊真實服務的狀態碼
    #[derive(Default)]
    struct InMemoryFoodApi {
        foods: Mutex<HashMap<String, NewFood>>,
        next_id: Mutex<u32>,
        broken_create: bool,
    }

    impl InMemoryFoodApi {
        fn with_broken_create() -> Self {
            Self {
                broken_create: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl FoodApi for InMemoryFoodApi {
        async fn create_food(&self, food: &NewFood) -> Result<ApiResponse> {
            if self.broken_create {
                return Ok(ApiResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "oops"));
            }
            if food.name.is_empty() || food.description.is_empty() {
                return Ok(ApiResponse::new(StatusCode::BAD_REQUEST, r#"{"msg":"invalid"}"#));
            }
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let id = format!("food-{}", *next_id);
            self.foods.lock().unwrap().insert(id.clone(), food.clone());
            Ok(ApiResponse::new(
                StatusCode::CREATED,
                serde_json::json!({"foodId": id, "msg": "created"}).to_string(),
            ))
        }

        async fn list_foods(&self) -> Result<ApiResponse> {
            let foods = self.foods.lock().unwrap();
            let names: Vec<&str> = foods.values().map(|f| f.name.as_str()).collect();
            Ok(ApiResponse::new(StatusCode::OK, serde_json::json!(names).to_string()))
        }

        async fn edit_food(&self, food_id: &str, changes: &[PatchOperation]) -> Result<ApiResponse> {
            let mut foods = self.foods.lock().unwrap();
            match foods.get_mut(food_id) {
                Some(food) => {
                    for change in changes {
                        if change.path == "/name" {
                            food.name = change.value.as_str().unwrap_or_default().to_string();
                        }
                    }
                    Ok(ApiResponse::new(StatusCode::OK, "{}"))
                }
                None => Ok(ApiResponse::new(StatusCode::NOT_FOUND, "{}")),
            }
        }

        async fn delete_food(&self, food_id: &str) -> Result<ApiResponse> {
            match self.foods.lock().unwrap().remove(food_id) {
                Some(_) => Ok(ApiResponse::new(StatusCode::OK, "{}")),
                None => Ok(ApiResponse::new(StatusCode::BAD_REQUEST, "{}")),
            }
        }
    }

    #[tokio::test]
    async fn test_standard_suite_passes_against_conforming_api() {
        let api = InMemoryFoodApi::default();
        let suite = standard_suite("test".to_string(), &Fixtures::default(), false);
        assert_eq!(suite.len(), 7);

        let context = suite.execute_all(&api).await;

        for result in &context.previous_results {
            assert_eq!(result.outcome, Outcome::Passed, "{} failed: {:?}", result.name, result.message);
        }
        let orders: Vec<u32> = context.previous_results.iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(context.created_food_id(), Some("food-1"));
        assert!(context.leftover_food_id().is_none());
        assert!(api.foods.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dependent_checks_skip_when_create_fails() {
        let api = InMemoryFoodApi::with_broken_create();
        let suite = standard_suite("test".to_string(), &Fixtures::default(), false);

        let context = suite.execute_all(&api).await;

        let create = context.get_result_by_name("create_food_returns_created").unwrap();
        assert_eq!(create.outcome, Outcome::Failed);
        assert!(create.message.as_deref().unwrap().contains("500"));

        let edit = context.get_result_by_name("edit_food_name_returns_ok").unwrap();
        assert_eq!(edit.outcome, Outcome::Skipped);
        assert_eq!(edit.message.as_deref(), Some(NO_CREATED_FOOD));
        assert_eq!(
            context.get_result_by_name("delete_food_returns_ok").unwrap().outcome,
            Outcome::Skipped
        );
        assert_eq!(
            context
                .get_result_by_name("delete_missing_food_returns_bad_request")
                .unwrap()
                .outcome,
            Outcome::Passed
        );
    }

    #[tokio::test]
    async fn test_edit_applies_updated_name() {
        let api = InMemoryFoodApi::default();
        let mut context = SuiteContext::new("test".to_string());

        CreateFoodReturnsCreated {
            food: NewFood {
                name: "Soup".to_string(),
                description: "Hot".to_string(),
                url: Some(String::new()),
            },
        }
        .run(&api, &mut context)
        .await
        .unwrap();

        EditFoodNameReturnsOk {
            new_name: "Cold Soup".to_string(),
        }
        .run(&api, &mut context)
        .await
        .unwrap();

        let foods = api.foods.lock().unwrap();
        assert_eq!(foods.get("food-1").unwrap().name, "Cold Soup");
    }

    #[tokio::test]
    async fn test_list_fails_on_empty_collection() {
        let api = InMemoryFoodApi::default();
        let mut context = SuiteContext::new("test".to_string());

        let err = ListFoodsReturnsNonEmptyList
            .run(&api, &mut context)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }
}
