use crate::domain::model::{ApiResponse, Credentials, NewFood, PatchOperation};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Food CRUD 端點。實作只負責送出請求，狀態碼的判斷留給各項檢查。
#[async_trait]
pub trait FoodApi: Send + Sync {
    async fn create_food(&self, food: &NewFood) -> Result<ApiResponse>;
    async fn list_foods(&self) -> Result<ApiResponse>;
    async fn edit_food(&self, food_id: &str, changes: &[PatchOperation]) -> Result<ApiResponse>;
    async fn delete_food(&self, food_id: &str) -> Result<ApiResponse>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn credentials(&self) -> &Credentials;
    fn request_timeout(&self) -> Duration;
}
