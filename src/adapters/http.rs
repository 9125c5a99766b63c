use crate::core::expect::body_preview;
use crate::domain::model::{AccessToken, ApiResponse, Credentials, NewFood, PatchOperation};
use crate::domain::ports::{ConfigProvider, FoodApi};
use crate::utils::error::{FoodyError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use url::Url;

const AUTH_PATH: &[&str] = &["api", "User", "Authentication"];
const CREATE_PATH: &[&str] = &["api", "Food", "Create"];
const ALL_PATH: &[&str] = &["api", "Food", "All"];
const EDIT_PATH: &[&str] = &["api", "Food", "Edit"];
const DELETE_PATH: &[&str] = &["api", "Food", "Delete"];

/// 基於 reqwest 的 Food API 客戶端
#[derive(Debug, Clone)]
pub struct FoodyClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl FoodyClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        crate::utils::validation::validate_url("target.base_url", base_url)?;
        let base_url = Url::parse(base_url).map_err(|e| FoodyError::ConfigError {
            message: format!("Invalid base URL '{}': {}", base_url, e),
        })?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.base_url(), config.request_timeout())
    }

    /// 回傳帶有 JWT 的新客戶端，底層連線池共用
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// 登入並取得 access token
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<String> {
        let url = self.endpoint(AUTH_PATH, None)?;
        tracing::debug!("🔐 POST {} as '{}'", url, credentials.username);

        let response = self.client.post(url).json(credentials).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FoodyError::AuthenticationError {
                message: format!("login returned HTTP {}: {}", status, body_preview(&body)),
            });
        }

        let token: AccessToken =
            serde_json::from_str(&body).map_err(|e| FoodyError::AuthenticationError {
                message: format!("login response is not valid JSON: {}", e),
            })?;

        match token.access_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(FoodyError::AuthenticationError {
                message: "login response has no accessToken".to_string(),
            }),
        }
    }

    /// 將路徑逐段接到 base URL 後面，保留 base URL 原有的路徑前綴
    fn endpoint(&self, segments: &[&str], id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| FoodyError::ConfigError {
                message: format!("Base URL '{}' cannot carry a path", self.base_url),
            })?;
            path.pop_if_empty().extend(segments);
            if let Some(id) = id {
                path.push(id);
            }
        }
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("📡 HTTP {} ({} bytes)", status, body.len());
        Ok(ApiResponse::new(status, body))
    }
}

#[async_trait]
impl FoodApi for FoodyClient {
    async fn create_food(&self, food: &NewFood) -> Result<ApiResponse> {
        let url = self.endpoint(CREATE_PATH, None)?;
        tracing::debug!("📡 POST {}", url);
        self.execute(self.client.post(url).json(food)).await
    }

    async fn list_foods(&self) -> Result<ApiResponse> {
        let url = self.endpoint(ALL_PATH, None)?;
        tracing::debug!("📡 GET {}", url);
        self.execute(self.client.get(url)).await
    }

    async fn edit_food(&self, food_id: &str, changes: &[PatchOperation]) -> Result<ApiResponse> {
        let url = self.endpoint(EDIT_PATH, Some(food_id))?;
        tracing::debug!("📡 PATCH {}", url);
        self.execute(self.client.patch(url).json(changes)).await
    }

    async fn delete_food(&self, food_id: &str) -> Result<ApiResponse> {
        let url = self.endpoint(DELETE_PATH, Some(food_id))?;
        tracing::debug!("📡 DELETE {}", url);
        self.execute(self.client.delete(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use reqwest::StatusCode;
    use serde_json::json;

    fn client_for(server: &MockServer) -> FoodyClient {
        FoodyClient::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    fn credentials() -> Credentials {
        Credentials {
            username: "alice".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = FoodyClient::new("http://localhost:86/foody/", Duration::from_secs(5)).unwrap();
        let url = client.endpoint(EDIT_PATH, Some("abc-1")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:86/foody/api/Food/Edit/abc-1");

        let client = FoodyClient::new("http://localhost:86", Duration::from_secs(5)).unwrap();
        let url = client.endpoint(ALL_PATH, None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:86/api/Food/All");
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        assert!(FoodyClient::new("not a url", Duration::from_secs(5)).is_err());
        assert!(FoodyClient::new("ftp://localhost", Duration::from_secs(5)).is_err());
    }

    #[tokio::test]
    async fn test_authenticate_returns_token() {
        let server = MockServer::start();
        let login = server.mock(|when, then| {
            when.method(POST)
                .path("/api/User/Authentication")
                .json_body(json!({"username": "alice", "password": "secret"}));
            then.status(200)
                .json_body(json!({"username": "alice", "accessToken": "jwt-123"}));
        });

        let token = client_for(&server).authenticate(&credentials()).await.unwrap();

        login.assert();
        assert_eq!(token, "jwt-123");
    }

    #[tokio::test]
    async fn test_authenticate_rejects_missing_token() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/User/Authentication");
            then.status(200).json_body(json!({"accessToken": ""}));
        });

        let err = client_for(&server)
            .authenticate(&credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, FoodyError::AuthenticationError { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/User/Authentication");
            then.status(401).body("Invalid credentials");
        });

        let err = client_for(&server)
            .authenticate(&credentials())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_authenticate_error_truncates_long_body() {
        let server = MockServer::start();
        let page = format!("<html>{}</html>", "x".repeat(5000));
        server.mock(|when, then| {
            when.method(POST).path("/api/User/Authentication");
            then.status(502).body(page.as_str());
        });

        let err = client_for(&server)
            .authenticate(&credentials())
            .await
            .unwrap_err();
        match err {
            FoodyError::AuthenticationError { message } => {
                assert!(message.starts_with("login returned HTTP 502 Bad Gateway: <html>"));
                assert!(message.ends_with("..."));
                assert!(message.len() < 300);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_requests_carry_bearer_token() {
        let server = MockServer::start();
        let list = server.mock(|when, then| {
            when.method(GET)
                .path("/api/Food/All")
                .header("authorization", "Bearer jwt-123");
            then.status(200).json_body(json!([{"name": "Soup"}]));
        });

        let client = client_for(&server).with_token("jwt-123");
        assert!(client.is_authenticated());
        let response = client.list_foods().await.unwrap();

        list.assert();
        assert_eq!(response.status, StatusCode::OK);
        let foods: Vec<serde_json::Value> = response.json().unwrap();
        assert_eq!(foods.len(), 1);
    }

    #[tokio::test]
    async fn test_edit_and_delete_hit_id_paths() {
        let server = MockServer::start();
        let edit = server.mock(|when, then| {
            when.method(PATCH)
                .path("/api/Food/Edit/food-7")
                .json_body(json!([{"path": "/name", "op": "replace", "value": "Stew"}]));
            then.status(200).json_body(json!({"msg": "Successfully edited"}));
        });
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/api/Food/Delete/food-7");
            then.status(200).json_body(json!({"msg": "Deleted successfully!"}));
        });

        let client = client_for(&server).with_token("jwt-123");
        let edited = client
            .edit_food("food-7", &[PatchOperation::replace("/name", "Stew")])
            .await
            .unwrap();
        let deleted = client.delete_food("food-7").await.unwrap();

        edit.assert();
        delete.assert();
        assert_eq!(edited.status, StatusCode::OK);
        assert_eq!(deleted.status, StatusCode::OK);
    }

    #[test]
    fn test_create_sends_camel_case_body() {
        let server = MockServer::start();
        let create = server.mock(|when, then| {
            when.method(POST).path("/api/Food/Create").json_body(json!({
                "name": "New Food",
                "description": "Test Description",
                "url": ""
            }));
            then.status(201).json_body(json!({"foodId": "f-1"}));
        });

        let client = client_for(&server).with_token("jwt-123");
        let food = NewFood {
            name: "New Food".to_string(),
            description: "Test Description".to_string(),
            url: Some(String::new()),
        };
        let response = tokio_test::block_on(client.create_food(&food)).unwrap();

        create.assert();
        assert_eq!(response.status, StatusCode::CREATED);
    }
}
