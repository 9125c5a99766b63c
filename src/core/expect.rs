use crate::domain::model::ApiResponse;
use crate::utils::error::{FoodyError, Result};
use reqwest::StatusCode;

pub const BODY_PREVIEW_LIMIT: usize = 200;

/// 截斷過長的回應內容，避免整頁 HTML 寫進錯誤訊息
pub fn body_preview(body: &str) -> String {
    if body.chars().count() <= BODY_PREVIEW_LIMIT {
        body.to_string()
    } else {
        let head: String = body.chars().take(BODY_PREVIEW_LIMIT).collect();
        format!("{}...", head)
    }
}

pub fn expect_status(response: &ApiResponse, expected: StatusCode) -> Result<()> {
    if response.status == expected {
        return Ok(());
    }
    Err(FoodyError::UnexpectedStatusError {
        expected,
        actual: response.status,
        body: body_preview(&response.body),
    })
}

/// 從 JSON 物件取出字串欄位，例如建立後回傳的 `foodId`
pub fn expect_string_field(response: &ApiResponse, field: &str) -> Result<String> {
    let json: serde_json::Value = serde_json::from_str(&response.body).map_err(|e| {
        FoodyError::assertion(format!(
            "response body is not JSON ({}): {}",
            e,
            body_preview(&response.body)
        ))
    })?;

    match json.get(field) {
        Some(serde_json::Value::String(value)) if !value.is_empty() => Ok(value.clone()),
        Some(other) => Err(FoodyError::assertion(format!(
            "field '{}' is not a non-empty string: {}",
            field, other
        ))),
        None => Err(FoodyError::assertion(format!(
            "field '{}' missing from response: {}",
            field,
            body_preview(&response.body)
        ))),
    }
}

/// 回應必須是非空的 JSON 陣列，回傳元素數量
pub fn expect_non_empty_array(response: &ApiResponse) -> Result<usize> {
    let items: Vec<serde_json::Value> = serde_json::from_str(&response.body).map_err(|e| {
        FoodyError::assertion(format!(
            "response body is not a JSON array ({}): {}",
            e,
            body_preview(&response.body)
        ))
    })?;

    if items.is_empty() {
        return Err(FoodyError::assertion("expected a non-empty list, got []"));
    }
    Ok(items.len())
}
