//! バックエンドREST APIクライアント
//!
//! fetch呼び出しの共通処理と、非2xxレスポンスのエラー変換を提供する。
//! エラーボディは `{"error": "..."}` 形式を最優先で抽出し、
//! 取れなければ操作ごとのフォールバックメッセージを使う。

pub mod entries;
pub mod export;
pub mod names;

use serde::Deserialize;
use site_followup_common::error::{Error, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// バックエンドのエラーボディ
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    error: String,
}

/// トランスポート層の失敗をエラー型へ変換
pub(crate) fn transport_error(value: &JsValue) -> Error {
    Error::Backend {
        status: 0,
        message: js_error_message(value),
    }
}

fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// HTTPステータスをエラー分類へ対応付ける
pub(crate) fn classify_status(status: u16, message: String) -> Error {
    match status {
        404 => Error::NotFound(message),
        409 => Error::Conflict(message),
        _ => Error::Backend { status, message },
    }
}

/// fetchリクエストを発行しレスポンスを返す(ステータス検査は呼び出し側)
pub(crate) async fn request(method: &str, url: &str, body: Option<&str>) -> Result<Response> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| transport_error(&e))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| transport_error(&e))?;
    }

    let window = web_sys::window().unwrap();
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| transport_error(&e))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| transport_error(&e))?;
    Ok(resp)
}

/// レスポンスボディをJSONとしてデシリアライズ
pub(crate) async fn parse_json<T>(resp: &Response) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let promise = resp.json().map_err(|e| transport_error(&e))?;
    let json = JsFuture::from(promise).await.map_err(|e| transport_error(&e))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| Error::Backend {
        status: resp.status(),
        message: e.to_string(),
    })
}

/// 非2xxレスポンスをエラー型へ変換
pub(crate) async fn error_from_response(resp: &Response, fallback: &str) -> Error {
    let message = read_error_message(resp)
        .await
        .unwrap_or_else(|| fallback.to_string());
    classify_status(resp.status(), message)
}

async fn read_error_message(resp: &Response) -> Option<String> {
    let promise = resp.json().ok()?;
    let json = JsFuture::from(promise).await.ok()?;
    let body: ErrorBody = serde_wasm_bindgen::from_value(json).ok()?;
    if body.error.is_empty() {
        None
    } else {
        Some(body.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status_not_found() {
        let error = classify_status(404, "Name not found or failed update".to_string());
        assert!(matches!(error, Error::NotFound(_)));
    }

    #[test]
    fn test_classify_status_conflict() {
        let error = classify_status(409, "Name already exists".to_string());
        assert_eq!(error, Error::Conflict("Name already exists".to_string()));
    }

    #[test]
    fn test_classify_status_backend() {
        let error = classify_status(500, "Storage upload failed".to_string());
        assert!(matches!(error, Error::Backend { status: 500, .. }));
        assert_eq!(format!("{}", error), "Storage upload failed");
    }

    #[test]
    fn test_error_body_deserialize() {
        let body: ErrorBody = serde_json::from_str(r#"{"error": "No entries to export"}"#)
            .expect("deserialize failed");
        assert_eq!(body.error, "No entries to export");
    }

    #[test]
    fn test_error_body_missing_field_defaults_empty() {
        let body: ErrorBody = serde_json::from_str(r#"{"success": true}"#).expect("deserialize failed");
        assert_eq!(body.error, "");
    }
}
