//! 技術者名簿API(一覧・追加・改名・削除)

use serde::Serialize;
use site_followup_common::error::{Error, Result};
use site_followup_common::types::EngineerName;

use super::{error_from_response, parse_json, request};

const NAMES_URL: &str = "/api/names";

fn name_url(id: i64) -> String {
    format!("{}/{}", NAMES_URL, id)
}

#[derive(Serialize)]
struct NamePayload<'a> {
    name: &'a str,
}

fn payload_json(name: &str) -> Result<String> {
    serde_json::to_string(&NamePayload { name }).map_err(|e| Error::Backend {
        status: 0,
        message: e.to_string(),
    })
}

/// 名簿一覧を取得する
pub async fn list() -> Result<Vec<EngineerName>> {
    let resp = request("GET", NAMES_URL, None).await?;
    if !resp.ok() {
        return Err(error_from_response(&resp, "Failed to load names").await);
    }
    parse_json(&resp).await
}

/// 名前を追加する(重複は409 → Conflict)
pub async fn add(name: &str) -> Result<EngineerName> {
    let body = payload_json(name)?;
    let resp = request("POST", NAMES_URL, Some(&body)).await?;
    if !resp.ok() {
        return Err(error_from_response(&resp, "Failed to add name").await);
    }
    parse_json(&resp).await
}

/// 名前を変更する(対象なしは404 → NotFound)
///
/// 過去のエントリは名前を値でコピー保持しているため影響を受けない。
pub async fn rename(id: i64, new_name: &str) -> Result<EngineerName> {
    let body = payload_json(new_name)?;
    let resp = request("PUT", &name_url(id), Some(&body)).await?;
    if !resp.ok() {
        return Err(error_from_response(&resp, "Failed to update name").await);
    }
    parse_json(&resp).await
}

/// 名前を削除する
pub async fn remove(id: i64) -> Result<()> {
    let resp = request("DELETE", &name_url(id), None).await?;
    if !resp.ok() {
        return Err(error_from_response(&resp, "Failed to delete").await);
    }
    Ok(())
}
