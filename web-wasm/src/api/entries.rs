//! エントリAPI(一覧・作成・削除)

use site_followup_common::error::{Error, Result};
use site_followup_common::types::{Entry, EntryDraft};

use super::{error_from_response, parse_json, request};

const ENTRIES_URL: &str = "/api/entries";

fn entry_url(id: i64) -> String {
    format!("{}/{}", ENTRIES_URL, id)
}

/// エントリ一覧を取得する(並びはバックエンドの返却順のまま)
pub async fn list() -> Result<Vec<Entry>> {
    let resp = request("GET", ENTRIES_URL, None).await?;
    if !resp.ok() {
        return Err(error_from_response(&resp, "Failed to load entries").await);
    }
    parse_json(&resp).await
}

/// エントリを作成する
pub async fn create(draft: &EntryDraft) -> Result<Entry> {
    let body = serde_json::to_string(draft).map_err(|e| Error::Backend {
        status: 0,
        message: e.to_string(),
    })?;
    let resp = request("POST", ENTRIES_URL, Some(&body)).await?;
    if !resp.ok() {
        return Err(error_from_response(&resp, "Failed to save entry").await);
    }
    parse_json(&resp).await
}

/// エントリを削除する(削除済みIDへの再実行も成功扱い)
pub async fn delete(id: i64) -> Result<()> {
    let resp = request("DELETE", &entry_url(id), None).await?;
    if !resp.ok() {
        return Err(error_from_response(&resp, "Failed to delete entry").await);
    }
    Ok(())
}
