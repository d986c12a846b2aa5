//! Excelエクスポート取得とダウンロード起動
//!
//! スプレッドシートの生成はバックエンド側。ここでは取得したバイト列を
//! JavaScript Bridge経由でブラウザダウンロードとして保存する。

use site_followup_common::error::Result;
use site_followup_common::view::export_filename;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::{error_from_response, request, transport_error};

const EXPORT_URL: &str = "/api/export";
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[wasm_bindgen(module = "/js/download.js")]
extern "C" {
    /// バイト列をブラウザダウンロードとして保存
    #[wasm_bindgen(js_name = "downloadFile")]
    fn download_file_js(data: &[u8], filename: &str, mime_type: &str);
}

/// スプレッドシートを取得し、当日日付つきファイル名でダウンロードを開始する
pub async fn download_spreadsheet(date: &str) -> Result<()> {
    let resp = request("GET", EXPORT_URL, None).await?;
    if !resp.ok() {
        return Err(error_from_response(&resp, "Export failed").await);
    }

    let promise = resp.array_buffer().map_err(|e| transport_error(&e))?;
    let buffer = JsFuture::from(promise).await.map_err(|e| transport_error(&e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    download_file_js(&bytes, &export_filename(date), XLSX_MIME);
    Ok(())
}
