//! OCRブリッジ(Tesseract.jsをJavaScript側で実行)
//!
//! ページに読み込まれたTesseract.jsをJavaScript Bridge経由で呼び出す。
//! 進捗は0.0〜1.0の割合でコールバック通知される。

use site_followup_common::error::{Error, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// 認識言語(英語固定)
const OCR_LANG: &str = "eng";

#[wasm_bindgen(module = "/js/ocr-bridge.js")]
extern "C" {
    /// 画像からテキストを抽出
    ///
    /// # Arguments
    /// * `image_data_url` - Data URL形式の画像
    /// * `lang` - Tesseractの言語コード
    /// * `on_progress` - 進捗コールバック(0.0〜1.0)
    #[wasm_bindgen(js_name = "recognizeText", catch)]
    async fn recognize_text_js(
        image_data_url: &str,
        lang: &str,
        on_progress: &js_sys::Function,
    ) -> std::result::Result<JsValue, JsValue>;
}

/// OCRを実行し抽出テキストを返す(前後空白はトリム済み、空文字も正常)
pub async fn extract_text(
    image_data_url: &str,
    on_progress: impl Fn(f64) + 'static,
) -> Result<String> {
    let progress = Closure::wrap(Box::new(move |fraction: f64| {
        on_progress(fraction);
    }) as Box<dyn FnMut(f64)>);

    let result = recognize_text_js(image_data_url, OCR_LANG, progress.as_ref().unchecked_ref())
        .await
        .map_err(|e| Error::Backend {
            status: 0,
            message: e
                .as_string()
                .unwrap_or_else(|| "OCR processing failed".to_string()),
        });
    progress.forget();

    let text = result?.as_string().unwrap_or_default();
    Ok(text.trim().to_string())
}
