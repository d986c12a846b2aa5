//! 画像取得(FileReaderによるData URL読み込み)
//!
//! コールバック駆動のFileReaderをoneshotチャネルでFuture化し、
//! ワークフロー側は逐次awaitで扱えるようにする。

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use site_followup_common::error::{Error, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, FileReader};

type ReadSender = oneshot::Sender<Result<String>>;

fn read_error() -> Error {
    Error::Backend {
        status: 0,
        message: "Failed to read image".to_string(),
    }
}

/// ファイルをData URLとして読み込む
pub async fn read_as_data_url(file: File) -> Result<String> {
    let reader = FileReader::new().map_err(|_| read_error())?;
    let (tx, rx) = oneshot::channel::<Result<String>>();
    let sender: Rc<RefCell<Option<ReadSender>>> = Rc::new(RefCell::new(Some(tx)));

    let onload = {
        let reader = reader.clone();
        let sender = Rc::clone(&sender);
        Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
            if let Some(tx) = sender.borrow_mut().take() {
                let result = reader
                    .result()
                    .ok()
                    .and_then(|v| v.as_string())
                    .ok_or_else(read_error);
                let _ = tx.send(result);
            }
        }) as Box<dyn FnMut(_)>)
    };

    let onerror = {
        let sender = Rc::clone(&sender);
        Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
            if let Some(tx) = sender.borrow_mut().take() {
                let _ = tx.send(Err(read_error()));
            }
        }) as Box<dyn FnMut(_)>)
    };

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    reader.read_as_data_url(&file).map_err(|_| read_error())?;

    rx.await.unwrap_or_else(|_| Err(read_error()))
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn wasm_read_as_data_url_returns_data_url() {
        let parts = js_sys::Array::new();
        parts.push(&JsValue::from_str("hello"));
        let file = File::new_with_str_sequence(&parts, "hello.txt").expect("File creation failed");

        let data_url = read_as_data_url(file).await.expect("read failed");
        assert!(data_url.starts_with("data:"));
    }
}
