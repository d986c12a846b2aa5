//! 端末位置情報と逆ジオコーディング
//!
//! 位置解決はベストエフォート: 非対応・許可拒否・タイムアウトはCapability
//! エラーとして呼び出し側へ返し、ワークフローは位置を空のまま継続する。
//! 逆ジオコーディングの失敗は座標文字列へフォールバックし、失敗扱いにしない。

use futures::channel::oneshot;
use site_followup_common::error::{Error, Result};
use site_followup_common::geocode::{self, ReverseGeocodeResponse};
use site_followup_common::session::ResolvedLocation;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Position, PositionError, PositionOptions, Request, RequestInit, RequestMode, Response};

/// 位置取得のタイムアウト(ミリ秒)。キャッシュ済みの測位は使わない。
const GEOLOCATION_TIMEOUT_MS: u32 = 15_000;

/// 撮影画像の位置を解決する(座標取得 → 地域文字列導出)
pub async fn resolve_location() -> Result<ResolvedLocation> {
    let (lat, lng) = current_position().await?;
    let area = reverse_geocode(lat, lng).await;
    Ok(ResolvedLocation {
        lat: Some(lat),
        lng: Some(lng),
        area,
    })
}

/// 端末の現在位置を取得する(高精度・15秒タイムアウト・キャッシュ不使用)
async fn current_position() -> Result<(f64, f64)> {
    let window = web_sys::window().unwrap();
    let geolocation = window
        .navigator()
        .geolocation()
        .map_err(|_| Error::Capability("Geolocation not supported".to_string()))?;

    let options = PositionOptions::new();
    options.set_enable_high_accuracy(true);
    options.set_timeout(GEOLOCATION_TIMEOUT_MS);
    options.set_maximum_age(0);

    let (tx, rx) = oneshot::channel::<Result<(f64, f64)>>();
    let tx = std::rc::Rc::new(std::cell::RefCell::new(Some(tx)));

    let on_success = {
        let tx = std::rc::Rc::clone(&tx);
        Closure::wrap(Box::new(move |position: Position| {
            if let Some(tx) = tx.borrow_mut().take() {
                let coords = position.coords();
                let _ = tx.send(Ok((coords.latitude(), coords.longitude())));
            }
        }) as Box<dyn FnMut(Position)>)
    };

    let on_error = {
        let tx = std::rc::Rc::clone(&tx);
        Closure::wrap(Box::new(move |error: PositionError| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Err(Error::Capability(error.message())));
            }
        }) as Box<dyn FnMut(PositionError)>)
    };

    geolocation
        .get_current_position_with_error_callback_and_options(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
            &options,
        )
        .map_err(|_| Error::Capability("Geolocation not supported".to_string()))?;

    on_success.forget();
    on_error.forget();

    rx.await
        .unwrap_or_else(|_| Err(Error::Capability("Location access denied".to_string())))
}

/// 座標を地域文字列へ解決する
///
/// 失敗してもエラーにせず、6桁精度の座標文字列で代替する。
pub async fn reverse_geocode(lat: f64, lng: f64) -> String {
    match fetch_reverse(lat, lng).await {
        Ok(response) => geocode::derive_area(&response, lat, lng),
        Err(e) => {
            leptos::logging::error!("reverse geocode failed: {e}");
            geocode::coordinate_fallback(lat, lng)
        }
    }
}

async fn fetch_reverse(lat: f64, lng: f64) -> Result<ReverseGeocodeResponse> {
    let transport = |value: &JsValue| Error::Backend {
        status: 0,
        message: value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    };

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let url = geocode::nominatim_url(lat, lng);
    let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| transport(&e))?;
    request
        .headers()
        .set("Accept-Language", "en")
        .map_err(|e| transport(&e))?;

    let window = web_sys::window().unwrap();
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| transport(&e))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| transport(&e))?;
    if !resp.ok() {
        return Err(Error::Backend {
            status: resp.status(),
            message: format!("Reverse geocode error: {}", resp.status()),
        });
    }

    let promise = resp.json().map_err(|e| transport(&e))?;
    let json = JsFuture::from(promise).await.map_err(|e| transport(&e))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| Error::Backend {
        status: 0,
        message: e.to_string(),
    })
}
