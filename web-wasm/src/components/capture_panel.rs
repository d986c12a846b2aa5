//! 撮影パネルコンポーネント
//!
//! カメラ撮影・ファイルアップロードの入口、プレビュー、
//! 位置情報・OCRのインライン表示、名前選択と送信操作をまとめる。

use leptos::html;
use leptos::prelude::*;
use site_followup_common::session::{CaptureOrigin, CaptureSession, CaptureState};
use site_followup_common::types::EngineerName;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};

use crate::app::{LocationStatus, OcrStatus};

#[component]
pub fn CapturePanel<FI, FS, FC, FM>(
    session: ReadSignal<CaptureSession>,
    names: ReadSignal<Vec<EngineerName>>,
    selected_name: ReadSignal<String>,
    set_selected_name: WriteSignal<String>,
    location_status: ReadSignal<LocationStatus>,
    ocr_status: ReadSignal<OcrStatus>,
    on_image: FI,
    on_submit: FS,
    on_clear: FC,
    on_manage_names: FM,
) -> impl IntoView
where
    FI: Fn(File, CaptureOrigin) + 'static + Clone,
    FS: Fn(()) + 'static + Clone,
    FC: Fn(()) + 'static + Clone + Send + Sync,
    FM: Fn(()) + 'static + Clone,
{
    let camera_input = NodeRef::<html::Input>::new();
    let upload_input = NodeRef::<html::Input>::new();

    let has_photo = move || session.get().photo.is_some();
    let preview_src = move || session.get().photo.unwrap_or_default();
    let is_submitting = move || session.get().state() == CaptureState::Submitting;

    let on_camera_change = {
        let on_image = on_image.clone();
        move |ev: web_sys::Event| {
            if let Some(file) = take_selected_file(&ev) {
                on_image(file, CaptureOrigin::Captured);
            }
        }
    };

    let on_upload_change = move |ev: web_sys::Event| {
        if let Some(file) = take_selected_file(&ev) {
            on_image(file, CaptureOrigin::Uploaded);
        }
    };

    view! {
        <div class="capture-panel">
            <div class="capture-buttons">
                <button
                    class="btn btn-primary"
                    on:click=move |_| {
                        if let Some(input) = camera_input.get() {
                            input.click();
                        }
                    }
                >
                    "Capture Photo"
                </button>
                <button
                    class="btn btn-secondary"
                    on:click=move |_| {
                        if let Some(input) = upload_input.get() {
                            input.click();
                        }
                    }
                >
                    "Upload Photo"
                </button>
            </div>

            // 非表示のファイル入力。カメラ側はcapture属性で背面カメラを起動する
            <input
                type="file"
                accept="image/*"
                capture="environment"
                style="display: none"
                node_ref=camera_input
                on:change=on_camera_change
            />
            <input
                type="file"
                accept="image/*"
                style="display: none"
                node_ref=upload_input
                on:change=on_upload_change
            />

            <Show when=has_photo>
                <div class="preview-section">
                    <img class="preview-image" src=preview_src alt="Preview" />

                    <div
                        class="location-info"
                        class:location-found=move || {
                            matches!(location_status.get(), LocationStatus::Resolved(_))
                        }
                    >
                        {move || location_status.get().label()}
                    </div>

                    <div
                        class="ocr-info"
                        class:ocr-found=move || matches!(ocr_status.get(), OcrStatus::Found(_))
                    >
                        {move || ocr_status.get().label()}
                    </div>

                    <button
                        class="btn btn-tertiary"
                        disabled=is_submitting
                        on:click={
                            let on_clear = on_clear.clone();
                            move |_| on_clear(())
                        }
                    >
                        "Clear"
                    </button>
                </div>
            </Show>

            <div class="submit-row">
                <select
                    class="name-select"
                    prop:value=move || selected_name.get()
                    on:change=move |ev| set_selected_name.set(event_target_value(&ev))
                >
                    <option value="">"Select Engineer..."</option>
                    <For
                        each=move || names.get()
                        key=|name| name.id
                        children=move |name| {
                            view! {
                                <option value=name.name.clone()>{name.name.clone()}</option>
                            }
                        }
                    />
                </select>
                <button class="btn btn-secondary" on:click=move |_| on_manage_names(())>
                    "Manage"
                </button>
                <button
                    class="btn btn-primary"
                    disabled=is_submitting
                    on:click=move |_| on_submit(())
                >
                    "Submit Entry"
                </button>
            </div>
        </div>
    }
}

/// change イベントから選択ファイルを取り出す
///
/// 同じファイルを続けて選べるよう、取り出し後に入力値をリセットする。
fn take_selected_file(ev: &web_sys::Event) -> Option<File> {
    let input: HtmlInputElement = ev.target()?.dyn_into().ok()?;
    let file = input.files()?.get(0);
    input.set_value("");
    file
}
