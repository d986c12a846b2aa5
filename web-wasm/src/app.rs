//! メインアプリケーションコンポーネント
//!
//! 撮影セッションの状態遷移はsite_followup_common::sessionが持ち、
//! ここでは非同期ステップ(読み込み・位置解決・OCR・送信)の逐次実行と
//! シグナル配線のみを行う。古い世代の完了は状態機械側で破棄される。

use gloo::timers::callback::Timeout;
use leptos::logging;
use leptos::prelude::*;
use site_followup_common::clock;
use site_followup_common::session::{CaptureOrigin, CaptureSession};
use site_followup_common::types::{EngineerName, Entry};
use site_followup_common::view::{self, EntryView};
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

use crate::api;
use crate::capture;
use crate::components::{
    capture_panel::CapturePanel, entry_list::EntryList, header::Header,
    loading::LoadingOverlay, name_modal::NameModal, photo_modal::PhotoModal,
    toast::ToastContainer,
};
use crate::geoloc;
use crate::ocr;

/// トースト表示時間(ミリ秒)
const TOAST_DURATION_MS: u32 = 3_000;

/// トースト通知
#[derive(Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Clone, Copy, PartialEq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

/// 位置解決のインライン表示状態
#[derive(Clone, Default, PartialEq)]
pub enum LocationStatus {
    #[default]
    Idle,
    Resolving,
    Resolved(String),
    /// アップロード画像のため位置解決をスキップ
    Skipped,
    Unavailable,
}

impl LocationStatus {
    pub fn label(&self) -> Option<String> {
        match self {
            LocationStatus::Idle => None,
            LocationStatus::Resolving => Some("Fetching location...".to_string()),
            LocationStatus::Resolved(area) => Some(area.clone()),
            LocationStatus::Skipped => Some("Location: N/A (uploaded photo)".to_string()),
            LocationStatus::Unavailable => Some("Location access denied".to_string()),
        }
    }
}

/// OCRのインライン表示状態
#[derive(Clone, Default, PartialEq)]
pub enum OcrStatus {
    #[default]
    Idle,
    Running(f64),
    Found(String),
    Empty,
    Failed,
}

impl OcrStatus {
    pub fn label(&self) -> Option<String> {
        match self {
            OcrStatus::Idle => None,
            OcrStatus::Running(fraction) => {
                Some(format!("Extracting text... {:.0}%", fraction * 100.0))
            }
            OcrStatus::Found(preview) => Some(format!("Text found: \"{}\"", preview)),
            OcrStatus::Empty => Some("No text found in image".to_string()),
            OcrStatus::Failed => Some("OCR processing failed".to_string()),
        }
    }
}

/// モバイル表示のタブ
#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Capture,
    Entries,
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (session, set_session) = signal(CaptureSession::default());
    let (entries, set_entries) = signal(Vec::<Entry>::new());
    let (names, set_names) = signal(Vec::<EngineerName>::new());
    let (selected_name, set_selected_name) = signal(String::new());
    let (toasts, set_toasts) = signal(Vec::<Toast>::new());
    let toast_seq = StoredValue::new(0u64);
    let (loading, set_loading) = signal(None::<String>);
    let (active_tab, set_active_tab) = signal(Tab::Capture);
    let (location_status, set_location_status) = signal(LocationStatus::Idle);
    let (ocr_status, set_ocr_status) = signal(OcrStatus::Idle);
    let (show_name_modal, set_show_name_modal) = signal(false);
    let (photo_modal, set_photo_modal) = signal(None::<EntryView>);

    // 初期ロード
    Effect::new(move |_| {
        spawn_local(async move {
            refresh_entries(set_entries).await;
        });
        spawn_local(async move {
            refresh_names(set_names, selected_name, set_selected_name).await;
        });
    });

    // 画像取得ハンドラ(カメラ・アップロード共通)
    let on_image = move |file: File, origin: CaptureOrigin| {
        spawn_local(async move {
            let data_url = match capture::read_as_data_url(file).await {
                Ok(data_url) => data_url,
                Err(e) => {
                    push_toast(set_toasts, toast_seq, e.to_string(), ToastKind::Error);
                    return;
                }
            };

            let acquired = set_session
                .try_update(|s| s.acquire(data_url.clone(), origin))
                .unwrap_or_else(|| {
                    Err(site_followup_common::Error::Validation(
                        "Session unavailable".to_string(),
                    ))
                });
            let generation = match acquired {
                Ok(generation) => generation,
                Err(e) => {
                    push_toast(set_toasts, toast_seq, e.to_string(), ToastKind::Error);
                    return;
                }
            };

            set_location_status.set(LocationStatus::Idle);
            set_ocr_status.set(OcrStatus::Idle);
            set_session.update(|s| {
                s.begin_processing(generation);
            });

            run_capture_pipeline(
                generation,
                data_url,
                origin,
                session,
                set_session,
                set_location_status,
                set_ocr_status,
                set_toasts,
                toast_seq,
            )
            .await;
        });
    };

    // 送信ハンドラ
    let on_submit = move |_: ()| {
        let name = selected_name.get_untracked();
        let now = js_sys::Date::new_0();
        let timestamp =
            clock::timestamp_display(now.get_hours(), now.get_minutes(), now.get_seconds());
        let date = clock::iso_date(now.get_full_year() as i32, now.get_month() + 1, now.get_date());

        let draft = match set_session.try_update(|s| s.begin_submit(&name, timestamp, date)) {
            Some(Ok(draft)) => draft,
            Some(Err(e)) => {
                push_toast(set_toasts, toast_seq, e.to_string(), ToastKind::Error);
                return;
            }
            None => return,
        };

        set_loading.set(Some("Saving entry...".to_string()));
        spawn_local(async move {
            match api::entries::create(&draft).await {
                Ok(_) => {
                    set_session.update(|s| s.submit_succeeded());
                    set_location_status.set(LocationStatus::Idle);
                    set_ocr_status.set(OcrStatus::Idle);
                    push_toast(
                        set_toasts,
                        toast_seq,
                        "Entry saved successfully!",
                        ToastKind::Success,
                    );
                    refresh_entries(set_entries).await;
                }
                Err(e) => {
                    // セッションは保持したまま再試行できるようにする
                    set_session.update(|s| s.submit_failed());
                    push_toast(set_toasts, toast_seq, e.to_string(), ToastKind::Error);
                }
            }
            set_loading.set(None);
        });
    };

    // クリアハンドラ
    let on_clear = move |_: ()| {
        let cleared = set_session.try_update(|s| s.clear()).unwrap_or(Ok(()));
        if cleared.is_ok() {
            set_location_status.set(LocationStatus::Idle);
            set_ocr_status.set(OcrStatus::Idle);
        }
    };

    // エントリ削除ハンドラ
    let on_delete_entry = move |id: i64| {
        spawn_local(async move {
            match api::entries::delete(id).await {
                Ok(()) => {
                    push_toast(set_toasts, toast_seq, "Entry deleted", ToastKind::Info);
                    refresh_entries(set_entries).await;
                }
                Err(e) => push_toast(set_toasts, toast_seq, e.to_string(), ToastKind::Error),
            }
        });
    };

    let on_view_photo = move |entry: EntryView| {
        set_photo_modal.set(Some(entry));
    };

    // Excelエクスポートハンドラ
    let on_export = move |_: ()| {
        set_loading.set(Some("Generating Excel...".to_string()));
        spawn_local(async move {
            let now = js_sys::Date::new_0();
            let date =
                clock::iso_date(now.get_full_year() as i32, now.get_month() + 1, now.get_date());
            match api::export::download_spreadsheet(&date).await {
                Ok(()) => push_toast(
                    set_toasts,
                    toast_seq,
                    "Excel exported successfully!",
                    ToastKind::Success,
                ),
                Err(e) => push_toast(set_toasts, toast_seq, e.to_string(), ToastKind::Error),
            }
            set_loading.set(None);
        });
    };

    // 名簿ハンドラ
    let on_add_name = move |name: String| {
        let trimmed = name.trim().to_string();
        if trimmed.is_empty() {
            push_toast(set_toasts, toast_seq, "Please enter a name", ToastKind::Error);
            return;
        }
        spawn_local(async move {
            match api::names::add(&trimmed).await {
                Ok(created) => {
                    push_toast(
                        set_toasts,
                        toast_seq,
                        format!("{} added!", created.name),
                        ToastKind::Success,
                    );
                    refresh_names(set_names, selected_name, set_selected_name).await;
                }
                Err(e) => push_toast(set_toasts, toast_seq, e.to_string(), ToastKind::Error),
            }
        });
    };

    let on_rename_name = move |id: i64, new_name: String| {
        spawn_local(async move {
            match api::names::rename(id, &new_name).await {
                Ok(_) => {
                    push_toast(set_toasts, toast_seq, "Name updated!", ToastKind::Success);
                    refresh_names(set_names, selected_name, set_selected_name).await;
                }
                Err(e) => push_toast(set_toasts, toast_seq, e.to_string(), ToastKind::Error),
            }
        });
    };

    let on_remove_name = move |id: i64| {
        spawn_local(async move {
            match api::names::remove(id).await {
                Ok(()) => {
                    push_toast(set_toasts, toast_seq, "Engineer removed", ToastKind::Info);
                    refresh_names(set_names, selected_name, set_selected_name).await;
                }
                Err(e) => push_toast(set_toasts, toast_seq, e.to_string(), ToastKind::Error),
            }
        });
    };

    let on_manage_names = move |_: ()| set_show_name_modal.set(true);

    view! {
        <div class="container">
            <Header />

            <main>
                <section
                    class="capture-section"
                    class:active=move || active_tab.get() == Tab::Capture
                >
                    <CapturePanel
                        session=session
                        names=names
                        selected_name=selected_name
                        set_selected_name=set_selected_name
                        location_status=location_status
                        ocr_status=ocr_status
                        on_image=on_image
                        on_submit=on_submit
                        on_clear=on_clear
                        on_manage_names=on_manage_names
                    />
                </section>

                <section
                    class="entries-section"
                    class:active=move || active_tab.get() == Tab::Entries
                >
                    <EntryList
                        entries=entries
                        on_delete=on_delete_entry
                        on_view_photo=on_view_photo
                        on_export=on_export
                    />
                </section>
            </main>

            <nav class="bottom-nav">
                <button
                    class="nav-item"
                    class:active=move || active_tab.get() == Tab::Capture
                    on:click=move |_| set_active_tab.set(Tab::Capture)
                >
                    "Capture"
                </button>
                <button
                    class="nav-item"
                    class:active=move || active_tab.get() == Tab::Entries
                    on:click=move |_| set_active_tab.set(Tab::Entries)
                >
                    "Entries"
                </button>
            </nav>

            {move || {
                show_name_modal.get().then(|| {
                    view! {
                        <NameModal
                            names=names
                            on_add=on_add_name
                            on_rename=on_rename_name
                            on_remove=on_remove_name
                            on_close=move |_| set_show_name_modal.set(false)
                        />
                    }
                })
            }}

            {move || {
                photo_modal.get().map(|entry| {
                    view! {
                        <PhotoModal
                            entry=entry
                            on_close=move |_| set_photo_modal.set(None)
                        />
                    }
                })
            }}

            <ToastContainer toasts=toasts />
            <LoadingOverlay message=loading />
        </div>
    }
}

/// トーストを追加し、一定時間後に自動削除する
fn push_toast(
    set_toasts: WriteSignal<Vec<Toast>>,
    toast_seq: StoredValue<u64>,
    message: impl Into<String>,
    kind: ToastKind,
) {
    let id = toast_seq.get_value();
    toast_seq.set_value(id + 1);
    set_toasts.update(|toasts| {
        toasts.push(Toast {
            id,
            message: message.into(),
            kind,
        });
    });

    Timeout::new(TOAST_DURATION_MS, move || {
        set_toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
    })
    .forget();
}

/// 撮影パイプライン: (撮影時のみ)位置解決 → OCR → ReadyToSubmit
///
/// 位置解決・OCRはいずれもベストエフォート。各完了は世代つきで状態機械へ
/// 渡し、取得し直しで世代が進んでいた場合は破棄される。
#[allow(clippy::too_many_arguments)]
async fn run_capture_pipeline(
    generation: u64,
    photo: String,
    origin: CaptureOrigin,
    session: ReadSignal<CaptureSession>,
    set_session: WriteSignal<CaptureSession>,
    set_location_status: WriteSignal<LocationStatus>,
    set_ocr_status: WriteSignal<OcrStatus>,
    set_toasts: WriteSignal<Vec<Toast>>,
    toast_seq: StoredValue<u64>,
) {
    if origin == CaptureOrigin::Captured {
        set_location_status.set(LocationStatus::Resolving);
        match geoloc::resolve_location().await {
            Ok(location) => {
                let area = location.area.clone();
                let applied = set_session
                    .try_update(|s| s.location_resolved(generation, location))
                    .unwrap_or(false);
                if applied {
                    set_location_status.set(LocationStatus::Resolved(area));
                }
            }
            Err(e) => {
                // 位置情報は取得できなくても致命的ではない
                logging::error!("geolocation failed: {e}");
                if session.with_untracked(|s| s.is_current(generation)) {
                    set_location_status.set(LocationStatus::Unavailable);
                    push_toast(
                        set_toasts,
                        toast_seq,
                        "Could not access location. Please enable GPS.",
                        ToastKind::Error,
                    );
                }
            }
        }
    } else {
        set_location_status.set(LocationStatus::Skipped);
    }

    if !session.with_untracked(|s| s.is_current(generation)) {
        return;
    }

    set_ocr_status.set(OcrStatus::Running(0.0));
    let on_progress = move |fraction: f64| {
        if session.with_untracked(|s| s.is_current(generation)) {
            set_ocr_status.set(OcrStatus::Running(fraction));
        }
    };

    match ocr::extract_text(&photo, on_progress).await {
        Ok(text) => {
            let applied = set_session
                .try_update(|s| s.extraction_finished(generation, &text))
                .unwrap_or(false);
            if applied {
                let trimmed = session.with_untracked(|s| s.extracted_text.clone());
                set_ocr_status.set(if trimmed.is_empty() {
                    OcrStatus::Empty
                } else {
                    OcrStatus::Found(view::text_preview(&trimmed))
                });
            }
        }
        Err(e) => {
            // OCR失敗は空テキストで完了扱いにし、送信は妨げない
            logging::error!("ocr failed: {e}");
            let applied = set_session
                .try_update(|s| s.extraction_finished(generation, ""))
                .unwrap_or(false);
            if applied {
                set_ocr_status.set(OcrStatus::Failed);
            }
        }
    }
}

/// エントリ一覧を再取得する(失敗はコンソールログのみ)
async fn refresh_entries(set_entries: WriteSignal<Vec<Entry>>) {
    match api::entries::list().await {
        Ok(list) => set_entries.set(list),
        Err(e) => logging::error!("failed to load entries: {e}"),
    }
}

/// 名簿を再取得する。直前の選択が残っていれば維持する
async fn refresh_names(
    set_names: WriteSignal<Vec<EngineerName>>,
    selected_name: ReadSignal<String>,
    set_selected_name: WriteSignal<String>,
) {
    match api::names::list().await {
        Ok(list) => {
            let previous = selected_name.get_untracked();
            let restored = view::preserve_selection(&list, &previous);
            set_names.set(list);
            set_selected_name.set(restored);
        }
        Err(e) => logging::error!("failed to load names: {e}"),
    }
}
