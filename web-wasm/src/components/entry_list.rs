//! エントリ一覧コンポーネント
//!
//! 日付見出しでグループ化して表示する。グループ化は
//! site_followup_common::view の純粋変換に委譲し、ここは描画のみ。

use leptos::prelude::*;
use site_followup_common::types::Entry;
use site_followup_common::view::{group_by_date, EntryView};

#[component]
pub fn EntryList<FD, FV, FE>(
    entries: ReadSignal<Vec<Entry>>,
    on_delete: FD,
    on_view_photo: FV,
    on_export: FE,
) -> impl IntoView
where
    FD: Fn(i64) + 'static + Clone + Send + Sync,
    FV: Fn(EntryView) + 'static + Clone + Send + Sync,
    FE: Fn(()) + 'static + Clone,
{
    let entry_count = move || entries.get().len();
    let groups = move || group_by_date(&entries.get());

    view! {
        <div class="entries-header">
            <h2>"Entries " <span class="entry-count">{entry_count}</span></h2>
            <button
                class="btn btn-secondary"
                disabled=move || entries.get().is_empty()
                on:click=move |_| on_export(())
            >
                "Export Excel"
            </button>
        </div>

        <Show
            when=move || !entries.get().is_empty()
            fallback=|| view! {
                <div class="empty-state">
                    <p>"No entries yet. Capture or upload a photo to get started!"</p>
                </div>
            }
        >
            <div class="entries-list">
                <For
                    each=groups
                    key=|group| group.date.clone()
                    children={
                        let on_delete = on_delete.clone();
                        let on_view_photo = on_view_photo.clone();
                        move |group| {
                            let on_delete = on_delete.clone();
                            let on_view_photo = on_view_photo.clone();
                            let rows = group
                                .entries
                                .into_iter()
                                .map(|entry| {
                                    let on_delete = on_delete.clone();
                                    let on_view_photo = on_view_photo.clone();
                                    entry_row(entry, on_delete, on_view_photo)
                                })
                                .collect_view();
                            view! {
                                <div class="date-header">{format!("Date: {}", group.date)}</div>
                                {rows}
                            }
                        }
                    }
                />
            </div>
        </Show>
    }
}

fn entry_row<FD, FV>(entry: EntryView, on_delete: FD, on_view_photo: FV) -> impl IntoView
where
    FD: Fn(i64) + 'static + Clone + Send + Sync,
    FV: Fn(EntryView) + 'static + Clone + Send + Sync,
{
    let id = entry.id;
    let has_text = entry.has_text;
    let view_target = entry.clone();

    view! {
        <div class="entry-item">
            <div class="entry-thumb" on:click=move |_| on_view_photo(view_target.clone())>
                <img src=entry.photo_url.clone() alt="Photo" loading="lazy" />
            </div>
            <div class="entry-details">
                <div class="entry-name">{entry.name.clone()}</div>
                <div class="entry-meta">
                    <span>{entry.timestamp.clone()}</span>
                    <span>{entry.location_label.clone()}</span>
                    <Show when=move || has_text>
                        <span class="text-badge">"Text extracted"</span>
                    </Show>
                </div>
            </div>
            <div class="entry-actions">
                <button
                    class="btn-danger-sm"
                    on:click=move |_| {
                        if confirm_delete() {
                            on_delete(id);
                        }
                    }
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}

fn confirm_delete() -> bool {
    web_sys::window()
        .unwrap()
        .confirm_with_message("Delete this entry?")
        .unwrap_or(false)
}
