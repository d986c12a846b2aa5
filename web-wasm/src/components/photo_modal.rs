//! 写真モーダルコンポーネント
//!
//! エントリのサムネイルクリックで保存画像と抽出テキストを表示する。

use leptos::prelude::*;
use site_followup_common::view::EntryView;

#[component]
pub fn PhotoModal<FC>(entry: EntryView, on_close: FC) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone,
{
    let has_text = entry.has_text;
    let on_close_backdrop = on_close.clone();

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close_backdrop(())>
            <div class="modal photo-modal" on:click=|ev| ev.stop_propagation()>
                <button class="modal-close" on:click=move |_| on_close(())>"×"</button>
                <img src=entry.photo_url.clone() alt=entry.name.clone() />
                <Show when=move || has_text>
                    <div class="photo-modal-text">
                        <h4>"Extracted Text"</h4>
                        <p>{entry.extracted_text.clone()}</p>
                    </div>
                </Show>
            </div>
        </div>
    }
}
