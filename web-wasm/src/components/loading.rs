//! ローディングオーバーレイコンポーネント

use leptos::prelude::*;

#[component]
pub fn LoadingOverlay(message: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="loading-overlay">
                <div class="spinner"></div>
                <p class="loading-text">{move || message.get().unwrap_or_default()}</p>
            </div>
        </Show>
    }
}
