//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Site Follow-up"</h1>
            <p class="text-muted">"Capture, tag and track site photos"</p>
        </header>
    }
}
