//! トースト通知コンポーネント
//!
//! 表示期間の管理(3秒で自動削除)はapp側のpush_toastが行う。

use leptos::prelude::*;

use crate::app::Toast;

#[component]
pub fn ToastContainer(toasts: ReadSignal<Vec<Toast>>) -> impl IntoView {
    view! {
        <div class="toast-container">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    view! {
                        <div class=format!("toast {}", toast.kind.as_str())>
                            {toast.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
