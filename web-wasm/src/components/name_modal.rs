//! 技術者名簿モーダルコンポーネント
//!
//! 名簿の一覧・追加・改名・削除。改名の入力はブラウザのpromptを使う。

use leptos::prelude::*;
use site_followup_common::types::EngineerName;

#[component]
pub fn NameModal<FA, FR, FD, FC>(
    names: ReadSignal<Vec<EngineerName>>,
    on_add: FA,
    on_rename: FR,
    on_remove: FD,
    on_close: FC,
) -> impl IntoView
where
    FA: Fn(String) + 'static + Clone + Send,
    FR: Fn(i64, String) + 'static + Clone + Send + Sync,
    FD: Fn(i64) + 'static + Clone + Send + Sync,
    FC: Fn(()) + 'static + Clone,
{
    let (new_name, set_new_name) = signal(String::new());

    let submit_new_name = {
        let on_add = on_add.clone();
        move || {
            let name = new_name.get_untracked();
            on_add(name);
            set_new_name.set(String::new());
        }
    };

    let on_add_click = {
        let submit_new_name = submit_new_name.clone();
        move |_| submit_new_name()
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            submit_new_name();
        }
    };

    let on_close_backdrop = on_close.clone();

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close_backdrop(())>
            <div class="modal name-modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>"Manage Engineers"</h3>
                    <button class="modal-close" on:click=move |_| on_close(())>"×"</button>
                </div>

                <div class="name-add-row">
                    <input
                        type="text"
                        placeholder="New engineer name"
                        prop:value=move || new_name.get()
                        on:input=move |ev| set_new_name.set(event_target_value(&ev))
                        on:keydown=on_keydown
                    />
                    <button class="btn btn-primary" on:click=on_add_click>"Add"</button>
                </div>

                <Show
                    when=move || !names.get().is_empty()
                    fallback=|| view! { <div class="empty-state-small">"No engineers added yet"</div> }
                >
                    <div class="names-list">
                        <For
                            each=move || names.get()
                            key=|name| (name.id, name.name.clone())
                            children={
                                let on_rename = on_rename.clone();
                                let on_remove = on_remove.clone();
                                move |name| {
                                    let on_rename = on_rename.clone();
                                    let on_remove = on_remove.clone();
                                    let id = name.id;
                                    let current = name.name.clone();
                                    view! {
                                        <div class="name-item">
                                            <span class="name-item-name">{name.name.clone()}</span>
                                            <div class="name-item-actions">
                                                <button
                                                    class="btn-edit-sm"
                                                    on:click=move |_| {
                                                        if let Some(new_name) = prompt_rename(&current) {
                                                            on_rename(id, new_name);
                                                        }
                                                    }
                                                >
                                                    "Edit"
                                                </button>
                                                <button
                                                    class="btn-danger-sm"
                                                    on:click=move |_| {
                                                        if confirm("Delete this engineer?") {
                                                            on_remove(id);
                                                        }
                                                    }
                                                >
                                                    "Delete"
                                                </button>
                                            </div>
                                        </div>
                                    }
                                }
                            }
                        />
                    </div>
                </Show>
            </div>
        </div>
    }
}

/// 改名入力のprompt。空入力・変更なしはNone
fn prompt_rename(current: &str) -> Option<String> {
    let window = web_sys::window().unwrap();
    let input = window
        .prompt_with_message_and_default("Edit engineer name:", current)
        .ok()
        .flatten()?;
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == current {
        return None;
    }
    Some(trimmed.to_string())
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .unwrap()
        .confirm_with_message(message)
        .unwrap_or(false)
}
