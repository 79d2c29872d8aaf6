/// Popup UI: lists matching tabs and groups them on demand

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;
use crate::chrome::{ChromeHost, load_config};
use crate::config::{ExtensionConfig, PopupConfig};
use crate::operations::{ListEntry, focus_tab, group_listed_tabs, list_matching_tabs};
use crate::tab_data::{TabId, WindowId};

#[derive(Clone, PartialEq)]
enum AppState {
    Loading,
    Idle,
    Grouping,
    Error(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading);
    let entries = use_state(Vec::<ListEntry>::new);
    let popup_config = use_state(PopupConfig::default);

    // Snapshot the matching tabs once, when the popup opens
    {
        let state = state.clone();
        let entries = entries.clone();
        let popup_config = popup_config.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let config = load_config().await.unwrap_or_else(|e| {
                    log::warn!("using default config: {}", e);
                    ExtensionConfig::default()
                });

                match list_matching_tabs(&ChromeHost, &config.popup).await {
                    Ok(list) => {
                        entries.set(list);
                        popup_config.set(config.popup);
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        state.set(AppState::Error(format!("Failed to list tabs: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    // Entry click: bring that tab forward
    let on_entry_click = {
        let state = state.clone();

        Callback::from(move |(tab_id, window_id): (TabId, WindowId)| {
            let state = state.clone();

            spawn_local(async move {
                match focus_tab(&ChromeHost, tab_id, window_id).await {
                    Ok(_) => {}
                    Err(e) if e.is_missing() => {
                        log::debug!("tab {} is gone: {}", tab_id, e);
                    }
                    Err(e) => {
                        state.set(AppState::Error(format!("Failed to focus tab: {}", e)));
                    }
                }
            });
        })
    };

    // Group button handler
    let on_group = {
        let state = state.clone();
        let entries = entries.clone();
        let popup_config = popup_config.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let tab_ids: Vec<TabId> = entries.iter().map(|e| e.tab_id).collect();
            let title = popup_config.group_title.clone();

            state.set(AppState::Grouping);

            spawn_local(async move {
                match group_listed_tabs(&ChromeHost, &tab_ids, &title).await {
                    Ok(_) => {
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        state.set(AppState::Error(format!("Grouping failed: {}", e)));
                    }
                }
            });
        })
    };

    let is_busy = matches!(*state, AppState::Loading | AppState::Grouping);

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Tab Grouper"}</h1>

            // Status display
            {match &*state {
                AppState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Finding tabs..."}</p>
                    </div>
                },
                AppState::Grouping => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Grouping tabs..."}</p>
                    </div>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            <ul class="tab-list">
                {for entries.iter().map(|entry| {
                    let on_entry_click = on_entry_click.clone();
                    let target = (entry.tab_id, entry.window_id);
                    let onclick = Callback::from(move |_: MouseEvent| on_entry_click.emit(target));

                    html! {
                        <li key={entry.tab_id}>
                            <a onclick={onclick}>
                                <h3 class="title">{&entry.title}</h3>
                                <p class="pathname">{&entry.path}</p>
                            </a>
                        </li>
                    }
                })}
            </ul>

            if !matches!(*state, AppState::Loading) && entries.is_empty() {
                <p class="message-text">{"No matching tabs are open."}</p>
            }

            <Button onclick={on_group} disabled={is_busy || entries.is_empty()} variant={ButtonVariant::Primary} block={true}>
                {format!("Group tabs as {}", popup_config.group_title)}
            </Button>
        </div>
    }
}
