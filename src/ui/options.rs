/// Options page: edit grouping rules and popup settings

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use patternfly_yew::prelude::*;
use crate::chrome::{load_config, save_config};
use crate::config::{ExtensionConfig, GroupRule};

#[derive(Clone, PartialEq)]
enum ViewState {
    Loading,
    Idle,
    Saved,
    Error(String),
}

fn input_value(e: &InputEvent) -> Option<String> {
    e.target_dyn_into::<HtmlInputElement>().map(|input| input.value())
}

/// Persist `config` and report the result through `state`
fn persist(config: ExtensionConfig, state: UseStateHandle<ViewState>) {
    spawn_local(async move {
        match save_config(&config).await {
            Ok(_) => state.set(ViewState::Saved),
            Err(e) => state.set(ViewState::Error(format!("Failed to save: {}", e))),
        }
    });
}

#[function_component(OptionsPage)]
pub fn options_page() -> Html {
    let state = use_state(|| ViewState::Loading);
    let config = use_state(ExtensionConfig::default);
    let new_host = use_state(String::new);
    let new_title = use_state(String::new);
    let editing_rule = use_state(|| None::<String>); // host being edited
    let edit_input_value = use_state(String::new);
    let popup_title = use_state(String::new);

    // Load config on mount
    {
        let state = state.clone();
        let config = config.clone();
        let popup_title = popup_title.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_config().await {
                    Ok(data) => {
                        popup_title.set(data.popup.group_title.clone());
                        config.set(data);
                        state.set(ViewState::Idle);
                    }
                    Err(e) => {
                        state.set(ViewState::Error(format!("Failed to load: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    let on_new_host_input = {
        let new_host = new_host.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                new_host.set(value);
            }
        })
    };

    let on_new_title_input = {
        let new_title = new_title.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                new_title.set(value);
            }
        })
    };

    // Add rule handler
    let on_add_rule = {
        let config = config.clone();
        let state = state.clone();
        let new_host = new_host.clone();
        let new_title = new_title.clone();

        Callback::from(move |_| {
            let mut new_config = (*config).clone();

            match new_config.add_rule(GroupRule::new(&new_host, &new_title)) {
                Ok(_) => {
                    config.set(new_config.clone());
                    new_host.set(String::new());
                    new_title.set(String::new());
                    persist(new_config, state.clone());
                }
                Err(e) => {
                    state.set(ViewState::Error(e.to_string()));
                }
            }
        })
    };

    // Delete rule handler
    let on_delete_rule = {
        let config = config.clone();
        let state = state.clone();

        Callback::from(move |host: String| {
            let mut new_config = (*config).clone();
            if new_config.remove_rule(&host) {
                config.set(new_config.clone());
                persist(new_config, state.clone());
            }
        })
    };

    // Start editing a rule title
    let on_start_edit = {
        let editing_rule = editing_rule.clone();
        let edit_input_value = edit_input_value.clone();

        Callback::from(move |(host, current_title): (String, String)| {
            editing_rule.set(Some(host));
            edit_input_value.set(current_title);
        })
    };

    // Save edited rule title
    let on_save_edit = {
        let editing_rule = editing_rule.clone();
        let edit_input_value = edit_input_value.clone();
        let config = config.clone();
        let state = state.clone();

        Callback::from(move |_| {
            if let Some(host) = (*editing_rule).clone() {
                let new_title = edit_input_value.trim().to_string();
                let mut new_config = (*config).clone();

                if new_config.update_rule_title(&host, new_title) {
                    match new_config.validate() {
                        Ok(_) => {
                            config.set(new_config.clone());
                            persist(new_config, state.clone());
                        }
                        Err(e) => state.set(ViewState::Error(e.to_string())),
                    }
                }

                editing_rule.set(None);
            }
        })
    };

    let on_cancel_edit = {
        let editing_rule = editing_rule.clone();
        Callback::from(move |_| {
            editing_rule.set(None);
        })
    };

    let on_edit_input = {
        let edit_input_value = edit_input_value.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                edit_input_value.set(value);
            }
        })
    };

    let on_popup_title_input = {
        let popup_title = popup_title.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                popup_title.set(value);
            }
        })
    };

    // Save popup group title
    let on_save_popup = {
        let config = config.clone();
        let state = state.clone();
        let popup_title = popup_title.clone();

        Callback::from(move |_| {
            let mut new_config = (*config).clone();
            new_config.popup.group_title = popup_title.trim().to_string();

            match new_config.validate() {
                Ok(_) => {
                    config.set(new_config.clone());
                    persist(new_config, state.clone());
                }
                Err(e) => state.set(ViewState::Error(e.to_string())),
            }
        })
    };

    html! {
        <div class="container">
            <div class="header">
                <h1 class="main-title">{"Tab Grouper Options"}</h1>
            </div>

            // Status display
            {match &*state {
                ViewState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading settings..."}</p>
                    </div>
                },
                ViewState::Saved => html! {
                    <Alert r#type={AlertType::Success} title={"Saved"} inline={true}>
                        {"Settings stored."}
                    </Alert>
                },
                ViewState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                ViewState::Idle => html! {}
            }}

            <h2 class="stats-title">{"Automatic grouping"}</h2>

            if config.rules.is_empty() {
                <div class="empty-state">
                    <p>{"No rules yet."}</p>
                    <p class="empty-state-hint">{"Tabs are only grouped from the popup."}</p>
                </div>
            } else {
                <div class="rules-list">
                    {for config.rules.iter().map(|rule| {
                        let is_editing = (*editing_rule).as_ref() == Some(&rule.host);

                        html! {
                            <RuleRow
                                key={rule.host.clone()}
                                rule={rule.clone()}
                                is_editing={is_editing}
                                edit_value={(*edit_input_value).clone()}
                                on_delete={on_delete_rule.clone()}
                                on_start_edit={on_start_edit.clone()}
                                on_save_edit={on_save_edit.clone()}
                                on_cancel_edit={on_cancel_edit.clone()}
                                on_edit_input={on_edit_input.clone()}
                            />
                        }
                    })}
                </div>
            }

            <div class="flex-column-gap">
                <input
                    type="text"
                    placeholder="Host, e.g. github.com"
                    value={(*new_host).clone()}
                    oninput={on_new_host_input}
                    class="search-input"
                />
                <input
                    type="text"
                    placeholder="Group title"
                    value={(*new_title).clone()}
                    oninput={on_new_title_input}
                    class="search-input"
                />
                <Button onclick={on_add_rule} variant={ButtonVariant::Primary}>
                    {"Add rule"}
                </Button>
            </div>

            <h2 class="stats-title">{"Popup"}</h2>
            <div class="flex-column-gap">
                <p class="message-text">
                    {format!("Lists tabs matching: {}", config.popup.url_patterns.join(", "))}
                </p>
                <input
                    type="text"
                    value={(*popup_title).clone()}
                    oninput={on_popup_title_input}
                    class="search-input"
                />
                <Button onclick={on_save_popup} variant={ButtonVariant::Secondary}>
                    {"Save popup group title"}
                </Button>
            </div>

            <div class="footer">
                {format!("{} rules", config.rules.len())}
            </div>
        </div>
    }
}

// Rule row component
#[derive(Properties, PartialEq)]
struct RuleRowProps {
    rule: GroupRule,
    is_editing: bool,
    edit_value: String,
    on_delete: Callback<String>,
    on_start_edit: Callback<(String, String)>,
    on_save_edit: Callback<()>,
    on_cancel_edit: Callback<()>,
    on_edit_input: Callback<InputEvent>,
}

#[function_component(RuleRow)]
fn rule_row(props: &RuleRowProps) -> Html {
    let rule = &props.rule;

    html! {
        <div class="session-card">
            <div class="session-header">
                <div class="session-title-container">
                    <p class="session-date">{&rule.host}</p>
                    if props.is_editing {
                        <div class="session-title-edit-mode">
                            <input
                                type="text"
                                value={props.edit_value.clone()}
                                oninput={props.on_edit_input.clone()}
                                class="session-title-input"
                            />
                            <Button onclick={props.on_save_edit.reform(|_| ())}>
                                {"✓"}
                            </Button>
                            <Button
                                onclick={props.on_cancel_edit.reform(|_| ())}
                                variant={ButtonVariant::Secondary}
                            >
                                {"✗"}
                            </Button>
                        </div>
                    } else {
                        <div class="session-title-view-mode">
                            <h3
                                class="session-title"
                                onclick={props.on_start_edit.reform({
                                    let host = rule.host.clone();
                                    let title = rule.title.clone();
                                    move |_| (host.clone(), title.clone())
                                })}
                            >
                                {&rule.title}
                            </h3>
                            <span class="edit-icon">{"✏️"}</span>
                        </div>
                    }
                </div>

                <div class="session-actions">
                    <Button
                        onclick={props.on_delete.reform({
                            let host = rule.host.clone();
                            move |_| host.clone()
                        })}
                        variant={ButtonVariant::Danger}
                    >
                        {"🗑️"}
                    </Button>
                </div>
            </div>
        </div>
    }
}
