/// Popup UI for Tab Sessions

use crate::controller::{Feedback, FeedbackKind, PopupController, PopupState};
use crate::host::{confirm_action, BrowserClock, ChromeStorage, ChromeTabs};
use crate::ui::components::{RenameDialog, SessionItem};
use crate::view::SessionListView;
use patternfly_yew::prelude::*;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

type BrowserController = PopupController<ChromeStorage, ChromeTabs, BrowserClock>;

/// State handles mirrored from the controller after each operation
#[derive(Clone)]
struct Mirror {
    view: UseStateHandle<SessionListView>,
    busy: UseStateHandle<bool>,
    dark_mode: UseStateHandle<bool>,
    feedback: UseStateHandle<Option<Feedback>>,
}

impl Mirror {
    fn sync(&self, controller: &BrowserController) {
        self.view.set(controller.view());
        self.busy.set(controller.is_busy());
        self.dark_mode.set(controller.dark_mode());
    }

    fn finish(&self, controller: &BrowserController, feedback: Option<Feedback>) {
        self.sync(controller);
        if feedback.is_some() {
            self.feedback.set(feedback);
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let controller: Rc<BrowserController> =
        use_memo((), |_| PopupController::new(ChromeStorage, ChromeTabs, BrowserClock));
    let loading = use_state(|| true);
    let name_input = use_state(String::new);
    let rename_value = use_state(|| None::<String>);
    let mirror = Mirror {
        view: use_state(SessionListView::default),
        busy: use_state(|| false),
        dark_mode: use_state(|| false),
        feedback: use_state(|| None::<Feedback>),
    };

    // Load sessions on mount
    {
        let controller = controller.clone();
        let mirror = mirror.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let feedback = controller.init().await;
                mirror.finish(&controller, feedback);
                loading.set(false);
            });
            || ()
        });
    }

    let on_name_input = {
        let name_input = name_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                name_input.set(input.value());
            }
        })
    };

    let on_save = {
        let controller = controller.clone();
        let mirror = mirror.clone();
        let name_input = name_input.clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            let mirror = mirror.clone();
            let name_input = name_input.clone();
            let name = (*name_input).clone();

            mirror.busy.set(true);
            spawn_local(async move {
                let feedback = controller.save_session(&name).await;
                if feedback.kind == FeedbackKind::Success {
                    name_input.set(String::new());
                }
                mirror.finish(&controller, Some(feedback));
            });
        })
    };

    let on_open = {
        let controller = controller.clone();
        let mirror = mirror.clone();
        Callback::from(move |timestamp: i64| {
            let controller = controller.clone();
            let mirror = mirror.clone();

            mirror.busy.set(true);
            spawn_local(async move {
                let feedback = controller.open_session(timestamp).await;
                mirror.finish(&controller, Some(feedback));
            });
        })
    };

    let on_delete = {
        let controller = controller.clone();
        let mirror = mirror.clone();
        Callback::from(move |timestamp: i64| {
            let controller = controller.clone();
            let mirror = mirror.clone();

            spawn_local(async move {
                let feedback = controller
                    .delete_session(timestamp, |session| {
                        confirm_action(&format!("Delete session \"{}\"?", session.name))
                    })
                    .await;
                mirror.finish(&controller, feedback);
            });
        })
    };

    let on_start_rename = {
        let controller = controller.clone();
        let mirror = mirror.clone();
        let rename_value = rename_value.clone();
        Callback::from(move |timestamp: i64| {
            if let Some(name) = controller.begin_rename(timestamp) {
                rename_value.set(Some(name));
            }
            mirror.sync(&controller);
        })
    };

    let on_rename_input = {
        let rename_value = rename_value.clone();
        Callback::from(move |value: String| {
            rename_value.set(Some(value));
        })
    };

    let on_confirm_rename = {
        let controller = controller.clone();
        let mirror = mirror.clone();
        let rename_value = rename_value.clone();
        Callback::from(move |_: ()| {
            let controller = controller.clone();
            let mirror = mirror.clone();
            let rename_value = rename_value.clone();
            let value = (*rename_value).clone().unwrap_or_default();

            spawn_local(async move {
                let feedback = controller.confirm_rename(&value).await;
                if controller.state() == PopupState::Idle {
                    rename_value.set(None);
                }
                mirror.finish(&controller, Some(feedback));
            });
        })
    };

    let on_cancel_rename = {
        let controller = controller.clone();
        let mirror = mirror.clone();
        let rename_value = rename_value.clone();
        Callback::from(move |_: ()| {
            controller.cancel_rename();
            if controller.state() == PopupState::Idle {
                rename_value.set(None);
            }
            mirror.sync(&controller);
        })
    };

    let on_toggle_dark_mode = {
        let controller = controller.clone();
        let mirror = mirror.clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            let mirror = mirror.clone();
            spawn_local(async move {
                let feedback = controller.toggle_dark_mode().await;
                mirror.finish(&controller, feedback);
            });
        })
    };

    let is_busy = *mirror.busy || *loading;
    let view = &*mirror.view;

    html! {
        <div class={classes!("popup", (*mirror.dark_mode).then_some("dark-mode"))}>
            <div class="header">
                <h1 class="popup-title">{"Tab Sessions"}</h1>
                <Button onclick={on_toggle_dark_mode} variant={ButtonVariant::Secondary}>
                    {if *mirror.dark_mode { "☀️" } else { "🌙" }}
                </Button>
            </div>

            // Feedback from the last operation
            if let Some(feedback) = (*mirror.feedback).clone() {
                <div class="message-top-margin">
                    <Alert r#type={alert_type(feedback.kind)} title={feedback.message} inline={true}>
                    </Alert>
                </div>
            }

            <div class="save-form">
                <input
                    type="text"
                    class="session-name-input"
                    placeholder="Session name (optional)"
                    value={(*name_input).clone()}
                    oninput={on_name_input}
                />
                <Button onclick={on_save} disabled={is_busy} variant={ButtonVariant::Primary} block={true}>
                    {"💾 Save Current Tabs"}
                </Button>
            </div>

            if *loading {
                <div class="loading-text-center">
                    <Spinner />
                    <p class="loading-text">{"Loading sessions..."}</p>
                </div>
            } else if view.is_empty {
                <div class="empty-state">
                    <p>{"No saved sessions yet."}</p>
                    <p class="empty-state-hint">{"Save the tabs in this window to get started."}</p>
                </div>
            } else {
                <div class="sessions-list">
                    {for view.rows.iter().map(|row| html! {
                        <SessionItem
                            key={row.timestamp.to_string()}
                            row={row.clone()}
                            disabled={is_busy}
                            on_open={on_open.clone()}
                            on_rename={on_start_rename.clone()}
                            on_delete={on_delete.clone()}
                        />
                    })}
                </div>
            }

            <p class="footer-popup">
                {format!("{} sessions • {} tabs", view.rows.len(), view.total_tabs)}
            </p>

            if let Some(value) = (*rename_value).clone() {
                <RenameDialog
                    value={value}
                    on_input={on_rename_input}
                    on_confirm={on_confirm_rename}
                    on_cancel={on_cancel_rename}
                />
            }
        </div>
    }
}

fn alert_type(kind: FeedbackKind) -> AlertType {
    match kind {
        FeedbackKind::Success => AlertType::Success,
        FeedbackKind::Info => AlertType::Info,
        FeedbackKind::Error => AlertType::Danger,
    }
}
