/// Reusable popup components

use crate::view::SessionRow;
use patternfly_yew::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SessionItemProps {
    pub row: SessionRow,
    #[prop_or(false)]
    pub disabled: bool,
    pub on_open: Callback<i64>,
    pub on_rename: Callback<i64>,
    pub on_delete: Callback<i64>,
}

#[function_component(SessionItem)]
pub fn session_item(props: &SessionItemProps) -> Html {
    let timestamp = props.row.timestamp;

    html! {
        <div class="session-item">
            <div class="session-info">
                <div class="session-name">{&props.row.name}</div>
                <div class="session-meta">{&props.row.subtitle}</div>
            </div>
            <div class="session-actions">
                <Button
                    onclick={props.on_open.reform(move |_| timestamp)}
                    disabled={props.disabled}
                    variant={ButtonVariant::Primary}
                >
                    {"Open"}
                </Button>
                <Button
                    onclick={props.on_rename.reform(move |_| timestamp)}
                    disabled={props.disabled}
                    variant={ButtonVariant::Secondary}
                >
                    {"Rename"}
                </Button>
                <Button
                    onclick={props.on_delete.reform(move |_| timestamp)}
                    disabled={props.disabled}
                    variant={ButtonVariant::Danger}
                >
                    {"Delete"}
                </Button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct RenameDialogProps {
    pub value: String,
    pub on_input: Callback<String>,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Modal with the session name pre-filled. Enter confirms, Escape cancels.
#[function_component(RenameDialog)]
pub fn rename_dialog(props: &RenameDialogProps) -> Html {
    let oninput = props.on_input.reform(|e: InputEvent| {
        e.target_dyn_into::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default()
    });

    let onkeydown = {
        let on_confirm = props.on_confirm.clone();
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "Enter" => on_confirm.emit(()),
            "Escape" => on_cancel.emit(()),
            _ => {}
        })
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal">
                <h2 class="modal-title">{"Rename Session"}</h2>
                <input
                    type="text"
                    class="modal-input"
                    value={props.value.clone()}
                    {oninput}
                    {onkeydown}
                />
                <div class="modal-actions">
                    <Button onclick={props.on_confirm.reform(|_| ())} variant={ButtonVariant::Primary}>
                        {"Save"}
                    </Button>
                    <Button onclick={props.on_cancel.reform(|_| ())} variant={ButtonVariant::Secondary}>
                        {"Cancel"}
                    </Button>
                </div>
            </div>
        </div>
    }
}
