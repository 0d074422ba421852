use remarque_client::{CommentMode, RenderedComment};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct CommentListItemProps {
    pub comment: RenderedComment,
    pub on_start_edit: Callback<()>,
    pub on_edit_change: Callback<String>,
    pub on_confirm_edit: Callback<()>,
    pub on_cancel_edit: Callback<()>,
    pub on_delete: Callback<()>,
    pub on_reply: Callback<()>,
}

#[function_component(CommentListItem)]
pub fn comment_list_item(p: &CommentListItemProps) -> Html {
    let c = &p.comment;
    html! {
        <li class="list-group-item">
            if let Some(preview) = &c.reply_preview {
                <div class="reply-preview text-muted small text-truncate">
                    <span class="reply-icon bi-reply me-1"></span>
                    { preview }
                </div>
            }
            <div class="d-flex align-items-center">
                <div class="flex-fill">
                    <div class="fw-bold small">{ &c.comment.username }</div>
                    { body(p) }
                </div>
                { buttons(p) }
            </div>
        </li>
    }
}

fn body(p: &CommentListItemProps) -> Html {
    let c = &p.comment;
    match &c.mode {
        CommentMode::Viewing => html! {
            <div>
                { &c.comment.payload }
                if c.edited {
                    <span class="comment-edited text-muted ms-2">{ "(edited)" }</span>
                }
            </div>
        },
        CommentMode::Editing(payload) | CommentMode::Submitting(payload) => {
            let on_confirm = p.on_confirm_edit.clone();
            let on_cancel = p.on_cancel_edit.clone();
            html! {
                <input
                    type="text"
                    class="form-control"
                    value={ payload.clone() }
                    disabled={ matches!(c.mode, CommentMode::Submitting(_)) }
                    oninput={ p.on_edit_change.reform(|e: InputEvent| {
                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                        input.value()
                    }) }
                    onkeyup={ Callback::from(move |e: KeyboardEvent| {
                        match &e.key() as &str {
                            "Enter" => on_confirm.emit(()),
                            "Escape" => on_cancel.emit(()),
                            _ => (),
                        }
                    }) }
                />
            }
        }
    }
}

fn buttons(p: &CommentListItemProps) -> Html {
    match &p.comment.mode {
        CommentMode::Viewing => html! {
            <div class="d-flex align-items-center">
                { button("bi-pencil", "Edit", &p.on_start_edit) }
                { button("bi-trash", "Delete", &p.on_delete) }
                { button("bi-reply", "Reply", &p.on_reply) }
            </div>
        },
        CommentMode::Editing(_) => html! {
            <div class="d-flex align-items-center">
                { button("bi-check-lg", "Save", &p.on_confirm_edit) }
                { button("bi-x-lg", "Cancel", &p.on_cancel_edit) }
            </div>
        },
        CommentMode::Submitting(_) => html! {
            <div class="spinner-border spinner-border-sm m-2" role="status"></div>
        },
    }
}

fn button(icon: &'static str, label: &'static str, on_click: &Callback<()>) -> Html {
    html! {
        <button
            type="button"
            class={ classes!("btn", "bi-btn", icon) }
            title={ label }
            aria-label={ label }
            onclick={ on_click.reform(|_| ()) }
        >
        </button>
    }
}
