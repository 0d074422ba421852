use remarque_client::Composer;
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct CommentComposerProps {
    pub composer: Composer,
    pub on_change: Callback<String>,
    pub on_submit: Callback<()>,
    pub on_cancel_reply: Callback<()>,
}

#[function_component(CommentComposer)]
pub fn comment_composer(p: &CommentComposerProps) -> Html {
    let on_submit = p.on_submit.clone();
    html! {
        <form
            class="d-flex flex-column"
            onsubmit={ Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                on_submit.emit(());
            }) }
        >
            if let Some(preview) = &p.composer.reply_preview {
                <div class="d-flex align-items-center text-muted small">
                    <span class="reply-icon bi-reply me-1"></span>
                    <div class="reply-preview flex-fill text-truncate">{ preview }</div>
                    <button
                        type="button"
                        class="btn bi-btn bi-x-lg"
                        aria-label="Cancel reply"
                        onclick={ p.on_cancel_reply.reform(|_| ()) }
                    >
                    </button>
                </div>
            }
            <div class="d-flex">
                <input
                    type="text"
                    class="form-control me-2"
                    placeholder="Write a comment"
                    aria-label="Comment"
                    value={ p.composer.draft.clone() }
                    oninput={ p.on_change.reform(|e: InputEvent| {
                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                        input.value()
                    }) }
                />
                <button type="submit" class="btn btn-primary">{ "Post" }</button>
            </div>
        </form>
    }
}
