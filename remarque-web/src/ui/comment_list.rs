use remarque_client::{api::CommentId, RenderedComment};
use yew::prelude::*;

use crate::ui;

#[derive(Clone, PartialEq, Properties)]
pub struct CommentListProps {
    pub comments: Vec<RenderedComment>,
    pub on_start_edit: Callback<CommentId>,
    pub on_edit_change: Callback<String>,
    pub on_confirm_edit: Callback<()>,
    pub on_cancel_edit: Callback<()>,
    pub on_delete: Callback<CommentId>,
    pub on_reply: Callback<CommentId>,
}

#[function_component(CommentList)]
pub fn comment_list(p: &CommentListProps) -> Html {
    html! {
        <ul class="list-group mb-3">
            { for p.comments.iter().map(|c| {
                let id = c.comment.id.clone();
                html! {
                    <ui::CommentListItem
                        key={ id.as_str() }
                        comment={ c.clone() }
                        on_start_edit={ p.on_start_edit.reform({ let id = id.clone(); move |_| id.clone() }) }
                        on_edit_change={ p.on_edit_change.clone() }
                        on_confirm_edit={ p.on_confirm_edit.clone() }
                        on_cancel_edit={ p.on_cancel_edit.clone() }
                        on_delete={ p.on_delete.reform({ let id = id.clone(); move |_| id.clone() }) }
                        on_reply={ p.on_reply.reform({ let id = id.clone(); move |_| id.clone() }) }
                    />
                }
            }) }
        </ul>
    }
}
