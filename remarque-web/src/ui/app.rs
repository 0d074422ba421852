use std::rc::Rc;

use remarque_client::{api::CommentId, HttpEndpoint, HttpStore, Session};
use yew::prelude::*;

use crate::{ui, WindowPrompt};

type WebSession = Session<HttpEndpoint, HttpStore, WindowPrompt>;

pub enum AppMsg {
    /// The cached comment list changed
    Refreshed,

    DraftChanged(String),
    Submit,
    Reply(CommentId),
    CancelReply,

    StartEdit(CommentId),
    EditChanged(String),
    ConfirmEdit,
    CancelEdit,

    Delete(CommentId),
}

pub struct App {
    session: Rc<WebSession>,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = crate::config();
        let client = reqwest::Client::new();
        let session = Rc::new(Session::new(
            config.clone(),
            HttpEndpoint::new(client.clone(), config.endpoint_url),
            HttpStore::new(client, config.store_url, config.store_key),
            WindowPrompt,
        ));

        let link = ctx.link().clone();
        session
            .cache()
            .on_change(move |_| link.send_message(AppMsg::Refreshed));

        let s = session.clone();
        ctx.link().send_future(async move {
            s.load().await;
            AppMsg::Refreshed
        });

        App { session }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let session = self.session.clone();
        match msg {
            AppMsg::Refreshed => (),
            AppMsg::DraftChanged(d) => session.set_draft(d),
            AppMsg::Submit => ctx.link().send_future(async move {
                session.submit().await;
                AppMsg::Refreshed
            }),
            AppMsg::Reply(id) => session.start_reply(id),
            AppMsg::CancelReply => session.cancel_reply(),
            AppMsg::StartEdit(id) => session.start_edit(&id),
            AppMsg::EditChanged(p) => session.set_edit_payload(p),
            AppMsg::ConfirmEdit => ctx.link().send_future(async move {
                session.confirm_edit().await;
                AppMsg::Refreshed
            }),
            AppMsg::CancelEdit => session.cancel_edit(),
            AppMsg::Delete(id) => ctx.link().send_future(async move {
                session.delete(&id).await;
                AppMsg::Refreshed
            }),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let page = self.session.page();
        let link = ctx.link();
        html! {
            <div class="container py-3">
                if let Some(err) = &page.error {
                    <ui::ErrorBanner message={ err.user_message() } />
                }
                if page.loading {
                    <div class="spinner-border spinner-border-sm m-2" role="status"></div>
                }
                <ui::CommentList
                    comments={ page.comments }
                    on_start_edit={ link.callback(AppMsg::StartEdit) }
                    on_edit_change={ link.callback(AppMsg::EditChanged) }
                    on_confirm_edit={ link.callback(|_| AppMsg::ConfirmEdit) }
                    on_cancel_edit={ link.callback(|_| AppMsg::CancelEdit) }
                    on_delete={ link.callback(AppMsg::Delete) }
                    on_reply={ link.callback(AppMsg::Reply) }
                />
                <ui::CommentComposer
                    composer={ page.composer }
                    on_change={ link.callback(AppMsg::DraftChanged) }
                    on_submit={ link.callback(|_| AppMsg::Submit) }
                    on_cancel_reply={ link.callback(|_| AppMsg::CancelReply) }
                />
            </div>
        }
    }
}
