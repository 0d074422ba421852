use std::net::SocketAddr;

use parking_lot::Mutex;
use remarque_client::{
    api::{Comment, Error as ApiError, COMMENTS_PATH},
    Config, HttpEndpoint, HttpStore, InsertRoute, Prompt, Session, MSG_DELETED, MSG_POSTED,
    MSG_UPDATED,
};
use remarque_mock_server::{MockServer, SharedServer};

struct RecordingPrompt {
    answer: bool,
    alerts: Mutex<Vec<String>>,
}

impl Prompt for RecordingPrompt {
    fn alert(&self, message: &str) {
        self.alerts.lock().push(String::from(message));
    }

    fn confirm(&self, _message: &str) -> bool {
        self.answer
    }
}

type TestSession = Session<HttpEndpoint, HttpStore, RecordingPrompt>;

struct Harness {
    server: SharedServer,
    session: TestSession,
}

impl Harness {
    fn alerts(&self) -> Vec<String> {
        self.session.prompt().alerts.lock().clone()
    }

    fn comments(&self) -> Vec<Comment> {
        self.session.page().comments.into_iter().map(|c| c.comment).collect()
    }

    async fn post(&self, payload: &str) -> Comment {
        self.session.set_draft(String::from(payload));
        assert!(self.session.submit().await, "posting {payload:?}");
        self.comments()
            .into_iter()
            .rev()
            .find(|c| c.payload == payload)
            .expect("posted comment is listed")
    }
}

fn config(addr: SocketAddr, insert_route: InsertRoute) -> Config {
    Config {
        endpoint_url: format!("http://{addr}{COMMENTS_PATH}"),
        store_url: format!("http://{addr}"),
        store_key: String::from("test-key"),
        username: String::from(Config::DEFAULT_USERNAME),
        insert_route,
    }
}

fn harness(server: MockServer, insert_route: InsertRoute, answer: bool) -> Harness {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }
    let server = server.shared();
    let addr = remarque_mock_server::spawn(server.clone()).expect("spawning mock server");
    let config = config(addr, insert_route);
    let client = reqwest::Client::new();
    let session = Session::new(
        config.clone(),
        HttpEndpoint::new(client.clone(), config.endpoint_url.clone()),
        HttpStore::new(client, config.store_url.clone(), config.store_key.clone()),
        RecordingPrompt {
            answer,
            alerts: Mutex::new(Vec::new()),
        },
    );
    Harness { server, session }
}

#[tokio::test]
async fn post_delete_and_reply() {
    let h = harness(MockServer::new(), InsertRoute::DirectToStore, true);
    assert!(h.session.load().await.data.unwrap().is_empty());

    let a = h.post("A").await;
    let b = h.post("B").await;
    let payloads = |h: &Harness| h.comments().into_iter().map(|c| c.payload).collect::<Vec<_>>();
    assert_eq!(payloads(&h), ["A", "B"]);
    assert_eq!(h.session.with_view(|v| String::from(v.draft())), "");

    assert!(h.session.delete(&a.id).await);
    assert_eq!(payloads(&h), ["B"]);

    h.session.start_reply(b.id.clone());
    assert_eq!(h.session.page().composer.reply_preview.as_deref(), Some("B"));
    let reply = h.post("hi").await;
    assert_eq!(reply.reply_of, Some(b.id.clone()));
    assert_eq!(h.session.page().composer.reply_preview, None);

    let page = h.session.page();
    assert_eq!(page.comments.len(), 2);
    assert_eq!(page.comments[1].reply_preview.as_deref(), Some("B"));
    assert_eq!(page.comments[0].reply_preview, None);

    assert_eq!(h.alerts(), [MSG_POSTED, MSG_POSTED, MSG_DELETED, MSG_POSTED]);
    assert_eq!(h.server.lock().await.store_inserts, 3);
}

#[tokio::test]
async fn acknowledged_edit_marks_the_comment_edited() {
    let h = harness(MockServer::new(), InsertRoute::DirectToStore, true);
    h.session.load().await;
    let c = h.post("first").await;
    assert!(!c.is_edited());

    h.session.start_edit(&c.id);
    h.session.set_edit_payload(String::from("X"));
    assert!(h.session.confirm_edit().await);

    let comments = h.comments();
    assert_eq!(comments.iter().filter(|c| c.payload == "X").count(), 1);
    assert!(comments[0].is_edited());
    assert!(h.session.with_view(|v| v.edit_state().is_none()));
    assert_eq!(h.alerts().last().map(String::as_str), Some(MSG_UPDATED));
}

#[tokio::test]
async fn unacknowledged_edit_rolls_back() {
    let h = harness(MockServer::new(), InsertRoute::DirectToStore, true);
    h.session.load().await;
    let c = h.post("original").await;
    h.server.lock().await.ignore_mutations = true;

    h.session.start_edit(&c.id);
    h.session.set_edit_payload(String::from("X"));
    assert!(!h.session.confirm_edit().await);

    assert_eq!(h.comments()[0].payload, "original");
    let edit = h.session.with_view(|v| v.edit_state().cloned()).unwrap();
    assert_eq!(edit.payload, "X");
    assert!(!edit.submitting);
    let last = h.alerts().pop().unwrap();
    assert!(last.starts_with("Could not update the comment"), "{last}");
}

#[tokio::test]
async fn unacknowledged_delete_restores_the_comment() {
    let h = harness(MockServer::new(), InsertRoute::DirectToStore, true);
    h.session.load().await;
    let c = h.post("stays").await;
    h.server.lock().await.ignore_mutations = true;

    assert!(!h.session.delete(&c.id).await);
    assert_eq!(h.comments(), [c]);
    let last = h.alerts().pop().unwrap();
    assert!(last.starts_with("Could not delete the comment"), "{last}");
}

#[tokio::test]
async fn refused_insert_keeps_the_draft() {
    let mut server = MockServer::new();
    server.refuse_inserts = Some(String::from("new row violates row-level security policy"));
    let h = harness(server, InsertRoute::DirectToStore, true);
    h.session.load().await;

    h.session.set_draft(String::from("lost?"));
    assert!(!h.session.submit().await);
    assert_eq!(h.alerts(), ["new row violates row-level security policy"]);
    assert_eq!(h.session.with_view(|v| String::from(v.draft())), "lost?");
    assert!(h.comments().is_empty());
}

#[tokio::test]
async fn endpoint_route_creates_through_the_endpoint() {
    let h = harness(MockServer::new(), InsertRoute::ViaEndpoint, true);
    h.session.load().await;
    h.post("via endpoint").await;

    let server = h.server.lock().await;
    assert_eq!(server.endpoint_creates, 1);
    assert_eq!(server.store_inserts, 0);
}

#[tokio::test]
async fn blank_draft_is_not_sent() {
    let h = harness(MockServer::new(), InsertRoute::DirectToStore, true);
    h.session.load().await;

    h.session.set_draft(String::from("   "));
    assert!(!h.session.submit().await);
    assert_eq!(h.alerts(), [ApiError::EmptyPayload.to_string()]);
    assert!(h.server.lock().await.comments().is_empty());
}

#[tokio::test]
async fn cancelled_delete_does_nothing() {
    let h = harness(MockServer::new(), InsertRoute::DirectToStore, false);
    h.session.load().await;
    let c = h.post("kept").await;

    assert!(!h.session.delete(&c.id).await);
    assert_eq!(h.comments(), [c]);
    assert_eq!(h.server.lock().await.comments().len(), 1);
    assert_eq!(h.alerts(), [MSG_POSTED]);
}

#[tokio::test]
async fn failed_refresh_keeps_stale_comments() {
    let h = harness(MockServer::new(), InsertRoute::DirectToStore, true);
    h.session.load().await;
    h.post("cached").await;

    h.server.lock().await.fail_listing = true;
    let snap = h.session.refresh().await;
    assert_eq!(snap.data.unwrap()[0].payload, "cached");
    assert!(snap.error.is_some());

    let page = h.session.page();
    assert_eq!(page.comments.len(), 1);
    assert!(page.error.is_some());
    assert!(!page.loading);
}

#[tokio::test]
async fn first_load_failure_is_reported() {
    let mut server = MockServer::new();
    server.fail_listing = true;
    let h = harness(server, InsertRoute::DirectToStore, true);
    let snap = h.session.load().await;
    assert!(snap.data.is_none());
    assert!(snap.error.is_some());
}
