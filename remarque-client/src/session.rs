use parking_lot::Mutex;

use crate::{
    api::{Comment, CommentId, MutationOutcome, NewComment},
    Cache, CommentEndpoint, CommentView, Config, Error, InsertRoute, ListFetcher, Page, Prompt,
    RemoteStore, Snapshot,
};

pub const MSG_POSTED: &str = "Comment posted";
pub const MSG_UPDATED: &str = "Comment updated";
pub const MSG_DELETED: &str = "Comment deleted";
pub const MSG_CONFIRM_DELETE: &str = "Delete comment?";

/// Why a mutation was not confirmed by the endpoint
enum Unconfirmed {
    Ignored(serde_json::Value),
    Failed(Error),
}

/// One mounted comment widget: its cache, its view state and the services it
/// talks to
///
/// All methods take `&self` so the session can be shared with pending
/// futures; no lock is held across an await point.
pub struct Session<E: CommentEndpoint, S, P> {
    config: Config,
    cache: Cache<ListFetcher<E>>,
    store: S,
    prompt: P,
    view: Mutex<CommentView>,
}

impl<E, S, P> Session<E, S, P>
where
    E: CommentEndpoint,
    S: RemoteStore,
    P: Prompt,
{
    pub fn new(config: Config, endpoint: E, store: S, prompt: P) -> Session<E, S, P> {
        Session {
            config,
            cache: Cache::new(ListFetcher(endpoint)),
            store,
            prompt,
            view: Mutex::new(CommentView::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &Cache<ListFetcher<E>> {
        &self.cache
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    fn endpoint(&self) -> &E {
        &self.cache.fetcher().0
    }

    fn key(&self) -> &str {
        self.config.list_key()
    }

    /// Loads the comment list unless it already is in the cache
    pub async fn load(&self) -> Snapshot<Vec<Comment>> {
        self.cache.read(self.key()).await
    }

    pub async fn refresh(&self) -> Snapshot<Vec<Comment>> {
        self.cache.revalidate(self.key()).await
    }

    pub fn snapshot(&self) -> Snapshot<Vec<Comment>> {
        self.cache.peek(self.key())
    }

    pub fn with_view<R>(&self, f: impl FnOnce(&mut CommentView) -> R) -> R {
        f(&mut self.view.lock())
    }

    pub fn page(&self) -> Page {
        let snap = self.snapshot();
        let comments = snap.data.as_deref().map(|c| c as &[Comment]).unwrap_or(&[]);
        let view = self.view.lock();
        Page {
            comments: view.render(comments),
            composer: view.composer(comments),
            loading: snap.is_loading(),
            error: snap.error.clone(),
        }
    }

    pub fn set_draft(&self, draft: String) {
        self.view.lock().set_draft(draft);
    }

    pub fn start_reply(&self, id: CommentId) {
        self.view.lock().start_reply(id);
    }

    pub fn cancel_reply(&self) {
        self.view.lock().cancel_reply();
    }

    /// Enters edit mode on `id`, seeded with its cached payload
    pub fn start_edit(&self, id: &CommentId) {
        let snap = self.snapshot();
        match snap.data.as_deref().and_then(|c| Comment::find_in(c, id)) {
            Some(c) => self.view.lock().start_edit(c),
            None => tracing::warn!(%id, "tried editing a comment that is not loaded"),
        }
    }

    pub fn set_edit_payload(&self, payload: String) {
        self.view.lock().set_edit_payload(payload);
    }

    pub fn cancel_edit(&self) {
        self.view.lock().cancel_edit();
    }

    /// Sends the composer's draft as a new comment
    ///
    /// Returns true if the comment was created. On failure the draft is left
    /// untouched and the user is told why.
    pub async fn submit(&self) -> bool {
        let row = {
            let view = self.view.lock();
            NewComment {
                username: self.config.username.clone(),
                payload: String::from(view.draft()),
                reply_of: view.reply_target().cloned(),
            }
        };
        if let Err(err) = row.validate() {
            self.prompt.alert(&err.to_string());
            return false;
        }

        let res = match self.config.insert_route {
            InsertRoute::DirectToStore => self.store.insert(&row).await,
            InsertRoute::ViaEndpoint => self.endpoint().create(&row).await,
        };
        match res {
            Ok(rows) => {
                tracing::debug!(
                    rows = rows.len(),
                    route = ?self.config.insert_route,
                    "comment created"
                );
                {
                    let mut view = self.view.lock();
                    view.clear_draft();
                    view.cancel_reply();
                }
                self.refresh().await;
                self.prompt.alert(MSG_POSTED);
                true
            }
            Err(err) => {
                tracing::warn!(%err, "comment creation failed");
                self.prompt.alert(&err.user_message());
                false
            }
        }
    }

    /// Sends the inline edit, showing it in the list before the server answers
    pub async fn confirm_edit(&self) -> bool {
        let current = match self.snapshot().data {
            Some(c) => c,
            None => return false,
        };
        let edit = match self.view.lock().begin_edit_submission() {
            Some(e) => e,
            None => return false,
        };
        if let Err(err) = edit.validate() {
            self.view.lock().abort_edit_submission(&edit.comment_id);
            self.prompt.alert(&err.to_string());
            return false;
        }

        let updated = current
            .iter()
            .map(|c| match c.id == edit.comment_id {
                true => Comment {
                    payload: edit.payload.clone(),
                    ..c.clone()
                },
                false => c.clone(),
            })
            .collect();
        self.cache.optimistic_update(self.key(), updated, false).await;

        match self.endpoint().edit(&edit).await {
            Ok(MutationOutcome::Acknowledged(_)) => {
                self.refresh().await;
                self.view.lock().cancel_edit();
                self.prompt.alert(MSG_UPDATED);
                true
            }
            Ok(MutationOutcome::Unacknowledged(body)) => {
                self.rollback("update", Unconfirmed::Ignored(body)).await;
                self.view.lock().abort_edit_submission(&edit.comment_id);
                false
            }
            Err(err) => {
                self.rollback("update", Unconfirmed::Failed(err)).await;
                self.view.lock().abort_edit_submission(&edit.comment_id);
                false
            }
        }
    }

    /// Asks for confirmation, then removes `id` from the list before the
    /// server answers
    pub async fn delete(&self, id: &CommentId) -> bool {
        if !self.prompt.confirm(MSG_CONFIRM_DELETE) {
            return false;
        }
        let current = match self.snapshot().data {
            Some(c) => c,
            None => return false,
        };

        let remaining = current.iter().filter(|c| c.id != *id).cloned().collect();
        self.cache.optimistic_update(self.key(), remaining, false).await;

        match self.endpoint().delete(id).await {
            Ok(MutationOutcome::Acknowledged(_)) => {
                self.refresh().await;
                self.prompt.alert(MSG_DELETED);
                true
            }
            Ok(MutationOutcome::Unacknowledged(body)) => {
                self.rollback("delete", Unconfirmed::Ignored(body)).await;
                false
            }
            Err(err) => {
                self.rollback("delete", Unconfirmed::Failed(err)).await;
                false
            }
        }
    }

    /// Tells the user a mutation did not go through and drops the optimistic
    /// value in favor of the server's
    async fn rollback(&self, action: &str, why: Unconfirmed) {
        let reason = match why {
            Unconfirmed::Ignored(body) => {
                tracing::warn!(%body, "{action} was not acknowledged");
                String::from("the server did not acknowledge it")
            }
            Unconfirmed::Failed(err) => {
                tracing::warn!(%err, "{action} failed");
                err.user_message()
            }
        };
        self.refresh().await;
        self.prompt.alert(&format!("Could not {action} the comment: {reason}"));
    }
}
