use std::sync::Arc;

use crate::{
    api::{Comment, CommentId, EditComment},
    sort_by_creation, Error,
};

/// The comment currently being edited inline
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EditState {
    pub id: CommentId,
    pub payload: String,

    /// if true, the edit was sent and no answer came back yet
    pub submitting: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CommentMode {
    Viewing,
    Editing(String),
    Submitting(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedComment {
    pub comment: Comment,

    /// Payload of the comment this one replies to
    ///
    /// Empty if the target no longer exists, `None` if this is not a reply.
    pub reply_preview: Option<String>,

    pub edited: bool,
    pub mode: CommentMode,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Composer {
    pub draft: String,
    pub reply_preview: Option<String>,
}

/// Everything needed to draw the widget
#[derive(Clone, Debug)]
pub struct Page {
    pub comments: Vec<RenderedComment>,
    pub composer: Composer,
    pub loading: bool,
    pub error: Option<Arc<Error>>,
}

fn payload_of(comments: &[Comment], id: &CommentId) -> String {
    Comment::find_in(comments, id)
        .map(|c| c.payload.clone())
        .unwrap_or_default()
}

/// Transient UI state: the composer draft, the reply target and the single
/// inline edit
#[derive(Clone, Debug, Default)]
pub struct CommentView {
    draft: String,
    reply_to: Option<CommentId>,
    edit: Option<EditState>,
}

impl CommentView {
    pub fn new() -> CommentView {
        CommentView::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: String) {
        self.draft = draft;
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn reply_target(&self) -> Option<&CommentId> {
        self.reply_to.as_ref()
    }

    pub fn start_reply(&mut self, id: CommentId) {
        self.reply_to = Some(id);
    }

    pub fn cancel_reply(&mut self) {
        self.reply_to = None;
    }

    pub fn edit_state(&self) -> Option<&EditState> {
        self.edit.as_ref()
    }

    pub fn is_editing(&self, id: &CommentId) -> bool {
        self.edit.as_ref().map_or(false, |e| e.id == *id)
    }

    /// Puts `comment` in edit mode, dropping any other unsaved edit
    pub fn start_edit(&mut self, comment: &Comment) {
        if let Some(prev) = &self.edit {
            if prev.id != comment.id {
                tracing::debug!(from = %prev.id, to = %comment.id, "moving edit focus");
            }
        }
        self.edit = Some(EditState {
            id: comment.id.clone(),
            payload: comment.payload.clone(),
            submitting: false,
        });
    }

    pub fn set_edit_payload(&mut self, payload: String) {
        if let Some(e) = &mut self.edit {
            e.payload = payload;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Marks the current edit as sent and returns the matching request
    pub fn begin_edit_submission(&mut self) -> Option<EditComment> {
        let e = self.edit.as_mut()?;
        e.submitting = true;
        Some(EditComment {
            payload: e.payload.clone(),
            comment_id: e.id.clone(),
        })
    }

    /// Makes an edit of `id` editable again after a failed submission
    pub fn abort_edit_submission(&mut self, id: &CommentId) {
        if let Some(e) = &mut self.edit {
            if e.id == *id {
                e.submitting = false;
            }
        }
    }

    pub fn mode_of(&self, id: &CommentId) -> CommentMode {
        match &self.edit {
            Some(e) if e.id == *id && e.submitting => CommentMode::Submitting(e.payload.clone()),
            Some(e) if e.id == *id => CommentMode::Editing(e.payload.clone()),
            _ => CommentMode::Viewing,
        }
    }

    /// Orders `comments` and resolves everything the list shows
    pub fn render(&self, comments: &[Comment]) -> Vec<RenderedComment> {
        let mut sorted = comments.to_vec();
        sort_by_creation(&mut sorted);
        sorted
            .into_iter()
            .map(|c| RenderedComment {
                reply_preview: c.reply_of.as_ref().map(|r| payload_of(comments, r)),
                edited: c.is_edited(),
                mode: self.mode_of(&c.id),
                comment: c,
            })
            .collect()
    }

    pub fn composer(&self, comments: &[Comment]) -> Composer {
        Composer {
            draft: self.draft.clone(),
            reply_preview: self.reply_to.as_ref().map(|r| payload_of(comments, r)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn comment(id: &str, minute: i64, payload: &str, reply_of: Option<&str>) -> Comment {
        let t = Utc.timestamp_opt(1_600_000_000, 0).unwrap() + Duration::minutes(minute);
        Comment {
            id: CommentId::from(id),
            created_at: t,
            updated_at: t,
            username: String::from("cp@email.com"),
            payload: String::from(payload),
            reply_of: reply_of.map(CommentId::from),
        }
    }

    fn sample() -> Vec<Comment> {
        vec![
            comment("b", 2, "second", None),
            comment("a", 1, "first", None),
            comment("c", 3, "answer", Some("b")),
            comment("d", 4, "orphan", Some("gone")),
        ]
    }

    #[test]
    fn renders_in_creation_order_with_reply_previews() {
        let view = CommentView::new();
        let rendered = view.render(&sample());
        let ids = rendered
            .iter()
            .map(|r| r.comment.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(rendered[0].reply_preview, None);
        assert_eq!(rendered[2].reply_preview.as_deref(), Some("second"));
        assert_eq!(rendered[3].reply_preview.as_deref(), Some(""));
        assert!(rendered.iter().all(|r| r.mode == CommentMode::Viewing));
    }

    #[test]
    fn edited_flag_follows_timestamps() {
        let mut list = sample();
        list[0].updated_at = list[0].updated_at + Duration::seconds(1);
        let rendered = CommentView::new().render(&list);
        let b = rendered.iter().find(|r| r.comment.id.as_str() == "b").unwrap();
        assert!(b.edited);
        assert!(!rendered[0].edited);
    }

    #[test]
    fn edit_focus_moves_and_drops_the_old_draft() {
        let list = sample();
        let mut view = CommentView::new();
        view.start_edit(&list[0]);
        view.set_edit_payload(String::from("unsaved"));
        view.start_edit(&list[1]);
        assert!(!view.is_editing(&list[0].id));
        assert_eq!(view.edit_state().map(|e| e.payload.as_str()), Some("first"));

        view.start_edit(&list[0]);
        assert_eq!(
            view.mode_of(&list[0].id),
            CommentMode::Editing(String::from("second"))
        );

        view.cancel_edit();
        assert_eq!(view.edit_state(), None);
    }

    #[test]
    fn submission_marks_and_unmarks() {
        let list = sample();
        let mut view = CommentView::new();
        assert_eq!(view.begin_edit_submission(), None);

        view.start_edit(&list[1]);
        view.set_edit_payload(String::from("premier"));
        let req = view.begin_edit_submission().unwrap();
        assert_eq!(req.comment_id, list[1].id);
        assert_eq!(req.payload, "premier");
        assert_eq!(
            view.mode_of(&list[1].id),
            CommentMode::Submitting(String::from("premier"))
        );

        view.abort_edit_submission(&list[1].id);
        assert_eq!(
            view.mode_of(&list[1].id),
            CommentMode::Editing(String::from("premier"))
        );
    }

    #[test]
    fn composer_previews_reply_target() {
        let list = sample();
        let mut view = CommentView::new();
        view.set_draft(String::from("hi"));
        assert_eq!(view.composer(&list).reply_preview, None);
        view.start_reply(CommentId::from("b"));
        assert_eq!(
            view.composer(&list),
            Composer {
                draft: String::from("hi"),
                reply_preview: Some(String::from("second")),
            }
        );
        view.cancel_reply();
        assert_eq!(view.reply_target(), None);
    }

    #[derive(Clone, Debug, bolero::generator::TypeGenerator)]
    enum ViewOp {
        StartEdit(u8),
        SetEditPayload(String),
        CancelEdit,
        Submit,
        Abort(u8),
        StartReply(u8),
        CancelReply,
    }

    #[test]
    fn at_most_one_comment_leaves_viewing() {
        let list = sample();
        bolero::check!()
            .with_type::<Vec<ViewOp>>()
            .cloned()
            .for_each(|ops| {
                let pick = |i: u8| &list[i as usize % list.len()];
                let mut view = CommentView::new();
                let mut expected_edit = None;
                for op in ops {
                    match op {
                        ViewOp::StartEdit(i) => {
                            let c = pick(i);
                            view.start_edit(c);
                            expected_edit = Some(c.id.clone());
                        }
                        ViewOp::SetEditPayload(p) => view.set_edit_payload(p),
                        ViewOp::CancelEdit => {
                            view.cancel_edit();
                            expected_edit = None;
                        }
                        ViewOp::Submit => {
                            view.begin_edit_submission();
                        }
                        ViewOp::Abort(i) => view.abort_edit_submission(&pick(i).id),
                        ViewOp::StartReply(i) => view.start_reply(pick(i).id.clone()),
                        ViewOp::CancelReply => view.cancel_reply(),
                    }
                    let rendered = view.render(&list);
                    let active = rendered
                        .iter()
                        .filter(|r| r.mode != CommentMode::Viewing)
                        .map(|r| r.comment.id.clone())
                        .collect::<Vec<_>>();
                    assert!(active.len() <= 1, "several comments in edit mode: {active:?}");
                    assert_eq!(active.first(), expected_edit.as_ref());
                }
            })
    }
}
