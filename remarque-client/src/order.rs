use crate::api::Comment;

/// Sorts oldest first; comments created at the same instant keep their
/// relative order
pub fn sort_by_creation(comments: &mut [Comment]) {
    comments.sort_by_key(|c| c.created_at);
}
