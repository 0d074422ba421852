use chrono::{Duration, TimeZone, Utc};
use rand::Rng;
use remarque_api::{Comment, CommentId};

const NUM_USERS: usize = 4;
const NUM_COMMENTS: usize = 60;
const COMMENT_MAX_WORDS: usize = 40;

/// Chance that a comment answers an earlier one
const REPLY_PROBABILITY: f64 = 0.3;

/// Chance that a comment was edited after being posted
const EDIT_PROBABILITY: f64 = 0.15;

fn main() -> serde_json::Result<()> {
    let mut rng = rand::thread_rng();
    let users = (0..NUM_USERS)
        .map(|i| format!("user{}@email.com", i))
        .collect::<Vec<_>>();

    let mut date = Utc.with_ymd_and_hms(2022, 11, 1, 9, 0, 0).unwrap();
    let mut comments: Vec<Comment> = Vec::with_capacity(NUM_COMMENTS);
    for i in 0..NUM_COMMENTS {
        date = date + Duration::seconds(rng.gen_range(30..3600));
        let updated_at = match rng.gen_bool(EDIT_PROBABILITY) {
            true => date + Duration::seconds(rng.gen_range(1..600)),
            false => date,
        };
        let reply_of = match i > 0 && rng.gen_bool(REPLY_PROBABILITY) {
            true => Some(comments[rng.gen_range(0..i)].id.clone()),
            false => None,
        };
        let words = rng.gen_range(1..=COMMENT_MAX_WORDS);
        comments.push(Comment {
            id: CommentId((i + 1).to_string()),
            created_at: date,
            updated_at,
            username: users[rng.gen_range(0..users.len())].clone(),
            payload: lipsum::lipsum_words_with_rng(&mut rng, words),
            reply_of,
        });
    }

    println!("{}", serde_json::to_string_pretty(&comments)?);
    Ok(())
}
