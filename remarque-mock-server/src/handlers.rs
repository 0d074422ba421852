use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use remarque_api::{
    Comment, DeleteQuery, EditComment, NewComment, StoreError, COMMENTS_PATH,
    STORE_COMMENTS_PATH,
};

use crate::{ServerError, SharedServer};

pub fn app(server: SharedServer) -> Router {
    Router::new()
        .route(
            COMMENTS_PATH,
            get(list_comments)
                .post(create_comment)
                .patch(edit_comment)
                .delete(delete_comment),
        )
        .route(STORE_COMMENTS_PATH, post(store_insert))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(server)
}

async fn list_comments(
    State(server): State<SharedServer>,
) -> Result<Json<Vec<Comment>>, ServerError> {
    Ok(Json(server.lock().await.list()?))
}

async fn create_comment(
    State(server): State<SharedServer>,
    Json(row): Json<NewComment>,
) -> Result<Json<Vec<Comment>>, ServerError> {
    Ok(Json(server.lock().await.endpoint_create(row)?))
}

async fn edit_comment(
    State(server): State<SharedServer>,
    Json(edit): Json<EditComment>,
) -> Result<Json<serde_json::Value>, ServerError> {
    Ok(Json(server.lock().await.edit(edit)?))
}

async fn delete_comment(
    State(server): State<SharedServer>,
    Query(q): Query<DeleteQuery>,
) -> Result<Json<serde_json::Value>, ServerError> {
    Ok(Json(server.lock().await.delete(&q.comment_id)?))
}

async fn store_insert(
    State(server): State<SharedServer>,
    headers: HeaderMap,
    Json(row): Json<NewComment>,
) -> Result<(StatusCode, Json<Vec<Comment>>), (StatusCode, Json<StoreError>)> {
    if !headers.contains_key("apikey") {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(StoreError::new("No API key found in request")),
        ));
    }
    server
        .lock()
        .await
        .store_insert(row)
        .map(|rows| (StatusCode::CREATED, Json(rows)))
        .map_err(|err| (StatusCode::FORBIDDEN, Json(err)))
}
